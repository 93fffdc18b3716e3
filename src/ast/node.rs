//! The formula AST (spec §3.2) and its semantics (spec §4.1).
//!
//! Implemented as a single tagged `enum` rather than a class hierarchy of
//! node types (spec §9 redesign flag): exhaustive `match` gives the compiler
//! the case analysis for free and there is no virtual-dispatch overhead in
//! the hot evaluator. Operands are held behind `Arc` so that the search beam
//! (spec §3.3) can compose new candidates by cloning a handle instead of the
//! whole subtree; `deep_copy` is the escape hatch when true independent
//! ownership is required.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::ast::operators::{Bounds, NodeKind};
use crate::trace::{Trace, TraceWindow};

/// A node in an MLTL formula syntax tree.
///
/// Twelve variants across five syntactic kinds, exactly as spec §3.2 lists
/// them. `Arc<Formula>` children make subtrees cheap to share once built;
/// comparisons and equality are always structural (spec §3.3), never based
/// on pointer identity.
#[derive(Clone, Debug)]
pub enum Formula {
    Constant(bool),
    Variable(u32),
    Negation(Arc<Formula>),
    And(Arc<Formula>, Arc<Formula>),
    Xor(Arc<Formula>, Arc<Formula>),
    Or(Arc<Formula>, Arc<Formula>),
    Implies(Arc<Formula>, Arc<Formula>),
    Equiv(Arc<Formula>, Arc<Formula>),
    Finally(Bounds, Arc<Formula>),
    Globally(Bounds, Arc<Formula>),
    Until(Bounds, Arc<Formula>, Arc<Formula>),
    Release(Bounds, Arc<Formula>, Arc<Formula>),
}

impl Formula {
    // -- constructors --------------------------------------------------

    pub fn constant(v: bool) -> Arc<Formula> {
        Arc::new(Formula::Constant(v))
    }

    pub fn variable(id: u32) -> Arc<Formula> {
        Arc::new(Formula::Variable(id))
    }

    pub fn negation(operand: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::Negation(operand))
    }

    pub fn and(l: Arc<Formula>, r: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::And(l, r))
    }

    pub fn xor(l: Arc<Formula>, r: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::Xor(l, r))
    }

    pub fn or(l: Arc<Formula>, r: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::Or(l, r))
    }

    pub fn implies(l: Arc<Formula>, r: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::Implies(l, r))
    }

    pub fn equiv(l: Arc<Formula>, r: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::Equiv(l, r))
    }

    pub fn finally(bounds: Bounds, operand: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::Finally(bounds, operand))
    }

    pub fn globally(bounds: Bounds, operand: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::Globally(bounds, operand))
    }

    pub fn until(bounds: Bounds, l: Arc<Formula>, r: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::Until(bounds, l, r))
    }

    pub fn release(bounds: Bounds, l: Arc<Formula>, r: Arc<Formula>) -> Arc<Formula> {
        Arc::new(Formula::Release(bounds, l, r))
    }

    // -- mutation (spec §3.2 lifecycle) ---------------------------------

    /// Rewrite the bounds of a temporal node in place. No-op (returns
    /// `false`) on any other node kind.
    pub fn set_bounds(&mut self, new_bounds: Bounds) -> bool {
        match self {
            Formula::Finally(b, _)
            | Formula::Globally(b, _)
            | Formula::Until(b, _, _)
            | Formula::Release(b, _, _) => {
                *b = new_bounds;
                true
            }
            _ => false,
        }
    }

    /// Replace the sole operand of a unary node in place. No-op on any
    /// other node kind.
    pub fn replace_unary_operand(&mut self, new_operand: Arc<Formula>) -> bool {
        match self {
            Formula::Negation(c) | Formula::Finally(_, c) | Formula::Globally(_, c) => {
                *c = new_operand;
                true
            }
            _ => false,
        }
    }

    /// Replace the left/right operands of a binary node in place. No-op on
    /// any other node kind.
    pub fn replace_binary_operands(&mut self, new_left: Arc<Formula>, new_right: Arc<Formula>) -> bool {
        match self {
            Formula::And(l, r)
            | Formula::Xor(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Equiv(l, r)
            | Formula::Until(_, l, r)
            | Formula::Release(_, l, r) => {
                *l = new_left;
                *r = new_right;
                true
            }
            _ => false,
        }
    }

    // -- structure --------------------------------------------------

    pub fn get_type(&self) -> NodeKind {
        match self {
            Formula::Constant(_) => NodeKind::Constant,
            Formula::Variable(_) => NodeKind::Variable,
            Formula::Negation(_) => NodeKind::Negation,
            Formula::And(..) => NodeKind::And,
            Formula::Xor(..) => NodeKind::Xor,
            Formula::Or(..) => NodeKind::Or,
            Formula::Implies(..) => NodeKind::Implies,
            Formula::Equiv(..) => NodeKind::Equiv,
            Formula::Finally(..) => NodeKind::Finally,
            Formula::Globally(..) => NodeKind::Globally,
            Formula::Until(..) => NodeKind::Until,
            Formula::Release(..) => NodeKind::Release,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Formula::Constant(_) | Formula::Variable(_) => 1,
            Formula::Negation(c) | Formula::Finally(_, c) | Formula::Globally(_, c) => 1 + c.size(),
            Formula::And(l, r)
            | Formula::Xor(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Equiv(l, r)
            | Formula::Until(_, l, r)
            | Formula::Release(_, l, r) => 1 + l.size() + r.size(),
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            Formula::Constant(_) | Formula::Variable(_) => 0,
            Formula::Negation(c) | Formula::Finally(_, c) | Formula::Globally(_, c) => 1 + c.depth(),
            Formula::And(l, r)
            | Formula::Xor(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Equiv(l, r)
            | Formula::Until(_, l, r)
            | Formula::Release(_, l, r) => 1 + l.depth().max(r.depth()),
        }
    }

    pub fn count(&self, target: NodeKind) -> usize {
        let here = (self.get_type() == target) as usize;
        here + match self {
            Formula::Constant(_) | Formula::Variable(_) => 0,
            Formula::Negation(c) | Formula::Finally(_, c) | Formula::Globally(_, c) => c.count(target),
            Formula::And(l, r)
            | Formula::Xor(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Equiv(l, r)
            | Formula::Until(_, l, r)
            | Formula::Release(_, l, r) => l.count(target) + r.count(target),
        }
    }

    /// Structural clone that never shares a subtree with `self`, even if
    /// `self`'s own children are `Arc`-shared elsewhere (spec §8 invariant 5).
    pub fn deep_copy(&self) -> Arc<Formula> {
        match self {
            Formula::Constant(v) => Formula::constant(*v),
            Formula::Variable(id) => Formula::variable(*id),
            Formula::Negation(c) => Formula::negation(c.deep_copy()),
            Formula::And(l, r) => Formula::and(l.deep_copy(), r.deep_copy()),
            Formula::Xor(l, r) => Formula::xor(l.deep_copy(), r.deep_copy()),
            Formula::Or(l, r) => Formula::or(l.deep_copy(), r.deep_copy()),
            Formula::Implies(l, r) => Formula::implies(l.deep_copy(), r.deep_copy()),
            Formula::Equiv(l, r) => Formula::equiv(l.deep_copy(), r.deep_copy()),
            Formula::Finally(b, c) => Formula::finally(*b, c.deep_copy()),
            Formula::Globally(b, c) => Formula::globally(*b, c.deep_copy()),
            Formula::Until(b, l, r) => Formula::until(*b, l.deep_copy(), r.deep_copy()),
            Formula::Release(b, l, r) => Formula::release(*b, l.deep_copy(), r.deep_copy()),
        }
    }

    // -- textual form (spec §4.1, §6.3) --------------------------------

    pub fn as_string(&self) -> String {
        match self {
            Formula::Constant(true) => "true".to_string(),
            Formula::Constant(false) => "false".to_string(),
            Formula::Variable(id) => format!("p{id}"),
            Formula::Negation(c) => format!("(~({}))", c.as_string()),
            Formula::And(l, r) => format!("(({})&({}))", l.as_string(), r.as_string()),
            Formula::Xor(l, r) => format!("(({})^({}))", l.as_string(), r.as_string()),
            Formula::Or(l, r) => format!("(({})|({}))", l.as_string(), r.as_string()),
            Formula::Implies(l, r) => format!("(({})->({}))", l.as_string(), r.as_string()),
            Formula::Equiv(l, r) => format!("(({})<->({}))", l.as_string(), r.as_string()),
            Formula::Finally(b, c) => format!("(F{b}({}))", c.as_string()),
            Formula::Globally(b, c) => format!("(G{b}({}))", c.as_string()),
            Formula::Until(b, l, r) => format!("(({}) U{b} ({}))", l.as_string(), r.as_string()),
            Formula::Release(b, l, r) => format!("(({}) R{b} ({}))", l.as_string(), r.as_string()),
        }
    }

    /// Same canonical form with one layer of outermost redundant
    /// parentheses stripped. Every compound node's `as_string` output is
    /// wrapped in an outer `(...)` pair so it can be embedded unambiguously
    /// as a child elsewhere; at the root that pair is pure noise.
    pub fn as_pretty_string(&self) -> String {
        let s = self.as_string();
        let bytes = s.as_bytes();
        if bytes.first() == Some(&b'(') && bytes.last() == Some(&b')') {
            s[1..s.len() - 1].to_string()
        } else {
            s
        }
    }

    // -- semantics (spec §4.1.1, §4.1.2) --------------------------------

    pub fn evaluate(&self, trace: &Trace) -> bool {
        self.evaluate_subt(trace.window())
    }

    pub fn evaluate_subt(&self, w: TraceWindow<'_>) -> bool {
        match self {
            Formula::Constant(v) => *v,
            Formula::Variable(id) => match w.first_state() {
                None => false,
                Some(state) => state.get(*id as usize),
            },
            Formula::Negation(c) => !c.evaluate_subt(w),
            Formula::And(l, r) => l.evaluate_subt(w) && r.evaluate_subt(w),
            Formula::Or(l, r) => l.evaluate_subt(w) || r.evaluate_subt(w),
            Formula::Xor(l, r) => l.evaluate_subt(w) ^ r.evaluate_subt(w),
            Formula::Implies(l, r) => !l.evaluate_subt(w) || r.evaluate_subt(w),
            Formula::Equiv(l, r) => l.evaluate_subt(w) == r.evaluate_subt(w),
            Formula::Finally(b, c) => {
                let len = w.len();
                if len <= b.lb() {
                    return false;
                }
                let hi = b.ub().min(len - 1);
                (b.lb()..=hi).any(|i| c.evaluate_subt(w.suffix(i)))
            }
            Formula::Globally(b, c) => {
                let len = w.len();
                if len <= b.lb() {
                    return true;
                }
                let hi = b.ub().min(len - 1);
                (b.lb()..=hi).all(|i| c.evaluate_subt(w.suffix(i)))
            }
            Formula::Until(b, l, r) => {
                let len = w.len();
                if len <= b.lb() {
                    return false;
                }
                let hi = b.ub().min(len - 1);
                (b.lb()..=hi).any(|i| {
                    r.evaluate_subt(w.suffix(i)) && (b.lb()..i).all(|j| l.evaluate_subt(w.suffix(j)))
                })
            }
            Formula::Release(b, l, r) => {
                let len = w.len();
                if len <= b.lb() {
                    return true;
                }
                let hi = b.ub().min(len - 1);
                let r_holds_throughout = (b.lb()..=hi).all(|i| r.evaluate_subt(w.suffix(i)));
                if r_holds_throughout {
                    return true;
                }
                (b.lb()..b.ub()).any(|j| {
                    l.evaluate_subt(w.suffix(j)) && (b.lb()..=j).all(|k| r.evaluate_subt(w.suffix(k)))
                })
            }
        }
    }

    /// Minimum prefix length of a trace needed to decide the formula (MLTL
    /// Definition 6, spec §4.1.3). Uses saturating subtraction on the `-1`
    /// term so a zero future reach left operand never underflows.
    pub fn future_reach(&self) -> usize {
        match self {
            Formula::Constant(_) => 0,
            Formula::Variable(_) => 1,
            Formula::Negation(c) => c.future_reach(),
            Formula::And(l, r)
            | Formula::Xor(l, r)
            | Formula::Or(l, r)
            | Formula::Implies(l, r)
            | Formula::Equiv(l, r) => l.future_reach().max(r.future_reach()),
            Formula::Finally(b, c) | Formula::Globally(b, c) => b.ub() + c.future_reach(),
            Formula::Until(b, l, r) | Formula::Release(b, l, r) => {
                b.ub() + l.future_reach().saturating_sub(1).max(r.future_reach())
            }
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

// -- structural equality & total order (spec §4.1.4) --------------------

impl PartialEq for Formula {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Formula {}

impl PartialOrd for Formula {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Formula {
    fn cmp(&self, other: &Self) -> Ordering {
        let kind_order = self.get_type().cmp(&other.get_type());
        if kind_order != Ordering::Equal {
            return kind_order;
        }
        match (self, other) {
            (Formula::Constant(a), Formula::Constant(b)) => a.cmp(b),
            (Formula::Variable(a), Formula::Variable(b)) => a.cmp(b),
            (Formula::Negation(a), Formula::Negation(b)) => a.cmp(b),
            (Formula::Finally(ba, ca), Formula::Finally(bb, cb))
            | (Formula::Globally(ba, ca), Formula::Globally(bb, cb)) => {
                ca.cmp(cb).then_with(|| ba.lb().cmp(&bb.lb())).then_with(|| ba.ub().cmp(&bb.ub()))
            }
            (Formula::And(la, ra), Formula::And(lb, rb))
            | (Formula::Xor(la, ra), Formula::Xor(lb, rb))
            | (Formula::Or(la, ra), Formula::Or(lb, rb))
            | (Formula::Implies(la, ra), Formula::Implies(lb, rb))
            | (Formula::Equiv(la, ra), Formula::Equiv(lb, rb)) => la.cmp(lb).then_with(|| ra.cmp(rb)),
            (Formula::Until(ba, la, ra), Formula::Until(bb, lb, rb))
            | (Formula::Release(ba, la, ra), Formula::Release(bb, lb, rb)) => la
                .cmp(lb)
                .then_with(|| ra.cmp(rb))
                .then_with(|| ba.lb().cmp(&bb.lb()))
                .then_with(|| ba.ub().cmp(&bb.ub())),
            _ => unreachable!("node kinds matched above"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(id: u32) -> Arc<Formula> {
        Formula::variable(id)
    }

    #[test]
    fn size_and_depth_invariant() {
        let f = Formula::and(p(0), Formula::negation(p(1)));
        assert!(f.depth() + 1 <= f.size());
        assert!(f.size() >= 1);
    }

    #[test]
    fn canonical_round_trip_shape() {
        let f = Formula::globally(Bounds::new(0, 3).unwrap(), p(1));
        assert_eq!(f.as_string(), "(G[0,3](p1))");
        assert_eq!(f.as_pretty_string(), "G[0,3](p1)");
    }

    #[test]
    fn deep_copy_is_structurally_equal_but_distinct() {
        let f = Formula::or(p(0), p(1));
        let copy = f.deep_copy();
        assert_eq!(*f, *copy);
        assert!(!Arc::ptr_eq(&f, &copy));
    }

    #[test]
    fn double_negation_identity() {
        let trace = Trace::from_strs(["1", "0", "1"]);
        let f = p(0);
        let nn = Formula::negation(Formula::negation(p(0)));
        assert_eq!(f.evaluate(&trace), nn.evaluate(&trace));
    }

    #[test]
    fn future_reach_examples() {
        assert_eq!(Formula::constant(true).future_reach(), 0);
        assert_eq!(p(0).future_reach(), 1);
        let g = Formula::globally(Bounds::new(2, 5).unwrap(), p(0));
        assert_eq!(g.future_reach(), 5 + 1);
        let u = Formula::until(Bounds::new(0, 3).unwrap(), p(0), p(1));
        // future_reach(L)=1, saturating (1-1)=0, max with future_reach(R)=1 -> 1
        assert_eq!(u.future_reach(), 3 + 1);
    }

    #[test]
    fn ordering_is_strict_total() {
        let a = Formula::constant(false);
        let b = Formula::constant(true);
        let c = p(0);
        assert!(*a < *b);
        assert!(*b < *c);
        assert!(!(*a < *a));
    }
}
