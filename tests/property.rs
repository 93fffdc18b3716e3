//! Property-based cross-check of the windowed evaluator against a naive
//! reference evaluator that always re-slices the trace (spec §8).

use std::sync::Arc;

use proptest::prelude::*;

use mltl_miner::ast::{Bounds, Formula};
use mltl_miner::trace::{State, Trace};

fn arb_bounds() -> impl Strategy<Value = Bounds> {
    (0usize..=2, 0usize..=2).prop_map(|(a, b)| Bounds::new(a.min(b), a.max(b)).unwrap())
}

fn arb_formula() -> impl Strategy<Value = Arc<Formula>> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Formula::constant),
        (0u32..2).prop_map(Formula::variable),
    ];
    leaf.prop_recursive(3, 64, 4, |inner| {
        prop_oneof![
            inner.clone().prop_map(Formula::negation),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::and(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::or(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::xor(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::implies(l, r)),
            (inner.clone(), inner.clone()).prop_map(|(l, r)| Formula::equiv(l, r)),
            (arb_bounds(), inner.clone()).prop_map(|(b, c)| Formula::finally(b, c)),
            (arb_bounds(), inner.clone()).prop_map(|(b, c)| Formula::globally(b, c)),
            (arb_bounds(), inner.clone(), inner.clone()).prop_map(|(b, l, r)| Formula::until(b, l, r)),
            (arb_bounds(), inner.clone(), inner.clone()).prop_map(|(b, l, r)| Formula::release(b, l, r)),
        ]
    })
}

fn arb_trace(max_len: usize) -> impl Strategy<Value = Trace> {
    prop::collection::vec(prop::collection::vec(any::<bool>(), 2), 0..=max_len)
        .prop_map(|rows| Trace::new(rows.into_iter().map(|bits| State::from_bits(&bits)).collect()))
}

/// Owned sub-trace covering `[begin, end)`, built by cloning states rather
/// than borrowing — the naive counterpart to the core evaluator's window.
fn slice_trace(trace: &Trace, begin: usize, end: usize) -> Trace {
    Trace::new((begin..end).map(|i| trace.state(i).clone()).collect())
}

fn evaluate_ref(f: &Formula, trace: &Trace) -> bool {
    match f {
        Formula::Constant(v) => *v,
        Formula::Variable(id) => trace.len() > 0 && trace.state(0).get(*id as usize),
        Formula::Negation(c) => !evaluate_ref(c, trace),
        Formula::And(l, r) => evaluate_ref(l, trace) && evaluate_ref(r, trace),
        Formula::Xor(l, r) => evaluate_ref(l, trace) ^ evaluate_ref(r, trace),
        Formula::Or(l, r) => evaluate_ref(l, trace) || evaluate_ref(r, trace),
        Formula::Implies(l, r) => !evaluate_ref(l, trace) || evaluate_ref(r, trace),
        Formula::Equiv(l, r) => evaluate_ref(l, trace) == evaluate_ref(r, trace),
        Formula::Finally(b, c) => {
            let len = trace.len();
            if len <= b.lb() {
                return false;
            }
            let hi = b.ub().min(len - 1);
            (b.lb()..=hi).any(|i| evaluate_ref(c, &slice_trace(trace, i, len)))
        }
        Formula::Globally(b, c) => {
            let len = trace.len();
            if len <= b.lb() {
                return true;
            }
            let hi = b.ub().min(len - 1);
            (b.lb()..=hi).all(|i| evaluate_ref(c, &slice_trace(trace, i, len)))
        }
        Formula::Until(b, l, r) => {
            let len = trace.len();
            if len <= b.lb() {
                return false;
            }
            let hi = b.ub().min(len - 1);
            (b.lb()..=hi).any(|i| {
                evaluate_ref(r, &slice_trace(trace, i, len))
                    && (b.lb()..i).all(|j| evaluate_ref(l, &slice_trace(trace, j, len)))
            })
        }
        Formula::Release(b, l, r) => {
            let len = trace.len();
            if len <= b.lb() {
                return true;
            }
            let hi = b.ub().min(len - 1);
            let r_holds_throughout = (b.lb()..=hi).all(|i| evaluate_ref(r, &slice_trace(trace, i, len)));
            if r_holds_throughout {
                return true;
            }
            (b.lb()..b.ub()).any(|j| {
                evaluate_ref(l, &slice_trace(trace, j, len))
                    && (b.lb()..=j).all(|k| evaluate_ref(r, &slice_trace(trace, k, len)))
            })
        }
    }
}

proptest! {
    #[test]
    fn windowed_evaluator_matches_naive_reference(f in arb_formula(), trace in arb_trace(4)) {
        prop_assert_eq!(f.evaluate(&trace), evaluate_ref(&f, &trace));
    }

    #[test]
    fn double_negation_is_identity(f in arb_formula(), trace in arb_trace(4)) {
        let nn = Formula::negation(Formula::negation(f.clone()));
        prop_assert_eq!(f.evaluate(&trace), nn.evaluate(&trace));
    }
}
