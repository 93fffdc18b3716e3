//! Interesting Boolean sub-function filtering (spec §4.4.2 step 4): a
//! sub-function earns its place in the search if wrapping it in an
//! unbounded `G` or `F` already beats chance on the training set.

use std::sync::Arc;

use crate::ast::{Bounds, Formula};
use crate::search::accuracy::calc_accuracy;
use crate::trace::Trace;

/// Trace variables and their negations, plus every generated Boolean
/// sub-function whose `G[0,max_ub]` or `F[0,max_ub]` wrapper scores above
/// chance, deduplicated and kept in a stable (first-seen) order for
/// reproducibility.
pub fn filter_interesting(
    candidates: &[Arc<Formula>],
    num_vars_in_trace: usize,
    max_ub: usize,
    pos_train: &[Trace],
    neg_train: &[Trace],
) -> Vec<Arc<Formula>> {
    let mut interesting: Vec<Arc<Formula>> = Vec::new();

    for id in 0..num_vars_in_trace as u32 {
        interesting.push(Formula::variable(id));
        interesting.push(Formula::negation(Formula::variable(id)));
    }

    let bounds = Bounds::new(0, max_ub).expect("max_ub >= 0");
    for candidate in candidates {
        let finally_acc = calc_accuracy(&Formula::finally(bounds, candidate.clone()), pos_train, neg_train);
        let globally_acc = calc_accuracy(&Formula::globally(bounds, candidate.clone()), pos_train, neg_train);
        if (finally_acc > 0.5 || globally_acc > 0.5) && !interesting.iter().any(|f| **f == **candidate) {
            interesting.push(candidate.clone());
        }
    }

    interesting
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn always_includes_trace_variables_and_negations() {
        let interesting = filter_interesting(&[], 2, 3, &[], &[]);
        assert_eq!(interesting.len(), 4);
    }

    #[test]
    fn keeps_a_discriminating_sub_function() {
        let pos = vec![Trace::from_strs(["1"]), Trace::from_strs(["1"])];
        let neg = vec![Trace::from_strs(["0"]), Trace::from_strs(["0"])];
        let interesting = filter_interesting(&[Formula::variable(0)], 1, 0, &pos, &neg);
        // p0 is already included as a trace variable; should not duplicate.
        assert_eq!(interesting.iter().filter(|f| ***f == *Formula::variable(0)).count(), 1);
    }
}
