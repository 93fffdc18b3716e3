//! Classification accuracy (spec §4.4.3).

use crate::ast::Formula;
use crate::trace::Trace;

/// `(|{t in pos : phi(t)}| + |{t in neg : !phi(t)}|) / (|pos| + |neg|)`.
pub fn calc_accuracy(formula: &Formula, pos: &[Trace], neg: &[Trace]) -> f64 {
    let total = pos.len() + neg.len();
    if total == 0 {
        return 0.0;
    }
    let satisfied = pos.iter().filter(|t| formula.evaluate(t)).count()
        + neg.iter().filter(|t| !formula.evaluate(t)).count();
    satisfied as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Bounds;
    use std::sync::Arc;

    #[test]
    fn perfect_classifier_scores_one() {
        let phi = Formula::globally(Bounds::new(0, 10).unwrap(), Formula::variable(0));
        let pos = vec![Trace::from_strs(["1", "1", "1"]), Trace::from_strs(["1", "1"])];
        let neg = vec![Trace::from_strs(["0", "1", "1"])];
        assert_eq!(calc_accuracy(&phi, &pos, &neg), 1.0);
    }

    #[test]
    fn empty_dataset_is_zero() {
        let phi: Arc<Formula> = Formula::constant(true);
        assert_eq!(calc_accuracy(&phi, &[], &[]), 0.0);
    }
}
