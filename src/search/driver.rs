//! Search pipeline (spec §4.4.2): enumerate interesting Boolean
//! sub-functions, seed depth-1 temporal wrappers and binary combinations,
//! then grow the beam by depth up to `max_depth`.

use std::sync::Arc;

use rayon::prelude::*;

use crate::ast::{Bounds, Formula};
use crate::error::{MltlError, Result};
use crate::search::accuracy::calc_accuracy;
use crate::search::beam::{Bank, Beam, Candidate, SharedBeam};
use crate::search::config::SearchConfig;
use crate::search::enumerate::generate_boolean_functions;
use crate::search::interesting::filter_interesting;
use crate::trace_io::Dataset;

pub struct ReportedFormula {
    pub formula: Arc<Formula>,
    pub train_accuracy: f64,
    pub test_accuracy: f64,
}

pub struct SearchReport {
    pub num_boolean_functions: usize,
    pub num_interesting: usize,
    pub best: Vec<ReportedFormula>,
    pub worst: Vec<ReportedFormula>,
}

/// `(lb, ub)` grid per spec §4.4.2: `lb` steps from 0 to `max_ub`, `ub`
/// steps from `lb + step` to `max_ub`, both by `step`.
fn bounds_grid(max_ub: usize, step: usize) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    let mut lb = 0;
    while lb <= max_ub {
        let mut ub = lb + step;
        while ub <= max_ub {
            pairs.push((lb, ub));
            ub += step;
        }
        lb += step;
    }
    pairs
}

fn offer_both(best: &SharedBeam, worst: &SharedBeam, formula: Arc<Formula>, accuracy: f64, depth: usize) {
    best.offer(Candidate {
        formula: formula.clone(),
        accuracy,
        depth,
    });
    worst.offer(Candidate { formula, accuracy, depth });
}

pub fn run_search(config: &SearchConfig, dataset: &Dataset) -> Result<SearchReport> {
    config.validate()?;

    let max_pos_train_trace_len = dataset.max_pos_train_trace_len();
    let num_vars_in_trace = dataset.num_vars_in_trace();
    if num_vars_in_trace == 0 {
        return Err(MltlError::Config("training traces are empty".to_string()));
    }
    let num_vars = config.max_vars.min(num_vars_in_trace);
    let bounds_step = config.bounds_step.unwrap_or_else(|| (max_pos_train_trace_len / 5).max(1));
    let max_ub = max_pos_train_trace_len.saturating_sub(1);

    log::info!("generating boolean sub-functions over {num_vars} of {num_vars_in_trace} variables");
    let bool_funcs = generate_boolean_functions(num_vars_in_trace, num_vars);
    log::info!("num bool funcs: {}", bool_funcs.len());

    let interesting = filter_interesting(
        &bool_funcs,
        num_vars_in_trace,
        max_ub,
        &dataset.pos_train,
        &dataset.neg_train,
    );
    log::info!("num interesting bool funcs: {}", interesting.len());

    let best = SharedBeam::new(Bank::Best, config.max_formulas);
    let worst = SharedBeam::new(Bank::Worst, config.max_formulas);
    let grid = bounds_grid(max_ub, bounds_step);

    // depth-1 seeding: unary temporal wrappers over every interesting operand.
    interesting.par_iter().for_each(|operand| {
        for &(lb, ub) in &grid {
            let bounds = Bounds::new(lb, ub).expect("grid pairs satisfy lb <= ub");
            let g = Formula::globally(bounds, operand.clone());
            let acc = calc_accuracy(&g, &dataset.pos_train, &dataset.neg_train);
            offer_both(&best, &worst, g, acc, 1);

            let f = Formula::finally(bounds, operand.clone());
            let acc = calc_accuracy(&f, &dataset.pos_train, &dataset.neg_train);
            offer_both(&best, &worst, f, acc, 1);
        }
    });

    // size-cap before building the O(n^2) binary-temporal product.
    let reduced_interesting: Vec<Arc<Formula>> =
        interesting.iter().filter(|f| f.size() <= config.max_bool_func_size).cloned().collect();
    log::info!("num reduced interesting bool funcs: {}", reduced_interesting.len());

    reduced_interesting.par_iter().enumerate().for_each(|(i, operand1)| {
        for (j, operand2) in reduced_interesting.iter().enumerate() {
            if i == j {
                continue;
            }
            for &(lb, ub) in &grid {
                let bounds = Bounds::new(lb, ub).expect("grid pairs satisfy lb <= ub");
                let u = Formula::until(bounds, operand1.clone(), operand2.clone());
                let acc = calc_accuracy(&u, &dataset.pos_train, &dataset.neg_train);
                offer_both(&best, &worst, u, acc, 1);

                let r = Formula::release(bounds, operand1.clone(), operand2.clone());
                let acc = calc_accuracy(&r, &dataset.pos_train, &dataset.neg_train);
                offer_both(&best, &worst, r, acc, 1);
            }
        }
    });

    let mut best = best.into_inner();
    let mut worst = worst.into_inner();

    for depth in 2..=config.max_depth {
        log::info!("generating depth {depth} functions");
        let next_best = SharedBeam::new(Bank::Best, config.max_formulas);
        let next_worst = SharedBeam::new(Bank::Worst, config.max_formulas);

        grow_depth(
            depth,
            &best,
            &reduced_interesting,
            max_pos_train_trace_len,
            &grid,
            &dataset.pos_train,
            &dataset.neg_train,
            &next_best,
            &next_worst,
        );
        grow_depth(
            depth,
            &worst,
            &reduced_interesting,
            max_pos_train_trace_len,
            &grid,
            &dataset.pos_train,
            &dataset.neg_train,
            &next_best,
            &next_worst,
        );

        let mut merged_best = next_best.into_inner();
        let mut merged_worst = next_worst.into_inner();
        for c in best.iter().cloned() {
            merged_best.offer(c);
        }
        for c in worst.iter().cloned() {
            merged_worst.offer(c);
        }
        merged_best.truncate_to(config.max_formulas);
        merged_worst.truncate_to(config.max_formulas);
        best = merged_best;
        worst = merged_worst;
    }

    let report_bank = |beam: Beam| -> Vec<ReportedFormula> {
        beam.into_sorted_desc()
            .into_iter()
            .map(|c| ReportedFormula {
                test_accuracy: calc_accuracy(&c.formula, &dataset.pos_test, &dataset.neg_test),
                train_accuracy: c.accuracy,
                formula: c.formula,
            })
            .collect()
    };

    Ok(SearchReport {
        num_boolean_functions: bool_funcs.len(),
        num_interesting: interesting.len(),
        best: report_bank(best),
        worst: report_bank(worst),
    })
}

/// Builds depth-`depth` candidates from `source` (a depth-`<depth` bank) and
/// admits them into `next_best`/`next_worst` (spec §4.4.2 step 7).
#[allow(clippy::too_many_arguments)]
fn grow_depth(
    depth: usize,
    source: &Beam,
    interesting: &[Arc<Formula>],
    max_pos_train_trace_len: usize,
    grid: &[(usize, usize)],
    pos_train: &[crate::trace::Trace],
    neg_train: &[crate::trace::Trace],
    next_best: &SharedBeam,
    next_worst: &SharedBeam,
) {
    let operands: Vec<&Candidate> = source.iter().collect();

    operands.par_iter().for_each(|operand1| {
        for &(lb, ub) in grid {
            let bounds = match Bounds::new(lb, ub) {
                Ok(b) => b,
                Err(_) => continue,
            };
            if operand1.formula.future_reach() + ub > max_pos_train_trace_len {
                continue;
            }

            if operand1.depth == depth - 1 {
                let g = Formula::globally(bounds, operand1.formula.clone());
                let acc = calc_accuracy(&g, pos_train, neg_train);
                offer_both(next_best, next_worst, g, acc, depth);

                let f = Formula::finally(bounds, operand1.formula.clone());
                let acc = calc_accuracy(&f, pos_train, neg_train);
                offer_both(next_best, next_worst, f, acc, depth);
            }

            for operand2 in &operands {
                if Arc::ptr_eq(&operand1.formula, &operand2.formula) {
                    continue;
                }
                if operand1.depth < depth - 1 && operand2.depth < depth - 1 {
                    continue;
                }
                if operand2.formula.future_reach() + ub > max_pos_train_trace_len {
                    continue;
                }

                let u = Formula::until(bounds, operand1.formula.clone(), operand2.formula.clone());
                let acc = calc_accuracy(&u, pos_train, neg_train);
                offer_both(next_best, next_worst, u, acc, depth);

                let r = Formula::release(bounds, operand1.formula.clone(), operand2.formula.clone());
                let acc = calc_accuracy(&r, pos_train, neg_train);
                offer_both(next_best, next_worst, r, acc, depth);
            }

            if operand1.depth == depth - 1 {
                for operand2 in interesting {
                    if operand2.future_reach() + ub > max_pos_train_trace_len {
                        continue;
                    }

                    let u = Formula::until(bounds, operand1.formula.clone(), operand2.clone());
                    let acc = calc_accuracy(&u, pos_train, neg_train);
                    offer_both(next_best, next_worst, u, acc, depth);

                    let r = Formula::release(bounds, operand1.formula.clone(), operand2.clone());
                    let acc = calc_accuracy(&r, pos_train, neg_train);
                    offer_both(next_best, next_worst, r, acc, depth);

                    let u2 = Formula::until(bounds, operand2.clone(), operand1.formula.clone());
                    let acc = calc_accuracy(&u2, pos_train, neg_train);
                    offer_both(next_best, next_worst, u2, acc, depth);

                    let r2 = Formula::release(bounds, operand2.clone(), operand1.formula.clone());
                    let acc = calc_accuracy(&r2, pos_train, neg_train);
                    offer_both(next_best, next_worst, r2, acc, depth);

                    // Mixed forms (spec §4.4.2 step 7): G/F[lb,ub] over an
                    // And/Or of a depth-(d-1) operand and an interesting
                    // sub-function, with the sub-function optionally negated.
                    let negated_operand2 = Formula::negation(operand2.clone());
                    for rhs in [operand2.clone(), negated_operand2] {
                        let conj = Formula::and(operand1.formula.clone(), rhs.clone());
                        let g_conj = Formula::globally(bounds, conj.clone());
                        let acc = calc_accuracy(&g_conj, pos_train, neg_train);
                        offer_both(next_best, next_worst, g_conj, acc, depth);

                        let f_conj = Formula::finally(bounds, conj);
                        let acc = calc_accuracy(&f_conj, pos_train, neg_train);
                        offer_both(next_best, next_worst, f_conj, acc, depth);

                        let disj = Formula::or(operand1.formula.clone(), rhs);
                        let g_disj = Formula::globally(bounds, disj.clone());
                        let acc = calc_accuracy(&g_disj, pos_train, neg_train);
                        offer_both(next_best, next_worst, g_disj, acc, depth);

                        let f_disj = Formula::finally(bounds, disj);
                        let acc = calc_accuracy(&f_disj, pos_train, neg_train);
                        offer_both(next_best, next_worst, f_disj, acc, depth);
                    }
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_grid_matches_original_loop_shape() {
        let grid = bounds_grid(10, 5);
        assert_eq!(grid, vec![(0, 5), (0, 10), (5, 10)]);
    }

    #[test]
    fn bounds_grid_empty_when_step_exceeds_range() {
        assert!(bounds_grid(2, 5).is_empty());
    }
}
