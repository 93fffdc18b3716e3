//! Variable subset and Boolean sub-function enumeration (spec §4.4.2 steps
//! 2–3), plus the `int_to_bin_str` helper from spec §6.5.

use std::sync::Arc;

use crate::ast::Formula;
use crate::minimizer::quine_mccluskey;

/// Little-endian bit string of `n`, truncated or left-padded to `width`
/// bits (spec §6.5): bit 0 of `n` becomes the first character.
pub fn int_to_bin_str(n: u32, width: usize) -> String {
    (0..width).map(|i| if (n >> i) & 1 == 1 { '1' } else { '0' }).collect()
}

/// Every `k`-sized subset of `items`, in combinatorial (lexicographic) order.
pub fn combinations(items: &[usize], k: usize) -> Vec<Vec<usize>> {
    let mut result = Vec::new();
    let mut current = Vec::with_capacity(k);
    combinations_rec(items, k, 0, &mut current, &mut result);
    result
}

fn combinations_rec(items: &[usize], k: usize, start: usize, current: &mut Vec<usize>, result: &mut Vec<Vec<usize>>) {
    if current.len() == k {
        result.push(current.clone());
        return;
    }
    for i in start..items.len() {
        current.push(items[i]);
        combinations_rec(items, k, i + 1, current, result);
        current.pop();
    }
}

/// Rebuild `formula` with every `Variable(old_id)` replaced by
/// `Variable(new_ids[old_id])`, where `new_ids` maps a 0-based subset
/// position to the real trace variable index.
pub fn substitute_vars(formula: &Formula, new_ids: &[usize]) -> Arc<Formula> {
    match formula {
        Formula::Constant(v) => Formula::constant(*v),
        Formula::Variable(id) => Formula::variable(new_ids[*id as usize] as u32),
        Formula::Negation(c) => Formula::negation(substitute_vars(c, new_ids)),
        Formula::And(l, r) => Formula::and(substitute_vars(l, new_ids), substitute_vars(r, new_ids)),
        Formula::Xor(l, r) => Formula::xor(substitute_vars(l, new_ids), substitute_vars(r, new_ids)),
        Formula::Or(l, r) => Formula::or(substitute_vars(l, new_ids), substitute_vars(r, new_ids)),
        Formula::Implies(l, r) => Formula::implies(substitute_vars(l, new_ids), substitute_vars(r, new_ids)),
        Formula::Equiv(l, r) => Formula::equiv(substitute_vars(l, new_ids), substitute_vars(r, new_ids)),
        Formula::Finally(b, c) => Formula::finally(*b, substitute_vars(c, new_ids)),
        Formula::Globally(b, c) => Formula::globally(*b, substitute_vars(c, new_ids)),
        Formula::Until(b, l, r) => Formula::until(*b, substitute_vars(l, new_ids), substitute_vars(r, new_ids)),
        Formula::Release(b, l, r) => Formula::release(*b, substitute_vars(l, new_ids), substitute_vars(r, new_ids)),
    }
}

/// All Boolean sub-functions over `num_vars` variables, minus the always-true
/// and always-false truth tables (spec §4.4.2 step 3), substituted over every
/// `num_vars`-sized subset of `trace_vars` and deduplicated structurally.
pub fn generate_boolean_functions(trace_vars: usize, num_vars: usize) -> Vec<Arc<Formula>> {
    let truth_table_rows = 1usize << num_vars;
    let inputs: Vec<String> = (0..truth_table_rows as u32).map(|i| int_to_bin_str(i, num_vars)).collect();

    let num_boolean_functions = 1u64 << truth_table_rows;
    let mut base_funcs = Vec::with_capacity((num_boolean_functions - 2) as usize);
    for i in 1..num_boolean_functions - 1 {
        let implicants: Vec<String> = (0..truth_table_rows)
            .filter(|&j| (i >> j) & 1 == 1)
            .map(|j| inputs[j].clone())
            .collect();
        base_funcs.push(quine_mccluskey(&implicants));
    }

    let all_vars: Vec<usize> = (0..trace_vars).collect();
    let subsets = if trace_vars > num_vars {
        combinations(&all_vars, num_vars)
    } else {
        vec![all_vars]
    };

    let mut funcs: Vec<Arc<Formula>> = Vec::new();
    for subset in &subsets {
        for base in &base_funcs {
            let substituted = substitute_vars(base, subset);
            if !funcs.iter().any(|f| **f == *substituted) {
                funcs.push(substituted);
            }
        }
    }
    funcs
}
