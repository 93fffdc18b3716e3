//! Quine–McCluskey Boolean minimizer (spec §4.3), ported from
//! `astar/quine_mccluskey.cc`'s `reduce`/`get_clause_as_ast` pair. The
//! "INVALID FORMULA BUG WORK AROUND" redundant-parenthesization present in
//! the original is dropped; this AST's `as_string` has no such printer bug.

use std::sync::Arc;

use crate::ast::Formula;

fn is_grey_code(a: &[u8], b: &[u8]) -> bool {
    a.iter().zip(b).filter(|(x, y)| x != y).count() == 1
}

fn replace_complements(a: &[u8], b: &[u8]) -> Vec<u8> {
    a.iter()
        .zip(b)
        .map(|(&x, &y)| if x == y { x } else { b'-' })
        .collect()
}

/// One pass of pairwise gray-code combination. Terms that combined with some
/// partner are dropped in favor of the combined don't-care term; terms that
/// combined with nothing carry forward unchanged.
fn reduce(minterms: &[Vec<u8>]) -> Vec<Vec<u8>> {
    let mut combined = Vec::new();
    let mut checked = vec![false; minterms.len()];

    for i in 0..minterms.len() {
        for j in i..minterms.len() {
            if is_grey_code(&minterms[i], &minterms[j]) {
                checked[i] = true;
                checked[j] = true;
                let merged = replace_complements(&minterms[i], &minterms[j]);
                if !combined.contains(&merged) {
                    combined.push(merged);
                }
            }
        }
    }

    for (i, term) in minterms.iter().enumerate() {
        if !checked[i] && !combined.contains(term) {
            combined.push(term.clone());
        }
    }

    combined
}

/// Build the AND-chain-of-literals clause for one residual term. A fully
/// don't-care term (`----`) is the tautology.
fn clause_as_ast(term: &[u8]) -> Arc<Formula> {
    if term.iter().all(|&c| c == b'-') {
        return Formula::constant(true);
    }

    let literals: Vec<Arc<Formula>> = term
        .iter()
        .enumerate()
        .filter(|(_, &c)| c != b'-')
        .map(|(i, &c)| {
            let var = Formula::variable(i as u32);
            if c == b'0' {
                Formula::negation(var)
            } else {
                var
            }
        })
        .collect();

    let mut iter = literals.into_iter().rev();
    let mut node = iter.next().expect("at least one literal since term is not all don't-cares");
    for lit in iter {
        node = Formula::and(lit, node);
    }
    node
}

/// Run Quine–McCluskey on a set of satisfying assignments (minterms, each a
/// bit string over the same number of variables) and return the minimized
/// DNF AST.
///
/// An empty `implicants` is `false`; this never returns a bare `true` purely
/// from emptiness checks, matching the original's `num_boolean_functions - 1`
/// exclusion of the all-true row at the caller.
pub fn quine_mccluskey(implicants: &[String]) -> Arc<Formula> {
    if implicants.is_empty() {
        return Formula::constant(false);
    }

    let num_vars = implicants[0].len();
    debug_assert!(num_vars > 0);
    debug_assert!(implicants.iter().all(|s| s.len() == num_vars));

    let mut minterms: Vec<Vec<u8>> = implicants.iter().map(|s| s.as_bytes().to_vec()).collect();
    minterms.sort();

    loop {
        let next = reduce(&minterms);
        let mut next_sorted = next.clone();
        next_sorted.sort();
        if next_sorted == minterms {
            break;
        }
        minterms = next_sorted;
    }

    let mut iter = minterms.iter().rev();
    let mut node = clause_as_ast(iter.next().expect("checked non-empty above"));
    for term in iter {
        node = Formula::or(clause_as_ast(term), node);
    }
    node
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;

    fn truth_table_row(dnf: &Arc<Formula>, bits: &str) -> bool {
        dnf.evaluate(&Trace::from_strs([bits]))
    }

    #[test]
    fn empty_implicants_is_false() {
        let dnf = quine_mccluskey(&[]);
        assert!(matches!(*dnf, Formula::Constant(false)));
    }

    #[test]
    fn single_minterm_round_trips() {
        let dnf = quine_mccluskey(&["101".to_string()]);
        assert!(truth_table_row(&dnf, "101"));
        assert!(!truth_table_row(&dnf, "100"));
        assert!(!truth_table_row(&dnf, "001"));
    }

    #[test]
    fn reduces_adjacent_minterms_to_a_dont_care() {
        // 00 and 01 differ only in the last bit -> reduces to "0-", i.e. ~p0
        let dnf = quine_mccluskey(&["00".to_string(), "01".to_string()]);
        assert!(truth_table_row(&dnf, "00"));
        assert!(truth_table_row(&dnf, "01"));
        assert!(!truth_table_row(&dnf, "10"));
        assert!(!truth_table_row(&dnf, "11"));
    }

    #[test]
    fn matches_input_minterm_set_on_all_assignments() {
        let implicants: Vec<String> = [
            "0000", "0001", "0010", "0100", "1000", "0110", "1001", "1011", "1101", "1111",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let dnf = quine_mccluskey(&implicants);

        for n in 0u32..16 {
            let bits: String = (0..4).map(|i| if (n >> (3 - i)) & 1 == 1 { '1' } else { '0' }).collect();
            let expected = implicants.contains(&bits);
            assert_eq!(truth_table_row(&dnf, &bits), expected, "mismatch on {bits}");
        }
    }
}
