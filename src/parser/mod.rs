//! MLTL formula parser (spec §4.2): a fast recursive-descent parser over a
//! precedence grammar, paired with structured diagnostics.

pub mod diagnostics;
mod grammar;
mod parens;

use std::sync::Arc;

pub use diagnostics::{ParseError, ParseErrorKind};

use crate::ast::Formula;
use grammar::{parse_range, Source};

/// Parse a complete MLTL formula string.
///
/// Whitespace is stripped first (spec §4.2.1), matching the tolerant
/// tokenizing every other MLTL tool does, then a single paren-balance pass
/// builds the matching-paren table the grammar relies on for O(1) skips.
pub fn parse(formula: &str) -> Result<Arc<Formula>, ParseError> {
    let chars: Vec<char> = formula.chars().filter(|c| !c.is_whitespace()).collect();
    let text: String = chars.iter().collect();

    if chars.is_empty() {
        return Err(ParseError::new(ParseErrorKind::UnexpectedToken, &text, 0));
    }

    let paren_map = parens::build_paren_map(&chars)?;
    let src = Source {
        chars: &chars,
        text: text.clone(),
        paren_map: &paren_map,
    };
    parse_range(&src, 0, chars.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trace::Trace;

    #[test]
    fn parses_variable_and_constants() {
        assert_eq!(parse("p0").unwrap().as_string(), "p0");
        assert_eq!(parse("true").unwrap().as_string(), "true");
        assert_eq!(parse("ff").unwrap().as_string(), "false");
    }

    #[test]
    fn parses_negation_and_binary_ops() {
        let f = parse("p0&~p1").unwrap();
        assert_eq!(f.as_pretty_string(), "(p0)&((~(p1)))");
    }

    #[test]
    fn parses_bounded_temporal_operators() {
        let f = parse("G[0,3](p0)").unwrap();
        assert_eq!(f.as_string(), "(G[0,3](p0))");
        let f = parse("F[1,2]p0").unwrap();
        assert_eq!(f.as_string(), "(F[1,2](p0))");
    }

    #[test]
    fn parses_until_and_release_with_bounds() {
        let f = parse("(p0)U[0,4](p1)").unwrap();
        assert_eq!(f.as_string(), "((p0) U[0,4] (p1))");
        let f = parse("(p0)R[1,4](p1)").unwrap();
        assert_eq!(f.as_string(), "((p0) R[1,4] (p1))");
    }

    #[test]
    fn respects_operator_precedence() {
        // & binds tighter than |, so this should parse as p0 | (p1 & p2)
        let f = parse("p0|p1&p2").unwrap();
        match f.as_ref() {
            Formula::Or(l, r) => {
                assert_eq!(l.as_string(), "p0");
                assert!(matches!(r.as_ref(), Formula::And(..)));
            }
            other => panic!("expected Or at root, got {other:?}"),
        }
    }

    #[test]
    fn round_trips_through_as_string() {
        let original = parse("(p0&~p1)R[1,4](p2)").unwrap();
        let reparsed = parse(&original.as_string()).unwrap();
        assert_eq!(*original, *reparsed);
    }

    #[test]
    fn unbalanced_parens_produce_an_error() {
        assert!(parse("(p0&p1").is_err());
        assert!(parse("p0&p1)").is_err());
    }

    #[test]
    fn missing_bounds_subscript_is_an_error() {
        assert!(parse("G(p0)").is_err());
    }

    #[test]
    fn illegal_bounds_subscript_is_an_error() {
        assert!(parse("G[3,1](p0)").is_err());
    }

    #[test]
    fn evaluates_parsed_formula_against_a_trace() {
        let f = parse("G[0,2](p0)").unwrap();
        let trace = Trace::from_strs(["1", "1", "1", "0"]);
        assert!(f.evaluate(&trace));
        let trace = Trace::from_strs(["1", "0", "1", "0"]);
        assert!(!f.evaluate(&trace));
    }
}
