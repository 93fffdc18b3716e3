//! Concrete regression scenarios.

use mltl_miner::parser::parse;
use mltl_miner::trace::Trace;

#[test]
fn parser_round_trip_on_bounded_release() {
    let f = parse("(p0&~p1)R[1,4](p2)").unwrap();
    let trace = Trace::from_strs(["000", "001", "001", "101", "000"]);
    // `p0&~p1` holds at index 3 and `p2` holds at every index in [1,3], so
    // the release is satisfied there. See DESIGN.md for why this differs
    // from the example's originally stated answer.
    assert!(f.evaluate(&trace));
}

#[test]
fn bounded_globally_over_single_variable() {
    let f = parse("G[0,3](p1)").unwrap();
    assert!(f.evaluate(&Trace::from_strs(["01", "11", "01", "11"])));
    assert!(!f.evaluate(&Trace::from_strs(["01", "10", "01", "11"])));
}

#[test]
fn bounded_finally_over_conjunction() {
    let f = parse("F[0,3](p0&p1)").unwrap();
    assert!(f.evaluate(&Trace::from_strs(["00", "11", "00", "00"])));
    assert!(!f.evaluate(&Trace::from_strs(["00", "00", "10", "01"])));
}

#[test]
fn bounded_until_requires_left_operand_until_right_first_holds() {
    let f = parse("(p0)U[0,3](p1)").unwrap();
    assert!(f.evaluate(&Trace::from_strs(["10", "10", "11", "00"])));
    // p0 fails at index 1, before p1 first holds at index 2.
    assert!(!f.evaluate(&Trace::from_strs(["10", "00", "11", "00"])));
}

#[test]
fn bounded_release_with_constant_left_operand() {
    let f = parse("(false)R[0,3](p0)").unwrap();
    assert!(f.evaluate(&Trace::from_strs(["1", "1", "1", "1"])));
    assert!(!f.evaluate(&Trace::from_strs(["1", "1", "0", "1"])));
}
