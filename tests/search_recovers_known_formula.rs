//! The search driver must recover a known discriminating formula when one
//! exists exactly within the configured depth and bounds grid.

use mltl_miner::search::{run_search, SearchConfig};
use mltl_miner::trace::Trace;
use mltl_miner::trace_io::Dataset;
use std::path::PathBuf;

/// Positives hold `p0` throughout an 11-state trace; each negative violates
/// `p0` at a distinct index in `[0,10]`, so only `G[0,10](p0)` classifies
/// every example correctly.
fn dataset() -> Dataset {
    let pos: Vec<Trace> = (0..4).map(|_| Trace::from_strs(vec!["1"; 11])).collect();
    let neg: Vec<Trace> = (0..11)
        .map(|bad| {
            let mut states = vec!["1"; 11];
            states[bad] = "0";
            Trace::from_strs(states)
        })
        .collect();
    Dataset {
        pos_train: pos.clone(),
        neg_train: neg.clone(),
        pos_test: pos,
        neg_test: neg,
    }
}

#[test]
fn recovers_globally_bounded_formula() {
    let dataset = dataset();
    let config = SearchConfig {
        dataset_path: PathBuf::from("."),
        ..SearchConfig::default()
    };

    let report = run_search(&config, &dataset).unwrap();

    assert!(report
        .best
        .iter()
        .any(|r| r.train_accuracy >= 0.999 && r.formula.as_pretty_string() == "G[0,10](p0)"));
}
