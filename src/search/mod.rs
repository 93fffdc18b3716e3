//! Enumerative beam search over MLTL formulas (spec §4.4).

pub mod accuracy;
pub mod beam;
pub mod config;
pub mod driver;
pub mod enumerate;
pub mod interesting;
pub mod report;

pub use config::SearchConfig;
pub use driver::{run_search, ReportedFormula, SearchReport};
