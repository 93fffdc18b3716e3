//! AST kernel (spec §3.2, §4.1): node representation, operator tags, and the
//! recursive windowed evaluator.

pub mod node;
pub mod operators;

pub use node::Formula;
pub use operators::{BinaryPropSymbol, Bounds, NodeKind};
