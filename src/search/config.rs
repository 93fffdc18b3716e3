//! Search configuration (spec §4.4.1): the single source of truth consumed
//! by both the CLI and any embedding test.

use std::path::PathBuf;

use crate::error::MltlError;

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub dataset_path: PathBuf,
    pub max_vars: usize,
    pub max_bool_func_size: usize,
    pub bounds_step: Option<usize>,
    pub max_formulas: usize,
    pub max_depth: usize,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), MltlError> {
        if self.max_vars == 0 {
            return Err(MltlError::Config("max_vars must be at least 1".to_string()));
        }
        if self.max_formulas == 0 {
            return Err(MltlError::Config("max_formulas must be at least 1".to_string()));
        }
        if self.max_depth == 0 {
            return Err(MltlError::Config("max_depth must be at least 1".to_string()));
        }
        if let Some(step) = self.bounds_step {
            if step == 0 {
                return Err(MltlError::Config("bounds_step must be at least 1".to_string()));
            }
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            dataset_path: PathBuf::from("."),
            max_vars: 3,
            max_bool_func_size: 6,
            bounds_step: None,
            max_formulas: 256,
            max_depth: 2,
        }
    }
}
