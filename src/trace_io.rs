//! Dataset loading (spec §6.1–§6.2): a dataset directory holds four
//! subdirectories of trace files, each trace one file with one state per
//! line.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{MltlError, Result};
use crate::trace::{State, Trace};

fn io_err(path: &Path, source: std::io::Error) -> MltlError {
    MltlError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Read one trace file: one state per line, non-`0`/`1` characters on a line
/// are dropped, trailing/empty lines tolerated (spec §6.1).
pub fn read_trace_file(path: &Path) -> Result<Trace> {
    let contents = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    let states = contents.lines().map(State::from_line).collect();
    Ok(Trace::new(states))
}

/// Read every trace file directly inside `dir` (non-recursive), order not
/// significant per spec §6.2.
pub fn read_trace_dir(dir: &Path) -> Result<Vec<Trace>> {
    let entries = fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    let mut traces = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if path.is_file() {
            traces.push(read_trace_file(&path)?);
        }
    }
    Ok(traces)
}

/// The four trace banks a dataset directory supplies (spec §6.2).
pub struct Dataset {
    pub pos_train: Vec<Trace>,
    pub neg_train: Vec<Trace>,
    pub pos_test: Vec<Trace>,
    pub neg_test: Vec<Trace>,
}

impl Dataset {
    pub fn load(root: &Path) -> Result<Dataset> {
        Ok(Dataset {
            pos_train: read_trace_dir(&subdir(root, "pos_train"))?,
            neg_train: read_trace_dir(&subdir(root, "neg_train"))?,
            pos_test: read_trace_dir(&subdir(root, "pos_test"))?,
            neg_test: read_trace_dir(&subdir(root, "neg_test"))?,
        })
    }

    /// Longest trace among the positive training examples (spec §4.4.2 step
    /// 1's `max_pos_train_trace_len`).
    pub fn max_pos_train_trace_len(&self) -> usize {
        self.pos_train.iter().map(Trace::len).max().unwrap_or(0)
    }

    /// Width shared by all states in the positive training traces, 0 if
    /// there are none.
    pub fn num_vars_in_trace(&self) -> usize {
        self.pos_train.iter().find(|t| !t.is_empty()).map_or(0, Trace::num_vars)
    }
}

fn subdir(root: &Path, name: &str) -> PathBuf {
    root.join(name)
}
