//! CLI entry point: loads a labeled trace dataset, runs the beam search, and
//! prints a colored accuracy report (spec §6.4).

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use mltl_miner::error::MltlError;
use mltl_miner::search::{run_search, SearchConfig};
use mltl_miner::trace_io::Dataset;

/// Mines MLTL formulas that classify a labeled dataset of finite traces.
#[derive(Parser)]
#[clap(author, version, about)]
struct Arguments {
    /// Path to a dataset directory containing pos_train/neg_train/pos_test/neg_test subdirectories.
    dataset_path: PathBuf,

    /// Maximum number of trace variables considered per Boolean sub-function.
    #[clap(long, default_value_t = SearchConfig::default().max_vars)]
    max_vars: usize,

    /// Boolean sub-functions larger than this are dropped before the binary-temporal product step.
    #[clap(long, default_value_t = SearchConfig::default().max_bool_func_size)]
    max_bool_func_size: usize,

    /// Step size for the `[lb,ub]` bounds grid; defaults to a fifth of the longest positive training trace.
    #[clap(long)]
    bounds_step: Option<usize>,

    /// Maximum number of formulas kept in each of the best/worst beams.
    #[clap(long, default_value_t = SearchConfig::default().max_formulas)]
    max_formulas: usize,

    /// Maximum formula depth the search grows to.
    #[clap(long, default_value_t = SearchConfig::default().max_depth)]
    max_depth: usize,
}

impl From<Arguments> for SearchConfig {
    fn from(args: Arguments) -> SearchConfig {
        SearchConfig {
            dataset_path: args.dataset_path,
            max_vars: args.max_vars,
            max_bool_func_size: args.max_bool_func_size,
            bounds_step: args.bounds_step,
            max_formulas: args.max_formulas,
            max_depth: args.max_depth,
        }
    }
}

fn print_error(message: &str) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true));
    let _ = write!(stderr, "error: ");
    let _ = stderr.set_color(&ColorSpec::new());
    let _ = writeln!(stderr, "{message}");
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Arguments::parse();
    let config = SearchConfig::from(args);

    if let Err(e) = config.validate() {
        print_error(&e.to_string());
        return ExitCode::from(1);
    }

    let dataset = match Dataset::load(&config.dataset_path) {
        Ok(d) => d,
        Err(e) => {
            print_error(&e.to_string());
            return ExitCode::from(2);
        }
    };

    let report = match run_search(&config, &dataset) {
        Ok(r) => r,
        Err(MltlError::Config(msg)) => {
            print_error(&msg);
            return ExitCode::from(1);
        }
        Err(e) => {
            print_error(&e.to_string());
            return ExitCode::from(2);
        }
    };

    mltl_miner::search::report::print_report(&report);
    ExitCode::from(0)
}
