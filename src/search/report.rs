//! Prints a `SearchReport` to a colored terminal stream (spec §4.4.2 step 8):
//! top-10-by-training and top-10-by-test accuracy for both banks.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::search::driver::{ReportedFormula, SearchReport};

const TOP_N: usize = 10;

fn print_top(stdout: &mut StandardStream, label: &str, color: Color, entries: &[&ReportedFormula], by_test: bool) {
    stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true)).unwrap();
    writeln!(stdout, "-- {label} --").unwrap();
    stdout.set_color(&ColorSpec::new()).unwrap();

    for entry in entries.iter().take(TOP_N) {
        let headline = if by_test { entry.test_accuracy } else { entry.train_accuracy };
        stdout.set_color(ColorSpec::new().set_fg(Some(color))).unwrap();
        write!(stdout, "{:>6.2}%", headline * 100.0).unwrap();
        stdout.set_color(&ColorSpec::new()).unwrap();
        writeln!(
            stdout,
            " train  {:>6.2}% test   {}",
            entry.train_accuracy * 100.0,
            entry.formula.as_pretty_string()
        )
        .unwrap();
    }
}

fn print_bank(stdout: &mut StandardStream, name: &str, color: Color, entries: &[ReportedFormula]) {
    let mut by_train: Vec<&ReportedFormula> = entries.iter().collect();
    by_train.sort_by(|a, b| b.train_accuracy.partial_cmp(&a.train_accuracy).unwrap());
    print_top(stdout, &format!("{name}, top {TOP_N} by train accuracy"), color, &by_train, false);

    println!();

    let mut by_test: Vec<&ReportedFormula> = entries.iter().collect();
    by_test.sort_by(|a, b| b.test_accuracy.partial_cmp(&a.test_accuracy).unwrap());
    print_top(stdout, &format!("{name}, top {TOP_N} by test accuracy"), color, &by_test, true);
}

/// Write a human-readable summary of the search to stdout.
pub fn print_report(report: &SearchReport) {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    writeln!(stdout, "{} boolean sub-functions generated", report.num_boolean_functions).unwrap();
    writeln!(stdout, "{} kept as interesting", report.num_interesting).unwrap();
    println!();

    print_bank(&mut stdout, "best classifiers", Color::Green, &report.best);
    println!();
    print_bank(&mut stdout, "worst classifiers", Color::Red, &report.worst);

    stdout.set_color(&ColorSpec::new()).unwrap();
}
