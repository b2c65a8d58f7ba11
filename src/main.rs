//! termscope CLI binary.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use termscope::cli::args::*;
use termscope::cli::commands::*;

fn main() {
    let args = TermscopeArgs::parse();

    // Warnings by default. -q keeps only errors, -vv adds progress and -vvv debug detail.
    let log_level = match args.verbosity() {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    // Logs go to stderr so JSON output on stdout stays parseable.
    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // Skipped pages are only warnings; anything returned here is fatal.
    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
