//! `moo`: console front end for the MOO longest-path explorer.
//!
//! Usage:
//!
//! ```text
//! moo [N] [--max-pops K] [--max-known-states K] [--progress-every K] [--out DIR] [--quiet]
//! ```
//!
//! Without `N` the bound is read from stdin after a prompt. Progress and goal
//! events go to stderr as `key=value` lines (unless `--quiet`); the final
//! summary goes to stdout. Exit status 1 on any configuration or run error.

#![forbid(unsafe_code)]

use std::io::{BufRead, Write};
use std::process::ExitCode;

use moo_harness::bundle_dir::write_bundle_dir;
use moo_harness::config::{parse_bound, RunArgs};
use moo_harness::progress::ProgressLines;
use moo_harness::runner::{render_summary, run_explore};
use moo_search::observer::NoopObserver;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let args = RunArgs::parse(std::env::args().skip(1)).map_err(|e| e.to_string())?;
    let bound = match args.bound {
        Some(bound) => bound,
        None => prompt_bound()?,
    };
    let config = args.into_config(bound).map_err(|e| e.to_string())?;

    let output = if config.quiet {
        run_explore(&config, &mut NoopObserver)
    } else {
        let mut lines = ProgressLines::new(std::io::stderr().lock());
        run_explore(&config, &mut lines)
    }
    .map_err(|e| e.to_string())?;

    let mut stdout = std::io::stdout().lock();
    let summary = render_summary(&output.report);
    write!(stdout, "{summary}").map_err(|e| e.to_string())?;
    writeln!(stdout, "bundle_digest={}", output.bundle.digest).map_err(|e| e.to_string())?;

    if let Some(dir) = &config.out_dir {
        write_bundle_dir(&output.bundle, dir).map_err(|e| e.to_string())?;
        writeln!(stdout, "bundle_dir={}", dir.display()).map_err(|e| e.to_string())?;
    }
    Ok(())
}

fn prompt_bound() -> Result<i64, String> {
    let mut stdout = std::io::stdout().lock();
    write!(stdout, "Enter n (number of states): ").map_err(|e| e.to_string())?;
    stdout.flush().map_err(|e| e.to_string())?;
    drop(stdout);

    let mut line = String::new();
    let read = std::io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| e.to_string())?;
    if read == 0 {
        return Err("no value for n on stdin".into());
    }
    parse_bound(&line).map_err(|e| e.to_string())
}
