//! Command-line interface for prepline
//!
//! Runs the preprocessing pipeline over files and prints tokens, provenance and classifier
//! inputs. Output goes to stdout; logs and diagnostics go to stderr.
//!
//! Usage:
//!   prepline tokenize `<file>`                      - Raw tokens with byte spans (JSON)
//!   prepline process `<file>` [--format json|text] - Processed tokens with spans
//!   prepline lookup `<file>` `<query>` [--first]     - Raw spans behind a processed token
//!   prepline explain `<file>`                       - Every processed token next to its raw words
//!   prepline batch `<paths>`... [--abort-on-error]  - Classifier inputs, one JSON line per document
//!
//! Exit codes: 0 on success, 1 on error, 2 when a batch finished with failed documents.

mod commands;
mod error;
mod stages;

use clap::Parser;
use commands::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    match commands::run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
