//! `domcat <file>`: parse a markup file and print the tree outline.
//!
//! Exit status is zero only when the file reads and parses cleanly; any I/O
//! or parse failure reports to stderr and exits non-zero.

use std::env;
use std::fs;
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

fn main() -> ExitCode {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "domcat".to_string());
    let (Some(path), None) = (args.next(), args.next()) else {
        eprintln!("usage: {program} <file>");
        return ExitCode::FAILURE;
    };

    let source = match fs::read_to_string(&path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: could not read '{path}': {err}");
            return ExitCode::FAILURE;
        }
    };

    match markup::parse(&source) {
        Ok(doc) => {
            print!("{}", markup::print::outline(&doc));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("parse error: {err}");
            ExitCode::FAILURE
        }
    }
}
