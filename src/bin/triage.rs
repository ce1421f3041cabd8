//! `triage` command line entry point.

use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;

use symptom_triage::cli::args::TriageArgs;
use symptom_triage::cli::commands::{execute_command, exit_code};

/// Log level for a verbosity count; `RUST_LOG` still takes precedence.
fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    }
}

fn init_logging(verbosity: u8) {
    let default_level = log_level(verbosity).to_string().to_lowercase();
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn main() {
    let args = TriageArgs::parse();
    init_logging(args.verbosity());

    if let Err(e) = execute_command(args) {
        eprintln!("Error: {e:#}");
        process::exit(exit_code(&e));
    }
}
