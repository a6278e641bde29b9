//! # dpll-sat
//!
//! Command-line driver for the DPLL solver. Instances are generated on the
//! fly rather than read from disk:
//!
//! ```sh
//! # random 3-SAT at the phase transition
//! dpll-sat random --vars 50 --seed 7
//!
//! # satisfiable by construction, print the model
//! dpll-sat planted --vars 80 --clauses 300 --print-solution
//!
//! # unsatisfiable, with memoization and a call limit
//! dpll-sat pigeonhole --holes 6 --memo --max-calls 1000000
//! ```
//!
//! The exit code is 10 for SATISFIABLE, 20 for UNSATISFIABLE and 0 when the
//! search was stopped by `--max-calls`.

use clap::Parser;
use std::process::ExitCode;

mod command_line;

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() -> anyhow::Result<ExitCode> {
    let cli = command_line::cli::Cli::parse();

    let level = if cli.common.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    command_line::cli::run(cli)
}
