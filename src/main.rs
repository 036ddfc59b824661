// Project Memory - command-line entry point

use std::process::ExitCode;

use clap::Parser;
use project_memory::commands::memory::{self, MemoryArgs};
use project_memory::utils::logging::init_logging;

/// Initialize and manage persistent project memory
#[derive(Debug, Parser)]
#[command(name = "project-memory", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: MemoryArgs,
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    memory::run(cli.args)
}
