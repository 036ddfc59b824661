// Memory Stats - prints collection counts as a single JSON object

use std::process::ExitCode;

use clap::Parser;
use project_memory::commands::stats;
use project_memory::utils::logging::init_logging;

/// Report project memory record counts by type as JSON.
///
/// The collection and store directory come from CHROMA_COLLECTION and
/// CHROMA_DATA_DIR (defaults: project_memory, ./.chroma).
#[derive(Debug, Parser)]
#[command(name = "memory-stats", version, about)]
struct Cli {}

fn main() -> ExitCode {
    init_logging();
    let _ = Cli::parse();
    stats::run()
}
