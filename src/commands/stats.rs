//! `memory-stats` Command
//!
//! Prints exactly one JSON object describing the collection's record counts.

use std::path::Path;
use std::process::ExitCode;

use crate::models::settings::DEFAULT_COLLECTION_NAME;
use crate::models::stats::StatsReport;
use crate::services::memory::StatsReporter;
use crate::storage::config::{ConfigService, EnvOverrides};

/// Run against the project in the current directory
pub fn run() -> ExitCode {
    let env = EnvOverrides::from_env();
    let report = match std::env::current_dir() {
        Ok(cwd) => report_for(&cwd, &env),
        Err(e) => StatsReport::error(collection_hint(&env), e.to_string()),
    };

    match serde_json::to_string(&report) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!(error = %e, "failed to serialize stats report");
            return ExitCode::FAILURE;
        }
    }
    ExitCode::from(report.exit_code())
}

/// Resolve settings for `project_root` and produce the report
pub fn report_for(project_root: &Path, env: &EnvOverrides) -> StatsReport {
    let settings = ConfigService::load(project_root)
        .and_then(|config| config.resolve(project_root, env, None));

    match settings {
        Ok(settings) => StatsReporter::new(settings).run(),
        Err(e) => StatsReport::error(collection_hint(env), e.to_string()),
    }
}

fn collection_hint(env: &EnvOverrides) -> String {
    env.collection
        .clone()
        .unwrap_or_else(|| DEFAULT_COLLECTION_NAME.to_string())
}
