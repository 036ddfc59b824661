//! `project-memory` Command
//!
//! Initializes the project collection and runs at most one operation:
//! list, query, export, add or import, in that priority order.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Local;
use clap::Args;

use crate::models::record::{CollectionStatus, NewMemory, QueryMatch};
use crate::services::memory::{DecisionImporter, MemoryStore};
use crate::storage::config::{console_options, ConfigService, EnvOverrides};
use crate::utils::console::Console;
use crate::utils::error::{AppError, AppResult};
use crate::utils::time::manual_memory_id;

/// Command-line arguments for `project-memory`
#[derive(Debug, Clone, Args)]
pub struct MemoryArgs {
    /// Project path
    #[arg(short, long, default_value = ".")]
    pub project: PathBuf,

    /// Import decision headings from existing documentation
    #[arg(long)]
    pub import_existing: bool,

    /// Specific file to import decisions from (implies --import-existing)
    #[arg(long, value_name = "PATH")]
    pub import_file: Option<String>,

    /// List all memories
    #[arg(long)]
    pub list: bool,

    /// Query memories by similarity
    #[arg(long, value_name = "TEXT")]
    pub query: Option<String>,

    /// Number of query results
    #[arg(long, value_name = "N")]
    pub top_k: Option<usize>,

    /// Export memories to JSON
    #[arg(long)]
    pub export: bool,

    /// Export file, relative to the project
    #[arg(long, value_name = "PATH")]
    pub output: Option<String>,

    /// Add a memory
    #[arg(long, num_args = 4, value_names = ["DOCUMENT", "TYPE", "TAGS", "SOURCE"])]
    pub add: Option<Vec<String>>,

    /// Collection name
    #[arg(long, value_name = "NAME")]
    pub collection: Option<String>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

/// The single operation selected by the arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    List,
    Query {
        text: String,
        top_k: Option<usize>,
    },
    Export {
        output: Option<String>,
    },
    Add {
        document: String,
        memory_type: String,
        tags: String,
        source: String,
    },
    Import {
        file: Option<String>,
    },
    Summary,
}

impl Operation {
    /// Pick the operation; list wins over query, query over export, and so on
    pub fn from_args(args: &MemoryArgs) -> Self {
        if args.list {
            return Operation::List;
        }
        if let Some(text) = &args.query {
            return Operation::Query {
                text: text.clone(),
                top_k: args.top_k,
            };
        }
        if args.export {
            return Operation::Export {
                output: args.output.clone(),
            };
        }
        if let Some([document, memory_type, tags, source]) = args.add.as_deref() {
            return Operation::Add {
                document: document.clone(),
                memory_type: memory_type.clone(),
                tags: tags.clone(),
                source: source.clone(),
            };
        }
        if args.import_existing || args.import_file.is_some() {
            return Operation::Import {
                file: args.import_file.clone(),
            };
        }
        Operation::Summary
    }
}

/// Run the command and map the outcome to an exit code
pub fn run(args: MemoryArgs) -> ExitCode {
    let env = EnvOverrides::from_env();
    let console = Console::new(console_options(
        args.no_color,
        &env,
        std::io::stdout().is_terminal(),
    ));

    match execute(&args, &env, &console) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(kind = e.kind(), "project-memory failed");
            console.error(&e);
            ExitCode::FAILURE
        }
    }
}

/// Open the store and run the selected operation.
///
/// Only configuration, connection and collection failures are returned;
/// operation failures are reported on the console.
pub fn execute(args: &MemoryArgs, env: &EnvOverrides, console: &Console) -> AppResult<()> {
    let config = ConfigService::load(&args.project)?;
    let settings = config.resolve(&args.project, env, args.collection.as_deref())?;

    let mut store = MemoryStore::connect(settings)?;
    console.success(format!(
        "Connected to memory store at {}",
        store.settings().data_dir.display()
    ));

    match store.create_or_get_collection()? {
        CollectionStatus::Existing { count } => {
            console.success(format!("Found existing collection with {} memories", count));
        }
        CollectionStatus::Created { seeded } => {
            console.success(format!("Created new collection: {}", store.collection_name()));
            if seeded {
                console.success("Added initial project memory");
            } else {
                console.warn("Could not add initial memory");
            }
        }
    }

    let operation = Operation::from_args(args);
    if let Err(e) = perform(&store, operation, console) {
        report_failure(console, &e);
    }
    Ok(())
}

fn perform(store: &MemoryStore, operation: Operation, console: &Console) -> AppResult<()> {
    match operation {
        Operation::List => print_list(store, console),
        Operation::Query { text, top_k } => {
            let matches = store.query(&text, top_k)?;
            print_matches(&matches, console);
            Ok(())
        }
        Operation::Export { output } => {
            let summary = store.export(output.as_deref())?;
            console.success(format!(
                "Exported {} memories to {}",
                summary.count,
                summary.path.display()
            ));
            Ok(())
        }
        Operation::Add {
            document,
            memory_type,
            tags,
            source,
        } => {
            let record = store.add(NewMemory {
                id: manual_memory_id(&Local::now()),
                document,
                memory_type,
                tags,
                source,
            })?;
            console.success(format!("Logged memory: {}", record.id));
            Ok(())
        }
        Operation::Import { file } => {
            let summary = DecisionImporter::new(store).import(file.as_deref())?;
            console.info(format!("Imported decisions from {}", summary.source));
            console.success(format!(
                "Imported {} historical decisions",
                summary.imported
            ));
            if summary.skipped_existing > 0 {
                console.info(format!(
                    "Skipped {} already imported",
                    summary.skipped_existing
                ));
            }
            if summary.skipped_too_long > 0 {
                console.warn(format!(
                    "Skipped {} headings of {} characters or more",
                    summary.skipped_too_long,
                    crate::services::memory::importer::MAX_TITLE_CHARS
                ));
            }
            if summary.failed > 0 {
                console.warn(format!("{} decisions could not be stored", summary.failed));
            }
            Ok(())
        }
        Operation::Summary => {
            console.line("");
            console.success(format!("Project memory ready for {}", store.project_name()));
            console.line(format!("Collection: {}", store.collection_name()));
            console.line(format!("Memories: {}", store.count()?));
            Ok(())
        }
    }
}

fn print_list(store: &MemoryStore, console: &Console) -> AppResult<()> {
    let records = store.list_all()?;
    if records.is_empty() {
        console.warn("No memories found");
        return Ok(());
    }

    console.line("");
    console.info(format!("=== Project Memories ({} total) ===", records.len()));
    for (i, record) in records.iter().enumerate() {
        console.line("");
        console.success(format!("[{}] ID: {}", i + 1, record.id));
        console.line(format!("  📝 {}", record.document));
        console.line(format!("  🏷️  Type: {}", record.metadata.memory_type));
        console.line(format!("  🔖 Tags: {}", record.metadata.tags));
        console.line(format!("  📁 Source: {}", record.metadata.source));
        if let Some(timestamp) = &record.metadata.timestamp {
            console.line(format!("  🕐 Time: {}", timestamp));
        }
    }
    Ok(())
}

fn print_matches(matches: &[QueryMatch], console: &Console) {
    if matches.is_empty() {
        console.warn("No memories found");
        return;
    }

    console.line("");
    console.info("=== Query Results ===");
    for m in matches {
        console.line(format!("📝 {}", m.record.document));
        console.line(format!(
            "   Type: {}, Tags: {}, Distance: {:.3}",
            m.record.metadata.memory_type, m.record.metadata.tags, m.distance
        ));
    }
}

fn report_failure(console: &Console, err: &AppError) {
    match err {
        AppError::NotFound(msg) => console.warn(msg),
        e if e.is_path_rejection() => console.error(format!("Invalid path: {}", e)),
        e => console.error(e),
    }
}
