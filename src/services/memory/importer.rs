//! Decision Importer
//!
//! Turns the headings of an existing decision log (DECISIONS.md, an ADR
//! index, a changelog) into `decision` memories. The file is located and
//! validated against the project root and read with a size ceiling.

use std::path::PathBuf;

use project_memory_core::{BoundedFileReader, PathValidator};
use serde::Serialize;

use super::store::MemoryStore;
use crate::models::record::{NewMemory, DECISION_TYPE};
use crate::utils::error::{AppError, AppResult};

/// Files searched, in order, when no explicit file is given
pub const DECISION_CANDIDATES: [&str; 4] = [
    "DECISIONS.md",
    "ADR/README.md",
    "docs/decisions.md",
    "CHANGELOG.md",
];

/// Titles with this many characters or more are skipped
pub const MAX_TITLE_CHARS: usize = 300;

/// Tags attached to every imported decision
pub const IMPORT_TAGS: &str = "imported,historical";

const SLUG_CHARS: usize = 30;

/// A heading found in a decision log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionHeading {
    /// Zero-based line number
    pub line_index: usize,
    pub title: String,
}

/// Outcome of an import run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    /// File name the decisions were read from
    pub source: String,
    pub path: PathBuf,
    pub imported: usize,
    /// Headings whose id was already stored
    pub skipped_existing: usize,
    pub skipped_too_long: usize,
    pub failed: usize,
}

/// Imports decision headings into a memory store
pub struct DecisionImporter<'a> {
    store: &'a MemoryStore,
    reader: BoundedFileReader,
}

impl<'a> DecisionImporter<'a> {
    pub fn new(store: &'a MemoryStore) -> Self {
        Self {
            reader: BoundedFileReader::new(store.settings().max_import_bytes),
            store,
        }
    }

    /// Find the file to import.
    ///
    /// An explicit path that fails validation is an error; there is no
    /// fallback to the candidate list.
    pub fn locate(&self, explicit: Option<&str>) -> AppResult<PathBuf> {
        let validator = PathValidator::new(self.store.project_root())?;

        if let Some(candidate) = explicit {
            let path = validator.validate(candidate)?;
            if path.is_file() {
                return Ok(path);
            }
            return Err(not_found());
        }

        for candidate in DECISION_CANDIDATES {
            match validator.validate(candidate) {
                Ok(path) if path.is_file() => return Ok(path),
                Ok(_) => {}
                Err(e) => tracing::debug!(candidate, error = %e, "skipping decisions candidate"),
            }
        }
        Err(not_found())
    }

    /// Import every heading of the located file
    pub fn import(&self, explicit: Option<&str>) -> AppResult<ImportSummary> {
        let path = self.locate(explicit)?;
        let content = self.reader.read_to_string(&path)?;
        let source = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut summary = ImportSummary {
            source: source.clone(),
            path: path.clone(),
            ..Default::default()
        };

        for heading in extract_headings(&content) {
            if heading.title.chars().count() >= MAX_TITLE_CHARS {
                summary.skipped_too_long += 1;
                continue;
            }

            let memory = NewMemory {
                id: decision_id(heading.line_index, &heading.title),
                document: heading.title,
                memory_type: DECISION_TYPE.to_string(),
                tags: IMPORT_TAGS.to_string(),
                source: source.clone(),
            };

            match self.store.add(memory) {
                Ok(_) => summary.imported += 1,
                Err(AppError::DuplicateId(id)) => {
                    tracing::debug!(id = %id, "decision already imported");
                    summary.skipped_existing += 1;
                }
                Err(e) => {
                    tracing::warn!(line = heading.line_index, error = %e, "failed to import decision");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            source = %summary.source,
            imported = summary.imported,
            skipped_existing = summary.skipped_existing,
            skipped_too_long = summary.skipped_too_long,
            failed = summary.failed,
            "imported decisions"
        );
        Ok(summary)
    }
}

fn not_found() -> AppError {
    AppError::not_found("No existing decisions file found")
}

/// Level-2 and level-3 headings of `content`.
///
/// Headings with nothing but `#` characters and whitespace are ignored.
pub fn extract_headings(content: &str) -> Vec<DecisionHeading> {
    content
        .split('\n')
        .enumerate()
        .filter(|(_, line)| line.starts_with("## ") || line.starts_with("### "))
        .filter_map(|(line_index, line)| {
            let title = line.trim_matches('#').trim();
            (!title.is_empty()).then(|| DecisionHeading {
                line_index,
                title: title.to_string(),
            })
        })
        .collect()
}

/// Deterministic id for the heading on `line_index`
pub fn decision_id(line_index: usize, title: &str) -> String {
    let slug: String = title.chars().take(SLUG_CHARS).collect();
    format!("import-{}-{}", line_index, slug.replace(' ', "-").to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::settings::MemorySettings;
    use crate::services::vector_store::VectorClient;
    use std::fs;
    use std::path::Path;

    fn open_store(dir: &Path) -> MemoryStore {
        let mut store = MemoryStore::with_client(
            MemorySettings::for_project(dir),
            VectorClient::in_memory().unwrap(),
        )
        .unwrap();
        store.create_or_get_collection().unwrap();
        store
    }

    #[test]
    fn test_extract_headings() {
        let content = "# Title\n## Use library X\ntext\n### minor note\n#### too deep\n##no space\n## \n";
        let headings = extract_headings(content);
        assert_eq!(
            headings,
            vec![
                DecisionHeading {
                    line_index: 1,
                    title: "Use library X".into()
                },
                DecisionHeading {
                    line_index: 3,
                    title: "minor note".into()
                },
            ]
        );
    }

    #[test]
    fn test_decision_id_slug() {
        assert_eq!(decision_id(4, "Use Library X"), "import-4-use-library-x");
        assert_eq!(
            decision_id(0, "A very long decision title that keeps going"),
            "import-0-a-very-long-decision-title-tha"
        );
    }

    #[test]
    fn test_import_counts_and_reimport() {
        let temp = tempfile::tempdir().unwrap();
        let long = format!("## {}", "x".repeat(310));
        fs::write(
            temp.path().join("DECISIONS.md"),
            format!("## Use library X\n### minor note\n{}\n", long),
        )
        .unwrap();
        let store = open_store(temp.path());
        let importer = DecisionImporter::new(&store);

        let summary = importer.import(None).unwrap();
        assert_eq!(summary.source, "DECISIONS.md");
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped_too_long, 1);

        let again = importer.import(None).unwrap();
        assert_eq!(again.imported, 0);
        assert_eq!(again.skipped_existing, 2);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_candidate_order() {
        let temp = tempfile::tempdir().unwrap();
        fs::create_dir(temp.path().join("docs")).unwrap();
        fs::write(temp.path().join("docs/decisions.md"), "## From docs\n").unwrap();
        fs::write(temp.path().join("CHANGELOG.md"), "## 1.0.0\n").unwrap();
        let store = open_store(temp.path());

        let path = DecisionImporter::new(&store).locate(None).unwrap();
        assert!(path.ends_with("docs/decisions.md"));
    }

    #[test]
    fn test_no_candidate_is_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let store = open_store(temp.path());
        let err = DecisionImporter::new(&store).import(None).unwrap_err();
        assert_eq!(err.to_string(), "Not found: No existing decisions file found");
    }

    #[test]
    fn test_rejected_explicit_path_does_not_fall_back() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("DECISIONS.md"), "## Present\n").unwrap();
        let store = open_store(temp.path());

        let err = DecisionImporter::new(&store)
            .import(Some("../DECISIONS.md"))
            .unwrap_err();
        assert!(err.is_path_rejection());
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_oversized_file_rejected() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("DECISIONS.md"), "## ".repeat(100)).unwrap();
        let settings = MemorySettings {
            max_import_bytes: 64,
            ..MemorySettings::for_project(temp.path())
        };
        let mut store =
            MemoryStore::with_client(settings, VectorClient::in_memory().unwrap()).unwrap();
        store.create_or_get_collection().unwrap();

        let err = DecisionImporter::new(&store).import(None).unwrap_err();
        assert_eq!(err.kind(), "file_too_large");
    }
}
