//! Decision Importer Integration Tests

use project_memory::DecisionImporter;

use crate::common::{open_store, project_with};

fn decisions_file() -> String {
    format!(
        "# Decisions\n\n## Use library X\nBecause it is fast.\n\n### minor note\n## {}\n",
        "y".repeat(310)
    )
}

#[test]
fn test_import_then_reimport() {
    let content = decisions_file();
    let project = project_with(&[("DECISIONS.md", content.as_str())]);
    let store = open_store(project.path());
    let importer = DecisionImporter::new(&store);

    let summary = importer.import(None).unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.skipped_too_long, 1);
    assert_eq!(summary.failed, 0);

    let imported: Vec<_> = store
        .list_all()
        .unwrap()
        .into_iter()
        .filter(|r| r.id.starts_with("import-"))
        .collect();
    assert_eq!(imported.len(), 2);
    for record in &imported {
        assert_eq!(record.metadata.tags, "imported,historical");
        assert_eq!(record.metadata.memory_type, "decision");
        assert_eq!(record.metadata.source, "DECISIONS.md");
    }
    assert_eq!(imported[0].id, "import-2-use-library-x");
    assert_eq!(imported[0].document, "Use library X");

    let again = importer.import(None).unwrap();
    assert_eq!(again.imported, 0);
    assert_eq!(again.skipped_existing, 2);
    assert_eq!(store.count().unwrap(), 3);
}

#[test]
fn test_explicit_file_inside_project() {
    let project = project_with(&[("notes/adr-index.md", "## Adopt event sourcing\n")]);
    let store = open_store(project.path());

    let summary = DecisionImporter::new(&store)
        .import(Some("notes/adr-index.md"))
        .unwrap();
    assert_eq!(summary.source, "adr-index.md");
    assert_eq!(summary.imported, 1);
}

#[test]
fn test_explicit_missing_file_is_not_found() {
    let project = project_with(&[("CHANGELOG.md", "## 1.0.0\n")]);
    let store = open_store(project.path());

    let err = DecisionImporter::new(&store)
        .import(Some("missing.md"))
        .unwrap_err();
    assert_eq!(err.kind(), "not_found");
    assert_eq!(store.count().unwrap(), 1);
}

#[test]
fn test_absolute_path_outside_project_rejected() {
    let outside = project_with(&[("DECISIONS.md", "## Elsewhere\n")]);
    let project = project_with(&[]);
    let store = open_store(project.path());

    let path = outside.path().join("DECISIONS.md");
    let err = DecisionImporter::new(&store)
        .import(Some(path.to_str().unwrap()))
        .unwrap_err();
    assert_eq!(err.kind(), "path_rejected");
}

#[cfg(unix)]
#[test]
fn test_symlinked_candidate_outside_project_is_skipped() {
    let outside = project_with(&[("secret.md", "## Secret\n")]);
    let project = project_with(&[("CHANGELOG.md", "## 2.0.0\n")]);
    std::os::unix::fs::symlink(
        outside.path().join("secret.md"),
        project.path().join("DECISIONS.md"),
    )
    .unwrap();
    let store = open_store(project.path());

    let summary = DecisionImporter::new(&store).import(None).unwrap();
    assert_eq!(summary.source, "CHANGELOG.md");
    assert_eq!(summary.imported, 1);
}
