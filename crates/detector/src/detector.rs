//! Project Type Detection
//!
//! Detects the project type by looking for marker files anywhere in the
//! project tree. When several markers coexist the one earliest in
//! [`MARKER_PRIORITY`] wins, regardless of where in the tree it was found.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use project_memory_core::{CoreError, CoreResult};

use crate::models::{MarkerPattern, ProjectDetectionResult, ProjectType};

/// Marker files in priority order. First match wins.
pub const MARKER_PRIORITY: [(MarkerPattern, ProjectType); 10] = [
    (MarkerPattern::FileName("package.json"), ProjectType::NodeJs),
    (MarkerPattern::FileName("requirements.txt"), ProjectType::Python),
    (MarkerPattern::FileName("Cargo.toml"), ProjectType::Rust),
    (MarkerPattern::FileName("go.mod"), ProjectType::Go),
    (MarkerPattern::FileName("pom.xml"), ProjectType::JavaMaven),
    (MarkerPattern::FileName("build.gradle"), ProjectType::JavaGradle),
    (MarkerPattern::FileName("Gemfile"), ProjectType::Ruby),
    (MarkerPattern::FileName("composer.json"), ProjectType::Php),
    (MarkerPattern::Extension("csproj"), ProjectType::CSharp),
    (MarkerPattern::FileName("CMakeLists.txt"), ProjectType::Cpp),
];

/// Project type detector
pub struct ProjectDetector {
    /// Project root path
    project_path: PathBuf,
}

impl ProjectDetector {
    /// Create a new project detector for the given path
    pub fn new(project_path: impl AsRef<Path>) -> Self {
        Self {
            project_path: project_path.as_ref().to_path_buf(),
        }
    }

    /// Detect the project type.
    ///
    /// Hidden and git-ignored paths are skipped, so the store directory and
    /// vendored dependency trees do not influence the result.
    pub fn detect(&self) -> CoreResult<ProjectDetectionResult> {
        if !self.project_path.is_dir() {
            return Err(CoreError::not_found(format!(
                "Project directory not found: {}",
                self.project_path.display()
            )));
        }

        let mut best: Option<(usize, PathBuf)> = None;

        let walker = WalkBuilder::new(&self.project_path)
            .hidden(true)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!(error = %e, "skipping unreadable entry during detection");
                    continue;
                }
            };
            if !entry.file_type().map_or(false, |ft| ft.is_file()) {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            let Some(rank) = marker_rank(&file_name) else {
                continue;
            };
            if best.as_ref().map_or(true, |(current, _)| rank < *current) {
                best = Some((rank, entry.path().to_path_buf()));
                if rank == 0 {
                    break;
                }
            }
        }

        Ok(match best {
            Some((rank, path)) => ProjectDetectionResult {
                project_type: MARKER_PRIORITY[rank].1,
                marker_file: Some(path.to_string_lossy().into_owned()),
            },
            None => ProjectDetectionResult::general(),
        })
    }
}

/// Priority index of the first marker matching `file_name`
fn marker_rank(file_name: &str) -> Option<usize> {
    MARKER_PRIORITY
        .iter()
        .position(|(pattern, _)| pattern.matches(file_name))
}

/// Detect project type for a given path
pub fn detect_project_type(project_path: impl AsRef<Path>) -> CoreResult<ProjectDetectionResult> {
    let detector = ProjectDetector::new(project_path);
    detector.detect()
}
