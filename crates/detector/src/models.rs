//! Detection Models
//!
//! Project types recognised by the detector and the result it reports.

use serde::{Deserialize, Serialize};

/// Project type inferred from manifest files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    /// Node.js project (package.json)
    NodeJs,
    /// Python project (requirements.txt)
    Python,
    /// Rust project (Cargo.toml)
    Rust,
    /// Go project (go.mod)
    Go,
    /// Maven project (pom.xml)
    JavaMaven,
    /// Gradle project (build.gradle)
    JavaGradle,
    /// Ruby project (Gemfile)
    Ruby,
    /// PHP project (composer.json)
    Php,
    /// .NET project (*.csproj)
    CSharp,
    /// CMake project (CMakeLists.txt)
    Cpp,
    /// Nothing recognised
    General,
}

impl ProjectType {
    /// Human-readable name, as used in the seed memory text
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::NodeJs => "Node.js",
            ProjectType::Python => "Python",
            ProjectType::Rust => "Rust",
            ProjectType::Go => "Go",
            ProjectType::JavaMaven => "Java Maven",
            ProjectType::JavaGradle => "Java Gradle",
            ProjectType::Ruby => "Ruby",
            ProjectType::Php => "PHP",
            ProjectType::CSharp => "C#",
            ProjectType::Cpp => "C/C++",
            ProjectType::General => "General",
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// How a marker file is recognised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPattern {
    /// Exact file name, e.g. `Cargo.toml`
    FileName(&'static str),
    /// File extension without the dot, e.g. `csproj`
    Extension(&'static str),
}

impl MarkerPattern {
    /// Check a bare file name against this pattern
    pub fn matches(&self, file_name: &str) -> bool {
        match self {
            MarkerPattern::FileName(name) => file_name == *name,
            MarkerPattern::Extension(ext) => file_name
                .rsplit_once('.')
                .map_or(false, |(stem, found)| !stem.is_empty() && found == *ext),
        }
    }
}

/// Result of project type detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetectionResult {
    /// Detected project type
    pub project_type: ProjectType,
    /// Path to the marker file that decided the type
    pub marker_file: Option<String>,
}

impl ProjectDetectionResult {
    /// The fallback result when no marker is present
    pub fn general() -> Self {
        Self {
            project_type: ProjectType::General,
            marker_file: None,
        }
    }
}
