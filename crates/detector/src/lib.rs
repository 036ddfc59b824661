//! Project Memory Detector
//!
//! Heuristic project type detection used to describe a project when its
//! memory collection is first created.
//!
//! - `models` - `ProjectType`, `MarkerPattern`, `ProjectDetectionResult`
//! - `detector` - `ProjectDetector` and the fixed marker priority order

pub mod detector;
pub mod models;

pub use detector::{detect_project_type, ProjectDetector, MARKER_PRIORITY};
pub use models::{MarkerPattern, ProjectDetectionResult, ProjectType};
