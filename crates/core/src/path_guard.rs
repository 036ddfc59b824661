//! Path Safety
//!
//! Validates user-supplied paths before the memory tools read or write them.
//! A path is accepted only if it contains none of the denylisted sequences
//! and its resolved location stays inside the base (project) directory.
//!
//! Resolution follows symlinks for every component that exists on disk, so a
//! link inside the project that points elsewhere is caught. That includes
//! dangling links, which a later write would follow. Components that do not
//! exist yet (an export file about to be written) are appended as-is.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{CoreError, CoreResult, PathRejection};

/// Substrings that are never allowed in a candidate path: parent-directory
/// markers, home shorthand, variable expansion, and command substitution.
pub const SUSPICIOUS_SEQUENCES: [&str; 4] = ["..", "~", "$", "`"];

/// Checks candidate paths against a canonical base directory.
#[derive(Debug, Clone)]
pub struct PathValidator {
    base: PathBuf,
}

impl PathValidator {
    /// Create a validator rooted at `base`.
    ///
    /// The base must exist; it is canonicalised once so every later
    /// comparison is made against the same resolved path.
    pub fn new(base: impl AsRef<Path>) -> CoreResult<Self> {
        let base = base.as_ref();
        let canonical = base.canonicalize().map_err(|e| {
            CoreError::path_rejected(
                base.display().to_string(),
                PathRejection::Unresolvable(e.to_string()),
            )
        })?;
        Ok(Self { base: canonical })
    }

    /// Validate `candidate` and return its resolved absolute path.
    pub fn validate(&self, candidate: &str) -> CoreResult<PathBuf> {
        let reject = |reason: PathRejection| {
            tracing::debug!(path = candidate, %reason, "rejected path");
            CoreError::path_rejected(candidate, reason)
        };

        if candidate.trim().is_empty() {
            return Err(reject(PathRejection::Unresolvable("empty path".into())));
        }
        if candidate.contains('\0') {
            return Err(reject(PathRejection::Unresolvable(
                "embedded NUL byte".into(),
            )));
        }
        if let Some(seq) = SUSPICIOUS_SEQUENCES
            .iter()
            .find(|seq| candidate.contains(*seq))
        {
            return Err(reject(PathRejection::SuspiciousSequence(*seq)));
        }

        let resolved = resolve_lenient(&self.base.join(candidate))
            .map_err(|e| reject(PathRejection::Unresolvable(e.to_string())))?;

        // Component-wise: "/work/proj" does not contain "/work/proj2".
        if !resolved.starts_with(&self.base) {
            return Err(reject(PathRejection::OutsideBase));
        }

        Ok(resolved)
    }
}

/// Symlink hops followed before giving up, matching the usual ELOOP limit.
const MAX_LINK_HOPS: usize = 40;

/// Canonicalise the longest existing ancestor of `path` and re-append the
/// components that do not exist yet.
///
/// A missing component that is itself a (dangling) symlink is replaced by
/// its target, so the result is where a write would actually land.
fn resolve_lenient(path: &Path) -> io::Result<PathBuf> {
    let mut existing = path.to_path_buf();
    let mut pending: Vec<OsString> = Vec::new();
    let mut hops = 0;

    loop {
        match existing.canonicalize() {
            Ok(mut resolved) => {
                for component in pending.iter().rev() {
                    resolved.push(component);
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let is_link = fs::symlink_metadata(&existing)
                    .map(|meta| meta.file_type().is_symlink())
                    .unwrap_or(false);
                if is_link {
                    hops += 1;
                    if hops > MAX_LINK_HOPS {
                        return Err(io::Error::new(
                            io::ErrorKind::Other,
                            "too many levels of symbolic links",
                        ));
                    }
                    let target = fs::read_link(&existing)?;
                    existing = match existing.parent() {
                        Some(parent) => parent.join(target),
                        None => target,
                    };
                    continue;
                }

                let name = match existing.file_name() {
                    Some(name) => name.to_os_string(),
                    None => return Err(e),
                };
                pending.push(name);
                if !existing.pop() {
                    return Err(e);
                }
            }
            Err(e) => return Err(e),
        }
    }
}
