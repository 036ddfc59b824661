//! Bounded File Reading
//!
//! Reads text files into memory only when they fit under a size ceiling.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// Default ingestion ceiling: 10 MiB.
pub const DEFAULT_MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

/// Reads whole files as UTF-8, refusing anything larger than `max_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedFileReader {
    max_bytes: u64,
}

impl Default for BoundedFileReader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_FILE_BYTES)
    }
}

impl BoundedFileReader {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    /// Read `path` into a `String`.
    ///
    /// The size is checked from metadata before any content is read. The
    /// read itself is capped at `max_bytes + 1` so a file that grows after
    /// the check is still rejected.
    pub fn read_to_string(&self, path: &Path) -> CoreResult<String> {
        let shown = path.display().to_string();

        let size = std::fs::metadata(path)
            .map_err(|e| {
                tracing::debug!(path = %shown, error = %e, "failed to stat file");
                e
            })?
            .len();
        if size > self.max_bytes {
            return Err(self.too_large(shown, size));
        }

        let file = File::open(path).map_err(|e| {
            tracing::debug!(path = %shown, error = %e, "failed to open file");
            e
        })?;
        let mut bytes = Vec::with_capacity(size as usize);
        file.take(self.max_bytes + 1).read_to_end(&mut bytes)?;
        if bytes.len() as u64 > self.max_bytes {
            return Err(self.too_large(shown, bytes.len() as u64));
        }

        String::from_utf8(bytes)
            .map_err(|e| CoreError::Encoding(format!("{} is not valid UTF-8: {}", shown, e)))
    }

    fn too_large(&self, path: String, size: u64) -> CoreError {
        tracing::debug!(path = %path, size, max = self.max_bytes, "file exceeds size ceiling");
        CoreError::FileTooLarge {
            path,
            size,
            max: self.max_bytes,
        }
    }
}
