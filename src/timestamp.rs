use std::fs::OpenOptions;
use std::path::Path;
use std::time::SystemTime;

use crate::error::{BumpError, Result};

/// What happens to a version file's modification time when it is rewritten.
///
/// The mtime is what later runs compare sources against, so product bumps
/// move it forward while shared bumps must leave it where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stamp {
    /// Keep the mtime the file had before the rewrite.
    Preserve,
    /// Move the mtime to the given time, unless the file is already newer.
    Advance(SystemTime),
}

impl Stamp {
    /// The mtime to apply to a file whose mtime was `current` when read.
    pub fn resolve(self, current: SystemTime) -> SystemTime {
        match self {
            Stamp::Preserve => current,
            Stamp::Advance(time) => time.max(current),
        }
    }
}

/// Returns the last modification time of a file.
pub fn file_mtime(path: &Path) -> Result<SystemTime> {
    std::fs::metadata(path)
        .and_then(|metadata| metadata.modified())
        .map_err(|source| BumpError::IoError {
            path: path.to_path_buf(),
            source,
        })
}

/// Fails unless `path` resolves to a regular file.
///
/// Symbolic links are followed, so a version file shared between projects
/// through a link is rewritten in place. Reads and staleness checks follow
/// links the same way.
pub fn ensure_regular_file(path: &Path) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|source| BumpError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    if metadata.is_dir() {
        return Err(BumpError::InvalidFileType {
            path: path.to_path_buf(),
            message: "Directories are not rewritten".to_string(),
        });
    }

    if !metadata.is_file() {
        return Err(BumpError::InvalidFileType {
            path: path.to_path_buf(),
            message: "Only regular files are rewritten".to_string(),
        });
    }

    Ok(())
}

/// Sets the modification time of a file, or of the file a link points to.
///
/// # Errors
///
/// Returns an error if:
/// - The path does not resolve to a regular file
/// - The file cannot be opened for writing
/// - The timestamp cannot be set (e.g., permission denied)
pub fn set_file_mtime(path: &Path, mtime: SystemTime) -> Result<()> {
    ensure_regular_file(path)?;

    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .map_err(|source| BumpError::SetTimestampError(path.to_path_buf(), source))?;

    file.set_modified(mtime)
        .map_err(|source| BumpError::SetTimestampError(path.to_path_buf(), source))?;

    Ok(())
}
