//! Read/modify/write of version files with bounded retry.
//!
//! A version file is read into memory as a sequence of lines (each keeping its
//! own terminator), one tagged line is replaced, and the file is written back
//! byte for byte otherwise. The modification time is then forced to a value
//! chosen by the caller, since later runs decide staleness by comparing it
//! against source timestamps.
//!
//! IDEs, compilers and source control clients routinely hold short locks on
//! these files during a build, so every disk access goes through a
//! [`RetryPolicy`]. Nothing is locked across the read/write gap.

use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime};

use crate::error::{BumpError, Result};
use crate::logging::Logger;
use crate::tag::VersionTag;
use crate::timestamp::{ensure_regular_file, file_mtime, set_file_mtime};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Bounded retry with a fixed pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_ATTEMPTS,
            delay: Self::DEFAULT_DELAY,
        }
    }
}

impl RetryPolicy {
    pub const DEFAULT_ATTEMPTS: u32 = 5;
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(500);

    /// Creates a policy making at most `max_attempts` attempts in total.
    pub fn new(max_attempts: u32, delay: Duration) -> Result<Self> {
        if max_attempts == 0 {
            return Err(BumpError::ConfigError {
                message: "Retry attempts must be at least 1".to_string(),
            });
        }
        Ok(Self {
            max_attempts,
            delay,
        })
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Runs `op` until it succeeds, fails with a non-transient error, or the
    /// attempt budget is used up.
    pub fn run<T>(
        &self,
        path: &Path,
        log: &Logger,
        mut op: impl FnMut() -> Result<T>,
    ) -> Result<T> {
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_transient() => return Err(err),
                Err(err) if attempt >= self.max_attempts => {
                    return Err(BumpError::RetriesExhausted {
                        path: path.to_path_buf(),
                        attempts: attempt,
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    log.detail(format!(
                        "  Attempt {attempt}/{} on \"{}\" failed ({err}), retrying in {}ms",
                        self.max_attempts,
                        path.display(),
                        self.delay.as_millis()
                    ));
                    thread::sleep(self.delay);
                    attempt += 1;
                }
            }
        }
    }
}

/// In-memory copy of a version file, located on one tag.
#[derive(Debug, Clone)]
pub struct VersionFile {
    path: PathBuf,
    tag: VersionTag,
    lines: Vec<String>,
    modified: SystemTime,
    tag_line: Option<usize>,
}

impl VersionFile {
    /// Splits `content` into lines and finds the first line carrying `tag`.
    pub fn parse(
        path: impl Into<PathBuf>,
        content: &str,
        modified: SystemTime,
        tag: VersionTag,
    ) -> Self {
        let lines: Vec<String> = content.split_inclusive('\n').map(str::to_owned).collect();
        let tag_line = lines
            .iter()
            .position(|line| tag.extract(split_line(line).1).is_some());

        Self {
            path: path.into(),
            tag,
            lines,
            modified,
            tag_line,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All lines, each including its original terminator.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Modification time of the file when it was read.
    pub fn modified(&self) -> SystemTime {
        self.modified
    }

    /// Zero-based index of the tagged line, if any.
    pub fn tag_line(&self) -> Option<usize> {
        self.tag_line
    }

    /// The version text on the tagged line.
    pub fn version(&self) -> Option<&str> {
        let line = &self.lines[self.tag_line?];
        self.tag.extract(split_line(line).1)
    }

    /// Replaces the version on the tagged line, keeping its indentation and
    /// terminator. Returns `false` when the file has no tagged line.
    pub fn set_version(&mut self, version: &str) -> bool {
        let Some(index) = self.tag_line else {
            return false;
        };
        let (leading, _, trailing) = split_line(&self.lines[index]);
        let rewritten = format!("{leading}{}{trailing}", self.tag.render(version));
        self.lines[index] = rewritten;
        true
    }

    pub fn contents(&self) -> String {
        self.lines.concat()
    }
}

/// Splits a line into leading whitespace (and byte order mark), content, and
/// trailing whitespace including the terminator.
fn split_line(line: &str) -> (&str, &str, &str) {
    let body_end = line.trim_end().len();
    let body =
        line[..body_end].trim_start_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK);
    let body_start = body_end - body.len();
    (&line[..body_start], body, &line[body_end..])
}

/// Reads a version file and locates `tag` in it, retrying per `policy`.
pub fn read_tagged(
    path: &Path,
    tag: VersionTag,
    policy: &RetryPolicy,
    log: &Logger,
) -> Result<VersionFile> {
    policy.run(path, log, || read_once(path, tag))
}

fn read_once(path: &Path, tag: VersionTag) -> Result<VersionFile> {
    let bytes = std::fs::read(path).map_err(|source| BumpError::IoError {
        path: path.to_path_buf(),
        source,
    })?;
    let modified = file_mtime(path)?;
    let content = String::from_utf8(bytes).map_err(|_| BumpError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;

    Ok(VersionFile::parse(path, &content, modified, tag))
}

/// Writes `lines` back to `path` and forces its modification time to `mtime`,
/// retrying per `policy`.
pub fn write(
    path: &Path,
    lines: &[String],
    mtime: SystemTime,
    policy: &RetryPolicy,
    log: &Logger,
) -> Result<()> {
    let contents = lines.concat();
    policy.run(path, log, || {
        ensure_regular_file(path)?;
        std::fs::write(path, &contents).map_err(|source| BumpError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        set_file_mtime(path, mtime)
    })
}
