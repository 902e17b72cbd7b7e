//! Error types for version-builder.
//!
//! This module defines all error types used throughout version-builder, using
//! a combination of `thiserror` for ergonomic error definitions and `miette`
//! for rich diagnostic output.
//!
//! # Error Handling Strategy
//!
//! - All errors derive from [`BumpError`]
//! - Each variant includes helpful error messages and diagnostic codes
//! - Lower layers (store, discovery, nuspec) propagate errors with `?`
//! - The bump coordinator absorbs per-file errors: a file that cannot be read
//!   or written is logged and left untouched, so a build pipeline is never
//!   blocked by a version bump
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use version_builder::error::{BumpError, Result};
//!
//! fn check_solution(path: &Path) -> Result<()> {
//!     if !path.is_file() {
//!         return Err(BumpError::InvalidFileType {
//!             path: path.to_path_buf(),
//!             message: "Solution must be a regular file".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Error types that can occur in version-builder operations
#[derive(Error, Debug, Diagnostic)]
pub enum BumpError {
    /// File system I/O error while reading or writing a manifest or version
    /// file.
    ///
    /// Common causes: the file is locked by an IDE or compiler, permission
    /// denied, or file not found. Version file accesses are retried before
    /// this error is reported.
    #[error("I/O error accessing '{path}'")]
    #[diagnostic(code(version_builder::io_error))]
    IoError {
        /// The path that caused the I/O error
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A version file is not valid UTF-8.
    ///
    /// Version files are rewritten byte for byte except for the version line,
    /// which requires the content to be decoded as text first.
    #[error("'{path}' is not valid UTF-8 text")]
    #[diagnostic(
        code(version_builder::file::invalid_encoding),
        help("Save the version file as UTF-8 (with or without a byte order mark).")
    )]
    InvalidEncoding {
        /// The file that failed to decode
        path: PathBuf,
    },

    /// Every attempt of a retried file operation failed.
    ///
    /// Raised by the retry policy once the configured number of attempts is
    /// used up. The last underlying error is kept as the source.
    #[error("Giving up on '{path}' after {attempts} attempt(s)")]
    #[diagnostic(
        code(version_builder::store::retries_exhausted),
        help(
            "Another process may be holding the file. Close editors or build servers using it, \
             or raise --retry-attempts."
        )
    )]
    RetriesExhausted {
        /// The file that could not be accessed
        path: PathBuf,
        /// Number of attempts made
        attempts: u32,
        /// Error from the final attempt
        #[source]
        source: Box<BumpError>,
    },

    /// Attempted to rewrite something that is not a regular file.
    ///
    /// Version files are only rewritten when their path resolves to a regular
    /// file. Links are followed; directories are rejected.
    #[error("Invalid file type for '{path}': {message}")]
    #[diagnostic(
        code(version_builder::file::invalid_type),
        help("version-builder only rewrites regular files.")
    )]
    InvalidFileType {
        /// The path of the invalid file
        path: PathBuf,
        /// Description of the file type issue
        message: String,
    },

    /// Failed to set a version file's modification time after rewriting it.
    #[error("Failed to set file modification time for '{0}'")]
    #[diagnostic(
        code(version_builder::timestamp::set_error),
        help("Ensure you have write permissions for the file.")
    )]
    SetTimestampError(
        /// The file whose timestamp couldn't be set
        PathBuf,
        /// The underlying I/O error
        #[source]
        std::io::Error,
    ),

    /// Invalid configuration, such as a zero retry budget or an empty source
    /// extension.
    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(version_builder::config::error),
        help("Check the command-line options and VERSION_BUILDER_* environment variables.")
    )]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },
}

impl BumpError {
    /// Whether retrying the same operation could succeed.
    ///
    /// Only I/O failures are treated as transient; a file that decodes badly
    /// will decode badly on the next attempt too.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            BumpError::IoError { .. } | BumpError::SetTimestampError(..)
        )
    }
}

/// Type alias for Results in this crate
pub type Result<T> = std::result::Result<T, BumpError>;
