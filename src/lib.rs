//! # version-builder
//!
//! A build-step tool that keeps .NET version numbers moving with the code.
//!
//! ## Overview
//!
//! Each project in a solution carries two version numbers in a version file:
//! a per-project *product* (file) version and a solution-wide *shared*
//! (assembly) version. On every run:
//!
//! - a project whose sources or manifest are newer than its version file is
//!   *stale*, and its product version's last component is incremented;
//! - if any project was stale, every project is given one new shared
//!   version, computed once from the first project;
//! - an optional main project has its product version incremented whenever
//!   anything changed, but never twice in one run.
//!
//! Version files keep their modification time (product bumps advance it to
//! the change that caused them), so a second run without edits does nothing.
//!
//! ## Architecture
//!
//! - [`cli`]: Command-line interface definitions using clap
//! - [`commands`]: The bump coordinator and CLI dispatch
//! - [`error`]: Error types and handling with thiserror + miette
//! - [`logging`]: Verbosity-gated progress output
//! - [`version`]: Version number increment
//! - [`tag`]: The text framing a version number in a version file
//! - [`store`]: Retrying read/rewrite of version files
//! - [`staleness`]: Source timestamps against version file timestamps
//! - [`project`]: Framework-style and SDK-style project resolution
//! - [`discovery`]: Solution and project manifest parsing
//! - [`nuspec`]: Package manifest version rewrite
//!
//! ## Library Usage
//!
//! ```no_run
//! use version_builder::cli::Cli;
//! use version_builder::commands;
//!
//! let cli = Cli::builder()
//!     .solution("MySolution.sln")
//!     .main_project("App/App.csproj")
//!     .verbose(1)
//!     .build()?;
//!
//! commands::execute(&cli)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Error Handling
//!
//! Failures on individual files never stop a run: the file is left as it was
//! and the failure is reported at `-vv`. Only configuration errors surface as
//! [`error::BumpError`].

pub mod cli;
pub mod commands;
pub mod discovery;
pub mod error;
pub mod logging;
pub mod nuspec;
pub mod project;
pub mod staleness;
pub mod store;
pub mod tag;
pub mod version;

// Internal modules
mod timestamp;
