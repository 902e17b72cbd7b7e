//! Implementation of the version-builder command.
//!
//! `mod.rs` is a thin dispatcher: it resolves paths and options from the
//! [`Cli`] and hands them to [`Bump`], which holds the increment logic.

use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{BumpError, Result};

pub(crate) mod bump;

pub use bump::{Bump, BumpBuilder, BumpReport, ProjectBump};


/// Execute the command described by the parsed CLI arguments.
pub fn execute(cli: &Cli) -> Result<()> {
    execute_with_dir(cli, None).map(|_| ())
}

/// Execute with an explicit working directory for relative paths.
///
/// Without a solution the usage text is printed and nothing is touched.
pub fn execute_with_dir(cli: &Cli, working_dir: Option<&Path>) -> Result<BumpReport> {
    let current_dir = if let Some(dir) = working_dir {
        dir.to_path_buf()
    } else {
        std::env::current_dir().map_err(|source| BumpError::IoError {
            path: PathBuf::from("."),
            source,
        })?
    };

    let Some(solution) = cli.solution_path(&current_dir) else {
        println!("{}", Cli::usage());
        return Ok(BumpReport::default());
    };
    let main_project = cli.main_project_path(&current_dir);
    let opts = cli.global_opts();

    Ok(Bump::builder()
        .solution(&solution)
        .main_project(main_project.as_deref())
        .discovery(opts.discovery_options()?)
        .retry(opts.retry_policy()?)
        .logger(opts.logger())
        .build()?
        .run())
}
