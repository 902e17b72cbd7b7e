//! # version-builder CLI
//!
//! Bumps .NET project and solution version numbers as a build step.
//!
//! ## Usage
//!
//! ```bash
//! version-builder MySolution.sln [MainProject/MainProject.csproj] [-v]
//! ```
//!
//! Every project whose sources are newer than its version file gets its file
//! version incremented. If any project changed, every project then receives
//! the same new assembly version, and the main project (if given) gets its
//! file version incremented too.
//!
//! ## Environment Variables
//!
//! - `VERSION_BUILDER_VERBOSE`: Enable progress output
//! - `VERSION_BUILDER_QUIET`: Silence all output except errors
//! - `VERSION_BUILDER_RETRY_ATTEMPTS`: Attempts on a locked file (default: 5)
//! - `VERSION_BUILDER_RETRY_DELAY_MS`: Pause between attempts (default: 500)
//! - `VERSION_BUILDER_SOURCE_EXTENSION`: SDK project source extension
//! - `VERSION_BUILDER_IGNORE_DIRS`: Directories skipped in SDK projects

use std::io::IsTerminal;

use clap::Parser;
use version_builder::cli::Cli;

fn main() -> miette::Result<()> {
    miette::set_panic_hook();

    if std::io::stderr().is_terminal() {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::unicode_nocolor())
                    .with_context_lines(3),
            )
        }))?;
    } else {
        miette::set_hook(Box::new(|_| {
            Box::new(
                miette::GraphicalReportHandler::new()
                    .with_theme(miette::GraphicalTheme::none())
                    .with_context_lines(0),
            )
        }))?;
    }

    let cli = Cli::parse();

    version_builder::commands::execute(&cli).map_err(Into::into)
}
