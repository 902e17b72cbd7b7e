//! Command-line interface definitions for version-builder.
//!
//! The tool takes a solution file and, optionally, a main project. Everything
//! else is tuning with environment variable fallbacks, so a build script can
//! set it once for every invocation.
//!
//! # Example
//!
//! ```no_run
//! use clap::Parser;
//! use version_builder::cli::Cli;
//!
//! let cli = Cli::parse();
//! if let Some(solution) = cli.solution() {
//!     println!("Checking {}", solution.display());
//! }
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{CommandFactory, Parser};

use crate::discovery::{DiscoveryOptions, normalize_path};
use crate::error::{BumpError, Result};
use crate::logging::Logger;
use crate::store::RetryPolicy;

const DEFAULT_SOURCE_EXTENSION: &str = "cs";
const DEFAULT_IGNORED_DIRS: [&str; 2] = ["bin", "obj"];

/// Main command-line interface for version-builder.
#[derive(Parser)]
#[command(
    name = "version-builder",
    bin_name = "version-builder",
    author,
    version,
    about = "Bumps project and solution version numbers when sources change",
    long_about = "Enumerates the source files of every project in a solution. When a file \
                  is newer than its project's version file, the project's file version is \
                  increased, along with the solution-wide assembly version of every \
                  project.\n\nIf a main project is given, its file version is increased at \
                  the same time as the solution version."
)]
pub struct Cli {
    /// Solution file listing the projects to check
    solution: Option<PathBuf>,

    /// Project whose file version is bumped whenever any project changes
    main_project: Option<PathBuf>,

    /// Further arguments, accepted and ignored
    #[arg(hide = true)]
    extra_args: Vec<String>,

    #[command(flatten)]
    global_opts: GlobalOpts,
}

/// Options shared by every invocation.
#[derive(Parser)]
pub struct GlobalOpts {
    /// Print progress (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, env = "VERSION_BUILDER_VERBOSE")]
    verbose: u8,

    /// Silence all output except for errors
    #[arg(short, long, conflicts_with = "verbose", env = "VERSION_BUILDER_QUIET")]
    quiet: bool,

    /// Attempts made on a locked version file before giving up on it
    #[arg(
        long,
        default_value_t = RetryPolicy::DEFAULT_ATTEMPTS,
        env = "VERSION_BUILDER_RETRY_ATTEMPTS"
    )]
    retry_attempts: u32,

    /// Pause between attempts, in milliseconds
    #[arg(long, default_value_t = 500, env = "VERSION_BUILDER_RETRY_DELAY_MS")]
    retry_delay_ms: u64,

    /// Extension of source files in SDK-style projects
    #[arg(
        long,
        default_value = DEFAULT_SOURCE_EXTENSION,
        env = "VERSION_BUILDER_SOURCE_EXTENSION"
    )]
    source_extension: String,

    /// Directories skipped when walking SDK-style projects (comma-separated)
    #[arg(
        long = "ignore-dir",
        value_delimiter = ',',
        default_values = ["bin", "obj"],
        env = "VERSION_BUILDER_IGNORE_DIRS"
    )]
    ignore_dirs: Vec<String>,
}

impl GlobalOpts {
    pub fn builder() -> GlobalOptsBuilder {
        GlobalOptsBuilder::default()
    }

    pub fn verbose(&self) -> u8 {
        self.verbose
    }

    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }

    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }

    pub fn ignore_dirs(&self) -> &[String] {
        &self.ignore_dirs
    }

    /// Logger honouring `--quiet` over `--verbose`.
    pub fn logger(&self) -> Logger {
        let verbose = if self.quiet { 0 } else { self.verbose };
        Logger::new(verbose, self.quiet)
    }

    pub fn retry_policy(&self) -> Result<RetryPolicy> {
        RetryPolicy::new(self.retry_attempts, self.retry_delay())
    }

    pub fn discovery_options(&self) -> Result<DiscoveryOptions> {
        DiscoveryOptions::new(self.source_extension.as_str(), self.ignore_dirs.clone())
    }
}

/// Builder for constructing `GlobalOpts` programmatically.
#[derive(Debug)]
pub struct GlobalOptsBuilder {
    verbose: u8,
    quiet: bool,
    retry_attempts: u32,
    retry_delay: Duration,
    source_extension: String,
    ignore_dirs: Vec<String>,
}

impl Default for GlobalOptsBuilder {
    fn default() -> Self {
        Self {
            verbose: 0,
            quiet: false,
            retry_attempts: RetryPolicy::DEFAULT_ATTEMPTS,
            retry_delay: RetryPolicy::DEFAULT_DELAY,
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            ignore_dirs: DEFAULT_IGNORED_DIRS.map(String::from).to_vec(),
        }
    }
}

impl GlobalOptsBuilder {
    pub fn verbose(mut self, level: u8) -> Self {
        self.verbose = level;
        self
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.retry_attempts = attempts;
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn source_extension(mut self, extension: impl Into<String>) -> Self {
        self.source_extension = extension.into();
        self
    }

    pub fn ignore_dirs(mut self, dirs: Vec<String>) -> Self {
        self.ignore_dirs = dirs;
        self
    }

    pub fn build(self) -> GlobalOpts {
        GlobalOpts {
            verbose: self.verbose,
            quiet: self.quiet,
            retry_attempts: self.retry_attempts,
            retry_delay_ms: u64::try_from(self.retry_delay.as_millis()).unwrap_or(u64::MAX),
            source_extension: self.source_extension,
            ignore_dirs: self.ignore_dirs,
        }
    }
}

impl Cli {
    pub fn global_opts(&self) -> &GlobalOpts {
        &self.global_opts
    }

    /// The solution file as given on the command line.
    pub fn solution(&self) -> Option<&Path> {
        self.solution.as_deref()
    }

    pub fn main_project(&self) -> Option<&Path> {
        self.main_project.as_deref()
    }

    /// The solution file made absolute against `working_dir`.
    pub fn solution_path(&self, working_dir: &Path) -> Option<PathBuf> {
        self.solution().map(|path| normalize_path(working_dir, path))
    }

    /// The main project made absolute against `working_dir`.
    pub fn main_project_path(&self, working_dir: &Path) -> Option<PathBuf> {
        self.main_project().map(|path| normalize_path(working_dir, path))
    }

    /// Long help text, printed when no solution is given.
    pub fn usage() -> String {
        Self::command().render_long_help().to_string()
    }

    /// Create a builder for programmatic construction
    pub fn builder() -> CliBuilder {
        CliBuilder::default()
    }
}

/// Builder for [`Cli`]
#[derive(Debug, Default)]
pub struct CliBuilder {
    solution: Option<PathBuf>,
    main_project: Option<PathBuf>,
    global_opts: GlobalOptsBuilder,
}

impl CliBuilder {
    pub fn solution(mut self, path: impl Into<PathBuf>) -> Self {
        self.solution = Some(path.into());
        self
    }

    pub fn main_project(mut self, path: impl Into<PathBuf>) -> Self {
        self.main_project = Some(path.into());
        self
    }

    pub fn verbose(mut self, level: u8) -> Self {
        self.global_opts = self.global_opts.verbose(level);
        self
    }

    pub fn quiet(mut self, enabled: bool) -> Self {
        self.global_opts = self.global_opts.quiet(enabled);
        self
    }

    pub fn retry_attempts(mut self, attempts: u32) -> Self {
        self.global_opts = self.global_opts.retry_attempts(attempts);
        self
    }

    pub fn retry_delay(mut self, delay: Duration) -> Self {
        self.global_opts = self.global_opts.retry_delay(delay);
        self
    }

    pub fn source_extension(mut self, extension: impl Into<String>) -> Self {
        self.global_opts = self.global_opts.source_extension(extension);
        self
    }

    pub fn ignore_dirs(mut self, dirs: Vec<String>) -> Self {
        self.global_opts = self.global_opts.ignore_dirs(dirs);
        self
    }

    /// Build the Cli instance
    pub fn build(self) -> Result<Cli> {
        if self.main_project.is_some() && self.solution.is_none() {
            return Err(BumpError::ConfigError {
                message: "A main project requires a solution".to_string(),
            });
        }

        Ok(Cli {
            solution: self.solution,
            main_project: self.main_project,
            extra_args: Vec::new(),
            global_opts: self.global_opts.build(),
        })
    }
}
