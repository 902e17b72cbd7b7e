//! Bump command: the solution-wide version increment.
//!
//! Runs in three phases over the projects of one solution, in manifest order:
//!
//! 1. every stale project gets its product version bumped and its version
//!    file's timestamp advanced to the change that triggered it;
//! 2. if anything changed, a designated main project that was not itself
//!    stale gets a product bump too;
//! 3. if anything changed, every project gets the same new shared version,
//!    computed once from the first project that has one.
//!
//! Per-file failures never abort the run. They are logged at `-v` and the
//! affected file is left as it was.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::discovery::{DiscoveryOptions, parse_solution};
use crate::error::{BumpError, Result};
use crate::logging::Logger;
use crate::nuspec::update_nuspec;
use crate::project::Project;
use crate::staleness::detect;
use crate::store::{RetryPolicy, read_tagged, write};
use crate::tag::VersionTag;
use crate::timestamp::Stamp;
use crate::version::VersionNumber;

/// A product version written during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBump {
    pub manifest: PathBuf,
    pub version: VersionNumber,
    /// The file whose change caused the bump. `None` for the main project's
    /// forced bump.
    pub trigger: Option<PathBuf>,
}

/// Everything a run changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BumpReport {
    /// Stale projects whose product version was bumped, in manifest order.
    pub projects: Vec<ProjectBump>,
    pub main_project: Option<ProjectBump>,
    /// The shared version every project converged on.
    pub shared_version: Option<VersionNumber>,
}

impl BumpReport {
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty() && self.main_project.is_none() && self.shared_version.is_none()
    }
}

pub struct Bump<'a> {
    solution: &'a Path,
    main_project: Option<&'a Path>,
    discovery: DiscoveryOptions,
    retry: RetryPolicy,
    log: Logger,
}

#[derive(Default)]
pub struct BumpBuilder<'a> {
    solution: Option<&'a Path>,
    main_project: Option<&'a Path>,
    discovery: DiscoveryOptions,
    retry: RetryPolicy,
    log: Logger,
}

impl<'a> BumpBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solution(mut self, path: &'a Path) -> Self {
        self.solution = Some(path);
        self
    }

    pub fn main_project(mut self, path: Option<&'a Path>) -> Self {
        self.main_project = path;
        self
    }

    pub fn discovery(mut self, options: DiscoveryOptions) -> Self {
        self.discovery = options;
        self
    }

    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    pub fn logger(mut self, log: Logger) -> Self {
        self.log = log;
        self
    }

    pub fn build(self) -> Result<Bump<'a>> {
        let solution = self.solution.ok_or_else(|| BumpError::ConfigError {
            message: "A solution file is required".to_string(),
        })?;

        Ok(Bump {
            solution,
            main_project: self.main_project,
            discovery: self.discovery,
            retry: self.retry,
            log: self.log,
        })
    }
}

impl<'a> Bump<'a> {
    pub fn builder() -> BumpBuilder<'a> {
        BumpBuilder::new()
    }

    /// Runs the bump over every project of the solution.
    pub fn run(self) -> BumpReport {
        self.log
            .progress(format!("Checking \"{}\"", self.solution.display()));

        let manifests = parse_solution(self.solution).unwrap_or_else(|err| {
            self.log.progress(format!("  Solution skipped: {err}"));
            Vec::new()
        });
        let projects: Vec<Project> = manifests
            .iter()
            .map(|manifest| Project::load(manifest, &self.discovery, &self.log))
            .collect();

        let mut main_index = self
            .main_project
            .and_then(|main| projects.iter().position(|project| project.manifest() == main));
        let mut report = BumpReport::default();
        let mut newest_trigger: Option<SystemTime> = None;

        for (index, project) in projects.iter().enumerate() {
            let staleness = detect(project);
            let Some(trigger) = staleness.trigger() else {
                continue;
            };

            newest_trigger = newest_trigger.max(Some(trigger.modified));
            if main_index == Some(index) {
                main_index = None;
            }

            let stamp = Stamp::Advance(trigger.modified);
            let Some(version) = self.bump_tag(project, project.product_tag(), stamp, None) else {
                continue;
            };

            self.log.progress(format!(
                "Project \"{}\" updated to {version}, most recent file: \"{}\"",
                project.manifest().display(),
                trigger.path.display()
            ));
            let nuspec =
                update_nuspec(project.directory(), version.as_str(), &self.retry, &self.log);
            if let Err(err) = nuspec {
                self.log.progress(format!("  Package manifest skipped: {err}"));
            }

            report.projects.push(ProjectBump {
                manifest: project.manifest().to_path_buf(),
                version,
                trigger: Some(trigger.path.clone()),
            });
        }

        let Some(newest_trigger) = newest_trigger else {
            return report;
        };

        if let Some(main) = main_index.map(|index| &projects[index]) {
            let stamp = Stamp::Advance(newest_trigger);
            if let Some(version) = self.bump_tag(main, main.product_tag(), stamp, None) {
                self.log.progress(format!(
                    "Main project \"{}\" updated to {version}",
                    main.manifest().display()
                ));
                report.main_project = Some(ProjectBump {
                    manifest: main.manifest().to_path_buf(),
                    version,
                    trigger: None,
                });
            }
        }

        report.shared_version = self.sweep_shared(&projects);
        if let Some(version) = &report.shared_version {
            self.log.progress(format!("Solution updated to {version}"));
        }

        report
    }

    /// Writes one shared version into every project. The first project that
    /// yields a version fixes the value for the rest of the sweep.
    fn sweep_shared(&self, projects: &[Project]) -> Option<VersionNumber> {
        projects.iter().fold(None, |shared, project| {
            let bumped =
                self.bump_tag(project, project.shared_tag(), Stamp::Preserve, shared.as_ref());
            shared.or(bumped)
        })
    }

    /// Bumps the version framed by `tag` in the project's version file, or
    /// writes `shared` in its place when given. Returns the version written.
    fn bump_tag(
        &self,
        project: &Project,
        tag: VersionTag,
        stamp: Stamp,
        shared: Option<&VersionNumber>,
    ) -> Option<VersionNumber> {
        let info_file = project.info_file()?;
        if tag.is_null() || !info_file.exists() {
            return None;
        }

        let written = read_tagged(info_file, tag, &self.retry, &self.log).and_then(|mut file| {
            let Some(current) = file.version() else {
                return Ok(None);
            };
            let version = match shared {
                Some(shared) => shared.clone(),
                None => VersionNumber::from(current).increment(),
            };
            file.set_version(version.as_str());
            write(
                info_file,
                file.lines(),
                stamp.resolve(file.modified()),
                &self.retry,
                &self.log,
            )?;
            Ok(Some(version))
        });

        match written {
            Ok(Some(version)) => Some(version),
            Ok(None) => {
                self.log.progress(format!(
                    "  No {}...{} line in \"{}\"",
                    tag.start(),
                    tag.end(),
                    info_file.display()
                ));
                None
            }
            Err(err) => {
                self.log
                    .progress(format!("  \"{}\" left unchanged: {err}", info_file.display()));
                None
            }
        }
    }
}
