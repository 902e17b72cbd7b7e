//! Decides whether a project changed since its version was last bumped.
//!
//! A project is stale when any of its sources, or its manifest, was modified
//! strictly after its version file. Equal timestamps are not stale, so running
//! the tool again without further edits never bumps twice.

use std::iter;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::project::Project;
use crate::timestamp::file_mtime;

/// The most recently modified file of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Outcome of [`detect`] for one project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StalenessResult {
    stale: bool,
    newest: Option<Trigger>,
    info_modified: Option<SystemTime>,
}

impl StalenessResult {
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The newest source or manifest, whether or not it made the project
    /// stale.
    pub fn newest(&self) -> Option<&Trigger> {
        self.newest.as_ref()
    }

    /// The file that made the project stale.
    pub fn trigger(&self) -> Option<&Trigger> {
        self.newest.as_ref().filter(|_| self.stale)
    }

    /// Modification time of the version file, when it could be read.
    pub fn info_modified(&self) -> Option<SystemTime> {
        self.info_modified
    }
}

/// Compares a project's newest source against its version file.
///
/// Projects without a version file, or whose version file cannot be
/// inspected, are never stale.
pub fn detect(project: &Project) -> StalenessResult {
    let newest = newest_file(
        project
            .source_files()
            .iter()
            .map(PathBuf::as_path)
            .chain(iter::once(project.manifest())),
    );
    let info_modified = project.info_file().and_then(|info| file_mtime(info).ok());

    let stale = match (&newest, info_modified) {
        (Some(newest), Some(info_modified)) => newest.modified > info_modified,
        _ => false,
    };

    StalenessResult {
        stale,
        newest,
        info_modified,
    }
}

/// Finds the most recently modified file; the first one seen wins a tie.
/// Files whose modification time cannot be read are ignored.
pub fn newest_file<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Option<Trigger> {
    paths
        .into_iter()
        .filter_map(|path| {
            file_mtime(path).ok().map(|modified| Trigger {
                path: path.to_path_buf(),
                modified,
            })
        })
        .fold(None, |newest: Option<Trigger>, candidate| match newest {
            Some(current) if current.modified >= candidate.modified => Some(current),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::time::Duration;

    use filetime::FileTime;
    use tempfile::TempDir;

    use super::*;

    fn touch(path: &Path, modified: SystemTime) {
        if !path.exists() {
            fs::write(path, "").unwrap();
        }
        filetime::set_file_mtime(path, FileTime::from_system_time(modified)).unwrap();
    }

    struct Fixture {
        _dir: TempDir,
        project: Project,
        base: SystemTime,
    }

    /// Framework project with two sources, a manifest and a version file, all
    /// stamped at `base`.
    fn fixture() -> Fixture {
        let dir = TempDir::new().unwrap();
        let base = SystemTime::now() - Duration::from_secs(86_400);
        let sources = vec![dir.path().join("A.cs"), dir.path().join("B.cs")];
        let manifest = dir.path().join("App.csproj");
        let info = dir.path().join("AssemblyInfo.cs");
        for path in sources.iter().chain([&manifest, &info]) {
            touch(path, base);
        }
        Fixture {
            project: Project::framework(manifest, sources, Some(info)),
            _dir: dir,
            base,
        }
    }

    #[test]
    fn test_equal_timestamps_are_not_stale() {
        let fixture = fixture();
        let result = detect(&fixture.project);
        assert!(!result.is_stale());
        assert_eq!(result.trigger(), None);
        assert_eq!(result.newest().unwrap().path, fixture.project.source_files()[0]);
    }

    #[test]
    fn test_newer_source_is_stale() {
        let fixture = fixture();
        let edited = fixture.base + Duration::from_secs(10);
        touch(&fixture.project.source_files()[1], edited);

        let result = detect(&fixture.project);
        assert!(result.is_stale());
        let trigger = result.trigger().unwrap();
        assert_eq!(trigger.path, fixture.project.source_files()[1]);
        assert_eq!(
            FileTime::from_system_time(trigger.modified),
            FileTime::from_system_time(edited)
        );
    }

    #[test]
    fn test_newer_manifest_is_stale() {
        let fixture = fixture();
        touch(fixture.project.manifest(), fixture.base + Duration::from_secs(5));

        let result = detect(&fixture.project);
        assert!(result.is_stale());
        assert_eq!(result.trigger().unwrap().path, fixture.project.manifest());
    }

    #[test]
    fn test_first_seen_wins_ties() {
        let fixture = fixture();
        let edited = fixture.base + Duration::from_secs(10);
        for source in fixture.project.source_files() {
            touch(source, edited);
        }
        touch(fixture.project.manifest(), edited);

        let result = detect(&fixture.project);
        assert_eq!(result.trigger().unwrap().path, fixture.project.source_files()[0]);
    }

    #[test]
    fn test_older_sources_are_not_stale() {
        let fixture = fixture();
        touch(
            fixture.project.info_file().unwrap(),
            fixture.base + Duration::from_secs(60),
        );
        assert!(!detect(&fixture.project).is_stale());
    }

    #[test]
    fn test_missing_sources_are_ignored() {
        let fixture = fixture();
        let mut sources = fixture.project.source_files().to_vec();
        sources.insert(0, fixture.project.directory().join("Deleted.cs"));
        let project = Project::framework(
            fixture.project.manifest(),
            sources,
            fixture.project.info_file().map(Path::to_path_buf),
        );

        let result = detect(&project);
        assert!(!result.is_stale());
        assert_eq!(result.newest().unwrap().path, project.source_files()[1]);
    }

    #[test]
    fn test_missing_info_file_is_not_stale() {
        let fixture = fixture();
        fs::remove_file(fixture.project.info_file().unwrap()).unwrap();
        touch(
            &fixture.project.source_files()[0],
            fixture.base + Duration::from_secs(10),
        );

        let result = detect(&fixture.project);
        assert!(!result.is_stale());
        assert_eq!(result.info_modified(), None);
    }

    #[test]
    fn test_project_without_info_file_is_not_stale() {
        let fixture = fixture();
        let project = Project::framework(
            fixture.project.manifest(),
            fixture.project.source_files().to_vec(),
            None,
        );
        touch(
            &project.source_files()[0],
            fixture.base + Duration::from_secs(10),
        );
        assert!(!detect(&project).is_stale());
    }

    #[test]
    fn test_unreadable_project_is_not_stale() {
        let result = detect(&Project::unreadable("/nowhere/App.csproj"));
        assert!(!result.is_stale());
        assert_eq!(result.newest(), None);
    }
}
