//! Keeps a project's package manifest in step with its product version.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use walkdir::WalkDir;

use crate::error::{BumpError, Result};
use crate::logging::Logger;
use crate::store::RetryPolicy;

fn version_element() -> &'static Regex {
    static VERSION: OnceLock<Regex> = OnceLock::new();
    VERSION.get_or_init(|| {
        Regex::new(r"(<version>)[^<\r\n]+(</version>)")
            .expect("version element regex should compile")
    })
}

/// First `*.nuspec` file directly inside `project_dir`, by file name.
pub fn find_nuspec(project_dir: &Path) -> Option<PathBuf> {
    WalkDir::new(project_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .find(|path| path.extension().is_some_and(|ext| ext == "nuspec"))
}

/// Replaces the content of every non-empty `<version>` element.
pub fn replace_version(content: &str, version: &str) -> String {
    version_element()
        .replace_all(content, |caps: &Captures<'_>| {
            format!("{}{version}{}", &caps[1], &caps[2])
        })
        .into_owned()
}

/// Rewrites the package manifest of the project in `project_dir`, if it has
/// one. Returns the path of the rewritten manifest.
pub fn update_nuspec(
    project_dir: &Path,
    version: &str,
    policy: &RetryPolicy,
    log: &Logger,
) -> Result<Option<PathBuf>> {
    let Some(nuspec) = find_nuspec(project_dir) else {
        return Ok(None);
    };

    policy.run(&nuspec, log, || {
        let bytes = std::fs::read(&nuspec).map_err(|source| BumpError::IoError {
            path: nuspec.clone(),
            source,
        })?;
        let content = String::from_utf8(bytes).map_err(|_| BumpError::InvalidEncoding {
            path: nuspec.clone(),
        })?;
        let updated = replace_version(&content, version);
        if updated != content {
            std::fs::write(&nuspec, updated).map_err(|source| BumpError::IoError {
                path: nuspec.clone(),
                source,
            })?;
        }
        Ok(())
    })?;

    log.detail(format!("  Package manifest \"{}\" updated", nuspec.display()));
    Ok(Some(nuspec))
}
