use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use walkdir::{DirEntry, WalkDir};

use crate::error::{BumpError, Result};

/// Settings for finding the source files of SDK-style projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryOptions {
    source_extension: String,
    ignored_dirs: Vec<String>,
}

impl Default for DiscoveryOptions {
    fn default() -> Self {
        Self {
            source_extension: "cs".to_string(),
            ignored_dirs: vec!["bin".to_string(), "obj".to_string()],
        }
    }
}

impl DiscoveryOptions {
    /// `source_extension` is given without the leading dot.
    pub fn new(source_extension: impl Into<String>, ignored_dirs: Vec<String>) -> Result<Self> {
        let source_extension = source_extension.into();
        let source_extension = source_extension.trim_start_matches('.').to_string();
        if source_extension.is_empty() {
            return Err(BumpError::ConfigError {
                message: "Source extension must not be empty".to_string(),
            });
        }
        Ok(Self {
            source_extension,
            ignored_dirs,
        })
    }

    pub fn source_extension(&self) -> &str {
        &self.source_extension
    }

    pub fn ignored_dirs(&self) -> &[String] {
        &self.ignored_dirs
    }
}

/// Source files and version file listed by a framework-style manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkSources {
    pub source_files: Vec<PathBuf>,
    pub info_file: Option<PathBuf>,
}

/// Reads a solution file and returns the absolute paths of the project
/// manifests it references, in file order.
pub fn parse_solution(solution: &Path) -> Result<Vec<PathBuf>> {
    let content = std::fs::read_to_string(solution).map_err(|source| BumpError::IoError {
        path: solution.to_path_buf(),
        source,
    })?;
    let solution_dir = solution.parent().unwrap_or_else(|| Path::new(""));
    Ok(solution_projects(&content, solution_dir))
}

/// Extracts project manifest paths from solution text.
///
/// Project lines look like
/// `Project("{type}") = "Name", "Name\Name.csproj", "{id}"`; the quoted
/// middle field is the manifest path relative to the solution directory.
/// Lines that do not have exactly that shape are skipped.
pub fn solution_projects(content: &str, solution_dir: &Path) -> Vec<PathBuf> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if !line.starts_with("Project(") {
                return None;
            }
            let (_, value) = line.split_once('=')?;
            if value.contains('=') {
                return None;
            }
            let fields: Vec<&str> = value.split(',').collect();
            let [_, path, _] = fields.as_slice() else {
                return None;
            };
            let path = path.trim().strip_prefix('"')?.strip_suffix('"')?;
            Some(normalize_path(solution_dir, resolve_relative(Path::new(""), path)))
        })
        .collect()
}

/// Collects `<Compile Include="..."/>` and `<DependentUpon>...</DependentUpon>`
/// entries of a framework-style manifest.
///
/// `Properties\AssemblyInfo.<ext>` is reported as the version file and left
/// out of the source list.
pub fn parse_framework_manifest(content: &str, project_dir: &Path) -> FrameworkSources {
    let mut sources = FrameworkSources::default();

    for line in content.lines() {
        let line = line.trim();
        let Some(relative) = manifest_entry(line) else {
            continue;
        };

        let path = resolve_relative(project_dir, relative);
        if is_info_file(relative) {
            sources.info_file = Some(path);
        } else {
            sources.source_files.push(path);
        }
    }

    sources
}

/// Returns the file named by a trimmed `Compile` or `DependentUpon` line.
fn manifest_entry(line: &str) -> Option<&str> {
    static COMPILE_RE: OnceLock<Regex> = OnceLock::new();
    static DEPENDENT_UPON_RE: OnceLock<Regex> = OnceLock::new();

    let compile = COMPILE_RE.get_or_init(|| {
        Regex::new(r#"^<Compile\s+Include\s*=\s*"([^"]+)"\s*/?>$"#)
            .expect("Compile regex should compile")
    });
    let dependent_upon = DEPENDENT_UPON_RE.get_or_init(|| {
        Regex::new(r"^<DependentUpon>(.+)</DependentUpon>$")
            .expect("DependentUpon regex should compile")
    });

    let captures = compile
        .captures(line)
        .or_else(|| dependent_upon.captures(line))?;
    Some(captures.get(1)?.as_str())
}

/// Whether a manifest-relative path names the framework version file.
fn is_info_file(relative: &str) -> bool {
    let parts: Vec<&str> = relative.split(['\\', '/']).collect();
    match parts.as_slice() {
        ["Properties", file] => Path::new(file).file_stem() == Some(OsStr::new("AssemblyInfo")),
        _ => false,
    }
}

/// Lists every file with the source extension under `project_dir`, skipping
/// the ignored directories at any depth. Files are returned in a stable,
/// name-sorted walk order.
pub fn walk_sources(project_dir: &Path, options: &DiscoveryOptions) -> Vec<PathBuf> {
    WalkDir::new(project_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_ignored_dir(entry, options))
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new(options.source_extension())))
        .map(DirEntry::into_path)
        .collect()
}

fn is_ignored_dir(entry: &DirEntry, options: &DiscoveryOptions) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && options
            .ignored_dirs()
            .iter()
            .any(|ignored| entry.file_name() == ignored.as_str())
}

/// Joins a manifest-relative path written with either separator onto `base`.
pub fn resolve_relative(base: &Path, relative: &str) -> PathBuf {
    relative
        .split(['\\', '/'])
        .filter(|part| !part.is_empty())
        .fold(base.to_path_buf(), |path, part| path.join(part))
}

/// Normalize a path to be absolute and clean, without requiring it to exist.
///
/// This function:
/// - Resolves relative paths against `base` (itself made absolute using the
///   current directory when needed)
/// - Removes `.` and `..` components where possible
/// - Does NOT resolve symlinks (preserves user intent)
/// - Does NOT require the path to exist
pub fn normalize_path(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    let absolute = if path.is_relative() {
        let base = if base.is_relative() {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(base)
        } else {
            base.to_path_buf()
        };
        base.join(path)
    } else {
        path.to_path_buf()
    };

    let mut components = Vec::new();
    for component in absolute.components() {
        match component {
            Component::ParentDir => {
                if let Some(last) = components.last()
                    && !matches!(last, Component::ParentDir | Component::RootDir)
                {
                    components.pop();
                    continue;
                }
                components.push(component);
            }
            Component::CurDir => continue,
            _ => components.push(component),
        }
    }

    components.into_iter().collect()
}
