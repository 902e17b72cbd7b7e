//! Project descriptors resolved from project manifests.
//!
//! A manifest is inspected once, when the project is loaded, and classified
//! into a [`ProjectKind`]. Every later question (which files are sources,
//! where the version lives, which tags frame it) is answered from that
//! classification.

use std::path::{Path, PathBuf};

use crate::discovery::{DiscoveryOptions, parse_framework_manifest, walk_sources};
use crate::error::{BumpError, Result};
use crate::logging::Logger;
use crate::tag::VersionTag;


/// First-line prefix identifying an SDK-style project manifest.
pub const SDK_MANIFEST_PREFIX: &str = "<Project Sdk=\"Microsoft.NET.Sdk";

/// How a project stores its sources and version numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectKind {
    /// Sources listed in the manifest; versions held as assembly attributes
    /// in `Properties/AssemblyInfo.*`.
    Framework,
    /// Sources found by walking the project directory; versions held as
    /// elements of the manifest itself.
    Sdk,
    /// The manifest could not be read. Has no sources, no version file and
    /// null tags, so it is never stale and never rewritten.
    Unreadable,
}

impl ProjectKind {
    /// Tag framing the per-project (file) version.
    pub fn product_tag(self) -> VersionTag {
        match self {
            ProjectKind::Framework => VersionTag::FRAMEWORK_PRODUCT,
            ProjectKind::Sdk => VersionTag::SDK_PRODUCT,
            ProjectKind::Unreadable => VersionTag::NULL,
        }
    }

    /// Tag framing the solution-wide (assembly) version.
    pub fn shared_tag(self) -> VersionTag {
        match self {
            ProjectKind::Framework => VersionTag::FRAMEWORK_SHARED,
            ProjectKind::Sdk => VersionTag::SDK_SHARED,
            ProjectKind::Unreadable => VersionTag::NULL,
        }
    }
}

/// A project referenced by a solution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    manifest: PathBuf,
    kind: ProjectKind,
    source_files: Vec<PathBuf>,
    info_file: Option<PathBuf>,
}

impl Project {
    /// A framework-style project. `info_file` is dropped from `source_files`
    /// if it appears there.
    pub fn framework(
        manifest: impl Into<PathBuf>,
        mut source_files: Vec<PathBuf>,
        info_file: Option<PathBuf>,
    ) -> Self {
        if let Some(info_file) = &info_file {
            source_files.retain(|source| source != info_file);
        }
        Self {
            manifest: manifest.into(),
            kind: ProjectKind::Framework,
            source_files,
            info_file,
        }
    }

    /// An SDK-style project, whose version file is its own manifest.
    pub fn sdk(manifest: impl Into<PathBuf>, source_files: Vec<PathBuf>) -> Self {
        let manifest = manifest.into();
        Self {
            info_file: Some(manifest.clone()),
            manifest,
            kind: ProjectKind::Sdk,
            source_files,
        }
    }

    pub fn unreadable(manifest: impl Into<PathBuf>) -> Self {
        Self {
            manifest: manifest.into(),
            kind: ProjectKind::Unreadable,
            source_files: Vec::new(),
            info_file: None,
        }
    }

    /// Loads a project, falling back to [`ProjectKind::Unreadable`] when the
    /// manifest cannot be read.
    pub fn load(manifest: &Path, options: &DiscoveryOptions, log: &Logger) -> Self {
        Self::try_load(manifest, options).unwrap_or_else(|err| {
            log.progress(format!("  Project \"{}\" skipped: {err}", manifest.display()));
            Self::unreadable(manifest)
        })
    }

    /// Reads `manifest` and resolves its kind from the first line.
    pub fn try_load(manifest: &Path, options: &DiscoveryOptions) -> Result<Self> {
        if !manifest.is_file() {
            return Err(BumpError::InvalidFileType {
                path: manifest.to_path_buf(),
                message: "Project manifest is not a regular file".to_string(),
            });
        }

        let content = std::fs::read_to_string(manifest).map_err(|source| BumpError::IoError {
            path: manifest.to_path_buf(),
            source,
        })?;
        let project_dir = manifest.parent().unwrap_or_else(|| Path::new(""));

        if is_sdk_manifest(&content) {
            return Ok(Self::sdk(manifest, walk_sources(project_dir, options)));
        }

        let sources = parse_framework_manifest(&content, project_dir);
        Ok(Self::framework(
            manifest,
            sources.source_files,
            sources.info_file,
        ))
    }

    pub fn manifest(&self) -> &Path {
        &self.manifest
    }

    /// Directory holding the manifest.
    pub fn directory(&self) -> &Path {
        self.manifest.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn kind(&self) -> ProjectKind {
        self.kind
    }

    /// Source files in enumeration order, never including the version file.
    pub fn source_files(&self) -> &[PathBuf] {
        &self.source_files
    }

    /// The file holding this project's version tags, if it has one.
    pub fn info_file(&self) -> Option<&Path> {
        self.info_file.as_deref()
    }

    pub fn product_tag(&self) -> VersionTag {
        self.kind.product_tag()
    }

    pub fn shared_tag(&self) -> VersionTag {
        self.kind.shared_tag()
    }
}

fn is_sdk_manifest(content: &str) -> bool {
    content
        .lines()
        .next()
        .map(|line| line.trim_start_matches('\u{feff}').trim())
        .is_some_and(|line| line.starts_with(SDK_MANIFEST_PREFIX))
}
