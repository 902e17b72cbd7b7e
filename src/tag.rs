//! Delimiters framing a version number inside a line of text.

/// A start/end delimiter pair, e.g. `<FileVersion>` and `</FileVersion>`.
///
/// A line carries the tag when its trimmed content starts with `start` and
/// ends with `end`; the text between the two is the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionTag {
    start: &'static str,
    end: &'static str,
}

impl VersionTag {
    /// `[assembly: AssemblyFileVersion("1.0.0.0")]`
    pub const FRAMEWORK_PRODUCT: VersionTag =
        VersionTag::new("[assembly: AssemblyFileVersion(\"", "\")]");
    /// `[assembly: AssemblyVersion("1.0.0.0")]`
    pub const FRAMEWORK_SHARED: VersionTag =
        VersionTag::new("[assembly: AssemblyVersion(\"", "\")]");
    /// `<FileVersion>1.0.0.0</FileVersion>`
    pub const SDK_PRODUCT: VersionTag = VersionTag::new("<FileVersion>", "</FileVersion>");
    /// `<AssemblyVersion>1.0.0.0</AssemblyVersion>`
    pub const SDK_SHARED: VersionTag = VersionTag::new("<AssemblyVersion>", "</AssemblyVersion>");
    /// Matches no line at all.
    pub const NULL: VersionTag = VersionTag::new("", "");

    pub const fn new(start: &'static str, end: &'static str) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> &'static str {
        self.start
    }

    pub fn end(&self) -> &'static str {
        self.end
    }

    pub fn is_null(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }

    /// Returns the version text framed by this tag, if `content` (already
    /// trimmed) is a tagged line.
    pub fn extract<'a>(&self, content: &'a str) -> Option<&'a str> {
        if self.is_null() || content.len() < self.start.len() + self.end.len() {
            return None;
        }
        content
            .strip_prefix(self.start)?
            .strip_suffix(self.end)
    }

    /// Renders `version` framed by this tag.
    pub fn render(&self, version: &str) -> String {
        format!("{}{version}{}", self.start, self.end)
    }
}
