//! Dotted version numbers and their build-number increment.
//!
//! Versions are handled as text: only the last dotted component is ever
//! touched, and anything that does not look like a bumpable version is passed
//! through unchanged rather than rejected.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Versions with fewer components than this are never bumped.
pub const MIN_BUMPABLE_COMPONENTS: usize = 3;

/// A dotted version string such as `1.2.3.4`.
///
/// Parsing is best-effort and never fails; the original text is kept so that
/// an unbumpable value renders exactly as it was read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionNumber {
    text: String,
}

impl VersionNumber {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Iterates over the dot-separated components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.text.split('.')
    }

    /// The build number (last component), if the version is bumpable.
    pub fn build_number(&self) -> Option<u64> {
        if self.components().count() < MIN_BUMPABLE_COMPONENTS {
            return None;
        }
        let last = self.text.rsplit('.').next()?;
        if last.is_empty() || !last.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        last.parse().ok()
    }

    /// Returns the version with its last component incremented by one.
    ///
    /// Two-part versions, a non-numeric last component and a build number
    /// that would overflow all yield an identical copy.
    pub fn increment(&self) -> VersionNumber {
        let Some(next) = self.build_number().and_then(|n| n.checked_add(1)) else {
            return self.clone();
        };

        let prefix_len = self.text.rfind('.').map_or(0, |dot| dot + 1);
        VersionNumber {
            text: format!("{}{next}", &self.text[..prefix_len]),
        }
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for VersionNumber {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for VersionNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Increments the last component of a dotted version string.
///
/// ```
/// use version_builder::version::increment;
///
/// assert_eq!(increment("1.2.3.4"), "1.2.3.5");
/// assert_eq!(increment("1.2"), "1.2");
/// assert_eq!(increment("1.2.x"), "1.2.x");
/// ```
pub fn increment(version: &str) -> String {
    VersionNumber::from(version).increment().to_string()
}
