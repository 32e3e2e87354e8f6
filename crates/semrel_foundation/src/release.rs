//! Release types ordered by severity.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The version bump a change requires.
///
/// Variants are declared in ascending severity so the derived `Ord` gives
/// `None < Patch < Minor < Major < Forbidden`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ReleaseType {
    /// No release needed.
    #[default]
    None,
    /// Bug-fix level change.
    Patch,
    /// Backwards-compatible addition.
    Minor,
    /// Breaking change.
    Major,
    /// Change that must not ship under any version bump.
    Forbidden,
}

impl ReleaseType {
    /// All release types in ascending severity.
    pub const ALL: [Self; 5] = [
        Self::None,
        Self::Patch,
        Self::Minor,
        Self::Major,
        Self::Forbidden,
    ];

    /// Returns the canonical lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
            Self::Forbidden => "forbidden",
        }
    }

    /// Returns the word used when describing a rule of this severity in prose.
    #[must_use]
    pub const fn severity_word(self) -> &'static str {
        match self {
            Self::Forbidden | Self::Major => "breaking",
            Self::Minor => "minor",
            Self::Patch => "patch",
            Self::None => "safe",
        }
    }

    /// Returns true if release automation must stop rather than bump.
    #[must_use]
    pub const fn is_blocking(self) -> bool {
        matches!(self, Self::Forbidden)
    }

    /// Returns the most severe release type in the iterator, or `None` when empty.
    #[must_use]
    pub fn max_of(types: impl IntoIterator<Item = Self>) -> Self {
        types.into_iter().max().unwrap_or(Self::None)
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "patch" => Ok(Self::Patch),
            "minor" => Ok(Self::Minor),
            "major" => Ok(Self::Major),
            "forbidden" => Ok(Self::Forbidden),
            _ => Err(Error::parse("release type", s)),
        }
    }
}
