//! Change descriptor vocabulary.
//!
//! Every layer tags and matches changes with the same five dimensions:
//! target, action, aspect, impact, and free-form tags.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// =============================================================================
// Target
// =============================================================================

/// What part of the API surface changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Target {
    /// A top-level (or namespace-level) exported declaration.
    Export,
    /// A callable parameter.
    Parameter,
    /// A property of a class or interface.
    Property,
    /// The return type of a callable.
    ReturnType,
    /// A generic type parameter.
    TypeParameter,
    /// A method of a class or interface.
    Method,
    /// A class constructor.
    Constructor,
    /// A getter or setter.
    Accessor,
    /// An enum member.
    EnumMember,
    /// An index signature.
    IndexSignature,
}

impl Target {
    /// All targets.
    pub const ALL: [Self; 10] = [
        Self::Export,
        Self::Parameter,
        Self::Property,
        Self::ReturnType,
        Self::TypeParameter,
        Self::Method,
        Self::Constructor,
        Self::Accessor,
        Self::EnumMember,
        Self::IndexSignature,
    ];

    /// Returns the canonical kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Export => "export",
            Self::Parameter => "parameter",
            Self::Property => "property",
            Self::ReturnType => "return-type",
            Self::TypeParameter => "type-parameter",
            Self::Method => "method",
            Self::Constructor => "constructor",
            Self::Accessor => "accessor",
            Self::EnumMember => "enum-member",
            Self::IndexSignature => "index-signature",
        }
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| Error::parse("target", s))
    }
}

// =============================================================================
// Action
// =============================================================================

/// What happened to the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Action {
    /// Present only in the new version.
    Added,
    /// Present only in the old version.
    Removed,
    /// Present in both with a differing facet.
    Modified,
    /// Removed and re-added under a similar name.
    Renamed,
    /// Same members in a different order.
    Reordered,
}

impl Action {
    /// All actions.
    pub const ALL: [Self; 5] = [
        Self::Added,
        Self::Removed,
        Self::Modified,
        Self::Renamed,
        Self::Reordered,
    ];

    /// Returns the canonical name, which is also the template verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Modified => "modified",
            Self::Renamed => "renamed",
            Self::Reordered => "reordered",
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| Error::parse("action", s))
    }
}

// =============================================================================
// Aspect
// =============================================================================

/// Which facet of a modified target changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Aspect {
    /// The declared type.
    Type,
    /// Required versus optional.
    Optionality,
    /// Readonly modifier.
    Readonly,
    /// Public/protected/private.
    Visibility,
    /// Deprecation marker.
    Deprecation,
    /// Default value text.
    DefaultValue,
    /// Generic constraint.
    Constraint,
    /// Enum member value.
    EnumValue,
}

impl Aspect {
    /// All aspects.
    pub const ALL: [Self; 8] = [
        Self::Type,
        Self::Optionality,
        Self::Readonly,
        Self::Visibility,
        Self::Deprecation,
        Self::DefaultValue,
        Self::Constraint,
        Self::EnumValue,
    ];

    /// Returns the canonical kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Type => "type",
            Self::Optionality => "optionality",
            Self::Readonly => "readonly",
            Self::Visibility => "visibility",
            Self::Deprecation => "deprecation",
            Self::DefaultValue => "default-value",
            Self::Constraint => "constraint",
            Self::EnumValue => "enum-value",
        }
    }
}

impl FromStr for Aspect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| Error::parse("aspect", s))
    }
}

// =============================================================================
// Impact
// =============================================================================

/// How the set of accepted values moved between versions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Impact {
    /// The new version accepts a superset.
    Widening,
    /// The new version accepts a subset.
    Narrowing,
    /// Both versions accept the same set.
    Equivalent,
    /// Neither set contains the other.
    Unrelated,
    /// The relationship could not be computed.
    Undetermined,
}

impl Impact {
    /// All impacts.
    pub const ALL: [Self; 5] = [
        Self::Widening,
        Self::Narrowing,
        Self::Equivalent,
        Self::Unrelated,
        Self::Undetermined,
    ];

    /// Returns the canonical name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Widening => "widening",
            Self::Narrowing => "narrowing",
            Self::Equivalent => "equivalent",
            Self::Unrelated => "unrelated",
            Self::Undetermined => "undetermined",
        }
    }

    /// Returns the impact seen from the other direction.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Widening => Self::Narrowing,
            Self::Narrowing => Self::Widening,
            other => other,
        }
    }

    /// Combines the impacts of several member changes into one.
    ///
    /// Equivalent members do not move the result; mixed directions are unrelated.
    #[must_use]
    pub fn combine(impacts: impl IntoIterator<Item = Self>) -> Self {
        let mut combined = Self::Equivalent;
        for impact in impacts {
            combined = match (combined, impact) {
                (Self::Undetermined, _) | (_, Self::Undetermined) => Self::Undetermined,
                (current, Self::Equivalent) => current,
                (Self::Equivalent, next) => next,
                (current, next) if current == next => current,
                _ => Self::Unrelated,
            };
        }
        combined
    }
}

impl FromStr for Impact {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = normalize(s);
        Self::ALL
            .into_iter()
            .find(|i| i.as_str() == normalized)
            .ok_or_else(|| Error::parse("impact", s))
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tags
// =============================================================================

/// Well-known descriptor tags written by the differ and read by rules.
pub mod tags {
    /// Added member is required.
    pub const REQUIRED: &str = "required";
    /// Added member is optional.
    pub const OPTIONAL: &str = "optional";
    /// Optionality changed from required.
    pub const WAS_REQUIRED: &str = "was-required";
    /// Optionality changed to optional.
    pub const NOW_OPTIONAL: &str = "now-optional";
    /// Optionality changed from optional.
    pub const WAS_OPTIONAL: &str = "was-optional";
    /// Optionality changed to required.
    pub const NOW_REQUIRED: &str = "now-required";
    /// Readonly modifier added.
    pub const NOW_READONLY: &str = "now-readonly";
    /// Readonly modifier removed.
    pub const WAS_READONLY: &str = "was-readonly";
    /// Deprecation marker added.
    pub const DEPRECATED: &str = "deprecated";
    /// Deprecation marker removed.
    pub const UNDEPRECATED: &str = "undeprecated";
    /// Member has a default value.
    pub const HAS_DEFAULT: &str = "has-default";
    /// The declaration kind itself changed.
    pub const KIND_CHANGED: &str = "kind-changed";
    /// Synthetic owner change standing in for its members.
    pub const MEMBERS_CHANGED: &str = "members-changed";

    /// Tag recording a secondary facet that changed alongside the primary aspect.
    #[must_use]
    pub fn also(aspect: super::Aspect) -> String {
        format!("also-{}", aspect.as_str())
    }
}

// =============================================================================
// Change Descriptor
// =============================================================================

/// The typed classification of a single change.
///
/// `aspect` is present exactly when `action` is [`Action::Modified`]; the
/// constructors enforce this.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ChangeDescriptor {
    target: Target,
    action: Action,
    aspect: Option<Aspect>,
    impact: Option<Impact>,
    tags: BTreeSet<String>,
}

impl ChangeDescriptor {
    /// Creates a descriptor, checking the aspect/action invariant.
    ///
    /// # Errors
    /// Returns an error if `aspect` is given for a non-modified action or is
    /// missing for a modified one.
    pub fn try_new(target: Target, action: Action, aspect: Option<Aspect>) -> Result<Self> {
        match (action, aspect) {
            (Action::Modified, None) => Err(Error::invalid_descriptor(
                "a modified change requires an aspect",
            )),
            (action, Some(aspect)) if action != Action::Modified => {
                Err(Error::invalid_descriptor(format!(
                    "aspect '{aspect}' is only valid for modified changes, not '{action}'"
                )))
            }
            _ => Ok(Self {
                target,
                action,
                aspect,
                impact: None,
                tags: BTreeSet::new(),
            }),
        }
    }

    /// Creates a descriptor for an added, removed, renamed, or reordered target.
    ///
    /// A [`Action::Modified`] action is recorded with a [`Aspect::Type`] aspect.
    #[must_use]
    pub fn presence(target: Target, action: Action) -> Self {
        let aspect = (action == Action::Modified).then_some(Aspect::Type);
        Self {
            target,
            action,
            aspect,
            impact: None,
            tags: BTreeSet::new(),
        }
    }

    /// Creates a descriptor for a modified target.
    #[must_use]
    pub fn modified(target: Target, aspect: Aspect) -> Self {
        Self {
            target,
            action: Action::Modified,
            aspect: Some(aspect),
            impact: None,
            tags: BTreeSet::new(),
        }
    }

    /// Sets the derived impact.
    #[must_use]
    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = Some(impact);
        self
    }

    /// Adds a tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// Adds several tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// The changed target.
    #[must_use]
    pub const fn target(&self) -> Target {
        self.target
    }

    /// What happened.
    #[must_use]
    pub const fn action(&self) -> Action {
        self.action
    }

    /// Which facet changed (modified changes only).
    #[must_use]
    pub const fn aspect(&self) -> Option<Aspect> {
        self.aspect
    }

    /// The derived impact.
    #[must_use]
    pub const fn impact(&self) -> Option<Impact> {
        self.impact
    }

    /// Free-form tags.
    #[must_use]
    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    /// Returns true if the descriptor carries the tag.
    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

impl fmt::Display for ChangeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.action)?;
        if let Some(aspect) = self.aspect {
            write!(f, " [{aspect}]")?;
        }
        if let Some(impact) = self.impact {
            write!(f, " ({impact})")?;
        }
        Ok(())
    }
}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['_', ' '], "-")
}
