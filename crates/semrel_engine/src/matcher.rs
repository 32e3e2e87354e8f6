//! Dimension-by-dimension matching of changes against dimensional rules.

use std::fmt;

use semrel_diff::Change;
use semrel_dsl::DimensionalRule;

/// A rule dimension, in the order matching checks them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Changed target.
    Target,
    /// Action.
    Action,
    /// Modified aspect.
    Aspect,
    /// Impact.
    Impact,
    /// Tags.
    Tags,
    /// Declaration kind of the changed node.
    NodeKind,
    /// Nesting constraint.
    Nested,
}

impl Dimension {
    /// Returns the lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Target => "target",
            Self::Action => "action",
            Self::Aspect => "aspect",
            Self::Impact => "impact",
            Self::Tags => "tags",
            Self::NodeKind => "node-kind",
            Self::Nested => "nested",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Matches changes against dimensional rules.
///
/// Unconstrained dimensions are wildcards. A constrained dimension matches
/// when the change's value is in the rule's set; tags match when the sets
/// intersect. Aspect and impact constraints never match a change that has
/// no value for them.
pub struct RuleMatcher;

impl RuleMatcher {
    /// Returns true if every dimension of `rule` accepts `change`.
    #[must_use]
    pub fn matches(rule: &DimensionalRule, change: &Change) -> bool {
        Self::mismatch(rule, change).is_none()
    }

    /// The first dimension that rejects `change`, if any.
    #[must_use]
    pub fn mismatch(rule: &DimensionalRule, change: &Change) -> Option<Dimension> {
        let descriptor = &change.descriptor;

        if !allows(rule.target.as_deref(), Some(&descriptor.target())) {
            return Some(Dimension::Target);
        }
        if !allows(rule.action.as_deref(), Some(&descriptor.action())) {
            return Some(Dimension::Action);
        }
        if !allows(rule.aspect.as_deref(), descriptor.aspect().as_ref()) {
            return Some(Dimension::Aspect);
        }
        if !allows(rule.impact.as_deref(), descriptor.impact().as_ref()) {
            return Some(Dimension::Impact);
        }
        if rule
            .tags
            .as_ref()
            .is_some_and(|tags| !tags.iter().any(|t| descriptor.has_tag(t)))
        {
            return Some(Dimension::Tags);
        }
        if !allows(rule.node_kind.as_deref(), Some(&change.node_kind)) {
            return Some(Dimension::NodeKind);
        }
        if rule.nested.is_some_and(|nested| nested != change.context.is_nested) {
            return Some(Dimension::Nested);
        }
        None
    }
}

fn allows<T: PartialEq>(constraint: Option<&[T]>, value: Option<&T>) -> bool {
    match (constraint, value) {
        (None, _) => true,
        (Some(set), Some(value)) => set.contains(value),
        (Some(_), None) => false,
    }
}
