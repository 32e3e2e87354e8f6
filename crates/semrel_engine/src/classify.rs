//! Classifying changes against a policy.

use semrel_diff::Change;
use semrel_foundation::ReleaseType;
#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::trace;

use crate::matcher::RuleMatcher;
use crate::policy::Policy;

/// The verdict for one change, with its nested members' verdicts.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Classification {
    /// Path of the classified change.
    pub path: String,
    /// Release type from the first matching rule, or the policy default.
    pub release_type: ReleaseType,
    /// Index of the matching rule.
    pub matched_rule: Option<usize>,
    /// Description of the matching rule.
    pub rule_description: Option<String>,
    /// Verdicts for nested member changes, parallel to `Change::nested`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub nested: Vec<Classification>,
}

impl Classification {
    /// The most severe verdict in this subtree.
    #[must_use]
    pub fn effective(&self) -> ReleaseType {
        self.nested
            .iter()
            .map(Classification::effective)
            .fold(self.release_type, Ord::max)
    }

    /// Returns true if the policy default was used.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        self.matched_rule.is_none()
    }
}

/// Verdicts for a whole diff.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ClassificationReport {
    /// Most severe verdict across all changes; `none` when there are none.
    pub overall: ReleaseType,
    /// One classification per top-level change, in order.
    pub classifications: Vec<Classification>,
}

impl ClassificationReport {
    /// Returns true if the overall verdict is more severe than `expected`.
    #[must_use]
    pub fn exceeds(&self, expected: ReleaseType) -> bool {
        self.overall > expected
    }

    /// Returns true if release automation must stop.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.overall.is_blocking()
    }

    /// Iterates every classification, nested ones included, depth first.
    pub fn iter(&self) -> impl Iterator<Item = &Classification> {
        let mut stack: Vec<&Classification> = self.classifications.iter().rev().collect();
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.nested.iter().rev());
            Some(next)
        })
    }
}

/// Classifies one change and, recursively, its nested changes.
#[must_use]
pub fn classify(change: &Change, policy: &Policy) -> Classification {
    let matched = policy
        .rules()
        .iter()
        .enumerate()
        .find(|(_, rule)| RuleMatcher::matches(&rule.compiled, change));

    let (release_type, matched_rule, rule_description) = match matched {
        Some((index, rule)) => (
            rule.returns(),
            Some(index),
            rule.description().map(str::to_string),
        ),
        None => (policy.default_release(), None, None),
    };
    trace!(path = %change.path, %release_type, rule = ?matched_rule, "classified");

    Classification {
        path: change.path.clone(),
        release_type,
        matched_rule,
        rule_description,
        nested: change.nested.iter().map(|c| classify(c, policy)).collect(),
    }
}

/// Classifies every change and computes the overall verdict.
#[must_use]
pub fn classify_all(changes: &[Change], policy: &Policy) -> ClassificationReport {
    let classifications: Vec<Classification> =
        changes.iter().map(|c| classify(c, policy)).collect();
    let overall = ReleaseType::max_of(classifications.iter().map(Classification::effective));
    ClassificationReport {
        overall,
        classifications,
    }
}
