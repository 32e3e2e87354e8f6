//! Rule definitions at the three DSL levels.
//!
//! Every rule carries the release type it assigns and an optional
//! description. [`Rule`] is the closed union the engine and builder match on.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use semrel_foundation::{Action, Aspect, Impact, NodeKind, ReleaseType, Target};

// =============================================================================
// Rule Level
// =============================================================================

/// The abstraction level of a rule, from most natural to most precise.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RuleLevel {
    /// A catalog phrase such as `breaking removal`.
    Intent,
    /// A template with bound variables.
    Pattern,
    /// Explicit dimension sets.
    Dimensional,
}

impl fmt::Display for RuleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Intent => "intent",
            Self::Pattern => "pattern",
            Self::Dimensional => "dimensional",
        })
    }
}

// =============================================================================
// Intent
// =============================================================================

/// A rule expressed as a natural-language phrase.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntentRule {
    /// The phrase, e.g. `breaking removal` or `deprecation when nested`.
    pub phrase: String,
    /// Release type assigned to matching changes.
    pub returns: ReleaseType,
    /// Optional human description.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl IntentRule {
    /// Creates an intent rule.
    #[must_use]
    pub fn new(phrase: impl Into<String>, returns: ReleaseType) -> Self {
        Self {
            phrase: phrase.into(),
            returns,
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// =============================================================================
// Pattern
// =============================================================================

/// What a pattern variable binds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VariableKind {
    /// Comma-separated descriptor targets.
    Target,
    /// Comma-separated node kinds.
    NodeKind,
    /// Text of a `when`/`unless` condition.
    Condition,
    /// A nested template whose dimensions refine the rule.
    NestedPattern,
}

/// A `{placeholder}` binding.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternVariable {
    /// Placeholder name without braces.
    pub name: String,
    /// Bound value.
    pub value: String,
    /// How the value is interpreted.
    pub kind: VariableKind,
}

impl PatternVariable {
    /// Creates a binding.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>, kind: VariableKind) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            kind,
        }
    }

    /// Binds `{target}` to the given targets.
    #[must_use]
    pub fn target(targets: &[Target]) -> Self {
        Self::new("target", join(targets.iter().map(|t| t.as_str())), VariableKind::Target)
    }

    /// Binds node kinds.
    #[must_use]
    pub fn node_kind(kinds: &[NodeKind]) -> Self {
        Self::new("node_kind", join(kinds.iter().map(|k| k.as_str())), VariableKind::NodeKind)
    }

    /// Binds `{condition}`.
    #[must_use]
    pub fn condition(value: impl Into<String>) -> Self {
        Self::new("condition", value, VariableKind::Condition)
    }

    /// The comma-separated items of the value, trimmed.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.value.split(',').map(str::trim).filter(|s| !s.is_empty())
    }
}

fn join<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.collect::<Vec<_>>().join(",")
}

/// A rule expressed as a template plus variable bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PatternRule {
    /// Template such as `added required {target}`.
    pub template: String,
    /// Placeholder bindings.
    #[cfg_attr(feature = "serde", serde(default))]
    pub variables: Vec<PatternVariable>,
    /// Release type assigned to matching changes.
    pub returns: ReleaseType,
    /// Optional human description.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl PatternRule {
    /// Creates a pattern rule without bindings.
    #[must_use]
    pub fn new(template: impl Into<String>, returns: ReleaseType) -> Self {
        Self {
            template: template.into(),
            variables: Vec::new(),
            returns,
            description: None,
        }
    }

    /// Adds a binding.
    #[must_use]
    pub fn with_variable(mut self, variable: PatternVariable) -> Self {
        self.variables.push(variable);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Finds the first binding of the given kind.
    #[must_use]
    pub fn variable(&self, kind: VariableKind) -> Option<&PatternVariable> {
        self.variables.iter().find(|v| v.kind == kind)
    }
}

// =============================================================================
// Dimensional
// =============================================================================

/// A rule expressed as explicit allowed sets per descriptor dimension.
///
/// `None` leaves a dimension unconstrained. `nested` restricts the rule to
/// nested changes (`Some(true)`) or top-level ones (`Some(false)`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DimensionalRule {
    /// Allowed targets.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub target: Option<Vec<Target>>,
    /// Allowed actions.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub action: Option<Vec<Action>>,
    /// Allowed aspects.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub aspect: Option<Vec<Aspect>>,
    /// Allowed impacts.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub impact: Option<Vec<Impact>>,
    /// Tags of which at least one must be present.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub tags: Option<Vec<String>>,
    /// Allowed node kinds.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub node_kind: Option<Vec<NodeKind>>,
    /// Nesting constraint.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub nested: Option<bool>,
    /// Release type assigned to matching changes.
    pub returns: ReleaseType,
    /// Optional human description.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub description: Option<String>,
}

impl DimensionalRule {
    /// Creates a rule with every dimension unconstrained.
    #[must_use]
    pub fn new(returns: ReleaseType) -> Self {
        Self {
            target: None,
            action: None,
            aspect: None,
            impact: None,
            tags: None,
            node_kind: None,
            nested: None,
            returns,
            description: None,
        }
    }

    /// Restricts targets.
    #[must_use]
    pub fn with_targets(mut self, targets: impl IntoIterator<Item = Target>) -> Self {
        self.target = Some(targets.into_iter().collect());
        self
    }

    /// Restricts actions.
    #[must_use]
    pub fn with_actions(mut self, actions: impl IntoIterator<Item = Action>) -> Self {
        self.action = Some(actions.into_iter().collect());
        self
    }

    /// Restricts aspects.
    #[must_use]
    pub fn with_aspects(mut self, aspects: impl IntoIterator<Item = Aspect>) -> Self {
        self.aspect = Some(aspects.into_iter().collect());
        self
    }

    /// Restricts impacts.
    #[must_use]
    pub fn with_impacts(mut self, impacts: impl IntoIterator<Item = Impact>) -> Self {
        self.impact = Some(impacts.into_iter().collect());
        self
    }

    /// Requires at least one of the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts node kinds.
    #[must_use]
    pub fn with_node_kinds(mut self, kinds: impl IntoIterator<Item = NodeKind>) -> Self {
        self.node_kind = Some(kinds.into_iter().collect());
        self
    }

    /// Sets the nesting constraint.
    #[must_use]
    pub fn with_nested(mut self, nested: bool) -> Self {
        self.nested = Some(nested);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Number of constrained dimensions. Empty sets count as constraints.
    #[must_use]
    pub fn constrained_dimensions(&self) -> usize {
        [
            self.target.is_some(),
            self.action.is_some(),
            self.aspect.is_some(),
            self.impact.is_some(),
            self.tags.is_some(),
            self.node_kind.is_some(),
            self.nested.is_some(),
        ]
        .into_iter()
        .filter(|&b| b)
        .count()
    }

    /// Returns true if the rule constrains nothing.
    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        self.constrained_dimensions() == 0
    }
}

// =============================================================================
// Rule
// =============================================================================

/// A rule at any level.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "level", rename_all = "lowercase"))]
pub enum Rule {
    /// Natural-language phrase.
    Intent(IntentRule),
    /// Template with bindings.
    Pattern(PatternRule),
    /// Explicit dimensions.
    Dimensional(DimensionalRule),
}

impl Rule {
    /// The level this rule is expressed at.
    #[must_use]
    pub const fn level(&self) -> RuleLevel {
        match self {
            Self::Intent(_) => RuleLevel::Intent,
            Self::Pattern(_) => RuleLevel::Pattern,
            Self::Dimensional(_) => RuleLevel::Dimensional,
        }
    }

    /// Release type the rule assigns.
    #[must_use]
    pub const fn returns(&self) -> ReleaseType {
        match self {
            Self::Intent(r) => r.returns,
            Self::Pattern(r) => r.returns,
            Self::Dimensional(r) => r.returns,
        }
    }

    /// Optional description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        match self {
            Self::Intent(r) => r.description.as_deref(),
            Self::Pattern(r) => r.description.as_deref(),
            Self::Dimensional(r) => r.description.as_deref(),
        }
    }
}

impl From<IntentRule> for Rule {
    fn from(rule: IntentRule) -> Self {
        Self::Intent(rule)
    }
}

impl From<PatternRule> for Rule {
    fn from(rule: PatternRule) -> Self {
        Self::Pattern(rule)
    }
}

impl From<DimensionalRule> for Rule {
    fn from(rule: DimensionalRule) -> Self {
        Self::Dimensional(rule)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Intent(r) => write!(f, "intent '{}' -> {}", r.phrase, r.returns),
            Self::Pattern(r) => write!(f, "pattern '{}' -> {}", r.template, r.returns),
            Self::Dimensional(r) => write!(
                f,
                "dimensional ({} dimensions) -> {}",
                r.constrained_dimensions(),
                r.returns
            ),
        }
    }
}
