//! Policies: ordered rule lists with a default release type.

use semrel_dsl::{DimensionalRule, Rule, to_dimensional};
use semrel_foundation::{Action, Aspect, Error, Impact, ReleaseType, Result, Target};
use tracing::debug;

/// A policy rule as written, alongside its compiled dimensional form.
#[derive(Clone, Debug, PartialEq)]
pub struct PolicyRule {
    /// The rule as supplied.
    pub source: Rule,
    /// The form used for matching.
    pub compiled: DimensionalRule,
}

impl PolicyRule {
    /// Compiles a rule for matching.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidRule`](semrel_foundation::ErrorKind::InvalidRule)
    /// if the rule does not lower or constrains no dimension.
    pub fn compile(rule: Rule) -> Result<Self> {
        let compiled =
            to_dimensional(&rule).map_err(|e| Error::invalid_rule(format!("{rule}: {e}")))?;
        if compiled.is_unconstrained() {
            return Err(Error::invalid_rule(format!("{rule}: constrains no dimension")));
        }
        Ok(Self {
            source: rule,
            compiled,
        })
    }

    /// Release type assigned on match.
    #[must_use]
    pub fn returns(&self) -> ReleaseType {
        self.compiled.returns
    }

    /// Description from the source rule, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.source.description()
    }
}

/// An ordered rule list; the first matching rule decides.
#[derive(Clone, Debug, PartialEq)]
pub struct Policy {
    name: String,
    rules: Vec<PolicyRule>,
    default: ReleaseType,
}

impl Policy {
    /// Creates a policy, compiling every rule up front.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidRule`](semrel_foundation::ErrorKind::InvalidRule)
    /// naming the first malformed rule.
    pub fn new(
        name: impl Into<String>,
        rules: impl IntoIterator<Item = Rule>,
        default: ReleaseType,
    ) -> Result<Self> {
        let name = name.into();
        let rules = rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| {
                PolicyRule::compile(rule).map_err(|e| {
                    Error::invalid_rule(format!("policy '{name}' rule {index}: {}", e.kind))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(policy = %name, rules = rules.len(), "policy compiled");
        Ok(Self {
            name,
            rules,
            default,
        })
    }

    /// Policy name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[PolicyRule] {
        &self.rules
    }

    /// Release type for changes no rule matches.
    #[must_use]
    pub const fn default_release(&self) -> ReleaseType {
        self.default
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the policy has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The built-in policy.
    ///
    /// Parameter renames are patch-level. Removals, renames, reorders,
    /// required additions, and any narrowing or unrelated change are major;
    /// widening return types break callers that rely on the old type.
    /// Other additions and widenings are minor; deprecations and equivalent
    /// changes are patch.
    #[must_use]
    pub fn standard() -> Self {
        use ReleaseType::{Major, Minor, Patch};

        let rule = |returns: ReleaseType, description: &str| {
            DimensionalRule::new(returns).with_description(description)
        };
        let rules = vec![
            rule(Patch, "parameter renamed")
                .with_targets([Target::Parameter])
                .with_actions([Action::Renamed]),
            rule(Major, "declaration removed").with_actions([Action::Removed]),
            rule(Major, "declaration renamed").with_actions([Action::Renamed]),
            rule(Major, "parameters reordered").with_actions([Action::Reordered]),
            rule(Major, "required member added")
                .with_actions([Action::Added])
                .with_impacts([Impact::Narrowing]),
            rule(Minor, "declaration added").with_actions([Action::Added]),
            rule(Major, "return type widened")
                .with_targets([Target::ReturnType])
                .with_aspects([Aspect::Type])
                .with_impacts([Impact::Widening]),
            rule(Minor, "return type narrowed")
                .with_targets([Target::ReturnType])
                .with_aspects([Aspect::Type])
                .with_impacts([Impact::Narrowing]),
            rule(Major, "narrowing change")
                .with_actions([Action::Modified])
                .with_impacts([Impact::Narrowing]),
            rule(Major, "incompatible change")
                .with_actions([Action::Modified])
                .with_impacts([Impact::Unrelated]),
            rule(Major, "undetermined change")
                .with_actions([Action::Modified])
                .with_impacts([Impact::Undetermined]),
            rule(Minor, "widening change")
                .with_actions([Action::Modified])
                .with_impacts([Impact::Widening]),
            rule(Patch, "deprecation change")
                .with_actions([Action::Modified])
                .with_aspects([Aspect::Deprecation]),
            rule(Patch, "equivalent change")
                .with_actions([Action::Modified])
                .with_impacts([Impact::Equivalent]),
        ];

        Self {
            name: "standard".to_string(),
            rules: rules
                .into_iter()
                .map(|compiled| PolicyRule {
                    source: Rule::Dimensional(compiled.clone()),
                    compiled,
                })
                .collect(),
            default: Patch,
        }
    }
}
