//! Progressive policy builder.
//!
//! Rules are accumulated at whatever level is convenient, optionally
//! rewritten to a single level with [`PolicyBuilder::transform`], and frozen
//! into a [`Policy`] by [`PolicyBuilder::build`]. Every method consumes the
//! builder; cloning it yields an independent copy that shares structure.

use std::fmt;

use im::Vector;
use semrel_dsl::{
    DecompileConfig, DimensionalRule, IntentRule, PatternRule, Rule, RuleLevel, convert_with,
    parse_intent,
};
use semrel_foundation::{Error, ReleaseType, Result};
use tracing::{debug, warn};

use crate::policy::Policy;

// =============================================================================
// Configuration
// =============================================================================

/// Builder settings.
#[derive(Clone, Debug, PartialEq)]
pub struct BuilderConfig {
    /// Upward rewrites below this confidence keep the original rule.
    pub min_upward_confidence: f64,
    /// Decompiler settings used for upward rewrites.
    pub decompile: DecompileConfig,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            min_upward_confidence: 0.6,
            decompile: DecompileConfig::default(),
        }
    }
}

impl BuilderConfig {
    /// Accepts any upward rewrite, fallbacks included.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            min_upward_confidence: 0.0,
            ..Self::default()
        }
    }

    /// Builder method to set the upward confidence threshold.
    #[must_use]
    pub fn with_min_upward_confidence(mut self, confidence: f64) -> Self {
        self.min_upward_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set the decompiler settings.
    #[must_use]
    pub fn with_decompile_config(mut self, config: DecompileConfig) -> Self {
        self.decompile = config;
        self
    }
}

// =============================================================================
// State and Diagnostics
// =============================================================================

/// Lifecycle state of a [`PolicyBuilder`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuilderState {
    /// No rules yet.
    #[default]
    Empty,
    /// At least one rule added.
    Accumulating,
}

/// A rule that [`PolicyBuilder::transform`] left at its original level.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformDiagnostic {
    /// Position of the rule in the builder.
    pub index: usize,
    /// The level that was requested.
    pub requested: RuleLevel,
    /// The level the rule stayed at.
    pub retained: RuleLevel,
    /// Confidence of the rejected rewrite, if one was produced.
    pub confidence: Option<f64>,
    /// What went wrong.
    pub message: String,
}

impl fmt::Display for TransformDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rule {} kept at {} level (requested {}): {}",
            self.index, self.retained, self.requested, self.message
        )
    }
}

// =============================================================================
// Builder
// =============================================================================

/// Accumulates rules at mixed levels and produces a [`Policy`].
#[derive(Clone, Debug, Default)]
pub struct PolicyBuilder {
    rules: Vector<Rule>,
    state: BuilderState,
    config: BuilderConfig,
    diagnostics: Vec<TransformDiagnostic>,
}

impl PolicyBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the configuration.
    #[must_use]
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Adds an intent rule.
    #[must_use]
    pub fn intent(self, phrase: impl Into<String>, returns: ReleaseType) -> Self {
        self.add_rule(IntentRule::new(phrase, returns))
    }

    /// Adds a pattern rule.
    #[must_use]
    pub fn pattern(self, rule: PatternRule) -> Self {
        self.add_rule(rule)
    }

    /// Adds a dimensional rule.
    #[must_use]
    pub fn dimensional(self, rule: DimensionalRule) -> Self {
        self.add_rule(rule)
    }

    /// Adds a rule at any level.
    #[must_use]
    pub fn add_rule(mut self, rule: impl Into<Rule>) -> Self {
        self.rules.push_back(rule.into());
        self.state = BuilderState::Accumulating;
        self
    }

    /// Removes every rule and diagnostic.
    #[must_use]
    pub fn clear(mut self) -> Self {
        self.rules.clear();
        self.diagnostics.clear();
        self.state = BuilderState::Empty;
        self
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> BuilderState {
        self.state
    }

    /// Rules in insertion order.
    #[must_use]
    pub fn rules(&self) -> &Vector<Rule> {
        &self.rules
    }

    /// Number of rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Diagnostics from the most recent [`transform`](Self::transform).
    #[must_use]
    pub fn diagnostics(&self) -> &[TransformDiagnostic] {
        &self.diagnostics
    }

    /// Rewrites every rule at `level`.
    ///
    /// Downward rewrites are exact. Upward rewrites are accepted when the
    /// conversion is at least `min_upward_confidence`. A rule that cannot be
    /// rewritten stays as it was and is reported in [`diagnostics`](Self::diagnostics).
    /// Applying the same transform twice changes nothing further.
    #[must_use]
    pub fn transform(mut self, level: RuleLevel) -> Self {
        self.diagnostics.clear();
        let mut rewritten = Vector::new();

        for (index, rule) in self.rules.iter().enumerate() {
            let upward = level < rule.level();
            let outcome = convert_with(rule, level, &self.config.decompile);
            let diagnostic = |confidence: Option<f64>, message: String| TransformDiagnostic {
                index,
                requested: level,
                retained: rule.level(),
                confidence,
                message,
            };

            match outcome {
                Ok(conversion)
                    if !upward || conversion.confidence >= self.config.min_upward_confidence =>
                {
                    rewritten.push_back(conversion.rule);
                }
                Ok(conversion) => {
                    self.diagnostics.push(diagnostic(
                        Some(conversion.confidence),
                        format!(
                            "best rewrite '{}' scored {:.2}, below {:.2}",
                            conversion.rule,
                            conversion.confidence,
                            self.config.min_upward_confidence
                        ),
                    ));
                    rewritten.push_back(rule.clone());
                }
                Err(e) => {
                    self.diagnostics.push(diagnostic(None, e.to_string()));
                    rewritten.push_back(rule.clone());
                }
            }
        }

        for diagnostic in &self.diagnostics {
            warn!(%diagnostic, "rule not transformed");
        }
        debug!(
            %level,
            rules = rewritten.len(),
            retained = self.diagnostics.len(),
            "transformed rules"
        );
        self.rules = rewritten;
        self
    }

    /// Freezes the rules into a policy.
    ///
    /// Intent rules are expanded to patterns first so the policy keeps the
    /// template that produced each compiled rule.
    ///
    /// # Errors
    /// Returns [`ErrorKind::InvalidRule`](semrel_foundation::ErrorKind::InvalidRule)
    /// for the first rule that does not compile.
    pub fn build(self, name: impl Into<String>, default: ReleaseType) -> Result<Policy> {
        let name = name.into();
        let rules = self
            .rules
            .into_iter()
            .enumerate()
            .map(|(index, rule)| match rule {
                Rule::Intent(intent) => parse_intent(&intent)
                    .into_result(&intent.phrase)
                    .map(Rule::Pattern)
                    .map_err(|e| Error::invalid_rule(format!("rule {index}: {}", e.kind))),
                other => Ok(other),
            })
            .collect::<Result<Vec<_>>>()?;
        debug!(policy = %name, rules = rules.len(), "building policy");
        Policy::new(name, rules, default)
    }
}
