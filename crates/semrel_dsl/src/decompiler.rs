//! Dimensional → Pattern decompilation with confidence scoring.
//!
//! Each applicable [`PATTERNS`] entry is turned into a candidate pattern,
//! compiled back, and scored on how faithfully it reproduces the rule.

use std::collections::BTreeSet;

use tracing::trace;

use crate::catalog::{FALLBACK_TEMPLATE, PATTERNS, PatternEntry};
use crate::compiler::compile_pattern;
use crate::rule::{DimensionalRule, PatternRule, PatternVariable};

// =============================================================================
// Configuration
// =============================================================================

/// Weights of the four confidence components.
///
/// The score is normalized by the weight total, so only their ratios matter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfidenceWeights {
    /// Catalog priority of the entry.
    pub priority: f64,
    /// Share of the rule's dimensions the candidate reproduces.
    pub coverage: f64,
    /// Agreement on aspect and impact: each counts when the recompiled
    /// candidate reproduces the rule's set, including when both leave it unset.
    pub specificity: f64,
    /// Agreement on target, node kind, and nesting.
    pub preservation: f64,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            priority: 0.4,
            coverage: 0.3,
            specificity: 0.2,
            preservation: 0.1,
        }
    }
}

impl ConfidenceWeights {
    /// Sum of all weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.priority + self.coverage + self.specificity + self.preservation
    }
}

/// Decompiler settings.
#[derive(Clone, Debug, PartialEq)]
pub struct DecompileConfig {
    /// Confidence weights.
    pub weights: ConfidenceWeights,
    /// Alternatives must score strictly above this.
    pub alternative_threshold: f64,
    /// Maximum number of alternatives reported.
    pub max_alternatives: usize,
}

impl Default for DecompileConfig {
    fn default() -> Self {
        Self {
            weights: ConfidenceWeights::default(),
            alternative_threshold: 0.4,
            max_alternatives: 3,
        }
    }
}

impl DecompileConfig {
    /// Builder method to set the weights.
    #[must_use]
    pub fn with_weights(mut self, weights: ConfidenceWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Builder method to set the alternative threshold.
    #[must_use]
    pub fn with_alternative_threshold(mut self, threshold: f64) -> Self {
        self.alternative_threshold = threshold;
        self
    }

    /// Builder method to set the alternative limit.
    #[must_use]
    pub fn with_max_alternatives(mut self, max: usize) -> Self {
        self.max_alternatives = max;
        self
    }
}

// =============================================================================
// Result
// =============================================================================

/// A scored candidate pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct PatternAlternative {
    /// The candidate.
    pub pattern: PatternRule,
    /// Its confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Outcome of [`decompile_to_pattern`].
#[derive(Clone, Debug, PartialEq)]
pub struct DecompileResult {
    /// True if a pattern was produced (fallbacks included).
    pub success: bool,
    /// The best pattern.
    pub pattern: Option<PatternRule>,
    /// Confidence of the best pattern.
    pub confidence: f64,
    /// Runner-up patterns, best first.
    pub alternatives: Vec<PatternAlternative>,
    /// True if no catalog entry applied and the generic template was used.
    pub fallback: bool,
    /// Why decompilation failed.
    pub errors: Vec<String>,
}

// =============================================================================
// Decompilation
// =============================================================================

/// Decompiles with the default configuration.
#[must_use]
pub fn decompile_to_pattern(rule: &DimensionalRule) -> DecompileResult {
    decompile_with(rule, &DecompileConfig::default())
}

/// Decompiles a dimensional rule into the best-matching catalog pattern.
#[must_use]
pub fn decompile_with(rule: &DimensionalRule, config: &DecompileConfig) -> DecompileResult {
    if rule.is_unconstrained() {
        return DecompileResult {
            success: false,
            pattern: None,
            confidence: 0.0,
            alternatives: Vec::new(),
            fallback: false,
            errors: vec!["rule constrains no dimension".to_string()],
        };
    }

    let mut scored: Vec<(PatternAlternative, u8)> = PATTERNS
        .iter()
        .filter(|entry| applicable(entry, rule))
        .map(|entry| {
            let pattern = candidate(entry.template, rule);
            let confidence = score(entry.priority, &pattern, rule, &config.weights);
            trace!(template = entry.template, confidence, "decompile candidate");
            (PatternAlternative { pattern, confidence }, entry.priority)
        })
        .collect();
    scored.sort_by(|(a, pa), (b, pb)| b.confidence.total_cmp(&a.confidence).then(pb.cmp(pa)));

    let mut ranked = scored.into_iter().map(|(alt, _)| alt);
    let Some(best) = ranked.next() else {
        return fallback(rule, &config.weights);
    };
    let alternatives = ranked
        .filter(|alt| alt.confidence > config.alternative_threshold)
        .take(config.max_alternatives)
        .collect();

    DecompileResult {
        success: true,
        pattern: Some(best.pattern),
        confidence: best.confidence,
        alternatives,
        fallback: false,
        errors: Vec::new(),
    }
}

/// An entry applies when every constraint it encodes is allowed by the rule.
fn applicable(entry: &PatternEntry, rule: &DimensionalRule) -> bool {
    let action = rule
        .action
        .as_ref()
        .is_some_and(|actions| actions.contains(&entry.action));
    let aspect = entry
        .aspect
        .is_none_or(|a| rule.aspect.as_ref().is_some_and(|s| s.contains(&a)));
    let impact = entry
        .impact
        .is_none_or(|i| rule.impact.as_ref().is_some_and(|s| s.contains(&i)));
    let tags = entry
        .tags
        .iter()
        .all(|t| rule.tags.as_ref().is_some_and(|s| s.iter().any(|x| x == t)));
    action && aspect && impact && tags
}

/// Builds the candidate pattern for `template`, carrying the rule's
/// targets, node kinds, and nesting as variables.
fn candidate(template: &str, rule: &DimensionalRule) -> PatternRule {
    let template = match rule.nested {
        Some(true) => format!("{template} when {{condition}}"),
        Some(false) => format!("{template} unless {{condition}}"),
        None => template.to_string(),
    };
    let mut pattern = PatternRule::new(template, rule.returns);
    pattern.description.clone_from(&rule.description);
    if let Some(targets) = rule.target.as_ref().filter(|t| !t.is_empty()) {
        pattern.variables.push(PatternVariable::target(targets));
    }
    if let Some(kinds) = rule.node_kind.as_ref().filter(|k| !k.is_empty()) {
        pattern.variables.push(PatternVariable::node_kind(kinds));
    }
    if rule.nested.is_some() {
        pattern.variables.push(PatternVariable::condition("nested"));
    }
    pattern
}

fn same<T: Ord>(a: Option<&Vec<T>>, b: Option<&Vec<T>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => {
            a.iter().collect::<BTreeSet<_>>() == b.iter().collect::<BTreeSet<_>>()
        }
        _ => false,
    }
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        return 1.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let value = hits as f64 / total as f64;
    value
}

/// Scores a candidate by compiling it back and comparing with the rule.
fn score(
    priority: u8,
    pattern: &PatternRule,
    rule: &DimensionalRule,
    weights: &ConfidenceWeights,
) -> f64 {
    let Some(compiled) = compile_pattern(pattern).rule else {
        return 0.0;
    };

    let present = [
        rule.action.is_some(),
        rule.aspect.is_some(),
        rule.impact.is_some(),
        rule.tags.is_some(),
    ];
    let reproduced = [
        same(compiled.action.as_ref(), rule.action.as_ref()),
        same(compiled.aspect.as_ref(), rule.aspect.as_ref()),
        same(compiled.impact.as_ref(), rule.impact.as_ref()),
        same(compiled.tags.as_ref(), rule.tags.as_ref()),
    ];
    let present_count = present.iter().filter(|&&p| p).count();
    let covered = present
        .iter()
        .zip(reproduced)
        .filter(|(p, r)| **p && *r)
        .count();

    let specific = [reproduced[1], reproduced[2]].iter().filter(|&&r| r).count();
    let preserved = [
        same(compiled.target.as_ref(), rule.target.as_ref()),
        same(compiled.node_kind.as_ref(), rule.node_kind.as_ref()),
        compiled.nested == rule.nested,
    ]
    .iter()
    .filter(|&&p| p)
    .count();

    let raw = weights.priority * f64::from(priority.min(10)) / 10.0
        + weights.coverage * ratio(covered, present_count)
        + weights.specificity * ratio(specific, 2)
        + weights.preservation * ratio(preserved, 3);
    let total = weights.total();
    if total <= 0.0 {
        return 0.0;
    }
    (raw / total).clamp(0.0, 1.0)
}

/// The generic `modified {target}` pattern, scored between 0.2 and 0.3.
fn fallback(rule: &DimensionalRule, weights: &ConfidenceWeights) -> DecompileResult {
    let pattern = candidate(FALLBACK_TEMPLATE, rule);
    let fidelity = score(0, &pattern, rule, weights);
    DecompileResult {
        success: true,
        pattern: Some(pattern),
        confidence: 0.2 + 0.1 * fidelity,
        alternatives: Vec::new(),
        fallback: true,
        errors: Vec::new(),
    }
}
