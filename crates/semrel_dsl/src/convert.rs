//! Level-to-level conversion of [`Rule`]s.
//!
//! Downward conversion (toward [`RuleLevel::Dimensional`]) is exact and
//! either succeeds or errors. Upward conversion goes through the scored
//! decompiler and synthesizer and reports how confident it is.

use semrel_foundation::{Error, Result};

use crate::compiler::compile_pattern;
use crate::decompiler::{DecompileConfig, decompile_with};
use crate::intent::parse_intent;
use crate::rule::{DimensionalRule, Rule, RuleLevel};
use crate::synthesizer::synthesize_intent;

/// A rule rewritten at another level.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    /// The rewritten rule.
    pub rule: Rule,
    /// Confidence in `[0, 1]`; 1.0 for downward and identity conversions.
    pub confidence: f64,
    /// True if a generic fallback template or phrase was used on the way.
    pub fallback: bool,
}

impl Conversion {
    fn exact(rule: Rule) -> Self {
        Self {
            rule,
            confidence: 1.0,
            fallback: false,
        }
    }
}

/// Lowers any rule to its dimensional form.
///
/// # Errors
/// Returns [`ErrorKind::UnknownIntent`](semrel_foundation::ErrorKind::UnknownIntent)
/// for unrecognized phrases and
/// [`ErrorKind::PatternCompile`](semrel_foundation::ErrorKind::PatternCompile)
/// for templates that do not compile.
pub fn to_dimensional(rule: &Rule) -> Result<DimensionalRule> {
    match rule {
        Rule::Intent(intent) => {
            let pattern = parse_intent(intent).into_result(&intent.phrase)?;
            compile_pattern(&pattern).into_result()
        }
        Rule::Pattern(pattern) => compile_pattern(pattern).into_result(),
        Rule::Dimensional(dimensional) => Ok(dimensional.clone()),
    }
}

/// Converts a rule to `level` with the default decompiler settings.
///
/// # Errors
/// See [`convert_with`].
pub fn convert(rule: &Rule, level: RuleLevel) -> Result<Conversion> {
    convert_with(rule, level, &DecompileConfig::default())
}

/// Converts a rule to `level`.
///
/// # Errors
/// Downward conversion fails as [`to_dimensional`] does. Upward conversion
/// fails only for rules that constrain no dimension.
pub fn convert_with(rule: &Rule, level: RuleLevel, config: &DecompileConfig) -> Result<Conversion> {
    match (rule, level) {
        (_, target) if rule.level() == target => Ok(Conversion::exact(rule.clone())),
        (Rule::Intent(intent), RuleLevel::Pattern) => {
            let pattern = parse_intent(intent).into_result(&intent.phrase)?;
            Ok(Conversion::exact(pattern.into()))
        }
        (_, RuleLevel::Dimensional) => Ok(Conversion::exact(to_dimensional(rule)?.into())),
        (Rule::Dimensional(dimensional), RuleLevel::Pattern) => {
            raise_to_pattern(dimensional, config)
        }
        (Rule::Pattern(pattern), RuleLevel::Intent) => {
            let result = synthesize_intent(pattern);
            let intent = result.intent.ok_or_else(|| {
                Error::invalid_rule(format!("no intent for '{}'", pattern.template))
            })?;
            Ok(Conversion {
                rule: intent.into(),
                confidence: result.confidence,
                fallback: result.fallback,
            })
        }
        (Rule::Dimensional(dimensional), RuleLevel::Intent) => {
            let pattern = raise_to_pattern(dimensional, config)?;
            let intent = convert_with(&pattern.rule, RuleLevel::Intent, config)?;
            Ok(Conversion {
                rule: intent.rule,
                confidence: pattern.confidence * intent.confidence,
                fallback: pattern.fallback || intent.fallback,
            })
        }
        (other, target) => Err(Error::invalid_rule(format!(
            "cannot convert {} rule to {target}",
            other.level()
        ))),
    }
}

fn raise_to_pattern(rule: &DimensionalRule, config: &DecompileConfig) -> Result<Conversion> {
    let result = decompile_with(rule, config);
    match result.pattern {
        Some(pattern) if result.success => Ok(Conversion {
            rule: pattern.into(),
            confidence: result.confidence,
            fallback: result.fallback,
        }),
        _ => Err(Error::invalid_rule(result.errors.join("; "))),
    }
}
