//! Pattern → Intent synthesis.
//!
//! The reverse of [`parse_intent`](crate::intent::parse_intent): find the
//! catalog phrases whose template matches, and score them on how much of
//! the pattern they keep.

use std::collections::BTreeSet;

use semrel_foundation::text::humanize;
use semrel_foundation::{ReleaseType, Target};
use tracing::trace;

use crate::catalog::{INTENTS, IntentEntry, intents_for_template};
use crate::intent::Connective;
use crate::rule::{IntentRule, PatternRule, VariableKind};
use crate::tokenizer::{PhraseToken, PhraseTokenizer};

/// Confidence of a fallback phrase whose placeholders are all bound.
pub const FALLBACK_CONFIDENCE: f64 = 0.3;

/// Confidence of a fallback phrase with unbound placeholders.
pub const PARTIAL_FALLBACK_CONFIDENCE: f64 = 0.2;

/// Alternatives must score strictly above this.
pub const ALTERNATIVE_THRESHOLD: f64 = 0.4;

/// Maximum number of alternatives reported.
pub const MAX_ALTERNATIVES: usize = 3;

const BROADER_INTENT: f64 = 0.9;
const DROPPED_TARGET: f64 = 0.95;
const RETURNS_MISMATCH: f64 = 0.85;
const TARGET_CONFLICT: f64 = 0.5;

/// A scored candidate intent.
#[derive(Clone, Debug, PartialEq)]
pub struct IntentAlternative {
    /// The candidate.
    pub intent: IntentRule,
    /// Its confidence in `[0, 1]`.
    pub confidence: f64,
}

/// Outcome of [`synthesize_intent`].
#[derive(Clone, Debug, PartialEq)]
pub struct SynthesisResult {
    /// True if an intent was produced (fallbacks included).
    pub success: bool,
    /// The best intent.
    pub intent: Option<IntentRule>,
    /// Confidence of the best intent.
    pub confidence: f64,
    /// Runner-up intents, best first.
    pub alternatives: Vec<IntentAlternative>,
    /// True if no catalog phrase matched and a prose phrase was generated.
    pub fallback: bool,
}

/// The template split at its `when`/`unless` clause.
struct Split {
    base: String,
    condition: Option<(Connective, String)>,
}

/// Synthesizes the best intent phrase for a pattern rule.
///
/// The returned intent always carries the pattern's release type, even when
/// the chosen phrase conventionally implies another.
#[must_use]
pub fn synthesize_intent(pattern: &PatternRule) -> SynthesisResult {
    let split = split_condition(pattern);
    let targets = bound_targets(pattern);

    let mut scored: Vec<(&IntentEntry, f64)> = intents_for_template(&split.base)
        .map(|entry| {
            let confidence = score(entry, targets.as_ref(), pattern.returns);
            trace!(phrase = entry.phrase, confidence, "synthesis candidate");
            (entry, confidence)
        })
        .collect();
    scored.sort_by(|(ea, a), (eb, b)| {
        b.total_cmp(a)
            .then(eb.target.is_some().cmp(&ea.target.is_some()))
            .then(catalog_index(ea).cmp(&catalog_index(eb)))
    });

    let mut ranked = scored
        .into_iter()
        .map(|(entry, confidence)| IntentAlternative {
            intent: intent_for(entry.phrase, &split, pattern),
            confidence,
        });
    let Some(best) = ranked.next() else {
        return fallback(pattern, &split);
    };
    let alternatives = ranked
        .filter(|alt| alt.confidence > ALTERNATIVE_THRESHOLD)
        .take(MAX_ALTERNATIVES)
        .collect();

    SynthesisResult {
        success: true,
        intent: Some(best.intent),
        confidence: best.confidence,
        alternatives,
        fallback: false,
    }
}

fn catalog_index(entry: &IntentEntry) -> usize {
    INTENTS
        .iter()
        .position(|e| e == entry)
        .unwrap_or(INTENTS.len())
}

fn score(entry: &IntentEntry, targets: Option<&BTreeSet<Target>>, returns: ReleaseType) -> f64 {
    let mut confidence = match (entry.target, targets) {
        (Some(target), Some(bound)) if bound.len() == 1 && bound.contains(&target) => 1.0,
        (Some(target), Some(bound)) if bound.contains(&target) => BROADER_INTENT,
        (Some(_), Some(_)) => TARGET_CONFLICT,
        (Some(_), None) => BROADER_INTENT,
        (None, Some(_)) => DROPPED_TARGET,
        (None, None) => 1.0,
    };
    if entry.returns != returns {
        confidence *= RETURNS_MISMATCH;
    }
    confidence
}

fn bound_targets(pattern: &PatternRule) -> Option<BTreeSet<Target>> {
    let variable = pattern.variable(VariableKind::Target)?;
    let targets: BTreeSet<Target> = variable.items().filter_map(|t| t.parse().ok()).collect();
    (!targets.is_empty()).then_some(targets)
}

fn split_condition(pattern: &PatternRule) -> Split {
    let tokens = PhraseTokenizer::tokenize(&pattern.template);
    let position = tokens.iter().position(|t| {
        t.as_word()
            .is_some_and(|w| Connective::from_word(w).is_some())
    });
    let Some(index) = position else {
        return Split {
            base: PhraseTokenizer::normalize(&pattern.template),
            condition: None,
        };
    };

    let base = join(&tokens[..index]);
    let connective = tokens[index]
        .as_word()
        .and_then(Connective::from_word)
        .unwrap_or(Connective::When);
    let clause: Vec<String> = tokens[index + 1..]
        .iter()
        .filter_map(|t| match t {
            PhraseToken::Placeholder(name) => pattern
                .variables
                .iter()
                .find(|v| &v.name == name)
                .map(|v| v.value.clone()),
            PhraseToken::Word(w) => Some(w.clone()),
            PhraseToken::End => None,
        })
        .collect();
    let clause = if clause.is_empty() {
        "nested".to_string()
    } else {
        clause.join(" ")
    };
    Split {
        base,
        condition: Some((connective, clause)),
    }
}

fn join(tokens: &[PhraseToken]) -> String {
    tokens
        .iter()
        .filter(|t| **t != PhraseToken::End)
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn intent_for(phrase: &str, split: &Split, pattern: &PatternRule) -> IntentRule {
    let phrase = match &split.condition {
        Some((connective, clause)) => format!("{phrase} {} {clause}", connective.as_str()),
        None => phrase.to_string(),
    };
    let mut intent = IntentRule::new(phrase, pattern.returns);
    intent.description.clone_from(&pattern.description);
    intent
}

/// Prose fallback: the severity word followed by the template with its
/// placeholders replaced by their bound values.
fn fallback(pattern: &PatternRule, split: &Split) -> SynthesisResult {
    let mut unbound = false;
    let words: Vec<String> = PhraseTokenizer::tokenize(&split.base)
        .into_iter()
        .filter_map(|token| match token {
            PhraseToken::Word(w) => Some(w),
            PhraseToken::Placeholder(name) => {
                match pattern.variables.iter().find(|v| v.name == name) {
                    Some(v) => Some(humanize(&v.items().collect::<Vec<_>>().join(" or "))),
                    None => {
                        unbound = true;
                        Some(humanize(&name))
                    }
                }
            }
            PhraseToken::End => None,
        })
        .collect();

    let mut phrase = format!("{} {}", pattern.returns.severity_word(), words.join(" "));
    if let Some((connective, clause)) = &split.condition {
        phrase = format!("{phrase} {} {clause}", connective.as_str());
    }
    let mut intent = IntentRule::new(phrase, pattern.returns);
    intent.description.clone_from(&pattern.description);

    SynthesisResult {
        success: true,
        intent: Some(intent),
        confidence: if unbound {
            PARTIAL_FALLBACK_CONFIDENCE
        } else {
            FALLBACK_CONFIDENCE
        },
        alternatives: Vec::new(),
        fallback: true,
    }
}
