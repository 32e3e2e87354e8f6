//! Intent → Pattern: catalog lookup of natural-language phrases.

use semrel_foundation::text::rank_by_distance;
use semrel_foundation::{Error, Result};

use crate::catalog::{self, IntentEntry};
use crate::rule::{IntentRule, PatternRule, PatternVariable};
use crate::tokenizer::PhraseTokenizer;

/// Maximum number of suggestions offered for an unknown phrase.
pub const MAX_SUGGESTIONS: usize = 3;

/// Outcome of [`parse_intent`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntentParseResult {
    /// True if the phrase was recognized.
    pub success: bool,
    /// The expanded pattern on success.
    pub pattern: Option<PatternRule>,
    /// Why parsing failed.
    pub errors: Vec<String>,
    /// Closest known phrases, best first.
    pub suggestions: Vec<String>,
}

impl IntentParseResult {
    fn ok(pattern: PatternRule) -> Self {
        Self {
            success: true,
            pattern: Some(pattern),
            errors: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    fn failed(error: String, suggestions: Vec<String>) -> Self {
        Self {
            success: false,
            pattern: None,
            errors: vec![error],
            suggestions,
        }
    }

    /// Converts into a `Result`, mapping failure to
    /// [`ErrorKind::UnknownIntent`](semrel_foundation::ErrorKind::UnknownIntent).
    ///
    /// # Errors
    /// Returns an error if the phrase was not recognized.
    pub fn into_result(self, phrase: &str) -> Result<PatternRule> {
        match self.pattern {
            Some(pattern) if self.success => Ok(pattern),
            _ => Err(Error::unknown_intent(phrase, self.suggestions)),
        }
    }
}

/// The conditional connective in `X when Y` / `X unless Y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connective {
    /// Applies to nested changes only.
    When,
    /// Applies to top-level changes only.
    Unless,
}

impl Connective {
    /// Recognizes the connective word.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "when" => Some(Self::When),
            "unless" => Some(Self::Unless),
            _ => None,
        }
    }

    /// The word as written in phrases and templates.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::When => "when",
            Self::Unless => "unless",
        }
    }

    /// The nesting constraint this connective imposes.
    #[must_use]
    pub const fn nested(self) -> bool {
        matches!(self, Self::When)
    }
}

/// Expands an intent phrase into a pattern rule.
///
/// Matching ignores case and punctuation. `X when Y` and `X unless Y` expand
/// `X` and append a `{condition}` clause bound to `Y`. Unknown phrases fail
/// with up to [`MAX_SUGGESTIONS`] similar known phrases.
#[must_use]
pub fn parse_intent(rule: &IntentRule) -> IntentParseResult {
    let words = PhraseTokenizer::words(&rule.phrase);
    if words.is_empty() {
        return IntentParseResult::failed("intent phrase is empty".to_string(), suggestions(""));
    }

    let split = words
        .iter()
        .position(|w| Connective::from_word(w).is_some());
    let (base, condition) = match split {
        Some(index) => (&words[..index], Some((&words[index], &words[index + 1..]))),
        None => (&words[..], None),
    };
    let base = base.join(" ");

    let Some(entry) = catalog::find_intent(&base) else {
        return IntentParseResult::failed(
            format!("unknown intent '{base}'"),
            suggestions(&base),
        );
    };

    let mut pattern = expand(entry, rule);
    if let Some((word, rest)) = condition {
        let Some(connective) = Connective::from_word(word) else {
            return IntentParseResult::failed(format!("unknown connective '{word}'"), Vec::new());
        };
        if rest.is_empty() {
            return IntentParseResult::failed(
                format!("'{}' must be followed by a condition", connective.as_str()),
                Vec::new(),
            );
        }
        pattern.template = format!("{} {} {{condition}}", pattern.template, connective.as_str());
        pattern
            .variables
            .push(PatternVariable::condition(rest.join(" ")));
    }
    IntentParseResult::ok(pattern)
}

fn expand(entry: &IntentEntry, rule: &IntentRule) -> PatternRule {
    let mut pattern = PatternRule::new(entry.template, rule.returns);
    pattern.description.clone_from(&rule.description);
    if let Some(target) = entry.target {
        pattern.variables.push(PatternVariable::target(&[target]));
    }
    pattern
}

fn suggestions(phrase: &str) -> Vec<String> {
    rank_by_distance(phrase, catalog::phrases(), MAX_SUGGESTIONS)
        .into_iter()
        .map(str::to_string)
        .collect()
}
