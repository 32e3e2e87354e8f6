//! Phrase and template tokenization.
//!
//! Intent phrases and pattern templates are compared word by word, so both
//! go through the same tokenizer: words are lowercased, punctuation is
//! dropped, and `{placeholders}` are kept as single tokens.

use std::fmt;

/// A token from a phrase or template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PhraseToken {
    /// A lowercase word.
    Word(String),
    /// A `{name}` slot, stored without braces.
    Placeholder(String),
    /// End of input.
    End,
}

impl PhraseToken {
    /// Returns the word, if this is one.
    #[must_use]
    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(w) => Some(w),
            _ => None,
        }
    }
}

impl fmt::Display for PhraseToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(w) => f.write_str(w),
            Self::Placeholder(p) => write!(f, "{{{p}}}"),
            Self::End => Ok(()),
        }
    }
}

const fn is_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | '!' | '?' | ';' | ':' | '\'' | '"' | '(' | ')')
}

/// Tokenizes intent phrases and pattern templates.
pub struct PhraseTokenizer;

impl PhraseTokenizer {
    /// Tokenizes input into words and placeholders, ending with [`PhraseToken::End`].
    ///
    /// An unterminated `{` is treated as ordinary text.
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<PhraseToken> {
        let mut tokens = Vec::new();
        let mut chars = input.chars().peekable();
        let mut current = String::new();

        let flush = |current: &mut String, tokens: &mut Vec<PhraseToken>| {
            if !current.is_empty() {
                tokens.push(PhraseToken::Word(current.to_lowercase()));
                current.clear();
            }
        };

        while let Some(ch) = chars.next() {
            match ch {
                '{' => {
                    flush(&mut current, &mut tokens);
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    let trimmed = name.trim();
                    if closed && !trimmed.is_empty() {
                        tokens.push(PhraseToken::Placeholder(trimmed.to_string()));
                        continue;
                    }
                    for c in name.chars().filter(|c| *c != '{') {
                        if c.is_whitespace() {
                            flush(&mut current, &mut tokens);
                        } else if !is_punctuation(c) {
                            current.push(c);
                        }
                    }
                    flush(&mut current, &mut tokens);
                }
                c if c.is_whitespace() => flush(&mut current, &mut tokens),
                c if is_punctuation(c) => {}
                _ => current.push(ch),
            }
        }
        flush(&mut current, &mut tokens);

        tokens.push(PhraseToken::End);
        tokens
    }

    /// Canonical text form: tokens joined by single spaces.
    #[must_use]
    pub fn normalize(input: &str) -> String {
        Self::tokenize(input)
            .iter()
            .filter(|t| **t != PhraseToken::End)
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Lowercase words only, placeholders and the end marker removed.
    #[must_use]
    pub fn words(input: &str) -> Vec<String> {
        Self::tokenize(input)
            .into_iter()
            .filter_map(|t| match t {
                PhraseToken::Word(w) => Some(w),
                _ => None,
            })
            .collect()
    }
}
