//! Error types for semrel.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Only fail-fast conditions are errors; structural diagnostics and DSL
//! conversion failures are carried as values by the layers above.

use std::fmt;

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for semrel operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid rule error.
    #[must_use]
    pub fn invalid_rule(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidRule(message.into()))
    }

    /// Creates an invalid descriptor error.
    #[must_use]
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDescriptor(message.into()))
    }

    /// Creates an unknown intent error carrying ranked suggestions.
    #[must_use]
    pub fn unknown_intent(phrase: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::new(ErrorKind::UnknownIntent {
            phrase: phrase.into(),
            suggestions,
        })
    }

    /// Creates a pattern compilation error.
    #[must_use]
    pub fn pattern_compile(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::PatternCompile(message.into()))
    }

    /// Creates a parse error for a vocabulary value.
    #[must_use]
    pub fn parse(what: &'static str, input: impl Into<String>) -> Self {
        Self::new(ErrorKind::ParseError {
            what,
            input: input.into(),
        })
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A rule cannot be used in a policy.
    #[error("invalid rule: {0}")]
    InvalidRule(String),

    /// A change descriptor violates its invariants.
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// An intent phrase is not part of the known vocabulary.
    #[error("unknown intent '{phrase}'{}", format_suggestions(.suggestions))]
    UnknownIntent {
        /// The phrase that was not recognized.
        phrase: String,
        /// Known phrases ranked by similarity.
        suggestions: Vec<String>,
    },

    /// A pattern could not be compiled to dimensional form.
    #[error("pattern compile error: {0}")]
    PatternCompile(String),

    /// A vocabulary value could not be parsed.
    #[error("cannot parse {what} from '{input}'")]
    ParseError {
        /// Which vocabulary was being parsed.
        what: &'static str,
        /// The rejected input.
        input: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File I/O failed.
    #[error("io error: {0}")]
    IoError(String),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file or policy name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Chain of rules or paths being processed.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
