//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use semrel_foundation::text::{humanize, levenshtein, rank_by_distance};
use semrel_foundation::{Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_invalid_rule() {
    let err = Error::invalid_rule("rule 3 constrains no dimension");
    assert!(matches!(err.kind, ErrorKind::InvalidRule(_)));
    assert!(format!("{err}").contains("rule 3"));
}

#[test]
fn error_unknown_intent_without_suggestions() {
    let err = Error::unknown_intent("zzz", Vec::new());
    let msg = format!("{err}");
    assert!(msg.contains("zzz"));
    assert!(!msg.contains("did you mean"));
}

#[test]
fn error_parse() {
    let err = Error::parse("release type", "huge");
    assert!(matches!(err.kind, ErrorKind::ParseError { .. }));
    assert!(format!("{err}").contains("huge"));
}

#[test]
fn error_with_context() {
    let err = Error::pattern_compile("no action").with_context(
        ErrorContext::new()
            .with_source("policy.json")
            .with_position(4, 9)
            .with_frame("rule 2"),
    );
    let context = err.context.as_ref().unwrap().to_string();
    assert!(context.contains("policy.json:4:9"));
    assert!(context.contains("in rule 2"));
}

// =============================================================================
// Text helpers
// =============================================================================

#[test]
fn edit_distance_ranking() {
    assert_eq!(levenshtein("removal", "remvoal"), 2);
    let ranked = rank_by_distance(
        "breaking remval",
        ["safe addition", "breaking removal", "breaking rename"],
        2,
    );
    assert_eq!(ranked, vec!["breaking removal", "breaking rename"]);
}

#[test]
fn humanize_identifiers() {
    assert_eq!(humanize("type-parameter"), "type parameter");
    assert_eq!(humanize("was_required"), "was required");
}
