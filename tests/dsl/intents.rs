//! Integration tests for intent parsing

use semrel_dsl::{IntentRule, VariableKind, parse_intent};
use semrel_foundation::{ErrorKind, ReleaseType};

#[test]
fn every_catalog_phrase_parses() {
    for entry in semrel_dsl::catalog::INTENTS {
        let result = parse_intent(&IntentRule::new(entry.phrase, entry.returns));
        assert!(result.success, "{}: {:?}", entry.phrase, result.errors);
        let pattern = result.pattern.unwrap();
        assert_eq!(pattern.template, entry.template);
        assert_eq!(pattern.returns, entry.returns);
    }
}

#[test]
fn release_type_comes_from_the_rule() {
    let pattern = parse_intent(&IntentRule::new("safe addition", ReleaseType::Patch))
        .pattern
        .unwrap();
    assert_eq!(pattern.returns, ReleaseType::Patch);
}

#[test]
fn description_is_carried() {
    let rule =
        IntentRule::new("deprecation", ReleaseType::Patch).with_description("team convention");
    let pattern = parse_intent(&rule).pattern.unwrap();
    assert_eq!(pattern.description.as_deref(), Some("team convention"));
}

#[test]
fn conditional_binds_condition_variable() {
    let result = parse_intent(&IntentRule::new("breaking removal when nested", ReleaseType::Major));
    let pattern = result.pattern.unwrap();
    assert_eq!(pattern.template, "removed {target} when {condition}");
    assert_eq!(pattern.variable(VariableKind::Condition).unwrap().value, "nested");
    assert_eq!(pattern.variable(VariableKind::Target).unwrap().value, "export");
}

#[test]
fn typo_gets_suggestions() {
    let result = parse_intent(&IntentRule::new("breaking removl", ReleaseType::Major));
    assert!(!result.success);
    assert!(result.pattern.is_none());
    assert!(!result.errors.is_empty());
    assert!(result.suggestions.len() <= semrel_dsl::intent::MAX_SUGGESTIONS);
    assert_eq!(result.suggestions[0], "breaking removal");
}

#[test]
fn empty_phrase_fails() {
    let result = parse_intent(&IntentRule::new("   ", ReleaseType::Major));
    assert!(!result.success);
}

#[test]
fn into_result_reports_unknown_intent() {
    let err = parse_intent(&IntentRule::new("frobnicate", ReleaseType::Major))
        .into_result("frobnicate")
        .unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::UnknownIntent { ref phrase, .. } if phrase == "frobnicate"
    ));
}
