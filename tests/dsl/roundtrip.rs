//! Integration tests for conversions between rule levels

use proptest::prelude::*;
use semrel_dsl::catalog::{INTENTS, PATTERNS};
use semrel_dsl::{
    DecompileConfig, DimensionalRule, IntentRule, PatternRule, PatternVariable, Rule, RuleLevel,
    VariableKind, compile_pattern, convert, decompile_to_pattern, decompile_with, synthesize_intent,
};
use semrel_foundation::{Action, Aspect, Impact, ReleaseType, Target};

fn intent_of(rule: &Rule) -> &IntentRule {
    match rule {
        Rule::Intent(intent) => intent,
        other => panic!("expected an intent rule, got {other}"),
    }
}

/// Dimensions that matter for matching; descriptions are ignored.
fn dimensions(rule: &DimensionalRule) -> DimensionalRule {
    DimensionalRule {
        description: None,
        ..rule.clone()
    }
}

#[test]
fn every_catalog_intent_survives_a_round_trip() {
    for entry in INTENTS {
        let start: Rule = IntentRule::new(entry.phrase, entry.returns).into();
        let down = convert(&start, RuleLevel::Dimensional).unwrap();
        assert!((down.confidence - 1.0).abs() < f64::EPSILON);

        let up = convert(&down.rule, RuleLevel::Intent).unwrap();
        let intent = intent_of(&up.rule);
        assert_eq!(intent.phrase, entry.phrase);
        assert_eq!(intent.returns, entry.returns);
        assert!(!up.fallback, "{}", entry.phrase);
        assert!(up.confidence > 0.8, "{}: {}", entry.phrase, up.confidence);
    }
}

#[test]
fn conditional_intent_round_trip() {
    let start: Rule = IntentRule::new("deprecation when nested", ReleaseType::Patch).into();
    let down = convert(&start, RuleLevel::Dimensional).unwrap();
    let up = convert(&down.rule, RuleLevel::Intent).unwrap();
    assert_eq!(intent_of(&up.rule).phrase, "deprecation when nested");
}

#[test]
fn returns_survive_against_convention() {
    let start: Rule = IntentRule::new("safe addition", ReleaseType::Major).into();
    let down = convert(&start, RuleLevel::Dimensional).unwrap();
    let up = convert(&down.rule, RuleLevel::Intent).unwrap();
    assert_eq!(up.rule.returns(), ReleaseType::Major);
}

#[test]
fn unknown_dimensional_combination_falls_back() {
    let rule = DimensionalRule::new(ReleaseType::Minor)
        .with_targets([Target::Property])
        .with_actions([Action::Modified])
        .with_aspects([Aspect::Visibility])
        .with_impacts([Impact::Widening]);
    let result = decompile_to_pattern(&rule);
    assert!(result.success);
    assert!(result.fallback);
    assert!((0.2..=0.3).contains(&result.confidence), "{}", result.confidence);
    let pattern = result.pattern.unwrap();
    assert_eq!(pattern.template, "modified {target}");
    assert_eq!(pattern.variable(VariableKind::Target).unwrap().value, "property");
}

#[test]
fn unconstrained_rule_cannot_be_raised() {
    let result = decompile_to_pattern(&DimensionalRule::new(ReleaseType::Major));
    assert!(!result.success);
    assert!(result.pattern.is_none());
    assert!(convert(&DimensionalRule::new(ReleaseType::Major).into(), RuleLevel::Pattern).is_err());
}

#[test]
fn alternatives_respect_config() {
    let rule = DimensionalRule::new(ReleaseType::Major)
        .with_targets([Target::Parameter])
        .with_actions([Action::Added])
        .with_impacts([Impact::Narrowing])
        .with_tags(["required"]);
    let none = decompile_with(&rule, &DecompileConfig::default().with_max_alternatives(0));
    assert!(none.alternatives.is_empty());

    let all = decompile_with(&rule, &DecompileConfig::default().with_alternative_threshold(0.0));
    assert!(!all.alternatives.is_empty());
    assert!(all.alternatives.iter().all(|a| a.confidence <= all.confidence));
}

#[test]
fn uncatalogued_template_synthesizes_prose() {
    let pattern = PatternRule::new("{target} constraint changed", ReleaseType::Major)
        .with_variable(PatternVariable::target(&[Target::TypeParameter]));
    let result = synthesize_intent(&pattern);
    assert!(result.success);
    assert!(result.fallback);
    let intent = result.intent.unwrap();
    assert!(intent.phrase.starts_with("breaking"), "{}", intent.phrase);
    assert_eq!(intent.returns, ReleaseType::Major);
}

fn release() -> impl Strategy<Value = ReleaseType> {
    prop::sample::select(vec![
        ReleaseType::None,
        ReleaseType::Patch,
        ReleaseType::Minor,
        ReleaseType::Major,
        ReleaseType::Forbidden,
    ])
}

proptest! {
    #[test]
    fn decompiled_patterns_compile_to_the_same_dimensions(
        index in 0..PATTERNS.len(),
        target in prop::sample::select(Target::ALL.to_vec()),
        returns in release(),
        nested in prop::option::of(any::<bool>()),
    ) {
        let entry = &PATTERNS[index];
        let template = match nested {
            Some(true) => format!("{} when {{condition}}", entry.template),
            Some(false) => format!("{} unless {{condition}}", entry.template),
            None => entry.template.to_string(),
        };
        let mut pattern = PatternRule::new(template, returns)
            .with_variable(PatternVariable::target(&[target]));
        if nested.is_some() {
            pattern = pattern.with_variable(PatternVariable::condition("nested"));
        }
        let original = compile_pattern(&pattern).into_result().unwrap();

        let result = decompile_to_pattern(&original);
        prop_assert!(result.success);
        prop_assert!(!result.fallback);
        prop_assert!(result.confidence > 0.8, "{} -> {}", entry.template, result.confidence);
        if entry.priority >= 8 {
            prop_assert!(result.confidence >= 0.9, "{} -> {}", entry.template, result.confidence);
        }
        let recompiled = compile_pattern(&result.pattern.unwrap()).into_result().unwrap();
        prop_assert_eq!(dimensions(&recompiled), dimensions(&original));
    }
}
