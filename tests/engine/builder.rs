//! Integration tests for PolicyBuilder

use semrel_diff::DiffOptions;
use semrel_dsl::{DimensionalRule, PatternRule, PatternVariable, Rule, RuleLevel};
use semrel_engine::{BuilderConfig, BuilderState, PolicyBuilder};
use semrel_foundation::{Action, Aspect, ErrorKind, ReleaseType, Target};
use semrel_model::NodeSpec;

use crate::classify_versions;

fn team_builder() -> PolicyBuilder {
    PolicyBuilder::new()
        .intent("parameter removal", ReleaseType::Major)
        .intent("optional parameter added", ReleaseType::Minor)
        .pattern(
            PatternRule::new("added required {target}", ReleaseType::Forbidden)
                .with_variable(PatternVariable::target(&[Target::Parameter])),
        )
        .dimensional(
            DimensionalRule::new(ReleaseType::Patch)
                .with_actions([Action::Modified])
                .with_aspects([Aspect::Deprecation])
                .with_description("deprecations"),
        )
}

#[test]
fn mixed_levels_build_and_classify() {
    let policy = team_builder().build("team", ReleaseType::Patch).unwrap();
    assert_eq!(policy.name(), "team");
    assert_eq!(policy.len(), 4);

    let report = classify_versions(
        vec![NodeSpec::function("f").param("x", "string")],
        vec![NodeSpec::function("f")],
        &DiffOptions::default(),
        &policy,
    );
    assert_eq!(report.overall, ReleaseType::Major);
    assert_eq!(report.classifications[0].matched_rule, Some(0));
}

#[test]
fn forbidden_verdict_blocks() {
    let policy = team_builder().build("team", ReleaseType::Patch).unwrap();
    let report = classify_versions(
        vec![NodeSpec::function("f")],
        vec![NodeSpec::function("f").param("x", "string")],
        &DiffOptions::default(),
        &policy,
    );
    assert_eq!(report.overall, ReleaseType::Forbidden);
    assert!(report.is_blocking());
}

#[test]
fn unmatched_changes_use_the_default() {
    let policy = team_builder().build("team", ReleaseType::Minor).unwrap();
    let report = classify_versions(
        vec![NodeSpec::function("f").param("a", "string").param("b", "number")],
        vec![NodeSpec::function("f").param("b", "number").param("a", "string")],
        &DiffOptions::default(),
        &policy,
    );
    assert!(report.classifications[0].is_default());
    assert_eq!(report.overall, ReleaseType::Minor);
}

#[test]
fn rule_order_is_preserved() {
    let builder = team_builder();
    let levels: Vec<_> = builder.rules().iter().map(Rule::level).collect();
    assert_eq!(
        levels,
        vec![RuleLevel::Intent, RuleLevel::Intent, RuleLevel::Pattern, RuleLevel::Dimensional]
    );
    assert_eq!(builder.state(), BuilderState::Accumulating);
}

#[test]
fn building_does_not_consume_a_clone() {
    let base = team_builder();
    let policy = base.clone().build("a", ReleaseType::Patch).unwrap();
    let extended = base
        .clone()
        .intent("deprecation", ReleaseType::Patch)
        .build("b", ReleaseType::Patch)
        .unwrap();
    assert_eq!(policy.len(), 4);
    assert_eq!(extended.len(), 5);
    assert_eq!(base.len(), 4);
}

#[test]
fn transform_down_then_build_matches_direct_build() {
    let direct = team_builder().build("x", ReleaseType::Patch).unwrap();
    let lowered = team_builder()
        .transform(RuleLevel::Dimensional)
        .build("x", ReleaseType::Patch)
        .unwrap();
    let compiled = |p: &semrel_engine::Policy| -> Vec<DimensionalRule> {
        p.rules()
            .iter()
            .map(|r| DimensionalRule {
                description: None,
                ..r.compiled.clone()
            })
            .collect()
    };
    assert_eq!(compiled(&direct), compiled(&lowered));
}

#[test]
fn strict_threshold_keeps_rules_in_place() {
    let builder = team_builder()
        .with_config(BuilderConfig::default().with_min_upward_confidence(1.0))
        .transform(RuleLevel::Intent);
    assert!(!builder.diagnostics().is_empty());
    for diagnostic in builder.diagnostics() {
        assert_eq!(diagnostic.requested, RuleLevel::Intent);
        assert!(diagnostic.to_string().contains("kept at"));
    }
}

#[test]
fn permissive_config_accepts_fallbacks() {
    let odd = DimensionalRule::new(ReleaseType::Minor)
        .with_actions([Action::Modified])
        .with_aspects([Aspect::Visibility]);
    let builder = PolicyBuilder::new()
        .with_config(BuilderConfig::permissive())
        .dimensional(odd)
        .transform(RuleLevel::Pattern);
    assert!(builder.diagnostics().is_empty());
    assert_eq!(builder.rules()[0].level(), RuleLevel::Pattern);
}

#[test]
fn empty_builder_builds_empty_policy() {
    let policy = PolicyBuilder::new().build("empty", ReleaseType::Patch).unwrap();
    assert!(policy.is_empty());
}

#[test]
fn unknown_intent_fails_build() {
    let err = PolicyBuilder::new()
        .intent("breaking removal", ReleaseType::Major)
        .intent("nonsense words", ReleaseType::Major)
        .build("bad", ReleaseType::Patch)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::InvalidRule(ref msg) if msg.contains("rule 1")));
}
