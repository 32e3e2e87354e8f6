//! Integration tests for pattern compilation

use semrel_dsl::{PatternRule, PatternVariable, compile_pattern};
use semrel_foundation::{Action, Aspect, Impact, NodeKind, ReleaseType, Target, tags};

#[test]
fn added_required_target() {
    let pattern = PatternRule::new("added required {target}", ReleaseType::Major)
        .with_variable(PatternVariable::target(&[Target::Parameter]));
    let result = compile_pattern(&pattern);
    assert!(result.success, "{:?}", result.errors);
    assert!(result.warnings.is_empty());

    let rule = result.rule.unwrap();
    assert_eq!(rule.action, Some(vec![Action::Added]));
    assert_eq!(rule.impact, Some(vec![Impact::Narrowing]));
    assert_eq!(rule.tags, Some(vec![tags::REQUIRED.to_string()]));
    assert_eq!(rule.target, Some(vec![Target::Parameter]));
    assert_eq!(rule.returns, ReleaseType::Major);
    assert_eq!(rule.nested, None);
}

#[test]
fn implied_impact_follows_release_type() {
    let impact = |returns| {
        compile_pattern(&PatternRule::new("{target} default changed", returns))
            .rule
            .unwrap()
            .impact
    };
    assert_eq!(impact(ReleaseType::Patch), Some(vec![Impact::Equivalent]));
    assert_eq!(impact(ReleaseType::Minor), Some(vec![Impact::Widening]));
    assert_eq!(impact(ReleaseType::Major), Some(vec![Impact::Unrelated]));
}

#[test]
fn aspect_phrase_sets_modified() {
    let rule = compile_pattern(&PatternRule::new("{target} made required", ReleaseType::Major))
        .rule
        .unwrap();
    assert_eq!(rule.action, Some(vec![Action::Modified]));
    assert_eq!(rule.aspect, Some(vec![Aspect::Optionality]));
    assert_eq!(rule.tags, Some(vec![tags::NOW_REQUIRED.to_string()]));
}

#[test]
fn node_kind_variable() {
    let pattern = PatternRule::new("removed {target}", ReleaseType::Major)
        .with_variable(PatternVariable::target(&[Target::Export]))
        .with_variable(PatternVariable::node_kind(&[NodeKind::Class, NodeKind::Interface]));
    let rule = compile_pattern(&pattern).rule.unwrap();
    let kinds = rule.node_kind.unwrap();
    assert!(kinds.contains(&NodeKind::Class));
    assert!(kinds.contains(&NodeKind::Interface));
}

#[test]
fn unknown_template_fails_without_rule() {
    let result = compile_pattern(&PatternRule::new("frobnicated {target}", ReleaseType::Major));
    assert!(!result.success);
    assert!(result.rule.is_none());
    assert!(result.into_result().is_err());
}

#[test]
fn compiled_rules_are_constrained() {
    for entry in semrel_dsl::catalog::PATTERNS {
        let rule = compile_pattern(&PatternRule::new(entry.template, ReleaseType::Major))
            .into_result()
            .unwrap();
        assert!(!rule.is_unconstrained(), "{}", entry.template);
        assert_eq!(rule.action, Some(vec![entry.action]), "{}", entry.template);
    }
}
