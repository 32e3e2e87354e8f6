//! Integration tests for the standard policy

use semrel_diff::DiffOptions;
use semrel_engine::Policy;
use semrel_foundation::ReleaseType;
use semrel_model::NodeSpec;

use crate::classify_versions;

fn check(old: Vec<NodeSpec>, new: Vec<NodeSpec>) -> (ReleaseType, Option<String>) {
    let report = classify_versions(old, new, &DiffOptions::default(), &Policy::standard());
    let first = report.classifications.first().and_then(|c| c.rule_description.clone());
    (report.overall, first)
}

#[test]
fn removed_parameter_is_major() {
    let (overall, rule) = check(
        vec![NodeSpec::function("f").param("x", "string")],
        vec![NodeSpec::function("f")],
    );
    assert_eq!(overall, ReleaseType::Major);
    assert_eq!(rule.as_deref(), Some("declaration removed"));
}

#[test]
fn parameter_made_optional_is_minor() {
    let (overall, rule) = check(
        vec![NodeSpec::function("f").param("x", "number")],
        vec![NodeSpec::function("f").optional_param("x", "number")],
    );
    assert_eq!(overall, ReleaseType::Minor);
    assert_eq!(rule.as_deref(), Some("widening change"));
}

#[test]
fn reordered_parameters_are_major() {
    let (overall, rule) = check(
        vec![NodeSpec::function("f").param("a", "string").param("b", "number")],
        vec![NodeSpec::function("f").param("b", "number").param("a", "string")],
    );
    assert_eq!(overall, ReleaseType::Major);
    assert_eq!(rule.as_deref(), Some("parameters reordered"));
}

#[test]
fn parameter_rename_is_patch() {
    let (overall, rule) = check(
        vec![NodeSpec::function("f").param("a", "string")],
        vec![NodeSpec::function("f").param("b", "string")],
    );
    assert_eq!(overall, ReleaseType::Patch);
    assert_eq!(rule.as_deref(), Some("parameter renamed"));
}

#[test]
fn export_rename_is_major() {
    let (overall, rule) = check(
        vec![NodeSpec::function("getUser").param("id", "string")],
        vec![NodeSpec::function("getUsers").param("id", "string")],
    );
    assert_eq!(overall, ReleaseType::Major);
    assert_eq!(rule.as_deref(), Some("declaration renamed"));
}

#[test]
fn return_type_directions() {
    let (widened, _) = check(
        vec![NodeSpec::function("f").returns("string")],
        vec![NodeSpec::function("f").returns("string | null")],
    );
    let (narrowed, _) = check(
        vec![NodeSpec::function("f").returns("string | null")],
        vec![NodeSpec::function("f").returns("string")],
    );
    assert_eq!(widened, ReleaseType::Major);
    assert_eq!(narrowed, ReleaseType::Minor);
}

#[test]
fn deprecation_is_patch() {
    let (overall, rule) = check(
        vec![NodeSpec::function("f")],
        vec![NodeSpec::function("f").deprecated()],
    );
    assert_eq!(overall, ReleaseType::Patch);
    assert_eq!(rule.as_deref(), Some("deprecation change"));
}

#[test]
fn required_parameter_added_is_major() {
    let (overall, rule) = check(
        vec![NodeSpec::function("f")],
        vec![NodeSpec::function("f").param("x", "string")],
    );
    assert_eq!(overall, ReleaseType::Major);
    assert_eq!(rule.as_deref(), Some("required member added"));
}

#[test]
fn no_changes_is_none() {
    let spec = || vec![NodeSpec::function("f").param("x", "string")];
    let (overall, rule) = check(spec(), spec());
    assert_eq!(overall, ReleaseType::None);
    assert_eq!(rule, None);
}

#[test]
fn overall_is_the_most_severe_verdict() {
    let report = classify_versions(
        vec![NodeSpec::function("f"), NodeSpec::function("g")],
        vec![NodeSpec::function("f").deprecated(), NodeSpec::function("h")],
        &DiffOptions::default().with_rename_detection(false),
        &Policy::standard(),
    );
    let verdicts: Vec<_> = report.classifications.iter().map(|c| c.release_type).collect();
    assert!(verdicts.contains(&ReleaseType::Patch));
    assert!(verdicts.contains(&ReleaseType::Major));
    assert!(verdicts.contains(&ReleaseType::Minor));
    assert_eq!(report.overall, ReleaseType::Major);
    assert!(report.exceeds(ReleaseType::Minor));
    assert!(!report.is_blocking());
}

#[test]
fn nested_verdicts_roll_up() {
    let report = classify_versions(
        vec![NodeSpec::interface("P").child(NodeSpec::property("x", "string"))],
        vec![
            NodeSpec::interface("P")
                .child(NodeSpec::property("x", "string"))
                .child(NodeSpec::property("y", "string").optional()),
        ],
        &DiffOptions::nested(),
        &Policy::standard(),
    );
    assert_eq!(report.classifications.len(), 1);
    let owner = &report.classifications[0];
    assert_eq!(owner.path, "P");
    assert_eq!(owner.nested.len(), 1);
    assert_eq!(owner.nested[0].path, "P.y");
    assert_eq!(owner.nested[0].release_type, ReleaseType::Minor);
    assert_eq!(owner.effective(), ReleaseType::Minor);
    assert_eq!(report.overall, ReleaseType::Minor);
    assert_eq!(report.iter().count(), 2);
}
