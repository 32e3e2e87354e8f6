//! Integration tests for the check pipeline

use semrel_diff::DiffOptions;
use semrel_foundation::ReleaseType;
use semrel_runtime::{CheckRequest, load_model, load_snapshot, run_check, save_snapshot};
use tempfile::tempdir;

use crate::{v1, v2_major, v2_minor, write_json};

#[test]
fn minor_release_from_json_files() {
    let dir = tempdir().unwrap();
    let request = CheckRequest {
        old: Some(write_json(dir.path(), "v1.json", &v1())),
        new: write_json(dir.path(), "v2.json", &v2_minor()),
        ..CheckRequest::default()
    };

    let outcome = run_check(&request).unwrap();
    assert_eq!(outcome.policy, "standard");
    assert_eq!(outcome.report.overall, ReleaseType::Minor);
    assert!(outcome.passes(Some(ReleaseType::Minor)));
    assert!(!outcome.passes(Some(ReleaseType::Patch)));

    let text = outcome.render();
    assert!(text.contains("createUser.email"), "{text}");
    assert!(text.contains("legacy"), "{text}");
    assert!(text.ends_with("overall: minor (policy standard)\n"), "{text}");
}

#[test]
fn major_release_is_explained() {
    let dir = tempdir().unwrap();
    let request = CheckRequest {
        old: Some(write_json(dir.path(), "v1.json", &v1())),
        new: write_json(dir.path(), "v2.json", &v2_major()),
        ..CheckRequest::default()
    };

    let outcome = run_check(&request).unwrap();
    assert_eq!(outcome.report.overall, ReleaseType::Major);
    assert!(outcome.diff.find("legacy").is_some());
    assert!(outcome.diff.find("User.age").is_some());
    assert!(outcome.passes(None));
    assert!(!outcome.passes(Some(ReleaseType::Minor)));
    assert!(outcome.render().contains("[declaration removed]"));
}

#[test]
fn snapshot_baseline() {
    let dir = tempdir().unwrap();
    let baseline = dir.path().join("baseline.semrel");
    save_snapshot(&v1(), &baseline).unwrap();
    assert_eq!(load_snapshot(&baseline).unwrap(), v1());

    let request = CheckRequest {
        old: Some(baseline),
        new: write_json(dir.path(), "v2.json", &v2_minor()),
        ..CheckRequest::default()
    };
    assert_eq!(run_check(&request).unwrap().report.overall, ReleaseType::Minor);
}

#[test]
fn json_and_snapshot_load_the_same_model() {
    let dir = tempdir().unwrap();
    let json = write_json(dir.path(), "v1.json", &v1());
    let snapshot = dir.path().join("v1.bin");
    save_snapshot(&load_model(&json).unwrap(), &snapshot).unwrap();
    assert_eq!(load_model(&json).unwrap(), load_model(&snapshot).unwrap());
}

#[test]
fn missing_baseline_counts_everything_as_added() {
    let dir = tempdir().unwrap();
    let request = CheckRequest {
        old: None,
        new: write_json(dir.path(), "v1.json", &v1()),
        ..CheckRequest::default()
    };
    let outcome = run_check(&request).unwrap();
    assert!(!outcome.diff.baseline);
    assert_eq!(outcome.report.overall, ReleaseType::Minor);
    assert!(outcome.render().contains("no baseline"));
}

#[test]
fn unparseable_baseline_is_no_baseline() {
    let dir = tempdir().unwrap();
    let old = dir.path().join("broken.json");
    std::fs::write(&old, "{ this is not a model").unwrap();
    let request = CheckRequest {
        old: Some(old),
        new: write_json(dir.path(), "v1.json", &v1()),
        ..CheckRequest::default()
    };
    let outcome = run_check(&request).unwrap();
    assert!(!outcome.diff.baseline);
}

#[test]
fn unreadable_new_version_is_an_error() {
    let dir = tempdir().unwrap();
    let request = CheckRequest {
        old: None,
        new: dir.path().join("missing.json"),
        ..CheckRequest::default()
    };
    assert!(run_check(&request).is_err());
}

#[test]
fn nested_output_indents_members() {
    let dir = tempdir().unwrap();
    let request = CheckRequest {
        old: Some(write_json(dir.path(), "v1.json", &v1())),
        new: write_json(dir.path(), "v2.json", &v2_major()),
        options: DiffOptions::nested(),
        ..CheckRequest::default()
    };
    let outcome = run_check(&request).unwrap();
    assert!(outcome.render().contains("\n  "), "{}", outcome.render());
    assert_eq!(outcome.report.overall, ReleaseType::Major);
}

#[test]
fn outcome_serializes_to_json() {
    let dir = tempdir().unwrap();
    let request = CheckRequest {
        old: Some(write_json(dir.path(), "v1.json", &v1())),
        new: write_json(dir.path(), "v2.json", &v2_minor()),
        ..CheckRequest::default()
    };
    let outcome = run_check(&request).unwrap();
    let value = serde_json::to_value(&outcome).unwrap();
    assert_eq!(value["policy"], "standard");
    assert_eq!(value["report"]["overall"], "minor");
    assert!(value["diff"]["changes"].as_array().is_some_and(|c| !c.is_empty()));
}
