//! Integration tests for rename detection

use semrel_diff::{DiffOptions, diff};
use semrel_foundation::{Action, Impact, Target};
use semrel_model::NodeSpec;

use crate::model;

fn get_user(name: &str) -> NodeSpec {
    NodeSpec::function(name).param("id", "string").returns("User")
}

#[test]
fn similar_export_is_renamed() {
    let old = model(vec![get_user("getUser")]);
    let new = model(vec![get_user("getUsers")]);

    let result = diff(&old, &new, &DiffOptions::default());
    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.action(), Action::Renamed);
    assert_eq!(change.descriptor.target(), Target::Export);
    assert_eq!(change.path, "getUser");
    assert!(change.before.is_some() && change.after.is_some());
    assert!(change.explanation.contains("getUsers"), "{}", change.explanation);
}

#[test]
fn disabled_detection_reports_removal_and_addition() {
    let old = model(vec![get_user("getUser")]);
    let new = model(vec![get_user("getUsers")]);

    let result = diff(&old, &new, &DiffOptions::default().with_rename_detection(false));
    let actions: Vec<_> = result.changes.iter().map(|c| c.action()).collect();
    assert_eq!(actions, vec![Action::Removed, Action::Added]);
}

#[test]
fn different_kinds_never_pair() {
    let old = model(vec![NodeSpec::function("config")]);
    let new = model(vec![NodeSpec::variable("config2", "Config")]);

    let result = diff(&old, &new, &DiffOptions::default());
    assert!(result.changes.iter().all(|c| c.action() != Action::Renamed));
    assert_eq!(result.changes.len(), 2);
}

#[test]
fn high_threshold_rejects_weak_matches() {
    let old = model(vec![get_user("getUser")]);
    let new = model(vec![get_user("fetchAccount")]);

    let result = diff(&old, &new, &DiffOptions::default().with_rename_threshold(1.0));
    assert!(result.changes.iter().all(|c| c.action() != Action::Renamed));
}

#[test]
fn positional_parameter_rename() {
    let old = model(vec![NodeSpec::function("f").param("a", "string")]);
    let new = model(vec![NodeSpec::function("f").param("b", "string")]);

    let result = diff(&old, &new, &DiffOptions::default());
    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.path, "f.a");
    assert_eq!(change.descriptor.target(), Target::Parameter);
    assert_eq!(change.action(), Action::Renamed);
    assert_eq!(change.descriptor.impact(), Some(Impact::Equivalent));
}

#[test]
fn renamed_export_is_still_compared() {
    let old = model(vec![get_user("getUser")]);
    let new = model(vec![
        NodeSpec::function("getUsers")
            .param("id", "string")
            .returns("User | null"),
    ]);

    let result = diff(&old, &new, &DiffOptions::default().with_rename_threshold(0.5));
    assert!(result.changes.iter().any(|c| c.action() == Action::Renamed));
    let ret = result.find("getUsers.@return").unwrap();
    assert_eq!(ret.descriptor.impact(), Some(Impact::Widening));
}
