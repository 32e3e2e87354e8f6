//! Integration tests for nested mode

use semrel_diff::{DiffOptions, diff};
use semrel_foundation::{Action, Impact, Target, tags};
use semrel_model::NodeSpec;

use crate::model;

fn api(with_id: bool) -> Vec<NodeSpec> {
    let mut get = NodeSpec::method("get");
    if with_id {
        get = get.param("id", "string");
    }
    vec![NodeSpec::class("Api").child(get)]
}

#[test]
fn flat_mode_reports_leaves_with_context() {
    let result = diff(&model(api(true)), &model(api(false)), &DiffOptions::flat());
    assert_eq!(result.changes.len(), 1);
    let change = &result.changes[0];
    assert_eq!(change.path, "Api.get.id");
    assert_eq!(change.action(), Action::Removed);
    assert!(change.context.is_nested);
    assert_eq!(change.context.depth, 2);
    assert_eq!(change.context.ancestors, vec!["Api", "Api.get"]);
}

#[test]
fn nested_mode_builds_a_tree() {
    let result = diff(&model(api(true)), &model(api(false)), &DiffOptions::nested());
    assert_eq!(result.changes.len(), 1);

    let class = &result.changes[0];
    assert_eq!(class.path, "Api");
    assert!(class.descriptor.has_tag(tags::MEMBERS_CHANGED));
    assert!(!class.context.is_nested);

    let method = &class.nested[0];
    assert_eq!(method.path, "Api.get");
    assert_eq!(method.descriptor.target(), Target::Method);
    assert!(method.context.is_nested);

    let param = &method.nested[0];
    assert_eq!(param.path, "Api.get.id");
    assert_eq!(param.action(), Action::Removed);
    assert!(param.nested.is_empty());

    assert_eq!(result.total_changes(), 3);
    assert!(result.find("Api.get.id").is_some());
}

#[test]
fn synthetic_owner_combines_member_impacts() {
    let old = model(vec![NodeSpec::interface("P").child(NodeSpec::property("x", "string"))]);
    let new = model(vec![
        NodeSpec::interface("P")
            .child(NodeSpec::property("x", "string"))
            .child(NodeSpec::property("y", "string").optional()),
    ]);

    let result = diff(&old, &new, &DiffOptions::nested());
    let owner = &result.changes[0];
    assert_eq!(owner.descriptor.impact(), Some(Impact::Widening));
    assert_eq!(owner.nested.len(), 1);
}

#[test]
fn direct_change_owns_member_changes() {
    let old = model(vec![NodeSpec::function("f").param("x", "string").param("y", "number")]);
    let new = model(vec![NodeSpec::function("f").param("x", "string").deprecated()]);

    let result = diff(&old, &new, &DiffOptions::nested());
    assert_eq!(result.changes.len(), 1);
    let owner = &result.changes[0];
    assert!(owner.descriptor.has_tag(tags::DEPRECATED));
    assert!(!owner.descriptor.has_tag(tags::MEMBERS_CHANGED));
    assert_eq!(owner.nested.len(), 1);
    assert_eq!(owner.nested[0].path, "f.y");
}

#[test]
fn both_modes_see_the_same_leaves() {
    let old = model(vec![
        NodeSpec::class("C")
            .child(NodeSpec::method("a").param("x", "string"))
            .child(NodeSpec::property("p", "number")),
        NodeSpec::function("g").returns("string"),
    ]);
    let new = model(vec![
        NodeSpec::class("C").child(NodeSpec::method("a").param("x", "number")),
        NodeSpec::function("g").returns("string | undefined"),
    ]);

    let flat = diff(&old, &new, &DiffOptions::flat());
    let nested = diff(&old, &new, &DiffOptions::nested());

    let mut flat_paths: Vec<_> = flat.flatten().map(|c| c.path.clone()).collect();
    let mut nested_leaves: Vec<_> = nested
        .flatten()
        .filter(|c| c.nested.is_empty())
        .map(|c| c.path.clone())
        .collect();
    flat_paths.sort();
    nested_leaves.sort();
    assert_eq!(flat_paths, nested_leaves);
}
