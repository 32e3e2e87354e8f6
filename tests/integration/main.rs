//! End-to-end tests: model files in, verdicts out
//!
//! These go through the runtime layer the way the CLI does: parser JSON
//! and snapshots on disk, policy documents, and rendered reports.

mod pipeline;

use std::path::{Path, PathBuf};

use semrel_model::{DeclarationModel, ModelBuilder, NodeSpec};
use semrel_runtime::model_to_json;

pub fn v1() -> DeclarationModel {
    ModelBuilder::new()
        .export(
            NodeSpec::function("createUser")
                .param("name", "string")
                .param("age", "number")
                .returns("User"),
        )
        .export(
            NodeSpec::interface("User")
                .child(NodeSpec::property("name", "string"))
                .child(NodeSpec::property("age", "number")),
        )
        .export(NodeSpec::function("legacy").returns("void"))
        .build()
}

/// Adds an optional parameter and deprecates `legacy`.
pub fn v2_minor() -> DeclarationModel {
    ModelBuilder::new()
        .export(
            NodeSpec::function("createUser")
                .param("name", "string")
                .param("age", "number")
                .optional_param("email", "string")
                .returns("User"),
        )
        .export(
            NodeSpec::interface("User")
                .child(NodeSpec::property("name", "string"))
                .child(NodeSpec::property("age", "number")),
        )
        .export(NodeSpec::function("legacy").returns("void").deprecated())
        .build()
}

/// Removes `legacy` and makes `User.age` optional.
pub fn v2_major() -> DeclarationModel {
    ModelBuilder::new()
        .export(
            NodeSpec::function("createUser")
                .param("name", "string")
                .param("age", "number")
                .returns("User"),
        )
        .export(
            NodeSpec::interface("User")
                .child(NodeSpec::property("name", "string"))
                .child(NodeSpec::property("age", "number").optional()),
        )
        .build()
}

pub fn write_json(dir: &Path, name: &str, model: &DeclarationModel) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, model_to_json(model).unwrap()).unwrap();
    path
}
