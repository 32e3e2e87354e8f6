//! Integration tests for Layer 4: Engine
//!
//! Tests for policies, first-match classification of diff output, and the
//! progressive policy builder.

mod builder;
mod standard;

use semrel_diff::{DiffOptions, diff};
use semrel_engine::{ClassificationReport, Policy, classify_all};
use semrel_model::{DeclarationModel, ModelBuilder, NodeSpec};

pub fn model(exports: Vec<NodeSpec>) -> DeclarationModel {
    exports
        .into_iter()
        .fold(ModelBuilder::new(), ModelBuilder::export)
        .build()
}

pub fn classify_versions(
    old: Vec<NodeSpec>,
    new: Vec<NodeSpec>,
    options: &DiffOptions,
    policy: &Policy,
) -> ClassificationReport {
    let result = diff(&model(old), &model(new), options);
    classify_all(&result.changes, policy)
}
