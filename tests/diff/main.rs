//! Integration tests for Layer 2: Diff
//!
//! Tests for the structural differ: change scenarios, rename and reorder
//! heuristics, nested mode, and robustness against malformed input.

mod nested;
mod properties;
mod renames;

use semrel_model::{DeclarationModel, ModelBuilder, NodeSpec};

pub fn model(exports: Vec<NodeSpec>) -> DeclarationModel {
    exports
        .into_iter()
        .fold(ModelBuilder::new(), ModelBuilder::export)
        .build()
}
