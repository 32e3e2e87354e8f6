//! Rule matching and classification for semrel.
//!
//! This crate provides:
//! - [`RuleMatcher`] - Matches changes against dimensional rules
//! - [`Policy`] - Ordered rules with a default release type
//! - [`classify`] / [`classify_all`] - Release verdicts for changes
//! - [`PolicyBuilder`] - Progressive, mixed-level policy construction

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod classify;
pub mod matcher;
pub mod policy;

pub use builder::{BuilderConfig, BuilderState, PolicyBuilder, TransformDiagnostic};
pub use classify::{Classification, ClassificationReport, classify, classify_all};
pub use matcher::{Dimension, RuleMatcher};
pub use policy::{Policy, PolicyRule};
