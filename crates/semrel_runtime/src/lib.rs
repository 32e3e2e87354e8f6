//! CLI support, logging, and serialization for semrel.
//!
//! This crate provides:
//! - [`run_check`] / [`check`] - The diff-and-classify pipeline
//! - [`JsonModelParser`] - Reads front-end JSON through the parser seam
//! - Model snapshots (`MessagePack`) and JSON policy files
//! - [`init_logging`] - Tracing subscriber setup

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod check;
pub mod logging;
pub mod parser;
pub mod serialize;

pub use check::{CheckOutcome, CheckRequest, check, run_check};
pub use logging::init_logging;
pub use parser::JsonModelParser;
pub use serialize::{
    PolicyFile, from_bytes, load_model, load_policy, load_snapshot, model_from_json, model_to_json,
    policy_from_json, save_snapshot, to_bytes,
};
