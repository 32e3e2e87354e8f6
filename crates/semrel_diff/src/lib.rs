//! Structural differ for semrel.
//!
//! This crate provides:
//! - [`diff`] / [`diff_against_baseline`] - Compare two declaration models
//! - [`Change`] / [`DiffResult`] - Change records and diagnostics
//! - [`DiffOptions`] - Nesting, rename, and reorder settings
//! - [`compat`] - Type widening/narrowing decisions

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod change;
pub mod compat;
pub mod differ;
pub mod explain;
pub mod options;
pub mod rename;

pub use change::{Change, ChangeContext, Diagnostic, DiffResult, Walk};
pub use differ::{diff, diff_against_baseline};
pub use options::DiffOptions;
