//! Release types, change descriptor vocabulary, and errors for semrel.
//!
//! This crate provides:
//! - [`ReleaseType`] - The totally ordered version-bump severity
//! - [`ChangeDescriptor`] - The typed tagging scheme shared by every layer
//! - [`NodeKind`] - Declaration kinds produced by parsers
//! - [`Error`] - Rich error types with context
//! - [`text`] - Edit distance and phrase helpers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod descriptor;
pub mod error;
pub mod node_kind;
pub mod release;
pub mod text;

pub use descriptor::{Action, Aspect, ChangeDescriptor, Impact, Target, tags};
pub use error::{Error, ErrorContext, ErrorKind, Result};
pub use node_kind::NodeKind;
pub use release::ReleaseType;
