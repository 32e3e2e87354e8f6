//! Declaration model for semrel.
//!
//! This crate provides:
//! - [`DeclarationModel`] - Arena owning every node of one API version
//! - [`DeclarationNode`] - A declaration with signature, modifiers, and children
//! - [`NodeId`] - Non-owning handles into a model
//! - [`TypeExpr`] - Structured view of signature text
//! - [`DeclarationParser`] - Seam for the external front-end parser
//! - [`ModelBuilder`] / [`NodeSpec`] - Fluent model construction

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod builder;
pub mod model;
pub mod node;
pub mod span;
pub mod type_expr;

pub use builder::{ModelBuilder, NodeSpec};
pub use model::{
    DeclarationModel, DeclarationParser, DiagnosticSeverity, ModelDiagnostic, ParseOutcome,
};
pub use node::{
    DeclarationNode, DocMeta, Modifier, NodeId, TypeSignature, Visibility, normalize_type_text,
};
pub use span::Span;
pub use type_expr::{Literal, Primitive, TypeExpr};
