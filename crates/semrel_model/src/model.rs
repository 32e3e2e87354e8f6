//! The declaration model arena.
//!
//! A `DeclarationModel` exclusively owns every node of one version of a
//! module's public surface. Everything else refers to nodes by [`NodeId`].

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::node::{DeclarationNode, NodeId};
use crate::span::Span;

/// Severity of a parser-reported problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DiagnosticSeverity {
    /// Informational note.
    Info,
    /// Recoverable problem; results may be incomplete.
    Warning,
    /// Part of the input could not be used.
    Error,
}

impl fmt::Display for DiagnosticSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// A problem recorded by the parser while building a model.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModelDiagnostic {
    /// How serious the problem is.
    pub severity: DiagnosticSeverity,
    /// Description of the problem.
    pub message: String,
    /// Where in the source it occurred.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub span: Option<Span>,
}

impl ModelDiagnostic {
    /// Creates a diagnostic without a location.
    #[must_use]
    pub fn new(severity: DiagnosticSeverity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            span: None,
        }
    }

    /// Attaches a source location.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// One version of a module's declared public surface.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclarationModel {
    nodes: Vec<DeclarationNode>,
    exports: Vec<NodeId>,
    #[cfg_attr(feature = "serde", serde(default))]
    diagnostics: Vec<ModelDiagnostic>,
}

impl DeclarationModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a model from raw parts as produced by a parser.
    ///
    /// Handles are not validated here; the differ reports dangling ones.
    #[must_use]
    pub fn from_parts(
        nodes: Vec<DeclarationNode>,
        exports: Vec<NodeId>,
        diagnostics: Vec<ModelDiagnostic>,
    ) -> Self {
        Self {
            nodes,
            exports,
            diagnostics,
        }
    }

    /// Adds a node to the arena and returns its handle.
    pub fn insert(&mut self, node: DeclarationNode) -> NodeId {
        let index = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(node);
        NodeId::from_raw(index)
    }

    /// Marks a node as a top-level export.
    pub fn add_export(&mut self, id: NodeId) {
        self.exports.push(id);
    }

    /// Records a parser diagnostic.
    pub fn add_diagnostic(&mut self, diagnostic: ModelDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Looks up a node by handle.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&DeclarationNode> {
        self.nodes.get(id.index())
    }

    /// Top-level export handles in declaration order.
    #[must_use]
    pub fn exports(&self) -> &[NodeId] {
        &self.exports
    }

    /// Finds a top-level export by name.
    #[must_use]
    pub fn export(&self, name: &str) -> Option<NodeId> {
        self.exports
            .iter()
            .copied()
            .find(|&id| self.node(id).is_some_and(|n| n.name == name))
    }

    /// Finds a direct child of `parent` by name.
    #[must_use]
    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)?
            .children
            .iter()
            .copied()
            .find(|&id| self.node(id).is_some_and(|n| n.name == name))
    }

    /// Parser diagnostics recorded for this model.
    #[must_use]
    pub fn diagnostics(&self) -> &[ModelDiagnostic] {
        &self.diagnostics
    }

    /// Number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the arena holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

// =============================================================================
// Parser seam
// =============================================================================

/// Outcome of running a declaration parser over source text.
#[derive(Clone, Debug)]
pub enum ParseOutcome {
    /// A (possibly partial) model; partial parses carry diagnostics.
    Parsed(DeclarationModel),
    /// Nothing usable could be produced.
    Unparseable(Vec<ModelDiagnostic>),
}

impl ParseOutcome {
    /// Converts the outcome into a comparison baseline.
    ///
    /// An unparseable old version is treated as having no baseline.
    #[must_use]
    pub fn into_baseline(self) -> Option<DeclarationModel> {
        match self {
            Self::Parsed(model) => Some(model),
            Self::Unparseable(_) => None,
        }
    }
}

/// Front-end that turns declaration source into a model.
///
/// Implementations must record problems as [`ModelDiagnostic`]s instead of
/// failing, so partially parsed input still produces a model.
pub trait DeclarationParser {
    /// Parses declaration source text.
    fn parse(&self, source: &str) -> ParseOutcome;
}
