//! Change records produced by the differ.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use semrel_foundation::{Action, ChangeDescriptor, NodeKind};
use semrel_model::{DiagnosticSeverity, ModelDiagnostic, NodeId, Span};

/// Where a change sits in the declaration hierarchy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ChangeContext {
    /// True for anything below a top-level export.
    pub is_nested: bool,
    /// Zero for exports, one for their members, and so on.
    pub depth: usize,
    /// Paths of the enclosing declarations, outermost first.
    pub ancestors: Vec<String>,
}

impl ChangeContext {
    /// Context for a top-level export.
    #[must_use]
    pub fn top_level() -> Self {
        Self::default()
    }

    /// Context for a member of the declaration at `owner_path`.
    #[must_use]
    pub fn child(&self, owner_path: &str) -> Self {
        let mut ancestors = self.ancestors.clone();
        ancestors.push(owner_path.to_string());
        Self {
            is_nested: true,
            depth: self.depth + 1,
            ancestors,
        }
    }
}

/// One semantic change between two versions of an API surface.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Change {
    /// What changed, in vocabulary terms.
    pub descriptor: ChangeDescriptor,
    /// Dotted location such as `Point.x` or `f.@return`.
    pub path: String,
    /// Kind of the affected declaration.
    pub node_kind: NodeKind,
    /// Handle into the old model, if the declaration existed there.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub before: Option<NodeId>,
    /// Handle into the new model, if the declaration exists there.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub after: Option<NodeId>,
    /// Member changes attached to this one in nested mode.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    pub nested: Vec<Change>,
    /// Position in the hierarchy.
    pub context: ChangeContext,
    /// Human-readable description.
    pub explanation: String,
}

impl Change {
    /// Creates a change with no nested members.
    #[must_use]
    pub fn new(
        descriptor: ChangeDescriptor,
        path: impl Into<String>,
        node_kind: NodeKind,
        context: ChangeContext,
    ) -> Self {
        Self {
            descriptor,
            path: path.into(),
            node_kind,
            before: None,
            after: None,
            nested: Vec::new(),
            context,
            explanation: String::new(),
        }
    }

    /// Sets the old/new node handles.
    #[must_use]
    pub fn with_nodes(mut self, before: Option<NodeId>, after: Option<NodeId>) -> Self {
        self.before = before;
        self.after = after;
        self
    }

    /// Sets the explanation.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }

    /// Attaches member changes.
    #[must_use]
    pub fn with_nested(mut self, nested: Vec<Change>) -> Self {
        self.nested = nested;
        self
    }

    /// Shorthand for the descriptor's action.
    #[must_use]
    pub fn action(&self) -> Action {
        self.descriptor.action()
    }

    /// Iterates this change and all nested changes, depth first.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.descriptor)
    }
}

/// Depth-first iterator over a change and its nested changes.
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a Change>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Change;

    fn next(&mut self) -> Option<Self::Item> {
        let change = self.stack.pop()?;
        self.stack.extend(change.nested.iter().rev());
        Some(change)
    }
}

// =============================================================================
// Diagnostics
// =============================================================================

/// A soft problem found while diffing. Diffing never fails outright.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnostic {
    /// How serious the problem is.
    pub severity: DiagnosticSeverity,
    /// Dotted path of the affected declaration, when known.
    pub path: Option<String>,
    /// Description of the problem.
    pub message: String,
    /// Source location, when known.
    pub span: Option<Span>,
}

impl Diagnostic {
    /// A warning about the declaration at `path`.
    #[must_use]
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Warning,
            path: Some(path.into()),
            message: message.into(),
            span: None,
        }
    }

    /// An informational note not tied to a declaration.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: DiagnosticSeverity::Info,
            path: None,
            message: message.into(),
            span: None,
        }
    }

    /// Forwards a parser diagnostic, labelled with the model it came from.
    #[must_use]
    pub fn from_model(side: &str, diagnostic: &ModelDiagnostic) -> Self {
        Self {
            severity: diagnostic.severity,
            path: None,
            message: format!("{side} model: {}", diagnostic.message),
            span: diagnostic.span,
        }
    }

    /// Attaches a source location.
    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(path) = &self.path {
            write!(f, " at {path}")?;
        }
        if let Some(span) = &self.span {
            write!(f, " ({span})")?;
        }
        write!(f, ": {}", self.message)
    }
}

// =============================================================================
// Diff Result
// =============================================================================

/// Output of a diff: changes plus diagnostics.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DiffResult {
    /// Top-level changes; nested ones hang off their owners in nested mode.
    pub changes: Vec<Change>,
    /// Soft problems encountered.
    pub diagnostics: Vec<Diagnostic>,
    /// False when there was no old version to compare against.
    pub baseline: bool,
}

impl DiffResult {
    /// Iterates every change, nested ones included, depth first.
    pub fn flatten(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter().flat_map(Change::walk)
    }

    /// Returns true if no changes were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Number of changes including nested ones.
    #[must_use]
    pub fn total_changes(&self) -> usize {
        self.flatten().count()
    }

    /// Finds a change by path anywhere in the tree.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&Change> {
        self.flatten().find(|c| c.path == path)
    }
}
