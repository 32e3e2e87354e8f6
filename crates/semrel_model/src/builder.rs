//! Fluent construction of declaration models.
//!
//! Parsers and tests describe declarations as owned [`NodeSpec`] trees and
//! let [`ModelBuilder`] flatten them into the arena.

use semrel_foundation::NodeKind;

use crate::model::{DeclarationModel, ModelDiagnostic};
use crate::node::{DeclarationNode, DocMeta, Modifier, NodeId, TypeSignature};
use crate::span::Span;

/// An owned declaration tree awaiting insertion into a model.
#[derive(Clone, Debug)]
pub struct NodeSpec {
    node: DeclarationNode,
    children: Vec<NodeSpec>,
}

impl NodeSpec {
    /// Creates a spec of the given kind.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            node: DeclarationNode::new(name, kind),
            children: Vec::new(),
        }
    }

    /// A free function returning `void` until [`returns`](Self::returns) says otherwise.
    #[must_use]
    pub fn function(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Function).returns("void")
    }

    /// A class.
    #[must_use]
    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Class)
    }

    /// An interface.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Interface)
    }

    /// An enum.
    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Enum)
    }

    /// A namespace.
    #[must_use]
    pub fn namespace(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Namespace)
    }

    /// A type alias for `ty`.
    #[must_use]
    pub fn type_alias(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, NodeKind::TypeAlias).typed(ty)
    }

    /// A variable of type `ty`.
    #[must_use]
    pub fn variable(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Variable).typed(ty)
    }

    /// A method returning `void` until told otherwise.
    #[must_use]
    pub fn method(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Method).returns("void")
    }

    /// A constructor.
    #[must_use]
    pub fn constructor() -> Self {
        Self::new("constructor", NodeKind::Constructor)
    }

    /// A property of type `ty`.
    #[must_use]
    pub fn property(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Property).typed(ty)
    }

    /// A parameter of type `ty`.
    #[must_use]
    pub fn parameter(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Parameter).typed(ty)
    }

    /// An enum member with the given value text.
    #[must_use]
    pub fn enum_member(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, NodeKind::EnumMember).typed(value)
    }

    /// A type parameter.
    #[must_use]
    pub fn type_parameter(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::TypeParameter)
    }

    /// Sets the opaque type text.
    #[must_use]
    pub fn typed(mut self, ty: impl Into<String>) -> Self {
        self.node.signature.text = ty.into();
        self
    }

    /// Sets the return type.
    #[must_use]
    pub fn returns(mut self, ty: impl Into<String>) -> Self {
        self.node.signature.returns = Some(ty.into());
        self
    }

    /// Sets the type-parameter constraint.
    #[must_use]
    pub fn constraint(mut self, ty: impl Into<String>) -> Self {
        self.node.signature.constraint = Some(ty.into());
        self
    }

    /// Replaces the whole signature.
    #[must_use]
    pub fn signature(mut self, signature: TypeSignature) -> Self {
        self.node.signature = signature;
        self
    }

    /// Adds a required parameter.
    #[must_use]
    pub fn param(self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.child(Self::parameter(name, ty))
    }

    /// Adds an optional parameter.
    #[must_use]
    pub fn optional_param(self, name: impl Into<String>, ty: impl Into<String>) -> Self {
        self.child(Self::parameter(name, ty).optional())
    }

    /// Adds a child declaration.
    #[must_use]
    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    /// Adds a modifier.
    #[must_use]
    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.node.modifiers.insert(modifier);
        self
    }

    /// Marks the declaration optional.
    #[must_use]
    pub fn optional(self) -> Self {
        self.modifier(Modifier::Optional)
    }

    /// Marks the declaration readonly.
    #[must_use]
    pub fn readonly(self) -> Self {
        self.modifier(Modifier::Readonly)
    }

    /// Marks the declaration deprecated through its doc metadata.
    #[must_use]
    pub fn deprecated(mut self) -> Self {
        self.node.doc.get_or_insert_with(DocMeta::default).deprecated = true;
        self
    }

    /// Records a default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.node
            .doc
            .get_or_insert_with(DocMeta::default)
            .default_value = Some(value.into());
        self
    }

    /// Sets the source span.
    #[must_use]
    pub fn span(mut self, span: Span) -> Self {
        self.node.span = span;
        self
    }
}

/// Accumulates exports and diagnostics into a [`DeclarationModel`].
#[derive(Debug, Default)]
pub struct ModelBuilder {
    model: DeclarationModel,
}

impl ModelBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a top-level export.
    #[must_use]
    pub fn export(mut self, spec: NodeSpec) -> Self {
        let id = self.insert(spec);
        self.model.add_export(id);
        self
    }

    /// Records a parser diagnostic.
    #[must_use]
    pub fn diagnostic(mut self, diagnostic: ModelDiagnostic) -> Self {
        self.model.add_diagnostic(diagnostic);
        self
    }

    /// Inserts a spec tree without exporting it and returns the root handle.
    pub fn insert(&mut self, spec: NodeSpec) -> NodeId {
        let NodeSpec { mut node, children } = spec;
        node.children = children.into_iter().map(|c| self.insert(c)).collect();
        self.model.insert(node)
    }

    /// Finishes the model.
    #[must_use]
    pub fn build(self) -> DeclarationModel {
        self.model
    }
}
