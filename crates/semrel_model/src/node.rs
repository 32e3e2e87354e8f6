//! Declaration nodes and their facets.

use std::collections::BTreeSet;
use std::fmt;

use semrel_foundation::NodeKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::span::Span;

/// Handle to a node inside a [`DeclarationModel`](crate::DeclarationModel).
///
/// Handles are only meaningful for the model that issued them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a handle from a raw arena index.
    #[must_use]
    pub const fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Declaration modifiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Modifier {
    /// Cannot be reassigned.
    Readonly,
    /// May be omitted (`x?`).
    Optional,
    /// Belongs to the type rather than instances.
    Static,
    /// Must be implemented by subclasses.
    Abstract,
    /// Visible only inside the declaring type.
    Private,
    /// Visible to subclasses.
    Protected,
    /// Rest parameter (`...args`).
    Rest,
    /// Marked deprecated in source.
    Deprecated,
}

/// Visibility derived from modifiers, ordered from most to least visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Visibility {
    /// No access modifier.
    Public,
    /// `protected`.
    Protected,
    /// `private`.
    Private,
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        })
    }
}

/// The type signature of a declaration.
///
/// `text` is the opaque comparable form. Callables carry their return type
/// in `returns`; type parameters carry their bound in `constraint`.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TypeSignature {
    /// Declared type (or enum member value) as written.
    pub text: String,
    /// Return type of a callable.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub returns: Option<String>,
    /// Constraint of a type parameter.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub constraint: Option<String>,
}

impl TypeSignature {
    /// Creates a signature with only the opaque text.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            returns: None,
            constraint: None,
        }
    }

    /// Returns the text with whitespace collapsed, for comparison.
    #[must_use]
    pub fn normalized(&self) -> String {
        normalize_type_text(&self.text)
    }
}

/// Collapses whitespace runs so formatting differences never count as changes.
#[must_use]
pub fn normalize_type_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Documentation metadata extracted by the parser.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DocMeta {
    /// `@deprecated` tag present.
    #[cfg_attr(feature = "serde", serde(default))]
    pub deprecated: bool,
    /// Documented or declared default value.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub default_value: Option<String>,
}

/// A single declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeclarationNode {
    /// Declared name.
    pub name: String,
    /// Declaration kind.
    pub kind: NodeKind,
    /// Type signature.
    #[cfg_attr(feature = "serde", serde(default))]
    pub signature: TypeSignature,
    /// Children in declaration order (parameters first for callables).
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Vec<NodeId>,
    /// Modifiers.
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: BTreeSet<Modifier>,
    /// Source range.
    #[cfg_attr(feature = "serde", serde(default))]
    pub span: Span,
    /// Documentation metadata.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub doc: Option<DocMeta>,
}

impl DeclarationNode {
    /// Creates a node with an empty signature.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            signature: TypeSignature::default(),
            children: Vec::new(),
            modifiers: BTreeSet::new(),
            span: Span::default(),
            doc: None,
        }
    }

    /// Returns true if the node carries the modifier.
    #[must_use]
    pub fn has(&self, modifier: Modifier) -> bool {
        self.modifiers.contains(&modifier)
    }

    /// Returns true for optional members, rest parameters, and members with defaults.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.has(Modifier::Optional) || self.has(Modifier::Rest) || self.default_value().is_some()
    }

    /// Returns true if deprecated by modifier or doc tag.
    #[must_use]
    pub fn is_deprecated(&self) -> bool {
        self.has(Modifier::Deprecated) || self.doc.as_ref().is_some_and(|d| d.deprecated)
    }

    /// Returns the default value text, if any.
    #[must_use]
    pub fn default_value(&self) -> Option<&str> {
        self.doc.as_ref().and_then(|d| d.default_value.as_deref())
    }

    /// Returns the visibility implied by the modifiers.
    #[must_use]
    pub fn visibility(&self) -> Visibility {
        if self.has(Modifier::Private) {
            Visibility::Private
        } else if self.has(Modifier::Protected) {
            Visibility::Protected
        } else {
            Visibility::Public
        }
    }
}
