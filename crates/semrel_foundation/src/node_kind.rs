//! Declaration kinds.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::descriptor::Target;
use crate::error::Error;

/// The kind of a declaration node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum NodeKind {
    /// Free function.
    Function,
    /// Class declaration.
    Class,
    /// Interface declaration.
    Interface,
    /// Enum declaration.
    Enum,
    /// Type alias.
    TypeAlias,
    /// Variable or constant.
    Variable,
    /// Namespace or module block.
    Namespace,
    /// Method of a class or interface.
    Method,
    /// Property of a class or interface.
    Property,
    /// Parameter of a callable.
    Parameter,
    /// Class constructor.
    Constructor,
    /// Getter or setter.
    Accessor,
    /// Enum member.
    EnumMember,
    /// Index signature of an interface.
    IndexSignature,
    /// Generic type parameter.
    TypeParameter,
    /// A node the parser could not fully resolve.
    Unresolved,
}

impl NodeKind {
    /// All node kinds.
    pub const ALL: [Self; 16] = [
        Self::Function,
        Self::Class,
        Self::Interface,
        Self::Enum,
        Self::TypeAlias,
        Self::Variable,
        Self::Namespace,
        Self::Method,
        Self::Property,
        Self::Parameter,
        Self::Constructor,
        Self::Accessor,
        Self::EnumMember,
        Self::IndexSignature,
        Self::TypeParameter,
        Self::Unresolved,
    ];

    /// Returns the canonical kebab-case name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Enum => "enum",
            Self::TypeAlias => "type-alias",
            Self::Variable => "variable",
            Self::Namespace => "namespace",
            Self::Method => "method",
            Self::Property => "property",
            Self::Parameter => "parameter",
            Self::Constructor => "constructor",
            Self::Accessor => "accessor",
            Self::EnumMember => "enum-member",
            Self::IndexSignature => "index-signature",
            Self::TypeParameter => "type-parameter",
            Self::Unresolved => "unresolved",
        }
    }

    /// Returns true for kinds that take parameters and return a value.
    #[must_use]
    pub const fn is_callable(self) -> bool {
        matches!(self, Self::Function | Self::Method | Self::Constructor)
    }

    /// Returns true for kinds whose children are matched by name.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::Namespace
        )
    }

    /// The descriptor target used when a node of this kind changes as a member.
    ///
    /// Declarations nested in a namespace are exports in their own right.
    #[must_use]
    pub const fn member_target(self) -> Target {
        match self {
            Self::Parameter => Target::Parameter,
            Self::Property => Target::Property,
            Self::Method => Target::Method,
            Self::Constructor => Target::Constructor,
            Self::Accessor => Target::Accessor,
            Self::EnumMember => Target::EnumMember,
            Self::IndexSignature => Target::IndexSignature,
            Self::TypeParameter => Target::TypeParameter,
            Self::Function
            | Self::Class
            | Self::Interface
            | Self::Enum
            | Self::TypeAlias
            | Self::Variable
            | Self::Namespace
            | Self::Unresolved => Target::Export,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', ' '], "-");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| Error::parse("node kind", s))
    }
}
