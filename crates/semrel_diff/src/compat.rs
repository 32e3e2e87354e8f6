//! Type compatibility between two versions of a signature.
//!
//! The relation is decided on parsed [`TypeExpr`]s: if every value of the
//! old type is accepted by the new one the change widens, the reverse
//! narrows, both ways is equivalent, and neither is unrelated.

use semrel_foundation::{Impact, Result};
use semrel_model::node::normalize_type_text;
use semrel_model::{Literal, Primitive, TypeExpr};

/// Classifies the change from `old` to `new` type text.
///
/// Identical text (after whitespace normalization) is equivalent without
/// parsing. Text that cannot be parsed yields an error; callers downgrade
/// that to [`Impact::Undetermined`].
pub fn relation_text(old: &str, new: &str) -> Result<Impact> {
    if normalize_type_text(old) == normalize_type_text(new) {
        return Ok(Impact::Equivalent);
    }
    let old = TypeExpr::parse(old)?;
    let new = TypeExpr::parse(new)?;
    Ok(relation(&old, &new))
}

/// Classifies the change from `old` to `new`.
#[must_use]
pub fn relation(old: &TypeExpr, new: &TypeExpr) -> Impact {
    match (is_subset(old, new), is_subset(new, old)) {
        (true, true) => Impact::Equivalent,
        (true, false) => Impact::Widening,
        (false, true) => Impact::Narrowing,
        (false, false) => Impact::Unrelated,
    }
}

/// Returns true if every value of `a` is also a value of `b`.
#[must_use]
pub fn is_subset(a: &TypeExpr, b: &TypeExpr) -> bool {
    if a == b {
        return true;
    }
    match (a, b) {
        (_, TypeExpr::Top) | (TypeExpr::Never, _) => true,
        (TypeExpr::Union(members), _) => members.iter().all(|m| is_subset(m, b)),
        (TypeExpr::Primitive(Primitive::Boolean), TypeExpr::Union(members)) => {
            covers_boolean(members) || members.iter().any(|m| is_subset(a, m))
        }
        (_, TypeExpr::Union(members)) => members.iter().any(|m| is_subset(a, m)),
        (TypeExpr::Intersection(parts), _) => parts.iter().any(|p| is_subset(p, b)),
        (_, TypeExpr::Intersection(parts)) => parts.iter().all(|p| is_subset(a, p)),
        (TypeExpr::Literal(literal), TypeExpr::Primitive(primitive)) => {
            literal.primitive() == *primitive
        }
        (TypeExpr::Primitive(Primitive::Undefined), TypeExpr::Primitive(Primitive::Void)) => true,
        (TypeExpr::Array(x), TypeExpr::Array(y)) => is_subset(x, y),
        (
            TypeExpr::Generic { name: n1, args: a1 },
            TypeExpr::Generic { name: n2, args: a2 },
        ) => n1 == n2 && a1.len() == a2.len() && a1.iter().zip(a2).all(|(x, y)| is_subset(x, y)),
        _ => false,
    }
}

fn covers_boolean(members: &[TypeExpr]) -> bool {
    let has = |value| {
        members
            .iter()
            .any(|m| *m == TypeExpr::Literal(Literal::Boolean(value)))
    };
    has(true) && has(false)
}
