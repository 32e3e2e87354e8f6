//! Structured type expressions.
//!
//! The opaque signature text is parsed into a small type language (unions,
//! intersections, arrays, generics, literals) so the differ can reason about
//! accepted-value sets. Anything outside that language (object literals,
//! function types) is kept as whitespace-normalized opaque text.

use std::fmt;

use semrel_foundation::{Error, Result};

use crate::node::normalize_type_text;

/// Built-in primitive types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    /// `string`
    String,
    /// `number`
    Number,
    /// `boolean`
    Boolean,
    /// `bigint`
    BigInt,
    /// `symbol`
    Symbol,
    /// `object`
    Object,
    /// `undefined`
    Undefined,
    /// `null`
    Null,
    /// `void`
    Void,
}

impl Primitive {
    fn from_keyword(word: &str) -> Option<Self> {
        Some(match word {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "bigint" => Self::BigInt,
            "symbol" => Self::Symbol,
            "object" => Self::Object,
            "undefined" => Self::Undefined,
            "null" => Self::Null,
            "void" => Self::Void,
            _ => return None,
        })
    }

    const fn keyword(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::BigInt => "bigint",
            Self::Symbol => "symbol",
            Self::Object => "object",
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Void => "void",
        }
    }
}

/// A literal type.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Literal {
    /// `'text'`
    String(String),
    /// `42`, kept as written
    Number(String),
    /// `true` / `false`
    Boolean(bool),
}

impl Literal {
    /// The primitive this literal belongs to.
    #[must_use]
    pub const fn primitive(&self) -> Primitive {
        match self {
            Self::String(_) => Primitive::String,
            Self::Number(_) => Primitive::Number,
            Self::Boolean(_) => Primitive::Boolean,
        }
    }
}

/// A parsed type expression.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TypeExpr {
    /// `any` or `unknown`: accepts everything.
    Top,
    /// `never`: accepts nothing.
    Never,
    /// A primitive keyword.
    Primitive(Primitive),
    /// A literal type.
    Literal(Literal),
    /// A named type reference.
    Named(String),
    /// A generic instantiation such as `Map<K, V>`.
    Generic {
        /// Type name.
        name: String,
        /// Type arguments.
        args: Vec<TypeExpr>,
    },
    /// `T[]` or `Array<T>`.
    Array(Box<TypeExpr>),
    /// Sorted, deduplicated union members.
    Union(Vec<TypeExpr>),
    /// Sorted intersection members.
    Intersection(Vec<TypeExpr>),
    /// Anything else, as normalized text.
    Opaque(String),
}

impl TypeExpr {
    /// Parses type text.
    ///
    /// # Errors
    /// Returns an error for empty text, unbalanced brackets, or tokens that
    /// are neither identifiers nor recognizable opaque forms.
    pub fn parse(text: &str) -> Result<Self> {
        let s = text.trim();
        if s.is_empty() {
            return Err(Error::parse("type expression", text));
        }

        let members = split_top_level(s, '|').ok_or_else(|| Error::parse("type expression", text))?;
        if members.len() > 1 {
            let parsed = members
                .into_iter()
                .map(Self::parse)
                .collect::<Result<Vec<_>>>()?;
            return Ok(Self::union(parsed));
        }

        let parts = split_top_level(s, '&').ok_or_else(|| Error::parse("type expression", text))?;
        if parts.len() > 1 {
            let mut parsed = parts
                .into_iter()
                .map(Self::parse)
                .collect::<Result<Vec<_>>>()?;
            parsed.sort();
            parsed.dedup();
            return Ok(Self::Intersection(parsed));
        }

        Self::parse_atom(s, text)
    }

    fn parse_atom(s: &str, original: &str) -> Result<Self> {
        if let Some(inner) = s.strip_suffix("[]") {
            return Ok(Self::Array(Box::new(Self::parse(inner)?)));
        }

        if s.starts_with('(') {
            if matching_close(s) == Some(s.len() - 1) {
                return Self::parse(&s[1..s.len() - 1]);
            }
            if s.contains("=>") {
                return Ok(Self::Opaque(normalize_type_text(s)));
            }
            return Err(Error::parse("type expression", original));
        }

        if s.starts_with('{') || s.starts_with('[') || s.contains("=>") {
            return Ok(Self::Opaque(normalize_type_text(s)));
        }

        if let Some(text) = strip_quotes(s) {
            return Ok(Self::Literal(Literal::String(text.to_string())));
        }
        if s.starts_with(|c: char| c.is_ascii_digit() || c == '-') && s.parse::<f64>().is_ok() {
            return Ok(Self::Literal(Literal::Number(s.to_string())));
        }

        match s {
            "true" => return Ok(Self::Literal(Literal::Boolean(true))),
            "false" => return Ok(Self::Literal(Literal::Boolean(false))),
            "any" | "unknown" => return Ok(Self::Top),
            "never" => return Ok(Self::Never),
            _ => {}
        }
        if let Some(primitive) = Primitive::from_keyword(s) {
            return Ok(Self::Primitive(primitive));
        }

        if let Some(open) = s.find('<') {
            if s.ends_with('>') && matching_close(&s[open..]) == Some(s.len() - open - 1) {
                let name = s[..open].trim();
                if !is_identifier(name) {
                    return Err(Error::parse("type expression", original));
                }
                let inner = &s[open + 1..s.len() - 1];
                let mut args = split_top_level(inner, ',')
                    .ok_or_else(|| Error::parse("type expression", original))?
                    .into_iter()
                    .map(Self::parse)
                    .collect::<Result<Vec<_>>>()?;
                if name == "Array" && args.len() == 1 {
                    if let Some(element) = args.pop() {
                        return Ok(Self::Array(Box::new(element)));
                    }
                }
                return Ok(Self::Generic {
                    name: name.to_string(),
                    args,
                });
            }
            return Err(Error::parse("type expression", original));
        }

        if is_identifier(s) {
            return Ok(Self::Named(s.to_string()));
        }

        Err(Error::parse("type expression", original))
    }

    /// Builds a normalized union: nested unions are flattened, members sorted
    /// and deduplicated, and a single remaining member is returned as-is.
    #[must_use]
    pub fn union(members: Vec<Self>) -> Self {
        let mut flat = Vec::with_capacity(members.len());
        for member in members {
            match member {
                Self::Union(inner) => flat.extend(inner),
                other => flat.push(other),
            }
        }
        flat.sort();
        flat.dedup();
        if flat.len() == 1 {
            if let Some(only) = flat.pop() {
                return only;
            }
        }
        Self::Union(flat)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Top => f.write_str("unknown"),
            Self::Never => f.write_str("never"),
            Self::Primitive(p) => f.write_str(p.keyword()),
            Self::Literal(Literal::String(s)) => write!(f, "'{s}'"),
            Self::Literal(Literal::Number(n)) => f.write_str(n),
            Self::Literal(Literal::Boolean(b)) => write!(f, "{b}"),
            Self::Named(name) | Self::Opaque(name) => f.write_str(name),
            Self::Generic { name, args } => {
                write!(f, "{name}<")?;
                write_joined(f, args, ", ")?;
                f.write_str(">")
            }
            Self::Array(inner) => match inner.as_ref() {
                Self::Union(_) | Self::Intersection(_) => write!(f, "({inner})[]"),
                _ => write!(f, "{inner}[]"),
            },
            Self::Union(members) => write_joined(f, members, " | "),
            Self::Intersection(members) => write_joined(f, members, " & "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, items: &[TypeExpr], sep: &str) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

// =============================================================================
// Lexical helpers
// =============================================================================

/// Splits on `sep` outside brackets and quotes.
///
/// Returns `None` when brackets are unbalanced. Empty pieces (a leading `|`)
/// are dropped.
fn split_top_level(s: &str, sep: char) -> Option<Vec<&str>> {
    let mut parts = Vec::new();
    let mut depth: i32 = 0;
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut prev = '\0';

    for (i, ch) in s.char_indices() {
        if let Some(q) = quote {
            if ch == q && prev != '\\' {
                quote = None;
            }
        } else {
            match ch {
                '\'' | '"' | '`' => quote = Some(ch),
                '(' | '[' | '{' | '<' => depth += 1,
                '>' if prev == '=' => {}
                ')' | ']' | '}' | '>' => {
                    depth -= 1;
                    if depth < 0 {
                        return None;
                    }
                }
                c if c == sep && depth == 0 => {
                    parts.push(s[start..i].trim());
                    start = i + c.len_utf8();
                }
                _ => {}
            }
        }
        prev = ch;
    }

    if depth != 0 || quote.is_some() {
        return None;
    }
    parts.push(s[start..].trim());
    parts.retain(|p| !p.is_empty());
    Some(parts)
}

/// Byte index of the bracket closing the one at index 0.
fn matching_close(s: &str) -> Option<usize> {
    let mut depth = 0;
    let mut prev = '\0';
    for (i, ch) in s.char_indices() {
        match ch {
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if prev == '=' => {}
            ')' | ']' | '}' | '>' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        prev = ch;
    }
    None
}

fn strip_quotes(s: &str) -> Option<&str> {
    ['\'', '"', '`'].into_iter().find_map(|q| {
        s.strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
            .filter(|_| s.len() >= 2)
    })
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_alphanumeric() || c == '_' || c == '$' || c == '.')
}
