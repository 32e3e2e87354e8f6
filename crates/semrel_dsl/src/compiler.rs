//! Pattern → Dimensional compilation.
//!
//! A template reads as `<verb> [modifiers] {target}` or
//! `{target} <aspect phrase>`, optionally followed by `when {condition}` or
//! `unless {condition}`. Bound variables supply targets and node kinds.

use std::collections::BTreeSet;
use std::str::FromStr;

use semrel_foundation::{
    Action, Aspect, Error, Impact, NodeKind, ReleaseType, Result, Target, tags,
};
use tracing::trace;

use crate::catalog::{Modifier, match_suffix, verb_action};
use crate::intent::Connective;
use crate::rule::{DimensionalRule, PatternRule, VariableKind};
use crate::tokenizer::{PhraseToken, PhraseTokenizer};

/// Nested-pattern variables may refer to further nested patterns this deep.
pub const MAX_NESTED_DEPTH: usize = 4;

/// Outcome of [`compile_pattern`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompileResult {
    /// True if a dimensional rule was produced.
    pub success: bool,
    /// The compiled rule on success.
    pub rule: Option<DimensionalRule>,
    /// Why compilation failed.
    pub errors: Vec<String>,
    /// Non-fatal oddities, such as unrecognized words.
    pub warnings: Vec<String>,
}

impl CompileResult {
    /// Converts into a `Result`.
    ///
    /// # Errors
    /// Returns [`ErrorKind::PatternCompile`](semrel_foundation::ErrorKind::PatternCompile)
    /// listing every error if compilation failed.
    pub fn into_result(self) -> Result<DimensionalRule> {
        match self.rule {
            Some(rule) if self.success => Ok(rule),
            _ => Err(Error::pattern_compile(self.errors.join("; "))),
        }
    }
}

/// The impact a rule implies when the template does not state one.
///
/// Breaking release types read as narrowing when the aspect is the type or a
/// restrictive modifier is present, and as unrelated otherwise. Minor reads
/// as widening; patch and none as equivalent.
#[must_use]
pub fn implied_impact(
    returns: ReleaseType,
    aspect: Option<Aspect>,
    modifiers: &[Modifier],
) -> Impact {
    match returns {
        ReleaseType::Forbidden | ReleaseType::Major => {
            if aspect == Some(Aspect::Type) || modifiers.iter().any(|m| m.is_restrictive()) {
                Impact::Narrowing
            } else {
                Impact::Unrelated
            }
        }
        ReleaseType::Minor => Impact::Widening,
        ReleaseType::Patch | ReleaseType::None => Impact::Equivalent,
    }
}

/// Compiles a pattern rule into a dimensional rule.
#[must_use]
pub fn compile_pattern(pattern: &PatternRule) -> CompileResult {
    Compiler::default().compile(pattern, 0)
}

#[derive(Default)]
struct Compiler {
    errors: Vec<String>,
    warnings: Vec<String>,
}

/// Dimensions read from the template text alone.
#[derive(Default)]
struct TemplateParts {
    action: Option<Action>,
    aspect: Option<Aspect>,
    explicit_impact: Option<Impact>,
    modifiers: Vec<Modifier>,
    tags: Vec<String>,
    nested: Option<bool>,
    placeholders: Vec<String>,
}

impl Compiler {
    fn compile(mut self, pattern: &PatternRule, depth: usize) -> CompileResult {
        trace!(template = %pattern.template, depth, "compiling pattern");
        let rule = self.build(pattern, depth);
        let success = rule.is_some() && self.errors.is_empty();
        CompileResult {
            success,
            rule: if success { rule } else { None },
            errors: self.errors,
            warnings: self.warnings,
        }
    }

    fn build(&mut self, pattern: &PatternRule, depth: usize) -> Option<DimensionalRule> {
        let parts = self.read_template(&pattern.template);
        let Some(action) = parts.action else {
            self.errors.push(format!(
                "no action or aspect recognized in '{}'",
                pattern.template
            ));
            return None;
        };

        let mut targets = BTreeSet::new();
        let mut kinds = BTreeSet::new();
        let mut nested = parts.nested;
        let mut refinement = None;

        for variable in &pattern.variables {
            match variable.kind {
                VariableKind::Target => {
                    targets.extend(self.parse_items::<Target>(variable.items(), "target"));
                }
                VariableKind::NodeKind => {
                    kinds.extend(self.parse_items::<NodeKind>(variable.items(), "node kind"));
                }
                VariableKind::Condition => {
                    if parts.nested.is_none() {
                        self.warnings.push(format!(
                            "condition '{}' is bound but the template has no when/unless clause",
                            variable.value
                        ));
                    }
                }
                VariableKind::NestedPattern => {
                    if depth >= MAX_NESTED_DEPTH {
                        self.errors
                            .push(format!("nested pattern '{}' is too deep", variable.name));
                        continue;
                    }
                    let inner = PatternRule {
                        template: variable.value.clone(),
                        variables: pattern
                            .variables
                            .iter()
                            .filter(|v| v.kind != VariableKind::NestedPattern)
                            .cloned()
                            .collect(),
                        returns: pattern.returns,
                        description: None,
                    };
                    let result = Compiler::default().compile(&inner, depth + 1);
                    self.warnings.extend(result.warnings);
                    match result.rule {
                        Some(rule) => refinement = Some(rule),
                        None => self.errors.extend(
                            result
                                .errors
                                .into_iter()
                                .map(|e| format!("in nested pattern '{}': {e}", variable.name)),
                        ),
                    }
                    nested.get_or_insert(true);
                }
            }
        }

        for placeholder in &parts.placeholders {
            if !pattern.variables.iter().any(|v| &v.name == placeholder) {
                self.warnings
                    .push(format!("placeholder {{{placeholder}}} is unbound"));
            }
        }

        let impact = parts
            .explicit_impact
            .unwrap_or_else(|| implied_impact(pattern.returns, parts.aspect, &parts.modifiers));

        let mut rule = DimensionalRule::new(pattern.returns);
        rule.description.clone_from(&pattern.description);
        rule.action = Some(vec![action]);
        rule.aspect = parts.aspect.map(|a| vec![a]);
        rule.impact = Some(vec![impact]);
        rule.tags = (!parts.tags.is_empty()).then_some(parts.tags);
        rule.target = (!targets.is_empty()).then(|| targets.into_iter().collect());
        rule.node_kind = (!kinds.is_empty()).then(|| kinds.into_iter().collect());
        rule.nested = nested;

        if let Some(inner) = refinement {
            refine(&mut rule, inner);
        }
        Some(rule)
    }

    /// Reads action, aspect, modifiers, and the condition clause from the template.
    fn read_template(&mut self, template: &str) -> TemplateParts {
        let mut parts = TemplateParts::default();
        let mut words: Vec<String> = Vec::new();
        let mut tokens = PhraseTokenizer::tokenize(template).into_iter();

        while let Some(token) = tokens.next() {
            match token {
                PhraseToken::Word(word) => {
                    if let Some(connective) = Connective::from_word(&word) {
                        parts.nested = Some(connective.nested());
                        let condition: Vec<PhraseToken> =
                            tokens.by_ref().filter(|t| *t != PhraseToken::End).collect();
                        if condition.is_empty() {
                            self.errors.push(format!(
                                "'{}' must be followed by a condition",
                                connective.as_str()
                            ));
                        }
                        parts.placeholders.extend(condition.into_iter().filter_map(|t| match t {
                            PhraseToken::Placeholder(p) => Some(p),
                            _ => None,
                        }));
                        break;
                    }
                    words.push(word);
                }
                PhraseToken::Placeholder(name) => parts.placeholders.push(name),
                PhraseToken::End => break,
            }
        }

        let words: Vec<&str> = words.iter().map(String::as_str).collect();
        let mut rest: &[&str] = &words;

        if let Some(action) = rest.first().and_then(|w| verb_action(w)) {
            parts.action = Some(action);
            rest = &rest[1..];
        }

        if let Some(suffix) = match_suffix(rest) {
            parts.aspect = Some(suffix.aspect);
            if let Some(tag) = suffix.tag {
                parts.tags.push(tag.to_string());
            }
            for word in suffix.words {
                if let Some(modifier) = Modifier::from_word(word) {
                    parts.explicit_impact = parts.explicit_impact.or(modifier.explicit_impact());
                    parts.modifiers.push(modifier);
                }
            }
            match parts.action {
                None | Some(Action::Modified) => parts.action = Some(Action::Modified),
                Some(other) => self.errors.push(format!(
                    "verb '{other}' conflicts with aspect phrase '{}'",
                    suffix.words.join(" ")
                )),
            }
            rest = &rest[..rest.len() - suffix.words.len()];
        }

        for word in rest {
            match Modifier::from_word(word) {
                Some(modifier) => {
                    match modifier {
                        Modifier::Required => parts.tags.push(tags::REQUIRED.to_string()),
                        Modifier::Optional => parts.tags.push(tags::OPTIONAL.to_string()),
                        _ => {}
                    }
                    parts.explicit_impact = parts.explicit_impact.or(modifier.explicit_impact());
                    parts.modifiers.push(modifier);
                }
                None => self
                    .warnings
                    .push(format!("unrecognized word '{word}' in '{template}'")),
            }
        }

        parts
    }

    fn parse_items<'a, T: FromStr>(
        &mut self,
        items: impl Iterator<Item = &'a str>,
        what: &str,
    ) -> Vec<T> {
        items
            .filter_map(|item| match item.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    self.errors.push(format!("unknown {what} '{item}'"));
                    None
                }
            })
            .collect()
    }
}

/// Fills dimensions the outer rule leaves open from a nested pattern.
///
/// Action, aspect, and impact stay with the outer template.
fn refine(rule: &mut DimensionalRule, inner: DimensionalRule) {
    if rule.target.is_none() {
        rule.target = inner.target;
    }
    if rule.tags.is_none() {
        rule.tags = inner.tags;
    }
    if rule.node_kind.is_none() {
        rule.node_kind = inner.node_kind;
    }
}
