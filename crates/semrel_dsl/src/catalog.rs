//! Static lookup tables shared by the DSL converters.
//!
//! - [`INTENTS`] maps catalog phrases to templates (and back).
//! - [`PATTERNS`] maps dimension constraints to templates.
//! - [`VERBS`] and [`SUFFIXES`] drive template compilation.

use semrel_foundation::{Action, Aspect, Impact, ReleaseType, Target, tags};

// =============================================================================
// Intent Catalog
// =============================================================================

/// A known intent phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntentEntry {
    /// Canonical phrase.
    pub phrase: &'static str,
    /// Template the phrase expands to.
    pub template: &'static str,
    /// Value bound to `{target}`, if the phrase fixes one.
    pub target: Option<Target>,
    /// Release type conventionally assigned by this intent.
    pub returns: ReleaseType,
}

const fn intent(
    phrase: &'static str,
    template: &'static str,
    target: Option<Target>,
    returns: ReleaseType,
) -> IntentEntry {
    IntentEntry {
        phrase,
        template,
        target,
        returns,
    }
}

/// Every recognized intent phrase.
pub static INTENTS: &[IntentEntry] = &[
    intent("breaking removal", "removed {target}", Some(Target::Export), ReleaseType::Major),
    intent("safe addition", "added {target}", Some(Target::Export), ReleaseType::Minor),
    intent("breaking rename", "renamed {target}", Some(Target::Export), ReleaseType::Major),
    intent("parameter removal", "removed {target}", Some(Target::Parameter), ReleaseType::Major),
    intent(
        "required parameter added",
        "added required {target}",
        Some(Target::Parameter),
        ReleaseType::Major,
    ),
    intent(
        "optional parameter added",
        "added optional {target}",
        Some(Target::Parameter),
        ReleaseType::Minor,
    ),
    intent(
        "required property added",
        "added required {target}",
        Some(Target::Property),
        ReleaseType::Major,
    ),
    intent(
        "optional property added",
        "added optional {target}",
        Some(Target::Property),
        ReleaseType::Minor,
    ),
    intent("parameter reorder", "reordered {target}", Some(Target::Parameter), ReleaseType::Major),
    intent("method added", "added {target}", Some(Target::Method), ReleaseType::Minor),
    intent("method removal", "removed {target}", Some(Target::Method), ReleaseType::Major),
    intent("type narrowing", "{target} type narrowed", None, ReleaseType::Major),
    intent("type widening", "{target} type widened", None, ReleaseType::Minor),
    intent(
        "return type widening",
        "{target} type widened",
        Some(Target::ReturnType),
        ReleaseType::Major,
    ),
    intent("made optional", "{target} made optional", None, ReleaseType::Minor),
    intent("made required", "{target} made required", None, ReleaseType::Major),
    intent("made readonly", "{target} made readonly", None, ReleaseType::Major),
    intent("visibility reduced", "{target} visibility reduced", None, ReleaseType::Major),
    intent("deprecation", "{target} deprecated", None, ReleaseType::Patch),
    intent("undeprecation", "{target} undeprecated", None, ReleaseType::Patch),
    intent("default value changed", "{target} default changed", None, ReleaseType::Patch),
    intent(
        "enum value changed",
        "{target} enum value changed",
        Some(Target::EnumMember),
        ReleaseType::Major,
    ),
];

/// Finds an intent by canonical phrase.
#[must_use]
pub fn find_intent(phrase: &str) -> Option<&'static IntentEntry> {
    INTENTS.iter().find(|e| e.phrase == phrase)
}

/// All intents that expand to `template`.
pub fn intents_for_template(template: &str) -> impl Iterator<Item = &'static IntentEntry> + '_ {
    INTENTS.iter().filter(move |e| e.template == template)
}

/// The catalog phrases, for suggestions.
pub fn phrases() -> impl Iterator<Item = &'static str> {
    INTENTS.iter().map(|e| e.phrase)
}

// =============================================================================
// Pattern Catalog
// =============================================================================

/// A template and the dimension values it stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PatternEntry {
    /// Template text.
    pub template: &'static str,
    /// Action the rule must allow.
    pub action: Action,
    /// Aspect the rule must allow, if any.
    pub aspect: Option<Aspect>,
    /// Impact the rule must allow, if any.
    pub impact: Option<Impact>,
    /// Tags the rule must list.
    pub tags: &'static [&'static str],
    /// Preference among applicable entries, 0 to 10.
    pub priority: u8,
}

const fn pattern(
    template: &'static str,
    action: Action,
    aspect: Option<Aspect>,
    impact: Option<Impact>,
    tags: &'static [&'static str],
    priority: u8,
) -> PatternEntry {
    PatternEntry {
        template,
        action,
        aspect,
        impact,
        tags,
        priority,
    }
}

/// Every template the decompiler can produce.
pub static PATTERNS: &[PatternEntry] = &[
    pattern("added required {target}", Action::Added, None, None, &[tags::REQUIRED], 9),
    pattern("added optional {target}", Action::Added, None, None, &[tags::OPTIONAL], 9),
    pattern("added {target}", Action::Added, None, None, &[], 7),
    pattern("removed {target}", Action::Removed, None, None, &[], 8),
    pattern("renamed {target}", Action::Renamed, None, None, &[], 8),
    pattern("reordered {target}", Action::Reordered, None, None, &[], 8),
    pattern(
        "{target} type narrowed",
        Action::Modified,
        Some(Aspect::Type),
        Some(Impact::Narrowing),
        &[],
        9,
    ),
    pattern(
        "{target} type widened",
        Action::Modified,
        Some(Aspect::Type),
        Some(Impact::Widening),
        &[],
        9,
    ),
    pattern(
        "{target} made optional",
        Action::Modified,
        Some(Aspect::Optionality),
        None,
        &[tags::NOW_OPTIONAL],
        9,
    ),
    pattern(
        "{target} made required",
        Action::Modified,
        Some(Aspect::Optionality),
        None,
        &[tags::NOW_REQUIRED],
        9,
    ),
    pattern(
        "{target} deprecated",
        Action::Modified,
        Some(Aspect::Deprecation),
        None,
        &[tags::DEPRECATED],
        9,
    ),
    pattern(
        "{target} undeprecated",
        Action::Modified,
        Some(Aspect::Deprecation),
        None,
        &[tags::UNDEPRECATED],
        9,
    ),
    pattern(
        "{target} made readonly",
        Action::Modified,
        Some(Aspect::Readonly),
        None,
        &[tags::NOW_READONLY],
        9,
    ),
    pattern(
        "{target} visibility reduced",
        Action::Modified,
        Some(Aspect::Visibility),
        Some(Impact::Narrowing),
        &[],
        9,
    ),
    pattern(
        "{target} default changed",
        Action::Modified,
        Some(Aspect::DefaultValue),
        None,
        &[],
        8,
    ),
    pattern(
        "{target} enum value changed",
        Action::Modified,
        Some(Aspect::EnumValue),
        None,
        &[],
        8,
    ),
    pattern("{target} type changed", Action::Modified, Some(Aspect::Type), None, &[], 6),
];

/// Template used when no catalog entry applies.
pub const FALLBACK_TEMPLATE: &str = "modified {target}";

// =============================================================================
// Compilation Tables
// =============================================================================

/// A word in a template that adjusts tags or impact.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    /// `required`: the member must now be supplied.
    Required,
    /// `optional`: the member may be omitted.
    Optional,
    /// `readonly`: the member can no longer be written.
    Readonly,
    /// `reduced`: fewer callers can reach the member.
    Reduced,
    /// `narrowed`: explicit narrowing.
    Narrowed,
    /// `widened`: explicit widening.
    Widened,
}

impl Modifier {
    /// Recognizes a modifier word.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "required" => Some(Self::Required),
            "optional" => Some(Self::Optional),
            "readonly" => Some(Self::Readonly),
            "reduced" => Some(Self::Reduced),
            "narrowed" => Some(Self::Narrowed),
            "widened" => Some(Self::Widened),
            _ => None,
        }
    }

    /// True for modifiers that signal a breaking direction.
    #[must_use]
    pub const fn is_restrictive(self) -> bool {
        matches!(self, Self::Required | Self::Readonly | Self::Reduced)
    }

    /// The impact the modifier states outright, if any.
    #[must_use]
    pub const fn explicit_impact(self) -> Option<Impact> {
        match self {
            Self::Narrowed => Some(Impact::Narrowing),
            Self::Widened => Some(Impact::Widening),
            _ => None,
        }
    }
}

/// Leading verbs and their synonyms.
pub static VERBS: &[(&[&str], Action)] = &[
    (&["added", "add", "adds", "new"], Action::Added),
    (&["removed", "remove", "removes", "deleted", "dropped"], Action::Removed),
    (&["renamed", "rename", "renames"], Action::Renamed),
    (&["reordered", "reorder", "reorders"], Action::Reordered),
    (&["modified", "modify", "modifies", "changed"], Action::Modified),
];

/// Looks up a leading verb.
#[must_use]
pub fn verb_action(word: &str) -> Option<Action> {
    VERBS
        .iter()
        .find(|(words, _)| words.contains(&word))
        .map(|(_, action)| *action)
}

/// A trailing phrase that names the modified aspect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Suffix {
    /// Words of the phrase, in order.
    pub words: &'static [&'static str],
    /// Aspect it names.
    pub aspect: Aspect,
    /// Tag implied by the phrase.
    pub tag: Option<&'static str>,
}

const fn suffix(
    words: &'static [&'static str],
    aspect: Aspect,
    tag: Option<&'static str>,
) -> Suffix {
    Suffix { words, aspect, tag }
}

/// Aspect suffixes, longest first so the most specific phrase wins.
pub static SUFFIXES: &[Suffix] = &[
    suffix(&["enum", "value", "changed"], Aspect::EnumValue, None),
    suffix(&["type", "narrowed"], Aspect::Type, None),
    suffix(&["type", "widened"], Aspect::Type, None),
    suffix(&["type", "changed"], Aspect::Type, None),
    suffix(&["made", "optional"], Aspect::Optionality, Some(tags::NOW_OPTIONAL)),
    suffix(&["made", "required"], Aspect::Optionality, Some(tags::NOW_REQUIRED)),
    suffix(&["made", "readonly"], Aspect::Readonly, Some(tags::NOW_READONLY)),
    suffix(&["made", "mutable"], Aspect::Readonly, Some(tags::WAS_READONLY)),
    suffix(&["visibility", "reduced"], Aspect::Visibility, None),
    suffix(&["visibility", "changed"], Aspect::Visibility, None),
    suffix(&["default", "changed"], Aspect::DefaultValue, None),
    suffix(&["constraint", "changed"], Aspect::Constraint, None),
    suffix(&["deprecated"], Aspect::Deprecation, Some(tags::DEPRECATED)),
    suffix(&["undeprecated"], Aspect::Deprecation, Some(tags::UNDEPRECATED)),
];

/// Finds the suffix that `words` ends with.
#[must_use]
pub fn match_suffix(words: &[&str]) -> Option<&'static Suffix> {
    SUFFIXES.iter().find(|s| words.ends_with(s.words))
}
