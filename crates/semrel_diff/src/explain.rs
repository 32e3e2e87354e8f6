//! Human-readable explanations attached to changes.

use semrel_foundation::text::humanize;
use semrel_foundation::{Aspect, ChangeDescriptor, Impact, Target, tags};

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

fn noun(target: Target) -> String {
    capitalize(&humanize(target.as_str()))
}

fn impact_suffix(impact: Option<Impact>) -> String {
    impact.map_or_else(String::new, |i| format!(" ({i})"))
}

/// Explains an addition.
#[must_use]
pub fn added(descriptor: &ChangeDescriptor, path: &str) -> String {
    let qualifier = if descriptor.has_tag(tags::REQUIRED) {
        "required "
    } else if descriptor.has_tag(tags::OPTIONAL) {
        "optional "
    } else {
        ""
    };
    capitalize(&format!(
        "{qualifier}{} `{path}` was added",
        humanize(descriptor.target().as_str())
    ))
}

/// Explains a removal.
#[must_use]
pub fn removed(target: Target, path: &str) -> String {
    format!("{} `{path}` was removed", noun(target))
}

/// Explains a rename.
#[must_use]
pub fn renamed(target: Target, path: &str, new_name: &str, score: f64) -> String {
    format!(
        "{} `{path}` was renamed to `{new_name}` (similarity {score:.2})",
        noun(target)
    )
}

/// Explains a positional parameter rename.
#[must_use]
pub fn parameter_renamed(path: &str, new_name: &str) -> String {
    format!("Parameter `{path}` was renamed to `{new_name}`")
}

/// Explains a parameter reorder.
#[must_use]
pub fn reordered(owner: &str, before: &[&str], after: &[&str]) -> String {
    format!(
        "Parameters of `{owner}` were reordered: ({}) -> ({})",
        before.join(", "),
        after.join(", ")
    )
}

/// Explains a facet modification.
#[must_use]
pub fn modified(
    descriptor: &ChangeDescriptor,
    path: &str,
    before: &str,
    after: &str,
) -> String {
    let what = descriptor
        .aspect()
        .map_or_else(|| "declaration".to_string(), |a| humanize(a.as_str()));
    let mut text = format!(
        "{} `{path}` {what} changed: {} -> {}{}",
        noun(descriptor.target()),
        display_or_none(before),
        display_or_none(after),
        impact_suffix(descriptor.impact())
    );
    let also: Vec<_> = Aspect::ALL
        .iter()
        .filter(|a| descriptor.has_tag(&tags::also(**a)))
        .map(|a| humanize(a.as_str()))
        .collect();
    if !also.is_empty() {
        text.push_str(&format!("; also {}", also.join(", ")));
    }
    text
}

/// Explains a synthetic owner change in nested mode.
#[must_use]
pub fn members_changed(descriptor: &ChangeDescriptor, path: &str, count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!(
        "{} `{path}` has {count} changed member{plural}{}",
        noun(descriptor.target()),
        impact_suffix(descriptor.impact())
    )
}

fn display_or_none(text: &str) -> &str {
    if text.is_empty() { "(none)" } else { text }
}
