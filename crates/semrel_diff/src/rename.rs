//! Rename detection.
//!
//! A declaration missing from the new model and one missing from the old
//! model are paired as a rename when they have the same kind and their
//! combined name/signature similarity clears the configured threshold.

use std::collections::BTreeSet;

use semrel_foundation::NodeKind;
use semrel_foundation::text::similarity;
use semrel_model::{DeclarationModel, DeclarationNode};

use crate::options::DiffOptions;

/// Comparable summary of a declaration used for rename scoring.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenameCandidate {
    /// Declared name.
    pub name: String,
    /// Declaration kind.
    pub kind: NodeKind,
    /// Normalized signature text, return type, and constraint.
    pub signature: String,
    /// `name: signature` keys of the direct children.
    pub members: BTreeSet<String>,
}

impl RenameCandidate {
    /// Summarizes `node` as found in `model`.
    #[must_use]
    pub fn of(model: &DeclarationModel, node: &DeclarationNode) -> Self {
        let members = node
            .children
            .iter()
            .filter_map(|&id| model.node(id))
            .map(|child| format!("{}: {}", child.name, signature_key(child)))
            .collect();
        Self {
            name: node.name.clone(),
            kind: node.kind,
            signature: signature_key(node),
            members,
        }
    }
}

fn signature_key(node: &DeclarationNode) -> String {
    let sig = &node.signature;
    format!(
        "{}|{}|{}",
        sig.normalized(),
        sig.returns.as_deref().unwrap_or_default().trim(),
        sig.constraint.as_deref().unwrap_or_default().trim()
    )
}

/// Jaccard index of two sets; two empty sets are identical.
#[allow(clippy::cast_precision_loss)]
fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 1.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Similarity of two declarations' shapes in `[0, 1]`.
#[must_use]
pub fn signature_similarity(old: &RenameCandidate, new: &RenameCandidate) -> f64 {
    let own = if old.signature == new.signature { 1.0 } else { 0.0 };
    0.5 * own + 0.5 * jaccard(&old.members, &new.members)
}

/// Weighted rename score; zero for differing kinds.
#[must_use]
pub fn score(old: &RenameCandidate, new: &RenameCandidate, options: &DiffOptions) -> f64 {
    if old.kind != new.kind {
        return 0.0;
    }
    options.name_weight * similarity(&old.name, &new.name)
        + options.signature_weight * signature_similarity(old, new)
}

/// A detected rename: indices into the removed and added lists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenamePair {
    /// Index into the removed candidates.
    pub old: usize,
    /// Index into the added candidates.
    pub new: usize,
    /// Score that justified the pairing.
    pub score: f64,
}

/// Pairs removed and added candidates greedily by descending score.
///
/// Each candidate participates in at most one pair. Ties keep the earlier
/// removed candidate, then the earlier added one.
#[must_use]
pub fn pair_renames(
    removed: &[RenameCandidate],
    added: &[RenameCandidate],
    options: &DiffOptions,
) -> Vec<RenamePair> {
    let mut scored: Vec<RenamePair> = removed
        .iter()
        .enumerate()
        .flat_map(|(i, old)| {
            added.iter().enumerate().map(move |(j, new)| RenamePair {
                old: i,
                new: j,
                score: score(old, new, options),
            })
        })
        .filter(|pair| pair.score >= options.rename_threshold)
        .collect();
    scored.sort_by(|a, b| b.score.total_cmp(&a.score));

    let mut used_old = BTreeSet::new();
    let mut used_new = BTreeSet::new();
    let mut pairs = Vec::new();
    for pair in scored {
        if used_old.contains(&pair.old) || used_new.contains(&pair.new) {
            continue;
        }
        used_old.insert(pair.old);
        used_new.insert(pair.new);
        pairs.push(pair);
    }
    pairs.sort_by_key(|pair| pair.old);
    pairs
}
