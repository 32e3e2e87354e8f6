//! Structural comparison of two declaration models.
//!
//! Exports and named members are matched by name, parameters by position.
//! Unmatched declarations of the same kind may be paired as renames, and a
//! permuted parameter list is reported as a single reorder. Problems with
//! the input become diagnostics; diffing itself never fails.

use std::collections::{BTreeMap, BTreeSet};

use semrel_foundation::{Action, Aspect, ChangeDescriptor, Impact, NodeKind, Target, tags};
use semrel_model::node::normalize_type_text;
use semrel_model::{DeclarationModel, DeclarationNode, Modifier, NodeId};
use tracing::{debug, trace};

use crate::change::{Change, ChangeContext, Diagnostic, DiffResult};
use crate::compat;
use crate::explain;
use crate::options::DiffOptions;
use crate::rename::{RenameCandidate, pair_renames};

/// Declarations nested deeper than this are not compared.
pub const MAX_DEPTH: usize = 64;

// =============================================================================
// Entry Points
// =============================================================================

/// Compares two versions of a module's API surface.
#[must_use]
pub fn diff(old: &DeclarationModel, new: &DeclarationModel, options: &DiffOptions) -> DiffResult {
    diff_against_baseline(Some(old), new, options)
}

/// Compares against an optional baseline.
///
/// Without a baseline every export of `new` is reported as added and the
/// result is marked with `baseline == false`.
#[must_use]
pub fn diff_against_baseline(
    old: Option<&DeclarationModel>,
    new: &DeclarationModel,
    options: &DiffOptions,
) -> DiffResult {
    let empty = DeclarationModel::new();
    let baseline = old.is_some();
    let old = old.unwrap_or(&empty);

    debug!(
        old_exports = old.exports().len(),
        new_exports = new.exports().len(),
        nested = options.nested,
        baseline,
        "diffing declaration models"
    );

    let mut differ = Differ {
        old,
        new,
        options,
        diagnostics: Vec::new(),
        ancestors: [Vec::new(), Vec::new()],
        expanded: [BTreeSet::new(), BTreeSet::new()],
    };
    differ.forward_model_diagnostics();
    if !baseline {
        differ
            .diagnostics
            .push(Diagnostic::info("no baseline: every export is reported as added"));
    }

    let context = ChangeContext::top_level();
    let old_exports = differ.resolve(Side::Old, old.exports(), None);
    let new_exports = differ.resolve(Side::New, new.exports(), None);
    let changes = differ.diff_members(&old_exports, &new_exports, None, &context);

    let result = DiffResult {
        changes,
        diagnostics: differ.diagnostics,
        baseline,
    };
    debug!(
        changes = result.total_changes(),
        diagnostics = result.diagnostics.len(),
        "diff complete"
    );
    result
}

// =============================================================================
// Differ
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Old,
    New,
}

impl Side {
    const fn label(self) -> &'static str {
        match self {
            Self::Old => "old",
            Self::New => "new",
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::Old => 0,
            Self::New => 1,
        }
    }
}

/// A resolved node handle.
#[derive(Clone, Copy, Debug)]
struct Entry<'a> {
    id: NodeId,
    node: &'a DeclarationNode,
}

/// One differing facet of a matched declaration.
struct Facet {
    aspect: Aspect,
    impact: Impact,
    tags: Vec<&'static str>,
    before: String,
    after: String,
}

impl Facet {
    fn new(
        aspect: Aspect,
        impact: Impact,
        before: impl Into<String>,
        after: impl Into<String>,
    ) -> Self {
        Self {
            aspect,
            impact,
            tags: Vec::new(),
            before: before.into(),
            after: after.into(),
        }
    }

    fn tagged(mut self, tags: &[&'static str]) -> Self {
        self.tags.extend_from_slice(tags);
        self
    }
}

struct Differ<'a> {
    old: &'a DeclarationModel,
    new: &'a DeclarationModel,
    options: &'a DiffOptions,
    diagnostics: Vec<Diagnostic>,
    /// Handles of the pairs currently being compared, outermost first, per side.
    ancestors: [Vec<NodeId>; 2],
    /// Handles whose members have been compared, per side.
    expanded: [BTreeSet<NodeId>; 2],
}

fn join(owner: Option<&str>, name: &str) -> String {
    match owner {
        Some(owner) => format!("{owner}.{name}"),
        None => name.to_string(),
    }
}

fn target_for(kind: NodeKind, context: &ChangeContext) -> Target {
    if context.depth == 0 {
        Target::Export
    } else {
        kind.member_target()
    }
}

fn param_key<'a>(entry: &Entry<'a>) -> (&'a str, String) {
    (entry.node.name.as_str(), entry.node.signature.normalized())
}

impl<'a> Differ<'a> {
    fn model(&self, side: Side) -> &'a DeclarationModel {
        match side {
            Side::Old => self.old,
            Side::New => self.new,
        }
    }

    fn warn(&mut self, path: &str, message: impl Into<String>) -> &mut Diagnostic {
        let diagnostic = Diagnostic::warning(path, message);
        debug!(path, message = %diagnostic.message, "diff diagnostic");
        self.diagnostics.push(diagnostic);
        let last = self.diagnostics.len() - 1;
        &mut self.diagnostics[last]
    }

    fn forward_model_diagnostics(&mut self) {
        for side in [Side::Old, Side::New] {
            let model = self.model(side);
            self.diagnostics.extend(
                model
                    .diagnostics()
                    .iter()
                    .map(|d| Diagnostic::from_model(side.label(), d)),
            );
        }
    }

    /// Resolves handles, skipping dangling, cyclic, unnamed, unresolved, and
    /// duplicate declarations with a diagnostic each.
    fn resolve(&mut self, side: Side, ids: &[NodeId], owner: Option<&str>) -> Vec<Entry<'a>> {
        let model = self.model(side);
        let location = owner.unwrap_or("<exports>");
        let mut seen = BTreeSet::new();
        let mut entries = Vec::with_capacity(ids.len());

        for &id in ids {
            if self.ancestors[side.index()].contains(&id) {
                self.warn(
                    location,
                    format!("{} model has cyclic handle {id}; skipped", side.label()),
                );
                continue;
            }
            let Some(node) = model.node(id) else {
                self.warn(
                    location,
                    format!("{} model has dangling handle {id}; skipped", side.label()),
                );
                continue;
            };
            if node.name.trim().is_empty() {
                self.warn(
                    location,
                    format!("unnamed {} in {} model skipped", node.kind, side.label()),
                )
                .span = node.span.known();
                continue;
            }
            let path = join(owner, &node.name);
            if node.kind == NodeKind::Unresolved {
                self.warn(
                    &path,
                    format!("unresolved declaration in {} model skipped", side.label()),
                )
                .span = node.span.known();
                continue;
            }
            if !seen.insert(node.name.as_str()) {
                self.warn(
                    &path,
                    format!("duplicate declaration in {} model; later one ignored", side.label()),
                )
                .span = node.span.known();
                continue;
            }
            entries.push(Entry { id, node });
        }
        entries
    }

    /// Splits the children of `entry` into parameters, type parameters, and
    /// named members.
    fn partition(
        &mut self,
        side: Side,
        entry: Entry<'a>,
        path: &str,
    ) -> (Vec<Entry<'a>>, Vec<Entry<'a>>, Vec<Entry<'a>>) {
        let children = self.resolve(side, &entry.node.children, Some(path));
        let mut params = Vec::new();
        let mut type_params = Vec::new();
        let mut members = Vec::new();
        for child in children {
            match child.node.kind {
                NodeKind::Parameter => params.push(child),
                NodeKind::TypeParameter => type_params.push(child),
                _ => members.push(child),
            }
        }
        (params, type_params, members)
    }

    fn relation(&mut self, before: &str, after: &str, path: &str) -> Impact {
        let before = if before.trim().is_empty() { "unknown" } else { before };
        let after = if after.trim().is_empty() { "unknown" } else { after };
        match compat::relation_text(before, after) {
            Ok(impact) => impact,
            Err(err) => {
                self.warn(path, format!("cannot compare types: {err}"));
                Impact::Undetermined
            }
        }
    }

    // -------------------------------------------------------------------------
    // Named members
    // -------------------------------------------------------------------------

    fn diff_members(
        &mut self,
        old: &[Entry<'a>],
        new: &[Entry<'a>],
        owner: Option<&str>,
        context: &ChangeContext,
    ) -> Vec<Change> {
        let new_index: BTreeMap<&str, Entry<'a>> =
            new.iter().map(|e| (e.node.name.as_str(), *e)).collect();
        let old_names: BTreeSet<&str> = old.iter().map(|e| e.node.name.as_str()).collect();

        let mut changes = Vec::new();
        let mut removed = Vec::new();
        for &o in old {
            match new_index.get(o.node.name.as_str()) {
                Some(&n) => {
                    let path = join(owner, &n.node.name);
                    changes.extend(self.diff_pair(o, n, &path, context));
                }
                None => removed.push(o),
            }
        }
        let mut added: Vec<Entry<'a>> = new
            .iter()
            .filter(|e| !old_names.contains(e.node.name.as_str()))
            .copied()
            .collect();

        if self.options.detect_renames && !removed.is_empty() && !added.is_empty() {
            let old_candidates: Vec<_> = removed
                .iter()
                .map(|e| RenameCandidate::of(self.old, e.node))
                .collect();
            let new_candidates: Vec<_> = added
                .iter()
                .map(|e| RenameCandidate::of(self.new, e.node))
                .collect();
            let pairs = pair_renames(&old_candidates, &new_candidates, self.options);

            let mut renamed_old = BTreeSet::new();
            let mut renamed_new = BTreeSet::new();
            for pair in &pairs {
                let (o, n) = (removed[pair.old], added[pair.new]);
                trace!(
                    from = %o.node.name,
                    to = %n.node.name,
                    score = pair.score,
                    "rename detected"
                );
                changes.push(self.renamed_change(o, n, pair.score, owner, context));
                let new_path = join(owner, &n.node.name);
                changes.extend(self.diff_pair(o, n, &new_path, context));
                renamed_old.insert(pair.old);
                renamed_new.insert(pair.new);
            }
            removed = removed
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !renamed_old.contains(i))
                .map(|(_, e)| e)
                .collect();
            added = added
                .into_iter()
                .enumerate()
                .filter(|(i, _)| !renamed_new.contains(i))
                .map(|(_, e)| e)
                .collect();
        }

        changes.extend(removed.into_iter().map(|o| removed_change(o, owner, context)));
        changes.extend(added.into_iter().map(|n| added_change(n, owner, context)));
        changes
    }

    fn renamed_change(
        &self,
        old: Entry<'a>,
        new: Entry<'a>,
        score: f64,
        owner: Option<&str>,
        context: &ChangeContext,
    ) -> Change {
        let target = target_for(old.node.kind, context);
        let path = join(owner, &old.node.name);
        let descriptor =
            ChangeDescriptor::presence(target, Action::Renamed).with_impact(Impact::Unrelated);
        let explanation = explain::renamed(target, &path, &new.node.name, score);
        Change::new(descriptor, path, old.node.kind, context.clone())
            .with_nodes(Some(old.id), Some(new.id))
            .with_explanation(explanation)
    }

    // -------------------------------------------------------------------------
    // Matched pairs
    // -------------------------------------------------------------------------

    /// Compares a matched pair and everything below it.
    fn diff_pair(
        &mut self,
        old: Entry<'a>,
        new: Entry<'a>,
        path: &str,
        context: &ChangeContext,
    ) -> Vec<Change> {
        if context.depth >= MAX_DEPTH {
            self.warn(path, "declaration nested too deeply; members not compared");
            return Vec::new();
        }

        let first_visit = self.expanded[Side::Old.index()].insert(old.id)
            & self.expanded[Side::New.index()].insert(new.id);
        if !first_visit {
            self.warn(
                path,
                "declaration reached through more than one owner; members not compared",
            );
            return self
                .compare_facets(old, new, path, context, false)
                .into_iter()
                .collect();
        }

        let member_context = context.child(path);
        self.ancestors[Side::Old.index()].push(old.id);
        self.ancestors[Side::New.index()].push(new.id);
        let members = self.compare_members(old, new, path, &member_context);
        self.ancestors[Side::Old.index()].pop();
        self.ancestors[Side::New.index()].pop();

        let direct = self.compare_facets(old, new, path, context, !members.is_empty());
        if !self.options.nested {
            return direct.into_iter().chain(members).collect();
        }
        if members.is_empty() {
            return direct.into_iter().collect();
        }
        let owner = direct.unwrap_or_else(|| members_changed(old, new, path, context, &members));
        vec![owner.with_nested(members)]
    }

    /// Changes to the return type, parameters, type parameters, and members
    /// of a matched pair.
    fn compare_members(
        &mut self,
        old: Entry<'a>,
        new: Entry<'a>,
        path: &str,
        context: &ChangeContext,
    ) -> Vec<Change> {
        let mut members = Vec::new();
        if old.node.kind.is_callable() && new.node.kind.is_callable() {
            members.extend(self.diff_return(old, new, path, context));
        }

        let (old_params, old_type_params, old_members) = self.partition(Side::Old, old, path);
        let (new_params, new_type_params, new_members) = self.partition(Side::New, new, path);
        members.extend(self.diff_parameters(&old_params, &new_params, path, context));
        members.extend(self.diff_members(&old_type_params, &new_type_params, Some(path), context));
        members.extend(self.diff_members(&old_members, &new_members, Some(path), context));
        members
    }

    /// Compares the facets of one matched declaration.
    ///
    /// The first differing facet becomes the aspect; the others are recorded
    /// as `also-<aspect>` tags. `explained_by_members` says whether structural
    /// member changes already account for the signature of a callable or
    /// container.
    fn compare_facets(
        &mut self,
        old: Entry<'a>,
        new: Entry<'a>,
        path: &str,
        context: &ChangeContext,
        explained_by_members: bool,
    ) -> Option<Change> {
        let (a, b) = (old.node, new.node);
        let mut facets = Vec::new();

        if a.kind == b.kind {
            facets.extend(self.type_facet(a, b, path, explained_by_members));
        } else {
            facets.push(
                Facet::new(Aspect::Type, Impact::Unrelated, a.kind.as_str(), b.kind.as_str())
                    .tagged(&[tags::KIND_CHANGED]),
            );
        }

        if a.is_optional() != b.is_optional() {
            facets.push(if b.is_optional() {
                Facet::new(Aspect::Optionality, Impact::Widening, "required", "optional")
                    .tagged(&[tags::WAS_REQUIRED, tags::NOW_OPTIONAL])
            } else {
                Facet::new(Aspect::Optionality, Impact::Narrowing, "optional", "required")
                    .tagged(&[tags::WAS_OPTIONAL, tags::NOW_REQUIRED])
            });
        }

        let (was_readonly, is_readonly) = (a.has(Modifier::Readonly), b.has(Modifier::Readonly));
        if was_readonly != is_readonly {
            facets.push(if is_readonly {
                Facet::new(Aspect::Readonly, Impact::Narrowing, "mutable", "readonly")
                    .tagged(&[tags::NOW_READONLY])
            } else {
                Facet::new(Aspect::Readonly, Impact::Widening, "readonly", "mutable")
                    .tagged(&[tags::WAS_READONLY])
            });
        }

        let (was_visible, is_visible) = (a.visibility(), b.visibility());
        if was_visible != is_visible {
            let impact = if is_visible > was_visible {
                Impact::Narrowing
            } else {
                Impact::Widening
            };
            facets.push(Facet::new(
                Aspect::Visibility,
                impact,
                was_visible.to_string(),
                is_visible.to_string(),
            ));
        }

        if a.default_value() != b.default_value() {
            let facet = Facet::new(
                Aspect::DefaultValue,
                Impact::Equivalent,
                a.default_value().unwrap_or_default(),
                b.default_value().unwrap_or_default(),
            );
            facets.push(if b.default_value().is_some() {
                facet.tagged(&[tags::HAS_DEFAULT])
            } else {
                facet
            });
        }

        if a.is_deprecated() != b.is_deprecated() {
            facets.push(if b.is_deprecated() {
                Facet::new(Aspect::Deprecation, Impact::Equivalent, "active", "deprecated")
                    .tagged(&[tags::DEPRECATED])
            } else {
                Facet::new(Aspect::Deprecation, Impact::Equivalent, "deprecated", "active")
                    .tagged(&[tags::UNDEPRECATED])
            });
        }

        let mut facets = facets.into_iter();
        let primary = facets.next()?;
        let target = target_for(b.kind, context);
        let mut descriptor = ChangeDescriptor::modified(target, primary.aspect)
            .with_impact(primary.impact)
            .with_tags(primary.tags.iter().copied());
        for secondary in facets {
            descriptor = descriptor
                .with_tag(tags::also(secondary.aspect))
                .with_tags(secondary.tags.iter().copied());
        }

        let explanation = explain::modified(&descriptor, path, &primary.before, &primary.after);
        Some(
            Change::new(descriptor, path, b.kind, context.clone())
                .with_nodes(Some(old.id), Some(new.id))
                .with_explanation(explanation),
        )
    }

    /// The type-like facet appropriate for the declaration kind.
    ///
    /// Callables and containers compare their opaque text only when both
    /// sides carry one and no member change explains the difference.
    fn type_facet(
        &mut self,
        a: &DeclarationNode,
        b: &DeclarationNode,
        path: &str,
        explained_by_members: bool,
    ) -> Option<Facet> {
        match b.kind {
            NodeKind::EnumMember => (a.signature.normalized() != b.signature.normalized()).then(|| {
                Facet::new(
                    Aspect::EnumValue,
                    Impact::Unrelated,
                    a.signature.text.clone(),
                    b.signature.text.clone(),
                )
            }),
            NodeKind::TypeParameter => {
                let before = a.signature.constraint.clone().unwrap_or_default();
                let after = b.signature.constraint.clone().unwrap_or_default();
                if normalize_type_text(&before) == normalize_type_text(&after) {
                    return None;
                }
                let impact = self.relation(&before, &after, path);
                Some(Facet::new(Aspect::Constraint, impact, before, after))
            }
            kind if kind.is_callable() || kind.is_container() => {
                let opaque =
                    !a.signature.text.trim().is_empty() && !b.signature.text.trim().is_empty();
                if explained_by_members
                    || !opaque
                    || a.signature.normalized() == b.signature.normalized()
                {
                    return None;
                }
                let impact = self.relation(&a.signature.text, &b.signature.text, path);
                Some(Facet::new(
                    Aspect::Type,
                    impact,
                    a.signature.text.clone(),
                    b.signature.text.clone(),
                ))
            }
            _ => {
                if a.signature.normalized() == b.signature.normalized() {
                    return None;
                }
                let impact = self.relation(&a.signature.text, &b.signature.text, path);
                Some(Facet::new(
                    Aspect::Type,
                    impact,
                    a.signature.text.clone(),
                    b.signature.text.clone(),
                ))
            }
        }
    }

    fn diff_return(
        &mut self,
        old: Entry<'a>,
        new: Entry<'a>,
        path: &str,
        context: &ChangeContext,
    ) -> Option<Change> {
        let before = old.node.signature.returns.as_deref()?;
        let after = new.node.signature.returns.as_deref()?;
        if normalize_type_text(before) == normalize_type_text(after) {
            return None;
        }

        let path = format!("{path}.@return");
        let impact = self.relation(before, after, &path);
        let descriptor =
            ChangeDescriptor::modified(Target::ReturnType, Aspect::Type).with_impact(impact);
        let explanation = explain::modified(&descriptor, &path, before, after);
        Some(
            Change::new(descriptor, path, new.node.kind, context.clone())
                .with_nodes(Some(old.id), Some(new.id))
                .with_explanation(explanation),
        )
    }

    // -------------------------------------------------------------------------
    // Parameters
    // -------------------------------------------------------------------------

    /// Compares parameter lists positionally.
    fn diff_parameters(
        &mut self,
        old: &[Entry<'a>],
        new: &[Entry<'a>],
        owner: &str,
        context: &ChangeContext,
    ) -> Vec<Change> {
        if self.options.detect_reorders {
            if let Some(change) = reorder(old, new, owner, context) {
                return vec![change];
            }
        }

        let mut changes = Vec::new();
        for index in 0..old.len().max(new.len()) {
            match (old.get(index), new.get(index)) {
                (Some(&o), Some(&n)) => {
                    if o.node.name != n.node.name {
                        let old_path = join(Some(owner), &o.node.name);
                        let descriptor =
                            ChangeDescriptor::presence(Target::Parameter, Action::Renamed)
                                .with_impact(Impact::Equivalent);
                        let explanation = explain::parameter_renamed(&old_path, &n.node.name);
                        changes.push(
                            Change::new(descriptor, old_path, NodeKind::Parameter, context.clone())
                                .with_nodes(Some(o.id), Some(n.id))
                                .with_explanation(explanation),
                        );
                    }
                    let path = join(Some(owner), &n.node.name);
                    changes.extend(self.diff_pair(o, n, &path, context));
                }
                (Some(&o), None) => changes.push(removed_change(o, Some(owner), context)),
                (None, Some(&n)) => changes.push(added_change(n, Some(owner), context)),
                (None, None) => {}
            }
        }
        changes
    }
}

// =============================================================================
// Change Constructors
// =============================================================================

fn removed_change(entry: Entry<'_>, owner: Option<&str>, context: &ChangeContext) -> Change {
    let target = target_for(entry.node.kind, context);
    let path = join(owner, &entry.node.name);
    let descriptor =
        ChangeDescriptor::presence(target, Action::Removed).with_impact(Impact::Unrelated);
    let explanation = explain::removed(target, &path);
    Change::new(descriptor, path, entry.node.kind, context.clone())
        .with_nodes(Some(entry.id), None)
        .with_explanation(explanation)
}

/// Additions widen the surface, except members a caller or implementer must
/// now supply.
fn added_change(entry: Entry<'_>, owner: Option<&str>, context: &ChangeContext) -> Change {
    let node = entry.node;
    let target = target_for(node.kind, context);
    let path = join(owner, &node.name);
    let mut descriptor = ChangeDescriptor::presence(target, Action::Added);

    let supplied_by_user = matches!(
        node.kind,
        NodeKind::Parameter | NodeKind::Property | NodeKind::TypeParameter
    );
    descriptor = if context.depth > 0 && supplied_by_user {
        if node.is_optional() {
            let descriptor = descriptor
                .with_impact(Impact::Widening)
                .with_tag(tags::OPTIONAL);
            if node.default_value().is_some() {
                descriptor.with_tag(tags::HAS_DEFAULT)
            } else {
                descriptor
            }
        } else {
            descriptor
                .with_impact(Impact::Narrowing)
                .with_tag(tags::REQUIRED)
        }
    } else {
        descriptor.with_impact(Impact::Widening)
    };

    let explanation = explain::added(&descriptor, &path);
    Change::new(descriptor, path, node.kind, context.clone())
        .with_nodes(None, Some(entry.id))
        .with_explanation(explanation)
}

/// A single change standing for a parameter list that was only permuted.
fn reorder(
    old: &[Entry<'_>],
    new: &[Entry<'_>],
    owner: &str,
    context: &ChangeContext,
) -> Option<Change> {
    if old.len() < 2 || old.len() != new.len() {
        return None;
    }
    let old_keys: Vec<_> = old.iter().map(param_key).collect();
    let new_keys: Vec<_> = new.iter().map(param_key).collect();
    if old_keys == new_keys {
        return None;
    }
    let mut old_sorted = old_keys.clone();
    let mut new_sorted = new_keys.clone();
    old_sorted.sort();
    new_sorted.sort();
    if old_sorted != new_sorted {
        return None;
    }

    let before: Vec<&str> = old_keys.iter().map(|(name, _)| *name).collect();
    let after: Vec<&str> = new_keys.iter().map(|(name, _)| *name).collect();
    let path = format!("{owner}.@params");
    let descriptor = ChangeDescriptor::presence(Target::Parameter, Action::Reordered)
        .with_impact(Impact::Unrelated);
    let explanation = explain::reordered(owner, &before, &after);
    Some(
        Change::new(descriptor, path, NodeKind::Parameter, context.clone())
            .with_explanation(explanation),
    )
}

/// Synthetic owner for nested mode when only members changed.
fn members_changed(
    old: Entry<'_>,
    new: Entry<'_>,
    path: &str,
    context: &ChangeContext,
    members: &[Change],
) -> Change {
    let target = target_for(new.node.kind, context);
    let impact = Impact::combine(members.iter().filter_map(|c| c.descriptor.impact()));
    let descriptor = ChangeDescriptor::modified(target, Aspect::Type)
        .with_impact(impact)
        .with_tag(tags::MEMBERS_CHANGED);
    let explanation = explain::members_changed(&descriptor, path, members.len());
    Change::new(descriptor, path, new.node.kind, context.clone())
        .with_nodes(Some(old.id), Some(new.id))
        .with_explanation(explanation)
}
