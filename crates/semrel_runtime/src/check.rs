//! The diff-and-classify pipeline behind `semrel check`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use semrel_diff::{Change, DiffOptions, DiffResult, diff_against_baseline};
use semrel_engine::{Classification, ClassificationReport, Policy, classify_all};
use semrel_foundation::{Error, ErrorKind, ReleaseType, Result};
use semrel_model::{DeclarationModel, DeclarationParser};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::parser::JsonModelParser;
use crate::serialize::{from_bytes, load_model, load_policy};

/// Inputs to a check run.
#[derive(Clone, Debug, Default)]
pub struct CheckRequest {
    /// Previous version; `None` means there is no baseline.
    pub old: Option<PathBuf>,
    /// Current version.
    pub new: PathBuf,
    /// Policy file; the standard policy when `None`.
    pub policy: Option<PathBuf>,
    /// Differ settings.
    pub options: DiffOptions,
}

/// Everything a check run produced.
#[derive(Clone, Debug, Serialize)]
pub struct CheckOutcome {
    /// Name of the policy applied.
    pub policy: String,
    /// Structural changes and diagnostics.
    pub diff: DiffResult,
    /// Verdicts, parallel to `diff.changes`.
    pub report: ClassificationReport,
}

impl CheckOutcome {
    /// Returns true if the release may proceed.
    ///
    /// Fails on a blocking verdict, or when `expected` is given and the
    /// overall verdict exceeds it.
    #[must_use]
    pub fn passes(&self, expected: Option<ReleaseType>) -> bool {
        !self.report.is_blocking() && expected.is_none_or(|e| !self.report.exceeds(e))
    }

    /// One line per change, then diagnostics, then the overall verdict.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (change, classification) in self.diff.changes.iter().zip(&self.report.classifications) {
            render_change(&mut out, change, classification, 0);
        }
        for diagnostic in &self.diff.diagnostics {
            let _ = writeln!(out, "{diagnostic}");
        }
        if !self.diff.baseline {
            let _ = writeln!(out, "note: no baseline, every export counts as added");
        }
        let _ = writeln!(out, "overall: {} (policy {})", self.report.overall, self.policy);
        out
    }
}

fn render_change(out: &mut String, change: &Change, classification: &Classification, depth: usize) {
    let rule = classification.rule_description.as_deref().unwrap_or("default");
    let explanation = if change.explanation.is_empty() {
        change.descriptor.to_string()
    } else {
        change.explanation.clone()
    };
    let _ = writeln!(
        out,
        "{:indent$}{:<9} {}: {explanation} [{rule}]",
        "",
        classification.release_type.as_str(),
        change.path,
        indent = depth * 2,
    );
    for (nested, verdict) in change.nested.iter().zip(&classification.nested) {
        render_change(out, nested, verdict, depth + 1);
    }
}

/// Diffs two models and classifies the result.
#[must_use]
pub fn check(
    old: Option<&DeclarationModel>,
    new: &DeclarationModel,
    policy: &Policy,
    options: &DiffOptions,
) -> CheckOutcome {
    let diff = diff_against_baseline(old, new, options);
    let report = classify_all(&diff.changes, policy);
    info!(
        changes = diff.total_changes(),
        overall = %report.overall,
        "check complete"
    );
    CheckOutcome {
        policy: policy.name().to_string(),
        diff,
        report,
    }
}

/// Loads the inputs named by `request` and runs [`check`].
///
/// An old version that cannot be decoded is treated as no baseline.
///
/// # Errors
///
/// Returns an error if a file cannot be read, the new model cannot be
/// decoded, or the policy is invalid.
pub fn run_check(request: &CheckRequest) -> Result<CheckOutcome> {
    let new = load_model(&request.new)?;
    let old = match &request.old {
        Some(path) => load_baseline(path)?,
        None => None,
    };
    let policy = match &request.policy {
        Some(path) => load_policy(path)?,
        None => Policy::standard(),
    };
    debug!(policy = policy.name(), baseline = old.is_some(), "running check");
    Ok(check(old.as_ref(), &new, &policy, &request.options))
}

fn load_baseline(path: &Path) -> Result<Option<DeclarationModel>> {
    let bytes = std::fs::read(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;
    let is_json = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let baseline = if is_json {
        JsonModelParser
            .parse(&String::from_utf8_lossy(&bytes))
            .into_baseline()
    } else {
        from_bytes(&bytes).ok()
    };
    if baseline.is_none() {
        warn!(path = %path.display(), "old version is unparseable, comparing without a baseline");
    }
    Ok(baseline)
}
