//! Configuration for the structural differ.

/// Controls how two declaration models are compared.
#[derive(Clone, Debug, PartialEq)]
pub struct DiffOptions {
    /// Attach member changes under their owner instead of flattening.
    pub nested: bool,

    /// Pair removals with additions of the same kind as renames.
    pub detect_renames: bool,

    /// Minimum similarity score for a rename pairing.
    pub rename_threshold: f64,

    /// Weight of name similarity in the rename score.
    pub name_weight: f64,

    /// Weight of signature similarity in the rename score.
    pub signature_weight: f64,

    /// Report permuted parameter lists as a single reorder.
    pub detect_reorders: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            nested: false,
            detect_renames: true,
            rename_threshold: 0.8,
            name_weight: 0.5,
            signature_weight: 0.5,
            detect_reorders: true,
        }
    }
}

impl DiffOptions {
    /// Flat output with rename and reorder detection (the default).
    #[must_use]
    pub fn flat() -> Self {
        Self::default()
    }

    /// Member changes nested under their owning export.
    #[must_use]
    pub fn nested() -> Self {
        Self {
            nested: true,
            ..Self::default()
        }
    }

    /// No heuristics: every removal and addition is reported as such.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            detect_renames: false,
            detect_reorders: false,
            ..Self::default()
        }
    }

    /// Builder method to enable/disable nesting.
    #[must_use]
    pub fn with_nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }

    /// Builder method to enable/disable rename detection.
    #[must_use]
    pub fn with_rename_detection(mut self, enabled: bool) -> Self {
        self.detect_renames = enabled;
        self
    }

    /// Builder method to set the rename threshold, clamped to `[0, 1]`.
    #[must_use]
    pub fn with_rename_threshold(mut self, threshold: f64) -> Self {
        self.rename_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set the rename score weights.
    ///
    /// Weights are normalized so they sum to one; two zero weights fall back
    /// to an even split.
    #[must_use]
    pub fn with_rename_weights(mut self, name: f64, signature: f64) -> Self {
        let name = name.max(0.0);
        let signature = signature.max(0.0);
        let total = name + signature;
        if total > 0.0 {
            self.name_weight = name / total;
            self.signature_weight = signature / total;
        } else {
            self.name_weight = 0.5;
            self.signature_weight = 0.5;
        }
        self
    }

    /// Builder method to enable/disable reorder detection.
    #[must_use]
    pub fn with_reorder_detection(mut self, enabled: bool) -> Self {
        self.detect_reorders = enabled;
        self
    }
}
