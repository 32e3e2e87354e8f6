//! Three-level rule DSL for semrel.
//!
//! This crate provides:
//! - [`Rule`] - Intent phrases, pattern templates, and dimensional rules
//! - [`parse_intent`] - Intent → Pattern via the phrase catalog
//! - [`compile_pattern`] - Pattern → Dimensional
//! - [`decompile_to_pattern`] - Dimensional → Pattern with confidence scoring
//! - [`synthesize_intent`] - Pattern → Intent with confidence scoring
//! - [`convert()`] - Moves any rule between levels

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod catalog;
pub mod compiler;
pub mod convert;
pub mod decompiler;
pub mod intent;
pub mod rule;
pub mod synthesizer;
pub mod tokenizer;

pub use compiler::{CompileResult, compile_pattern};
pub use convert::{Conversion, convert, convert_with, to_dimensional};
pub use decompiler::{
    ConfidenceWeights, DecompileConfig, DecompileResult, PatternAlternative, decompile_to_pattern,
    decompile_with,
};
pub use intent::{IntentParseResult, parse_intent};
pub use rule::{
    DimensionalRule, IntentRule, PatternRule, PatternVariable, Rule, RuleLevel, VariableKind,
};
pub use synthesizer::{IntentAlternative, SynthesisResult, synthesize_intent};
pub use tokenizer::{PhraseToken, PhraseTokenizer};
