//! Integration tests for Layer 3: Rule DSL
//!
//! Tests for intent parsing, pattern compilation, and the scored upward
//! conversions between rule levels.

mod compile;
mod intents;
mod roundtrip;
