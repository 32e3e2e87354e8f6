//! Integration tests for Layer 1: Model
//!
//! Tests for the declaration arena, the fluent builder, and type expressions.

mod builder;
mod type_expr;
