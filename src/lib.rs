//! semrel - API surface diffing and semantic-version classification
//!
//! This crate re-exports all layers of semrel for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: semrel_runtime    - CLI, logging, serialization
//! Layer 3: semrel_engine     - Rule matching, policies, policy builder
//! Layer 2: semrel_diff       - Structural differ, type compatibility
//!          semrel_dsl        - Intent / pattern / dimensional rule DSL
//! Layer 1: semrel_model      - Declaration model arena, type expressions
//! Layer 0: semrel_foundation - Release types, change descriptors, errors
//! ```

pub use semrel_diff as diff;
pub use semrel_dsl as dsl;
pub use semrel_engine as engine;
pub use semrel_foundation as foundation;
pub use semrel_model as model;
pub use semrel_runtime as runtime;
