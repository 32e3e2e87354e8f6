//! Model, snapshot, and policy serialization.
//!
//! Declaration models arrive from parsers as JSON. Baselines are stored as
//! `MessagePack` snapshots. Policies are JSON documents listing rules at any
//! level.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use semrel_dsl::Rule;
use semrel_engine::Policy;
use semrel_foundation::{Error, ErrorKind, ReleaseType, Result};
use semrel_model::DeclarationModel;
use serde::{Deserialize, Serialize};

// =============================================================================
// Models
// =============================================================================

/// Parses a model from parser JSON.
///
/// # Errors
///
/// Returns an error if the JSON does not describe a model.
pub fn model_from_json(json: &str) -> Result<DeclarationModel> {
    serde_json::from_str(json).map_err(serialization_error)
}

/// Renders a model as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn model_to_json(model: &DeclarationModel) -> Result<String> {
    serde_json::to_string_pretty(model).map_err(serialization_error)
}

// =============================================================================
// Snapshots
// =============================================================================

/// Serializes a model to `MessagePack` bytes.
///
/// Uses named serialization to preserve struct field names.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(model: &DeclarationModel) -> Result<Vec<u8>> {
    rmp_serde::to_vec_named(model).map_err(serialization_error)
}

/// Deserializes a model from `MessagePack` bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8]) -> Result<DeclarationModel> {
    rmp_serde::from_slice(bytes).map_err(serialization_error)
}

/// Saves a baseline snapshot, overwriting any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be written or serialization fails.
pub fn save_snapshot<P: AsRef<Path>>(model: &DeclarationModel, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| io_error("create", path, &e))?;
    let mut writer = BufWriter::new(file);
    let bytes = to_bytes(model)?;
    writer
        .write_all(&bytes)
        .map_err(|e| io_error("write to", path, &e))?;
    writer.flush().map_err(|e| io_error("flush", path, &e))?;
    Ok(())
}

/// Loads a baseline snapshot.
///
/// # Errors
///
/// Returns an error if the file cannot be read or deserialization fails.
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<DeclarationModel> {
    from_bytes(&read_file(path.as_ref())?)
}

/// Loads a model from a `.json` parser output or a `MessagePack` snapshot.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<DeclarationModel> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    if path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("json")) {
        let text = String::from_utf8(bytes).map_err(serialization_error)?;
        model_from_json(&text)
    } else {
        from_bytes(&bytes)
    }
}

// =============================================================================
// Policies
// =============================================================================

/// On-disk policy document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PolicyFile {
    /// Policy name.
    pub name: String,
    /// Release type for unmatched changes.
    #[serde(default = "default_release")]
    pub default: ReleaseType,
    /// Rules in evaluation order.
    pub rules: Vec<Rule>,
}

fn default_release() -> ReleaseType {
    ReleaseType::Patch
}

impl PolicyFile {
    /// Compiles the document into a policy.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidRule`] for the first malformed rule.
    pub fn into_policy(self) -> Result<Policy> {
        Policy::new(self.name, self.rules, self.default)
    }
}

/// Parses and compiles a JSON policy document.
///
/// # Errors
///
/// Returns an error if the JSON is malformed or a rule does not compile.
pub fn policy_from_json(json: &str) -> Result<Policy> {
    let file: PolicyFile = serde_json::from_str(json).map_err(serialization_error)?;
    file.into_policy()
}

/// Loads and compiles a JSON policy file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the policy is invalid.
pub fn load_policy<P: AsRef<Path>>(path: P) -> Result<Policy> {
    let path = path.as_ref();
    let bytes = read_file(path)?;
    let text = String::from_utf8(bytes).map_err(serialization_error)?;
    policy_from_json(&text)
}

// =============================================================================
// Helpers
// =============================================================================

fn read_file(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| io_error("open", path, &e))?;
    let mut reader = BufReader::new(file);
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| io_error("read", path, &e))?;
    Ok(bytes)
}

fn serialization_error(e: impl std::fmt::Display) -> Error {
    Error::new(ErrorKind::SerializationError(e.to_string()))
}

fn io_error(action: &str, path: &Path, e: &std::io::Error) -> Error {
    Error::new(ErrorKind::IoError(format!(
        "failed to {action} file '{}': {e}",
        path.display()
    )))
}
