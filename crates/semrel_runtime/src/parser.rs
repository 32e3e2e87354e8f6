//! Declaration parser over the JSON interchange format.
//!
//! External front ends emit models as JSON; this parser lifts that output
//! through the [`DeclarationParser`] seam so unreadable input becomes an
//! unparseable outcome rather than an error.

use semrel_model::{
    DeclarationModel, DeclarationParser, DiagnosticSeverity, ModelDiagnostic, ParseOutcome,
};
use tracing::warn;

/// Reads models serialized by an external front end.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonModelParser;

impl DeclarationParser for JsonModelParser {
    fn parse(&self, source: &str) -> ParseOutcome {
        match serde_json::from_str::<DeclarationModel>(source) {
            Ok(model) => ParseOutcome::Parsed(model),
            Err(e) => {
                warn!(error = %e, "model JSON is unparseable");
                ParseOutcome::Unparseable(vec![ModelDiagnostic::new(
                    DiagnosticSeverity::Error,
                    format!("invalid model JSON at line {} column {}: {e}", e.line(), e.column()),
                )])
            }
        }
    }
}
