//! Loading a declared JSON Schema document.

use crate::error::JsonCsharpGenError;
use crate::schema::JsonSchema;
use crate::validate;

/// Text that marks a document as a declared schema rather than sample data.
pub const SCHEMA_MARKER: &str = "$schema";

/// Whether the text declares itself a JSON Schema.
#[must_use]
pub fn has_schema_marker(text: &str) -> bool {
    text.contains(SCHEMA_MARKER)
}

/// Parse and structurally validate a declared JSON Schema.
///
/// # Errors
///
/// Returns `MalformedJson` if the text is not JSON, and `InvalidSchema` with
/// every structural issue if the document is not a usable schema.
pub fn load_declared_schema(schema_json: &str) -> Result<JsonSchema, JsonCsharpGenError> {
    let document: serde_json::Value = serde_json::from_str(schema_json)?;
    validate::validate_schema(&document)?;
    let schema: JsonSchema = serde_json::from_value(document)?;
    tracing::debug!(
        schema_uri = schema.schema_uri.as_deref().unwrap_or("<none>"),
        "loaded declared schema"
    );
    Ok(schema)
}
