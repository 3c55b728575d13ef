//! Generate C# model classes from JSON sample data or a JSON Schema.
//!
//! Sample documents are generalized into a draft-04 schema first; documents
//! that declare `$schema` are loaded as schemas directly. The schema is then
//! turned into `public partial class` definitions inside one namespace.

pub mod cli;
mod codegen;
mod confirm;
mod error;
mod infer;
mod json_pointer;
mod load;
pub mod pipeline;
mod schema;
mod settings;
mod validate;

pub use confirm::{ConfirmOverwrite, ConsoleConfirm};
pub use error::{
    FAILURE_EXIT_CODE, JsonCsharpGenError, SchemaValidationError, SchemaValidationIssue,
    SchemaValidationIssueKind,
};
pub use infer::{SchemaBuilder, infer_schema_from_samples};
pub use load::{SCHEMA_MARKER, has_schema_marker, load_declared_schema};
pub use schema::{DRAFT_04_SCHEMA_URI, DefaultKeyword, JsonSchema, TypeKeyword};
pub use settings::{DEFAULT_NAMESPACE, GenerateSettings, InferSettings, JsonLibrary};
pub use validate::validate_schema;

use std::io::Write;

/// Generate C# model classes from a schema and write them to `writer`.
///
/// The writer can be any type implementing `Write`, such as `File` or `Vec<u8>`,
/// so generation is testable without touching the file system.
///
/// # Errors
///
/// Returns `JsonCsharpGenError` if the namespace is not a C# identifier, the root is
/// not an object, there is nothing to generate, or writing fails.
pub fn generate_to_writer<W: Write>(
    schema: &JsonSchema,
    writer: &mut W,
    settings: &GenerateSettings,
) -> Result<(), JsonCsharpGenError> {
    codegen::generate_to_writer(schema, writer, settings)
}

/// Generate C# model classes from a schema into a `String`.
///
/// # Errors
///
/// Same as [`generate_to_writer`].
pub fn generate_to_string(
    schema: &JsonSchema,
    settings: &GenerateSettings,
) -> Result<String, JsonCsharpGenError> {
    let artifact: pipeline::GeneratedArtifact =
        pipeline::generate_artifact(schema, settings, false)?;
    Ok(artifact.code)
}
