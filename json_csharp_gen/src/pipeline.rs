//! The end-to-end run: read input, obtain a schema, generate C#, write files.

use crate::codegen;
use crate::confirm::ConfirmOverwrite;
use crate::error::JsonCsharpGenError;
use crate::infer;
use crate::load;
use crate::schema::JsonSchema;
use crate::settings::{DEFAULT_NAMESPACE, GenerateSettings, InferSettings, JsonLibrary};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// How the input document is turned into a schema.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SchemaSource {
    /// Load a declared schema when the text carries `$schema`, infer otherwise.
    #[default]
    Auto,
    /// Always load a declared schema.
    Declared,
}

/// Everything one run needs, as collected from the command line.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub namespace: String,
    pub force: bool,
    /// Also write `<input-stem>.schema.json` next to the generated file.
    pub emit_schema: bool,
    pub source: SchemaSource,
    pub json_library: JsonLibrary,
    pub detect_formats: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            force: false,
            emit_schema: false,
            source: SchemaSource::Auto,
            json_library: JsonLibrary::default(),
            detect_formats: true,
        }
    }
}

/// Generated C# source and, when requested, the schema it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    pub code: String,
    pub schema_json: Option<String>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Absolute paths of every file written, generated source first.
    pub written: Vec<PathBuf>,
    pub elapsed: Duration,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Generated")?;
        for (index, path) in self.written.iter().enumerate() {
            let separator: &str = if index == 0 { " " } else { ", " };
            write!(f, "{separator}{}", path.display())?;
        }
        write!(f, " in {:.3}s", self.elapsed.as_secs_f64())
    }
}

/// Fails with `MissingInput` when no input path was given.
///
/// # Errors
///
/// Returns `MissingInput` for `None` or an empty path.
pub fn resolve_input(input: Option<&Path>) -> Result<&Path, JsonCsharpGenError> {
    match input {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => Err(JsonCsharpGenError::MissingInput),
    }
}

/// Read the input file and load or infer its schema.
///
/// # Errors
///
/// Returns `IoError` if the file cannot be read, and any loading or inference error.
pub fn obtain_schema(
    input: &Path,
    source: SchemaSource,
    infer_settings: &InferSettings,
) -> Result<JsonSchema, JsonCsharpGenError> {
    let text: String = std::fs::read_to_string(input)?;
    let declared: bool = match source {
        SchemaSource::Declared => true,
        SchemaSource::Auto => load::has_schema_marker(&text),
    };
    tracing::debug!(input = %input.display(), declared, "obtaining schema");
    if declared {
        load::load_declared_schema(&text)
    } else {
        infer::infer_schema_from_samples(&text, infer_settings)
    }
}

/// Generate C# for `schema`, plus its pretty-printed JSON when `emit_schema` is set.
///
/// # Errors
///
/// Returns any code generation or serialization error.
pub fn generate_artifact(
    schema: &JsonSchema,
    settings: &GenerateSettings,
    emit_schema: bool,
) -> Result<GeneratedArtifact, JsonCsharpGenError> {
    let mut code: Vec<u8> = Vec::new();
    codegen::generate_to_writer(schema, &mut code, settings)?;
    let code: String = String::from_utf8(code)
        .map_err(|e| JsonCsharpGenError::GenericError(format!("generated code is not UTF-8: {e}")))?;
    let schema_json: Option<String> = if emit_schema {
        Some(serde_json::to_string_pretty(schema)?)
    } else {
        None
    };
    Ok(GeneratedArtifact { code, schema_json })
}

fn input_stem(input: &Path) -> Result<String, JsonCsharpGenError> {
    input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            JsonCsharpGenError::GenericError(format!(
                "Cannot derive a file name from {}",
                input.display()
            ))
        })
}

/// Absolute output path: `output` if given, else `<input-stem>.cs` in `cwd`.
/// Relative paths are taken relative to `cwd`.
///
/// # Errors
///
/// Returns `GenericError` if the input has no file stem, `IoError` if the path
/// cannot be made absolute.
pub fn resolve_output(
    output: Option<&Path>,
    input: &Path,
    cwd: &Path,
) -> Result<PathBuf, JsonCsharpGenError> {
    let target: PathBuf = match output {
        Some(path) => cwd.join(path),
        None => cwd.join(format!("{}.cs", input_stem(input)?)),
    };
    Ok(std::path::absolute(target)?)
}

/// Refuse to replace an existing `target` unless `force` is set or `confirm` agrees.
///
/// # Errors
///
/// Returns `OverwriteDeclined` on an explicit decline and `IoError` if asking fails.
pub fn check_overwrite(
    target: &Path,
    force: bool,
    confirm: &mut dyn ConfirmOverwrite,
) -> Result<(), JsonCsharpGenError> {
    if force || !target.exists() {
        return Ok(());
    }
    tracing::warn!(path = %target.display(), "output file already exists");
    if confirm.confirm_overwrite(target)? {
        Ok(())
    } else {
        Err(JsonCsharpGenError::OverwriteDeclined(target.to_path_buf()))
    }
}

/// Path of the schema file written alongside `target`.
#[must_use]
pub fn schema_output_path(target: &Path, stem: &str) -> PathBuf {
    target.with_file_name(format!("{stem}.schema.json"))
}

/// Write the generated code to `target`, and the schema next to it when present.
/// Returns every path written.
///
/// # Errors
///
/// Returns `IoError` if a file cannot be written.
pub fn write_artifact(
    artifact: &GeneratedArtifact,
    target: &Path,
    stem: &str,
) -> Result<Vec<PathBuf>, JsonCsharpGenError> {
    std::fs::write(target, &artifact.code)?;
    tracing::debug!(path = %target.display(), bytes = artifact.code.len(), "wrote generated code");
    let mut written: Vec<PathBuf> = vec![target.to_path_buf()];

    if let Some(ref schema_json) = artifact.schema_json {
        let schema_path: PathBuf = schema_output_path(target, stem);
        std::fs::write(&schema_path, schema_json)?;
        tracing::debug!(path = %schema_path.display(), "wrote schema");
        written.push(schema_path);
    }
    Ok(written)
}

/// Run the whole pipeline. `cwd` anchors the default and relative output paths.
///
/// # Errors
///
/// Returns the first error of any stage; nothing after it runs.
pub fn run(
    options: &PipelineOptions,
    confirm: &mut dyn ConfirmOverwrite,
    cwd: &Path,
) -> Result<Report, JsonCsharpGenError> {
    let started: Instant = Instant::now();

    let input: &Path = resolve_input(options.input.as_deref())?;
    let stem: String = input_stem(input)?;

    let infer_settings = InferSettings {
        detect_formats: options.detect_formats,
    };
    let schema: JsonSchema = obtain_schema(input, options.source, &infer_settings)?;

    let settings = GenerateSettings {
        namespace: options.namespace.clone(),
        root_type_name: Some(stem.clone()),
        generate_data_annotations: false,
        json_library: options.json_library,
    };
    let artifact: GeneratedArtifact = generate_artifact(&schema, &settings, options.emit_schema)?;

    let target: PathBuf = resolve_output(options.output.as_deref(), input, cwd)?;
    check_overwrite(&target, options.force, confirm)?;
    let written: Vec<PathBuf> = write_artifact(&artifact, &target, &stem)?;

    let report = Report {
        written,
        elapsed: started.elapsed(),
    };
    tracing::info!(files = report.written.len(), elapsed_s = report.elapsed.as_secs_f64(), "done");
    Ok(report)
}
