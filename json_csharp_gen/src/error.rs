use std::error;
use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status reported for every failure: `-1` as the operating system sees it.
pub const FAILURE_EXIT_CODE: u8 = 255;

/// Error type for schema loading, inference, code generation, and output handling.
#[derive(Debug)]
pub enum JsonCsharpGenError {
    /// No input path was given.
    MissingInput,

    /// The input text is not valid JSON (or not a valid schema document shape).
    MalformedJson(serde_json::Error),

    /// The sample text contained no JSON value to infer from.
    NoSamples,

    /// The declared schema failed structural validation.
    InvalidSchema(SchemaValidationError),

    /// The root schema does not describe an object (or an array of objects).
    RootNotObject,

    /// The root object has no properties to turn into a class.
    NothingToGenerate,

    /// The output file exists and the user declined to overwrite it.
    OverwriteDeclined(PathBuf),

    /// I/O error (e.g., reading the input file, writing an output file).
    IoError(std::io::Error),

    /// Generic error with a message.
    GenericError(String),
}

impl JsonCsharpGenError {
    /// Process exit code for this error. Every failure is fatal and maps to `-1`.
    #[must_use]
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::MissingInput
            | Self::MalformedJson(_)
            | Self::NoSamples
            | Self::InvalidSchema(_)
            | Self::RootNotObject
            | Self::NothingToGenerate
            | Self::OverwriteDeclined(_)
            | Self::IoError(_)
            | Self::GenericError(_) => ExitCode::from(FAILURE_EXIT_CODE),
        }
    }
}

impl error::Error for JsonCsharpGenError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::MalformedJson(json_error) => Some(json_error),
            Self::IoError(io_error) => Some(io_error),
            Self::InvalidSchema(validation_error) => Some(validation_error),
            _ => None,
        }
    }
}

impl fmt::Display for JsonCsharpGenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput => write!(f, "No input file given (use --input <path>)"),
            Self::MalformedJson(json_error) => write!(f, "Malformed JSON: {json_error}"),
            Self::NoSamples => write!(f, "Input contains no JSON value to infer a schema from"),
            Self::InvalidSchema(validation_error) => fmt::Display::fmt(validation_error, f),
            Self::RootNotObject => write!(
                f,
                "Root schema must have type \"object\" (or be an array of objects)"
            ),
            Self::NothingToGenerate => write!(
                f,
                "No classes to generate (root object has no supported properties)"
            ),
            Self::OverwriteDeclined(path) => {
                write!(f, "Not overwriting existing file {}", path.display())
            }
            Self::GenericError(message) => write!(f, "{message}"),
            Self::IoError(io_error) => fmt::Display::fmt(io_error, f),
        }
    }
}

impl From<&str> for JsonCsharpGenError {
    fn from(message: &str) -> Self {
        Self::GenericError(message.to_string())
    }
}

impl From<String> for JsonCsharpGenError {
    fn from(message: String) -> Self {
        Self::GenericError(message)
    }
}

impl From<std::io::Error> for JsonCsharpGenError {
    fn from(io_error: std::io::Error) -> Self {
        Self::IoError(io_error)
    }
}

impl From<serde_json::Error> for JsonCsharpGenError {
    fn from(json_error: serde_json::Error) -> Self {
        Self::MalformedJson(json_error)
    }
}

impl From<SchemaValidationError> for JsonCsharpGenError {
    fn from(validation_error: SchemaValidationError) -> Self {
        Self::InvalidSchema(validation_error)
    }
}

/// A single structural problem found in a declared schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationIssue {
    /// JSON Pointer (RFC 6901) to the offending keyword; empty for the root.
    pub path: String,
    pub kind: SchemaValidationIssueKind,
}

/// What is wrong at a [`SchemaValidationIssue::path`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaValidationIssueKind {
    RootNotObject,
    InvalidTypeValue,
    UnknownType(String),
    InvalidPropertiesFormat,
    InvalidDefinitionsFormat,
    SchemaNotObject,
    InvalidRequiredFormat,
    InvalidEnumFormat,
    EnumEmpty,
    InvalidItemsFormat,
    InvalidAdditionalProperties,
    InvalidMinimumMaximum,
    InvalidLength,
    InvalidPattern,
    InvalidRefFormat,
    UnresolvableRef(String),
}

impl fmt::Display for SchemaValidationIssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootNotObject => write!(f, "schema document must be a JSON object"),
            Self::InvalidTypeValue => {
                write!(f, "\"type\" must be a string or an array of strings")
            }
            Self::UnknownType(ty) => write!(f, "unknown type \"{ty}\""),
            Self::InvalidPropertiesFormat => write!(f, "\"properties\" must be an object"),
            Self::InvalidDefinitionsFormat => write!(f, "definitions must be an object"),
            Self::SchemaNotObject => write!(f, "subschema must be an object"),
            Self::InvalidRequiredFormat => {
                write!(f, "\"required\" must be an array of strings")
            }
            Self::InvalidEnumFormat => write!(f, "\"enum\" must be an array"),
            Self::EnumEmpty => write!(f, "\"enum\" must not be empty"),
            Self::InvalidItemsFormat => write!(f, "\"items\" must be a schema object"),
            Self::InvalidAdditionalProperties => write!(
                f,
                "\"additionalProperties\" must be a boolean or a schema object"
            ),
            Self::InvalidMinimumMaximum => write!(f, "bound must be a number"),
            Self::InvalidLength => write!(f, "length must be a non-negative integer"),
            Self::InvalidPattern => write!(f, "\"pattern\" is not a valid regular expression"),
            Self::InvalidRefFormat => write!(f, "\"$ref\" must be a string"),
            Self::UnresolvableRef(reference) => write!(f, "cannot resolve \"$ref\" {reference}"),
        }
    }
}

/// Every structural issue found while validating a declared schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaValidationError {
    pub issues: Vec<SchemaValidationIssue>,
}

impl error::Error for SchemaValidationError {}

impl fmt::Display for SchemaValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid JSON Schema ({} issue(s))", self.issues.len())?;
        for issue in &self.issues {
            let path: &str = if issue.path.is_empty() {
                "/"
            } else {
                &issue.path
            };
            write!(f, "\n  {path}: {}", issue.kind)?;
        }
        Ok(())
    }
}
