//! Schema inference from sample JSON values.
//!
//! Every observed value is folded into a [`SchemaBuilder`], which tracks the
//! kinds seen at each position of the document. [`SchemaBuilder::build`] then
//! generalizes the observations into a draft-04 [`JsonSchema`].

use crate::error::JsonCsharpGenError;
use crate::schema::{DRAFT_04_SCHEMA_URI, JsonSchema, TypeKeyword};
use crate::settings::InferSettings;
use serde_json::Value;
use std::collections::BTreeMap;

const DATE_TIME_PATTERN: &str =
    r"^\d{4}-\d{2}-\d{2}[Tt ]\d{2}:\d{2}:\d{2}(\.\d+)?([Zz]|[+-]\d{2}:\d{2})?$";
const DATE_PATTERN: &str = r"^\d{4}-\d{2}-\d{2}$";
const TIME_PATTERN: &str = r"^\d{2}:\d{2}:\d{2}(\.\d+)?$";
const URI_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*://\S+$";

/// Recognizes well-known string formats.
struct FormatDetector {
    date_time: regress::Regex,
    date: regress::Regex,
    time: regress::Regex,
    uri: regress::Regex,
}

impl FormatDetector {
    fn new() -> Result<Self, JsonCsharpGenError> {
        let compile = |pattern: &str| {
            regress::Regex::new(pattern).map_err(|e| {
                JsonCsharpGenError::GenericError(format!("invalid format pattern {pattern}: {e}"))
            })
        };
        Ok(Self {
            date_time: compile(DATE_TIME_PATTERN)?,
            date: compile(DATE_PATTERN)?,
            time: compile(TIME_PATTERN)?,
            uri: compile(URI_PATTERN)?,
        })
    }

    fn detect(&self, s: &str) -> Option<&'static str> {
        if self.date_time.find(s).is_some() {
            Some("date-time")
        } else if self.date.find(s).is_some() {
            Some("date")
        } else if self.time.find(s).is_some() {
            Some("time")
        } else if s.len() == 36 && uuid::Uuid::try_parse(s).is_ok() {
            Some("uuid")
        } else if self.uri.find(s).is_some() {
            Some("uri")
        } else {
            None
        }
    }
}

/// Format agreement across every string seen at one position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormatState {
    Unseen,
    Agreed(&'static str),
    Mixed,
}

impl FormatState {
    fn observe(self, detected: Option<&'static str>) -> Self {
        match (self, detected) {
            (Self::Unseen, Some(format)) => Self::Agreed(format),
            (Self::Agreed(current), Some(format)) if current == format => self,
            _ => Self::Mixed,
        }
    }
}

/// Everything observed at one position of the sample documents.
#[derive(Debug)]
struct Shape {
    /// Number of values seen here, `null` included.
    seen: usize,
    null: bool,
    boolean: bool,
    integer: bool,
    int64: bool,
    number: bool,
    string: bool,
    format: FormatState,
    /// Element shape, present once an array was seen here.
    array: Option<Box<Shape>>,
    object: Option<ObjectShape>,
}

#[derive(Debug, Default)]
struct ObjectShape {
    samples: usize,
    properties: BTreeMap<String, Shape>,
}

impl Default for Shape {
    fn default() -> Self {
        Self {
            seen: 0,
            null: false,
            boolean: false,
            integer: false,
            int64: false,
            number: false,
            string: false,
            format: FormatState::Unseen,
            array: None,
            object: None,
        }
    }
}

impl Shape {
    fn observe(&mut self, value: &Value, formats: Option<&FormatDetector>) {
        self.seen += 1;
        match value {
            Value::Null => self.null = true,
            Value::Bool(_) => self.boolean = true,
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    self.integer = true;
                    if i32::try_from(i).is_err() {
                        self.int64 = true;
                    }
                } else if n.is_u64() {
                    self.integer = true;
                    self.int64 = true;
                } else {
                    self.number = true;
                }
            }
            Value::String(s) => {
                self.string = true;
                self.format = self.format.observe(formats.and_then(|f| f.detect(s)));
            }
            Value::Array(elements) => {
                let items: &mut Shape = self.array.get_or_insert_with(Box::default);
                for element in elements {
                    items.observe(element, formats);
                }
            }
            Value::Object(map) => {
                let object: &mut ObjectShape = self.object.get_or_insert_with(ObjectShape::default);
                object.samples += 1;
                for (key, property) in map {
                    object
                        .properties
                        .entry(key.clone())
                        .or_default()
                        .observe(property, formats);
                }
            }
        }
    }

    /// Observed kinds as JSON Schema type names, `null` excluded.
    fn kinds(&self) -> Vec<&'static str> {
        let mut kinds: Vec<&'static str> = Vec::new();
        if self.object.is_some() {
            kinds.push("object");
        }
        if self.array.is_some() {
            kinds.push("array");
        }
        if self.string {
            kinds.push("string");
        }
        if self.number {
            kinds.push("number");
        } else if self.integer {
            kinds.push("integer");
        }
        if self.boolean {
            kinds.push("boolean");
        }
        kinds
    }

    fn to_schema(&self) -> JsonSchema {
        let kinds: Vec<&'static str> = self.kinds();
        let mut schema = JsonSchema {
            r#type: type_keyword(&kinds, self.null),
            ..JsonSchema::default()
        };

        if let Some(ref object) = self.object {
            let properties: BTreeMap<String, JsonSchema> = object
                .properties
                .iter()
                .map(|(key, shape)| (key.clone(), shape.to_schema()))
                .collect();
            let required: Vec<String> = object
                .properties
                .iter()
                .filter(|(_, shape)| shape.seen == object.samples && !shape.null)
                .map(|(key, _)| key.clone())
                .collect();
            schema.properties = Some(properties);
            if !required.is_empty() {
                schema.required = Some(required);
            }
        }

        if let Some(ref items) = self.array
            && items.seen > 0
        {
            schema.items = Some(Box::new(items.to_schema()));
        }

        if kinds.len() == 1 {
            match (kinds[0], self.format) {
                ("string", FormatState::Agreed(format)) => {
                    schema.format = Some(format.to_string());
                }
                ("integer", _) if self.int64 => schema.format = Some("int64".to_string()),
                _ => {}
            }
        }

        schema
    }
}

fn type_keyword(kinds: &[&str], nullable: bool) -> Option<TypeKeyword> {
    match (kinds, nullable) {
        ([], false) => None,
        ([], true) => Some(TypeKeyword::Single("null".to_string())),
        ([kind], false) => Some(TypeKeyword::Single((*kind).to_string())),
        (_, _) => {
            let mut names: Vec<String> = kinds.iter().map(|k| (*k).to_string()).collect();
            if nullable {
                names.push("null".to_string());
            }
            Some(TypeKeyword::Union(names))
        }
    }
}

/// Accumulates sample JSON values and generalizes them into a schema.
pub struct SchemaBuilder {
    root: Shape,
    formats: Option<FormatDetector>,
}

impl SchemaBuilder {
    /// # Errors
    ///
    /// Returns `GenericError` if the built-in format patterns fail to compile.
    pub fn new(settings: &InferSettings) -> Result<Self, JsonCsharpGenError> {
        let formats: Option<FormatDetector> = if settings.detect_formats {
            Some(FormatDetector::new()?)
        } else {
            None
        };
        Ok(Self {
            root: Shape::default(),
            formats,
        })
    }

    pub fn add_value(&mut self, value: &Value) {
        self.root.observe(value, self.formats.as_ref());
    }

    /// Number of root values added so far.
    #[must_use]
    pub fn samples(&self) -> usize {
        self.root.seen
    }

    #[must_use]
    pub fn build(&self) -> JsonSchema {
        let mut schema: JsonSchema = self.root.to_schema();
        schema.schema_uri = Some(DRAFT_04_SCHEMA_URI.to_string());
        schema
    }
}

/// Infer a schema from one or more whitespace-separated JSON values.
///
/// # Errors
///
/// Returns `MalformedJson` if any value fails to parse and `NoSamples` if the
/// text holds no value at all.
pub fn infer_schema_from_samples(
    samples_json: &str,
    settings: &InferSettings,
) -> Result<JsonSchema, JsonCsharpGenError> {
    let mut builder = SchemaBuilder::new(settings)?;
    for value in serde_json::Deserializer::from_str(samples_json).into_iter::<Value>() {
        builder.add_value(&value?);
    }
    if builder.samples() == 0 {
        return Err(JsonCsharpGenError::NoSamples);
    }
    tracing::debug!(samples = builder.samples(), "inferred schema from samples");
    Ok(builder.build())
}
