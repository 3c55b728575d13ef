use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Meta-schema URI stamped on inferred schemas.
pub const DRAFT_04_SCHEMA_URI: &str = "http://json-schema.org/draft-04/schema#";

/// Wraps the JSON Schema `default` keyword to preserve `null`.
/// Serde deserializes `Option<Value>` with JSON null as `None`; we need to
/// distinguish absent key from `"default": null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DefaultKeyword {
    /// Key "default" was absent from the schema.
    #[default]
    Absent,
    /// Key "default" was present; the value may be `Value::Null`.
    Present(serde_json::Value),
}

impl DefaultKeyword {
    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub fn value(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Absent => None,
            Self::Present(v) => Some(v),
        }
    }
}

impl<'de> Deserialize<'de> for DefaultKeyword {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let v: serde_json::Value = Deserialize::deserialize(deserializer)?;
        Ok(DefaultKeyword::Present(v))
    }
}

impl Serialize for DefaultKeyword {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Absent => serializer.serialize_none(),
            Self::Present(v) => v.serialize(serializer),
        }
    }
}

/// The `type` keyword: a single type name or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeKeyword {
    Single(String),
    Union(Vec<String>),
}

impl TypeKeyword {
    /// All type names, in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        match self {
            Self::Single(name) => vec![name.as_str()],
            Self::Union(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// Type names other than `"null"`.
    #[must_use]
    pub fn non_null(&self) -> Vec<&str> {
        self.names().into_iter().filter(|n| *n != "null").collect()
    }

    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.names().contains(&"null")
    }
}

/// Root or nested JSON Schema object.
///
/// Only the keywords used by inference and the generator are modeled; every
/// other key lands in `extra`.
/// Uses `BTreeMap` for deterministic property ordering (alphabetical by key).
/// Serializing yields the canonical schema text written by `--schema`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonSchema {
    #[serde(default, rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema_uri: Option<String>,

    #[serde(default, rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#type: Option<TypeKeyword>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, JsonSchema>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<Vec<serde_json::Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<JsonSchema>>,

    #[serde(
        default,
        rename = "additionalProperties",
        skip_serializing_if = "Option::is_none"
    )]
    pub additional_properties: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "DefaultKeyword::is_absent")]
    pub default: DefaultKeyword,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<serde_json::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<serde_json::Value>,

    #[serde(default, rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u64>,

    #[serde(default, rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definitions: Option<BTreeMap<String, JsonSchema>>,

    #[serde(default, rename = "$defs", skip_serializing_if = "Option::is_none")]
    pub defs: Option<BTreeMap<String, JsonSchema>>,

    /// Keywords the generator does not read (`oneOf`, `const`, `$id`, ...),
    /// kept so a loaded schema serializes back unchanged.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl JsonSchema {
    /// Whether `type` lists `"null"`.
    #[must_use]
    pub fn is_nullable(&self) -> bool {
        self.r#type.as_ref().is_some_and(TypeKeyword::is_nullable)
    }

    #[must_use]
    pub fn is_required(&self, key: &str) -> bool {
        self.required
            .as_ref()
            .is_some_and(|r| r.iter().any(|k| k == key))
    }

    /// True when `properties` is present and non-empty.
    #[must_use]
    pub fn has_properties(&self) -> bool {
        self.properties.as_ref().is_some_and(|p| !p.is_empty())
    }

    /// String values of `enum`, or `None` if absent, empty, or not all strings.
    #[must_use]
    pub fn string_enum_values(&self) -> Option<Vec<String>> {
        let values: &Vec<serde_json::Value> = self.r#enum.as_ref()?;
        if values.is_empty() {
            return None;
        }
        values
            .iter()
            .map(|v| v.as_str().map(String::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_null_is_present() {
        let schema: JsonSchema =
            serde_json::from_str(r#"{ "type": "string", "default": null }"#).expect("valid");
        assert_eq!(
            DefaultKeyword::Present(serde_json::Value::Null),
            schema.default
        );
    }

    #[test]
    fn default_absent_when_key_missing() {
        let schema: JsonSchema = serde_json::from_str(r#"{ "type": "string" }"#).expect("valid");
        assert!(schema.default.is_absent());
    }

    #[test]
    fn type_union_with_null_is_nullable() {
        let schema: JsonSchema =
            serde_json::from_str(r#"{ "type": ["integer", "null"] }"#).expect("valid");
        assert!(schema.is_nullable());
        assert_eq!(
            vec!["integer"],
            schema.r#type.as_ref().expect("type").non_null()
        );
    }

    #[test]
    fn serialization_skips_absent_keywords() {
        let schema: JsonSchema = serde_json::from_str(
            r#"{ "$schema": "http://json-schema.org/draft-04/schema#", "type": "object", "properties": { "a": { "type": "string", "default": "x" } } }"#,
        )
        .expect("valid");
        let actual: serde_json::Value = serde_json::to_value(&schema).expect("serializes");
        let expected: serde_json::Value = serde_json::json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "type": "object",
            "properties": { "a": { "type": "string", "default": "x" } }
        });
        assert_eq!(expected, actual);
    }

    #[test]
    fn unmodeled_keywords_survive_round_trip() {
        let document: serde_json::Value = serde_json::json!({
            "$schema": "http://json-schema.org/draft-07/schema#",
            "$id": "https://example.com/shape.json",
            "type": "object",
            "properties": {
                "kind": { "oneOf": [{ "type": "string" }, { "type": "integer" }] },
                "n": { "type": "integer", "exclusiveMinimum": 0, "const": 3, "examples": [3] }
            },
            "x-owner": { "team": "billing" }
        });
        let schema: JsonSchema = serde_json::from_value(document.clone()).expect("valid");
        assert_eq!(
            Some(&serde_json::json!("https://example.com/shape.json")),
            schema.extra.get("$id")
        );
        let actual: serde_json::Value = serde_json::to_value(&schema).expect("serializes");
        assert_eq!(document, actual);
    }

    #[test]
    fn string_enum_values_rejects_mixed_enum() {
        let schema: JsonSchema = serde_json::from_str(r#"{ "enum": ["a", 1] }"#).expect("valid");
        assert_eq!(None, schema.string_enum_values());
        let schema: JsonSchema = serde_json::from_str(r#"{ "enum": ["b", "a"] }"#).expect("valid");
        assert_eq!(
            Some(vec!["b".to_string(), "a".to_string()]),
            schema.string_enum_values()
        );
    }
}
