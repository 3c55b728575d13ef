//! Structural validation of declared JSON Schema documents.
//!
//! Walks the raw JSON Schema (as `serde_json::Value`) and collects all
//! malformed keywords without panicking. Unknown keywords are ignored: only
//! the shape of the keywords the generator reads is checked.

use crate::error::{SchemaValidationError, SchemaValidationIssue, SchemaValidationIssueKind};
use crate::json_pointer;
use serde_json::Value;

/// Type names accepted in the `type` keyword.
const KNOWN_TYPES: &[&str] = &[
    "string", "integer", "number", "boolean", "object", "array", "null",
];

/// Validates the schema (parsed as Value). Returns Ok(()) if no issues, or
/// Err(SchemaValidationError) with all collected issues.
///
/// # Errors
///
/// Returns every structural issue found, each tagged with a JSON Pointer path.
pub fn validate_schema(document: &Value) -> Result<(), SchemaValidationError> {
    let mut issues: Vec<SchemaValidationIssue> = Vec::new();

    if document.is_object() {
        collect_validation_issues(document, "", document, &mut issues);
    } else {
        push_issue(&mut issues, "", SchemaValidationIssueKind::RootNotObject);
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(SchemaValidationError { issues })
    }
}

fn push_issue(
    issues: &mut Vec<SchemaValidationIssue>,
    path: &str,
    kind: SchemaValidationIssueKind,
) {
    issues.push(SchemaValidationIssue {
        path: path.to_string(),
        kind,
    });
}

fn collect_validation_issues(
    value: &Value,
    path: &str,
    document: &Value,
    issues: &mut Vec<SchemaValidationIssue>,
) {
    let Some(obj) = value.as_object() else {
        push_issue(issues, path, SchemaValidationIssueKind::SchemaNotObject);
        return;
    };

    for (key, val) in obj {
        let key_path: String = json_pointer::format(path, key);
        match key.as_str() {
            "type" => validate_type(val, &key_path, issues),
            "properties" => {
                validate_schema_map(
                    val,
                    &key_path,
                    document,
                    issues,
                    SchemaValidationIssueKind::InvalidPropertiesFormat,
                );
            }
            "definitions" | "$defs" => {
                validate_schema_map(
                    val,
                    &key_path,
                    document,
                    issues,
                    SchemaValidationIssueKind::InvalidDefinitionsFormat,
                );
            }
            "required" => validate_required(val, &key_path, issues),
            "enum" => validate_enum(val, &key_path, issues),
            "items" => {
                if val.is_object() {
                    collect_validation_issues(val, &key_path, document, issues);
                } else {
                    push_issue(issues, &key_path, SchemaValidationIssueKind::InvalidItemsFormat);
                }
            }
            "additionalProperties" => {
                validate_additional_properties(val, &key_path, document, issues);
            }
            "minimum" | "maximum" => validate_min_max(val, &key_path, issues),
            "minLength" | "maxLength" => {
                if !val.is_u64() {
                    push_issue(issues, &key_path, SchemaValidationIssueKind::InvalidLength);
                }
            }
            "pattern" => validate_pattern(val, &key_path, issues),
            "$ref" => validate_ref(val, &key_path, document, issues),
            _ => {}
        }
    }
}

fn validate_type(value: &Value, path: &str, issues: &mut Vec<SchemaValidationIssue>) {
    let names: Vec<&Value> = match value {
        Value::String(_) => vec![value],
        Value::Array(arr) => arr.iter().collect(),
        _ => {
            push_issue(issues, path, SchemaValidationIssueKind::InvalidTypeValue);
            return;
        }
    };
    for name in names {
        match name.as_str() {
            Some(ty) if KNOWN_TYPES.contains(&ty) => {}
            Some(ty) => push_issue(
                issues,
                path,
                SchemaValidationIssueKind::UnknownType(ty.to_string()),
            ),
            None => {
                push_issue(issues, path, SchemaValidationIssueKind::InvalidTypeValue);
                return;
            }
        }
    }
}

fn validate_schema_map(
    value: &Value,
    path: &str,
    document: &Value,
    issues: &mut Vec<SchemaValidationIssue>,
    not_object: SchemaValidationIssueKind,
) {
    let Some(map) = value.as_object() else {
        push_issue(issues, path, not_object);
        return;
    };
    for (name, schema) in map {
        let schema_path: String = json_pointer::format(path, name);
        collect_validation_issues(schema, &schema_path, document, issues);
    }
}

fn validate_required(value: &Value, path: &str, issues: &mut Vec<SchemaValidationIssue>) {
    let all_strings: bool = value
        .as_array()
        .is_some_and(|arr| arr.iter().all(Value::is_string));
    if !all_strings {
        push_issue(issues, path, SchemaValidationIssueKind::InvalidRequiredFormat);
    }
}

fn validate_enum(value: &Value, path: &str, issues: &mut Vec<SchemaValidationIssue>) {
    let Some(arr) = value.as_array() else {
        push_issue(issues, path, SchemaValidationIssueKind::InvalidEnumFormat);
        return;
    };
    if arr.is_empty() {
        push_issue(issues, path, SchemaValidationIssueKind::EnumEmpty);
    }
}

fn validate_additional_properties(
    value: &Value,
    path: &str,
    document: &Value,
    issues: &mut Vec<SchemaValidationIssue>,
) {
    if value.is_boolean() {
        return;
    }
    if value.is_object() {
        collect_validation_issues(value, path, document, issues);
    } else {
        push_issue(
            issues,
            path,
            SchemaValidationIssueKind::InvalidAdditionalProperties,
        );
    }
}

fn validate_min_max(value: &Value, path: &str, issues: &mut Vec<SchemaValidationIssue>) {
    if !value.is_number() {
        push_issue(
            issues,
            path,
            SchemaValidationIssueKind::InvalidMinimumMaximum,
        );
    }
}

fn validate_pattern(value: &Value, path: &str, issues: &mut Vec<SchemaValidationIssue>) {
    let compiles: bool = value
        .as_str()
        .is_some_and(|pattern| regress::Regex::new(pattern).is_ok());
    if !compiles {
        push_issue(issues, path, SchemaValidationIssueKind::InvalidPattern);
    }
}

fn validate_ref(
    value: &Value,
    path: &str,
    document: &Value,
    issues: &mut Vec<SchemaValidationIssue>,
) {
    let Some(reference) = value.as_str() else {
        push_issue(issues, path, SchemaValidationIssueKind::InvalidRefFormat);
        return;
    };
    let resolves: bool = json_pointer::from_fragment(reference)
        .is_some_and(|pointer| document.pointer(pointer).is_some_and(Value::is_object));
    if !resolves {
        push_issue(
            issues,
            path,
            SchemaValidationIssueKind::UnresolvableRef(reference.to_string()),
        );
    }
}
