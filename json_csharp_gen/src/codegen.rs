use crate::error::JsonCsharpGenError;
use crate::json_pointer;
use crate::schema::{JsonSchema, TypeKeyword};
use crate::settings::{GenerateSettings, JsonLibrary};
use heck::ToUpperCamelCase;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::io::Write;

/// C# type of a generated property.
#[derive(Debug, Clone, PartialEq, Eq)]
enum CsType {
    /// Built-in or framework type. `value_type` marks structs, which need `?` to hold null.
    Builtin {
        name: &'static str,
        value_type: bool,
    },
    Class(String),
    Enum(String),
    Collection(Box<CsType>),
    Dictionary(Box<CsType>),
    Object,
}

const STRING: CsType = CsType::Builtin {
    name: "string",
    value_type: false,
};
const BOOL: CsType = CsType::Builtin {
    name: "bool",
    value_type: true,
};
const INT: CsType = CsType::Builtin {
    name: "int",
    value_type: true,
};
const LONG: CsType = CsType::Builtin {
    name: "long",
    value_type: true,
};

impl CsType {
    fn render(&self) -> String {
        match self {
            Self::Builtin { name, .. } => (*name).to_string(),
            Self::Class(name) | Self::Enum(name) => name.clone(),
            Self::Collection(item) => format!(
                "System.Collections.Generic.ICollection<{}>",
                item.render()
            ),
            Self::Dictionary(value) => format!(
                "System.Collections.Generic.IDictionary<string, {}>",
                value.render()
            ),
            Self::Object => "object".to_string(),
        }
    }

    fn is_value_type(&self) -> bool {
        match self {
            Self::Builtin { value_type, .. } => *value_type,
            Self::Enum(_) => true,
            _ => false,
        }
    }

    /// Initializer for a required property so it never starts out null.
    fn required_initializer(&self) -> Option<String> {
        match self {
            Self::Collection(item) => Some(format!(
                "new System.Collections.ObjectModel.Collection<{}>()",
                item.render()
            )),
            Self::Dictionary(value) => Some(format!(
                "new System.Collections.Generic.Dictionary<string, {}>()",
                value.render()
            )),
            Self::Class(name) => Some(format!("new {name}()")),
            _ => None,
        }
    }

    /// Generated class this type is built from, if any.
    fn referenced_class(&self) -> Option<&str> {
        match self {
            Self::Class(name) => Some(name),
            Self::Collection(inner) | Self::Dictionary(inner) => inner.referenced_class(),
            _ => None,
        }
    }
}

/// Represents a class to be emitted, with its properties.
struct ClassDef {
    name: String,
    properties: Vec<PropertyDef>,
    extension_data: bool,
    description: Option<String>,
}

/// Represents an enum to be emitted, with its members (`cs_name`, `json_value`).
struct EnumDef {
    name: String,
    variants: Vec<(String, String)>,
    description: Option<String>,
}

struct PropertyDef {
    name: String,
    json_key: String,
    cs_type: CsType,
    required: bool,
    nullable: bool,
    initializer: Option<String>,
    description: Option<String>,
    annotations: Vec<String>,
}

impl PropertyDef {
    fn type_text(&self) -> String {
        let base: String = self.cs_type.render();
        if self.cs_type.is_value_type() && (!self.required || self.nullable) {
            format!("{base}?")
        } else {
            base
        }
    }
}

/// Normalize description: trim and treat empty/whitespace as None.
fn normalize_description(s: Option<&String>) -> Option<String> {
    s.as_ref().and_then(|t| {
        let trimmed: &str = t.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Keep only characters valid in a C# identifier; prefix `_` when it would start with a digit.
fn sanitize_identifier(pascal: &str, fallback: &str) -> String {
    let cleaned: String = pascal
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if cleaned.is_empty() {
        fallback.to_string()
    } else if cleaned.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{cleaned}")
    } else {
        cleaned
    }
}

/// Convert a title or property key to a C# type name (`PascalCase`).
/// Examples: `"The Widget_Settings Schema"` -> `"TheWidgetSettingsSchema"`, `"home-address"` -> `"HomeAddress"`
fn to_type_name(s: &str) -> String {
    sanitize_identifier(&s.to_upper_camel_case(), "Anonymous")
}

/// Convert a JSON property key to a C# property name (`PascalCase`).
fn to_member_name(key: &str) -> String {
    sanitize_identifier(&key.to_upper_camel_case(), "Property")
}

/// Type name from the schema `title`, else from the caller's hint.
fn type_name_for(schema: &JsonSchema, hint: &str) -> String {
    schema
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map_or_else(|| to_type_name(hint), to_type_name)
}

/// Convert a JSON enum value to a C# enum member name (`PascalCase`).
/// First char uppercase, rest lowercase per word. Empty values become `Empty`;
/// values starting with a digit get a `_` prefix.
fn to_variant_name(s: &str) -> String {
    let base: String = s
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars: std::str::Chars<'_> = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect();
    if base.is_empty() {
        "Empty".to_string()
    } else if base.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{base}")
    } else {
        base
    }
}

/// Build enum members from JSON Schema enum values: sort, deduplicate, handle collisions.
/// Returns `Vec<(cs_name, json_value)>`.
fn build_enum_variants(enum_values: &[String]) -> Vec<(String, String)> {
    let mut unique: Vec<String> = enum_values.to_vec();
    unique.sort();
    unique.dedup();

    let base_names: Vec<String> = unique.iter().map(|s| to_variant_name(s)).collect();
    let mut name_counts: BTreeMap<&str, usize> = BTreeMap::new();
    for base in &base_names {
        *name_counts.entry(base.as_str()).or_insert(0) += 1;
    }

    let mut next_index: BTreeMap<&str, usize> = BTreeMap::new();
    unique
        .iter()
        .zip(base_names.iter())
        .map(|(json_val, base_name)| {
            let cs_name: String = if name_counts.get(base_name.as_str()).copied().unwrap_or(0) > 1 {
                let idx: &mut usize = next_index.entry(base_name.as_str()).or_insert(0);
                let name: String = format!("{base_name}_{idx}");
                *idx += 1;
                name
            } else {
                base_name.clone()
            };
            (cs_name, json_val.clone())
        })
        .collect()
}

fn string_type(format: Option<&str>) -> CsType {
    let lower: Option<String> = format.map(str::to_ascii_lowercase);
    let (name, value_type): (&'static str, bool) = match lower.as_deref() {
        Some("date-time" | "date") => ("System.DateTimeOffset", true),
        Some("time" | "duration") => ("System.TimeSpan", true),
        Some("uuid" | "guid") => ("System.Guid", true),
        Some("uri" | "uri-reference") => ("System.Uri", false),
        Some("byte" | "binary") => ("byte[]", false),
        _ => return STRING,
    };
    CsType::Builtin { name, value_type }
}

/// `long` for `int64` or when `minimum`, `maximum` or `default` leave the 32-bit
/// range; `int` otherwise.
fn integer_type(schema: &JsonSchema) -> CsType {
    if schema.format.as_deref() == Some("int64") {
        return LONG;
    }
    let beyond_int32 = |bound: Option<&Value>| {
        bound
            .and_then(Value::as_f64)
            .is_some_and(|n| n < f64::from(i32::MIN) || n > f64::from(i32::MAX))
    };
    if beyond_int32(schema.minimum.as_ref())
        || beyond_int32(schema.maximum.as_ref())
        || beyond_int32(schema.default.value())
    {
        LONG
    } else {
        INT
    }
}

fn number_type(format: Option<&str>) -> CsType {
    let name: &'static str = match format {
        Some("float") => "float",
        Some("decimal") => "decimal",
        _ => "double",
    };
    CsType::Builtin {
        name,
        value_type: true,
    }
}

/// Escape a string for a regular C# string literal.
fn escape_cs_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('\t', "\\t")
}

/// Escape a string for a verbatim (`@"..."`) C# string literal.
fn escape_cs_verbatim(s: &str) -> String {
    s.replace('"', "\"\"")
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// C# literal for a property's `default`, or `None` when the value does not fit the type.
fn default_initializer(
    default_value: &Value,
    cs_type: &CsType,
    enums: &BTreeMap<String, EnumDef>,
) -> Option<String> {
    if default_value.is_null() {
        return None;
    }
    match cs_type {
        CsType::Builtin { name: "bool", .. } => default_value.as_bool().map(|b| b.to_string()),
        CsType::Builtin { name: "int", .. } => default_value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(|n| n.to_string()),
        CsType::Builtin { name: "long", .. } => default_value.as_i64().map(|n| format!("{n}L")),
        CsType::Builtin { name: "double", .. } => default_value.as_f64().map(|n| format!("{n}D")),
        CsType::Builtin { name: "float", .. } => default_value.as_f64().map(|n| format!("{n}F")),
        CsType::Builtin {
            name: "decimal", ..
        } => default_value.as_f64().map(|n| format!("{n}M")),
        CsType::Builtin { name: "string", .. } => default_value
            .as_str()
            .map(|s| format!("\"{}\"", escape_cs_string(s))),
        CsType::Enum(type_name) => {
            let json_str: &str = default_value.as_str()?;
            let (cs_name, _): &(String, String) = enums
                .get(type_name)?
                .variants
                .iter()
                .find(|(_, json_val)| json_val == json_str)?;
            Some(format!("{type_name}.{cs_name}"))
        }
        _ => None,
    }
}

/// `System.ComponentModel.DataAnnotations` attributes for a property.
fn data_annotations(schema: &JsonSchema, cs_type: &CsType, required: bool) -> Vec<String> {
    let mut annotations: Vec<String> = Vec::new();
    if required {
        annotations.push("[System.ComponentModel.DataAnnotations.Required]".to_string());
    }

    if let CsType::Builtin { name, .. } = cs_type
        && matches!(*name, "int" | "long" | "double" | "float" | "decimal")
        && (schema.minimum.is_some() || schema.maximum.is_some())
    {
        let (low, high): (&str, &str) = if *name == "int" {
            ("int.MinValue", "int.MaxValue")
        } else {
            ("double.MinValue", "double.MaxValue")
        };
        let min: String = schema
            .minimum
            .as_ref()
            .map_or_else(|| low.to_string(), Value::to_string);
        let max: String = schema
            .maximum
            .as_ref()
            .map_or_else(|| high.to_string(), Value::to_string);
        annotations.push(format!(
            "[System.ComponentModel.DataAnnotations.Range({min}, {max})]"
        ));
    }

    if *cs_type == STRING {
        match (schema.min_length, schema.max_length) {
            (Some(min), Some(max)) if min > 0 => annotations.push(format!(
                "[System.ComponentModel.DataAnnotations.StringLength({max}, MinimumLength = {min})]"
            )),
            (_, Some(max)) => annotations.push(format!(
                "[System.ComponentModel.DataAnnotations.StringLength({max})]"
            )),
            (Some(min), None) => annotations.push(format!(
                "[System.ComponentModel.DataAnnotations.MinLength({min})]"
            )),
            (None, None) => {}
        }
    }

    if let Some(ref pattern) = schema.pattern {
        annotations.push(format!(
            "[System.ComponentModel.DataAnnotations.RegularExpression(@\"{}\")]",
            escape_cs_verbatim(pattern)
        ));
    }
    annotations
}

/// Whether the schema describes an object (explicitly or by having only properties).
fn is_object_kind(schema: &JsonSchema) -> bool {
    let kinds: Vec<&str> = schema
        .r#type
        .as_ref()
        .map(TypeKeyword::non_null)
        .unwrap_or_default();
    matches!(kinds.as_slice(), [] | ["object"])
}

/// Walks a schema and records every class and enum it needs.
struct TypeCollector<'a> {
    settings: &'a GenerateSettings,
    /// The whole schema document, for resolving `$ref` pointers.
    document: Value,
    classes: BTreeMap<String, ClassDef>,
    enums: BTreeMap<String, EnumDef>,
    used_names: BTreeSet<String>,
    /// Resolved `$ref` targets, keyed by reference text.
    refs: BTreeMap<String, CsType>,
    resolving: HashSet<String>,
}

impl<'a> TypeCollector<'a> {
    fn new(settings: &'a GenerateSettings, document: Value) -> Self {
        Self {
            settings,
            document,
            classes: BTreeMap::new(),
            enums: BTreeMap::new(),
            used_names: BTreeSet::new(),
            refs: BTreeMap::new(),
            resolving: HashSet::new(),
        }
    }

    /// Claims a type name, appending `2`, `3`, ... on collision.
    fn reserve_type_name(&mut self, base: &str) -> String {
        if self.used_names.insert(base.to_string()) {
            return base.to_string();
        }
        let mut n: usize = 2;
        loop {
            let candidate: String = format!("{base}{n}");
            if self.used_names.insert(candidate.clone()) {
                return candidate;
            }
            n += 1;
        }
    }

    /// `path` is the JSON Pointer of `schema` within the document.
    fn resolve_type(
        &mut self,
        schema: &JsonSchema,
        hint: &str,
        path: &str,
    ) -> Result<CsType, JsonCsharpGenError> {
        if let Some(ref reference) = schema.reference {
            return self.resolve_ref(reference);
        }
        if let Some(values) = schema.string_enum_values() {
            return Ok(self.collect_enum(schema, &values, hint));
        }

        let kinds: Vec<&str> = schema
            .r#type
            .as_ref()
            .map(TypeKeyword::non_null)
            .unwrap_or_default();
        let cs_type: CsType = match kinds.as_slice() {
            [] | ["object"] => self.object_type(schema, hint, path)?,
            ["array"] => {
                let item: CsType = match schema.items {
                    Some(ref items) => self.resolve_type(
                        items,
                        &format!("{hint}Item"),
                        &json_pointer::format(path, "items"),
                    )?,
                    None => CsType::Object,
                };
                CsType::Collection(Box::new(item))
            }
            ["string"] => string_type(schema.format.as_deref()),
            ["integer"] => integer_type(schema),
            ["number"] => number_type(schema.format.as_deref()),
            ["boolean"] => BOOL,
            several if several.iter().all(|k| matches!(*k, "integer" | "number")) => {
                number_type(None)
            }
            _ => CsType::Object,
        };
        Ok(cs_type)
    }

    fn object_type(
        &mut self,
        schema: &JsonSchema,
        hint: &str,
        path: &str,
    ) -> Result<CsType, JsonCsharpGenError> {
        if schema.has_properties() {
            // Already collected through a `$ref` pointing here.
            if let Some(known) = self.refs.get(&format!("#{path}")) {
                return Ok(known.clone());
            }
            let name: String = self.reserve_type_name(&type_name_for(schema, hint));
            self.collect_class(schema, &name, path)?;
            return Ok(CsType::Class(name));
        }
        if let Some(ap_value) = schema.additional_properties.as_ref()
            && ap_value.is_object()
        {
            let ap_schema: JsonSchema = serde_json::from_value(ap_value.clone())?;
            let value_type: CsType = self.resolve_type(
                &ap_schema,
                &format!("{hint}Value"),
                &json_pointer::format(path, "additionalProperties"),
            )?;
            return Ok(CsType::Dictionary(Box::new(value_type)));
        }
        Ok(CsType::Object)
    }

    fn collect_enum(&mut self, schema: &JsonSchema, values: &[String], hint: &str) -> CsType {
        let variants: Vec<(String, String)> = build_enum_variants(values);
        let base: String = type_name_for(schema, hint);
        if let Some(existing) = self.enums.get(&base)
            && existing.variants == variants
        {
            return CsType::Enum(base);
        }
        let name: String = self.reserve_type_name(&base);
        self.enums.insert(
            name.clone(),
            EnumDef {
                name: name.clone(),
                variants,
                description: normalize_description(schema.description.as_ref()),
            },
        );
        CsType::Enum(name)
    }

    fn resolve_ref(&mut self, reference: &str) -> Result<CsType, JsonCsharpGenError> {
        if let Some(known) = self.refs.get(reference) {
            return Ok(known.clone());
        }
        let pointer: &str = json_pointer::from_fragment(reference).ok_or_else(|| {
            JsonCsharpGenError::GenericError(format!(
                "Unsupported $ref {reference} (only local references are resolved)"
            ))
        })?;
        let target_value: Value = self.document.pointer(pointer).cloned().ok_or_else(|| {
            JsonCsharpGenError::GenericError(format!("Cannot resolve $ref {reference}"))
        })?;
        if !self.resolving.insert(reference.to_string()) {
            // Cycle through schemas that are not classes: nothing to name it after.
            return Ok(CsType::Object);
        }
        let target: JsonSchema = serde_json::from_value(target_value)?;
        let hint: String =
            json_pointer::last_segment(pointer).unwrap_or_else(|| "Anonymous".to_string());

        let resolved: CsType = if target.reference.is_none()
            && target.string_enum_values().is_none()
            && target.has_properties()
            && is_object_kind(&target)
        {
            let name: String = self.reserve_type_name(&type_name_for(&target, &hint));
            self.collect_class(&target, &name, pointer)?;
            CsType::Class(name)
        } else {
            self.resolve_type(&target, &hint, pointer)?
        };

        self.resolving.remove(reference);
        self.refs.insert(reference.to_string(), resolved.clone());
        Ok(resolved)
    }

    /// Record class `name` for the object schema at `path` and collect its properties.
    fn collect_class(
        &mut self,
        schema: &JsonSchema,
        name: &str,
        path: &str,
    ) -> Result<(), JsonCsharpGenError> {
        self.refs
            .insert(format!("#{path}"), CsType::Class(name.to_string()));
        let properties_path: String = json_pointer::format(path, "properties");

        let extension_data: bool = schema
            .additional_properties
            .as_ref()
            .is_some_and(|ap| ap.is_object() || ap.as_bool() == Some(true));

        let mut member_names: BTreeSet<String> = BTreeSet::new();
        if extension_data {
            member_names.insert("AdditionalProperties".to_string());
        }

        let mut properties: Vec<PropertyDef> = Vec::new();
        if let Some(ref props) = schema.properties {
            for (key, prop_schema) in props {
                let member: String = unique_member_name(key, name, &mut member_names);
                let cs_type: CsType = self.resolve_type(
                    prop_schema,
                    &to_type_name(key),
                    &json_pointer::format(&properties_path, key),
                )?;
                let required: bool = schema.is_required(key);
                let nullable: bool = prop_schema.is_nullable();
                let initializer: Option<String> = prop_schema
                    .default
                    .value()
                    .and_then(|v| default_initializer(v, &cs_type, &self.enums))
                    .or_else(|| {
                        if required && !nullable {
                            cs_type.required_initializer()
                        } else {
                            None
                        }
                    });
                let annotations: Vec<String> = if self.settings.generate_data_annotations {
                    data_annotations(prop_schema, &cs_type, required && !nullable)
                } else {
                    Vec::new()
                };
                properties.push(PropertyDef {
                    name: member,
                    json_key: key.clone(),
                    cs_type,
                    required,
                    nullable,
                    initializer,
                    description: normalize_description(prop_schema.description.as_ref()),
                    annotations,
                });
            }
        }

        self.classes.insert(
            name.to_string(),
            ClassDef {
                name: name.to_string(),
                properties,
                extension_data,
                description: normalize_description(schema.description.as_ref()),
            },
        );
        Ok(())
    }

    /// Collect the root class and return its name. Accepts an object schema,
    /// a `$ref` to one, or an array whose items are one of those.
    fn collect_root(
        &mut self,
        schema: &JsonSchema,
        root_name: &str,
    ) -> Result<String, JsonCsharpGenError> {
        let is_array: bool = schema
            .r#type
            .as_ref()
            .is_some_and(|t| t.non_null() == ["array"]);
        let target: &JsonSchema = if is_array {
            schema
                .items
                .as_deref()
                .ok_or(JsonCsharpGenError::RootNotObject)?
        } else {
            schema
        };

        if let Some(ref reference) = target.reference {
            return match self.resolve_ref(reference)? {
                CsType::Class(name) => Ok(name),
                _ => Err(JsonCsharpGenError::RootNotObject),
            };
        }
        if !is_object_kind(target) || target.string_enum_values().is_some() {
            return Err(JsonCsharpGenError::RootNotObject);
        }
        if !target.has_properties() {
            return Err(JsonCsharpGenError::NothingToGenerate);
        }

        let name: String = self.reserve_type_name(root_name);
        let path: &str = if is_array { "/items" } else { "" };
        self.collect_class(target, &name, path)?;
        Ok(name)
    }

    /// Collect every entry of `definitions` and `$defs`, referenced or not.
    fn collect_definitions(&mut self, schema: &JsonSchema) -> Result<(), JsonCsharpGenError> {
        for (container, definitions) in [("/definitions", &schema.definitions), ("/$defs", &schema.defs)] {
            let Some(definitions) = definitions else {
                continue;
            };
            for key in definitions.keys() {
                let reference: String = format!("#{}", json_pointer::format(container, key));
                self.resolve_ref(&reference)?;
            }
        }
        Ok(())
    }
}

/// Property name unique within its class and different from the class name.
fn unique_member_name(key: &str, class_name: &str, taken: &mut BTreeSet<String>) -> String {
    let mut base: String = to_member_name(key);
    if base == class_name {
        base.push_str("Property");
    }
    if taken.insert(base.clone()) {
        return base;
    }
    let mut n: usize = 2;
    loop {
        let candidate: String = format!("{base}{n}");
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

/// Each segment must be a C# identifier.
fn validate_namespace(namespace: &str) -> Result<(), JsonCsharpGenError> {
    let valid: bool = namespace.split('.').all(|segment| {
        segment
            .chars()
            .next()
            .is_some_and(|c| c.is_alphabetic() || c == '_')
            && segment.chars().all(|c| c.is_alphanumeric() || c == '_')
    });
    if valid {
        Ok(())
    } else {
        Err(JsonCsharpGenError::GenericError(format!(
            "Invalid C# namespace \"{namespace}\""
        )))
    }
}

fn json_property_attribute(library: JsonLibrary, property: &PropertyDef) -> String {
    let key: String = escape_cs_string(&property.json_key);
    match library {
        JsonLibrary::SystemTextJson => {
            format!("[System.Text.Json.Serialization.JsonPropertyName(\"{key}\")]")
        }
        JsonLibrary::NewtonsoftJson => {
            let handling: &str = match (property.required, property.nullable) {
                (true, false) => "Required = Newtonsoft.Json.Required.Always",
                (true, true) => "Required = Newtonsoft.Json.Required.AllowNull",
                (false, _) => "NullValueHandling = Newtonsoft.Json.NullValueHandling.Ignore",
            };
            format!("[Newtonsoft.Json.JsonProperty(\"{key}\", {handling})]")
        }
    }
}

fn enum_converter_attribute(library: JsonLibrary) -> &'static str {
    match library {
        JsonLibrary::SystemTextJson => {
            "[System.Text.Json.Serialization.JsonConverter(typeof(System.Text.Json.Serialization.JsonStringEnumConverter))]"
        }
        JsonLibrary::NewtonsoftJson => {
            "[Newtonsoft.Json.JsonConverter(typeof(Newtonsoft.Json.Converters.StringEnumConverter))]"
        }
    }
}

fn extension_data_attribute(library: JsonLibrary) -> &'static str {
    match library {
        JsonLibrary::SystemTextJson => "[System.Text.Json.Serialization.JsonExtensionData]",
        JsonLibrary::NewtonsoftJson => "[Newtonsoft.Json.JsonExtensionData]",
    }
}

/// Emit an XML doc comment from a description.
/// `indent` is prepended to each line (4 spaces for types, 8 for members).
fn emit_doc_comment<W: Write>(
    writer: &mut W,
    description: Option<&str>,
    indent: &str,
) -> std::io::Result<()> {
    let Some(desc) = description else {
        return Ok(());
    };
    writeln!(writer, "{indent}/// <summary>")?;
    for line in desc.lines() {
        let line: &str = line.trim_end();
        if line.is_empty() {
            writeln!(writer, "{indent}///")?;
        } else {
            writeln!(writer, "{indent}/// {}", escape_xml(line))?;
        }
    }
    writeln!(writer, "{indent}/// </summary>")?;
    Ok(())
}

/// Emit a single enum to the writer.
fn emit_enum<W: Write>(enum_def: &EnumDef, writer: &mut W) -> std::io::Result<()> {
    emit_doc_comment(writer, enum_def.description.as_deref(), "    ")?;
    writeln!(writer, "    public enum {}", enum_def.name)?;
    writeln!(writer, "    {{")?;
    for (index, (cs_name, json_value)) in enum_def.variants.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        writeln!(
            writer,
            "        [System.Runtime.Serialization.EnumMember(Value = @\"{}\")]",
            escape_cs_verbatim(json_value)
        )?;
        writeln!(writer, "        {cs_name} = {index},")?;
    }
    writeln!(writer, "    }}")?;
    Ok(())
}

fn emit_property<W: Write>(
    property: &PropertyDef,
    library: JsonLibrary,
    writer: &mut W,
) -> std::io::Result<()> {
    emit_doc_comment(writer, property.description.as_deref(), "        ")?;
    writeln!(writer, "        {}", json_property_attribute(library, property))?;
    if matches!(property.cs_type, CsType::Enum(_)) {
        writeln!(writer, "        {}", enum_converter_attribute(library))?;
    }
    for annotation in &property.annotations {
        writeln!(writer, "        {annotation}")?;
    }
    let type_text: String = property.type_text();
    match property.initializer {
        Some(ref init) => writeln!(
            writer,
            "        public {type_text} {} {{ get; set; }} = {init};",
            property.name
        ),
        None => writeln!(
            writer,
            "        public {type_text} {} {{ get; set; }}",
            property.name
        ),
    }
}

/// Emit a single class to the writer.
fn emit_class<W: Write>(
    class_def: &ClassDef,
    library: JsonLibrary,
    writer: &mut W,
) -> std::io::Result<()> {
    emit_doc_comment(writer, class_def.description.as_deref(), "    ")?;
    writeln!(writer, "    public partial class {}", class_def.name)?;
    writeln!(writer, "    {{")?;
    for (index, property) in class_def.properties.iter().enumerate() {
        if index > 0 {
            writeln!(writer)?;
        }
        emit_property(property, library, writer)?;
    }
    if class_def.extension_data {
        if !class_def.properties.is_empty() {
            writeln!(writer)?;
        }
        writeln!(writer, "        {}", extension_data_attribute(library))?;
        writeln!(
            writer,
            "        public System.Collections.Generic.IDictionary<string, object> AdditionalProperties {{ get; set; }} = new System.Collections.Generic.Dictionary<string, object>();"
        )?;
    }
    writeln!(writer, "    }}")?;
    Ok(())
}

/// Determine emission order: nested classes before the classes that use them.
fn emission_order(class_defs: &BTreeMap<String, ClassDef>, root_name: &str) -> Vec<String> {
    fn visit(
        name: &str,
        class_defs: &BTreeMap<String, ClassDef>,
        order: &mut Vec<String>,
        visited: &mut HashSet<String>,
    ) {
        if !visited.insert(name.to_string()) {
            return;
        }
        if let Some(def) = class_defs.get(name) {
            for property in &def.properties {
                if let Some(nested) = property.cs_type.referenced_class()
                    && class_defs.contains_key(nested)
                {
                    visit(nested, class_defs, order, visited);
                }
            }
        }
        order.push(name.to_string());
    }

    let mut order: Vec<String> = Vec::new();
    let mut visited: HashSet<String> = HashSet::new();

    visit(root_name, class_defs, &mut order, &mut visited);

    // Definitions nobody references.
    for name in class_defs.keys() {
        visit(name, class_defs, &mut order, &mut visited);
    }

    order
}

/// Root class name: `title` of the root object (or of the items of a root array),
/// then `settings.root_type_name`, then `Root`.
fn root_type_name(schema: &JsonSchema, settings: &GenerateSettings) -> String {
    let item_title: Option<&str> = schema.items.as_ref().and_then(|i| i.title.as_deref());
    [
        schema.title.as_deref(),
        item_title,
        settings.root_type_name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .map(to_type_name)
    .find(|name| name != "Anonymous")
    .unwrap_or_else(|| "Root".to_string())
}

/// Generate C# model classes from a JSON Schema and write them to `writer`.
pub fn generate_to_writer<W: Write>(
    schema: &JsonSchema,
    writer: &mut W,
    settings: &GenerateSettings,
) -> Result<(), JsonCsharpGenError> {
    validate_namespace(&settings.namespace)?;

    let root_name: String = root_type_name(schema, settings);
    let mut collector = TypeCollector::new(settings, serde_json::to_value(schema)?);
    let root_class: String = collector.collect_root(schema, &root_name)?;
    collector.collect_definitions(schema)?;

    if collector.classes.is_empty() {
        return Err(JsonCsharpGenError::NothingToGenerate);
    }
    tracing::debug!(
        classes = collector.classes.len(),
        enums = collector.enums.len(),
        root = %root_class,
        "collected types"
    );

    writeln!(writer, "//----------------------")?;
    writeln!(writer, "// <auto-generated>")?;
    writeln!(
        writer,
        "//     Generated by json-csharp-gen. Do not edit manually."
    )?;
    writeln!(writer, "// </auto-generated>")?;
    writeln!(writer, "//----------------------")?;
    writeln!(writer)?;
    writeln!(writer, "namespace {}", settings.namespace)?;
    writeln!(writer, "{{")?;

    // Enums first (alphabetically), then classes (nested before parents)
    let mut first: bool = true;
    for enum_def in collector.enums.values() {
        if !first {
            writeln!(writer)?;
        }
        first = false;
        emit_enum(enum_def, writer)?;
    }
    for name in emission_order(&collector.classes, &root_class) {
        if let Some(class_def) = collector.classes.get(&name) {
            if !first {
                writeln!(writer)?;
            }
            first = false;
            emit_class(class_def, settings.json_library, writer)?;
        }
    }

    writeln!(writer, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(schema_json: &str, settings: &GenerateSettings) -> String {
        let schema: JsonSchema = serde_json::from_str(schema_json).expect("valid schema");
        let mut output: Vec<u8> = Vec::new();
        generate_to_writer(&schema, &mut output, settings)
            .expect("generate_to_writer should succeed");
        String::from_utf8(output).expect("output should be valid UTF-8")
    }

    fn generate_err(schema_json: &str, settings: &GenerateSettings) -> JsonCsharpGenError {
        let schema: JsonSchema = serde_json::from_str(schema_json).expect("valid schema");
        let mut output: Vec<u8> = Vec::new();
        generate_to_writer(&schema, &mut output, settings).unwrap_err()
    }

    #[test]
    fn to_type_name_sanitizes_spaces() {
        let actual: String = to_type_name("The Widget Schema");
        let expected: &str = "TheWidgetSchema";
        assert_eq!(expected, actual);
    }

    #[test]
    fn to_type_name_sanitizes_underscores_and_spaces() {
        let actual: String = to_type_name("The Foo_Bar Schema");
        let expected: &str = "TheFooBarSchema";
        assert_eq!(expected, actual);
    }

    #[test]
    fn to_type_name_with_hyphens() {
        let actual: String = to_type_name("foo-bar-baz");
        let expected: &str = "FooBarBaz";
        assert_eq!(expected, actual);
    }

    #[test]
    fn to_type_name_falls_back_when_nothing_usable() {
        assert_eq!("Anonymous", to_type_name("$$$"));
    }

    #[test]
    fn to_member_name_snake_case_key() {
        assert_eq!("FirstName", to_member_name("first_name"));
    }

    #[test]
    fn to_variant_name_hyphenated() {
        let actual: String = to_variant_name("blackjack-a");
        let expected: &str = "BlackjackA";
        assert_eq!(expected, actual);
    }

    #[test]
    fn to_variant_name_numeric_prefix_gets_underscore() {
        let actual: String = to_variant_name("123");
        let expected: &str = "_123";
        assert_eq!(expected, actual);
    }

    #[test]
    fn to_variant_name_empty_value() {
        assert_eq!("Empty", to_variant_name(""));
    }

    #[test]
    fn to_variant_name_uppercase() {
        let actual: String = to_variant_name("PENDING");
        let expected: &str = "Pending";
        assert_eq!(expected, actual);
    }

    #[test]
    fn build_enum_variants_duplicate_deduplicates() {
        let input: Vec<String> = vec!["a".to_string(), "a".to_string()];
        let actual: Vec<(String, String)> = build_enum_variants(&input);
        let expected: Vec<(String, String)> = vec![("A".to_string(), "a".to_string())];
        assert_eq!(
            expected, actual,
            "duplicate JSON enum values must deduplicate to one member"
        );
    }

    #[test]
    fn build_enum_variants_collision_disambiguates() {
        let input: Vec<String> = vec![
            "PENDING".to_string(),
            "pending".to_string(),
            "Pending".to_string(),
        ];
        let actual: Vec<(String, String)> = build_enum_variants(&input);
        let expected: Vec<(String, String)> = vec![
            ("Pending_0".to_string(), "PENDING".to_string()),
            ("Pending_1".to_string(), "Pending".to_string()),
            ("Pending_2".to_string(), "pending".to_string()),
        ];
        assert_eq!(
            expected, actual,
            "member name collision must produce Pending_0, Pending_1, Pending_2 with correct values"
        );
    }

    #[test]
    fn integer_type_widens_to_long() {
        let int64: JsonSchema =
            serde_json::from_str(r#"{ "type": "integer", "format": "int64" }"#).expect("valid");
        let wide: JsonSchema =
            serde_json::from_str(r#"{ "type": "integer", "maximum": 4294967295 }"#).expect("valid");
        let narrow: JsonSchema =
            serde_json::from_str(r#"{ "type": "integer", "minimum": -5, "maximum": 5 }"#)
                .expect("valid");
        assert_eq!(LONG, integer_type(&int64));
        assert_eq!(LONG, integer_type(&wide));
        assert_eq!(INT, integer_type(&narrow));
    }

    #[test]
    fn string_formats_map_to_framework_types() {
        assert_eq!("System.DateTimeOffset", string_type(Some("date-time")).render());
        assert_eq!("System.Guid", string_type(Some("UUID")).render());
        assert_eq!("System.Uri", string_type(Some("uri")).render());
        assert_eq!("System.TimeSpan", string_type(Some("time")).render());
        assert_eq!("string", string_type(Some("email")).render());
        assert_eq!("string", string_type(None).render());
    }

    #[test]
    fn generate_schema_with_spaces_in_title() {
        let schema_json: &str = r#"{
            "title": "WidgetFile",
            "type": "object",
            "properties": {
                "widget": {
                    "title": "The Widget Schema",
                    "type": "object",
                    "properties": {
                        "owner": { "type": "string" },
                        "name": { "type": "string" },
                        "version": { "type": "string" }
                    }
                }
            }
        }"#;

        let expected: &str = r#"//----------------------
// <auto-generated>
//     Generated by json-csharp-gen. Do not edit manually.
// </auto-generated>
//----------------------

namespace DefaultNameSpace
{
    public partial class TheWidgetSchema
    {
        [System.Text.Json.Serialization.JsonPropertyName("name")]
        public string Name { get; set; }

        [System.Text.Json.Serialization.JsonPropertyName("owner")]
        public string Owner { get; set; }

        [System.Text.Json.Serialization.JsonPropertyName("version")]
        public string Version { get; set; }
    }

    public partial class WidgetFile
    {
        [System.Text.Json.Serialization.JsonPropertyName("widget")]
        public TheWidgetSchema Widget { get; set; }
    }
}
"#;

        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_value_types_nullable_unless_required() {
        let schema_json: &str = r#"{
            "type": "object",
            "title": "Mixed",
            "required": ["count"],
            "properties": {
                "count": { "type": "integer" },
                "ratio": { "type": "number" },
                "flag": { "type": ["boolean", "null"] }
            }
        }"#;

        let expected: &str = r#"//----------------------
// <auto-generated>
//     Generated by json-csharp-gen. Do not edit manually.
// </auto-generated>
//----------------------

namespace DefaultNameSpace
{
    public partial class Mixed
    {
        [System.Text.Json.Serialization.JsonPropertyName("count")]
        public int Count { get; set; }

        [System.Text.Json.Serialization.JsonPropertyName("flag")]
        public bool? Flag { get; set; }

        [System.Text.Json.Serialization.JsonPropertyName("ratio")]
        public double? Ratio { get; set; }
    }
}
"#;

        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_enum_with_default_newtonsoft() {
        let schema_json: &str = r#"{
            "type": "object",
            "title": "Order",
            "description": "An order.",
            "required": ["status"],
            "properties": {
                "status": {
                    "type": "string",
                    "enum": ["shipped", "pending"],
                    "default": "pending",
                    "description": "Current status."
                }
            }
        }"#;

        let expected: &str = r#"//----------------------
// <auto-generated>
//     Generated by json-csharp-gen. Do not edit manually.
// </auto-generated>
//----------------------

namespace Shop.Models
{
    /// <summary>
    /// Current status.
    /// </summary>
    public enum Status
    {
        [System.Runtime.Serialization.EnumMember(Value = @"pending")]
        Pending = 0,

        [System.Runtime.Serialization.EnumMember(Value = @"shipped")]
        Shipped = 1,
    }

    /// <summary>
    /// An order.
    /// </summary>
    public partial class Order
    {
        /// <summary>
        /// Current status.
        /// </summary>
        [Newtonsoft.Json.JsonProperty("status", Required = Newtonsoft.Json.Required.Always)]
        [Newtonsoft.Json.JsonConverter(typeof(Newtonsoft.Json.Converters.StringEnumConverter))]
        public Status Status { get; set; } = Status.Pending;
    }
}
"#;

        let settings = GenerateSettings {
            namespace: "Shop.Models".to_string(),
            json_library: JsonLibrary::NewtonsoftJson,
            ..GenerateSettings::default()
        };
        let actual: String = generate(schema_json, &settings);
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_arrays_dictionaries_and_formats() {
        let schema_json: &str = r#"{
            "type": "object",
            "title": "Catalog",
            "required": ["items"],
            "properties": {
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": { "sku": { "type": "string", "format": "uuid" } }
                    }
                },
                "prices": { "type": "object", "additionalProperties": { "type": "number" } },
                "updated": { "type": "string", "format": "date-time" }
            }
        }"#;

        let expected: &str = r#"//----------------------
// <auto-generated>
//     Generated by json-csharp-gen. Do not edit manually.
// </auto-generated>
//----------------------

namespace DefaultNameSpace
{
    public partial class ItemsItem
    {
        [System.Text.Json.Serialization.JsonPropertyName("sku")]
        public System.Guid? Sku { get; set; }
    }

    public partial class Catalog
    {
        [System.Text.Json.Serialization.JsonPropertyName("items")]
        public System.Collections.Generic.ICollection<ItemsItem> Items { get; set; } = new System.Collections.ObjectModel.Collection<ItemsItem>();

        [System.Text.Json.Serialization.JsonPropertyName("prices")]
        public System.Collections.Generic.IDictionary<string, double> Prices { get; set; }

        [System.Text.Json.Serialization.JsonPropertyName("updated")]
        public System.DateTimeOffset? Updated { get; set; }
    }
}
"#;

        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert_eq!(expected, actual, "expected output to match exactly");
    }

    #[test]
    fn generate_default_initializers() {
        let schema_json: &str = r#"{
            "type": "object",
            "title": "Defaults",
            "properties": {
                "n": { "type": "integer", "default": 5 },
                "r": { "type": "number", "default": 0.5 },
                "s": { "type": "string", "default": "a\"b" },
                "b": { "type": "boolean", "default": true },
                "z": { "type": "string", "default": null }
            }
        }"#;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert!(actual.contains("public bool? B { get; set; } = true;"));
        assert!(actual.contains("public int? N { get; set; } = 5;"));
        assert!(actual.contains("public double? R { get; set; } = 0.5D;"));
        assert!(actual.contains(r#"public string S { get; set; } = "a\"b";"#));
        assert!(actual.contains("public string Z { get; set; }\n"));
    }

    #[test]
    fn generate_refs_share_one_class() {
        let schema_json: &str = r##"{
            "type": "object",
            "title": "Person",
            "properties": {
                "home": { "$ref": "#/definitions/Address" },
                "work": { "$ref": "#/definitions/Address" }
            },
            "definitions": {
                "Address": { "type": "object", "properties": { "street": { "type": "string" } } },
                "Unused": { "type": "object", "properties": { "x": { "type": "integer" } } }
            }
        }"##;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert_eq!(1, actual.matches("public partial class Address").count());
        assert!(actual.contains("public Address Home { get; set; }"));
        assert!(actual.contains("public Address Work { get; set; }"));
        assert!(
            actual.contains("public partial class Unused"),
            "unreferenced definitions are still generated"
        );
    }

    #[test]
    fn generate_recursive_root_ref() {
        let schema_json: &str = r##"{
            "title": "Node",
            "type": "object",
            "properties": {
                "children": { "type": "array", "items": { "$ref": "#" } }
            }
        }"##;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert_eq!(1, actual.matches("public partial class").count());
        assert!(
            actual.contains("public System.Collections.Generic.ICollection<Node> Children { get; set; }")
        );
    }

    #[test]
    fn generate_root_ref_to_definition() {
        let schema_json: &str = r##"{
            "$ref": "#/$defs/Invoice",
            "$defs": {
                "Invoice": { "type": "object", "properties": { "total": { "type": "number" } } }
            }
        }"##;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert!(actual.contains("public partial class Invoice"));
        assert!(actual.contains("public double? Total { get; set; }"));
    }

    #[test]
    fn generate_colliding_titles_get_suffix() {
        let schema_json: &str = r#"{
            "type": "object",
            "title": "Root",
            "properties": {
                "a": { "type": "object", "title": "Info", "properties": { "x": { "type": "string" } } },
                "b": { "type": "object", "title": "Info", "properties": { "y": { "type": "string" } } }
            }
        }"#;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert!(actual.contains("public Info A { get; set; }"));
        assert!(actual.contains("public partial class Info2"));
        assert!(actual.contains("public Info2 B { get; set; }"));
    }

    #[test]
    fn generate_member_named_like_class_gets_suffix() {
        let schema_json: &str = r#"{
            "title": "Item",
            "type": "object",
            "properties": { "item": { "type": "string" } }
        }"#;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert!(actual.contains("[System.Text.Json.Serialization.JsonPropertyName(\"item\")]"));
        assert!(actual.contains("public string ItemProperty { get; set; }"));
    }

    #[test]
    fn generate_root_name_from_settings() {
        let settings = GenerateSettings {
            root_type_name: Some("person".to_string()),
            ..GenerateSettings::default()
        };
        let actual: String = generate(
            r#"{ "type": "object", "properties": { "id": { "type": "integer" } } }"#,
            &settings,
        );
        assert!(actual.contains("public partial class Person"));
    }

    #[test]
    fn generate_root_array_of_objects() {
        let actual: String = generate(
            r#"{ "type": "array", "items": { "type": "object", "properties": { "id": { "type": "integer" } } } }"#,
            &GenerateSettings::default(),
        );
        assert!(actual.contains("public partial class Root"));
        assert!(actual.contains("public int? Id { get; set; }"));
    }

    #[test]
    fn generate_extension_data_for_open_objects() {
        let actual: String = generate(
            r#"{ "type": "object", "title": "Open", "properties": { "a": { "type": "string" } }, "additionalProperties": true }"#,
            &GenerateSettings::default(),
        );
        assert!(actual.contains("        [System.Text.Json.Serialization.JsonExtensionData]\n"));
        assert!(actual.contains(
            "public System.Collections.Generic.IDictionary<string, object> AdditionalProperties { get; set; }"
        ));
    }

    #[test]
    fn generate_data_annotations_when_enabled() {
        let schema_json: &str = r#"{
            "type": "object",
            "title": "Bounded",
            "required": ["name"],
            "properties": {
                "name": { "type": "string", "minLength": 1, "maxLength": 50, "pattern": "^[a-z]+$" },
                "age": { "type": "integer", "minimum": 0, "maximum": 150 }
            }
        }"#;
        let settings = GenerateSettings {
            generate_data_annotations: true,
            ..GenerateSettings::default()
        };
        let actual: String = generate(schema_json, &settings);
        assert!(actual.contains("[System.ComponentModel.DataAnnotations.Range(0, 150)]"));
        assert!(actual.contains("[System.ComponentModel.DataAnnotations.Required]"));
        assert!(actual.contains(
            "[System.ComponentModel.DataAnnotations.StringLength(50, MinimumLength = 1)]"
        ));
        assert!(actual.contains(
            r#"[System.ComponentModel.DataAnnotations.RegularExpression(@"^[a-z]+$")]"#
        ));

        let without: String = generate(schema_json, &GenerateSettings::default());
        assert!(!without.contains("DataAnnotations"));
    }

    #[test]
    fn generate_rejects_non_object_root() {
        let err = generate_err(r#"{ "type": "string" }"#, &GenerateSettings::default());
        assert!(matches!(err, JsonCsharpGenError::RootNotObject));
    }

    #[test]
    fn generate_rejects_empty_root_object() {
        let err = generate_err(r#"{ "type": "object" }"#, &GenerateSettings::default());
        assert!(matches!(err, JsonCsharpGenError::NothingToGenerate));
    }

    #[test]
    fn generate_rejects_invalid_namespace() {
        let settings = GenerateSettings {
            namespace: "My Namespace".to_string(),
            ..GenerateSettings::default()
        };
        let err = generate_err(
            r#"{ "type": "object", "properties": { "a": { "type": "string" } } }"#,
            &settings,
        );
        assert!(matches!(err, JsonCsharpGenError::GenericError(_)));
    }

    #[test]
    fn integer_default_beyond_int32_widens_to_long() {
        let actual: String = generate(
            r#"{ "type": "object", "properties": { "n": { "type": "integer", "default": 3000000000 } } }"#,
            &GenerateSettings::default(),
        );
        assert!(actual.contains("public long? N { get; set; } = 3000000000L;"));
    }

    #[test]
    fn integer_default_that_does_not_fit_int_is_dropped() {
        let schema_json: &str = r##"{
            "type": "object",
            "properties": {
                "n": { "$ref": "#/definitions/Small", "default": 3000000000 }
            },
            "definitions": { "Small": { "type": "integer", "maximum": 10 } }
        }"##;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert!(actual.contains("public int? N { get; set; }\n"));
        assert!(!actual.contains("3000000000"));
    }

    #[test]
    fn ref_to_earlier_inline_property_reuses_class() {
        let schema_json: &str = r##"{
            "type": "object",
            "title": "Root",
            "properties": {
                "a": { "type": "object", "properties": { "x": { "type": "string" } } },
                "b": { "$ref": "#/properties/a" }
            }
        }"##;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert_eq!(1, actual.matches("public partial class A\n").count());
        assert!(!actual.contains("class A2"));
        assert!(actual.contains("public A A { get; set; }"));
        assert!(actual.contains("public A B { get; set; }"));
    }

    #[test]
    fn ref_to_later_inline_property_reuses_class() {
        let schema_json: &str = r##"{
            "type": "object",
            "title": "Root",
            "properties": {
                "first": { "$ref": "#/properties/second" },
                "second": { "type": "object", "properties": { "y": { "type": "integer" } } }
            }
        }"##;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert_eq!(2, actual.matches("public partial class").count());
        assert!(!actual.contains("class Second2"));
        assert!(actual.contains("public Second First { get; set; }"));
        assert!(actual.contains("public Second Second { get; set; }"));
    }

    #[test]
    fn ref_into_unmodeled_container_resolves() {
        let schema_json: &str = r##"{
            "type": "object",
            "title": "Envelope",
            "properties": { "body": { "$ref": "#/components/Payload" } },
            "components": {
                "Payload": { "type": "object", "properties": { "size": { "type": "integer" } } }
            }
        }"##;
        let actual: String = generate(schema_json, &GenerateSettings::default());
        assert!(actual.contains("public partial class Payload"));
        assert!(actual.contains("public Payload Body { get; set; }"));
    }
}
