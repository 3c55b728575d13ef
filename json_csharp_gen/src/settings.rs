//! Settings for schema inference and C# code generation.

/// Namespace used when none is given.
pub const DEFAULT_NAMESPACE: &str = "DefaultNameSpace";

/// Which serializer's attributes are emitted on generated properties.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum JsonLibrary {
    /// `System.Text.Json.Serialization` attributes.
    #[default]
    SystemTextJson,
    /// `Newtonsoft.Json` attributes.
    NewtonsoftJson,
}

/// Settings that control code generation behavior.
#[derive(Debug, Clone)]
pub struct GenerateSettings {
    /// C# namespace wrapping every generated type.
    pub namespace: String,

    /// Name of the root class when the schema has no `title`.
    /// Falls back to `Root` when unset.
    pub root_type_name: Option<String>,

    /// When true, emit `System.ComponentModel.DataAnnotations` attributes
    /// (`Required`, `Range`, `StringLength`, `RegularExpression`).
    ///
    /// **Default: false.** The command-line tools never enable it.
    pub generate_data_annotations: bool,

    /// Serializer whose attributes (`JsonPropertyName` or `JsonProperty`, enum
    /// converters, extension data) decorate the generated members.
    pub json_library: JsonLibrary,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
            root_type_name: None,
            generate_data_annotations: false,
            json_library: JsonLibrary::default(),
        }
    }
}

/// Settings for inferring a schema from sample JSON values.
#[derive(Debug, Clone)]
pub struct InferSettings {
    /// Recognize `date-time`, `date`, `time`, `uuid` and `uri` strings and
    /// record them as the property's `format`.
    pub detect_formats: bool,
}

impl Default for InferSettings {
    fn default() -> Self {
        Self {
            detect_formats: true,
        }
    }
}
