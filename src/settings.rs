use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;

/// Accessor shape of generated properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum PropertyAccess {
    /// `{ get; set; }`
    #[default]
    Mutable,
    /// `{ get; init; }`
    Immutable,
    /// plain public field, no accessor block
    None,
}

/// Spelling of "sequence of T".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
pub enum ContainerStyle {
    /// `IReadOnlyList<T>`
    #[default]
    ReadOnlyList,
    /// `List<T>`
    List,
    /// `T[]`
    Array,
}

/// Every knob of one conversion. Read-only for the duration of the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConversionSettings {
    pub use_records: bool,
    /// Only meaningful with `use_records`.
    pub use_primary_constructor: bool,
    pub property_access: PropertyAccess,
    pub container_style: ContainerStyle,
    pub root_type_name: String,
    #[serde(alias = "namespace")]
    pub module_name: String,
    pub emit_serialization_attribute: bool,
    pub is_nullable: bool,
    pub is_required: bool,
    pub default_initialize: bool,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            use_records: false,
            use_primary_constructor: false,
            property_access: PropertyAccess::Mutable,
            container_style: ContainerStyle::ReadOnlyList,
            root_type_name: "Root".to_string(),
            module_name: "JsonToCsharp".to_string(),
            emit_serialization_attribute: true,
            is_nullable: false,
            is_required: false,
            default_initialize: false,
        }
    }
}

impl ConversionSettings {
    /// Parse a (possibly partial) settings document; absent keys keep their defaults.
    pub fn from_json_str(src: &str) -> Result<Self, SettingsError> {
        crate::path_de::from_str_with_path(src)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        use anyhow::Context;
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        let settings = Self::from_json_str(&src)
            .with_context(|| format!("failed to load settings file {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?settings, "loaded settings");
        Ok(settings)
    }
}
