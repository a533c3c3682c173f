use thiserror::Error;

/// Why a conversion produced no document.
///
/// Display text always starts with [`ERROR_PREFIX`], so callers that surface
/// the error in place of the generated source get a recognizable marker.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Error converting JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Error converting JSON: JSON root must be an object, found {found}.")]
    RootNotObject { found: &'static str },
}

pub const ERROR_PREFIX: &str = "Error converting JSON";

/// A settings document that failed to deserialize, with the offending path.
#[derive(Error, Debug)]
#[error("invalid settings at JSON path {path}: {message}")]
pub struct SettingsError {
    pub path: String,
    pub message: String,
}
