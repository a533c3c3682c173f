//! JSON → C# type declarations.
//!
//! `convert` is a pure function of `(json, settings)`: parse, infer one named
//! type per object shape, synthesize one namespace worth of declarations.
//! Nothing is cached between calls, so conversions may run in parallel.
pub mod codegen;
pub mod error;
pub mod inference;
pub mod ir;
pub mod naming;
pub mod path_de;
pub mod settings;

use serde_json::Value;

pub use codegen::{DeclarationStyle, synthesize};
pub use error::{ConversionError, ERROR_PREFIX};
pub use inference::infer;
pub use ir::{Field, InferredType, Scalar, TypeRef, TypeSet};
pub use settings::{ContainerStyle, ConversionSettings, PropertyAccess};

/// Convert raw JSON text into a C# document.
pub fn convert(json_text: &str, settings: &ConversionSettings) -> Result<String, ConversionError> {
    // the parsed document lives only until inference has read it
    let types = {
        let root: Value = serde_json::from_str(json_text)?;
        infer(&root, &settings.root_type_name)?
    };
    tracing::debug!(types = types.len(), root = %types.root, "synthesizing declarations");
    Ok(synthesize(&types, settings))
}

/// Same as [`convert`] for an already-parsed document.
pub fn convert_value(root: &Value, settings: &ConversionSettings) -> Result<String, ConversionError> {
    let types = infer(root, &settings.root_type_name)?;
    Ok(synthesize(&types, settings))
}

/// Editor-style entry point: the error message takes the place of the
/// document, and the flag says which one you got.
pub fn try_convert(json_text: &str, settings: &ConversionSettings) -> (bool, String) {
    match convert(json_text, settings) {
        Ok(doc) => (true, doc),
        Err(error) => {
            tracing::warn!(%error, "conversion failed");
            (false, error.to_string())
        }
    }
}
