use serde::de::DeserializeOwned;

use crate::error::SettingsError;

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, SettingsError> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(|err| SettingsError {
        path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ConversionSettings;

    #[test]
    fn error_names_the_offending_field() {
        let err = from_str_with_path::<ConversionSettings>(r#"{ "propertyAccess": "Sometimes" }"#)
            .unwrap_err();
        assert_eq!(err.path, "propertyAccess");
    }
}
