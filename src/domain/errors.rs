//! Domain error types
//!
//! This module defines the error hierarchy for Ferry. Field-level mapping problems
//! are never errors: normalizers return `None` and the mapped key is omitted.

use thiserror::Error;

/// Main Ferry error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum FerryError {
    /// The message handed to `convert` was empty or whitespace-only
    #[error("Input error: {0}")]
    Input(String),

    /// The tokenizer rejected the message text
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Tokenizer errors
///
/// Raised while splitting pipe-delimited text into segments. These are
/// surfaced to callers unchanged through [`FerryError::Parse`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The first segment is not a message header
    #[error("message must start with an MSH segment")]
    MissingHeader,

    /// The MSH segment is too short to carry its encoding characters
    #[error("MSH segment too short to read encoding characters: {0}")]
    HeaderTooShort(String),

    /// A segment identifier is not three uppercase letters or digits
    #[error("invalid segment identifier '{0}'")]
    InvalidSegmentId(String),

    /// Encoding characters collide with each other or with the field separator
    #[error("invalid encoding characters '{0}'")]
    InvalidEncodingCharacters(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for FerryError {
    fn from(err: std::io::Error) -> Self {
        FerryError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for FerryError {
    fn from(err: serde_json::Error) -> Self {
        FerryError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for FerryError {
    fn from(err: toml::de::Error) -> Self {
        FerryError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ferry_error_display() {
        let err = FerryError::Input("message is empty".to_string());
        assert_eq!(err.to_string(), "Input error: message is empty");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = ParseError::InvalidSegmentId("P1".to_string());
        let ferry_err: FerryError = parse_err.clone().into();
        assert!(matches!(ferry_err, FerryError::Parse(ref inner) if *inner == parse_err));
        assert_eq!(
            ferry_err.to_string(),
            "Parse error: invalid segment identifier 'P1'"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let ferry_err: FerryError = io_err.into();
        assert!(matches!(ferry_err, FerryError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let ferry_err: FerryError = json_err.into();
        assert!(matches!(ferry_err, FerryError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let ferry_err: FerryError = toml_err.into();
        assert!(matches!(ferry_err, FerryError::Configuration(_)));
        assert!(ferry_err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_ferry_error_implements_std_error() {
        let err = FerryError::Other("Test error".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
