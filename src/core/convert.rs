//! Conversion entry points
//!
//! [`Converter`] ties the tokenizer adapter to the bundle assembler. It holds
//! only immutable settings, so one instance can serve many threads.

use crate::adapters::hl7::{MessageTokenizer, PipeTokenizer};
use crate::config::{ConversionConfig, FerryConfig};
use crate::core::assembler::BundleAssembler;
use crate::domain::fhir::Bundle;
use crate::domain::message::ParsedMessage;
use crate::domain::{FerryError, Result};
use std::fmt;
use std::sync::Arc;

const HEADER_ID: &str = "MSH";
const FIELD_SEPARATOR: char = '|';

/// HL7 v2 to FHIR R4 converter
///
/// # Examples
///
/// ```
/// use ferry::config::ConversionConfig;
/// use ferry::core::convert::Converter;
/// use ferry::domain::ResourceType;
///
/// let converter = Converter::new(ConversionConfig::default());
/// let bundle = converter
///     .convert("MSH|^~\\&|APP|FAC|||20240101||ADT^A01|42|P|2.5\rPID|1||12345^^^HOSP^MR")
///     .unwrap();
///
/// assert_eq!(bundle.entry[0].resource.id(), "message-42");
/// assert_eq!(bundle.resources_of(ResourceType::Patient).len(), 1);
/// ```
#[derive(Clone)]
pub struct Converter {
    config: ConversionConfig,
    tokenizer: Arc<dyn MessageTokenizer>,
}

impl Converter {
    /// Creates a converter using the built-in pipe tokenizer
    pub fn new(config: ConversionConfig) -> Self {
        Self::with_tokenizer(config, Arc::new(PipeTokenizer))
    }

    /// Creates a converter from the full application configuration
    pub fn from_config(config: &FerryConfig) -> Self {
        Self::new(config.conversion.clone())
    }

    /// Creates a converter with a custom tokenizer
    pub fn with_tokenizer(config: ConversionConfig, tokenizer: Arc<dyn MessageTokenizer>) -> Self {
        Self { config, tokenizer }
    }

    /// Conversion settings in effect
    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Converts raw message text into a bundle
    ///
    /// # Errors
    ///
    /// Returns [`FerryError::Input`] for empty or whitespace-only input and
    /// [`FerryError::Parse`] when the tokenizer rejects the text. No partial
    /// bundle is produced on error.
    pub fn convert(&self, message: &str) -> Result<Bundle> {
        if message.trim().is_empty() {
            return Err(FerryError::Input("message is empty".to_string()));
        }

        let parsed = self.tokenizer.tokenize(message)?;
        tracing::debug!(segments = parsed.segments.len(), "Tokenized message");

        Ok(self.convert_parsed(&parsed))
    }

    /// Converts an already tokenized message
    pub fn convert_parsed(&self, message: &ParsedMessage) -> Bundle {
        BundleAssembler::new(&self.config).assemble(message)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(ConversionConfig::default())
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Converts with default settings
///
/// # Errors
///
/// See [`Converter::convert`].
pub fn convert(message: &str) -> Result<Bundle> {
    Converter::default().convert(message)
}

/// Cheap structural check: non-empty, starts with `MSH` once trimmed, and
/// contains a field separator
///
/// # Examples
///
/// ```
/// use ferry::core::convert::validate;
///
/// assert!(validate("  MSH|^~\\&|APP"));
/// assert!(!validate("PID|1"));
/// assert!(!validate("   "));
/// ```
pub fn validate(message: &str) -> bool {
    let trimmed = message.trim();
    !trimmed.is_empty() && trimmed.starts_with(HEADER_ID) && trimmed.contains(FIELD_SEPARATOR)
}
