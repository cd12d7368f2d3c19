//! HL7 v2 tokenizer adapter
//!
//! Turns raw pipe-delimited message text into the [`ParsedMessage`] segment
//! tree the mapping engine consumes. The engine only depends on the
//! [`MessageTokenizer`] trait, so callers with their own HL7 parser can plug
//! it in through [`Converter::with_tokenizer`](crate::core::convert::Converter::with_tokenizer).

pub mod parser;

pub use parser::{parse_message, Delimiters, PipeTokenizer};

use crate::domain::errors::ParseError;
use crate::domain::message::ParsedMessage;

/// Splits raw message text into segments
///
/// Implementations must be shareable across threads; a converter holding a
/// tokenizer is itself `Send + Sync`.
pub trait MessageTokenizer: Send + Sync {
    /// Tokenizes one message
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] when the text is not a well-formed message.
    fn tokenize(&self, text: &str) -> Result<ParsedMessage, ParseError>;
}
