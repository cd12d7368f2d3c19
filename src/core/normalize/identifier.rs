//! CX (extended composite id) normalization

use crate::core::tables::{extension_url, identifier_type_display, system};
use crate::domain::fhir::{CodeableConcept, Coding, Extension, Identifier};
use crate::domain::field::Instance;

const VALUE: usize = 0;
const ASSIGNING_AUTHORITY: usize = 3;
const TYPE_CODE: usize = 4;
const ASSIGNING_FACILITY: usize = 5;

/// Caller-supplied defaults for an identifier
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentifierOptions<'a> {
    /// System used when the value carries no assigning authority
    pub default_system: Option<&'a str>,

    /// Type code that replaces the one carried in the value
    pub type_code: Option<&'a str>,
}

impl<'a> IdentifierOptions<'a> {
    /// Options with a default system and a forced type code
    pub fn new(default_system: Option<&'a str>, type_code: &'a str) -> Self {
        Self {
            default_system,
            type_code: Some(type_code),
        }
    }
}

/// Normalizes `Value^CheckDigit^Scheme^AssigningAuthority^TypeCode^AssigningFacility`
///
/// The system is `urn:oid:<AssigningAuthority>` when present, else the
/// caller default. The assigning facility is carried as an extension.
/// Returns `None` when there is no value.
pub fn normalize_identifier(
    value: Instance<'_>,
    options: IdentifierOptions<'_>,
) -> Option<Identifier> {
    let id_value = value.component(VALUE)?;

    let system = value
        .component(ASSIGNING_AUTHORITY)
        .map(|authority| format!("urn:oid:{authority}"))
        .or_else(|| options.default_system.map(str::to_string));

    let identifier_type = options
        .type_code
        .or_else(|| value.component(TYPE_CODE))
        .map(identifier_type);

    let extension = value
        .component(ASSIGNING_FACILITY)
        .map(|facility| vec![Extension::string(extension_url::ASSIGNING_FACILITY, facility)])
        .unwrap_or_default();

    Some(Identifier {
        extension,
        identifier_type,
        system,
        value: id_value.to_string(),
    })
}

/// Identifier type concept for a table 0203 code
pub fn identifier_type(code: &str) -> CodeableConcept {
    CodeableConcept::from_coding(
        Coding::new(system::V2_IDENTIFIER_TYPE, code)
            .with_optional_display(identifier_type_display(code)),
    )
}
