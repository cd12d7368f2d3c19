//! CE/CWE (coded element) normalization

use crate::core::tables::coding_system_for;
use crate::domain::fhir::{CodeableConcept, Coding};
use crate::domain::field::Instance;

const CODE: usize = 0;
const DISPLAY: usize = 1;
const SYSTEM: usize = 2;

/// Normalizes `Code^Display^System` into a concept
///
/// The coding system named in the value wins when it is recognised; otherwise
/// `default_system` applies. `text` is the display, falling back to the code.
/// Returns `None` when there is neither a code nor a display.
pub fn normalize_coded(value: Instance<'_>, default_system: &str) -> Option<CodeableConcept> {
    let code = value.component(CODE);
    let display = value.component(DISPLAY);
    let text = display.or(code)?.to_string();

    let coding = code
        .map(|code| {
            let system = value
                .component(SYSTEM)
                .and_then(coding_system_for)
                .unwrap_or_else(|| default_system.to_string());
            vec![Coding {
                system: Some(system),
                code: Some(code.to_string()),
                display: display.map(str::to_string),
            }]
        })
        .unwrap_or_default();

    Some(CodeableConcept {
        coding,
        text: Some(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tables::system;
    use crate::domain::field::{Component, RawField};
    use serde_json::json;

    fn field(parts: &[&str]) -> RawField {
        RawField::Components(parts.iter().map(|p| Component::Text(p.to_string())).collect())
    }

    #[test]
    fn test_coded_with_named_system() {
        let raw = field(&["8867-4", "Heart rate", "LN"]);
        let concept = normalize_coded(raw.instance().unwrap(), system::SNOMED).unwrap();
        assert_eq!(
            serde_json::to_value(&concept).unwrap(),
            json!({
                "coding": [{"system": "http://loinc.org", "code": "8867-4", "display": "Heart rate"}],
                "text": "Heart rate"
            })
        );
    }

    #[test]
    fn test_coded_default_system_when_unnamed_or_unknown() {
        let raw = field(&["J45.909", "Asthma"]);
        let concept = normalize_coded(raw.instance().unwrap(), system::ICD10).unwrap();
        assert_eq!(concept.coding[0].system.as_deref(), Some(system::ICD10));

        let raw = field(&["LOCAL1", "Local thing", "99LOCAL"]);
        let concept = normalize_coded(raw.instance().unwrap(), system::CPT).unwrap();
        assert_eq!(concept.coding[0].system.as_deref(), Some(system::CPT));
    }

    #[test]
    fn test_coded_text_falls_back_to_code() {
        let raw = RawField::Scalar("PENICILLIN".to_string());
        let concept = normalize_coded(raw.instance().unwrap(), system::SNOMED).unwrap();
        assert_eq!(concept.text.as_deref(), Some("PENICILLIN"));
        assert!(concept.coding[0].display.is_none());
    }

    #[test]
    fn test_coded_display_only_has_no_coding() {
        let raw = field(&["", "Shortness of breath"]);
        let concept = normalize_coded(raw.instance().unwrap(), system::SNOMED).unwrap();
        assert!(concept.coding.is_empty());
        assert_eq!(concept.text.as_deref(), Some("Shortness of breath"));
    }

    #[test]
    fn test_coded_empty_is_absent() {
        let raw = field(&["", "", "LN"]);
        assert!(normalize_coded(raw.instance().unwrap(), system::LOINC).is_none());
    }
}
