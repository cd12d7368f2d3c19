//! DG1 → Condition

use super::{practitioner, MappingContext};
use crate::core::normalize::{normalize_coded, normalize_datetime};
use crate::core::tables::{lookup, system, DIAGNOSIS_TYPES};
use crate::domain::fhir::resources::Condition;
use crate::domain::fhir::{CodeableConcept, Coding};
use crate::domain::ids::AssignedId;
use crate::domain::message::SegmentFields;

/// Builds a condition from a diagnosis
///
/// The code falls back to the free-text description (DG1-4) when DG1-3 is
/// empty.
pub fn map_condition(
    dg1: &SegmentFields,
    id: &AssignedId,
    context: &MappingContext<'_>,
) -> Condition {
    let code = dg1
        .field(3)
        .instance()
        .and_then(|value| normalize_coded(value, system::ICD10))
        .or_else(|| dg1.field(4).first().map(CodeableConcept::from_text));

    let category = dg1.field(6).first().and_then(|code| {
        let display = lookup(DIAGNOSIS_TYPES, code)?;
        Some(CodeableConcept::from_coding(
            Coding::new(system::V2_DIAGNOSIS_TYPE, code.to_ascii_uppercase()).with_display(display),
        ))
    });

    Condition {
        id: id.id().to_string(),
        category: category.into_iter().collect(),
        code,
        subject: context.patient_reference(),
        encounter: context.encounter_reference(),
        onset_date_time: dg1.field(5).first().and_then(normalize_datetime),
        asserter: practitioner("diagnosing-clinician", dg1.field(16)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentifierSystems;
    use crate::core::mappers::test_support::segment;
    use crate::domain::ids::ResourceType;
    use serde_json::json;

    fn condition(body: &str, encounter: Option<&AssignedId>) -> Condition {
        let patient = AssignedId::new(ResourceType::Patient, "patient-1");
        let id = AssignedId::new(ResourceType::Condition, "condition-1");
        let systems = IdentifierSystems::default();
        let context = MappingContext::new(&patient, &systems).with_encounter(encounter);
        map_condition(&segment(body), &id, &context)
    }

    #[test]
    fn test_diagnosis_with_encounter() {
        let encounter = AssignedId::new(ResourceType::Encounter, "encounter-1");
        let body = "1|I10|J45.909^Unspecified asthma^I10||20240101|W||||||||||1234^HOUSE^GREGORY";
        let value = serde_json::to_value(condition(body, Some(&encounter))).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "condition-1",
                "category": [{
                    "coding": [{
                        "system": "http://terminology.hl7.org/CodeSystem/v2-0052",
                        "code": "W",
                        "display": "working"
                    }]
                }],
                "code": {
                    "coding": [{
                        "system": "http://hl7.org/fhir/sid/icd-10",
                        "code": "J45.909",
                        "display": "Unspecified asthma"
                    }],
                    "text": "Unspecified asthma"
                },
                "subject": {"reference": "Patient/patient-1"},
                "encounter": {"reference": "Encounter/encounter-1"},
                "onsetDateTime": "2024-01-01",
                "asserter": {
                    "reference": "Practitioner/diagnosing-clinician",
                    "display": "GREGORY HOUSE"
                }
            })
        );
    }

    #[test]
    fn test_description_fallback_and_no_encounter() {
        let condition = condition("1|||Chest pain", None);
        assert_eq!(condition.code.unwrap().text.as_deref(), Some("Chest pain"));
        assert!(condition.encounter.is_none());
        assert!(condition.category.is_empty());
    }

    #[test]
    fn test_unmapped_diagnosis_type_has_no_category() {
        assert!(condition("1|||||Q", None).category.is_empty());
        assert_eq!(condition("1|||||a", None).category[0].coding[0].code.as_deref(), Some("A"));
    }
}
