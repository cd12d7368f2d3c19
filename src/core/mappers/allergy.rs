//! AL1 → AllergyIntolerance

use super::MappingContext;
use crate::core::normalize::{normalize_coded, normalize_datetime};
use crate::core::tables::{allergen_type_for, lookup, system, ALLERGY_SEVERITY};
use crate::domain::fhir::resources::{AllergyIntolerance, AllergyReaction};
use crate::domain::fhir::{CodeableConcept, Coding};
use crate::domain::ids::AssignedId;
use crate::domain::message::SegmentFields;

/// Builds an allergy, always `active` and `confirmed`
pub fn map_allergy(
    al1: &SegmentFields,
    id: &AssignedId,
    context: &MappingContext<'_>,
) -> AllergyIntolerance {
    let (allergy_type, category) = allergen_type_for(al1.field(2).first());

    let severity = al1
        .field(4)
        .first()
        .and_then(|code| lookup(ALLERGY_SEVERITY, code));
    let manifestation: Vec<CodeableConcept> = al1
        .field(5)
        .values()
        .into_iter()
        .filter_map(|value| value.text())
        .map(CodeableConcept::from_text)
        .collect();
    let reaction = if severity.is_some() || !manifestation.is_empty() {
        vec![AllergyReaction {
            manifestation,
            severity,
        }]
    } else {
        Vec::new()
    };

    AllergyIntolerance {
        id: id.id().to_string(),
        clinical_status: CodeableConcept::from_coding(Coding::new(
            system::ALLERGY_CLINICAL_STATUS,
            "active",
        )),
        verification_status: CodeableConcept::from_coding(Coding::new(
            system::ALLERGY_VERIFICATION_STATUS,
            "confirmed",
        )),
        allergy_type,
        category: category.into_iter().collect(),
        code: al1
            .field(3)
            .instance()
            .and_then(|value| normalize_coded(value, system::SNOMED)),
        patient: context.patient_reference(),
        onset_date_time: al1.field(6).first().and_then(normalize_datetime),
        reaction,
    }
}
