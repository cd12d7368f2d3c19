//! PV1 → Encounter

use super::{practitioner, MappingContext};
use crate::core::normalize::{
    normalize_date, normalize_datetime, normalize_identifier, IdentifierOptions,
};
use crate::core::tables::{encounter_class_for, system};
use crate::domain::fhir::resources::{
    ClassHistory, Encounter, EncounterLocation, EncounterParticipant, EncounterStatus,
    Hospitalization,
};
use crate::domain::fhir::{CodeableConcept, Coding, Period, Reference};
use crate::domain::field::RawField;
use crate::domain::ids::AssignedId;
use crate::domain::message::SegmentFields;

/// Participant roles: (PV1 field, placeholder role, v3 ParticipationType code, display)
const PARTICIPANTS: [(usize, &str, &str, &str); 3] = [
    (7, "attending", "ATND", "attender"),
    (8, "referring", "REF", "referrer"),
    (17, "admitting", "ADM", "admitter"),
];

/// Builds an encounter
///
/// Every encounter starts `in-progress`; a discharge date/time (PV1-45)
/// moves it to `finished`.
pub fn map_encounter(
    pv1: &SegmentFields,
    id: &AssignedId,
    context: &MappingContext<'_>,
) -> Encounter {
    let (class_code, class_display) = encounter_class_for(pv1.field(2).first());

    let mut status = EncounterStatus::initial();
    if pv1.field(45).exists() {
        status = status.discharge();
    }

    Encounter {
        id: id.id().to_string(),
        identifier: pv1
            .field(19)
            .instance()
            .and_then(|value| {
                normalize_identifier(
                    value,
                    IdentifierOptions::new(context.systems.visit.as_deref(), "VN"),
                )
            })
            .into_iter()
            .collect(),
        status,
        class: Coding::new(system::V3_ACT_CODE, class_code).with_display(class_display),
        class_history: class_history(pv1.field(20)),
        subject: context.patient_reference(),
        participant: participants(pv1),
        period: Period::from_bounds(
            pv1.field(44).first().and_then(normalize_datetime),
            pv1.field(45).first().and_then(normalize_datetime),
        ),
        hospitalization: pv1.field(36).first().map(|code| Hospitalization {
            discharge_disposition: CodeableConcept::from_coding(Coding::new(
                system::DISCHARGE_DISPOSITION,
                code,
            )),
        }),
        location: pv1
            .field(3)
            .first()
            .map(|point_of_care| EncounterLocation {
                location: Reference::to(format!("Location/{point_of_care}")),
            })
            .into_iter()
            .collect(),
    }
}

fn participants(pv1: &SegmentFields) -> Vec<EncounterParticipant> {
    PARTICIPANTS
        .iter()
        .filter_map(|&(field, role, code, display)| {
            let individual = practitioner(role, pv1.field(field))?;
            Some(EncounterParticipant {
                participant_type: vec![CodeableConcept::from_coding(
                    Coding::new(system::V3_PARTICIPATION_TYPE, code).with_display(display),
                )],
                individual,
            })
        })
        .collect()
}

/// One entry per financial class repetition (`Class^EffectiveDate`)
fn class_history(field: &RawField) -> Vec<ClassHistory> {
    field
        .values()
        .into_iter()
        .filter_map(|value| {
            let code = value.first()?;
            Some(ClassHistory {
                class: Coding::new(system::V2_FINANCIAL_CLASS, code),
                period: Period::from_bounds(value.component(1).and_then(normalize_date), None),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentifierSystems;
    use crate::core::mappers::test_support::segment;
    use crate::domain::ids::ResourceType;
    use serde_json::json;

    fn encounter(fields: &[(usize, &str)]) -> Encounter {
        let mut slots = vec![""; 45];
        for &(n, text) in fields {
            slots[n - 1] = text;
        }
        let patient = AssignedId::new(ResourceType::Patient, "patient-1");
        let id = AssignedId::new(ResourceType::Encounter, "encounter-1");
        let systems = IdentifierSystems::default();
        let context = MappingContext::new(&patient, &systems);
        map_encounter(&segment(&slots.join("|")), &id, &context)
    }

    #[test]
    fn test_inpatient_without_discharge_is_in_progress() {
        let encounter = encounter(&[(1, "1"), (2, "I")]);
        assert_eq!(encounter.status, EncounterStatus::InProgress);
        assert_eq!(encounter.class.code.as_deref(), Some("IMP"));
        assert_eq!(encounter.subject.reference.as_deref(), Some("Patient/patient-1"));
    }

    #[test]
    fn test_discharge_finishes_encounter() {
        let encounter = encounter(&[(2, "I"), (44, "20240101080000"), (45, "20240105173000")]);
        assert_eq!(encounter.status, EncounterStatus::Finished);
        assert!(encounter.status.is_terminal());
        assert_eq!(
            serde_json::to_value(&encounter.period).unwrap(),
            json!({"start": "2024-01-01T08:00:00", "end": "2024-01-05T17:30:00"})
        );
    }

    #[test]
    fn test_class_mapping() {
        assert_eq!(encounter(&[(2, "E")]).class.code.as_deref(), Some("EMER"));
        assert_eq!(encounter(&[(2, "o")]).class.code.as_deref(), Some("AMB"));
        assert_eq!(encounter(&[]).class.code.as_deref(), Some("IMP"));
    }

    #[test]
    fn test_participants_are_placeholders() {
        let encounter = encounter(&[
            (7, "1234^SMITH^JOHN"),
            (8, "5678^JONES^MARY"),
            (17, "9012^BROWN^ALEX"),
        ]);
        let value = serde_json::to_value(&encounter.participant).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[0]["type"][0]["coding"][0]["code"], json!("ATND"));
        assert_eq!(
            value[0]["individual"],
            json!({"reference": "Practitioner/attending", "display": "JOHN SMITH"})
        );
        assert_eq!(value[1]["type"][0]["coding"][0]["code"], json!("REF"));
        assert_eq!(value[2]["individual"]["reference"], json!("Practitioner/admitting"));
    }

    #[test]
    fn test_location_visit_number_and_disposition() {
        let encounter = encounter(&[(3, "ICU^101^A"), (19, "V0001"), (36, "01")]);
        let value = serde_json::to_value(&encounter).unwrap();
        assert_eq!(value["location"][0]["location"]["reference"], json!("Location/ICU"));
        assert_eq!(value["identifier"].as_array().unwrap().len(), 1);
        assert_eq!(value["identifier"][0]["value"], json!("V0001"));
        assert_eq!(value["identifier"][0]["type"]["coding"][0]["code"], json!("VN"));
        assert_eq!(
            value["hospitalization"]["dischargeDisposition"]["coding"][0]["code"],
            json!("01")
        );
    }

    #[test]
    fn test_class_history_per_repetition() {
        let encounter = encounter(&[(20, "01^20240101~02^20240103")]);
        let value = serde_json::to_value(&encounter.class_history).unwrap();
        assert_eq!(
            value,
            json!([
                {
                    "class": {"system": "http://terminology.hl7.org/CodeSystem/v2-0064", "code": "01"},
                    "period": {"start": "2024-01-01"}
                },
                {
                    "class": {"system": "http://terminology.hl7.org/CodeSystem/v2-0064", "code": "02"},
                    "period": {"start": "2024-01-03"}
                }
            ])
        );
    }
}
