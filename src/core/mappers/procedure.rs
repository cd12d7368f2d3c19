//! PR1 → Procedure

use super::{practitioner, MappingContext};
use crate::core::normalize::{normalize_coded, normalize_datetime};
use crate::core::tables::system;
use crate::domain::fhir::resources::{Procedure, ProcedurePerformer};
use crate::domain::fhir::{CodeableConcept, Coding};
use crate::domain::ids::AssignedId;
use crate::domain::message::SegmentFields;

const SURGEON_CODE: &str = "304292004";
const SURGEON_DISPLAY: &str = "Surgeon";

/// Builds a completed procedure
pub fn map_procedure(
    pr1: &SegmentFields,
    id: &AssignedId,
    context: &MappingContext<'_>,
) -> Procedure {
    let code = pr1
        .field(3)
        .instance()
        .and_then(|value| normalize_coded(value, system::CPT))
        .or_else(|| pr1.field(4).first().map(CodeableConcept::from_text));

    let performer = practitioner("surgeon", pr1.field(11))
        .map(|actor| ProcedurePerformer {
            function: CodeableConcept::from_coding(
                Coding::new(system::SNOMED, SURGEON_CODE).with_display(SURGEON_DISPLAY),
            ),
            actor,
        })
        .into_iter()
        .collect();

    Procedure {
        id: id.id().to_string(),
        status: "completed".to_string(),
        code,
        subject: context.patient_reference(),
        encounter: context.encounter_reference(),
        performed_date_time: pr1.field(5).first().and_then(normalize_datetime),
        performer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentifierSystems;
    use crate::core::mappers::test_support::segment;
    use crate::domain::ids::ResourceType;
    use serde_json::json;

    fn procedure(body: &str) -> Procedure {
        let patient = AssignedId::new(ResourceType::Patient, "patient-1");
        let id = AssignedId::new(ResourceType::Procedure, "procedure-1");
        let systems = IdentifierSystems::default();
        map_procedure(&segment(body), &id, &MappingContext::new(&patient, &systems))
    }

    #[test]
    fn test_procedure_with_surgeon() {
        let value = serde_json::to_value(procedure(
            "1|CPT|47562^Laparoscopic cholecystectomy^C4||20240102103000||||||5555^CUTTER^SAM",
        ))
        .unwrap();

        assert_eq!(value["status"], json!("completed"));
        assert_eq!(
            value["code"]["coding"][0],
            json!({
                "system": "http://www.ama-assn.org/go/cpt",
                "code": "47562",
                "display": "Laparoscopic cholecystectomy"
            })
        );
        assert_eq!(value["performedDateTime"], json!("2024-01-02T10:30:00"));
        assert_eq!(
            value["performer"],
            json!([{
                "function": {"coding": [{
                    "system": "http://snomed.info/sct",
                    "code": "304292004",
                    "display": "Surgeon"
                }]},
                "actor": {"reference": "Practitioner/surgeon", "display": "SAM CUTTER"}
            }])
        );
        assert!(value.get("encounter").is_none());
    }

    #[test]
    fn test_description_fallback_without_performer() {
        let procedure = procedure("1|||Appendectomy");
        assert_eq!(procedure.code.unwrap().text.as_deref(), Some("Appendectomy"));
        assert!(procedure.performer.is_empty());
    }
}
