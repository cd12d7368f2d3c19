//! NK1 → RelatedPerson

use super::MappingContext;
use crate::core::normalize::{normalize_address, normalize_coded, normalize_name};
use crate::core::tables::system;
use crate::domain::fhir::resources::RelatedPerson;
use crate::domain::fhir::{ContactPoint, ContactPointUse};
use crate::domain::ids::AssignedId;
use crate::domain::message::SegmentFields;

/// Builds a related person (next of kin) for the patient
pub fn map_related_person(
    nk1: &SegmentFields,
    id: &AssignedId,
    context: &MappingContext<'_>,
) -> RelatedPerson {
    let telecom = [(5, ContactPointUse::Home), (6, ContactPointUse::Work)]
        .into_iter()
        .flat_map(|(field, contact_use)| {
            nk1.field(field)
                .values()
                .into_iter()
                .filter_map(|value| value.first())
                .map(move |number| ContactPoint::phone(number, contact_use))
                .collect::<Vec<_>>()
        })
        .collect();

    RelatedPerson {
        id: id.id().to_string(),
        patient: context.patient_reference(),
        relationship: nk1
            .field(3)
            .instance()
            .and_then(|value| normalize_coded(value, system::V3_ROLE_CODE))
            .into_iter()
            .collect(),
        name: nk1.field(2).values().into_iter().filter_map(normalize_name).collect(),
        telecom,
        address: nk1.field(4).values().into_iter().filter_map(normalize_address).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentifierSystems;
    use crate::core::mappers::test_support::segment;
    use crate::domain::ids::ResourceType;
    use serde_json::json;

    fn related(body: &str) -> RelatedPerson {
        let patient = AssignedId::new(ResourceType::Patient, "patient-1");
        let id = AssignedId::new(ResourceType::RelatedPerson, "relatedperson-1");
        let systems = IdentifierSystems::default();
        map_related_person(&segment(body), &id, &MappingContext::new(&patient, &systems))
    }

    #[test]
    fn test_next_of_kin() {
        let person = related("1|DOE^JANE|SPO^Spouse|123 Main St^Boston^MA^02101|555-1111|555-2222");
        assert_eq!(
            serde_json::to_value(&person).unwrap(),
            json!({
                "id": "relatedperson-1",
                "patient": {"reference": "Patient/patient-1"},
                "relationship": [{
                    "coding": [{
                        "system": "http://terminology.hl7.org/CodeSystem/v3-RoleCode",
                        "code": "SPO",
                        "display": "Spouse"
                    }],
                    "text": "Spouse"
                }],
                "name": [{"family": "DOE", "given": ["JANE"]}],
                "telecom": [
                    {"system": "phone", "value": "555-1111", "use": "home"},
                    {"system": "phone", "value": "555-2222", "use": "work"}
                ],
                "address": [{
                    "use": "home",
                    "line": ["123 Main St"],
                    "city": "Boston",
                    "state": "MA",
                    "postalCode": "02101"
                }]
            })
        );
    }

    #[test]
    fn test_sparse_next_of_kin() {
        let person = related("1|SMITH");
        assert_eq!(person.name[0].family.as_deref(), Some("SMITH"));
        assert!(person.relationship.is_empty());
        assert!(person.telecom.is_empty());
        assert!(person.address.is_empty());
    }
}
