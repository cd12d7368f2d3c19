//! Per-segment resource builders
//!
//! Each mapper is a pure function from one segment body (plus the
//! conversion context) to one FHIR resource. Mappers never fail: fields that
//! are missing or malformed are simply left out of the resource.

pub mod allergy;
pub mod condition;
pub mod coverage;
pub mod encounter;
pub mod message_header;
pub mod observation;
pub mod patient;
pub mod procedure;
pub mod related_person;

pub use allergy::map_allergy;
pub use condition::map_condition;
pub use coverage::map_coverage;
pub use encounter::map_encounter;
pub use message_header::map_message_header;
pub use observation::map_observation;
pub use patient::map_patient;
pub use procedure::map_procedure;
pub use related_person::map_related_person;

use crate::config::IdentifierSystems;
use crate::domain::fhir::Reference;
use crate::domain::field::{Instance, RawField};
use crate::domain::ids::AssignedId;

/// Cross-resource context threaded through the mappers
#[derive(Debug, Clone, Copy)]
pub struct MappingContext<'a> {
    /// The message's patient
    pub patient: &'a AssignedId,

    /// Encounter clinical resources link to, if any
    pub encounter: Option<&'a AssignedId>,

    /// Default identifier systems
    pub systems: &'a IdentifierSystems,
}

impl<'a> MappingContext<'a> {
    /// Context without an encounter
    pub fn new(patient: &'a AssignedId, systems: &'a IdentifierSystems) -> Self {
        Self {
            patient,
            encounter: None,
            systems,
        }
    }

    /// The same context linked to `encounter`
    pub fn with_encounter(self, encounter: Option<&'a AssignedId>) -> Self {
        Self { encounter, ..self }
    }

    pub(crate) fn patient_reference(&self) -> Reference {
        self.patient.to_reference()
    }

    pub(crate) fn encounter_reference(&self) -> Option<Reference> {
        self.encounter.map(AssignedId::to_reference)
    }
}

/// Placeholder practitioner reference for a person field (XCN)
///
/// Practitioners are not materialized; the reference is a fixed
/// `Practitioner/<role>` with the person's name as display.
pub(crate) fn practitioner(role: &str, field: &RawField) -> Option<Reference> {
    let value = field.instance().filter(|v| v.has_content())?;
    Some(Reference::to(format!("Practitioner/{role}")).with_optional_display(person_display(value)))
}

/// `Given Family` from an `Id^Family^Given` value
fn person_display(value: Instance<'_>) -> Option<String> {
    let parts: Vec<&str> = [value.component(2), value.component(1)]
        .into_iter()
        .flatten()
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::field;
    use super::*;

    #[test]
    fn test_practitioner_display_from_name() {
        let reference = practitioner("attending", &field("1234^SMITH^JOHN^A^^DR")).unwrap();
        assert_eq!(reference.reference.as_deref(), Some("Practitioner/attending"));
        assert_eq!(reference.display.as_deref(), Some("JOHN SMITH"));
    }

    #[test]
    fn test_practitioner_id_only() {
        let reference = practitioner("surgeon", &field("5678")).unwrap();
        assert_eq!(reference.reference.as_deref(), Some("Practitioner/surgeon"));
        assert!(reference.display.is_none());
    }

    #[test]
    fn test_practitioner_absent() {
        assert!(practitioner("attending", &RawField::Absent).is_none());
        assert!(practitioner("attending", &field("^^")).is_none());
    }
}
