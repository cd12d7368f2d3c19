//! Resource types and assigned identifiers
//!
//! Every emitted resource gets an id that is unique within one conversion,
//! and is referenced elsewhere as `"<ResourceType>/<id>"`.

use crate::domain::fhir::datatypes::Reference;
use std::fmt;

/// Resource types emitted by the converter, in bundle emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    MessageHeader,
    Patient,
    Encounter,
    RelatedPerson,
    AllergyIntolerance,
    Condition,
    Procedure,
    Coverage,
    Observation,
}

impl ResourceType {
    /// Emission order of resource groups in a bundle
    pub const EMISSION_ORDER: [ResourceType; 9] = [
        ResourceType::MessageHeader,
        ResourceType::Patient,
        ResourceType::Encounter,
        ResourceType::RelatedPerson,
        ResourceType::AllergyIntolerance,
        ResourceType::Condition,
        ResourceType::Procedure,
        ResourceType::Coverage,
        ResourceType::Observation,
    ];

    /// FHIR resource type name
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::MessageHeader => "MessageHeader",
            ResourceType::Patient => "Patient",
            ResourceType::Encounter => "Encounter",
            ResourceType::RelatedPerson => "RelatedPerson",
            ResourceType::AllergyIntolerance => "AllergyIntolerance",
            ResourceType::Condition => "Condition",
            ResourceType::Procedure => "Procedure",
            ResourceType::Coverage => "Coverage",
            ResourceType::Observation => "Observation",
        }
    }

    /// Prefix of generated ids
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ResourceType::MessageHeader => "message",
            ResourceType::Patient => "patient",
            ResourceType::Encounter => "encounter",
            ResourceType::RelatedPerson => "relatedperson",
            ResourceType::AllergyIntolerance => "allergy",
            ResourceType::Condition => "condition",
            ResourceType::Procedure => "procedure",
            ResourceType::Coverage => "coverage",
            ResourceType::Observation => "observation",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An assigned resource id together with its reference string
///
/// # Examples
///
/// ```
/// use ferry::domain::ids::{AssignedId, ResourceType};
///
/// let assigned = AssignedId::new(ResourceType::Encounter, "encounter-1");
/// assert_eq!(assigned.id(), "encounter-1");
/// assert_eq!(assigned.reference(), "Encounter/encounter-1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssignedId {
    resource_type: ResourceType,
    id: String,
    reference: String,
}

impl AssignedId {
    /// Creates an assigned id for `resource_type`
    pub fn new(resource_type: ResourceType, id: impl Into<String>) -> Self {
        let id = id.into();
        let reference = format!("{}/{}", resource_type.as_str(), id);
        Self {
            resource_type,
            id,
            reference,
        }
    }

    /// The logical id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `"<ResourceType>/<id>"` reference string
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// The resource type the id belongs to
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// The id as a FHIR reference
    pub fn to_reference(&self) -> Reference {
        Reference::to(self.reference.clone())
    }

    /// Consumes self and returns the inner id
    pub fn into_id(self) -> String {
        self.id
    }
}

impl fmt::Display for AssignedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emission_order_matches_ordering() {
        let mut sorted = ResourceType::EMISSION_ORDER;
        sorted.sort();
        assert_eq!(sorted, ResourceType::EMISSION_ORDER);
    }

    #[test]
    fn test_assigned_id_reference() {
        let assigned = AssignedId::new(ResourceType::AllergyIntolerance, "allergy-2");
        assert_eq!(assigned.reference(), "AllergyIntolerance/allergy-2");
        assert_eq!(assigned.to_string(), "AllergyIntolerance/allergy-2");
        assert_eq!(
            assigned.to_reference().reference.as_deref(),
            Some("AllergyIntolerance/allergy-2")
        );
    }
}
