//! FHIR R4 resources produced by the segment mappers
//!
//! Only the elements the converter populates are modelled. Every resource
//! serializes with its `resourceType` through the [`Resource`] enum.

use super::datatypes::{
    Address, CodeableConcept, Coding, ContactPoint, Extension, HumanName, Identifier, Period,
    Quantity, Reference,
};
use crate::domain::ids::ResourceType;
use serde::Serialize;

/// Message header built from MSH
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHeader {
    pub id: String,

    pub event_coding: Coding,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub destination: Vec<MessageDestination>,

    pub source: MessageSource,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub focus: Vec<Reference>,
}

/// Sending system
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MessageSource {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub software: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Receiving system
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageDestination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Administrative gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AdministrativeGender {
    Male,
    Female,
    Other,
    Unknown,
}

impl AdministrativeGender {
    /// FHIR code
    pub fn as_str(&self) -> &'static str {
        match self {
            AdministrativeGender::Male => "male",
            AdministrativeGender::Female => "female",
            AdministrativeGender::Other => "other",
            AdministrativeGender::Unknown => "unknown",
        }
    }
}

/// Death indicator; the two forms are mutually exclusive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Deceased {
    #[serde(rename = "deceasedDateTime")]
    DateTime(String),
    #[serde(rename = "deceasedBoolean")]
    Boolean(bool),
}

/// Patient language
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatientCommunication {
    pub language: CodeableConcept,
}

/// Patient built from PID
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,

    pub gender: AdministrativeGender,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,

    #[serde(flatten)]
    pub deceased: Option<Deceased>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub marital_status: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub communication: Vec<PatientCommunication>,
}

/// Encounter lifecycle
///
/// An encounter starts `in-progress` and moves to `finished` once, when a
/// discharge time is known. There are no other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EncounterStatus {
    InProgress,
    Finished,
}

impl EncounterStatus {
    /// Initial state of every encounter
    pub fn initial() -> Self {
        EncounterStatus::InProgress
    }

    /// Applies a discharge; `finished` is terminal
    pub fn discharge(self) -> Self {
        EncounterStatus::Finished
    }

    /// True for the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, EncounterStatus::Finished)
    }
}

/// Previous encounter class (one per financial class repetition)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassHistory {
    pub class: Coding,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,
}

/// Practitioner involved in an encounter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterParticipant {
    #[serde(rename = "type")]
    pub participant_type: Vec<CodeableConcept>,

    pub individual: Reference,
}

/// Discharge details
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hospitalization {
    pub discharge_disposition: CodeableConcept,
}

/// Location visited during an encounter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterLocation {
    pub location: Reference,
}

/// Encounter built from PV1
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Encounter {
    pub id: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    pub status: EncounterStatus,

    pub class: Coding,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class_history: Vec<ClassHistory>,

    pub subject: Reference,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub participant: Vec<EncounterParticipant>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hospitalization: Option<Hospitalization>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub location: Vec<EncounterLocation>,
}

/// Next of kin built from NK1
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedPerson {
    pub id: String,

    pub patient: Reference,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub relationship: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub name: Vec<HumanName>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub telecom: Vec<ContactPoint>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub address: Vec<Address>,
}

/// Allergy or intolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergyIntoleranceType {
    Allergy,
    Intolerance,
}

/// Allergen category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergyIntoleranceCategory {
    Food,
    Medication,
    Environment,
    Biologic,
}

/// Reaction severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AllergyIntoleranceSeverity {
    Mild,
    Moderate,
    Severe,
}

/// Reaction event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllergyReaction {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub manifestation: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<AllergyIntoleranceSeverity>,
}

/// Allergy built from AL1
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergyIntolerance {
    pub id: String,

    pub clinical_status: CodeableConcept,

    pub verification_status: CodeableConcept,

    #[serde(rename = "type")]
    pub allergy_type: AllergyIntoleranceType,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<AllergyIntoleranceCategory>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    pub patient: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_date_time: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reaction: Vec<AllergyReaction>,
}

/// Diagnosis built from DG1
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub id: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    pub subject: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub onset_date_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub asserter: Option<Reference>,
}

/// Procedure performer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcedurePerformer {
    pub function: CodeableConcept,

    pub actor: Reference,
}

/// Procedure built from PR1
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Procedure {
    pub id: String,

    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    pub subject: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub performed_date_time: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub performer: Vec<ProcedurePerformer>,
}

/// Insurance coverage built from IN1 (and a paired IN2)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Coverage {
    pub id: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub identifier: Vec<Identifier>,

    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscriber_id: Option<String>,

    pub beneficiary: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub payor: Vec<Reference>,
}

/// Observation result status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObservationStatus {
    Registered,
    Preliminary,
    Final,
    Amended,
    Corrected,
    Cancelled,
    EnteredInError,
    Unknown,
}

/// Observation value; at most one form is present
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ObservationValue {
    #[serde(rename = "valueQuantity")]
    Quantity(Quantity),
    #[serde(rename = "valueString")]
    String(String),
    #[serde(rename = "valueDateTime")]
    DateTime(String),
    #[serde(rename = "valueCodeableConcept")]
    CodeableConcept(CodeableConcept),
}

/// Normal range for a result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Result built from OBX
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    pub id: String,

    pub status: ObservationStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<CodeableConcept>,

    pub subject: Reference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub effective_date_time: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub performer: Vec<Reference>,

    #[serde(flatten)]
    pub value: Option<ObservationValue>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interpretation: Vec<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub reference_range: Vec<ReferenceRange>,
}

/// Any resource the converter emits
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "resourceType")]
pub enum Resource {
    MessageHeader(MessageHeader),
    Patient(Patient),
    Encounter(Encounter),
    RelatedPerson(RelatedPerson),
    AllergyIntolerance(AllergyIntolerance),
    Condition(Condition),
    Procedure(Procedure),
    Coverage(Coverage),
    Observation(Observation),
}

impl Resource {
    /// Logical id
    pub fn id(&self) -> &str {
        match self {
            Resource::MessageHeader(r) => &r.id,
            Resource::Patient(r) => &r.id,
            Resource::Encounter(r) => &r.id,
            Resource::RelatedPerson(r) => &r.id,
            Resource::AllergyIntolerance(r) => &r.id,
            Resource::Condition(r) => &r.id,
            Resource::Procedure(r) => &r.id,
            Resource::Coverage(r) => &r.id,
            Resource::Observation(r) => &r.id,
        }
    }

    /// Resource type
    pub fn resource_type(&self) -> ResourceType {
        match self {
            Resource::MessageHeader(_) => ResourceType::MessageHeader,
            Resource::Patient(_) => ResourceType::Patient,
            Resource::Encounter(_) => ResourceType::Encounter,
            Resource::RelatedPerson(_) => ResourceType::RelatedPerson,
            Resource::AllergyIntolerance(_) => ResourceType::AllergyIntolerance,
            Resource::Condition(_) => ResourceType::Condition,
            Resource::Procedure(_) => ResourceType::Procedure,
            Resource::Coverage(_) => ResourceType::Coverage,
            Resource::Observation(_) => ResourceType::Observation,
        }
    }
}
