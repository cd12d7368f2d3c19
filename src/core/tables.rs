//! Terminology systems and code lookup tables
//!
//! Every HL7-to-FHIR code mapping lives here as a constant table. Lookups are
//! ASCII case-insensitive; each `*_for` function documents its default when a
//! code is missing or unmapped.

use crate::domain::fhir::AddressUse;
use crate::domain::fhir::resources::{
    AdministrativeGender, AllergyIntoleranceCategory, AllergyIntoleranceSeverity,
    AllergyIntoleranceType, ObservationStatus,
};

/// Terminology system URIs
pub mod system {
    pub const LOINC: &str = "http://loinc.org";
    pub const SNOMED: &str = "http://snomed.info/sct";
    pub const ICD10: &str = "http://hl7.org/fhir/sid/icd-10";
    pub const ICD9: &str = "http://hl7.org/fhir/sid/icd-9-cm";
    pub const CPT: &str = "http://www.ama-assn.org/go/cpt";
    pub const UCUM: &str = "http://unitsofmeasure.org";
    pub const US_SSN: &str = "http://hl7.org/fhir/sid/us-ssn";
    pub const BCP47: &str = "urn:ietf:bcp:47";
    pub const CDC_RACE_ETHNICITY: &str = "urn:oid:2.16.840.1.113883.6.238";
    pub const V2_EVENT_TYPE: &str = "http://terminology.hl7.org/CodeSystem/v2-0003";
    pub const V2_IDENTIFIER_TYPE: &str = "http://terminology.hl7.org/CodeSystem/v2-0203";
    pub const V2_DIAGNOSIS_TYPE: &str = "http://terminology.hl7.org/CodeSystem/v2-0052";
    pub const V2_FINANCIAL_CLASS: &str = "http://terminology.hl7.org/CodeSystem/v2-0064";
    pub const V3_ACT_CODE: &str = "http://terminology.hl7.org/CodeSystem/v3-ActCode";
    pub const V3_MARITAL_STATUS: &str = "http://terminology.hl7.org/CodeSystem/v3-MaritalStatus";
    pub const V3_ROLE_CODE: &str = "http://terminology.hl7.org/CodeSystem/v3-RoleCode";
    pub const V3_PARTICIPATION_TYPE: &str =
        "http://terminology.hl7.org/CodeSystem/v3-ParticipationType";
    pub const V3_OBSERVATION_INTERPRETATION: &str =
        "http://terminology.hl7.org/CodeSystem/v3-ObservationInterpretation";
    pub const ALLERGY_CLINICAL_STATUS: &str =
        "http://terminology.hl7.org/CodeSystem/allergyintolerance-clinical";
    pub const ALLERGY_VERIFICATION_STATUS: &str =
        "http://terminology.hl7.org/CodeSystem/allergyintolerance-verification";
    pub const DISCHARGE_DISPOSITION: &str =
        "http://terminology.hl7.org/CodeSystem/discharge-disposition";
    pub const SUBSCRIBER_RELATIONSHIP: &str =
        "http://terminology.hl7.org/CodeSystem/subscriber-relationship";
}

/// Structure definition URLs for extensions
pub mod extension_url {
    pub const US_CORE_RACE: &str = "http://hl7.org/fhir/us/core/StructureDefinition/us-core-race";
    pub const US_CORE_ETHNICITY: &str =
        "http://hl7.org/fhir/us/core/StructureDefinition/us-core-ethnicity";
    pub const ASSIGNING_FACILITY: &str =
        "http://hl7.org/fhir/StructureDefinition/identifier-assigningFacility";
}

/// XAD address type → FHIR address use
pub const ADDRESS_USE: &[(&str, AddressUse)] = &[
    ("B", AddressUse::Work),
    ("C", AddressUse::Home),
    ("H", AddressUse::Home),
    ("M", AddressUse::Home),
    ("O", AddressUse::Work),
    ("P", AddressUse::Home),
];

/// Identifier type code → display (HL7 table 0203 subset)
pub const IDENTIFIER_TYPES: &[(&str, &str)] = &[
    ("MR", "Medical record number"),
    ("SS", "Social Security number"),
    ("DL", "Driver's license number"),
    ("PPN", "Passport number"),
    ("PI", "Patient internal identifier"),
    ("AN", "Account number"),
    ("VN", "Visit number"),
];

/// Administrative sex (HL7 table 0001) → FHIR gender
pub const ADMINISTRATIVE_SEX: &[(&str, AdministrativeGender)] = &[
    ("M", AdministrativeGender::Male),
    ("F", AdministrativeGender::Female),
    ("O", AdministrativeGender::Other),
    ("U", AdministrativeGender::Unknown),
    ("A", AdministrativeGender::Other),
    ("N", AdministrativeGender::Unknown),
];

/// Patient class → (v3 ActCode, display)
pub const ENCOUNTER_CLASS: &[(&str, (&str, &str))] = &[
    ("I", ("IMP", "inpatient encounter")),
    ("O", ("AMB", "ambulatory")),
    ("E", ("EMER", "emergency")),
    ("P", ("PRENC", "pre-admission")),
    ("N", ("NONAC", "inpatient non-acute")),
    ("R", ("PRENC", "pre-admission")),
];

/// Allergen type (HL7 table 0127) → (type, category)
pub const ALLERGEN_TYPES: &[(
    &str,
    (AllergyIntoleranceType, Option<AllergyIntoleranceCategory>),
)] = &[
    (
        "DA",
        (
            AllergyIntoleranceType::Allergy,
            Some(AllergyIntoleranceCategory::Medication),
        ),
    ),
    (
        "FA",
        (
            AllergyIntoleranceType::Allergy,
            Some(AllergyIntoleranceCategory::Food),
        ),
    ),
    ("MA", (AllergyIntoleranceType::Allergy, None)),
    ("MC", (AllergyIntoleranceType::Intolerance, None)),
    (
        "EA",
        (
            AllergyIntoleranceType::Allergy,
            Some(AllergyIntoleranceCategory::Environment),
        ),
    ),
    (
        "PA",
        (
            AllergyIntoleranceType::Allergy,
            Some(AllergyIntoleranceCategory::Environment),
        ),
    ),
    (
        "AA",
        (
            AllergyIntoleranceType::Allergy,
            Some(AllergyIntoleranceCategory::Environment),
        ),
    ),
];

/// Allergy severity (HL7 table 0128) → FHIR reaction severity
pub const ALLERGY_SEVERITY: &[(&str, AllergyIntoleranceSeverity)] = &[
    ("SV", AllergyIntoleranceSeverity::Severe),
    ("MO", AllergyIntoleranceSeverity::Moderate),
    ("MI", AllergyIntoleranceSeverity::Mild),
];

/// Diagnosis type (HL7 table 0052) → display
pub const DIAGNOSIS_TYPES: &[(&str, &str)] = &[
    ("A", "admitting"),
    ("W", "working"),
    ("F", "final"),
    ("I", "interim"),
];

/// Abnormal flag (HL7 table 0078) → interpretation display
pub const INTERPRETATIONS: &[(&str, &str)] = &[
    ("L", "Low"),
    ("H", "High"),
    ("LL", "Critical low"),
    ("HH", "Critical high"),
    ("N", "Normal"),
    ("A", "Abnormal"),
];

/// Observation result status (HL7 table 0085) → FHIR status
pub const OBSERVATION_STATUS: &[(&str, ObservationStatus)] = &[
    ("F", ObservationStatus::Final),
    ("P", ObservationStatus::Preliminary),
    ("C", ObservationStatus::Corrected),
    ("X", ObservationStatus::Cancelled),
    ("R", ObservationStatus::Preliminary),
    ("I", ObservationStatus::Registered),
    ("W", ObservationStatus::EnteredInError),
    ("D", ObservationStatus::EnteredInError),
];

/// HL7 coding system names (table 0396 subset) → system URI
pub const CODING_SYSTEMS: &[(&str, &str)] = &[
    ("LN", system::LOINC),
    ("LOINC", system::LOINC),
    ("SCT", system::SNOMED),
    ("SNM", system::SNOMED),
    ("SNOMED", system::SNOMED),
    ("I10", system::ICD10),
    ("ICD10", system::ICD10),
    ("I10C", system::ICD10),
    ("I9", system::ICD9),
    ("I9C", system::ICD9),
    ("CPT", system::CPT),
    ("C4", system::CPT),
    ("UCUM", system::UCUM),
    ("CDCREC", system::CDC_RACE_ETHNICITY),
];

/// OMB race and ethnicity categories → display
pub const OMB_CATEGORIES: &[(&str, &str)] = &[
    ("1002-5", "American Indian or Alaska Native"),
    ("2028-9", "Asian"),
    ("2054-5", "Black or African American"),
    ("2076-8", "Native Hawaiian or Other Pacific Islander"),
    ("2106-3", "White"),
    ("2135-2", "Hispanic or Latino"),
    ("2186-5", "Not Hispanic or Latino"),
];

/// Marital status (v3) → display
pub const MARITAL_STATUS: &[(&str, &str)] = &[
    ("A", "Annulled"),
    ("D", "Divorced"),
    ("I", "Interlocutory"),
    ("L", "Legally Separated"),
    ("M", "Married"),
    ("P", "Polygamous"),
    ("S", "Never Married"),
    ("T", "Domestic partner"),
    ("U", "unmarried"),
    ("W", "Widowed"),
];

/// Finds `code` in `table`, ignoring ASCII case and surrounding whitespace
pub fn lookup<T: Copy>(table: &[(&str, T)], code: &str) -> Option<T> {
    let code = code.trim();
    table
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(code))
        .map(|(_, value)| *value)
}

/// Address use; defaults to `home`
pub fn address_use_for(code: Option<&str>) -> AddressUse {
    code.and_then(|c| lookup(ADDRESS_USE, c))
        .unwrap_or(AddressUse::Home)
}

/// Identifier type display; `None` for codes outside the table
pub fn identifier_type_display(code: &str) -> Option<&'static str> {
    lookup(IDENTIFIER_TYPES, code)
}

/// Gender; defaults to `unknown`
pub fn gender_for(code: Option<&str>) -> AdministrativeGender {
    code.and_then(|c| lookup(ADMINISTRATIVE_SEX, c))
        .unwrap_or(AdministrativeGender::Unknown)
}

/// Encounter class (code, display); defaults to `IMP`
pub fn encounter_class_for(code: Option<&str>) -> (&'static str, &'static str) {
    code.and_then(|c| lookup(ENCOUNTER_CLASS, c))
        .unwrap_or(("IMP", "inpatient encounter"))
}

/// Allergy type and category; defaults to `allergy` with no category
pub fn allergen_type_for(
    code: Option<&str>,
) -> (AllergyIntoleranceType, Option<AllergyIntoleranceCategory>) {
    code.and_then(|c| lookup(ALLERGEN_TYPES, c))
        .unwrap_or((AllergyIntoleranceType::Allergy, None))
}

/// Observation status; defaults to `final`
pub fn observation_status_for(code: Option<&str>) -> ObservationStatus {
    code.and_then(|c| lookup(OBSERVATION_STATUS, c))
        .unwrap_or(ObservationStatus::Final)
}

/// Coding system URI for an HL7 coding system name
///
/// Values that already look like URIs (`http...`, `urn:...`) pass through.
pub fn coding_system_for(name: &str) -> Option<String> {
    let name = name.trim();
    if name.starts_with("http://") || name.starts_with("https://") || name.starts_with("urn:") {
        return Some(name.to_string());
    }
    lookup(CODING_SYSTEMS, name).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("B", AddressUse::Work)]
    #[test_case("C", AddressUse::Home)]
    #[test_case("H", AddressUse::Home)]
    #[test_case("M", AddressUse::Home)]
    #[test_case("O", AddressUse::Work)]
    #[test_case("P", AddressUse::Home)]
    #[test_case("X", AddressUse::Home ; "unmapped defaults to home")]
    #[test_case("", AddressUse::Home ; "empty defaults to home")]
    fn test_address_use(code: &str, expected: AddressUse) {
        assert_eq!(address_use_for(Some(code)), expected);
    }

    #[test]
    fn test_address_use_absent() {
        assert_eq!(address_use_for(None), AddressUse::Home);
    }

    #[test_case("M", AdministrativeGender::Male)]
    #[test_case("f", AdministrativeGender::Female ; "lowercase")]
    #[test_case("O", AdministrativeGender::Other)]
    #[test_case("U", AdministrativeGender::Unknown)]
    #[test_case("A", AdministrativeGender::Other)]
    #[test_case("N", AdministrativeGender::Unknown)]
    #[test_case("Z", AdministrativeGender::Unknown ; "unmapped")]
    #[test_case("", AdministrativeGender::Unknown ; "empty")]
    fn test_gender(code: &str, expected: AdministrativeGender) {
        assert_eq!(gender_for(Some(code)), expected);
    }

    #[test_case("MR", "Medical record number")]
    #[test_case("SS", "Social Security number")]
    #[test_case("DL", "Driver's license number")]
    #[test_case("PPN", "Passport number")]
    #[test_case("PI", "Patient internal identifier")]
    #[test_case("AN", "Account number")]
    #[test_case("VN", "Visit number")]
    fn test_identifier_type_display(code: &str, display: &str) {
        assert_eq!(identifier_type_display(code), Some(display));
    }

    #[test]
    fn test_identifier_type_display_unknown() {
        assert_eq!(identifier_type_display("XX"), None);
    }

    #[test_case("I", "IMP")]
    #[test_case("O", "AMB")]
    #[test_case("E", "EMER")]
    #[test_case("P", "PRENC")]
    #[test_case("N", "NONAC")]
    #[test_case("R", "PRENC")]
    #[test_case("Q", "IMP" ; "unmapped defaults to inpatient")]
    fn test_encounter_class(code: &str, expected: &str) {
        assert_eq!(encounter_class_for(Some(code)).0, expected);
    }

    #[test_case("DA", AllergyIntoleranceType::Allergy, Some(AllergyIntoleranceCategory::Medication))]
    #[test_case("FA", AllergyIntoleranceType::Allergy, Some(AllergyIntoleranceCategory::Food))]
    #[test_case("MA", AllergyIntoleranceType::Allergy, None)]
    #[test_case("MC", AllergyIntoleranceType::Intolerance, None)]
    #[test_case("EA", AllergyIntoleranceType::Allergy, Some(AllergyIntoleranceCategory::Environment))]
    #[test_case("PA", AllergyIntoleranceType::Allergy, Some(AllergyIntoleranceCategory::Environment))]
    #[test_case("AA", AllergyIntoleranceType::Allergy, Some(AllergyIntoleranceCategory::Environment))]
    #[test_case("ZZ", AllergyIntoleranceType::Allergy, None ; "unmapped")]
    fn test_allergen_type(
        code: &str,
        allergy_type: AllergyIntoleranceType,
        category: Option<AllergyIntoleranceCategory>,
    ) {
        assert_eq!(allergen_type_for(Some(code)), (allergy_type, category));
    }

    #[test_case("SV", AllergyIntoleranceSeverity::Severe)]
    #[test_case("MO", AllergyIntoleranceSeverity::Moderate)]
    #[test_case("MI", AllergyIntoleranceSeverity::Mild)]
    fn test_allergy_severity(code: &str, expected: AllergyIntoleranceSeverity) {
        assert_eq!(lookup(ALLERGY_SEVERITY, code), Some(expected));
    }

    #[test_case("A", "admitting")]
    #[test_case("W", "working")]
    #[test_case("F", "final")]
    #[test_case("I", "interim")]
    fn test_diagnosis_types(code: &str, expected: &str) {
        assert_eq!(lookup(DIAGNOSIS_TYPES, code), Some(expected));
    }

    #[test_case("L", "Low")]
    #[test_case("H", "High")]
    #[test_case("LL", "Critical low")]
    #[test_case("HH", "Critical high")]
    #[test_case("N", "Normal")]
    #[test_case("A", "Abnormal")]
    fn test_interpretations(code: &str, expected: &str) {
        assert_eq!(lookup(INTERPRETATIONS, code), Some(expected));
    }

    #[test_case("F", ObservationStatus::Final)]
    #[test_case("P", ObservationStatus::Preliminary)]
    #[test_case("C", ObservationStatus::Corrected)]
    #[test_case("X", ObservationStatus::Cancelled)]
    #[test_case("R", ObservationStatus::Preliminary)]
    #[test_case("I", ObservationStatus::Registered)]
    #[test_case("W", ObservationStatus::EnteredInError)]
    #[test_case("D", ObservationStatus::EnteredInError)]
    #[test_case("Q", ObservationStatus::Final ; "unmapped defaults to final")]
    fn test_observation_status(code: &str, expected: ObservationStatus) {
        assert_eq!(observation_status_for(Some(code)), expected);
    }

    #[test]
    fn test_observation_status_absent_is_final() {
        assert_eq!(observation_status_for(None), ObservationStatus::Final);
    }

    #[test_case("LN", Some(system::LOINC))]
    #[test_case("sct", Some(system::SNOMED) ; "lowercase name")]
    #[test_case("I10", Some(system::ICD10))]
    #[test_case("C4", Some(system::CPT))]
    #[test_case("http://example.org/codes", Some("http://example.org/codes") ; "uri passes through")]
    #[test_case("urn:oid:1.2.3", Some("urn:oid:1.2.3") ; "oid passes through")]
    #[test_case("LOCAL", None)]
    fn test_coding_system(name: &str, expected: Option<&str>) {
        assert_eq!(coding_system_for(name).as_deref(), expected);
    }

    #[test]
    fn test_tables_have_unique_codes() {
        fn assert_unique<T>(table: &[(&str, T)]) {
            let mut codes: Vec<&str> = table.iter().map(|(code, _)| *code).collect();
            codes.sort_unstable();
            let len = codes.len();
            codes.dedup();
            assert_eq!(codes.len(), len);
        }

        assert_unique(ADDRESS_USE);
        assert_unique(IDENTIFIER_TYPES);
        assert_unique(ADMINISTRATIVE_SEX);
        assert_unique(ENCOUNTER_CLASS);
        assert_unique(ALLERGEN_TYPES);
        assert_unique(ALLERGY_SEVERITY);
        assert_unique(DIAGNOSIS_TYPES);
        assert_unique(INTERPRETATIONS);
        assert_unique(OBSERVATION_STATUS);
        assert_unique(CODING_SYSTEMS);
        assert_unique(OMB_CATEGORIES);
        assert_unique(MARITAL_STATUS);
    }
}
