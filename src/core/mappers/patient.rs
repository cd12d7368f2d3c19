//! PID → Patient

use super::MappingContext;
use crate::core::normalize::{
    identifier_type, normalize_address, normalize_date, normalize_datetime, normalize_gender,
    normalize_identifier, normalize_name, IdentifierOptions,
};
use crate::core::tables::{extension_url, lookup, system, MARITAL_STATUS, OMB_CATEGORIES};
use crate::domain::fhir::resources::{Deceased, Patient, PatientCommunication};
use crate::domain::fhir::{CodeableConcept, Coding, ContactPoint, ContactPointUse, Extension, Identifier};
use crate::domain::field::{Instance, RawField};
use crate::domain::ids::AssignedId;
use crate::domain::message::SegmentFields;

/// Builds the patient
pub fn map_patient(
    pid: &SegmentFields,
    id: &AssignedId,
    context: &MappingContext<'_>,
) -> Patient {
    let mut extension = race_and_ethnicity(pid.field(10), extension_url::US_CORE_RACE);
    extension.extend(race_and_ethnicity(pid.field(22), extension_url::US_CORE_ETHNICITY));

    let mut telecom = phones(pid.field(13), ContactPointUse::Home);
    telecom.extend(phones(pid.field(14), ContactPointUse::Work));

    Patient {
        id: id.id().to_string(),
        extension,
        identifier: identifiers(pid, context),
        name: pid.field(5).values().into_iter().filter_map(normalize_name).collect(),
        telecom,
        gender: normalize_gender(pid.field(8).first().unwrap_or_default()),
        birth_date: pid.field(7).first().and_then(normalize_date),
        deceased: deceased(pid),
        address: pid.field(11).values().into_iter().filter_map(normalize_address).collect(),
        marital_status: pid.field(16).instance().and_then(marital_status),
        communication: pid
            .field(15)
            .instance()
            .and_then(language)
            .map(|language| vec![PatientCommunication { language }])
            .unwrap_or_default(),
    }
}

fn identifiers(pid: &SegmentFields, context: &MappingContext<'_>) -> Vec<Identifier> {
    let systems = context.systems;
    let mut identifiers: Vec<Identifier> = pid
        .field(3)
        .values()
        .into_iter()
        .filter_map(|value| {
            normalize_identifier(
                value,
                IdentifierOptions::new(systems.medical_record.as_deref(), "MR"),
            )
        })
        .collect();

    let account = pid.field(18).instance().and_then(|value| {
        normalize_identifier(value, IdentifierOptions::new(systems.account.as_deref(), "AN"))
    });
    let ssn = pid.field(19).instance().and_then(|value| {
        normalize_identifier(value, IdentifierOptions::new(Some(system::US_SSN), "SS"))
    });
    let license = pid.field(20).first().map(|number| Identifier {
        identifier_type: Some(identifier_type("DL")),
        system: systems.drivers_license.clone(),
        ..Identifier::value(number)
    });

    identifiers.extend(account);
    identifiers.extend(ssn);
    identifiers.extend(license);
    identifiers
}

/// One US Core extension per repetition: an `ombCategory` coding plus `text`
fn race_and_ethnicity(field: &RawField, url: &str) -> Vec<Extension> {
    field
        .values()
        .into_iter()
        .filter_map(|value| {
            let code = value.component(0);
            let display = value
                .component(1)
                .or_else(|| code.and_then(|c| lookup(OMB_CATEGORIES, c)));
            let text = display.or(code)?;

            let mut parts = Vec::new();
            if let Some(code) = code {
                parts.push(Extension::coding(
                    "ombCategory",
                    Coding::new(system::CDC_RACE_ETHNICITY, code).with_optional_display(display),
                ));
            }
            parts.push(Extension::string("text", text));
            Some(Extension::complex(url, parts))
        })
        .collect()
}

fn phones(field: &RawField, contact_use: ContactPointUse) -> Vec<ContactPoint> {
    field
        .values()
        .into_iter()
        .filter_map(|value| value.first())
        .map(|number| ContactPoint::phone(number, contact_use))
        .collect()
}

fn marital_status(value: Instance<'_>) -> Option<CodeableConcept> {
    let code = value.first()?;
    let display = value.component(1).or_else(|| lookup(MARITAL_STATUS, code));
    Some(CodeableConcept::from_coding(
        Coding::new(system::V3_MARITAL_STATUS, code).with_optional_display(display),
    ))
}

fn language(value: Instance<'_>) -> Option<CodeableConcept> {
    let code = value.first()?;
    Some(CodeableConcept::from_coding(
        Coding::new(system::BCP47, code).with_optional_display(value.component(1)),
    ))
}

/// `deceasedDateTime` wins over the `Y` indicator; never both
fn deceased(pid: &SegmentFields) -> Option<Deceased> {
    if let Some(at) = pid.field(29).first().and_then(normalize_datetime) {
        return Some(Deceased::DateTime(at));
    }
    (pid.field(30).first() == Some("Y")).then_some(Deceased::Boolean(true))
}
