//! OBX → Observation

use super::{practitioner, MappingContext};
use crate::core::normalize::{normalize_coded, normalize_datetime, normalize_quantity, Unit};
use crate::core::tables::{lookup, observation_status_for, system, INTERPRETATIONS};
use crate::domain::fhir::resources::{Observation, ObservationValue, ReferenceRange};
use crate::domain::fhir::{CodeableConcept, Coding};
use crate::domain::field::RawField;
use crate::domain::ids::AssignedId;
use crate::domain::message::SegmentFields;
use regex::Regex;
use std::sync::OnceLock;

const DEFAULT_VALUE_TYPE: &str = "ST";

/// `low - high [unit]`; each bound may carry its own minus sign
const RANGE_PATTERN: &str = r"^\s*(-?\d+(?:\.\d+)?)\s*-\s*(-?\d+(?:\.\d+)?)\s*(\S+)?\s*$";

/// Builds an observation
///
/// The value element is chosen by the value type in OBX-2.
pub fn map_observation(
    obx: &SegmentFields,
    id: &AssignedId,
    context: &MappingContext<'_>,
) -> Observation {
    let value_type = obx
        .field(2)
        .first()
        .unwrap_or(DEFAULT_VALUE_TYPE)
        .trim()
        .to_ascii_uppercase();
    let unit = obx.field(6).instance().and_then(Unit::from_instance);

    Observation {
        id: id.id().to_string(),
        status: observation_status_for(obx.field(11).first()),
        code: obx
            .field(3)
            .instance()
            .and_then(|value| normalize_coded(value, system::LOINC)),
        subject: context.patient_reference(),
        encounter: context.encounter_reference(),
        effective_date_time: obx.field(14).first().and_then(normalize_datetime),
        performer: practitioner("observation-performer", obx.field(15))
            .into_iter()
            .collect(),
        value: observation_value(obx.field(5), &value_type, unit.as_ref()),
        interpretation: interpretation(obx.field(8)).into_iter().collect(),
        method: obx
            .field(17)
            .instance()
            .and_then(|value| normalize_coded(value, system::SNOMED)),
        reference_range: reference_range(obx.field(7), unit.as_ref())
            .into_iter()
            .collect(),
    }
}

fn observation_value(
    field: &RawField,
    value_type: &str,
    unit: Option<&Unit>,
) -> Option<ObservationValue> {
    match value_type {
        "NM" => field
            .first()
            .and_then(|raw| normalize_quantity(raw, unit))
            .map(ObservationValue::Quantity),
        // Structured numeric: Comparator^Num1^Separator^Num2
        "SN" => field
            .value(1)
            .and_then(|raw| normalize_quantity(raw, unit))
            .map(ObservationValue::Quantity),
        "DT" | "DTM" | "TM" | "TS" => field
            .first()
            .and_then(normalize_datetime)
            .map(ObservationValue::DateTime),
        "CE" | "CWE" => field
            .instance()
            .and_then(|value| normalize_coded(value, system::SNOMED))
            .map(ObservationValue::CodeableConcept),
        _ => raw_text(field).map(ObservationValue::String),
    }
}

/// Field text as sent, repetitions joined with `~`
fn raw_text(field: &RawField) -> Option<String> {
    let parts: Vec<String> = field.values().iter().filter_map(|v| v.text()).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("~"))
    }
}

fn range_regex() -> Option<&'static Regex> {
    static RANGE: OnceLock<Option<Regex>> = OnceLock::new();
    RANGE.get_or_init(|| Regex::new(RANGE_PATTERN).ok()).as_ref()
}

/// `low-high [unit]` becomes bounds; anything else stays text
fn reference_range(field: &RawField, unit: Option<&Unit>) -> Option<ReferenceRange> {
    let text = field.instance()?.text()?;

    if let Some(captures) = range_regex().and_then(|re| re.captures(&text)) {
        let range_unit = captures.get(3).and_then(|u| Unit::ucum(u.as_str()));
        let unit = range_unit.as_ref().or(unit);
        let low = normalize_quantity(&captures[1], unit);
        let high = normalize_quantity(&captures[2], unit);
        if low.is_some() && high.is_some() {
            return Some(ReferenceRange {
                low,
                high,
                text: None,
            });
        }
    }

    Some(ReferenceRange {
        low: None,
        high: None,
        text: Some(text),
    })
}

/// Abnormal flags; the last repetition with a known flag wins
fn interpretation(field: &RawField) -> Option<CodeableConcept> {
    let (code, display) = field
        .values()
        .iter()
        .filter_map(|value| value.first())
        .filter_map(|code| {
            lookup(INTERPRETATIONS, code).map(|display| (code.trim().to_ascii_uppercase(), display))
        })
        .last()?;
    Some(CodeableConcept::from_coding(
        Coding::new(system::V3_OBSERVATION_INTERPRETATION, code).with_display(display),
    ))
}
