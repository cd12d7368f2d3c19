//! IN1 (+ paired IN2) → Coverage

use super::MappingContext;
use crate::core::normalize::{
    identifier_type, normalize_coded, normalize_date, normalize_identifier, normalize_name,
    IdentifierOptions,
};
use crate::core::tables::system;
use crate::domain::fhir::resources::Coverage;
use crate::domain::fhir::{Identifier, Period, Reference};
use crate::domain::ids::AssignedId;
use crate::domain::message::SegmentFields;

/// True when `in2` belongs to the insurance segment with `set_id`
///
/// An IN2 pairs with an IN1 when its own first field equals the IN1 set id.
pub fn pairs_with(in2: &SegmentFields, set_id: Option<&str>) -> bool {
    match (in2.field(1).first(), set_id) {
        (Some(own), Some(set_id)) => own.trim() == set_id.trim(),
        _ => false,
    }
}

/// Builds an active coverage
///
/// `in2` is the paired additional-information segment, if any. It supplies the
/// insured's SSN and, when IN1-17 is empty, the relationship.
pub fn map_coverage(
    in1: &SegmentFields,
    in2: Option<&SegmentFields>,
    id: &AssignedId,
    context: &MappingContext<'_>,
) -> Coverage {
    let payor = payor(in1).into_iter().collect();

    let subscriber_display = in1
        .field(16)
        .instance()
        .and_then(normalize_name)
        .map(|name| name.display());
    let subscriber_identifier = in2
        .and_then(|in2| in2.field(2).first())
        .map(|ssn| Identifier {
            identifier_type: Some(identifier_type("SS")),
            system: Some(system::US_SSN.to_string()),
            ..Identifier::value(ssn)
        });
    let subscriber = if subscriber_display.is_some() || subscriber_identifier.is_some() {
        Some(Reference {
            reference: None,
            identifier: subscriber_identifier,
            display: subscriber_display,
        })
    } else {
        None
    };

    let relationship = in1
        .field(17)
        .instance()
        .filter(|value| value.has_content())
        .or_else(|| in2.and_then(|in2| in2.field(72).instance()))
        .and_then(|value| normalize_coded(value, system::SUBSCRIBER_RELATIONSHIP));

    let policy = in1.field(36).first().map(|number| Identifier {
        system: context.systems.policy.clone(),
        ..Identifier::value(number)
    });

    Coverage {
        id: id.id().to_string(),
        identifier: policy.into_iter().collect(),
        status: "active".to_string(),
        subscriber,
        subscriber_id: in1.field(8).first().map(str::to_string),
        beneficiary: context.patient_reference(),
        relationship,
        period: Period::from_bounds(
            in1.field(12).first().and_then(normalize_date),
            in1.field(13).first().and_then(normalize_date),
        ),
        payor,
    }
}

/// Insurance company as a display/identifier-only reference (IN1-4, IN1-3)
fn payor(in1: &SegmentFields) -> Option<Reference> {
    let display = in1.field(4).first().map(str::to_string);
    let identifier = in1
        .field(3)
        .instance()
        .and_then(|value| normalize_identifier(value, IdentifierOptions::default()));
    if display.is_none() && identifier.is_none() {
        return None;
    }
    Some(Reference {
        reference: None,
        identifier,
        display,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdentifierSystems;
    use crate::core::mappers::test_support::segment;
    use crate::domain::ids::ResourceType;
    use serde_json::json;

    fn body(fields: &[(usize, &str)], width: usize) -> SegmentFields {
        let mut slots = vec![""; width];
        for &(n, text) in fields {
            slots[n - 1] = text;
        }
        segment(&slots.join("|"))
    }

    fn coverage(in1: &SegmentFields, in2: Option<&SegmentFields>) -> Coverage {
        let patient = AssignedId::new(ResourceType::Patient, "patient-1");
        let id = AssignedId::new(ResourceType::Coverage, "coverage-1");
        let systems = IdentifierSystems {
            policy: Some("urn:oid:1.2.3.99".to_string()),
            ..Default::default()
        };
        map_coverage(in1, in2, &id, &MappingContext::new(&patient, &systems))
    }

    #[test]
    fn test_insurance_fields() {
        let in1 = body(
            &[
                (1, "1"),
                (2, "PPO"),
                (3, "AETNA01^^^2.16.840.1.113883.3.1"),
                (4, "Aetna"),
                (8, "GRP100"),
                (12, "20240101"),
                (13, "20241231120000"),
                (16, "DOE^JOHN^Q"),
                (17, "SEL^Self"),
                (36, "POL-778"),
            ],
            36,
        );
        let value = serde_json::to_value(coverage(&in1, None)).unwrap();

        assert_eq!(
            value,
            json!({
                "id": "coverage-1",
                "identifier": [{"system": "urn:oid:1.2.3.99", "value": "POL-778"}],
                "status": "active",
                "subscriber": {"display": "JOHN Q DOE"},
                "subscriberId": "GRP100",
                "beneficiary": {"reference": "Patient/patient-1"},
                "relationship": {
                    "coding": [{
                        "system": "http://terminology.hl7.org/CodeSystem/subscriber-relationship",
                        "code": "SEL",
                        "display": "Self"
                    }],
                    "text": "Self"
                },
                "period": {"start": "2024-01-01", "end": "2024-12-31"},
                "payor": [{
                    "identifier": {"system": "urn:oid:2.16.840.1.113883.3.1", "value": "AETNA01"},
                    "display": "Aetna"
                }]
            })
        );
    }

    #[test]
    fn test_paired_in2_supplies_ssn_and_relationship() {
        let in1 = body(&[(1, "1"), (4, "Aetna")], 36);
        let in2 = body(&[(1, "1"), (2, "123-45-6789"), (72, "01^Spouse")], 72);
        assert!(pairs_with(&in2, Some("1")));

        let coverage = coverage(&in1, Some(&in2));
        let subscriber = coverage.subscriber.unwrap();
        let identifier = subscriber.identifier.unwrap();
        assert_eq!(identifier.value, "123-45-6789");
        assert_eq!(identifier.system.as_deref(), Some(system::US_SSN));
        assert!(subscriber.display.is_none());
        assert_eq!(coverage.relationship.unwrap().text.as_deref(), Some("Spouse"));
    }

    #[test]
    fn test_in1_relationship_wins_over_in2() {
        let in1 = body(&[(1, "1"), (17, "CHD")], 36);
        let in2 = body(&[(1, "1"), (72, "01")], 72);
        let coverage = coverage(&in1, Some(&in2));
        assert_eq!(coverage.relationship.unwrap().coding[0].code.as_deref(), Some("CHD"));
    }

    #[test]
    fn test_pairing_rules() {
        let in2 = body(&[(1, "2")], 2);
        assert!(!pairs_with(&in2, Some("1")));
        assert!(!pairs_with(&in2, None));
        assert!(pairs_with(&in2, Some(" 2 ")));
        assert!(!pairs_with(&body(&[], 2), Some("1")));
    }

    #[test]
    fn test_minimal_coverage() {
        let coverage = coverage(&body(&[(1, "1")], 2), None);
        assert!(coverage.payor.is_empty());
        assert!(coverage.subscriber.is_none());
        assert!(coverage.identifier.is_empty());
        assert!(coverage.period.is_none());
    }
}
