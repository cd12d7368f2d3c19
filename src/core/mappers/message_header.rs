//! MSH → MessageHeader

use crate::core::normalize::normalize_datetime;
use crate::core::tables::system;
use crate::domain::fhir::resources::{MessageDestination, MessageHeader, MessageSource};
use crate::domain::fhir::{Coding, Reference};
use crate::domain::ids::AssignedId;
use crate::domain::message::SegmentFields;

const DEFAULT_EVENT: &str = "ADT";
const DEFAULT_VERSION: &str = "2.5";

/// Builds the message header
///
/// MSH fields are numbered so that MSH-1 is the field separator and MSH-3 the
/// sending application.
pub fn map_message_header(msh: &SegmentFields, id: &AssignedId) -> MessageHeader {
    let message_type = msh.field(9);
    let event = message_type
        .value(1)
        .or_else(|| message_type.value(0))
        .unwrap_or(DEFAULT_EVENT);

    let sending_application = msh.field(3).first().map(str::to_string);
    let source = MessageSource {
        name: sending_application.clone(),
        software: sending_application,
        endpoint: msh.field(4).first().map(|f| format!("urn:oid:{f}")),
    };

    let receiving_application = msh.field(5).first();
    let receiving_facility = msh.field(6).first();
    let destination = if receiving_application.is_some() || receiving_facility.is_some() {
        vec![MessageDestination {
            name: receiving_application.map(str::to_string),
            endpoint: receiving_facility.map(|f| format!("urn:oid:{f}")),
        }]
    } else {
        Vec::new()
    };

    let version = msh.field(12).first().unwrap_or(DEFAULT_VERSION);

    MessageHeader {
        id: id.id().to_string(),
        event_coding: Coding::new(system::V2_EVENT_TYPE, event),
        timestamp: msh.field(7).first().and_then(normalize_datetime),
        destination,
        source,
        focus: vec![Reference::to(format!("http://hl7.org/fhir/v2/{version}"))],
    }
}
