//! Parsed HL7 v2 message model
//!
//! This is the shape the tokenizer hands to the mapping engine: an ordered
//! segment list where each segment may or may not carry a parsed body.

use super::field::RawField;
use std::fmt;
use std::str::FromStr;

static ABSENT: RawField = RawField::Absent;

/// Segment kinds the converter knows how to map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    /// Message header
    Msh,
    /// Patient identification
    Pid,
    /// Patient visit
    Pv1,
    /// Next of kin
    Nk1,
    /// Allergy information
    Al1,
    /// Diagnosis
    Dg1,
    /// Procedure
    Pr1,
    /// Insurance
    In1,
    /// Insurance additional information
    In2,
    /// Observation/result
    Obx,
}

impl SegmentKind {
    /// The three-letter segment identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            SegmentKind::Msh => "MSH",
            SegmentKind::Pid => "PID",
            SegmentKind::Pv1 => "PV1",
            SegmentKind::Nk1 => "NK1",
            SegmentKind::Al1 => "AL1",
            SegmentKind::Dg1 => "DG1",
            SegmentKind::Pr1 => "PR1",
            SegmentKind::In1 => "IN1",
            SegmentKind::In2 => "IN2",
            SegmentKind::Obx => "OBX",
        }
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SegmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MSH" => Ok(SegmentKind::Msh),
            "PID" => Ok(SegmentKind::Pid),
            "PV1" => Ok(SegmentKind::Pv1),
            "NK1" => Ok(SegmentKind::Nk1),
            "AL1" => Ok(SegmentKind::Al1),
            "DG1" => Ok(SegmentKind::Dg1),
            "PR1" => Ok(SegmentKind::Pr1),
            "IN1" => Ok(SegmentKind::In1),
            "IN2" => Ok(SegmentKind::In2),
            "OBX" => Ok(SegmentKind::Obx),
            other => Err(format!("Unsupported segment type: {other}")),
        }
    }
}

/// Numbered fields of one segment (field 1 is the first after the segment id)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SegmentFields {
    fields: Vec<RawField>,
}

impl SegmentFields {
    /// Creates fields from an ordered list, element 0 being field 1
    pub fn new(fields: Vec<RawField>) -> Self {
        Self { fields }
    }

    /// Field `number` (1-based); absent when out of range
    pub fn field(&self, number: usize) -> &RawField {
        number
            .checked_sub(1)
            .and_then(|index| self.fields.get(index))
            .unwrap_or(&ABSENT)
    }

    /// Number of fields carried
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the segment carries no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// One segment occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Three-character segment identifier as it appeared in the text
    pub segment_type: String,

    /// Parsed body; `None` when the segment body could not be parsed
    pub parsed: Option<SegmentFields>,
}

impl Segment {
    /// Creates a segment with a parsed body
    pub fn new(segment_type: impl Into<String>, fields: Vec<RawField>) -> Self {
        Self {
            segment_type: segment_type.into(),
            parsed: Some(SegmentFields::new(fields)),
        }
    }

    /// Creates a segment whose body is missing
    pub fn unparsed(segment_type: impl Into<String>) -> Self {
        Self {
            segment_type: segment_type.into(),
            parsed: None,
        }
    }

    /// Known kind of this segment, if any
    pub fn kind(&self) -> Option<SegmentKind> {
        self.segment_type.parse().ok()
    }
}

/// Ordered segment list of one message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedMessage {
    /// Segments in source order
    pub segments: Vec<Segment>,
}

impl ParsedMessage {
    /// Creates a message from segments in source order
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parsed bodies of every segment of `kind`, source order, skipping
    /// segments without a body
    pub fn bodies(&self, kind: SegmentKind) -> impl Iterator<Item = &SegmentFields> + '_ {
        self.segments
            .iter()
            .filter(move |segment| segment.kind() == Some(kind))
            .filter_map(|segment| segment.parsed.as_ref())
    }

    /// Parsed body of the first segment of `kind`
    pub fn first_body(&self, kind: SegmentKind) -> Option<&SegmentFields> {
        self.segments
            .iter()
            .find(|segment| segment.kind() == Some(kind))
            .and_then(|segment| segment.parsed.as_ref())
    }
}
