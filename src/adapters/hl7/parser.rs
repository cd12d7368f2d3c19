//! Pipe-delimited HL7 v2 tokenizer
//!
//! Splits raw message text into segments and tagged fields. Delimiters are
//! read from the MSH header; escape sequences are decoded per leaf value
//! after splitting so escaped delimiters never split a field.

use super::MessageTokenizer;
use crate::domain::errors::ParseError;
use crate::domain::field::{Component, FieldValue, RawField};
use crate::domain::message::{ParsedMessage, Segment};

const HEADER_ID: &str = "MSH";

/// Message delimiters declared in MSH-1 and MSH-2
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Delimiters {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Reads the delimiters from an MSH line
    ///
    /// Returns the delimiters and the raw encoding characters (MSH-2).
    pub fn from_header(line: &str) -> Result<(Self, String), ParseError> {
        let mut chars = line.chars().skip(HEADER_ID.len());
        let field = chars
            .next()
            .ok_or_else(|| ParseError::HeaderTooShort(line.to_string()))?;

        let encoding: String = chars.take_while(|c| *c != field).collect();
        let encoding = encoding.trim_end().to_string();
        let mut encoding_chars = encoding.chars();
        let (Some(component), Some(repetition), Some(escape), Some(subcomponent)) = (
            encoding_chars.next(),
            encoding_chars.next(),
            encoding_chars.next(),
            encoding_chars.next(),
        ) else {
            return Err(ParseError::HeaderTooShort(line.to_string()));
        };

        let delimiters = Self {
            field,
            component,
            repetition,
            escape,
            subcomponent,
        };
        if !delimiters.are_distinct() {
            return Err(ParseError::InvalidEncodingCharacters(format!("{field}{encoding}")));
        }
        Ok((delimiters, encoding))
    }

    fn are_distinct(&self) -> bool {
        let all = [
            self.field,
            self.component,
            self.repetition,
            self.escape,
            self.subcomponent,
        ];
        all.iter()
            .enumerate()
            .all(|(i, c)| !c.is_alphanumeric() && !c.is_whitespace() && !all[i + 1..].contains(c))
    }

    /// Decodes `\F\ \S\ \T\ \R\ \E\`; other escape sequences are kept as sent
    pub fn unescape(&self, text: &str) -> String {
        if !text.contains(self.escape) {
            return text.to_string();
        }

        let mut out = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(start) = rest.find(self.escape) {
            out.push_str(&rest[..start]);
            let after = &rest[start + self.escape.len_utf8()..];
            let Some(end) = after.find(self.escape) else {
                out.push_str(&rest[start..]);
                rest = "";
                break;
            };

            match &after[..end] {
                "F" => out.push(self.field),
                "S" => out.push(self.component),
                "T" => out.push(self.subcomponent),
                "R" => out.push(self.repetition),
                "E" => out.push(self.escape),
                other => {
                    out.push(self.escape);
                    out.push_str(other);
                    out.push(self.escape);
                }
            }
            rest = &after[end + self.escape.len_utf8()..];
        }
        out.push_str(rest);
        out
    }

    /// Builds the tagged value of one field's text
    pub fn field(&self, text: &str) -> RawField {
        if text.is_empty() {
            return RawField::Absent;
        }

        let mut repetitions: Vec<FieldValue> = text
            .split(self.repetition)
            .map(|value| self.value(value))
            .collect();
        if repetitions.len() > 1 {
            return RawField::Repetition(repetitions);
        }
        match repetitions.pop() {
            Some(FieldValue::Scalar(value)) => RawField::Scalar(value),
            Some(FieldValue::Components(components)) => RawField::Components(components),
            None => RawField::Absent,
        }
    }

    fn value(&self, text: &str) -> FieldValue {
        if !text.contains(self.component) && !text.contains(self.subcomponent) {
            return FieldValue::Scalar(self.unescape(text));
        }
        FieldValue::Components(
            text.split(self.component)
                .map(|component| self.component_value(component))
                .collect(),
        )
    }

    fn component_value(&self, text: &str) -> Component {
        if text.contains(self.subcomponent) {
            Component::Sub(
                text.split(self.subcomponent)
                    .map(|sub| self.unescape(sub))
                    .collect(),
            )
        } else {
            Component::Text(self.unescape(text))
        }
    }
}

/// Tokenizer for standard `\r`-separated pipe-delimited messages
///
/// `\n` and `\r\n` segment terminators are accepted as well.
#[derive(Debug, Clone, Copy, Default)]
pub struct PipeTokenizer;

impl MessageTokenizer for PipeTokenizer {
    fn tokenize(&self, text: &str) -> Result<ParsedMessage, ParseError> {
        parse_message(text)
    }
}

/// Parses raw message text into a segment list
///
/// # Examples
///
/// ```
/// use ferry::adapters::hl7::parse_message;
///
/// let message = parse_message("MSH|^~\\&|APP|FAC\rPID|1||12345^^^HOSP^MR").unwrap();
/// let pid = message.segments[1].parsed.as_ref().unwrap();
///
/// assert_eq!(message.segments.len(), 2);
/// assert_eq!(pid.field(3).first(), Some("12345"));
/// ```
///
/// # Errors
///
/// Returns [`ParseError::MissingHeader`] when the first segment is not MSH,
/// [`ParseError::HeaderTooShort`] or [`ParseError::InvalidEncodingCharacters`]
/// when the delimiters cannot be read, and [`ParseError::InvalidSegmentId`]
/// for a malformed segment identifier.
pub fn parse_message(text: &str) -> Result<ParsedMessage, ParseError> {
    let mut lines = text
        .split(['\r', '\n'])
        .map(str::trim_start)
        .filter(|line| !line.trim_end().is_empty());

    let header = lines.next().ok_or(ParseError::MissingHeader)?;
    if !header.starts_with(HEADER_ID) {
        return Err(ParseError::MissingHeader);
    }
    let (delimiters, encoding) = Delimiters::from_header(header)?;

    let mut segments = vec![parse_header(header, &delimiters, encoding)];
    for line in lines {
        segments.push(parse_segment(line, &delimiters)?);
    }

    Ok(ParsedMessage::new(segments))
}

/// MSH is numbered so MSH-1 is the field separator and MSH-2 the encoding
/// characters
fn parse_header(line: &str, delimiters: &Delimiters, encoding: String) -> Segment {
    let mut fields = vec![
        RawField::Scalar(delimiters.field.to_string()),
        RawField::Scalar(encoding),
    ];

    // Skip "MSH|" and the encoding characters; what follows starts at MSH-3
    let body: String = line
        .chars()
        .skip(HEADER_ID.len() + 1)
        .skip_while(|c| *c != delimiters.field)
        .skip(1)
        .collect();
    if line.chars().skip(HEADER_ID.len() + 1).any(|c| c == delimiters.field) {
        fields.extend(body.split(delimiters.field).map(|text| delimiters.field(text)));
    }

    Segment::new(HEADER_ID, fields)
}

fn parse_segment(line: &str, delimiters: &Delimiters) -> Result<Segment, ParseError> {
    let (id, body) = match line.split_once(delimiters.field) {
        Some((id, body)) => (id, Some(body)),
        None => (line, None),
    };

    if id.len() != 3
        || !id
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    {
        return Err(ParseError::InvalidSegmentId(id.to_string()));
    }

    let body = body.filter(|body| body.chars().any(|c| c != delimiters.field));
    Ok(match body {
        Some(body) => Segment::new(
            id,
            body.split(delimiters.field)
                .map(|text| delimiters.field(text))
                .collect(),
        ),
        None => Segment::unparsed(id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::message::SegmentKind;

    const ADT: &str = "MSH|^~\\&|SENDAPP|SENDFAC|RECVAPP|RECVFAC|20240115083000||ADT^A01|MSG001|P|2.5\r\
                       PID|1||123456^^^HOSP^MR~987^^^CLINIC^PI||DOE^JOHN^Q\r\
                       PV1|1|I|ICU^101^A";

    #[test]
    fn test_header_numbering() {
        let message = parse_message(ADT).unwrap();
        let msh = message.first_body(SegmentKind::Msh).unwrap();

        assert_eq!(msh.field(1), &RawField::Scalar("|".to_string()));
        assert_eq!(msh.field(2), &RawField::Scalar("^~\\&".to_string()));
        assert_eq!(msh.field(3).first(), Some("SENDAPP"));
        assert_eq!(msh.field(7).first(), Some("20240115083000"));
        assert_eq!(msh.field(9).value(1), Some("A01"));
        assert_eq!(msh.field(10).first(), Some("MSG001"));
        assert_eq!(msh.field(12).first(), Some("2.5"));
    }

    #[test]
    fn test_field_shapes() {
        let message = parse_message(ADT).unwrap();
        let pid = message.first_body(SegmentKind::Pid).unwrap();

        assert_eq!(pid.field(1), &RawField::Scalar("1".to_string()));
        assert_eq!(pid.field(2), &RawField::Absent);
        assert!(matches!(pid.field(3), RawField::Repetition(reps) if reps.len() == 2));
        assert!(matches!(pid.field(5), RawField::Components(c) if c.len() == 3));
    }

    #[test]
    fn test_line_endings() {
        let crlf = ADT.replace('\r', "\r\n");
        let lf = ADT.replace('\r', "\n");
        let expected = parse_message(ADT).unwrap();
        assert_eq!(parse_message(&crlf).unwrap(), expected);
        assert_eq!(parse_message(&lf).unwrap(), expected);
    }

    #[test]
    fn test_trailing_field_whitespace_kept() {
        let message =
            parse_message("MSH|^~\\&\r  \rOBX|1|ST|X||Indented text  \r\n").unwrap();
        assert_eq!(message.segments.len(), 2);

        let obx = message.first_body(SegmentKind::Obx).unwrap();
        assert_eq!(obx.field(5), &RawField::Scalar("Indented text  ".to_string()));
    }

    #[test]
    fn test_subcomponents() {
        let message = parse_message("MSH|^~\\&\rPID|1||12345^^^HOSP&1.2.3&ISO^MR").unwrap();
        let pid = message.first_body(SegmentKind::Pid).unwrap();
        match pid.field(3) {
            RawField::Components(components) => {
                assert_eq!(
                    components[3],
                    Component::Sub(vec!["HOSP".to_string(), "1.2.3".to_string(), "ISO".to_string()])
                );
            }
            other => panic!("unexpected field {other:?}"),
        }
    }

    #[test]
    fn test_escape_sequences() {
        let delimiters = Delimiters::default();
        assert_eq!(delimiters.unescape("A\\F\\B\\S\\C\\T\\D\\R\\E\\E\\"), "A|B^C&D~E\\");
        assert_eq!(delimiters.unescape("keep \\H\\bold"), "keep \\H\\bold");
        assert_eq!(delimiters.unescape("dangling \\F"), "dangling \\F");

        let message = parse_message("MSH|^~\\&\rOBX|1|ST|X||Smith \\T\\ Sons\\S\\Ltd").unwrap();
        let obx = message.first_body(SegmentKind::Obx).unwrap();
        assert_eq!(obx.field(5), &RawField::Scalar("Smith & Sons^Ltd".to_string()));
    }

    #[test]
    fn test_custom_delimiters() {
        let message = parse_message("MSH#!@$%#APP\rPID#1##A!B@C").unwrap();
        let msh = message.first_body(SegmentKind::Msh).unwrap();
        assert_eq!(msh.field(3).first(), Some("APP"));

        let pid = message.first_body(SegmentKind::Pid).unwrap();
        let values = pid.field(3).values();
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].component(1), Some("B"));
        assert_eq!(values[1].first(), Some("C"));
    }

    #[test]
    fn test_segment_without_fields_is_unparsed() {
        let message = parse_message("MSH|^~\\&\rPV1\rPV1|||\rPV1|1").unwrap();
        assert!(message.segments[1].parsed.is_none());
        assert!(message.segments[2].parsed.is_none());
        assert!(message.segments[3].parsed.is_some());
    }

    #[test]
    fn test_header_only_message() {
        let message = parse_message("MSH|^~\\&").unwrap();
        let msh = message.first_body(SegmentKind::Msh).unwrap();
        assert_eq!(msh.len(), 2);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_message(""), Err(ParseError::MissingHeader));
        assert_eq!(parse_message("PID|1"), Err(ParseError::MissingHeader));
        assert!(matches!(parse_message("MSH|^~"), Err(ParseError::HeaderTooShort(_))));
        assert!(matches!(parse_message("MSH"), Err(ParseError::HeaderTooShort(_))));
        assert!(matches!(
            parse_message("MSH|^^\\&"),
            Err(ParseError::InvalidEncodingCharacters(_))
        ));
        assert_eq!(
            parse_message("MSH|^~\\&\rpid|1"),
            Err(ParseError::InvalidSegmentId("pid".to_string()))
        );
        assert_eq!(
            parse_message("MSH|^~\\&\rPIDX|1"),
            Err(ParseError::InvalidSegmentId("PIDX".to_string()))
        );
    }
}
