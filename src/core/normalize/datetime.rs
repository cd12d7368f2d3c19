//! HL7 timestamp normalization
//!
//! `YYYYMMDD[HHMM[SS]]` becomes `YYYY-MM-DD` or `YYYY-MM-DDTHH:MM:SS`. Offsets
//! and fractional seconds are dropped. Output fed back in normalizes to itself.

/// Normalizes an HL7 DTM/TS value
///
/// Returns `None` for values shorter than eight digits. A time part is only
/// emitted when all fourteen digits are present. A zero month or day becomes
/// `01`.
///
/// # Examples
///
/// ```
/// use ferry::core::normalize::datetime::normalize_datetime;
///
/// assert_eq!(normalize_datetime("19800115"), Some("1980-01-15".to_string()));
/// assert_eq!(
///     normalize_datetime("20240101120000"),
///     Some("2024-01-01T12:00:00".to_string())
/// );
/// assert_eq!(normalize_datetime("2024"), None);
/// ```
pub fn normalize_datetime(raw: &str) -> Option<String> {
    let digits = compact_digits(raw.trim());
    if digits.len() < 8 {
        return None;
    }

    let year = &digits[0..4];
    let month = default_zero(&digits[4..6]);
    let day = default_zero(&digits[6..8]);
    let mut out = format!("{year}-{month}-{day}");

    if digits.len() >= 14 {
        out.push_str(&format!(
            "T{}:{}:{}",
            &digits[8..10],
            &digits[10..12],
            &digits[12..14]
        ));
    }

    Some(out)
}

/// Date portion (`YYYY-MM-DD`) of a normalized timestamp
pub fn normalize_date(raw: &str) -> Option<String> {
    normalize_datetime(raw).map(|value| value[..10].to_string())
}

/// Digits of the timestamp, at most fourteen
///
/// Already formatted values (`YYYY-MM-DD...`) have their separators removed;
/// compact values stop at the first non-digit, which drops `+ZZZZ` offsets and
/// fractions.
fn compact_digits(raw: &str) -> String {
    let formatted = raw.len() >= 10 && raw.as_bytes()[4] == b'-';
    if formatted {
        raw.chars()
            .take_while(|c| !matches!(c, '+' | 'Z' | '.'))
            .filter(char::is_ascii_digit)
            .take(14)
            .collect()
    } else {
        raw.chars()
            .take_while(char::is_ascii_digit)
            .take(14)
            .collect()
    }
}

fn default_zero(part: &str) -> &str {
    if part == "00" {
        "01"
    } else {
        part
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("19800115", Some("1980-01-15") ; "date only")]
    #[test_case("20240101120000", Some("2024-01-01T12:00:00") ; "full timestamp")]
    #[test_case("202401011200", Some("2024-01-01") ; "minutes precision keeps date only")]
    #[test_case("20240101120000-0500", Some("2024-01-01T12:00:00") ; "offset dropped")]
    #[test_case("20240101120000.1234", Some("2024-01-01T12:00:00") ; "fraction dropped")]
    #[test_case("19800000", Some("1980-01-01") ; "zero month and day default")]
    #[test_case("1980011", None ; "too short")]
    #[test_case("", None ; "empty")]
    #[test_case("abcdefgh", None ; "not numeric")]
    fn test_normalize_datetime(raw: &str, expected: Option<&str>) {
        assert_eq!(normalize_datetime(raw).as_deref(), expected);
    }

    #[test_case("19800115")]
    #[test_case("20240101120000")]
    #[test_case("20231231235959+0100")]
    fn test_normalize_datetime_is_idempotent(raw: &str) {
        let once = normalize_datetime(raw).unwrap();
        let twice = normalize_datetime(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_normalize_datetime_is_deterministic() {
        assert_eq!(
            normalize_datetime("20240315083000"),
            normalize_datetime("20240315083000")
        );
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("20240101120000"), Some("2024-01-01".to_string()));
        assert_eq!(normalize_date("19800115"), Some("1980-01-15".to_string()));
        assert_eq!(normalize_date("1980"), None);
    }
}
