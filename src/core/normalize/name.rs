//! XPN (extended person name) normalization

use crate::domain::fhir::HumanName;
use crate::domain::field::Instance;

const FAMILY: usize = 0;
const GIVEN: usize = 1;
const MIDDLE: usize = 2;
const SUFFIX: usize = 3;
const PREFIX: usize = 4;

/// Normalizes `Family^Given^Middle^Suffix^Prefix^Degree`
///
/// Given names are split on whitespace and the middle name is appended as one
/// more given element. Returns `None` when there is neither a family name nor
/// any given token.
pub fn normalize_name(value: Instance<'_>) -> Option<HumanName> {
    let family = value.component(FAMILY).map(str::to_string);

    let mut given: Vec<String> = value
        .component(GIVEN)
        .map(|g| g.split_whitespace().map(str::to_string).collect())
        .unwrap_or_default();
    if let Some(middle) = value.component(MIDDLE) {
        given.push(middle.to_string());
    }

    if family.is_none() && given.is_empty() {
        return None;
    }

    Some(HumanName {
        family,
        given,
        suffix: value.component(SUFFIX).map(|s| vec![s.to_string()]),
        prefix: value.component(PREFIX).map(|p| vec![p.to_string()]),
    })
}
