//! XAD (extended address) normalization

use crate::core::tables::address_use_for;
use crate::domain::fhir::Address;
use crate::domain::field::Instance;

const STREET: usize = 0;
const CITY: usize = 1;
const STATE: usize = 2;
const POSTAL_CODE: usize = 3;
const COUNTRY: usize = 4;
const ADDRESS_TYPE: usize = 5;
const COUNTY: usize = 6;

/// Normalizes `Street^City^State^Zip^Country^Type^County`
///
/// The street component's `&`-delimited sub-components become address lines.
/// Returns `None` when there is no line, no city and no state.
pub fn normalize_address(value: Instance<'_>) -> Option<Address> {
    let line: Vec<String> = value
        .subcomponents(STREET)
        .into_iter()
        .map(str::to_string)
        .collect();
    let city = value.component(CITY).map(str::to_string);
    let state = value.component(STATE).map(str::to_string);

    if line.is_empty() && city.is_none() && state.is_none() {
        return None;
    }

    Some(Address {
        address_use: address_use_for(value.component(ADDRESS_TYPE)),
        line,
        city,
        district: value.component(COUNTY).map(str::to_string),
        state,
        postal_code: value.component(POSTAL_CODE).map(str::to_string),
        country: value.component(COUNTRY).map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fhir::AddressUse;
    use crate::domain::field::{Component, RawField};
    use serde_json::json;

    fn text(s: &str) -> Component {
        Component::Text(s.to_string())
    }

    #[test]
    fn test_full_address() {
        let raw = RawField::Components(vec![
            Component::Sub(vec!["123 Main St".to_string(), "Apt 4B".to_string()]),
            text("Boston"),
            text("MA"),
            text("02101"),
            text("USA"),
            text("H"),
            text("Suffolk"),
        ]);
        let address = normalize_address(raw.instance().unwrap()).unwrap();
        assert_eq!(
            serde_json::to_value(&address).unwrap(),
            json!({
                "use": "home",
                "line": ["123 Main St", "Apt 4B"],
                "city": "Boston",
                "district": "Suffolk",
                "state": "MA",
                "postalCode": "02101",
                "country": "USA"
            })
        );
    }

    #[test]
    fn test_business_address_is_work() {
        let raw = RawField::Components(vec![
            text("1 Corporate Way"),
            text("Springfield"),
            text(""),
            text(""),
            text(""),
            text("B"),
        ]);
        let address = normalize_address(raw.instance().unwrap()).unwrap();
        assert_eq!(address.address_use, AddressUse::Work);
        assert_eq!(address.line, vec!["1 Corporate Way"]);
    }

    #[test]
    fn test_missing_type_defaults_to_home() {
        let raw = RawField::Components(vec![text(""), text("Denver"), text("CO")]);
        let address = normalize_address(raw.instance().unwrap()).unwrap();
        assert_eq!(address.address_use, AddressUse::Home);
        assert!(address.line.is_empty());
    }

    #[test]
    fn test_zip_only_is_absent() {
        let raw = RawField::Components(vec![text(""), text(""), text(""), text("02101")]);
        assert!(normalize_address(raw.instance().unwrap()).is_none());
    }
}
