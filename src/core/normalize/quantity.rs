//! Numeric values and units

use crate::core::tables::{coding_system_for, system};
use crate::domain::fhir::Quantity;
use crate::domain::field::Instance;
use serde_json::Number;

/// Parses a numeric result
///
/// Integral values stay integers so `72` serializes as `72`, not `72.0`.
/// Non-numeric or non-finite input yields `None`.
pub fn parse_number(raw: &str) -> Option<Number> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(int) = raw.parse::<i64>() {
        return Some(Number::from(int));
    }
    raw.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Unit of measure: first component of a CE unit field
///
/// The coding system named in component 3 applies when recognised, UCUM
/// otherwise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub code: String,
    pub system: String,
}

impl Unit {
    /// Unit read from a field instance
    pub fn from_instance(value: Instance<'_>) -> Option<Self> {
        let code = value.component(0)?;
        let system = value
            .component(2)
            .and_then(coding_system_for)
            .unwrap_or_else(|| system::UCUM.to_string());
        Some(Self {
            code: code.to_string(),
            system,
        })
    }

    /// UCUM unit from a bare code
    pub fn ucum(code: &str) -> Option<Self> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        Some(Self {
            code: code.to_string(),
            system: system::UCUM.to_string(),
        })
    }
}

/// Builds a quantity from a numeric string and an optional unit
pub fn normalize_quantity(raw: &str, unit: Option<&Unit>) -> Option<Quantity> {
    let value = parse_number(raw)?;
    Some(Quantity {
        value,
        unit: unit.map(|u| u.code.clone()),
        system: unit.map(|u| u.system.clone()),
        code: unit.map(|u| u.code.clone()),
    })
}
