//! FHIR R4 complex datatypes emitted by the converter

use serde::Serialize;

/// Terminology coding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Coding {
    /// Coding with system and code
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: Some(system.into()),
            code: Some(code.into()),
            display: None,
        }
    }

    /// Sets the display text
    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display = Some(display.into());
        self
    }

    /// Sets the display text when present
    pub fn with_optional_display(mut self, display: Option<impl Into<String>>) -> Self {
        self.display = display.map(Into::into);
        self
    }
}

/// Concept with codings and free text
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeableConcept {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl CodeableConcept {
    /// Concept holding a single coding and no text
    pub fn from_coding(coding: Coding) -> Self {
        Self {
            coding: vec![coding],
            text: None,
        }
    }

    /// Concept holding only free text
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            coding: Vec::new(),
            text: Some(text.into()),
        }
    }
}

/// Human name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HumanName {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub given: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<Vec<String>>,
}

impl HumanName {
    /// Name formatted as "Given Middle Family"
    pub fn display(&self) -> String {
        self.given
            .iter()
            .map(String::as_str)
            .chain(self.family.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Address use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressUse {
    Home,
    Work,
}

/// Postal address
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[serde(rename = "use")]
    pub address_use: AddressUse,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub line: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Extension with a scalar or coded value, or nested extensions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_coding: Option<Coding>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,
}

impl Extension {
    /// Extension carrying `valueString`
    pub fn string(url: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            value_string: Some(value.into()),
            value_coding: None,
            extension: Vec::new(),
        }
    }

    /// Extension carrying `valueCoding`
    pub fn coding(url: impl Into<String>, value: Coding) -> Self {
        Self {
            url: url.into(),
            value_string: None,
            value_coding: Some(value),
            extension: Vec::new(),
        }
    }

    /// Complex extension made of sub-extensions
    pub fn complex(url: impl Into<String>, extension: Vec<Extension>) -> Self {
        Self {
            url: url.into(),
            value_string: None,
            value_coding: None,
            extension,
        }
    }
}

/// Business identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Identifier {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extension: Vec<Extension>,

    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub identifier_type: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    pub value: String,
}

impl Identifier {
    /// Bare identifier with only a value
    pub fn value(value: impl Into<String>) -> Self {
        Self {
            extension: Vec::new(),
            identifier_type: None,
            system: None,
            value: value.into(),
        }
    }
}

/// Measured amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quantity {
    pub value: serde_json::Number,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Time range
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Period {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

impl Period {
    /// `None` when neither bound is set
    pub fn from_bounds(start: Option<String>, end: Option<String>) -> Option<Self> {
        if start.is_none() && end.is_none() {
            None
        } else {
            Some(Self { start, end })
        }
    }
}

/// Reference to another resource
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reference {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Identifier>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

impl Reference {
    /// Reference by `"<ResourceType>/<id>"` string
    pub fn to(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            identifier: None,
            display: None,
        }
    }

    /// Reference that only carries display text
    pub fn display_only(display: impl Into<String>) -> Self {
        Self {
            reference: None,
            identifier: None,
            display: Some(display.into()),
        }
    }

    /// Sets the display text when present
    pub fn with_optional_display(mut self, display: Option<String>) -> Self {
        self.display = display;
        self
    }
}

/// Contact point system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointSystem {
    Phone,
}

/// Contact point use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactPointUse {
    Home,
    Work,
}

/// Telecom contact detail
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContactPoint {
    pub system: ContactPointSystem,

    pub value: String,

    #[serde(rename = "use")]
    pub contact_use: ContactPointUse,
}

impl ContactPoint {
    /// Phone number with the given use
    pub fn phone(value: impl Into<String>, contact_use: ContactPointUse) -> Self {
        Self {
            system: ContactPointSystem::Phone,
            value: value.into(),
            contact_use,
        }
    }
}
