//! Collection bundle returned by a conversion

use super::resources::Resource;
use crate::domain::ids::ResourceType;
use serde::Serialize;

/// Bundle type; conversions always produce collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleType {
    Collection,
}

/// One bundle entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleEntry {
    /// `urn:uuid:<id>`
    pub full_url: String,

    pub resource: Resource,
}

impl BundleEntry {
    /// Wraps a resource, deriving the full URL from its id
    pub fn new(resource: Resource) -> Self {
        Self {
            full_url: format!("urn:uuid:{}", resource.id()),
            resource,
        }
    }
}

/// FHIR Bundle of type `collection`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bundle {
    #[serde(rename = "resourceType")]
    resource_type: &'static str,

    #[serde(rename = "type")]
    pub bundle_type: BundleType,

    /// ISO-8601 creation time
    pub timestamp: String,

    pub entry: Vec<BundleEntry>,
}

impl Bundle {
    /// Creates an empty collection bundle
    pub fn new(timestamp: impl Into<String>) -> Self {
        Self {
            resource_type: "Bundle",
            bundle_type: BundleType::Collection,
            timestamp: timestamp.into(),
            entry: Vec::new(),
        }
    }

    /// Appends a resource
    pub fn push(&mut self, resource: Resource) {
        self.entry.push(BundleEntry::new(resource));
    }

    /// Resources of one type, in entry order
    pub fn resources_of(&self, resource_type: ResourceType) -> Vec<&Resource> {
        self.entry
            .iter()
            .map(|entry| &entry.resource)
            .filter(|resource| resource.resource_type() == resource_type)
            .collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entry.len()
    }

    /// True when the bundle has no entries
    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }
}
