//! Resource id assignment
//!
//! Ids are deterministic: the same message always yields the same ids, so
//! repeated conversions differ only in the bundle timestamp.

use crate::config::DuplicateIdPolicy;
use crate::domain::ids::{AssignedId, ResourceType};
use std::collections::{HashMap, HashSet};

const DEFAULT_KEY: &str = "1";

/// Hands out resource ids for one conversion
///
/// Sequential ids (`encounter-<n>`) count discoveries per type. Keyed ids
/// (`observation-<setid>`) follow the segment's set id; collisions are
/// resolved by the configured [`DuplicateIdPolicy`].
///
/// # Examples
///
/// ```
/// use ferry::config::DuplicateIdPolicy;
/// use ferry::core::ids::IdAssigner;
/// use ferry::domain::ids::ResourceType;
///
/// let mut ids = IdAssigner::new(DuplicateIdPolicy::Suffix);
/// assert_eq!(ids.sequential(ResourceType::Encounter).id(), "encounter-1");
/// assert_eq!(ids.keyed(ResourceType::Observation, Some("1")).id(), "observation-1");
/// assert_eq!(ids.keyed(ResourceType::Observation, Some("1")).id(), "observation-1-2");
/// ```
#[derive(Debug, Clone)]
pub struct IdAssigner {
    policy: DuplicateIdPolicy,
    counters: HashMap<ResourceType, usize>,
    issued: HashSet<(ResourceType, String)>,
}

impl IdAssigner {
    /// Creates an assigner with no ids issued
    pub fn new(policy: DuplicateIdPolicy) -> Self {
        Self {
            policy,
            counters: HashMap::new(),
            issued: HashSet::new(),
        }
    }

    /// The collision policy in effect
    pub fn policy(&self) -> DuplicateIdPolicy {
        self.policy
    }

    /// `message-<control id>`, or `message-1` without one
    pub fn message(&mut self, control_id: Option<&str>) -> AssignedId {
        let key = non_blank(control_id).unwrap_or(DEFAULT_KEY);
        self.issue(ResourceType::MessageHeader, format!("message-{key}"))
    }

    /// The single patient id, `patient-1`
    pub fn patient(&mut self) -> AssignedId {
        self.issue(ResourceType::Patient, "patient-1".to_string())
    }

    /// Next `<prefix>-<n>` id for `resource_type`, 1-based in discovery order
    pub fn sequential(&mut self, resource_type: ResourceType) -> AssignedId {
        let counter = self.counters.entry(resource_type).or_insert(0);
        *counter += 1;
        let id = format!("{}-{}", resource_type.id_prefix(), counter);
        self.issue(resource_type, id)
    }

    /// `<prefix>-<set id>` for a keyed resource; the set id defaults to `1`
    ///
    /// Under [`DuplicateIdPolicy::Suffix`] a repeated key gets the first free
    /// `-2`, `-3`, ... suffix. Under [`DuplicateIdPolicy::Overwrite`] the
    /// same id is returned again and the caller replaces the earlier resource.
    pub fn keyed(&mut self, resource_type: ResourceType, set_id: Option<&str>) -> AssignedId {
        let key = non_blank(set_id).unwrap_or(DEFAULT_KEY);
        let base = format!("{}-{}", resource_type.id_prefix(), key);

        let id = match self.policy {
            DuplicateIdPolicy::Overwrite => base,
            DuplicateIdPolicy::Suffix => {
                let mut candidate = base.clone();
                let mut n = 1;
                while self.issued.contains(&(resource_type, candidate.clone())) {
                    n += 1;
                    candidate = format!("{base}-{n}");
                }
                candidate
            }
        };
        self.issue(resource_type, id)
    }

    /// True when `id` has already been handed out for `resource_type`
    pub fn is_issued(&self, resource_type: ResourceType, id: &str) -> bool {
        self.issued.contains(&(resource_type, id.to_string()))
    }

    fn issue(&mut self, resource_type: ResourceType, id: String) -> AssignedId {
        self.issued.insert((resource_type, id.clone()));
        AssignedId::new(resource_type, id)
    }
}

impl Default for IdAssigner {
    fn default() -> Self {
        Self::new(DuplicateIdPolicy::default())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
