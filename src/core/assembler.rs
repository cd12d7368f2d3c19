//! Bundle assembly
//!
//! Walks the segment list once, maps every recognised segment through its
//! mapper, and emits the resources grouped by type in a fixed order.

use crate::config::{ConversionConfig, EncounterContext};
use crate::core::ids::IdAssigner;
use crate::core::mappers::{
    coverage::pairs_with, map_allergy, map_condition, map_coverage, map_encounter,
    map_message_header, map_observation, map_patient, map_procedure, map_related_person,
    MappingContext,
};
use crate::domain::fhir::{Bundle, Resource};
use crate::domain::ids::{AssignedId, ResourceType};
use crate::domain::message::{ParsedMessage, SegmentFields, SegmentKind};
use chrono::{SecondsFormat, Utc};
use std::collections::BTreeMap;
use tracing::debug;

/// Resources collected per type, in discovery order
#[derive(Debug, Default)]
struct ResourceGroups {
    groups: BTreeMap<ResourceType, Vec<Resource>>,
}

impl ResourceGroups {
    /// Adds a resource; one with the same id replaces the earlier entry in place
    fn insert(&mut self, resource: Resource) {
        let group = self.groups.entry(resource.resource_type()).or_default();
        match group.iter_mut().find(|existing| existing.id() == resource.id()) {
            Some(existing) => *existing = resource,
            None => group.push(resource),
        }
    }

    /// All resources in emission order
    fn into_ordered(mut self) -> Vec<Resource> {
        ResourceType::EMISSION_ORDER
            .iter()
            .flat_map(|resource_type| self.groups.remove(resource_type).unwrap_or_default())
            .collect()
    }
}

/// Builds bundles from parsed messages
///
/// # Examples
///
/// ```
/// use ferry::config::ConversionConfig;
/// use ferry::core::assembler::BundleAssembler;
/// use ferry::domain::field::RawField;
/// use ferry::domain::message::{ParsedMessage, Segment};
///
/// let message = ParsedMessage::new(vec![
///     Segment::new("PID", vec![RawField::Scalar("1".to_string())]),
///     Segment::unparsed("PV1"),
/// ]);
/// let config = ConversionConfig::default();
/// let bundle = BundleAssembler::new(&config).assemble(&message);
///
/// assert_eq!(bundle.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BundleAssembler<'a> {
    config: &'a ConversionConfig,
}

impl<'a> BundleAssembler<'a> {
    /// Creates an assembler for the given conversion settings
    pub fn new(config: &'a ConversionConfig) -> Self {
        Self { config }
    }

    /// Assembles a bundle stamped with the current time
    pub fn assemble(&self, message: &ParsedMessage) -> Bundle {
        let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        self.assemble_at(message, timestamp)
    }

    /// Assembles a bundle with an explicit timestamp
    pub fn assemble_at(&self, message: &ParsedMessage, timestamp: impl Into<String>) -> Bundle {
        let mut ids = IdAssigner::new(self.config.duplicate_ids);
        let mut resources = ResourceGroups::default();
        let systems = &self.config.identifier_systems;

        if let Some(msh) = message.first_body(SegmentKind::Msh) {
            let id = ids.message(msh.field(10).first());
            resources.insert(Resource::MessageHeader(map_message_header(msh, &id)));
        }

        let patient = ids.patient();
        let base = MappingContext::new(&patient, systems);
        if let Some(pid) = message.first_body(SegmentKind::Pid) {
            resources.insert(Resource::Patient(map_patient(pid, &patient, &base)));
        }

        let bodies = indexed_bodies(message);

        // Encounters first, so every clinical segment can see all of them
        let mut encounters: Vec<(usize, AssignedId)> = Vec::new();
        for &(position, kind, pv1) in &bodies {
            if kind == SegmentKind::Pv1 {
                let id = ids.sequential(ResourceType::Encounter);
                resources.insert(Resource::Encounter(map_encounter(pv1, &id, &base)));
                encounters.push((position, id));
            }
        }

        for &(position, kind, fields) in &bodies {
            let context = base.with_encounter(self.encounter_for(position, &encounters));
            let resource = match kind {
                SegmentKind::Nk1 => {
                    let id = ids.sequential(ResourceType::RelatedPerson);
                    Resource::RelatedPerson(map_related_person(fields, &id, &context))
                }
                SegmentKind::Al1 => {
                    let id = ids.keyed(ResourceType::AllergyIntolerance, fields.field(1).first());
                    Resource::AllergyIntolerance(map_allergy(fields, &id, &context))
                }
                SegmentKind::Dg1 => {
                    let id = ids.keyed(ResourceType::Condition, fields.field(1).first());
                    Resource::Condition(map_condition(fields, &id, &context))
                }
                SegmentKind::Pr1 => {
                    let id = ids.keyed(ResourceType::Procedure, fields.field(1).first());
                    Resource::Procedure(map_procedure(fields, &id, &context))
                }
                SegmentKind::In1 => {
                    let id = ids.sequential(ResourceType::Coverage);
                    let in2 = paired_in2(&bodies, position, fields.field(1).first());
                    Resource::Coverage(map_coverage(fields, in2, &id, &context))
                }
                SegmentKind::Obx => {
                    let id = ids.keyed(ResourceType::Observation, fields.field(1).first());
                    Resource::Observation(map_observation(fields, &id, &context))
                }
                SegmentKind::Msh | SegmentKind::Pid | SegmentKind::Pv1 | SegmentKind::In2 => {
                    continue
                }
            };
            resources.insert(resource);
        }

        let mut bundle = Bundle::new(timestamp);
        for resource in resources.into_ordered() {
            bundle.push(resource);
        }

        debug!(
            segments = message.segments.len(),
            encounters = encounters.len(),
            entries = bundle.len(),
            "Assembled bundle"
        );

        bundle
    }

    /// Encounter a clinical segment at `position` links to
    fn encounter_for<'e>(
        &self,
        position: usize,
        encounters: &'e [(usize, AssignedId)],
    ) -> Option<&'e AssignedId> {
        let last = encounters.last().map(|(_, id)| id);
        match self.config.encounter_context {
            EncounterContext::Last => last,
            EncounterContext::NearestPreceding => encounters
                .iter()
                .rev()
                .find(|(at, _)| *at < position)
                .map(|(_, id)| id)
                .or(last),
        }
    }
}

/// Parsed bodies of recognised segments with their source positions
fn indexed_bodies(message: &ParsedMessage) -> Vec<(usize, SegmentKind, &SegmentFields)> {
    message
        .segments
        .iter()
        .enumerate()
        .filter_map(|(position, segment)| {
            let kind = segment.kind()?;
            let fields = segment.parsed.as_ref()?;
            Some((position, kind, fields))
        })
        .collect()
}

/// The IN2 following an IN1 (before the next IN1) that carries its set id
fn paired_in2<'m>(
    bodies: &[(usize, SegmentKind, &'m SegmentFields)],
    in1_position: usize,
    set_id: Option<&str>,
) -> Option<&'m SegmentFields> {
    bodies
        .iter()
        .filter(|(position, _, _)| *position > in1_position)
        .take_while(|(_, kind, _)| *kind != SegmentKind::In1)
        .filter(|(_, kind, _)| *kind == SegmentKind::In2)
        .map(|&(_, _, fields)| fields)
        .find(|in2| pairs_with(in2, set_id))
}
