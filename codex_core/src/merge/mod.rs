//! Incremental batch reconciliation.
//!
//! Characters resolve through the alias-aware index; every other category
//! matches on the exact normalized name. Merging never deletes or renames
//! an unrelated record, and a batch that cannot be fully reconciled still
//! commits whatever it could safely resolve.

mod characters;
mod fields;

pub use fields::*;

use std::collections::{BTreeMap, HashMap};

use tracing::debug;

use lore_model::{
    ArtifactRecord, Codex, EventRecord, ExtractionBatch, FactionRecord, FloraFaunaRecord,
    GeoFields, GeoRecord, LoreEntity, LoreEntryRecord, MagicRecord, PlaceRecord, PolityRecord,
    Provenance, RegionRecord, RelicRecord, RitualRecord, SourceDocument, SubstanceRecord,
    WeaponRecord,
};

pub(crate) use characters::add_alias;
use characters::merge_characters;

use crate::mentions::appearances_for;
use crate::normalize::norm_key;

/// Per-category counters for one merged batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub created: usize,
    pub merged: usize,
    pub skipped: usize,
}

/// What a batch did to the codex, category by category.
#[derive(Debug, Clone, Default)]
pub struct MergeReport {
    pub by_category: BTreeMap<&'static str, MergeStats>,
}

impl MergeReport {
    pub(crate) fn stats_mut(&mut self, category: &'static str) -> &mut MergeStats {
        self.by_category.entry(category).or_default()
    }

    /// Total records created across categories.
    pub fn created(&self) -> usize {
        self.by_category.values().map(|s| s.created).sum()
    }

    /// Total records merged into existing entries.
    pub fn merged(&self) -> usize {
        self.by_category.values().map(|s| s.merged).sum()
    }

    /// Total records skipped as malformed.
    pub fn skipped(&self) -> usize {
        self.by_category.values().map(|s| s.skipped).sum()
    }
}

/// Category-specific field reconciliation under the non-overwrite rule.
pub trait ReconcileFields {
    /// Merge an incoming partial record's fields into `self`. Provenance is
    /// handled by the merge driver, not here.
    fn reconcile(&mut self, incoming: &Self);
}

fn fill_geo(existing: &mut GeoFields, incoming: &GeoFields) {
    fill_scalar(&mut existing.world, &incoming.world);
    fill_scalar(&mut existing.hemisphere, &incoming.hemisphere);
    fill_scalar(&mut existing.continent, &incoming.continent);
    fill_scalar(&mut existing.subcontinent, &incoming.subcontinent);
    fill_scalar(&mut existing.realm, &incoming.realm);
    fill_scalar(&mut existing.province, &incoming.province);
    fill_scalar(&mut existing.region, &incoming.region);
    fill_scalar(&mut existing.district, &incoming.district);
}

impl ReconcileFields for PlaceRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.place_type, &incoming.place_type);
        fill_scalar(&mut self.atmosphere, &incoming.atmosphere);
        prefer_longer(&mut self.description, &incoming.description);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
        fill_geo(&mut self.geo, &incoming.geo);
    }
}

impl ReconcileFields for EventRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.event_type, &incoming.event_type);
        union_list(&mut self.participants, &incoming.participants);
        fill_scalar(&mut self.outcome, &incoming.outcome);
        fill_scalar(&mut self.significance, &incoming.significance);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for RitualRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.ritual_type, &incoming.ritual_type);
        union_list(&mut self.performed_by, &incoming.performed_by);
        fill_scalar(&mut self.requirements, &incoming.requirements);
        fill_scalar(&mut self.effect, &incoming.effect);
        fill_scalar(&mut self.cost, &incoming.cost);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for WeaponRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.weapon_type, &incoming.weapon_type);
        fill_scalar(&mut self.origin, &incoming.origin);
        fill_scalar(&mut self.powers, &incoming.powers);
        fill_scalar(&mut self.last_known_holder, &incoming.last_known_holder);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for ArtifactRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.artifact_type, &incoming.artifact_type);
        fill_scalar(&mut self.origin, &incoming.origin);
        fill_scalar(&mut self.powers, &incoming.powers);
        fill_scalar(&mut self.last_known_holder, &incoming.last_known_holder);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for FactionRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.alignment, &incoming.alignment);
        fill_scalar(&mut self.goals, &incoming.goals);
        fill_scalar(&mut self.leader, &incoming.leader);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for PolityRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.polity_type, &incoming.polity_type);
        fill_scalar(&mut self.realm, &incoming.realm);
        fill_scalar(&mut self.region, &incoming.region);
        fill_scalar(&mut self.seat, &incoming.seat);
        union_list(&mut self.sovereigns, &incoming.sovereigns);
        union_list(&mut self.claimants, &incoming.claimants);
        fill_scalar(&mut self.status, &incoming.status);
        prefer_longer(&mut self.description, &incoming.description);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for LoreEntryRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.category, &incoming.category);
        fill_scalar(&mut self.source, &incoming.source);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for FloraFaunaRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.kind, &incoming.kind);
        fill_scalar(&mut self.rarity, &incoming.rarity);
        fill_scalar(&mut self.habitat, &incoming.habitat);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for MagicRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.kind, &incoming.kind);
        fill_scalar(&mut self.element, &incoming.element);
        fill_scalar(&mut self.difficulty, &incoming.difficulty);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for RelicRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.origin, &incoming.origin);
        fill_scalar(&mut self.power, &incoming.power);
        fill_scalar(&mut self.curse, &incoming.curse);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for RegionRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.climate, &incoming.climate);
        fill_scalar(&mut self.terrain, &incoming.terrain);
        fill_scalar(&mut self.ruler, &incoming.ruler);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
        fill_geo(&mut self.geo, &incoming.geo);
    }
}

impl ReconcileFields for SubstanceRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        fill_scalar(&mut self.kind, &incoming.kind);
        fill_scalar(&mut self.rarity, &incoming.rarity);
        fill_scalar(&mut self.properties, &incoming.properties);
        fill_scalar(&mut self.usage, &incoming.usage);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
    }
}

impl ReconcileFields for GeoRecord {
    fn reconcile(&mut self, incoming: &Self) {
        fill_scalar(&mut self.tagline, &incoming.tagline);
        prefer_longer(&mut self.description, &incoming.description);
        fill_scalar(&mut self.status, &incoming.status);
        fill_scalar(&mut self.notes, &incoming.notes);
        fill_geo(&mut self.geo, &incoming.geo);
    }
}

/// Merge one category's incoming records under exact-normalized-name
/// identity. The lookup index is scoped to this pass and rebuilt from the
/// current codex snapshot, never carried across runs.
fn merge_category<T>(
    category: &'static str,
    existing: &mut Vec<T>,
    incoming: &[T],
    documents: &[SourceDocument],
    report: &mut MergeReport,
) where
    T: LoreEntity + ReconcileFields + Clone,
{
    let stats = report.stats_mut(category);

    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, record) in existing.iter().enumerate() {
        let key = norm_key(record.name());
        if !key.is_empty() {
            index.entry(key).or_insert(i);
        }
    }

    for record in incoming {
        let key = norm_key(record.name());
        if key.is_empty() {
            debug!(category, "skipping record without a usable name");
            stats.skipped += 1;
            continue;
        }

        match index.get(&key).copied() {
            Some(position) => {
                let target = &mut existing[position];
                target.reconcile(record);
                let mentions = appearances_for(record.name(), documents);
                target.provenance_mut().extend_unique(mentions);
                target.provenance_mut().backfill_first();
                stats.merged += 1;
            }
            None => {
                let mut created = record.clone();
                created.set_name(record.name().trim().to_string());
                *created.provenance_mut() =
                    Provenance::seed(appearances_for(created.name(), documents));
                index.insert(key, existing.len());
                existing.push(created);
                stats.created += 1;
            }
        }
    }
}

/// Merge a whole extraction batch into the codex, category by category,
/// characters first.
pub fn merge_batch(codex: &mut Codex, batch: &ExtractionBatch) -> MergeReport {
    let mut report = MergeReport::default();
    let documents = &batch.documents;
    let entities = &batch.extracted_entities;

    merge_characters(codex, &entities.characters, documents, &mut report);
    merge_category("places", &mut codex.places, &entities.places, documents, &mut report);
    merge_category("events", &mut codex.events, &entities.events, documents, &mut report);
    merge_category("rituals", &mut codex.rituals, &entities.rituals, documents, &mut report);
    merge_category("weapons", &mut codex.weapons, &entities.weapons, documents, &mut report);
    merge_category("artifacts", &mut codex.artifacts, &entities.artifacts, documents, &mut report);
    merge_category("factions", &mut codex.factions, &entities.factions, documents, &mut report);
    merge_category("polities", &mut codex.polities, &entities.polities, documents, &mut report);
    merge_category("lore", &mut codex.lore, &entities.lore, documents, &mut report);
    merge_category(
        "flora_fauna",
        &mut codex.flora_fauna,
        &entities.flora_fauna,
        documents,
        &mut report,
    );
    merge_category("magic", &mut codex.magic, &entities.magic, documents, &mut report);
    merge_category("relics", &mut codex.relics, &entities.relics, documents, &mut report);
    merge_category("regions", &mut codex.regions, &entities.regions, documents, &mut report);
    merge_category(
        "substances",
        &mut codex.substances,
        &entities.substances,
        documents,
        &mut report,
    );
    merge_category(
        "hemispheres",
        &mut codex.hemispheres,
        &entities.hemispheres,
        documents,
        &mut report,
    );
    merge_category(
        "continents",
        &mut codex.continents,
        &entities.continents,
        documents,
        &mut report,
    );
    merge_category(
        "subcontinents",
        &mut codex.subcontinents,
        &entities.subcontinents,
        documents,
        &mut report,
    );
    merge_category("realms", &mut codex.realms, &entities.realms, documents, &mut report);
    merge_category(
        "provinces",
        &mut codex.provinces,
        &entities.provinces,
        documents,
        &mut report,
    );
    merge_category(
        "districts",
        &mut codex.districts,
        &entities.districts,
        documents,
        &mut report,
    );

    if let Some(date) = batch.latest_date() {
        codex.last_updated = date.to_string();
    }
    report
}
