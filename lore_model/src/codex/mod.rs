//! The codex - the central container holding every canonical record.

use serde::{Deserialize, Serialize};

use crate::entities::{
    ArtifactRecord, CharacterRecord, EventRecord, FactionRecord, FloraFaunaRecord, GeoLevel,
    GeoRecord, LoreEntity, LoreEntryRecord, MagicRecord, PlaceRecord, PolityRecord, RegionRecord,
    RelicRecord, RitualRecord, SubstanceRecord, WeaponRecord,
};

/// The persisted canonical knowledge base across all categories.
///
/// One JSON document on disk; loaded wholesale before a merge run and
/// written wholesale after it. Records are only ever appended or mutated by
/// normal merge flow; deletion happens in explicitly invoked corrective
/// passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Codex {
    /// Date of the last batch merged into this codex.
    #[serde(default)]
    pub last_updated: String,

    #[serde(default)]
    pub characters: Vec<CharacterRecord>,
    #[serde(default)]
    pub places: Vec<PlaceRecord>,
    #[serde(default)]
    pub events: Vec<EventRecord>,
    #[serde(default)]
    pub rituals: Vec<RitualRecord>,
    #[serde(default)]
    pub weapons: Vec<WeaponRecord>,
    #[serde(default)]
    pub artifacts: Vec<ArtifactRecord>,
    #[serde(default)]
    pub factions: Vec<FactionRecord>,
    #[serde(default)]
    pub polities: Vec<PolityRecord>,
    #[serde(default)]
    pub lore: Vec<LoreEntryRecord>,
    #[serde(default)]
    pub flora_fauna: Vec<FloraFaunaRecord>,
    #[serde(default)]
    pub magic: Vec<MagicRecord>,
    #[serde(default)]
    pub relics: Vec<RelicRecord>,
    #[serde(default)]
    pub regions: Vec<RegionRecord>,
    #[serde(default)]
    pub substances: Vec<SubstanceRecord>,
    #[serde(default)]
    pub hemispheres: Vec<GeoRecord>,
    #[serde(default)]
    pub continents: Vec<GeoRecord>,
    #[serde(default)]
    pub subcontinents: Vec<GeoRecord>,
    #[serde(default)]
    pub realms: Vec<GeoRecord>,
    #[serde(default)]
    pub provinces: Vec<GeoRecord>,
    #[serde(default)]
    pub districts: Vec<GeoRecord>,
}

impl Codex {
    /// Create a new empty codex.
    pub fn new() -> Self {
        Self::default()
    }

    /// The record list for a geographic hierarchy level.
    pub fn geo_level(&self, level: GeoLevel) -> &Vec<GeoRecord> {
        match level {
            GeoLevel::Hemisphere => &self.hemispheres,
            GeoLevel::Continent => &self.continents,
            GeoLevel::Subcontinent => &self.subcontinents,
            GeoLevel::Realm => &self.realms,
            GeoLevel::Province => &self.provinces,
            GeoLevel::District => &self.districts,
        }
    }

    /// Mutable record list for a geographic hierarchy level.
    pub fn geo_level_mut(&mut self, level: GeoLevel) -> &mut Vec<GeoRecord> {
        match level {
            GeoLevel::Hemisphere => &mut self.hemispheres,
            GeoLevel::Continent => &mut self.continents,
            GeoLevel::Subcontinent => &mut self.subcontinents,
            GeoLevel::Realm => &mut self.realms,
            GeoLevel::Province => &mut self.provinces,
            GeoLevel::District => &mut self.districts,
        }
    }

    /// Every record across every category.
    pub fn entities(&self) -> impl Iterator<Item = &dyn LoreEntity> {
        fn as_entity<T: LoreEntity>(r: &T) -> &dyn LoreEntity {
            r
        }
        self.characters
            .iter()
            .map(as_entity)
            .chain(self.places.iter().map(as_entity))
            .chain(self.events.iter().map(as_entity))
            .chain(self.rituals.iter().map(as_entity))
            .chain(self.weapons.iter().map(as_entity))
            .chain(self.artifacts.iter().map(as_entity))
            .chain(self.factions.iter().map(as_entity))
            .chain(self.polities.iter().map(as_entity))
            .chain(self.lore.iter().map(as_entity))
            .chain(self.flora_fauna.iter().map(as_entity))
            .chain(self.magic.iter().map(as_entity))
            .chain(self.relics.iter().map(as_entity))
            .chain(self.regions.iter().map(as_entity))
            .chain(self.substances.iter().map(as_entity))
            .chain(self.hemispheres.iter().map(as_entity))
            .chain(self.continents.iter().map(as_entity))
            .chain(self.subcontinents.iter().map(as_entity))
            .chain(self.realms.iter().map(as_entity))
            .chain(self.provinces.iter().map(as_entity))
            .chain(self.districts.iter().map(as_entity))
    }

    /// Every record across every category, mutably.
    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut dyn LoreEntity> {
        fn as_entity<T: LoreEntity>(r: &mut T) -> &mut dyn LoreEntity {
            r
        }
        self.characters
            .iter_mut()
            .map(as_entity)
            .chain(self.places.iter_mut().map(as_entity))
            .chain(self.events.iter_mut().map(as_entity))
            .chain(self.rituals.iter_mut().map(as_entity))
            .chain(self.weapons.iter_mut().map(as_entity))
            .chain(self.artifacts.iter_mut().map(as_entity))
            .chain(self.factions.iter_mut().map(as_entity))
            .chain(self.polities.iter_mut().map(as_entity))
            .chain(self.lore.iter_mut().map(as_entity))
            .chain(self.flora_fauna.iter_mut().map(as_entity))
            .chain(self.magic.iter_mut().map(as_entity))
            .chain(self.relics.iter_mut().map(as_entity))
            .chain(self.regions.iter_mut().map(as_entity))
            .chain(self.substances.iter_mut().map(as_entity))
            .chain(self.hemispheres.iter_mut().map(as_entity))
            .chain(self.continents.iter_mut().map(as_entity))
            .chain(self.subcontinents.iter_mut().map(as_entity))
            .chain(self.realms.iter_mut().map(as_entity))
            .chain(self.provinces.iter_mut().map(as_entity))
            .chain(self.districts.iter_mut().map(as_entity))
    }

    /// Total number of records across all categories.
    pub fn entity_count(&self) -> usize {
        self.entities().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entities_walks_every_category() {
        let mut codex = Codex::new();
        codex.characters.push(CharacterRecord::new("Kael"));
        codex.places.push(PlaceRecord::new("Ashmere"));
        codex.realms.push(GeoRecord::new("Realm of Ashmere"));

        let names: Vec<_> = codex.entities().map(|e| e.name().to_string()).collect();
        assert_eq!(names, ["Kael", "Ashmere", "Realm of Ashmere"]);
        assert_eq!(codex.entity_count(), 3);
    }

    #[test]
    fn test_geo_level_accessors() {
        let mut codex = Codex::new();
        codex
            .geo_level_mut(GeoLevel::Continent)
            .push(GeoRecord::new("Vharn"));
        assert_eq!(codex.geo_level(GeoLevel::Continent).len(), 1);
        assert!(codex.geo_level(GeoLevel::Realm).is_empty());
    }

    #[test]
    fn test_empty_json_loads_with_defaults() {
        let codex: Codex = serde_json::from_str(r#"{"last_updated": "2026-03-01"}"#).unwrap();
        assert_eq!(codex.last_updated, "2026-03-01");
        assert!(codex.characters.is_empty());
        assert!(codex.districts.is_empty());
    }
}
