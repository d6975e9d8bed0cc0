//! Entity record definitions for the codex.

mod character;
mod components;
mod records;

pub use character::*;
pub use components::*;
pub use records::*;

/// Common surface shared by every codex record, regardless of category.
///
/// The pruner, auditor, and link validator walk the whole codex through this
/// trait instead of knowing each category's shape.
pub trait LoreEntity {
    /// The canonical display name.
    fn name(&self) -> &str;

    /// Replace the canonical display name.
    fn set_name(&mut self, name: String);

    /// Alternate surface forms; empty for every category except characters.
    fn aliases(&self) -> &[String] {
        &[]
    }

    /// The provenance ledger.
    fn provenance(&self) -> &Provenance;

    /// Mutable access to the provenance ledger.
    fn provenance_mut(&mut self) -> &mut Provenance;
}

macro_rules! impl_lore_entity {
    ($($record:ty),+ $(,)?) => {
        $(impl LoreEntity for $record {
            fn name(&self) -> &str {
                &self.name
            }

            fn set_name(&mut self, name: String) {
                self.name = name;
            }

            fn provenance(&self) -> &Provenance {
                &self.provenance
            }

            fn provenance_mut(&mut self) -> &mut Provenance {
                &mut self.provenance
            }
        })+
    };
}

impl_lore_entity!(
    PlaceRecord,
    EventRecord,
    RitualRecord,
    WeaponRecord,
    ArtifactRecord,
    FactionRecord,
    PolityRecord,
    LoreEntryRecord,
    FloraFaunaRecord,
    MagicRecord,
    RelicRecord,
    RegionRecord,
    SubstanceRecord,
    GeoRecord,
);

impl LoreEntity for CharacterRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn provenance(&self) -> &Provenance {
        &self.provenance
    }

    fn provenance_mut(&mut self) -> &mut Provenance {
        &mut self.provenance
    }
}
