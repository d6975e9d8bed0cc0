//! Record definitions for every non-character codex category.
//!
//! Each category is an explicit struct with all fields declared and
//! defaulted; "unknown" and the empty string are placeholder sentinels, not
//! absence. Partial extraction records deserialize into the same types.

use serde::{Deserialize, Serialize};

use super::components::{unknown, GeoFields, Provenance};

/// A named place: city, fortress, ruin, temple, wilderness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub place_type: String,
    #[serde(default)]
    pub atmosphere: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub geo: GeoFields,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for PlaceRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            place_type: String::new(),
            atmosphere: String::new(),
            description: String::new(),
            status: unknown(),
            notes: String::new(),
            geo: GeoFields::default(),
            provenance: Provenance::default(),
        }
    }
}

impl PlaceRecord {
    /// Create a new place with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A notable named event: battle, war, ritual moment, catastrophe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EventRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub participants: Vec<String>,
    #[serde(default)]
    pub outcome: String,
    #[serde(default)]
    pub significance: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl EventRecord {
    /// Create a new event with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named rite: banishment, binding, oath, communion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RitualRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub ritual_type: String,
    #[serde(default)]
    pub performed_by: Vec<String>,
    #[serde(default)]
    pub requirements: String,
    #[serde(default)]
    pub effect: String,
    #[serde(default)]
    pub cost: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl RitualRecord {
    /// Create a new ritual with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named legendary weapon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub weapon_type: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub powers: String,
    #[serde(default)]
    pub last_known_holder: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for WeaponRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            weapon_type: String::new(),
            origin: String::new(),
            powers: String::new(),
            last_known_holder: String::new(),
            status: unknown(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl WeaponRecord {
    /// Create a new weapon with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named magical object: ring, tome, idol, amulet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub artifact_type: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub powers: String,
    #[serde(default)]
    pub last_known_holder: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for ArtifactRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            artifact_type: String::new(),
            origin: String::new(),
            powers: String::new(),
            last_known_holder: String::new(),
            status: unknown(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl ArtifactRecord {
    /// Create a new artifact with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named factional group: guild, order, cult, company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub alignment: String,
    #[serde(default)]
    pub goals: String,
    #[serde(default)]
    pub leader: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for FactionRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            alignment: String::new(),
            goals: String::new(),
            leader: String::new(),
            status: unknown(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl FactionRecord {
    /// Create a new faction with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A governing body: crown, regency, council, empire.
///
/// `realm`/`region`/`seat` anchor the polity to what it governs;
/// `sovereigns` lists the rulers it claims.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolityRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub polity_type: String,
    #[serde(default = "unknown")]
    pub realm: String,
    #[serde(default = "unknown")]
    pub region: String,
    #[serde(default = "unknown")]
    pub seat: String,
    #[serde(default)]
    pub sovereigns: Vec<String>,
    #[serde(default)]
    pub claimants: Vec<String>,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for PolityRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            polity_type: String::new(),
            realm: unknown(),
            region: unknown(),
            seat: unknown(),
            sovereigns: Vec::new(),
            claimants: Vec::new(),
            status: unknown(),
            description: String::new(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl PolityRecord {
    /// Create a new polity with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A lore entry: legend, prophecy, history, myth, language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreEntryRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub source: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for LoreEntryRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            category: String::new(),
            source: String::new(),
            status: unknown(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl LoreEntryRecord {
    /// Create a new lore entry with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named creature, plant, fungus, or spirit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloraFaunaRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub habitat: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for FloraFaunaRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            kind: String::new(),
            rarity: String::new(),
            habitat: String::new(),
            status: unknown(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl FloraFaunaRecord {
    /// Create a new flora/fauna entry with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named spell, technique, or curse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagicRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub element: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for MagicRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            kind: String::new(),
            element: String::new(),
            difficulty: String::new(),
            status: unknown(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl MagicRecord {
    /// Create a new magic entry with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named cursed or sacred relic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelicRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub power: String,
    #[serde(default)]
    pub curse: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for RelicRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            origin: String::new(),
            power: String::new(),
            curse: String::new(),
            status: unknown(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl RelicRecord {
    /// Create a new relic with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named region or realm-scale territory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub climate: String,
    #[serde(default)]
    pub terrain: String,
    #[serde(default)]
    pub ruler: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub geo: GeoFields,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for RegionRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            climate: String::new(),
            terrain: String::new(),
            ruler: String::new(),
            status: unknown(),
            notes: String::new(),
            geo: GeoFields::default(),
            provenance: Provenance::default(),
        }
    }
}

impl RegionRecord {
    /// Create a new region with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// A named substance or material: poison, metal, herb, elixir.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubstanceRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub rarity: String,
    #[serde(default)]
    pub properties: String,
    #[serde(default, rename = "use")]
    pub usage: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for SubstanceRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            kind: String::new(),
            rarity: String::new(),
            properties: String::new(),
            usage: String::new(),
            status: unknown(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl SubstanceRecord {
    /// Create a new substance with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One entry of a named geographic hierarchy level (hemisphere, continent,
/// subcontinent, realm, province, or district). The level a record belongs
/// to is the codex category holding it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "unknown")]
    pub status: String,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub geo: GeoFields,
    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for GeoRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            tagline: String::new(),
            description: String::new(),
            status: unknown(),
            notes: String::new(),
            geo: GeoFields::default(),
            provenance: Provenance::default(),
        }
    }
}

impl GeoRecord {
    /// Create a new geographic entry with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
