//! Character record definition.

use serde::{Deserialize, Serialize};

use super::components::{default_world, unknown, unknown_role, Provenance};

/// A canonical character entry.
///
/// Characters are the only category with alias-aware identity: `aliases`
/// holds alternate surface forms (epithets, short names) in first-seen
/// order, de-duplicated case-insensitively, and never contains the
/// canonical `name` itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecord {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub tagline: String,

    #[serde(default = "unknown_role")]
    pub role: String,

    #[serde(default = "unknown")]
    pub status: String,

    #[serde(default = "default_world")]
    pub world: String,

    #[serde(default)]
    pub bio: String,

    #[serde(default)]
    pub traits: Vec<String>,

    /// Declared home location; resolvable against `Codex::places` after
    /// geographic normalization.
    #[serde(default)]
    pub home_place: String,

    #[serde(default)]
    pub home_region: String,

    #[serde(default)]
    pub home_realm: String,

    #[serde(default = "unknown")]
    pub travel_scope: String,

    #[serde(default)]
    pub status_history: Vec<String>,

    #[serde(default)]
    pub notes: String,

    #[serde(flatten)]
    pub provenance: Provenance,
}

impl Default for CharacterRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            aliases: Vec::new(),
            tagline: String::new(),
            role: unknown_role(),
            status: unknown(),
            world: default_world(),
            bio: String::new(),
            traits: Vec::new(),
            home_place: String::new(),
            home_region: String::new(),
            home_realm: String::new(),
            travel_scope: unknown(),
            status_history: Vec::new(),
            notes: String::new(),
            provenance: Provenance::default(),
        }
    }
}

impl CharacterRecord {
    /// Create a new character with the given canonical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}
