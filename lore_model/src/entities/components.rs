//! Component definitions shared by codex records.

use serde::{Deserialize, Serialize};

/// The placeholder value for fields that have not been established yet.
pub const UNKNOWN: &str = "unknown";

/// The default world name used when a record does not declare one.
pub const DEFAULT_WORLD: &str = "The Known World";

pub(crate) fn unknown() -> String {
    UNKNOWN.to_string()
}

pub(crate) fn unknown_role() -> String {
    "Unknown".to_string()
}

pub(crate) fn default_world() -> String {
    DEFAULT_WORLD.to_string()
}

/// Check whether a field value is a placeholder.
///
/// Placeholders (empty string, any casing of "unknown") may be overwritten
/// by later merges; established values may not.
pub fn is_placeholder(value: &str) -> bool {
    let v = value.trim();
    v.is_empty() || v.eq_ignore_ascii_case(UNKNOWN)
}

/// One entry in an entity's provenance ledger: the story it was seen in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct StoryRef {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
}

impl StoryRef {
    /// Create a new story reference.
    pub fn new(date: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
        }
    }
}

/// Where an entity has been seen, and when it was first recorded.
///
/// Flattened into every record so the persisted JSON keeps the historical
/// flat key layout (`first_story`, `story_appearances`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Provenance {
    /// Title of the earliest known story mentioning the entity.
    #[serde(default)]
    pub first_story: String,

    /// Date of the earliest known story mentioning the entity.
    #[serde(default)]
    pub first_date: String,

    /// Mention count; equals `story_appearances.len()` whenever the ledger
    /// is non-empty.
    #[serde(default)]
    pub appearances: u32,

    /// Ordered ledger of unique `(date, title)` pairs.
    #[serde(default)]
    pub story_appearances: Vec<StoryRef>,
}

impl Provenance {
    /// Seed provenance for a freshly created record from its computed
    /// mentions. `first_story`/`first_date` come from the earliest mention
    /// (blank when there are none); the count never drops below one.
    pub fn seed(mentions: Vec<StoryRef>) -> Self {
        let (first_story, first_date) = mentions
            .first()
            .map(|m| (m.title.clone(), m.date.clone()))
            .unwrap_or_default();
        Self {
            first_story,
            first_date,
            appearances: (mentions.len() as u32).max(1),
            story_appearances: mentions,
        }
    }

    /// Append ledger entries not already present, preserving order.
    ///
    /// Returns the number of entries added. The count is recomputed to the
    /// ledger length whenever the ledger ends up non-empty.
    pub fn extend_unique(&mut self, mentions: impl IntoIterator<Item = StoryRef>) -> usize {
        let mut added = 0;
        for m in mentions {
            if m.date.trim().is_empty() || m.title.trim().is_empty() {
                continue;
            }
            if !self.story_appearances.contains(&m) {
                self.story_appearances.push(m);
                added += 1;
            }
        }
        if !self.story_appearances.is_empty() {
            self.appearances = self.story_appearances.len() as u32;
        }
        added
    }

    /// Backfill blank `first_story`/`first_date` from the head of the ledger.
    pub fn backfill_first(&mut self) {
        if let Some(head) = self.story_appearances.first() {
            if self.first_story.trim().is_empty() {
                self.first_story = head.title.clone();
            }
            if self.first_date.trim().is_empty() {
                self.first_date = head.date.clone();
            }
        }
    }
}

/// The six named levels of the geographic hierarchy, top down.
///
/// `world` and `region` also belong to the parent chain; regions are carried
/// by their own record category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GeoLevel {
    Hemisphere,
    Continent,
    Subcontinent,
    Realm,
    Province,
    District,
}

impl GeoLevel {
    /// All levels, top of the hierarchy first.
    pub fn all() -> [GeoLevel; 6] {
        [
            GeoLevel::Hemisphere,
            GeoLevel::Continent,
            GeoLevel::Subcontinent,
            GeoLevel::Realm,
            GeoLevel::Province,
            GeoLevel::District,
        ]
    }

    /// The field name this level occupies in the parent chain.
    pub fn as_str(&self) -> &'static str {
        match self {
            GeoLevel::Hemisphere => "hemisphere",
            GeoLevel::Continent => "continent",
            GeoLevel::Subcontinent => "subcontinent",
            GeoLevel::Realm => "realm",
            GeoLevel::Province => "province",
            GeoLevel::District => "district",
        }
    }
}

impl std::fmt::Display for GeoLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The complete geographic parent chain carried by place-like records.
///
/// Every key is always present; unestablished levels hold `"unknown"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoFields {
    #[serde(default = "default_world")]
    pub world: String,
    #[serde(default = "unknown")]
    pub hemisphere: String,
    #[serde(default = "unknown")]
    pub continent: String,
    #[serde(default = "unknown")]
    pub subcontinent: String,
    #[serde(default = "unknown")]
    pub realm: String,
    #[serde(default = "unknown")]
    pub province: String,
    #[serde(default = "unknown")]
    pub region: String,
    #[serde(default = "unknown")]
    pub district: String,
}

impl Default for GeoFields {
    fn default() -> Self {
        Self {
            world: default_world(),
            hemisphere: unknown(),
            continent: unknown(),
            subcontinent: unknown(),
            realm: unknown(),
            province: unknown(),
            region: unknown(),
            district: unknown(),
        }
    }
}

impl GeoFields {
    /// Read the field for a hierarchy level.
    pub fn level(&self, level: GeoLevel) -> &str {
        match level {
            GeoLevel::Hemisphere => &self.hemisphere,
            GeoLevel::Continent => &self.continent,
            GeoLevel::Subcontinent => &self.subcontinent,
            GeoLevel::Realm => &self.realm,
            GeoLevel::Province => &self.province,
            GeoLevel::District => &self.district,
        }
    }

    /// Mutable access to the field for a hierarchy level.
    pub fn level_mut(&mut self, level: GeoLevel) -> &mut String {
        match level {
            GeoLevel::Hemisphere => &mut self.hemisphere,
            GeoLevel::Continent => &mut self.continent,
            GeoLevel::Subcontinent => &mut self.subcontinent,
            GeoLevel::Realm => &mut self.realm,
            GeoLevel::Province => &mut self.province,
            GeoLevel::District => &mut self.district,
        }
    }

    /// Fill blank fields with placeholders so the full chain is declared.
    pub fn fill_missing(&mut self, world: &str) {
        if self.world.trim().is_empty() {
            self.world = world.to_string();
        }
        for level in GeoLevel::all() {
            let field = self.level_mut(level);
            if field.trim().is_empty() {
                *field = unknown();
            }
        }
        if self.region.trim().is_empty() {
            self.region = unknown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("  "));
        assert!(is_placeholder("unknown"));
        assert!(is_placeholder("Unknown"));
        assert!(!is_placeholder("Kael"));
    }

    #[test]
    fn test_provenance_seed() {
        let seeded = Provenance::seed(vec![
            StoryRef::new("2026-03-01", "The Black Gate"),
            StoryRef::new("2026-03-02", "Ashes of Vethis"),
        ]);
        assert_eq!(seeded.first_story, "The Black Gate");
        assert_eq!(seeded.first_date, "2026-03-01");
        assert_eq!(seeded.appearances, 2);
    }

    #[test]
    fn test_provenance_seed_without_mentions() {
        let seeded = Provenance::seed(Vec::new());
        assert!(seeded.first_story.is_empty());
        assert_eq!(seeded.appearances, 1);
        assert!(seeded.story_appearances.is_empty());
    }

    #[test]
    fn test_extend_unique_skips_duplicates() {
        let mut prov = Provenance::seed(vec![StoryRef::new("2026-03-01", "The Black Gate")]);
        let added = prov.extend_unique(vec![
            StoryRef::new("2026-03-01", "The Black Gate"),
            StoryRef::new("2026-03-02", "Ashes of Vethis"),
        ]);
        assert_eq!(added, 1);
        assert_eq!(prov.appearances, 2);
        assert_eq!(prov.story_appearances.len(), 2);
    }

    #[test]
    fn test_geo_fields_fill_missing() {
        let mut geo = GeoFields {
            world: String::new(),
            continent: String::new(),
            ..GeoFields::default()
        };
        geo.fill_missing(DEFAULT_WORLD);
        assert_eq!(geo.world, DEFAULT_WORLD);
        assert_eq!(geo.continent, UNKNOWN);
        assert_eq!(geo.level(GeoLevel::Realm), UNKNOWN);
    }
}
