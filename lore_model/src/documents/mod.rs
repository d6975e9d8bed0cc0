//! Source documents, day archives, and extraction batches.
//!
//! Documents are the ground truth for mention verification. They are
//! supplied by the generation subsystem and never mutated by the merge
//! engine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entities::{
    ArtifactRecord, CharacterRecord, EventRecord, FactionRecord, FloraFaunaRecord, GeoRecord,
    LoreEntryRecord, MagicRecord, PlaceRecord, PolityRecord, RegionRecord, RelicRecord,
    RitualRecord, SubstanceRecord, WeaponRecord,
};

/// An immutable narrative unit identified by `(date, title)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SourceDocument {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
}

impl SourceDocument {
    /// Create a new source document.
    pub fn new(
        date: impl Into<String>,
        title: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
            text: text.into(),
        }
    }
}

/// One story inside a day archive (the per-story date lives on the day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Story {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub subgenre: String,
}

/// All stories produced on a single source day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DayArchive {
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub stories: Vec<Story>,
}

impl DayArchive {
    /// Expand the day's stories into dated source documents.
    pub fn documents(&self) -> Vec<SourceDocument> {
        self.stories
            .iter()
            .map(|s| SourceDocument::new(&self.date, &s.title, &s.text))
            .collect()
    }
}

/// Index of all archived source days.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ArchiveIndex {
    #[serde(default)]
    pub dates: Vec<String>,
}

/// Lookup from `(date, title)` to a document's searchable text.
///
/// Titles are compared case-insensitively; the stored blob is
/// `"title\ntext"` so title-only mentions still count.
#[derive(Debug, Clone, Default)]
pub struct DocumentIndex {
    blobs: HashMap<(String, String), String>,
}

impl DocumentIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(date: &str, title: &str) -> (String, String) {
        (date.trim().to_string(), title.trim().to_lowercase())
    }

    /// Register one document. Untitled documents are skipped.
    pub fn insert(&mut self, date: &str, title: &str, text: &str) {
        if title.trim().is_empty() {
            return;
        }
        let blob = format!("{}\n{}", title.trim(), text);
        self.blobs.insert(Self::key(date, title), blob);
    }

    /// Register every story of a day archive.
    pub fn insert_day(&mut self, day: &DayArchive) {
        for story in &day.stories {
            self.insert(&day.date, &story.title, &story.text);
        }
    }

    /// The searchable blob for an exact `(date, title)` pair, if archived.
    pub fn blob(&self, date: &str, title: &str) -> Option<&str> {
        self.blobs.get(&Self::key(date, title)).map(String::as_str)
    }

    /// Whether a document with this exact `(date, title)` exists.
    pub fn contains(&self, date: &str, title: &str) -> bool {
        self.blobs.contains_key(&Self::key(date, title))
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    /// Whether the index holds no documents.
    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}

/// Partial entity records produced by one extraction run, grouped by
/// category. Absent categories deserialize as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExtractedEntities {
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

/// One extraction run's worth of input: the documents it read and the
/// partial records it produced. Ephemeral; consumed by a single merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ExtractionBatch {
    #[serde(default)]
    pub documents: Vec<SourceDocument>,
    #[serde(default)]
    pub extracted_entities: ExtractedEntities,
}

impl ExtractionBatch {
    /// The latest document date in the batch, if any document carries one.
    pub fn latest_date(&self) -> Option<&str> {
        self.documents
            .iter()
            .map(|d| d.date.trim())
            .filter(|d| !d.is_empty())
            .max()
    }
}
