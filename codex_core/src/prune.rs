//! Provenance pruning: re-validate every ledger entry against the actual
//! archive and drop what no longer verifies.
//!
//! The pass only removes; it never invents appearances. Re-running it on
//! its own output is a no-op.

use std::collections::HashSet;

use tracing::{debug, warn};

use lore_model::{Codex, DocumentIndex, LoreEntity, StoryRef};

use crate::mentions::mentioned_any;
use crate::normalize::base_name;

/// What a pruning pass removed and kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneReport {
    /// Ledger entries dropped for failing verification.
    pub removed: usize,
    /// Ledger entries that survived.
    pub kept: usize,
    /// Records whose emptied ledger was restored from `first_story`.
    pub restored: usize,
    /// Relics dropped for shadowing a character name.
    pub relics_dropped: usize,
}

/// Prune the codex against the full document archive.
pub fn prune(codex: &mut Codex, documents: &DocumentIndex) -> PruneReport {
    let mut report = PruneReport::default();

    // Cross-category drift: a relic sharing a character's base name is a
    // misclassified mention of the character.
    let character_bases: HashSet<String> = codex
        .characters
        .iter()
        .filter(|c| !c.name.trim().is_empty())
        .map(|c| base_name(&c.name))
        .collect();
    let relic_count = codex.relics.len();
    codex
        .relics
        .retain(|relic| !character_bases.contains(&base_name(&relic.name)));
    report.relics_dropped = relic_count - codex.relics.len();
    if report.relics_dropped > 0 {
        warn!(dropped = report.relics_dropped, "relics shadowing character names removed");
    }

    for entity in codex.entities_mut() {
        let names: Vec<String> = std::iter::once(entity.name().to_string())
            .chain(entity.aliases().iter().cloned())
            .collect();
        let provenance = entity.provenance_mut();
        if provenance.story_appearances.is_empty() {
            continue;
        }

        let mut survivors: Vec<StoryRef> = Vec::new();
        for appearance in &provenance.story_appearances {
            let date = appearance.date.trim();
            let title = appearance.title.trim();
            if date.is_empty() || title.is_empty() {
                continue;
            }
            let verified = documents
                .blob(date, title)
                .map_or(false, |blob| {
                    mentioned_any(names.iter().map(String::as_str), blob)
                });
            if verified {
                let entry = StoryRef::new(date, title);
                if !survivors.contains(&entry) {
                    survivors.push(entry);
                }
            }
        }

        // Keep one verified pair rather than zero provenance when the
        // recorded first story still checks out.
        if survivors.is_empty() {
            let first_date = provenance.first_date.trim();
            let first_story = provenance.first_story.trim();
            if !first_date.is_empty() && !first_story.is_empty() {
                let verified = documents
                    .blob(first_date, first_story)
                    .map_or(false, |blob| {
                        mentioned_any(names.iter().map(String::as_str), blob)
                    });
                if verified {
                    survivors.push(StoryRef::new(first_date, first_story));
                    report.restored += 1;
                }
            }
        }

        let removed = provenance.story_appearances.len().saturating_sub(survivors.len());
        if removed > 0 {
            debug!(entity = %names[0], removed, "pruned unverified appearances");
        }
        report.removed += removed;
        report.kept += survivors.len();

        provenance.appearances = survivors.len() as u32;
        provenance.story_appearances = survivors;
        provenance.backfill_first();
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_model::{CharacterRecord, PlaceRecord, RelicRecord};

    fn archive() -> DocumentIndex {
        let mut documents = DocumentIndex::new();
        documents.insert("2026-03-01", "The Black Gate", "Kael rode north past the crown.");
        documents.insert("2026-03-02", "Ashes of Vethis", "A wind-bitten crow circled.");
        documents
    }

    fn kael_with_ledger(entries: &[(&str, &str)]) -> CharacterRecord {
        let mut kael = CharacterRecord::new("Kael");
        for (date, title) in entries {
            kael.provenance
                .story_appearances
                .push(StoryRef::new(*date, *title));
        }
        kael.provenance.appearances = entries.len() as u32;
        kael
    }

    #[test]
    fn test_prune_drops_unverified_pairs() {
        let mut codex = Codex::new();
        codex.characters.push(kael_with_ledger(&[
            ("2026-03-01", "The Black Gate"),
            ("2026-03-02", "Ashes of Vethis"),
            ("2026-03-09", "Never Written"),
        ]));

        let report = prune(&mut codex, &archive());

        let kael = &codex.characters[0];
        assert_eq!(
            kael.provenance.story_appearances,
            vec![StoryRef::new("2026-03-01", "The Black Gate")]
        );
        assert_eq!(kael.provenance.appearances, 1);
        assert_eq!(report.removed, 2);
        assert_eq!(report.kept, 1);
    }

    #[test]
    fn test_prune_boundary_safe() {
        let mut codex = Codex::new();
        let mut crown = PlaceRecord::new("Crown");
        crown
            .provenance
            .story_appearances
            .push(StoryRef::new("2026-03-02", "Ashes of Vethis"));
        crown.provenance.appearances = 1;
        codex.places.push(crown);

        prune(&mut codex, &archive());

        // "crow" in the text must not count as a "Crown" mention.
        assert!(codex.places[0].provenance.story_appearances.is_empty());
        assert_eq!(codex.places[0].provenance.appearances, 0);
    }

    #[test]
    fn test_prune_verifies_aliases_for_characters() {
        let mut codex = Codex::new();
        let mut rider = CharacterRecord::new("The Pale Rider");
        rider.aliases.push("Kael".into());
        rider
            .provenance
            .story_appearances
            .push(StoryRef::new("2026-03-01", "The Black Gate"));
        rider.provenance.appearances = 1;
        codex.characters.push(rider);

        prune(&mut codex, &archive());
        assert_eq!(codex.characters[0].provenance.story_appearances.len(), 1);
    }

    #[test]
    fn test_prune_restores_first_story_fallback() {
        let mut codex = Codex::new();
        let mut kael = kael_with_ledger(&[("2026-03-09", "Never Written")]);
        kael.provenance.first_date = "2026-03-01".into();
        kael.provenance.first_story = "The Black Gate".into();
        codex.characters.push(kael);

        let report = prune(&mut codex, &archive());

        let kael = &codex.characters[0];
        assert_eq!(
            kael.provenance.story_appearances,
            vec![StoryRef::new("2026-03-01", "The Black Gate")]
        );
        assert_eq!(report.restored, 1);
    }

    #[test]
    fn test_prune_drops_shadowing_relics() {
        let mut codex = Codex::new();
        codex.characters.push(CharacterRecord::new("Velgrim"));
        codex.relics.push(RelicRecord::new("V\u{e9}lgrim"));
        codex.relics.push(RelicRecord::new("The Hollow Idol"));

        let report = prune(&mut codex, &archive());

        assert_eq!(report.relics_dropped, 1);
        assert_eq!(codex.relics.len(), 1);
        assert_eq!(codex.relics[0].name, "The Hollow Idol");
    }

    #[test]
    fn test_prune_idempotent() {
        let mut codex = Codex::new();
        codex.characters.push(kael_with_ledger(&[
            ("2026-03-01", "The Black Gate"),
            ("2026-03-09", "Never Written"),
        ]));
        let mut velgrim = CharacterRecord::new("Velgrim");
        velgrim.provenance.first_story = "The Black Gate".into();
        velgrim.provenance.first_date = "2026-03-01".into();
        codex.characters.push(velgrim);
        codex.relics.push(RelicRecord::new("Velgrim"));

        let documents = archive();
        prune(&mut codex, &documents);
        let once = codex.clone();
        let report = prune(&mut codex, &documents);

        assert_eq!(codex, once);
        assert_eq!(report.removed, 0);
        assert_eq!(report.restored, 0);
        assert_eq!(report.relics_dropped, 0);
    }

    #[test]
    fn test_empty_ledger_untouched() {
        let mut codex = Codex::new();
        let kael = CharacterRecord::new("Kael");
        codex.characters.push(kael);

        prune(&mut codex, &archive());
        assert_eq!(codex.characters[0].provenance.appearances, 0);
    }
}
