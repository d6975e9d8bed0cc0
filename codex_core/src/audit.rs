//! Advisory structural audits.
//!
//! Nothing here blocks or mutates a merge; warnings surface drift for an
//! operator to act on (usually via the pruning or duplicate-merge passes).

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::warn;

use lore_model::{is_placeholder, Codex, DocumentIndex, LoreEntity, PolityRecord};

use crate::normalize::{base_name, norm_key};

/// One advisory finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuditWarning {
    /// Two or more non-contested governing bodies claim disjoint sole
    /// sovereigns over the same realm/region/seat.
    SovereigntyConflict {
        anchor: String,
        /// `(polity name, claimed sovereigns)` for every competing claim.
        claims: Vec<(String, Vec<String>)>,
    },

    /// A relic whose name collides with a character: the mention belongs to
    /// the character, not an object.
    CategoryDrift { name: String, character: String },

    /// A provenance entry naming a document absent from the archive.
    BrokenLink {
        entity: String,
        link_type: &'static str,
        date: String,
        title: String,
    },
}

impl std::fmt::Display for AuditWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuditWarning::SovereigntyConflict { anchor, claims } => {
                write!(f, "competing sovereignty over {anchor}:")?;
                for (polity, sovereigns) in claims {
                    write!(f, " [{} claims {}]", polity, sovereigns.join(", "))?;
                }
                Ok(())
            }
            AuditWarning::CategoryDrift { name, character } => {
                write!(f, "relic {name} shadows character {character}")
            }
            AuditWarning::BrokenLink {
                entity,
                link_type,
                date,
                title,
            } => write!(f, "{entity}: {link_type} -> {date} / {title} not archived"),
        }
    }
}

fn status_contested(status: &str) -> bool {
    let status = status.to_lowercase();
    ["contested", "usurped", "civil"]
        .iter()
        .any(|marker| status.contains(marker))
}

fn sovereign_set(polity: &PolityRecord) -> HashSet<String> {
    polity
        .sovereigns
        .iter()
        .map(|name| norm_key(name))
        .filter(|key| !key.is_empty())
        .collect()
}

fn sovereignty_conflicts(codex: &Codex, warnings: &mut Vec<AuditWarning>) {
    // Anchor each polity to the first established field of what it governs.
    let mut groups: BTreeMap<String, (String, Vec<&PolityRecord>)> = BTreeMap::new();
    for polity in &codex.polities {
        let anchor = [&polity.realm, &polity.region, &polity.seat]
            .into_iter()
            .find(|value| !is_placeholder(value));
        let Some(anchor) = anchor else { continue };
        let entry = groups
            .entry(norm_key(anchor))
            .or_insert_with(|| (anchor.trim().to_string(), Vec::new()));
        entry.1.push(polity);
    }

    for (_, (anchor, polities)) in groups {
        let claimers: Vec<(&PolityRecord, HashSet<String>)> = polities
            .iter()
            .filter(|p| !status_contested(&p.status))
            .map(|p| (*p, sovereign_set(p)))
            .filter(|(_, sovereigns)| !sovereigns.is_empty())
            .collect();
        if claimers.len() < 2 {
            continue;
        }

        let pairwise_disjoint = claimers.iter().enumerate().all(|(i, (_, a))| {
            claimers
                .iter()
                .skip(i + 1)
                .all(|(_, b)| a.is_disjoint(b))
        });
        let combined: HashSet<&String> = claimers.iter().flat_map(|(_, s)| s).collect();
        if !pairwise_disjoint || combined.len() < 2 {
            continue;
        }

        let claims: Vec<(String, Vec<String>)> = claimers
            .iter()
            .map(|(p, _)| (p.name.clone(), p.sovereigns.clone()))
            .collect();
        warn!(anchor = %anchor, claims = claims.len(), "competing sovereignty claims");
        warnings.push(AuditWarning::SovereigntyConflict { anchor, claims });
    }
}

fn category_drift(codex: &Codex, warnings: &mut Vec<AuditWarning>) {
    let character_bases: HashMap<String, &str> = codex
        .characters
        .iter()
        .filter(|c| !c.name.trim().is_empty())
        .map(|c| (base_name(&c.name), c.name.as_str()))
        .collect();

    for relic in &codex.relics {
        if let Some(character) = character_bases.get(&base_name(&relic.name)) {
            warn!(relic = %relic.name, character = %character, "relic shadows a character");
            warnings.push(AuditWarning::CategoryDrift {
                name: relic.name.clone(),
                character: (*character).to_string(),
            });
        }
    }
}

/// Audit the codex for sovereignty conflicts and cross-category drift.
pub fn audit(codex: &Codex) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    sovereignty_conflicts(codex, &mut warnings);
    category_drift(codex, &mut warnings);
    warnings
}

/// Report provenance entries pointing at documents the archive does not
/// hold. Nothing is mutated; the pruner is the corrective pass.
pub fn validate_links(codex: &Codex, documents: &DocumentIndex) -> Vec<AuditWarning> {
    let mut warnings = Vec::new();
    for entity in codex.entities() {
        let provenance = entity.provenance();
        for appearance in &provenance.story_appearances {
            if appearance.date.trim().is_empty() || appearance.title.trim().is_empty() {
                continue;
            }
            if !documents.contains(&appearance.date, &appearance.title) {
                warnings.push(AuditWarning::BrokenLink {
                    entity: entity.name().to_string(),
                    link_type: "story_appearances",
                    date: appearance.date.clone(),
                    title: appearance.title.clone(),
                });
            }
        }
        let first_date = provenance.first_date.trim();
        let first_story = provenance.first_story.trim();
        if !first_date.is_empty()
            && !first_story.is_empty()
            && !documents.contains(first_date, first_story)
        {
            warnings.push(AuditWarning::BrokenLink {
                entity: entity.name().to_string(),
                link_type: "first_story",
                date: first_date.to_string(),
                title: first_story.to_string(),
            });
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_model::{CharacterRecord, RelicRecord, StoryRef};

    fn polity(name: &str, realm: &str, sovereigns: &[&str], status: &str) -> PolityRecord {
        let mut p = PolityRecord::new(name);
        p.realm = realm.into();
        p.sovereigns = sovereigns.iter().map(|s| s.to_string()).collect();
        p.status = status.into();
        p
    }

    #[test]
    fn test_two_sole_sovereigns_conflict_once() {
        let mut codex = Codex::new();
        codex.polities.push(polity(
            "The Crown of Ashmere",
            "Realm of Ashmere",
            &["Queen Maravel"],
            "stable",
        ));
        codex.polities.push(polity(
            "The Regency of Ashmere",
            "Realm of Ashmere",
            &["Lord Protector Huln"],
            "stable",
        ));

        let warnings = audit(&codex);
        assert_eq!(warnings.len(), 1);
        match &warnings[0] {
            AuditWarning::SovereigntyConflict { anchor, claims } => {
                assert_eq!(anchor, "Realm of Ashmere");
                assert_eq!(claims.len(), 2);
                assert!(claims.iter().any(|(name, _)| name == "The Crown of Ashmere"));
                assert!(claims
                    .iter()
                    .any(|(name, _)| name == "The Regency of Ashmere"));
            }
            other => panic!("unexpected warning: {other:?}"),
        }
    }

    #[test]
    fn test_contested_status_suppresses_conflict() {
        let mut codex = Codex::new();
        codex.polities.push(polity(
            "The Crown of Ashmere",
            "Realm of Ashmere",
            &["Queen Maravel"],
            "stable",
        ));
        codex.polities.push(polity(
            "The Usurper's Seat",
            "Realm of Ashmere",
            &["Lord Protector Huln"],
            "usurped",
        ));
        assert!(audit(&codex).is_empty());
    }

    #[test]
    fn test_shared_sovereign_not_a_conflict() {
        let mut codex = Codex::new();
        codex.polities.push(polity(
            "The Crown of Ashmere",
            "Realm of Ashmere",
            &["Queen Maravel"],
            "stable",
        ));
        codex.polities.push(polity(
            "The High Council",
            "Realm of Ashmere",
            &["Queen Maravel", "Chancellor Ves"],
            "stable",
        ));
        assert!(audit(&codex).is_empty());
    }

    #[test]
    fn test_unknown_anchor_skipped() {
        let mut codex = Codex::new();
        codex
            .polities
            .push(polity("The Wandering Court", "unknown", &["King Oren"], "stable"));
        codex
            .polities
            .push(polity("The Hidden Court", "unknown", &["King Ilex"], "stable"));
        assert!(audit(&codex).is_empty());
    }

    #[test]
    fn test_relic_shadowing_character_reported() {
        let mut codex = Codex::new();
        codex.characters.push(CharacterRecord::new("V\u{e9}lgrim"));
        codex.relics.push(RelicRecord::new("Velgrim"));

        let warnings = audit(&codex);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            AuditWarning::CategoryDrift { name, .. } if name == "Velgrim"
        ));
    }

    #[test]
    fn test_validate_links_reports_missing_documents() {
        let mut codex = Codex::new();
        let mut kael = CharacterRecord::new("Kael");
        kael.provenance.first_story = "The Black Gate".into();
        kael.provenance.first_date = "2026-03-01".into();
        kael.provenance
            .story_appearances
            .push(StoryRef::new("2026-03-09", "Never Written"));
        codex.characters.push(kael);

        let mut documents = DocumentIndex::new();
        documents.insert("2026-03-01", "The Black Gate", "Kael rode north.");

        let warnings = validate_links(&codex, &documents);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(
            &warnings[0],
            AuditWarning::BrokenLink { title, .. } if title == "Never Written"
        ));
    }
}
