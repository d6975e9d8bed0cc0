//! Character reconciliation: alias-aware resolution, canonical-name
//! upgrades, and provenance growth.

use tracing::debug;

use lore_model::{CharacterRecord, Codex, Provenance, SourceDocument};

use crate::mentions::appearances_for_names;
use crate::merge::fields::{fill_scalar, prefer_longer, union_list};
use crate::merge::MergeReport;
use crate::normalize::{first_token, norm_key};
use crate::resolve::CharacterIndex;

/// Record an alias, skipping blanks, duplicates, and anything that
/// normalizes to the canonical name itself.
pub(crate) fn add_alias(target: &mut CharacterRecord, alias: &str) {
    let alias = alias.trim();
    let key = norm_key(alias);
    if key.is_empty() || key == norm_key(&target.name) {
        return;
    }
    if !target
        .aliases
        .iter()
        .any(|existing| existing.trim().to_lowercase() == alias.to_lowercase())
    {
        target.aliases.push(alias.to_string());
    }
}

/// True when `incoming` is a strict epithet/title elaboration of
/// `existing`: same leading token, and the incoming key carries `" the "`
/// or a comma while the existing key carries neither.
fn is_elaboration(incoming_key: &str, existing_key: &str) -> bool {
    (incoming_key.contains(" the ") || incoming_key.contains(','))
        && !existing_key.contains(" the ")
        && !existing_key.contains(',')
        && first_token(incoming_key) == first_token(existing_key)
}

fn reconcile_character(target: &mut CharacterRecord, incoming: &CharacterRecord) {
    let incoming_key = norm_key(&incoming.name);
    let existing_key = norm_key(&target.name);

    if !incoming_key.is_empty() && incoming_key != existing_key {
        if is_elaboration(&incoming_key, &existing_key) {
            // Promote the fuller surface form to canonical; the old name
            // becomes an alias and the promoted one must not linger as one.
            let demoted = std::mem::replace(&mut target.name, incoming.name.trim().to_string());
            target.aliases.retain(|a| norm_key(a) != incoming_key);
            add_alias(target, &demoted);
        } else {
            add_alias(target, &incoming.name);
        }
    }
    for alias in &incoming.aliases {
        add_alias(target, alias);
    }

    fill_scalar(&mut target.tagline, &incoming.tagline);
    fill_scalar(&mut target.role, &incoming.role);
    fill_scalar(&mut target.status, &incoming.status);
    fill_scalar(&mut target.world, &incoming.world);
    fill_scalar(&mut target.travel_scope, &incoming.travel_scope);
    fill_scalar(&mut target.home_place, &incoming.home_place);
    fill_scalar(&mut target.home_region, &incoming.home_region);
    fill_scalar(&mut target.home_realm, &incoming.home_realm);
    fill_scalar(&mut target.notes, &incoming.notes);
    prefer_longer(&mut target.bio, &incoming.bio);
    union_list(&mut target.traits, &incoming.traits);
    union_list(&mut target.status_history, &incoming.status_history);
}

fn record_mentions(record: &mut CharacterRecord, documents: &[SourceDocument]) {
    let names: Vec<String> = std::iter::once(record.name.clone())
        .chain(record.aliases.iter().cloned())
        .collect();
    let mentions = appearances_for_names(names.iter().map(String::as_str), documents);
    record.provenance.extend_unique(mentions);
    record.provenance.backfill_first();
}

pub(crate) fn merge_characters(
    codex: &mut Codex,
    incoming: &[CharacterRecord],
    documents: &[SourceDocument],
    report: &mut MergeReport,
) {
    let stats = report.stats_mut("characters");
    let mut index = CharacterIndex::build(&codex.characters);

    for record in incoming {
        if norm_key(&record.name).is_empty() {
            debug!("skipping character record without a usable name");
            stats.skipped += 1;
            continue;
        }

        match index.resolve(&record.name, &record.aliases) {
            Some(position) => {
                let target = &mut codex.characters[position];
                reconcile_character(target, record);
                record_mentions(target, documents);
                // A canonical upgrade or new alias adds lookup keys for the
                // rest of the batch.
                index.insert(position, &codex.characters[position]);
                stats.merged += 1;
            }
            None => {
                let mut created = record.clone();
                created.name = record.name.trim().to_string();
                let incoming_aliases = std::mem::take(&mut created.aliases);
                for alias in &incoming_aliases {
                    add_alias(&mut created, alias);
                }
                let names: Vec<String> = std::iter::once(created.name.clone())
                    .chain(created.aliases.iter().cloned())
                    .collect();
                created.provenance = Provenance::seed(appearances_for_names(
                    names.iter().map(String::as_str),
                    documents,
                ));
                index.insert(codex.characters.len(), &created);
                codex.characters.push(created);
                stats.created += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_model::{ExtractedEntities, ExtractionBatch};

    use crate::merge::merge_batch;

    fn batch_with_characters(
        documents: Vec<SourceDocument>,
        characters: Vec<CharacterRecord>,
    ) -> ExtractionBatch {
        ExtractionBatch {
            documents,
            extracted_entities: ExtractedEntities {
                characters,
                ..ExtractedEntities::default()
            },
        }
    }

    #[test]
    fn test_short_form_merges_into_epithet_name() {
        let mut codex = Codex::new();
        codex.characters.push(CharacterRecord::new("Kael the Nameless"));

        let batch = batch_with_characters(Vec::new(), vec![CharacterRecord::new("Kael")]);
        merge_batch(&mut codex, &batch);

        assert_eq!(codex.characters.len(), 1);
        assert_eq!(codex.characters[0].name, "Kael the Nameless");
        assert_eq!(codex.characters[0].aliases, ["Kael".to_string()]);
    }

    #[test]
    fn test_elaboration_promotes_canonical_name() {
        let mut codex = Codex::new();
        codex.characters.push(CharacterRecord::new("Kael"));

        let batch =
            batch_with_characters(Vec::new(), vec![CharacterRecord::new("Kael the Nameless")]);
        merge_batch(&mut codex, &batch);

        assert_eq!(codex.characters.len(), 1);
        assert_eq!(codex.characters[0].name, "Kael the Nameless");
        assert_eq!(codex.characters[0].aliases, ["Kael".to_string()]);
    }

    #[test]
    fn test_promoted_name_never_stays_an_alias() {
        let mut codex = Codex::new();
        let mut existing = CharacterRecord::new("Kael");
        existing.aliases.push("Kael the Nameless".into());
        codex.characters.push(existing);

        let batch =
            batch_with_characters(Vec::new(), vec![CharacterRecord::new("Kael the Nameless")]);
        merge_batch(&mut codex, &batch);

        let merged = &codex.characters[0];
        assert_eq!(merged.name, "Kael the Nameless");
        assert!(merged
            .aliases
            .iter()
            .all(|a| norm_key(a) != norm_key(&merged.name)));
        assert_eq!(merged.aliases, ["Kael".to_string()]);
    }

    #[test]
    fn test_established_fields_survive_merge() {
        let mut codex = Codex::new();
        let mut existing = CharacterRecord::new("Vess");
        existing.role = "Warden".into();
        existing.bio = "Short note.".into();
        existing.traits = vec!["Stern".into()];
        codex.characters.push(existing);

        let mut incoming = CharacterRecord::new("Vess");
        incoming.role = "Thief".into();
        incoming.status = "dead".into();
        incoming.bio = "A far longer account of the warden of the Reach.".into();
        incoming.traits = vec!["stern".into(), "Unforgiving".into()];

        let batch = batch_with_characters(Vec::new(), vec![incoming]);
        merge_batch(&mut codex, &batch);

        let merged = &codex.characters[0];
        assert_eq!(merged.role, "Warden");
        assert_eq!(merged.status, "dead");
        assert!(merged.bio.contains("far longer account"));
        assert_eq!(merged.traits, ["Stern", "Unforgiving"]);
    }

    #[test]
    fn test_provenance_grows_without_duplicates() {
        let docs = vec![
            SourceDocument::new("2026-03-01", "The Black Gate", "Kael rode north."),
            SourceDocument::new("2026-03-02", "Ashes of Vethis", "Kael fled the ashes."),
        ];
        let mut codex = Codex::new();

        let batch = batch_with_characters(docs.clone(), vec![CharacterRecord::new("Kael")]);
        merge_batch(&mut codex, &batch);
        merge_batch(&mut codex, &batch);

        let kael = &codex.characters[0];
        assert_eq!(kael.provenance.story_appearances.len(), 2);
        assert_eq!(kael.provenance.appearances, 2);
        assert_eq!(kael.provenance.first_story, "The Black Gate");
        assert_eq!(kael.provenance.first_date, "2026-03-01");
    }

    #[test]
    fn test_nameless_record_skipped() {
        let mut codex = Codex::new();
        let batch = batch_with_characters(Vec::new(), vec![CharacterRecord::new("  ")]);
        let report = merge_batch(&mut codex, &batch);

        assert!(codex.characters.is_empty());
        assert_eq!(report.by_category["characters"].skipped, 1);
    }

    #[test]
    fn test_created_record_resolvable_later_in_batch() {
        let mut codex = Codex::new();
        let batch = batch_with_characters(
            Vec::new(),
            vec![
                CharacterRecord::new("Morthax Bloodhorn"),
                CharacterRecord::new("Morthax"),
            ],
        );
        merge_batch(&mut codex, &batch);

        assert_eq!(codex.characters.len(), 1);
        assert_eq!(codex.characters[0].name, "Morthax Bloodhorn");
    }
}
