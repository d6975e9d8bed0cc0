//! Explicit duplicate-merge correction for characters.
//!
//! Normal merge flow never deletes a record; when resolution has produced an
//! accidental duplicate anyway, an operator names `(source, target)` pairs
//! and the source is folded into the target and removed.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use lore_model::{CharacterRecord, Codex};

use crate::merge::{add_alias, fill_scalar, prefer_longer, union_list};
use crate::normalize::norm_key;

/// Operator errors: these merges are hand-specified, so a name that does
/// not resolve is a mistake worth failing loudly on.
#[derive(Debug, Error)]
pub enum DedupError {
    #[error("unknown source character: {0}")]
    UnknownSource(String),

    #[error("unknown target character: {0}")]
    UnknownTarget(String),
}

/// What one source-into-target fold changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub source: String,
    pub target: String,
    pub aliases_added: usize,
    pub appearances_added: usize,
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y/%m/%d"))
        .ok()
}

fn find_character(characters: &[CharacterRecord], name: &str) -> Option<usize> {
    let wanted = norm_key(name);
    characters
        .iter()
        .position(|c| norm_key(&c.name) == wanted)
}

fn fold_character(target: &mut CharacterRecord, source: CharacterRecord) -> MergeOutcome {
    let aliases_before = target.aliases.len();
    let ledger_before = target.provenance.story_appearances.len();

    for alias in &source.aliases {
        add_alias(target, alias);
    }
    add_alias(target, &source.name);

    target
        .provenance
        .extend_unique(source.provenance.story_appearances.iter().cloned());
    target.provenance.story_appearances.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then_with(|| a.title.to_lowercase().cmp(&b.title.to_lowercase()))
    });
    if target.provenance.story_appearances.is_empty() {
        // No ledger on either side; the raw counters are all there is.
        target.provenance.appearances += source.provenance.appearances;
    }

    match (
        parse_date(&target.provenance.first_date),
        parse_date(&source.provenance.first_date),
    ) {
        (Some(target_date), Some(source_date)) => {
            if source_date < target_date {
                target.provenance.first_date = source.provenance.first_date.clone();
                target.provenance.first_story = source.provenance.first_story.clone();
            }
        }
        _ => {
            if target.provenance.first_date.trim().is_empty() {
                target.provenance.first_date = source.provenance.first_date.clone();
            }
            if target.provenance.first_story.trim().is_empty() {
                target.provenance.first_story = source.provenance.first_story.clone();
            }
        }
    }

    fill_scalar(&mut target.tagline, &source.tagline);
    fill_scalar(&mut target.role, &source.role);
    fill_scalar(&mut target.status, &source.status);
    fill_scalar(&mut target.world, &source.world);
    fill_scalar(&mut target.travel_scope, &source.travel_scope);
    fill_scalar(&mut target.home_place, &source.home_place);
    fill_scalar(&mut target.home_region, &source.home_region);
    fill_scalar(&mut target.home_realm, &source.home_realm);
    fill_scalar(&mut target.notes, &source.notes);
    prefer_longer(&mut target.bio, &source.bio);
    union_list(&mut target.traits, &source.traits);
    union_list(&mut target.status_history, &source.status_history);

    MergeOutcome {
        source: source.name,
        target: target.name.clone(),
        aliases_added: target.aliases.len() - aliases_before,
        appearances_added: target
            .provenance
            .story_appearances
            .len()
            .saturating_sub(ledger_before),
    }
}

/// Fold each `(source, target)` character pair and delete the source.
///
/// Pairs naming the same record are skipped. The codex is partially updated
/// when an error is returned mid-list; callers should treat the merge list
/// as one operator action and re-check on failure.
pub fn merge_duplicates(
    codex: &mut Codex,
    merges: &[(String, String)],
) -> Result<Vec<MergeOutcome>, DedupError> {
    let mut outcomes = Vec::new();
    for (source_name, target_name) in merges {
        let source_index = find_character(&codex.characters, source_name)
            .ok_or_else(|| DedupError::UnknownSource(source_name.clone()))?;
        let target_index = find_character(&codex.characters, target_name)
            .ok_or_else(|| DedupError::UnknownTarget(target_name.clone()))?;
        if source_index == target_index {
            continue;
        }

        let source = codex.characters.remove(source_index);
        let target_index = if source_index < target_index {
            target_index - 1
        } else {
            target_index
        };
        let outcome = fold_character(&mut codex.characters[target_index], source);
        info!(
            source = %outcome.source,
            target = %outcome.target,
            aliases_added = outcome.aliases_added,
            "merged duplicate character"
        );
        outcomes.push(outcome);
    }
    Ok(outcomes)
}
