//! Alias-aware identity resolution for characters.
//!
//! Resolution is deliberately conservative: an ambiguous surface form is
//! left unresolved (a new record) rather than guessed into the wrong merge.

use std::collections::HashMap;

use lore_model::CharacterRecord;

use crate::normalize::{first_token, norm_key, strip_trailing_parenthetical};

/// Derived keys shorter than this are too noisy to index.
const MIN_KEY_LEN: usize = 2;

/// The derived-alias set for a canonical name: the name with a leading
/// `"the "` stripped, truncated before the first `" the "` (epithet
/// removal), truncated before a comma, and with a further trailing
/// parenthetical stripped.
pub fn derived_keys(name: &str) -> Vec<String> {
    let key = norm_key(name);
    let mut out: Vec<String> = Vec::new();
    if key.is_empty() {
        return out;
    }

    let mut push = |candidate: &str| {
        let candidate = candidate.trim();
        if candidate.len() >= MIN_KEY_LEN
            && candidate != key
            && !out.iter().any(|k| k == candidate)
        {
            out.push(candidate.to_string());
        }
    };

    if let Some(stripped) = key.strip_prefix("the ") {
        push(stripped);
    }
    if let Some(idx) = key.find(" the ") {
        if idx > 2 {
            push(&key[..idx]);
        }
    }
    if let Some(idx) = key.find(',') {
        if idx > 2 {
            push(&key[..idx]);
        }
    }
    let further = strip_trailing_parenthetical(&key);
    if further != key {
        push(&further);
    }

    out
}

/// Pass-local lookup over the character list.
///
/// Built fresh from the codex snapshot at the start of each merge pass and
/// discarded afterwards; never persisted across runs. `resolve` is pure -
/// mutation of the codex belongs to the reconciler.
#[derive(Debug, Default)]
pub struct CharacterIndex {
    canonical: HashMap<String, usize>,
    alias: HashMap<String, usize>,
    derived: HashMap<String, usize>,
    /// First token of a multi-token canonical name -> record positions.
    first_token: HashMap<String, Vec<usize>>,
}

impl CharacterIndex {
    /// Index every record in the list.
    pub fn build(characters: &[CharacterRecord]) -> Self {
        let mut index = Self::default();
        for (i, record) in characters.iter().enumerate() {
            index.insert(i, record);
        }
        index
    }

    /// Register a record's keys. Earlier registrations win collisions.
    pub fn insert(&mut self, position: usize, record: &CharacterRecord) {
        let key = norm_key(&record.name);
        if key.is_empty() {
            return;
        }
        self.canonical.entry(key.clone()).or_insert(position);
        for derived in derived_keys(&record.name) {
            self.derived.entry(derived).or_insert(position);
        }
        for alias in &record.aliases {
            let alias_key = norm_key(alias);
            if alias_key.len() >= MIN_KEY_LEN {
                self.alias.entry(alias_key).or_insert(position);
            }
        }
        if key.contains(' ') {
            let bucket = self.first_token.entry(first_token(&key).to_string()).or_default();
            if !bucket.contains(&position) {
                bucket.push(position);
            }
        }
    }

    fn lookup(&self, key: &str) -> Option<usize> {
        self.canonical
            .get(key)
            .or_else(|| self.alias.get(key))
            .or_else(|| self.derived.get(key))
            .copied()
    }

    /// Resolve an incoming surface form to an existing record position.
    ///
    /// Order, first match wins: exact canonical key; existing alias key;
    /// derived key of an existing canonical name; derived key of the
    /// incoming name against everything; incoming alias keys against
    /// everything; finally a single-token name resolving to the unique
    /// multi-token canonical name sharing its first word. Ambiguity yields
    /// `None` (create a new record instead of a wrong merge).
    pub fn resolve(&self, name: &str, incoming_aliases: &[String]) -> Option<usize> {
        let key = norm_key(name);
        if key.is_empty() {
            return None;
        }

        if let Some(found) = self.lookup(&key) {
            return Some(found);
        }
        for derived in derived_keys(name) {
            if let Some(found) = self.lookup(&derived) {
                return Some(found);
            }
        }
        for alias in incoming_aliases {
            let alias_key = norm_key(alias);
            if alias_key.is_empty() {
                continue;
            }
            if let Some(found) = self.lookup(&alias_key) {
                return Some(found);
            }
        }
        if !key.contains(' ') {
            if let Some(bucket) = self.first_token.get(key.as_str()) {
                if bucket.len() == 1 {
                    return Some(bucket[0]);
                }
            }
        }
        None
    }
}
