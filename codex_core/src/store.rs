//! JSON persistence for the codex and the story archive.
//!
//! Load-mutate-store: the codex is read wholesale before a run and written
//! wholesale after it. A codex that fails to parse is the one fatal
//! condition in the system, and it belongs to the caller.

use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use lore_model::{ArchiveIndex, Codex, DayArchive, DocumentIndex};

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Load the codex from a JSON file.
pub fn load_codex(path: impl AsRef<Path>) -> Result<Codex, StoreError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the codex, or start an empty one when the file does not exist yet.
pub fn load_codex_or_default(path: impl AsRef<Path>) -> Result<Codex, StoreError> {
    if path.as_ref().exists() {
        load_codex(path)
    } else {
        Ok(Codex::new())
    }
}

/// Write the codex to a JSON file, pretty-printed.
pub fn save_codex(path: impl AsRef<Path>, codex: &Codex) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(codex)?;
    fs::write(path, content)?;
    Ok(())
}

/// Load one archived source day.
pub fn load_day_archive(path: impl AsRef<Path>) -> Result<DayArchive, StoreError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load the archive's date index.
pub fn load_archive_index(path: impl AsRef<Path>) -> Result<ArchiveIndex, StoreError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Build the full document index from an archive directory.
///
/// Walks `<archive_dir>/index.json` for dates and loads each
/// `<archive_dir>/<date>.json`; a `current` day file, when given, is
/// overlaid last. Missing or corrupt day files are skipped - the index is
/// best-effort by design, and a thinner index only makes pruning keep less.
pub fn load_document_index(
    archive_dir: impl AsRef<Path>,
    current: Option<&Path>,
) -> DocumentIndex {
    let archive_dir = archive_dir.as_ref();
    let mut documents = DocumentIndex::new();

    let dates = match load_archive_index(archive_dir.join("index.json")) {
        Ok(index) => index.dates,
        Err(err) => {
            debug!(error = %err, "archive index unreadable; starting empty");
            Vec::new()
        }
    };
    for date in dates {
        let date = date.trim();
        if date.is_empty() {
            continue;
        }
        match load_day_archive(archive_dir.join(format!("{date}.json"))) {
            Ok(day) => documents.insert_day(&day),
            Err(err) => debug!(date, error = %err, "skipping unreadable archive day"),
        }
    }

    if let Some(current) = current {
        match load_day_archive(current) {
            Ok(day) => documents.insert_day(&day),
            Err(err) => debug!(error = %err, "skipping unreadable current day file"),
        }
    }

    documents
}

#[cfg(test)]
mod tests {
    use super::*;
    use lore_model::{CharacterRecord, Story};

    #[test]
    fn test_codex_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codex.json");

        let mut codex = Codex::new();
        codex.last_updated = "2026-03-01".into();
        let mut kael = CharacterRecord::new("Kael the Nameless");
        kael.aliases.push("Kael".into());
        codex.characters.push(kael);

        save_codex(&path, &codex).unwrap();
        let loaded = load_codex(&path).unwrap();
        assert_eq!(loaded, codex);
    }

    #[test]
    fn test_corrupt_codex_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("codex.json");
        fs::write(&path, "{not json").unwrap();

        assert!(matches!(load_codex(&path), Err(StoreError::Json(_))));
    }

    #[test]
    fn test_missing_codex_defaults_empty() {
        let dir = tempfile::tempdir().unwrap();
        let codex = load_codex_or_default(dir.path().join("codex.json")).unwrap();
        assert_eq!(codex, Codex::new());
    }

    #[test]
    fn test_document_index_skips_corrupt_days() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("index.json"),
            r#"{"dates": ["2026-03-01", "2026-03-02", "2026-03-03"]}"#,
        )
        .unwrap();

        let day = DayArchive {
            date: "2026-03-01".into(),
            stories: vec![Story {
                title: "The Black Gate".into(),
                text: "Kael rode north.".into(),
                subgenre: String::new(),
            }],
        };
        fs::write(
            dir.path().join("2026-03-01.json"),
            serde_json::to_string(&day).unwrap(),
        )
        .unwrap();
        fs::write(dir.path().join("2026-03-02.json"), "{broken").unwrap();
        // 2026-03-03 is simply absent.

        let documents = load_document_index(dir.path(), None);
        assert_eq!(documents.len(), 1);
        assert!(documents.contains("2026-03-01", "The Black Gate"));
    }
}
