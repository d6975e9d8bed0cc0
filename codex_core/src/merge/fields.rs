//! Field-level precedence helpers for record reconciliation.

use std::collections::HashSet;

use lore_model::is_placeholder;

/// Fill-if-placeholder: an incoming value replaces the existing one only
/// when the existing value is empty or an "unknown" placeholder.
pub fn fill_scalar(existing: &mut String, incoming: &str) {
    if is_placeholder(existing) && !incoming.trim().is_empty() {
        *existing = incoming.to_string();
    }
}

/// Longer text wins; ties keep the existing value. Used for bio-like
/// long-form fields where a fuller retelling supersedes a stub.
pub fn prefer_longer(existing: &mut String, incoming: &str) {
    let incoming = incoming.trim();
    if !incoming.is_empty() && incoming.len() > existing.trim().len() {
        *existing = incoming.to_string();
    }
}

/// Case-insensitive union preserving first-seen order. List-valued fields
/// are never replaced, only grown.
pub fn union_list(existing: &mut Vec<String>, incoming: &[String]) {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|item| item.trim().to_lowercase())
        .collect();
    for item in incoming {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_lowercase()) {
            existing.push(trimmed.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_scalar_keeps_established_values() {
        let mut status = "cursed".to_string();
        fill_scalar(&mut status, "active");
        assert_eq!(status, "cursed");

        let mut status = "unknown".to_string();
        fill_scalar(&mut status, "active");
        assert_eq!(status, "active");

        let mut status = String::new();
        fill_scalar(&mut status, "");
        assert!(status.is_empty());
    }

    #[test]
    fn test_prefer_longer_keeps_ties() {
        let mut bio = "A thief of Vethis.".to_string();
        prefer_longer(&mut bio, "A thief.");
        assert_eq!(bio, "A thief of Vethis.");

        prefer_longer(&mut bio, "A thief of Vethis, sworn to the Gray Pilgrim.");
        assert!(bio.contains("Gray Pilgrim"));
    }

    #[test]
    fn test_union_list_case_insensitive() {
        let mut traits = vec!["Reckless".to_string(), "Cursed".to_string()];
        union_list(
            &mut traits,
            &["cursed".to_string(), "Hunted".to_string(), "".to_string()],
        );
        assert_eq!(traits, ["Reckless", "Cursed", "Hunted"]);
    }
}
