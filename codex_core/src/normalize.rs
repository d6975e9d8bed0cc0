//! Name normalization - canonical comparison keys for inconsistent surface
//! forms.
//!
//! Keys are what identity resolution compares: curly quotes straightened,
//! one trailing parenthetical qualifier removed, whitespace collapsed,
//! case folded. The empty key means "no match, do not create" to every
//! caller.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

static TRAILING_PARENTHETICAL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\([^)]*\)\s*$").expect("valid pattern"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// Replace curly quotation marks with their straight equivalents.
pub fn straighten_quotes(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            _ => c,
        })
        .collect()
}

/// Strip one trailing parenthetical qualifier: `"Name (as Region)"` -> `"Name"`.
pub fn strip_trailing_parenthetical(s: &str) -> String {
    TRAILING_PARENTHETICAL.replace(s, "").trim().to_string()
}

/// Decompose and drop combining marks: `"Thul-Kâr"` -> `"Thul-Kar"`.
pub fn strip_diacritics(s: &str) -> String {
    s.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

/// Canonical comparison key for a raw name.
pub fn norm_key(raw: &str) -> String {
    let s = straighten_quotes(raw.trim());
    let s = strip_trailing_parenthetical(&s);
    let s = WHITESPACE.replace_all(&s, " ");
    s.trim().to_lowercase()
}

/// Diacritic-folded key used when names from different categories are
/// compared against each other (the cross-category drift check).
pub fn base_name(raw: &str) -> String {
    norm_key(&strip_diacritics(raw))
}

/// First whitespace-delimited token of a key.
pub fn first_token(key: &str) -> &str {
    key.split(' ').next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_norm_key_straightens_and_folds() {
        assert_eq!(norm_key("Kael\u{2019}s  Oath"), "kael's oath");
        assert_eq!(norm_key("  The   Sunken Marches "), "the sunken marches");
    }

    #[test]
    fn test_norm_key_strips_one_parenthetical() {
        assert_eq!(norm_key("Ashmere (as Region)"), "ashmere");
        assert_eq!(norm_key("Ashmere (old) (new)"), "ashmere (old)");
    }

    #[test]
    fn test_norm_key_empty_input() {
        assert_eq!(norm_key(""), "");
        assert_eq!(norm_key("   "), "");
    }

    #[test]
    fn test_strip_diacritics() {
        assert_eq!(strip_diacritics("Thul-K\u{e2}r"), "Thul-Kar");
        assert_eq!(strip_diacritics("V\u{e9}lgrim"), "Velgrim");
    }

    #[test]
    fn test_base_name_folds_diacritics() {
        assert_eq!(base_name("V\u{e9}lgrim (the relic)"), "velgrim");
    }

    #[test]
    fn test_first_token() {
        assert_eq!(first_token("kael the nameless"), "kael");
        assert_eq!(first_token(""), "");
    }
}
