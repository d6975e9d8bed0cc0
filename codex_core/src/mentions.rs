//! Boundary-safe mention scanning.
//!
//! `mentioned` and `appearances_for` are reused by downstream auditing and
//! reporting tools; both are pure and side-effect free.

use once_cell::sync::Lazy;
use regex::Regex;

use lore_model::{SourceDocument, StoryRef};

use crate::normalize::{straighten_quotes, strip_diacritics, strip_trailing_parenthetical};

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid pattern"));

fn fold(s: &str) -> String {
    strip_diacritics(&straighten_quotes(s)).to_lowercase()
}

/// Strict mention test: does `name` occur in `text` bounded by
/// non-alphanumeric characters on both sides?
///
/// Both sides are normalized identically (straight quotes, diacritics
/// folded, case folded) and a trailing parenthetical is stripped from the
/// name, so `"Crown"` matches `"seized the Crown of Ashmere"` but never the
/// `crow` inside `"wind-bitten crown"`... and vice versa.
pub fn mentioned(name: &str, text: &str) -> bool {
    let needle = fold(&strip_trailing_parenthetical(name.trim()));
    let needle = WHITESPACE.replace_all(&needle, " ").into_owned();
    if needle.is_empty() {
        return false;
    }
    let haystack = fold(text);

    let mut start = 0;
    while let Some(offset) = haystack[start..].find(&needle) {
        let begin = start + offset;
        let end = begin + needle.len();
        let bounded_before = haystack[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
        let bounded_after = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());
        if bounded_before && bounded_after {
            return true;
        }
        let step = haystack[begin..]
            .chars()
            .next()
            .map_or(1, char::len_utf8);
        start = begin + step;
    }
    false
}

/// Mention test over a canonical name plus its aliases (characters).
pub fn mentioned_any<'a>(names: impl IntoIterator<Item = &'a str>, text: &str) -> bool {
    names.into_iter().any(|name| mentioned(name, text))
}

/// All documents mentioning `name`, in document order.
///
/// De-duplicates `(date, title)` pairs; idempotent over the same document
/// set. The title participates in the searched text so title-only mentions
/// count.
pub fn appearances_for(name: &str, documents: &[SourceDocument]) -> Vec<StoryRef> {
    appearances_for_names(std::iter::once(name), documents)
}

/// `appearances_for` over a canonical name plus aliases.
pub fn appearances_for_names<'a>(
    names: impl IntoIterator<Item = &'a str> + Clone,
    documents: &[SourceDocument],
) -> Vec<StoryRef> {
    let mut out: Vec<StoryRef> = Vec::new();
    for doc in documents {
        if doc.title.trim().is_empty() {
            continue;
        }
        let blob = format!("{}\n{}", doc.title, doc.text);
        if mentioned_any(names.clone(), &blob) {
            let entry = StoryRef::new(doc.date.trim(), doc.title.trim());
            if !out.contains(&entry) {
                out.push(entry);
            }
        }
    }
    out
}
