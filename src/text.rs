//! Locale-aware text normalization
//!
//! Page text arrives with European number formatting ("3.000", "10 000",
//! "1'000'000") and concatenation artifacts from markup-to-text conversion.
//! Both are repaired here so the extraction patterns only ever see plain
//! contiguous digit runs.

use regex::Regex;
use std::sync::OnceLock;

fn grouped_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Digit groups after the first chunk must be exactly three digits, so
    // unrelated adjacent numbers ("12, 2024") are never merged.
    RE.get_or_init(|| Regex::new(r"\b\d{1,3}(?:[,\s'.]\d{3})*\b").expect("valid regex"))
}

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,\s'.]+").expect("valid regex"))
}

fn ellipsis_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\.{2,}").expect("valid regex"))
}

fn glued_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-zA-Z]+)(\d+)([a-zA-Z]+)").expect("valid regex"))
}

/// Collapse formatted digit groups into contiguous integers.
///
/// `12,000` / `10 000` / `1'000'000` / `3.000` all become plain digit runs.
/// Idempotent: already-normalized text passes through unchanged.
pub fn normalize_numbers(text: &str) -> String {
    grouped_number_re()
        .replace_all(text, |caps: &regex::Captures<'_>| {
            separator_re().replace_all(&caps[0], "").into_owned()
        })
        .into_owned()
}

/// Known glued phrases produced by markup-to-text conversion on pages we
/// have seen in the wild. Checked before the generic letter/digit split.
const GLUED_PHRASES: &[(&str, &str)] = &[
    ("wysocyponad", "wysocy ponad"),
    ("sklepówlojalni", "sklepów lojalni"),
    ("klientówodwiedza", "klientów odwiedza"),
    ("pracownikówprofil", "pracowników profil"),
];

/// Repair concatenation artifacts left by HTML-to-text conversion.
///
/// Ellipsis runs become spaces, known glued phrases are split, and a space
/// is inserted between a letter run and a digit run only when letters appear
/// on both sides of the complete number (a number itself is never split).
pub fn clean_artifacts(text: &str) -> String {
    let mut cleaned = ellipsis_re().replace_all(text, " ").into_owned();

    for (glued, fixed) in GLUED_PHRASES {
        if cleaned.contains(glued) {
            cleaned = cleaned.replace(glued, fixed);
        }
    }

    cleaned = glued_number_re()
        .replace_all(&cleaned, "$1 $2 $3")
        .into_owned();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Clamp a byte offset to the nearest character boundary at or below it.
pub(crate) fn floor_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Clamp a byte offset to the nearest character boundary at or above it.
pub(crate) fn ceil_char_boundary(text: &str, mut index: usize) -> usize {
    if index >= text.len() {
        return text.len();
    }
    while !text.is_char_boundary(index) {
        index += 1;
    }
    index
}
