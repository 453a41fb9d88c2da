//! Employee-count detection
//!
//! An ordered battery of regex templates pairs a number with nearby
//! headcount vocabulary in English and common source-language phrasings.
//! Every match is collected with a context window, run through the
//! rejection rules (years, founding/date contexts, implausible bounds,
//! customer/satisfaction contexts), and the largest surviving count wins.
//! Accepted and rejected candidates alike leave an audit trail.

use crate::reference::EmployeeRange;
use crate::text::{ceil_char_boundary, clean_artifacts, floor_char_boundary, normalize_numbers};
use regex::Regex;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Calendar-year interval treated as a date rather than a headcount. A real
/// headcount inside this window (e.g. exactly 2000 employees) is knowingly
/// rejected; see the unit test documenting the false negative.
const YEAR_MIN: u32 = 1900;
const YEAR_MAX: u32 = 2030;

/// Plausible headcount bounds.
const COUNT_MIN: u32 = 1;
const COUNT_MAX: u32 = 50_000;

/// Context window captured around each match, in bytes (clamped to char
/// boundaries).
const CONTEXT_WINDOW: usize = 50;

/// Pattern battery, in priority order. Matching happens on lowercased,
/// artifact-cleaned, number-normalized text, so every template sees plain
/// contiguous digit runs. Group 1 is always the candidate count.
const EMPLOYEE_PATTERNS: &[&str] = &[
    // Direct forms: number followed by a role word
    r"(\d+)\s*\+?\s*employees?",
    r"(\d+)\s*people",
    r"(\d+)\s*colleagues?",
    r"(\d+)\s*members?",
    r"(\d+)\s*professionals?",
    r"(\d+)\s*specialists?",
    r"(\d+)\s*engineers?",
    r"(\d+)\s*developers?",
    r"(\d+)\s*consultants?",
    r"(\d+)\s*experts?",
    r"(\d+)\s*technicians?",
    r"(\d+)\s*staff",
    r"(\d+)\s*workers?",
    // Sentence forms, including what machine translation tends to produce
    r"we\s+(?:are|have|employ)\s+(\d+)\s+(?:employees?|people|colleagues?|professionals?|staff|workers?)",
    r"our\s+(?:team|company|organization)\s+(?:of|has|consists\s+of|includes)\s+(\d+)",
    r"employs?\s+(?:over|about|approximately|around)?\s*(\d+)\s+(?:people|employees?|colleagues?|professionals?|staff|workers?)",
    r"workforce\s+of\s+(?:over|about|approximately|around)?\s*(\d+)",
    r"has\s+(?:over|about|approximately|around)?\s*(\d+)\s+(?:employees?|people|colleagues?|professionals?|staff|workers?|members?)",
    r"consists?\s+of\s+(?:over|about|approximately|around)?\s*(\d+)\s+(?:employees?|people|colleagues?|staff|workers?)",
    r"comprises?\s+(?:of\s+)?(?:over|about|approximately|around)?\s*(\d+)\s+(?:employees?|people|colleagues?|staff|workers?)",
    r"counts?\s+(\d+)\s+(?:employees?|people|colleagues?|staff|workers?)",
    // Descriptive words between the number and the role word
    r"(\d+)\s+(?:\w+\s+){1,5}?employees?",
    r"(\d+)\s+(?:\w+\s+){1,5}?colleagues?",
    r"(\d+)\s+(?:\w+\s+){1,5}?professionals?",
    r"(\d+)\s+(?:\w+\s+){1,5}?specialists?",
    r"(\d+)\s+(?:\w+\s+){1,5}?people",
    r"(\d+)\s+(?:\w+\s+){1,5}?members?",
    r"(\d+)\s+(?:\w+\s+){1,5}?staff",
    r"(\d+)\s+(?:\w+\s+){1,5}?workers?",
    // Team-of / staff-of forms
    r"team\s+of\s+(\d+)",
    r"staff\s+of\s+(\d+)",
    r"company\s+of\s+(\d+)",
    r"organization\s+of\s+(\d+)",
    r"employing\s+(\d+)\s+(?:people|employees?|colleagues?|professionals?|staff)",
    // Over / more-than / approximation forms
    r"over\s+(\d+)\s+(?:employees?|people|colleagues?|professionals?|staff)",
    r"more\s+than\s+(\d+)\s+(?:employees?|people|colleagues?|professionals?|staff)",
    r"(?:about|around|approximately|nearly|roughly|almost)\s+(\d+)\s+(?:employees?|people|colleagues?|professionals?|staff|workers?)",
    // Range forms: the lower bound is the candidate
    r"(\d+)[-–]\d+\s+(?:employees?|people|colleagues?|professionals?|staff)",
    r"between\s+(\d+)\s+and\s+\d+\s+(?:employees?|people|colleagues?|professionals?|staff)",
    // German and Dutch source-language forms
    r"(\d+)\s+(?:mitarbeiter|medewerkers?|werknemers?|personeel|arbeitnehmer)",
    r"mit\s+(?:über|etwa|rund)?\s*(\d+)\s+(?:mitarbeitern?|mitarbeiterinnen?)",
    r"(?:über|etwa|rund)\s+(\d+)\s+(?:mitarbeiter|medewerkers?|werknemers?)",
    r"zo['\u{2019}]n\s+(\d+)\s+(?:enthousiaste\s+)?collega['\u{2019}]s?",
    r"(?:ongeveer|circa)\s+(\d+)\s+(?:enthousiaste\s+)?collega['\u{2019}]s?",
    r"(\d+)\s+enthousiaste\s+collega['\u{2019}]s?",
    r"(?:met|van)\s+(\d+)\s+(?:\w+\s+){0,3}?collega['\u{2019}]s?",
    // Polish source-language forms
    r"(?:ponad|około)\s*(\d+)\s*(?:pracowników|pracownikach)",
    r"(\d+)\s*(?:pracowników|pracownikach)",
    r"zatrudnia\s*(\d+)\s*(?:pracowników|osób|ludzi)",
    r"zespół\s*(\d+)\s*(?:pracowników|osób)",
    // "N strong" forms
    r"(?:we\s+are|company\s+is|team\s+is)\s+(\d+)\s+strong",
    r"(\d+)[-\s]strong\s+(?:team|company|organization)",
    // Long-gap forms for text scattered across markup
    r"(\d+)(?:\s+\w+){1,20}?\s+employees?",
    r"(\d+)(?:\s+\w+){1,20}?\s+colleagues?",
    r"(\d+)(?:\s+\w+){1,20}?\s+professionals?",
    // Aviation phrasing seen on aerospace company pages
    r"(\d+)\s+(?:aviation|aerospace|flight)\s+professionals?",
    r"(\d+)\s+professionals?\s+(?:in\s+)?(?:aviation|aerospace|flight)",
];

/// Vocabulary that marks a number as a customer/audience figure rather than
/// a headcount. Entries are regex fragments (optional plural groups).
const CUSTOMER_KEYWORDS: &[&str] = &[
    "satisfied",
    "happy",
    "pleased",
    "customers?",
    "consumers?",
    "clients?",
    "visitors?",
    "users?",
    "subscribers?",
    "members?",
    "followers?",
    "survey",
    "reviews?",
    "ratings?",
    "feedback",
    "testimonials?",
    "shoppers?",
    "buyers?",
    "purchasers?",
    "guests?",
    "attendees?",
];

fn compiled_patterns() -> &'static Vec<Regex> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        EMPLOYEE_PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("employee pattern must compile"))
            .collect()
    })
}

/// A raw pattern match before rejection filtering.
#[derive(Debug, Clone)]
struct Candidate {
    count: u32,
    pattern: &'static str,
    matched: String,
    context: String,
}

/// Outcome of employee-count detection, audit trail included.
#[derive(Debug, Clone, Default)]
pub struct EmployeeDetection {
    pub count: Option<u32>,
    pub range: Option<EmployeeRange>,
    /// Ordered, human-readable trail covering the accepted candidate and
    /// every rejection. Non-empty whenever any pattern matched.
    pub reasoning: Vec<String>,
}

impl EmployeeDetection {
    pub fn found(&self) -> bool {
        self.count.is_some()
    }
}

/// Run the pattern battery over raw page (or translated) text.
pub fn extract_employee_count(text: &str) -> EmployeeDetection {
    if text.trim().is_empty() {
        return EmployeeDetection::default();
    }

    let normalized = normalize_numbers(&clean_artifacts(&text.to_lowercase()));

    let mut candidates: Vec<Candidate> = Vec::new();
    for (pattern_src, regex) in EMPLOYEE_PATTERNS.iter().zip(compiled_patterns().iter()) {
        for caps in regex.captures_iter(&normalized) {
            let Some(group) = caps.get(1) else { continue };
            let Ok(count) = group.as_str().parse::<u32>() else {
                continue;
            };

            let whole = caps.get(0).expect("match 0 always present");
            let start = floor_char_boundary(&normalized, whole.start().saturating_sub(CONTEXT_WINDOW));
            let end = ceil_char_boundary(
                &normalized,
                (whole.end() + CONTEXT_WINDOW).min(normalized.len()),
            );

            candidates.push(Candidate {
                count,
                pattern: *pattern_src,
                matched: whole.as_str().to_string(),
                context: normalized[start..end].trim().to_string(),
            });
        }
    }

    if candidates.is_empty() {
        debug!("No employee count patterns matched");
        return EmployeeDetection::default();
    }

    let mut reasoning = Vec::new();
    let mut valid: Vec<Candidate> = Vec::new();

    for candidate in candidates {
        match reject_reason(&candidate) {
            Some(reason) => {
                debug!(
                    "Rejected potential employee count {} - {}. Context: '{}'",
                    candidate.count,
                    reason,
                    truncate_chars(&candidate.context, 100)
                );
                reasoning.push(format!(
                    "Rejected candidate {} ({}); context: '{}'",
                    candidate.count,
                    reason,
                    truncate_chars(&candidate.context, 100)
                ));
            }
            None => valid.push(candidate),
        }
    }

    if valid.is_empty() {
        return EmployeeDetection {
            count: None,
            range: None,
            reasoning,
        };
    }

    // Larger values are empirically more often genuine headcounts than
    // noise; stable sort keeps pattern order as the tie-break.
    let total = valid.len();
    valid.sort_by(|a, b| b.count.cmp(&a.count));
    let best = &valid[0];
    let range = EmployeeRange::from_count(best.count);

    let mut accepted = vec![
        format!(
            "Employee count {} detected from pattern: {}",
            best.count, best.pattern
        ),
        format!("Matched text: '{}'", best.matched),
        format!("Context: '{}'", truncate_chars(&best.context, 150)),
    ];
    if total > 1 {
        accepted.push(format!(
            "Note: {} total matches found, selected highest count",
            total
        ));
    }

    info!(
        "Employee count detected: {} (category: {})",
        best.count, range
    );

    accepted.extend(reasoning);

    EmployeeDetection {
        count: Some(best.count),
        range: Some(range),
        reasoning: accepted,
    }
}

/// Apply the rejection rules; `Some(reason)` kills the candidate.
fn reject_reason(candidate: &Candidate) -> Option<&'static str> {
    let count = candidate.count;

    if (YEAR_MIN..=YEAR_MAX).contains(&count) {
        return Some("likely a year");
    }

    let date_context =
        Regex::new(&format!(
            r"(?i)\b(?:since|established|founded|year|copyright|©)\b.*?{}",
            count
        ))
        .expect("date context pattern must compile");
    if date_context.is_match(&candidate.context) {
        return Some("year/date context");
    }

    if !(COUNT_MIN..=COUNT_MAX).contains(&count) {
        return Some("outside reasonable range");
    }

    for keyword in CUSTOMER_KEYWORDS {
        let present = Regex::new(&format!(r"(?i)\b{}\b", keyword))
            .expect("customer keyword pattern must compile");
        if !present.is_match(&candidate.context) {
            continue;
        }
        // The keyword must sit within a few words of the number; a stray
        // mention elsewhere in the window is not enough.
        let after = Regex::new(&format!(r"(?i){}\s+(?:\w+\s+){{0,3}}{}", count, keyword))
            .expect("proximity pattern must compile");
        let before = Regex::new(&format!(r"(?i){}(?:\s+\w+){{0,3}}\s+{}", keyword, count))
            .expect("proximity pattern must compile");
        if after.is_match(&candidate.context) || before.is_match(&candidate.context) {
            return Some("customer/satisfaction context");
        }
    }

    None
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
