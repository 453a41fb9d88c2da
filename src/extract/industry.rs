//! Industry classification
//!
//! Deterministic keyword scoring over three weighted text sources:
//! translated content (weight 4), the company name (weight 3) and the
//! original page text (weight 1). Whole-word occurrences accumulate
//! weighted score per industry; distinct matched keywords are tracked
//! separately so a runner-up with broader evidence can overtake a winner
//! whose score rests on one repeated term.

use crate::reference::{Industry, INDUSTRY_KEYWORDS};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tracing::{debug, info};

/// Runner-up takeover threshold: within 80% of the winner's score and with
/// strictly more distinct keywords.
const RUNNER_UP_RATIO: f64 = 0.8;

/// Minimum accepted score; below this the industry stays Unknown.
const MIN_SCORE: u32 = 1;

fn keyword_regexes() -> &'static Vec<(Industry, Vec<(&'static str, Regex)>)> {
    static REGEXES: OnceLock<Vec<(Industry, Vec<(&'static str, Regex)>)>> = OnceLock::new();
    REGEXES.get_or_init(|| {
        INDUSTRY_KEYWORDS
            .iter()
            .map(|(industry, keywords)| {
                let compiled = keywords
                    .iter()
                    .map(|kw| {
                        let pattern = format!(r"(?i)\b{}\b", regex::escape(kw));
                        (*kw, Regex::new(&pattern).expect("keyword pattern must compile"))
                    })
                    .collect();
                (*industry, compiled)
            })
            .collect()
    })
}

/// Outcome of industry classification with its audit trail.
#[derive(Debug, Clone)]
pub struct IndustryDetection {
    pub industry: Industry,
    pub reasoning: Vec<String>,
}

struct IndustryScore {
    industry: Industry,
    score: u32,
    keywords: BTreeSet<&'static str>,
}

/// Classify the company's industry from its name and page text.
pub fn extract_industry(
    company_name: &str,
    page_text: &str,
    translated_content: Option<&str>,
) -> IndustryDetection {
    let mut sources: Vec<(&str, u32)> = Vec::new();
    if let Some(translated) = translated_content {
        sources.push((translated, 4));
    }
    sources.push((company_name, 3));
    sources.push((page_text, 1));

    let mut scores: Vec<IndustryScore> = Vec::new();

    for (industry, keywords) in keyword_regexes() {
        let mut score = 0u32;
        let mut matched: BTreeSet<&'static str> = BTreeSet::new();

        for (text, weight) in &sources {
            for (keyword, regex) in keywords {
                let occurrences = regex.find_iter(text).count() as u32;
                if occurrences > 0 {
                    score += occurrences * weight;
                    matched.insert(keyword);
                }
            }
        }

        if score > 0 {
            scores.push(IndustryScore {
                industry: *industry,
                score,
                keywords: matched,
            });
        }
    }

    if scores.is_empty() {
        debug!("Industry defaulted to Unknown");
        return IndustryDetection {
            industry: Industry::Unknown,
            reasoning: vec!["No clear industry indicators found".to_string()],
        };
    }

    scores.sort_by(|a, b| b.score.cmp(&a.score));
    let mut best = &scores[0];

    if scores.len() > 1 {
        let second = &scores[1];
        let close = second.score as f64 / best.score as f64 > RUNNER_UP_RATIO;
        if close && second.keywords.len() > best.keywords.len() {
            best = second;
        }
    }

    if best.score >= MIN_SCORE {
        let sample: Vec<&str> = best.keywords.iter().take(5).copied().collect();
        info!("Industry detected: {} (score: {})", best.industry, best.score);
        IndustryDetection {
            industry: best.industry,
            reasoning: vec![
                format!("Keywords matched: {}", sample.join(", ")),
                format!("Confidence score: {:.1}", best.score as f64),
            ],
        }
    } else {
        debug!("Industry defaulted to Unknown");
        IndustryDetection {
            industry: Industry::Unknown,
            reasoning: vec!["No clear industry indicators found".to_string()],
        }
    }
}
