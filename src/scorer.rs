//! Prospect scoring
//!
//! Maps a firmographic profile and the historical pattern model to a
//! 0-100 score, a grade/priority tier, an estimated deal value and a
//! per-dimension factor breakdown. The point budget is fixed: industry 35,
//! region 25, size 25, data quality 15.

use crate::deals::{Dimension, HistoricalPatternModel};
use crate::profile::FirmographicProfile;
use crate::reference::SizeCategory;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

const INDUSTRY_WIN_RATE_POINTS: f64 = 30.0;
const INDUSTRY_PROVEN_BONUS: f64 = 5.0;
const INDUSTRY_PROVEN_DEALS: u32 = 3;
const INDUSTRY_FALLBACK_POINTS: f64 = 20.0;
const REGION_WIN_RATE_POINTS: f64 = 25.0;
const REGION_FALLBACK_POINTS: f64 = 15.0;
const SIZE_WIN_RATE_POINTS: f64 = 25.0;
const SIZE_FALLBACK_SCORE: f64 = 10.0;
const QUALITY_POINTS_EACH: f64 = 5.0;

/// Four-tier rating grade with fixed score thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Grade::A
        } else if score >= 60.0 {
            Grade::B
        } else if score >= 40.0 {
            Grade::C
        } else {
            Grade::D
        }
    }

    pub fn priority(&self) -> &'static str {
        match self {
            Grade::A => "High",
            Grade::B => "Medium",
            Grade::C => "Low",
            Grade::D => "Very Low",
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            Grade::A => {
                "Immediate outreach recommended. High probability of success based on historical patterns."
            }
            Grade::B => "Good prospect. Include in regular outreach campaigns.",
            Grade::C => {
                "Lower priority. Consider for bulk campaigns or when higher-rated prospects are exhausted."
            }
            Grade::D => {
                "Very low priority. May not be worth pursuing unless specific circumstances change."
            }
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
        };
        write!(f, "{}", letter)
    }
}

/// One dimension's contribution to the score.
#[derive(Debug, Clone, Serialize)]
pub struct FactorDetail {
    pub value: String,
    pub score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub win_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deal_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Data-quality contribution: a point per independently satisfied signal.
#[derive(Debug, Clone, Serialize)]
pub struct DataQualityDetail {
    pub score: f64,
    pub factors: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RatingFactors {
    pub industry: FactorDetail,
    pub region: FactorDetail,
    pub size: FactorDetail,
    pub data_quality: DataQualityDetail,
}

/// One scoring run's verdict for one profile. Computed fresh each run and
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    pub company_name: String,
    pub domain: String,
    pub score: f64,
    pub grade: Grade,
    pub priority: &'static str,
    pub potential_value: f64,
    pub factors: RatingFactors,
    pub recommendation: &'static str,
    pub rated_at: DateTime<Utc>,
}

/// Legacy headcount-range -> size table used only as the scoring fallback
/// when a profile carries a range but no size category. Deliberately not
/// the same table the extractor uses (1001-5000 lands in Mid-Market here);
/// both tables predate this tool and are preserved as-is.
fn legacy_size_for_range(range_label: &str) -> SizeCategory {
    match range_label {
        "1-9" | "10-20" | "10-50" => SizeCategory::VerySmallBusiness,
        "51-100" | "101-200" => SizeCategory::SmallBusiness,
        "201-500" | "501-1000" | "1001-5000" => SizeCategory::MidMarket,
        "over 5000" => SizeCategory::Enterprise,
        _ => SizeCategory::Unknown,
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Deterministic scorer over a read-only pattern model.
pub struct ProspectScorer<'a> {
    model: &'a HistoricalPatternModel,
}

impl<'a> ProspectScorer<'a> {
    pub fn new(model: &'a HistoricalPatternModel) -> Self {
        Self { model }
    }

    /// Score one profile against the model.
    pub fn rate(&self, profile: &FirmographicProfile) -> Rating {
        let industry_name = profile.industry.to_string();
        let region_name = profile.region.to_string();

        // 1. Industry (max 35)
        let industry_factor = match self.model.win_rate(Dimension::Industry, &industry_name) {
            Some(win_rate) => {
                let deal_count = self
                    .model
                    .deal_count(Dimension::Industry, &industry_name)
                    .unwrap_or(0);
                let mut score = win_rate * INDUSTRY_WIN_RATE_POINTS;
                if deal_count > INDUSTRY_PROVEN_DEALS {
                    // proven market
                    score += INDUSTRY_PROVEN_BONUS;
                }
                FactorDetail {
                    value: industry_name.clone(),
                    score: round1(score),
                    win_rate: Some(round1(win_rate * 100.0)),
                    deal_count: Some(deal_count),
                    note: None,
                }
            }
            None => FactorDetail {
                value: industry_name.clone(),
                score: round1(self.model.overall_win_rate() * INDUSTRY_FALLBACK_POINTS),
                win_rate: Some(round1(self.model.overall_win_rate() * 100.0)),
                deal_count: None,
                note: Some("New industry - using overall average with penalty".to_string()),
            },
        };

        // 2. Region (max 25)
        let region_factor = match self.model.win_rate(Dimension::Region, &region_name) {
            Some(win_rate) => FactorDetail {
                value: region_name.clone(),
                score: round1(win_rate * REGION_WIN_RATE_POINTS),
                win_rate: Some(round1(win_rate * 100.0)),
                deal_count: None,
                note: None,
            },
            None => FactorDetail {
                value: region_name.clone(),
                score: round1(self.model.overall_win_rate() * REGION_FALLBACK_POINTS),
                win_rate: None,
                deal_count: None,
                note: Some("Unknown region - using overall average with penalty".to_string()),
            },
        };

        // 3. Size (max 25)
        let size_category = self.resolve_size(profile);
        let size_name = size_category.to_string();
        let size_factor = match self.model.win_rate(Dimension::Size, &size_name) {
            Some(win_rate) => FactorDetail {
                value: size_name.clone(),
                score: round1(win_rate * SIZE_WIN_RATE_POINTS),
                win_rate: Some(round1(win_rate * 100.0)),
                deal_count: None,
                note: None,
            },
            None => FactorDetail {
                value: size_name.clone(),
                score: SIZE_FALLBACK_SCORE,
                win_rate: None,
                deal_count: None,
                note: Some("Unknown size - using default score".to_string()),
            },
        };

        // 4. Data quality (max 15)
        let mut quality_score = 0.0;
        let mut quality_factors = Vec::new();
        if profile.status.is_success() {
            quality_score += QUALITY_POINTS_EACH;
            quality_factors.push("Successful scrape".to_string());
        }
        if profile.has_employee_data() {
            quality_score += QUALITY_POINTS_EACH;
            quality_factors.push("Employee data available".to_string());
        }
        if profile.industry.is_known() {
            quality_score += QUALITY_POINTS_EACH;
            quality_factors.push("Industry identified".to_string());
        }

        // The four maxima sum to exactly 100, so earned points are the score.
        let total = industry_factor.score + region_factor.score + size_factor.score + quality_score;
        let score = round1(total);
        let grade = Grade::from_score(score);

        let potential_value = self.potential_value(&industry_name, &size_name);

        Rating {
            company_name: profile.company_name.clone(),
            domain: profile.domain.clone(),
            score,
            grade,
            priority: grade.priority(),
            potential_value,
            factors: RatingFactors {
                industry: industry_factor,
                region: region_factor,
                size: size_factor,
                data_quality: DataQualityDetail {
                    score: quality_score,
                    factors: quality_factors,
                },
            },
            recommendation: grade.recommendation(),
            rated_at: Utc::now(),
        }
    }

    /// Score a batch, sorted by score descending (stable on ties).
    pub fn rate_batch(&self, profiles: &[FirmographicProfile]) -> Vec<Rating> {
        let mut ratings: Vec<Rating> = profiles.iter().map(|p| self.rate(p)).collect();
        ratings.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ratings
    }

    fn resolve_size(&self, profile: &FirmographicProfile) -> SizeCategory {
        if profile.size_category != SizeCategory::Unknown {
            return profile.size_category;
        }
        match profile.employee_range {
            Some(range) => legacy_size_for_range(range.as_str()),
            None => SizeCategory::Unknown,
        }
    }

    /// Industry average amount (overall fallback) scaled by how this size
    /// class's deals compare to the overall average.
    fn potential_value(&self, industry_name: &str, size_name: &str) -> f64 {
        let overall_avg = self.model.overall_avg_amount();

        let base = self
            .model
            .avg_amount(Dimension::Industry, industry_name)
            .or(overall_avg)
            .unwrap_or(0.0);

        let multiplier = match (self.model.avg_amount(Dimension::Size, size_name), overall_avg) {
            (Some(size_avg), Some(overall)) if overall != 0.0 => size_avg / overall,
            _ => 1.0,
        };

        (base * multiplier).round()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deals::HistoricalPatternModel;
    use crate::profile::FetchStatus;
    use crate::reference::{EmployeeRange, Industry, Region};

    const HEADER: &str =
        "Industry;Region;Company Headcount Size;Company Headcount Range;Amount;Stage";

    fn model_from(rows: &[&str]) -> HistoricalPatternModel {
        let content = format!("{}\n{}", HEADER, rows.join("\n"));
        HistoricalPatternModel::from_reader(content.as_bytes()).unwrap()
    }

    fn profile() -> FirmographicProfile {
        FirmographicProfile {
            company_name: "Acme".to_string(),
            domain: "acme.de".to_string(),
            url: "https://acme.de".to_string(),
            status: FetchStatus::Http(200),
            error: None,
            detected_language: Some("deu".to_string()),
            translated: true,
            employee_count: Some(150),
            employee_range: Some(EmployeeRange::From101To200),
            region: Region::Dach,
            industry: Industry::SoftwareInternet,
            size_category: SizeCategory::SmallBusiness,
            reasoning: Vec::new(),
            scraped_at: Utc::now(),
        }
    }

    #[test]
    fn test_grade_thresholds() {
        assert_eq!(Grade::from_score(80.0), Grade::A);
        assert_eq!(Grade::from_score(79.9), Grade::B);
        assert_eq!(Grade::from_score(60.0), Grade::B);
        assert_eq!(Grade::from_score(59.9), Grade::C);
        assert_eq!(Grade::from_score(40.0), Grade::C);
        assert_eq!(Grade::from_score(39.9), Grade::D);
    }

    #[test]
    fn test_priority_mirrors_grade() {
        assert_eq!(Grade::A.priority(), "High");
        assert_eq!(Grade::B.priority(), "Medium");
        assert_eq!(Grade::C.priority(), "Low");
        assert_eq!(Grade::D.priority(), "Very Low");
    }

    #[test]
    fn test_end_to_end_scoring_breakdown() {
        // Software: 2 deals, 1 won amount 1000, 1 lost amount 2000
        let model = model_from(&[
            "Software & Internet (incl. Video Games);UKI;Enterprise;over 5000;1000;Closed Won",
            "Software & Internet (incl. Video Games);UKI;Enterprise;over 5000;2000;Closed Lost",
        ]);

        let scorer = ProspectScorer::new(&model);
        let rating = scorer.rate(&profile());

        // industry: 0.5 * 30 = 15, no bonus (deal_count 2 <= 3)
        assert_eq!(rating.factors.industry.score, 15.0);
        assert_eq!(rating.factors.industry.deal_count, Some(2));
        // region DACH unseen: overall 0.5 * 15 = 7.5
        assert_eq!(rating.factors.region.score, 7.5);
        assert!(rating.factors.region.note.is_some());
        // size Small Business unseen: flat 10
        assert_eq!(rating.factors.size.score, 10.0);
        // quality: all three signals
        assert_eq!(rating.factors.data_quality.score, 15.0);
        assert_eq!(rating.factors.data_quality.factors.len(), 3);
        // final: 15 + 7.5 + 10 + 15 = 47.5 -> C / Low
        assert_eq!(rating.score, 47.5);
        assert_eq!(rating.grade, Grade::C);
        assert_eq!(rating.priority, "Low");
    }

    #[test]
    fn test_proven_market_bonus() {
        let model = model_from(&[
            "Software & Internet (incl. Video Games);DACH;Enterprise;over 5000;1000;Closed Won",
            "Software & Internet (incl. Video Games);DACH;Enterprise;over 5000;1000;Closed Won",
            "Software & Internet (incl. Video Games);DACH;Enterprise;over 5000;1000;Closed Won",
            "Software & Internet (incl. Video Games);DACH;Enterprise;over 5000;1000;Closed Won",
        ]);

        let scorer = ProspectScorer::new(&model);
        let rating = scorer.rate(&profile());
        // 1.0 * 30 + 5 bonus for more than three deals
        assert_eq!(rating.factors.industry.score, 35.0);
    }

    #[test]
    fn test_potential_value_uses_size_multiplier() {
        // overall avg = (1000 + 3000) / 2 = 2000
        // industry avg (Software) = 1000, size avg (Small Business) = 3000
        // potential = 1000 * (3000 / 2000) = 1500
        let model = model_from(&[
            "Software & Internet (incl. Video Games);DACH;Enterprise;over 5000;1000;Closed Won",
            "Retail (incl. Restaurants);FR;Small Business;51-100;3000;Closed Lost",
        ]);

        let scorer = ProspectScorer::new(&model);
        let rating = scorer.rate(&profile());
        assert_eq!(rating.potential_value, 1500.0);
    }

    #[test]
    fn test_unseen_industry_uses_overall_fallback() {
        let model = model_from(&[
            "Retail (incl. Restaurants);FR;Small Business;51-100;3000;Closed Won",
            "Retail (incl. Restaurants);FR;Small Business;51-100;1000;Closed Lost",
        ]);

        let scorer = ProspectScorer::new(&model);
        let rating = scorer.rate(&profile());
        // overall 0.5 * 20 = 10 with penalty note
        assert_eq!(rating.factors.industry.score, 10.0);
        assert!(rating
            .factors
            .industry
            .note
            .as_deref()
            .unwrap()
            .contains("New industry"));
    }

    #[test]
    fn test_size_fallback_through_legacy_table() {
        // profile with Unknown size but a 1001-5000 range resolves to
        // Mid-Market via the legacy table, not Enterprise
        let model = model_from(&[
            "Retail (incl. Restaurants);FR;Mid-Market;51-100;3000;Closed Won",
        ]);

        let mut p = profile();
        p.size_category = SizeCategory::Unknown;
        p.employee_range = Some(EmployeeRange::From1001To5000);

        let scorer = ProspectScorer::new(&model);
        let rating = scorer.rate(&p);
        assert_eq!(rating.factors.size.value, "Mid-Market");
        assert_eq!(rating.factors.size.score, 25.0);
    }

    #[test]
    fn test_data_quality_degrades_for_error_profile() {
        let model = model_from(&[
            "Retail (incl. Restaurants);FR;Small Business;51-100;3000;Closed Won",
        ]);
        let error = FirmographicProfile::error_profile("X", "x.com", "https://x.com", "timeout");
        let scorer = ProspectScorer::new(&model);
        let rating = scorer.rate(&error);
        assert_eq!(rating.factors.data_quality.score, 0.0);
        assert!(rating.factors.data_quality.factors.is_empty());
    }

    #[test]
    fn test_batch_sorted_descending_and_stable() {
        let model = model_from(&[
            "Software & Internet (incl. Video Games);DACH;Enterprise;over 5000;1000;Closed Won",
            "Retail (incl. Restaurants);FR;Small Business;51-100;3000;Closed Lost",
        ]);

        let strong = profile();
        let mut weak = profile();
        weak.company_name = "Weak".to_string();
        weak.industry = Industry::Unknown;
        weak.status = FetchStatus::Error;

        let mut tied_first = profile();
        tied_first.company_name = "First".to_string();
        let mut tied_second = profile();
        tied_second.company_name = "Second".to_string();

        let scorer = ProspectScorer::new(&model);
        let ratings = scorer.rate_batch(&[weak.clone(), strong.clone(), tied_first, tied_second]);

        assert!(ratings.first().unwrap().score >= ratings.last().unwrap().score);
        assert_eq!(ratings.last().unwrap().company_name, "Weak");

        // stable: equal-score profiles keep input order
        let first_pos = ratings.iter().position(|r| r.company_name == "First").unwrap();
        let second_pos = ratings.iter().position(|r| r.company_name == "Second").unwrap();
        assert!(first_pos < second_pos);
    }
}
