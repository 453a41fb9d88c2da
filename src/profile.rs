//! Firmographic profile records
//!
//! One `FirmographicProfile` per company per scrape attempt. Profiles are
//! created once and only enriched (never overwritten) when an about page is
//! consulted; the reasoning trail is an append-only log owned by the
//! profile.

use crate::reference::{EmployeeRange, Industry, Region, SizeCategory};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How the fetch for this profile ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum FetchStatus {
    /// HTTP status of the successful response
    Http(u16),
    /// Terminal failure; the detail lives in `FirmographicProfile::error`
    Error,
}

impl FetchStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchStatus::Http(200))
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchStatus::Http(code) => write!(f, "{}", code),
            FetchStatus::Error => write!(f, "error"),
        }
    }
}

impl From<FetchStatus> for String {
    fn from(status: FetchStatus) -> Self {
        status.to_string()
    }
}

impl FromStr for FetchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "error" {
            return Ok(FetchStatus::Error);
        }
        s.parse::<u16>()
            .map(FetchStatus::Http)
            .map_err(|_| format!("unknown fetch status: {}", s))
    }
}

/// Structured firmographic record for one company's web presence.
#[derive(Debug, Clone, Serialize)]
pub struct FirmographicProfile {
    pub company_name: String,
    pub domain: String,
    pub url: String,
    pub status: FetchStatus,
    pub error: Option<String>,
    pub detected_language: Option<String>,
    pub translated: bool,
    pub employee_count: Option<u32>,
    pub employee_range: Option<EmployeeRange>,
    pub region: Region,
    pub industry: Industry,
    pub size_category: SizeCategory,
    /// Append-only, ordered audit trail
    pub reasoning: Vec<String>,
    pub scraped_at: DateTime<Utc>,
}

impl FirmographicProfile {
    /// Terminal error profile: the company could not be scraped, but its
    /// failure must not abort the batch.
    pub fn error_profile(
        company_name: &str,
        domain: &str,
        url: &str,
        error: impl fmt::Display,
    ) -> Self {
        Self {
            company_name: company_name.to_string(),
            domain: domain.to_string(),
            url: url.to_string(),
            status: FetchStatus::Error,
            error: Some(error.to_string()),
            detected_language: None,
            translated: false,
            employee_count: None,
            employee_range: None,
            region: Region::Eu,
            industry: Industry::Unknown,
            size_category: SizeCategory::Unknown,
            reasoning: vec![format!("Error during scraping: {}", error)],
            scraped_at: Utc::now(),
        }
    }

    pub fn has_employee_data(&self) -> bool {
        self.employee_count.is_some() || self.employee_range.is_some()
    }
}

/// CSV column order shared by the writer and the reader.
pub const PROFILE_CSV_HEADERS: &[&str] = &[
    "company_name",
    "domain",
    "url",
    "status",
    "detected_language",
    "translated",
    "employee_count",
    "employee_count_range",
    "region",
    "industry",
    "size_category",
    "reasoning",
    "scraped_at",
    "error",
];

/// Read previously exported profiles back from CSV for a scoring run.
/// Unparseable category cells degrade to their Unknown/default values
/// rather than failing the row.
pub fn read_profiles_csv(path: &Path) -> Result<Vec<FirmographicProfile>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open profiles file: {}", path.display()))?;

    let headers = reader
        .headers()
        .context("Failed to read profile CSV headers")?
        .clone();
    let index = |name: &str| headers.iter().position(|h| h == name);

    let col = |record: &csv::StringRecord, name: &str| -> Option<String> {
        index(name)
            .and_then(|i| record.get(i))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    };

    let mut profiles = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to parse profile CSV record")?;

        let company_name = col(&record, "company_name").unwrap_or_default();
        let domain = col(&record, "domain").unwrap_or_default();
        if company_name.is_empty() && domain.is_empty() {
            continue;
        }

        let status = col(&record, "status")
            .and_then(|s| s.parse().ok())
            .unwrap_or(FetchStatus::Error);

        let scraped_at = col(&record, "scraped_at")
            .and_then(|s| s.parse::<DateTime<Utc>>().ok())
            .unwrap_or_else(Utc::now);

        profiles.push(FirmographicProfile {
            company_name,
            domain,
            url: col(&record, "url").unwrap_or_default(),
            status,
            error: col(&record, "error"),
            detected_language: col(&record, "detected_language"),
            translated: col(&record, "translated")
                .map(|s| s == "true")
                .unwrap_or(false),
            employee_count: col(&record, "employee_count").and_then(|s| s.parse().ok()),
            employee_range: col(&record, "employee_count_range").and_then(|s| s.parse().ok()),
            region: col(&record, "region")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Region::Eu),
            industry: col(&record, "industry")
                .and_then(|s| s.parse().ok())
                .unwrap_or(Industry::Unknown),
            size_category: col(&record, "size_category")
                .and_then(|s| s.parse().ok())
                .unwrap_or(SizeCategory::Unknown),
            reasoning: col(&record, "reasoning")
                .map(|s| s.split("; ").map(|p| p.to_string()).collect())
                .unwrap_or_default(),
            scraped_at,
        });
    }

    Ok(profiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_status_round_trip() {
        assert_eq!("200".parse::<FetchStatus>().unwrap(), FetchStatus::Http(200));
        assert_eq!("error".parse::<FetchStatus>().unwrap(), FetchStatus::Error);
        assert_eq!(FetchStatus::Http(404).to_string(), "404");
        assert_eq!(FetchStatus::Error.to_string(), "error");
    }

    #[test]
    fn test_success_is_exactly_200() {
        assert!(FetchStatus::Http(200).is_success());
        assert!(!FetchStatus::Http(404).is_success());
        assert!(!FetchStatus::Error.is_success());
    }

    #[test]
    fn test_error_profile_defaults() {
        let profile = FirmographicProfile::error_profile(
            "Acme",
            "acme.de",
            "https://acme.de",
            "connection refused",
        );
        assert_eq!(profile.status, FetchStatus::Error);
        assert_eq!(profile.region, Region::Eu);
        assert_eq!(profile.industry, Industry::Unknown);
        assert_eq!(profile.size_category, SizeCategory::Unknown);
        assert!(profile.reasoning[0].contains("connection refused"));
        assert!(!profile.has_employee_data());
    }
}
