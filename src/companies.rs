//! Company list input
//!
//! Semicolon-delimited rows of (Name, Domain). Tolerant of a header row,
//! blank lines and `#` comments; rows with a missing name or an invalid
//! domain are skipped rather than failing the file.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

/// One company to scrape.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyEntry {
    pub name: String,
    pub domain: String,
}

/// Parse a companies file, optionally capping the number of entries.
pub fn parse_company_file(path: &Path, max_companies: Option<usize>) -> Result<Vec<CompanyEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read companies file: {}", path.display()))?;

    let mut companies = parse_company_rows(&content)?;

    if let Some(max) = max_companies {
        if companies.len() > max {
            companies.truncate(max);
            info!("Limited to {} companies (max_companies={})", companies.len(), max);
        }
    }

    info!("Loaded {} companies to scrape", companies.len());
    Ok(companies)
}

/// Parse semicolon-delimited `Name;Domain` rows.
pub fn parse_company_rows(content: &str) -> Result<Vec<CompanyEntry>> {
    let mut companies = Vec::new();

    for (i, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.splitn(2, ';');
        let name = parts.next().unwrap_or("").trim();
        let domain = parts.next().unwrap_or("").trim();

        // First line may be a header
        if i == 0 && domain.eq_ignore_ascii_case("domain") {
            continue;
        }

        if name.is_empty() || domain.is_empty() {
            continue;
        }
        if !is_valid_domain(domain) {
            continue;
        }

        companies.push(CompanyEntry {
            name: name.to_string(),
            domain: domain.to_string(),
        });
    }

    Ok(companies)
}

/// Basic domain validation
pub fn is_valid_domain(domain: &str) -> bool {
    if !domain.contains('.') {
        return false;
    }
    if domain.contains("://") || domain.contains('/') {
        return false;
    }
    if domain.starts_with('.')
        || domain.ends_with('.')
        || domain.starts_with('-')
        || domain.ends_with('-')
    {
        return false;
    }
    if domain.contains("..") {
        return false;
    }
    domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_rows() {
        let content = "Acme GmbH;acme.de\nWidget BV;widget.nl";
        let companies = parse_company_rows(content).unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].name, "Acme GmbH");
        assert_eq!(companies[0].domain, "acme.de");
    }

    #[test]
    fn test_parse_skips_header() {
        let content = "Name;Domain\nAcme GmbH;acme.de";
        let companies = parse_company_rows(content).unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].domain, "acme.de");
    }

    #[test]
    fn test_parse_skips_incomplete_and_invalid_rows() {
        let content = "OnlyName\nAcme;acme.de\n;missingname.com\nBad;not_a_domain\n# comment\n";
        let companies = parse_company_rows(content).unwrap();
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].domain, "acme.de");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let content = "  Acme  ;  acme.de  ";
        let companies = parse_company_rows(content).unwrap();
        assert_eq!(companies[0].name, "Acme");
        assert_eq!(companies[0].domain, "acme.de");
    }

    #[test]
    fn test_is_valid_domain() {
        assert!(is_valid_domain("example.com"));
        assert!(is_valid_domain("sub.example.co.uk"));
        assert!(!is_valid_domain("invalid"));
        assert!(!is_valid_domain("http://example.com"));
        assert!(!is_valid_domain("example.com/path"));
        assert!(!is_valid_domain(".example.com"));
        assert!(!is_valid_domain("example..com"));
    }
}
