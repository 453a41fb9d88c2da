//! Domain resolution
//!
//! Finds a reachable, preferably English, URL for a company domain before
//! any full fetch happens. Probing is sequential and strictly ordered so a
//! resolution attempt is reproducible and its audit trail deterministic;
//! candidate lists are fixed and never raced.

use crate::fetch::HttpFetcher;
use async_trait::async_trait;
use tracing::{debug, info};

/// Existence probe for a candidate URL. The production implementation
/// issues HEAD requests; tests substitute a scripted probe.
#[async_trait]
pub trait UrlProbe: Send + Sync {
    async fn is_reachable(&self, url: &str) -> bool;
}

/// HEAD-probe implementation backed by the shared HTTP client.
pub struct HttpProbe {
    fetcher: HttpFetcher,
}

impl HttpProbe {
    pub fn new(fetcher: HttpFetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl UrlProbe for HttpProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        self.fetcher.probe(url).await
    }
}

/// Generic suffixes tried when a country-specific domain is unreachable.
const GENERIC_TLDS: &[&str] = &[".com", ".net", ".org", ".eu"];

/// Country suffixes tried when a generic domain is unreachable.
const COUNTRY_TLDS: &[&str] = &[".it", ".de", ".fr", ".es", ".nl", ".uk", ".eu"];

/// Country-code suffixes that trigger the generic-TLD fallback.
const COUNTRY_SUFFIXES: &[&str] = &["it", "de", "fr", "es", "nl", "pl", "uk"];

/// Generic suffixes that trigger the country-TLD fallback.
const GENERIC_SUFFIXES: &[&str] = &["com", "net", "org"];

pub struct DomainResolver<'a> {
    probe: &'a dyn UrlProbe,
}

impl<'a> DomainResolver<'a> {
    pub fn new(probe: &'a dyn UrlProbe) -> Self {
        Self { probe }
    }

    /// Candidate URL shapes for an English site variant, in probe order.
    pub fn english_candidates(domain: &str) -> Vec<String> {
        vec![
            format!("https://{}/en", domain),
            format!("https://{}/en/", domain),
            format!("https://{}/english", domain),
            format!("https://{}/english/", domain),
            format!("https://en.{}", domain),
            format!("https://www.{}/en", domain),
            format!("https://www.{}/en/", domain),
            format!("https://www.{}/english", domain),
            format!("https://www.{}/english/", domain),
        ]
    }

    /// Alternate domain candidates for an unreachable domain, in probe order.
    /// Country suffixes swap to generic ones and vice versa; each candidate
    /// is tried bare and with a `www.` prefix.
    pub fn tld_candidates(domain: &str) -> Vec<String> {
        let Some((base, tld)) = domain.rsplit_once('.') else {
            return Vec::new();
        };

        let replacements: &[&str] = if COUNTRY_SUFFIXES.contains(&tld) {
            GENERIC_TLDS
        } else if GENERIC_SUFFIXES.contains(&tld) {
            COUNTRY_TLDS
        } else {
            &[]
        };

        let mut candidates = Vec::new();
        for new_tld in replacements {
            candidates.push(format!("{}{}", base, new_tld));
            candidates.push(format!("www.{}{}", base, new_tld));
        }
        candidates
    }

    /// Probe for an English version of the site. Returns the first
    /// reachable candidate URL, or `None` when none respond.
    pub async fn find_english_variant(&self, domain: &str) -> Option<String> {
        for url in Self::english_candidates(domain) {
            if self.probe.is_reachable(&url).await {
                info!("Found English URL for {}: {}", domain, url);
                return Some(url);
            }
        }
        debug!("No English variant found for {}", domain);
        None
    }

    /// Probe alternate TLD spellings of an unreachable domain. Returns the
    /// first reachable domain (not URL), or `None`. Called at most once per
    /// company; resolution never recurses.
    pub async fn find_working_variant(&self, domain: &str) -> Option<String> {
        for candidate in Self::tld_candidates(domain) {
            let url = format!("https://{}", candidate);
            if self.probe.is_reachable(&url).await {
                info!(
                    "Found working domain variation: {} (original: {})",
                    candidate, domain
                );
                return Some(candidate);
            }
        }
        debug!("No working domain variation found for {}", domain);
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_candidates_order() {
        let candidates = DomainResolver::english_candidates("acme.de");
        assert_eq!(candidates[0], "https://acme.de/en");
        assert_eq!(candidates[4], "https://en.acme.de");
        assert_eq!(candidates[5], "https://www.acme.de/en");
        assert_eq!(candidates.len(), 9);
    }

    #[test]
    fn test_tld_candidates_country_to_generic() {
        let candidates = DomainResolver::tld_candidates("acme.de");
        assert_eq!(candidates[0], "acme.com");
        assert_eq!(candidates[1], "www.acme.com");
        assert_eq!(candidates[6], "acme.eu");
        assert_eq!(candidates.len(), 8);
    }

    #[test]
    fn test_tld_candidates_generic_to_country() {
        let candidates = DomainResolver::tld_candidates("acme.com");
        assert_eq!(candidates[0], "acme.it");
        assert_eq!(candidates.len(), 14);
    }

    #[test]
    fn test_tld_candidates_unknown_suffix() {
        assert!(DomainResolver::tld_candidates("acme.dev").is_empty());
        assert!(DomainResolver::tld_candidates("nodots").is_empty());
    }
}
