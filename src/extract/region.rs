//! Region detection
//!
//! Strict priority order: domain suffix, then country mentions in the page
//! text, then the EU default. The first rule that fires wins outright; a
//! `.de` domain stays DACH even when the page talks about France.

use crate::reference::{Region, COUNTRY_REGIONS, SUFFIX_REGIONS};
use tracing::{debug, info};

/// Outcome of region detection with its audit trail.
#[derive(Debug, Clone)]
pub struct RegionDetection {
    pub region: Region,
    pub reasoning: Vec<String>,
}

/// Detect the sales region for a domain and its page text.
pub fn extract_region(domain: &str, page_text: &str) -> RegionDetection {
    let domain = domain.to_lowercase();

    for (suffix, region) in SUFFIX_REGIONS {
        if domain.ends_with(suffix) {
            info!("Region detected from domain: {} (extension: {})", region, suffix);
            return RegionDetection {
                region: *region,
                reasoning: vec![format!("Domain extension {} indicates {}", suffix, region)],
            };
        }
    }

    let text = page_text.to_lowercase();
    for (country, region) in COUNTRY_REGIONS {
        if text.contains(country) {
            info!("Region detected from text: {} (country: {})", region, country);
            return RegionDetection {
                region: *region,
                reasoning: vec![format!("Country mention: {}", country)],
            };
        }
    }

    debug!("Region defaulted to EU");
    RegionDetection {
        region: Region::Eu,
        reasoning: vec!["No specific region detected, defaulting to EU".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_suffix_wins() {
        let detection = extract_region("acme.de", "our offices in France and Spain");
        assert_eq!(detection.region, Region::Dach);
        assert!(detection.reasoning[0].contains(".de"));
    }

    #[test]
    fn test_suffix_table() {
        assert_eq!(extract_region("a.nl", "").region, Region::BeNeLux);
        assert_eq!(extract_region("a.be", "").region, Region::BeNeLux);
        assert_eq!(extract_region("a.at", "").region, Region::Dach);
        assert_eq!(extract_region("a.es", "").region, Region::Es);
        assert_eq!(extract_region("a.fr", "").region, Region::Fr);
        assert_eq!(extract_region("a.co.uk", "").region, Region::Uki);
        assert_eq!(extract_region("a.ie", "").region, Region::Uki);
        assert_eq!(extract_region("a.pl", "").region, Region::Eu);
    }

    #[test]
    fn test_country_mention_fallback() {
        let detection = extract_region("acme.com", "Our headquarters in the Netherlands");
        assert_eq!(detection.region, Region::BeNeLux);
        assert!(detection.reasoning[0].contains("netherlands"));
    }

    #[test]
    fn test_default_is_eu() {
        let detection = extract_region("acme.com", "a global company");
        assert_eq!(detection.region, Region::Eu);
        assert!(detection.reasoning[0].contains("defaulting to EU"));
    }
}
