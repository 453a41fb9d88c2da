//! Domain resolution ordering and fallback behavior.

mod common;

use common::StubProbe;
use prospectfinder::resolver::DomainResolver;

#[tokio::test]
async fn test_english_variant_probes_in_fixed_order() {
    let probe = StubProbe::new(&["https://www.acme.de/en"]);
    let resolver = DomainResolver::new(&probe);

    let found = resolver.find_english_variant("acme.de").await;
    assert_eq!(found.as_deref(), Some("https://www.acme.de/en"));

    // everything before the hit was probed, in order, nothing after
    let probed = probe.probed_urls();
    assert_eq!(
        probed,
        vec![
            "https://acme.de/en",
            "https://acme.de/en/",
            "https://acme.de/english",
            "https://acme.de/english/",
            "https://en.acme.de",
            "https://www.acme.de/en",
        ]
    );
}

#[tokio::test]
async fn test_english_variant_none_when_unreachable() {
    let probe = StubProbe::new(&[]);
    let resolver = DomainResolver::new(&probe);

    assert_eq!(resolver.find_english_variant("acme.de").await, None);
    assert_eq!(probe.probed_urls().len(), 9);
}

#[tokio::test]
async fn test_working_variant_country_to_generic() {
    let probe = StubProbe::new(&["https://www.acme.net"]);
    let resolver = DomainResolver::new(&probe);

    let found = resolver.find_working_variant("acme.de").await;
    assert_eq!(found.as_deref(), Some("www.acme.net"));

    let probed = probe.probed_urls();
    assert_eq!(
        probed,
        vec![
            "https://acme.com",
            "https://www.acme.com",
            "https://acme.net",
            "https://www.acme.net",
        ]
    );
}

#[tokio::test]
async fn test_working_variant_generic_to_country() {
    let probe = StubProbe::new(&["https://acme.nl"]);
    let resolver = DomainResolver::new(&probe);

    let found = resolver.find_working_variant("acme.com").await;
    assert_eq!(found.as_deref(), Some("acme.nl"));

    // .it, .de, .fr, .es precede .nl; each with a www variant
    assert_eq!(probe.probed_urls().len(), 9);
}

#[tokio::test]
async fn test_working_variant_none_for_unknown_suffix() {
    let probe = StubProbe::new(&["https://acme.com"]);
    let resolver = DomainResolver::new(&probe);

    // .dev is neither a country-specific nor a generic suffix we rotate
    assert_eq!(resolver.find_working_variant("acme.dev").await, None);
    assert!(probe.probed_urls().is_empty());
}
