//! Profile CSV export/read round trip.

use chrono::Utc;
use prospectfinder::export::export_profiles_csv;
use prospectfinder::profile::{read_profiles_csv, FetchStatus, FirmographicProfile};
use prospectfinder::reference::{EmployeeRange, Industry, Region, SizeCategory};
use std::path::PathBuf;

fn temp_csv(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("prospectfinder_{}_{}.csv", name, std::process::id()))
}

fn sample_profiles() -> Vec<FirmographicProfile> {
    vec![
        FirmographicProfile {
            company_name: "Acme GmbH".to_string(),
            domain: "acme.de".to_string(),
            url: "https://acme.de/en".to_string(),
            status: FetchStatus::Http(200),
            error: None,
            detected_language: Some("deu".to_string()),
            translated: true,
            employee_count: Some(150),
            employee_range: Some(EmployeeRange::From101To200),
            region: Region::Dach,
            industry: Industry::Manufacturing,
            size_category: SizeCategory::SmallBusiness,
            reasoning: vec![
                "Employee: Employee count 150 detected".to_string(),
                "Region: Domain extension .de indicates DACH".to_string(),
            ],
            scraped_at: Utc::now(),
        },
        FirmographicProfile::error_profile(
            "Ghost BV",
            "ghost.nl",
            "https://ghost.nl",
            "request timed out",
        ),
    ]
}

#[test]
fn test_profiles_survive_csv_round_trip() {
    let path = temp_csv("roundtrip");
    let profiles = sample_profiles();

    export_profiles_csv(&profiles, &path).unwrap();
    let restored = read_profiles_csv(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(restored.len(), 2);

    let acme = &restored[0];
    assert_eq!(acme.company_name, "Acme GmbH");
    assert_eq!(acme.status, FetchStatus::Http(200));
    assert_eq!(acme.detected_language.as_deref(), Some("deu"));
    assert!(acme.translated);
    assert_eq!(acme.employee_count, Some(150));
    assert_eq!(acme.employee_range, Some(EmployeeRange::From101To200));
    assert_eq!(acme.region, Region::Dach);
    assert_eq!(acme.industry, Industry::Manufacturing);
    assert_eq!(acme.size_category, SizeCategory::SmallBusiness);
    assert_eq!(acme.reasoning.len(), 2);

    let ghost = &restored[1];
    assert_eq!(ghost.status, FetchStatus::Error);
    assert_eq!(ghost.error.as_deref(), Some("request timed out"));
    assert_eq!(ghost.region, Region::Eu);
    assert_eq!(ghost.industry, Industry::Unknown);
}

#[test]
fn test_reader_degrades_unknown_category_cells() {
    let path = temp_csv("degrade");
    let content = "\
company_name,domain,url,status,detected_language,translated,employee_count,employee_count_range,region,industry,size_category,reasoning,scraped_at,error
Acme,acme.de,https://acme.de,200,,false,,,Atlantis,Chocolate Teapots,Gigantic,,2025-08-01T10:00:00Z,
";
    std::fs::write(&path, content).unwrap();

    let restored = read_profiles_csv(&path).unwrap();
    std::fs::remove_file(&path).ok();

    assert_eq!(restored.len(), 1);
    // unknown cells fall back to the closed-set defaults instead of failing
    assert_eq!(restored[0].region, Region::Eu);
    assert_eq!(restored[0].industry, Industry::Unknown);
    assert_eq!(restored[0].size_category, SizeCategory::Unknown);
}
