//! Closed reference enumerations and fixed lookup tables
//!
//! Regions, industries, employee-count buckets and size categories are closed
//! sets maintained outside the tool; the enums here enforce that nothing in
//! the pipeline ever produces free-text category values. The keyword catalog
//! and region tables are loaded once as static data and never mutated.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Sales region, keyed off domain suffixes and country mentions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
    #[serde(rename = "BeNeLux")]
    BeNeLux,
    #[serde(rename = "DACH")]
    Dach,
    #[serde(rename = "ES")]
    Es,
    #[serde(rename = "FR")]
    Fr,
    #[serde(rename = "UKI")]
    Uki,
    #[serde(rename = "EU")]
    Eu,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::BeNeLux => "BeNeLux",
            Region::Dach => "DACH",
            Region::Es => "ES",
            Region::Fr => "FR",
            Region::Uki => "UKI",
            Region::Eu => "EU",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BeNeLux" => Ok(Region::BeNeLux),
            "DACH" => Ok(Region::Dach),
            "ES" => Ok(Region::Es),
            "FR" => Ok(Region::Fr),
            "UKI" => Ok(Region::Uki),
            "EU" => Ok(Region::Eu),
            other => Err(format!("unknown region: {}", other)),
        }
    }
}

/// Domain suffix -> region, checked before any text evidence.
/// Order matters: first match wins.
pub const SUFFIX_REGIONS: &[(&str, Region)] = &[
    (".nl", Region::BeNeLux),
    (".be", Region::BeNeLux),
    (".lu", Region::BeNeLux),
    (".de", Region::Dach),
    (".at", Region::Dach),
    (".ch", Region::Dach),
    (".es", Region::Es),
    (".fr", Region::Fr),
    (".uk", Region::Uki),
    (".ie", Region::Uki),
    (".pl", Region::Eu),
];

/// Country names and synonyms -> region, matched against page text.
pub const COUNTRY_REGIONS: &[(&str, Region)] = &[
    ("netherlands", Region::BeNeLux),
    ("nederland", Region::BeNeLux),
    ("holland", Region::BeNeLux),
    ("belgium", Region::BeNeLux),
    ("belgië", Region::BeNeLux),
    ("belgique", Region::BeNeLux),
    ("luxembourg", Region::BeNeLux),
    ("germany", Region::Dach),
    ("deutschland", Region::Dach),
    ("german", Region::Dach),
    ("austria", Region::Dach),
    ("österreich", Region::Dach),
    ("switzerland", Region::Dach),
    ("schweiz", Region::Dach),
    ("suisse", Region::Dach),
    ("spain", Region::Es),
    ("españa", Region::Es),
    ("spanish", Region::Es),
    ("france", Region::Fr),
    ("français", Region::Fr),
    ("french", Region::Fr),
    ("united kingdom", Region::Uki),
    ("uk", Region::Uki),
    ("britain", Region::Uki),
    ("england", Region::Uki),
    ("ireland", Region::Uki),
    ("irish", Region::Uki),
];

/// Industry catalog. Closed set; anything that scores below threshold
/// stays `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Industry {
    #[serde(rename = "Business Services")]
    BusinessServices,
    #[serde(rename = "Financial Services (excl. Fintech)")]
    FinancialServices,
    #[serde(rename = "Healthcare, Pharmaceuticals, & Biotech")]
    Healthcare,
    #[serde(rename = "Manufacturing (incl. Food & Drink)")]
    Manufacturing,
    #[serde(rename = "Real Estate and Construction")]
    RealEstateConstruction,
    #[serde(rename = "Retail (incl. Restaurants)")]
    Retail,
    #[serde(rename = "Software & Internet (incl. Video Games)")]
    SoftwareInternet,
    #[serde(rename = "Transportation and Storage")]
    TransportationStorage,
    #[serde(rename = "Aerospace & Defense")]
    AerospaceDefense,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Industry {
    pub fn as_str(&self) -> &'static str {
        match self {
            Industry::BusinessServices => "Business Services",
            Industry::FinancialServices => "Financial Services (excl. Fintech)",
            Industry::Healthcare => "Healthcare, Pharmaceuticals, & Biotech",
            Industry::Manufacturing => "Manufacturing (incl. Food & Drink)",
            Industry::RealEstateConstruction => "Real Estate and Construction",
            Industry::Retail => "Retail (incl. Restaurants)",
            Industry::SoftwareInternet => "Software & Internet (incl. Video Games)",
            Industry::TransportationStorage => "Transportation and Storage",
            Industry::AerospaceDefense => "Aerospace & Defense",
            Industry::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Industry::Unknown)
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Industry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Business Services" => Ok(Industry::BusinessServices),
            "Financial Services (excl. Fintech)" => Ok(Industry::FinancialServices),
            "Healthcare, Pharmaceuticals, & Biotech" => Ok(Industry::Healthcare),
            "Manufacturing (incl. Food & Drink)" => Ok(Industry::Manufacturing),
            "Real Estate and Construction" => Ok(Industry::RealEstateConstruction),
            "Retail (incl. Restaurants)" => Ok(Industry::Retail),
            "Software & Internet (incl. Video Games)" => Ok(Industry::SoftwareInternet),
            "Transportation and Storage" => Ok(Industry::TransportationStorage),
            "Aerospace & Defense" => Ok(Industry::AerospaceDefense),
            "Unknown" => Ok(Industry::Unknown),
            other => Err(format!("unknown industry: {}", other)),
        }
    }
}

/// Keyword catalog per industry. Whole-word matches of these terms drive
/// classification; weighting across text sources happens in the extractor.
pub const INDUSTRY_KEYWORDS: &[(Industry, &[&str])] = &[
    (
        Industry::BusinessServices,
        &[
            "consulting", "consultancy", "advisory", "management consulting",
            "strategy consulting", "operations consulting", "outsourcing",
            "business process", "professional services", "corporate services",
            "audit", "auditing", "accounting", "bookkeeping", "tax services",
            "legal services", "law firm", "compliance", "risk management",
            "human resources", "hr services", "recruitment", "staffing",
            "headhunting", "talent acquisition", "marketing agency",
            "advertising agency", "pr agency", "public relations",
            "communications", "branding agency", "design agency",
            "creative agency",
        ],
    ),
    (
        Industry::FinancialServices,
        &[
            "bank", "banking", "commercial bank", "investment bank",
            "private bank", "asset management", "wealth management",
            "portfolio management", "fund management", "insurance company",
            "life insurance", "property insurance", "pension fund",
            "investment fund", "mutual fund", "hedge fund", "private equity",
            "venture capital", "credit union", "mortgage lender",
            "financial advisor", "brokerage", "securities", "trading firm",
            "capital markets",
        ],
    ),
    (
        Industry::Healthcare,
        &[
            "hospital", "clinic", "medical center", "healthcare provider",
            "medical practice", "pharmaceutical company", "pharma",
            "drug development", "medicine", "biotech", "biotechnology",
            "life sciences", "medical device", "diagnostic", "laboratory",
            "clinical research", "medical research", "therapy", "treatment",
            "patient care", "dental practice", "veterinary", "veterinarian",
            "vet clinic", "animal hospital", "animal care", "pet care",
            "animal health", "companion animal", "livestock", "dierenarts",
            "dierenkliniek", "dierenziekenhuis", "diergeneeskunde",
            "veterinair", "wellness center", "fitness center", "nutrition",
        ],
    ),
    (
        Industry::Manufacturing,
        &[
            "manufacturing", "factory", "production facility", "industrial",
            "machinery", "equipment manufacturer", "automotive", "aerospace",
            "chemical", "steel", "metal", "textile", "plastic", "electronics",
            "semiconductor", "food production", "beverage", "brewery",
            "distillery", "food manufacturer", "packaging", "supply chain",
            "logistics",
        ],
    ),
    (
        Industry::RealEstateConstruction,
        &[
            "real estate", "property development", "construction company",
            "building", "architecture", "engineering",
            "residential development", "commercial development",
            "industrial development", "infrastructure", "contractor",
            "renovation", "design build", "planning", "surveying",
            "facilities management", "property management",
        ],
    ),
    (
        Industry::Retail,
        &[
            "retail store", "shop", "shopping", "e-commerce", "ecommerce",
            "marketplace", "fashion retailer", "clothing store", "apparel",
            "beauty store", "cosmetics", "jewelry store", "furniture store",
            "home goods", "garden center", "electronics store",
            "consumer goods", "restaurant", "cafe", "bar", "hospitality",
            "hotel", "travel agency", "tourism", "entertainment venue",
            "online store", "webshop", "online shopping", "discount store",
            "chain store", "fashion", "clothing", "textile", "garment",
            "wear", "outfit", "style", "kids clothing", "children wear",
            "family fashion", "affordable fashion", "budget clothing",
            "value retail", "discount retail", "fashion chain", "boutique",
            "department store", "supermarket", "grocery", "convenience store",
            "drugstore", "pharmacy retail", "bookstore", "sporting goods",
            "toy store", "pet store", "hardware store", "home improvement",
            "outlet", "mall", "shopping center", "retail chain",
            "store chain", "retail network",
        ],
    ),
    (
        Industry::SoftwareInternet,
        &[
            "software company", "software development", "tech company",
            "technology company", "it company", "information technology",
            "digital agency", "web development", "app development",
            "platform", "saas company", "cloud services", "data analytics",
            "artificial intelligence", "machine learning", "cybersecurity",
            "security software", "blockchain", "cryptocurrency",
            "gaming company", "video game", "game development", "mobile app",
            "startup", "innovation lab",
        ],
    ),
    (
        Industry::TransportationStorage,
        &[
            "transportation company", "transport", "logistics company",
            "shipping company", "delivery service", "freight", "cargo",
            "warehouse", "storage facility", "distribution center",
            "trucking company", "airline", "maritime", "rail",
            "fleet management", "mobility",
        ],
    ),
    (
        Industry::AerospaceDefense,
        &[
            "aerospace", "aviation industry", "flight", "aircraft",
            "airplane", "aviation professionals", "aviation services",
            "aerospace engineering", "flight operations",
            "aviation technology", "air transport", "aviation safety",
            "flight training", "pilot", "aviation consulting",
            "aerospace systems", "aircraft maintenance",
            "aviation management",
        ],
    ),
];

/// Employee-count bucket. Boundary values belong to the lower bucket
/// (9 -> `1-9`, 10 -> `10-20`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EmployeeRange {
    #[serde(rename = "1-9")]
    From1To9,
    #[serde(rename = "10-20")]
    From10To20,
    #[serde(rename = "21-50")]
    From21To50,
    #[serde(rename = "51-100")]
    From51To100,
    #[serde(rename = "101-200")]
    From101To200,
    #[serde(rename = "201-500")]
    From201To500,
    #[serde(rename = "501-1000")]
    From501To1000,
    #[serde(rename = "1001-5000")]
    From1001To5000,
    #[serde(rename = "over 5000")]
    Over5000,
}

impl EmployeeRange {
    /// Bucket a raw headcount.
    pub fn from_count(count: u32) -> Self {
        match count {
            0..=9 => EmployeeRange::From1To9,
            10..=20 => EmployeeRange::From10To20,
            21..=50 => EmployeeRange::From21To50,
            51..=100 => EmployeeRange::From51To100,
            101..=200 => EmployeeRange::From101To200,
            201..=500 => EmployeeRange::From201To500,
            501..=1000 => EmployeeRange::From501To1000,
            1001..=5000 => EmployeeRange::From1001To5000,
            _ => EmployeeRange::Over5000,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeRange::From1To9 => "1-9",
            EmployeeRange::From10To20 => "10-20",
            EmployeeRange::From21To50 => "21-50",
            EmployeeRange::From51To100 => "51-100",
            EmployeeRange::From101To200 => "101-200",
            EmployeeRange::From201To500 => "201-500",
            EmployeeRange::From501To1000 => "501-1000",
            EmployeeRange::From1001To5000 => "1001-5000",
            EmployeeRange::Over5000 => "over 5000",
        }
    }
}

impl fmt::Display for EmployeeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EmployeeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1-9" => Ok(EmployeeRange::From1To9),
            "10-20" => Ok(EmployeeRange::From10To20),
            "21-50" => Ok(EmployeeRange::From21To50),
            "51-100" => Ok(EmployeeRange::From51To100),
            "101-200" => Ok(EmployeeRange::From101To200),
            "201-500" => Ok(EmployeeRange::From201To500),
            "501-1000" => Ok(EmployeeRange::From501To1000),
            "1001-5000" => Ok(EmployeeRange::From1001To5000),
            "over 5000" => Ok(EmployeeRange::Over5000),
            other => Err(format!("unknown employee range: {}", other)),
        }
    }
}

/// Company size category, derived from the employee-count bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeCategory {
    #[serde(rename = "Very Small Business")]
    VerySmallBusiness,
    #[serde(rename = "Small Business")]
    SmallBusiness,
    #[serde(rename = "Mid-Market")]
    MidMarket,
    #[serde(rename = "Enterprise")]
    Enterprise,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl SizeCategory {
    pub fn from_range(range: EmployeeRange) -> Self {
        Self::from_range_label(range.as_str())
    }

    /// Map an employee-range label to a size category.
    ///
    /// Accepts externally supplied labels as well; the legacy `10-50` bucket
    /// appears in historical size data even though `EmployeeRange` can never
    /// produce it.
    pub fn from_range_label(label: &str) -> Self {
        match label {
            "1-9" | "10-20" | "10-50" | "21-50" => SizeCategory::VerySmallBusiness,
            "51-100" | "101-200" => SizeCategory::SmallBusiness,
            "201-500" | "501-1000" => SizeCategory::MidMarket,
            "1001-5000" | "over 5000" => SizeCategory::Enterprise,
            _ => SizeCategory::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeCategory::VerySmallBusiness => "Very Small Business",
            SizeCategory::SmallBusiness => "Small Business",
            SizeCategory::MidMarket => "Mid-Market",
            SizeCategory::Enterprise => "Enterprise",
            SizeCategory::Unknown => "Unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, SizeCategory::Unknown)
    }
}

impl fmt::Display for SizeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SizeCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Very Small Business" => Ok(SizeCategory::VerySmallBusiness),
            "Small Business" => Ok(SizeCategory::SmallBusiness),
            "Mid-Market" => Ok(SizeCategory::MidMarket),
            "Enterprise" => Ok(SizeCategory::Enterprise),
            "Unknown" => Ok(SizeCategory::Unknown),
            other => Err(format!("unknown size category: {}", other)),
        }
    }
}
