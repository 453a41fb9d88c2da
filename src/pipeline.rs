//! Per-company scrape pipeline
//!
//! Resolve -> fetch -> normalize -> extract -> enrich -> profile. A single
//! company's failure yields an explicit error profile and never aborts the
//! batch; companies run concurrently behind a semaphore while each
//! company's own resolution probing stays sequential and ordered.

use crate::companies::CompanyEntry;
use crate::config::AppConfig;
use crate::content::{ContentNormalizer, HttpTranslator, Translator, WhatlangDetector};
use crate::extract::{extract_employee_count, extract_industry, extract_region};
use crate::fetch::{FetchedPage, HttpFetcher};
use crate::page::{parse_html, PageContent};
use crate::profile::{FetchStatus, FirmographicProfile};
use crate::reference::{Industry, SizeCategory};
use crate::resolver::{DomainResolver, HttpProbe};
use anyhow::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tracing::{debug, info, warn};

/// Multilingual link keywords that identify about/company pages.
const ABOUT_KEYWORDS: &[&str] = &[
    "about",
    "about-us",
    "about us",
    "company",
    "über uns",
    "chi siamo",
    "quienes somos",
    "qui sommes-nous",
    "o nas",
    "over ons",
    "om oss",
    "team",
];

pub struct CompanyPipeline {
    fetcher: HttpFetcher,
    probe: HttpProbe,
    normalizer: ContentNormalizer,
    about_page_limit: usize,
}

impl CompanyPipeline {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.http)?;
        let probe = HttpProbe::new(fetcher.clone());

        let translator: Option<Box<dyn Translator>> = if config.translation.enabled {
            Some(Box::new(HttpTranslator::new(&config.translation)?))
        } else {
            None
        };
        let normalizer = ContentNormalizer::new(
            Box::new(WhatlangDetector),
            translator,
            &config.translation,
        );

        Ok(Self {
            fetcher,
            probe,
            normalizer,
            about_page_limit: config.scrape.about_page_limit,
        })
    }

    /// Scrape one company into a profile. Infallible by design: every
    /// failure path produces an explicit error profile.
    pub async fn scrape_company(&self, company: &CompanyEntry) -> FirmographicProfile {
        info!("Processing {} - {}", company.name, company.domain);

        let resolver = DomainResolver::new(&self.probe);

        match self.fetch_company_page(&resolver, &company.domain).await {
            Ok((domain, page)) => self.build_profile(company, &domain, page).await,
            Err((url, error)) => {
                warn!("Request failed for {}: {}", company.name, error);
                FirmographicProfile::error_profile(&company.name, &company.domain, &url, error)
            }
        }
    }

    /// Resolve and fetch the landing page, with one working-variant retry
    /// on total failure. Returns the domain actually used alongside the
    /// page.
    async fn fetch_company_page(
        &self,
        resolver: &DomainResolver<'_>,
        domain: &str,
    ) -> Result<(String, FetchedPage), (String, String)> {
        let first_attempt = self.fetch_via_resolver(resolver, domain).await;
        let first_error = match first_attempt {
            Ok(page) => return Ok((domain.to_string(), page)),
            Err(e) => e,
        };

        // One resolution retry per company, never recursive
        if let Some(variant) = resolver.find_working_variant(domain).await {
            info!("Retrying with domain variation: {}", variant);
            match self.fetch_via_resolver(resolver, &variant).await {
                Ok(page) => return Ok((variant, page)),
                Err(e) => {
                    return Err((format!("https://{}", variant), e));
                }
            }
        }

        Err((format!("https://{}", domain), first_error))
    }

    async fn fetch_via_resolver(
        &self,
        resolver: &DomainResolver<'_>,
        domain: &str,
    ) -> Result<FetchedPage, String> {
        match resolver.find_english_variant(domain).await {
            Some(url) => self.fetcher.fetch(&url).await.map_err(|e| e.to_string()),
            None => self
                .fetcher
                .fetch_home(domain)
                .await
                .map_err(|e| e.to_string()),
        }
    }

    async fn build_profile(
        &self,
        company: &CompanyEntry,
        domain: &str,
        page: FetchedPage,
    ) -> FirmographicProfile {
        let content = parse_html(&page.body);

        let detected_language = self.normalizer.detect_language(&content.text);
        let needs_translation = detected_language
            .as_deref()
            .map(|lang| !ContentNormalizer::is_english(lang))
            .unwrap_or(false);

        let translated_content = if needs_translation {
            let lang = detected_language.as_deref().unwrap_or("auto");
            info!("Translating content from {} to English", lang);
            let key_text = ContentNormalizer::extract_key_content(&content);
            if key_text.trim().chars().count() > 10 {
                let translated = self.normalizer.translate(&key_text, Some(lang)).await;
                if translated.trim().chars().count() >= 10 && translated != key_text {
                    Some(translated)
                } else {
                    None
                }
            } else {
                None
            }
        } else {
            None
        };

        // Employee count: prefer translated content, fall back to the
        // original-language text when it yields nothing.
        let mut employee = match &translated_content {
            Some(translated) => extract_employee_count(translated),
            None => extract_employee_count(&content.text),
        };
        let mut employee_prefix = "";
        if !employee.found() && translated_content.is_some() {
            debug!("No employee count in translated content, trying original text");
            let original = extract_employee_count(&content.text);
            if original.found() {
                employee = original;
                employee_prefix = "From original text: ";
            }
        }

        let region = extract_region(domain, &content.text);
        let industry = extract_industry(
            &company.name,
            &content.text,
            translated_content.as_deref(),
        );

        let size_category = employee
            .range
            .map(SizeCategory::from_range)
            .unwrap_or(SizeCategory::Unknown);

        let mut reasoning = Vec::new();
        if !employee.reasoning.is_empty() {
            reasoning.push(format!(
                "Employee: {}{}",
                employee_prefix,
                employee.reasoning.join("; ")
            ));
        }
        reasoning.extend(region.reasoning.iter().map(|r| format!("Region: {}", r)));
        reasoning.extend(industry.reasoning.iter().map(|r| format!("Industry: {}", r)));

        let mut profile = FirmographicProfile {
            company_name: company.name.clone(),
            domain: domain.to_string(),
            url: page.url.clone(),
            status: FetchStatus::Http(page.status),
            error: None,
            detected_language,
            translated: translated_content.is_some(),
            employee_count: employee.count,
            employee_range: employee.range,
            region: region.region,
            industry: industry.industry,
            size_category,
            reasoning,
            scraped_at: Utc::now(),
        };

        // Consult about pages only when the landing page left gaps; fields
        // are filled in, never overwritten.
        if !profile.has_employee_data() || !profile.industry.is_known() {
            self.enrich_from_about_pages(&mut profile, &content, &page.url)
                .await;
        }

        profile
    }

    async fn enrich_from_about_pages(
        &self,
        profile: &mut FirmographicProfile,
        landing: &PageContent,
        base_url: &str,
    ) {
        let links = find_about_links(landing, base_url);
        for link in links.into_iter().take(self.about_page_limit) {
            debug!("Consulting about page: {}", link);
            let page = match self.fetcher.fetch(&link).await {
                Ok(page) => page,
                Err(e) => {
                    debug!("About page fetch failed for {}: {}", link, e);
                    continue;
                }
            };
            let about = parse_html(&page.body);

            if !profile.has_employee_data() {
                let detection = extract_employee_count(&about.text);
                if detection.found() {
                    profile.employee_count = detection.count;
                    profile.employee_range = detection.range;
                    profile.size_category = detection
                        .range
                        .map(SizeCategory::from_range)
                        .unwrap_or(SizeCategory::Unknown);
                    profile.reasoning.push(format!(
                        "About page employee: {}",
                        detection.reasoning.join("; ")
                    ));
                }
            }

            if !profile.industry.is_known() {
                let detection = extract_industry(&profile.company_name, &about.text, None);
                if detection.industry != Industry::Unknown {
                    profile.industry = detection.industry;
                    profile.reasoning.extend(
                        detection
                            .reasoning
                            .iter()
                            .map(|r| format!("About page industry: {}", r)),
                    );
                }
            }

            if profile.has_employee_data() && profile.industry.is_known() {
                break;
            }
        }
    }
}

/// Same-domain links whose href or text matches an about keyword, resolved
/// against the page URL, deduplicated in first-seen order.
pub fn find_about_links(page: &PageContent, base_url: &str) -> Vec<String> {
    let Ok(base) = reqwest::Url::parse(base_url) else {
        return Vec::new();
    };

    let mut found: Vec<String> = Vec::new();
    for link in &page.links {
        let href = link.href.to_lowercase();
        let text = link.text.to_lowercase();

        let matches = ABOUT_KEYWORDS
            .iter()
            .any(|kw| href.contains(kw) || text.contains(kw));
        if !matches {
            continue;
        }

        let Ok(resolved) = base.join(&link.href) else {
            continue;
        };
        if !is_same_domain(&base, &resolved) {
            continue;
        }

        let url = resolved.to_string();
        if !found.contains(&url) && url != base_url {
            found.push(url);
        }
    }
    found
}

fn is_same_domain(base: &reqwest::Url, target: &reqwest::Url) -> bool {
    let strip = |url: &reqwest::Url| {
        url.host_str()
            .map(|h| h.trim_start_matches("www.").to_lowercase())
            .unwrap_or_default()
    };
    let base_host = strip(base);
    let target_host = strip(target);
    if base_host.is_empty() || target_host.is_empty() {
        return false;
    }
    base_host == target_host
        || base_host.ends_with(&format!(".{}", target_host))
        || target_host.ends_with(&format!(".{}", base_host))
}

/// Scrape a batch of companies with bounded concurrency. Results come back
/// in input order; individual failures surface as error profiles.
pub async fn run_batch(
    pipeline: Arc<CompanyPipeline>,
    companies: Vec<CompanyEntry>,
    parallel: usize,
) -> Vec<FirmographicProfile> {
    let semaphore = Arc::new(Semaphore::new(parallel.max(1)));
    let progress = ProgressBar::new(companies.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let mut handles = Vec::with_capacity(companies.len());
    for (index, company) in companies.into_iter().enumerate() {
        let pipeline = Arc::clone(&pipeline);
        let semaphore = Arc::clone(&semaphore);
        let progress = progress.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire()
                .await
                .expect("semaphore never closed while batch runs");
            progress.set_message(company.name.clone());
            let profile = pipeline.scrape_company(&company).await;
            progress.inc(1);
            (index, profile)
        }));
    }

    let mut results: Vec<(usize, FirmographicProfile)> = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(entry) => results.push(entry),
            Err(e) => warn!("Scrape task panicked: {}", e),
        }
    }
    progress.finish_and_clear();

    results.sort_by_key(|(index, _)| *index);
    results.into_iter().map(|(_, profile)| profile).collect()
}
