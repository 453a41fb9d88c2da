//! Content normalization: language detection and bounded translation
//!
//! Detection and translation are external collaborators behind the
//! `LanguageDetector` and `Translator` traits. The policy around them lives
//! here: short inputs are skipped, translator input is truncated, failures
//! are retried a bounded number of times and then degrade to the original
//! text. Nothing in this module ever fails outward.

use crate::config::TranslationConfig;
use crate::page::PageContent;
use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Minimum stripped length before detection is attempted.
const MIN_DETECT_CHARS: usize = 20;

/// Detector input cap.
const MAX_DETECT_CHARS: usize = 1000;

/// Translator input cap; longer text is truncated with a marker.
const MAX_TRANSLATE_CHARS: usize = 500;

/// Combined key-content cap, bounding downstream translation cost.
const MAX_KEY_CONTENT_CHARS: usize = 5000;

#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("translation service error: {0}")]
    Service(String),

    #[error("translation service returned an empty result")]
    Empty,
}

/// Language detection collaborator.
pub trait LanguageDetector: Send + Sync {
    /// Best-effort language code for the text, or `None`.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Default detector backed by `whatlang`. Returns ISO 639-3 codes.
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        whatlang::detect(text).map(|info| info.lang().code().to_string())
    }
}

/// Translation collaborator.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError>;
}

/// LibreTranslate-compatible HTTP translator.
pub struct HttpTranslator {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(serde::Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl HttpTranslator {
    pub fn new(config: &TranslationConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let body = serde_json::json!({
            "q": text,
            "source": source,
            "target": target,
            "format": "text",
        });

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| TranslationError::Service(e.to_string()))?;

        if !response.status().is_success() {
            return Err(TranslationError::Service(format!(
                "HTTP {} from {}",
                response.status(),
                self.endpoint
            )));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| TranslationError::Service(e.to_string()))?;

        if parsed.translated_text.trim().is_empty() {
            return Err(TranslationError::Empty);
        }

        Ok(parsed.translated_text)
    }
}

fn punctuation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^\w\s]").expect("valid regex"))
}

/// Language detection + translation policy wrapper.
pub struct ContentNormalizer {
    detector: Box<dyn LanguageDetector>,
    translator: Option<Box<dyn Translator>>,
    max_retries: u32,
    retry_delay: Duration,
}

impl ContentNormalizer {
    pub fn new(
        detector: Box<dyn LanguageDetector>,
        translator: Option<Box<dyn Translator>>,
        config: &TranslationConfig,
    ) -> Self {
        Self {
            detector,
            translator,
            max_retries: config.max_retries,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }

    /// Detect the language of page text. Returns `None` for short input and
    /// swallows detector failures.
    pub fn detect_language(&self, text: &str) -> Option<String> {
        if text.trim().chars().count() < MIN_DETECT_CHARS {
            return None;
        }

        let stripped = punctuation_re().replace_all(text, " ");
        let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
        let capped: String = collapsed.chars().take(MAX_DETECT_CHARS).collect();

        self.detector.detect(&capped)
    }

    /// `true` when a detected code means English (639-1 or 639-3).
    pub fn is_english(code: &str) -> bool {
        matches!(code, "en" | "eng")
    }

    /// Translate text to English with the bounded retry-then-degrade policy.
    /// Never fails outward: on exhaustion (or when no translator is
    /// configured) the original text comes back unchanged.
    pub async fn translate(&self, text: &str, source_lang: Option<&str>) -> String {
        if text.trim().chars().count() < 3 {
            return text.to_string();
        }

        let source = match source_lang {
            Some(lang) => lang.to_string(),
            None => self
                .detect_language(text)
                .unwrap_or_else(|| "auto".to_string()),
        };

        if Self::is_english(&source) {
            return text.to_string();
        }

        let Some(translator) = self.translator.as_ref() else {
            debug!("Translation disabled, keeping original text");
            return text.to_string();
        };

        let input = if text.chars().count() > MAX_TRANSLATE_CHARS {
            let truncated: String = text.chars().take(MAX_TRANSLATE_CHARS).collect();
            format!("{}...", truncated)
        } else {
            text.to_string()
        };

        for attempt in 1..=self.max_retries {
            match translator.translate(&input, &source, "en").await {
                Ok(translated) if !translated.trim().is_empty() => {
                    info!("Translated text from {} to en", source);
                    return translated;
                }
                Ok(_) => {
                    warn!("Translation attempt {} returned empty result", attempt);
                    if attempt < self.max_retries {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
                Err(e) => {
                    warn!("Translation attempt {} failed: {}", attempt, e);
                    if attempt < self.max_retries {
                        tokio::time::sleep(self.retry_delay).await;
                    }
                }
            }
        }

        warn!("All translation attempts failed, returning original text");
        text.to_string()
    }

    /// Assemble the bounded candidate text for translation: title, meta
    /// description, the first 10 headings, plus deduplicated text blocks
    /// containing a digit, hard-capped at 5000 characters.
    pub fn extract_key_content(page: &PageContent) -> String {
        let mut parts: Vec<String> = Vec::new();

        if let Some(title) = &page.title {
            parts.push(title.clone());
        }
        if let Some(meta) = &page.meta_description {
            parts.push(meta.clone());
        }

        for heading in page.headings.iter().take(10) {
            if heading.chars().count() > 5 {
                parts.push(heading.clone());
            }
        }

        for block in &page.blocks {
            let len = block.chars().count();
            if len > 10 && len < 1000 && block.chars().any(|c| c.is_ascii_digit()) {
                if !parts.contains(block) {
                    parts.push(block.clone());
                }
            }
        }

        let combined = parts.join(" ");
        if combined.chars().count() > MAX_KEY_CONTENT_CHARS {
            combined.chars().take(MAX_KEY_CONTENT_CHARS).collect()
        } else {
            combined
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::parse_html;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FixedDetector(Option<&'static str>);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Option<String> {
            self.0.map(|s| s.to_string())
        }
    }

    struct CountingTranslator {
        calls: AtomicU32,
        fail_times: u32,
    }

    #[async_trait]
    impl Translator for CountingTranslator {
        async fn translate(
            &self,
            text: &str,
            _source: &str,
            _target: &str,
        ) -> Result<String, TranslationError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.fail_times {
                Err(TranslationError::Service("boom".to_string()))
            } else {
                Ok(format!("translated: {}", text))
            }
        }
    }

    fn test_config() -> TranslationConfig {
        TranslationConfig {
            enabled: true,
            endpoint: "http://localhost:5000/translate".to_string(),
            timeout_secs: 1,
            max_retries: 3,
            retry_delay_ms: 1,
        }
    }

    fn normalizer_with(
        detector: FixedDetector,
        translator: Option<Box<dyn Translator>>,
    ) -> ContentNormalizer {
        ContentNormalizer::new(Box::new(detector), translator, &test_config())
    }

    #[test]
    fn test_detect_rejects_short_text() {
        let n = normalizer_with(FixedDetector(Some("nld")), None);
        assert_eq!(n.detect_language("kort"), None);
    }

    #[test]
    fn test_detect_delegates_for_long_text() {
        let n = normalizer_with(FixedDetector(Some("nld")), None);
        let text = "dit is een behoorlijk lange nederlandse zin over een bedrijf";
        assert_eq!(n.detect_language(text).as_deref(), Some("nld"));
    }

    #[test]
    fn test_detect_swallows_detector_failure() {
        let n = normalizer_with(FixedDetector(None), None);
        let text = "this text is long enough for detection to be attempted";
        assert_eq!(n.detect_language(text), None);
    }

    #[tokio::test]
    async fn test_translate_noop_for_short_text() {
        let n = normalizer_with(FixedDetector(Some("nld")), None);
        assert_eq!(n.translate("ab", Some("nl")).await, "ab");
    }

    #[tokio::test]
    async fn test_translate_noop_for_english_source() {
        let translator = CountingTranslator {
            calls: AtomicU32::new(0),
            fail_times: 0,
        };
        let n = normalizer_with(FixedDetector(Some("eng")), Some(Box::new(translator)));
        let text = "already english text that is long enough";
        assert_eq!(n.translate(text, Some("en")).await, text);
        assert_eq!(n.translate(text, None).await, text);
    }

    #[tokio::test]
    async fn test_translate_retries_then_succeeds() {
        let translator = CountingTranslator {
            calls: AtomicU32::new(0),
            fail_times: 2,
        };
        let n = normalizer_with(FixedDetector(Some("nld")), Some(Box::new(translator)));
        let result = n.translate("wij zijn een bedrijf", Some("nl")).await;
        assert!(result.starts_with("translated:"));
    }

    #[tokio::test]
    async fn test_translate_degrades_after_exhaustion() {
        let translator = CountingTranslator {
            calls: AtomicU32::new(0),
            fail_times: 10,
        };
        let n = normalizer_with(FixedDetector(Some("nld")), Some(Box::new(translator)));
        let original = "wij zijn een bedrijf met veel mensen";
        assert_eq!(n.translate(original, Some("nl")).await, original);
    }

    #[tokio::test]
    async fn test_translate_truncates_long_input() {
        struct EchoTranslator;

        #[async_trait]
        impl Translator for EchoTranslator {
            async fn translate(
                &self,
                text: &str,
                _source: &str,
                _target: &str,
            ) -> Result<String, TranslationError> {
                Ok(text.to_string())
            }
        }

        let n = normalizer_with(FixedDetector(Some("nld")), Some(Box::new(EchoTranslator)));
        let long = "woord ".repeat(200);
        let result = n.translate(&long, Some("nl")).await;
        assert!(result.ends_with("..."));
        assert!(result.chars().count() <= MAX_TRANSLATE_CHARS + 3);
    }

    #[test]
    fn test_extract_key_content_prefers_digit_blocks() {
        let page = parse_html(
            r#"
            <html>
            <head><title>Firma B.V.</title>
            <meta name="description" content="Over ons bedrijf"></head>
            <body>
                <h1>Welkom bij Firma</h1>
                <p>Wij zijn een familiebedrijf.</p>
                <p>Met zo'n 3.000 enthousiaste collega's staan wij klaar.</p>
            </body>
            </html>
        "#,
        );

        let key = ContentNormalizer::extract_key_content(&page);
        assert!(key.contains("Firma B.V."));
        assert!(key.contains("3.000 enthousiaste"));
        // digit-free paragraph is not key content
        assert!(!key.contains("familiebedrijf"));
    }

    #[test]
    fn test_extract_key_content_is_capped() {
        let mut page = PageContent::default();
        for i in 0..200 {
            page.blocks.push(format!("block number {} with plenty of padding text around it", i));
        }
        let key = ContentNormalizer::extract_key_content(&page);
        assert!(key.chars().count() <= MAX_KEY_CONTENT_CHARS);
    }
}
