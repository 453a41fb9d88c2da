//! Configuration management for prospectfinder
//!
//! All configuration is loaded from `./config/prospectfinder.toml`.
//! No hardcoded defaults exist in source code - all defaults are in the
//! config template.

use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file path relative to working directory
pub const CONFIG_PATH: &str = "./config/prospectfinder.toml";

/// Default configuration file content - this is the ONLY place defaults exist
pub const DEFAULT_CONFIG: &str = include_str!("../config/prospectfinder.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found at {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] io::Error),

    #[error("Failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid URL in '{field}': {url}")]
    InvalidUrl { field: String, url: String },

    #[error("Configuration field '{field}' cannot be empty")]
    EmptyRequired { field: String },
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub translation: TranslationConfig,
    pub scrape: ScrapeConfig,
    pub output: OutputConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub probe_timeout_secs: u64,
}

/// Translation service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

/// Scrape batch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScrapeConfig {
    pub parallel_companies: usize,
    pub about_page_limit: usize,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
}

impl AppConfig {
    /// Load configuration from the default path
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path(Path::new(CONFIG_PATH))
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.user_agent.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "http.user_agent".to_string(),
            });
        }
        if self.http.request_timeout_secs == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "http.request_timeout_secs".to_string(),
            });
        }
        if self.http.probe_timeout_secs == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "http.probe_timeout_secs".to_string(),
            });
        }

        if self.translation.enabled {
            if self.translation.endpoint.is_empty() {
                return Err(ConfigError::EmptyRequired {
                    field: "translation.endpoint".to_string(),
                });
            }
            if !self.translation.endpoint.starts_with("http://")
                && !self.translation.endpoint.starts_with("https://")
            {
                return Err(ConfigError::InvalidUrl {
                    field: "translation.endpoint".to_string(),
                    url: self.translation.endpoint.clone(),
                });
            }
            if self.translation.max_retries == 0 {
                return Err(ConfigError::EmptyRequired {
                    field: "translation.max_retries".to_string(),
                });
            }
        }

        if self.scrape.parallel_companies == 0 {
            return Err(ConfigError::EmptyRequired {
                field: "scrape.parallel_companies".to_string(),
            });
        }

        if self.output.dir.is_empty() {
            return Err(ConfigError::EmptyRequired {
                field: "output.dir".to_string(),
            });
        }

        Ok(())
    }

    /// Create default configuration file at the standard location
    pub fn create_default_config() -> Result<PathBuf, ConfigError> {
        let path = Path::new(CONFIG_PATH);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = fs::File::create(path)?;
        file.write_all(DEFAULT_CONFIG.as_bytes())?;

        Ok(path.to_path_buf())
    }

    /// Check if stdin is a TTY (interactive terminal)
    pub fn is_interactive() -> bool {
        atty::is(atty::Stream::Stdin)
    }

    /// Prompt user to create default config (only in interactive mode)
    pub fn prompt_create_config() -> Result<Option<PathBuf>, ConfigError> {
        if !Self::is_interactive() {
            return Ok(None);
        }

        print!("Configuration file not found. Create default config? [Y/n] ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim().to_lowercase();

        if input.is_empty() || input == "y" || input == "yes" {
            let path = Self::create_default_config()?;
            Ok(Some(path))
        } else {
            Ok(None)
        }
    }
}
