//! HTTP fetch boundary
//!
//! The crawl layer proper (robots compliance, per-domain politeness,
//! caching) lives outside this crate; what remains here is the minimal
//! fetch surface the pipeline needs: a page GET with an HTTPS->HTTP
//! fallback for bare domains, and a lightweight HEAD probe used during
//! domain resolution.

use crate::config::HttpConfig;
use anyhow::Result;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Typed fetch failure. `Timeout`, `Dns` and `Http` mirror the failure
/// classes the pipeline distinguishes; everything else is `Transport`.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request to {url} timed out")]
    Timeout { url: String },

    #[error("could not connect to {url}")]
    Dns { url: String },

    #[error("HTTP {status} from {url}")]
    Http { url: String, status: u16 },

    #[error("request to {url} failed: {message}")]
    Transport { url: String, message: String },
}

impl FetchError {
    fn from_reqwest(url: &str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else if err.is_connect() {
            FetchError::Dns {
                url: url.to_string(),
            }
        } else {
            FetchError::Transport {
                url: url.to_string(),
                message: err.to_string(),
            }
        }
    }
}

/// A successfully fetched page.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Reqwest-backed fetcher with a shared client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    probe_timeout: Duration,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self {
            client,
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
        })
    }

    /// Fetch a fully specified URL.
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        Ok(FetchedPage {
            url: final_url,
            status: status.as_u16(),
            body,
        })
    }

    /// Fetch a bare domain's landing page, falling back from HTTPS to HTTP
    /// when the secure endpoint is unreachable.
    pub async fn fetch_home(&self, domain: &str) -> Result<FetchedPage, FetchError> {
        let https_url = format!("https://{}", domain);
        match self.fetch(&https_url).await {
            Ok(page) => Ok(page),
            // A served error status means the host is reachable; no point
            // retrying over plain HTTP.
            Err(err @ FetchError::Http { .. }) => Err(err),
            Err(https_err) => {
                debug!("HTTPS fetch failed for {}: {}", domain, https_err);
                let http_url = format!("http://{}", domain);
                self.fetch(&http_url).await.map_err(|_| https_err)
            }
        }
    }

    /// Lightweight existence probe: HEAD with redirects, success status only.
    pub async fn probe(&self, url: &str) -> bool {
        match self
            .client
            .head(url)
            .timeout(self.probe_timeout)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Probe failed for {}: {}", url, e);
                false
            }
        }
    }
}
