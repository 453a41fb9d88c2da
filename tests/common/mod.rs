#![allow(dead_code)]

use async_trait::async_trait;
use prospectfinder::resolver::UrlProbe;
use std::sync::Mutex;

/// Scripted probe: reachable URLs are fixed up front and every probe is
/// recorded, so candidate ordering can be asserted without a network.
pub struct StubProbe {
    reachable: Vec<String>,
    pub probed: Mutex<Vec<String>>,
}

impl StubProbe {
    pub fn new(reachable: &[&str]) -> Self {
        Self {
            reachable: reachable.iter().map(|s| s.to_string()).collect(),
            probed: Mutex::new(Vec::new()),
        }
    }

    pub fn probed_urls(&self) -> Vec<String> {
        self.probed.lock().unwrap().clone()
    }
}

#[async_trait]
impl UrlProbe for StubProbe {
    async fn is_reachable(&self, url: &str) -> bool {
        self.probed.lock().unwrap().push(url.to_string());
        self.reachable.iter().any(|r| r == url)
    }
}

pub const LEDGER_HEADER: &str =
    "Industry;Region;Company Headcount Size;Company Headcount Range;Amount;Stage";

/// Assemble a semicolon-delimited ledger from rows.
pub fn ledger(rows: &[&str]) -> String {
    format!("{}\n{}", LEDGER_HEADER, rows.join("\n"))
}
