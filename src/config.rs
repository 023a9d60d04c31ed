use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::types::ViewportSize;
use crate::webdriver::BrowserType;

const SHORT_TIMEOUT_ENV: &str = "PAGEKIT_SHORT_TIMEOUT_MS";
const LONG_TIMEOUT_ENV: &str = "PAGEKIT_LONG_TIMEOUT_MS";
const POLL_INTERVAL_ENV: &str = "PAGEKIT_POLL_INTERVAL_MS";
const PAUSE_ENV: &str = "PAGEKIT_PAUSE_MS";

/// Timeout class of an explicit wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeoutClass {
    /// Used where "gone" should be reached quickly (invisibility waits)
    Short,
    /// Used for everything that has to appear
    Long,
}

/// Durations used by waits and pauses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Timeouts {
    pub short: Duration,
    pub long: Duration,
    /// Delay between two evaluations of a wait condition
    pub poll_interval: Duration,
    /// Fixed settle delay used by custom dropdowns, window closing and highlighting
    pub pause: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            short: Duration::from_secs(5),
            long: Duration::from_secs(30),
            poll_interval: Duration::from_millis(500),
            pause: Duration::from_secs(1),
        }
    }
}

impl Timeouts {
    /// Defaults overridden by `PAGEKIT_*_MS` environment variables
    pub fn from_env() -> Result<Self> {
        let mut timeouts = Self::default();
        if let Some(ms) = read_millis(SHORT_TIMEOUT_ENV)? {
            timeouts.short = ms;
        }
        if let Some(ms) = read_millis(LONG_TIMEOUT_ENV)? {
            timeouts.long = ms;
        }
        if let Some(ms) = read_millis(POLL_INTERVAL_ENV)? {
            timeouts.poll_interval = ms;
        }
        if let Some(ms) = read_millis(PAUSE_ENV)? {
            timeouts.pause = ms;
        }
        Ok(timeouts)
    }

    pub fn get(&self, class: TimeoutClass) -> Duration {
        match class {
            TimeoutClass::Short => self.short,
            TimeoutClass::Long => self.long,
        }
    }
}

fn read_millis(var: &str) -> Result<Option<Duration>> {
    match std::env::var(var) {
        Ok(raw) => {
            let ms = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{} must be a number of milliseconds, got '{}'", var, raw))?;
            Ok(Some(Duration::from_millis(ms)))
        }
        Err(_) => Ok(None),
    }
}

/// How to reach the WebDriver server and which browser to start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub browser: BrowserType,
    /// Overrides the browser's default WebDriver URL
    pub webdriver_url: Option<String>,
    pub headless: bool,
    pub viewport: Option<ViewportSize>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            browser: BrowserType::Firefox,
            webdriver_url: None,
            headless: true,
            viewport: None,
        }
    }
}

impl SessionConfig {
    /// Read `PAGEKIT_BROWSER`, `PAGEKIT_WEBDRIVER_URL`, `PAGEKIT_HEADLESS` and
    /// `PAGEKIT_VIEWPORT` on top of the defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(browser) = std::env::var("PAGEKIT_BROWSER") {
            config.browser = browser.parse()?;
        }
        if let Ok(url) = std::env::var("PAGEKIT_WEBDRIVER_URL") {
            url::Url::parse(&url).with_context(|| format!("Invalid PAGEKIT_WEBDRIVER_URL: {}", url))?;
            config.webdriver_url = Some(url);
        }
        if let Ok(headless) = std::env::var("PAGEKIT_HEADLESS") {
            config.headless = match headless.to_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                other => anyhow::bail!("Invalid PAGEKIT_HEADLESS value: {}", other),
            };
        }
        if let Ok(viewport) = std::env::var("PAGEKIT_VIEWPORT") {
            config.viewport = Some(ViewportSize::parse(&viewport)?);
        }

        Ok(config)
    }

    /// WebDriver URL to connect to
    pub fn webdriver_url(&self) -> String {
        self.webdriver_url
            .clone()
            .unwrap_or_else(|| self.browser.default_webdriver_url().to_string())
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
