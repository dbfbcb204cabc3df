//! Application configuration structures.

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ProfileSelectors;
use crate::error::{AppError, Result};
use crate::render::OutputFormat;

/// Smallest pause allowed between two identifier lookups.
pub const MIN_LOOKUP_DELAY_MS: u64 = 1000;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Profile page fetching settings
    #[serde(default)]
    pub profile: ProfileConfig,

    /// Identifier lookup settings
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Output presentation settings
    #[serde(default)]
    pub render: RenderConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let url = self.profile.url.trim();
        if url.is_empty() {
            return Err(AppError::validation("profile.url is empty"));
        }
        let parsed = url::Url::parse(url)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::validation(format!(
                "profile.url must be http(s), got '{}'",
                parsed.scheme()
            )));
        }
        if self.profile.user_agent.trim().is_empty() {
            return Err(AppError::validation("profile.user_agent is empty"));
        }
        if self.profile.timeout_secs == 0 {
            return Err(AppError::validation("profile.timeout_secs must be > 0"));
        }
        if self.lookup.timeout_secs == 0 {
            return Err(AppError::validation("lookup.timeout_secs must be > 0"));
        }
        if self.lookup.delay_ms < MIN_LOOKUP_DELAY_MS {
            return Err(AppError::validation(format!(
                "lookup.delay_ms must be >= {MIN_LOOKUP_DELAY_MS}"
            )));
        }
        if self.lookup.base_url.trim().is_empty() {
            return Err(AppError::validation("lookup.base_url is empty"));
        }
        Ok(())
    }
}

/// Profile page fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    /// Citation profile URL to scrape
    #[serde(default)]
    pub url: String,

    /// User-Agent header; the profile site rejects unknown clients
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::profile_timeout")]
    pub timeout_secs: u64,

    /// Selectors locating each entry and its fields
    #[serde(default)]
    pub selectors: ProfileSelectors,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::profile_timeout(),
            selectors: ProfileSelectors::default(),
        }
    }
}

/// Identifier lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Contact identifier (registered e-mail) sent as `pid`.
    /// Absent or empty disables lookups.
    #[serde(default)]
    pub contact: Option<String>,

    /// OpenURL endpoint, including its fixed query prefix
    #[serde(default = "defaults::lookup_base_url")]
    pub base_url: String,

    /// Minimum pause between lookups in milliseconds
    #[serde(default = "defaults::lookup_delay")]
    pub delay_ms: u64,

    /// Per-lookup timeout in seconds
    #[serde(default = "defaults::lookup_timeout")]
    pub timeout_secs: u64,
}

impl LookupConfig {
    /// Contact identifier, or `None` when lookups are disabled.
    pub fn contact(&self) -> Option<&str> {
        self.contact
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            contact: None,
            base_url: defaults::lookup_base_url(),
            delay_ms: defaults::lookup_delay(),
            timeout_secs: defaults::lookup_timeout(),
        }
    }
}

/// Output presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Author name to mark in author lists
    #[serde(default)]
    pub highlight: Option<String>,

    /// Manual PDF links keyed by exact title
    #[serde(default)]
    pub pdfs: HashMap<String, String>,

    /// Identifiers that get an altmetric badge
    #[serde(default)]
    pub altmetric_dois: BTreeSet<String>,

    /// Citation badge is shown only above this count
    #[serde(default = "defaults::min_citations")]
    pub min_citations: u32,

    /// Terms wrapped in emphasis after rendering
    #[serde(default)]
    pub italicize: Vec<String>,

    /// Output format
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            highlight: None,
            pdfs: HashMap::new(),
            altmetric_dois: BTreeSet::new(),
            min_citations: defaults::min_citations(),
            italicize: Vec::new(),
            format: OutputFormat::default(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
         (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
            .into()
    }
    pub fn profile_timeout() -> u64 {
        30
    }
    pub fn lookup_base_url() -> String {
        "http://www.crossref.org/openurl?redirect=false".into()
    }
    pub fn lookup_delay() -> u64 {
        super::MIN_LOOKUP_DELAY_MS
    }
    pub fn lookup_timeout() -> u64 {
        20
    }
    pub fn min_citations() -> u32 {
        1
    }
}
