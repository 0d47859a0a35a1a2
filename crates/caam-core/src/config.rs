//! Site configuration.
//!
//! All values come from the process environment (a `.env` file is loaded
//! by the binary before this runs). Required values are checked when the
//! config is built, so a missing sheet id fails the build up front rather
//! than surfacing as a confusing API error later.

use std::path::PathBuf;

use anyhow::Result;

use crate::error::ConfigError;
use crate::sheets::DEFAULT_RANGE;

/// Application name used for the cache directory path
const APP_NAME: &str = "caam-site";

pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_IMMERSION_SHEET: &str = "IMMERSION_SHEET_ID";
pub const ENV_MEMBERS_SHEET: &str = "MEMBERS_SHEET_ID";
pub const ENV_SHEET_RANGE: &str = "CAAM_SHEET_RANGE";
pub const ENV_CONTENT_DIR: &str = "CAAM_CONTENT_DIR";
pub const ENV_OUTPUT_DIR: &str = "CAAM_OUTPUT_DIR";
pub const ENV_CACHE_TTL: &str = "CAAM_CACHE_TTL_MINUTES";
pub const ENV_LOG_DIR: &str = "CAAM_LOG_DIR";

const DEFAULT_CONTENT_DIR: &str = "public";
const DEFAULT_OUTPUT_DIR: &str = "out";

#[derive(Clone, PartialEq, Eq)]
pub struct SiteConfig {
    pub api_key: String,
    pub immersion_sheet_id: String,
    pub members_sheet_id: String,
    /// Range read from both sheets.
    pub sheet_range: String,
    /// Directory holding the markdown documents.
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Reuse fetched data younger than this; `None` always fetches fresh.
    pub cache_ttl_minutes: Option<i64>,
    pub log_dir: Option<PathBuf>,
}

impl std::fmt::Debug for SiteConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteConfig")
            .field("api_key", &"<redacted>")
            .field("immersion_sheet_id", &self.immersion_sheet_id)
            .field("members_sheet_id", &self.members_sheet_id)
            .field("sheet_range", &self.sheet_range)
            .field("content_dir", &self.content_dir)
            .field("output_dir", &self.output_dir)
            .field("cache_ttl_minutes", &self.cache_ttl_minutes)
            .field("log_dir", &self.log_dir)
            .finish()
    }
}

impl SiteConfig {
    /// Build from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any name-to-value lookup. Blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));

        let cache_ttl_minutes = match get(ENV_CACHE_TTL) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(minutes) if minutes > 0 => Some(minutes),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: ENV_CACHE_TTL,
                        value: raw,
                    })
                }
            },
            None => None,
        };

        Ok(Self {
            api_key: require(ENV_API_KEY)?,
            immersion_sheet_id: require(ENV_IMMERSION_SHEET)?,
            members_sheet_id: require(ENV_MEMBERS_SHEET)?,
            sheet_range: get(ENV_SHEET_RANGE).unwrap_or_else(|| DEFAULT_RANGE.to_string()),
            content_dir: get(ENV_CONTENT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR)),
            output_dir: get(ENV_OUTPUT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
            cache_ttl_minutes,
            log_dir: get(ENV_LOG_DIR).map(PathBuf::from),
        })
    }

    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
