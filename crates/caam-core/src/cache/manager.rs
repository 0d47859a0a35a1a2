use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{ImmersionEvent, Professional};

const EVENTS: &str = "events";
const PROFESSIONALS: &str = "professionals";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedData<T> {
    pub data: T,
    pub cached_at: DateTime<Utc>,
}

impl<T> CachedData<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            cached_at: Utc::now(),
        }
    }

    pub fn age_minutes(&self) -> i64 {
        let now = Utc::now();
        (now - self.cached_at).num_minutes()
    }

    pub fn age_display(&self) -> String {
        let minutes = self.age_minutes();
        if minutes < 1 {
            // Also covers clock skew
            "just now".to_string()
        } else if minutes < 60 {
            format!("{}m ago", minutes)
        } else if minutes < 1440 {
            format!("{}h ago", minutes / 60)
        } else {
            format!("{}d ago", minutes / 1440)
        }
    }

    pub fn is_stale(&self, ttl_minutes: i64) -> bool {
        self.age_minutes() >= ttl_minutes
    }
}

pub struct CacheManager {
    cache_dir: PathBuf,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache directory {}", cache_dir.display()))?;
        Ok(Self { cache_dir })
    }

    /// Cache file per data set and sheet, so switching sheets never reuses stale rows.
    fn cache_path(&self, name: &str, sheet_id: &str) -> PathBuf {
        let sheet: String = sheet_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.cache_dir.join(format!("{}_{}.json", name, sheet))
    }

    fn load<T: DeserializeOwned>(&self, name: &str, sheet_id: &str) -> Result<Option<CachedData<T>>> {
        let path = self.cache_path(name, sheet_id);
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read cache file: {}", name))?;

        let cached: CachedData<T> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse cache file: {}", name))?;

        Ok(Some(cached))
    }

    fn save<T: Serialize>(&self, name: &str, sheet_id: &str, data: &T) -> Result<()> {
        let cached = CachedData::new(data);
        let path = self.cache_path(name, sheet_id);
        let contents = serde_json::to_string_pretty(&cached)?;
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write cache file: {}", name))?;
        Ok(())
    }

    /// Load `name` if present and younger than `ttl_minutes`. Unreadable
    /// cache files are logged and treated as missing.
    fn load_fresh<T: DeserializeOwned>(&self, name: &str, sheet_id: &str, ttl_minutes: i64) -> Option<T> {
        match self.load::<T>(name, sheet_id) {
            Ok(Some(cached)) if !cached.is_stale(ttl_minutes) => {
                debug!(cache = name, age = %cached.age_display(), "Using cached data");
                Some(cached.data)
            }
            Ok(Some(cached)) => {
                debug!(cache = name, age = %cached.age_display(), "Cached data is stale");
                None
            }
            Ok(None) => None,
            Err(e) => {
                debug!(cache = name, error = %e, "Failed to load cache, treating as stale");
                None
            }
        }
    }

    // ===== Events =====

    pub fn load_events(&self, sheet_id: &str, ttl_minutes: i64) -> Option<Vec<ImmersionEvent>> {
        self.load_fresh(EVENTS, sheet_id, ttl_minutes)
    }

    pub fn save_events(&self, sheet_id: &str, events: &[ImmersionEvent]) -> Result<()> {
        self.save(EVENTS, sheet_id, &events)
    }

    // ===== Professionals =====

    pub fn load_professionals(&self, sheet_id: &str, ttl_minutes: i64) -> Option<Vec<Professional>> {
        self.load_fresh(PROFESSIONALS, sheet_id, ttl_minutes)
    }

    pub fn save_professionals(&self, sheet_id: &str, professionals: &[Professional]) -> Result<()> {
        self.save(PROFESSIONALS, sheet_id, &professionals)
    }
}

// ============================================================================
// Tests
// ============================================================================
