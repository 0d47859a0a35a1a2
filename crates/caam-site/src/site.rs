//! Static build: fetch both sheets once, derive each page's data and write
//! it next to the rendered markdown documents.
//!
//! Output layout:
//!
//! ```text
//! <out>/data/immersion.json   next / upcoming / past events
//! <out>/data/calendar.json    all events, indexed by day
//! <out>/data/directory.json   listed professionals + filter options
//! <out>/privacy.html
//! <out>/terms.html
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caam_core::cache::CacheManager;
use caam_core::content::{MarkdownDocument, PRIVACY_POLICY, TERMS_OF_USE};
use caam_core::pipeline::{self, Fetch};
use caam_core::{
    DirectoryData, EventCalendar, EventSchedule, ImmersionEvent, SheetSource, SiteConfig,
};
use chrono::{DateTime, Utc};
use pulldown_cmark_escape::escape_html;
use serde::Serialize;
use tracing::{info, warn};

/// How a page's source sheet fared, written into every data file so the
/// page can tell "could not load" apart from "nothing to show".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceStatus {
    Loaded,
    Cached,
    Empty,
    Unavailable,
}

#[derive(Serialize)]
struct PageData<'a, T: Serialize> {
    #[serde(rename = "sourceStatus")]
    source_status: SourceStatus,
    #[serde(rename = "generatedAt")]
    generated_at: DateTime<Utc>,
    #[serde(flatten)]
    data: &'a T,
}

/// Static documents rendered to HTML: (markdown file, output file).
const DOCUMENTS: &[(&str, &str)] = &[(PRIVACY_POLICY, "privacy.html"), (TERMS_OF_USE, "terms.html")];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub events: SourceStatus,
    pub directory: SourceStatus,
    pub event_count: usize,
    pub professional_count: usize,
    pub documents: usize,
}

pub struct SiteBuilder<S: SheetSource> {
    source: S,
    config: SiteConfig,
    cache: Option<CacheManager>,
}

impl<S: SheetSource> SiteBuilder<S> {
    pub fn new(source: S, config: SiteConfig) -> Self {
        Self {
            source,
            config,
            cache: None,
        }
    }

    /// Reuse data younger than the configured TTL. Without a TTL this is a no-op.
    pub fn with_cache(mut self, cache: CacheManager) -> Self {
        if self.config.cache_ttl_minutes.is_some() {
            self.cache = Some(cache);
        }
        self
    }

    fn cache_ttl(&self) -> Option<(&CacheManager, i64)> {
        self.cache.as_ref().zip(self.config.cache_ttl_minutes)
    }

    /// Fetch the events sheet, consulting the cache first when enabled.
    pub async fn events(&self, now: DateTime<Utc>) -> (SourceStatus, Fetch<Vec<ImmersionEvent>>) {
        let sheet_id = &self.config.immersion_sheet_id;
        if let Some((cache, ttl)) = self.cache_ttl() {
            if let Some(events) = cache.load_events(sheet_id, ttl) {
                return (SourceStatus::Cached, Fetch::Loaded(events));
            }
        }

        let fetch =
            pipeline::load_immersion_events(&self.source, sheet_id, &self.config.sheet_range, now).await;
        if let (Some((cache, _)), Fetch::Loaded(events)) = (self.cache_ttl(), &fetch) {
            if let Err(e) = cache.save_events(sheet_id, events) {
                warn!(error = %e, "Failed to cache events");
            }
        }
        (status_of(&fetch), fetch)
    }

    /// Fetch the directory sheet, consulting the cache first when enabled.
    pub async fn directory(&self) -> (SourceStatus, Fetch<DirectoryData>) {
        let sheet_id = &self.config.members_sheet_id;
        if let Some((cache, ttl)) = self.cache_ttl() {
            if let Some(professionals) = cache.load_professionals(sheet_id, ttl) {
                return (SourceStatus::Cached, Fetch::Loaded(DirectoryData::new(professionals)));
            }
        }

        let fetch = pipeline::load_directory(&self.source, sheet_id, &self.config.sheet_range).await;
        if let (Some((cache, _)), Fetch::Loaded(data)) = (self.cache_ttl(), &fetch) {
            if let Err(e) = cache.save_professionals(sheet_id, &data.professionals) {
                warn!(error = %e, "Failed to cache professionals");
            }
        }
        (status_of(&fetch), fetch)
    }

    /// Run a full build into `out_dir`.
    ///
    /// An unavailable directory sheet fails the build. An unavailable
    /// events sheet degrades to empty event pages marked `unavailable`,
    /// unless `strict` is set. Every input is read before the first file
    /// is written, so a failed build leaves `out_dir` untouched.
    pub async fn build(&self, out_dir: &Path, now: DateTime<Utc>, strict: bool) -> Result<BuildReport> {
        let (events_status, events) = self.events(now).await;
        let events = match events {
            Fetch::Unavailable(e) if strict => {
                return Err(e).context("Events sheet unavailable");
            }
            Fetch::Unavailable(e) => {
                warn!(error = %e, "Events sheet unavailable, writing empty event pages");
                Vec::new()
            }
            other => other.unwrap_or_default(),
        };

        let (directory_status, directory) = self.directory().await;
        let directory = directory
            .into_result()
            .context("Directory sheet unavailable")?;

        let documents = self.render_documents()?;

        let data_dir = out_dir.join("data");
        std::fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create output directory {}", data_dir.display()))?;

        let schedule = EventSchedule::partition(&events, now);
        let calendar = EventCalendar::build(&events);
        write_page(&data_dir.join("immersion.json"), events_status, now, &schedule)?;
        write_page(&data_dir.join("calendar.json"), events_status, now, &calendar)?;
        write_page(&data_dir.join("directory.json"), directory_status, now, &directory)?;

        for (target, page) in &documents {
            let path = out_dir.join(target);
            std::fs::write(&path, page)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        let report = BuildReport {
            events: events_status,
            directory: directory_status,
            event_count: events.len(),
            professional_count: directory.professionals.len(),
            documents: documents.len(),
        };
        info!(
            events = report.event_count,
            professionals = report.professional_count,
            documents = report.documents,
            out = %out_dir.display(),
            "Site data written"
        );
        Ok(report)
    }

    /// Load and render every document as (output file, HTML page).
    fn render_documents(&self) -> Result<Vec<(&'static str, String)>> {
        let mut pages = Vec::with_capacity(DOCUMENTS.len());
        for &(source, target) in DOCUMENTS {
            let doc = MarkdownDocument::load(&self.config.content_dir, source)?;
            let title = doc.title().unwrap_or(source);
            pages.push((target, html_page(title, &doc.to_html())));
        }
        Ok(pages)
    }

    pub fn output_dir(&self, overridden: Option<PathBuf>) -> PathBuf {
        overridden.unwrap_or_else(|| self.config.output_dir.clone())
    }
}

fn status_of<T>(fetch: &Fetch<T>) -> SourceStatus {
    match fetch {
        Fetch::Loaded(_) => SourceStatus::Loaded,
        Fetch::Empty => SourceStatus::Empty,
        Fetch::Unavailable(_) => SourceStatus::Unavailable,
    }
}

fn write_page<T: Serialize>(path: &Path, status: SourceStatus, now: DateTime<Utc>, data: &T) -> Result<()> {
    let page = PageData {
        source_status: status,
        generated_at: now,
        data,
    };
    let contents = serde_json::to_string_pretty(&page)?;
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

fn escape_title(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    // Writing into a String is infallible
    let _ = escape_html(&mut out, text);
    out
}

fn html_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{} | CAAM</title>\n</head>\n<body>\n<main class=\"prose\">\n{}</main>\n</body>\n</html>\n",
        escape_title(title),
        body
    )
}
