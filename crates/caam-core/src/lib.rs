//! Data pipeline behind the CAAM website.
//!
//! Two spreadsheets feed the site: the clinical immersion events calendar
//! and the member directory. This crate reads them through the Sheets API,
//! normalizes the rows, maps them to typed models, derives the views each
//! page renders, and runs the directory search.
//!
//! ```text
//! SheetSource ──> normalize_rows ──> map_events / map_professionals
//!                                      ──> EventSchedule / EventCalendar / DirectoryData
//!                                      ──> DirectorySearch
//! ```

pub mod cache;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod search;
pub mod sheets;
pub mod utils;
pub mod views;

pub use config::SiteConfig;
pub use error::{ConfigError, ContentError, SheetError};
pub use models::{ImmersionEvent, Professional};
pub use pipeline::Fetch;
pub use search::{filter_professionals, DirectorySearch, FilterSelection, SearchOutcome};
pub use sheets::{SheetSource, SheetsClient};
pub use views::{DirectoryData, EventCalendar, EventSchedule, FilterOptions};
