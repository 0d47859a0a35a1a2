//! Spreadsheet access: the tabular source adapter and row normalizer.
//!
//! `SheetsClient` talks to the Google Sheets values API; `MemorySource`
//! serves fixed grids. Both implement [`SheetSource`], which hands back the
//! raw cell grid that [`normalize_rows`] turns into header-keyed records.

pub mod client;
pub mod normalize;
pub mod source;

pub use client::SheetsClient;
pub use normalize::{header_key, normalize_rows, NormalizedRecord};
pub use source::{CellValue, MemorySource, RawRow, SheetSource, DEFAULT_RANGE};
