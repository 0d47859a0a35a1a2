//! Fetch entry points used by page builds.
//!
//! Every entry point returns a [`Fetch`], so an empty sheet and an
//! unreachable sheet stay distinguishable all the way to the page. The
//! caller decides whether an unavailable source fails the build or
//! degrades to an empty view.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::error::SheetError;
use crate::models::{map_events, map_professionals, ImmersionEvent};
use crate::sheets::{normalize_rows, NormalizedRecord, SheetSource};
use crate::views::{DirectoryData, EventCalendar, EventSchedule};

/// Outcome of reading one sheet.
#[derive(Debug)]
pub enum Fetch<T> {
    /// The sheet returned at least one data row.
    Loaded(T),
    /// The sheet was reachable but held no rows.
    Empty,
    /// The sheet could not be read.
    Unavailable(SheetError),
}

impl<T> Fetch<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Fetch<U> {
        match self {
            Fetch::Loaded(data) => Fetch::Loaded(f(data)),
            Fetch::Empty => Fetch::Empty,
            Fetch::Unavailable(e) => Fetch::Unavailable(e),
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Fetch::Unavailable(_))
    }

    /// Loaded data, or `T::default()` for an empty sheet. Unavailable
    /// sources are returned as the error.
    pub fn into_result(self) -> Result<T, SheetError>
    where
        T: Default,
    {
        match self {
            Fetch::Loaded(data) => Ok(data),
            Fetch::Empty => Ok(T::default()),
            Fetch::Unavailable(e) => Err(e),
        }
    }

    /// Loaded data, or `T::default()` for both empty and unavailable sources.
    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        match self {
            Fetch::Loaded(data) => data,
            Fetch::Empty | Fetch::Unavailable(_) => T::default(),
        }
    }
}

/// Read `range` of `sheet_id` and normalize it.
pub async fn fetch_records<S: SheetSource>(
    source: &S,
    sheet_id: &str,
    range: &str,
) -> Fetch<Vec<NormalizedRecord>> {
    let rows = match source.fetch_range(sheet_id, range).await {
        Ok(rows) => rows,
        Err(e) => {
            error!(sheet_id = %sheet_id, range = %range, error = %e, "Failed to fetch sheet data");
            return Fetch::Unavailable(e);
        }
    };

    if rows.is_empty() {
        warn!(sheet_id = %sheet_id, range = %range, "No data found in the sheet");
        return Fetch::Empty;
    }

    let records = normalize_rows(&rows);
    info!(sheet_id = %sheet_id, rows = rows.len(), records = records.len(), "Normalized sheet rows");
    Fetch::Loaded(records)
}

/// All events in sheet order. Missing dates default to today's date (UTC).
pub async fn load_immersion_events<S: SheetSource>(
    source: &S,
    sheet_id: &str,
    range: &str,
    now: DateTime<Utc>,
) -> Fetch<Vec<ImmersionEvent>> {
    fetch_records(source, sheet_id, range)
        .await
        .map(|records| map_events(&records, now.date_naive()))
}

/// Next / upcoming / past split around `now`.
pub async fn load_event_schedule<S: SheetSource>(
    source: &S,
    sheet_id: &str,
    range: &str,
    now: DateTime<Utc>,
) -> Fetch<EventSchedule> {
    load_immersion_events(source, sheet_id, range, now)
        .await
        .map(|events| EventSchedule::partition(&events, now))
}

/// Every event sorted by date, grouped per day.
pub async fn load_calendar<S: SheetSource>(
    source: &S,
    sheet_id: &str,
    range: &str,
    now: DateTime<Utc>,
) -> Fetch<EventCalendar> {
    load_immersion_events(source, sheet_id, range, now)
        .await
        .map(|events| EventCalendar::build(&events))
}

/// Listed professionals and the search form's options.
pub async fn load_directory<S: SheetSource>(
    source: &S,
    sheet_id: &str,
    range: &str,
) -> Fetch<DirectoryData> {
    fetch_records(source, sheet_id, range)
        .await
        .map(|records| DirectoryData::new(map_professionals(&records)))
}
