use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sheets::NormalizedRecord;

/// Image shown for events whose row has no image URL.
pub const DEFAULT_EVENT_IMAGE: &str = "/assets/immersions/default.jpg";

/// Name used when the row leaves the name column empty.
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// Date-only layouts accepted in the date column, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %d, %Y", "%b %d, %Y", "%A, %B %d, %Y"];

/// Date-and-time layouts without an offset; read as UTC.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

/// A clinical immersion program or other calendar event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ImmersionEvent {
    pub id: String,
    pub name: String,
    pub topic: String,
    /// Date text as entered in the sheet; parsed only when compared.
    pub date: String,
    pub time: String,
    pub presenter: String,
    pub details: String,
    pub image: String,
    pub link: String,
}

/// Parse the free-form date column. Returns `None` for text that is not a
/// recognizable date.
pub fn parse_event_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, fmt) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

fn field_or(record: &NormalizedRecord, key: &str, default: &str) -> String {
    match record.get(key) {
        Some(value) if !value.is_empty() => value.trim().to_string(),
        _ => default.to_string(),
    }
}

impl ImmersionEvent {
    /// Build an event from a normalized row, filling defaults for empty
    /// columns. `today` stands in for a missing date.
    pub fn from_record(record: &NormalizedRecord, today: NaiveDate) -> Self {
        let fallback_id = format!("event-{}", record.position);
        let fallback_date = today.format("%Y-%m-%d").to_string();

        Self {
            id: field_or(record, "id", &fallback_id),
            name: field_or(record, "name", UNTITLED_EVENT),
            topic: field_or(record, "topic", ""),
            date: field_or(record, "date", &fallback_date),
            time: field_or(record, "time", ""),
            presenter: field_or(record, "presenter", ""),
            details: field_or(record, "details", ""),
            image: field_or(record, "image", DEFAULT_EVENT_IMAGE),
            link: field_or(record, "link", ""),
        }
    }

    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        parse_event_date(&self.date)
    }

    /// Calendar bucket key, `YYYY-MM-DD`.
    pub fn date_key(&self) -> Option<String> {
        self.parsed_date().map(|dt| dt.format("%Y-%m-%d").to_string())
    }

    pub fn formatted_date(&self) -> String {
        match self.parsed_date() {
            Some(dt) => dt.format("%b %d, %Y").to_string(),
            // Fall back to raw date string
            None => self.date.clone(),
        }
    }

    pub fn has_link(&self) -> bool {
        !self.link.is_empty()
    }
}

/// Map every normalized row to an event, in source order.
pub fn map_events(records: &[NormalizedRecord], today: NaiveDate) -> Vec<ImmersionEvent> {
    records
        .iter()
        .map(|record| ImmersionEvent::from_record(record, today))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::{normalize_rows, CellValue};
    use chrono::{Datelike, Timelike};

    fn records(rows: &[&[&str]]) -> Vec<NormalizedRecord> {
        let rows: Vec<Vec<CellValue>> = rows
            .iter()
            .map(|r| r.iter().map(|c| CellValue::from(*c)).collect())
            .collect();
        normalize_rows(&rows)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let recs = records(&[
            &["ID", "Name", "Date", "Image"],
            &["", "Intro to Pulse", "2025-06-01", ""],
            &["imm-7", "", "", "https://cdn.example.org/a.jpg"],
        ]);
        let events = map_events(&recs, today());

        assert_eq!(events[0].id, "event-1");
        assert_eq!(events[0].image, DEFAULT_EVENT_IMAGE);
        assert_eq!(events[0].topic, "");

        assert_eq!(events[1].id, "imm-7");
        assert_eq!(events[1].name, UNTITLED_EVENT);
        assert_eq!(events[1].date, "2025-03-01");
        assert_eq!(events[1].image, "https://cdn.example.org/a.jpg");
    }

    #[test]
    fn test_missing_image_column_uses_placeholder() {
        let recs = records(&[&["Name", "Date"], &["Herbs", "2025-01-01"]]);
        let event = ImmersionEvent::from_record(&recs[0], today());
        assert_eq!(event.image, DEFAULT_EVENT_IMAGE);
        assert_eq!(event.link, "");
        assert!(!event.has_link());
    }

    #[test]
    fn test_synthetic_id_counts_non_blank_rows() {
        let recs = records(&[&["Name"], &["First"], &["   "], &["Second"]]);
        let events = map_events(&recs, today());
        assert_eq!(events[1].id, "event-2");
    }

    #[test]
    fn test_parse_event_date_formats() {
        let iso = parse_event_date("2025-06-01").unwrap();
        assert_eq!((iso.year(), iso.month(), iso.day(), iso.hour()), (2025, 6, 1, 0));

        let us = parse_event_date("06/01/2025").unwrap();
        assert_eq!(us, iso);

        let long = parse_event_date("June 1, 2025").unwrap();
        assert_eq!(long, iso);

        let short = parse_event_date("Jun 1, 2025").unwrap();
        assert_eq!(short, iso);

        let with_time = parse_event_date("2025-06-01T18:30").unwrap();
        assert_eq!(with_time.hour(), 18);

        let rfc = parse_event_date("2025-06-01T10:00:00-07:00").unwrap();
        assert_eq!(rfc.hour(), 17);
    }

    #[test]
    fn test_parse_event_date_invalid() {
        assert!(parse_event_date("").is_none());
        assert!(parse_event_date("TBD").is_none());
        assert!(parse_event_date("2025-13-45").is_none());
    }

    #[test]
    fn test_formatted_date() {
        let recs = records(&[&["Name", "Date"], &["A", "2025-06-01"], &["B", "Spring 2025"]]);
        let events = map_events(&recs, today());
        assert_eq!(events[0].formatted_date(), "Jun 01, 2025");
        assert_eq!(events[0].date_key().as_deref(), Some("2025-06-01"));
        assert_eq!(events[1].formatted_date(), "Spring 2025");
        assert_eq!(events[1].date_key(), None);
    }
}
