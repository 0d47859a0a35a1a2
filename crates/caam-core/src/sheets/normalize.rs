//! Reshape a raw cell grid into header-keyed records.
//!
//! The first row names the columns. Keys are lower-cased with whitespace
//! runs collapsed to `_`, so a header of `"First Name"` becomes
//! `first_name`. Blank rows never produce a record.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::source::{CellValue, RawRow};

/// One non-blank data row, keyed by normalized header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// 1-based position among the records emitted for this grid.
    pub position: usize,
    /// 1-based index of the data row in the sheet, counting blank rows.
    pub source_row: usize,
    pub fields: HashMap<String, Option<String>>,
}

impl NormalizedRecord {
    /// Trimmed value for `key`, `None` when the column is absent or the cell is empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_deref())
    }

    /// First non-empty value among `keys`.
    pub fn get_any(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .filter_map(|k| self.get(k))
            .find(|v| !v.is_empty())
    }

    fn has_data(&self) -> bool {
        self.fields
            .values()
            .any(|v| v.as_deref().is_some_and(|s| !s.is_empty()))
    }
}

/// Normalize a header cell into a field key.
pub fn header_key(cell: &CellValue) -> String {
    let text = if cell.is_present() { cell.to_text() } else { String::new() };
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

fn is_blank_row(row: &RawRow) -> bool {
    row.iter().all(|cell| cell.trimmed_or_empty().is_empty())
}

/// Map each non-empty header key to its column. The first occurrence of a
/// repeated key wins.
fn header_index(header_row: &RawRow) -> Vec<(String, usize)> {
    let mut seen = HashSet::new();
    let mut columns = Vec::new();
    for (idx, cell) in header_row.iter().enumerate() {
        let key = header_key(cell);
        if key.is_empty() || !seen.insert(key.clone()) {
            continue;
        }
        columns.push((key, idx));
    }
    columns
}

/// Convert the full grid (header row first) into records, in source order.
pub fn normalize_rows(rows: &[RawRow]) -> Vec<NormalizedRecord> {
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Vec::new();
    };
    let columns = header_index(header_row);

    let mut records: Vec<NormalizedRecord> = Vec::new();
    for (row_idx, row) in data_rows.iter().enumerate() {
        if is_blank_row(row) {
            continue;
        }

        let fields = columns
            .iter()
            .map(|(key, idx)| {
                let value = row.get(*idx).and_then(CellValue::present_text);
                (key.clone(), value)
            })
            .collect();

        let record = NormalizedRecord {
            position: records.len() + 1,
            source_row: row_idx + 1,
            fields,
        };
        // Catches rows whose only text sat under unnamed columns
        if record.has_data() {
            records.push(record);
        }
    }
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_rows(rows: &[&[&str]]) -> Vec<RawRow> {
        rows.iter()
            .map(|r| r.iter().map(|c| CellValue::from(*c)).collect())
            .collect()
    }

    #[test]
    fn test_header_key() {
        assert_eq!(header_key(&"First Name".into()), "first_name");
        assert_eq!(header_key(&"  Membership   Level\t".into()), "membership_level");
        assert_eq!(header_key(&"LIST_OG".into()), "list_og");
        assert_eq!(header_key(&CellValue::Empty), "");
        assert_eq!(header_key(&CellValue::Number(2024.0)), "2024");
    }

    #[test]
    fn test_blank_rows_skipped() {
        let rows = text_rows(&[
            &["Name", "Date"],
            &["Intro", "2025-01-01"],
            &["", "   "],
            &[],
            &["Advanced", "2025-02-01"],
        ]);
        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("name"), Some("Intro"));
        assert_eq!(records[1].get("name"), Some("Advanced"));
        assert_eq!(records[1].position, 2);
        assert_eq!(records[1].source_row, 4);
    }

    #[test]
    fn test_missing_cells_are_none() {
        let rows = text_rows(&[&["Name", "Topic", "Image"], &["Intro  ", ""]]);
        let records = normalize_rows(&rows);
        assert_eq!(records[0].get("name"), Some("Intro"));
        assert_eq!(records[0].fields.get("topic"), Some(&None));
        assert_eq!(records[0].fields.get("image"), Some(&None));
    }

    #[test]
    fn test_whitespace_cell_is_empty_string_not_none() {
        let rows = text_rows(&[&["Name", "Topic"], &["Intro", "   "]]);
        let records = normalize_rows(&rows);
        assert_eq!(records[0].fields.get("topic"), Some(&Some(String::new())));
    }

    #[test]
    fn test_falsy_cells_are_none() {
        let rows = vec![
            vec!["Name".into(), "Seats".into(), "Open".into()],
            vec!["Intro".into(), CellValue::Number(0.0), CellValue::Bool(false)],
        ];
        let records = normalize_rows(&rows);
        assert_eq!(records[0].get("seats"), None);
        assert_eq!(records[0].get("open"), None);
    }

    #[test]
    fn test_row_with_text_only_under_unnamed_column_dropped() {
        let rows = text_rows(&[&["Name", "", "Date"], &["", "stray note", ""], &["Intro", "", ""]]);
        let records = normalize_rows(&rows);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("name"), Some("Intro"));
        assert_eq!(records[0].position, 1);
        assert!(!records[0].fields.contains_key(""));
    }

    #[test]
    fn test_duplicate_header_first_wins() {
        let rows = text_rows(&[&["City", "City"], &["Fresno", "Portland"]]);
        let records = normalize_rows(&rows);
        assert_eq!(records[0].get("city"), Some("Fresno"));
        assert_eq!(records[0].fields.len(), 1);
    }

    #[test]
    fn test_header_only_and_empty_input() {
        assert!(normalize_rows(&[]).is_empty());
        assert!(normalize_rows(&text_rows(&[&["Name"]])).is_empty());
    }

    #[test]
    fn test_get_any_prefers_first_present() {
        let rows = text_rows(&[&["First Name", "FirstName"], &["", "ada"]]);
        let records = normalize_rows(&rows);
        assert_eq!(records[0].get_any(&["firstname", "first_name"]), Some("ada"));
    }
}
