use std::collections::HashMap;
use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// Range read when the caller does not name one.
pub const DEFAULT_RANGE: &str = "Sheet1";

/// A single spreadsheet cell as returned by the values API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

/// One source row, cells in column order. Trailing empty cells are
/// usually omitted by the service, so rows may be shorter than the header.
pub type RawRow = Vec<CellValue>;

impl CellValue {
    /// Whether the cell holds a usable value. `""`, `0`, `false` and empty
    /// cells all count as missing.
    pub fn is_present(&self) -> bool {
        match self {
            CellValue::Text(s) => !s.is_empty(),
            CellValue::Number(n) => *n != 0.0 && !n.is_nan(),
            CellValue::Bool(b) => *b,
            CellValue::Empty => false,
        }
    }

    /// Render the cell as text. Integral numbers print without a fraction.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) if n.is_finite() && n.fract() == 0.0 => format!("{:.0}", n),
            CellValue::Number(n) => n.to_string(),
            CellValue::Bool(b) => b.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Trimmed text of a present cell, `None` for a missing one.
    pub fn present_text(&self) -> Option<String> {
        self.is_present().then(|| self.to_text().trim().to_string())
    }

    /// Trimmed text, with missing cells rendered as `""`.
    pub fn trimmed_or_empty(&self) -> String {
        self.present_text().unwrap_or_default()
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

/// Anything that can hand back the 2-D cell grid of a named range.
///
/// Implementations make exactly one attempt per call.
pub trait SheetSource {
    fn fetch_range(
        &self,
        sheet_id: &str,
        range: &str,
    ) -> impl Future<Output = Result<Vec<RawRow>, SheetError>> + Send;
}

/// Fixed in-memory sheets, keyed by sheet id. Used in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    sheets: HashMap<String, Vec<RawRow>>,
    unavailable: bool,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sheet built from string cells.
    pub fn with_sheet(mut self, sheet_id: &str, rows: &[&[&str]]) -> Self {
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|c| CellValue::from(*c)).collect())
            .collect();
        self.sheets.insert(sheet_id.to_string(), rows);
        self
    }

    /// Register a sheet from already-typed cells.
    pub fn with_rows(mut self, sheet_id: &str, rows: Vec<RawRow>) -> Self {
        self.sheets.insert(sheet_id.to_string(), rows);
        self
    }

    /// Make every fetch fail as if the service were down.
    pub fn unavailable(mut self) -> Self {
        self.unavailable = true;
        self
    }
}

impl SheetSource for MemorySource {
    async fn fetch_range(&self, sheet_id: &str, _range: &str) -> Result<Vec<RawRow>, SheetError> {
        if self.unavailable {
            return Err(SheetError::ServerError("source offline".to_string()));
        }
        self.sheets
            .get(sheet_id)
            .cloned()
            .ok_or_else(|| SheetError::NotFound(sheet_id.to_string()))
    }
}
