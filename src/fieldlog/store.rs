use super::form::{FormField, PendingEntry};
use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

/// Minute-resolution stamp written into each row
pub const ROW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// One captured observation. Rows are never edited after capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogRow {
    timestamp: String,
    coordinate: String,
    location_description: String,
    activity: String,
    tag: String,
    note: String,
    issue: String,
}

impl LogRow {
    fn snapshot(coordinate: &str, entry: &PendingEntry, at: NaiveDateTime) -> Self {
        Self {
            timestamp: at.format(ROW_TIMESTAMP_FORMAT).to_string(),
            coordinate: coordinate.to_string(),
            location_description: entry.cell(FormField::LocationDescription),
            activity: entry.cell(FormField::Activity),
            tag: entry.cell(FormField::Tag),
            note: entry.cell(FormField::Note),
            issue: entry.cell(FormField::Issue),
        }
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn coordinate(&self) -> &str {
        &self.coordinate
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::LocationDescription => &self.location_description,
            FormField::Activity => &self.activity,
            FormField::Tag => &self.tag,
            FormField::Note => &self.note,
            FormField::Issue => &self.issue,
        }
    }

    /// Cells in report column order
    pub fn cells(&self) -> [&str; 7] {
        [
            &self.timestamp,
            &self.coordinate,
            &self.location_description,
            &self.activity,
            &self.tag,
            &self.note,
            &self.issue,
        ]
    }
}

/// Captured rows in capture order plus the entry the next capture will use
#[derive(Debug, Default)]
pub struct FieldLogStore {
    rows: Vec<LogRow>,
    pending: PendingEntry,
}

impl FieldLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row built from the coordinate text and the pending entry.
    ///
    /// The pending entry is left as is, so repeated captures reuse it.
    pub fn capture(&mut self, coordinate: &str, at: NaiveDateTime) -> &LogRow {
        let row = LogRow::snapshot(coordinate, &self.pending, at);
        info!(
            "Captured row {} at {} ({})",
            self.rows.len() + 1,
            row.timestamp,
            row.coordinate
        );
        self.rows.push(row);
        &self.rows[self.rows.len() - 1]
    }

    pub fn rows(&self) -> &[LogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn pending(&self) -> &PendingEntry {
        &self.pending
    }

    pub fn pending_mut(&mut self) -> &mut PendingEntry {
        &mut self.pending
    }
}
