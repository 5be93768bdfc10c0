//! Column renaming and duplicate removal.
//!
//! Cleaning happens on the raw string table, before typed
//! deserialization: the header row is rewritten with the corrected
//! column names, then byte-identical rows are dropped (first occurrence
//! kept, original order preserved).

use crate::data::loader::RawTable;
use crate::models::EmployeeRecord;
use anyhow::{Context, Result};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Corrections applied to the raw source's column names. Names not in
/// this map pass through unchanged.
pub const COLUMN_RENAMES: &[(&str, &str)] = &[
    ("average_montly_hours", "average_monthly_hours"),
    ("time_spend_company", "tenure"),
    ("Work_accident", "work_accident"),
    ("promotion_last_5years", "promotion_last_5_years"),
    ("Department", "department"),
];

/// The table after renaming and deduplication.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    pub headers: csv::StringRecord,
    pub rows: Vec<csv::StringRecord>,
    /// Number of exact-duplicate rows that were removed.
    pub duplicates_removed: usize,
}

/// Rename known columns and remove exact-duplicate rows.
pub fn clean_table(raw: RawTable) -> CleanedTable {
    let headers = rename_columns(&raw.headers);
    let (rows, duplicates_removed) = dedup_rows(raw.rows);

    debug!(
        "Cleaned table: {} rows kept, {} duplicates removed",
        rows.len(),
        duplicates_removed
    );

    CleanedTable {
        headers,
        rows,
        duplicates_removed,
    }
}

/// Apply the rename map to a header record.
///
/// A rename key missing from the header is tolerated: the source schema
/// occasionally drifts, so an absent column logs a warning instead of
/// failing. A genuinely required column still fails later, at typed
/// deserialization, with the column named in the error.
pub fn rename_columns(headers: &csv::StringRecord) -> csv::StringRecord {
    for (from, _) in COLUMN_RENAMES {
        if !headers.iter().any(|h| h == *from) {
            warn!("Expected source column '{}' not present; rename skipped", from);
        }
    }

    headers
        .iter()
        .map(|name| {
            COLUMN_RENAMES
                .iter()
                .find(|(from, _)| *from == name)
                .map(|(_, to)| *to)
                .unwrap_or(name)
        })
        .collect()
}

/// Remove byte-identical rows, keeping the first occurrence of each.
/// Returns the surviving rows (original order) and the removed count.
pub fn dedup_rows(rows: Vec<csv::StringRecord>) -> (Vec<csv::StringRecord>, usize) {
    let total = rows.len();
    let mut seen: HashSet<Vec<u8>> = HashSet::with_capacity(total);
    let mut kept = Vec::with_capacity(total);

    for row in rows {
        // Fields joined with an unescaped separator would collide on
        // embedded separators; length-prefixing each field avoids that.
        let mut key = Vec::new();
        for field in row.iter() {
            key.extend_from_slice(&(field.len() as u32).to_le_bytes());
            key.extend_from_slice(field.as_bytes());
        }
        if seen.insert(key) {
            kept.push(row);
        }
    }

    let removed = total - kept.len();
    (kept, removed)
}

/// Deserialize the cleaned rows into typed employee records.
///
/// A column required by the schema that is missing, or a cell that fails
/// to parse, is fatal (the source guards against neither).
pub fn into_records(table: &CleanedTable) -> Result<Vec<EmployeeRecord>> {
    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            row.deserialize::<EmployeeRecord>(Some(&table.headers))
                .with_context(|| format!("failed to parse row {}", i + 2))
        })
        .collect()
}
