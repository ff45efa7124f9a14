//! Whole-record export/import (JSON array of tournaments) and CSV roster import.

use crate::models::{Tournament, TournamentError};
use crate::store::{StoreError, TournamentStore};
use serde_json::Value;

/// Serialize tournaments as a pretty-printed JSON array.
pub fn export_json(tournaments: &[Tournament]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(tournaments)
}

fn require_text(record: &Value, field: &str, index: usize) -> Result<(), TournamentError> {
    match record.get(field).and_then(Value::as_str) {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(TournamentError::InvalidRecord {
            index,
            reason: format!("missing {}", field),
        }),
    }
}

/// Parse an exported JSON array. Every record needs a non-empty `id`, `name` and `game`; other
/// fields fall back to their defaults. Fails on the first bad record without returning any.
pub fn parse_import(json: &str) -> Result<Vec<Tournament>, TournamentError> {
    let value: Value = serde_json::from_str(json).map_err(|e| TournamentError::InvalidRecord {
        index: 0,
        reason: e.to_string(),
    })?;
    let Value::Array(records) = value else {
        return Err(TournamentError::InvalidRecord {
            index: 0,
            reason: "expected a JSON array of tournaments".to_string(),
        });
    };
    records
        .into_iter()
        .enumerate()
        .map(|(index, record)| {
            for field in ["id", "name", "game"] {
                require_text(&record, field, index)?;
            }
            serde_json::from_value(record).map_err(|e| TournamentError::InvalidRecord {
                index,
                reason: e.to_string(),
            })
        })
        .collect()
}

/// Write imported records into the store, replacing any record with the same id.
pub fn merge_into(store: &dyn TournamentStore, records: &[Tournament]) -> Result<usize, StoreError> {
    for t in records {
        store.put(t)?;
    }
    log::info!("Imported {} tournament(s)", records.len());
    Ok(records.len())
}

/// Participant names from CSV: the first column of each row, blanks skipped, an optional `name`
/// header row ignored.
pub fn parse_roster_csv(data: &[u8]) -> Result<Vec<String>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);
    let mut names = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let Some(name) = record.get(0).filter(|n| !n.is_empty()) else {
            continue;
        };
        if i == 0 && name.eq_ignore_ascii_case("name") {
            continue;
        }
        names.push(name.to_string());
    }
    Ok(names)
}
