//! Punch sheet import (CSV exports from the clock software).

use crate::error::{AppError, Result};
use crate::models::punch::RawPunch;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// One imported batch of punches for a single calendar date.
#[derive(Debug, Clone)]
pub struct PunchBatch {
    pub date: NaiveDate,
    pub punches: Vec<RawPunch>,
    /// Rows dropped for unparsable timestamps or unreadable content.
    pub dropped: usize,
}

/// Extract the batch date from a `DDMMYYYY` filename pattern,
/// e.g. `12052025.csv` is 2025-05-12.
pub fn date_from_filename(name: &str) -> Option<NaiveDate> {
    let bytes = name.as_bytes();
    for start in 0..bytes.len().saturating_sub(7) {
        let window = &bytes[start..start + 8];
        if !window.iter().all(u8::is_ascii_digit) {
            continue;
        }
        let digits = std::str::from_utf8(window).ok()?;
        let day: u32 = digits[0..2].parse().ok()?;
        let month: u32 = digits[2..4].parse().ok()?;
        let year: i32 = digits[4..8].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }
    None
}

/// Read a punch sheet from a file.
pub fn read_punch_file(path: &Path, date: NaiveDate) -> Result<PunchBatch> {
    let reader = csv::Reader::from_path(path)?;
    read_punches(reader, date)
}

/// Read a punch sheet from any reader.
///
/// Expected columns: `AC.No.` (or `AC No`/`AC.No`), `Name`, `Time`, and
/// optionally `Exception` and `Operation`. Rows without a time are
/// skipped; rows whose time cannot be parsed are dropped with a warning.
/// A malformed row never aborts the batch.
pub fn read_punches<R: Read>(mut reader: csv::Reader<R>, date: NaiveDate) -> Result<PunchBatch> {
    let headers = reader.headers()?.clone();
    let column = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.trim().eq_ignore_ascii_case(n)))
    };

    let time_idx = column(&["Time"])
        .ok_or_else(|| AppError::parse("punch sheet has no Time column"))?;
    let acno_idx = column(&["AC.No.", "AC No", "AC.No"]);
    let name_idx = column(&["Name"]);
    let exception_idx = column(&["Exception"]);
    let operation_idx = column(&["Operation"]);

    let mut punches = Vec::new();
    let mut dropped = 0usize;

    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping unreadable row: {e}");
                dropped += 1;
                continue;
            }
        };

        let time_raw = row.get(time_idx).unwrap_or("").trim();
        if time_raw.is_empty() {
            continue;
        }

        let Some(timestamp) = parse_punch_timestamp(time_raw, date) else {
            warn!("Dropping punch with unparsable time: {time_raw}");
            dropped += 1;
            continue;
        };

        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
        };

        punches.push(RawPunch {
            employee_no: cell(acno_idx).unwrap_or("").to_string(),
            employee_name: cell(name_idx).unwrap_or("").to_string(),
            timestamp,
            exception: cell(exception_idx).map(String::from),
            operation: cell(operation_idx).map(String::from),
        });
    }

    Ok(PunchBatch {
        date,
        punches,
        dropped,
    })
}

/// Parse a punch time cell against the batch date.
///
/// Accepts full timestamps (`MM/DD/YYYY HH:MM:SS` or ISO) and bare
/// times, which are anchored to the batch date.
fn parse_punch_timestamp(raw: &str, date: NaiveDate) -> Option<NaiveDateTime> {
    const DATETIME_FORMATS: [&str; 4] = [
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt);
        }
    }

    const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];
    for format in TIME_FORMATS {
        if let Ok(time) = NaiveTime::parse_from_str(raw, format) {
            return Some(date.and_time(time));
        }
    }

    None
}
