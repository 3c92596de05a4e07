//! CSV ingestion for scraped occupancy data.
//!
//! Expects a header row with a `Timestamp` column and a `percent_filled`
//! column. Headers and cells are trimmed, so `" percent_filled"` resolves the
//! same as `"percent_filled"`.

use crate::occupancy::RawReading;
use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::debug;

const TIMESTAMP_COLUMNS: &[&str] = &["Timestamp", "timestamp"];
const PERCENT_COLUMNS: &[&str] = &["percent_filled"];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("CSV has no `{0}` column")]
    MissingColumn(&'static str),
    #[error("No valid data found in CSV")]
    NoValidData,
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Parses CSV bytes into readings.
///
/// Rows with an empty timestamp or a percentage that is not a finite number
/// are skipped, as are rows whose timestamp or percentage is not valid
/// UTF-8. Timestamps are kept as strings; they are validated during
/// aggregation.
///
/// An empty percentage cell drops the row rather than counting as `0`, so
/// the endpoint differs from the original web route on that point.
///
/// # Errors
///
/// Returns [`IngestError::MissingColumn`] if a required header is absent and
/// [`IngestError::NoValidData`] if no row survives.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<RawReading>, IngestError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(bytes);

    let headers = rdr.headers()?.clone();
    let ts_idx =
        find_column(&headers, TIMESTAMP_COLUMNS).ok_or(IngestError::MissingColumn("Timestamp"))?;
    let pct_idx = find_column(&headers, PERCENT_COLUMNS)
        .ok_or(IngestError::MissingColumn("percent_filled"))?;

    let mut readings = Vec::new();
    let mut dropped = 0usize;

    for record in rdr.byte_records() {
        let record = record?;
        let timestamp = record
            .get(ts_idx)
            .and_then(|v| std::str::from_utf8(v).ok())
            .unwrap_or_default();
        let percent = record
            .get(pct_idx)
            .and_then(|v| std::str::from_utf8(v).ok())
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite());

        match percent {
            Some(p) if !timestamp.is_empty() => readings.push(RawReading::new(timestamp, p)),
            _ => dropped += 1,
        }
    }

    debug!(kept = readings.len(), dropped, "CSV rows ingested");

    if readings.is_empty() {
        return Err(IngestError::NoValidData);
    }

    Ok(readings)
}

fn find_column(headers: &StringRecord, names: &[&str]) -> Option<usize> {
    headers
        .iter()
        .position(|h| names.iter().any(|n| h.trim() == *n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_with_leading_space() {
        let csv = b"Timestamp, percent_filled\n2025-09-08 09:00:00, 0.42\n";
        let readings = parse_csv(csv).unwrap();

        assert_eq!(readings, vec![RawReading::new("2025-09-08 09:00:00", 0.42)]);
    }

    #[test]
    fn test_lowercase_timestamp_and_column_order() {
        let csv = b"percent_filled,timestamp\n0.5,2025-09-08 10:00:00\n";
        let readings = parse_csv(csv).unwrap();

        assert_eq!(readings[0].timestamp, "2025-09-08 10:00:00");
        assert_eq!(readings[0].percent_filled, 0.5);
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let csv = b"Timestamp,percent_filled\n\
            2025-09-08 09:00:00,0.1\n\
            2025-09-08 09:15:00,\n\
            ,0.3\n\
            2025-09-08 09:30:00,abc\n\
            2025-09-08 09:45:00,NaN\n\
            \n\
            2025-09-08 10:00:00,0.5\n";
        let readings = parse_csv(csv).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].percent_filled, 0.5);
    }

    #[test]
    fn test_invalid_utf8_row_is_skipped() {
        let csv = b"Timestamp,percent_filled\n\
            2025-09-08 09:00:00,0.5\n\
            2025-09-08 09:15:00,0.6\xff\n\
            2025-09-08 09:30:00,0.7\n";
        let readings = parse_csv(csv).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].timestamp, "2025-09-08 09:30:00");
    }

    #[test]
    fn test_unparseable_timestamp_is_left_for_aggregation() {
        let csv = b"Timestamp,percent_filled\nyesterday,0.1\n";
        let readings = parse_csv(csv).unwrap();

        assert_eq!(readings[0].timestamp, "yesterday");
    }

    #[test]
    fn test_no_valid_rows() {
        let csv = b"Timestamp,percent_filled\n2025-09-08 09:00:00,\n";
        assert!(matches!(parse_csv(csv), Err(IngestError::NoValidData)));

        let header_only = b"Timestamp,percent_filled\n";
        assert!(matches!(parse_csv(header_only), Err(IngestError::NoValidData)));
    }

    #[test]
    fn test_missing_columns() {
        let csv = b"time,percent_filled\n2025-09-08 09:00:00,0.2\n";
        assert!(matches!(
            parse_csv(csv),
            Err(IngestError::MissingColumn("Timestamp"))
        ));

        let csv = b"Timestamp,fill\n2025-09-08 09:00:00,0.2\n";
        assert!(matches!(
            parse_csv(csv),
            Err(IngestError::MissingColumn("percent_filled"))
        ));
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            IngestError::NoValidData.to_string(),
            "No valid data found in CSV"
        );
    }
}
