use chrono::NaiveDate;
use rust_decimal::Decimal;
use sigwatch_core::{Bar, BarSeries};
use std::path::Path;
use std::str::FromStr;

use crate::DataError;

/// Load daily OHLCV bars from a CSV file into a validated series.
///
/// Expected columns (case-insensitive, flexible ordering):
/// `date` (or `timestamp`, `time`), `open`, `high`, `low`, `close`, `volume`
///
/// Rows are sorted by date before series construction, so an unsorted
/// file loads fine while duplicate dates still fail validation.
pub fn load_bars_from_csv(path: &Path) -> Result<BarSeries, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataError::ParseError(format!("Failed to open CSV: {}", e)))?;

    let headers = reader
        .headers()
        .map_err(|e| DataError::ParseError(format!("Failed to read headers: {}", e)))?
        .clone();

    let col_map = resolve_bar_columns(&headers)?;

    let mut bars = Vec::new();
    for result in reader.records() {
        let record =
            result.map_err(|e| DataError::ParseError(format!("CSV record error: {}", e)))?;

        let date = parse_date(get_field(&record, col_map.date, "date")?)?;
        let open = parse_decimal(get_field(&record, col_map.open, "open")?, "open")?;
        let high = parse_decimal(get_field(&record, col_map.high, "high")?, "high")?;
        let low = parse_decimal(get_field(&record, col_map.low, "low")?, "low")?;
        let close = parse_decimal(get_field(&record, col_map.close, "close")?, "close")?;
        let volume = if let Some(vol_idx) = col_map.volume {
            parse_decimal(get_field(&record, vol_idx, "volume")?, "volume")?
        } else {
            Decimal::ZERO
        };

        bars.push(Bar {
            date,
            open,
            high,
            low,
            close,
            volume,
        });
    }

    bars.sort_by_key(|b| b.date);
    Ok(BarSeries::from_bars(bars)?)
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct BarColumnMap {
    date: usize,
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

fn resolve_bar_columns(headers: &csv::StringRecord) -> Result<BarColumnMap, DataError> {
    let date = find_column(headers, &["date", "timestamp", "datetime", "time"])
        .ok_or_else(|| DataError::ParseError("No date column found".into()))?;
    let open = find_column(headers, &["open", "o"])
        .ok_or_else(|| DataError::ParseError("No open column found".into()))?;
    let high = find_column(headers, &["high", "h"])
        .ok_or_else(|| DataError::ParseError("No high column found".into()))?;
    let low = find_column(headers, &["low", "l"])
        .ok_or_else(|| DataError::ParseError("No low column found".into()))?;
    let close = find_column(headers, &["close", "c"])
        .ok_or_else(|| DataError::ParseError("No close column found".into()))?;
    let volume = find_column(headers, &["volume", "vol", "v"]);

    Ok(BarColumnMap {
        date,
        open,
        high,
        low,
        close,
        volume,
    })
}

fn get_field<'a>(
    record: &'a csv::StringRecord,
    idx: usize,
    field: &str,
) -> Result<&'a str, DataError> {
    record.get(idx).ok_or_else(|| {
        DataError::ParseError(format!(
            "Row too short: missing {} field at column {}",
            field,
            idx + 1
        ))
    })
}

fn find_column(headers: &csv::StringRecord, names: &[&str]) -> Option<usize> {
    for (i, header) in headers.iter().enumerate() {
        let h = header.trim().to_lowercase();
        for name in names {
            if h == *name {
                return Some(i);
            }
        }
    }
    None
}

fn parse_decimal(s: &str, field: &str) -> Result<Decimal, DataError> {
    Decimal::from_str(s.trim())
        .map_err(|e| DataError::ParseError(format!("Failed to parse {} '{}': {}", field, s, e)))
}

fn parse_date(s: &str) -> Result<NaiveDate, DataError> {
    let s = s.trim();

    let formats = ["%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y%m%d"];
    for fmt in &formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    // Datetime strings from intraday-capable exports; keep the date part
    for fmt in &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.date());
        }
    }

    Err(DataError::ParseError(format!(
        "Unable to parse date: '{}'",
        s
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("sigwatch_csv_{}_{}.csv", std::process::id(), name));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_basic_csv() {
        let path = write_temp("basic",
            "date,open,high,low,close,volume\n\
             2024-01-02,100,102,99,101,5000\n\
             2024-01-03,101,103,100,102,6000\n",
        );
        let series = load_bars_from_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(series.len(), 2);
        assert_eq!(series.latest().unwrap().close, dec!(102));
    }

    #[test]
    fn test_load_sorts_unordered_rows() {
        let path = write_temp("unordered",
            "date,open,high,low,close,volume\n\
             2024-01-03,101,103,100,102,6000\n\
             2024-01-02,100,102,99,101,5000\n",
        );
        let series = load_bars_from_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(series.as_slice()[0].date.to_string(), "2024-01-02");
    }

    #[test]
    fn test_load_resolves_alternate_headers() {
        let path = write_temp("headers",
            "Timestamp,O,H,L,C,Vol\n\
             2024-01-02,100,102,99,101,5000\n",
        );
        let series = load_bars_from_csv(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(series.len(), 1);
    }

    #[test]
    fn test_load_rejects_missing_close_column() {
        let path = write_temp("no_close", "date,open,high,low,volume\n2024-01-02,100,102,99,5000\n");
        let result = load_bars_from_csv(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(DataError::ParseError(_))));
    }

    #[test]
    fn test_load_rejects_bad_price() {
        let path = write_temp("bad_price",
            "date,open,high,low,close,volume\n\
             2024-01-02,100,102,99,abc,5000\n",
        );
        let result = load_bars_from_csv(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(DataError::ParseError(_))));
    }

    #[test]
    fn test_load_rejects_ragged_row() {
        // flexible reader accepts short rows; field access must error,
        // not panic
        let path = write_temp("ragged",
            "date,open,high,low,close,volume\n\
             2024-01-02,100,102\n",
        );
        let result = load_bars_from_csv(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(DataError::ParseError(_))));
    }

    #[test]
    fn test_load_rejects_duplicate_dates() {
        let path = write_temp("dup_dates",
            "date,open,high,low,close,volume\n\
             2024-01-02,100,102,99,101,5000\n\
             2024-01-02,101,103,100,102,6000\n",
        );
        let result = load_bars_from_csv(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(DataError::Invalid(_))));
    }
}
