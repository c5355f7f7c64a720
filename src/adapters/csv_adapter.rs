//! CSV file price data adapter.
//!
//! One file per instrument, `<base_path>/<CODE>.csv`, with a header row.
//! Columns are located by name (case-insensitive): `date`, `open`, `close`.
//! Any other columns are ignored.

use crate::domain::bar::DailyBar;
use crate::domain::error::DcalabError;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

struct Columns {
    date: usize,
    open: usize,
    close: usize,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// `<base_path>/<code>.csv`. Codes arrive uppercased, so when that file
    /// is absent a file whose stem matches ignoring ASCII case is used instead.
    fn csv_path(&self, code: &str) -> PathBuf {
        let exact = self.base_path.join(format!("{}.csv", code));
        if exact.exists() {
            return exact;
        }

        fs::read_dir(&self.base_path)
            .into_iter()
            .flatten()
            .flatten()
            .map(|entry| entry.path())
            .find(|path| {
                path.extension().is_some_and(|ext| ext == "csv")
                    && path
                        .file_stem()
                        .and_then(|stem| stem.to_str())
                        .is_some_and(|stem| stem.eq_ignore_ascii_case(code))
            })
            .unwrap_or(exact)
    }

    fn read_all(&self, code: &str) -> Result<Vec<DailyBar>, DcalabError> {
        let path = self.csv_path(code);
        let content = fs::read_to_string(&path).map_err(|e| DcalabError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| DcalabError::Data {
            reason: format!("CSV header error in {}: {}", path.display(), e),
        })?;
        let columns = locate_columns(headers)?;

        let mut bars = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| DcalabError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = field(&record, columns.date, "date")?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                DcalabError::Data {
                    reason: format!("invalid date format: {}", e),
                }
            })?;
            let open = parse_price(&record, columns.open, "open")?;
            let close = parse_price(&record, columns.close, "close")?;

            bars.push(DailyBar { date, open, close });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn locate_columns(headers: &csv::StringRecord) -> Result<Columns, DcalabError> {
    let find = |name: &str| {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
            .ok_or_else(|| DcalabError::Data {
                reason: format!("missing {} column", name),
            })
    };
    Ok(Columns {
        date: find("date")?,
        open: find("open")?,
        close: find("close")?,
    })
}

fn field<'a>(
    record: &'a csv::StringRecord,
    index: usize,
    name: &str,
) -> Result<&'a str, DcalabError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| DcalabError::Data {
            reason: format!("missing {} value", name),
        })
}

fn parse_price(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, DcalabError> {
    field(record, index, name)?
        .parse()
        .map_err(|e| DcalabError::Data {
            reason: format!("invalid {} value: {}", name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyBar>, DcalabError> {
        let mut bars = self.read_all(code)?;
        bars.retain(|b| b.date >= start_date && b.date <= end_date);
        Ok(bars)
    }

    fn list_symbols(&self) -> Result<Vec<String>, DcalabError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| DcalabError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| DcalabError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(code) = name_str.strip_suffix(".csv") {
                symbols.push(code.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DcalabError> {
        if !self.csv_path(code).exists() {
            return Ok(None);
        }
        let bars = self.read_all(code)?;
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
