//! Price data access port trait.

use crate::domain::bar::DailyBar;
use crate::domain::error::DcalabError;
use chrono::NaiveDate;

pub trait DataPort {
    /// Bars for `code` within `[start_date, end_date]`, ordered by date.
    fn fetch_bars(
        &self,
        code: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyBar>, DcalabError>;

    fn list_symbols(&self) -> Result<Vec<String>, DcalabError>;

    /// First date, last date and bar count, or `None` if there is no data.
    fn get_data_range(
        &self,
        code: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, DcalabError>;
}

/// Outcome of fetching a set of codes: bars per code in request order, plus the
/// codes that could not be loaded.
#[derive(Debug, Default)]
pub struct UniverseData {
    pub bars: Vec<(String, Vec<DailyBar>)>,
    pub failed: Vec<(String, DcalabError)>,
}

/// Fetches every code, collecting failures instead of aborting. A code with
/// no bars in range is reported as `NoData`.
pub fn fetch_universe(
    port: &dyn DataPort,
    codes: &[String],
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> UniverseData {
    let mut data = UniverseData::default();

    for code in codes {
        match port.fetch_bars(code, start_date, end_date) {
            Ok(bars) if bars.is_empty() => data.failed.push((
                code.clone(),
                DcalabError::NoData { code: code.clone() },
            )),
            Ok(bars) => data.bars.push((code.clone(), bars)),
            Err(e) => data.failed.push((code.clone(), e)),
        }
    }

    data
}
