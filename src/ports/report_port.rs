//! Report output port trait.

use crate::domain::error::DcalabError;
use crate::domain::study::StudyReport;

/// Port for presenting study results.
pub trait ReportPort {
    fn write(&self, report: &StudyReport) -> Result<(), DcalabError>;

    /// Default implementation: writes each report in turn.
    fn write_all(&self, reports: &[StudyReport]) -> Result<(), DcalabError> {
        for report in reports {
            self.write(report)?;
        }
        Ok(())
    }
}
