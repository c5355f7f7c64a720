//! Plain-text study summary written to stderr.

use std::fmt::Write as _;

use crate::domain::error::DcalabError;
use crate::domain::strategy::StrategyResult;
use crate::domain::study::StudyReport;
use crate::ports::report_port::ReportPort;

pub struct ConsoleReportAdapter;

impl ReportPort for ConsoleReportAdapter {
    fn write(&self, report: &StudyReport) -> Result<(), DcalabError> {
        eprint!("{}", format_report(report));
        Ok(())
    }
}

fn push_strategy(out: &mut String, label: &str, result: &StrategyResult) {
    let _ = writeln!(out, "  {:<14}${:.2}  ({:.2}%)", label, result.final_value, result.gain_pct);
}

/// Renders one report. Money and percentages are shown with two decimals.
pub fn format_report(report: &StudyReport) -> String {
    let mut out = String::new();
    let summary = &report.summary;

    let _ = writeln!(out, "\n=== {} ({} bars) ===", report.code, report.bar_count);
    let _ = writeln!(out, "Start price:      ${:.2}", summary.start_price);
    let _ = writeln!(out, "End price:        ${:.2}", summary.end_price);
    let _ = writeln!(out, "Period return:    {:.2}%", summary.period_return_pct);
    let _ = writeln!(out, "Total invested:   ${:.2}", report.total_investment);
    let _ = writeln!(
        out,
        "Deposits:         {} x ${:.2} = ${:.2}",
        report.dca.deposit_count,
        report.dca.deposit,
        report.dca.total_deposited
    );

    let _ = writeln!(out, "\nFinal capital:");
    push_strategy(&mut out, "Buy & hold", &report.buy_and_hold);
    push_strategy(&mut out, "DCA", &report.dca.result);
    push_strategy(&mut out, "TA", &report.trend.ta);
    push_strategy(&mut out, "DCA + TA", &report.trend.dca_ta);

    let _ = writeln!(
        out,
        "\nTrend entries:    {} ({} days in market)",
        report.trend.entry_count(),
        report.trend.days_in_market()
    );

    out
}
