//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::console_report_adapter::ConsoleReportAdapter;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{parse_date, unknown_keys, validate_study_config};
use crate::domain::error::DcalabError;
use crate::domain::schedule::DEFAULT_DEPOSIT_PERIOD;
use crate::domain::study::{StudyConfig, StudyReport, run_study};
use crate::domain::trend::{
    DEFAULT_FAST_WINDOW, DEFAULT_SLOW_WINDOW, DEFAULT_SPREAD_COST, TrendConfig,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::{DataPort, fetch_universe};
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(
    name = "dcalab",
    about = "Buy-and-hold, DCA and trend-following backtests"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run all strategies for the configured codes
    Run {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
    /// Validate a study configuration
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show data range for code(s)
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        code: Option<String>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            code,
            data_dir,
        } => run_study_command(&config, code.as_deref(), data_dir.as_deref()),
        Command::Validate { config } => run_validate(&config),
        Command::Info {
            config,
            code,
            data_dir,
        } => run_info(&config, code.as_deref(), data_dir.as_deref()),
    }
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

/// Loads and validates a config file, warning about keys nothing reads.
fn load_validated(path: &Path) -> Result<FileConfigAdapter, ExitCode> {
    eprintln!("Loading config from {}", path.display());
    let adapter = load_config(path)?;

    if let Err(e) = validate_study_config(&adapter) {
        eprintln!("error: {e}");
        return Err((&e).into());
    }
    for (section, key) in unknown_keys(&adapter) {
        eprintln!("warning: unknown config key [{section}] {key}");
    }
    Ok(adapter)
}

fn run_study_command(
    config_path: &Path,
    code_override: Option<&str>,
    data_dir_override: Option<&Path>,
) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let study_config = match build_study_config(&adapter) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let codes = resolve_codes(code_override, &adapter);
    if codes.is_empty() {
        eprintln!("error: no codes configured");
        return ExitCode::from(2);
    }

    let data_port = CsvAdapter::new(resolve_data_dir(data_dir_override, &adapter));
    run_study_pipeline(&data_port, &ConsoleReportAdapter, &study_config, &codes)
}

pub fn build_study_config(adapter: &dyn ConfigPort) -> Result<StudyConfig, DcalabError> {
    let start_date = parse_date(
        adapter.get_string("study", "start_date").as_deref(),
        "start_date",
    )?;
    let end_date = parse_date(
        adapter.get_string("study", "end_date").as_deref(),
        "end_date",
    )?;

    let deposit = adapter.get_double("study", "deposit", 0.0)?;
    let deposit_period = usize::try_from(adapter.get_int(
        "study",
        "deposit_period",
        DEFAULT_DEPOSIT_PERIOD as i64,
    )?)
    .map_err(|_| DcalabError::ConfigInvalid {
        section: "study".into(),
        key: "deposit_period".into(),
        reason: "deposit_period must be at least 1".into(),
    })?;

    let total_investment = adapter
        .get_string("study", "total_investment")
        .map(|_| adapter.get_double("study", "total_investment", 0.0))
        .transpose()?;

    Ok(StudyConfig {
        start_date,
        end_date,
        deposit,
        deposit_period,
        total_investment,
        trend: build_trend_config(adapter)?,
    })
}

pub fn build_trend_config(adapter: &dyn ConfigPort) -> Result<TrendConfig, DcalabError> {
    let window = |key: &str, default: usize| {
        let value = adapter.get_int("trend", key, default as i64)?;
        usize::try_from(value).map_err(|_| DcalabError::ConfigInvalid {
            section: "trend".into(),
            key: key.into(),
            reason: format!("{key} must be at least 1"),
        })
    };

    Ok(TrendConfig {
        fast_window: window("fast_window", DEFAULT_FAST_WINDOW)?,
        slow_window: window("slow_window", DEFAULT_SLOW_WINDOW)?,
        spread_cost: adapter.get_double("trend", "spread_cost", DEFAULT_SPREAD_COST)?,
        require_full_history: adapter.get_bool("trend", "require_full_history", false)?,
    })
}

/// Runs the study and hands the reports to `report_port`.
pub fn run_study_pipeline(
    data_port: &dyn DataPort,
    report_port: &dyn ReportPort,
    config: &StudyConfig,
    codes: &[String],
) -> ExitCode {
    let reports = match execute_study(data_port, config, codes) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: no codes could be analysed ({e})");
            return (&e).into();
        }
    };

    match report_port.write_all(&reports) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

/// Fetches and analyses each code. Codes that cannot be loaded or analysed
/// are skipped with a warning; the last failure is returned if none succeed.
pub fn execute_study(
    data_port: &dyn DataPort,
    config: &StudyConfig,
    codes: &[String],
) -> Result<Vec<StudyReport>, DcalabError> {
    eprintln!(
        "Fetching {} codes, {} to {}",
        codes.len(),
        config.start_date,
        config.end_date
    );
    let universe = fetch_universe(data_port, codes, config.start_date, config.end_date);

    let mut last_error = None;
    for (code, e) in universe.failed {
        eprintln!("warning: skipping {} ({})", code, e);
        last_error = Some(e);
    }

    let mut reports = Vec::with_capacity(universe.bars.len());
    for (code, bars) in &universe.bars {
        if !config.trend.has_full_history(bars.len()) && !config.trend.require_full_history {
            eprintln!(
                "warning: {} has {} bars, trend signals need {}; early bars stay out of the market",
                code,
                bars.len(),
                config.trend.slow_window
            );
        }

        match run_study(code, bars, config) {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("warning: skipping {} ({})", code, e);
                last_error = Some(e);
            }
        }
    }

    if reports.is_empty() {
        return Err(last_error.unwrap_or_else(|| DcalabError::NoData {
            code: codes.join(","),
        }));
    }
    Ok(reports)
}

fn run_validate(config_path: &Path) -> ExitCode {
    let adapter = match load_validated(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    match build_study_config(&adapter) {
        Ok(config) => {
            let codes = resolve_codes(None, &adapter);
            eprintln!("\nCodes:            {}", codes.join(", "));
            eprintln!("Period:           {} to {}", config.start_date, config.end_date);
            eprintln!(
                "Deposit:          ${:.2} every {} sessions",
                config.deposit, config.deposit_period
            );
            match config.total_investment {
                Some(total) => eprintln!("Total investment: ${:.2}", total),
                None => eprintln!("Total investment: derived from schedule"),
            }
            eprintln!(
                "Trend:            SMA({}) / SMA({}), spread {}",
                config.trend.fast_window, config.trend.slow_window, config.trend.spread_cost
            );
            eprintln!("\nConfiguration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_info(config_path: &Path, code: Option<&str>, data_dir: Option<&Path>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = CsvAdapter::new(resolve_data_dir(data_dir, &config));
    let codes = match resolve_info_codes(code, &config, &adapter) {
        Ok(c) if !c.is_empty() => c,
        Ok(_) => {
            eprintln!("error: no codes configured and no CSV files found");
            return ExitCode::from(5);
        }
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    print_data_ranges(&adapter, &codes);
    ExitCode::SUCCESS
}

/// Configured codes, or every symbol the data port knows when none are set.
pub fn resolve_info_codes(
    code_override: Option<&str>,
    config: &dyn ConfigPort,
    data_port: &dyn DataPort,
) -> Result<Vec<String>, DcalabError> {
    let codes = resolve_codes(code_override, config);
    if !codes.is_empty() {
        return Ok(codes);
    }
    eprintln!("No codes configured, listing all available symbols");
    data_port.list_symbols()
}

pub fn print_data_ranges(data_port: &dyn DataPort, codes: &[String]) {
    for c in codes {
        match data_port.get_data_range(c) {
            Ok(Some((min_date, max_date, count))) => {
                println!("{}: {} bars, {} to {}", c, count, min_date, max_date);
            }
            Ok(None) => {
                eprintln!("{}: no data found", c);
            }
            Err(e) => {
                eprintln!("error querying {}: {}", c, e);
            }
        }
    }
}

pub fn resolve_codes(code_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    if let Some(c) = code_override {
        return vec![c.trim().to_uppercase()];
    }

    if let Some(codes_str) = config.get_string("study", "codes") {
        let mut codes: Vec<String> = Vec::new();
        for code in codes_str.split(',').map(|s| s.trim().to_uppercase()) {
            if !code.is_empty() && !codes.contains(&code) {
                codes.push(code);
            }
        }
        if !codes.is_empty() {
            return codes;
        }
    }

    if let Some(code) = config.get_string("study", "code") {
        let code = code.trim().to_uppercase();
        if !code.is_empty() {
            return vec![code];
        }
    }

    vec![]
}

pub fn resolve_data_dir(data_dir_override: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    data_dir_override
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("study", "data_dir").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("data"))
}
