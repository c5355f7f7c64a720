//! Configuration validation.
//!
//! Validates all config fields before a study runs.

use crate::domain::error::DcalabError;
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

const STUDY_KEYS: &[&str] = &[
    "code",
    "codes",
    "start_date",
    "end_date",
    "data_dir",
    "deposit",
    "deposit_period",
    "total_investment",
];
const TREND_KEYS: &[&str] = &[
    "fast_window",
    "slow_window",
    "spread_cost",
    "require_full_history",
];

pub fn validate_study_config(config: &dyn ConfigPort) -> Result<(), DcalabError> {
    validate_dates(config)?;
    validate_codes(config)?;
    validate_deposit(config)?;
    validate_deposit_period(config)?;
    validate_total_investment(config)?;
    validate_trend_config(config)?;
    Ok(())
}

pub fn validate_trend_config(config: &dyn ConfigPort) -> Result<(), DcalabError> {
    let fast = config.get_int("trend", "fast_window", 100)?;
    let slow = config.get_int("trend", "slow_window", 200)?;
    if fast < 1 {
        return Err(invalid("trend", "fast_window", "fast_window must be at least 1"));
    }
    if slow <= fast {
        return Err(invalid(
            "trend",
            "slow_window",
            "slow_window must be greater than fast_window",
        ));
    }

    let spread = config.get_double("trend", "spread_cost", 0.005)?;
    if !(0.0..1.0).contains(&spread) {
        return Err(invalid(
            "trend",
            "spread_cost",
            "spread_cost must be between 0 and 1",
        ));
    }
    config.get_bool("trend", "require_full_history", false)?;
    Ok(())
}

/// `(section, key)` pairs that no part of dcalab reads, usually typos.
pub fn unknown_keys(config: &dyn ConfigPort) -> Vec<(String, String)> {
    [("study", STUDY_KEYS), ("trend", TREND_KEYS)]
        .iter()
        .flat_map(|(section, known)| {
            config
                .section_keys(section)
                .into_iter()
                .filter(|key| !known.contains(&key.as_str()))
                .map(|key| (section.to_string(), key))
                .collect::<Vec<_>>()
        })
        .collect()
}

fn invalid(section: &str, key: &str, reason: &str) -> DcalabError {
    DcalabError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_dates(config: &dyn ConfigPort) -> Result<(), DcalabError> {
    let start_str = config.get_string("study", "start_date");
    let end_str = config.get_string("study", "end_date");

    let start_date = parse_date(start_str.as_deref(), "start_date")?;
    let end_date = parse_date(end_str.as_deref(), "end_date")?;

    if start_date >= end_date {
        return Err(invalid(
            "study",
            "start_date",
            "start_date must be before end_date",
        ));
    }
    Ok(())
}

pub(crate) fn parse_date(value: Option<&str>, field: &str) -> Result<NaiveDate, DcalabError> {
    match value {
        None => Err(DcalabError::ConfigMissing {
            section: "study".to_string(),
            key: field.to_string(),
        }),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            DcalabError::ConfigInvalid {
                section: "study".to_string(),
                key: field.to_string(),
                reason: format!("invalid {} format, expected YYYY-MM-DD", field),
            }
        }),
    }
}

fn validate_codes(config: &dyn ConfigPort) -> Result<(), DcalabError> {
    let codes = config.get_string("study", "codes");
    let code = config.get_string("study", "code");

    match (codes, code) {
        (Some(c), _) if !c.trim().is_empty() => Ok(()),
        (_, Some(c)) if !c.trim().is_empty() => Ok(()),
        _ => Err(DcalabError::ConfigMissing {
            section: "study".to_string(),
            key: "code".to_string(),
        }),
    }
}

fn validate_deposit(config: &dyn ConfigPort) -> Result<(), DcalabError> {
    if config.get_string("study", "deposit").is_none() {
        return Err(DcalabError::ConfigMissing {
            section: "study".to_string(),
            key: "deposit".to_string(),
        });
    }
    let value = config.get_double("study", "deposit", 0.0)?;
    if value <= 0.0 {
        return Err(invalid("study", "deposit", "deposit must be positive"));
    }
    Ok(())
}

fn validate_deposit_period(config: &dyn ConfigPort) -> Result<(), DcalabError> {
    let value = config.get_int("study", "deposit_period", 20)?;
    if value < 1 {
        return Err(invalid(
            "study",
            "deposit_period",
            "deposit_period must be at least 1",
        ));
    }
    Ok(())
}

fn validate_total_investment(config: &dyn ConfigPort) -> Result<(), DcalabError> {
    if config.get_string("study", "total_investment").is_none() {
        return Ok(());
    }
    let value = config.get_double("study", "total_investment", 0.0)?;
    if value <= 0.0 {
        return Err(invalid(
            "study",
            "total_investment",
            "total_investment must be positive",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn make_config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    const VALID: &str = r#"
[study]
codes = SPY,QQQ
start_date = 2018-01-01
end_date = 2023-01-01
deposit = 100
deposit_period = 20
total_investment = 6300

[trend]
fast_window = 100
slow_window = 200
spread_cost = 0.005
"#;

    fn with_replacement(from: &str, to: &str) -> FileConfigAdapter {
        make_config(&VALID.replace(from, to))
    }

    #[test]
    fn valid_config_passes() {
        assert!(validate_study_config(&make_config(VALID)).is_ok());
    }

    #[test]
    fn minimal_config_passes() {
        let config = make_config(
            "[study]\ncode = SPY\nstart_date = 2020-01-01\nend_date = 2021-01-01\ndeposit = 50\n",
        );
        assert!(validate_study_config(&config).is_ok());
    }

    #[test]
    fn missing_start_date() {
        let err = validate_study_config(&with_replacement("start_date = 2018-01-01\n", ""))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigMissing { key, .. } if key == "start_date"));
    }

    #[test]
    fn invalid_date_format() {
        let err = validate_study_config(&with_replacement("2018-01-01", "2018/01/01"))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "start_date"));
    }

    #[test]
    fn start_after_end() {
        let err = validate_study_config(&with_replacement("2023-01-01", "2017-01-01"))
            .unwrap_err();
        assert!(err.to_string().contains("start_date must be before end_date"));
    }

    #[test]
    fn missing_codes() {
        let err =
            validate_study_config(&with_replacement("codes = SPY,QQQ\n", "")).unwrap_err();
        assert!(matches!(err, DcalabError::ConfigMissing { key, .. } if key == "code"));
    }

    #[test]
    fn missing_deposit() {
        let err = validate_study_config(&with_replacement("deposit = 100\n", "")).unwrap_err();
        assert!(matches!(err, DcalabError::ConfigMissing { key, .. } if key == "deposit"));
    }

    #[test]
    fn negative_deposit() {
        let err =
            validate_study_config(&with_replacement("deposit = 100", "deposit = -1")).unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "deposit"));
    }

    #[test]
    fn zero_deposit_period() {
        let err = validate_study_config(&with_replacement("deposit_period = 20", "deposit_period = 0"))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "deposit_period"));
    }

    #[test]
    fn zero_total_investment() {
        let err = validate_study_config(&with_replacement(
            "total_investment = 6300",
            "total_investment = 0",
        ))
        .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "total_investment"));
    }

    #[test]
    fn inverted_windows() {
        let err = validate_study_config(&with_replacement("slow_window = 200", "slow_window = 50"))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "slow_window"));
    }

    #[test]
    fn spread_out_of_range() {
        let err = validate_study_config(&with_replacement("spread_cost = 0.005", "spread_cost = 1.5"))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "spread_cost"));
    }

    #[test]
    fn non_numeric_deposit_period() {
        let err = validate_study_config(&with_replacement(
            "deposit_period = 20",
            "deposit_period = monthly",
        ))
        .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "deposit_period"));
    }

    #[test]
    fn non_numeric_deposit() {
        let err = validate_study_config(&with_replacement("deposit = 100", "deposit = lots"))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "deposit"));
    }

    #[test]
    fn non_numeric_total_investment() {
        let err = validate_study_config(&with_replacement(
            "total_investment = 6300",
            "total_investment = all",
        ))
        .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "total_investment"));
    }

    #[test]
    fn non_numeric_fast_window() {
        let err = validate_study_config(&with_replacement("fast_window = 100", "fast_window = fifty"))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "fast_window"));
    }

    #[test]
    fn non_numeric_slow_window() {
        let err = validate_study_config(&with_replacement("slow_window = 200", "slow_window = 2e2"))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "slow_window"));
    }

    #[test]
    fn non_numeric_spread() {
        let err = validate_study_config(&with_replacement("spread_cost = 0.005", "spread_cost = half"))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "spread_cost"));
    }

    #[test]
    fn nan_spread_rejected() {
        let err = validate_study_config(&with_replacement("spread_cost = 0.005", "spread_cost = NaN"))
            .unwrap_err();
        assert!(matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "spread_cost"));
    }

    #[test]
    fn unparsable_full_history_flag() {
        let config = make_config(&format!("{VALID}require_full_history = maybe\n"));
        let err = validate_study_config(&config).unwrap_err();
        assert!(
            matches!(err, DcalabError::ConfigInvalid { key, .. } if key == "require_full_history")
        );
    }

    #[test]
    fn unknown_keys_are_reported() {
        let config = with_replacement("deposit_period = 20", "deposit_perod = 20");
        assert_eq!(
            unknown_keys(&config),
            vec![("study".to_string(), "deposit_perod".to_string())]
        );
        assert!(unknown_keys(&make_config(VALID)).is_empty());
    }
}
