//! Domain error types.

/// Top-level error type for dcalab.
#[derive(Debug, thiserror::Error)]
pub enum DcalabError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("insufficient history: have {bars} bars, need {minimum}")]
    InsufficientHistory { bars: usize, minimum: usize },

    #[error("declared total investment {declared} does not match scheduled deposits {deposited}")]
    InvestmentMismatch { declared: f64, deposited: f64 },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price data error: {reason}")]
    Data { reason: String },

    #[error("no data for {code}")]
    NoData { code: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DcalabError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        DcalabError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<&DcalabError> for std::process::ExitCode {
    fn from(err: &DcalabError) -> Self {
        let code: u8 = match err {
            DcalabError::Io(_) => 1,
            DcalabError::ConfigParse { .. }
            | DcalabError::ConfigMissing { .. }
            | DcalabError::ConfigInvalid { .. } => 2,
            DcalabError::Data { .. } => 3,
            DcalabError::InvalidInput { .. } | DcalabError::InvestmentMismatch { .. } => 4,
            DcalabError::NoData { .. } | DcalabError::InsufficientHistory { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
