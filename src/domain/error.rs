//! Domain error types.

/// Top-level error type for smarttrade.
#[derive(Debug, thiserror::Error)]
pub enum SmartTradeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("holdings error: {reason}")]
    HoldingsParse { reason: String },

    #[error("unknown symbol {symbol}")]
    UnknownSymbol { symbol: String },

    #[error("invalid strategy for {symbol}: {reason}")]
    InvalidStrategy { symbol: String, reason: String },

    #[error("an active strategy already exists for {symbol}")]
    DuplicateStrategy { symbol: String },

    #[error("no active strategy for {symbol}")]
    NoActiveStrategy { symbol: String },

    #[error("strategy for {symbol} is {status} and cannot change state")]
    RuleTransition { symbol: String, status: String },

    #[error("oracle error: {reason}")]
    Oracle { reason: String },

    #[error("prompt is empty")]
    EmptyPrompt,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&SmartTradeError> for std::process::ExitCode {
    fn from(err: &SmartTradeError) -> Self {
        let code: u8 = match err {
            SmartTradeError::Io(_) => 1,
            SmartTradeError::ConfigParse { .. } | SmartTradeError::ConfigInvalid { .. } => 2,
            SmartTradeError::HoldingsParse { .. } | SmartTradeError::UnknownSymbol { .. } => 3,
            SmartTradeError::InvalidStrategy { .. }
            | SmartTradeError::DuplicateStrategy { .. }
            | SmartTradeError::NoActiveStrategy { .. }
            | SmartTradeError::RuleTransition { .. } => 4,
            SmartTradeError::Oracle { .. } | SmartTradeError::EmptyPrompt => 5,
        };
        std::process::ExitCode::from(code)
    }
}
