//! Domain error types.

/// Top-level error type for stockscan.
#[derive(Debug, thiserror::Error)]
pub enum StockscanError {
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

    #[error("data source error: {reason}")]
    DataSource { reason: String },

    #[error("no data for {ticker}")]
    NoData { ticker: String },

    #[error("insufficient history for {ticker}: have {bars} bars, no indicator produced a value")]
    InsufficientHistory { ticker: String, bars: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl StockscanError {
    /// True for failures that only affect a single instrument and must not
    /// abort a batch.
    pub fn is_per_instrument(&self) -> bool {
        matches!(
            self,
            StockscanError::NoData { .. }
                | StockscanError::InsufficientHistory { .. }
                | StockscanError::DataSource { .. }
        )
    }
}

impl From<&StockscanError> for std::process::ExitCode {
    fn from(err: &StockscanError) -> Self {
        let code: u8 = match err {
            StockscanError::Io(_) => 1,
            StockscanError::ConfigParse { .. }
            | StockscanError::ConfigMissing { .. }
            | StockscanError::ConfigInvalid { .. } => 2,
            StockscanError::DataSource { .. } => 3,
            StockscanError::NoData { .. } | StockscanError::InsufficientHistory { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
