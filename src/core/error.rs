use thiserror::Error;


#[derive(Error, Debug)]
pub enum ConvoReadyError {
    /// Degenerate profile corpus or out-of-range tuning values. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query text was empty after trimming. Callers must reject these before classifying.
    #[error("Query text is empty")]
    EmptyQuery,

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] ::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConvoReadyError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}


pub type Result<T> = std::result::Result<T, ConvoReadyError>;
