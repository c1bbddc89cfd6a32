use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
    #[error("unknown strategy: {0:?}")]
    UnknownStrategy(String),
    #[error("memory limit {limit} bytes must exceed the reserve of {reserve} bytes")]
    LimitBelowReserve { limit: u64, reserve: u64 },
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed {path}: {content:?}")]
    Parse { path: &'static str, content: String },
}
