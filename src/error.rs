use crate::librenms::types::ApiCall;
use derive_more::Display;
use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

/// Defines the application's custom error types.
///
#[derive(Debug, Error)]
pub enum Error {
    #[error("LibreNMS API error: {0} `{1}` failed: status {2}, body: {3}")]
    Request(ApiCall, String, StatusCode, String),
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Header convert error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Environment error: {0}")]
    Environment(#[from] dotenv::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Failed to set logger: {0}")]
    Logger(#[from] tracing_log::log::SetLoggerError),
    #[error("Telemetry error: {0}")]
    Telemetry(#[from] tracing::dispatcher::SetGlobalDefaultError),
}

impl Error {
    /// Returns the coarse category of the error, reported to the host next to
    /// the message so failures can be told apart without parsing text.
    ///
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Request(..) => ErrorKind::Request,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Parse(_) => ErrorKind::Parse,
            Error::Header(_) | Error::Environment(_) | Error::Config(_) => ErrorKind::Config,
            Error::Logger(_) | Error::Telemetry(_) => ErrorKind::Internal,
        }
    }
}

/// Represents the categories of failures surfaced to the orchestration host.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Request,
    Transport,
    Parse,
    Config,
    Internal,
}
