use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RollingError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API returned {status} for {url}")]
    Api { status: u16, url: String },

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Anyhow error: {0}")]
    Anyhow(String),
}

impl RollingError {
    /// True for anything that came back from (or never reached) the backend.
    pub fn is_remote(&self) -> bool {
        matches!(self, RollingError::Http(_) | RollingError::Api { .. })
    }
}

impl From<reqwest::Error> for RollingError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => RollingError::Api {
                status: status.as_u16(),
                url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            },
            None => RollingError::Http(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for RollingError {
    fn from(err: serde_json::Error) -> Self {
        RollingError::Json(err.to_string())
    }
}

impl From<io::Error> for RollingError {
    fn from(err: io::Error) -> Self {
        RollingError::Io(err.to_string())
    }
}

impl From<anyhow::Error> for RollingError {
    fn from(err: anyhow::Error) -> Self {
        RollingError::Anyhow(format!("{:#}", err))
    }
}
