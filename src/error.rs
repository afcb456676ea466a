use serde::Serialize;

/// Errors produced while building a playlist for a user.
///
/// Every variant is scoped to the current request; none of them is fatal to
/// the process. The variant is preserved up to the HTTP layer, which renders
/// it with [`Error::kind`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Upstream data missing, malformed or empty.
    #[error("{0}")]
    Data(String),

    /// Unknown activity, missing formula or invalid configuration value.
    #[error("{0}")]
    Config(String),

    /// The bounded popular-seed search did not find a unique artist/genre pair.
    #[error("no unique popular seed found after {attempts} attempts")]
    ExhaustedSeedSearch { attempts: u32 },

    /// Transport failure or non-success status from the music API.
    #[error("{message}")]
    Upstream {
        status: Option<u16>,
        message: String,
        retryable: bool,
    },

    /// No session, unknown login state or expired token.
    #[error("{0}")]
    Unauthorized(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    DataError,
    ConfigError,
    ExhaustedSeedSearch,
    UpstreamError,
    Unauthorized,
}

impl Error {
    pub fn data(message: impl Into<String>) -> Self {
        Error::Data(message.into())
    }

    pub fn config(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Error::Unauthorized(message.into())
    }

    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        Error::Upstream {
            status: Some(status),
            message: message.into(),
            retryable: status == 429 || status >= 500,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Data(_) => ErrorKind::DataError,
            Error::Config(_) => ErrorKind::ConfigError,
            Error::ExhaustedSeedSearch { .. } => ErrorKind::ExhaustedSeedSearch,
            Error::Upstream { .. } => ErrorKind::UpstreamError,
            Error::Unauthorized(_) => ErrorKind::Unauthorized,
        }
    }

    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Upstream { retryable, .. } => *retryable,
            Error::ExhaustedSeedSearch { .. } => true,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            return Error::Config(format!("Invalid music API request: {}", err));
        }

        let status = err.status().map(|s| s.as_u16());
        let retryable = err.is_timeout()
            || err.is_connect()
            || status.is_some_and(|s| s == 429 || s >= 500);

        if err.is_decode() {
            return Error::Data(format!("Unexpected response from music API: {}", err));
        }

        Error::Upstream {
            status,
            message: format!("Music API request failed: {}", err),
            retryable,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Data(format!("Malformed data: {}", err))
    }
}
