//! # Colectivos Errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a vehicle position fetch can fail.
///
/// Every variant is recovered from by substituting the fallback dataset, so
/// these never reach the end user. They exist for logging.
#[derive(Error, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Error {
    #[error("code: transport_error, description: {0}")]
    Transport(String),

    #[error("code: bad_status, description: upstream returned {0}")]
    BadStatus(u16),

    #[error("code: timeout, description: no response after {0} ms")]
    Timeout(u64),

    #[error("code: invalid_format, description: {0}")]
    InvalidFormat(String),

    #[error("code: server_error, description: {0}")]
    ServerError(String),
}

impl Error {
    /// Returns the error code.
    #[must_use]
    pub const fn code(&self) -> &str {
        match self {
            Self::Transport(_) => "transport_error",
            Self::BadStatus(_) => "bad_status",
            Self::Timeout(_) => "timeout",
            Self::InvalidFormat(_) => "invalid_format",
            Self::ServerError(_) => "server_error",
        }
    }

    /// Returns the error description.
    #[must_use]
    pub fn description(&self) -> String {
        self.to_string()
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast_ref::<Self>() {
            Some(Self::Transport(e)) => Self::Transport(format!("{err}: {e}")),
            Some(Self::InvalidFormat(e)) => Self::InvalidFormat(format!("{err}: {e}")),
            Some(Self::ServerError(e)) => Self::ServerError(format!("{err}: {e}")),
            Some(Self::BadStatus(status)) => Self::BadStatus(*status),
            Some(Self::Timeout(millis)) => Self::Timeout(*millis),
            None => {
                let stack = err.chain().fold(String::new(), |cause, e| format!("{cause} -> {e}"));
                let stack = stack.trim_start_matches(" -> ").to_string();
                Self::ServerError(stack)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFormat(format!("failed to deserialize vehicle positions: {err}"))
    }
}

#[cfg(test)]
mod test {
    use anyhow::{Context, Result, anyhow};
    use serde_json::Value;

    use super::*;

    #[test]
    fn transport_context() {
        let result = Err::<(), Error>(Error::Transport("connection refused".to_string()))
            .context("fetching vehicle positions");
        let err: Error = result.unwrap_err().into();

        assert_eq!(
            err.to_string(),
            "code: transport_error, description: fetching vehicle positions: connection refused"
        );
    }

    #[test]
    fn timeout_keeps_variant() {
        let result = Err::<(), Error>(Error::Timeout(10_000)).context("fetching");
        let err: Error = result.unwrap_err().into();

        assert_eq!(err, Error::Timeout(10_000));
        assert_eq!(err.code(), "timeout");
    }

    #[test]
    fn anyhow_context() {
        let result = Err::<(), anyhow::Error>(anyhow!("one-off error")).context("error context");
        let err: Error = result.unwrap_err().into();

        assert_eq!(
            err.to_string(),
            "code: server_error, description: error context -> one-off error"
        );
    }

    #[test]
    fn serde_error() {
        let result: Result<Value, serde_json::Error> = serde_json::from_str(r#"[{"id": 1"#);
        let err: Error = result.unwrap_err().into();

        assert_eq!(err.code(), "invalid_format");
        assert!(err.description().starts_with(
            "code: invalid_format, description: failed to deserialize vehicle positions"
        ));
    }
}
