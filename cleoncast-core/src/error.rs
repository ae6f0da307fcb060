use serde::Serialize;
use thiserror::Error;

/// Which stage of a fetch went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    Transport,
    Status,
    Decode,
    Internal,
}

impl FetchErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchErrorKind::Transport => "transport",
            FetchErrorKind::Status => "status",
            FetchErrorKind::Decode => "decode",
            FetchErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single weather fetch.
///
/// Every failure mode lands here so the view state can show it; nothing is
/// dropped on the floor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request never produced a response body.
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("request failed with status code {status}: {body}")]
    Status { status: u16, body: String },

    /// The body did not have the expected shape.
    #[error("unexpected response from weather service: {0}")]
    Decode(String),

    /// The fetch task died before reporting a result.
    #[error("weather lookup aborted: {0}")]
    Internal(String),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) => FetchErrorKind::Transport,
            FetchError::Status { .. } => FetchErrorKind::Status,
            FetchError::Decode(_) => FetchErrorKind::Decode,
            FetchError::Internal(_) => FetchErrorKind::Internal,
        }
    }

    /// Build a status error, keeping only the head of a long body.
    pub fn status(status: u16, body: &str) -> Self {
        FetchError::Status { status, body: truncate_body(body) }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
