use thiserror::Error;

/// Raised while building a [`super::Prober`]. A malformed target list is
/// rejected up front instead of being folded into the report.
#[derive(Debug, Error)]
pub enum ProberError {
    #[error("target key must not be empty (url: {url})")]
    EmptyKey { url: String },
    #[error("duplicate target key: {0}")]
    DuplicateKey(String),
    #[error("invalid url for target `{key}`: {reason}")]
    InvalidUrl { key: String, reason: String },
    #[error("probe timeout must be greater than zero")]
    ZeroTimeout,
    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Failure of a single probe. Never leaves the prober; it is converted into
/// the `error` field of a `ProbeResult`.
#[derive(Debug, Error, PartialEq)]
pub enum ProbeError {
    #[error("timeout")]
    Timeout,
    #[error("{0}")]
    Network(String),
}

impl ProbeError {
    pub(crate) fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            return ProbeError::Timeout;
        }

        let mut causes = Vec::new();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        ProbeError::Network(describe(err.to_string(), causes))
    }
}

/// Joins an error message with its causes. reqwest already renders some
/// causes in its own message, so any cause the text already holds is skipped.
fn describe(message: String, causes: impl IntoIterator<Item = String>) -> String {
    causes.into_iter().fold(message, |mut message, cause| {
        if !cause.is_empty() && !message.contains(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
        message
    })
}
