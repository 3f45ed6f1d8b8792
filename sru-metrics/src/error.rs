use thiserror::Error;

/// Errors raised while collecting and publishing SRU queue metrics.
#[derive(Debug, Error)]
pub enum Error {
    /// Launchpad query or gateway push failed, including non-success HTTP
    /// statuses and undecodable response bodies.
    #[error("Request to {endpoint} failed: {reason}")]
    Transport { endpoint: String, reason: String },

    /// The pending-SRU report could not be downloaded.
    #[error("Failed to fetch SRU report from {url}: {reason}")]
    ReportFetch { url: String, reason: String },

    /// The pending-SRU report could not be parsed at all.
    #[error("Failed to parse SRU report: {0}")]
    ReportParse(String),

    #[error("Failed to encode metrics: {0}")]
    Encode(#[from] std::fmt::Error),

    #[error("Failed to write console report: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration in {path}: {reason}")]
    Config { path: String, reason: String },
}

impl Error {
    pub fn transport(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        Self::Transport {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    pub fn report_fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::ReportFetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
