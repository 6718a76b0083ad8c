use thiserror::Error;

/// Fallback message when a failed response carries no `message` field
pub const DEFAULT_ERROR_MESSAGE: &str = "Network error occurred";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failure or timeout. Eligible for failover.
    #[error("Network request failed for {url}: {message}")]
    Network {
        url: String,
        message: String,
        timed_out: bool,
    },

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Backend { status: u16, message: String },

    #[error("Authentication required")]
    AuthRequired,

    #[error("Invalid response from {url}: {message}")]
    Decode { url: String, message: String },

    /// `data` did not deserialize into the requested type
    #[error("Unexpected response data: {0}")]
    UnexpectedData(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("No candidate endpoints configured")]
    NoCandidates,
}

impl ApiError {
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
