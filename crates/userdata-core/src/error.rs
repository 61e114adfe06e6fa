use thiserror::Error;

/// Result type alias for userdata operations
pub type Result<T> = std::result::Result<T, UserdataError>;

/// Errors that can occur while fetching or decoding userdata
#[derive(Error, Debug)]
pub enum UserdataError {
    /// Network-level failure of a single attempt (connection refused,
    /// DNS failure, timeout, truncated body)
    #[error("transport error: {0}")]
    Transport(String),

    /// Provisioning endpoint answered with a non-2xx status
    #[error("unexpected HTTP status {code}")]
    HttpStatus {
        /// HTTP status code
        code: u16,
    },

    /// Retry budget ran out before any attempt succeeded
    #[error("userdata fetch failed after {attempts} attempt(s): {source}")]
    FetchExhausted {
        /// Number of requests issued
        attempts: u32,
        /// Failure of the last attempt
        source: Box<UserdataError>,
    },

    /// Caller cancelled the fetch
    #[error("userdata fetch cancelled after {attempts} completed attempt(s)")]
    Cancelled {
        /// Number of attempts that completed before cancellation
        attempts: u32,
    },

    /// Document is malformed or a field has the wrong type
    #[error("failed to decode userdata: {0}")]
    Decode(#[from] serde_yaml::Error),

    /// Configuration could not be serialized
    #[error("failed to encode userdata: {0}")]
    Encode(serde_yaml::Error),

    /// Document contains nothing but whitespace
    #[error("failed to decode userdata: document is empty")]
    EmptyDocument,

    /// Endpoint is not a valid absolute URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Opaque blob is not valid base64
    #[error("invalid base64 in {field}: {message}")]
    InvalidBase64 {
        /// Which blob failed to decode
        field: &'static str,
        /// Decoder message
        message: String,
    },

    /// Retry or client configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Local file access failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl UserdataError {
    /// Returns true if the failure belongs to a single attempt and the
    /// retry loop may try again
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::HttpStatus { .. })
    }

    /// Returns true if the error ends the boot pipeline
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !self.is_retryable()
    }

    /// Returns true if the caller withdrew the operation
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled { .. })
    }

    /// Returns the HTTP status code of this error or of the last attempt
    /// behind an exhausted fetch
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { code } => Some(*code),
            Self::FetchExhausted { source, .. } => source.status_code(),
            _ => None,
        }
    }
}
