use std::path::PathBuf;

use thiserror::Error;

use crate::types::RecordType;

/// Result type alias for dangle operations
pub type Result<T> = std::result::Result<T, DangleError>;

/// Fatal errors that abort an audit run
#[derive(Error, Debug)]
pub enum DangleError {
    /// An inventory source could not be read
    #[error("failed to read inventory {}: {source}", .path.display())]
    Inventory {
        /// Path of the inventory file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Writing a report stream failed
    #[error("report I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Encoding a report line failed
    #[error("report encoding error: {0}")]
    Report(String),

    /// Authentication failed - invalid or missing provider credential
    #[error("authentication failed: provider rejected the credential")]
    Unauthorized,

    /// The hosted zone does not exist
    #[error("zone not found: {zone_id}")]
    ZoneNotFound {
        /// Zone identifier that was requested
        zone_id: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying
        retry_after: Option<u64>,
    },

    /// Provider returned an error response
    #[error("provider error ({code}): {message}")]
    Api {
        /// HTTP status code
        code: u16,
        /// Error message from the provider
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Request timed out
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Connection failed
    #[error("connection failed: {0}")]
    Connection(String),

    /// A provider response body could not be decoded
    #[error("malformed provider response: {0}")]
    Decode(String),

    /// The provider reported more data but returned no cursor to continue from
    #[error("truncated page for zone {zone_id} carried no continuation cursor")]
    MissingCursor {
        /// Zone being walked
        zone_id: String,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Generic internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl DangleError {
    /// Returns true if the error came from a zone listing request
    #[must_use]
    pub const fn is_provider_error(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::ZoneNotFound { .. }
                | Self::RateLimited { .. }
                | Self::Api { .. }
                | Self::Http(_)
                | Self::Timeout(_)
                | Self::Connection(_)
                | Self::Decode(_)
                | Self::MissingCursor { .. }
        )
    }

    /// Returns true if re-running the audit later may succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Timeout(_) | Self::Connection(_)
        )
    }

    /// Returns true if the error is due to authentication
    #[must_use]
    pub const fn is_auth_error(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Returns the HTTP status code if this is a provider error
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Unauthorized => Some(401),
            Self::RateLimited { .. } => Some(429),
            Self::ZoneNotFound { .. } => Some(404),
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// A zone record that could not be normalized.
///
/// Never fatal: the walker reports it and moves on to the next record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// Neither an alias target nor any literal value
    #[error("{record_type} record {name} has neither an alias target nor any values")]
    MissingTargets {
        /// Record name, root dot stripped
        name: String,
        /// Record type
        record_type: RecordType,
    },

    /// Values are present but not in the structured list form
    #[error("{record_type} record {name} carries values of unexpected shape: {shape}")]
    UnexpectedValueShape {
        /// Record name, root dot stripped
        name: String,
        /// Record type
        record_type: RecordType,
        /// Compact rendering of what the provider sent
        shape: String,
    },

    /// An alias target without a usable `DNSName`
    #[error("{record_type} record {name} carries an alias target of unexpected shape: {shape}")]
    UnexpectedAliasShape {
        /// Record name, root dot stripped
        name: String,
        /// Record type
        record_type: RecordType,
        /// Compact rendering of what the provider sent
        shape: String,
    },

    /// A structured value is blank after trimming
    #[error("{record_type} record {name} has an empty value at position {index}")]
    EmptyValue {
        /// Record name, root dot stripped
        name: String,
        /// Record type
        record_type: RecordType,
        /// Position of the offending value
        index: usize,
    },
}

impl ExtractionError {
    /// Name of the record that failed extraction
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::MissingTargets { name, .. }
            | Self::UnexpectedValueShape { name, .. }
            | Self::UnexpectedAliasShape { name, .. }
            | Self::EmptyValue { name, .. } => name,
        }
    }

    /// Type of the record that failed extraction
    #[must_use]
    pub const fn record_type(&self) -> RecordType {
        match self {
            Self::MissingTargets { record_type, .. }
            | Self::UnexpectedValueShape { record_type, .. }
            | Self::UnexpectedAliasShape { record_type, .. }
            | Self::EmptyValue { record_type, .. } => *record_type,
        }
    }
}
