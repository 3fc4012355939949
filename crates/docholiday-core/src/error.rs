//! Error types for docholiday-core

/// Result type alias for docholiday operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for docholiday operations
///
/// The `Display` output of every variant is the message reported to the
/// workflow run when the action fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required input was not supplied
    #[error("Input required and not supplied: {0}")]
    MissingRequiredInput(String),

    /// An input was supplied but could not be interpreted
    #[error("Invalid value for input '{input}': {message}")]
    InvalidInput {
        /// Input name, e.g. `releases-count`
        input: String,
        /// What was wrong with it
        message: String,
    },

    /// More than one changeset kind was populated
    #[error(
        "Multiple changeset types specified: {}. Please specify only one type of changeset.",
        .0.join(", ")
    )]
    MultipleChangesetTypes(Vec<&'static str>),

    /// Title and body are missing in manual mode, or smart defaults produced empty ones
    #[error("Title and body are required when event-type is not 'release' or 'merge'")]
    TitleAndBodyRequired,

    /// The event payload lacks the object the declared event kind needs
    #[error("{0}")]
    EventDataMissing(String),

    /// The event payload file could not be parsed
    #[error("Event parse error: {0}")]
    EventParse(String),

    /// No repository identity was available to infer `source-connection`
    #[error("Unable to infer source-connection: GITHUB_REPOSITORY is not set and the event payload has no repository")]
    MissingRepository,

    /// The API rejected the token (HTTP 401)
    #[error("Authentication failed. Please check your API token.")]
    AuthenticationFailed,

    /// The API answered 429
    #[error("Rate limit exceeded (HTTP {0})")]
    RateLimited(u16),

    /// The API answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        /// Response status code
        status: u16,
        /// Raw response body text
        body: String,
    },

    /// No response was received
    #[error("{0}")]
    Transport(String),

    /// A success response carried a body that is not a job
    #[error("Invalid response body: {0}")]
    InvalidResponse(String),

    /// Every attempt failed
    #[error("Request failed after {attempts} attempts: {last}")]
    RequestFailedAfterRetries {
        /// Number of attempts performed
        attempts: u32,
        /// Failure of the final attempt
        last: Box<Error>,
    },

    /// The request could not be encoded
    #[error("Failed to encode request: {0}")]
    Encode(String),

    /// An output entry contains the heredoc delimiter chosen for it
    #[error("Output '{name}' contains the output delimiter")]
    OutputDelimiterCollision {
        /// Output name
        name: String,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // reqwest includes the URL but never headers, so the token cannot leak here
        Error::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        // Only response decoding goes through `?`; encoding maps to `Encode` explicitly
        Error::InvalidResponse(err.to_string())
    }
}

/// Fieldless error category for cheap pattern matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorKind {
    /// Configuration problem detected before any network call
    Config,
    /// Event payload problem
    Event,
    /// Authentication rejected
    Auth,
    /// Transient API or network failure
    Transient,
    /// Retry budget exhausted
    Exhausted,
    /// I/O error
    Io,
}

impl Error {
    /// Get the error kind
    #[inline]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::MissingRequiredInput(_)
            | Error::InvalidInput { .. }
            | Error::MultipleChangesetTypes(_)
            | Error::TitleAndBodyRequired
            | Error::MissingRepository
            | Error::Encode(_) => ErrorKind::Config,
            Error::EventDataMissing(_) | Error::EventParse(_) => ErrorKind::Event,
            Error::AuthenticationFailed => ErrorKind::Auth,
            Error::RateLimited(_)
            | Error::Http { .. }
            | Error::Transport(_)
            | Error::InvalidResponse(_) => ErrorKind::Transient,
            Error::RequestFailedAfterRetries { .. } => ErrorKind::Exhausted,
            Error::OutputDelimiterCollision { .. } | Error::Io(_) => ErrorKind::Io,
        }
    }

    /// Whether another attempt may succeed
    #[inline]
    pub const fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Transient)
    }
}
