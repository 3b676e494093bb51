//! Error types for taxfetch operations.
//!
//! Failures fall into three categories: bad input, remote-service failures
//! and output failures. Each carries enough context for a caller to decide
//! whether to retry or abort.

use thiserror::Error;

/// Result type alias for taxfetch operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid user input (prompts, arguments).
    #[error("input error: {0}")]
    Input(#[from] InputError),

    /// Errors raised while talking to the sequence database.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// Errors raised while writing reports.
    #[error("output error: {0}")]
    Output(#[from] OutputError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum InputError {
    /// A value that should be a number was not.
    #[error("invalid number for {field}: {value:?}")]
    InvalidNumber {
        /// Name of the offending field.
        field: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// A required value was not supplied.
    #[error("missing value for {field}")]
    MissingValue {
        /// Name of the missing field.
        field: String,
    },

    /// An input file could not be opened.
    #[error("cannot read input file: {path}: {reason}")]
    FileUnreadable {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Reading from the interactive prompt failed.
    #[error("failed to read prompt: {0}")]
    Prompt(String),
}

/// Remote-service errors (E-utilities).
#[derive(Error, Debug)]
pub enum RemoteError {
    /// The service answered with a non-success HTTP status.
    #[error("{endpoint} returned HTTP {status}: {message}")]
    Http {
        /// E-utility that was called (e.g. `esearch`).
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset).
    #[error("{endpoint} request failed: {reason}")]
    Transport {
        /// E-utility that was called.
        endpoint: String,
        /// Underlying failure.
        reason: String,
    },

    /// The service reported an error inside a successful response.
    #[error("{endpoint} reported an error: {message}")]
    Service {
        /// E-utility that was called.
        endpoint: String,
        /// Error message from the service.
        message: String,
    },

    /// The response could not be understood.
    #[error("malformed {endpoint} response: {reason}")]
    MalformedResponse {
        /// E-utility that was called.
        endpoint: String,
        /// What was wrong with the response.
        reason: String,
    },

    /// The taxonomy database has no entry for the identifier.
    #[error("taxon not found: {taxid}")]
    TaxonNotFound {
        /// The taxonomic identifier that was looked up.
        taxid: String,
    },

    /// A fetched GenBank record could not be parsed.
    #[error("GenBank parse error: {0}")]
    Parse(String),
}

impl RemoteError {
    /// Whether repeating the same request could succeed.
    ///
    /// True for transport failures, rate limiting (HTTP 429) and server
    /// errors (HTTP 5xx).
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Http { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Output errors for report and chart files.
#[derive(Error, Debug)]
pub enum OutputError {
    /// Failed to create or write a file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to read a previously written file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// CSV serialization error.
    #[error("CSV error: {path}: {reason}")]
    Csv {
        /// Path to the CSV file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Chart rendering error.
    #[error("failed to render chart: {path}: {reason}")]
    Render {
        /// Path to the image file.
        path: String,
        /// Reason for failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config {
            message: "bad config".to_string(),
        };
        assert_eq!(err.to_string(), "configuration error: bad config");
    }

    #[test]
    fn test_input_error_display() {
        let err = InputError::InvalidNumber {
            field: "min_len".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(err.to_string(), "invalid number for min_len: \"abc\"");

        let err = InputError::MissingValue {
            field: "taxid".to_string(),
        };
        assert_eq!(err.to_string(), "missing value for taxid");
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::Http {
            endpoint: "esearch".to_string(),
            status: 429,
            message: "Too Many Requests".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "esearch returned HTTP 429: Too Many Requests"
        );

        let err = RemoteError::TaxonNotFound {
            taxid: "0".to_string(),
        };
        assert_eq!(err.to_string(), "taxon not found: 0");
    }

    #[test]
    fn test_remote_error_retryable() {
        let http = |status| RemoteError::Http {
            endpoint: "efetch".to_string(),
            status,
            message: String::new(),
        };
        assert!(http(429).is_retryable());
        assert!(http(503).is_retryable());
        assert!(!http(400).is_retryable());
        assert!(!http(404).is_retryable());

        let err = RemoteError::Transport {
            endpoint: "efetch".to_string(),
            reason: "connection reset".to_string(),
        };
        assert!(err.is_retryable());

        let err = RemoteError::TaxonNotFound {
            taxid: "x".to_string(),
        };
        assert!(!err.is_retryable());
        assert!(!RemoteError::Parse("bad locus".to_string()).is_retryable());
    }

    #[test]
    fn test_output_error_display() {
        let err = OutputError::WriteFailed {
            path: "/tmp/out.csv".to_string(),
            reason: "disk full".to_string(),
        };
        assert!(err.to_string().contains("/tmp/out.csv"));
        assert!(err.to_string().contains("disk full"));

        let err = OutputError::Render {
            path: "plot.png".to_string(),
            reason: "empty canvas".to_string(),
        };
        assert!(err.to_string().contains("render chart"));
    }

    #[test]
    fn test_error_from_categories() {
        let err: Error = InputError::Prompt("eof".to_string()).into();
        assert!(matches!(err, Error::Input(_)));

        let err: Error = RemoteError::Parse("x".to_string()).into();
        assert!(matches!(err, Error::Remote(_)));

        let err: Error = OutputError::Csv {
            path: "a.csv".to_string(),
            reason: "x".to_string(),
        }
        .into();
        assert!(matches!(err, Error::Output(_)));
    }
}
