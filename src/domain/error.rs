//! The closed error taxonomy every port and use case returns through.

use thiserror::Error;

/// Result type alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// How the dispatcher should react to a failed stage invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClass {
    /// Redeliver with backoff, up to the configured bound.
    Retryable,
    /// Mark the entity terminal; never redeliver.
    Fatal,
}

/// Main error type for the Knowledge Service.
#[derive(Error, Debug)]
pub enum Error {
    /// Entity id did not resolve to anything stored.
    #[error("not found: {resource}")]
    NotFound {
        /// Description of what was being looked up.
        resource: String,
    },

    /// Input failed validation (empty query, disallowed resource type, ...).
    #[error("validation error: {message}")]
    Validation {
        /// Human-readable description of what was invalid.
        message: String,
    },

    /// A uniqueness constraint was violated (e.g. duplicate collection name).
    #[error("conflict: {message}")]
    Conflict {
        /// Description of the conflicting state.
        message: String,
    },

    /// The antivirus scanner classified a resource as infected.
    #[error("virus detected in resource {resource_id}")]
    VirusDetected {
        /// The resource that was quarantined.
        resource_id: String,
    },

    /// Declared or detected file format failed validation.
    #[error("invalid format: {message}")]
    InvalidFormat {
        /// Description of the format mismatch.
        message: String,
    },

    /// A stage invocation, or a search's end-to-end deadline, was exceeded.
    #[error("timeout: {message}")]
    Timeout {
        /// Description of what timed out.
        message: String,
    },

    /// Network, I/O, or other recoverable port failure. Retried by the
    /// dispatcher up to the configured bound before becoming `Fatal`.
    #[error("transient error: {message}")]
    Transient {
        /// Description of the underlying failure.
        message: String,
    },

    /// A retryable failure that exhausted its retry budget.
    #[error("fatal error after exhausting retries: {message}")]
    Fatal {
        /// The last error message observed before giving up.
        message: String,
    },

    /// A broken invariant or other programming error. Never retried.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the broken invariant.
        message: String,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration problem.
        message: String,
    },
}

impl Error {
    /// Build a [`Error::NotFound`].
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Build a [`Error::Validation`].
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Build a [`Error::Conflict`].
    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Build a [`Error::InvalidFormat`].
    pub fn invalid_format<S: Into<String>>(message: S) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }

    /// Build a [`Error::VirusDetected`].
    pub fn virus_detected<S: Into<String>>(resource_id: S) -> Self {
        Self::VirusDetected {
            resource_id: resource_id.into(),
        }
    }

    /// Build a [`Error::Timeout`].
    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Build a [`Error::Transient`].
    pub fn transient<S: Into<String>>(message: S) -> Self {
        Self::Transient {
            message: message.into(),
        }
    }

    /// Build a [`Error::Fatal`].
    pub fn fatal<S: Into<String>>(message: S) -> Self {
        Self::Fatal {
            message: message.into(),
        }
    }

    /// Build a [`Error::Internal`].
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Build a [`Error::Config`].
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Classify this error for dispatcher retry purposes (§7).
    pub fn retry_class(&self) -> RetryClass {
        match self {
            Error::Transient { .. } | Error::Timeout { .. } => RetryClass::Retryable,
            _ => RetryClass::Fatal,
        }
    }

    /// Map this error onto an HTTP status code for the façade.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation { .. } | Error::InvalidFormat { .. } => 422,
            Error::Conflict { .. } => 409,
            Error::VirusDetected { .. } => 422,
            _ => 500,
        }
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transient {
            message: err.to_string(),
        }
    }
}

impl From<tera::Error> for Error {
    fn from(err: tera::Error) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Transient {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_and_timeout_are_retryable() {
        assert_eq!(Error::transient("x").retry_class(), RetryClass::Retryable);
        assert_eq!(Error::timeout("x").retry_class(), RetryClass::Retryable);
        assert_eq!(Error::validation("x").retry_class(), RetryClass::Fatal);
        assert_eq!(Error::not_found("x").retry_class(), RetryClass::Fatal);
        assert_eq!(Error::internal("x").retry_class(), RetryClass::Fatal);
        assert_eq!(Error::fatal("x").retry_class(), RetryClass::Fatal);
    }

    #[test]
    fn status_codes_match_http_semantics() {
        assert_eq!(Error::not_found("x").status_code(), 404);
        assert_eq!(Error::validation("x").status_code(), 422);
        assert_eq!(Error::invalid_format("x").status_code(), 422);
        assert_eq!(Error::conflict("x").status_code(), 409);
        assert_eq!(Error::virus_detected("x").status_code(), 422);
        assert_eq!(Error::internal("x").status_code(), 500);
    }
}
