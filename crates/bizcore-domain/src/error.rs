//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bizcore
///
/// The taxonomy mirrors how failures are treated at runtime: fatal
/// construction errors abort initialization, soft errors are logged and
/// leave an optional slot empty, and runtime health failures are logged
/// only. Panics are reserved for programmer error (e.g. registering the
/// same provider twice) and never used for expected failure paths.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related error
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error
        message: String,
    },

    /// No factory is registered for the requested provider name
    #[error("unsupported provider: {name}: no factory for {category}:{name}")]
    UnsupportedProvider {
        /// Provider category (e.g. "database", "payment")
        category: String,
        /// The offending provider name
        name: String,
    },

    /// The configured workflow engine mode is not one of eager/late/lazy
    #[error("unknown Workflow Engine Mode: {mode}")]
    UnknownEngineMode {
        /// The offending mode string, as configured
        mode: String,
    },

    /// A second Initialize() call on a ready container
    #[error("already initialized")]
    AlreadyInitialized,

    /// Provider construction or operation error, with optional cause
    #[error("{message}")]
    Provider {
        /// Description of the provider error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication-related error
    #[error("authentication error: {message}")]
    Authentication {
        /// Description of the authentication error
        message: String,
    },

    /// Database-related error
    #[error("database error: {message}")]
    Database {
        /// Description of the database error
        message: String,
    },

    /// Workflow engine error
    #[error("workflow engine error: {message}")]
    Engine {
        /// Description of the engine error
        message: String,
    },

    /// Resource not found error
    #[error("not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a use case or provider
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// JSON parsing or serialization error
    #[error("JSON error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Aggregate of every error collected during multi-provider shutdown
    #[error("shutdown failed: {}", format_shutdown_errors(errors))]
    Shutdown {
        /// All errors collected while closing providers
        errors: Vec<Error>,
    },
}

fn format_shutdown_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a provider error without a source
    pub fn provider<S: Into<String>>(message: S) -> Self {
        Self::Provider {
            message: message.into(),
            source: None,
        }
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a database error
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Create a workflow engine error
    pub fn engine<S: Into<String>>(message: S) -> Self {
        Self::Engine {
            message: message.into(),
        }
    }

    /// Create a not-found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid-argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Extension trait for wrapping errors with construction context
///
/// Produces "failed to X: cause" messages while preserving the causal
/// chain through the `source` field.
pub trait ResultExt<T> {
    /// Wrap the error with a context message
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<C: std::fmt::Display>(self, context: C) -> Result<T> {
        self.map_err(|e| {
            let message = format!("{context}: {e}");
            Error::Provider {
                message,
                source: Some(Box::new(e)),
            }
        })
    }
}
