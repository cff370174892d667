//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A component does not satisfy the capability it was registered for
    #[error("Invalid argument for {target}: {message}")]
    InvalidArgument { target: String, message: String },

    /// A positional placeholder has no matching record argument
    #[error("Not enough args for string format: placeholder #{needed} but only {available} argument(s)")]
    InsufficientArguments { needed: usize, available: usize },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// The registry owning a logger no longer exists
    #[error("Logger registry for '{namespace}' has been dropped")]
    RegistryDropped { namespace: String },
}

impl LoggerError {
    /// Create an invalid argument error
    pub fn invalid_argument(target: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidArgument {
            target: target.into(),
            message: message.into(),
        }
    }

    /// Create an insufficient arguments error for the `needed`-th placeholder (1-based)
    pub fn insufficient_arguments(needed: usize, available: usize) -> Self {
        LoggerError::InsufficientArguments { needed, available }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    pub fn registry_dropped(namespace: impl Into<String>) -> Self {
        LoggerError::RegistryDropped {
            namespace: namespace.into(),
        }
    }
}
