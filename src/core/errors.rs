//! Error types for the surql-introspect library.
//!
//! Validation problems in user-supplied query text are not errors here: the
//! syntax helpers return them as `Option<String>` messages. The variants below
//! cover failures that abort an operation, such as a metadata query that could
//! not be decoded or a schema export that could not be written.

use std::io;
use std::path::Path;

use thiserror::Error;

/// Main result type for introspection operations.
pub type Result<T> = std::result::Result<T, IntrospectError>;

/// Error type for all introspection operations.
#[derive(Error, Debug)]
pub enum IntrospectError {
    /// I/O related errors (file operations, config loading)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// The external parser rejected a statement
    #[error("Parse error: {message}")]
    Parse {
        /// Parser message
        message: String,
        /// Text that was submitted to the parser
        input: Option<String>,
    },

    /// A metadata query failed or returned an unexpected shape
    #[error("Query error in '{statement}': {message}")]
    Query {
        /// Statement that was executed
        statement: String,
        /// Error description
        message: String,
    },

    /// Validation errors for configuration or input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format being handled
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Value codec failures
    #[error("Codec error: {message}")]
    Codec {
        /// Error description
        message: String,
    },

    /// Save dialog or file writer failures
    #[error("Persistence error: {message}")]
    Persistence {
        /// Error description
        message: String,
        /// Target path, when one was chosen
        path: Option<String>,
        /// Underlying I/O error
        #[source]
        source: Option<io::Error>,
    },
}

impl IntrospectError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new parse error carrying the rejected input
    pub fn parse_input(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            input: Some(input.into()),
        }
    }

    /// Create a new query error for the given statement
    pub fn query(statement: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Query {
            statement: statement.into(),
            message: message.into(),
        }
    }

    /// Create a new validation error with field context
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new codec error
    pub fn codec(message: impl Into<String>) -> Self {
        Self::Codec {
            message: message.into(),
        }
    }

    /// Create a new persistence error for a failed write to `path`
    pub fn persistence(message: impl Into<String>, path: &Path, source: io::Error) -> Self {
        Self::Persistence {
            message: message.into(),
            path: Some(path.display().to_string()),
            source: Some(source),
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::Io { message, .. }
            | Self::Codec { message }
            | Self::Serialization { message, .. }
            | Self::Persistence { message, .. } => {
                *message = format!("{}: {message}", context.into());
            }
            _ => {}
        }
        self
    }
}

impl From<io::Error> for IntrospectError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for IntrospectError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for IntrospectError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<IntrospectError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = IntrospectError::validation_field("must not be empty", "extensions");
        assert!(matches!(err, IntrospectError::Validation { .. }));

        let err = IntrospectError::parse_input("Unexpected token", "SELEC");
        assert!(matches!(err, IntrospectError::Parse { input: Some(_), .. }));
    }

    #[test]
    fn test_query_error_display() {
        let err = IntrospectError::query("INFO FOR TABLE user", "result is not an object");
        assert_eq!(
            err.to_string(),
            "Query error in 'INFO FOR TABLE user': result is not an object"
        );
    }

    #[test]
    fn test_persistence_error_keeps_path_and_source() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "No such directory");
        let err = IntrospectError::persistence(
            "Failed to write schema export",
            Path::new("/missing/schema.surql"),
            io_err,
        );

        assert!(std::error::Error::source(&err).is_some());
        if let IntrospectError::Persistence { path, .. } = err {
            assert_eq!(path.as_deref(), Some("/missing/schema.surql"));
        } else {
            panic!("Expected Persistence error");
        }
    }

    #[test]
    fn test_serialization_with_context() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let result: std::result::Result<serde_json::Value, serde_json::Error> = Err(json_err);

        let err = result
            .with_context(|| "Invalid snapshot".to_string())
            .unwrap_err();
        assert!(err.to_string().starts_with("Serialization error: Invalid snapshot: JSON"));
    }

    #[test]
    fn test_io_context_prefixes_message() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "Access denied");
        let result: std::result::Result<(), io::Error> = Err(io_err);

        let err = result.context("Failed to write schema").unwrap_err();
        if let IntrospectError::Io { message, source } = &err {
            assert_eq!(message, "Failed to write schema: I/O operation failed");
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        } else {
            panic!("Expected Io error");
        }
    }

    #[test]
    fn test_config_field_error() {
        let err = IntrospectError::config_field("Invalid value", "export.extensions");

        if let IntrospectError::Config { message, field } = err {
            assert_eq!(message, "Invalid value");
            assert_eq!(field, Some("export.extensions".to_string()));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: IntrospectError = json_err.into();

        if let IntrospectError::Serialization { data_type, .. } = err {
            assert_eq!(data_type.as_deref(), Some("JSON"));
        } else {
            panic!("Expected Serialization error");
        }
    }
}
