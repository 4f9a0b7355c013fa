//! Error types for notegraph
//!
//! The graph engine itself never fails; these errors only surface at the
//! I/O edges (loading snapshots and configuration, CLI argument handling).

use thiserror::Error;

/// Result type alias for notegraph operations
pub type Result<T> = std::result::Result<T, GraphError>;

/// Main error type for notegraph
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GraphError {
    /// Stable short code for machine-readable output
    pub fn code(&self) -> &'static str {
        match self {
            GraphError::Serialization(_) => "serialization",
            GraphError::Io(_) => "io",
            GraphError::Config(_) => "config",
            GraphError::InvalidInput(_) => "invalid_input",
        }
    }
}

impl From<toml::de::Error> for GraphError {
    fn from(err: toml::de::Error) -> Self {
        GraphError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(GraphError::Config("bad".into()).code(), "config");
        assert_eq!(GraphError::InvalidInput("x".into()).code(), "invalid_input");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert_eq!(GraphError::from(io).code(), "io");
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: GraphError = err.into();
        assert!(matches!(err, GraphError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
