//! Error types for DFC-DataSource
//!
//! Centralized error handling using snafu for ergonomic error definitions.

use snafu::Snafu;

/// Boxed foreign error raised by a retriever or transformer
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the crate
#[derive(Debug, Snafu)]
pub enum Error {
    /// The retrieval function failed (network, server, decoding)
    #[snafu(display("Retrieval failed: {source}"))]
    Retrieval { source: BoxError },

    /// The transform hook failed
    #[snafu(display("Transform failed: {source}"))]
    Transform { source: BoxError },

    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// IO error (settings file, log directory)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// JSON serialization/deserialization error
    #[snafu(display("JSON error: {source}"))]
    Json { source: serde_json::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },
}

impl Error {
    /// Wrap any error raised while fetching raw items
    pub fn retrieval(source: impl Into<BoxError>) -> Self {
        Error::Retrieval {
            source: source.into(),
        }
    }

    /// Wrap any error raised while transforming fetched items
    pub fn transform(source: impl Into<BoxError>) -> Self {
        Error::Transform {
            source: source.into(),
        }
    }

    /// Whether the error came from the retrieval boundary
    pub fn is_retrieval(&self) -> bool {
        matches!(self, Error::Retrieval { .. })
    }

    /// Whether the error came from the transform hook
    pub fn is_transform(&self) -> bool {
        matches!(self, Error::Transform { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Json { source }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
