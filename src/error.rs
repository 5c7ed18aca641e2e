//! Error types and handling for `TravelAtlas`

use thiserror::Error;

/// Main error type for the `TravelAtlas` engine
#[derive(Error, Debug)]
pub enum TravelAtlasError {
    /// The data provider could not produce a snapshot
    #[error("Data unavailable: {message}")]
    DataUnavailable { message: String },

    /// Malformed or out-of-range query parameters
    #[error("Invalid query: {message}")]
    InvalidQuery { message: String },

    /// The caller cancelled the query before it completed
    #[error("Query cancelled")]
    Cancelled,

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Cache operation errors
    #[error("Cache error: {message}")]
    Cache { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TravelAtlasError {
    /// Create a new data-unavailable error
    pub fn data_unavailable<S: Into<String>>(message: S) -> Self {
        Self::DataUnavailable {
            message: message.into(),
        }
    }

    /// Create a new invalid-query error
    pub fn invalid_query<S: Into<String>>(message: S) -> Self {
        Self::InvalidQuery {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new cache error
    pub fn cache<S: Into<String>>(message: S) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TravelAtlasError::DataUnavailable { .. } => {
                "Travel data is currently unavailable. Please try again later.".to_string()
            }
            TravelAtlasError::InvalidQuery { message } => {
                format!("Invalid query: {message}")
            }
            TravelAtlasError::Cancelled => "The query was cancelled.".to_string(),
            TravelAtlasError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TravelAtlasError::Cache { .. } => {
                "Cache operation failed. You may need to clear your cache.".to_string()
            }
            TravelAtlasError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TravelAtlasError::General { message } => message.clone(),
        }
    }
}
