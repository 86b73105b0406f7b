//! Error types for the aqua_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for aqua_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A liter count that could not be read as a whole number
    #[error("invalid number of liters: {input:?}")]
    InvalidNumber { input: String },

    /// Speech engine failure
    #[error("Speech error: {0}")]
    Speech(String),

    /// Terminal setup or rendering failure
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
