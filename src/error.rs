//! Error types for the OCR layout library.
//!
//! This module defines all error types that can occur while taking in images,
//! driving the OCR engine, parsing its output and persisting settings.
//! Layout reconstruction itself never fails.

use crate::intake::ImageSource;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around OCR processing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error for recognition results or the settings file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed Tesseract TSV output
    #[error("Invalid TSV at line {line}: {reason}")]
    Tsv {
        /// 1-based line number in the TSV text
        line: usize,
        /// Reason for parse failure
        reason: String,
    },

    /// Input bytes are empty
    #[error("Image data is empty")]
    EmptyImage,

    /// Input bytes are not in a recognised image format
    #[error("Input is not an image")]
    NotAnImage,

    /// The OCR engine ran but reported a failure
    #[error("OCR engine error: {0}")]
    Engine(String),

    /// The OCR engine could not be started
    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    /// A requested recognition language is not installed
    #[error("OCR language not installed: {0}")]
    LanguageUnavailable(String),

    /// Unknown settings key
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// Settings value could not be interpreted for its key
    #[error("Invalid value for option {key}: {reason}")]
    InvalidOptionValue {
        /// Option name as stored
        key: String,
        /// Why the value was rejected
        reason: String,
    },

    /// The image arrived through an input path the user has switched off
    #[error("Image input disabled in settings: {0}")]
    SourceDisabled(ImageSource),
}
