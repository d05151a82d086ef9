/*!
 * Error types for the submerger application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a subtitle file
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// The file extension is not one of the supported subtitle kinds
    #[error("Unsupported subtitle format: {extension} ({path})")]
    UnsupportedFormat {
        /// Offending extension, lowercased, or empty when missing
        extension: String,
        /// File that was rejected
        path: PathBuf,
    },

    /// The file bytes could not be decoded as text
    #[error("Failed to decode {path} as {encoding}")]
    Encoding {
        /// File that failed to decode
        path: PathBuf,
        /// Name of the encoding the detector settled on
        encoding: String,
    },

    /// The file could not be read
    #[error("Failed to read subtitle file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but holds no bytes
    #[error("Subtitle file is empty: {0}")]
    EmptyFile(PathBuf),
}

/// Errors raised while reading a `key=value` override file.
///
/// These are never fatal: callers log them and fall back to built-in defaults.
#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("Failed to read override file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed override line {line_number}: '{line}' (expected key=value)")]
    MalformedLine { line_number: usize, line: String },

    #[error("Invalid value '{value}' for style field '{field}'")]
    InvalidField { field: String, value: String },
}

/// Errors that can occur while writing a merged document
#[derive(Error, Debug)]
pub enum MergeError {
    /// Output directory or file could not be written
    #[error("Failed to write merged subtitles to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid answer to a numbered selection prompt; recovered by asking again
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Please enter a number.")]
    NotANumber(String),

    #[error("Invalid selection {selection}. Choose between 1 and {max}.")]
    OutOfRange { selection: usize, max: usize },
}

/// Errors that can occur while pairing files between two folders
#[derive(Error, Debug)]
pub enum PairingError {
    /// A folder could not be listed
    #[error("Failed to list directory {path}: {message}")]
    DirectoryListing { path: PathBuf, message: String },

    /// The prompt backend failed (closed stdin, no terminal)
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Invalid combination of command line inputs
    #[error("Argument error: {0}")]
    Argument(String),

    /// Error from subtitle loading
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from writing a merged document
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),

    /// Error from batch pairing
    #[error("Pairing error: {0}")]
    Pairing(#[from] PairingError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}
