//! Error types for the application
//!
//! This module defines all error types used throughout the application using the
//! `thiserror` crate. Each error variant provides detailed context about what went wrong.

use thiserror::Error;

/// Application error types
///
/// This enum represents all possible errors that can occur while adding or
/// updating a reference. Each variant includes relevant context information.
#[derive(Error, Debug)]
pub enum AppError {
    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    /// HTTP client could not be constructed
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    /// Fetching a URL failed (DNS, TLS, timeout or non-2xx status)
    #[error("Network error fetching {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The file has no `Options:` header
    #[error("ERROR: {file} is not an existing ServiceStack Reference")]
    HeaderNotFound { file: String },
    /// The header has no `BaseUrl:` line
    #[error("ERROR: Could not find baseUrl in {file}")]
    MissingBaseUrl { file: String },
    /// The target file does not use the language's extension
    #[error("Invalid file type: '{file}', expected '{expected}' source file")]
    ExtensionMismatch { file: String, expected: String },
    /// The target file does not exist
    #[error("File does not exist: {path}")]
    FileNotFound { path: String },
    /// A fetched reference could not be written to disk
    #[error("ERROR: Could not write DTOs to: {file}: {source}")]
    WriteFailed {
        file: String,
        #[source]
        source: std::io::Error,
    },
    /// The server returned something other than a reference
    #[error("ERROR: Invalid Response from {url}")]
    InvalidServerResponse { url: String },
    /// Arguments that matched no switch, language, URL or file name
    #[error("Unknown Command: {tool} {args}")]
    UnrecognizedArgument { tool: String, args: String },
    /// A language could not be resolved from the arguments
    #[error("A target language is required, e.g. '{tool} csharp <url>'")]
    LanguageRequired { tool: String },
    /// A URL could not be parsed
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// No reference files were found under the working directory
    #[error("No '.{file_name}' files found")]
    NoReferencesFound { file_name: String },
    /// Some files of a directory update failed
    #[error("Failed to update {failed} of {total} reference file(s)")]
    BatchFailed { failed: usize, total: usize },
}
