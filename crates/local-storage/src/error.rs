//! Error types for the local-storage crate.
//!
//! Failures are split by cause so callers can tell a missing or unreadable
//! storage directory apart from a value that no longer decodes.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing stored items.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The storage directory could not be created or opened.
    #[error("failed to open storage directory '{path}': {message}")]
    OpenError {
        /// Directory that was requested.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// An item file could not be read.
    #[error("failed to read stored item '{key}': {message}")]
    ReadError {
        /// Key of the item.
        key: String,
        /// Description of the I/O error.
        message: String,
    },

    /// An item file could not be written or replaced.
    #[error("failed to write stored item '{key}': {message}")]
    WriteError {
        /// Key of the item.
        key: String,
        /// Description of the I/O error.
        message: String,
    },

    /// The stored JSON does not decode into the requested type.
    #[error("stored item '{key}' is not valid JSON for the requested type: {message}")]
    ParseError {
        /// Key of the item.
        key: String,
        /// Description of the decode error.
        message: String,
    },

    /// The value could not be encoded as JSON.
    #[error("failed to encode item '{key}': {message}")]
    EncodeError {
        /// Key of the item.
        key: String,
        /// Description of the encode error.
        message: String,
    },

    /// The key is empty, too long, or contains characters outside
    /// `[A-Za-z0-9_-]`.
    #[error("invalid storage key '{key}': {reason}")]
    InvalidKey {
        /// Rejected key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
