//! Error types for the save record and its store.

use thiserror::Error;

/// Errors that can occur while reading, writing or interpreting save data.
#[derive(Debug, Error)]
pub enum SaveError {
    /// The backing store could not be read or written.
    #[error("Save store I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The stored text is not a valid save record.
    #[error("Malformed save record '{key}': {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The record could not be turned into text.
    #[error("Failed to serialize save record: {0}")]
    Serialize(#[source] serde_json::Error),

    /// A resolution string was not of the form `WIDTHxHEIGHT`.
    #[error("Invalid resolution '{0}', expected WIDTHxHEIGHT")]
    BadResolution(String),
}
