//! Error types for level data and level progression.

use thiserror::Error;

/// Errors that can occur when loading level data or moving between levels.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    /// Level id outside the loaded sequence.
    #[error("Level {id} does not exist (sequence has {len} levels)")]
    InvalidLevel { id: usize, len: usize },

    /// A level transition has not reached its swap point yet.
    #[error("Level transition already in progress")]
    TransitionInProgress,

    /// No level is loaded, so there is nothing to advance from.
    #[error("No level is active")]
    NoActiveLevel,

    /// The level file could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// The level file parsed but contains no levels.
    #[error("Level file '{0}' defines no levels")]
    EmptySequence(String),

    /// A level without balls could never be completed.
    #[error("Level '{name}' in '{path}' has no balls")]
    NoBalls { path: String, name: String },
}
