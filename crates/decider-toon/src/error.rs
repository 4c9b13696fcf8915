//! Error types for TOON encoding and decoding operations.

use std::fmt;

use thiserror::Error;

/// Errors that can occur during TOON encoding or decoding.
///
/// Decode errors carry the byte offset into the input at which the problem
/// was detected.
#[derive(Error, Debug)]
pub enum ToonError {
    /// The value cannot be represented in the TOON data model
    /// (non-finite float, non-string map key in a serde type, ...).
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Input ended inside a structure or before any value was found.
    #[error("unexpected end of input in {context} at byte {offset}")]
    UnexpectedEof { offset: usize, context: &'static str },

    /// A map key was not followed by `:`.
    #[error("expected ':' after map key at byte {offset}")]
    ExpectedColon { offset: usize },

    /// A quoted string had no closing `"`.
    #[error("unterminated string starting at byte {offset}")]
    UnterminatedString { offset: usize },

    /// A structural character appeared where a value was expected.
    #[error("empty atom at byte {offset}")]
    EmptyAtom { offset: usize },

    /// A map key decoded to something other than a string.
    #[error("map key must be a string, found {found} at byte {offset}")]
    InvalidKeyType { offset: usize, found: &'static str },

    /// Non-whitespace input remained after a complete value.
    #[error("trailing characters after value at byte {offset}")]
    TrailingCharacters { offset: usize },

    /// Containers were nested deeper than the decoder allows.
    #[error("nesting depth limit exceeded at byte {offset}")]
    DepthLimitExceeded { offset: usize },

    /// A [`Value`](crate::Value) tree did not have the shape of the record
    /// being rebuilt from it.
    #[error("cannot rebuild record: {0}")]
    Deserialize(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl serde::ser::Error for ToonError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ToonError::UnsupportedType(msg.to_string())
    }
}

impl serde::de::Error for ToonError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        ToonError::Deserialize(msg.to_string())
    }
}

/// Convenience alias used throughout decider-toon.
pub type Result<T> = std::result::Result<T, ToonError>;
