//! Error types for the engine surface.
//!
//! The parser itself is a total function: any string and any valid range
//! produce a tree, and malformed constructs degrade into plain text.
//! Errors only arise at the API boundary, where a caller-supplied range or
//! input can be rejected before parsing starts.
use thiserror::Error;

/// Errors reported by the checked entry points and by [`crate::MarkdownEngine`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MarkdownError {
    /// The requested parse window is not a valid `[start, end)` range over
    /// the source string (out of bounds, inverted, or splitting a UTF-8
    /// character).
    #[error("invalid parse range [{start}, {end}) for source of length {len}")]
    InvalidRange {
        start: usize,
        end: usize,
        len: usize,
    },

    /// The input exceeds the engine's configured maximum size.
    #[error("input of {len} bytes exceeds the configured maximum of {limit} bytes")]
    InputTooLarge { len: usize, limit: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, MarkdownError>;
