//! Error types for brainzip

use thiserror::Error;

/// Encoder error type
///
/// The delta encoder cannot fail on any input; the only failure mode is
/// exhaustion of the growable program buffer.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Program buffer could not be extended
    #[error("Allocation failure while growing program buffer: {0}")]
    Allocation(#[from] std::collections::TryReserveError),
}

/// Interpreter error type
///
/// Each variant carries the program position (character index) at which the
/// fault was detected. All errors are fatal to the decode call; no partial
/// output is returned.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Cursor moved past the right edge of the tape
    #[error("Tape overflow: cursor moved past cell {limit} at program position {pos}")]
    TapeOverflow { pos: usize, limit: usize },

    /// Cursor moved left of cell 0
    #[error("Tape underflow: cursor moved left of cell 0 at program position {pos}")]
    TapeUnderflow { pos: usize },

    /// `[` with no matching `]`
    #[error("Unmatched '[' at program position {pos}")]
    UnmatchedOpenBracket { pos: usize },

    /// `]` with no matching `[`
    #[error("Unmatched ']' at program position {pos}")]
    UnmatchedCloseBracket { pos: usize },
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
