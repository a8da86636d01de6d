//! Brainfuck codec - encode bytes as programs, decode programs back to bytes
//!
//! Two independent halves connected only by the textual program:
//!
//! - [`Sequencer`]: turns a byte buffer into a Brainfuck program whose
//!   execution prints exactly those bytes, in order.
//! - [`TapeMachine`]: executes a program against a bounded tape and records
//!   every byte it emits.
//!
//! ## Instruction alphabet
//!
//! ```text
//! >   cursor += 1            (fatal past cell 29999)
//! <   cursor -= 1            (fatal below cell 0)
//! +   cell += 1              (wrapping)
//! -   cell -= 1              (wrapping)
//! .   append cell to output
//! ,   cell := 0              (input is defined as a reset, not a read)
//! [   jump past matching ] if cell == 0
//! ]   jump back to matching [ if cell != 0
//! ```
//!
//! Any other character is a no-op: preserved in the program text, skipped
//! during execution.
//!
//! ## Core contract
//!
//! For every byte buffer `B`, `decode(&encode(B)?)? == B`. The encoder emits
//! only `[-]`, `+`, `-` and `.`, so valid encoder output never moves the
//! cursor and never loops more than 255 times.

mod sequencer;
mod tape;

pub use sequencer::Sequencer;
pub use tape::TapeMachine;

use crate::error::{DecodeResult, EncodeResult};
use std::fmt;

/// Tape length in cells
pub const TAPE_LEN: usize = 30000;

/// Absolute delta above which the encoder clears the cell with `[-]` and
/// counts from zero instead of emitting unary `+`/`-` runs. A fixed 3-symbol
/// reset beats up to 245 unary symbols; below the threshold the unary run is
/// shorter.
pub const RESET_THRESHOLD: u8 = 10;

/// The eight instruction characters
pub const ALPHABET: [char; 8] = ['>', '<', '+', '-', '.', ',', '[', ']'];

/// The 3-symbol idiom that zeroes the current cell
pub const RESET: &str = "[-]";

/// A Brainfuck program: printable text over the 8-symbol alphabet.
///
/// Immutable once generated. The alphabet excludes control characters, so a
/// program is safe to embed as a single line of a text container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program(String);

impl Program {
    /// Wrap existing program text.
    pub fn new(source: impl Into<String>) -> Self {
        Self(source.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Program length in characters (instructions plus no-ops).
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Program {
    fn from(source: String) -> Self {
        Self(source)
    }
}

impl From<&str> for Program {
    fn from(source: &str) -> Self {
        Self(source.to_string())
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encode a byte buffer as a program that prints it.
pub fn encode(data: &[u8]) -> EncodeResult<Program> {
    Sequencer::new().encode(data)
}

/// Execute a program on a fresh tape and return the bytes it emitted.
pub fn decode(program: &Program) -> DecodeResult<Vec<u8>> {
    let mut machine = TapeMachine::new();
    machine.run(program.as_str())?;
    Ok(machine.into_output())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DecodeError;
    use proptest::prelude::*;

    #[test]
    fn test_empty_roundtrip() {
        let program = encode(&[]).unwrap();
        assert!(program.is_empty());
        assert_eq!(decode(&program).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_single_byte_shape() {
        // |65 - 0| > 10, so the encoder clears first even though the cell is
        // fresh. The reset is a no-op at runtime (cell already 0).
        let program = encode(&[65]).unwrap();
        assert_eq!(program.as_str(), format!("[-]{}.", "+".repeat(65)));
        assert_eq!(decode(&program).unwrap(), vec![65]);
    }

    #[test]
    fn test_full_range_roundtrip() {
        let data: Vec<u8> = (0..=255).collect();
        let program = encode(&data).unwrap();
        assert_eq!(decode(&program).unwrap(), data);
    }

    #[test]
    fn test_all_zero_roundtrip() {
        let data = vec![0u8; 64];
        let program = encode(&data).unwrap();
        assert_eq!(decode(&program).unwrap(), data);
        // Zero deltas emit nothing but the output instruction
        assert_eq!(program.as_str(), ".".repeat(64));
    }

    #[test]
    fn test_encoder_stays_in_alphabet() {
        let data: Vec<u8> = (0..=255).rev().collect();
        let program = encode(&data).unwrap();
        assert!(program.as_str().chars().all(|c| ALPHABET.contains(&c)));
    }

    #[test]
    fn test_descending_roundtrip() {
        let data: Vec<u8> = (0..=255).rev().collect();
        let program = encode(&data).unwrap();
        assert_eq!(decode(&program).unwrap(), data);
    }

    #[test]
    fn test_noop_characters_ignored() {
        let program = Program::from("++ hello +.\n");
        assert_eq!(decode(&program).unwrap(), vec![3]);
    }

    #[test]
    fn test_malformed_programs_rejected() {
        assert!(matches!(
            decode(&Program::from("[")),
            Err(DecodeError::UnmatchedOpenBracket { pos: 0 })
        ));
        assert!(matches!(
            decode(&Program::from("]")),
            Err(DecodeError::UnmatchedCloseBracket { pos: 0 })
        ));
        assert!(matches!(
            decode(&Program::from(">".repeat(TAPE_LEN).as_str())),
            Err(DecodeError::TapeOverflow { .. })
        ));
        assert!(matches!(
            decode(&Program::from("<")),
            Err(DecodeError::TapeUnderflow { pos: 0 })
        ));
    }

    proptest! {
        #[test]
        fn prop_roundtrip(data in proptest::collection::vec(any::<u8>(), 0..512)) {
            let program = encode(&data).unwrap();
            prop_assert_eq!(decode(&program).unwrap(), data);
        }
    }
}
