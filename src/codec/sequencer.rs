//! Sequencer - Greedy delta encoder from bytes to Brainfuck
//!
//! Walks the input byte by byte, tracking the value the interpreter's current
//! cell will hold at the matching point of execution. Each byte becomes a run
//! of `+`/`-` covering the signed delta from that tracked value, followed by
//! `.`; deltas whose magnitude exceeds the reset threshold are cheaper to
//! express as `[-]` (clear the cell) plus a run counted from zero.
//!
//! The encoding is deliberately byte-by-byte: no run-length loops, no
//! multiplication tricks. Output programs use only `[-]`, `+`, `-` and `.`,
//! so they never move the cursor and every loop body is a single decrement.

use super::{Program, RESET, RESET_THRESHOLD};
use crate::error::EncodeResult;

/// Byte-to-program encoder.
///
/// Stateless between [`encode`](Sequencer::encode) calls; the struct exists to
/// carry the reset threshold, which is tunable without affecting correctness
/// (only output size).
#[derive(Debug, Clone)]
pub struct Sequencer {
    threshold: u8,
}

impl Sequencer {
    /// Encoder with the stock reset threshold.
    pub fn new() -> Self {
        Self {
            threshold: RESET_THRESHOLD,
        }
    }

    /// Encoder with a custom reset threshold.
    ///
    /// A threshold of 255 never resets (pure unary runs); 0 resets before
    /// every nonzero delta. Round-tripping holds for any value.
    pub fn with_threshold(threshold: u8) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// Encode a byte buffer as a program that prints it.
    ///
    /// The empty buffer encodes to the empty program. Fails only if the
    /// program buffer cannot be grown.
    pub fn encode(&self, data: &[u8]) -> EncodeResult<Program> {
        let mut code = String::new();
        // Worst case per byte: 3-char reset + threshold-bounded run + output.
        code.try_reserve(data.len().saturating_mul(self.threshold as usize + 4))?;

        let mut current_value: u8 = 0;
        for &target in data {
            let mut diff = target as i16 - current_value as i16;

            // Clearing the cell re-measures the delta from zero
            if diff.unsigned_abs() > self.threshold as u16 {
                self.push(&mut code, RESET)?;
                current_value = 0;
                diff = target as i16;
            }

            let op = if diff > 0 { '+' } else { '-' };
            for _ in 0..diff.unsigned_abs() {
                self.push_char(&mut code, op)?;
            }

            self.push_char(&mut code, '.')?;
            current_value = target;
        }

        Ok(Program::new(code))
    }

    fn push(&self, code: &mut String, s: &str) -> EncodeResult<()> {
        code.try_reserve(s.len())?;
        code.push_str(s);
        Ok(())
    }

    fn push_char(&self, code: &mut String, c: char) -> EncodeResult<()> {
        code.try_reserve(c.len_utf8())?;
        code.push(c);
        Ok(())
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode;

    #[test]
    fn test_empty_input() {
        let program = Sequencer::new().encode(&[]).unwrap();
        assert!(program.is_empty());
    }

    #[test]
    fn test_small_delta_is_unary() {
        let program = Sequencer::new().encode(&[5]).unwrap();
        assert_eq!(program.as_str(), "+++++.");
    }

    #[test]
    fn test_zero_delta_emits_only_output() {
        let program = Sequencer::new().encode(&[0, 0, 0]).unwrap();
        assert_eq!(program.as_str(), "...");
    }

    #[test]
    fn test_reset_heuristic_triggers() {
        // |200 - 0| > 10 forces the reset idiom instead of 200 unary '+'
        let program = Sequencer::new().encode(&[0, 200]).unwrap();
        assert!(program.as_str().contains(RESET));
        assert!(program.len() < 200);
        assert_eq!(decode(&program).unwrap(), vec![0, 200]);
    }

    #[test]
    fn test_small_deltas_avoid_reset() {
        // Deltas from the running value: +10, +5, -3 — all within threshold
        let program = Sequencer::new().encode(&[10, 15, 12]).unwrap();
        assert!(!program.as_str().contains('['));
        assert_eq!(program.as_str(), "++++++++++.+++++.---.");
        assert_eq!(decode(&program).unwrap(), vec![10, 15, 12]);
    }

    #[test]
    fn test_negative_delta_within_threshold() {
        let program = Sequencer::new().encode(&[10, 4]).unwrap();
        assert_eq!(program.as_str(), "++++++++++.------.");
    }

    #[test]
    fn test_boundary_delta_exactly_threshold() {
        // |10| is not > 10: stays unary
        let program = Sequencer::new().encode(&[10]).unwrap();
        assert_eq!(program.as_str(), "++++++++++.");
        // |11| is: resets
        let program = Sequencer::new().encode(&[11]).unwrap();
        assert_eq!(program.as_str(), "[-]+++++++++++.");
    }

    #[test]
    fn test_custom_threshold_roundtrips() {
        let data: Vec<u8> = vec![0, 3, 250, 251, 128, 127, 255, 0];
        for threshold in [0, 1, 10, 128, 255] {
            let program = Sequencer::with_threshold(threshold).encode(&data).unwrap();
            assert_eq!(decode(&program).unwrap(), data, "threshold {}", threshold);
        }
    }

    #[test]
    fn test_never_reset_threshold() {
        let program = Sequencer::with_threshold(255).encode(&[200]).unwrap();
        assert_eq!(program.as_str(), format!("{}.", "+".repeat(200)));
    }
}
