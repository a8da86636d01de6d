//! TapeMachine - Brainfuck interpreter over a bounded tape
//!
//! Executes a program against a fresh 30000-cell tape, collecting every byte
//! emitted by `.` into an owned output buffer. Bracket pairs are resolved once
//! up front by a stack-based scan into a jump table, so execution itself is a
//! single linear dispatch loop; any unmatched bracket is rejected before the
//! first instruction runs.
//!
//! There is deliberately no step limit: a program whose tested cell never
//! reaches zero (e.g. `+[]`) runs forever. Callers executing untrusted
//! programs must bound the call externally.

use super::TAPE_LEN;
use crate::error::{DecodeError, DecodeResult};

/// One-shot Brainfuck execution engine.
///
/// Owns its tape and output buffer; both live exactly as long as the machine,
/// so independent decodes can run in parallel with no shared state.
#[derive(Debug)]
pub struct TapeMachine {
    cells: Vec<u8>,
    cursor: usize,
    output: Vec<u8>,
}

impl TapeMachine {
    /// Fresh machine: zeroed tape, cursor at cell 0, empty output.
    pub fn new() -> Self {
        Self {
            cells: vec![0; TAPE_LEN],
            cursor: 0,
            output: Vec::new(),
        }
    }

    /// Execute a program to completion.
    ///
    /// Terminates when the instruction pointer walks off the end of the
    /// program; there is no halt instruction. Fails on any cursor move
    /// outside the tape or any unmatched bracket, leaving no partial output
    /// observable through [`into_output`](Self::into_output) semantics (the
    /// caller is expected to discard the machine on error).
    pub fn run(&mut self, source: &str) -> DecodeResult<()> {
        let code: Vec<char> = source.chars().collect();
        let jumps = build_jump_table(&code)?;

        let mut ip = 0;
        while ip < code.len() {
            match code[ip] {
                '>' => {
                    if self.cursor + 1 >= TAPE_LEN {
                        return Err(DecodeError::TapeOverflow {
                            pos: ip,
                            limit: TAPE_LEN,
                        });
                    }
                    self.cursor += 1;
                }
                '<' => {
                    if self.cursor == 0 {
                        return Err(DecodeError::TapeUnderflow { pos: ip });
                    }
                    self.cursor -= 1;
                }
                '+' => self.cells[self.cursor] = self.cells[self.cursor].wrapping_add(1),
                '-' => self.cells[self.cursor] = self.cells[self.cursor].wrapping_sub(1),
                '.' => self.output.push(self.cells[self.cursor]),
                // Input is defined as a reset; nothing external is consumed
                ',' => self.cells[self.cursor] = 0,
                '[' => {
                    if self.cells[self.cursor] == 0 {
                        ip = jumps[ip];
                    }
                }
                ']' => {
                    if self.cells[self.cursor] != 0 {
                        ip = jumps[ip];
                    }
                }
                // Everything else is a preserved no-op
                _ => {}
            }
            ip += 1;
        }

        Ok(())
    }

    /// Bytes emitted so far.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Consume the machine, handing the output buffer to the caller.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }

    /// Current cell index.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Value of the cell under the cursor.
    pub fn current_cell(&self) -> u8 {
        self.cells[self.cursor]
    }
}

impl Default for TapeMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Map each bracket position to its partner. Non-bracket positions are left
/// as 0 and never consulted.
fn build_jump_table(code: &[char]) -> DecodeResult<Vec<usize>> {
    let mut jumps = vec![0usize; code.len()];
    let mut stack: Vec<usize> = Vec::new();

    for (pos, &c) in code.iter().enumerate() {
        match c {
            '[' => stack.push(pos),
            ']' => {
                let open = stack
                    .pop()
                    .ok_or(DecodeError::UnmatchedCloseBracket { pos })?;
                jumps[open] = pos;
                jumps[pos] = open;
            }
            _ => {}
        }
    }

    if let Some(&pos) = stack.first() {
        return Err(DecodeError::UnmatchedOpenBracket { pos });
    }

    Ok(jumps)
}
