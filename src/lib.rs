//! # BrainZip - Brainfuck archiver
//!
//! Encodes arbitrary binary data as Brainfuck source and recovers it by
//! executing that source. An archiver wraps the codec: directory traversal,
//! a line-oriented text container, and a CLI.
//!
//! ## Core Components
//!
//! - **Sequencer**: byte buffer -> program whose execution prints those bytes
//! - **TapeMachine**: program -> the bytes it emits, via a 30000-cell tape
//! - **Archive**: the "BrainZip Archive" text container (manifest + one
//!   program block per file)
//!
//! The two codec halves are independent: the interpreter runs programs from
//! any source, and the encoder relies only on the shared instruction
//! alphabet. The contract that ties them together:
//!
//! ```
//! use brainzip::{encode, decode};
//!
//! let data = b"Hello, world!";
//! let program = encode(data).unwrap();
//! assert_eq!(decode(&program).unwrap(), data);
//! ```
//!
//! ## Design Principles
//!
//! - **Greedy encoding**: a byte-by-byte delta scheme with a fixed reset
//!   threshold; no loop synthesis, no multiplication tricks
//! - **Per-call state**: every decode owns a fresh tape and output buffer,
//!   so independent calls run concurrently with no locking
//! - **Fail loudly**: malformed programs and container violations abort the
//!   call with a typed error; no partial results

// Brainfuck codec - encoder and interpreter
pub mod codec;
pub use codec::{decode, encode, Program, Sequencer, TapeMachine, RESET_THRESHOLD, TAPE_LEN};

// Archive container - manifest, writer, reader
pub mod archive;
pub use archive::{
    create_archive, extract_archive, list_archive, ArchiveEntry, ArchiveStats, EntryKind,
    ExtractStats,
};

// Error types
mod error;
pub use error::{DecodeError, EncodeError};
