//! BrainZip archive container
//!
//! A line-oriented text format: a manifest of paths followed by one Brainfuck
//! program block per regular file. Programs use only printable characters, so
//! the whole archive is valid text.
//!
//! ## Container Format
//!
//! ```text
//! BrainZip Archive                  header line
//! FileCount:<n>                     entry count
//! Entry:<path>;Type:<FILE|DIR>      n manifest lines
//! EndMetadata                       end of manifest
//! StartFile:<path>                  per regular file, manifest order
//! <program text>                    one line of Brainfuck
//! EndFile
//! ```
//!
//! Directories carry no body block. Paths use forward slashes regardless of
//! platform. The manifest count is authoritative: trailing garbage after the
//! last expected block is ignored, a missing block is an error.

mod manifest;
mod reader;
mod writer;

pub use manifest::{ArchiveEntry, EntryKind};
pub use reader::{extract_archive, list_archive, read_manifest, ExtractStats};
pub use writer::{collect_entries, create_archive, write_archive, ArchiveStats, CollectedEntry};

/// First line of every archive
pub const ARCHIVE_HEADER: &str = "BrainZip Archive";

/// Manifest terminator line
pub const END_METADATA: &str = "EndMetadata";

/// Prefix of the entry-count line
pub const FILE_COUNT_PREFIX: &str = "FileCount:";

/// Prefix of each file body block
pub const START_FILE_PREFIX: &str = "StartFile:";

/// Terminator of each file body block
pub const END_FILE: &str = "EndFile";
