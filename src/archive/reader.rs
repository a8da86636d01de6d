//! Archive reading - manifest parsing, listing, extraction.

use super::manifest::ArchiveEntry;
use super::{ARCHIVE_HEADER, END_FILE, END_METADATA, FILE_COUNT_PREFIX, START_FILE_PREFIX};
use crate::codec::{self, Program};
use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

/// Totals reported after extracting an archive
#[derive(Debug, Default, Clone, Copy)]
pub struct ExtractStats {
    pub files: usize,
    pub dirs: usize,
    /// Decoded bytes written out
    pub output_bytes: u64,
}

/// Parse the archive header and manifest, leaving the reader positioned at
/// the first body block.
pub fn read_manifest<R: BufRead>(reader: &mut R) -> Result<Vec<ArchiveEntry>> {
    let header = read_line(reader)?.context("Archive is empty")?;
    if header != ARCHIVE_HEADER {
        bail!("Not a BrainZip archive (bad header: {:?})", header);
    }

    let count_line = read_line(reader)?.context("Archive truncated before FileCount")?;
    let count: usize = count_line
        .strip_prefix(FILE_COUNT_PREFIX)
        .with_context(|| format!("Expected FileCount line, got {:?}", count_line))?
        .parse()
        .with_context(|| format!("Invalid FileCount in {:?}", count_line))?;

    let mut entries = Vec::with_capacity(count);
    for i in 0..count {
        let line = read_line(reader)?
            .with_context(|| format!("Archive truncated in manifest (entry {} of {})", i + 1, count))?;
        entries.push(ArchiveEntry::parse_line(&line)?);
    }

    let end = read_line(reader)?.context("Archive truncated before EndMetadata")?;
    if end != END_METADATA {
        bail!("Expected EndMetadata after manifest, got {:?}", end);
    }

    Ok(entries)
}

/// Read just the manifest of an archive on disk.
pub fn list_archive(archive: &Path) -> Result<Vec<ArchiveEntry>> {
    let file = File::open(archive)
        .with_context(|| format!("Cannot open archive {}", archive.display()))?;
    let mut reader = BufReader::new(file);
    read_manifest(&mut reader)
}

/// Extract every entry of an archive under `dest`.
///
/// Directories are created first (manifest order), then each file block is
/// decoded and written. Any malformed block or decode failure aborts the
/// call, naming the offending entry; entries already written stay on disk.
pub fn extract_archive(archive: &Path, dest: &Path) -> Result<ExtractStats> {
    let file = File::open(archive)
        .with_context(|| format!("Cannot open archive {}", archive.display()))?;
    let mut reader = BufReader::new(file);
    let entries = read_manifest(&mut reader)?;

    let mut stats = ExtractStats::default();

    for entry in entries.iter().filter(|e| e.is_dir()) {
        let path = entry.resolve_under(dest)?;
        fs::create_dir_all(&path)
            .with_context(|| format!("Cannot create directory {}", path.display()))?;
        stats.dirs += 1;
    }

    for entry in entries.iter().filter(|e| !e.is_dir()) {
        let program = read_body_block(&mut reader, &entry.path)?;
        let data = codec::decode(&program)
            .with_context(|| format!("Program for entry {:?} failed to execute", entry.path))?;

        let path = entry.resolve_under(dest)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Cannot create directory {}", parent.display()))?;
        }
        fs::write(&path, &data)
            .with_context(|| format!("Cannot write {}", path.display()))?;

        debug!(path = %entry.path, bytes = data.len(), "extracted entry");
        stats.files += 1;
        stats.output_bytes += data.len() as u64;
    }

    info!(
        archive = %archive.display(),
        files = stats.files,
        dirs = stats.dirs,
        output_bytes = stats.output_bytes,
        "archive extracted"
    );
    Ok(stats)
}

/// Scan forward to the `StartFile:` marker for `expected`, then gather
/// program text until `EndFile`.
fn read_body_block<R: BufRead>(reader: &mut R, expected: &str) -> Result<Program> {
    let name = loop {
        let line = read_line(reader)?
            .with_context(|| format!("No StartFile block found for entry {:?}", expected))?;
        if let Some(name) = line.strip_prefix(START_FILE_PREFIX) {
            break name.to_string();
        }
    };

    if name != expected {
        bail!(
            "Body block out of order: expected entry {:?}, found {:?}",
            expected,
            name
        );
    }

    let mut source = String::new();
    loop {
        let line = read_line(reader)?
            .with_context(|| format!("No EndFile marker for entry {:?}", expected))?;
        if line == END_FILE {
            break;
        }
        source.push_str(&line);
    }

    Ok(Program::new(source))
}

/// Next line without its terminator, or None at end of input.
fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let n = reader.read_line(&mut line).context("Archive read error")?;
    if n == 0 {
        return Ok(None);
    }
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
    Ok(Some(line))
}
