//! Archive creation - walk input paths, encode each file, stream the
//! container.

use super::manifest::{archive_path, ArchiveEntry, EntryKind};
use super::{ARCHIVE_HEADER, END_FILE, END_METADATA, FILE_COUNT_PREFIX, START_FILE_PREFIX};
use crate::codec;
use anyhow::{bail, Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Totals reported after writing an archive
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveStats {
    pub files: usize,
    pub dirs: usize,
    /// Raw bytes read from input files
    pub input_bytes: u64,
    /// Program text bytes written to the container
    pub program_bytes: u64,
}

/// A manifest entry paired with the filesystem path it was collected from
#[derive(Debug, Clone)]
pub struct CollectedEntry {
    pub entry: ArchiveEntry,
    /// Where to read the bytes from (unused for directories)
    pub source: PathBuf,
}

/// Walk the given paths and build the manifest.
///
/// A regular-file input becomes a single FILE entry. A directory input is
/// recorded as a DIR entry followed by its contents, directories before their
/// children, siblings in name order. Anything else (sockets, dangling links)
/// is rejected.
pub fn collect_entries(inputs: &[PathBuf]) -> Result<Vec<CollectedEntry>> {
    let mut collected = Vec::new();

    for input in inputs {
        let meta = fs::metadata(input)
            .with_context(|| format!("Cannot access input path {}", input.display()))?;

        if meta.is_file() {
            collected.push(CollectedEntry {
                entry: ArchiveEntry::new(archive_path(input), EntryKind::File),
                source: input.clone(),
            });
        } else if meta.is_dir() {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| archive_path(input));
            if name.is_empty() {
                bail!("Cannot archive path with no name: {}", input.display());
            }
            collect_dir(input, &name, &mut collected)?;
        } else {
            bail!("Not a regular file or directory: {}", input.display());
        }
    }

    Ok(collected)
}

fn collect_dir(dir: &Path, rel: &str, collected: &mut Vec<CollectedEntry>) -> Result<()> {
    collected.push(CollectedEntry {
        entry: ArchiveEntry::new(rel, EntryKind::Dir),
        source: dir.to_path_buf(),
    });

    let mut children: Vec<_> = fs::read_dir(dir)
        .with_context(|| format!("Cannot read directory {}", dir.display()))?
        .collect::<std::io::Result<_>>()?;
    children.sort_by_key(|e| e.file_name());

    for child in children {
        let path = child.path();
        let child_rel = format!("{}/{}", rel, child.file_name().to_string_lossy());
        let ftype = child.file_type()?;

        if ftype.is_dir() {
            collect_dir(&path, &child_rel, collected)?;
        } else if ftype.is_file() {
            collected.push(CollectedEntry {
                entry: ArchiveEntry::new(child_rel, EntryKind::File),
                source: path,
            });
        } else {
            debug!(path = %path.display(), "skipping special file");
        }
    }

    Ok(())
}

/// Stream a full archive for the collected entries.
pub fn write_archive<W: Write>(writer: &mut W, entries: &[CollectedEntry]) -> Result<ArchiveStats> {
    let mut stats = ArchiveStats::default();

    writeln!(writer, "{}", ARCHIVE_HEADER)?;
    writeln!(writer, "{}{}", FILE_COUNT_PREFIX, entries.len())?;
    for collected in entries {
        writeln!(writer, "{}", collected.entry.to_line())?;
    }
    writeln!(writer, "{}", END_METADATA)?;

    for collected in entries {
        if collected.entry.is_dir() {
            stats.dirs += 1;
            continue;
        }

        let data = fs::read(&collected.source)
            .with_context(|| format!("Cannot read {}", collected.source.display()))?;
        let program = codec::encode(&data)
            .with_context(|| format!("Encoding failed for {}", collected.entry.path))?;

        writeln!(writer, "{}{}", START_FILE_PREFIX, collected.entry.path)?;
        writeln!(writer, "{}", program)?;
        writeln!(writer, "{}", END_FILE)?;

        debug!(
            path = %collected.entry.path,
            bytes = data.len(),
            program_bytes = program.as_str().len(),
            "encoded entry"
        );
        stats.files += 1;
        stats.input_bytes += data.len() as u64;
        stats.program_bytes += program.as_str().len() as u64;
    }

    Ok(stats)
}

/// Collect the inputs and write the archive to `output`.
pub fn create_archive(output: &Path, inputs: &[PathBuf]) -> Result<ArchiveStats> {
    let entries = collect_entries(inputs)?;
    if entries.is_empty() {
        bail!("Nothing to archive");
    }

    let file = File::create(output)
        .with_context(|| format!("Cannot create archive {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    let stats = write_archive(&mut writer, &entries)?;
    writer.flush()?;

    info!(
        archive = %output.display(),
        files = stats.files,
        dirs = stats.dirs,
        input_bytes = stats.input_bytes,
        program_bytes = stats.program_bytes,
        "archive written"
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("data.bin");
        fs::write(&file, b"hi").unwrap();

        let collected = collect_entries(&[file.clone()]).unwrap();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].entry.kind, EntryKind::File);
        assert_eq!(collected[0].source, file);
    }

    #[test]
    fn test_collect_directory_order() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("proj");
        fs::create_dir_all(root.join("sub")).unwrap();
        fs::write(root.join("b.txt"), b"b").unwrap();
        fs::write(root.join("a.txt"), b"a").unwrap();
        fs::write(root.join("sub/c.txt"), b"c").unwrap();

        let collected = collect_entries(&[root]).unwrap();
        let paths: Vec<&str> = collected.iter().map(|c| c.entry.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["proj", "proj/a.txt", "proj/b.txt", "proj/sub", "proj/sub/c.txt"]
        );
    }

    #[test]
    fn test_collect_missing_path() {
        assert!(collect_entries(&[PathBuf::from("/no/such/path")]).is_err());
    }

    #[test]
    fn test_write_archive_layout() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("x.bin");
        fs::write(&file, &[0u8, 200]).unwrap();

        let entries = collect_entries(&[file]).unwrap();
        let mut buf = Vec::new();
        let stats = write_archive(&mut buf, &entries).unwrap();
        assert_eq!(stats.files, 1);
        assert_eq!(stats.input_bytes, 2);

        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some(ARCHIVE_HEADER));
        assert_eq!(lines.next(), Some("FileCount:1"));
        assert!(lines.next().unwrap().starts_with("Entry:"));
        assert_eq!(lines.next(), Some(END_METADATA));
        assert!(lines.next().unwrap().starts_with(START_FILE_PREFIX));
        // [0, 200] crosses the reset threshold
        assert!(lines.next().unwrap().contains("[-]"));
        assert_eq!(lines.next(), Some(END_FILE));
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("a.bfz");
        assert!(create_archive(&out, &[]).is_err());
    }
}
