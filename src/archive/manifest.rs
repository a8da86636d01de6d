//! Manifest entries - the path/kind records listed between the archive
//! header and `EndMetadata`.

use anyhow::{bail, Context, Result};
use std::path::{Component, Path, PathBuf};

/// What a manifest entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
}

impl EntryKind {
    /// Manifest spelling of this kind.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::File => "FILE",
            Self::Dir => "DIR",
        }
    }

    /// Parse the manifest spelling.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "FILE" => Some(Self::File),
            "DIR" => Some(Self::Dir),
            _ => None,
        }
    }
}

/// One archived path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Archive-relative path, forward slashes
    pub path: String,
    pub kind: EntryKind,
}

impl ArchiveEntry {
    pub fn new(path: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Dir
    }

    /// Render as a manifest line: `Entry:<path>;Type:<FILE|DIR>`
    pub fn to_line(&self) -> String {
        format!("Entry:{};Type:{}", self.path, self.kind.name())
    }

    /// Parse a manifest line.
    pub fn parse_line(line: &str) -> Result<Self> {
        let rest = line
            .strip_prefix("Entry:")
            .with_context(|| format!("Manifest line missing Entry prefix: {:?}", line))?;
        let (path, type_part) = rest
            .rsplit_once(';')
            .with_context(|| format!("Manifest line missing ';' separator: {:?}", line))?;
        let kind_str = type_part
            .strip_prefix("Type:")
            .with_context(|| format!("Manifest line missing Type field: {:?}", line))?;
        let kind = EntryKind::parse(kind_str)
            .with_context(|| format!("Unknown entry type {:?} in line {:?}", kind_str, line))?;

        if path.is_empty() {
            bail!("Manifest entry has empty path: {:?}", line);
        }

        Ok(Self::new(path, kind))
    }

    /// Resolve this entry under an extraction root.
    ///
    /// Rejects absolute paths and `..` components so a hostile manifest
    /// cannot write outside the destination.
    pub fn resolve_under(&self, root: &Path) -> Result<PathBuf> {
        let rel = Path::new(&self.path);
        for component in rel.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                _ => bail!("Entry path escapes destination: {:?}", self.path),
            }
        }
        Ok(root.join(rel))
    }
}

/// Convert a filesystem-relative path to the archive spelling.
pub fn archive_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_roundtrip() {
        let entry = ArchiveEntry::new("docs/readme.txt", EntryKind::File);
        let line = entry.to_line();
        assert_eq!(line, "Entry:docs/readme.txt;Type:FILE");
        assert_eq!(ArchiveEntry::parse_line(&line).unwrap(), entry);
    }

    #[test]
    fn test_dir_line() {
        let entry = ArchiveEntry::new("docs", EntryKind::Dir);
        assert_eq!(entry.to_line(), "Entry:docs;Type:DIR");
        assert!(ArchiveEntry::parse_line(&entry.to_line()).unwrap().is_dir());
    }

    #[test]
    fn test_path_with_semicolon() {
        // rsplit keeps earlier ';' characters inside the path
        let entry = ArchiveEntry::new("odd;name.bin", EntryKind::File);
        assert_eq!(ArchiveEntry::parse_line(&entry.to_line()).unwrap(), entry);
    }

    #[test]
    fn test_malformed_lines() {
        assert!(ArchiveEntry::parse_line("Garbage").is_err());
        assert!(ArchiveEntry::parse_line("Entry:foo").is_err());
        assert!(ArchiveEntry::parse_line("Entry:foo;Type:LINK").is_err());
        assert!(ArchiveEntry::parse_line("Entry:;Type:FILE").is_err());
    }

    #[test]
    fn test_resolve_rejects_escape() {
        let root = Path::new("/tmp/out");
        assert!(ArchiveEntry::new("../evil", EntryKind::File)
            .resolve_under(root)
            .is_err());
        assert!(ArchiveEntry::new("/etc/passwd", EntryKind::File)
            .resolve_under(root)
            .is_err());
        let ok = ArchiveEntry::new("a/b.txt", EntryKind::File)
            .resolve_under(root)
            .unwrap();
        assert_eq!(ok, root.join("a/b.txt"));
    }

    #[test]
    fn test_archive_path_normalization() {
        assert_eq!(archive_path(Path::new("a/b/c.txt")), "a/b/c.txt");
        assert_eq!(archive_path(Path::new("./a/b")), "a/b");
    }
}
