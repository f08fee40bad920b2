// Manifest reader: one `<class-label>/<file>` record per line.
//
//   accordion/image_0001.jpg
//   accordion/image_0002.jpg
//   BACKGROUND_Google/image_0001.jpg
//   airplanes/image_0001.jpg
//
// The first path segment is the class label; the whole line is the image
// path relative to the image root. No header, no comments, no escaping.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// One manifest record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    /// Class label (first `/`-separated segment of the line).
    pub label: String,
    /// Image path relative to the image root (the full line).
    pub path: PathBuf,
}

impl ManifestEntry {
    /// Parse a single line with its line terminator already removed.
    ///
    /// Returns `None` for blank lines.
    pub fn parse(line: &str) -> Option<Self> {
        if line.is_empty() {
            return None;
        }
        let label = line.split('/').next().unwrap_or(line);
        Some(ManifestEntry {
            label: label.to_string(),
            path: PathBuf::from(line),
        })
    }
}

/// Strip a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Read every record from `reader`, in file order.
///
/// `source` is only used to tag I/O errors.
pub fn parse_manifest<R: BufRead>(mut reader: R, source: &Path) -> Result<Vec<ManifestEntry>> {
    let mut entries = Vec::new();
    let mut line = String::new();
    loop {
        line.clear();
        let n = reader.read_line(&mut line).map_err(|e| Error::Io {
            path: source.to_path_buf(),
            source: e,
        })?;
        if n == 0 {
            break;
        }
        if let Some(entry) = ManifestEntry::parse(strip_line_ending(&line)) {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// Open and parse the manifest at `path`.
pub fn read_manifest(path: impl AsRef<Path>) -> Result<Vec<ManifestEntry>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        Error::from_io(e, path.to_path_buf(), |path| Error::ManifestNotFound { path })
    })?;
    parse_manifest(BufReader::new(file), path)
}
