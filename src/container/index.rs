//! Library index: one JSON line per presentation under a library root.

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;
use zip::ZipArchive;

use super::archive::{is_document_name, is_zip};
use crate::document::DocumentHeader;
use crate::error::Result;

/// Document path inside a `.pro` bundle directory.
pub const BUNDLE_DOCUMENT: &str = "Contents/presentation.pro";

/// One indexed presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IndexRecord {
    Entry {
        uuid: String,
        title: String,
        path: String,
    },
    /// Decoded, but the document carries no uuid.
    MissingUuid {
        warn: &'static str,
        title: String,
        path: String,
    },
}

/// Closing line of a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    pub info: &'static str,
    /// Presentations reported with a uuid.
    pub count: usize,
    /// `.pro` candidates seen, readable or not.
    pub files: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LibraryScan {
    pub records: Vec<IndexRecord>,
    pub files: usize,
}

impl LibraryScan {
    pub fn summary(&self) -> ScanSummary {
        ScanSummary {
            info: "scan complete",
            count: self
                .records
                .iter()
                .filter(|r| matches!(r, IndexRecord::Entry { .. }))
                .count(),
            files: self.files,
        }
    }

    /// Every record followed by the summary, one JSON object per line.
    pub fn json_lines(&self) -> Result<Vec<String>> {
        let mut lines = Vec::with_capacity(self.records.len() + 1);
        for record in &self.records {
            lines.push(serde_json::to_string(record)?);
        }
        lines.push(serde_json::to_string(&self.summary())?);
        Ok(lines)
    }
}

/// Walk `root` and index every `.pro` file and `.pro` bundle directory.
///
/// Unreadable candidates are counted and skipped.
pub fn scan(root: &Path) -> Result<LibraryScan> {
    let mut candidates = Vec::new();
    collect_candidates(root, &mut candidates)?;
    candidates.sort();

    let mut scan = LibraryScan {
        files: candidates.len(),
        ..Default::default()
    };
    for candidate in candidates {
        match index_one(&candidate) {
            Ok(Some(record)) => scan.records.push(record),
            Ok(None) => debug!(path = %candidate.display(), "no document payload"),
            Err(e) => debug!(path = %candidate.display(), error = %e, "skipping unreadable file"),
        }
    }
    Ok(scan)
}

fn collect_candidates(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pro = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_document_name);
        if is_pro {
            out.push(path);
        } else if path.is_dir() {
            collect_candidates(&path, out)?;
        }
    }
    Ok(())
}

fn index_one(path: &Path) -> Result<Option<IndexRecord>> {
    let Some(payload) = document_payload(path)? else {
        return Ok(None);
    };
    let document = DocumentHeader::from_bytes(&payload)?;

    let title = if document.name.trim().is_empty() {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        document.name.clone()
    };
    let path = path.to_string_lossy().into_owned();
    let uuid = document.uuid_str();

    Ok(Some(if uuid.is_empty() {
        IndexRecord::MissingUuid {
            warn: "no-uuid",
            title,
            path,
        }
    } else {
        IndexRecord::Entry {
            uuid: uuid.to_string(),
            title,
            path,
        }
    }))
}

/// Raw document bytes: the bundle's inner document, the first `.pro`
/// member of a zip, or the file itself.
fn document_payload(path: &Path) -> Result<Option<Vec<u8>>> {
    if path.is_dir() {
        let inner = path.join(BUNDLE_DOCUMENT);
        if !inner.is_file() {
            return Ok(None);
        }
        return Ok(Some(fs::read(inner)?));
    }

    let bytes = fs::read(path)?;
    if !is_zip(&bytes) {
        return Ok(Some(bytes));
    }
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    for i in 0..archive.len() {
        let listed = archive.by_index_raw(i)?;
        if listed.is_dir() || !is_document_name(listed.name()) {
            continue;
        }
        drop(listed);
        let mut data = Vec::new();
        archive.by_index(i)?.read_to_end(&mut data)?;
        return Ok(Some(data));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Presentation, Uuid};
    use tempfile::TempDir;

    fn doc(name: &str, uuid: Option<&str>) -> Vec<u8> {
        let mut doc = Presentation::default();
        doc.name = name.into();
        doc.uuid = uuid.map(Uuid::new);
        doc.to_bytes()
    }

    #[test]
    fn test_scan_library() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("a.pro"), doc("Alpha", Some("U-A"))).unwrap();
        fs::write(root.join("b.pro"), doc("", None)).unwrap();
        fs::write(root.join("c.pro"), [0xff, 0xff]).unwrap();
        fs::create_dir_all(root.join("Bundle.pro/Contents")).unwrap();
        fs::write(root.join("Bundle.pro").join(BUNDLE_DOCUMENT), doc("Inner", Some("U-B"))).unwrap();
        fs::write(root.join("ignored.txt"), b"x").unwrap();

        let scan = scan(root).unwrap();
        assert_eq!(scan.files, 4);
        assert_eq!(scan.records.len(), 3);

        let lines = scan.json_lines().unwrap();
        assert!(lines[0].contains(r#""title":"Inner""#));
        assert!(lines[1].starts_with(r#"{"uuid":"U-A","title":"Alpha""#));
        assert!(lines[2].starts_with(r#"{"warn":"no-uuid","title":"b.pro""#));
        assert_eq!(
            lines.last().unwrap(),
            r#"{"info":"scan complete","count":2,"files":4}"#
        );
    }
}
