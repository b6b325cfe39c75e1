//! Reading and writing presentations on disk.
//!
//! A presentation lives either in a bare file holding the encoded message,
//! or inside a ZIP bundle next to other members (media, thumbnails). The
//! format is sniffed from the first bytes, never from the extension.
//! Writes always go through a temporary file in the target's directory that
//! is renamed over the original, so a failed write leaves the original
//! untouched.

mod archive;
pub mod index;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::document::Presentation;
use crate::error::{Error, Result};

pub use archive::{ArchiveBundle, ArchiveMember, DOCUMENT_EXTENSION, is_zip};

/// Where a loaded document came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Bare,
    Archive(ArchiveBundle),
}

/// A decoded document, its bytes as read, and what is needed to write it
/// back.
#[derive(Debug, Clone)]
pub struct LoadedDocument<D = Presentation> {
    pub document: D,
    pub encoded: Vec<u8>,
    pub path: PathBuf,
    pub source: Source,
}

impl<D> LoadedDocument<D> {
    pub fn is_archive(&self) -> bool {
        matches!(self.source, Source::Archive(_))
    }

    /// Write `encoded` over the document's file, in place of the bytes read.
    pub fn save_encoded(&self, encoded: &[u8]) -> Result<()> {
        write(&self.path, encoded, &self.source)
    }
}

impl LoadedDocument {
    /// Write the (possibly modified) document back over its file.
    pub fn save(&self) -> Result<()> {
        self.save_encoded(&self.document.to_bytes())
    }
}

/// Resolve `path` to the file that holds the document.
///
/// A directory is searched recursively for `.pro` files; the shortest path
/// wins, ties broken lexically.
pub fn locate(path: &Path) -> Result<PathBuf> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    let mut found = Vec::new();
    collect_documents(path, &mut found)?;
    found.sort_by(|a, b| {
        let (a_len, b_len) = (a.as_os_str().len(), b.as_os_str().len());
        a_len.cmp(&b_len).then_with(|| a.cmp(b))
    });
    match found.into_iter().next() {
        Some(file) => {
            debug!(dir = %path.display(), file = %file.display(), "document located");
            Ok(file)
        }
        None => Err(Error::MissingDocument(path.to_path_buf())),
    }
}

fn collect_documents(dir: &Path, found: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_documents(&path, found)?;
        } else if path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(archive::is_document_name)
        {
            found.push(path);
        }
    }
    Ok(())
}

/// Read and decode the document at `path` (a file or a bundle directory).
pub fn read(path: &Path) -> Result<LoadedDocument> {
    read_with(path, Presentation::from_bytes)
}

/// Read the document at `path`, decoding it with `decode`.
///
/// In a ZIP bundle the document is the first `.pro` member `decode`
/// accepts.
pub fn read_with<D>(
    path: &Path,
    decode: impl Fn(&[u8]) -> Result<D>,
) -> Result<LoadedDocument<D>> {
    let path = locate(path)?;
    let bytes = fs::read(&path)?;
    let loaded = if is_zip(&bytes) {
        let (bundle, document, encoded) = ArchiveBundle::read(&bytes, &path, decode)?;
        LoadedDocument {
            document,
            encoded,
            path,
            source: Source::Archive(bundle),
        }
    } else {
        LoadedDocument {
            document: decode(&bytes)?,
            encoded: bytes,
            path,
            source: Source::Bare,
        }
    };
    debug!(path = %loaded.path.display(), archive = loaded.is_archive(), "document read");
    Ok(loaded)
}

/// Atomically replace the file at `path` with `encoded`, wrapped back into
/// its bundle when `source` is one.
pub fn write(path: &Path, encoded: &[u8], source: &Source) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir)?;

    match source {
        Source::Bare => temp.write_all(encoded)?,
        Source::Archive(bundle) => {
            bundle.write_to(temp.as_file_mut(), encoded)?;
        }
    }
    temp.as_file().sync_all()?;
    if let Ok(metadata) = fs::metadata(path) {
        temp.as_file().set_permissions(metadata.permissions())?;
    }

    temp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    info!(path = %path.display(), bytes = encoded.len(), "document written");
    Ok(())
}
