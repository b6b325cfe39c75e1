//! ZIP bundles that carry a presentation as one of their members.
//!
//! Only the document member is ever decompressed. Every other member is
//! copied with its compressed bytes, method, CRC, timestamp, and mode as
//! read, so siblings in methods this build cannot decode still round-trip.

use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// Extension of the member that holds the presentation.
pub const DOCUMENT_EXTENSION: &str = ".pro";

/// Metadata of one archive member, as listed in the central directory.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveMember {
    pub name: String,
    pub compression: CompressionMethod,
    pub modified: Option<DateTime>,
    pub unix_mode: Option<u32>,
    pub is_dir: bool,
    /// Uncompressed size claimed by the archive.
    pub size: u64,
}

impl ArchiveMember {
    fn listed<R: Read>(file: &zip::read::ZipFile<'_, R>) -> Self {
        Self {
            name: file.name().to_string(),
            compression: file.compression(),
            modified: file.last_modified(),
            unix_mode: file.unix_mode(),
            is_dir: file.is_dir(),
            size: file.size(),
        }
    }

    /// Options for re-encoding this member's data.
    fn options(&self) -> SimpleFileOptions {
        let method = match self.compression {
            CompressionMethod::Stored => CompressionMethod::Stored,
            CompressionMethod::Deflated => CompressionMethod::Deflated,
            other => {
                debug!(member = %self.name, method = ?other, "re-encoding member as deflate");
                CompressionMethod::Deflated
            }
        };
        let mut options = SimpleFileOptions::default().compression_method(method);
        if let Some(modified) = self.modified {
            options = options.last_modified_time(modified);
        }
        if let Some(mode) = self.unix_mode {
            options = options.unix_permissions(mode);
        }
        options
    }
}

/// An archive as read, its member listing, and which member is the
/// presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveBundle {
    pub members: Vec<ArchiveMember>,
    pub document_index: usize,
    archive: Vec<u8>,
}

impl ArchiveBundle {
    /// List the archive in `bytes` and find its document: the first `.pro`
    /// member that `decode` accepts. Returns the decoded document and its
    /// encoded bytes; `path` only labels the error when there is none.
    pub fn read<D>(
        bytes: &[u8],
        path: &Path,
        decode: impl Fn(&[u8]) -> Result<D>,
    ) -> Result<(Self, D, Vec<u8>)> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut members = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            members.push(ArchiveMember::listed(&archive.by_index_raw(i)?));
        }

        for (index, member) in members.iter().enumerate() {
            if member.is_dir || !is_document_name(&member.name) {
                continue;
            }
            let data = match read_member(&mut archive, index) {
                Ok(data) => data,
                Err(e) => {
                    debug!(member = %member.name, error = %e, "member cannot be read");
                    continue;
                }
            };
            match decode(&data) {
                Ok(document) => {
                    debug!(member = %member.name, members = members.len(), "document member found");
                    let bundle = Self {
                        members,
                        document_index: index,
                        archive: bytes.to_vec(),
                    };
                    return Ok((bundle, document, data));
                }
                Err(e) => debug!(member = %member.name, error = %e, "member is not a presentation"),
            }
        }
        Err(Error::MissingDocument(path.to_path_buf()))
    }

    pub fn document_member(&self) -> &ArchiveMember {
        &self.members[self.document_index]
    }

    /// Write the bundle with the document member's bytes replaced by
    /// `document`. Every other member is raw-copied from the archive as
    /// read.
    pub fn write_to<W: Write + Seek>(&self, writer: W, document: &[u8]) -> Result<W> {
        let mut source = ZipArchive::new(Cursor::new(self.archive.as_slice()))?;
        let mut zip = ZipWriter::new(writer);
        for (index, member) in self.members.iter().enumerate() {
            if index == self.document_index {
                zip.start_file(member.name.as_str(), member.options())?;
                zip.write_all(document)?;
            } else if member.is_dir {
                zip.add_directory(member.name.as_str(), member.options())?;
            } else {
                zip.raw_copy_file(source.by_index_raw(index)?)?;
            }
        }
        Ok(zip.finish()?)
    }
}

fn read_member<R: Read + Seek>(archive: &mut ZipArchive<R>, index: usize) -> Result<Vec<u8>> {
    let mut file = archive.by_index(index)?;
    let mut data = Vec::new();
    file.read_to_end(&mut data)?;
    Ok(data)
}

/// True for the signature that starts every ZIP local file header.
pub fn is_zip(bytes: &[u8]) -> bool {
    bytes.starts_with(b"PK\x03\x04")
}

pub(crate) fn is_document_name(name: &str) -> bool {
    name.to_lowercase().ends_with(DOCUMENT_EXTENSION)
}
