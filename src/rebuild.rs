//! End-to-end rebuild pipelines: locate, read, assemble, write.
//!
//! Every pipeline decodes its input before touching it and writes
//! exactly once at the end, so a malformed payload or an undecodable file
//! leaves the original unchanged.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::assemble::{Assembler, SongAssembly, TransitionAssembly};
use crate::container;
use crate::document::{self, DocumentHeader};
use crate::error::Result;
use crate::payload::{SongPayload, TransitionPayload};

/// Result of a song rebuild.
#[derive(Debug, Clone)]
pub struct SongReport {
    pub path: PathBuf,
    pub archive: bool,
    pub assembly: SongAssembly,
}

impl SongReport {
    pub fn cues_written(&self) -> usize {
        self.assembly.cues_written
    }
}

/// Result of a transition rebuild.
#[derive(Debug, Clone)]
pub struct TransitionReport {
    pub path: PathBuf,
    pub archive: bool,
    pub assembly: TransitionAssembly,
}

impl TransitionReport {
    pub fn cues_written(&self) -> usize {
        self.assembly.cues_written
    }
}

/// Result of overwriting operator notes.
#[derive(Debug, Clone)]
pub struct NotesReport {
    pub path: PathBuf,
    pub archive: bool,
    pub previous: String,
    pub notes: String,
    /// Set when the transition layout was rebuilt in the same write.
    pub transition: Option<TransitionAssembly>,
}

/// Runs rebuilds against files on disk.
///
/// # Example
///
/// ```no_run
/// use cuebuild::Rebuilder;
/// use cuebuild::payload::parse_song;
///
/// let payload = parse_song(r#"{"title": "Example", "sections": []}"#)?;
/// let report = Rebuilder::new().song("Library/Example.pro".as_ref(), &payload)?;
/// println!("cues_written:{}", report.cues_written());
/// # Ok::<(), cuebuild::Error>(())
/// ```
#[derive(Default)]
pub struct Rebuilder {
    assembler: Assembler,
}

impl Rebuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assembler(assembler: Assembler) -> Self {
        Self { assembler }
    }

    pub fn assembler(&self) -> &Assembler {
        &self.assembler
    }

    /// Replace the content of the document at `path` with a song.
    pub fn song(&mut self, path: &Path, payload: &SongPayload) -> Result<SongReport> {
        let mut loaded = container::read(path)?;
        let assembly = self.assembler.assemble_song(&mut loaded.document, payload);
        loaded.save()?;
        info!(path = %loaded.path.display(), cues = assembly.cues_written, "song rebuilt");
        Ok(SongReport {
            archive: loaded.is_archive(),
            path: loaded.path,
            assembly,
        })
    }

    /// Replace the cues of the document at `path` with a transition.
    pub fn transition(&mut self, path: &Path, payload: &TransitionPayload) -> Result<TransitionReport> {
        let mut loaded = container::read(path)?;
        let assembly = self.assembler.assemble_transition(&mut loaded.document, payload);
        loaded.save()?;
        info!(path = %loaded.path.display(), cues = assembly.cues_written, "transition rebuilt");
        Ok(TransitionReport {
            archive: loaded.is_archive(),
            path: loaded.path,
            assembly,
        })
    }

    /// Overwrite the operator notes, optionally rebuilding the transition
    /// layout in the same write.
    ///
    /// Without a transition only the notes field changes; the rest of the
    /// document is written back byte-for-byte, even content this crate
    /// does not model.
    pub fn notes(
        &mut self,
        path: &Path,
        notes: &str,
        transition: Option<&TransitionPayload>,
    ) -> Result<NotesReport> {
        let (path, archive, previous, transition) = match transition {
            None => {
                let loaded = container::read_with(path, DocumentHeader::from_bytes)?;
                loaded.save_encoded(&document::rewrite_notes(&loaded.encoded, notes)?)?;
                let archive = loaded.is_archive();
                (loaded.path, archive, loaded.document.notes, None)
            }
            Some(payload) => {
                let mut loaded = container::read(path)?;
                let previous = std::mem::replace(&mut loaded.document.notes, notes.to_string());
                let assembly = self.assembler.assemble_transition(&mut loaded.document, payload);
                loaded.save()?;
                let archive = loaded.is_archive();
                (loaded.path, archive, previous, Some(assembly))
            }
        };
        info!(path = %path.display(), "operator notes written");
        Ok(NotesReport {
            path,
            archive,
            previous,
            notes: notes.to_string(),
            transition,
        })
    }
}
