//! # cuebuild
//!
//! Rebuild presentation documents from structured lyric payloads.
//!
//! ## Features
//!
//! - Reconcile a song's content sections against a desired performance
//!   order, with diagnostics for every match
//! - Assemble colored groups, cues, slides, and an arrangement
//! - Optional `Background & Lights` prefix group with timer, audience look,
//!   stage layout, and background video
//! - Transition presentations with topic cues and clear separators
//! - Read and write bare documents or ZIP bundles without disturbing other
//!   members
//!
//! ## Quick Start
//!
//! ```no_run
//! use cuebuild::Rebuilder;
//! use cuebuild::payload::parse_song;
//!
//! let payload = parse_song(r#"{
//!     "title": "Amazing Grace",
//!     "sections": [
//!         {"name": "Verse 1", "slides": [["Amazing grace how sweet the sound"]]},
//!         {"name": "Chorus", "lyricLines": ["My chains are gone"]}
//!     ],
//!     "sequence": [{"label": "Verse", "number": 1}, {"label": "Chorus"}]
//! }"#)?;
//!
//! let report = Rebuilder::new().song("Amazing Grace.pro".as_ref(), &payload)?;
//! for line in report.assembly.summary_lines() {
//!     println!("{line}");
//! }
//! # Ok::<(), cuebuild::Error>(())
//! ```
//!
//! ## Working with Sequences
//!
//! The [`reconcile`] module can be used on its own:
//!
//! ```
//! use cuebuild::catalog::ContentCatalog;
//! use cuebuild::payload::{SectionPayload, SequenceEntry};
//! use cuebuild::reconcile::Reconciler;
//!
//! let sections = vec![SectionPayload::new("Verse 1"), SectionPayload::new("Verse 2")];
//! let catalog = ContentCatalog::new(&sections);
//! let sequence = vec![SequenceEntry::labelled("Verse").with_number(2)];
//! let result = Reconciler::new(&catalog).reconcile(Some(&sequence));
//! assert_eq!(result.units[0].source_index, Some(1));
//! ```

pub mod assemble;
pub mod catalog;
pub mod container;
pub mod document;
pub mod error;
pub mod ids;
pub mod label;
pub mod payload;
pub mod rebuild;
pub mod reconcile;
pub mod util;

pub use assemble::{Assembler, AssemblyOptions};
pub use document::Presentation;
pub use error::{Error, Result};
pub use rebuild::Rebuilder;
