//! Round-trip tests for bare and bundled presentations on disk.
//!
//! Bundles are built in a temporary directory with a mix of stored,
//! deflated, and directory members so the rewrite can be compared member
//! by member against the original.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use cuebuild::container::{self, Source};
use cuebuild::document::Uuid;
use cuebuild::ids::SequentialIds;
use cuebuild::payload::parse_song;
use cuebuild::util::UserPaths;
use cuebuild::{Assembler, AssemblyOptions, Error, Presentation, Rebuilder};
use tempfile::TempDir;
use zip::write::{FullFileOptions, SimpleFileOptions};
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

const SONG: &str = r#"{
    "title": "Round Trip",
    "sections": [
        {"name": "Verse 1", "slides": [["One", "Two"]]},
        {"name": "Chorus", "lyricLines": ["Sing"]}
    ],
    "sequence": [{"label": "Chorus"}, {"label": "Verse", "number": 1}]
}"#;

fn presentation(name: &str) -> Presentation {
    let mut doc = Presentation::default();
    doc.name = name.into();
    doc.uuid = Some(Uuid::new("DOC-UUID"));
    doc.notes = "keep me".into();
    doc
}

fn timestamp() -> DateTime {
    DateTime::from_date_and_time(2021, 6, 15, 10, 30, 0).unwrap()
}

/// Writes a bundle with siblings on both sides of the document member.
fn write_bundle(path: &Path, doc: &Presentation) {
    let stored = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(timestamp());
    let deflated = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(timestamp())
        .unix_permissions(0o640);

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.add_directory("Media/", stored).unwrap();
    zip.start_file("Media/thumb.jpg", stored).unwrap();
    zip.write_all(&[0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10]).unwrap();
    zip.start_file("Round Trip.pro", deflated).unwrap();
    zip.write_all(&doc.to_bytes()).unwrap();
    zip.start_file("meta/info.json", deflated).unwrap();
    zip.write_all(br#"{"exported": true, "padding": "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa"}"#)
        .unwrap();
    let bytes = zip.finish().unwrap().into_inner();
    fs::write(path, bytes).unwrap();
}

/// (name, method, data) for every member, in archive order.
fn members(path: &Path) -> Vec<(String, CompressionMethod, Vec<u8>)> {
    let bytes = fs::read(path).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut out = Vec::new();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).unwrap();
        let mut data = Vec::new();
        file.read_to_end(&mut data).unwrap();
        out.push((file.name().to_string(), file.compression(), data));
    }
    out
}

fn test_assembler() -> Assembler {
    Assembler::new()
        .with_ids(SequentialIds::new())
        .with_options(AssemblyOptions::default().with_user_paths(UserPaths::new("/nonexistent")))
}

// ============================================================================
// Bundled documents
// ============================================================================

#[test]
fn test_bundle_is_sniffed_and_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Round Trip.zip");
    write_bundle(&path, &presentation("Round Trip"));

    let loaded = container::read(&path).unwrap();
    assert!(loaded.is_archive());
    assert_eq!(loaded.document.name, "Round Trip");
    let Source::Archive(bundle) = &loaded.source else {
        panic!("expected a bundle");
    };
    assert_eq!(bundle.members.len(), 4);
    assert_eq!(bundle.document_member().name, "Round Trip.pro");
}

#[test]
fn test_rebuild_preserves_siblings_byte_for_byte() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Round Trip.pro");
    write_bundle(&path, &presentation("Round Trip"));
    let before = members(&path);

    let payload = parse_song(SONG).unwrap();
    let mut rebuilder = Rebuilder::with_assembler(test_assembler());
    let report = rebuilder.song(&path, &payload).unwrap();
    assert!(report.archive);
    assert!(report.cues_written() >= 2);

    let after = members(&path);
    assert_eq!(after.len(), before.len());
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(old.0, new.0, "member order changed");
        assert_eq!(old.1, new.1, "compression changed for {}", old.0);
        if old.0 != "Round Trip.pro" {
            assert_eq!(old.2, new.2, "sibling {} changed", old.0);
        }
    }
}

#[test]
fn test_rebuild_keeps_member_metadata() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Round Trip.pro");
    write_bundle(&path, &presentation("Round Trip"));

    let payload = parse_song(SONG).unwrap();
    Rebuilder::with_assembler(test_assembler())
        .song(&path, &payload)
        .unwrap();

    let bytes = fs::read(&path).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let doc = archive.by_name("Round Trip.pro").unwrap();
    assert_eq!(doc.last_modified(), Some(timestamp()));
    assert_eq!(doc.unix_mode().map(|mode| mode & 0o777), Some(0o640));
}

#[test]
fn test_noop_rebuild_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Round Trip.pro");
    write_bundle(&path, &presentation("Round Trip"));
    let payload = parse_song(SONG).unwrap();

    Rebuilder::with_assembler(test_assembler())
        .song(&path, &payload)
        .unwrap();
    let first = container::read(&path).unwrap().document;

    Rebuilder::with_assembler(test_assembler())
        .song(&path, &payload)
        .unwrap();
    let second = container::read(&path).unwrap().document;

    assert_eq!(first, second);
    assert_eq!(second.uuid_str(), "DOC-UUID");
    assert_eq!(second.notes, "keep me");
}

#[test]
fn test_bundle_without_document_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("empty.zip");
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("readme.txt", SimpleFileOptions::default()).unwrap();
    zip.write_all(b"nothing here").unwrap();
    fs::write(&path, zip.finish().unwrap().into_inner()).unwrap();
    let original = fs::read(&path).unwrap();

    let payload = parse_song(SONG).unwrap();
    let result = Rebuilder::with_assembler(test_assembler()).song(&path, &payload);
    assert!(matches!(result, Err(Error::MissingDocument(_))));
    assert_eq!(fs::read(&path).unwrap(), original);
}

// ============================================================================
// Siblings carried as stored
// ============================================================================

/// Relabels a stored member as bzip2 in its local and central headers, so
/// this build can only ever copy it, never decompress it.
fn mark_bzip2(bytes: &mut [u8], name: &str) {
    let name = name.as_bytes();
    let mut i = 0;
    while i + 4 <= bytes.len() {
        let (method_at, name_at) = match &bytes[i..i + 4] {
            b"PK\x03\x04" => (i + 8, i + 30),
            b"PK\x01\x02" => (i + 10, i + 46),
            _ => {
                i += 1;
                continue;
            }
        };
        if bytes.get(name_at..name_at + name.len()) == Some(name) {
            bytes[method_at..method_at + 2].copy_from_slice(&12u16.to_le_bytes());
        }
        i += 1;
    }
}

/// (method, crc, mtime, compressed data) of one member, read without
/// decompressing it.
fn raw_member(path: &Path, name: &str) -> (CompressionMethod, u32, Option<DateTime>, Vec<u8>) {
    let bytes = fs::read(path).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let index = archive.index_for_name(name).unwrap();
    let mut file = archive.by_index_raw(index).unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    (file.compression(), file.crc32(), file.last_modified(), data)
}

#[test]
fn test_bzip2_sibling_is_copied_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Song.pro");
    let stored = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(timestamp());

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("Song.pro", stored).unwrap();
    zip.write_all(&presentation("Song").to_bytes()).unwrap();
    zip.start_file("Media/cover.bin", stored).unwrap();
    zip.write_all(b"BZh91AY&SY compressed elsewhere").unwrap();
    let mut bytes = zip.finish().unwrap().into_inner();
    mark_bzip2(&mut bytes, "Media/cover.bin");
    fs::write(&path, &bytes).unwrap();

    let loaded = container::read(&path).unwrap();
    assert_eq!(loaded.document.name, "Song");
    let before = raw_member(&path, "Media/cover.bin");
    assert_eq!(before.0, CompressionMethod::BZIP2);

    let payload = parse_song(SONG).unwrap();
    let report = Rebuilder::with_assembler(test_assembler())
        .song(&path, &payload)
        .unwrap();
    assert!(report.archive);

    assert_eq!(raw_member(&path, "Media/cover.bin"), before);
    assert_eq!(container::read(&path).unwrap().document.name, "Round Trip");
}

#[test]
fn test_sibling_with_extra_field_is_copied() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Song.pro");
    let mut tagged = FullFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(timestamp());
    tagged.add_extra_data(0x1234, b"sidecar".as_slice(), false).unwrap();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("Song.pro", SimpleFileOptions::default()).unwrap();
    zip.write_all(&presentation("Song").to_bytes()).unwrap();
    zip.start_file("meta/tags.txt", tagged).unwrap();
    zip.write_all(b"tagged tagged tagged tagged tagged").unwrap();
    fs::write(&path, zip.finish().unwrap().into_inner()).unwrap();
    let before = raw_member(&path, "meta/tags.txt");

    let payload = parse_song(SONG).unwrap();
    Rebuilder::with_assembler(test_assembler())
        .song(&path, &payload)
        .unwrap();

    assert_eq!(raw_member(&path, "meta/tags.txt"), before);
    let after = members(&path);
    assert_eq!(after[1].0, "meta/tags.txt");
    assert_eq!(after[1].2, b"tagged tagged tagged tagged tagged");
}

// ============================================================================
// Bare documents and bundle directories
// ============================================================================

#[test]
fn test_bare_document_rebuild() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Bare.pro");
    fs::write(&path, presentation("Bare").to_bytes()).unwrap();

    let payload = parse_song(SONG).unwrap();
    let report = Rebuilder::with_assembler(test_assembler())
        .song(&path, &payload)
        .unwrap();
    assert!(!report.archive);

    let bytes = fs::read(&path).unwrap();
    assert!(!container::is_zip(&bytes));
    let doc = Presentation::from_bytes(&bytes).unwrap();
    assert_eq!(doc.name, "Round Trip");
    assert_eq!(doc.cues.len(), report.cues_written());
}

#[test]
fn test_directory_resolves_to_shallowest_document() {
    let dir = TempDir::new().unwrap();
    let bundle = dir.path().join("Song.pro");
    fs::create_dir_all(bundle.join("Contents/Backup")).unwrap();
    fs::write(bundle.join("Contents/presentation.pro"), presentation("Main").to_bytes()).unwrap();
    fs::write(
        bundle.join("Contents/Backup/presentation-old.pro"),
        presentation("Old").to_bytes(),
    )
    .unwrap();

    let loaded = container::read(&bundle).unwrap();
    assert_eq!(loaded.document.name, "Main");
    assert_eq!(loaded.path, bundle.join("Contents/presentation.pro"));
}

#[test]
fn test_malformed_payload_leaves_file_untouched() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Bare.pro");
    let original = presentation("Bare").to_bytes();
    fs::write(&path, &original).unwrap();

    assert!(matches!(parse_song("{\"sections\": 5}"), Err(Error::Payload(_))));
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn test_no_temp_files_left_behind() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("Round Trip.pro");
    write_bundle(&path, &presentation("Round Trip"));

    let payload = parse_song(SONG).unwrap();
    Rebuilder::with_assembler(test_assembler())
        .song(&path, &payload)
        .unwrap();

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("Round Trip.pro")]);
}
