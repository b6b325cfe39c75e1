//! Document assembly: turning a payload into cues, groups, and an
//! arrangement.
//!
//! The [`Assembler`] owns the collaborators that make a rebuild
//! reproducible (an [`IdSource`], a [`TextEncoder`], and a [`MediaProbe`])
//! and the [`AssemblyOptions`] that tune classification and coloring. Song
//! assembly replaces the document's content wholesale:
//!
//! 1. the header is refreshed (application info, name, category, timeline);
//! 2. an optional `Background & Lights` group carries the service side
//!    effects (timer, audience look, stage layout, background video);
//! 3. the payload's sections are reconciled against its sequence;
//! 4. each surviving unit becomes a colored group with one cue per slide;
//! 5. every group id, in order, goes into a new selected arrangement.
//!
//! ```
//! use cuebuild::assemble::Assembler;
//! use cuebuild::document::Presentation;
//! use cuebuild::ids::SequentialIds;
//! use cuebuild::payload::parse_song;
//!
//! let payload = parse_song(r#"{
//!     "title": "Example",
//!     "includeBackgroundGroup": false,
//!     "sections": [{"name": "Verse", "slides": [["one"], ["two"]]}]
//! }"#).unwrap();
//!
//! let mut doc = Presentation::default();
//! let mut assembler = Assembler::new().with_ids(SequentialIds::new());
//! let assembly = assembler.assemble_song(&mut doc, &payload);
//! assert_eq!(assembly.cues_written, 2);
//! assert_eq!(doc.cue_groups[0].name(), "Verse");
//! ```

pub mod actions;
pub mod media;
pub mod rich_text;
pub mod slide;
mod transition;

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::catalog::{CatalogEntry, ContentCatalog};
use crate::document::action::ClearTargetLayer;
use crate::document::basic::{Application, ApplicationVersion, Version};
use crate::document::{
    ApplicationInfo, Color, Cue, Platform, Presentation, Url, Uuid,
};
use crate::document::{Arrangement, Background, Ccli, CueGroup, Group, Timeline};
use crate::ids::{IdSource, RandomIds};
use crate::payload::values::{Rgba, non_empty};
use crate::payload::{SectionPayload, SongPayload};
use crate::reconcile::{OrderedUnit, ReconcileReport, Reconciler};
use crate::util::UserPaths;

use actions::{
    SERVICE_TIMER_NAME, SLIDES_LAYER_NAME, SLIDES_LAYER_UUID, audience_look_action, clear_action,
    countdown_action, slide_action, stage_layout_action,
};
use media::{MediaProbe, SipsProbe, background_media_action, resolve_background};
use rich_text::{RtfEncoder, TextEncoder};
use slide::{SlideStyle, lyric_slide};

pub use transition::TransitionAssembly;

/// Name of the synthetic prefix group.
pub const BACKGROUND_GROUP_NAME: &str = "Background & Lights";

/// Display-name fragments that mark a section as non-content.
pub const NON_CONTENT_KEYWORDS: &[&str] = &[
    "intro",
    "turnaround",
    "turn around",
    "instrumental",
    "outro",
    "interlude",
    "tag",
    "ending",
];

/// Group colors, assigned in creation order.
pub const GROUP_PALETTE: [Rgba; 8] = [
    [0.05, 0.40, 0.75, 1.0],
    [0.36, 0.65, 0.20, 1.0],
    [0.80, 0.32, 0.15, 1.0],
    [0.56, 0.28, 0.67, 1.0],
    [0.92, 0.56, 0.14, 1.0],
    [0.18, 0.55, 0.60, 1.0],
    [0.78, 0.18, 0.50, 1.0],
    [0.30, 0.30, 0.80, 1.0],
];

const PLATFORM_VERSION: (u32, u32, u32) = (15, 6, 1);
const APPLICATION_VERSION: (u32, u32, u32) = (19, 0, 1);
const APPLICATION_BUILD: &str = "318767361";
const DEFAULT_CATEGORY: &str = "Song";

/// Tunables for assembly.
#[derive(Debug, Clone)]
pub struct AssemblyOptions {
    /// Lowercase fragments; a display name containing one is non-content.
    pub non_content_keywords: Vec<String>,
    pub palette: Vec<Rgba>,
    /// Where preferred background files are looked up.
    pub background_dir: Option<PathBuf>,
    /// Master switch for the prefix group; the payload can only turn it off.
    pub include_background_group: bool,
    pub user_paths: UserPaths,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            non_content_keywords: NON_CONTENT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            palette: GROUP_PALETTE.to_vec(),
            background_dir: None,
            include_background_group: true,
            user_paths: UserPaths::detect().unwrap_or_else(|| UserPaths::new("/")),
        }
    }
}

impl AssemblyOptions {
    pub fn with_background_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.background_dir = Some(dir.into());
        self
    }

    pub fn with_user_paths(mut self, paths: UserPaths) -> Self {
        self.user_paths = paths;
        self
    }

    /// True when `name` contains one of the non-content keywords.
    pub fn is_non_content(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.non_content_keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && name.contains(&keyword.to_lowercase()))
    }

    /// Palette color for the `slot`-th created group.
    pub fn group_color(&self, slot: usize) -> Rgba {
        if self.palette.is_empty() {
            return GROUP_PALETTE[slot % GROUP_PALETTE.len()];
        }
        self.palette[slot % self.palette.len()]
    }
}

/// Outcome of a song assembly.
#[derive(Debug, Clone, Default)]
pub struct SongAssembly {
    pub report: ReconcileReport,
    /// Header line for the match summary: title, else arrangement name.
    pub heading: String,
    pub cues_written: usize,
    pub groups_written: usize,
    pub background_added: bool,
}

impl SongAssembly {
    pub fn summary_lines(&self) -> Vec<String> {
        self.report.summary_lines(&self.heading)
    }
}

/// Builds presentation content from payloads.
pub struct Assembler {
    ids: Box<dyn IdSource>,
    encoder: Box<dyn TextEncoder>,
    probe: Box<dyn MediaProbe>,
    options: AssemblyOptions,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    /// Random identifiers, RTF text, and `sips` probing.
    pub fn new() -> Self {
        Self {
            ids: Box::new(RandomIds),
            encoder: Box::new(RtfEncoder),
            probe: Box::new(SipsProbe),
            options: AssemblyOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AssemblyOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_ids(mut self, ids: impl IdSource + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_encoder(mut self, encoder: impl TextEncoder + 'static) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    pub fn with_probe(mut self, probe: impl MediaProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    pub fn options(&self) -> &AssemblyOptions {
        &self.options
    }

    /// Replace the content of `doc` with the song described by `payload`.
    pub fn assemble_song(&mut self, doc: &mut Presentation, payload: &SongPayload) -> SongAssembly {
        if doc.uuid_str().is_empty() {
            doc.uuid = Some(Uuid::new(self.ids.next_id()));
        }
        apply_song_header(doc, payload);
        doc.clear_content();

        let style = SlideStyle::from(&payload.style);
        let mut arrangement_ids: Vec<String> = Vec::new();

        let background_added =
            self.options.include_background_group && payload.include_background_group();
        if background_added {
            let group_id = self.background_group(doc, payload, &style);
            arrangement_ids.push(group_id);
        }

        let catalog = ContentCatalog::new(&payload.sections);
        let sequence = payload.sequence.as_deref();
        let reconciliation = Reconciler::new(&catalog).reconcile(sequence);

        let mut created = usize::from(background_added);
        let mut group_cache: HashMap<usize, String> = HashMap::new();

        for (position, unit) in reconciliation.units.iter().enumerate() {
            let entry = unit.source_index.and_then(|index| catalog.get(index));
            let name = display_name(&catalog, unit, entry, position);

            if let Some(group_id) = unit.source_index.and_then(|index| group_cache.get(&index)) {
                debug!(group = %name, "reusing group");
                arrangement_ids.push(group_id.clone());
                continue;
            }

            let slides = if self.options.is_non_content(&name) {
                vec![Vec::new()]
            } else {
                entry.map(|e| content_slides(e.section)).unwrap_or_default()
            };
            if slides.is_empty() {
                debug!(section = %name, "no slides; skipped");
                continue;
            }

            let color = self.options.group_color(created);
            let group_id = self.content_group(doc, &name, color, &slides, &style);
            created += 1;
            arrangement_ids.push(group_id.clone());
            if let Some(index) = unit.source_index {
                group_cache.insert(index, group_id);
            }
        }

        if !arrangement_ids.is_empty() {
            let arrangement_id = self.ids.next_id();
            doc.arrangements.push(Arrangement {
                uuid: Some(Uuid::new(arrangement_id.clone())),
                name: payload.arrangement_name().to_string(),
                group_identifiers: arrangement_ids.into_iter().map(Uuid::new).collect(),
            });
            doc.selected_arrangement = Some(Uuid::new(arrangement_id));
        }

        let heading = non_empty(Some(payload.title()))
            .unwrap_or(payload.arrangement_name())
            .to_string();
        info!(
            title = %heading,
            cues = doc.cues.len(),
            groups = doc.cue_groups.len(),
            "song assembled"
        );

        SongAssembly {
            report: reconciliation.report,
            heading,
            cues_written: doc.cues.len(),
            groups_written: doc.cue_groups.len(),
            background_added,
        }
    }

    /// Prefix group with the service side effects. Returns its group id.
    fn background_group(
        &mut self,
        doc: &mut Presentation,
        payload: &SongPayload,
        style: &SlideStyle,
    ) -> String {
        let ids = self.ids.as_mut();
        let group_id = ids.next_id();
        let app_group_id = ids.next_id();
        let mut cue = Cue::new(ids.next_id());

        let slide = lyric_slide(ids, self.encoder.as_ref(), style, &[]);
        cue.push(
            slide_action(ids, BACKGROUND_GROUP_NAME, slide)
                .with_layer(SLIDES_LAYER_UUID, SLIDES_LAYER_NAME),
        );
        cue.push(clear_action(ids, "Clear Slide", ClearTargetLayer::Slide));

        if let Some(seconds) = payload.timer_seconds() {
            let descriptor = payload.timer_descriptor.as_ref();
            let name = descriptor
                .and_then(|d| d.name())
                .unwrap_or(SERVICE_TIMER_NAME);
            cue.push(countdown_action(ids, name, name, seconds, descriptor));
        }
        if let Some(look) = payload.audience_look().and_then(|look| audience_look_action(ids, look)) {
            cue.push(look);
        }
        if let Some(stage) = payload
            .stage_layout
            .as_ref()
            .and_then(|layout| stage_layout_action(ids, layout))
        {
            cue.push(stage);
        }
        if let Some(config) = &payload.background_media {
            let paths = &self.options.user_paths;
            if let Some(path) = resolve_background(config, self.options.background_dir.as_deref(), paths) {
                cue.push(background_media_action(ids, &path, config, paths, self.probe.as_ref()));
            }
        }

        debug!(actions = cue.actions.len(), "background group built");
        let cue_id = cue.uuid_str().to_string();
        doc.cues.push(cue);
        doc.cue_groups.push(new_group(
            group_id.clone(),
            app_group_id,
            BACKGROUND_GROUP_NAME,
            self.options.group_color(0),
            vec![cue_id],
        ));
        group_id
    }

    /// One group named `name` with a cue per slide. Returns its group id.
    fn content_group(
        &mut self,
        doc: &mut Presentation,
        name: &str,
        color: Rgba,
        slides: &[Vec<String>],
        style: &SlideStyle,
    ) -> String {
        let ids = self.ids.as_mut();
        let group_id = ids.next_id();
        let app_group_id = ids.next_id();

        let mut cue_ids = Vec::with_capacity(slides.len());
        for lines in slides {
            let mut cue = Cue::new(ids.next_id());
            let slide = lyric_slide(ids, self.encoder.as_ref(), style, lines);
            cue.push(slide_action(ids, name, slide).with_layer(SLIDES_LAYER_UUID, SLIDES_LAYER_NAME));
            cue_ids.push(cue.uuid_str().to_string());
            doc.cues.push(cue);
        }

        debug!(group = name, cues = cue_ids.len(), "group built");
        doc.cue_groups
            .push(new_group(group_id.clone(), app_group_id, name, color, cue_ids));
        group_id
    }
}

fn new_group(
    uuid: String,
    app_group_id: String,
    name: &str,
    color: Rgba,
    cue_ids: Vec<String>,
) -> CueGroup {
    CueGroup {
        group: Some(Group {
            uuid: Some(Uuid::new(uuid)),
            name: name.to_string(),
            color: Some(Color::rgba(color)),
            application_group_identifier: Some(Uuid::new(app_group_id)),
            application_group_name: name.to_string(),
        }),
        cue_identifiers: cue_ids.into_iter().map(Uuid::new).collect(),
    }
}

fn apply_song_header(doc: &mut Presentation, payload: &SongPayload) {
    let mut info = ApplicationInfo {
        platform_version: Some(version(PLATFORM_VERSION)),
        application_version: Some(ApplicationVersion {
            major_version: APPLICATION_VERSION.0,
            minor_version: APPLICATION_VERSION.1,
            patch_version: APPLICATION_VERSION.2,
            build: APPLICATION_BUILD.to_string(),
        }),
        ..Default::default()
    };
    info.set_platform(Platform::Macos);
    info.set_application(Application::ProPresenter);
    doc.application_info = Some(info);

    if !payload.title().is_empty() {
        doc.name = payload.title().to_string();
    }
    if let Some(category) = non_empty(payload.category.as_deref()) {
        doc.category = category.to_string();
    } else if doc.category.trim().is_empty() {
        doc.category = DEFAULT_CATEGORY.to_string();
    }

    let background = doc.background.get_or_insert_with(Background::default);
    background.color.get_or_insert_with(Color::default).alpha = 1.0;
    doc.chord_chart
        .get_or_insert_with(Url::default)
        .set_platform(Platform::Macos);
    doc.ccli.get_or_insert_with(Ccli::default);
    doc.timeline.get_or_insert_with(Timeline::default).duration = payload.timeline_duration();
}

fn version((major, minor, patch): (u32, u32, u32)) -> Version {
    Version {
        major_version: major,
        minor_version: minor,
        patch_version: patch,
    }
}

/// Group name for a unit: resolved label, section labels, or `Section N`.
///
/// A section whose own label is the first of its kind (`Verse 1` with no
/// `Verse 2` anywhere) loses the trailing number.
fn display_name(
    catalog: &ContentCatalog<'_>,
    unit: &OrderedUnit,
    entry: Option<&CatalogEntry<'_>>,
    position: usize,
) -> String {
    let section = entry.map(|e| e.section);
    let mut name = non_empty(unit.label.as_deref())
        .or_else(|| section.and_then(|s| non_empty(s.sequence_label.as_deref())))
        .or_else(|| section.and_then(|s| non_empty(s.name.as_deref())))
        .map(str::to_string)
        .unwrap_or_else(|| format!("Section {}", position + 1));

    if let Some(entry) = entry
        && let (Some(base), Some(ordinal)) = (&entry.base, &entry.ordinal)
        && ordinal.starts_with('1')
        && !catalog.is_ordinal_ambiguous(base)
    {
        let trimmed = strip_trailing_number(entry.primary_label.unwrap_or(&name));
        if !trimmed.is_empty() {
            name = trimmed.to_string();
        }
    }
    name
}

fn strip_trailing_number(text: &str) -> &str {
    let stripped = text.trim_end_matches(|c: char| c.is_ascii_digit());
    if stripped.len() == text.len() {
        text.trim()
    } else {
        stripped.trim()
    }
}

/// Cleaned explicit slides, else the flat line list as a single slide.
fn content_slides(section: &SectionPayload) -> Vec<Vec<String>> {
    let clean = |lines: &[String]| -> Vec<String> {
        lines
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    };

    let slides: Vec<Vec<String>> = section
        .slides
        .iter()
        .map(|slide| clean(slide))
        .filter(|slide| !slide.is_empty())
        .collect();
    if !slides.is_empty() {
        return slides;
    }
    let lines = clean(&section.lyric_lines);
    if lines.is_empty() {
        Vec::new()
    } else {
        vec![lines]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ActionData, ActionType};
    use crate::ids::SequentialIds;
    use crate::payload::{SequenceEntry, parse_song};
    use media::FixedProbe;

    fn assembler() -> Assembler {
        Assembler::new()
            .with_ids(SequentialIds::new())
            .with_probe(FixedProbe::default())
            .with_options(AssemblyOptions::default().with_user_paths(UserPaths::new("/nonexistent")))
    }

    fn group_names(doc: &Presentation) -> Vec<&str> {
        doc.cue_groups.iter().map(CueGroup::name).collect()
    }

    #[test]
    fn test_non_content_keywords() {
        let options = AssemblyOptions::default();
        assert!(options.is_non_content("Intro"));
        assert!(options.is_non_content("Turn Around 2"));
        assert!(options.is_non_content("Vamp / Tag"));
        assert!(!options.is_non_content("Chorus"));
    }

    #[test]
    fn test_strip_trailing_number() {
        assert_eq!(strip_trailing_number("Verse 1"), "Verse");
        assert_eq!(strip_trailing_number("Verse1"), "Verse");
        assert_eq!(strip_trailing_number("Chorus"), "Chorus");
        assert_eq!(strip_trailing_number("12"), "");
    }

    #[test]
    fn test_content_slides_fallback_to_lines() {
        let mut section = SectionPayload::new("Verse").with_slide(["  ", ""]);
        section.lyric_lines = vec![" a ".into(), "".into(), "b".into()];
        assert_eq!(content_slides(&section), vec![vec!["a".to_string(), "b".to_string()]]);

        let section = SectionPayload::new("Verse").with_slide(["x"]).with_slide([" "]);
        assert_eq!(content_slides(&section), vec![vec!["x".to_string()]]);
    }

    #[test]
    fn test_header_defaults() {
        let mut doc = Presentation::default();
        doc.category = "Hymn".into();
        let payload = parse_song(r#"{"title": "  Be Thou My Vision "}"#).unwrap();
        assembler().assemble_song(&mut doc, &payload);

        assert_eq!(doc.name, "Be Thou My Vision");
        assert_eq!(doc.category, "Hymn");
        assert_eq!(doc.uuid_str(), "ID-0001");
        assert_eq!(doc.timeline.as_ref().unwrap().duration, 300.0);
        assert_eq!(doc.background.as_ref().unwrap().color.unwrap().alpha, 1.0);
        let info = doc.application_info.as_ref().unwrap();
        assert_eq!(info.platform(), Platform::Macos);
        assert_eq!(info.application_version.as_ref().unwrap().build, "318767361");
        assert!(doc.ccli.is_some());
    }

    #[test]
    fn test_song_groups_and_arrangement() {
        let payload = SongPayload {
            title: Some("Song".into()),
            sections: vec![
                SectionPayload::new("Verse 1").with_slide(["a"]).with_slide(["b"]),
                SectionPayload::new("Chorus").with_slide(["c"]),
                SectionPayload::new("Intro").with_slide(["ignored lyric"]),
            ],
            sequence: Some(vec![
                SequenceEntry::labelled("Intro"),
                SequenceEntry::labelled("Verse").with_number(1),
                SequenceEntry::labelled("Chorus"),
                SequenceEntry::labelled("Chorus"),
            ]),
            ..Default::default()
        };
        let mut doc = Presentation::default();
        let assembly = assembler().assemble_song(&mut doc, &payload);

        assert!(assembly.background_added);
        assert_eq!(
            group_names(&doc),
            vec![BACKGROUND_GROUP_NAME, "Intro", "Verse", "Chorus"]
        );
        // background + intro + two verse slides + chorus
        assert_eq!(assembly.cues_written, 5);
        assert_eq!(doc.cues.len(), 5);

        let colors: Vec<Rgba> = doc
            .cue_groups
            .iter()
            .map(|g| g.group.as_ref().unwrap().color.unwrap().components())
            .collect();
        assert_eq!(colors, GROUP_PALETTE[..4].to_vec());

        let arrangement = doc.selected_arrangement().unwrap();
        assert_eq!(arrangement.name, "Default");
        let chorus = doc.cue_groups[3].group.as_ref().unwrap().uuid.clone().unwrap();
        assert_eq!(arrangement.group_identifiers.len(), 5);
        assert_eq!(arrangement.group_identifiers[3], chorus);
        assert_eq!(arrangement.group_identifiers[4], chorus);

        let intro_cue = doc.cue(doc.cue_groups[1].cue_identifiers[0].string.as_str()).unwrap();
        let slide = intro_cue.actions[0].slide().unwrap();
        let text = slide.base_slide.as_ref().unwrap().elements[0]
            .element
            .as_ref()
            .unwrap()
            .text
            .as_ref()
            .unwrap();
        assert!(!String::from_utf8_lossy(&text.rtf_data).contains("IGNORED"));
    }

    #[test]
    fn test_background_group_actions() {
        let payload = parse_song(
            r#"{
                "timerSeconds": "120",
                "audienceLookName": "Lyrics",
                "stageLayout": {"layoutName": "Band", "assignments": [{"screenName": "Floor"}]},
                "sections": []
            }"#,
        )
        .unwrap();
        let mut doc = Presentation::default();
        let assembly = assembler().assemble_song(&mut doc, &payload);
        assert_eq!(assembly.cues_written, 1);

        let cue = &doc.cues[0];
        let kinds: Vec<ActionType> = cue.actions.iter().map(|a| a.action_type()).collect();
        assert_eq!(
            kinds,
            vec![
                ActionType::PresentationSlide,
                ActionType::Clear,
                ActionType::Timer,
                ActionType::AudienceLook,
                ActionType::StageLayout,
            ]
        );
        assert_eq!(cue.actions[2].name, SERVICE_TIMER_NAME);
        let Some(ActionData::Clear(clear)) = &cue.actions[1].data else {
            panic!("expected clear action");
        };
        assert_eq!(clear.target_layer(), ClearTargetLayer::Slide);
        assert_eq!(
            cue.actions[0].layer_identification.as_ref().unwrap().name,
            SLIDES_LAYER_NAME
        );
    }

    #[test]
    fn test_background_group_disabled() {
        let payload = parse_song(
            r#"{"includeBackgroundGroup": false, "sections": [{"name": "Bridge", "lyricLines": ["x"]}]}"#,
        )
        .unwrap();
        let mut doc = Presentation::default();
        let assembly = assembler().assemble_song(&mut doc, &payload);
        assert!(!assembly.background_added);
        assert_eq!(group_names(&doc), vec!["Bridge"]);
        assert_eq!(
            doc.cue_groups[0].group.as_ref().unwrap().color.unwrap().components(),
            GROUP_PALETTE[0]
        );
    }

    #[test]
    fn test_empty_payload_writes_no_arrangement() {
        let payload = parse_song(r#"{"includeBackgroundGroup": false}"#).unwrap();
        let mut doc = Presentation::default();
        doc.cues.push(Cue::new("OLD".into()));
        let assembly = assembler().assemble_song(&mut doc, &payload);
        assert_eq!(assembly.cues_written, 0);
        assert!(doc.arrangements.is_empty());
        assert!(doc.selected_arrangement.is_none());
    }

    #[test]
    fn test_unnamed_sections_numbered() {
        let payload = parse_song(
            r#"{"includeBackgroundGroup": false, "sections": [{"lyricLines": ["a"]}, {"slides": [["b"]]}]}"#,
        )
        .unwrap();
        let mut doc = Presentation::default();
        assembler().assemble_song(&mut doc, &payload);
        assert_eq!(group_names(&doc), vec!["Section 1", "Section 2"]);
    }

    #[test]
    fn test_numbered_labels_kept_when_ambiguous() {
        let payload = SongPayload {
            include_background_group: Some(false),
            sections: vec![
                SectionPayload::new("Verse 1").with_slide(["a"]),
                SectionPayload::new("Verse 2").with_slide(["b"]),
            ],
            ..Default::default()
        };
        let mut doc = Presentation::default();
        assembler().assemble_song(&mut doc, &payload);
        assert_eq!(group_names(&doc), vec!["Verse 1", "Verse 2"]);
    }
}
