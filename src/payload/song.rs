use serde::Deserialize;
use serde_json::Value;

use super::values::{self, Rgba, WHITE};
use crate::label;

/// Default arrangement name when the payload gives none.
pub const DEFAULT_ARRANGEMENT_NAME: &str = "Default";

/// Default timeline duration in seconds.
pub const DEFAULT_TIMELINE_DURATION: f64 = 300.0;

/// Everything needed to rebuild one song presentation.
///
/// ```
/// let payload = cuebuild::payload::parse_song(r#"{
///     "title": "Example",
///     "sections": [{"name": "Verse 1", "slides": [["Line one", "Line two"]]}],
///     "sequence": [{"label": "Verse", "number": 1}]
/// }"#).unwrap();
/// assert_eq!(payload.arrangement_name(), "Default");
/// assert_eq!(payload.sections.len(), 1);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SongPayload {
    pub title: Option<String>,
    pub arrangement_name: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "values::objects")]
    pub sections: Vec<SectionPayload>,
    #[serde(default, deserialize_with = "values::optional_objects")]
    pub sequence: Option<Vec<SequenceEntry>>,
    #[serde(flatten)]
    pub style: TextStyle,
    pub timer_seconds: Option<Value>,
    pub timer_descriptor: Option<TimerDescriptor>,
    pub audience_look_name: Option<String>,
    pub stage_layout: Option<StageLayout>,
    #[serde(alias = "background")]
    pub background_media: Option<BackgroundMedia>,
    #[serde(default, deserialize_with = "values::loose_number")]
    pub timeline_duration: Option<f64>,
    pub include_background_group: Option<bool>,
}

impl SongPayload {
    /// Trimmed title, empty when absent.
    pub fn title(&self) -> &str {
        values::non_empty(self.title.as_deref()).unwrap_or("")
    }

    pub fn arrangement_name(&self) -> &str {
        values::non_empty(self.arrangement_name.as_deref()).unwrap_or(DEFAULT_ARRANGEMENT_NAME)
    }

    /// Countdown length for the service timer, if a usable one was given.
    pub fn timer_seconds(&self) -> Option<f64> {
        values::positive_seconds(self.timer_seconds.as_ref())
    }

    pub fn audience_look(&self) -> Option<&str> {
        values::non_empty(self.audience_look_name.as_deref())
    }

    pub fn timeline_duration(&self) -> f64 {
        self.timeline_duration
            .filter(|d| d.is_finite() && *d > 0.0)
            .unwrap_or(DEFAULT_TIMELINE_DURATION)
    }

    pub fn include_background_group(&self) -> bool {
        self.include_background_group.unwrap_or(true)
    }
}

/// One block of source content.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionPayload {
    pub id: Option<Value>,
    pub name: Option<String>,
    pub sequence_label: Option<String>,
    /// Explicit slides, each a list of lines.
    #[serde(default, alias = "lyricSlides", deserialize_with = "values::text_slides")]
    pub slides: Vec<Vec<String>>,
    /// Flat line list used when `slides` yields nothing.
    #[serde(default, alias = "lines", deserialize_with = "values::text_lines")]
    pub lyric_lines: Vec<String>,
}

impl SectionPayload {
    /// Shorthand for a section with a name and slides.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(Value::String(id.into()));
        self
    }

    pub fn with_sequence_label(mut self, label: impl Into<String>) -> Self {
        self.sequence_label = Some(label.into());
        self
    }

    pub fn with_slide<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slides.push(lines.into_iter().map(Into::into).collect());
        self
    }

    /// External identifier; numeric ids are accepted and stringified.
    pub fn section_id(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(text) => values::non_empty(Some(text)).map(str::to_string),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The raw labels that participate in matching, `sequenceLabel` first.
    pub fn raw_labels(&self) -> impl Iterator<Item = &str> {
        [self.sequence_label.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
    }

    /// First non-empty of `sequenceLabel` and `name`, trimmed.
    pub fn primary_label(&self) -> Option<&str> {
        self.raw_labels().find_map(|raw| values::non_empty(Some(raw)))
    }

    /// Human-readable name for diagnostics.
    pub fn describe(&self) -> String {
        if let Some(label) = self.primary_label() {
            return label.to_string();
        }
        self.section_id().unwrap_or_else(|| "(unnamed)".to_string())
    }
}

/// One element of the desired performance order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequenceEntry {
    pub label: Option<Value>,
    pub number: Option<Value>,
    pub section_id: Option<Value>,
}

impl SequenceEntry {
    pub fn labelled(label: impl Into<String>) -> Self {
        Self {
            label: Some(Value::String(label.into())),
            ..Default::default()
        }
    }

    pub fn with_number(mut self, number: impl Into<Value>) -> Self {
        self.number = Some(number.into());
        self
    }

    pub fn with_section_id(mut self, id: impl Into<String>) -> Self {
        self.section_id = Some(Value::String(id.into()));
        self
    }

    /// Trimmed label text; non-string labels count as absent.
    pub fn label_text(&self) -> &str {
        match &self.label {
            Some(Value::String(text)) => text.trim(),
            _ => "",
        }
    }

    /// Explicit ordinal from the `number` field.
    pub fn ordinal(&self) -> Option<String> {
        self.number.as_ref().and_then(label::ordinal_from_value)
    }

    /// Direct section reference; only string ids are honored.
    pub fn section_ref(&self) -> Option<&str> {
        match &self.section_id {
            Some(Value::String(text)) => values::non_empty(Some(text)),
            _ => None,
        }
    }
}

/// Font and color settings shared by every generated slide.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_face: Option<String>,
    pub font_family: Option<String>,
    #[serde(default, deserialize_with = "values::loose_number")]
    pub font_size: Option<f64>,
    pub font_bold: Option<bool>,
    pub all_caps: Option<bool>,
    pub text_color: Option<Value>,
    pub fill_color: Option<Value>,
}

impl TextStyle {
    pub const DEFAULT_FONT_FACE: &'static str = "BebasNeueBold";
    pub const DEFAULT_FONT_FAMILY: &'static str = "Bebas Neue";
    pub const DEFAULT_FONT_SIZE: u32 = 120;
    pub const DEFAULT_FILL: Rgba = [0.13, 0.59, 0.95, 1.0];

    pub fn font_face(&self) -> &str {
        values::non_empty(self.font_face.as_deref()).unwrap_or(Self::DEFAULT_FONT_FACE)
    }

    pub fn font_family(&self) -> &str {
        values::non_empty(self.font_family.as_deref()).unwrap_or(Self::DEFAULT_FONT_FAMILY)
    }

    pub fn font_size(&self) -> u32 {
        match self.font_size {
            Some(size) if size.is_finite() && size >= 1.0 => size as u32,
            _ => Self::DEFAULT_FONT_SIZE,
        }
    }

    pub fn bold(&self) -> bool {
        self.font_bold.unwrap_or(true)
    }

    pub fn all_caps(&self) -> bool {
        self.all_caps.unwrap_or(true)
    }

    pub fn text_color(&self) -> Rgba {
        values::parse_color(self.text_color.as_ref(), WHITE)
    }

    pub fn fill_color(&self) -> Rgba {
        values::parse_color(self.fill_color.as_ref(), Self::DEFAULT_FILL)
    }
}

/// Identification of an existing timer in the host application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerDescriptor {
    pub name: Option<String>,
    pub uuid: Option<String>,
    pub allows_overrun: Option<bool>,
}

impl TimerDescriptor {
    pub fn name(&self) -> Option<&str> {
        values::non_empty(self.name.as_deref())
    }

    pub fn uuid(&self) -> Option<&str> {
        values::non_empty(self.uuid.as_deref())
    }
}

/// Stage layout to assign to one or more stage screens.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageLayout {
    pub layout_name: Option<String>,
    pub layout_uuid: Option<String>,
    #[serde(default, deserialize_with = "values::objects")]
    pub assignments: Vec<ScreenAssignment>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenAssignment {
    #[serde(alias = "screenUuid")]
    pub uuid: Option<String>,
    #[serde(alias = "screenName")]
    pub name: Option<String>,
}

/// Background video attached to the prefix cue.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundMedia {
    #[serde(alias = "path", alias = "absolutePath")]
    pub file_path: Option<String>,
    #[serde(alias = "preferredName")]
    pub preferred_file: Option<String>,
    #[serde(default, alias = "duration", deserialize_with = "values::loose_number")]
    pub duration_seconds: Option<f64>,
    #[serde(default, deserialize_with = "values::loose_number")]
    pub volume: Option<f64>,
    pub playback_behavior: Option<String>,
    pub fade_in: Option<bool>,
    pub fade_out: Option<bool>,
    pub times_to_loop: Option<i64>,
    #[serde(alias = "frame_rate")]
    pub frame_rate: Option<f64>,
    #[serde(alias = "soft_loop_duration")]
    pub soft_loop_duration: Option<f64>,
}
