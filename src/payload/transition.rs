use serde::Deserialize;
use serde_json::Value;

use super::song::{StageLayout, TimerDescriptor};
use super::values;

pub const DEFAULT_TRANSITION_LABEL: &str = "Background & Lights";
pub const DEFAULT_TRANSITION_LOOK: &str = "Full Screen Media";

/// Settings for a transition presentation: a base cue with the service
/// side effects, followed by one cue per topic separated by clear cues.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionPayload {
    pub label: Option<String>,
    pub audience_look_name: Option<String>,
    pub timer_seconds: Option<Value>,
    pub timer_descriptor: Option<TimerDescriptor>,
    pub stage_layout: Option<StageLayout>,
    #[serde(default, deserialize_with = "values::objects")]
    pub topics: Vec<TopicSpec>,
    pub prop: Option<PropDescriptor>,
}

impl TransitionPayload {
    pub fn label(&self) -> &str {
        values::non_empty(self.label.as_deref()).unwrap_or(DEFAULT_TRANSITION_LABEL)
    }

    pub fn audience_look(&self) -> &str {
        values::non_empty(self.audience_look_name.as_deref()).unwrap_or(DEFAULT_TRANSITION_LOOK)
    }

    pub fn timer_seconds(&self) -> Option<f64> {
        values::positive_seconds(self.timer_seconds.as_ref())
    }

    /// Topics that carry text, in payload order.
    pub fn topics(&self) -> impl Iterator<Item = (&str, Option<&MediaDescriptor>)> {
        self.topics.iter().filter_map(|spec| {
            let topic = values::non_empty(spec.topic.as_deref())?;
            Some((topic, spec.media.as_ref()))
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSpec {
    pub topic: Option<String>,
    pub media: Option<MediaDescriptor>,
}

/// Media for a topic cue: either a file on disk or an item in the host
/// application's media bin.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDescriptor {
    #[serde(alias = "path", alias = "absolutePath")]
    pub file_path: Option<String>,
    pub format_hint: Option<String>,
    pub documents_relative_path: Option<String>,
    #[serde(alias = "id", alias = "mediaUuid", alias = "media_uuid")]
    pub uuid: Option<String>,
    #[serde(alias = "title")]
    pub name: Option<String>,
    #[serde(alias = "playlist_uuid")]
    pub playlist_uuid: Option<String>,
    #[serde(alias = "playlist_name")]
    pub playlist_name: Option<String>,
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropDescriptor {
    pub prop_uuid: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transition_defaults() {
        let payload: TransitionPayload = serde_json::from_value(json!({})).unwrap();
        assert_eq!(payload.label(), DEFAULT_TRANSITION_LABEL);
        assert_eq!(payload.audience_look(), DEFAULT_TRANSITION_LOOK);
        assert_eq!(payload.timer_seconds(), None);
        assert_eq!(payload.topics().count(), 0);
    }

    #[test]
    fn test_topics_skip_blank_entries() {
        let payload: TransitionPayload = serde_json::from_value(json!({
            "topics": [
                {"topic": "Welcome", "media": {"mediaUuid": "M-1", "title": "Intro Loop"}},
                {"topic": "   "},
                "Stray",
                null,
                {"media": {"path": "/tmp/x.png"}},
                {"topic": "Offering"}
            ]
        }))
        .unwrap();
        let topics: Vec<_> = payload.topics().collect();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[0].0, "Welcome");
        let media = topics[0].1.unwrap();
        assert_eq!(media.uuid.as_deref(), Some("M-1"));
        assert_eq!(media.name.as_deref(), Some("Intro Loop"));
        assert!(topics[1].1.is_none());
    }
}
