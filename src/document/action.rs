//! Cue actions.
//!
//! Every action carries a type tag plus exactly one payload in the
//! [`ActionData`] union. The constructors keep the two in agreement.

use super::basic::{Color, CollectionElement, Uuid};
use super::media::Media;
use super::slide::PresentationSlide;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ActionType {
    Unknown = 0,
    PresentationSlide = 1,
    Clear = 2,
    Timer = 3,
    AudienceLook = 4,
    StageLayout = 5,
    Media = 6,
    MediaBinPlaylist = 7,
    Prop = 8,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Action {
    #[prost(message, optional, tag = "1")]
    pub uuid: Option<Uuid>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(message, optional, tag = "3")]
    pub label: Option<Label>,
    #[prost(double, tag = "4")]
    pub delay_time: f64,
    #[prost(enumeration = "ActionType", tag = "5")]
    pub action_type: i32,
    #[prost(bool, tag = "6")]
    pub is_enabled: bool,
    #[prost(message, optional, tag = "7")]
    pub layer_identification: Option<LayerIdentification>,
    #[prost(double, tag = "8")]
    pub duration: f64,
    #[prost(oneof = "ActionData", tags = "20, 21, 22, 23, 24, 25, 26, 27")]
    pub data: Option<ActionData>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum ActionData {
    #[prost(message, tag = "20")]
    Slide(SlideType),
    #[prost(message, tag = "21")]
    Clear(ClearType),
    #[prost(message, tag = "22")]
    Timer(TimerType),
    #[prost(message, tag = "23")]
    AudienceLook(AudienceLookType),
    #[prost(message, tag = "24")]
    Stage(StageLayoutType),
    #[prost(message, tag = "25")]
    Media(MediaType),
    #[prost(message, tag = "26")]
    PlaylistItem(PlaylistItemType),
    #[prost(message, tag = "27")]
    Prop(PropType),
}

impl ActionData {
    /// The type tag that accompanies this payload.
    pub fn action_type(&self) -> ActionType {
        match self {
            ActionData::Slide(_) => ActionType::PresentationSlide,
            ActionData::Clear(_) => ActionType::Clear,
            ActionData::Timer(_) => ActionType::Timer,
            ActionData::AudienceLook(_) => ActionType::AudienceLook,
            ActionData::Stage(_) => ActionType::StageLayout,
            ActionData::Media(_) => ActionType::Media,
            ActionData::PlaylistItem(_) => ActionType::MediaBinPlaylist,
            ActionData::Prop(_) => ActionType::Prop,
        }
    }
}

impl Action {
    /// Enabled action with a fresh uuid and the type tag matching `data`.
    pub fn new(uuid: String, name: impl Into<String>, data: ActionData) -> Self {
        let mut action = Self {
            uuid: Some(Uuid::new(uuid)),
            name: name.into(),
            is_enabled: true,
            data: Some(data),
            ..Default::default()
        };
        if let Some(data) = &action.data {
            action.set_action_type(data.action_type());
        }
        action
    }

    pub fn with_label(mut self, text: impl Into<String>, color: Color) -> Self {
        self.label = Some(Label {
            text: text.into(),
            color: Some(color),
        });
        self
    }

    pub fn with_layer(mut self, uuid: impl Into<String>, name: impl Into<String>) -> Self {
        self.layer_identification = Some(LayerIdentification {
            uuid: Some(Uuid::new(uuid)),
            name: name.into(),
        });
        self
    }

    pub fn uuid_str(&self) -> &str {
        self.uuid.as_ref().map_or("", |u| u.string.as_str())
    }

    pub fn slide(&self) -> Option<&PresentationSlide> {
        match &self.data {
            Some(ActionData::Slide(slide)) => slide.presentation.as_ref(),
            _ => None,
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Label {
    #[prost(string, tag = "1")]
    pub text: String,
    #[prost(message, optional, tag = "2")]
    pub color: Option<Color>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LayerIdentification {
    #[prost(message, optional, tag = "1")]
    pub uuid: Option<Uuid>,
    #[prost(string, tag = "2")]
    pub name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SlideType {
    #[prost(message, optional, tag = "1")]
    pub presentation: Option<PresentationSlide>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ClearTargetLayer {
    All = 0,
    Audio = 1,
    Background = 2,
    LiveVideo = 3,
    Prop = 4,
    Slide = 5,
    Logo = 6,
    Messages = 7,
    AudioEffects = 8,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ClearType {
    #[prost(enumeration = "ClearTargetLayer", tag = "1")]
    pub target_layer: i32,
}

impl ClearType {
    pub fn of(layer: ClearTargetLayer) -> Self {
        Self {
            target_layer: layer as i32,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum TimerAction {
    Start = 0,
    Stop = 1,
    Reset = 2,
    ResetAndStart = 3,
    StopAndReset = 4,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TimerType {
    #[prost(enumeration = "TimerAction", tag = "1")]
    pub action_type: i32,
    #[prost(message, optional, tag = "2")]
    pub timer_identification: Option<CollectionElement>,
    #[prost(message, optional, tag = "3")]
    pub timer_configuration: Option<TimerConfiguration>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct TimerConfiguration {
    #[prost(bool, tag = "1")]
    pub allows_overrun: bool,
    #[prost(message, optional, tag = "2")]
    pub countdown: Option<Countdown>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Countdown {
    #[prost(double, tag = "1")]
    pub duration: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct AudienceLookType {
    #[prost(message, optional, tag = "1")]
    pub identification: Option<CollectionElement>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct StageLayoutType {
    #[prost(message, repeated, tag = "1")]
    pub stage_screen_assignments: Vec<ScreenAssignment>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ScreenAssignment {
    #[prost(message, optional, tag = "1")]
    pub screen: Option<CollectionElement>,
    #[prost(message, optional, tag = "2")]
    pub layout: Option<CollectionElement>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum LayerType {
    Background = 0,
    Foreground = 1,
    Fill = 2,
    Input = 3,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct MediaType {
    #[prost(enumeration = "LayerType", tag = "1")]
    pub layer_type: i32,
    #[prost(message, optional, tag = "2")]
    pub element: Option<Media>,
    #[prost(message, optional, tag = "3")]
    pub audio: Option<AudioSettings>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct AudioSettings {
    #[prost(bool, tag = "1")]
    pub is_muted: bool,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PlaylistItemType {
    #[prost(message, optional, tag = "1")]
    pub playlist_uuid: Option<Uuid>,
    #[prost(string, tag = "2")]
    pub playlist_name: String,
    #[prost(message, optional, tag = "3")]
    pub item_uuid: Option<Uuid>,
    #[prost(string, tag = "4")]
    pub item_name: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct PropType {
    #[prost(message, optional, tag = "1")]
    pub identification: Option<CollectionElement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_action_tags_type_from_payload() {
        let action = Action::new(
            "A-1".into(),
            "Clear Slide",
            ActionData::Clear(ClearType::of(ClearTargetLayer::Slide)),
        );
        assert_eq!(action.action_type(), ActionType::Clear);
        assert!(action.is_enabled);
        assert_eq!(action.uuid_str(), "A-1");
        assert!(action.slide().is_none());
    }
}
