//! Media elements referenced by media actions.

use super::basic::{EdgeInsets, Rect, Size, Url, Uuid};

#[derive(Clone, PartialEq, prost::Message)]
pub struct Media {
    #[prost(message, optional, tag = "1")]
    pub uuid: Option<Uuid>,
    #[prost(message, optional, tag = "2")]
    pub url: Option<Url>,
    #[prost(message, optional, tag = "3")]
    pub metadata: Option<Metadata>,
    #[prost(oneof = "TypeProperties", tags = "4, 5")]
    pub type_properties: Option<TypeProperties>,
}

#[derive(Clone, PartialEq, prost::Oneof)]
pub enum TypeProperties {
    #[prost(message, tag = "4")]
    Image(ImageTypeProperties),
    #[prost(message, tag = "5")]
    Video(VideoTypeProperties),
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Metadata {
    #[prost(string, tag = "1")]
    pub format: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ScaleBehavior {
    Fit = 0,
    Fill = 1,
    Stretch = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ScaleAlignment {
    MiddleCenter = 0,
    TopLeft = 1,
    TopCenter = 2,
    TopRight = 3,
    MiddleRight = 4,
    BottomRight = 5,
    BottomCenter = 6,
    BottomLeft = 7,
    MiddleLeft = 8,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct DrawingProperties {
    #[prost(enumeration = "ScaleBehavior", tag = "1")]
    pub scale_behavior: i32,
    #[prost(enumeration = "ScaleAlignment", tag = "2")]
    pub scale_alignment: i32,
    #[prost(message, optional, tag = "3")]
    pub natural_size: Option<Size>,
    #[prost(message, optional, tag = "4")]
    pub custom_image_bounds: Option<Rect>,
    #[prost(bool, tag = "5")]
    pub crop_enable: bool,
    #[prost(message, optional, tag = "6")]
    pub crop_insets: Option<EdgeInsets>,
}

impl DrawingProperties {
    /// Uncropped drawing of a `width` x `height` source.
    pub fn sized(scale: ScaleBehavior, width: f64, height: f64) -> Self {
        let mut drawing = Self {
            natural_size: Some(Size::new(width, height)),
            custom_image_bounds: Some(Rect::new(0.0, 0.0, width, height)),
            crop_enable: false,
            crop_insets: Some(EdgeInsets::default()),
            ..Default::default()
        };
        drawing.set_scale_behavior(scale);
        drawing.set_scale_alignment(ScaleAlignment::MiddleCenter);
        drawing
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum PlaybackBehavior {
    Stop = 0,
    Loop = 1,
    LoopForCount = 2,
    LoopForTime = 3,
    Next = 4,
}

impl PlaybackBehavior {
    /// Parse a behavior name such as `loop`, `LOOP_FOR_COUNT`, or
    /// `playback_behavior_next`.
    pub fn from_name(name: &str) -> Option<Self> {
        let upper = name.trim().to_uppercase().replace([' ', '-'], "_");
        let key = upper.strip_prefix("PLAYBACK_BEHAVIOR_").unwrap_or(&upper);
        match key {
            "STOP" => Some(Self::Stop),
            "LOOP" => Some(Self::Loop),
            "LOOP_FOR_COUNT" => Some(Self::LoopForCount),
            "LOOP_FOR_TIME" => Some(Self::LoopForTime),
            "NEXT" => Some(Self::Next),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Stop => "PLAYBACK_BEHAVIOR_STOP",
            Self::Loop => "PLAYBACK_BEHAVIOR_LOOP",
            Self::LoopForCount => "PLAYBACK_BEHAVIOR_LOOP_FOR_COUNT",
            Self::LoopForTime => "PLAYBACK_BEHAVIOR_LOOP_FOR_TIME",
            Self::Next => "PLAYBACK_BEHAVIOR_NEXT",
        }
    }
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct TransportProperties {
    #[prost(double, tag = "1")]
    pub play_rate: f64,
    #[prost(double, tag = "2")]
    pub in_point: f64,
    #[prost(double, tag = "3")]
    pub out_point: f64,
    #[prost(double, tag = "4")]
    pub end_point: f64,
    #[prost(uint32, tag = "5")]
    pub times_to_loop: u32,
    #[prost(enumeration = "PlaybackBehavior", tag = "6")]
    pub playback_behavior: i32,
    #[prost(bool, tag = "7")]
    pub should_fade_in: bool,
    #[prost(bool, tag = "8")]
    pub should_fade_out: bool,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct VideoProperties {
    #[prost(double, tag = "1")]
    pub frame_rate: f64,
    #[prost(double, tag = "2")]
    pub soft_loop_duration: f64,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct AudioProperties {
    #[prost(double, tag = "1")]
    pub volume: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct VideoTypeProperties {
    #[prost(message, optional, tag = "1")]
    pub drawing: Option<DrawingProperties>,
    #[prost(message, optional, tag = "2")]
    pub audio: Option<AudioProperties>,
    #[prost(message, optional, tag = "3")]
    pub transport: Option<TransportProperties>,
    #[prost(message, optional, tag = "4")]
    pub video: Option<VideoProperties>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ImageTypeProperties {
    #[prost(message, optional, tag = "1")]
    pub drawing: Option<DrawingProperties>,
    #[prost(message, optional, tag = "2")]
    pub file: Option<FileProperties>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct FileProperties {
    #[prost(message, optional, tag = "1")]
    pub local_url: Option<Url>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_behavior_names() {
        assert_eq!(PlaybackBehavior::from_name("loop"), Some(PlaybackBehavior::Loop));
        assert_eq!(PlaybackBehavior::from_name(" Next "), Some(PlaybackBehavior::Next));
        assert_eq!(
            PlaybackBehavior::from_name("loop for count"),
            Some(PlaybackBehavior::LoopForCount)
        );
        assert_eq!(
            PlaybackBehavior::from_name("PLAYBACK_BEHAVIOR_STOP"),
            Some(PlaybackBehavior::Stop)
        );
        assert_eq!(PlaybackBehavior::from_name("bounce"), None);
    }

    #[test]
    fn test_drawing_properties() {
        let drawing = DrawingProperties::sized(ScaleBehavior::Fill, 1280.0, 720.0);
        assert_eq!(drawing.scale_behavior(), ScaleBehavior::Fill);
        assert_eq!(drawing.natural_size, Some(Size::new(1280.0, 720.0)));
        assert!(!drawing.crop_enable);
    }
}
