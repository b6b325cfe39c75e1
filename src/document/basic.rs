//! Value types shared across the document schema.

use crate::payload::values::Rgba;

#[derive(Clone, PartialEq, Eq, Hash, prost::Message)]
pub struct Uuid {
    #[prost(string, tag = "1")]
    pub string: String,
}

impl Uuid {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Color {
    #[prost(float, tag = "1")]
    pub red: f32,
    #[prost(float, tag = "2")]
    pub green: f32,
    #[prost(float, tag = "3")]
    pub blue: f32,
    #[prost(float, tag = "4")]
    pub alpha: f32,
}

impl Color {
    pub fn rgba([red, green, blue, alpha]: Rgba) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    pub fn components(&self) -> Rgba {
        [self.red, self.green, self.blue, self.alpha]
    }
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Point {
    #[prost(double, tag = "1")]
    pub x: f64,
    #[prost(double, tag = "2")]
    pub y: f64,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Size {
    #[prost(double, tag = "1")]
    pub width: f64,
    #[prost(double, tag = "2")]
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Rect {
    #[prost(message, optional, tag = "1")]
    pub origin: Option<Point>,
    #[prost(message, optional, tag = "2")]
    pub size: Option<Size>,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Some(Point { x, y }),
            size: Some(Size { width, height }),
        }
    }
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct EdgeInsets {
    #[prost(double, tag = "1")]
    pub left: f64,
    #[prost(double, tag = "2")]
    pub right: f64,
    #[prost(double, tag = "3")]
    pub top: f64,
    #[prost(double, tag = "4")]
    pub bottom: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Platform {
    Unknown = 0,
    Macos = 1,
    Win32 = 2,
    WebKit = 3,
}

/// Root folder a [`LocalRelativePath`] is resolved against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum LocalRoot {
    Unknown = 0,
    BootVolume = 1,
    UserHome = 2,
    UserDocuments = 3,
    UserDownloads = 4,
    UserMusic = 5,
    UserPictures = 6,
    UserVideos = 7,
    UserDesktop = 8,
    UserAppSupport = 9,
    Shared = 10,
    Show = 11,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct LocalRelativePath {
    #[prost(enumeration = "LocalRoot", tag = "1")]
    pub root: i32,
    #[prost(string, tag = "2")]
    pub path: String,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Url {
    #[prost(string, tag = "1")]
    pub absolute_string: String,
    #[prost(enumeration = "Platform", tag = "2")]
    pub platform: i32,
    #[prost(message, optional, tag = "3")]
    pub local: Option<LocalRelativePath>,
}

/// Reference to an object owned by the host application (a look, a timer,
/// a stage screen), by uuid and display name.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CollectionElement {
    #[prost(message, optional, tag = "1")]
    pub parameter_uuid: Option<Uuid>,
    #[prost(string, tag = "2")]
    pub parameter_name: String,
}

impl CollectionElement {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            parameter_uuid: None,
            parameter_name: name.into(),
        }
    }

    pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
        self.parameter_uuid = Some(Uuid::new(uuid));
        self
    }
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Version {
    #[prost(uint32, tag = "1")]
    pub major_version: u32,
    #[prost(uint32, tag = "2")]
    pub minor_version: u32,
    #[prost(uint32, tag = "3")]
    pub patch_version: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ApplicationVersion {
    #[prost(uint32, tag = "1")]
    pub major_version: u32,
    #[prost(uint32, tag = "2")]
    pub minor_version: u32,
    #[prost(uint32, tag = "3")]
    pub patch_version: u32,
    #[prost(string, tag = "4")]
    pub build: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Application {
    Unknown = 0,
    ProPresenter = 1,
    Pvp = 2,
    ProVideoServer = 3,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct ApplicationInfo {
    #[prost(enumeration = "Platform", tag = "1")]
    pub platform: i32,
    #[prost(message, optional, tag = "2")]
    pub platform_version: Option<Version>,
    #[prost(enumeration = "Application", tag = "3")]
    pub application: i32,
    #[prost(message, optional, tag = "4")]
    pub application_version: Option<ApplicationVersion>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_color_components() {
        let color = Color::rgba([0.1, 0.2, 0.3, 1.0]);
        assert_eq!(color.components(), [0.1, 0.2, 0.3, 1.0]);
    }

    #[test]
    fn test_enumeration_accessors() {
        let mut url = Url::default();
        url.set_platform(Platform::Macos);
        assert_eq!(url.platform(), Platform::Macos);
        assert_eq!(url.platform, Platform::Macos as i32);

        let decoded = Url::decode(url.encode_to_vec().as_slice()).unwrap();
        assert_eq!(decoded, url);
    }
}
