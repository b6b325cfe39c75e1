//! Slides and the elements drawn on them.

use super::basic::{Color, Point, Rect, Size, Url, Uuid};

/// A slide as it appears inside a presentation cue.
#[derive(Clone, PartialEq, prost::Message)]
pub struct PresentationSlide {
    #[prost(message, optional, tag = "1")]
    pub base_slide: Option<Slide>,
    #[prost(string, tag = "2")]
    pub notes: String,
    #[prost(message, optional, tag = "3")]
    pub chord_chart: Option<Url>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Slide {
    #[prost(message, repeated, tag = "1")]
    pub elements: Vec<SlideElement>,
    #[prost(message, repeated, tag = "2")]
    pub element_build_order: Vec<Uuid>,
    #[prost(bool, tag = "3")]
    pub draws_background_color: bool,
    #[prost(message, optional, tag = "4")]
    pub background_color: Option<Color>,
    #[prost(message, optional, tag = "5")]
    pub size: Option<Size>,
    #[prost(message, optional, tag = "6")]
    pub uuid: Option<Uuid>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct SlideElement {
    #[prost(message, optional, tag = "1")]
    pub element: Option<Element>,
    #[prost(uint32, tag = "2")]
    pub info: u32,
    #[prost(message, optional, tag = "3")]
    pub text_scroller: Option<TextScroller>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct TextScroller {
    #[prost(bool, tag = "1")]
    pub should_scroll: bool,
    #[prost(double, tag = "2")]
    pub scroll_rate: f64,
    #[prost(bool, tag = "3")]
    pub should_repeat: bool,
    #[prost(double, tag = "4")]
    pub repeat_distance: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Element {
    #[prost(message, optional, tag = "1")]
    pub uuid: Option<Uuid>,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(message, optional, tag = "3")]
    pub bounds: Option<Rect>,
    #[prost(double, tag = "4")]
    pub opacity: f64,
    #[prost(message, optional, tag = "5")]
    pub path: Option<Path>,
    #[prost(message, optional, tag = "6")]
    pub fill: Option<Fill>,
    #[prost(message, optional, tag = "7")]
    pub stroke: Option<LineStyle>,
    #[prost(message, optional, tag = "8")]
    pub shadow: Option<Shadow>,
    #[prost(message, optional, tag = "9")]
    pub feather: Option<Feather>,
    #[prost(message, optional, tag = "10")]
    pub text: Option<Text>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Fill {
    #[prost(message, optional, tag = "1")]
    pub color: Option<Color>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct LineStyle {
    #[prost(double, tag = "1")]
    pub width: f64,
    #[prost(message, optional, tag = "2")]
    pub color: Option<Color>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Shadow {
    #[prost(double, tag = "1")]
    pub angle: f64,
    #[prost(double, tag = "2")]
    pub offset: f64,
    #[prost(double, tag = "3")]
    pub radius: f64,
    #[prost(message, optional, tag = "4")]
    pub color: Option<Color>,
    #[prost(double, tag = "5")]
    pub opacity: f64,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Feather {
    #[prost(double, tag = "1")]
    pub radius: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Path {
    #[prost(bool, tag = "1")]
    pub closed: bool,
    #[prost(message, repeated, tag = "2")]
    pub points: Vec<BezierPoint>,
    #[prost(message, optional, tag = "3")]
    pub shape: Option<Shape>,
}

impl Path {
    /// Closed unit-square path.
    pub fn rectangle() -> Self {
        let points = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]
            .into_iter()
            .map(|(x, y)| BezierPoint::corner(x, y))
            .collect();
        let mut shape = Shape::default();
        shape.set_shape_type(ShapeType::Rectangle);
        Self {
            closed: true,
            points,
            shape: Some(shape),
        }
    }
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct BezierPoint {
    #[prost(message, optional, tag = "1")]
    pub point: Option<Point>,
    #[prost(message, optional, tag = "2")]
    pub q0: Option<Point>,
    #[prost(message, optional, tag = "3")]
    pub q1: Option<Point>,
}

impl BezierPoint {
    /// A point whose control handles sit on the point itself.
    pub fn corner(x: f64, y: f64) -> Self {
        let at = Some(Point { x, y });
        Self {
            point: at,
            q0: at,
            q1: at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ShapeType {
    Unknown = 0,
    Rectangle = 1,
    Ellipse = 2,
    Polygon = 3,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct Shape {
    #[prost(enumeration = "ShapeType", tag = "1")]
    pub shape_type: i32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum VerticalAlignment {
    Top = 0,
    Middle = 1,
    Bottom = 2,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum ScaleBehavior {
    None = 0,
    ScaleFontDown = 1,
    ShrinkToFit = 2,
    AdjustContainerHeight = 3,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Text {
    #[prost(message, optional, tag = "1")]
    pub attributes: Option<TextAttributes>,
    #[prost(message, optional, tag = "2")]
    pub shadow: Option<Shadow>,
    #[prost(bytes = "vec", tag = "3")]
    pub rtf_data: Vec<u8>,
    #[prost(enumeration = "VerticalAlignment", tag = "4")]
    pub vertical_alignment: i32,
    #[prost(enumeration = "ScaleBehavior", tag = "5")]
    pub scale_behavior: i32,
    #[prost(bool, tag = "6")]
    pub is_superscript_standardized: bool,
    #[prost(string, tag = "7")]
    pub transform_delimiter: String,
    #[prost(message, optional, tag = "8")]
    pub chord_pro: Option<ChordPro>,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ChordPro {
    #[prost(bool, tag = "1")]
    pub enabled: bool,
    #[prost(message, optional, tag = "2")]
    pub color: Option<Color>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Capitalization {
    None = 0,
    AllCaps = 1,
    SmallCaps = 2,
    TitleCase = 3,
    StartCase = 4,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct TextAttributes {
    #[prost(message, optional, tag = "1")]
    pub font: Option<Font>,
    #[prost(enumeration = "Capitalization", tag = "2")]
    pub capitalization: i32,
    #[prost(message, optional, tag = "3")]
    pub paragraph_style: Option<ParagraphStyle>,
    #[prost(message, optional, tag = "4")]
    pub text_solid_fill: Option<Color>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct Font {
    #[prost(string, tag = "1")]
    pub name: String,
    #[prost(double, tag = "2")]
    pub size: f64,
    #[prost(bool, tag = "3")]
    pub bold: bool,
    #[prost(string, tag = "4")]
    pub family: String,
    #[prost(string, tag = "5")]
    pub face: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum Alignment {
    Left = 0,
    Right = 1,
    Center = 2,
    Justified = 3,
}

#[derive(Clone, Copy, PartialEq, prost::Message)]
pub struct ParagraphStyle {
    #[prost(enumeration = "Alignment", tag = "1")]
    pub alignment: i32,
    #[prost(double, tag = "2")]
    pub line_height_multiple: f64,
    #[prost(double, tag = "3")]
    pub default_tab_interval: f64,
}
