//! Slide templates.

use crate::document::basic::{Color, Platform, Rect, Size, Url, Uuid};
use crate::document::slide::{
    Alignment, Capitalization, ChordPro, Element, Feather, Fill, Font, LineStyle, ParagraphStyle,
    Path, PresentationSlide, ScaleBehavior, Shadow, Slide, SlideElement, Text, TextAttributes,
    TextScroller, VerticalAlignment,
};
use crate::ids::IdSource;
use crate::payload::TextStyle;
use crate::payload::values::{Rgba, WHITE};
use crate::util::sanitize_text;

use super::rich_text::TextEncoder;

pub const SLIDE_WIDTH: f64 = 1920.0;
pub const SLIDE_HEIGHT: f64 = 1080.0;

const LYRICS_ELEMENT: &str = "Lyrics";
const CHORD_COLOR: Rgba = [0.993, 0.76, 0.032, 1.0];
const BULLET_DELIMITER: &str = "  \u{2022}  ";

/// Resolved text styling for generated slides.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideStyle {
    pub font_face: String,
    pub font_family: String,
    pub font_size: f64,
    pub bold: bool,
    pub all_caps: bool,
    pub text_color: Rgba,
    pub fill_color: Rgba,
}

impl Default for SlideStyle {
    fn default() -> Self {
        Self::from(&TextStyle::default())
    }
}

impl From<&TextStyle> for SlideStyle {
    fn from(style: &TextStyle) -> Self {
        Self {
            font_face: style.font_face().to_string(),
            font_family: style.font_family().to_string(),
            font_size: f64::from(style.font_size()),
            bold: style.bold(),
            all_caps: style.all_caps(),
            text_color: style.text_color(),
            fill_color: style.fill_color(),
        }
    }
}

/// Full-size slide with no elements.
pub fn blank_slide(ids: &mut dyn IdSource) -> PresentationSlide {
    PresentationSlide {
        base_slide: Some(base_slide(ids)),
        ..Default::default()
    }
}

/// Full-size slide with one centered `Lyrics` text box.
///
/// Lines are sanitized and blank ones dropped; a slide with no text left
/// still gets its text box, holding a single space.
pub fn lyric_slide(
    ids: &mut dyn IdSource,
    encoder: &dyn TextEncoder,
    style: &SlideStyle,
    lines: &[String],
) -> PresentationSlide {
    let mut slide = base_slide(ids);
    let element_uuid = ids.next_id();

    let mut lines: Vec<String> = lines
        .iter()
        .map(|line| sanitize_text(line))
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        lines.push(" ".to_string());
    }

    let shadow = Shadow {
        angle: 315.0,
        offset: 5.0,
        radius: 5.0,
        color: Some(Color::rgba([0.0, 0.0, 0.0, 1.0])),
        opacity: 0.75,
    };

    let mut paragraph = ParagraphStyle {
        line_height_multiple: 0.8,
        default_tab_interval: 65.0,
        ..Default::default()
    };
    paragraph.set_alignment(Alignment::Center);

    let mut attributes = TextAttributes {
        font: Some(Font {
            name: style.font_face.clone(),
            size: style.font_size,
            bold: style.bold,
            family: style.font_family.clone(),
            face: style.font_face.clone(),
        }),
        paragraph_style: Some(paragraph),
        text_solid_fill: Some(Color::rgba(style.text_color)),
        ..Default::default()
    };
    attributes.set_capitalization(if style.all_caps {
        Capitalization::AllCaps
    } else {
        Capitalization::None
    });

    let mut text = Text {
        attributes: Some(attributes),
        shadow: Some(shadow),
        rtf_data: encoder.encode(&lines, style),
        is_superscript_standardized: true,
        transform_delimiter: BULLET_DELIMITER.to_string(),
        chord_pro: Some(ChordPro {
            enabled: false,
            color: Some(Color::rgba(CHORD_COLOR)),
        }),
        ..Default::default()
    };
    text.set_vertical_alignment(VerticalAlignment::Middle);
    text.set_scale_behavior(ScaleBehavior::AdjustContainerHeight);

    let element = Element {
        uuid: Some(Uuid::new(element_uuid.clone())),
        name: LYRICS_ELEMENT.to_string(),
        bounds: Some(Rect::new(150.0, 405.4, 1620.0, 269.2)),
        opacity: 1.0,
        path: Some(Path::rectangle()),
        fill: Some(Fill {
            color: Some(Color::rgba(style.fill_color)),
        }),
        stroke: Some(LineStyle {
            width: 3.0,
            color: Some(Color::rgba(WHITE)),
        }),
        shadow: Some(shadow),
        feather: Some(Feather { radius: 0.05 }),
        text: Some(text),
    };

    slide.elements.push(SlideElement {
        element: Some(element),
        info: 3,
        text_scroller: Some(TextScroller {
            should_scroll: false,
            scroll_rate: 0.5,
            should_repeat: true,
            repeat_distance: 0.06172839506172839,
        }),
    });
    slide.element_build_order.push(Uuid::new(element_uuid));

    let mut chord_chart = Url::default();
    chord_chart.set_platform(Platform::Macos);

    PresentationSlide {
        base_slide: Some(slide),
        notes: String::new(),
        chord_chart: Some(chord_chart),
    }
}

fn base_slide(ids: &mut dyn IdSource) -> Slide {
    Slide {
        uuid: Some(Uuid::new(ids.next_id())),
        draws_background_color: false,
        background_color: Some(Color::rgba([0.0; 4])),
        size: Some(Size::new(SLIDE_WIDTH, SLIDE_HEIGHT)),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::rich_text::RtfEncoder;
    use crate::ids::SequentialIds;

    fn element(slide: &PresentationSlide) -> &Element {
        slide.base_slide.as_ref().unwrap().elements[0]
            .element
            .as_ref()
            .unwrap()
    }

    #[test]
    fn test_lyric_slide_layout() {
        let mut ids = SequentialIds::new();
        let style = SlideStyle::default();
        let slide = lyric_slide(&mut ids, &RtfEncoder, &style, &["It\u{2019}s  here".to_string()]);

        let base = slide.base_slide.as_ref().unwrap();
        assert_eq!(base.size, Some(Size::new(1920.0, 1080.0)));
        assert!(!base.draws_background_color);
        assert_eq!(base.elements.len(), 1);
        assert_eq!(base.element_build_order, vec![Uuid::new("ID-0002")]);

        let element = element(&slide);
        assert_eq!(element.name, "Lyrics");
        assert_eq!(element.uuid, Some(Uuid::new("ID-0002")));
        assert_eq!(element.fill.unwrap().color.unwrap().components(), TextStyle::DEFAULT_FILL);

        let text = element.text.as_ref().unwrap();
        let rtf = String::from_utf8(text.rtf_data.clone()).unwrap();
        assert!(rtf.contains("IT'S HERE"));
        assert_eq!(text.vertical_alignment(), VerticalAlignment::Middle);
        let attributes = text.attributes.as_ref().unwrap();
        assert_eq!(attributes.capitalization(), Capitalization::AllCaps);
        assert_eq!(attributes.font.as_ref().unwrap().family, "Bebas Neue");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_blank_slide_has_no_elements() {
        let mut ids = SequentialIds::new();
        let slide = blank_slide(&mut ids);
        assert!(slide.base_slide.unwrap().elements.is_empty());
    }
}
