//! Rich-text encoding of slide text.

use std::fmt::Write as _;

use super::slide::SlideStyle;

/// Turns the lines of one slide into the bytes stored in a text element.
pub trait TextEncoder {
    fn encode(&self, lines: &[String], style: &SlideStyle) -> Vec<u8>;
}

/// Cocoa-flavored RTF: one centered paragraph, one font, one text color.
#[derive(Debug, Default, Clone, Copy)]
pub struct RtfEncoder;

const PARAGRAPH: &str = r"\pard\tx0\pardeftab1300\sl192\slmult1\pardirnatural\qc\partightenfactor0";

impl TextEncoder for RtfEncoder {
    fn encode(&self, lines: &[String], style: &SlideStyle) -> Vec<u8> {
        let mut visible: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|line| !line.trim().is_empty())
            .collect();
        if visible.is_empty() {
            visible.push(" ");
        }

        let half_points = ((style.font_size * 2.0).round() as i64).max(2);
        let [r, g, b, _] = style.text_color.map(|c| c.clamp(0.0, 1.0));

        let mut rtf = String::new();
        rtf.push_str(r"{\rtf1\ansi\ansicpg1252\cocoartf2822\cocoatextscaling0\cocoaplatform0");
        let _ = write!(rtf, r"{{\fonttbl\f0\fnil\fcharset0 {};}}", escape(&style.font_face));
        let _ = write!(
            rtf,
            r"{{\colortbl;\red255\green255\blue255;\red{}\green{}\blue{};\red0\green0\blue0;}}",
            channel(r, 255.0),
            channel(g, 255.0),
            channel(b, 255.0),
        );
        let _ = write!(
            rtf,
            r"{{\*\expandedcolortbl;;\cssrgb\c{}\c{}\c{};\csgray\c0;}}",
            channel(r, 100000.0),
            channel(g, 100000.0),
            channel(b, 100000.0),
        );
        rtf.push_str("\\deftab1300\n");
        rtf.push_str(PARAGRAPH);
        rtf.push('\n');
        rtf.push_str(r"\f0");
        if style.bold {
            rtf.push_str(r"\b");
        }
        let _ = write!(rtf, r"\fs{half_points} \cf2 \CocoaLigature0 ");

        for (i, line) in visible.iter().enumerate() {
            if i > 0 {
                rtf.push_str("\\\n");
            }
            if style.all_caps {
                rtf.push_str(&escape(&line.to_uppercase()));
            } else {
                rtf.push_str(&escape(line));
            }
        }
        rtf.push('}');
        rtf.into_bytes()
    }
}

fn channel(value: f32, scale: f64) -> i64 {
    (f64::from(value) * scale).round() as i64
}

/// Escape RTF control characters; non-ASCII becomes `\u` escapes.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' | '{' | '}' => {
                out.push('\\');
                out.push(ch);
            }
            c if c.is_ascii() => out.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    let _ = write!(out, r"\uc0\u{} ", *unit as i16);
                }
            }
        }
    }
    out
}
