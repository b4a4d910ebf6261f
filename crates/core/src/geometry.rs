//! Slide geometry, fonts and colours.
//!
//! Wrapping and rendering both read these values from one
//! [`SlideGeometry`], so a line that fits during wrapping also fits when it
//! is drawn.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Weight and pixel size of a font.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    /// CSS-style weight, 100..=900.
    pub weight: u16,

    /// Em size in pixels.
    pub size: f32,
}

impl FontSpec {
    pub const fn new(weight: u16, size: f32) -> Self {
        Self { weight, size }
    }

    /// Weights of 600 and above use the bold face when one is available.
    pub fn is_bold(&self) -> bool {
        self.weight >= 600
    }
}

/// An opaque RGB colour, written as `#rrggbb` in configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }

    /// Parse `#rgb` or `#rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let bad = || Error::Config(format!("invalid colour {:?}", hex));

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(bad()),
        };

        let channel = |i: usize| {
            expanded
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(bad)
        };

        Ok(Self([channel(0)?, channel(2)?, channel(4)?]))
    }

    /// RGBA channels with full opacity.
    pub fn rgba(&self) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], 255]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Fill and text colours of a slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub text_panel: Color,
    pub title: Color,
    pub divider: Color,
    pub body: Color,
    pub footer: Color,
    /// Right panel when the slide has no image.
    pub image_placeholder: Color,
    /// Right panel when the image could not be fetched or decoded.
    pub image_fallback: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x0b, 0x0b, 0x0b),
            text_panel: Color::rgb(0xff, 0xff, 0xff),
            title: Color::rgb(0x0b, 0x0b, 0x0b),
            divider: Color::rgb(0xe7, 0xe7, 0xe7),
            body: Color::rgb(0x0a, 0x0a, 0x0a),
            footer: Color::rgb(0x66, 0x66, 0x66),
            image_placeholder: Color::rgb(0x11, 0x11, 0x11),
            image_fallback: Color::rgb(0x22, 0x22, 0x22),
        }
    }
}

/// Canvas size, margins, line metrics and fonts of a two-panel slide.
///
/// The left half holds the text panel, the right half the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideGeometry {
    pub width: u32,
    pub height: u32,
    /// Outer margin of the text panel.
    pub pad: u32,
    /// Vertical advance per body line.
    pub line_height: u32,
    /// Vertical space taken by the title row.
    pub title_advance: u32,
    /// Gap between the divider rule and the first body line.
    pub divider_gap: u32,
    /// Extra header margin reserved when computing page capacity.
    pub header_margin: u32,
    pub divider_thickness: u32,
    /// Space above the bottom margin kept free for the footer.
    pub footer_reserve: u32,
    /// Titles are cut to this many characters.
    pub title_max_chars: usize,
    pub title_font: FontSpec,
    pub body_font: FontSpec,
    pub footer_font: FontSpec,
    pub palette: Palette,
}

impl Default for SlideGeometry {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            pad: 48,
            line_height: 56,
            title_advance: 56,
            divider_gap: 16,
            header_margin: 40,
            divider_thickness: 2,
            footer_reserve: 60,
            title_max_chars: 120,
            title_font: FontSpec::new(700, 40.0),
            body_font: FontSpec::new(400, 44.0),
            footer_font: FontSpec::new(600, 28.0),
            palette: Palette::default(),
        }
    }
}

impl SlideGeometry {
    /// Width of each half of the slide.
    pub fn panel_width(&self) -> u32 {
        self.width / 2
    }

    /// Maximum rendered width of a body line.
    pub fn max_text_width(&self) -> f32 {
        self.panel_width().saturating_sub(self.pad.saturating_mul(2)) as f32
    }

    /// Header height: title row, divider gap and margin.
    pub fn header_space(&self) -> u32 {
        self.title_advance
            .saturating_add(self.divider_gap)
            .saturating_add(self.header_margin)
    }

    /// Number of body lines that fit below the header on one slide.
    pub fn max_lines_per_page(&self) -> usize {
        if self.line_height == 0 {
            return 0;
        }
        let usable = self
            .height
            .saturating_sub(self.pad.saturating_mul(2))
            .saturating_sub(self.header_space());
        (usable / self.line_height) as usize
    }

    /// Y of the divider rule.
    pub fn divider_y(&self) -> u32 {
        self.pad.saturating_add(self.title_advance)
    }

    /// Y at which the first body line is drawn.
    pub fn body_top(&self) -> u32 {
        self.divider_y().saturating_add(self.divider_gap)
    }

    /// Body drawing stops once the cursor passes this Y.
    pub fn body_limit(&self) -> u32 {
        self.height
            .saturating_sub(self.pad.saturating_add(self.footer_reserve))
    }

    /// Y of the footer text's top edge.
    pub fn footer_y(&self) -> u32 {
        self.height.saturating_sub(self.pad)
    }

    /// Check that the geometry describes a drawable slide.
    pub fn validate(&self) -> Result<()> {
        if self.width < 2 || self.height == 0 {
            return Err(Error::Config(format!(
                "slide size {}x{} is too small",
                self.width, self.height
            )));
        }
        if self.max_text_width() <= 0.0 {
            return Err(Error::Config(format!(
                "padding {} leaves no room for text in a {}px panel",
                self.pad,
                self.panel_width()
            )));
        }
        if self.max_lines_per_page() == 0 {
            return Err(Error::Config(
                "geometry leaves no room for body lines".to_string(),
            ));
        }
        if self.body_top() >= self.body_limit() {
            return Err(Error::Config(format!(
                "header ends at {} but the body must end by {}",
                self.body_top(),
                self.body_limit()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_geometry() {
        let g = SlideGeometry::default();
        assert_eq!(g.panel_width(), 640);
        assert_eq!(g.max_text_width(), 544.0);
        assert_eq!(g.header_space(), 112);
        assert_eq!(g.max_lines_per_page(), 9);
        assert_eq!(g.body_top(), 120);
        assert_eq!(g.body_limit(), 612);
        assert_eq!(g.footer_y(), 672);
        assert!(g.validate().is_ok());
    }

    #[test]
    fn test_render_loop_capacity_matches_page_capacity() {
        let g = SlideGeometry::default();
        let mut y = g.body_top();
        let mut drawn = 0;
        loop {
            drawn += 1;
            y += g.line_height;
            if y > g.body_limit() {
                break;
            }
        }
        assert_eq!(drawn, g.max_lines_per_page());
    }

    #[test]
    fn test_validate_rejects_oversized_padding() {
        let g = SlideGeometry {
            pad: 400,
            ..SlideGeometry::default()
        };
        assert!(matches!(g.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_validate_rejects_huge_values_without_overflow() {
        for g in [
            SlideGeometry {
                pad: 4_000_000_000,
                ..SlideGeometry::default()
            },
            SlideGeometry {
                title_advance: u32::MAX,
                ..SlideGeometry::default()
            },
            SlideGeometry {
                divider_gap: u32::MAX,
                header_margin: u32::MAX,
                ..SlideGeometry::default()
            },
            SlideGeometry {
                footer_reserve: u32::MAX,
                ..SlideGeometry::default()
            },
        ] {
            assert!(matches!(g.validate(), Err(Error::Config(_))), "{:?}", g);
        }
    }

    #[test]
    fn test_validate_rejects_header_overlapping_footer() {
        // Page capacity ignores the title row, the drawing band does not.
        let g = SlideGeometry {
            title_advance: 580,
            header_margin: 0,
            divider_gap: 0,
            line_height: 10,
            ..SlideGeometry::default()
        };
        assert!(g.max_lines_per_page() > 0);
        assert!(matches!(g.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_color_hex() {
        assert_eq!(Color::from_hex("#e7e7e7").unwrap(), Color::rgb(0xe7, 0xe7, 0xe7));
        assert_eq!(Color::from_hex("#111").unwrap(), Color::rgb(0x11, 0x11, 0x11));
        assert_eq!(Color::rgb(0x66, 0x66, 0x66).to_string(), "#666666");
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#zzzzzz").is_err());
    }

    #[test]
    fn test_font_spec_bold() {
        let g = SlideGeometry::default();
        assert!(g.title_font.is_bold());
        assert!(!g.body_font.is_bold());
        assert!(g.footer_font.is_bold());
    }
}
