//! Font backends: the measuring and drawing capability shared by the line
//! wrapper and the slide composer.

use image::RgbaImage;
use newsdeck_core::{Color, Error, FontSpec, Result, TextMeasurer};
use std::path::Path;

use crate::raster::{blend_pixel, fill_rect};

/// Measures and draws single-line text.
///
/// Text is positioned by its top edge, so `y` is where the em box starts.
pub trait FontBackend: Send + Sync {
    /// Rendered width of `text` in pixels.
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32>;

    /// Draw `text` with its top-left corner at (`x`, `y`).
    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        color: Color,
    ) -> Result<()>;
}

/// A [`FontBackend`] bound to one font, usable wherever a [`TextMeasurer`]
/// is expected.
pub struct Measurer<'a> {
    backend: &'a dyn FontBackend,
    font: FontSpec,
}

impl<'a> Measurer<'a> {
    pub fn new(backend: &'a dyn FontBackend, font: FontSpec) -> Self {
        Self { backend, font }
    }
}

impl TextMeasurer for Measurer<'_> {
    fn measure(&self, text: &str) -> Result<f32> {
        self.backend.measure(text, &self.font)
    }
}

/// Monospaced placeholder font that draws every visible character as a
/// solid box.
///
/// Needs no font files and renders deterministically.
#[derive(Debug, Clone, Copy)]
pub struct BlockFont {
    /// Character advance as a fraction of the font size.
    advance_ratio: f32,
}

impl Default for BlockFont {
    fn default() -> Self {
        Self { advance_ratio: 0.6 }
    }
}

impl BlockFont {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-character advance as a fraction of the font size.
    pub fn with_advance_ratio(mut self, ratio: f32) -> Self {
        self.advance_ratio = ratio;
        self
    }

    /// Advance of one character at the given font.
    pub fn advance(&self, font: &FontSpec) -> f32 {
        font.size * self.advance_ratio
    }
}

impl FontBackend for BlockFont {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32> {
        Ok(text.chars().count() as f32 * self.advance(font))
    }

    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        color: Color,
    ) -> Result<()> {
        let advance = self.advance(font);
        let inset = if font.is_bold() { 0.05 } else { 0.15 };
        let glyph_w = (advance * (1.0 - 2.0 * inset)).round().max(1.0) as i64;
        let glyph_h = (font.size * 0.7).round().max(1.0) as i64;
        let top = (y + font.size * 0.15).round() as i64;

        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let left = (x + i as f32 * advance + advance * inset).round() as i64;
            fill_rect(canvas, left, top, glyph_w, glyph_h, color);
        }
        Ok(())
    }
}

/// TrueType/OpenType font rasterized with `fontdue`.
///
/// Widths are the sum of horizontal advances; there is no kerning or
/// shaping.
pub struct FontdueFont {
    regular: fontdue::Font,
    bold: Option<fontdue::Font>,
}

impl FontdueFont {
    /// Load a regular face and an optional bold face from memory.
    pub fn from_bytes(regular: &[u8], bold: Option<&[u8]>) -> Result<Self> {
        let regular = load_face(regular, "regular")?;
        let bold = bold.map(|b| load_face(b, "bold")).transpose()?;
        Ok(Self { regular, bold })
    }

    /// Load a regular face and an optional bold face from font files.
    pub fn from_paths(regular: &Path, bold: Option<&Path>) -> Result<Self> {
        let regular_bytes = read_font(regular)?;
        let bold_bytes = bold.map(read_font).transpose()?;
        log::debug!(
            "Loaded font {} (bold: {})",
            regular.display(),
            bold.map(|p| p.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        );
        Self::from_bytes(&regular_bytes, bold_bytes.as_deref())
    }

    fn face(&self, font: &FontSpec) -> &fontdue::Font {
        match &self.bold {
            Some(bold) if font.is_bold() => bold,
            _ => &self.regular,
        }
    }
}

fn load_face(bytes: &[u8], label: &str) -> Result<fontdue::Font> {
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map_err(|e| Error::Render(format!("failed to parse {} font: {}", label, e)))
}

fn read_font(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path)
        .map_err(|e| Error::Render(format!("failed to read font {}: {}", path.display(), e)))
}

impl FontBackend for FontdueFont {
    fn measure(&self, text: &str, font: &FontSpec) -> Result<f32> {
        let face = self.face(font);
        Ok(text
            .chars()
            .map(|c| face.metrics(c, font.size).advance_width)
            .sum())
    }

    fn draw(
        &self,
        canvas: &mut RgbaImage,
        text: &str,
        x: f32,
        y: f32,
        font: &FontSpec,
        color: Color,
    ) -> Result<()> {
        let face = self.face(font);
        let ascent = face
            .horizontal_line_metrics(font.size)
            .map(|m| m.ascent)
            .unwrap_or(font.size * 0.8);
        let baseline = y + ascent;
        let mut pen = x;

        for c in text.chars() {
            let (metrics, coverage) = face.rasterize(c, font.size);
            let left = (pen + metrics.xmin as f32).round() as i64;
            let top = (baseline - (metrics.ymin + metrics.height as i32) as f32).round() as i64;

            for row in 0..metrics.height {
                for col in 0..metrics.width {
                    let alpha = coverage[row * metrics.width + col];
                    blend_pixel(canvas, left + col as i64, top + row as i64, color, alpha);
                }
            }
            pen += metrics.advance_width;
        }
        Ok(())
    }
}
