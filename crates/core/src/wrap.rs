//! Greedy first-fit line wrapping.

use crate::text::tokens;
use crate::types::Line;
use crate::Result;

/// Measures the rendered width of a string in pixels.
///
/// The same measurer (same font, weight and size) must be used for wrapping
/// and for drawing, otherwise wrapped lines will not fit when rendered.
pub trait TextMeasurer {
    /// Width of `text` in pixels.
    fn measure(&self, text: &str) -> Result<f32>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str) -> Result<f32> {
        (**self).measure(text)
    }
}

/// Measurer where every character has the same advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    advance: f32,
}

impl MonospaceMeasurer {
    /// Create a measurer with a fixed per-character advance in pixels.
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }

    /// One pixel per character.
    pub fn char_count() -> Self {
        Self::new(1.0)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str) -> Result<f32> {
        Ok(text.chars().count() as f32 * self.advance)
    }
}

/// Wrap `text` into lines no wider than `max_width`.
///
/// Tokens are packed greedily: each token joins the current line if the
/// joined text still measures `<= max_width`, otherwise it starts a new
/// line. A token that alone exceeds `max_width` becomes its own
/// (overflowing) line; tokens are never split.
///
/// # Errors
///
/// Fails with [`crate::Error::InvalidInput`] if the measurer fails.
pub fn wrap<M: TextMeasurer + ?Sized>(text: &str, max_width: f32, measurer: &M) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for token in tokens(text) {
        let test = if current.is_empty() {
            token.to_string()
        } else {
            format!("{} {}", current, token)
        };

        let width = measurer.measure(&test).map_err(|e| {
            crate::Error::InvalidInput(format!("failed to measure {:?}: {}", test, e))
        })?;

        if width <= max_width {
            current = test;
        } else {
            if !current.is_empty() {
                lines.push(Line::new(std::mem::take(&mut current)));
            }
            current = token.to_string();
        }
    }

    if !current.is_empty() {
        lines.push(Line::new(current));
    }

    Ok(lines)
}
