//! Pixel-level helpers for drawing onto an RGBA surface.

use image::{Pixel, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use newsdeck_core::Color;

/// Fill a rectangle, clipped to the canvas.
pub(crate) fn fill_rect(canvas: &mut RgbaImage, x: i64, y: i64, w: i64, h: i64, color: Color) {
    let (cw, ch) = (canvas.width() as i64, canvas.height() as i64);
    let x0 = x.clamp(0, cw);
    let y0 = y.clamp(0, ch);
    let x1 = x.saturating_add(w).clamp(0, cw);
    let y1 = y.saturating_add(h).clamp(0, ch);
    if x1 <= x0 || y1 <= y0 {
        return;
    }

    let rect = Rect::at(x0 as i32, y0 as i32).of_size((x1 - x0) as u32, (y1 - y0) as u32);
    draw_filled_rect_mut(canvas, rect, Rgba(color.rgba()));
}

/// Blend `color` over one pixel with the given coverage (0 = none,
/// 255 = opaque). Out-of-bounds pixels are ignored.
pub(crate) fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, color: Color, coverage: u8) {
    if coverage == 0 || x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
        return;
    }

    let [r, g, b] = color.0;
    canvas
        .get_pixel_mut(x as u32, y as u32)
        .blend(&Rgba([r, g, b, coverage]));
}
