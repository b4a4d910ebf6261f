//! Cover-fit image placement: scale to fill a panel, preserving aspect
//! ratio, and crop the overflow equally from both sides.

use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, RgbaImage};
use newsdeck_core::{Error, Result};

/// The region of the source image that is scaled onto the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverFit {
    pub crop_x: u32,
    pub crop_y: u32,
    pub crop_width: u32,
    pub crop_height: u32,
}

impl CoverFit {
    /// Compute the centred crop of an `image_w`x`image_h` image whose aspect
    /// ratio matches a `panel_w`x`panel_h` panel.
    ///
    /// A relatively wider image keeps its full height and loses width; a
    /// relatively taller (or equally proportioned) one keeps its full width
    /// and loses height. Returns `None` if any dimension is zero.
    pub fn compute(image_w: u32, image_h: u32, panel_w: u32, panel_h: u32) -> Option<Self> {
        if image_w == 0 || image_h == 0 || panel_w == 0 || panel_h == 0 {
            return None;
        }

        let image_ratio = image_w as f64 / image_h as f64;
        let panel_ratio = panel_w as f64 / panel_h as f64;

        let fit = if image_ratio > panel_ratio {
            // Wider: fit height, crop width
            let crop_width = ((image_h as f64 * panel_ratio).round() as u32).clamp(1, image_w);
            Self {
                crop_x: (image_w - crop_width) / 2,
                crop_y: 0,
                crop_width,
                crop_height: image_h,
            }
        } else {
            // Taller: fit width, crop height
            let crop_height = ((image_w as f64 / panel_ratio).round() as u32).clamp(1, image_h);
            Self {
                crop_x: 0,
                crop_y: (image_h - crop_height) / 2,
                crop_width: image_w,
                crop_height,
            }
        };

        Some(fit)
    }
}

/// Draw `image` cover-fitted into the `width`x`height` panel at (`x`, `y`).
pub fn draw_cover(
    canvas: &mut RgbaImage,
    image: &DynamicImage,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<()> {
    let (image_w, image_h) = image.dimensions();
    let fit = CoverFit::compute(image_w, image_h, width, height).ok_or_else(|| {
        Error::ImageUnavailable(format!("cannot fit {}x{} image", image_w, image_h))
    })?;

    let cropped = image.crop_imm(fit.crop_x, fit.crop_y, fit.crop_width, fit.crop_height);
    let scaled = imageops::resize(&cropped, width, height, FilterType::Triangle);
    imageops::overlay(canvas, &scaled, x as i64, y as i64);
    Ok(())
}
