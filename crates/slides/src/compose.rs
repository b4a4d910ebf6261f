//! Rendering one two-panel slide: text on the left, image on the right.

use image::{DynamicImage, RgbaImage};
use newsdeck_core::{Color, Error, ImageSource, Result, Slide, SlideGeometry};
use std::sync::Arc;

use crate::cover::draw_cover;
use crate::font::FontBackend;
use crate::raster::fill_rect;

/// A slide together with its rendered surface.
#[derive(Debug, Clone)]
pub struct RenderedSlide {
    pub slide: Slide,
    pub surface: RgbaImage,
}

/// What to show in the right-hand panel.
#[derive(Debug, Clone)]
pub enum ImagePanel {
    /// The slide has no image.
    Empty,
    /// The decoded image, cover-fitted into the panel.
    Image(DynamicImage),
    /// The image could not be loaded.
    Unavailable,
}

/// Composes slides onto fixed-size surfaces.
pub struct SlideComposer {
    geometry: SlideGeometry,
    fonts: Arc<dyn FontBackend>,
    images: Arc<dyn ImageSource>,
}

impl SlideComposer {
    /// Create a composer. `geometry` and `fonts` must be the ones the body
    /// text was wrapped with.
    pub fn new(
        geometry: SlideGeometry,
        fonts: Arc<dyn FontBackend>,
        images: Arc<dyn ImageSource>,
    ) -> Self {
        Self {
            geometry,
            fonts,
            images,
        }
    }

    /// Fetch the slide's image (if any) and render the slide.
    ///
    /// Image failures never fail composition; the panel is filled with the
    /// fallback colour instead.
    pub async fn compose(&self, slide: Slide) -> Result<RenderedSlide> {
        let panel = match &slide.image_source {
            Some(url) => match self.load_image(url).await {
                Ok(image) => ImagePanel::Image(image),
                Err(e) => {
                    log::warn!("Slide {}: {}", slide.number(), e);
                    ImagePanel::Unavailable
                }
            },
            None => ImagePanel::Empty,
        };

        let surface = self.render(&slide, &panel)?;
        Ok(RenderedSlide { slide, surface })
    }

    async fn load_image(&self, url: &str) -> Result<DynamicImage> {
        let fetched = self.images.fetch(url).await.map_err(|e| match e {
            Error::ImageUnavailable(_) => e,
            other => Error::ImageUnavailable(format!("{}: {}", url, other)),
        })?;

        log::debug!(
            "Fetched {} ({} bytes, {})",
            url,
            fetched.bytes.len(),
            fetched.content_type
        );

        image::load_from_memory(&fetched.bytes)
            .map_err(|e| Error::ImageUnavailable(format!("cannot decode {}: {}", url, e)))
    }

    /// Render `slide` with the given right-hand panel.
    pub fn render(&self, slide: &Slide, panel: &ImagePanel) -> Result<RgbaImage> {
        let g = &self.geometry;
        let palette = &g.palette;
        let half = g.panel_width();
        let pad = g.pad as f32;

        let mut canvas = RgbaImage::new(g.width, g.height);
        fill(&mut canvas, 0, 0, g.width, g.height, palette.background);

        self.render_image_panel(&mut canvas, slide, panel);

        // Text panel
        fill(&mut canvas, 0, 0, half, g.height, palette.text_panel);

        self.fonts
            .draw(&mut canvas, &slide.title, pad, pad, &g.title_font, palette.title)?;

        fill(
            &mut canvas,
            g.pad,
            g.divider_y(),
            half.saturating_sub(g.pad.saturating_mul(2)),
            g.divider_thickness,
            palette.divider,
        );

        let mut y = g.body_top();
        for line in slide.body.lines() {
            self.fonts
                .draw(&mut canvas, line.as_str(), pad, y as f32, &g.body_font, palette.body)?;
            y += g.line_height;
            if y > g.body_limit() {
                break;
            }
        }

        let footer = slide.footer();
        let footer_width = self.fonts.measure(&footer, &g.footer_font)?;
        self.fonts.draw(
            &mut canvas,
            &footer,
            half as f32 - pad - footer_width,
            g.footer_y() as f32,
            &g.footer_font,
            palette.footer,
        )?;

        Ok(canvas)
    }

    fn render_image_panel(&self, canvas: &mut RgbaImage, slide: &Slide, panel: &ImagePanel) {
        let g = &self.geometry;
        let half = g.panel_width();
        let panel_width = g.width - half;

        fill(canvas, half, 0, panel_width, g.height, g.palette.image_placeholder);

        match panel {
            ImagePanel::Empty => {}
            ImagePanel::Image(image) => {
                if let Err(e) = draw_cover(canvas, image, half, 0, panel_width, g.height) {
                    log::warn!("Slide {}: {}", slide.number(), e);
                    fill(canvas, half, 0, panel_width, g.height, g.palette.image_fallback);
                }
            }
            ImagePanel::Unavailable => {
                fill(canvas, half, 0, panel_width, g.height, g.palette.image_fallback);
            }
        }
    }
}

fn fill(canvas: &mut RgbaImage, x: u32, y: u32, w: u32, h: u32, color: Color) {
    fill_rect(canvas, x as i64, y as i64, w as i64, h as i64, color);
}
