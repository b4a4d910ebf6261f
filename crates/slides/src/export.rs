//! Packaging a deck as a zip archive of PNG slides.

use image::{ImageFormat, RgbaImage};
use newsdeck_core::{Error, Result};
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::deck::Deck;

/// Archive entry name for the slide with the given 1-based number.
pub fn slide_file_name(number: usize) -> String {
    format!("slide-{}.png", number)
}

/// Encode a slide surface as PNG.
pub fn encode_png(surface: &RgbaImage) -> Result<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    surface
        .write_to(&mut out, ImageFormat::Png)
        .map_err(|e| Error::Export(format!("PNG encoding failed: {}", e)))?;
    Ok(out.into_inner())
}

/// Write every slide of `deck` into a zip archive, in deck order.
///
/// Returns the underlying writer once the archive is finished.
pub fn write_zip<W: Write + Seek>(deck: &Deck, writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);
    // PNG data is already compressed
    let options = FileOptions::default().compression_method(CompressionMethod::Stored);

    for rendered in &deck.slides {
        let name = slide_file_name(rendered.slide.number());
        let png = encode_png(&rendered.surface)?;

        zip.start_file(name.as_str(), options)
            .map_err(|e| Error::Export(format!("failed to add '{}': {}", name, e)))?;
        zip.write_all(&png)
            .map_err(|e| Error::Export(format!("failed to write '{}': {}", name, e)))?;
        log::debug!("Wrote {} ({} bytes)", name, png.len());
    }

    zip.finish()
        .map_err(|e| Error::Export(format!("failed to finish archive: {}", e)))
}

/// Write `deck` as a zip archive at `path`.
pub fn save_zip(deck: &Deck, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = write_zip(deck, BufWriter::new(file))?;
    writer.flush()?;
    Ok(())
}
