//! Writes rendered glyphs as individual PNG files.
//!
//! Every glyph is stored as `XXXX.png`, the upper case hex code point padded to four
//! digits. The atlas packer recovers the character from that name.

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder};

use crate::{ExportError, GlyphBitmap, RenderError};

/// File name used for `ch`.
pub fn glyph_file_name(ch: char) -> String {
    format!("{:04X}.png", ch as u32)
}

/// Writes `bitmap` into `dir`, replacing an existing file of the same name.
///
/// `dir` has to exist.
pub fn export(bitmap: &GlyphBitmap, dir: &Path) -> Result<PathBuf, ExportError> {
    let path = dir.join(bitmap.file_name());
    let file = File::create(&path).map_err(|source| ExportError::Create { path: path.clone(), source })?;
    let mut writer = BufWriter::new(file);

    let image = bitmap.image();
    PngEncoder::new(&mut writer)
        .write_image(image.as_raw(), image.width(), image.height(), ExtendedColorType::Rgba8)
        .map_err(|source| ExportError::Encode { path: path.clone(), source })?;
    writer.flush().map_err(|source| ExportError::Write { path: path.clone(), source })?;

    Ok(path)
}

/// Outcome of exporting a batch, files that were written stay on disk even if others failed.
#[derive(Debug, Default)]
pub struct ExportReport {
    pub written: Vec<PathBuf>,
    /// Glyphs that were rendered but could not be written.
    pub failed: Vec<ExportError>,
    /// Characters that could not be rendered, nothing was written for them.
    pub render_failed: Vec<RenderError>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty() && self.render_failed.is_empty()
    }

    pub fn failure_count(&self) -> usize {
        self.failed.len() + self.render_failed.len()
    }

    pub fn total(&self) -> usize {
        self.written.len() + self.failure_count()
    }
}

/// Exports every bitmap into `dir`, collecting failures instead of stopping at the first one.
pub fn export_all(bitmaps: &[GlyphBitmap], dir: &Path) -> ExportReport {
    let mut report = ExportReport::default();
    for bitmap in bitmaps {
        match export(bitmap, dir) {
            Ok(path) => report.written.push(path),
            Err(err) => {
                log::warn!("{err}");
                report.failed.push(err);
            }
        }
    }
    report
}
