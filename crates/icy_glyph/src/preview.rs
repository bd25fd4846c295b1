use image::{Rgba, RgbaImage};

use crate::{Color, GlyphBitmap};

/// Gap between glyphs and around the border of a preview.
pub const PREVIEW_SPACING: u32 = 2;

/// Lays the glyphs out next to each other on their common baseline.
///
/// Rows wrap when they would get wider than `max_width`.
pub fn render_preview(bitmaps: &[GlyphBitmap], background: Color, max_width: u32) -> RgbaImage {
    let mut rows: Vec<Vec<&GlyphBitmap>> = vec![Vec::new()];
    let mut row_width = PREVIEW_SPACING;
    for bitmap in bitmaps {
        let advance = bitmap.width() + PREVIEW_SPACING;
        if row_width + advance > max_width && rows.last().is_some_and(|row| !row.is_empty()) {
            rows.push(Vec::new());
            row_width = PREVIEW_SPACING;
        }
        row_width += advance;
        if let Some(row) = rows.last_mut() {
            row.push(bitmap);
        }
    }

    // ascent and descent of every row, relative to its baseline
    let extents: Vec<(u32, u32)> = rows
        .iter()
        .map(|row| {
            let above = row.iter().map(|b| b.baseline().max(0) as u32).max().unwrap_or(0);
            let below = row.iter().map(|b| (b.height() as i32 - b.baseline()).max(0) as u32).max().unwrap_or(0);
            (above, below)
        })
        .collect();

    let width = rows
        .iter()
        .map(|row| row.iter().map(|b| b.width() + PREVIEW_SPACING).sum::<u32>() + PREVIEW_SPACING)
        .max()
        .unwrap_or(PREVIEW_SPACING)
        .max(1);
    let height = extents.iter().map(|(above, below)| above + below + PREVIEW_SPACING).sum::<u32>() + PREVIEW_SPACING;

    let mut image = RgbaImage::from_pixel(width, height, Rgba::from(background));
    let mut y = PREVIEW_SPACING as i64;
    for (row, (above, below)) in rows.iter().zip(extents) {
        let mut x = PREVIEW_SPACING as i64;
        for bitmap in row {
            let top = y + above as i64 - bitmap.baseline() as i64;
            image::imageops::overlay(&mut image, bitmap.image(), x, top);
            x += (bitmap.width() + PREVIEW_SPACING) as i64;
        }
        y += (above + below + PREVIEW_SPACING) as i64;
    }
    image
}
