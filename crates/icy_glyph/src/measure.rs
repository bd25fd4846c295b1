use crate::{Effect, GlyphRasterizer, InkBounds, RasterError, MAX_GLYPH_DIMENSION};

/// Transparent border kept around every glyph image.
pub const GLYPH_PADDING: u32 = 1;

/// Canvas size of a glyph and where its origin sits on that canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphMetrics {
    pub width: u32,
    pub height: u32,
    /// Horizontal position of the glyph origin.
    pub origin_x: i32,
    /// Vertical position of the baseline, measured from the top edge.
    pub baseline: i32,
}

impl GlyphMetrics {
    pub fn origin(&self) -> (i32, i32) {
        (self.origin_x, self.baseline)
    }
}

/// Computes the smallest canvas holding the ink of `ch` plus the margins `effect` needs.
///
/// Glyphs without ink are treated as a single pixel on the baseline so the result is never empty.
/// Canvases larger than [MAX_GLYPH_DIMENSION] in either direction are rejected.
pub fn measure<R: GlyphRasterizer + ?Sized>(rasterizer: &R, ch: char, effect: &Effect) -> Result<GlyphMetrics, RasterError> {
    let ink = match rasterizer.ink_bounds(ch)? {
        Some(ink) if ink.width() > 0 && ink.height() > 0 => ink,
        _ => InkBounds::EMPTY,
    };
    let margins = effect.margins();

    let width = u64::from(ink.width()) + 2 * u64::from(GLYPH_PADDING) + u64::from(margins.left) + u64::from(margins.right);
    let height = u64::from(ink.height()) + 2 * u64::from(GLYPH_PADDING) + u64::from(margins.top) + u64::from(margins.bottom);
    let limit = u64::from(MAX_GLYPH_DIMENSION);
    if width > limit || height > limit {
        return Err(RasterError::CanvasTooLarge {
            width: u32::try_from(width).unwrap_or(u32::MAX),
            height: u32::try_from(height).unwrap_or(u32::MAX),
        });
    }

    // every term is bounded by the canvas limit from here on
    Ok(GlyphMetrics {
        width: width as u32,
        height: height as u32,
        origin_x: (GLYPH_PADDING + margins.left) as i32 - ink.left,
        baseline: (GLYPH_PADDING + margins.top) as i32 - ink.top,
    })
}
