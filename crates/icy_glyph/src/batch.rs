use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::{render_glyph, CharacterSet, GlyphBitmap, GlyphRasterizer, RenderConfig, RenderError};

/// Renders one character, retrying once if the rasterizer reports a transient failure.
pub fn render_with_retry<R: GlyphRasterizer + ?Sized>(rasterizer: &R, ch: char, config: &RenderConfig) -> Result<GlyphBitmap, RenderError> {
    let result = match render_glyph(rasterizer, ch, config) {
        Err(err) if err.is_transient() => {
            log::debug!("rasterizer busy while rendering {ch:?}, retrying");
            render_glyph(rasterizer, ch, config)
        }
        result => result,
    };
    result.map_err(|source| RenderError::Raster { ch, source })
}

/// Renders every character independently, one result per character in set order.
///
/// A failing character does not affect the others.
pub fn try_render_all<R: GlyphRasterizer + ?Sized>(rasterizer: &R, set: &CharacterSet, config: &RenderConfig) -> Vec<Result<GlyphBitmap, RenderError>> {
    set.chars().par_iter().map(|ch| render_with_retry(rasterizer, *ch, config)).collect()
}

/// Renders the whole set, the bitmaps are in the same order as the characters of `set`.
///
/// All characters are rendered even if one of them fails, the first failure is returned.
pub fn render_all<R: GlyphRasterizer + ?Sized>(rasterizer: &R, set: &CharacterSet, config: &RenderConfig) -> Result<Vec<GlyphBitmap>, RenderError> {
    let results = try_render_all(rasterizer, set, config);
    let mut bitmaps = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(bitmap) => bitmaps.push(bitmap),
            Err(err) => {
                log::error!("{err}");
                return Err(err);
            }
        }
    }
    Ok(bitmaps)
}

/// Like [render_all] but stops picking up new characters once `cancel` is set.
///
/// Characters already being rendered finish, the call then returns [RenderError::Cancelled].
pub fn render_all_cancellable<R: GlyphRasterizer + ?Sized>(
    rasterizer: &R,
    set: &CharacterSet,
    config: &RenderConfig,
    cancel: &AtomicBool,
) -> Result<Vec<GlyphBitmap>, RenderError> {
    let result = set
        .chars()
        .par_iter()
        .map(|ch| {
            if cancel.load(Ordering::Relaxed) {
                return Err(RenderError::Cancelled);
            }
            render_with_retry(rasterizer, *ch, config)
        })
        .collect::<Result<Vec<_>, _>>();

    // a failure may have raced with the cancellation
    if cancel.load(Ordering::Relaxed) {
        return Err(RenderError::Cancelled);
    }
    result
}
