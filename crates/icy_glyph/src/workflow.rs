//! The two export flows: individual glyph files, and glyph files packed into an atlas.

use std::path::Path;

use crate::{
    export::{export_all, ExportReport},
    packer::{AtlasFile, AtlasPacker, PackOptions},
    scratch::ScratchDir,
    try_render_all,
    CharacterSet, FontMakerError, GlyphRasterizer, RenderConfig, Result,
};

/// Renders `set` and writes one PNG per character into `dir`.
///
/// A character that can't be rendered or written doesn't stop the others, the failures
/// are collected in the returned [ExportReport].
pub fn save_glyphs<R: GlyphRasterizer + ?Sized>(rasterizer: &R, set: &CharacterSet, config: &RenderConfig, dir: &Path) -> Result<ExportReport> {
    if set.is_empty() {
        return Err(FontMakerError::EmptyCharacterSet);
    }
    let mut bitmaps = Vec::with_capacity(set.len());
    let mut render_failed = Vec::new();
    for result in try_render_all(rasterizer, set, config) {
        match result {
            Ok(bitmap) => bitmaps.push(bitmap),
            Err(err) => {
                log::warn!("{err}");
                render_failed.push(err);
            }
        }
    }

    let mut report = export_all(&bitmaps, dir);
    report.render_failed = render_failed;
    log::info!("wrote {} of {} glyphs to {}", report.written.len(), report.total(), dir.display());
    Ok(report)
}

/// Renders `set` into the emptied `scratch` directory and packs it into `output`.
///
/// The atlas is only packed if every glyph could be written.
pub fn export_atlas<R: GlyphRasterizer + ?Sized, P: AtlasPacker + ?Sized>(
    rasterizer: &R,
    set: &CharacterSet,
    config: &RenderConfig,
    scratch: &ScratchDir,
    packer: &P,
    output: &Path,
    options: &PackOptions,
) -> Result<AtlasFile> {
    let report = save_glyphs(rasterizer, set, config, scratch.path())?;
    if !report.is_complete() {
        return Err(FontMakerError::ExportIncomplete {
            failed: report.failure_count(),
            total: report.total(),
        });
    }
    Ok(packer.pack(scratch.path(), output, options)?)
}

/// Packs glyph images saved earlier: copies them from `glyph_dir` into `scratch` and packs them.
pub fn pack_directory<P: AtlasPacker + ?Sized>(glyph_dir: &Path, scratch: &ScratchDir, packer: &P, output: &Path, options: &PackOptions) -> Result<AtlasFile> {
    let count = scratch.import_from(glyph_dir)?;
    if count == 0 {
        return Err(FontMakerError::EmptyCharacterSet);
    }
    log::info!("packing {count} glyph files from {}", glyph_dir.display());
    Ok(packer.pack(scratch.path(), output, options)?)
}
