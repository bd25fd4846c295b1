//! Rasterizes single characters into RGBA images.
//!
//! Layers are composed back to front: the effect layer (shadow or outline) first,
//! then the glyph fill on top of it using straight alpha "source over" blending.

use image::{Rgba, RgbaImage};

use crate::{measure, Color, Effect, GlyphMetrics, GlyphRasterizer, Quality, RasterError, RenderConfig};

/// Largest width or height a glyph canvas may have.
pub const MAX_GLYPH_DIMENSION: u32 = 16 * 1024;

/// The rendered image of a single character.
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphBitmap {
    ch: char,
    baseline: i32,
    image: RgbaImage,
}

impl GlyphBitmap {
    pub fn new(ch: char, baseline: i32, image: RgbaImage) -> Self {
        Self { ch, baseline, image }
    }

    pub fn ch(&self) -> char {
        self.ch
    }

    pub fn code_point(&self) -> u32 {
        self.ch as u32
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Distance of the baseline from the top edge.
    pub fn baseline(&self) -> i32 {
        self.baseline
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// The name the atlas packer expects for this glyph, e.g. `0041.png` for 'A'.
    pub fn file_name(&self) -> String {
        crate::export::glyph_file_name(self.ch)
    }
}

/// Per pixel coverage of one layer.
struct CoverageMask {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl CoverageMask {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; (width * height) as usize],
        }
    }

    fn from_glyph<R: GlyphRasterizer + ?Sized>(
        rasterizer: &R,
        ch: char,
        origin: (i32, i32),
        metrics: &GlyphMetrics,
        quality: Quality,
    ) -> Result<Self, RasterError> {
        let mut mask = Self::new(metrics.width, metrics.height);
        let (width, height) = (metrics.width as i32, metrics.height as i32);
        rasterizer.rasterize(ch, origin, &mut |x, y, coverage| {
            if x < 0 || y < 0 || x >= width || y >= height {
                return;
            }
            let idx = (y * width + x) as usize;
            mask.data[idx] = mask.data[idx].max(coverage.clamp(0.0, 1.0));
        })?;
        if !quality.is_antialiased() {
            mask.threshold();
        }
        Ok(mask)
    }

    fn get(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0.0;
        }
        self.data[(y * self.width as i32 + x) as usize]
    }

    fn threshold(&mut self) {
        for v in &mut self.data {
            *v = if *v >= 0.5 { 1.0 } else { 0.0 };
        }
    }

    /// Grows the covered area by `radius` pixels in every direction, the outline stroke.
    fn dilate(&self, radius: u32, quality: Quality) -> Self {
        let r = radius as i32;
        let reach = radius as f32 + 1.0;
        let mut kernel = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                let distance = ((dx * dx + dy * dy) as f32).sqrt();
                let weight = (reach - distance).clamp(0.0, 1.0);
                if weight > 0.0 {
                    kernel.push((dx, dy, weight));
                }
            }
        }

        let mut result = Self::new(self.width, self.height);
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let mut value: f32 = 0.0;
                for &(dx, dy, weight) in &kernel {
                    value = value.max(self.get(x + dx, y + dy) * weight);
                    if value >= 1.0 {
                        break;
                    }
                }
                result.data[(y * self.width as i32 + x) as usize] = value;
            }
        }
        if !quality.is_antialiased() {
            result.threshold();
        }
        result
    }
}

/// Blends `color` over `image` wherever the mask has coverage.
fn paint(image: &mut RgbaImage, mask: &CoverageMask, color: Color) {
    for (pixel, coverage) in image.pixels_mut().zip(mask.data.iter()) {
        blend_over(pixel, color, *coverage);
    }
}

/// Straight alpha "source over". Fully transparent results are stored as transparent black.
fn blend_over(dst: &mut Rgba<u8>, src: Color, coverage: f32) {
    let src_a = src.a as f32 / 255.0 * coverage;
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    let alpha = (out_a * 255.0).round() as u8;
    if alpha == 0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    let channel = |s: u8, d: u8| ((s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a).round().clamp(0.0, 255.0) as u8;
    *dst = Rgba([channel(src.r, dst[0]), channel(src.g, dst[1]), channel(src.b, dst[2]), alpha]);
}

/// Renders `ch` with the configured fill color and effect.
///
/// Characters the font lacks are drawn with whatever glyph the rasterizer substitutes
/// (the font's missing glyph for [crate::GlyphFont]).
pub fn render_glyph<R: GlyphRasterizer + ?Sized>(rasterizer: &R, ch: char, config: &RenderConfig) -> Result<GlyphBitmap, RasterError> {
    let metrics = measure(rasterizer, ch, &config.effect)?;

    let mut image = RgbaImage::new(metrics.width, metrics.height);
    let glyph = CoverageMask::from_glyph(rasterizer, ch, metrics.origin(), &metrics, config.quality)?;

    match &config.effect {
        Effect::None => {}
        Effect::Shadow(shadow) => {
            let origin = (metrics.origin_x + shadow.offset_x, metrics.baseline + shadow.offset_y);
            let mask = CoverageMask::from_glyph(rasterizer, ch, origin, &metrics, config.quality)?;
            paint(&mut image, &mask, shadow.color);
        }
        Effect::Outline(outline) => {
            paint(&mut image, &glyph.dilate(outline.thickness(), config.quality), outline.color);
        }
    }
    paint(&mut image, &glyph, config.fill);

    Ok(GlyphBitmap::new(ch, metrics.baseline, image))
}
