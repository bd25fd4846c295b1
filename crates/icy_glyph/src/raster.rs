use crate::RasterError;

/// Integer pixel bounds of a glyph's ink relative to its origin on the baseline.
///
/// `top` is negative for ink above the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkBounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl InkBounds {
    /// Stand-in for glyphs without any ink: one pixel sitting on the baseline.
    pub const EMPTY: InkBounds = InkBounds {
        left: 0,
        top: -1,
        right: 1,
        bottom: 0,
    };

    pub fn width(&self) -> u32 {
        (self.right - self.left).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.bottom - self.top).max(0) as u32
    }
}

/// The rasterization facility the measurer and the compositor draw with.
///
/// Implementations must be usable from several threads at once, the batch renderer
/// renders characters in parallel.
pub trait GlyphRasterizer: Sync {
    /// Ink bounds of `ch` with its origin at (0, 0), `None` if the glyph has no ink.
    fn ink_bounds(&self, ch: char) -> Result<Option<InkBounds>, RasterError>;

    /// Rasterizes `ch` with its origin at `origin` and reports the coverage (0.0..=1.0)
    /// of every touched pixel.
    fn rasterize(&self, ch: char, origin: (i32, i32), plot: &mut dyn FnMut(i32, i32, f32)) -> Result<(), RasterError>;
}
