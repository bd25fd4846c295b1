use serde::{Deserialize, Serialize};

use crate::Color;

/// Antialiasing mode used while rasterizing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    /// Antialiased glyph edges.
    #[default]
    High,
    /// Aliased glyph edges, every pixel is either fully covered or empty.
    Fast,
}

impl Quality {
    pub fn from_antialiasing(antialiasing: bool) -> Self {
        if antialiasing {
            Quality::High
        } else {
            Quality::Fast
        }
    }

    pub fn is_antialiased(self) -> bool {
        matches!(self, Quality::High)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShadowEffect {
    pub color: Color,
    pub offset_x: i32,
    pub offset_y: i32,
}

impl ShadowEffect {
    pub fn new(color: Color, offset_x: i32, offset_y: i32) -> Self {
        Self { color, offset_x, offset_y }
    }
}

/// Upper bound for the outline thickness in pixels.
pub const MAX_OUTLINE_THICKNESS: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct OutlineEffect {
    pub color: Color,
    thickness: u32,
}

impl OutlineEffect {
    /// Thickness is in pixels, between 1 and [MAX_OUTLINE_THICKNESS].
    pub fn new(color: Color, thickness: u32) -> Self {
        Self {
            color,
            thickness: thickness.clamp(1, MAX_OUTLINE_THICKNESS),
        }
    }

    pub fn thickness(&self) -> u32 {
        self.thickness
    }
}

/// Extra canvas space an effect needs around the glyph ink.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Margins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Margins {
    pub fn horizontal(&self) -> u32 {
        self.left.saturating_add(self.right)
    }

    pub fn vertical(&self) -> u32 {
        self.top.saturating_add(self.bottom)
    }
}

/// The decoration drawn beneath the glyph fill. Shadow and outline exclude each other.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Effect {
    #[default]
    None,
    Shadow(ShadowEffect),
    Outline(OutlineEffect),
}

impl Effect {
    /// Builds the effect from independently toggled settings.
    ///
    /// When both a shadow and an outline are requested the outline wins.
    pub fn resolve(shadow: Option<ShadowEffect>, outline: Option<OutlineEffect>) -> Self {
        match (shadow, outline) {
            (_, Some(outline)) => {
                if shadow.is_some() {
                    log::debug!("shadow and outline both requested, using the outline");
                }
                Effect::Outline(outline)
            }
            (Some(shadow), None) => Effect::Shadow(shadow),
            (None, None) => Effect::None,
        }
    }

    pub fn margins(&self) -> Margins {
        match self {
            Effect::None => Margins::default(),
            Effect::Shadow(shadow) => {
                let (left, right) = split_offset(shadow.offset_x);
                let (top, bottom) = split_offset(shadow.offset_y);
                Margins { left, top, right, bottom }
            }
            Effect::Outline(outline) => {
                let t = outline.thickness();
                Margins {
                    left: t,
                    top: t,
                    right: t,
                    bottom: t,
                }
            }
        }
    }
}

/// Negative offsets grow the leading edge, positive ones the trailing edge.
fn split_offset(offset: i32) -> (u32, u32) {
    if offset < 0 {
        (offset.unsigned_abs(), 0)
    } else {
        (0, offset.unsigned_abs())
    }
}

/// Everything the compositor needs besides the font.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderConfig {
    pub fill: Color,
    pub quality: Quality,
    pub effect: Effect,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fill: Color::WHITE,
            quality: Quality::High,
            effect: Effect::None,
        }
    }
}

impl RenderConfig {
    pub fn new(fill: Color) -> Self {
        Self { fill, ..Default::default() }
    }

    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effect = effect;
        self
    }
}
