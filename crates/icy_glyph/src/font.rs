//! Font selection and loading.
//!
//! A [FontDescriptor] names a font the way a font dialog does (family, style and size),
//! optionally pinned to a font file. [GlyphFont] is the loaded, sized font used by the
//! measurer and the compositor.

use std::{
    fmt::Display,
    path::{Path, PathBuf},
    str::FromStr,
};

use ab_glyph::{point, Font as _, FontArc, FontVec, OutlinedGlyph, Point, PxScale, ScaleFont as _};
use serde::{Deserialize, Serialize};

use crate::{FontError, GlyphRasterizer, InkBounds, ParseFontStyleError, RasterError};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    fn weight(self) -> fontdb::Weight {
        match self {
            FontStyle::Regular | FontStyle::Italic => fontdb::Weight::NORMAL,
            FontStyle::Bold | FontStyle::BoldItalic => fontdb::Weight::BOLD,
        }
    }

    fn slant(self) -> fontdb::Style {
        match self {
            FontStyle::Regular | FontStyle::Bold => fontdb::Style::Normal,
            FontStyle::Italic | FontStyle::BoldItalic => fontdb::Style::Italic,
        }
    }
}

impl Display for FontStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FontStyle::Regular => "regular",
            FontStyle::Bold => "bold",
            FontStyle::Italic => "italic",
            FontStyle::BoldItalic => "bold-italic",
        };
        write!(f, "{name}")
    }
}

impl FromStr for FontStyle {
    type Err = ParseFontStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(|c: char| c == '_' || c == ' ', "-").as_str() {
            "regular" | "normal" => Ok(FontStyle::Regular),
            "bold" => Ok(FontStyle::Bold),
            "italic" => Ok(FontStyle::Italic),
            "bold-italic" | "bolditalic" => Ok(FontStyle::BoldItalic),
            _ => Err(ParseFontStyleError(s.to_string())),
        }
    }
}

/// Family, style and pixel size of a font.
///
/// If `path` is set the font is loaded from that file and `family`/`style` are only
/// descriptive, otherwise the installed fonts are searched for the best match.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FontDescriptor {
    pub family: String,
    #[serde(default)]
    pub style: FontStyle,
    pub size: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            style: FontStyle::Regular,
            size: 32.0,
            path: None,
        }
    }
}

impl FontDescriptor {
    pub fn new(family: impl Into<String>, style: FontStyle, size: f32) -> Self {
        Self {
            family: family.into(),
            style,
            size,
            path: None,
        }
    }

    pub fn from_file(path: impl Into<PathBuf>, size: f32) -> Self {
        let path = path.into();
        let family = path.file_stem().map(|stem| stem.to_string_lossy().to_string()).unwrap_or_default();
        Self {
            family,
            style: FontStyle::Regular,
            size,
            path: Some(path),
        }
    }
}

impl Display for FontDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.family, self.size)?;
        if self.style != FontStyle::Regular {
            write!(f, " ({})", self.style)?;
        }
        Ok(())
    }
}

/// A loaded font at a fixed pixel size.
#[derive(Clone)]
pub struct GlyphFont {
    inner: FontArc,
    scale: PxScale,
    descriptor: FontDescriptor,
}

impl std::fmt::Debug for GlyphFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphFont").field("descriptor", &self.descriptor).finish_non_exhaustive()
    }
}

impl GlyphFont {
    /// Loads the font the descriptor points to, either from its file or from the installed fonts.
    pub fn load(descriptor: &FontDescriptor) -> Result<Self, FontError> {
        match &descriptor.path {
            Some(path) => Self::load_file(path, descriptor.clone()),
            None => Self::load_system(descriptor),
        }
    }

    /// Parses font data that is already in memory, e.g. embedded with `include_bytes!`.
    pub fn from_bytes(data: Vec<u8>, descriptor: FontDescriptor) -> Result<Self, FontError> {
        Self::from_face(data, 0, descriptor)
    }

    fn load_file(path: &Path, descriptor: FontDescriptor) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, descriptor)
    }

    fn load_system(descriptor: &FontDescriptor) -> Result<Self, FontError> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();

        let families = [family_query(&descriptor.family)];
        let query = fontdb::Query {
            families: &families,
            weight: descriptor.style.weight(),
            stretch: fontdb::Stretch::Normal,
            style: descriptor.style.slant(),
        };
        let not_found = || FontError::FamilyNotFound {
            family: descriptor.family.clone(),
            style: descriptor.style,
        };
        let id = db.query(&query).ok_or_else(not_found)?;
        let (data, index) = db.with_face_data(id, |data, index| (data.to_vec(), index)).ok_or_else(not_found)?;
        log::debug!("using installed font {:?} for {}", db.face(id).map(|face| &face.post_script_name), descriptor);
        Self::from_face(data, index, descriptor.clone())
    }

    fn from_face(data: Vec<u8>, index: u32, descriptor: FontDescriptor) -> Result<Self, FontError> {
        if !descriptor.size.is_finite() || descriptor.size <= 0.0 {
            return Err(FontError::InvalidSize(descriptor.size));
        }
        let inner = FontArc::new(FontVec::try_from_vec_and_index(data, index)?);
        Ok(Self {
            inner,
            scale: PxScale::from(descriptor.size),
            descriptor,
        })
    }

    pub fn descriptor(&self) -> &FontDescriptor {
        &self.descriptor
    }

    pub fn size(&self) -> f32 {
        self.descriptor.size
    }

    /// Distance between two baselines in pixels.
    pub fn line_height(&self) -> u32 {
        let scaled = self.inner.as_scaled(self.scale);
        (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil().max(1.0) as u32
    }

    /// Whether the font has its own glyph for `ch` instead of the missing glyph.
    pub fn has_glyph(&self, ch: char) -> bool {
        self.inner.glyph_id(ch).0 != 0
    }

    fn outline(&self, ch: char, position: Point) -> Option<OutlinedGlyph> {
        let glyph = self.inner.glyph_id(ch).with_scale_and_position(self.scale, position);
        self.inner.outline_glyph(glyph)
    }
}

fn family_query(family: &str) -> fontdb::Family<'_> {
    match family.to_ascii_lowercase().as_str() {
        "serif" => fontdb::Family::Serif,
        "sans-serif" | "sans" => fontdb::Family::SansSerif,
        "monospace" | "mono" => fontdb::Family::Monospace,
        "cursive" => fontdb::Family::Cursive,
        "fantasy" => fontdb::Family::Fantasy,
        _ => fontdb::Family::Name(family),
    }
}

impl GlyphRasterizer for GlyphFont {
    fn ink_bounds(&self, ch: char) -> Result<Option<InkBounds>, RasterError> {
        if !self.has_glyph(ch) {
            log::debug!("{} has no glyph for {ch:?}, using the missing glyph", self.descriptor);
        }
        Ok(self.outline(ch, point(0.0, 0.0)).map(|outlined| {
            let bounds = outlined.px_bounds();
            InkBounds {
                left: bounds.min.x as i32,
                top: bounds.min.y as i32,
                right: bounds.max.x as i32,
                bottom: bounds.max.y as i32,
            }
        }))
    }

    fn rasterize(&self, ch: char, origin: (i32, i32), plot: &mut dyn FnMut(i32, i32, f32)) -> Result<(), RasterError> {
        if let Some(outlined) = self.outline(ch, point(origin.0 as f32, origin.1 as f32)) {
            let bounds = outlined.px_bounds();
            // px_bounds is already snapped to whole pixels
            let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
            outlined.draw(|x, y, coverage| plot(left + x as i32, top + y as i32, coverage));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_style() {
        assert_eq!("Bold".parse::<FontStyle>().unwrap(), FontStyle::Bold);
        assert_eq!("bold italic".parse::<FontStyle>().unwrap(), FontStyle::BoldItalic);
        assert_eq!("bold_italic".parse::<FontStyle>().unwrap(), FontStyle::BoldItalic);
        assert_eq!("normal".parse::<FontStyle>().unwrap(), FontStyle::Regular);
        assert!("heavy".parse::<FontStyle>().is_err());
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(FontDescriptor::new("Arial", FontStyle::Regular, 12.0).to_string(), "Arial-12");
        assert_eq!(FontDescriptor::new("Arial", FontStyle::Bold, 12.5).to_string(), "Arial-12.5 (bold)");
    }

    #[test]
    fn test_descriptor_from_file() {
        let descriptor = FontDescriptor::from_file("fonts/DejaVuSans.ttf", 16.0);
        assert_eq!(descriptor.family, "DejaVuSans");
        assert_eq!(descriptor.path, Some(PathBuf::from("fonts/DejaVuSans.ttf")));
    }

    #[test]
    fn test_invalid_font_data() {
        let result = GlyphFont::from_bytes(vec![0; 16], FontDescriptor::default());
        assert!(matches!(result, Err(FontError::InvalidFont(_))));
    }

    #[test]
    fn test_missing_font_file() {
        let descriptor = FontDescriptor::from_file("does/not/exist.ttf", 16.0);
        assert!(matches!(GlyphFont::load(&descriptor), Err(FontError::Read { .. })));
    }
}
