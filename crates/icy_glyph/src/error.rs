//! Error types for icy_glyph

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::FontStyle;

/// Errors raised while locating or parsing a font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("Failed to read font file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font data: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),

    #[error("No installed font matches '{family}' ({style})")]
    FamilyNotFound { family: String, style: FontStyle },

    #[error("Invalid font size: {0}")]
    InvalidSize(f32),
}

/// Errors of the rasterization facility itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterError {
    #[error("Rasterizer is unavailable")]
    Unavailable,

    #[error("Glyph canvas {width}x{height} exceeds the supported size")]
    CanvasTooLarge { width: u32, height: u32 },
}

impl RasterError {
    /// Transient errors are worth a second attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, RasterError::Unavailable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Failed to render {ch:?}: {source}")]
    Raster {
        ch: char,
        #[source]
        source: RasterError,
    },

    #[error("Rendering was cancelled")]
    Cancelled,
}

/// A single glyph file that could not be written.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to create '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode '{path}': {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    pub fn path(&self) -> &Path {
        match self {
            ExportError::Create { path, .. } | ExportError::Encode { path, .. } | ExportError::Write { path, .. } => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum PackError {
    #[error("Packer input directory '{0}' does not exist")]
    MissingInput(PathBuf),

    #[error("Failed to run packer '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ScratchError {
    #[error("Failed to prepare scratch directory '{path}': {source}")]
    Prepare {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read glyph directory '{path}': {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy '{path}' into the scratch directory: {source}")]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
#[error("Invalid color '{0}', expected #RRGGBB or #RRGGBBAA")]
pub struct ParseColorError(pub String);

#[derive(Debug, Error)]
#[error("Unknown font style '{0}', expected regular, bold, italic or bold-italic")]
pub struct ParseFontStyleError(pub String);

/// Main error type for the glyph pipeline.
#[derive(Debug, Error)]
pub enum FontMakerError {
    #[error("The character set is empty")]
    EmptyCharacterSet,

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("{failed} of {total} glyph files could not be written")]
    ExportIncomplete { failed: usize, total: usize },

    #[error(transparent)]
    Pack(#[from] PackError),

    #[error(transparent)]
    Scratch(#[from] ScratchError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
