#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::cast_precision_loss,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]
//! Glyph rendering for sprite sheet fonts.
//!
//! Takes a font, a fill color and a character set and renders every character into its own
//! RGBA image, optionally with a drop shadow or an outline. The images are written as
//! `XXXX.png` files (code point in hex) which an external atlas packer turns into a sprite sheet.
//!
//! ```no_run
//! use icy_glyph::{render_all, CharacterSet, Color, FontDescriptor, GlyphFont, RenderConfig};
//!
//! let font = GlyphFont::load(&FontDescriptor::from_file("DejaVuSans.ttf", 32.0)).unwrap();
//! let set = CharacterSet::normalize("Hello World");
//! let glyphs = render_all(&font, &set, &RenderConfig::new(Color::WHITE)).unwrap();
//! assert_eq!(glyphs.len(), set.len());
//! ```

mod error;
pub use error::*;

mod charset;
pub use charset::*;

mod color;
pub use color::*;

mod config;
pub use config::*;

mod raster;
pub use raster::*;

pub mod font;
pub use font::{FontDescriptor, FontStyle, GlyphFont};

mod measure;
pub use measure::*;

mod compositor;
pub use compositor::*;

mod batch;
pub use batch::*;

pub mod export;
pub mod packer;
pub mod preview;
pub mod scratch;

mod workflow;
pub use workflow::*;

pub type Result<T> = std::result::Result<T, FontMakerError>;
