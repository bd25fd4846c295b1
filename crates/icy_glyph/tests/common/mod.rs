#![allow(dead_code)]

use std::path::PathBuf;

use icy_glyph::{FontDescriptor, GlyphFont};

pub static DEJAVU_SANS: &[u8] = include_bytes!("../fonts/DejaVuSans.ttf");

pub fn dejavu(size: f32) -> GlyphFont {
    GlyphFont::from_bytes(DEJAVU_SANS.to_vec(), FontDescriptor::from_file("tests/fonts/DejaVuSans.ttf", size)).unwrap()
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fresh, empty directory for a single test.
pub fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("icy_glyph_test_{}_{name}", std::process::id()));
    if dir.exists() {
        std::fs::remove_dir_all(&dir).unwrap();
    }
    std::fs::create_dir_all(&dir).unwrap();
    dir
}
