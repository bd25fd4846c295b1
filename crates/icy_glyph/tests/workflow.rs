use std::{
    cell::RefCell,
    fs,
    path::{Path, PathBuf},
};

use icy_glyph::{
    export_atlas, pack_directory,
    packer::{AtlasFile, AtlasPacker, PackOptions},
    save_glyphs,
    scratch::ScratchDir,
    CharacterSet, Color, Effect, FontMakerError, GlyphFont, GlyphRasterizer, InkBounds, PackError, RasterError, RenderConfig, RenderError, ShadowEffect,
};
use pretty_assertions::assert_eq;

mod common;

/// Remembers what it was asked to pack and which files it found.
#[derive(Default)]
struct RecordingPacker {
    calls: RefCell<Vec<(PathBuf, Vec<String>, PackOptions)>>,
}

impl AtlasPacker for RecordingPacker {
    fn pack(&self, input_dir: &Path, output: &Path, options: &PackOptions) -> Result<AtlasFile, PackError> {
        if !input_dir.is_dir() {
            return Err(PackError::MissingInput(input_dir.to_path_buf()));
        }
        let mut files: Vec<String> = fs::read_dir(input_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        files.sort();
        self.calls.borrow_mut().push((input_dir.to_path_buf(), files, options.clone()));
        Ok(AtlasFile { path: output.to_path_buf() })
    }
}

/// The bundled font, except that one character can never be rasterized.
struct FailingOn {
    font: GlyphFont,
    ch: char,
}

impl GlyphRasterizer for FailingOn {
    fn ink_bounds(&self, ch: char) -> Result<Option<InkBounds>, RasterError> {
        if ch == self.ch {
            return Err(RasterError::Unavailable);
        }
        self.font.ink_bounds(ch)
    }

    fn rasterize(&self, ch: char, origin: (i32, i32), plot: &mut dyn FnMut(i32, i32, f32)) -> Result<(), RasterError> {
        if ch == self.ch {
            return Err(RasterError::Unavailable);
        }
        self.font.rasterize(ch, origin, plot)
    }
}

#[test]
fn test_save_continues_after_failed_character() {
    let dir = common::test_dir("save_failed_character");
    let rasterizer = FailingOn {
        font: common::dejavu(20.0),
        ch: 'b',
    };

    let report = save_glyphs(&rasterizer, &CharacterSet::normalize("abc"), &RenderConfig::default(), &dir).unwrap();

    assert!(!report.is_complete());
    assert_eq!(report.written, vec![dir.join("0061.png"), dir.join("0063.png")]);
    assert!(report.failed.is_empty());
    assert_eq!(
        report.render_failed,
        vec![RenderError::Raster {
            ch: 'b',
            source: RasterError::Unavailable
        }]
    );
    assert_eq!(report.failure_count(), 1);
    assert_eq!(report.total(), 3);
    assert!(dir.join("0061.png").is_file());
    assert!(!dir.join("0062.png").exists());
    assert!(dir.join("0063.png").is_file());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_export_atlas_with_failed_character() {
    let scratch = ScratchDir::create_empty(common::test_dir("atlas_failed_character")).unwrap();
    let rasterizer = FailingOn {
        font: common::dejavu(20.0),
        ch: 'y',
    };
    let packer = RecordingPacker::default();

    let result = export_atlas(
        &rasterizer,
        &CharacterSet::normalize("xyz"),
        &RenderConfig::default(),
        &scratch,
        &packer,
        Path::new("xyz.fnt"),
        &PackOptions::new(20),
    );

    assert!(matches!(result, Err(FontMakerError::ExportIncomplete { failed: 1, total: 3 })));
    assert!(packer.calls.borrow().is_empty());
    assert!(scratch.path().join("0078.png").is_file());
    assert!(scratch.path().join("007A.png").is_file());
}

#[test]
fn test_export_atlas() {
    common::init_logging();
    let scratch_path = common::test_dir("atlas_scratch");
    fs::write(scratch_path.join("FFFF.png"), b"left over").unwrap();
    let scratch = ScratchDir::create_empty(&scratch_path).unwrap();

    let font = common::dejavu(32.0);
    let options = PackOptions::new(font.line_height()).with_max_size(1024);
    let packer = RecordingPacker::default();
    let config = RenderConfig::new(Color::WHITE).with_effect(Effect::Shadow(ShadowEffect::new(Color::BLACK, 1, 1)));
    let output = scratch_path.with_file_name("atlas_out.fnt");

    let atlas = export_atlas(&font, &CharacterSet::normalize("Hi!"), &config, &scratch, &packer, &output, &options).unwrap();
    assert_eq!(atlas.path, output);

    let calls = packer.calls.borrow();
    assert_eq!(calls.len(), 1);
    let (input, files, passed) = &calls[0];
    assert_eq!(input, &scratch_path);
    assert_eq!(files, &vec!["0021.png".to_string(), "0048.png".to_string(), "0069.png".to_string()]);
    assert_eq!(passed, &options);
    drop(calls);

    scratch.cleanup();
    assert!(!scratch_path.exists());
}

#[test]
fn test_export_atlas_empty_set() {
    let scratch = ScratchDir::create_empty(common::test_dir("atlas_empty")).unwrap();
    let font = common::dejavu(16.0);
    let packer = RecordingPacker::default();

    let result = export_atlas(
        &font,
        &CharacterSet::normalize(""),
        &RenderConfig::default(),
        &scratch,
        &packer,
        Path::new("unused.fnt"),
        &PackOptions::new(16),
    );
    assert!(matches!(result, Err(FontMakerError::EmptyCharacterSet)));
    assert!(packer.calls.borrow().is_empty());
}

#[test]
fn test_pack_saved_glyphs() {
    let glyph_dir = common::test_dir("pack_saved_glyphs");
    let font = common::dejavu(20.0);
    save_glyphs(&font, &CharacterSet::normalize("xy"), &RenderConfig::default(), &glyph_dir).unwrap();

    let scratch = ScratchDir::create_empty(common::test_dir("pack_saved_scratch")).unwrap();
    let packer = RecordingPacker::default();
    let options = PackOptions::new(font.line_height());
    pack_directory(&glyph_dir, &scratch, &packer, Path::new("xy.fnt"), &options).unwrap();

    let calls = packer.calls.borrow();
    assert_eq!(calls[0].1, vec!["0078.png".to_string(), "0079.png".to_string()]);
    // the saved glyphs are copied, not moved
    assert!(glyph_dir.join("0078.png").is_file());

    fs::remove_dir_all(&glyph_dir).unwrap();
}

#[test]
fn test_pack_empty_directory() {
    let glyph_dir = common::test_dir("pack_empty_glyphs");
    let scratch = ScratchDir::create_empty(common::test_dir("pack_empty_scratch")).unwrap();
    let packer = RecordingPacker::default();

    let result = pack_directory(&glyph_dir, &scratch, &packer, Path::new("none.fnt"), &PackOptions::new(10));
    assert!(matches!(result, Err(FontMakerError::EmptyCharacterSet)));
    assert!(packer.calls.borrow().is_empty());

    fs::remove_dir_all(&glyph_dir).unwrap();
}
