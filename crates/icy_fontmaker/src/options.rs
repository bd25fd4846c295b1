use std::{fs, path::PathBuf};

use icy_glyph::{
    packer::{ExternalPacker, PackOptions, DEFAULT_MAX_SIZE},
    CharacterSet, Color, Effect, FontDescriptor, FontStyle, OutlineEffect, Quality, RenderConfig, ShadowEffect, MAX_OUTLINE_THICKNESS,
};
use serde::{Deserialize, Serialize};

use crate::RenderArgs;

const OPTIONS_FILE: &str = "options.toml";

/// Settings of the last session, stored as `options.toml` in the configuration directory.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Options {
    pub font_family: String,
    pub font_style: FontStyle,
    pub font_size: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,

    pub fill_color: Color,
    pub antialiasing: bool,

    pub shadow_enabled: bool,
    pub shadow_color: Color,
    pub shadow_offset_x: i32,
    pub shadow_offset_y: i32,

    pub outline_enabled: bool,
    pub outline_color: Color,
    pub outline_thickness: u32,

    /// Contrast the preview background with the fill color instead of using `preview_background`.
    pub auto_preview_background: bool,
    pub preview_background: Color,

    pub max_atlas_size: u32,
    pub packer_program: String,
    pub packer_jar: PathBuf,

    pub characters: String,
}

impl Default for Options {
    fn default() -> Self {
        let font = FontDescriptor::default();
        let packer = ExternalPacker::default();
        Self {
            font_family: font.family,
            font_style: font.style,
            font_size: font.size,
            font_path: None,
            fill_color: Color::WHITE,
            antialiasing: true,
            shadow_enabled: false,
            shadow_color: Color::BLACK,
            shadow_offset_x: 1,
            shadow_offset_y: 1,
            outline_enabled: false,
            outline_color: Color::BLACK,
            outline_thickness: 1,
            auto_preview_background: true,
            preview_background: Color::DARK_GRAY,
            max_atlas_size: DEFAULT_MAX_SIZE,
            packer_program: packer.program,
            packer_jar: packer.jar,
            characters: CharacterSet::default_set().to_string(),
        }
    }
}

impl Options {
    pub fn load_options() -> Self {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "GitHub", "icy_fontmaker") {
            let options_file = proj_dirs.config_dir().join(OPTIONS_FILE);
            if options_file.exists() {
                match fs::read_to_string(&options_file) {
                    Ok(txt) => match Self::from_toml(&txt) {
                        Ok(result) => return result,
                        Err(err) => log::error!("Error parsing options file {}: {err}", options_file.display()),
                    },
                    Err(err) => log::error!("Error reading options file: {err}"),
                }
            }
        }
        Self::default()
    }

    pub fn store_options(&self) {
        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "GitHub", "icy_fontmaker") {
            if !proj_dirs.config_dir().exists() && fs::create_dir_all(proj_dirs.config_dir()).is_err() {
                log::error!("Can't create configuration directory {:?}", proj_dirs.config_dir());
                return;
            }
            let file_name = proj_dirs.config_dir().join(OPTIONS_FILE);
            match toml::to_string(self) {
                Ok(text) => {
                    if let Err(err) = fs::write(&file_name, text) {
                        log::error!("Error writing options file: {err}");
                    } else {
                        log::info!("Options stored in {}", file_name.display());
                    }
                }
                Err(err) => log::error!("Error writing options file: {err}"),
            }
        }
    }

    pub fn from_toml(txt: &str) -> Result<Self, toml::de::Error> {
        let mut options: Self = toml::from_str(txt)?;
        options.outline_thickness = options.outline_thickness.clamp(1, MAX_OUTLINE_THICKNESS);
        Ok(options)
    }

    /// Overrides the stored settings with the ones given on the command line.
    pub fn apply(&mut self, args: &RenderArgs) {
        if let Some(path) = &args.font {
            let descriptor = FontDescriptor::from_file(path, self.font_size);
            self.font_family = descriptor.family;
            self.font_path = descriptor.path;
        }
        if let Some(family) = &args.family {
            self.font_family.clone_from(family);
            if args.font.is_none() {
                self.font_path = None;
            }
        }
        if let Some(style) = args.style {
            self.font_style = style;
        }
        if let Some(size) = args.size {
            self.font_size = size;
        }
        if let Some(color) = args.color {
            self.fill_color = color;
        }
        if let Some(chars) = &args.chars {
            self.characters.clone_from(chars);
        }

        if args.plain {
            self.shadow_enabled = false;
            self.outline_enabled = false;
        }
        // switching one effect on switches the other one off, unless both are asked for
        if args.shadow {
            self.shadow_enabled = true;
            self.outline_enabled = args.outline;
        }
        if args.outline {
            self.outline_enabled = true;
            self.shadow_enabled = args.shadow;
        }
        if let Some(color) = args.shadow_color {
            self.shadow_color = color;
        }
        if let Some(x) = args.shadow_x {
            self.shadow_offset_x = x;
        }
        if let Some(y) = args.shadow_y {
            self.shadow_offset_y = y;
        }
        if let Some(color) = args.outline_color {
            self.outline_color = color;
        }
        if let Some(thickness) = args.outline_thickness {
            self.outline_thickness = thickness.clamp(1, MAX_OUTLINE_THICKNESS);
        }

        if args.fast {
            self.antialiasing = false;
        }
        if args.smooth {
            self.antialiasing = true;
        }
        if let Some(max_size) = args.max_size {
            self.max_atlas_size = max_size;
        }
    }

    pub fn apply_preview_background(&mut self, background: Option<Color>, auto: bool) {
        if let Some(color) = background {
            self.preview_background = color;
            self.auto_preview_background = false;
        }
        if auto {
            self.auto_preview_background = true;
        }
    }

    pub fn preview_background(&self) -> Color {
        if self.auto_preview_background {
            self.fill_color.preview_background()
        } else {
            self.preview_background
        }
    }

    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor {
            path: self.font_path.clone(),
            ..FontDescriptor::new(self.font_family.clone(), self.font_style, self.font_size)
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        let shadow = self
            .shadow_enabled
            .then(|| ShadowEffect::new(self.shadow_color, self.shadow_offset_x, self.shadow_offset_y));
        let outline = self.outline_enabled.then(|| OutlineEffect::new(self.outline_color, self.outline_thickness));
        RenderConfig::new(self.fill_color)
            .with_quality(Quality::from_antialiasing(self.antialiasing))
            .with_effect(Effect::resolve(shadow, outline))
    }

    pub fn character_set(&self) -> CharacterSet {
        CharacterSet::normalize(&self.characters)
    }

    pub fn pack_options(&self, font_height: u32) -> PackOptions {
        PackOptions::new(font_height).with_max_size(self.max_atlas_size)
    }

    pub fn packer(&self) -> ExternalPacker {
        ExternalPacker::new(self.packer_program.clone(), self.packer_jar.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        let config = options.render_config();
        assert_eq!(config, RenderConfig::new(Color::WHITE));
        assert_eq!(options.character_set(), CharacterSet::default_set());
        assert_eq!(options.pack_options(40), PackOptions::new(40));
        assert_eq!(options.packer(), ExternalPacker::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut options = Options::default();
        options.font_path = Some(PathBuf::from("fonts/Mono.ttf"));
        options.fill_color = Color::new(0x12, 0x34, 0x56, 0x78);
        options.shadow_offset_x = -2;

        let text = toml::to_string(&options).unwrap();
        assert_eq!(Options::from_toml(&text).unwrap(), options);
    }

    #[test]
    fn test_partial_file() {
        let options = Options::from_toml("font_size = 12.0\nfill_color = \"#FF0000\"\noutline_thickness = 0\n").unwrap();
        assert_eq!(options.font_size, 12.0);
        assert_eq!(options.fill_color, Color::rgb(255, 0, 0));
        assert_eq!(options.outline_thickness, 1);

        let options = Options::from_toml("outline_thickness = 100000").unwrap();
        assert_eq!(options.outline_thickness, MAX_OUTLINE_THICKNESS);
        assert_eq!(options.font_family, Options::default().font_family);
    }

    #[test]
    fn test_invalid_file() {
        assert!(Options::from_toml("fill_color = \"red\"").is_err());
    }

    #[test]
    fn test_effect_switches() {
        let mut options = Options::default();
        options.apply(&RenderArgs {
            shadow: true,
            shadow_x: Some(-3),
            ..Default::default()
        });
        assert!(options.shadow_enabled && !options.outline_enabled);
        assert!(matches!(options.render_config().effect, Effect::Shadow(s) if s.offset_x == -3 && s.offset_y == 1));

        options.apply(&RenderArgs {
            outline: true,
            ..Default::default()
        });
        assert!(!options.shadow_enabled && options.outline_enabled);

        options.apply(&RenderArgs {
            shadow: true,
            outline: true,
            outline_thickness: Some(3),
            ..Default::default()
        });
        assert!(options.shadow_enabled && options.outline_enabled);
        assert_eq!(options.render_config().effect, Effect::Outline(OutlineEffect::new(Color::BLACK, 3)));

        options.apply(&RenderArgs {
            plain: true,
            ..Default::default()
        });
        assert_eq!(options.render_config().effect, Effect::None);
    }

    #[test]
    fn test_font_arguments() {
        let mut options = Options::default();
        options.apply(&RenderArgs {
            font: Some(PathBuf::from("/usr/share/fonts/Hack-Regular.ttf")),
            size: Some(18.0),
            style: Some(FontStyle::Bold),
            fast: true,
            ..Default::default()
        });
        let descriptor = options.font_descriptor();
        assert_eq!(descriptor.family, "Hack-Regular");
        assert_eq!(descriptor.size, 18.0);
        assert_eq!(descriptor.style, FontStyle::Bold);
        assert_eq!(descriptor.path, Some(PathBuf::from("/usr/share/fonts/Hack-Regular.ttf")));
        assert_eq!(options.render_config().quality, Quality::Fast);

        options.apply(&RenderArgs {
            family: Some("monospace".to_string()),
            ..Default::default()
        });
        assert_eq!(options.font_descriptor().path, None);
    }

    #[test]
    fn test_preview_background() {
        let mut options = Options::default();
        assert_eq!(options.preview_background(), Color::DARK_GRAY);
        options.fill_color = Color::rgb(0x20, 0x20, 0x20);
        assert_eq!(options.preview_background(), Color::LIGHT_GRAY);

        options.apply_preview_background(Some(Color::rgb(0, 0, 128)), false);
        assert!(!options.auto_preview_background);
        assert_eq!(options.preview_background(), Color::rgb(0, 0, 128));

        options.apply_preview_background(None, true);
        assert_eq!(options.preview_background(), Color::LIGHT_GRAY);
        assert_eq!(options.preview_background, Color::rgb(0, 0, 128));
    }
}
