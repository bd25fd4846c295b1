#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::struct_excessive_bools, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

mod options;

pub use options::*;

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};
use icy_glyph::{
    export_atlas, pack_directory,
    preview::render_preview,
    render_all, save_glyphs,
    scratch::ScratchDir,
    Color, FontStyle, GlyphFont, MAX_OUTLINE_THICKNESS,
};

pub type FontMakerResult<T> = anyhow::Result<T>;

#[derive(Parser, Debug)]
#[command(version, about = "Creates sprite sheet fonts from TrueType and OpenType fonts.", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the character set and pack it into a sprite sheet font
    Export {
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render the character set into one PNG per character
    Save {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Pack glyph images saved earlier into a sprite sheet font
    Pack {
        #[arg(value_name = "DIR")]
        dir: PathBuf,
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Render the character set into a single preview image
    Preview {
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,
        /// Maximum width of the preview in pixels
        #[arg(long, default_value_t = 1024)]
        width: u32,
        /// Fixed background color instead of one contrasting with the fill color
        #[arg(long, value_name = "COLOR")]
        background: Option<Color>,
        /// Pick the background from the fill color again
        #[arg(long, conflicts_with = "background")]
        auto_background: bool,
        #[command(flatten)]
        render: RenderArgs,
    },
}

impl Command {
    fn render_args(&self) -> &RenderArgs {
        match self {
            Command::Export { render, .. } | Command::Save { render, .. } | Command::Pack { render, .. } | Command::Preview { render, .. } => render,
        }
    }
}

/// Font and effect settings, anything not given is taken from the stored options.
#[derive(clap::Args, Debug, Default)]
pub struct RenderArgs {
    /// Font file to use
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,
    /// Installed font family to use (e.g. "DejaVu Sans", "monospace")
    #[arg(long)]
    pub family: Option<String>,
    /// regular, bold, italic or bold-italic
    #[arg(long)]
    pub style: Option<FontStyle>,
    /// Font size in pixels
    #[arg(long)]
    pub size: Option<f32>,
    /// Fill color as #RRGGBB or #RRGGBBAA
    #[arg(long, value_name = "COLOR")]
    pub color: Option<Color>,
    /// Characters to render
    #[arg(long)]
    pub chars: Option<String>,

    /// Draw a drop shadow
    #[arg(long)]
    pub shadow: bool,
    #[arg(long, value_name = "COLOR")]
    pub shadow_color: Option<Color>,
    /// Horizontal shadow offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub shadow_x: Option<i32>,
    /// Vertical shadow offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub shadow_y: Option<i32>,

    /// Draw an outline, takes precedence over the shadow
    #[arg(long)]
    pub outline: bool,
    #[arg(long, value_name = "COLOR")]
    pub outline_color: Option<Color>,
    /// Outline thickness in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_OUTLINE_THICKNESS)))]
    pub outline_thickness: Option<u32>,
    /// Neither shadow nor outline
    #[arg(long, conflicts_with_all = ["shadow", "outline"])]
    pub plain: bool,

    /// Render without antialiasing
    #[arg(long)]
    pub fast: bool,
    /// Render with antialiasing
    #[arg(long, conflicts_with = "fast")]
    pub smooth: bool,
    /// Maximum atlas width and height
    #[arg(long)]
    pub max_size: Option<u32>,
    /// Remember the settings for the next run
    #[arg(long)]
    pub save_options: bool,
}

fn get_log_dir() -> Option<PathBuf> {
    if let Some(proj_dirs) = directories::ProjectDirs::from("com", "GitHub", "icy_fontmaker") {
        let dir = proj_dirs.config_dir().to_path_buf();
        if !dir.exists() {
            std::fs::create_dir_all(&dir).ok()?;
        }
        return Some(dir);
    }
    None
}

fn start_logger() -> Option<LoggerHandle> {
    let Some(log_dir) = get_log_dir() else {
        eprintln!("Failed to create log file");
        return None;
    };
    let logger = match Logger::try_with_env_or_str("info") {
        Ok(logger) => logger,
        Err(err) => {
            eprintln!("Invalid log specification: {err}");
            return None;
        }
    };
    match logger
        .log_to_file(FileSpec::default().directory(&log_dir).basename("icy_fontmaker").suffix("log").suppress_timestamp())
        .rotate(Criterion::Size(64 * 1024), Naming::Numbers, Cleanup::KeepLogFiles(3))
        .duplicate_to_stderr(Duplicate::Warn)
        .start()
    {
        Ok(handle) => Some(handle),
        Err(err) => {
            eprintln!("Failed to start logger: {err}");
            None
        }
    }
}

fn main() {
    let args = Args::parse();
    let logger = start_logger();

    log::info!("Starting icy_fontmaker {}", env!("CARGO_PKG_VERSION"));

    let result = run(args);
    if let Err(err) = &result {
        log::error!("{err:#}");
        if logger.is_none() {
            eprintln!("Error: {err:#}");
        }
    }
    log::info!("Shutting down.");

    if let Some(handle) = &logger {
        handle.flush();
    }
    if result.is_err() {
        std::process::exit(1);
    }
}

fn run(args: Args) -> FontMakerResult<()> {
    let mut options = Options::load_options();
    let render = args.command.render_args();
    options.apply(render);
    if let Command::Preview {
        background, auto_background, ..
    } = &args.command
    {
        options.apply_preview_background(*background, *auto_background);
    }
    if render.save_options {
        options.store_options();
    }

    match &args.command {
        Command::Export { output, .. } => {
            let font = load_font(&options)?;
            let scratch = ScratchDir::create_empty(ScratchDir::session_path())?;
            let atlas = export_atlas(
                &font,
                &options.character_set(),
                &options.render_config(),
                &scratch,
                &options.packer(),
                &absolute(output)?,
                &options.pack_options(font.line_height()),
            )?;
            scratch.cleanup();
            log::info!("Exported {}", atlas.path.display());
        }
        Command::Save { dir, .. } => {
            let font = load_font(&options)?;
            fs::create_dir_all(dir).with_context(|| format!("Can't create {}", dir.display()))?;
            let report = save_glyphs(&font, &options.character_set(), &options.render_config(), dir)?;
            if !report.is_complete() {
                anyhow::bail!("{} of {} glyphs could not be saved", report.failure_count(), report.total());
            }
        }
        Command::Pack { dir, output, .. } => {
            let font = load_font(&options)?;
            let scratch = ScratchDir::create_empty(ScratchDir::session_path())?;
            let atlas = pack_directory(dir, &scratch, &options.packer(), &absolute(output)?, &options.pack_options(font.line_height()))?;
            scratch.cleanup();
            log::info!("Exported {}", atlas.path.display());
        }
        Command::Preview { output, width, .. } => {
            let font = load_font(&options)?;
            let config = options.render_config();
            let bitmaps = render_all(&font, &options.character_set(), &config)?;
            let image = render_preview(&bitmaps, options.preview_background(), *width);
            image
                .save_with_format(output, image::ImageFormat::Png)
                .with_context(|| format!("Can't write preview {}", output.display()))?;
            log::info!("Preview of {} glyphs written to {}", bitmaps.len(), output.display());
        }
    }
    Ok(())
}

fn load_font(options: &Options) -> FontMakerResult<GlyphFont> {
    let descriptor = options.font_descriptor();
    let font = GlyphFont::load(&descriptor).with_context(|| format!("Can't load font {descriptor}"))?;
    log::info!("Using font {descriptor}");
    Ok(font)
}

/// The packer runs in its own working directory, relative output paths are resolved first.
fn absolute(path: &Path) -> FontMakerResult<PathBuf> {
    Ok(std::path::absolute(path)?)
}
