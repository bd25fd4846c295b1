//! Boundary to the atlas packer that turns a directory of glyph images into a sprite sheet font.

use std::{
    ffi::OsString,
    path::{Path, PathBuf},
    process::Command,
};

use serde::{Deserialize, Serialize};

use crate::PackError;

pub const DEFAULT_PADDING: u32 = 2;
pub const DEFAULT_DIVISIBLE_BY: u32 = 4;
pub const DEFAULT_MAX_SIZE: u32 = 4096;

/// Parameters handed to the packer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackOptions {
    /// Pixels between two glyphs in the atlas.
    pub padding: u32,
    /// Atlas dimensions are rounded up to a multiple of this.
    pub divisible_by: u32,
    pub max_width: u32,
    pub max_height: u32,
    /// Line height of the font in pixels.
    pub font_height: u32,
    pub premultiply: bool,
}

impl PackOptions {
    pub fn new(font_height: u32) -> Self {
        Self {
            padding: DEFAULT_PADDING,
            divisible_by: DEFAULT_DIVISIBLE_BY,
            max_width: DEFAULT_MAX_SIZE,
            max_height: DEFAULT_MAX_SIZE,
            font_height,
            premultiply: true,
        }
    }

    pub fn with_max_size(mut self, max_size: u32) -> Self {
        self.max_width = max_size;
        self.max_height = max_size;
        self
    }
}

/// The packed sprite sheet font.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtlasFile {
    pub path: PathBuf,
}

pub trait AtlasPacker {
    /// Packs all glyph images in `input_dir` into `output`.
    fn pack(&self, input_dir: &Path, output: &Path, options: &PackOptions) -> Result<AtlasFile, PackError>;
}

/// Runs the java font tool as a separate process.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExternalPacker {
    pub program: String,
    pub jar: PathBuf,
    pub working_dir: Option<PathBuf>,
}

impl Default for ExternalPacker {
    fn default() -> Self {
        Self {
            program: "java".to_string(),
            jar: PathBuf::from("FontTool.jar"),
            working_dir: None,
        }
    }
}

impl ExternalPacker {
    pub fn new(program: impl Into<String>, jar: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            jar: jar.into(),
            working_dir: None,
        }
    }

    /// The command line arguments for one packer run.
    pub fn arguments(&self, input_dir: &Path, output: &Path, options: &PackOptions) -> Vec<OsString> {
        // the tool expects the input directory with a trailing separator
        let mut input = input_dir.as_os_str().to_os_string();
        if !input.to_string_lossy().ends_with(|c: char| c == '/' || c == '\\') {
            input.push("/");
        }

        let mut args: Vec<OsString> = vec!["-jar".into(), self.jar.clone().into_os_string(), "--input".into(), input];
        let named: [(&str, OsString); 7] = [
            ("--padding", options.padding.to_string().into()),
            ("--divisibleby", options.divisible_by.to_string().into()),
            ("--maxwidth", options.max_width.to_string().into()),
            ("--maxheight", options.max_height.to_string().into()),
            ("--output", output.as_os_str().to_os_string()),
            ("--fontHeight", options.font_height.to_string().into()),
            ("--premultiply", if options.premultiply { "1" } else { "0" }.into()),
        ];
        for (name, value) in named {
            args.push(name.into());
            args.push(value);
        }
        args
    }
}

impl AtlasPacker for ExternalPacker {
    fn pack(&self, input_dir: &Path, output: &Path, options: &PackOptions) -> Result<AtlasFile, PackError> {
        if !input_dir.is_dir() {
            return Err(PackError::MissingInput(input_dir.to_path_buf()));
        }

        let mut command = Command::new(&self.program);
        command.args(self.arguments(input_dir, output, options));
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }
        log::info!("running packer: {command:?}");

        let status = command.status().map_err(|source| PackError::Spawn {
            program: self.program.clone(),
            source,
        })?;
        // the tool's exit code is not reliable, the result is not checked
        if status.success() {
            log::info!("packer finished: {status}");
        } else {
            log::warn!("packer finished: {status}");
        }

        Ok(AtlasFile { path: output.to_path_buf() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PackOptions::new(19);
        assert_eq!(options.padding, 2);
        assert_eq!(options.divisible_by, 4);
        assert_eq!((options.max_width, options.max_height), (4096, 4096));
        assert!(options.premultiply);
        assert_eq!(options.with_max_size(1024).max_height, 1024);
    }

    #[test]
    fn test_arguments() {
        let packer = ExternalPacker::default();
        let args = packer.arguments(Path::new("Temp"), Path::new("out/font.csfont"), &PackOptions::new(19).with_max_size(2048));
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(
            args,
            vec![
                "-jar",
                "FontTool.jar",
                "--input",
                "Temp/",
                "--padding",
                "2",
                "--divisibleby",
                "4",
                "--maxwidth",
                "2048",
                "--maxheight",
                "2048",
                "--output",
                "out/font.csfont",
                "--fontHeight",
                "19",
                "--premultiply",
                "1",
            ]
        );
    }

    #[test]
    fn test_missing_input_dir() {
        let packer = ExternalPacker::new("does-not-matter", "FontTool.jar");
        let result = packer.pack(Path::new("/definitely/not/here"), Path::new("out.png"), &PackOptions::new(10));
        assert!(matches!(result, Err(PackError::MissingInput(_))));
    }

    #[test]
    fn test_missing_program() {
        let dir = std::env::temp_dir();
        let packer = ExternalPacker::new("icy-fontmaker-no-such-program", "FontTool.jar");
        let result = packer.pack(&dir, Path::new("out.png"), &PackOptions::new(10));
        assert!(matches!(result, Err(PackError::Spawn { .. })));
    }
}
