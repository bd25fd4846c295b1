//! Scratch directory the glyph images are collected in before packing.

use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use crate::ScratchError;

const REMOVE_RETRY_DELAY: Duration = Duration::from_millis(100);

/// An emptied directory that is removed again when dropped.
///
/// Emptying the directory is mandatory, left over glyphs would end up in the atlas.
/// Removing it afterwards is best effort: one retry, then a warning.
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    removed: bool,
}

impl ScratchDir {
    /// Per process location below the system temp directory.
    pub fn session_path() -> PathBuf {
        std::env::temp_dir().join(format!("icy_fontmaker_{}", std::process::id()))
    }

    /// Creates `path` or deletes all files in it if it already exists.
    pub fn create_empty(path: impl Into<PathBuf>) -> Result<Self, ScratchError> {
        let path = path.into();
        let prepare_error = |source: std::io::Error| ScratchError::Prepare { path: path.clone(), source };

        if path.is_dir() {
            for entry in fs::read_dir(&path).map_err(prepare_error)? {
                let entry_path = entry.map_err(prepare_error)?.path();
                if entry_path.is_file() {
                    fs::remove_file(&entry_path).map_err(prepare_error)?;
                }
            }
        } else {
            fs::create_dir_all(&path).map_err(prepare_error)?;
        }
        log::debug!("scratch directory {} ready", path.display());

        Ok(Self { path, removed: false })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Copies all files of `dir` into the scratch directory, returns the number of files copied.
    pub fn import_from(&self, dir: &Path) -> Result<usize, ScratchError> {
        let read_error = |source: std::io::Error| ScratchError::ReadSource { path: dir.to_path_buf(), source };
        let mut count = 0;
        for entry in fs::read_dir(dir).map_err(read_error)? {
            let source_path = entry.map_err(read_error)?.path();
            if !source_path.is_file() {
                continue;
            }
            let Some(file_name) = source_path.file_name() else {
                continue;
            };
            fs::copy(&source_path, self.path.join(file_name)).map_err(|source| ScratchError::Copy {
                path: source_path.clone(),
                source,
            })?;
            count += 1;
        }
        Ok(count)
    }

    /// Removes the directory and its contents.
    pub fn cleanup(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        if self.removed {
            return;
        }
        self.removed = true;
        if !self.path.exists() {
            return;
        }
        if let Err(err) = fs::remove_dir_all(&self.path) {
            log::debug!("removing {} failed ({err}), retrying", self.path.display());
            thread::sleep(REMOVE_RETRY_DELAY);
            if let Err(err) = fs::remove_dir_all(&self.path) {
                log::warn!("Can't remove scratch directory {}: {err}", self.path.display());
            }
        }
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        self.remove();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("icy_glyph_scratch_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_create_empties_existing_dir() {
        let path = test_dir("empties");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("0041.png"), b"stale").unwrap();

        let scratch = ScratchDir::create_empty(&path).unwrap();
        assert_eq!(fs::read_dir(scratch.path()).unwrap().count(), 0);
        scratch.cleanup();
        assert!(!path.exists());
    }

    #[test]
    fn test_drop_removes_dir() {
        let path = test_dir("drop");
        {
            let scratch = ScratchDir::create_empty(&path).unwrap();
            fs::write(scratch.path().join("0042.png"), b"glyph").unwrap();
            assert!(path.exists());
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_import_from() {
        let source = test_dir("import_source");
        fs::create_dir_all(source.join("nested")).unwrap();
        fs::write(source.join("0041.png"), b"a").unwrap();
        fs::write(source.join("0042.png"), b"b").unwrap();

        let scratch = ScratchDir::create_empty(test_dir("import_target")).unwrap();
        assert_eq!(scratch.import_from(&source).unwrap(), 2);
        assert_eq!(fs::read(scratch.path().join("0042.png")).unwrap(), b"b");

        fs::remove_dir_all(&source).unwrap();
    }

    #[test]
    fn test_import_from_missing_dir() {
        let scratch = ScratchDir::create_empty(test_dir("import_missing")).unwrap();
        let result = scratch.import_from(&test_dir("import_nothing_here"));
        assert!(matches!(result, Err(ScratchError::ReadSource { .. })));
    }
}
