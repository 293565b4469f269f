use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Persists named image bytes.
pub trait FileWriter {
    /// Write `bytes` under `filename`, returning where they landed.
    fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf>;

    /// Where files end up, for reporting.
    fn location(&self) -> &Path;
}

#[derive(Debug, Clone)]
pub struct DirectoryWriter {
    dir: PathBuf,
}

impl DirectoryWriter {
    /// Use `dir` as the output directory, creating it if it doesn't exist.
    pub fn create<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        Ok(DirectoryWriter {
            dir: dir.to_path_buf(),
        })
    }
}

impl FileWriter for DirectoryWriter {
    fn write(&self, filename: &str, bytes: &[u8]) -> Result<PathBuf> {
        if filename.is_empty()
            || filename == "."
            || filename == ".."
            || filename.contains(['/', '\\'])
        {
            return Err(Error::invalid(format!(
                "output name must be a plain file name, got {:?}",
                filename
            )));
        }

        let path = self.dir.join(filename);
        std::fs::write(&path, bytes).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    fn location(&self) -> &Path {
        &self.dir
    }
}
