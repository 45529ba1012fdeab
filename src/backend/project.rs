//! Project writer - puts generated artifacts on disk
//!
//! Every file is created (or truncated) inside the output directory with restricted permissions. Writing stops at
//! the first failure; files already written are left in place.

use std::fs::{self, OpenOptions};
use std::io::Write;
#[cfg(unix)]
use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
use std::path::{Path, PathBuf};

use super::GeneratedFiles;
use super::errors::GenerationError;
use crate::config::DEFAULT_FILE_MODE;

/// Writes generated files into an output directory
#[derive(Debug, Clone)]
pub struct ProjectWriter {
    /// Directory the files are written into (must exist)
    output_dir: PathBuf,
    /// Unix permission bits for each file
    file_mode: u32,
}

impl ProjectWriter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            file_mode: DEFAULT_FILE_MODE,
        }
    }

    /// Set the permission bits for written files
    pub fn with_mode(mut self, mode: u32) -> Self {
        self.file_mode = mode;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every file in order. Returns the paths written.
    pub fn write(&self, files: &GeneratedFiles) -> Result<Vec<PathBuf>, GenerationError> {
        let mut written = Vec::with_capacity(files.len());
        for (name, contents) in files {
            let path = self.output_dir.join(name);
            self.write_file(&path, contents)
                .map_err(|source| GenerationError::Write { path: path.clone(), source })?;
            tracing::info!(path = %path.display(), bytes = contents.len(), "wrote file");
            written.push(path);
        }
        Ok(written)
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(self.file_mode);

        let mut file = options.open(path)?;
        file.write_all(contents)?;

        // `mode` only applies at creation; existing files keep their old bits otherwise.
        #[cfg(unix)]
        fs::set_permissions(path, fs::Permissions::from_mode(self.file_mode))?;

        Ok(())
    }
}
