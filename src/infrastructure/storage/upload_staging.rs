use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// Scratch directory for uploaded files. Each upload lives in its own
/// temporary file that is removed when the returned [`StagedUpload`] is
/// discarded or dropped.
pub struct UploadStaging {
    dir: PathBuf,
    max_bytes: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum StagingError {
    #[error("upload of {size} bytes exceeds the {limit} byte limit")]
    TooLarge { size: usize, limit: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl UploadStaging {
    pub fn new(dir: PathBuf, max_bytes: usize) -> Result<Self, StagingError> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, max_bytes })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    pub async fn stage(&self, data: &[u8]) -> Result<StagedUpload, StagingError> {
        if data.len() > self.max_bytes {
            return Err(StagingError::TooLarge {
                size: data.len(),
                limit: self.max_bytes,
            });
        }

        let file = tempfile::Builder::new()
            .prefix("upload-")
            .tempfile_in(&self.dir)?;
        tokio::fs::write(file.path(), data).await?;

        tracing::debug!(path = %file.path().display(), bytes = data.len(), "Upload staged");
        Ok(StagedUpload { file })
    }
}

pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub async fn read(&self) -> Result<Vec<u8>, StagingError> {
        Ok(tokio::fs::read(self.file.path()).await?)
    }

    /// Deletes the staged file, reporting failures that a plain drop would
    /// swallow.
    pub fn discard(self) -> Result<(), StagingError> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        tracing::debug!(path = %path.display(), "Staged upload removed");
        Ok(())
    }
}
