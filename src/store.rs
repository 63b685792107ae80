use std::fs;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::error::SeqsubError;
use crate::submission::SubmissionFile;

#[derive(Debug, Clone)]
pub struct OutputDir {
    root: Utf8PathBuf,
}

impl OutputDir {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub fn path_for(&self, file: &SubmissionFile) -> Utf8PathBuf {
        self.root.join(&file.name)
    }

    pub fn ensure_root(&self) -> Result<(), SeqsubError> {
        fs::create_dir_all(self.root.as_std_path())
            .map_err(|err| SeqsubError::Filesystem(err.to_string()))
    }

    pub fn write(&self, file: &SubmissionFile) -> Result<Utf8PathBuf, SeqsubError> {
        self.ensure_root()?;
        let path = self.path_for(file);
        write_bytes_atomic(&path, file.content.as_bytes())?;
        Ok(path)
    }
}

pub fn write_bytes_atomic(path: &Utf8Path, content: &[u8]) -> Result<(), SeqsubError> {
    let parent = path
        .parent()
        .ok_or_else(|| SeqsubError::Filesystem("invalid destination path".to_string()))?;
    fs::create_dir_all(parent.as_std_path())
        .map_err(|err| SeqsubError::Filesystem(err.to_string()))?;
    let mut temp = tempfile::Builder::new()
        .prefix("seqsub-file")
        .tempfile_in(parent.as_std_path())
        .map_err(|err| SeqsubError::Filesystem(err.to_string()))?;
    temp.write_all(content)
        .map_err(|err| SeqsubError::Filesystem(err.to_string()))?;
    temp.persist(path.as_std_path())
        .map_err(|err| SeqsubError::Filesystem(err.to_string()))?;
    Ok(())
}
