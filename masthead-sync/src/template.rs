//! The canonical header fragment.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::SyncError;

/// Header template, read once per run and never written back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    path: PathBuf,
    content: String,
}

impl Template {
    /// Read the template at `path` as raw text.
    ///
    /// Any failure, including a missing file, is [`SyncError::Template`].
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let content = std::fs::read_to_string(path).map_err(|source| SyncError::Template {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded template: {} ({} bytes)", path.display(), content.len());
        Ok(Self {
            path: path.to_path_buf(),
            content,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// SHA-256 hex digest of the template bytes.
    pub fn digest(&self) -> String {
        sha256_hex(&self.content)
    }
}

pub(crate) fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
