//! In-place page rewriting.
//!
//! ## `write_in_place` protocol
//!
//! 1. Substituted content is computed by the caller.
//! 2. In dry-run mode, stop and report `WouldWrite`.
//! 3. Resolve symlinks to the real page file.
//! 4. A real file with several hard links is truncated and written through,
//!    so every link sees the new content. Otherwise:
//! 5. Write to `<real>.masthead.tmp` beside the real file.
//! 6. Copy the page's permissions onto the `.tmp` file.
//! 7. Rename over the real file (atomic on POSIX). On failure the `.tmp` file
//!    is removed and the page is left as it was.

use std::path::{Path, PathBuf};

use crate::error::{io_err, SyncError};

/// Outcome of an individual page write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// The page was overwritten with the new content.
    Written { path: PathBuf },
    /// `--dry-run` mode: the page *would* have been overwritten.
    WouldWrite { path: PathBuf },
}

/// Fully replace the contents of the existing page at `path`.
///
/// `path` may be a symlink; the file it points to is the one rewritten and
/// the link itself is kept. The returned path is always `path` as given.
pub fn write_in_place(path: &Path, content: &str, dry_run: bool) -> Result<WriteResult, SyncError> {
    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    let real = std::fs::canonicalize(path).map_err(|e| io_err(path, e))?;
    if has_other_links(&real)? {
        std::fs::write(&real, content).map_err(|e| io_err(&real, e))?;
        tracing::info!("wrote (through shared link): {}", path.display());
        return Ok(WriteResult::Written {
            path: path.to_path_buf(),
        });
    }

    let tmp = PathBuf::from(format!("{}.masthead.tmp", real.display()));
    replace_via_tmp(&real, content, &tmp)?;

    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

fn replace_via_tmp(real: &Path, content: &str, tmp: &Path) -> Result<(), SyncError> {
    let permissions = std::fs::metadata(real)
        .map_err(|e| io_err(real, e))?
        .permissions();

    std::fs::write(tmp, content).map_err(|e| io_err(tmp, e))?;
    if let Err(e) = std::fs::set_permissions(tmp, permissions) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(tmp, e));
    }

    if let Err(e) = std::fs::rename(tmp, real) {
        let _ = std::fs::remove_file(tmp);
        return Err(io_err(real, e));
    }
    Ok(())
}

#[cfg(unix)]
fn has_other_links(real: &Path) -> Result<bool, SyncError> {
    use std::os::unix::fs::MetadataExt;
    let meta = std::fs::metadata(real).map_err(|e| io_err(real, e))?;
    Ok(meta.nlink() > 1)
}

#[cfg(not(unix))]
fn has_other_links(_real: &Path) -> Result<bool, SyncError> {
    Ok(false)
}
