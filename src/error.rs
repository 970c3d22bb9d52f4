//! # Error Module
//!
//! Fatal precondition failures shared by the three tools. These are checked
//! before any file is touched; the binaries print the message to stdout and
//! exit with status -1. Everything else travels as [`anyhow::Error`] with
//! path context attached.

use std::path::PathBuf;

use thiserror::Error;

/// Exit status used for precondition failures.
pub const PRECONDITION_EXIT_CODE: i32 = -1;

/// Errors that stop a run before it starts.
#[derive(Debug, Error)]
pub enum HeaderkitError {
  /// The `--src` directory does not exist or is not a directory.
  #[error("Source directory doesn't exist.")]
  SourceDirMissing { path: PathBuf },

  /// The `--copyright` file does not exist or is not a regular file.
  #[error("Copyright file doesn't exist.")]
  CopyrightFileMissing { path: PathBuf },
}

impl HeaderkitError {
  /// The path that failed the check.
  pub fn path(&self) -> &PathBuf {
    match self {
      Self::SourceDirMissing { path } | Self::CopyrightFileMissing { path } => path,
    }
  }
}

/// Fails with [`HeaderkitError::SourceDirMissing`] unless `path` is a
/// directory.
pub fn ensure_source_dir(path: &std::path::Path) -> Result<(), HeaderkitError> {
  if path.is_dir() {
    Ok(())
  } else {
    Err(HeaderkitError::SourceDirMissing {
      path: path.to_path_buf(),
    })
  }
}

/// Fails with [`HeaderkitError::CopyrightFileMissing`] unless `path` is a
/// file.
pub fn ensure_copyright_file(path: &std::path::Path) -> Result<(), HeaderkitError> {
  if path.is_file() {
    Ok(())
  } else {
    Err(HeaderkitError::CopyrightFileMissing {
      path: path.to_path_buf(),
    })
  }
}
