//! # File Collector Module
//!
//! This module collects the files a pass operates on: a recursive walk of the
//! source tree filtered by file name, returned in sorted order so that output
//! and progress numbering are reproducible. It also holds the path helpers the
//! include mirror needs.

use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// How a pass picks files out of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelector {
  /// File name ends in `.<ext>` for one of the extensions.
  Extensions(Vec<String>),
  /// File name ends in one of the suffixes verbatim.
  Suffixes(Vec<String>),
}

impl FileSelector {
  /// Matches a bare file name. Matching is case-sensitive.
  pub fn matches(&self, file_name: &str) -> bool {
    match self {
      FileSelector::Extensions(extensions) => extensions.iter().any(|ext| {
        file_name
          .strip_suffix(ext.as_str())
          .is_some_and(|stem| stem.ends_with('.'))
      }),
      FileSelector::Suffixes(suffixes) => suffixes.iter().any(|suffix| file_name.ends_with(suffix.as_str())),
    }
  }
}

/// File collector for directory traversal.
pub struct FileCollector {
  selector: FileSelector,
}

impl FileCollector {
  pub const fn new(selector: FileSelector) -> Self {
    Self { selector }
  }

  /// Walks `root` recursively and returns every matching file, sorted.
  ///
  /// Directory symlinks are not followed. Symlinks to regular files are
  /// collected. Unreadable directories are logged and skipped.
  pub fn collect(&self, root: &Path) -> Result<Vec<PathBuf>> {
    debug!("Scanning directory: {}", root.display());
    let start_time = std::time::Instant::now();

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
      let entry = match entry {
        Ok(entry) => entry,
        Err(e) => {
          warn!("Error reading directory entry under {}: {}", root.display(), e);
          continue;
        }
      };

      let file_type = entry.file_type();
      let is_file = file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
      if !is_file {
        continue;
      }

      let Some(file_name) = entry.file_name().to_str() else {
        continue;
      };

      if self.selector.matches(file_name) {
        files.push(entry.into_path());
      }
    }

    files.sort();

    debug!(
      "Found {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }
}

/// Converts a potentially relative path to an absolute, lexically normalized
/// path.
pub fn absolutize_path(path: &Path) -> Result<PathBuf> {
  let absolute = if path.is_absolute() {
    path.to_path_buf()
  } else {
    let current_dir = std::env::current_dir().with_context(|| "Failed to get current directory")?;
    current_dir.join(path)
  };
  Ok(normalize_lexically(&absolute))
}

/// Resolves `.` and `..` components without touching the filesystem.
///
/// A `..` at the root (or at the start of a relative path) is kept.
///
/// # Examples
/// - `/a/b/../c` -> `/a/c`
/// - `a/./b` -> `a/b`
/// - `../a` -> `../a`
pub fn normalize_lexically(path: &Path) -> PathBuf {
  let mut normalized = PathBuf::new();

  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        let can_pop = matches!(normalized.components().next_back(), Some(Component::Normal(_)));
        if can_pop {
          normalized.pop();
        } else if !matches!(
          normalized.components().next_back(),
          Some(Component::RootDir | Component::Prefix(_))
        ) {
          normalized.push("..");
        }
      }
      other => normalized.push(other.as_os_str()),
    }
  }

  if normalized.as_os_str().is_empty() {
    PathBuf::from(".")
  } else {
    normalized
  }
}
