//! # Diff Module
//!
//! Renders the change a pass would make to a file, for `--dry-run`. Diffs go
//! to stderr and can also be appended to a file with `--save-diff`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff rendering for dry runs.
///
/// Files are processed concurrently, so each diff is rendered into one string
/// and emitted with a single write.
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// Path the diffs are appended to
  pub save_diff_path: Option<PathBuf>,

  save_lock: Mutex<()>,
}

impl Default for DiffManager {
  fn default() -> Self {
    Self::new(false, None)
  }
}

impl DiffManager {
  /// Creates a new DiffManager.
  ///
  /// # Parameters
  ///
  /// * `show_diff` - Whether to print diffs to stderr
  /// * `save_diff_path` - File the diffs are appended to
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
      save_lock: Mutex::new(()),
    }
  }

  /// Whether any diff output was requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the save file so that a run starts from an empty diff.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      std::fs::write(path, "").with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Renders a line diff between `original` and `new` with a header naming
  /// `path`.
  pub fn render(path: &Path, original: &str, new: &str) -> String {
    let diff = TextDiff::from_lines(original, new);

    let mut rendered = format!("Diff for {}:\n", path.display());
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      rendered.push_str(sign);
      rendered.push_str(change.value());
      if change.missing_newline() {
        rendered.push('\n');
      }
    }
    rendered.push('\n');

    rendered
  }

  /// Displays and/or saves the diff for one file.
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    if !self.is_enabled() {
      return Ok(());
    }

    let rendered = Self::render(path, original, new);

    if self.show_diff {
      eprint!("{rendered}");
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let _guard = self.save_lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}
