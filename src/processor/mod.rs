//! # Processor Module
//!
//! This module runs a line-oriented rewrite over a set of files.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - Decoding, line splitting and file reads/writes
//! - [`file_collector`] - Sorted recursive file collection and path helpers
//!
//! A pass implements [`FileTransform`]; the [`Processor`] reads each file,
//! asks the transform for new content, and writes it back (or renders a diff
//! in dry-run mode). Files are independent, so they are processed
//! concurrently up to the configured number of jobs.

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

use anyhow::Result;
pub use file_collector::{FileCollector, FileSelector, absolutize_path, normalize_lexically};
pub use file_io::{FileIO, SourceText, decode_utf8, split_lines};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, trace};

use crate::diff::DiffManager;
use crate::report::{FileOutcome, FileReport};
use crate::verbose_log;

/// What a transform decided for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transform {
  /// Replace the file content.
  Rewrite(String),
  /// Leave the file untouched.
  Skip(&'static str),
}

/// A per-file rewrite.
///
/// Implementations are pure: they see the decoded lines and return the new
/// content. All I/O stays in the [`Processor`].
pub trait FileTransform: Send + Sync {
  fn transform(&self, source: &SourceText) -> Transform;
}

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig<T> {
  pub transform: T,
  /// Maximum number of files in flight.
  pub jobs: usize,
  /// Render diffs instead of writing.
  pub dry_run: bool,
  pub diff_manager: Option<DiffManager>,
}

impl<T: FileTransform> ProcessorConfig<T> {
  /// Creates a config that writes files, with one job per CPU.
  pub fn new(transform: T) -> Self {
    Self {
      transform,
      jobs: num_cpus::get(),
      dry_run: false,
      diff_manager: None,
    }
  }
}

/// Applies a [`FileTransform`] to files on disk.
pub struct Processor<T> {
  transform: T,
  jobs: usize,
  dry_run: bool,
  diff_manager: DiffManager,
}

impl<T: FileTransform> Processor<T> {
  pub fn new(config: ProcessorConfig<T>) -> Self {
    Self {
      transform: config.transform,
      jobs: config.jobs.max(1),
      dry_run: config.dry_run,
      diff_manager: config.diff_manager.unwrap_or_default(),
    }
  }

  /// Processes `files`, returning one report per file in input order.
  ///
  /// # Errors
  ///
  /// The first read, decode or write failure aborts the run. Files already
  /// rewritten stay rewritten.
  pub async fn process(&self, files: &[PathBuf]) -> Result<Vec<FileReport>> {
    let total = files.len();
    debug!("Processing {} files with {} jobs", total, self.jobs);

    let mut reports: Vec<(usize, FileReport)> = stream::iter(files.iter().enumerate())
      .map(|(index, path)| async move {
        verbose_log!("[{}/{}] Process {}", index + 1, total, path.display());
        self.process_file(path).await.map(|report| (index, report))
      })
      .buffer_unordered(self.jobs)
      .try_collect()
      .await?;

    reports.sort_by_key(|(index, _)| *index);
    Ok(reports.into_iter().map(|(_, report)| report).collect())
  }

  /// Processes a single file.
  pub async fn process_file(&self, path: &Path) -> Result<FileReport> {
    let source = FileIO::read_source(path).await?;

    let outcome = match self.transform.transform(&source) {
      Transform::Skip(reason) => {
        trace!("Skipping: {} ({})", path.display(), reason);
        FileOutcome::Skipped { reason }
      }
      Transform::Rewrite(content) if source.is_identical_to(&content) => {
        trace!("Unchanged: {}", path.display());
        FileOutcome::Unchanged
      }
      Transform::Rewrite(content) => {
        if self.dry_run {
          self.diff_manager.display_diff(path, &source.text(), &content)?;
        } else {
          FileIO::write_file(path, &content).await?;
          debug!("Rewrote {}", path.display());
        }
        FileOutcome::Rewritten
      }
    };

    Ok(FileReport::new(path.to_path_buf(), outcome))
  }
}
