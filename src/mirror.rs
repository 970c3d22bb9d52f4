//! # Mirror Module
//!
//! Generates a flat include tree from a source tree of headers. Each header
//! gets one file in the destination: either a byte copy or a one-line stub
//! that forwards to the original with a relative `#include`. Headers whose
//! base name ends in `_p` go into a private subdirectory.
//!
//! The plan is computed up front from the sorted header list, so every
//! destination path is known before anything is written and the writes can
//! run concurrently.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use futures::{StreamExt, TryStreamExt, stream};
use tracing::{debug, warn};

use crate::processor::absolutize_path;
use crate::report::{FileOutcome, FileReport};
use crate::verbose_log;

/// Base-name suffix that marks a private header.
const PRIVATE_STEM_SUFFIX: &str = "_p";

/// How a header is reproduced in the destination tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorMode {
  /// Byte-for-byte copy.
  Copy,
  /// `#include "<relative path>"` forwarding stub.
  Stub,
}

/// Which part of the destination tree a header lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
  Public,
  Private,
}

impl Partition {
  /// Classifies a header by its base name without extension.
  pub fn of(path: &Path) -> Self {
    let is_private = path
      .file_stem()
      .and_then(|stem| stem.to_str())
      .is_some_and(|stem| stem.ends_with(PRIVATE_STEM_SUFFIX));

    if is_private { Partition::Private } else { Partition::Public }
  }
}

/// One header and where it goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEntry {
  /// Absolute path of the original header.
  pub source: PathBuf,
  pub partition: Partition,
  /// Directory the generated file is written to.
  pub dest_dir: PathBuf,
  /// Generated file; same file name as `source`.
  pub dest: PathBuf,
}

impl MirrorEntry {
  /// Content of the forwarding stub for this entry.
  pub fn stub_content(&self) -> Result<String> {
    stub_content(&self.source, &self.dest_dir)
  }
}

impl fmt::Display for MirrorEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} -> {}", self.source.display(), self.dest.display())
  }
}

/// Path of `source` relative to `dir`, with `/` separators.
pub fn relative_include(source: &Path, dir: &Path) -> Result<String> {
  let relative = pathdiff::diff_paths(source, dir)
    .with_context(|| format!("Cannot express {} relative to {}", source.display(), dir.display()))?;
  Ok(relative.to_string_lossy().replace('\\', "/"))
}

/// `#include "<relative path>"\n` pointing from `dir` at `source`.
pub fn stub_content(source: &Path, dir: &Path) -> Result<String> {
  Ok(format!("#include \"{}\"\n", relative_include(source, dir)?))
}

/// Removes `dest` if it exists: a directory recursively, anything else as a
/// file. Returns whether something was removed.
pub async fn clear_destination(dest: &Path) -> Result<bool> {
  let metadata = match tokio::fs::symlink_metadata(dest).await {
    Ok(metadata) => metadata,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(false),
    Err(e) => return Err(e).with_context(|| format!("Failed to inspect {}", dest.display())),
  };

  if metadata.is_dir() {
    tokio::fs::remove_dir_all(dest)
      .await
      .with_context(|| format!("Failed to remove directory {}", dest.display()))?;
  } else {
    tokio::fs::remove_file(dest)
      .await
      .with_context(|| format!("Failed to remove file {}", dest.display()))?;
  }

  debug!("Removed {}", dest.display());
  Ok(true)
}

/// The full set of files to generate.
#[derive(Debug, Clone)]
pub struct MirrorPlan {
  pub mode: MirrorMode,
  pub entries: Vec<MirrorEntry>,
}

impl MirrorPlan {
  /// Maps each header to its destination.
  ///
  /// `headers` should be sorted. Two headers with the same file name in the
  /// same partition map to the same destination; the later one wins and a
  /// warning is logged.
  pub fn build(headers: &[PathBuf], dest_root: &Path, private_dir: &str, mode: MirrorMode) -> Result<Self> {
    let dest_root = absolutize_path(dest_root)?;
    let private_root = dest_root.join(private_dir);

    let mut entries: Vec<MirrorEntry> = Vec::with_capacity(headers.len());
    let mut by_dest: HashMap<PathBuf, usize> = HashMap::with_capacity(headers.len());

    for header in headers {
      let source = absolutize_path(header)?;
      let file_name = source
        .file_name()
        .with_context(|| format!("Header has no file name: {}", source.display()))?
        .to_owned();

      let partition = Partition::of(&source);
      let dest_dir = match partition {
        Partition::Public => dest_root.clone(),
        Partition::Private => private_root.clone(),
      };
      let dest = dest_dir.join(&file_name);

      let entry = MirrorEntry {
        source,
        partition,
        dest_dir,
        dest,
      };

      if let Some(&existing) = by_dest.get(&entry.dest) {
        warn!(
          "{} and {} both map to {}; keeping the latter",
          entries[existing].source.display(),
          entry.source.display(),
          entry.dest.display()
        );
        entries[existing] = entry;
      } else {
        by_dest.insert(entry.dest.clone(), entries.len());
        entries.push(entry);
      }
    }

    Ok(Self { mode, entries })
  }

  /// Writes every entry, at most `jobs` at a time. Returns one report per
  /// generated file, in plan order.
  pub async fn execute(&self, jobs: usize) -> Result<Vec<FileReport>> {
    let total = self.entries.len();

    stream::iter(self.entries.iter().enumerate())
      .map(|(index, entry)| async move {
        verbose_log!("[{}/{}] Process {}", index + 1, total, entry.source.display());
        self.write_entry(entry).await?;
        Ok::<_, anyhow::Error>(FileReport::new(entry.dest.clone(), FileOutcome::Rewritten))
      })
      .buffered(jobs.max(1))
      .try_collect()
      .await
  }

  async fn write_entry(&self, entry: &MirrorEntry) -> Result<()> {
    tokio::fs::create_dir_all(&entry.dest_dir)
      .await
      .with_context(|| format!("Failed to create directory {}", entry.dest_dir.display()))?;

    match self.mode {
      MirrorMode::Copy => {
        tokio::fs::copy(&entry.source, &entry.dest)
          .await
          .with_context(|| format!("Failed to copy {}", entry))?;
      }
      MirrorMode::Stub => {
        let content = entry.stub_content()?;
        tokio::fs::write(&entry.dest, content)
          .await
          .with_context(|| format!("Failed to write {}", entry.dest.display()))?;
      }
    }

    debug!("Generated {}", entry.dest.display());
    Ok(())
  }
}
