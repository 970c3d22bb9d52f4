//! # Report Module
//!
//! Per-file outcomes of a pass and the summary printed at the end of a run.

use std::path::PathBuf;
use std::time::Duration;

/// What happened to a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
  /// The file was rewritten (or would be, in dry-run mode).
  Rewritten,
  /// The transformation produced the bytes already on disk.
  Unchanged,
  /// The file did not qualify and was left untouched.
  Skipped { reason: &'static str },
}

/// Outcome for one processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
  pub path: PathBuf,
  pub outcome: FileOutcome,
}

impl FileReport {
  pub const fn new(path: PathBuf, outcome: FileOutcome) -> Self {
    Self { path, outcome }
  }
}

/// Counters over a finished pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingSummary {
  pub total: usize,
  pub rewritten: usize,
  pub unchanged: usize,
  pub skipped: usize,
  pub elapsed: Duration,
}

impl ProcessingSummary {
  /// Tallies `reports`.
  pub fn from_reports(reports: &[FileReport], elapsed: Duration) -> Self {
    let mut summary = Self {
      total: reports.len(),
      elapsed,
      ..Self::default()
    };

    for report in reports {
      match report.outcome {
        FileOutcome::Rewritten => summary.rewritten += 1,
        FileOutcome::Unchanged => summary.unchanged += 1,
        FileOutcome::Skipped { .. } => summary.skipped += 1,
      }
    }

    summary
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_summary_counts_each_outcome() {
    let reports = vec![
      FileReport::new(PathBuf::from("a.h"), FileOutcome::Rewritten),
      FileReport::new(PathBuf::from("b.h"), FileOutcome::Rewritten),
      FileReport::new(PathBuf::from("c.h"), FileOutcome::Unchanged),
      FileReport::new(
        PathBuf::from("d.cpp"),
        FileOutcome::Skipped {
          reason: "no header guard",
        },
      ),
    ];

    let summary = ProcessingSummary::from_reports(&reports, Duration::from_millis(5));

    assert_eq!(summary.total, 4);
    assert_eq!(summary.rewritten, 2);
    assert_eq!(summary.unchanged, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.elapsed, Duration::from_millis(5));
  }

  #[test]
  fn test_summary_of_nothing() {
    let summary = ProcessingSummary::from_reports(&[], Duration::ZERO);
    assert_eq!(summary, ProcessingSummary::default());
  }
}
