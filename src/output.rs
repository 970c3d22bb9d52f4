//! # Output Module
//!
//! This module centralizes all user-facing output for the headerkit tools.
//! It provides consistent formatting, colors, and symbols for terminal output.
//!
//! Everything here goes to stdout and is suppressed by `--quiet`. Per-file
//! progress lives in [`verbose_log!`](crate::verbose_log) and diagnostics in
//! `tracing`, both on stderr.

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::mirror::{MirrorPlan, Partition};
use crate::report::ProcessingSummary;

/// Symbols used in output
pub mod symbols {
  /// Files were written
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Nothing to do
  pub const UNCHANGED: &str = "-";
}

/// Print the initial "Processing N files..." message.
pub fn print_start_message(file_count: usize, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let verb = if dry_run { "Checking" } else { "Processing" };
  let files_word = if file_count == 1 { "file" } else { "files" };

  println!("{} {} {}...", verb, file_count, files_word);
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the processing summary of a rewrite pass.
///
/// Format: "Summary: X rewritten, Y unchanged, Z skipped"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary, dry_run: bool) {
  if is_quiet() {
    return;
  }

  let symbol = if summary.rewritten > 0 {
    symbols::SUCCESS
      .if_supports_color(Stream::Stdout, |s| s.green())
      .to_string()
  } else {
    symbols::UNCHANGED
      .if_supports_color(Stream::Stdout, |s| s.dimmed())
      .to_string()
  };

  let verb = if dry_run { "would be rewritten" } else { "rewritten" };
  let mut summary_line = format!(
    "{} Summary: {} {}, {} unchanged, {} skipped",
    symbol,
    summary.rewritten.if_supports_color(Stream::Stdout, |s| s.cyan()),
    verb,
    summary.unchanged.if_supports_color(Stream::Stdout, |s| s.cyan()),
    summary.skipped.if_supports_color(Stream::Stdout, |s| s.dimmed())
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.elapsed.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print the files an include mirror would generate, one per line.
///
/// Used by `gen-include --dry-run`; printed even in quiet mode since the plan
/// is the requested output.
pub fn print_mirror_plan(plan: &MirrorPlan) {
  for entry in &plan.entries {
    let marker = match entry.partition {
      Partition::Public => " ",
      Partition::Private => "p",
    };
    println!(
      "{} {} {}",
      marker.if_supports_color(Stream::Stdout, |s| s.dimmed()),
      entry.dest.display(),
      format!("<- {}", entry.source.display()).if_supports_color(Stream::Stdout, |s| s.dimmed())
    );
  }
}

/// Print the closing line of a mirror run.
pub fn print_mirror_summary(plan: &MirrorPlan, summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let private = plan
    .entries
    .iter()
    .filter(|entry| entry.partition == Partition::Private)
    .count();

  let mut summary_line = format!(
    "{} Generated {} {} ({} private)",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green()),
    summary.rewritten.if_supports_color(Stream::Stdout, |s| s.cyan()),
    if summary.rewritten == 1 { "file" } else { "files" },
    private
  );

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.elapsed.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}
