//! # Private Warning Module
//!
//! Marks private headers (`*_p.h`, `*_p.hpp`) with a comment stating that
//! they are not part of the library's public API.
//!
//! The warning goes right after the header guard. A header that already
//! carries the warning has the library name in it updated in place, so
//! running the pass again with the same name changes nothing.

use std::sync::LazyLock;

use regex::{NoExpand, Regex};

use crate::processor::{FileTransform, SourceText, Transform};

/// Matches the sentence that identifies an existing warning and captures the
/// library name in it.
static WARNING_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"This file is not part of the (\w+) API").expect("warning regex must compile"));

/// A library name the warning regex can capture again.
static LIBRARY_NAME_REGEX: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\w+$").expect("library name regex must compile"));

const IFNDEF: &str = "#ifndef";
const DEFINE: &str = "#define";

/// Whether `name` can be written into the warning and found again by a later
/// run. Uses the same `\w` class as the warning regex.
pub fn is_valid_library(name: &str) -> bool {
  LIBRARY_NAME_REGEX.is_match(name)
}

/// Renders the warning block for `library`.
pub fn warning_comment(library: &str) -> String {
  format!(
    "//\n\
     //  W A R N I N G !!!\n\
     //  -----------------\n\
     //\n\
     // This file is not part of the {library} API. It is used purely as an\n\
     // implementation detail. This header file may change from version to\n\
     // version without notice, or may even be removed.\n\
     //\n"
  )
}

/// Returns the line index of the header guard.
///
/// The guard is either an `#ifndef NAME` immediately followed by a
/// `#define NAME` with the same name, or a `#pragma once` line. Only the first
/// `#ifndef` in the file is considered; if it is not followed by a matching
/// `#define` there is no guard.
pub fn find_guard(lines: &[String]) -> Option<usize> {
  for (index, raw) in lines.iter().enumerate() {
    let line = raw.trim();

    if let Some(name) = line.strip_prefix(IFNDEF) {
      let next = lines.get(index + 1)?.trim();
      let defined = next.strip_prefix(DEFINE)?;
      return (name.trim() == defined.trim()).then_some(index);
    }

    if line.starts_with("#pragma once") {
      return Some(index);
    }
  }

  None
}

/// Where the warning is inserted relative to the guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
  /// Index of the first line after the guard that is not a directive.
  pub index: usize,
  /// Whether that line is blank, so a separator is already present.
  pub has_blank_separator: bool,
}

/// Finds the first line after the guard that is not a preprocessor directive.
///
/// If only directives follow the guard, the anchor stays on the guard line.
pub fn find_anchor(lines: &[String], guard: usize) -> Anchor {
  lines
    .iter()
    .enumerate()
    .skip(guard + 1)
    .find(|(_, raw)| !raw.trim().starts_with('#'))
    .map_or(
      Anchor {
        index: guard,
        has_blank_separator: false,
      },
      |(index, raw)| Anchor {
        index,
        has_blank_separator: raw.trim().is_empty(),
      },
    )
}

/// Result of looking for an existing warning comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WarningSearch {
  /// The warning sentence is on line `index` and names `library`.
  Found { index: usize, library: String },
  NotFound,
}

/// Extracts the library name from a line carrying the warning sentence.
pub fn warning_library(line: &str) -> Option<&str> {
  WARNING_REGEX
    .captures(line)
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str())
}

/// Scans forward from the line after the anchor, across blank lines and `//`
/// comments, for the warning sentence. Any other line ends the search.
pub fn find_warning(lines: &[String], anchor: usize) -> WarningSearch {
  for (index, raw) in lines.iter().enumerate().skip(anchor + 1) {
    let line = raw.trim();

    if line.is_empty() {
      continue;
    }

    if !line.starts_with("//") {
      break;
    }

    if let Some(library) = warning_library(line) {
      return WarningSearch::Found {
        index,
        library: library.to_string(),
      };
    }
  }

  WarningSearch::NotFound
}

/// Replaces the library name in every warning sentence on `line`.
pub fn rename_library(line: &str, library: &str) -> String {
  let replacement = format!("This file is not part of the {library} API");
  WARNING_REGEX.replace_all(line, NoExpand(&replacement)).into_owned()
}

/// Builds the new content, or `None` when the header has no guard.
pub fn inject(lines: &[String], library: &str) -> Option<String> {
  let guard = find_guard(lines)?;
  let anchor = find_anchor(lines, guard);

  let mut content = String::new();
  match find_warning(lines, anchor.index) {
    WarningSearch::Found { index, .. } => {
      content.extend(lines[..index].iter().map(String::as_str));
      content.push_str(&rename_library(&lines[index], library));
      content.extend(lines[index + 1..].iter().map(String::as_str));
    }
    WarningSearch::NotFound => {
      content.extend(lines[..anchor.index].iter().map(String::as_str));
      content.push('\n');
      content.push_str(&warning_comment(library));
      if !anchor.has_blank_separator {
        content.push('\n');
      }
      content.extend(lines[anchor.index..].iter().map(String::as_str));
    }
  }

  Some(content)
}

/// The `add-private-warning` pass.
pub struct PrivateWarningInjector {
  library: String,
}

impl PrivateWarningInjector {
  pub fn new(library: impl Into<String>) -> Self {
    Self {
      library: library.into(),
    }
  }
}

impl FileTransform for PrivateWarningInjector {
  fn transform(&self, source: &SourceText) -> Transform {
    match inject(&source.lines, &self.library) {
      Some(content) => Transform::Rewrite(content),
      None => Transform::Skip("no header guard"),
    }
  }
}
