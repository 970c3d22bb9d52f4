//! # License Module
//!
//! Prepends a boxed copyright banner to C/C++ sources that open with a header
//! guard.
//!
//! The decision is made on a skippable prefix: leading blank lines, `//`
//! comments and `/* ... */` comments. If the first line after that prefix is
//! an `#ifndef` or `#pragma` directive, the prefix is dropped and replaced by
//! the banner. Otherwise the file is left alone.
//!
//! ```rust
//! use headerkit::license::{CopyrightBlock, stamp};
//!
//! let block = CopyrightBlock::from_text("Co.\n");
//! let lines = vec!["#pragma once\n".to_string(), "int x;\n".to_string()];
//!
//! let stamped = stamp(&lines, &block).expect("has a guard");
//! assert!(stamped.contains(" * Co.\n"));
//! assert!(stamped.ends_with("\n\n#pragma once\nint x;\n"));
//! ```

use std::path::Path;

use anyhow::{Context, Result};

use crate::processor::{FileIO, FileTransform, SourceText, Transform, split_lines};

/// Width of the banner border in asterisks.
const BORDER_WIDTH: usize = 76;

/// The copyright notice, loaded once and rendered for every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyrightBlock {
  lines: Vec<String>,
}

impl CopyrightBlock {
  /// Loads the notice from a UTF-8 text file. A byte-order mark is ignored.
  pub fn load(path: &Path) -> Result<Self> {
    let lines = FileIO::read_lines(path).with_context(|| format!("Failed to load copyright from {}", path.display()))?;
    Ok(Self { lines })
  }

  pub fn from_text(text: &str) -> Self {
    Self {
      lines: split_lines(text),
    }
  }

  /// Renders the banner:
  ///
  /// ```text
  /// /****************************************************************************
  ///  *
  ///  * <notice line>
  ///  *
  ///  ****************************************************************************/
  /// ```
  pub fn render(&self) -> String {
    let border = "*".repeat(BORDER_WIDTH);

    let mut rendered = format!("/{border}\n *\n");
    for line in &self.lines {
      rendered.push_str(" * ");
      rendered.push_str(line);
      if !line.ends_with('\n') {
        rendered.push('\n');
      }
    }
    rendered.push_str(" *\n");
    rendered.push_str(&format!(" {border}/\n"));

    rendered
  }
}

/// Returns the index of the header guard that ends the skippable prefix, or
/// `None` if the first substantive line is not a guard.
///
/// Lines are trimmed before inspection. A line opening with `/*` starts a
/// block comment that runs until a later line containing `*/`, so a one-line
/// `/* ... */` keeps the comment open. Block comments do not nest.
pub fn find_guard_start(lines: &[String]) -> Option<usize> {
  let mut in_block_comment = false;

  for (index, raw) in lines.iter().enumerate() {
    let line = raw.trim();

    if in_block_comment && line.contains("*/") {
      in_block_comment = false;
      continue;
    }

    if line.is_empty() || in_block_comment {
      continue;
    }

    if line.starts_with("/*") {
      in_block_comment = true;
      continue;
    }

    if line.starts_with("//") {
      continue;
    }

    return (line.starts_with("#ifndef") || line.starts_with("#pragma")).then_some(index);
  }

  None
}

/// Builds the stamped content, or `None` when the file has no guard after its
/// skippable prefix.
pub fn stamp(lines: &[String], block: &CopyrightBlock) -> Option<String> {
  let start = find_guard_start(lines)?;

  let mut content = block.render();
  content.push('\n');
  content.extend(lines[start..].iter().map(String::as_str));

  Some(content)
}

/// The `add-license` pass.
pub struct LicenseStamper {
  banner: CopyrightBlock,
}

impl LicenseStamper {
  pub const fn new(banner: CopyrightBlock) -> Self {
    Self { banner }
  }
}

impl FileTransform for LicenseStamper {
  fn transform(&self, source: &SourceText) -> Transform {
    match stamp(&source.lines, &self.banner) {
      Some(content) => Transform::Rewrite(content),
      None => Transform::Skip("no header guard after leading comments"),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lines(text: &str) -> Vec<String> {
    split_lines(text)
  }

  const BANNER_TOP: &str = "/****************************************************************************\n";
  const BANNER_BOTTOM: &str = " ****************************************************************************/\n";

  #[test]
  fn test_render_banner() {
    let block = CopyrightBlock::from_text("Copyright (C) 2024 Example Co.\nAll rights reserved.");
    let expected = format!(
      "{BANNER_TOP} *\n * Copyright (C) 2024 Example Co.\n * All rights reserved.\n *\n{BANNER_BOTTOM}"
    );
    assert_eq!(block.render(), expected);
  }

  #[test]
  fn test_render_keeps_blank_notice_lines() {
    let block = CopyrightBlock::from_text("A\n\nB\n");
    assert!(block.render().contains(" * A\n * \n * B\n"));
  }

  #[test]
  fn test_stamp_pragma_once() {
    let block = CopyrightBlock::from_text("Co.\n");
    let stamped = stamp(&lines("#pragma once\nint x;\n"), &block).unwrap();

    let expected = format!("{BANNER_TOP} *\n * Co.\n *\n{BANNER_BOTTOM}\n#pragma once\nint x;\n");
    assert_eq!(stamped, expected);
  }

  #[test]
  fn test_stamp_drops_leading_comments_and_blanks() {
    let block = CopyrightBlock::from_text("Co.\n");
    let source = "\n// old notice\n/*\n * Old banner\n */\n\n#ifndef A_H\n#define A_H\n#endif\n";
    let stamped = stamp(&lines(source), &block).unwrap();

    assert!(stamped.ends_with("\n\n#ifndef A_H\n#define A_H\n#endif\n"));
    assert!(!stamped.contains("old notice"));
    assert!(!stamped.contains("Old banner"));
  }

  #[test]
  fn test_no_guard_is_left_alone() {
    let block = CopyrightBlock::from_text("Co.\n");
    assert_eq!(stamp(&lines("// hello\nint main() {}\n"), &block), None);
    assert_eq!(stamp(&lines("#include <a.h>\n#pragma once\n"), &block), None);
    assert_eq!(stamp(&lines(""), &block), None);
    assert_eq!(stamp(&lines("\n\n// only comments\n"), &block), None);
  }

  #[test]
  fn test_block_comment_closes_on_any_line_containing_terminator() {
    let source = lines("/* start\n middle */ trailing\n#pragma once\n");
    assert_eq!(find_guard_start(&source), Some(2));
  }

  #[test]
  fn test_single_line_block_comment_stays_open() {
    // The opening line is not checked for its own terminator, so the guard
    // below is swallowed as comment text.
    let source = lines("/* one line */\n#pragma once\nint x;\n");
    assert_eq!(find_guard_start(&source), None);

    let source = lines("/* one line */\n#pragma once\n*/\n#ifndef A\n");
    assert_eq!(find_guard_start(&source), Some(3));
  }

  #[test]
  fn test_consecutive_block_comments_are_skipped() {
    let source = lines("/*\n first\n */\n/*\n second\n */\n#ifndef A_H\n");
    assert_eq!(find_guard_start(&source), Some(6));
  }

  #[test]
  fn test_guard_directive_prefix_match() {
    assert_eq!(find_guard_start(&lines("  #pragma   once\n")), Some(0));
    assert_eq!(find_guard_start(&lines("#pragma warning(disable: 4996)\n")), Some(0));
    assert_eq!(find_guard_start(&lines("#ifndef\n")), Some(0));
    assert_eq!(find_guard_start(&lines("#if !defined(A_H)\n")), None);
  }

  #[test]
  fn test_restamp_replaces_banner() {
    let first = CopyrightBlock::from_text("First Co.\n");
    let second = CopyrightBlock::from_text("Second Co.\n");
    let source = lines("#pragma once\nint x;\n");

    let once = stamp(&source, &first).unwrap();
    let twice = stamp(&lines(&once), &first).unwrap();
    assert_eq!(once, twice);

    let replaced = stamp(&lines(&once), &second).unwrap();
    assert!(replaced.contains(" * Second Co.\n"));
    assert!(!replaced.contains("First Co."));
    assert_eq!(replaced.matches(BANNER_TOP).count(), 1);
  }

  #[test]
  fn test_transform_reports_skip() {
    let stamper = LicenseStamper::new(CopyrightBlock::from_text("Co.\n"));
    let source = SourceText::decode(Path::new("main.cpp"), b"int main() {}\n".to_vec()).unwrap();
    assert!(matches!(stamper.transform(&source), Transform::Skip(_)));
  }
}
