mod common;

use std::fs;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{BANNER_TOP, banner, read_file, tool, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

fn run_add_license(dir: &std::path::Path, extra: &[&str]) -> Result<std::process::Output> {
  let output = tool("add-license", dir)?
    .args(["--src", "src", "--copyright", "COPYRIGHT.txt"])
    .args(extra)
    .output()?;
  Ok(output)
}

#[test]
fn test_stamps_pragma_once_header() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;
  write_file(temp_dir.path(), "src/a.h", "#pragma once\nint x;\n")?;

  let output = run_add_license(temp_dir.path(), &[])?;
  assert!(output.status.success());

  let expected = format!("{}\n#pragma once\nint x;\n", banner(&["Co."]));
  assert_eq!(read_file(temp_dir.path(), "src/a.h")?, expected);
  Ok(())
}

#[test]
fn test_replaces_leading_comments_and_skips_unguarded_files() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(
    temp_dir.path(),
    "COPYRIGHT.txt",
    "Copyright (C) 2024 Example Co.\nAll rights reserved.",
  )?;
  write_file(
    temp_dir.path(),
    "src/core/widget.hpp",
    "// Old header\n/*\n * Old license\n */\n\n#ifndef WIDGET_HPP\n#define WIDGET_HPP\n#endif\n",
  )?;
  write_file(temp_dir.path(), "src/main.cpp", "#include \"widget.hpp\"\nint main() {}\n")?;
  write_file(temp_dir.path(), "src/notes.txt", "#pragma once\n")?;

  let output = run_add_license(temp_dir.path(), &["-j", "2"])?;
  assert!(output.status.success());

  let expected = format!(
    "{}\n#ifndef WIDGET_HPP\n#define WIDGET_HPP\n#endif\n",
    banner(&["Copyright (C) 2024 Example Co.", "All rights reserved."])
  );
  assert_eq!(read_file(temp_dir.path(), "src/core/widget.hpp")?, expected);
  assert_eq!(
    read_file(temp_dir.path(), "src/main.cpp")?,
    "#include \"widget.hpp\"\nint main() {}\n"
  );
  assert_eq!(read_file(temp_dir.path(), "src/notes.txt")?, "#pragma once\n");
  Ok(())
}

#[test]
fn test_second_run_does_not_stack_banners() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;
  write_file(temp_dir.path(), "src/a.h", "#pragma once\nint x;\n")?;

  assert!(run_add_license(temp_dir.path(), &[])?.status.success());
  let once = read_file(temp_dir.path(), "src/a.h")?;

  assert!(run_add_license(temp_dir.path(), &[])?.status.success());
  let twice = read_file(temp_dir.path(), "src/a.h")?;

  assert_eq!(once, twice);
  assert_eq!(twice.matches(BANNER_TOP).count(), 1);
  Ok(())
}

#[test]
fn test_bom_and_crlf_are_normalized() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "\u{FEFF}Co.\r\n")?;
  write_file(temp_dir.path(), "src/a.h", "\u{FEFF}#pragma once\r\nint x;\r\n")?;

  assert!(run_add_license(temp_dir.path(), &[])?.status.success());

  let bytes = fs::read(temp_dir.path().join("src/a.h"))?;
  assert!(!bytes.starts_with("\u{FEFF}".as_bytes()));
  let expected = format!("{}\n#pragma once\nint x;\n", banner(&["Co."]));
  assert_eq!(String::from_utf8(bytes)?, expected);
  Ok(())
}

#[test]
fn test_dry_run_prints_diff_and_writes_nothing() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;
  write_file(temp_dir.path(), "src/a.h", "#pragma once\n")?;

  tool("add-license", temp_dir.path())?
    .args(["--src", "src", "--copyright", "COPYRIGHT.txt", "--dry-run", "--colors=never"])
    .assert()
    .success()
    .stderr(predicate::str::contains("+ * Co."));

  assert_eq!(read_file(temp_dir.path(), "src/a.h")?, "#pragma once\n");
  Ok(())
}

#[test]
fn test_save_diff_writes_diff_file() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;
  write_file(temp_dir.path(), "src/a.h", "#pragma once\n")?;

  let output = run_add_license(temp_dir.path(), &["--save-diff", "changes.diff"])?;
  assert!(output.status.success());

  let diff = read_file(temp_dir.path(), "changes.diff")?;
  assert!(diff.contains("a.h"));
  assert!(diff.contains("+ * Co.\n"));
  assert_eq!(read_file(temp_dir.path(), "src/a.h")?, "#pragma once\n");
  Ok(())
}

#[test]
fn test_invalid_utf8_fails_the_run() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;
  fs::create_dir_all(temp_dir.path().join("src"))?;
  fs::write(temp_dir.path().join("src/bad.h"), [0x23, 0xFF, 0xFE, 0x0A])?;

  tool("add-license", temp_dir.path())?
    .args(["--src", "src", "--copyright", "COPYRIGHT.txt"])
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("bad.h"));
  Ok(())
}

#[test]
fn test_config_file_selects_extensions() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;
  write_file(temp_dir.path(), ".headerkit.toml", "[license]\nextensions = [\"hxx\"]\n")?;
  write_file(temp_dir.path(), "src/a.h", "#pragma once\n")?;
  write_file(temp_dir.path(), "src/b.hxx", "#pragma once\n")?;

  assert!(run_add_license(temp_dir.path(), &[])?.status.success());

  assert_eq!(read_file(temp_dir.path(), "src/a.h")?, "#pragma once\n");
  assert!(read_file(temp_dir.path(), "src/b.hxx")?.starts_with(BANNER_TOP));

  assert!(run_add_license(temp_dir.path(), &["--no-config"])?.status.success());
  assert!(read_file(temp_dir.path(), "src/a.h")?.starts_with(BANNER_TOP));
  Ok(())
}
