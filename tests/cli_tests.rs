mod common;

use anyhow::Result;
use assert_cmd::prelude::*;
use common::{read_file, tool, write_file};
use predicates::prelude::*;
use tempfile::tempdir;

#[cfg(unix)]
const PRECONDITION_STATUS: i32 = 255;
#[cfg(not(unix))]
const PRECONDITION_STATUS: i32 = -1;

#[test]
fn test_add_license_missing_src() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;

  tool("add-license", temp_dir.path())?
    .args(["--src", "missing", "--copyright", "COPYRIGHT.txt"])
    .assert()
    .code(PRECONDITION_STATUS)
    .stdout(predicate::str::contains("Source directory doesn't exist."));
  Ok(())
}

#[test]
fn test_add_license_missing_copyright_touches_nothing() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "src/a.h", "#pragma once\n")?;

  tool("add-license", temp_dir.path())?
    .args(["--src", "src", "--copyright", "missing.txt"])
    .assert()
    .code(PRECONDITION_STATUS)
    .stdout(predicate::str::contains("Copyright file doesn't exist."));

  assert_eq!(read_file(temp_dir.path(), "src/a.h")?, "#pragma once\n");
  Ok(())
}

#[test]
fn test_source_dir_is_checked_before_copyright() -> Result<()> {
  let temp_dir = tempdir()?;

  tool("add-license", temp_dir.path())?
    .args(["--src", "missing", "--copyright", "missing.txt"])
    .assert()
    .code(PRECONDITION_STATUS)
    .stdout(predicate::str::contains("Source directory doesn't exist."))
    .stdout(predicate::str::contains("Copyright").not());
  Ok(())
}

#[test]
fn test_add_private_warning_missing_src() -> Result<()> {
  let temp_dir = tempdir()?;

  tool("add-private-warning", temp_dir.path())?
    .args(["--src", "missing", "--name", "Foo"])
    .assert()
    .code(PRECONDITION_STATUS)
    .stdout(predicate::str::contains("Source directory doesn't exist."));
  Ok(())
}

#[test]
fn test_gen_include_missing_src_leaves_dest() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "out/keep.h", "keep\n")?;

  tool("gen-include", temp_dir.path())?
    .args(["--src", "missing", "--dest", "out", "--rm"])
    .assert()
    .code(PRECONDITION_STATUS)
    .stdout(predicate::str::contains("Source directory doesn't exist."));

  assert_eq!(read_file(temp_dir.path(), "out/keep.h")?, "keep\n");
  Ok(())
}

#[test]
fn test_empty_tree_succeeds() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;
  std::fs::create_dir_all(temp_dir.path().join("src"))?;

  tool("add-license", temp_dir.path())?
    .args(["--src", "src", "--copyright", "COPYRIGHT.txt"])
    .assert()
    .success();
  Ok(())
}

#[test]
fn test_quiet_suppresses_summary() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;
  write_file(temp_dir.path(), "src/a.h", "#pragma once\n")?;

  tool("add-license", temp_dir.path())?
    .args(["--src", "src", "--copyright", "COPYRIGHT.txt", "--quiet"])
    .assert()
    .success()
    .stdout(predicate::str::is_empty());
  Ok(())
}

#[test]
fn test_colors_never_has_no_escape_codes() -> Result<()> {
  let temp_dir = tempdir()?;
  write_file(temp_dir.path(), "COPYRIGHT.txt", "Co.\n")?;
  write_file(temp_dir.path(), "src/a.h", "#pragma once\n")?;

  tool("add-license", temp_dir.path())?
    .args(["--src", "src", "--copyright", "COPYRIGHT.txt", "--colors=never", "-v"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Summary: 1 rewritten"))
    .stdout(predicate::str::contains("\x1b[").not());
  Ok(())
}

#[test]
fn test_version_flag() -> Result<()> {
  let temp_dir = tempdir()?;

  for name in ["add-license", "add-private-warning", "gen-include"] {
    tool(name, temp_dir.path())?
      .arg("--version")
      .assert()
      .success()
      .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
  }
  Ok(())
}
