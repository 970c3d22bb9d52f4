#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::process::Command;

use anyhow::{Context, Result};
use assert_cmd::prelude::*;

pub const BANNER_TOP: &str = "/****************************************************************************\n";
pub const BANNER_BOTTOM: &str = " ****************************************************************************/\n";

/// Builds a command for one of the binaries, isolated from any config file in
/// the environment and run from `dir`.
pub fn tool(name: &str, dir: &Path) -> Result<Command> {
  let mut cmd = Command::cargo_bin(name).with_context(|| format!("binary {name} not built"))?;
  cmd.current_dir(dir).env_remove("HEADERKIT_CONFIG").env_remove("RUST_LOG");
  Ok(cmd)
}

/// Writes `content` to `root/relative`, creating parent directories.
pub fn write_file(root: &Path, relative: &str, content: &str) -> Result<()> {
  let path = root.join(relative);
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }
  fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
}

pub fn read_file(root: &Path, relative: &str) -> Result<String> {
  let path = root.join(relative);
  fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
}

/// The banner `add-license` renders for the given notice lines.
pub fn banner(notice: &[&str]) -> String {
  let mut rendered = format!("{BANNER_TOP} *\n");
  for line in notice {
    rendered.push_str(&format!(" * {line}\n"));
  }
  rendered.push_str(" *\n");
  rendered.push_str(BANNER_BOTTOM);
  rendered
}
