//! # File I/O Module
//!
//! Reading and writing of source files. Text is strict UTF-8: a leading
//! byte-order mark is stripped on read and never written back, and line
//! terminators are normalized to `\n`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A decoded source file.
#[derive(Debug, Clone)]
pub struct SourceText {
  /// Where the file was read from.
  pub path: PathBuf,
  /// Raw bytes as found on disk.
  bytes: Vec<u8>,
  /// Lines with terminators normalized to `\n`. The last line may have no
  /// terminator.
  pub lines: Vec<String>,
}

impl SourceText {
  /// Decodes `bytes` read from `path`.
  ///
  /// # Errors
  ///
  /// Returns an error if the content is not valid UTF-8.
  pub fn decode(path: &Path, bytes: Vec<u8>) -> Result<Self> {
    let text = decode_utf8(&bytes).with_context(|| format!("Failed to decode {} as UTF-8", path.display()))?;
    let lines = split_lines(text);
    Ok(Self {
      path: path.to_path_buf(),
      bytes,
      lines,
    })
  }

  /// Decoded content with normalized line terminators.
  pub fn text(&self) -> String {
    self.lines.concat()
  }

  /// Whether writing `content` would leave the file byte-identical.
  pub fn is_identical_to(&self, content: &str) -> bool {
    self.bytes == content.as_bytes()
  }
}

/// Strips an optional byte-order mark and validates UTF-8.
pub fn decode_utf8(bytes: &[u8]) -> Result<&str> {
  let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
  Ok(std::str::from_utf8(bytes)?)
}

/// Splits text into lines, keeping each terminator and normalizing `\r\n` and
/// lone `\r` to `\n`.
pub fn split_lines(text: &str) -> Vec<String> {
  let normalized = if text.contains('\r') {
    text.replace("\r\n", "\n").replace('\r', "\n")
  } else {
    text.to_string()
  };
  normalized.split_inclusive('\n').map(str::to_string).collect()
}

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads and decodes a whole source file.
  pub async fn read_source(path: &Path) -> Result<SourceText> {
    let bytes = tokio::fs::read(path)
      .await
      .with_context(|| format!("Failed to read file: {}", path.display()))?;
    SourceText::decode(path, bytes)
  }

  /// Reads a text file as lines, for inputs such as the copyright notice.
  pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))?;
    let text = decode_utf8(&bytes).with_context(|| format!("Failed to decode {} as UTF-8", path.display()))?;
    Ok(split_lines(text))
  }

  /// Writes file content as UTF-8.
  pub async fn write_file(path: &Path, content: &str) -> Result<()> {
    tokio::fs::write(path, content)
      .await
      .with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
