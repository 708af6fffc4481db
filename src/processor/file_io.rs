//! # File I/O Module
//!
//! Whole-file reads and writes for the processor.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// File I/O operations for the processor.
pub struct FileIO;

impl FileIO {
  /// Reads the complete file as UTF-8 text.
  ///
  /// # Errors
  ///
  /// Fails if the file is missing, unreadable, or not valid UTF-8.
  pub fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
  }

  /// Overwrites the file with `content`.
  ///
  /// Writes through the path, so symlinks and hard links keep pointing at
  /// the updated file and its permissions are left as they are.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be opened for writing, for example when it is
  /// read-only.
  pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write file: {}", path.display()))
  }
}
