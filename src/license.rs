//! # License Module
//!
//! This module loads the canonical license text and derives the exact block
//! comment that a conforming file must start with.
//!
//! The loaded value is constructed once at startup and passed to the
//! [`reconciler`](crate::reconciler) and [`Processor`](crate::processor::Processor)
//! explicitly.
//!
//! ## Example
//!
//! ```rust
//! use licensefix::license::CanonicalLicense;
//!
//! let license = CanonicalLicense::from_text("\nCopyright X\n\nAll rights reserved.  \n");
//! assert_eq!(license.text(), "Copyright X\n\nAll rights reserved.");
//! assert_eq!(
//!   license.commented_block(),
//!   "/**\n * Copyright X\n *\n * All rights reserved.\n */\n"
//! );
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::reconciler::{self, HeaderStatus};
use crate::verbose_log;

/// Marker that opens a license block comment.
pub const OPEN_MARKER: &str = "/**";

/// Prefix placed before every line of the license inside the block.
pub const LINE_MARKER: &str = " * ";

/// Marker that closes a license block comment.
pub const CLOSE_MARKER: &str = "*/";

/// The canonical license: the plain text and its commented rendering.
///
/// Both fields are fixed at construction; there is no way to mutate them
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalLicense {
  text: String,
  commented_block: String,
}

impl CanonicalLicense {
  /// Loads the canonical license from a plain-text file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file does not exist, cannot be read, or is not
  /// valid UTF-8. Callers treat this as fatal for the whole run.
  pub fn load(path: &Path) -> Result<Self> {
    verbose_log!("Loading license from: {}", path.display());

    let raw = fs::read_to_string(path).with_context(|| format!("Failed to read license file: {}", path.display()))?;

    let license = Self::from_text(&raw);
    if !license.is_self_consistent() {
      warn!(
        "License text in {} cannot round-trip through its own comment block; files will be rewritten on every run",
        path.display()
      );
    }

    Ok(license)
  }

  /// Builds the canonical license from in-memory text.
  ///
  /// Leading and trailing whitespace is stripped; interior line breaks are
  /// kept exactly.
  pub fn from_text(raw: &str) -> Self {
    let text = raw.trim().to_string();
    let commented_block = render_commented_block(&text);
    Self { text, commented_block }
  }

  /// The license text with surrounding whitespace removed.
  pub fn text(&self) -> &str {
    &self.text
  }

  /// The `/** ... */` block, terminated by a single newline.
  pub fn commented_block(&self) -> &str {
    &self.commented_block
  }

  /// Whether a file that starts with [`commented_block`](Self::commented_block)
  /// is recognized as correct.
  ///
  /// This fails for licenses containing `*/`, or whose lines begin with `*` or
  /// spaces, because normalization of the extracted header strips those.
  pub fn is_self_consistent(&self) -> bool {
    reconciler::reconcile(&self.commented_block, self).status() == HeaderStatus::Correct
  }
}

/// Wraps `text` in the block comment, one ` * ` prefixed line per text line.
fn render_commented_block(text: &str) -> String {
  let mut block = String::with_capacity(text.len() + OPEN_MARKER.len() * 4);
  block.push_str(OPEN_MARKER);
  block.push('\n');

  for line in text.split('\n') {
    let commented = format!("{LINE_MARKER}{line}");
    block.push_str(commented.trim_end());
    block.push('\n');
  }

  block.push(' ');
  block.push_str(CLOSE_MARKER);
  block.push('\n');
  block
}

#[cfg(test)]
mod tests {
  use tempfile::tempdir;

  use super::*;

  #[test]
  fn test_from_text_strips_outer_whitespace() {
    let license = CanonicalLicense::from_text("\n\n  Copyright X\n\t\n");
    assert_eq!(license.text(), "Copyright X");
  }

  #[test]
  fn test_commented_block_single_line() {
    let license = CanonicalLicense::from_text("Copyright X");
    assert_eq!(license.commented_block(), "/**\n * Copyright X\n */\n");
  }

  #[test]
  fn test_commented_block_blank_lines_have_no_trailing_space() {
    let license = CanonicalLicense::from_text("Line one\n\nLine three");
    assert_eq!(license.commented_block(), "/**\n * Line one\n *\n * Line three\n */\n");
  }

  #[test]
  fn test_commented_block_strips_trailing_whitespace_per_line() {
    let license = CanonicalLicense::from_text("Line one   \nLine two\t");
    assert_eq!(license.commented_block(), "/**\n * Line one\n * Line two\n */\n");
    // The plain text keeps interior trailing whitespace untouched
    assert_eq!(license.text(), "Line one   \nLine two");
  }

  #[test]
  fn test_commented_block_keeps_indentation_inside_lines() {
    let license = CanonicalLicense::from_text("Header\n  - indented item");
    assert_eq!(license.commented_block(), "/**\n * Header\n *   - indented item\n */\n");
  }

  #[test]
  fn test_derivation_is_deterministic() {
    let a = CanonicalLicense::from_text("Copyright X\nLicensed under Y");
    let b = CanonicalLicense::from_text("Copyright X\nLicensed under Y");
    assert_eq!(a, b);
  }

  #[test]
  fn test_self_consistency() {
    assert!(CanonicalLicense::from_text("Copyright X\n\nAll rights reserved.").is_self_consistent());
    // Leading indentation is lost by normalization
    assert!(!CanonicalLicense::from_text("Header\n  indented").is_self_consistent());
    // An embedded close marker truncates the recognized header
    assert!(!CanonicalLicense::from_text("See */ here").is_self_consistent());
  }

  #[test]
  fn test_load_from_file() -> Result<()> {
    let temp_dir = tempdir()?;
    let path = temp_dir.path().join("license.txt");
    fs::write(&path, "Copyright 2016 Example Corp\n\nLicensed under the Apache License.\n")?;

    let license = CanonicalLicense::load(&path)?;
    assert_eq!(
      license.text(),
      "Copyright 2016 Example Corp\n\nLicensed under the Apache License."
    );
    Ok(())
  }

  #[test]
  fn test_load_missing_file_is_an_error() {
    let result = CanonicalLicense::load(Path::new("/nonexistent/license.txt"));
    let err = result.expect_err("missing license must fail");
    assert!(err.to_string().contains("Failed to read license file"));
  }
}
