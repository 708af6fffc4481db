//! # Diff Module
//!
//! Renders line diffs between a file's current content and its reconciled
//! content, so pending header changes can be reviewed before they are
//! written.

use std::fmt::Write as _;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use similar::{ChangeTag, TextDiff};

/// Manages diff creation and rendering for license header changes.
///
/// This struct handles:
/// - Generating diffs between original and reconciled content
/// - Displaying diffs to stderr
/// - Appending diffs to a file
#[derive(Debug, Clone, Default)]
pub struct DiffManager {
  /// Whether to print diffs to stderr
  pub show_diff: bool,

  /// File that collects all diffs of the run
  pub save_diff_path: Option<PathBuf>,
}

impl DiffManager {
  /// Creates a new DiffManager.
  pub const fn new(show_diff: bool, save_diff_path: Option<PathBuf>) -> Self {
    Self {
      show_diff,
      save_diff_path,
    }
  }

  /// Whether any diff output is requested.
  pub const fn is_enabled(&self) -> bool {
    self.show_diff || self.save_diff_path.is_some()
  }

  /// Truncates the save file so each run starts with an empty diff.
  pub fn init(&self) -> Result<()> {
    if let Some(ref path) = self.save_diff_path {
      File::create(path).with_context(|| format!("Failed to create diff file: {}", path.display()))?;
    }
    Ok(())
  }

  /// Renders the diff for one file.
  ///
  /// The diff is printed to stderr when `show_diff` is set and appended to the
  /// save file when one is configured.
  ///
  /// # Parameters
  ///
  /// * `path` - Path of the file being reconciled
  /// * `original` - Content currently on disk
  /// * `new` - Reconciled content
  pub fn display_diff(&self, path: &Path, original: &str, new: &str) -> Result<()> {
    let rendered = render_diff(path, original, new);

    if self.show_diff {
      eprint!("{}", rendered);
    }

    if let Some(ref diff_path) = self.save_diff_path {
      let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(diff_path)
        .with_context(|| format!("Failed to open diff file: {}", diff_path.display()))?;
      file
        .write_all(rendered.as_bytes())
        .with_context(|| format!("Failed to write diff file: {}", diff_path.display()))?;
    }

    Ok(())
  }
}

/// Formats a `+`/`-`/` ` prefixed line diff with a header naming the file.
pub fn render_diff(path: &Path, original: &str, new: &str) -> String {
  let diff = TextDiff::from_lines(original, new);

  let mut rendered = String::new();
  let _ = writeln!(rendered, "Diff for {}:", path.display());

  for change in diff.iter_all_changes() {
    let sign = match change.tag() {
      ChangeTag::Delete => "-",
      ChangeTag::Insert => "+",
      ChangeTag::Equal => " ",
    };
    let _ = write!(rendered, "{}{}", sign, change);
    if change.missing_newline() {
      rendered.push('\n');
    }
  }

  rendered.push('\n');
  rendered
}
