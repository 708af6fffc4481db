//! # Report Module
//!
//! Per-file results of a run, a summary over them, and an optional JSON
//! report written to disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::reconciler::HeaderStatus;

/// Information about a processed file for reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileReport {
  /// Path to the file
  #[serde(with = "path_serialization")]
  pub path: PathBuf,
  /// Header state found before any change
  pub status: HeaderStatus,
  /// What was done (or, in check mode, what would be done)
  pub action: FileAction,
  /// Whether new content was written to disk
  pub written: bool,
}

/// Possible actions taken on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
  /// The license block was prepended
  Added,
  /// The existing leading block comment was replaced
  Replaced,
  /// The header was already correct
  #[serde(rename = "none")]
  NoActionNeeded,
}

impl From<HeaderStatus> for FileAction {
  fn from(status: HeaderStatus) -> Self {
    match status {
      HeaderStatus::Correct => FileAction::NoActionNeeded,
      HeaderStatus::Missing => FileAction::Added,
      HeaderStatus::Incorrect => FileAction::Replaced,
    }
  }
}

mod path_serialization {
  use std::path::{Path, PathBuf};

  use serde::{Deserialize, Deserializer, Serializer};

  pub fn serialize<S>(path: &Path, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&path.to_string_lossy())
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<PathBuf, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Ok(PathBuf::from(s))
  }
}

/// Summary of the processing results
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingSummary {
  /// Total number of files examined
  pub total_files: usize,
  /// Files whose header was already correct
  pub files_correct: usize,
  /// Files without a leading block comment
  pub files_missing: usize,
  /// Files whose leading block comment differed
  pub files_incorrect: usize,
  /// Files rewritten on disk
  pub files_written: usize,
  /// Total processing time
  #[serde(skip_serializing)]
  pub processing_time: Duration,
  /// Processing time in seconds for serialization
  #[serde(rename = "processing_time_seconds")]
  pub processing_time_secs: f64,
}

impl ProcessingSummary {
  /// Create a ProcessingSummary from a collection of FileReports
  pub fn from_reports(files: &[FileReport], processing_time: Duration) -> Self {
    let mut summary = Self {
      total_files: files.len(),
      files_correct: 0,
      files_missing: 0,
      files_incorrect: 0,
      files_written: 0,
      processing_time,
      processing_time_secs: processing_time.as_secs_f64(),
    };

    for file in files {
      match file.status {
        HeaderStatus::Correct => summary.files_correct += 1,
        HeaderStatus::Missing => summary.files_missing += 1,
        HeaderStatus::Incorrect => summary.files_incorrect += 1,
      }
      if file.written {
        summary.files_written += 1;
      }
    }

    summary
  }

  /// Files that needed (or received) a new header.
  pub const fn files_changed(&self) -> usize {
    self.files_missing + self.files_incorrect
  }
}

#[derive(Serialize)]
struct JsonReport<'a> {
  summary: &'a ProcessingSummary,
  files: &'a [FileReport],
}

/// Renders the JSON report document.
pub fn render_json_report(files: &[FileReport], summary: &ProcessingSummary) -> Result<String> {
  serde_json::to_string_pretty(&JsonReport { summary, files }).context("Failed to serialize JSON report")
}

/// Writes the JSON report to `output_path`.
pub fn write_json_report(output_path: &Path, files: &[FileReport], summary: &ProcessingSummary) -> Result<()> {
  let content = render_json_report(files, summary)?;
  fs::write(output_path, content).with_context(|| format!("Failed to write report to {}", output_path.display()))
}
