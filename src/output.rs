//! # Output Module
//!
//! All user-facing terminal output apart from the per-file status lines.
//!
//! - Colors only when the stream supports them (or `--colors` says so)
//! - Silence with `-q`, timing with `-v`
//! - Paths shown relative to the current directory

use std::path::Path;

use owo_colors::{OwoColorize, Stream};

use crate::logging::{is_quiet, is_verbose};
use crate::reconciler::HeaderStatus;
use crate::report::{FileReport, ProcessingSummary};

/// Symbols used in output
pub mod symbols {
  /// Success/has license
  pub const SUCCESS: &str = "\u{2713}"; // ✓
  /// Missing license/failure
  pub const FAILURE: &str = "\u{2717}"; // ✗
}

/// Print "Checking N files..." or "Processing N files...".
pub fn print_start_message(file_count: usize, modify_mode: bool) {
  if is_quiet() {
    return;
  }

  let verb = if modify_mode { "Processing" } else { "Checking" };
  println!("{} {} {}...", verb, file_count, plural(file_count));
}

/// Print a blank line for visual separation (respects quiet mode).
pub fn print_blank_line() {
  if !is_quiet() {
    println!();
  }
}

/// Print the success message when no file needs a change.
pub fn print_all_files_ok() {
  if is_quiet() {
    return;
  }

  println!(
    "{} All files have the correct license header.",
    symbols::SUCCESS.if_supports_color(Stream::Stdout, |s| s.green())
  );
}

/// Print the failure line of a check run.
pub fn print_needs_changes(file_count: usize) {
  if is_quiet() {
    return;
  }

  println!(
    "{} {} {} {} a license header change.",
    symbols::FAILURE.if_supports_color(Stream::Stdout, |s| s.red()),
    file_count,
    plural(file_count),
    if file_count == 1 { "needs" } else { "need" }
  );
}

/// Print the paths of files that need a header change, one per line.
///
/// Only used in quiet check mode, where the per-file status lines are
/// suppressed, so the output can be fed to other tools.
pub fn print_offending_paths(reports: &[FileReport], current_dir: Option<&Path>) {
  for report in reports.iter().filter(|r| r.status != HeaderStatus::Correct) {
    println!("{}", display_path(&report.path, current_dir));
  }
}

/// Print the processing summary.
///
/// Format: "Summary: X OK, Y missing, Z incorrect"
/// In verbose mode, also shows timing.
pub fn print_summary(summary: &ProcessingSummary) {
  if is_quiet() {
    return;
  }

  let color_count = |count: usize| {
    if count > 0 {
      count.if_supports_color(Stream::Stdout, |s| s.red()).to_string()
    } else {
      count.if_supports_color(Stream::Stdout, |s| s.cyan()).to_string()
    }
  };

  let mut summary_line = format!(
    "Summary: {} OK, {} missing, {} incorrect",
    summary.files_correct.if_supports_color(Stream::Stdout, |s| s.cyan()),
    color_count(summary.files_missing),
    color_count(summary.files_incorrect),
  );

  if summary.files_written > 0 {
    summary_line.push_str(&format!(", {} written", summary.files_written));
  }

  if is_verbose() {
    summary_line.push_str(&format!(" ({:.2}s)", summary.processing_time.as_secs_f64()));
  }

  println!("{}", summary_line);
}

/// Print a hint for the user about what to do next.
pub fn print_hint(message: &str) {
  if is_quiet() {
    return;
  }

  println!("{}", message.if_supports_color(Stream::Stdout, |s| s.yellow()));
}

const fn plural(count: usize) -> &'static str {
  if count == 1 { "file" } else { "files" }
}

/// Make a path relative to `current_dir` for display.
fn display_path(path: &Path, current_dir: Option<&Path>) -> String {
  current_dir
    .filter(|_| path.is_absolute())
    .and_then(|dir| pathdiff::diff_paths(path, dir))
    .unwrap_or_else(|| path.to_path_buf())
    .to_string_lossy()
    .to_string()
}
