//! # Processor Module
//!
//! Drives the per-file cycle: read the file, reconcile its header, optionally
//! render a diff, and write the corrected content back.
//!
//! The module is organized into several submodules:
//! - [`file_io`] - Whole-file reads and writes
//! - [`file_collector`] - Directory traversal and extension/ignore filtering
//!
//! The [`Processor`] never walks directories itself; callers hand it paths,
//! typically produced by a [`FileCollector`].

mod file_collector;
mod file_io;

use std::path::{Path, PathBuf};

use anyhow::Result;
pub use file_collector::{DEFAULT_EXTENSION, FileCollector};
pub use file_io::FileIO;
use tracing::{debug, trace};

use crate::diff::DiffManager;
use crate::info_log;
use crate::license::CanonicalLicense;
use crate::reconciler::{self, HeaderStatus};
use crate::report::{FileAction, FileReport};

/// Configuration for creating a Processor instance.
pub struct ProcessorConfig {
  pub license: CanonicalLicense,

  /// Report what would change without writing anything
  pub check_only: bool,

  pub diff_manager: Option<DiffManager>,
}

impl ProcessorConfig {
  /// Creates a config in modify mode without diff output.
  ///
  /// Use struct update syntax to override specific fields:
  /// ```ignore
  /// ProcessorConfig {
  ///     check_only: true,
  ///     ..ProcessorConfig::new(license)
  /// }
  /// ```
  pub const fn new(license: CanonicalLicense) -> Self {
    Self {
      license,
      check_only: false,
      diff_manager: None,
    }
  }
}

/// Applies the canonical license header to files.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::{Path, PathBuf};
///
/// use licensefix::license::CanonicalLicense;
/// use licensefix::processor::{FileCollector, Processor, ProcessorConfig};
///
/// # fn main() -> anyhow::Result<()> {
/// let license = CanonicalLicense::load(Path::new("license.template"))?;
/// let processor = Processor::new(ProcessorConfig::new(license));
///
/// let files = FileCollector::default().collect(&[PathBuf::from("src")])?;
/// let reports = processor.process_files(files)?;
/// # Ok(())
/// # }
/// ```
pub struct Processor {
  license: CanonicalLicense,
  check_only: bool,
  diff_manager: DiffManager,
}

impl Processor {
  /// Creates a new processor with the specified configuration.
  pub fn new(config: ProcessorConfig) -> Self {
    Self {
      license: config.license,
      check_only: config.check_only,
      diff_manager: config.diff_manager.unwrap_or_default(),
    }
  }

  /// Processes each path in order.
  ///
  /// # Errors
  ///
  /// The first file that cannot be read or written aborts the run; files
  /// already handled keep their new content.
  pub fn process_files<I>(&self, paths: I) -> Result<Vec<FileReport>>
  where
    I: IntoIterator<Item = PathBuf>,
  {
    let paths = paths.into_iter();
    let mut reports = Vec::with_capacity(paths.size_hint().0);

    for path in paths {
      reports.push(self.process_file(&path)?);
    }

    debug!("Processed {} files", reports.len());
    Ok(reports)
  }

  /// Reconciles a single file.
  ///
  /// Unchanged files are never written. Changed files are written in full
  /// unless the processor is in check mode.
  ///
  /// # Errors
  ///
  /// Fails if the file cannot be read, or cannot be written when it needs a
  /// change.
  pub fn process_file(&self, path: &Path) -> Result<FileReport> {
    trace!("Processing file: {}", path.display());

    let content = FileIO::read_to_string(path)?;
    let result = reconciler::reconcile(&content, &self.license);
    let status = result.status();

    if !result.changed() {
      trace!("License header already correct: {}", path.display());
      return Ok(FileReport {
        path: path.to_path_buf(),
        status,
        action: FileAction::NoActionNeeded,
        written: false,
      });
    }

    self.log_change(path, status);

    if self.diff_manager.is_enabled()
      && let Err(e) = self.diff_manager.display_diff(path, &content, result.content())
    {
      eprintln!("Warning: Failed to display diff for {}: {:#}", path.display(), e);
    }

    let written = if self.check_only {
      false
    } else {
      FileIO::write_file(path, result.content())?;
      true
    };

    Ok(FileReport {
      path: path.to_path_buf(),
      status,
      action: FileAction::from(status),
      written,
    })
  }

  fn log_change(&self, path: &Path, status: HeaderStatus) {
    match (self.check_only, status) {
      (false, HeaderStatus::Missing) => info_log!("Fixing missing license in {}", path.display()),
      (false, HeaderStatus::Incorrect) => info_log!("Fixing incorrect license in {}", path.display()),
      (true, HeaderStatus::Missing) => info_log!("Missing license in {}", path.display()),
      (true, HeaderStatus::Incorrect) => info_log!("Incorrect license in {}", path.display()),
      (_, HeaderStatus::Correct) => {}
    }
  }
}
