//! # licensefix
//!
//! Keeps the license header of every source file in a tree identical to one
//! canonical text.
//!
//! A file's header is the `/** ... */` block comment that opens it (leading
//! whitespace allowed). The comment body is normalized, stripping each line's
//! `*`/space decoration, and compared with the canonical license. Files
//! without a header get the canonical block prepended; files whose header
//! differs have it replaced. Everything after the header is left untouched.
//!
//! ## Usage as a Library
//!
//! ```rust,no_run
//! use std::path::{Path, PathBuf};
//!
//! use licensefix::license::CanonicalLicense;
//! use licensefix::processor::{FileCollector, Processor, ProcessorConfig};
//! use licensefix::reconciler::HeaderStatus;
//!
//! fn main() -> anyhow::Result<()> {
//!   let license = CanonicalLicense::load(Path::new("build_scripts/license.template"))?;
//!
//!   let files = FileCollector::default().collect(&[PathBuf::from("src")])?;
//!
//!   let mut config = ProcessorConfig::new(license);
//!   config.check_only = true;
//!   let reports = Processor::new(config).process_files(files)?;
//!
//!   for report in reports.iter().filter(|r| r.status != HeaderStatus::Correct) {
//!     println!("{} needs a new header", report.path.display());
//!   }
//!   Ok(())
//! }
//! ```
//!
//! The pure transformation is available without touching the filesystem:
//!
//! ```rust
//! use licensefix::license::CanonicalLicense;
//! use licensefix::reconciler::{HeaderStatus, reconcile};
//!
//! let license = CanonicalLicense::from_text("Copyright X");
//! let result = reconcile("class A {}\n", &license);
//! assert_eq!(result.status(), HeaderStatus::Missing);
//! assert_eq!(result.content(), "/**\n * Copyright X\n */\n\nclass A {}\n");
//! ```

pub mod config;
pub mod diff;
pub mod license;
pub mod logging;
pub mod output;
pub mod processor;
pub mod reconciler;
pub mod report;
