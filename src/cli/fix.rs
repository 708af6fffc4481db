//! # Fix Command
//!
//! Loads the canonical license, collects the files under the given paths and
//! reconciles each one. With `--check` nothing is written and the exit code
//! reports whether any file needs a change.

use std::path::PathBuf;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use clap::Args;
use tracing::debug;

use licensefix::config::load_config;
use licensefix::diff::DiffManager;
use licensefix::info_log;
use licensefix::license::CanonicalLicense;
use licensefix::logging::{ColorMode, init_tracing, is_quiet, set_quiet, set_verbose};
use licensefix::output::{
  print_all_files_ok, print_blank_line, print_hint, print_needs_changes, print_offending_paths, print_start_message,
  print_summary,
};
use licensefix::processor::{FileCollector, Processor, ProcessorConfig};
use licensefix::report::{ProcessingSummary, write_json_report};

/// Arguments for the fix command
#[derive(Args, Debug, Default)]
pub struct FixArgs {
  /// Files or directories to process. Directories are processed recursively.
  /// Defaults to the current directory.
  #[arg(value_name = "PATHS")]
  pub paths: Vec<PathBuf>,

  /// Plain-text file holding the canonical license
  #[arg(long, short = 'f', value_name = "FILE")]
  pub license_file: Option<PathBuf>,

  /// File extension to process, without the dot (repeatable, case-insensitive) [default: java]
  #[arg(long, value_name = "EXT")]
  pub ext: Vec<String>,

  /// File patterns to ignore (supports glob patterns)
  #[arg(long, short = 'i', value_name = "GLOB")]
  pub ignore: Vec<String>,

  /// Only report files with a missing or incorrect header; never write
  #[arg(long)]
  pub check: bool,

  /// Print a diff of every change to stderr
  #[arg(long)]
  pub show_diff: bool,

  /// Save the diff of every change to a file
  #[arg(long, short = 'o', value_name = "FILE")]
  pub save_diff: Option<PathBuf>,

  /// Write a JSON report of the run to the specified path
  #[arg(long, value_name = "OUTPUT")]
  pub report_json: Option<PathBuf>,

  /// Path to config file (default: .licensefix.toml in the current directory)
  #[arg(long, value_name = "FILE")]
  pub config: Option<PathBuf>,

  /// Ignore config file even if present
  #[arg(long)]
  pub no_config: bool,

  /// Increase verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, action = clap::ArgAction::Count)]
  pub verbose: u8,

  /// Suppress all output except errors
  #[arg(short, long, conflicts_with = "verbose")]
  pub quiet: bool,

  /// Control when to use colored output (auto, never, always)
  #[arg(
    long,
    value_name = "WHEN",
    num_args = 0..=1,
    default_value_t = ColorMode::Auto,
    default_missing_value = "always",
    value_enum
  )]
  pub colors: ColorMode,
}

/// Run the fix command with the given arguments
pub fn run_fix(args: FixArgs) -> Result<()> {
  init_tracing(args.quiet, args.verbose);

  if args.verbose > 0 {
    set_verbose();
  } else if args.quiet {
    set_quiet();
  }
  args.colors.apply();

  let current_dir = std::env::current_dir().context("Failed to get current directory")?;
  let config = load_config(args.config.as_deref(), &current_dir, args.no_config)?.unwrap_or_default();

  let license_file = args.license_file.or(config.license_file).ok_or_else(|| {
    anyhow!("Missing required argument: --license-file <FILE> (or `license-file` in the config file)")
  })?;

  // Loaded before any file is touched; an unreadable license aborts the run
  let license = CanonicalLicense::load(&license_file)
    .with_context(|| format!("Failed to load license from {}", license_file.display()))?;

  let extensions = if args.ext.is_empty() { config.extensions } else { args.ext };
  let mut ignore = config.ignore;
  ignore.extend(args.ignore);
  let collector = FileCollector::new(extensions, &ignore)?;
  debug!("Processing extensions: {:?}", collector.extensions());

  let roots = if args.paths.is_empty() {
    vec![PathBuf::from(".")]
  } else {
    args.paths
  };
  let files = collector.collect(&roots)?;

  let check_only = args.check;
  let diff_manager = DiffManager::new(args.show_diff, args.save_diff);
  diff_manager.init()?;

  let processor = Processor::new(ProcessorConfig {
    license,
    check_only,
    diff_manager: Some(diff_manager),
  });

  print_start_message(files.len(), !check_only);

  let start_time = Instant::now();
  let reports = processor.process_files(files)?;
  let summary = ProcessingSummary::from_reports(&reports, start_time.elapsed());

  print_blank_line();
  if summary.files_changed() == 0 {
    print_all_files_ok();
  } else if check_only {
    print_needs_changes(summary.files_changed());
    if is_quiet() {
      print_offending_paths(&reports, Some(&current_dir));
    }
  }

  print_blank_line();
  print_summary(&summary);

  if let Some(ref output_path) = args.report_json {
    if let Err(e) = write_json_report(output_path, &reports, &summary) {
      eprintln!("Error generating JSON report: {:#}", e);
    } else {
      info_log!("Generated JSON report at {}", output_path.display());
    }
  }

  if check_only && summary.files_changed() > 0 {
    print_blank_line();
    print_hint("Run without --check to fix them.");
    process::exit(1);
  }

  Ok(())
}
