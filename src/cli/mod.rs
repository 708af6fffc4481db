//! # CLI Module
//!
//! This module contains the command-line interface implementation.
//! It uses clap for argument parsing.

mod fix;

use clap::Parser;
use clap::builder::styling::{AnsiColor, Color, Style, Styles};
pub use fix::{FixArgs, run_fix};

const CUSTOM_STYLES: Styles = Styles::styled()
  .header(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .usage(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))).bold())
  .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Blue))).bold())
  .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan))))
  .error(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Red))).bold())
  .valid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
  .invalid(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Yellow))));

const LONG_VERSION: &str = concat!(
  env!("CARGO_PKG_VERSION"),
  " (",
  env!("LICENSEFIX_GIT_HASH"),
  " ",
  env!("LICENSEFIX_GIT_DATE"),
  ")"
);

/// Top-level CLI arguments
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  long_version = LONG_VERSION,
  about,
  styles = CUSTOM_STYLES,
  after_help = "Examples:
  # Add or fix license headers in all .java files under src/
  licensefix --license-file build_scripts/license.template src/

  # Report files with a missing or wrong header without touching them
  licensefix --check --license-file LICENSE.txt .

  # Show what would change, and save it as a diff file
  licensefix --check --show-diff --save-diff changes.diff -f LICENSE.txt src/

  # Also process Kotlin sources, skipping generated code
  licensefix -f LICENSE.txt --ext java --ext kt --ignore \"**/generated/**\" .
",
  help_template = "{before-help}{name} v{version}
{about-section}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
  #[command(flatten)]
  pub fix_args: FixArgs,
}

impl Cli {
  /// Parse CLI arguments and return the Cli struct
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
