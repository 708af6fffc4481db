//! # licensefix
//!
//! Inserts or replaces the canonical license header in source files.

mod cli;

use anyhow::Result;

use crate::cli::{Cli, run_fix};

fn main() -> Result<()> {
  let cli = Cli::parse_args();
  run_fix(cli.fix_args)
}
