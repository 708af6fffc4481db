//! # Logging Module
//!
//! This module provides logging utilities for licensefix, including:
//! - Verbose logging that can be enabled/disabled
//! - Standard info logging with color support
//! - A `tracing` subscriber for structured diagnostics
//!
//! Verbose logs go to stderr and info logs go to stdout, so the per-file
//! status lines can be piped.
//!
//! ## Example
//!
//! ```rust
//! use licensefix::logging::{ColorMode, set_verbose};
//! use licensefix::{info_log, verbose_log};
//!
//! set_verbose();
//! ColorMode::Never.apply();
//!
//! // Goes to stderr
//! verbose_log!("Processing file: {}", "Example.java");
//!
//! // Goes to stdout
//! info_log!("Fixing missing license in {}", "Example.java");
//! ```

mod modes;

pub use modes::{ColorMode, default_filter, init_tracing, is_quiet, is_verbose, set_quiet, set_verbose};
use owo_colors::{OwoColorize, Stream};

/// Logs a message to stderr if verbose mode is enabled.
///
/// Uses the same format string syntax as [`eprintln!`].
#[macro_export]
macro_rules! verbose_log {
    ($($arg:tt)*) => {
        if $crate::logging::is_verbose() {
            eprintln!($($arg)*);
        }
    };
}

/// Logs a message to stdout unless quiet mode is enabled.
///
/// Uses the same format string syntax as [`println!`].
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        if !$crate::logging::is_quiet() {
            $crate::logging::print_info_log(&format!($($arg)*));
        }
    };
}

/// Prints an info line in yellow when the terminal supports it.
///
/// Used by [`info_log!`].
pub fn print_info_log(message: &str) {
  println!("{}", message.if_supports_color(Stream::Stdout, |m| m.yellow()));
}
