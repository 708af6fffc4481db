//! # Reconciler Module
//!
//! Decides, for the text of a single file, whether its leading license block
//! is correct, missing, or incorrect, and produces the corrected text.
//!
//! Only one comment form is recognized: a `/** ... */` block at the very
//! start of the file, optionally preceded by whitespace. The block ends at the
//! *first* `*/` after the opener. A header that contains a stray `*/` is
//! therefore truncated there, and whatever follows is treated as ordinary file
//! content.
//!
//! Everything here is pure: no I/O, no logging.
//!
//! ## Example
//!
//! ```rust
//! use licensefix::license::CanonicalLicense;
//! use licensefix::reconciler::{HeaderStatus, reconcile};
//!
//! let license = CanonicalLicense::from_text("Copyright X");
//!
//! let fixed = reconcile("class Foo {}\n", &license);
//! assert_eq!(fixed.status(), HeaderStatus::Missing);
//! assert_eq!(fixed.content(), "/**\n * Copyright X\n */\n\nclass Foo {}\n");
//!
//! let again = reconcile(fixed.content(), &license);
//! assert!(!again.changed());
//! ```

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::license::{CLOSE_MARKER, CanonicalLicense, OPEN_MARKER};

/// State of a file's license header before reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderStatus {
  /// The leading block comment matches the canonical text.
  Correct,
  /// The file does not start with a block comment.
  Missing,
  /// The file starts with a block comment whose text differs.
  Incorrect,
}

/// The outcome of reconciling one file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation<'a> {
  content: Cow<'a, str>,
  status: HeaderStatus,
}

impl<'a> Reconciliation<'a> {
  /// The header state that was found.
  pub const fn status(&self) -> HeaderStatus {
    self.status
  }

  /// Whether the content was rewritten.
  pub fn changed(&self) -> bool {
    self.status != HeaderStatus::Correct
  }

  /// The reconciled content. Identical to the input when nothing changed.
  pub fn content(&self) -> &str {
    &self.content
  }

  /// Consumes the reconciliation, returning the content.
  pub fn into_content(self) -> Cow<'a, str> {
    self.content
  }
}

/// A `/** ... */` block found at the start of a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeadingComment<'a> {
  /// Byte offset just past the closing `*/`. The span always starts at 0, so
  /// any leading whitespace belongs to it.
  pub end: usize,
  /// Text between `/**` and the first `*/`.
  pub inner: &'a str,
}

/// Reconciles `content` against the canonical license.
///
/// - No leading block comment: the commented block, a blank line, then the
///   original content.
/// - Leading block comment whose normalized text equals the license: the
///   content is returned borrowed and unchanged.
/// - Otherwise the leading block comment (and whitespace before it) is
///   replaced by the commented block; the rest of the file is untouched.
pub fn reconcile<'a>(content: &'a str, license: &CanonicalLicense) -> Reconciliation<'a> {
  let Some(comment) = find_leading_comment(content) else {
    let mut fixed = String::with_capacity(license.commented_block().len() + 1 + content.len());
    fixed.push_str(license.commented_block());
    fixed.push('\n');
    fixed.push_str(content);
    return Reconciliation {
      content: Cow::Owned(fixed),
      status: HeaderStatus::Missing,
    };
  };

  if normalize_comment(comment.inner) == license.text() {
    return Reconciliation {
      content: Cow::Borrowed(content),
      status: HeaderStatus::Correct,
    };
  }

  let rest = &content[comment.end..];
  let mut fixed = String::with_capacity(license.commented_block().len() + rest.len());
  fixed.push_str(license.commented_block());
  fixed.push_str(rest);
  Reconciliation {
    content: Cow::Owned(fixed),
    status: HeaderStatus::Incorrect,
  }
}

/// Finds the block comment that opens the file, if any.
///
/// Leading whitespace is skipped, then the content must continue with `/**`.
/// The comment ends at the first `*/` found after the opener.
pub fn find_leading_comment(content: &str) -> Option<LeadingComment<'_>> {
  let body_start = content.len() - content.trim_start_matches(is_blank).len();
  let after_open = content[body_start..].strip_prefix(OPEN_MARKER)?;
  let inner_start = content.len() - after_open.len();

  let close = after_open.find(CLOSE_MARKER)?;
  Some(LeadingComment {
    end: inner_start + close + CLOSE_MARKER.len(),
    inner: &after_open[..close],
  })
}

/// Reduces the inside of a block comment to its plain text.
///
/// The whole span is trimmed, then each line loses any leading run of `*` and
/// space characters. Other decoration is left in place.
pub fn normalize_comment(inner: &str) -> String {
  inner
    .trim_matches(is_blank)
    .split('\n')
    .map(|line| line.trim_start_matches(['*', ' ']))
    .collect::<Vec<_>>()
    .join("\n")
}

const fn is_blank(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{0B}' | '\u{0C}')
}

#[cfg(test)]
mod tests {
  use super::*;

  fn license() -> CanonicalLicense {
    CanonicalLicense::from_text("Copyright X")
  }

  #[test]
  fn test_missing_header_is_prepended() {
    let result = reconcile("class Foo {}\n", &license());
    assert_eq!(result.status(), HeaderStatus::Missing);
    assert!(result.changed());
    assert_eq!(result.content(), "/**\n * Copyright X\n */\n\nclass Foo {}\n");
  }

  #[test]
  fn test_empty_file_gets_header() {
    let result = reconcile("", &license());
    assert_eq!(result.status(), HeaderStatus::Missing);
    assert_eq!(result.content(), "/**\n * Copyright X\n */\n\n");
  }

  #[test]
  fn test_correct_header_is_untouched() {
    let content = "/**\n * Copyright X\n */\n\nclass Foo {}\n";
    let result = reconcile(content, &license());
    assert_eq!(result.status(), HeaderStatus::Correct);
    assert!(!result.changed());
    assert!(matches!(result.clone().into_content(), Cow::Borrowed(_)));
    assert_eq!(result.content(), content);
  }

  #[test]
  fn test_incorrect_header_is_replaced() {
    let result = reconcile("/** wrong license */\nclass Foo {}\n", &license());
    assert_eq!(result.status(), HeaderStatus::Incorrect);
    assert!(result.changed());
    assert_eq!(result.content(), "/**\n * Copyright X\n */\n\nclass Foo {}\n");
  }

  #[test]
  fn test_replacement_keeps_following_separation() {
    let result = reconcile("/** old */class Foo {}\n", &license());
    assert_eq!(result.content(), "/**\n * Copyright X\n */\nclass Foo {}\n");

    let result = reconcile("/** old */\n\n\nclass Foo {}\n", &license());
    assert_eq!(result.content(), "/**\n * Copyright X\n */\n\n\n\nclass Foo {}\n");
  }

  #[test]
  fn test_leading_whitespace_belongs_to_replaced_span() {
    let result = reconcile("\n  \t/** old */\nclass Foo {}\n", &license());
    assert_eq!(result.status(), HeaderStatus::Incorrect);
    assert_eq!(result.content(), "/**\n * Copyright X\n */\n\nclass Foo {}\n");
  }

  #[test]
  fn test_leading_whitespace_before_correct_header_is_kept() {
    let content = "\n\n/** Copyright X */\nclass Foo {}\n";
    let result = reconcile(content, &license());
    assert_eq!(result.status(), HeaderStatus::Correct);
    assert_eq!(result.content(), content);
  }

  #[test]
  fn test_non_leading_comment_is_ignored() {
    let content = "class Foo {}\n/** Copyright X */\n";
    let result = reconcile(content, &license());
    assert_eq!(result.status(), HeaderStatus::Missing);
    assert_eq!(
      result.content(),
      "/**\n * Copyright X\n */\n\nclass Foo {}\n/** Copyright X */\n"
    );
  }

  #[test]
  fn test_line_comment_is_not_a_header() {
    let result = reconcile("// Copyright X\nclass Foo {}\n", &license());
    assert_eq!(result.status(), HeaderStatus::Missing);
  }

  #[test]
  fn test_single_star_block_is_not_a_header() {
    let result = reconcile("/* Copyright X */\nclass Foo {}\n", &license());
    assert_eq!(result.status(), HeaderStatus::Missing);
  }

  #[test]
  fn test_unterminated_block_is_missing() {
    let result = reconcile("/** Copyright X\nclass Foo {}\n", &license());
    assert_eq!(result.status(), HeaderStatus::Missing);
  }

  #[test]
  fn test_decoration_variants_match() {
    for content in [
      "/** Copyright X */",
      "/**\n * Copyright X\n */",
      "/**\n*Copyright X\n*/",
      "/**\n  *  Copyright X\n  */",
      "/***Copyright X*/",
    ] {
      let result = reconcile(content, &license());
      assert_eq!(result.status(), HeaderStatus::Correct, "content: {:?}", content);
    }
  }

  #[test]
  fn test_other_decoration_is_a_mismatch() {
    let result = reconcile("/**\n # Copyright X\n */\nclass Foo {}\n", &license());
    assert_eq!(result.status(), HeaderStatus::Incorrect);
  }

  #[test]
  fn test_case_sensitive_comparison() {
    let result = reconcile("/** copyright x */\n", &license());
    assert_eq!(result.status(), HeaderStatus::Incorrect);
  }

  #[test]
  fn test_minimal_span_capture() {
    let result = reconcile("/** Copyright */ extra */ more", &license());
    assert_eq!(result.status(), HeaderStatus::Incorrect);
    assert_eq!(result.content(), "/**\n * Copyright X\n */\n extra */ more");

    // The truncated span alone decides the match
    let short = CanonicalLicense::from_text("Copyright");
    let result = reconcile("/** Copyright */ extra */ more", &short);
    assert_eq!(result.status(), HeaderStatus::Correct);
  }

  #[test]
  fn test_find_leading_comment_offsets() {
    let content = "  /** abc */ rest";
    let comment = find_leading_comment(content).expect("comment at start");
    assert_eq!(comment.inner, " abc ");
    assert_eq!(&content[comment.end..], " rest");
  }

  #[test]
  fn test_find_leading_comment_edge_forms() {
    // `/**/` has no close marker after the opener
    assert!(find_leading_comment("/**/ rest").is_none());
    let comment = find_leading_comment("/***/ rest").expect("empty comment");
    assert_eq!(comment.inner, "");
    assert!(find_leading_comment("x /** a */").is_none());
    assert!(find_leading_comment("").is_none());
  }

  #[test]
  fn test_normalize_comment() {
    assert_eq!(normalize_comment("\n * Line one\n *\n * Line three\n "), "Line one\n\nLine three");
    assert_eq!(normalize_comment("  *** a\n**b  "), "a\nb");
    assert_eq!(normalize_comment("\n\t- item\n"), "- item");
  }

  #[test]
  fn test_multiline_license_round_trip() {
    let license = CanonicalLicense::from_text("Copyright 2016 Example\n\nLicensed under the MIT License.");
    let first = reconcile("package demo;\n", &license);
    assert_eq!(first.status(), HeaderStatus::Missing);
    let second = reconcile(first.content(), &license);
    assert_eq!(second.status(), HeaderStatus::Correct);
    assert_eq!(second.content(), first.content());
  }

  #[test]
  fn test_idempotence() {
    let inputs = [
      "",
      "class Foo {}\n",
      "/** wrong license */\nclass Foo {}\n",
      "   \n/** Copyright X */",
      "class Foo {}\n/** Copyright X */\n",
      "/** Copyright */ extra */ more",
      "/**\n * Copyright Y\n * More\n */\n\npackage a;\n",
      "/**/ odd",
    ];

    for input in inputs {
      let first = reconcile(input, &license());
      let second = reconcile(first.content(), &license());
      assert!(!second.changed(), "second pass changed {:?}", input);
      assert_eq!(second.content(), first.content());
    }
  }
}
