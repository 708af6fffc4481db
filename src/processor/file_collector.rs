//! # File Collector Module
//!
//! Turns the user's roots into the list of files the processor should look
//! at: directories are walked recursively, files are filtered by extension and
//! ignore patterns.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::{MatchOptions, Pattern};
use tracing::{debug, trace};
use walkdir::{DirEntry, WalkDir};

/// Extension processed when nothing else is configured.
pub const DEFAULT_EXTENSION: &str = "java";

const MATCH_OPTIONS: MatchOptions = MatchOptions {
  case_sensitive: true,
  require_literal_separator: false,
  require_literal_leading_dot: false,
};

/// Collects candidate files from directory and file roots.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::PathBuf;
///
/// use licensefix::processor::FileCollector;
///
/// # fn main() -> anyhow::Result<()> {
/// let collector = FileCollector::new(vec!["java".to_string()], &["**/generated/**".to_string()])?;
/// let files = collector.collect(&[PathBuf::from("src")])?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileCollector {
  /// Lowercased extensions without the leading dot
  extensions: Vec<String>,
  ignore_patterns: Vec<Pattern>,
}

impl Default for FileCollector {
  fn default() -> Self {
    Self {
      extensions: vec![DEFAULT_EXTENSION.to_string()],
      ignore_patterns: Vec::new(),
    }
  }
}

impl FileCollector {
  /// Creates a collector for the given extensions and ignore globs.
  ///
  /// An empty extension list falls back to [`DEFAULT_EXTENSION`].
  ///
  /// # Errors
  ///
  /// Returns an error if an extension is empty or starts with a dot, or if
  /// any ignore pattern is not a valid glob.
  pub fn new(extensions: Vec<String>, ignore_patterns: &[String]) -> Result<Self> {
    for ext in &extensions {
      if ext.is_empty() {
        bail!("Invalid extension: extension cannot be empty");
      }
      if ext.starts_with('.') {
        bail!("Invalid extension: extension '{}' should not include leading dot", ext);
      }
    }

    let mut extensions: Vec<String> = extensions.into_iter().map(|ext| ext.to_lowercase()).collect();
    if extensions.is_empty() {
      extensions.push(DEFAULT_EXTENSION.to_string());
    }

    let ignore_patterns = ignore_patterns
      .iter()
      .map(|p| Pattern::new(&p.replace('\\', "/")).with_context(|| format!("Invalid glob pattern: {}", p)))
      .collect::<Result<Vec<_>>>()?;

    Ok(Self {
      extensions,
      ignore_patterns,
    })
  }

  /// The extensions this collector accepts.
  pub fn extensions(&self) -> &[String] {
    &self.extensions
  }

  /// Collects all matching files under `roots`, in walk order.
  ///
  /// A root may be a directory (walked recursively, sorted by file name,
  /// hidden entries skipped, symlinks not followed) or a single file.
  ///
  /// # Errors
  ///
  /// Fails if a root does not exist or a directory cannot be read.
  pub fn collect(&self, roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let start_time = std::time::Instant::now();
    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for root in roots {
      if root.is_dir() {
        debug!("Scanning directory: {}", root.display());
        for path in self.walk(root)? {
          if seen.insert(path.clone()) {
            files.push(path);
          }
        }
      } else if root.is_file() {
        if self.accepts(root, root) && seen.insert(root.clone()) {
          files.push(root.clone());
        }
      } else {
        bail!("Path does not exist: {}", root.display());
      }
    }

    debug!(
      "Collected {} files in {}ms",
      files.len(),
      start_time.elapsed().as_millis()
    );

    Ok(files)
  }

  fn walk(&self, root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
      .follow_links(false)
      .sort_by_file_name()
      .into_iter()
      .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));

    for entry in walker {
      let entry = entry.with_context(|| format!("Failed to walk directory: {}", root.display()))?;
      if !entry.file_type().is_file() {
        continue;
      }

      let path = entry.path();
      if self.accepts(path, path.strip_prefix(root).unwrap_or(path)) {
        files.push(path.to_path_buf());
      }
    }

    Ok(files)
  }

  /// Whether `path` has an accepted extension and matches no ignore pattern.
  ///
  /// `relative` is the path relative to the root it was found under; ignore
  /// patterns are tried against both forms.
  fn accepts(&self, path: &Path, relative: &Path) -> bool {
    if !self.has_accepted_extension(path) {
      return false;
    }

    let relative_str = relative.to_string_lossy().replace('\\', "/");
    let full_str = path.to_string_lossy().replace('\\', "/");
    let ignored = self.ignore_patterns.iter().any(|pattern| {
      pattern.matches_with(&relative_str, MATCH_OPTIONS) || pattern.matches_with(&full_str, MATCH_OPTIONS)
    });

    if ignored {
      trace!("Skipping: {} (matches ignore pattern)", path.display());
    }
    !ignored
  }

  fn has_accepted_extension(&self, path: &Path) -> bool {
    path
      .extension()
      .map(|ext| ext.to_string_lossy().to_lowercase())
      .is_some_and(|ext| self.extensions.iter().any(|accepted| *accepted == ext))
  }
}

fn is_hidden(entry: &DirEntry) -> bool {
  entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
  use std::fs;

  use tempfile::tempdir;

  use super::*;

  fn touch(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(path, "class X {}\n")?;
    Ok(())
  }

  #[test]
  fn test_collects_default_extension_sorted() -> Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    touch(&root.join("b/Two.java"))?;
    touch(&root.join("a/One.java"))?;
    touch(&root.join("a/notes.txt"))?;
    touch(&root.join("Top.JAVA"))?;

    let files = FileCollector::default().collect(&[root.to_path_buf()])?;
    let relative: Vec<_> = files
      .iter()
      .map(|p| p.strip_prefix(root).expect("under root").to_path_buf())
      .collect();

    assert_eq!(
      relative,
      vec![
        PathBuf::from("Top.JAVA"),
        PathBuf::from("a/One.java"),
        PathBuf::from("b/Two.java"),
      ]
    );
    Ok(())
  }

  #[test]
  fn test_skips_hidden_entries() -> Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    touch(&root.join(".git/Hidden.java"))?;
    touch(&root.join(".Dot.java"))?;
    touch(&root.join("src/Visible.java"))?;

    let files = FileCollector::default().collect(&[root.to_path_buf()])?;
    assert_eq!(files, vec![root.join("src/Visible.java")]);
    Ok(())
  }

  #[test]
  fn test_custom_extensions_and_ignores() -> Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    touch(&root.join("src/Main.kt"))?;
    touch(&root.join("src/Main.java"))?;
    touch(&root.join("generated/Gen.java"))?;
    touch(&root.join("src/App.groovy"))?;

    let collector = FileCollector::new(
      vec!["java".to_string(), "KT".to_string()],
      &["generated/**".to_string()],
    )?;
    assert_eq!(collector.extensions(), &["java".to_string(), "kt".to_string()]);

    let files = collector.collect(&[root.to_path_buf()])?;
    assert_eq!(files, vec![root.join("src/Main.java"), root.join("src/Main.kt")]);
    Ok(())
  }

  #[test]
  fn test_file_root_and_deduplication() -> Result<()> {
    let temp_dir = tempdir()?;
    let root = temp_dir.path();
    let file = root.join("One.java");
    touch(&file)?;
    touch(&root.join("readme.md"))?;

    let collector = FileCollector::default();
    let files = collector.collect(&[file.clone(), root.to_path_buf(), file.clone()])?;
    assert_eq!(files, vec![file]);

    let files = collector.collect(&[root.join("readme.md")])?;
    assert!(files.is_empty());
    Ok(())
  }

  #[test]
  fn test_missing_root_is_an_error() {
    let result = FileCollector::default().collect(&[PathBuf::from("/nonexistent/licensefix/root")]);
    assert!(result.is_err());
  }

  #[test]
  fn test_invalid_ignore_pattern() {
    let result = FileCollector::new(vec![], &["[unclosed".to_string()]);
    assert!(result.is_err());
  }

  #[test]
  fn test_empty_extension_list_uses_default() -> Result<()> {
    let collector = FileCollector::new(vec![], &[])?;
    assert_eq!(collector.extensions(), &[DEFAULT_EXTENSION.to_string()]);
    Ok(())
  }

  #[test]
  fn test_malformed_extensions_are_rejected() {
    let err = FileCollector::new(vec![".java".to_string()], &[]).expect_err("leading dot must fail");
    assert!(err.to_string().contains("leading dot"));

    assert!(FileCollector::new(vec![String::new()], &[]).is_err());
  }
}
