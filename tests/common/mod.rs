#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use tempfile::TempDir;

/// The license text used throughout the integration tests.
pub const LICENSE_TEXT: &str = "Copyright 2012 Example Corp.\n\nLicensed under the Apache License, Version 2.0.\n";

/// The commented block rendered from [`LICENSE_TEXT`].
pub const LICENSE_BLOCK: &str =
  "/**\n * Copyright 2012 Example Corp.\n *\n * Licensed under the Apache License, Version 2.0.\n */\n";

/// A scratch project with a license file at `license.template`.
pub struct Project {
  pub dir: TempDir,
}

impl Project {
  pub fn new() -> Result<Self> {
    let dir = tempfile::tempdir()?;
    fs::write(dir.path().join("license.template"), LICENSE_TEXT)?;
    Ok(Self { dir })
  }

  pub fn root(&self) -> &Path {
    self.dir.path()
  }

  pub fn license_path(&self) -> PathBuf {
    self.root().join("license.template")
  }

  /// Writes `content` to `relative`, creating parent directories.
  pub fn write(&self, relative: &str, content: &str) -> Result<PathBuf> {
    let path = self.root().join(relative);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent)?;
    }
    fs::write(&path, content)?;
    Ok(path)
  }

  pub fn read(&self, relative: &str) -> Result<String> {
    Ok(fs::read_to_string(self.root().join(relative))?)
  }
}
