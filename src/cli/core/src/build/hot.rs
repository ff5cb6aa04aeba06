/* src/cli/core/src/build/hot.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use routepack_codegen::CompilationResult;

pub const TRIGGER_FILE: &str = ".reload-trigger";

/// Told about every completed hot build.
pub trait HotReload: Send + Sync {
  fn notify(&self, result: &CompilationResult) -> Result<()>;
}

/// Writes a millisecond timestamp to a file a dev server watches.
#[derive(Debug, Clone)]
pub struct TriggerFileHotReload {
  path: PathBuf,
}

impl TriggerFileHotReload {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }

  /// `<output_dir>/.reload-trigger`
  pub fn in_output_dir(output_dir: &Path) -> Self {
    Self::new(output_dir.join(TRIGGER_FILE))
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

impl HotReload for TriggerFileHotReload {
  fn notify(&self, _result: &CompilationResult) -> Result<()> {
    let ts = std::time::SystemTime::now()
      .duration_since(std::time::UNIX_EPOCH)
      .unwrap_or_default()
      .as_millis()
      .to_string();
    std::fs::write(&self.path, ts)
      .with_context(|| format!("failed to write {}", self.path.display()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn writes_timestamp() {
    let tmp = tempfile::tempdir().unwrap();
    let hot = TriggerFileHotReload::in_output_dir(tmp.path());
    hot.notify(&CompilationResult::default()).unwrap();
    let content = std::fs::read_to_string(tmp.path().join(".reload-trigger")).unwrap();
    assert!(content.parse::<u128>().unwrap() > 0);
  }

  #[test]
  fn missing_directory_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let hot = TriggerFileHotReload::new(tmp.path().join("gone/.reload-trigger"));
    assert!(hot.notify(&CompilationResult::default()).is_err());
  }
}
