/* src/cli/core/src/clean.rs */

// `routepack clean` command: removes the output and working directories.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::build::options::DEFAULT_WORKING_DIR;
use crate::config::RoutepackConfig;
use crate::ui;

/// Working and output directories the config points at.
fn generated_dirs(config: &RoutepackConfig, base_dir: &Path) -> (PathBuf, PathBuf) {
  let working = base_dir.join(config.build.working_dir.as_deref().unwrap_or(DEFAULT_WORKING_DIR));
  let output = match &config.build.output_dir {
    Some(dir) => base_dir.join(dir),
    None => working.join("build"),
  };
  (working, output)
}

pub fn run_clean(config: &RoutepackConfig, base_dir: &Path) -> Result<()> {
  ui::arrow("cleaning project");

  let (working, output) = generated_dirs(config, base_dir);
  delete_dir_if_exists(&output)?;
  delete_dir_if_exists(&working)?;

  ui::ok("clean complete");
  Ok(())
}

fn delete_dir_if_exists(path: &Path) -> Result<()> {
  if path.exists() {
    std::fs::remove_dir_all(path)
      .with_context(|| format!("failed to remove {}", path.display()))?;
    ui::detail(&format!("deleted {}", path.display()));
  }
  Ok(())
}
