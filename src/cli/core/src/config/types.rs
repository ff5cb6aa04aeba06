/* src/cli/core/src/config/types.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use routepack_codegen::{RouteDef, normalize_routes};
use serde::Deserialize;

use crate::build::hot::TRIGGER_FILE;
use crate::build::options::DEFAULT_WORKING_DIR;
use crate::build::{CompileOptions, ConfigOverride};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutepackConfig {
  #[serde(default)]
  pub build: BuildSection,
  #[serde(default)]
  pub logging: LoggingSection,
  #[serde(default)]
  pub hot: HotSection,
  #[serde(default)]
  pub routes: IndexMap<String, RouteDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BuildSection {
  pub working_dir: Option<String>,
  pub routes_dir: Option<String>,
  pub output_dir: Option<String>,
  pub output_url: Option<String>,
  #[serde(default)]
  pub minify: bool,
  #[serde(default)]
  pub stats: bool,
  #[serde(default)]
  pub long_term_caching: bool,
  pub bundler_command: Option<String>,
  /// `.json` to deep-merge, anything else is a JS transform module.
  pub bundler_config: Option<String>,
  #[serde(default)]
  pub middleware: Vec<String>,
  pub runtime_module: Option<String>,
  pub js_middleware: Option<String>,
  pub css_middleware: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingSection {
  pub level: Option<String>,
  pub timing_level: Option<String>,
  pub gauge_level: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HotSection {
  pub client_modules: Option<Vec<String>>,
  pub trigger_file: Option<String>,
}

/// Absolute form of a config directory, so paths derived from it stay valid
/// when a child process runs with a different working directory.
pub fn absolute_dir(dir: &Path) -> Result<PathBuf> {
  std::path::absolute(dir).with_context(|| format!("failed to resolve {}", dir.display()))
}

impl RoutepackConfig {
  pub fn bundler_command(&self) -> Result<&str> {
    self
      .build
      .bundler_command
      .as_deref()
      .context("build.bundler_command is required in routepack.toml")
  }

  /// Config paths are relative to `base_dir` (the directory holding routepack.toml).
  pub fn to_compile_options(&self, base_dir: &Path, hot: bool) -> Result<CompileOptions> {
    let base_dir = &absolute_dir(base_dir)?;
    let mut options = CompileOptions::new(normalize_routes(&self.routes)?);
    let build = &self.build;

    options.working_dir = base_dir.join(build.working_dir.as_deref().unwrap_or(DEFAULT_WORKING_DIR));
    options.routes_dir = base_dir.join(build.routes_dir.as_deref().unwrap_or("."));
    options.output_dir = build.output_dir.as_ref().map(|dir| base_dir.join(dir));
    if let Some(url) = &build.output_url {
      options.output_url.clone_from(url);
    }
    options.bundler_config =
      build.bundler_config.as_ref().map(|p| ConfigOverride::File(base_dir.join(p)));

    options.hot = hot;
    options.minify = build.minify;
    options.stats = build.stats;
    options.long_term_caching = build.long_term_caching;
    options.middleware.clone_from(&build.middleware);

    options.log_level.clone_from(&self.logging.level);
    options.timing_log_level.clone_from(&self.logging.timing_level);
    options.gauge_log_level.clone_from(&self.logging.gauge_level);

    if let Some(modules) = &self.hot.client_modules {
      options.hot_client_modules.clone_from(modules);
    }
    if let Some(m) = &build.runtime_module {
      options.runtime_module.clone_from(m);
    }
    if let Some(m) = &build.js_middleware {
      options.js_middleware_module.clone_from(m);
    }
    if let Some(m) = &build.css_middleware {
      options.css_middleware_module.clone_from(m);
    }

    Ok(options)
  }

  /// Reload trigger path; defaults to `<output_dir>/.reload-trigger`.
  pub fn trigger_file(&self, base_dir: &Path, output_dir: &Path) -> PathBuf {
    match &self.hot.trigger_file {
      Some(path) => base_dir.join(path),
      None => output_dir.join(TRIGGER_FILE),
    }
  }
}
