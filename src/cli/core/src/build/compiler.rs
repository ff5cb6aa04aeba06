/* src/cli/core/src/build/compiler.rs */

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};
use routepack_codegen::{CompilationResult, parse_compilation};

use super::bundler_config::BundlerConfig;
use super::resolve::path_str;
use crate::shell::run_command;

pub const BUNDLER_CONFIG_FILE: &str = "bundler.config.json";
pub const STATS_FILE: &str = "compilation.json";

/// Runs one build for a given configuration.
pub trait Bundler: Send {
  fn build(&mut self, config: &BundlerConfig) -> Result<CompilationResult>;
}

/// Invoked after every build, successful or not.
pub type DoneHook = Box<dyn FnMut(Result<&CompilationResult, &anyhow::Error>) + Send>;

/// A configured bundler plus its completion hooks.
pub struct Compiler {
  config: BundlerConfig,
  bundler: Box<dyn Bundler>,
  hooks: Vec<DoneHook>,
}

impl Compiler {
  pub fn new(config: BundlerConfig, bundler: Box<dyn Bundler>) -> Self {
    Self { config, bundler, hooks: Vec::new() }
  }

  pub fn config(&self) -> &BundlerConfig {
    &self.config
  }

  pub fn on_done(
    &mut self,
    hook: impl FnMut(Result<&CompilationResult, &anyhow::Error>) + Send + 'static,
  ) {
    self.hooks.push(Box::new(hook));
  }

  /// Build once and fire the completion hooks.
  /// Bundler-reported errors turn the build into a failure.
  pub fn run(&mut self) -> Result<CompilationResult> {
    let outcome = self.bundler.build(&self.config).and_then(|result| {
      if result.has_errors() {
        let errors: Vec<String> = result.errors.iter().map(error_text).collect();
        bail!("bundler reported {} error(s):\n{}", errors.len(), errors.join("\n"));
      }
      Ok(result)
    });
    for hook in &mut self.hooks {
      hook(outcome.as_ref());
    }
    outcome
  }
}

fn error_text(value: &serde_json::Value) -> String {
  match value {
    serde_json::Value::String(s) => s.clone(),
    serde_json::Value::Object(obj) => obj
      .get("message")
      .and_then(|m| m.as_str())
      .map_or_else(|| value.to_string(), str::to_string),
    other => other.to_string(),
  }
}

/// Bundler backend driven by a shell command.
///
/// The command runs in `base_dir` with `ROUTEPACK_BUNDLER_CONFIG` pointing at the
/// serialized configuration and must write its compilation result to
/// `ROUTEPACK_STATS_FILE`.
#[derive(Debug, Clone)]
pub struct CommandBundler {
  command: String,
  base_dir: PathBuf,
  config_file: PathBuf,
  stats_file: PathBuf,
}

impl CommandBundler {
  pub fn new(command: impl Into<String>, base_dir: &Path, working_dir: &Path) -> Self {
    Self {
      command: command.into(),
      base_dir: base_dir.to_path_buf(),
      config_file: working_dir.join(BUNDLER_CONFIG_FILE),
      stats_file: working_dir.join(STATS_FILE),
    }
  }
}

fn spinner(message: &str) -> ProgressBar {
  let pb = ProgressBar::new_spinner();
  pb.set_style(
    ProgressStyle::default_spinner()
      .template("    {spinner:.cyan} {msg} {elapsed:.dim}")
      .unwrap_or_else(|_| ProgressStyle::default_spinner()),
  );
  pb.set_message(message.to_string());
  pb.enable_steady_tick(Duration::from_millis(80));
  pb
}

impl Bundler for CommandBundler {
  fn build(&mut self, config: &BundlerConfig) -> Result<CompilationResult> {
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&self.config_file, json)
      .with_context(|| format!("failed to write {}", self.config_file.display()))?;
    if self.stats_file.exists() {
      std::fs::remove_file(&self.stats_file)
        .with_context(|| format!("failed to remove {}", self.stats_file.display()))?;
    }

    let env = [
      ("ROUTEPACK_BUNDLER_CONFIG", path_str(&self.config_file)?),
      ("ROUTEPACK_STATS_FILE", path_str(&self.stats_file)?),
    ];
    let pb = spinner(&format!("bundling {} target", config.target));
    let status = run_command(&self.base_dir, &self.command, "bundler", &env);
    pb.finish_and_clear();
    status?;

    let content = std::fs::read_to_string(&self.stats_file).with_context(|| {
      format!("bundler did not write its compilation result to {}", self.stats_file.display())
    })?;
    parse_compilation(&content)
  }
}
