/* src/cli/core/src/build/bundler_config.rs */

// Bundler configuration: built-in base factory plus caller overrides.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use routepack_codegen::string_literal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entrypoints::EntrypointSet;
use super::resolve::path_str;
use crate::shell::{js_runtime, run_with_stdin};
use crate::ui;

pub const CHUNK_MANIFEST_FILE: &str = "chunk-manifest.json";

pub type ConfigTransform = dyn Fn(BundlerConfig) -> Result<BundlerConfig> + Send + Sync;

/// Caller-supplied adjustment of the base bundler configuration.
#[derive(Clone)]
pub enum ConfigOverride {
  /// `.json` files are deep-merged; anything else is a JS module exporting `(config) => config`.
  File(PathBuf),
  Transform(Arc<ConfigTransform>),
}

impl fmt::Debug for ConfigOverride {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::File(path) => f.debug_tuple("File").field(path).finish(),
      Self::Transform(_) => f.write_str("Transform(..)"),
    }
  }
}

impl ConfigOverride {
  pub fn transform(
    f: impl Fn(BundlerConfig) -> Result<BundlerConfig> + Send + Sync + 'static,
  ) -> Self {
    Self::Transform(Arc::new(f))
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputConfig {
  pub path: String,
  pub public_path: String,
  pub filename: String,
  pub chunk_filename: String,
  pub css_filename: String,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Serialized and handed to the bundler backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
  /// `web` or `node`.
  pub target: String,
  /// `production` or `development`.
  pub mode: String,
  pub entry: EntrypointSet,
  pub output: OutputConfig,
  pub hot: bool,
  pub minify: bool,
  pub long_term_caching: bool,
  pub stats: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub chunk_manifest: Option<String>,
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

/// Options that shape the base configuration.
#[derive(Debug, Clone, Copy)]
pub struct AffectingOptions<'a> {
  pub is_server: bool,
  pub output_dir: &'a Path,
  pub entrypoints: &'a EntrypointSet,
  pub output_url: &'a str,
  pub hot: bool,
  pub minify: bool,
  pub long_term_caching: bool,
  pub stats: bool,
}

pub fn base_config(opts: &AffectingOptions<'_>) -> Result<BundlerConfig> {
  let (filename, chunk_filename, css_filename) = if opts.long_term_caching {
    ("[name].[chunkhash].bundle.js", "[id].[chunkhash].bundle.js", "[name].[contenthash].css")
  } else {
    ("[name].bundle.js", "[id].bundle.js", "[name].css")
  };

  Ok(BundlerConfig {
    target: if opts.is_server { "node" } else { "web" }.to_string(),
    mode: if opts.minify { "production" } else { "development" }.to_string(),
    entry: opts.entrypoints.clone(),
    output: OutputConfig {
      path: path_str(opts.output_dir)?.to_string(),
      public_path: opts.output_url.to_string(),
      filename: filename.to_string(),
      chunk_filename: chunk_filename.to_string(),
      css_filename: css_filename.to_string(),
      extra: Map::new(),
    },
    hot: opts.hot,
    minify: opts.minify,
    long_term_caching: opts.long_term_caching,
    stats: opts.stats,
    chunk_manifest: opts.long_term_caching.then(|| CHUNK_MANIFEST_FILE.to_string()),
    extra: Map::new(),
  })
}

/// Objects merge recursively; any other overlay value replaces.
fn deep_merge(base: &mut Value, overlay: Value) {
  match (base, overlay) {
    (Value::Object(base), Value::Object(overlay)) => {
      for (key, value) in overlay {
        match base.get_mut(&key) {
          Some(slot) => deep_merge(slot, value),
          None => {
            base.insert(key, value);
          }
        }
      }
    }
    (slot, value) => *slot = value,
  }
}

fn merge_json_file(base: BundlerConfig, path: &Path) -> Result<BundlerConfig> {
  let content = std::fs::read_to_string(path)
    .with_context(|| format!("failed to read {}", path.display()))?;
  let overlay: Value = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse {}", path.display()))?;
  let mut merged = serde_json::to_value(base)?;
  deep_merge(&mut merged, overlay);
  serde_json::from_value(merged)
    .with_context(|| format!("{} produced an invalid bundler config", path.display()))
}

fn transform_script(module: &Path) -> Result<String> {
  let module = string_literal(path_str(module)?);
  Ok(format!(
    r#"const {{ pathToFileURL }} = require("url");
const input = JSON.parse(require("fs").readFileSync(0, "utf8"));
(async () => {{
  const mod = await import(pathToFileURL({module}).href);
  let transform = mod.default ?? mod;
  if (transform && transform.__esModule) transform = transform.default;
  if (typeof transform !== "function") throw new Error("config override must export a function");
  process.stdout.write(JSON.stringify(await transform(input)));
}})().catch((e) => {{
  console.error(e && e.stack ? e.stack : e);
  process.exit(1);
}});
"#
  ))
}

fn run_js_override(base: BundlerConfig, path: &Path, base_dir: &Path) -> Result<BundlerConfig> {
  let runtime = js_runtime();
  ui::detail(&format!("applying {} with {runtime}", path.display()));
  let script = transform_script(path)?;
  let input = serde_json::to_string(&base)?;
  let stdout = run_with_stdin(base_dir, runtime, &["-e", &script], &input, "config override")?;
  serde_json::from_str(&stdout)
    .with_context(|| format!("{} returned an invalid bundler config", path.display()))
}

/// Build the configuration for one bundler run.
/// Relative override paths resolve against `base_dir`.
pub fn build_bundler_config(
  config_override: Option<&ConfigOverride>,
  opts: &AffectingOptions<'_>,
  base_dir: &Path,
) -> Result<BundlerConfig> {
  let base = base_config(opts)?;
  match config_override {
    None => Ok(base),
    Some(ConfigOverride::Transform(f)) => f(base),
    Some(ConfigOverride::File(path)) => {
      let path = base_dir.join(path);
      if path.extension().is_some_and(|ext| ext == "json") {
        merge_json_file(base, &path)
      } else {
        run_js_override(base, &path, base_dir)
      }
    }
  }
}
