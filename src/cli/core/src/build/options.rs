/* src/cli/core/src/build/options.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use routepack_codegen::RouteTable;

use super::bundler_config::ConfigOverride;

pub const DEFAULT_WORKING_DIR: &str = "__clientTemp";
pub const DEFAULT_OUTPUT_URL: &str = "/static/";
pub const DEFAULT_RUNTIME_MODULE: &str = "react-server";
pub const DEFAULT_JS_MIDDLEWARE: &str = "react-server-cli/target/coreJsMiddleware";
pub const DEFAULT_CSS_MIDDLEWARE: &str = "react-server-cli/target/coreCssMiddleware";

/// Transport client modules prepended to every entrypoint in hot mode.
pub fn default_hot_client_modules() -> Vec<String> {
  vec![
    "webpack-hot-middleware/client?path=/__react_server_hmr__&timeout=20000&reload=true".to_string(),
    "webpack/hot/only-dev-server".to_string(),
  ]
}

/// Everything a compile needs. No ambient state: every knob lives here.
#[derive(Debug, Clone)]
pub struct CompileOptions {
  pub routes: RouteTable,
  pub bundler_config: Option<ConfigOverride>,
  pub working_dir: PathBuf,
  pub routes_dir: PathBuf,
  /// Defaults to `<working_dir>/build`.
  pub output_dir: Option<PathBuf>,
  pub output_url: String,
  pub hot: bool,
  pub minify: bool,
  pub stats: bool,
  pub long_term_caching: bool,
  pub log_level: Option<String>,
  pub timing_log_level: Option<String>,
  pub gauge_log_level: Option<String>,
  /// Caller middleware modules, relative to `routes_dir`.
  pub middleware: Vec<String>,
  pub hot_client_modules: Vec<String>,
  pub runtime_module: String,
  pub js_middleware_module: String,
  pub css_middleware_module: String,
}

impl CompileOptions {
  pub fn new(routes: RouteTable) -> Self {
    Self {
      routes,
      bundler_config: None,
      working_dir: PathBuf::from(DEFAULT_WORKING_DIR),
      routes_dir: PathBuf::from("."),
      output_dir: None,
      output_url: DEFAULT_OUTPUT_URL.to_string(),
      hot: true,
      minify: false,
      stats: false,
      long_term_caching: false,
      log_level: None,
      timing_log_level: None,
      gauge_log_level: None,
      middleware: Vec::new(),
      hot_client_modules: default_hot_client_modules(),
      runtime_module: DEFAULT_RUNTIME_MODULE.to_string(),
      js_middleware_module: DEFAULT_JS_MIDDLEWARE.to_string(),
      css_middleware_module: DEFAULT_CSS_MIDDLEWARE.to_string(),
    }
  }

  pub fn output_dir(&self) -> PathBuf {
    self.output_dir.clone().unwrap_or_else(|| self.working_dir.join("build"))
  }

  /// Checks that must pass before anything touches the filesystem.
  pub fn validate(&self) -> Result<()> {
    if self.hot && self.long_term_caching {
      bail!(
        "long_term_caching and hot are mutually exclusive -- content hashes are unstable under hot reload"
      );
    }
    if self.routes.is_empty() {
      bail!("route table is empty");
    }
    Ok(())
  }
}

/// Absolute directories a compile works in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  pub working_dir: PathBuf,
  pub routes_dir: PathBuf,
  pub output_dir: PathBuf,
}

fn canonical(path: &Path) -> Result<PathBuf> {
  path.canonicalize().with_context(|| format!("failed to canonicalize {}", path.display()))
}

fn absolute(path: &Path) -> Result<PathBuf> {
  std::path::absolute(path).with_context(|| format!("failed to resolve {}", path.display()))
}

impl Layout {
  /// Resolve directories without creating anything.
  pub fn resolve(options: &CompileOptions) -> Result<Self> {
    Ok(Self {
      working_dir: absolute(&options.working_dir)?,
      routes_dir: canonical(&options.routes_dir)?,
      output_dir: absolute(&options.output_dir())?,
    })
  }

  /// Create the working and output directories (idempotent) and resolve all three.
  pub fn prepare(options: &CompileOptions) -> Result<Self> {
    let output_dir = options.output_dir();
    for dir in [&options.working_dir, &output_dir] {
      std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    Ok(Self {
      working_dir: canonical(&options.working_dir)?,
      routes_dir: canonical(&options.routes_dir)?,
      output_dir: canonical(&output_dir)?,
    })
  }
}
