/* src/cli/core/src/build/emit.rs */

// Generated files in the working directory: bootstrap and routes modules.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use routepack_codegen::{
  BootstrapModule, Manifest, RouteTable, RoutesModule, RoutesTarget, generate_bootstrap,
  generate_routes_module,
};

use super::options::{CompileOptions, Layout};
use super::resolve::{relative_specifier, resolve_module};
use crate::ui;

pub const BOOTSTRAP_FILE: &str = "entry.js";

fn write_generated(path: &Path, content: &str) -> Result<()> {
  std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))?;
  let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
  ui::sized(&name, content.len() as u64);
  Ok(())
}

/// Write `<working_dir>/entry.js`, importing the client routes module.
pub fn write_bootstrap(options: &CompileOptions, layout: &Layout) -> Result<PathBuf> {
  let routes_module = format!("./{}", RoutesTarget::Client.module_name());
  let code = generate_bootstrap(&BootstrapModule {
    runtime_module: &options.runtime_module,
    routes_module: &routes_module,
    log_level: options.log_level.as_deref(),
    timing_log_level: options.timing_log_level.as_deref(),
    gauge_log_level: options.gauge_log_level.as_deref(),
  });
  let path = layout.working_dir.join(BOOTSTRAP_FILE);
  write_generated(&path, &code)?;
  Ok(path)
}

fn working_specifier(layout: &Layout, specifier: &str) -> Result<String> {
  let resolved = resolve_module(&layout.routes_dir, specifier)?;
  relative_specifier(&layout.working_dir, &resolved)
}

/// Route table with every page rewritten relative to the working directory.
fn relocate_routes(routes: &RouteTable, layout: &Layout) -> Result<RouteTable> {
  let mut relocated = routes.clone();
  for route in relocated.values_mut() {
    for page in route.formats.values_mut() {
      *page = working_specifier(layout, page)?;
    }
  }
  Ok(relocated)
}

/// Write `routes_client.js` or `routes_server.js` and return its absolute path.
pub fn synthesize_routes(
  options: &CompileOptions,
  layout: &Layout,
  static_url: Option<&str>,
  target: RoutesTarget,
  manifest: Option<&Manifest>,
) -> Result<PathBuf> {
  let routes = relocate_routes(&options.routes, layout)?;
  let middleware = options
    .middleware
    .iter()
    .map(|m| working_specifier(layout, m))
    .collect::<Result<Vec<_>>>()?;

  let code = generate_routes_module(&RoutesModule {
    target,
    manifest,
    static_url,
    js_middleware: &options.js_middleware_module,
    css_middleware: &options.css_middleware_module,
    middleware: &middleware,
    routes: &routes,
  })?;

  let path = layout.working_dir.join(target.file_name());
  write_generated(&path, &code)?;
  Ok(path)
}

#[cfg(test)]
mod tests {
  use indexmap::IndexMap;
  use routepack_codegen::{Method, Route};

  use super::*;

  fn setup() -> (tempfile::TempDir, CompileOptions, Layout) {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("pages")).unwrap();
    std::fs::write(tmp.path().join("pages/home.js"), "").unwrap();
    std::fs::write(tmp.path().join("auth.js"), "").unwrap();

    let mut formats = IndexMap::new();
    formats.insert("default".to_string(), "pages/home.js".to_string());
    let mut routes = RouteTable::new();
    routes.insert("Home".into(), Route { path: "/".into(), method: Method::Any, formats });

    let mut options = CompileOptions::new(routes);
    options.working_dir = tmp.path().join("__clientTemp");
    options.routes_dir = tmp.path().to_path_buf();
    options.middleware = vec!["./auth".into()];
    options.log_level = Some("debug".into());
    let layout = Layout::prepare(&options).unwrap();
    (tmp, options, layout)
  }

  #[test]
  fn bootstrap_written() {
    let (_tmp, options, layout) = setup();
    let path = write_bootstrap(&options, &layout).unwrap();
    assert_eq!(path, layout.working_dir.join("entry.js"));
    let code = std::fs::read_to_string(path).unwrap();
    assert!(code.contains("import routes from \"./routes_client\";"));
    assert!(code.contains("setLevel(\"main\", \"debug\")"));
  }

  #[test]
  fn routes_relative_to_working_dir() {
    let (_tmp, options, layout) = setup();
    let path =
      synthesize_routes(&options, &layout, None, RoutesTarget::Client, None).unwrap();
    assert_eq!(path, layout.working_dir.join("routes_client.js"));
    let code = std::fs::read_to_string(path).unwrap();
    assert!(code.contains("const manifest = undefined;"));
    assert!(code.contains("require.ensure([\"../pages/home.js\"]"));
    assert!(code.contains("unwrapEs6Module(require(\"../auth.js\")),"));
    assert!(code.contains(
      "unwrapEs6Module(require(\"react-server-cli/target/coreJsMiddleware\"))(null, manifest),"
    ));
  }

  #[test]
  fn server_routes_idempotent() {
    let (_tmp, options, layout) = setup();
    let manifest = Manifest { hash: "abc".into(), ..Default::default() };
    let path = synthesize_routes(
      &options,
      &layout,
      Some("/static/"),
      RoutesTarget::Server,
      Some(&manifest),
    )
    .unwrap();
    let first = std::fs::read(&path).unwrap();
    synthesize_routes(&options, &layout, Some("/static/"), RoutesTarget::Server, Some(&manifest))
      .unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), first);
    let code = String::from_utf8(first).unwrap();
    assert!(code.contains("cb(unwrapEs6Module(require(\"../pages/home.js\")));"));
    assert!(code.contains("\"hash\":\"abc\""));
  }

  #[test]
  fn missing_middleware_fails() {
    let (_tmp, mut options, layout) = setup();
    options.middleware.push("./missing".into());
    assert!(synthesize_routes(&options, &layout, None, RoutesTarget::Client, None).is_err());
  }
}
