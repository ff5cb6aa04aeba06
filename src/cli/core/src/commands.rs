/* src/cli/core/src/commands.rs */

// `routepack build`, `routepack dev` and `routepack entries`.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use routepack_codegen::Manifest;

use crate::build::emit::BOOTSTRAP_FILE;
use crate::build::{
  CommandBundler, HotReload, Layout, MANIFEST_FILE, TriggerFileHotReload, compile,
  derive_entrypoints,
};
use crate::config::{RoutepackConfig, absolute_dir};
use crate::ui;

/// Print every named chunk with its size on disk.
fn print_manifest_summary(output_dir: &Path) -> Result<()> {
  let path = output_dir.join(MANIFEST_FILE);
  let content =
    std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
  let manifest: Manifest = serde_json::from_str(&content)
    .with_context(|| format!("failed to parse {}", path.display()))?;

  for (name, file) in &manifest.js_chunks_by_name {
    let size = std::fs::metadata(output_dir.join(file)).map(|m| m.len()).unwrap_or(0);
    ui::sized(&format!("{name}  {file}"), size);
    if let Some(css) = manifest.css_chunks_by_name.get(name) {
      ui::detail(&ui::dim(format_args!("+ {css}")));
    }
  }
  ui::detail(&ui::dim(format_args!("hash {}", manifest.hash)));
  Ok(())
}

/// Compile once with hot reload off.
pub async fn run_build(config: &RoutepackConfig, base_dir: &Path) -> Result<()> {
  let started = Instant::now();
  ui::banner("build");
  let base_dir = &absolute_dir(base_dir)?;

  let options = config.to_compile_options(base_dir, false)?;
  let bundler = CommandBundler::new(config.bundler_command()?, base_dir, &options.working_dir);
  let handle = compile(options, Box::new(bundler), None)?;

  let mut compiler = handle.compiler;
  tokio::task::spawn_blocking(move || compiler.run())
    .await
    .context("build task panicked")??;
  let server_routes = handle.server_routes.await?;

  ui::blank();
  print_manifest_summary(&handle.layout.output_dir)?;
  ui::blank();
  ui::ok(&format!("server routes  {}", server_routes.display()));
  ui::ok(&format!("build complete ({:.1}s)", started.elapsed().as_secs_f64()));
  Ok(())
}

/// Compile with hot reload on and rebuild on every change until Ctrl-C.
pub async fn run_dev(config: &RoutepackConfig, base_dir: &Path) -> Result<()> {
  ui::banner("dev");
  let base_dir = &absolute_dir(base_dir)?;

  let options = config.to_compile_options(base_dir, true)?;
  let trigger = config.trigger_file(base_dir, &options.output_dir());
  let bundler = CommandBundler::new(config.bundler_command()?, base_dir, &options.working_dir);
  let hot_reload: Arc<dyn HotReload> = Arc::new(TriggerFileHotReload::new(trigger.clone()));
  let handle = compile(options, Box::new(bundler), Some(hot_reload))?;

  let server_routes = handle.server_routes;
  tokio::spawn(async move {
    if let Ok(path) = server_routes.await {
      ui::ok(&format!("server routes  {}", path.display()));
    }
  });

  let layout = handle.layout;
  ui::blank();
  handle.compiler.watch(&[layout.routes_dir.clone()], &watch_ignores(&layout, &trigger)).await
}

/// Paths routepack writes itself; a change there must not start another build.
fn watch_ignores(layout: &Layout, trigger: &Path) -> Vec<PathBuf> {
  vec![layout.working_dir.clone(), layout.output_dir.clone(), trigger.to_path_buf()]
}

/// Print derived entrypoints without writing or bundling anything.
pub fn run_entries(config: &RoutepackConfig, base_dir: &Path, hot: bool) -> Result<()> {
  let base_dir = &absolute_dir(base_dir)?;
  let options = config.to_compile_options(base_dir, hot)?;
  options.validate()?;
  let layout = Layout::resolve(&options)?;
  let bootstrap = layout.working_dir.join(BOOTSTRAP_FILE);
  let hot_modules = hot.then_some(options.hot_client_modules.as_slice());
  let entries = derive_entrypoints(&options.routes, &layout.routes_dir, &bootstrap, hot_modules)?;

  for (name, modules) in &entries {
    ui::arrow(name);
    for module in modules {
      ui::detail(module);
    }
  }
  ui::blank();
  ui::ok(&format!("{} entrypoint(s)", entries.len()));
  Ok(())
}
