/* src/cli/core/src/build/compile.rs */

// Compile orchestration: generated files, entrypoints and bundler config up
// front; manifest and server routes module after every completed build.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context as TaskContext, Poll};

use anyhow::{Context, Result, anyhow};
use routepack_codegen::{CompilationResult, RoutesTarget, extract_manifest};
use tokio::sync::oneshot;

use super::bundler_config::{AffectingOptions, CHUNK_MANIFEST_FILE, build_bundler_config};
use super::compiler::{Bundler, Compiler};
use super::emit::{synthesize_routes, write_bootstrap};
use super::entrypoints::derive_entrypoints;
use super::hot::HotReload;
use super::options::{CompileOptions, Layout};
use crate::ui;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Resolves with the absolute path of `routes_server.js` once the first
/// build completes, or with the error that stopped it.
#[derive(Debug)]
pub struct ServerRoutes {
  rx: oneshot::Receiver<Result<PathBuf>>,
}

impl Future for ServerRoutes {
  type Output = Result<PathBuf>;

  fn poll(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Self::Output> {
    Pin::new(&mut self.rx).poll(cx).map(|received| {
      received.unwrap_or_else(|_| Err(anyhow!("compiler dropped before the first build completed")))
    })
  }
}

pub struct CompileHandle {
  /// Not yet started: call `run` once or `watch`.
  pub compiler: Compiler,
  pub server_routes: ServerRoutes,
  pub layout: Layout,
}

/// Steps run after a successful build. Returns the server routes module path.
fn on_compiled(
  options: &CompileOptions,
  layout: &Layout,
  result: &CompilationResult,
  hot_reload: Option<&dyn HotReload>,
) -> Result<PathBuf> {
  let extraction = extract_manifest(result);
  for warning in &extraction.warnings {
    ui::warn(warning);
  }
  let manifest = extraction.manifest;

  let manifest_path = layout.output_dir.join(MANIFEST_FILE);
  let json = serde_json::to_string_pretty(&manifest)?;
  std::fs::write(&manifest_path, json)
    .with_context(|| format!("failed to write {}", manifest_path.display()))?;
  ui::detail_ok(MANIFEST_FILE);

  if !options.hot {
    let chunk_manifest = layout.output_dir.join(CHUNK_MANIFEST_FILE);
    if chunk_manifest.exists() {
      std::fs::remove_file(&chunk_manifest)
        .with_context(|| format!("failed to remove {}", chunk_manifest.display()))?;
    }
  }

  let server_routes = synthesize_routes(
    options,
    layout,
    Some(&options.output_url),
    RoutesTarget::Server,
    Some(&manifest),
  )?;

  if options.hot
    && let Some(hot) = hot_reload
    && let Err(e) = hot.notify(result)
  {
    ui::warn(&format!("hot reload notification failed: {e:#}"));
  }

  Ok(server_routes)
}

/// Prepare a compile. Nothing is bundled until the returned compiler runs.
/// Relative override paths in `options.bundler_config` resolve against the routes directory.
pub fn compile(
  options: CompileOptions,
  bundler: Box<dyn Bundler>,
  hot_reload: Option<Arc<dyn HotReload>>,
) -> Result<CompileHandle> {
  options.validate()?;
  Layout::resolve(&options)?;

  ui::step(1, 4, "preparing working directory");
  let layout = Layout::prepare(&options)?;
  ui::detail(&ui::dim(layout.working_dir.display()));

  ui::step(2, 4, "generating client modules");
  let bootstrap = write_bootstrap(&options, &layout)?;
  let hot_modules = options.hot.then_some(options.hot_client_modules.as_slice());
  let entrypoints = derive_entrypoints(&options.routes, &layout.routes_dir, &bootstrap, hot_modules)?;
  synthesize_routes(&options, &layout, None, RoutesTarget::Client, None)?;

  ui::step(3, 4, "building bundler configuration");
  let config = build_bundler_config(
    options.bundler_config.as_ref(),
    &AffectingOptions {
      is_server: false,
      output_dir: &layout.output_dir,
      entrypoints: &entrypoints,
      output_url: &options.output_url,
      hot: options.hot,
      minify: options.minify,
      long_term_caching: options.long_term_caching,
      stats: options.stats,
    },
    &layout.routes_dir,
  )?;
  ui::detail(&format!("{} entrypoint(s)", entrypoints.len()));

  ui::step(4, 4, "registering completion handler");
  let (tx, rx) = oneshot::channel();
  let mut tx = Some(tx);
  let mut compiler = Compiler::new(config, bundler);
  let hook_layout = layout.clone();
  compiler.on_done(move |outcome| {
    let result = outcome
      .map_err(|e| anyhow!("{e:#}"))
      .and_then(|r| on_compiled(&options, &hook_layout, r, hot_reload.as_deref()));
    if let Err(e) = &result {
      ui::fail(&format!("build failed: {e:#}"));
    }
    if let Some(tx) = tx.take() {
      let _ = tx.send(result);
    }
  });

  Ok(CompileHandle { compiler, server_routes: ServerRoutes { rx }, layout })
}
