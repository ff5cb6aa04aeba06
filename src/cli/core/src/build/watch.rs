/* src/cli/core/src/build/watch.rs */

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::signal;

use super::compiler::Compiler;
use crate::ui::{self, WatchStatus};

const DEBOUNCE: Duration = Duration::from_millis(300);

/// True when at least one changed path lies outside every ignored path.
pub(crate) fn is_relevant(event: &notify::Event, ignore: &[PathBuf]) -> bool {
  if matches!(event.kind, EventKind::Access(_)) {
    return false;
  }
  event.paths.iter().any(|p| !ignore.iter().any(|dir| p.starts_with(dir)))
}

fn setup_watcher(
  ignore: Vec<PathBuf>,
) -> Result<(RecommendedWatcher, tokio::sync::mpsc::Receiver<()>)> {
  let (tx, rx) = tokio::sync::mpsc::channel(16);
  let watcher = RecommendedWatcher::new(
    move |res: std::result::Result<notify::Event, notify::Error>| {
      if let Ok(event) = res
        && is_relevant(&event, &ignore)
      {
        let _ = tx.blocking_send(());
      }
    },
    notify::Config::default(),
  )?;
  Ok((watcher, rx))
}

/// Run one build off the async runtime and hand the compiler back.
async fn build_once(mut compiler: Compiler) -> Result<Compiler> {
  let started = Instant::now();
  let (compiler, outcome) = tokio::task::spawn_blocking(move || {
    let outcome = compiler.run();
    (compiler, outcome)
  })
  .await
  .context("build task panicked")?;

  ui::watch_status(match outcome {
    Ok(_) => WatchStatus::Built(started.elapsed()),
    Err(_) => WatchStatus::Failed,
  });
  Ok(compiler)
}

/// Files that do not exist yet (the reload trigger) keep their name under a
/// canonical parent so they still match event paths.
fn canonical_or_self(path: &Path) -> PathBuf {
  if let Ok(canonical) = path.canonicalize() {
    return canonical;
  }
  match (path.parent().and_then(|p| p.canonicalize().ok()), path.file_name()) {
    (Some(parent), Some(name)) => parent.join(name),
    _ => path.to_path_buf(),
  }
}

impl Compiler {
  /// Build, then rebuild on every change under `dirs` until Ctrl-C.
  /// Changes under `ignore` (generated directories, the reload trigger) never trigger a rebuild.
  pub async fn watch(self, dirs: &[PathBuf], ignore: &[PathBuf]) -> Result<()> {
    let ignore: Vec<PathBuf> = ignore.iter().map(|p| canonical_or_self(p)).collect();
    let (mut watcher, mut rx) = setup_watcher(ignore)?;
    for dir in dirs {
      watcher
        .watch(dir, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", dir.display()))?;
      ui::detail(&ui::dim(format_args!("watching {}", dir.display())));
    }

    let mut compiler = build_once(self).await?;

    loop {
      tokio::select! {
        _ = signal::ctrl_c() => {
          ui::watch_status(WatchStatus::Stopping);
          break;
        }
        Some(()) = rx.recv() => {
          tokio::time::sleep(DEBOUNCE).await;
          while rx.try_recv().is_ok() {}
          ui::watch_status(WatchStatus::Rebuilding);
          compiler = build_once(compiler).await?;
        }
      }
    }

    Ok(())
  }
}
