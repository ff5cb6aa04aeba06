/* src/cli/core/src/shell.rs */

// Process helpers shared by the bundler backend and the config override runner.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use anyhow::{Context, Result, bail};

use crate::ui;

fn failure_message(label: &str, output: &Output) -> String {
  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  let mut msg = format!("{label} exited with status {}", output.status);
  if !stderr.is_empty() {
    msg.push('\n');
    msg.push_str(&stderr);
  }
  if !stdout.is_empty() {
    msg.push('\n');
    msg.push_str(&stdout);
  }
  msg
}

/// Run a shell command, bail on failure (shows both stdout and stderr on error).
pub(crate) fn run_command(
  base_dir: &Path,
  command: &str,
  label: &str,
  env: &[(&str, &str)],
) -> Result<()> {
  ui::detail(&ui::dim(command));
  let mut cmd = Command::new("sh");
  cmd.args(["-c", command]);
  cmd.current_dir(base_dir);
  for (k, v) in env {
    cmd.env(k, v);
  }
  let output = cmd.output().with_context(|| format!("failed to run {label}"))?;
  if !output.status.success() {
    bail!("{}", failure_message(label, &output));
  }
  Ok(())
}

/// Run a program with `input` on stdin and return its stdout.
pub(crate) fn run_with_stdin(
  base_dir: &Path,
  program: &str,
  args: &[&str],
  input: &str,
  label: &str,
) -> Result<String> {
  let mut child = Command::new(program)
    .args(args)
    .current_dir(base_dir)
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .with_context(|| format!("failed to start {label}"))?;

  if let Some(mut stdin) = child.stdin.take() {
    stdin.write_all(input.as_bytes()).with_context(|| format!("failed to write to {label}"))?;
  }

  let output = child.wait_with_output().with_context(|| format!("failed to run {label}"))?;
  if !output.status.success() {
    bail!("{}", failure_message(label, &output));
  }
  String::from_utf8(output.stdout).with_context(|| format!("invalid UTF-8 from {label}"))
}

/// Pick the JS runtime: bun when available, node otherwise.
pub(crate) fn js_runtime() -> &'static str {
  if which_exists("bun") { "bun" } else { "node" }
}

/// Resolve a path inside node_modules by walking up parent directories.
/// Mirrors Node.js module resolution: checks `<dir>/node_modules/<suffix>` at each level.
pub(crate) fn resolve_node_module(start: &Path, suffix: &str) -> Option<PathBuf> {
  let mut dir = start.to_path_buf();
  loop {
    let candidate = dir.join("node_modules").join(suffix);
    if candidate.exists() {
      return Some(candidate);
    }
    if !dir.pop() {
      return None;
    }
  }
}

/// Check if a command exists on PATH.
pub(crate) fn which_exists(cmd: &str) -> bool {
  Command::new("which")
    .arg(cmd)
    .stdout(Stdio::null())
    .stderr(Stdio::null())
    .status()
    .map(|s| s.success())
    .unwrap_or(false)
}
