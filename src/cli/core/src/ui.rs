/* src/cli/core/src/ui.rs */

// Terminal output helpers. All pipeline logging goes through here.

use std::fmt::Display;
use std::time::Duration;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn banner(cmd: &str) {
  println!();
  println!("  {BOLD}routepack{RESET} {cmd} {DIM}v{VERSION}{RESET}");
  println!();
}

pub fn step(n: u32, total: u32, msg: &str) {
  println!("  {BOLD}[{n}/{total}]{RESET} {msg}...");
}

pub fn ok(msg: &str) {
  println!("  {GREEN}\u{2713}{RESET} {msg}");
}

pub fn fail(msg: &str) {
  eprintln!("  {RED}\u{2717}{RESET} {msg}");
}

pub fn warn(msg: &str) {
  eprintln!("  {YELLOW}warning{RESET}: {msg}");
}

pub fn arrow(msg: &str) {
  println!("  {GREEN}\u{2192}{RESET} {msg}");
}

pub fn detail(msg: &str) {
  println!("        {msg}");
}

pub fn detail_ok(msg: &str) {
  println!("        {GREEN}\u{2713}{RESET} {msg}");
}

pub fn blank() {
  println!();
}

/// Secondary text: paths, commands, hashes.
pub fn dim(text: impl Display) -> String {
  format!("{DIM}{text}{RESET}")
}

/// A written module or emitted bundle, followed by its size.
pub fn sized(label: &str, bytes: u64) {
  detail_ok(&format!("{label}  {}", dim(format_args!("({})", format_size(bytes)))));
}

/// Progress of `routepack dev` between builds.
#[derive(Debug, Clone, Copy)]
pub enum WatchStatus {
  Rebuilding,
  Built(Duration),
  Failed,
  Stopping,
}

pub fn watch_status(status: WatchStatus) {
  match status {
    WatchStatus::Rebuilding => println!("  {CYAN}[routepack]{RESET} rebuilding..."),
    WatchStatus::Built(elapsed) => {
      println!("  {GREEN}[routepack]{RESET} build complete ({:.1}s)", elapsed.as_secs_f64());
    }
    WatchStatus::Failed => println!("  {RED}[routepack]{RESET} build failed, waiting for changes"),
    WatchStatus::Stopping => {
      println!();
      println!("  {}", dim("shutting down..."));
    }
  }
}

fn format_size(bytes: u64) -> String {
  if bytes >= 1_000_000 {
    format!("{:.1} MB", bytes as f64 / 1_000_000.0)
  } else if bytes >= 1_000 {
    format!("{:.1} kB", bytes as f64 / 1_000.0)
  } else {
    format!("{bytes} B")
  }
}
