/* src/cli/core/src/main.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use routepack::config::{RoutepackConfig, find_config, load_config};
use routepack::{clean, commands};

#[derive(Parser)]
#[command(name = "routepack", about = "Route table to client bundles, manifest and routes modules")]
struct Cli {
  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Compile once with hot reload off
  Build {
    /// Path to routepack.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Compile with hot reload on and rebuild on change
  Dev {
    /// Path to routepack.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
  /// Print derived entrypoints without bundling
  Entries {
    /// Path to routepack.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Include hot-reload client modules
    #[arg(long)]
    hot: bool,
  },
  /// Remove the working and output directories
  Clean {
    /// Path to routepack.toml (auto-detected if omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,
  },
}

/// Resolve config path (explicit or auto-detected) and parse it
fn resolve_config(explicit: Option<PathBuf>) -> Result<(PathBuf, RoutepackConfig)> {
  let path = match explicit {
    Some(p) => p,
    None => {
      let cwd = std::env::current_dir().context("failed to get cwd")?;
      find_config(&cwd)?
    }
  };
  let config = load_config(&path)?;
  Ok((path, config))
}

fn base_dir_of(config_path: &Path) -> &Path {
  match config_path.parent() {
    Some(dir) if !dir.as_os_str().is_empty() => dir,
    _ => Path::new("."),
  }
}

#[tokio::main]
async fn main() -> Result<()> {
  let cli = Cli::parse();

  match cli.command {
    Command::Build { config } => {
      let (config_path, config) = resolve_config(config)?;
      commands::run_build(&config, base_dir_of(&config_path)).await?;
    }
    Command::Dev { config } => {
      let (config_path, config) = resolve_config(config)?;
      commands::run_dev(&config, base_dir_of(&config_path)).await?;
    }
    Command::Entries { config, hot } => {
      let (config_path, config) = resolve_config(config)?;
      commands::run_entries(&config, base_dir_of(&config_path), hot)?;
    }
    Command::Clean { config } => {
      let (config_path, config) = resolve_config(config)?;
      clean::run_clean(&config, base_dir_of(&config_path))?;
    }
  }

  Ok(())
}
