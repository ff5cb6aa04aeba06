/* src/cli/core/src/lib.rs */

pub mod build;
pub mod clean;
pub mod commands;
pub mod config;
mod shell;
pub mod ui;

pub use build::{
  Bundler, BundlerConfig, CommandBundler, CompileHandle, CompileOptions, Compiler, ConfigOverride,
  HotReload, ServerRoutes, TriggerFileHotReload, compile,
};
pub use config::{RoutepackConfig, find_config, load_config};
