/* src/cli/core/src/build/mod.rs */

pub mod bundler_config;
pub mod compile;
pub mod compiler;
pub mod emit;
pub mod entrypoints;
pub mod hot;
pub mod options;
pub mod resolve;
pub(crate) mod watch;

pub use bundler_config::{
  AffectingOptions, BundlerConfig, ConfigOverride, OutputConfig, build_bundler_config,
};
pub use compile::{CompileHandle, MANIFEST_FILE, ServerRoutes, compile};
pub use compiler::{Bundler, CommandBundler, Compiler};
pub use entrypoints::{EntrypointSet, derive_entrypoints};
pub use hot::{HotReload, TriggerFileHotReload};
pub use options::{CompileOptions, Layout};
