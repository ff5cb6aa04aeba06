/* src/cli/core/src/config/mod.rs */

mod loader;
mod types;

#[cfg(test)]
mod tests;

pub use loader::{CONFIG_FILE, find_config, load_config};
pub use types::{BuildSection, HotSection, LoggingSection, RoutepackConfig, absolute_dir};
