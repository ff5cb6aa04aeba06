/* src/cli/codegen/src/lib.rs */

mod bootstrap;
mod js;
mod routes_module;

pub mod compilation;
pub mod manifest;
pub mod route;

pub use bootstrap::{BOOTSTRAP_GLOBAL, BootstrapModule, SET_BASE_GLOBAL, generate_bootstrap};
pub use compilation::{Chunk, ChunkId, CompilationResult, parse_compilation};
pub use js::{json_literal, string_literal};
pub use manifest::{Manifest, ManifestExtraction, extract_manifest, is_css_file};
pub use route::{
  DEFAULT_FORMAT, Method, PageRef, Route, RouteDef, RouteTable, entry_name, normalize_routes,
};
pub use routes_module::{RoutesModule, RoutesTarget, generate_routes_module};
