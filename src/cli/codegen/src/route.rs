/* src/cli/codegen/src/route.rs */

// Route table as declared in config, and its normalized form.

use anyhow::{Context, Result, bail};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Format name implied when a route's page is a single module path.
pub const DEFAULT_FORMAT: &str = "default";

/// Normalized route table, in declaration order.
pub type RouteTable = IndexMap<String, Route>;

/// Route as written in `routepack.toml` (or JSON), before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDef {
  pub path: String,
  #[serde(default)]
  pub method: Option<Value>,
  pub page: PageRef,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
  Single(String),
  Formats(IndexMap<String, String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
  /// Matches every request method.
  Any,
  One(String),
  Many(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
  pub path: String,
  pub method: Method,
  /// Format name -> page module specifier. Never empty.
  pub formats: IndexMap<String, String>,
}

impl Method {
  /// Empty-ish values (absent, null, "", [], {}) collapse to `Any`.
  pub fn normalize(raw: Option<&Value>) -> Result<Self> {
    let Some(raw) = raw else { return Ok(Self::Any) };
    match raw {
      Value::Null => Ok(Self::Any),
      Value::String(s) if s.is_empty() => Ok(Self::Any),
      Value::String(s) => Ok(Self::One(s.clone())),
      Value::Array(items) if items.is_empty() => Ok(Self::Any),
      Value::Array(items) => {
        let methods = items
          .iter()
          .map(|v| v.as_str().map(str::to_string).with_context(|| format!("invalid method {v}")))
          .collect::<Result<Vec<_>>>()?;
        Ok(Self::Many(methods))
      }
      Value::Object(obj) if obj.is_empty() => Ok(Self::Any),
      other => bail!("unsupported method value {other}"),
    }
  }

  pub fn is_any(&self) -> bool {
    matches!(self, Self::Any)
  }
}

impl PageRef {
  pub fn normalize(&self) -> Result<IndexMap<String, String>> {
    match self {
      Self::Single(path) => {
        let mut formats = IndexMap::new();
        formats.insert(DEFAULT_FORMAT.to_string(), path.clone());
        Ok(formats)
      }
      Self::Formats(map) if map.is_empty() => bail!("page must declare at least one format"),
      Self::Formats(map) => Ok(map.clone()),
    }
  }
}

impl RouteDef {
  pub fn normalize(&self, name: &str) -> Result<Route> {
    let method =
      Method::normalize(self.method.as_ref()).with_context(|| format!("route \"{name}\""))?;
    let formats = self.page.normalize().with_context(|| format!("route \"{name}\""))?;
    Ok(Route { path: self.path.clone(), method, formats })
  }
}

/// Normalize every declared route, keeping declaration order.
pub fn normalize_routes(defs: &IndexMap<String, RouteDef>) -> Result<RouteTable> {
  if defs.is_empty() {
    bail!("route table is empty -- declare at least one [routes.<name>]");
  }
  defs.iter().map(|(name, def)| Ok((name.clone(), def.normalize(name)?))).collect()
}

/// Bundler entry name for a (route, format) pair.
pub fn entry_name(route: &str, format: &str) -> String {
  if format == DEFAULT_FORMAT { route.to_string() } else { format!("{route}-{format}") }
}
