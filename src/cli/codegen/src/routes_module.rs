/* src/cli/codegen/src/routes_module.rs */

// Routes module rendering. The server variant requires pages synchronously;
// the client variant defers each page to its own chunk.

use anyhow::Result;

use crate::js::{SourceWriter, json_literal, string_literal};
use crate::manifest::Manifest;
use crate::route::{Method, RouteTable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutesTarget {
  Client,
  Server,
}

impl RoutesTarget {
  /// Fixed per-target module name (without extension).
  pub fn module_name(self) -> &'static str {
    match self {
      Self::Client => "routes_client",
      Self::Server => "routes_server",
    }
  }

  pub fn file_name(self) -> String {
    format!("{}.js", self.module_name())
  }
}

/// Everything needed to render one routes module.
/// Page and middleware specifiers must already be relative to the working directory.
#[derive(Debug, Clone, Copy)]
pub struct RoutesModule<'a> {
  pub target: RoutesTarget,
  pub manifest: Option<&'a Manifest>,
  pub static_url: Option<&'a str>,
  pub js_middleware: &'a str,
  pub css_middleware: &'a str,
  pub middleware: &'a [String],
  pub routes: &'a RouteTable,
}

fn method_literal(method: &Method) -> String {
  match method {
    Method::Any => "undefined".to_string(),
    Method::One(m) => string_literal(m),
    Method::Many(ms) => {
      let parts: Vec<String> = ms.iter().map(String::as_str).map(string_literal).collect();
      format!("[{}]", parts.join(", "))
    }
  }
}

fn write_server_loader(w: &mut SourceWriter, page: &str) {
  let spec = string_literal(page);
  let message = string_literal(&format!("Failed to load page at {page}"));
  w.open("done: function (cb) {");
  w.open("try {");
  w.line(&format!("cb(unwrapEs6Module(require({spec})));"));
  w.middle("} catch (e) {");
  w.line(&format!("console.error({message}, e.stack);"));
  w.close("}");
  w.close("},");
}

fn write_client_loader(w: &mut SourceWriter, page: &str) {
  let spec = string_literal(page);
  w.open("done: function (cb) {");
  w.open(&format!("require.ensure([{spec}], function () {{"));
  w.line(&format!("cb(unwrapEs6Module(require({spec})));"));
  w.close("});");
  w.close("},");
}

/// Render the routes module source.
pub fn generate_routes_module(module: &RoutesModule<'_>) -> Result<String> {
  let manifest = match module.manifest {
    Some(m) => json_literal(m)?,
    None => "undefined".to_string(),
  };
  let static_url = match module.static_url {
    Some(url) => string_literal(url),
    None => "null".to_string(),
  };

  let mut w = SourceWriter::new();
  w.line("\"use strict\";");
  w.blank();
  w.line("// Generated by routepack. Do not edit.");
  w.blank();
  w.line(&format!("const manifest = {manifest};"));
  w.blank();
  w.open("function unwrapEs6Module(module) {");
  w.line("return module.__esModule ? module.default : module;");
  w.close("}");
  w.blank();

  w.open("module.exports = {");
  w.open("middleware: [");
  for core in [module.js_middleware, module.css_middleware] {
    w.line(&format!(
      "unwrapEs6Module(require({}))({static_url}, manifest),",
      string_literal(core)
    ));
  }
  for extra in module.middleware {
    w.line(&format!("unwrapEs6Module(require({})),", string_literal(extra)));
  }
  w.close("],");

  w.open("routes: {");
  for (name, route) in module.routes {
    w.open(&format!("{}: {{", string_literal(name)));
    w.line(&format!("path: {},", string_literal(&route.path)));
    w.line(&format!("method: {},", method_literal(&route.method)));
    w.open("page: {");
    for (format, page) in &route.formats {
      w.open(&format!("{}: function () {{", string_literal(format)));
      w.open("return {");
      match module.target {
        RoutesTarget::Server => write_server_loader(&mut w, page),
        RoutesTarget::Client => write_client_loader(&mut w, page),
      }
      w.close("};");
      w.close("},");
    }
    w.close("},");
    w.close("},");
  }
  w.close("},");
  w.close("};");

  Ok(w.finish())
}

#[cfg(test)]
mod tests;
