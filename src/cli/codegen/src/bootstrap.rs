/* src/cli/codegen/src/bootstrap.rs */

// Client bootstrap module shared by every entrypoint.

use crate::js::{SourceWriter, optional_string_literal, string_literal};

/// Global the host page calls to start the client runtime.
pub const BOOTSTRAP_GLOBAL: &str = "rfBootstrap";
/// Global the host page calls to set the static asset base path.
pub const SET_BASE_GLOBAL: &str = "__setReactServerBase";

#[derive(Debug, Clone, Copy)]
pub struct BootstrapModule<'a> {
  /// Client runtime package exposing `logging` and `ClientController`.
  pub runtime_module: &'a str,
  /// Specifier of the client routes module, relative to the bootstrap file.
  pub routes_module: &'a str,
  pub log_level: Option<&'a str>,
  pub timing_log_level: Option<&'a str>,
  pub gauge_log_level: Option<&'a str>,
}

pub fn generate_bootstrap(module: &BootstrapModule<'_>) -> String {
  let mut w = SourceWriter::new();
  w.line("// Generated by routepack. Do not edit.");
  w.blank();
  w.line(&format!("import runtime from {};", string_literal(module.runtime_module)));
  w.line(&format!("import routes from {};", string_literal(module.routes_module)));
  w.blank();

  w.open("if (typeof window !== \"undefined\") {");
  w.open(&format!("window.{SET_BASE_GLOBAL} = function (path) {{"));
  // public path rewriting breaks the hot-reload transport
  w.open("if (!module.hot) {");
  w.line("__webpack_public_path__ = path;");
  w.close("}");
  w.line("window.__reactServerBase = path;");
  w.close("};");
  w.blank();

  w.open(&format!("window.{BOOTSTRAP_GLOBAL} = function () {{"));
  for (channel, level) in [
    ("main", module.log_level),
    ("time", module.timing_log_level),
    ("gauge", module.gauge_log_level),
  ] {
    w.line(&format!(
      "runtime.logging.setLevel({}, {});",
      string_literal(channel),
      optional_string_literal(level)
    ));
  }
  w.line("new runtime.ClientController({ routes: routes }).init();");
  w.close("};");
  w.close("}");

  w.finish()
}
