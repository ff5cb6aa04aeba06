/* src/cli/codegen/src/routes_module/tests.rs */

use indexmap::IndexMap;

use super::*;
use crate::route::{DEFAULT_FORMAT, Route};

fn home_table(page: &str) -> RouteTable {
  let mut formats = IndexMap::new();
  formats.insert(DEFAULT_FORMAT.to_string(), page.to_string());
  let mut table = RouteTable::new();
  table.insert("Home".into(), Route { path: "/".into(), method: Method::Any, formats });
  table
}

fn home_manifest() -> Manifest {
  let mut manifest = Manifest { hash: "abc".into(), ..Manifest::default() };
  manifest.js_chunks_by_name.insert("Home".into(), "Home.bundle.js".into());
  manifest.js_chunks_by_id.insert("0".into(), "Home.bundle.js".into());
  manifest
}

fn module<'a>(
  target: RoutesTarget,
  manifest: Option<&'a Manifest>,
  routes: &'a RouteTable,
  middleware: &'a [String],
) -> RoutesModule<'a> {
  RoutesModule {
    target,
    manifest,
    static_url: Some("/static/"),
    js_middleware: "js-mw",
    css_middleware: "css-mw",
    middleware,
    routes,
  }
}

#[test]
fn server_module_exact_output() {
  let routes = home_table("../pages/home.js");
  let manifest = home_manifest();
  let code = generate_routes_module(&module(RoutesTarget::Server, Some(&manifest), &routes, &[]))
    .unwrap();

  let expected = r#""use strict";

// Generated by routepack. Do not edit.

const manifest = {"jsChunksByName":{"Home":"Home.bundle.js"},"cssChunksByName":{},"jsChunksById":{"0":"Home.bundle.js"},"hash":"abc"};

function unwrapEs6Module(module) {
  return module.__esModule ? module.default : module;
}

module.exports = {
  middleware: [
    unwrapEs6Module(require("js-mw"))("/static/", manifest),
    unwrapEs6Module(require("css-mw"))("/static/", manifest),
  ],
  routes: {
    "Home": {
      path: "/",
      method: undefined,
      page: {
        "default": function () {
          return {
            done: function (cb) {
              try {
                cb(unwrapEs6Module(require("../pages/home.js")));
              } catch (e) {
                console.error("Failed to load page at ../pages/home.js", e.stack);
              }
            },
          };
        },
      },
    },
  },
};
"#;
  assert_eq!(code, expected);
}

#[test]
fn client_module_defers_pages() {
  let routes = home_table("../pages/home.js");
  let code = generate_routes_module(&module(RoutesTarget::Client, None, &routes, &[])).unwrap();
  assert!(code.contains("const manifest = undefined;"));
  assert!(code.contains(r#"require.ensure(["../pages/home.js"], function () {"#));
  assert!(code.contains(r#"cb(unwrapEs6Module(require("../pages/home.js")));"#));
  assert!(!code.contains("try {"));
  assert!(!code.contains("console.error"));
}

#[test]
fn missing_static_url_renders_null() {
  let routes = home_table("./pages/home.js");
  let mut m = module(RoutesTarget::Client, None, &routes, &[]);
  m.static_url = None;
  let code = generate_routes_module(&m).unwrap();
  assert!(code.contains(r#"unwrapEs6Module(require("js-mw"))(null, manifest),"#));
}

#[test]
fn caller_middleware_follows_core_entries() {
  let routes = home_table("./pages/home.js");
  let extra = vec!["../middleware/auth.js".to_string(), "../middleware/log.js".to_string()];
  let code = generate_routes_module(&module(RoutesTarget::Server, None, &routes, &extra)).unwrap();
  let css = code.find("css-mw").unwrap();
  let auth = code.find(r#"unwrapEs6Module(require("../middleware/auth.js")),"#).unwrap();
  let log = code.find(r#"unwrapEs6Module(require("../middleware/log.js")),"#).unwrap();
  assert!(css < auth && auth < log);
}

#[test]
fn every_format_gets_a_loader() {
  let mut formats = IndexMap::new();
  formats.insert("default".to_string(), "./a.js".to_string());
  formats.insert("amp".to_string(), "./a-amp.js".to_string());
  let mut routes = RouteTable::new();
  routes.insert(
    "Article".into(),
    Route { path: "/a/:id".into(), method: Method::One("GET".into()), formats },
  );
  let code = generate_routes_module(&module(RoutesTarget::Server, None, &routes, &[])).unwrap();
  assert!(code.contains(r#""default": function () {"#));
  assert!(code.contains(r#""amp": function () {"#));
  assert!(code.contains(r#"require("./a-amp.js")"#));
  assert!(code.contains(r#"method: "GET","#));
}

#[test]
fn method_list_rendered_as_array() {
  assert_eq!(
    method_literal(&Method::Many(vec!["GET".into(), "HEAD".into()])),
    r#"["GET", "HEAD"]"#
  );
  assert_eq!(method_literal(&Method::Any), "undefined");
}

#[test]
fn hostile_names_are_escaped() {
  let mut formats = IndexMap::new();
  formats.insert("default".to_string(), "./pages/\"evil\".js".to_string());
  let mut routes = RouteTable::new();
  routes.insert(
    "Bad\"Name".into(),
    Route { path: "/x\"); boom(); (\"".into(), method: Method::Any, formats },
  );
  let code = generate_routes_module(&module(RoutesTarget::Server, None, &routes, &[])).unwrap();
  assert!(code.contains(r#""Bad\"Name": {"#));
  assert!(code.contains(r#"path: "/x\"); boom(); (\"","#));
  assert!(code.contains(r#"require("./pages/\"evil\".js")"#));
}

#[test]
fn repeated_generation_is_identical() {
  let routes = home_table("../pages/home.js");
  let manifest = home_manifest();
  let m = module(RoutesTarget::Server, Some(&manifest), &routes, &[]);
  assert_eq!(generate_routes_module(&m).unwrap(), generate_routes_module(&m).unwrap());
}

#[test]
fn target_file_names() {
  assert_eq!(RoutesTarget::Client.file_name(), "routes_client.js");
  assert_eq!(RoutesTarget::Server.file_name(), "routes_server.js");
}
