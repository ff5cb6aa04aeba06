/* src/cli/core/src/config/tests.rs */

use std::path::Path;

use routepack_codegen::Method;

use super::*;
use crate::build::ConfigOverride;

#[test]
fn parse_minimal_config() {
  let config: RoutepackConfig = toml::from_str(
    r#"
[routes.Home]
path = "/"
page = "pages/home.js"
"#,
  )
  .unwrap();
  assert!(config.build.bundler_command.is_none());
  assert!(!config.build.minify);
  assert_eq!(config.routes.len(), 1);
  assert!(config.bundler_command().is_err());
}

#[test]
fn parse_full_config() {
  let config: RoutepackConfig = toml::from_str(
    r#"
[build]
working_dir = ".routepack"
routes_dir = "app"
output_dir = "public/build"
output_url = "/assets/"
minify = true
long_term_caching = true
bundler_command = "node scripts/bundle.mjs"
bundler_config = "bundler.config.json"
middleware = ["./middleware/auth"]

[logging]
level = "debug"
gauge_level = "ok"

[hot]
client_modules = ["my-hmr-client"]
trigger_file = ".reload"

[routes.Home]
path = "/"
method = ["GET", "HEAD"]
page = { default = "pages/home.js", amp = "pages/home.amp.js" }

[routes.Submit]
path = "/submit"
method = "POST"
page = "pages/submit.js"
"#,
  )
  .unwrap();

  assert_eq!(config.bundler_command().unwrap(), "node scripts/bundle.mjs");
  let base = Path::new("/project");
  let options = config.to_compile_options(base, false).unwrap();
  assert_eq!(options.working_dir, Path::new("/project/.routepack"));
  assert_eq!(options.routes_dir, Path::new("/project/app"));
  assert_eq!(options.output_dir(), Path::new("/project/public/build"));
  assert_eq!(options.output_url, "/assets/");
  assert!(options.minify && options.long_term_caching && !options.hot);
  assert_eq!(options.middleware, ["./middleware/auth"]);
  assert_eq!(options.log_level.as_deref(), Some("debug"));
  assert_eq!(options.timing_log_level, None);
  assert_eq!(options.gauge_log_level.as_deref(), Some("ok"));
  assert_eq!(options.hot_client_modules, ["my-hmr-client"]);
  assert!(matches!(
    &options.bundler_config,
    Some(ConfigOverride::File(p)) if p == Path::new("/project/bundler.config.json")
  ));

  let home = &options.routes["Home"];
  assert_eq!(home.method, Method::Many(vec!["GET".into(), "HEAD".into()]));
  let formats: Vec<&str> = home.formats.keys().map(String::as_str).collect();
  assert_eq!(formats, ["default", "amp"]);
  assert_eq!(options.routes["Submit"].method, Method::One("POST".into()));

  assert_eq!(config.trigger_file(base, Path::new("/out")), Path::new("/project/.reload"));
}

#[test]
fn defaults_relative_to_config_dir() {
  let config: RoutepackConfig = toml::from_str(
    r#"
[routes.Home]
path = "/"
page = "pages/home.js"
"#,
  )
  .unwrap();
  let options = config.to_compile_options(Path::new("/project"), true).unwrap();
  assert_eq!(options.working_dir, Path::new("/project/__clientTemp"));
  assert_eq!(options.output_dir(), Path::new("/project/__clientTemp/build"));
  assert_eq!(options.routes_dir, Path::new("/project/."));
  assert!(options.hot);
  assert_eq!(options.routes["Home"].method, Method::Any);
  assert_eq!(
    config.trigger_file(Path::new("/project"), Path::new("/out")),
    Path::new("/out/.reload-trigger")
  );
}

#[test]
fn empty_routes_rejected() {
  let config: RoutepackConfig = toml::from_str("[build]\nminify = true\n").unwrap();
  let err = config.to_compile_options(Path::new("/project"), false).unwrap_err();
  assert!(err.to_string().contains("route table is empty"));
}

#[test]
fn unsupported_method_rejected() {
  let config: RoutepackConfig = toml::from_str(
    r#"
[routes.Home]
path = "/"
method = 42
page = "pages/home.js"
"#,
  )
  .unwrap();
  let err = config.to_compile_options(Path::new("/project"), false).unwrap_err();
  assert!(format!("{err:#}").contains("unsupported method value 42"));
}

#[test]
fn find_config_walks_upward() {
  let tmp = tempfile::tempdir().unwrap();
  std::fs::write(tmp.path().join(CONFIG_FILE), "").unwrap();
  let nested = tmp.path().join("app/pages");
  std::fs::create_dir_all(&nested).unwrap();

  let found = find_config(&nested).unwrap();
  assert_eq!(found, tmp.path().canonicalize().unwrap().join(CONFIG_FILE));
  assert!(load_config(&found).unwrap().routes.is_empty());
}

#[test]
fn load_config_reports_parse_errors() {
  let tmp = tempfile::tempdir().unwrap();
  let path = tmp.path().join(CONFIG_FILE);
  std::fs::write(&path, "[build\n").unwrap();
  let err = load_config(&path).unwrap_err();
  assert!(err.to_string().contains("failed to parse"));
}
