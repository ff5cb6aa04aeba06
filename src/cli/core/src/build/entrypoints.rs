/* src/cli/core/src/build/entrypoints.rs */

use std::path::Path;

use anyhow::{Result, bail};
use indexmap::IndexMap;
use routepack_codegen::{RouteTable, entry_name};

use super::resolve::{path_str, resolve_module};

/// Entry name -> ordered module list handed to the bundler.
pub type EntrypointSet = IndexMap<String, Vec<String>>;

/// One entrypoint per (route, format). Page modules are resolved against
/// `routes_dir`; transport modules lead when `hot_modules` is given, then
/// the bootstrap, then the page.
pub fn derive_entrypoints(
  routes: &RouteTable,
  routes_dir: &Path,
  bootstrap: &Path,
  hot_modules: Option<&[String]>,
) -> Result<EntrypointSet> {
  let bootstrap = path_str(bootstrap)?;
  let mut entries = EntrypointSet::new();

  for (route_name, route) in routes {
    for (format, page) in &route.formats {
      let name = entry_name(route_name, format);
      let page_path = resolve_module(routes_dir, page)?;

      let mut modules: Vec<String> = hot_modules.map(<[String]>::to_vec).unwrap_or_default();
      modules.push(bootstrap.to_string());
      modules.push(path_str(&page_path)?.to_string());

      if entries.insert(name.clone(), modules).is_some() {
        bail!("entry name \"{name}\" is produced by more than one route/format pair");
      }
    }
  }

  Ok(entries)
}

#[cfg(test)]
mod tests {
  use indexmap::IndexMap;
  use routepack_codegen::{Method, Route};

  use super::*;

  fn route(path: &str, formats: &[(&str, &str)]) -> Route {
    let formats: IndexMap<String, String> =
      formats.iter().map(|(f, p)| (f.to_string(), p.to_string())).collect();
    Route { path: path.into(), method: Method::Any, formats }
  }

  fn project() -> tempfile::TempDir {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("pages")).unwrap();
    for page in ["home.js", "home.amp.js", "about.js"] {
      std::fs::write(tmp.path().join("pages").join(page), "").unwrap();
    }
    tmp
  }

  #[test]
  fn one_entry_per_route_format() {
    let tmp = project();
    let mut routes = RouteTable::new();
    routes.insert(
      "Home".into(),
      route("/", &[("default", "pages/home.js"), ("amp", "pages/home.amp.js")]),
    );
    routes.insert("About".into(), route("/about", &[("default", "pages/about")]));

    let bootstrap = tmp.path().join("__clientTemp/entry.js");
    let entries = derive_entrypoints(&routes, tmp.path(), &bootstrap, None).unwrap();

    let names: Vec<&str> = entries.keys().map(String::as_str).collect();
    assert_eq!(names, ["Home", "Home-amp", "About"]);
    let about = &entries["About"];
    assert_eq!(about.len(), 2);
    assert_eq!(about[0], bootstrap.to_str().unwrap());
    assert!(about[1].ends_with("pages/about.js"));
    assert!(Path::new(&about[1]).is_absolute());
  }

  #[test]
  fn hot_modules_lead() {
    let tmp = project();
    let mut routes = RouteTable::new();
    routes.insert("Home".into(), route("/", &[("default", "pages/home.js")]));
    let hot = vec!["hmr-client".to_string(), "hmr-runtime".to_string()];

    let bootstrap = tmp.path().join("entry.js");
    let entries = derive_entrypoints(&routes, tmp.path(), &bootstrap, Some(&hot)).unwrap();

    let home = &entries["Home"];
    assert_eq!(&home[..2], hot.as_slice());
    assert_eq!(home[2], bootstrap.to_str().unwrap());
    assert_eq!(home.len(), 4);
  }

  #[test]
  fn unresolvable_page_fails() {
    let tmp = project();
    let mut routes = RouteTable::new();
    routes.insert("Gone".into(), route("/gone", &[("default", "pages/gone.js")]));
    let err = derive_entrypoints(&routes, tmp.path(), &tmp.path().join("entry.js"), None)
      .unwrap_err();
    assert!(err.to_string().contains("pages/gone.js"));
  }

  #[test]
  fn colliding_names_rejected() {
    let tmp = project();
    let mut routes = RouteTable::new();
    routes.insert("Home".into(), route("/", &[("amp", "pages/home.amp.js")]));
    routes.insert("Home-amp".into(), route("/amp", &[("default", "pages/home.js")]));
    let err = derive_entrypoints(&routes, tmp.path(), &tmp.path().join("entry.js"), None)
      .unwrap_err();
    assert!(err.to_string().contains("\"Home-amp\""));
  }
}
