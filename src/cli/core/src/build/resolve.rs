/* src/cli/core/src/build/resolve.rs */

// Node-style module resolution for page and middleware specifiers,
// plus the relative specifiers embedded in generated modules.

use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::shell::resolve_node_module;

const EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx", "json"];

fn with_extension_appended(path: &Path, ext: &str) -> PathBuf {
  let mut s = OsString::from(path.as_os_str());
  s.push(".");
  s.push(ext);
  PathBuf::from(s)
}

/// `main` field of a package directory, when present.
fn package_main(dir: &Path) -> Option<PathBuf> {
  let content = std::fs::read_to_string(dir.join("package.json")).ok()?;
  let pkg: serde_json::Value = serde_json::from_str(&content).ok()?;
  pkg.get("main").and_then(|m| m.as_str()).map(|main| dir.join(main))
}

fn find_candidate(path: &Path) -> Option<PathBuf> {
  if path.is_file() {
    return Some(path.to_path_buf());
  }
  if let Some(found) =
    EXTENSIONS.iter().map(|ext| with_extension_appended(path, ext)).find(|p| p.is_file())
  {
    return Some(found);
  }
  if path.is_dir() {
    if let Some(main) = package_main(path)
      && let Some(found) = existing_file(&main)
    {
      return Some(found);
    }
    return EXTENSIONS.iter().map(|ext| path.join(format!("index.{ext}"))).find(|p| p.is_file());
  }
  None
}

fn existing_file(path: &Path) -> Option<PathBuf> {
  if path.is_file() {
    return Some(path.to_path_buf());
  }
  EXTENSIONS.iter().map(|ext| with_extension_appended(path, ext)).find(|p| p.is_file())
}

fn is_bare(specifier: &str) -> bool {
  !specifier.starts_with('.') && !Path::new(specifier).is_absolute()
}

/// Resolve `specifier` against `base_dir` to a canonical file path.
pub fn resolve_module(base_dir: &Path, specifier: &str) -> Result<PathBuf> {
  let candidate = Path::new(specifier);
  let joined =
    if candidate.is_absolute() { candidate.to_path_buf() } else { base_dir.join(candidate) };

  let found = find_candidate(&joined).or_else(|| {
    if is_bare(specifier) {
      resolve_node_module(base_dir, specifier).and_then(|p| find_candidate(&p))
    } else {
      None
    }
  });

  match found {
    Some(path) => {
      path.canonicalize().with_context(|| format!("failed to canonicalize {}", path.display()))
    }
    None => bail!("cannot resolve module \"{specifier}\" from {}", base_dir.display()),
  }
}

/// Path as UTF-8, for embedding into generated code and bundler config.
pub fn path_str(path: &Path) -> Result<&str> {
  path.to_str().with_context(|| format!("path is not valid UTF-8: {}", path.display()))
}

/// Specifier for `target` as seen from a module living in `from_dir`.
/// Always `./` or `../` prefixed, forward slashes. Both paths must be absolute.
pub fn relative_specifier(from_dir: &Path, target: &Path) -> Result<String> {
  let from: Vec<Component<'_>> = from_dir.components().collect();
  let to: Vec<Component<'_>> = target.components().collect();
  let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
  if common == 0 {
    bail!("{} and {} share no common root", from_dir.display(), target.display());
  }

  let mut parts: Vec<String> = vec!["..".to_string(); from.len() - common];
  for comp in &to[common..] {
    let s = comp.as_os_str().to_str().with_context(|| {
      format!("path is not valid UTF-8: {}", target.display())
    })?;
    parts.push(s.to_string());
  }

  let joined = parts.join("/");
  if joined.starts_with("..") { Ok(joined) } else { Ok(format!("./{joined}")) }
}
