/* src/cli/codegen/src/manifest.rs */

// Build manifest: logical chunk names/ids -> emitted files.

use std::sync::OnceLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::compilation::CompilationResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
  pub js_chunks_by_name: IndexMap<String, String>,
  /// Only names whose chunk emitted CSS.
  pub css_chunks_by_name: IndexMap<String, String>,
  pub js_chunks_by_id: IndexMap<String, String>,
  pub hash: String,
}

#[derive(Debug, Clone)]
pub struct ManifestExtraction {
  pub manifest: Manifest,
  pub warnings: Vec<String>,
}

fn css_re() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\.css(\?.*)?$").unwrap())
}

pub fn is_css_file(file: &str) -> bool {
  css_re().is_match(file)
}

/// Walk the chunk list and build the three lookup tables.
/// files[0] is the chunk's JS; the first CSS file after it (hot-update files
/// may sit in between) is the chunk's stylesheet.
pub fn extract_manifest(result: &CompilationResult) -> ManifestExtraction {
  let mut manifest = Manifest { hash: result.hash.clone(), ..Manifest::default() };
  let mut warnings = Vec::new();

  for chunk in &result.chunks {
    let Some((js, rest)) = chunk.files.split_first() else {
      warnings.push(format!("chunk {} has no output files, skipped", chunk.id));
      continue;
    };

    if let Some(name) = chunk.name() {
      manifest.js_chunks_by_name.insert(name.to_string(), js.clone());
      if let Some(css) = rest.iter().find(|f| is_css_file(f)) {
        manifest.css_chunks_by_name.insert(name.to_string(), css.clone());
      }
    }
    manifest.js_chunks_by_id.insert(chunk.id.to_string(), js.clone());
  }

  ManifestExtraction { manifest, warnings }
}
