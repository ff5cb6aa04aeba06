/* src/cli/codegen/src/compilation.rs */

// Compilation result as reported by the external bundler.

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkId {
  Number(u64),
  Name(String),
}

impl fmt::Display for ChunkId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Number(n) => write!(f, "{n}"),
      Self::Name(s) => f.write_str(s),
    }
  }
}

/// One bundler output unit. Accepts both `{ name }` and webpack-style `{ names: [] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
  pub id: ChunkId,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub names: Vec<String>,
  #[serde(default)]
  pub files: Vec<String>,
}

impl Chunk {
  pub fn new(id: ChunkId, name: Option<&str>, files: &[&str]) -> Self {
    Self {
      id,
      name: name.map(str::to_string),
      names: Vec::new(),
      files: files.iter().map(|f| (*f).to_string()).collect(),
    }
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref().or_else(|| self.names.first().map(String::as_str))
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompilationResult {
  #[serde(default)]
  pub hash: String,
  #[serde(default)]
  pub chunks: Vec<Chunk>,
  /// Bundler-reported errors, kept opaque.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub errors: Vec<Value>,
}

impl CompilationResult {
  pub fn has_errors(&self) -> bool {
    !self.errors.is_empty()
  }
}

pub fn parse_compilation(content: &str) -> Result<CompilationResult> {
  serde_json::from_str(content).context("failed to parse compilation result")
}
