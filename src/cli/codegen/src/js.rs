/* src/cli/codegen/src/js.rs */

// JS source helpers for generated modules.
//
// Escaping rule: every string embedded in generated code (paths, route names,
// format names, URLs, log levels) goes through `string_literal`, which emits a
// double-quoted JSON string with U+2028/U+2029 also escaped. Structured data
// goes through `json_literal`. Nothing user-supplied is spliced in raw.

use anyhow::{Context, Result};
use serde::Serialize;

/// JSON text is valid JS except for raw U+2028/U+2029, which end a line in
/// pre-ES2019 engines.
fn escape_line_separators(json: String) -> String {
  if json.contains(['\u{2028}', '\u{2029}']) {
    json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029")
  } else {
    json
  }
}

/// Render `s` as a double-quoted JS string literal.
pub fn string_literal(s: &str) -> String {
  escape_line_separators(serde_json::Value::String(s.to_owned()).to_string())
}

/// `Some(s)` -> string literal, `None` -> `undefined`.
pub fn optional_string_literal(s: Option<&str>) -> String {
  s.map_or_else(|| "undefined".to_string(), string_literal)
}

/// Serialize `value` as an inline JSON expression.
pub fn json_literal<T: Serialize>(value: &T) -> Result<String> {
  let json = serde_json::to_string(value).context("failed to serialize JSON literal")?;
  Ok(escape_line_separators(json))
}

/// Line-oriented source builder with two-space indentation.
#[derive(Debug, Default)]
pub(crate) struct SourceWriter {
  out: String,
  depth: usize,
}

impl SourceWriter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn line(&mut self, text: &str) {
    if text.is_empty() {
      self.out.push('\n');
      return;
    }
    for _ in 0..self.depth {
      self.out.push_str("  ");
    }
    self.out.push_str(text);
    self.out.push('\n');
  }

  pub fn blank(&mut self) {
    self.out.push('\n');
  }

  /// Write `text` then indent following lines.
  pub fn open(&mut self, text: &str) {
    self.line(text);
    self.depth += 1;
  }

  /// Write `text` one level out, keeping the current depth afterwards.
  pub fn middle(&mut self, text: &str) {
    self.depth = self.depth.saturating_sub(1);
    self.line(text);
    self.depth += 1;
  }

  /// Dedent then write `text`.
  pub fn close(&mut self, text: &str) {
    self.depth = self.depth.saturating_sub(1);
    self.line(text);
  }

  pub fn finish(self) -> String {
    self.out
  }
}
