use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::CodeFrame;

/// This is a user facing error for stylepack.
///
/// Usually but not always this is linked to a source-code location.
#[derive(Error, Debug, Deserialize, PartialEq, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
  /// A summary user-facing message
  pub message: String,

  /// Indicates where this diagnostic was emitted from, usually a plugin name
  pub origin: Option<String>,

  /// A list of files with source-code highlights
  pub code_frames: Option<Vec<CodeFrame>>,

  /// Hints for the user
  pub hints: Option<Vec<String>>,

  /// URL for the user to refer to documentation
  #[serde(rename = "documentationURL")]
  pub documentation_url: Option<String>,
}

impl Display for Diagnostic {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.message)
  }
}

impl Diagnostic {
  pub fn new(message: impl Into<String>) -> Self {
    Diagnostic {
      message: message.into(),
      ..Diagnostic::default()
    }
  }

  pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
    self.origin = Some(origin.into());
    self
  }

  pub fn with_code_frame(mut self, code_frame: CodeFrame) -> Self {
    self.code_frames.get_or_insert_with(Vec::new).push(code_frame);
    self
  }

  pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
    self.hints.get_or_insert_with(Vec::new).push(hint.into());
    self
  }

  /// Converts any error raised inside the build into a diagnostic, keeping
  /// diagnostics that were already produced intact.
  pub fn from_error(error: anyhow::Error) -> Self {
    match error.downcast::<Diagnostic>() {
      Ok(diagnostic) => diagnostic,
      Err(error) => Diagnostic::new(format!("{error:#}")),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use anyhow::anyhow;
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn builds_diagnostics_incrementally() {
    let diagnostic = Diagnostic::new("Could not resolve \"./logo.png\"")
      .with_origin("stylepack-css-resource")
      .with_hint("You can add ./ to the start of the path if it is relative")
      .with_code_frame(CodeFrame::from(PathBuf::from("/src/app.css")));

    assert_eq!(diagnostic.to_string(), "Could not resolve \"./logo.png\"");
    assert_eq!(diagnostic.origin.as_deref(), Some("stylepack-css-resource"));
    assert_eq!(diagnostic.hints.map(|hints| hints.len()), Some(1));
    assert_eq!(
      diagnostic.code_frames.unwrap()[0].file_path,
      Some(PathBuf::from("/src/app.css"))
    );
  }

  #[test]
  fn keeps_diagnostics_raised_as_errors() {
    let original = Diagnostic::new("Undefined variable").with_origin("stylepack-sass");

    assert_eq!(
      Diagnostic::from_error(anyhow::Error::new(original.clone())),
      original
    );
    assert_eq!(
      Diagnostic::from_error(anyhow!("boom").context("while loading")),
      Diagnostic::new("while loading: boom")
    );
  }

  #[test]
  fn serializes_in_camel_case() {
    let json = serde_json::to_value(Diagnostic::new("oops")).unwrap();

    assert_eq!(json["message"], "oops");
    assert!(json.get("codeFrames").is_some());
    assert!(json.get("documentationURL").is_some());
  }
}
