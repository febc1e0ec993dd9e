use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;

use super::CodeHighlight;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CodeFrame {
  /// Source-code of the file at the time of error
  pub code: Option<String>,

  /// Path to the source file if applicable.
  ///
  /// Virtual modules use their namespaced specifier here.
  pub file_path: Option<PathBuf>,

  /// List of source-code highlight messages
  pub code_highlights: Vec<CodeHighlight>,
}

impl From<PathBuf> for CodeFrame {
  fn from(path: PathBuf) -> Self {
    CodeFrame {
      code: None,
      code_highlights: Vec::new(),
      file_path: Some(path),
    }
  }
}
