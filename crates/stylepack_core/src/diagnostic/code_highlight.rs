use serde::Deserialize;
use serde::Serialize;

/// A one based line/column position in a source file
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Location {
  pub line: u32,
  pub column: u32,
}

/// Represents a snippet of code to highlight
#[derive(Serialize, Default, Deserialize, Debug, PartialEq, Clone)]
pub struct CodeHighlight {
  /// The start location to highlight
  pub start: Location,

  /// The end location to highlight
  pub end: Location,

  /// An optional message to display around the source-code range
  pub message: Option<String>,
}

impl From<Location> for CodeHighlight {
  fn from(loc: Location) -> Self {
    CodeHighlight {
      message: None,
      start: loc,
      end: loc,
    }
  }
}
