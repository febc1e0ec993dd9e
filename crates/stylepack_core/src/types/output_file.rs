use std::borrow::Cow;
use std::fmt::Debug;
use std::fmt::Formatter;
use std::path::PathBuf;

/// A single artifact produced by the bundler
///
/// The path may not exist on disk; outputs are captured in memory unless the build asked
/// for them to be written.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OutputFile {
  pub path: PathBuf,
  pub contents: Vec<u8>,
}

impl OutputFile {
  pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
    Self {
      path: path.into(),
      contents: contents.into(),
    }
  }

  /// Lossy UTF-8 view of the contents
  pub fn text(&self) -> Cow<'_, str> {
    String::from_utf8_lossy(&self.contents)
  }

  pub fn file_name(&self) -> Cow<'_, str> {
    self
      .path
      .file_name()
      .map(|name| name.to_string_lossy())
      .unwrap_or_default()
  }
}

impl Debug for OutputFile {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("OutputFile")
      .field("path", &self.path)
      .field("size", &self.contents.len())
      .finish()
  }
}
