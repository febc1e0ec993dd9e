use std::path::PathBuf;

/// How loaded contents are interpreted by the bundler
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Loader {
  /// Parsed as a stylesheet and walked for `@import` and `url()` references
  Css,
  /// Copied to the output set as a resource and referenced by its emitted name
  File,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadArgs {
  pub path: String,
  pub namespace: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LoadResult {
  pub contents: Vec<u8>,

  pub loader: Loader,

  /// Directory that references inside the contents are resolved against
  ///
  /// Defaults to the parent directory of the path for the `file` namespace.
  pub resolve_dir: Option<PathBuf>,

  /// Real files that were read to produce the contents
  pub watch_files: Vec<PathBuf>,
}

impl LoadResult {
  pub fn css(contents: impl Into<String>) -> Self {
    LoadResult {
      contents: contents.into().into_bytes(),
      loader: Loader::Css,
      resolve_dir: None,
      watch_files: Vec::new(),
    }
  }

  pub fn file(contents: Vec<u8>) -> Self {
    LoadResult {
      contents,
      loader: Loader::File,
      resolve_dir: None,
      watch_files: Vec::new(),
    }
  }

  pub fn with_resolve_dir(mut self, resolve_dir: impl Into<PathBuf>) -> Self {
    self.resolve_dir = Some(resolve_dir.into());
    self
  }

  pub fn with_watch_files(mut self, watch_files: Vec<PathBuf>) -> Self {
    self.watch_files = watch_files;
    self
  }
}
