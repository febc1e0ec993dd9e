use std::path::Path;
use std::path::PathBuf;

use super::FILE_NAMESPACE;

/// What caused a specifier to be resolved
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ResolveKind {
  /// A top-level specifier from `BundleConfig::entry_points`
  EntryPoint,
  /// An `@import` rule inside a stylesheet
  ImportRule,
  /// A `url()` token inside a stylesheet
  UrlToken,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolveArgs {
  /// The specifier as written
  pub path: String,

  /// Path of the module containing the specifier, `None` for entry points
  pub importer: Option<String>,

  /// Namespace of the importer, `file` for entry points
  pub namespace: String,

  /// Directory relative specifiers are resolved against
  pub resolve_dir: PathBuf,

  pub kind: ResolveKind,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ResolveResult {
  /// Absolute file path in the `file` namespace, any plugin defined key otherwise
  pub path: String,

  pub namespace: String,

  /// Leave the specifier untouched in the output
  pub external: bool,
}

impl ResolveResult {
  pub fn file(path: &Path) -> Self {
    ResolveResult {
      path: path.to_string_lossy().into_owned(),
      namespace: FILE_NAMESPACE.into(),
      external: false,
    }
  }

  pub fn in_namespace(path: impl Into<String>, namespace: impl Into<String>) -> Self {
    ResolveResult {
      path: path.into(),
      namespace: namespace.into(),
      external: false,
    }
  }

  pub fn external(path: impl Into<String>) -> Self {
    ResolveResult {
      path: path.into(),
      namespace: FILE_NAMESPACE.into(),
      external: true,
    }
  }
}
