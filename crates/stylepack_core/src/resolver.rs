use std::fmt::Debug;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// Turns a specifier into a real file path
///
/// Failures are returned as a `Diagnostic` wrapped in the error so callers can attach hints.
pub trait Resolver: Debug + Send + Sync {
  fn resolve(&self, specifier: &str, resolve_dir: &Path) -> anyhow::Result<PathBuf>;
}

pub type ResolverRef = Arc<dyn Resolver>;
