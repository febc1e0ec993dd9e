use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// In-memory file-system for testing
pub mod in_memory_file_system;

/// File-system implementation using std::fs
pub mod os_file_system;

/// FileSystem abstraction instance
///
/// This should be `OsFileSystem` for non-testing environments and `InMemoryFileSystem` for testing.
pub type FileSystemRef = Arc<dyn FileSystem + Send + Sync>;

/// Trait abstracting file-system operations
///
/// Stylesheets, partials and resources are all read through this trait so the bundler and its
/// plugins can run against an in-memory tree in tests.
#[mockall::automock]
pub trait FileSystem: std::fmt::Debug {
  fn cwd(&self) -> std::io::Result<PathBuf>;

  fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf>;

  /// Create a directory, including any missing parents
  fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;

  fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;

  fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

  fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()>;

  fn is_file(&self, path: &Path) -> bool;

  fn is_dir(&self, path: &Path) -> bool;
}
