use std::path::Path;
use std::path::PathBuf;

use crate::FileSystem;

#[derive(Default, Debug)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
  fn cwd(&self) -> std::io::Result<PathBuf> {
    std::env::current_dir()
  }

  fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf> {
    std::fs::canonicalize(path)
  }

  fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(path)
  }

  fn read(&self, path: &Path) -> std::io::Result<Vec<u8>> {
    std::fs::read(path)
  }

  fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
    std::fs::read_to_string(path)
  }

  fn write(&self, path: &Path, contents: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent)?;
    }

    std::fs::write(path, contents)
  }

  fn is_file(&self, path: &Path) -> bool {
    path.is_file()
  }

  fn is_dir(&self, path: &Path) -> bool {
    path.is_dir()
  }
}

#[cfg(test)]
mod tests {
  use assert_fs::prelude::*;
  use assert_fs::TempDir;

  use super::*;

  #[test]
  fn reads_files_written_to_disk() {
    let dir = TempDir::new().unwrap();
    let file = dir.child("styles/app.css");
    file.write_str("body {}").unwrap();

    let fs = OsFileSystem;

    assert!(fs.is_file(file.path()));
    assert!(fs.is_dir(&dir.path().join("styles")));
    assert_eq!(fs.read_to_string(file.path()).unwrap(), "body {}");
  }

  #[test]
  fn write_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dist/media/logo.png");

    OsFileSystem.write(&path, &[1, 2, 3]).unwrap();

    assert!(dir.child("dist/media").path().is_dir());
    assert_eq!(std::fs::read(&path).unwrap(), vec![1, 2, 3]);
  }
}
