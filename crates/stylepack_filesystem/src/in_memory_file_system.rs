use std::collections::HashMap;
use std::io;
use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

use parking_lot::RwLock;

use crate::FileSystem;

#[cfg(not(target_os = "windows"))]
fn root_dir() -> PathBuf {
  PathBuf::from("/")
}

#[cfg(target_os = "windows")]
fn root_dir() -> PathBuf {
  PathBuf::from("C:/")
}

/// In memory implementation of a file-system entry
#[derive(Debug)]
enum InMemoryFileSystemEntry {
  File { contents: Vec<u8> },
  Directory,
}

/// In memory implementation of the `FileSystem` trait, for testing purposes.
#[derive(Debug)]
pub struct InMemoryFileSystem {
  files: RwLock<HashMap<PathBuf, InMemoryFileSystemEntry>>,
  current_working_directory: RwLock<PathBuf>,
}

impl Default for InMemoryFileSystem {
  fn default() -> Self {
    Self {
      files: Default::default(),
      current_working_directory: RwLock::new(root_dir()),
    }
  }
}

impl InMemoryFileSystem {
  /// Change the current working directory. Used for resolving relative paths.
  pub fn set_current_working_directory(&self, cwd: &Path) {
    let cwd = self.normalize(cwd);
    let mut state = self.current_working_directory.write();
    *state = cwd;
  }

  fn normalize(&self, path: &Path) -> PathBuf {
    let cwd = self.current_working_directory.read();
    let mut result = if path.is_absolute() {
      vec![]
    } else {
      cwd.components().collect()
    };

    for component in path.components() {
      match component {
        Component::Prefix(prefix) => {
          result = vec![Component::Prefix(prefix)];
        }
        Component::RootDir => {
          result.push(Component::RootDir);
        }
        Component::CurDir => {}
        Component::ParentDir => {
          result.pop();
        }
        Component::Normal(path) => {
          result.push(Component::Normal(path));
        }
      }
    }

    PathBuf::from_iter(result)
  }
}

impl FileSystem for InMemoryFileSystem {
  fn cwd(&self) -> io::Result<PathBuf> {
    Ok(self.current_working_directory.read().clone())
  }

  fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
    Ok(self.normalize(path))
  }

  fn create_dir_all(&self, path: &Path) -> io::Result<()> {
    let path = self.normalize(path);
    let mut files = self.files.write();

    let mut dir = Some(path.as_path());
    while let Some(path) = dir {
      files.insert(path.to_path_buf(), InMemoryFileSystemEntry::Directory);
      dir = path.parent();
    }

    Ok(())
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    let path = self.normalize(path);
    let files = self.files.read();
    match files.get(&path) {
      None => Err(io::Error::new(io::ErrorKind::NotFound, "File not found")),
      Some(InMemoryFileSystemEntry::File { contents }) => Ok(contents.clone()),
      Some(InMemoryFileSystemEntry::Directory) => Err(io::Error::new(
        io::ErrorKind::InvalidInput,
        "Path is a directory",
      )),
    }
  }

  fn read_to_string(&self, path: &Path) -> io::Result<String> {
    let bytes = self.read(path)?;
    String::from_utf8(bytes).map_err(|_| io::Error::other("Unable to read file as string"))
  }

  fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
    let path = self.normalize(path);
    let mut files = self.files.write();

    files.insert(
      path.clone(),
      InMemoryFileSystemEntry::File {
        contents: contents.to_vec(),
      },
    );

    let mut dir = path.parent();
    while let Some(path) = dir {
      files.insert(path.to_path_buf(), InMemoryFileSystemEntry::Directory);
      dir = path.parent();
    }

    Ok(())
  }

  fn is_file(&self, path: &Path) -> bool {
    let path = self.normalize(path);
    matches!(
      self.files.read().get(&path),
      Some(InMemoryFileSystemEntry::File { .. })
    )
  }

  fn is_dir(&self, path: &Path) -> bool {
    let path = self.normalize(path);
    matches!(
      self.files.read().get(&path),
      Some(InMemoryFileSystemEntry::Directory)
    )
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn test_canonicalize_noop() {
    let fs = InMemoryFileSystem::default();
    let path = root_dir().join("foo/bar");
    let result = fs.canonicalize(&path).unwrap();
    assert_eq!(result, path);
  }

  #[test]
  fn test_remove_relative_parent_dots() {
    let fs = InMemoryFileSystem::default();
    let result = fs
      .canonicalize(&root_dir().join("foo/./bar/../baz/"))
      .unwrap();
    assert_eq!(result, root_dir().join("foo/baz"));
  }

  #[test]
  fn test_with_cwd() {
    let fs = InMemoryFileSystem::default();
    fs.set_current_working_directory(Path::new("/other"));
    let result = fs.canonicalize(Path::new("./foo/./bar/../baz/")).unwrap();
    assert_eq!(result, root_dir().join("other/foo/baz"));
    assert!(result.is_absolute());
  }

  #[test]
  fn test_read_file() {
    let fs = InMemoryFileSystem::default();
    fs.write(Path::new("/foo/bar.css"), b"body {}").unwrap();
    let result = fs.read_to_string(Path::new("/foo/bar.css")).unwrap();
    assert_eq!(result, "body {}");
  }

  #[test]
  fn test_read_file_not_found() {
    let fs = InMemoryFileSystem::default();
    let result = fs.read_to_string(Path::new("/foo/bar"));
    assert_eq!(result.unwrap_err().kind(), io::ErrorKind::NotFound);
  }

  #[test]
  fn test_read_directory_fails() {
    let fs = InMemoryFileSystem::default();
    fs.create_dir_all(Path::new("/foo")).unwrap();
    assert!(fs.read(Path::new("/foo")).is_err());
  }

  #[test]
  fn test_is_file_and_is_dir() {
    let fs = InMemoryFileSystem::default();
    fs.write(Path::new("/src/app/logo.png"), &[0, 1]).unwrap();

    assert!(fs.is_file(Path::new("/src/app/logo.png")));
    assert!(!fs.is_file(Path::new("/src/app")));
    assert!(fs.is_dir(Path::new("/src/app")));
    assert!(fs.is_dir(Path::new("/src")));
    assert!(!fs.is_dir(Path::new("/src/app/logo.png")));
    assert!(!fs.is_file(Path::new("/src/app/missing.png")));
  }

  #[test]
  fn test_changing_the_cwd_will_correctly_resolve_files() {
    let fs = InMemoryFileSystem::default();
    fs.set_current_working_directory(Path::new("/foo"));

    fs.write(Path::new("bar"), b"").unwrap();
    assert!(fs.is_file(Path::new("bar")));

    fs.set_current_working_directory(Path::new("/"));
    assert!(fs.is_file(Path::new("/foo/bar")));
  }
}
