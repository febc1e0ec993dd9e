use std::io;
use std::path::Path;
use std::path::PathBuf;

use parking_lot::Mutex;
use stylepack_filesystem::FileSystemRef;

/// Adapter that lets grass read through the build's `FileSystem`
///
/// Every file grass reads is recorded so the bundler can report partials and
/// imported modules as inputs of the stylesheet.
#[derive(Debug)]
pub(crate) struct BuildFs {
  file_system: FileSystemRef,
  read_files: Mutex<Vec<PathBuf>>,
}

impl BuildFs {
  pub fn new(file_system: FileSystemRef) -> Self {
    BuildFs {
      file_system,
      read_files: Mutex::new(Vec::new()),
    }
  }

  /// Files read so far, in read order
  pub fn read_files(&self) -> Vec<PathBuf> {
    self.read_files.lock().clone()
  }
}

impl grass::Fs for BuildFs {
  fn is_dir(&self, path: &Path) -> bool {
    self.file_system.is_dir(path)
  }

  fn is_file(&self, path: &Path) -> bool {
    self.file_system.is_file(path)
  }

  fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
    let contents = self.file_system.read(path)?;

    let mut read_files = self.read_files.lock();
    if !read_files.iter().any(|file| file == path) {
      read_files.push(path.to_path_buf());
    }

    Ok(contents)
  }
}
