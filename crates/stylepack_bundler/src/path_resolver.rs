use std::path::Path;
use std::path::PathBuf;

use serde_json::Value;
use stylepack_core::diagnostic::Diagnostic;
use stylepack_core::resolver::Resolver;
use stylepack_core::types::BundleConfig;
use stylepack_filesystem::FileSystemRef;

/// Resolves stylesheet and resource specifiers against the file system
///
/// Relative and absolute specifiers are looked up directly. Bare specifiers such as
/// `url(logo.png)` or `@import 'theme.css'` are relative to the stylesheet first and are
/// only looked up in `node_modules` directories walking up from the resolve directory when
/// no such file exists. Package entries are
/// found through the `exports` map first and then through the configured main fields.
#[derive(Debug)]
pub struct PathResolver {
  conditions: Vec<String>,
  file_system: FileSystemRef,
  main_fields: Vec<String>,
  preserve_symlinks: bool,
}

impl PathResolver {
  pub fn new(file_system: FileSystemRef, config: &BundleConfig) -> Self {
    PathResolver {
      conditions: config.conditions.clone(),
      file_system,
      main_fields: config.main_fields.clone(),
      preserve_symlinks: config.preserve_symlinks,
    }
  }

  fn resolve_file(&self, candidate: &Path) -> Option<PathBuf> {
    if self.file_system.is_file(candidate) {
      return Some(candidate.to_path_buf());
    }

    let mut with_css = candidate.as_os_str().to_owned();
    with_css.push(".css");
    let with_css = PathBuf::from(with_css);
    if self.file_system.is_file(&with_css) {
      return Some(with_css);
    }

    let index = candidate.join("index.css");
    if self.file_system.is_dir(candidate) && self.file_system.is_file(&index) {
      return Some(index);
    }

    None
  }

  fn resolve_package(&self, specifier: &str, resolve_dir: &Path) -> Option<PathBuf> {
    let (name, subpath) = split_package_specifier(specifier);

    for dir in resolve_dir.ancestors() {
      let package_dir = dir.join("node_modules").join(name);
      if !self.file_system.is_dir(&package_dir) {
        continue;
      }

      tracing::trace!(package = name, dir = ?package_dir, "Found package");
      return self.resolve_in_package(&package_dir, subpath);
    }

    None
  }

  fn resolve_in_package(&self, package_dir: &Path, subpath: &str) -> Option<PathBuf> {
    let package_json = self.read_package_json(package_dir);

    let export_key = if subpath.is_empty() {
      ".".to_string()
    } else {
      format!("./{subpath}")
    };

    if let Some(exports) = package_json.as_ref().and_then(|json| json.get("exports")) {
      if let Some(target) = self.resolve_exports(exports, &export_key) {
        return self.resolve_file(&package_dir.join(target));
      }
    }

    if !subpath.is_empty() {
      return self.resolve_file(&package_dir.join(subpath));
    }

    if let Some(package_json) = &package_json {
      for field in &self.main_fields {
        let Some(entry) = package_json.get(field).and_then(Value::as_str) else {
          continue;
        };

        if let Some(path) = self.resolve_file(&package_dir.join(entry)) {
          return Some(path);
        }
      }
    }

    self.resolve_file(&package_dir.join("index.css"))
  }

  fn read_package_json(&self, package_dir: &Path) -> Option<Value> {
    let contents = self
      .file_system
      .read_to_string(&package_dir.join("package.json"))
      .ok()?;

    match serde_json::from_str(&contents) {
      Ok(json) => Some(json),
      Err(error) => {
        tracing::debug!(dir = ?package_dir, %error, "Ignoring invalid package.json");
        None
      }
    }
  }

  fn resolve_exports<'a>(&self, exports: &'a Value, key: &str) -> Option<&'a str> {
    let entry = match exports {
      Value::Object(map) if map.keys().any(|k| k.starts_with('.')) => map.get(key)?,
      _ if key == "." => exports,
      _ => return None,
    };

    self.resolve_conditions(entry)
  }

  fn resolve_conditions<'a>(&self, value: &'a Value) -> Option<&'a str> {
    match value {
      Value::String(target) => Some(target),
      Value::Object(map) => map
        .iter()
        .filter(|(condition, _)| {
          condition.as_str() == "default" || self.conditions.contains(*condition)
        })
        .find_map(|(_, target)| self.resolve_conditions(target)),
      Value::Array(targets) => targets
        .iter()
        .find_map(|target| self.resolve_conditions(target)),
      _ => None,
    }
  }

  fn finalize(&self, path: PathBuf) -> PathBuf {
    if self.preserve_symlinks {
      return path;
    }

    self.file_system.canonicalize(&path).unwrap_or(path)
  }
}

impl Resolver for PathResolver {
  fn resolve(&self, specifier: &str, resolve_dir: &Path) -> anyhow::Result<PathBuf> {
    let path = Path::new(specifier);
    let resolved = if path.is_absolute() {
      self.resolve_file(path)
    } else if is_relative(specifier) {
      self.resolve_file(&resolve_dir.join(path))
    } else {
      self
        .resolve_file(&resolve_dir.join(path))
        .or_else(|| self.resolve_package(specifier, resolve_dir))
    };

    match resolved {
      Some(resolved) => Ok(self.finalize(resolved)),
      None => Err(Diagnostic::new(format!("Could not resolve \"{specifier}\"")).into()),
    }
  }
}

fn is_relative(specifier: &str) -> bool {
  specifier == "." || specifier == ".." || specifier.starts_with("./") || specifier.starts_with("../")
}

/// Splits `@scope/name/sub/path` into `(@scope/name, sub/path)`
fn split_package_specifier(specifier: &str) -> (&str, &str) {
  let name_segments = if specifier.starts_with('@') { 2 } else { 1 };

  let mut end = 0;
  for (index, segment) in specifier.split('/').enumerate() {
    if index == name_segments {
      break;
    }
    end += segment.len() + usize::from(index > 0);
  }

  let name = &specifier[..end];
  let subpath = specifier[end..].trim_start_matches('/');
  (name, subpath)
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use pretty_assertions::assert_eq;
  use stylepack_filesystem::in_memory_file_system::InMemoryFileSystem;
  use stylepack_filesystem::FileSystem;

  use super::*;

  fn resolver(files: &[(&str, &str)]) -> PathResolver {
    let fs = InMemoryFileSystem::default();
    for (path, contents) in files {
      fs.write(Path::new(path), contents.as_bytes()).unwrap();
    }

    PathResolver::new(
      Arc::new(fs),
      &BundleConfig {
        conditions: vec!["style".into(), "sass".into()],
        main_fields: vec!["style".into(), "sass".into()],
        ..BundleConfig::default()
      },
    )
  }

  fn resolve(resolver: &PathResolver, specifier: &str) -> anyhow::Result<PathBuf> {
    resolver.resolve(specifier, Path::new("/project/src"))
  }

  #[test]
  fn splits_package_specifiers() {
    assert_eq!(split_package_specifier("theme"), ("theme", ""));
    assert_eq!(split_package_specifier("theme/dark.css"), ("theme", "dark.css"));
    assert_eq!(split_package_specifier("@acme/theme"), ("@acme/theme", ""));
    assert_eq!(
      split_package_specifier("@acme/theme/a/b.css"),
      ("@acme/theme", "a/b.css")
    );
  }

  #[test]
  fn resolves_relative_and_absolute_files() {
    let resolver = resolver(&[("/project/src/a.css", ""), ("/project/shared/b.css", "")]);

    assert_eq!(
      resolve(&resolver, "./a.css").unwrap(),
      PathBuf::from("/project/src/a.css")
    );
    assert_eq!(
      resolve(&resolver, "../shared/b.css").unwrap(),
      PathBuf::from("/project/shared/b.css")
    );
    assert_eq!(
      resolve(&resolver, "/project/shared/b.css").unwrap(),
      PathBuf::from("/project/shared/b.css")
    );
  }

  #[test]
  fn tries_css_extension_and_directory_index() {
    let resolver = resolver(&[("/project/src/a.css", ""), ("/project/src/theme/index.css", "")]);

    assert_eq!(
      resolve(&resolver, "./a").unwrap(),
      PathBuf::from("/project/src/a.css")
    );
    assert_eq!(
      resolve(&resolver, "./theme").unwrap(),
      PathBuf::from("/project/src/theme/index.css")
    );
  }

  #[test]
  fn resolves_packages_through_exports_conditions() {
    let resolver = resolver(&[
      (
        "/project/node_modules/theme/package.json",
        r#"{ "exports": { ".": { "style": "./dist/theme.css", "default": "./index.js" } } }"#,
      ),
      ("/project/node_modules/theme/dist/theme.css", ""),
    ]);

    assert_eq!(
      resolve(&resolver, "theme").unwrap(),
      PathBuf::from("/project/node_modules/theme/dist/theme.css")
    );
  }

  #[test]
  fn resolves_packages_through_main_fields() {
    let resolver = resolver(&[
      (
        "/project/node_modules/@acme/grid/package.json",
        r#"{ "main": "index.js", "style": "grid.css" }"#,
      ),
      ("/project/node_modules/@acme/grid/grid.css", ""),
    ]);

    assert_eq!(
      resolve(&resolver, "@acme/grid").unwrap(),
      PathBuf::from("/project/node_modules/@acme/grid/grid.css")
    );
  }

  #[test]
  fn resolves_package_subpaths() {
    let resolver = resolver(&[
      ("/project/node_modules/theme/package.json", "{}"),
      ("/project/node_modules/theme/dark.css", ""),
    ]);

    assert_eq!(
      resolve(&resolver, "theme/dark.css").unwrap(),
      PathBuf::from("/project/node_modules/theme/dark.css")
    );
  }

  #[test]
  fn bare_specifiers_prefer_files_next_to_the_stylesheet() {
    let resolver = resolver(&[
      ("/project/src/logo.png", "png"),
      ("/project/src/theme.css", ""),
      ("/project/node_modules/theme.css/index.css", ""),
      ("/project/node_modules/grid/index.css", ""),
    ]);

    assert_eq!(
      resolve(&resolver, "logo.png").unwrap(),
      PathBuf::from("/project/src/logo.png")
    );
    assert_eq!(
      resolve(&resolver, "theme.css").unwrap(),
      PathBuf::from("/project/src/theme.css")
    );
    assert_eq!(
      resolve(&resolver, "grid").unwrap(),
      PathBuf::from("/project/node_modules/grid/index.css")
    );
  }

  #[test]
  fn failures_are_diagnostics() {
    let resolver = resolver(&[]);

    let error = resolve(&resolver, "./missing.png").unwrap_err();
    let diagnostic = error.downcast::<Diagnostic>().unwrap();

    assert_eq!(diagnostic.message, "Could not resolve \"./missing.png\"");
  }

  #[test]
  fn tilde_specifiers_are_not_special() {
    let resolver = resolver(&[("/project/node_modules/theme/index.css", "")]);

    assert!(resolve(&resolver, "~theme").is_err());
    assert!(resolve(&resolver, "theme").is_ok());
  }
}
