use std::path::Path;
use std::path::PathBuf;

use path_slash::PathExt;

pub const DEFAULT_ENTRY_NAMES: &str = "[name]";
pub const DEFAULT_ASSET_NAMES: &str = "[name]-[hash]";

/// Values substituted into an output naming template
pub struct OutputName<'a> {
  /// File stem of the source module
  pub name: &'a str,
  /// Directory of the source module relative to the working directory
  pub dir: &'a str,
  pub hash: &'a str,
}

/// Renders a naming template into a path relative to the output directory
///
/// Empty and `.` segments are dropped so an empty `[dir]` never produces an absolute path.
pub fn render_output_name(template: &str, values: &OutputName<'_>) -> PathBuf {
  let rendered = template
    .replace("[name]", values.name)
    .replace("[dir]", values.dir)
    .replace("[hash]", values.hash);

  rendered
    .split(['/', '\\'])
    .filter(|segment| !segment.is_empty() && *segment != ".")
    .collect()
}

/// File stem of the last path segment of a module path
///
/// Works for plugin defined paths too, which are not required to be real paths.
pub fn module_name(path: &str) -> &str {
  let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);

  match file_name.rfind('.') {
    Some(index) if index > 0 => &file_name[..index],
    _ => file_name,
  }
}

/// Directory of `path` relative to `working_dir`, or empty when it lives elsewhere
pub fn module_dir(path: &Path, working_dir: &Path) -> String {
  path
    .parent()
    .and_then(|parent| parent.strip_prefix(working_dir).ok())
    .map(|dir| dir.to_slash_lossy().into_owned())
    .unwrap_or_default()
}

pub fn with_extension(path: PathBuf, extension: &str) -> PathBuf {
  if extension.is_empty() {
    return path;
  }

  let mut path = path.into_os_string();
  path.push(".");
  path.push(extension);
  PathBuf::from(path)
}
