use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;

use crate::plugin::BundlerPlugin;

/// How a source map should be produced for each CSS output
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SourceMapMode {
  #[default]
  None,
  /// Emit a `.map` file and reference it from a `sourceMappingURL` comment
  Linked,
  /// Emit a `.map` file without referencing it from the CSS
  External,
  /// Embed the map into the CSS as a base64 data URL
  Inline,
}

impl SourceMapMode {
  pub fn is_enabled(&self) -> bool {
    !matches!(self, SourceMapMode::None)
  }
}

/// The environment the output is meant for
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
  /// Target descriptors are turned into browser targets for syntax lowering and prefixing
  #[default]
  Browser,
  /// Target descriptors are ignored
  Neutral,
}

/// The full set of directives given to the bundler for one operation
///
/// Built fresh per bundle operation and never shared between operations.
#[derive(Clone, Debug, Default)]
pub struct BundleConfig {
  /// Root that relative entry points and names are resolved against
  pub working_dir: PathBuf,

  /// Directory the output paths are placed in
  pub outdir: PathBuf,

  /// Specifiers the build starts from
  pub entry_points: Vec<String>,

  /// Naming template for CSS outputs, without extension
  ///
  /// Supports the `[name]`, `[dir]` and `[hash]` placeholders.
  pub entry_names: String,

  /// Naming template for emitted resources, without extension
  pub asset_names: String,

  pub minify: bool,

  pub sourcemap: SourceMapMode,

  /// Persist outputs through the file system in addition to returning them
  pub write: bool,

  pub platform: Platform,

  /// Target environment descriptors, e.g. `chrome90` or `safari 14`
  pub target: Vec<String>,

  /// Specifiers that are never resolved or inlined
  pub external: Vec<String>,

  /// Do not follow symlinks when resolving files
  pub preserve_symlinks: bool,

  /// Export conditions used for package.json `exports`, in priority order
  pub conditions: Vec<String>,

  /// package.json fields used to find a package entry, in priority order
  pub main_fields: Vec<String>,

  /// Plugins in the order their hooks are consulted
  pub plugins: Vec<Arc<dyn BundlerPlugin>>,
}
