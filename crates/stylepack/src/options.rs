use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use stylepack_core::component_style::InlineComponentData;
use stylepack_core::types::BundleConfig;
use stylepack_core::types::Platform;
use stylepack_core::types::SourceMapMode;
use stylepack_plugin_css_resource::CssResourcePlugin;
use stylepack_plugin_sass::SassPlugin;
use stylepack_plugin_sass::SassPluginOptions;

/// How stylesheets of one compilation are bundled
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BundleStylesheetOptions {
  /// Root that outputs and names are relative to
  pub workspace_root: PathBuf,

  /// Minify the output
  pub optimization: bool,

  pub preserve_symlinks: Option<bool>,

  pub sourcemap: SourcemapOption,

  pub output_names: OutputNames,

  /// Extra directories the preprocessor searches for imports
  pub include_paths: Vec<PathBuf>,

  /// Specifiers that are never resolved or inlined
  pub external_dependencies: Vec<String>,

  /// Target environment descriptors such as `chrome90`
  pub target: Vec<String>,
}

/// `true`, `false`, `"external"` or `"inline"`
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SourcemapOption {
  Enabled(bool),
  Mode(SourcemapKind),
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SourcemapKind {
  /// A map file that the CSS does not reference
  External,
  /// A map embedded in the CSS
  Inline,
}

impl Default for SourcemapOption {
  fn default() -> Self {
    SourcemapOption::Enabled(false)
  }
}

impl SourcemapOption {
  pub fn is_enabled(&self) -> bool {
    !matches!(self, SourcemapOption::Enabled(false))
  }

  pub fn mode(&self) -> SourceMapMode {
    match self {
      SourcemapOption::Enabled(false) => SourceMapMode::None,
      SourcemapOption::Enabled(true) => SourceMapMode::Linked,
      SourcemapOption::Mode(SourcemapKind::External) => SourceMapMode::External,
      SourcemapOption::Mode(SourcemapKind::Inline) => SourceMapMode::Inline,
    }
  }
}

/// Naming templates for emitted files, without extensions
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct OutputNames {
  /// Template for the CSS output
  pub bundles: String,
  /// Template for resources referenced from the CSS
  pub media: String,
}

impl Default for OutputNames {
  fn default() -> Self {
    OutputNames {
      bundles: "[name]".into(),
      media: "media/[name]-[hash]".into(),
    }
  }
}

/// Conditions and package.json fields that prefer style entry points over script ones
const STYLE_CONDITIONS: [&str; 2] = ["style", "sass"];

/// Builds the bundler configuration shared by every stylesheet of a compilation
///
/// The returned config has no entry points. Its plugins always run the preprocessor before
/// resource resolution so that `url()` tokens produced by preprocessing are resolved too.
pub fn create_stylesheet_bundle_options(
  options: &BundleStylesheetOptions,
  inline_component_data: Option<InlineComponentData>,
) -> BundleConfig {
  let style_conditions: Vec<String> = STYLE_CONDITIONS.iter().map(|c| c.to_string()).collect();

  BundleConfig {
    working_dir: options.workspace_root.clone(),
    outdir: options.workspace_root.clone(),
    entry_points: Vec::new(),
    entry_names: options.output_names.bundles.clone(),
    asset_names: options.output_names.media.clone(),
    minify: options.optimization,
    sourcemap: options.sourcemap.mode(),
    write: false,
    platform: Platform::Browser,
    target: options.target.clone(),
    external: options.external_dependencies.clone(),
    preserve_symlinks: options.preserve_symlinks.unwrap_or(false),
    conditions: style_conditions.clone(),
    main_fields: style_conditions,
    plugins: vec![
      Arc::new(SassPlugin::new(SassPluginOptions {
        sourcemap: options.sourcemap.is_enabled(),
        load_paths: options.include_paths.clone(),
        inline_component_data,
      })),
      Arc::new(CssResourcePlugin::new()),
    ],
  }
}
