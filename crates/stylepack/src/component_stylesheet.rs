use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use stylepack_core::bundler::Bundler;
use stylepack_core::component_style::ComponentStyleSpecifier;
use stylepack_core::component_style::COMPONENT_STYLE_NAMESPACE;
use stylepack_core::diagnostic::Diagnostic;
use stylepack_core::diagnostic::Diagnostics;
use stylepack_core::plugin::BundlerPlugin;
use stylepack_core::plugin::HookFilter;
use stylepack_core::plugin::LoadResult;
use stylepack_core::plugin::PluginBuild;
use stylepack_core::plugin::ResolveKind;
use stylepack_core::plugin::ResolveResult;
use stylepack_core::types::BundleResult;
use stylepack_core::types::OutputFile;
use stylepack_core::types::StylesheetLanguage;

use crate::options::create_stylesheet_bundle_options;
use crate::options::BundleStylesheetOptions;

/// One stylesheet of a component
#[derive(Clone, Debug, PartialEq)]
pub struct StylesheetRequest {
  /// Unique per component stylesheet within one compilation
  pub identifier: String,

  pub language: StylesheetLanguage,

  /// The stylesheet text, only read when `inline` is set
  pub data: String,

  /// Location of the stylesheet, used as the base of relative references
  pub filename: PathBuf,

  /// The text has no file of its own
  pub inline: bool,
}

/// The outcome of bundling one component stylesheet
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComponentStylesheetResult {
  pub errors: Vec<Diagnostic>,

  pub warnings: Vec<Diagnostic>,

  /// The final CSS, empty when bundling failed
  pub contents: String,

  pub map: Option<String>,

  /// Output label of the CSS, never written to disk
  pub path: Option<PathBuf>,

  /// Resources referenced from the CSS, in emit order
  pub resource_files: Vec<OutputFile>,

  /// Every real file read while bundling
  pub referenced_files: Vec<PathBuf>,
}

impl ComponentStylesheetResult {
  /// Turns the errors of the result into an `Err`
  pub fn into_result(self) -> Result<Self, Diagnostics> {
    if self.errors.is_empty() {
      Ok(self)
    } else {
      Err(Diagnostics::from(self.errors))
    }
  }
}

/// Bundles one component stylesheet
///
/// The stylesheet enters the bundler through a synthetic entry point specifier. Inline
/// stylesheets are loaded from memory, others from `filename`. Compile problems are
/// reported in the result; an `Err` means the bundler itself failed.
#[tracing::instrument(
  level = "debug",
  skip_all,
  fields(identifier = %request.identifier, language = %request.language, inline = request.inline)
)]
pub async fn bundle_component_stylesheet(
  bundler: &dyn Bundler,
  request: StylesheetRequest,
  options: &BundleStylesheetOptions,
) -> anyhow::Result<ComponentStylesheetResult> {
  let specifier = ComponentStyleSpecifier::new(
    request.language,
    request.identifier.clone(),
    request.filename.clone(),
  );
  let entry_point = specifier.encode();

  let inline_component_data = Arc::new(HashMap::from([(
    entry_point.clone(),
    request.data.clone(),
  )]));

  let mut config = create_stylesheet_bundle_options(options, Some(inline_component_data));
  config.entry_points = vec![entry_point];
  config.plugins.push(Arc::new(ComponentStylesheetPlugin {
    specifier,
    data: request.data,
    inline: request.inline,
  }));

  let result = bundler.bundle(config).await?;

  Ok(classify_outputs(result))
}

/// Sorts the bundler outputs into CSS, source map and resources by file name
///
/// When more than one CSS file is emitted the last one wins.
fn classify_outputs(result: BundleResult) -> ComponentStylesheetResult {
  let mut stylesheet = ComponentStylesheetResult {
    errors: result.errors,
    warnings: result.warnings,
    referenced_files: result.inputs,
    ..ComponentStylesheetResult::default()
  };

  let mut css_outputs = 0;
  for file in result.output_files {
    let file_name = file.file_name().into_owned();

    if file_name.ends_with(".css.map") {
      stylesheet.map = Some(file.text().into_owned());
    } else if file_name.ends_with(".css") {
      css_outputs += 1;
      stylesheet.contents = file.text().into_owned();
      stylesheet.path = Some(file.path);
    } else {
      stylesheet.resource_files.push(file);
    }
  }

  if css_outputs > 1 {
    tracing::warn!(
      count = css_outputs,
      path = ?stylesheet.path,
      "Bundler emitted more than one stylesheet, keeping the last one"
    );
  }

  stylesheet
}

/// Routes the synthetic entry point of one component stylesheet to its contents
#[derive(Debug)]
struct ComponentStylesheetPlugin {
  specifier: ComponentStyleSpecifier,
  data: String,
  inline: bool,
}

impl BundlerPlugin for ComponentStylesheetPlugin {
  fn name(&self) -> &str {
    "stylepack-component-stylesheet"
  }

  fn setup(&self, build: &mut PluginBuild) -> anyhow::Result<()> {
    let specifier = self.specifier.clone();
    let inline = self.inline;
    let filename = build.working_dir().join(&self.specifier.filename);

    build.on_resolve(
      HookFilter::new(&ComponentStyleSpecifier::prefix_pattern())?,
      move |args| {
        if args.kind != ResolveKind::EntryPoint || !is_specifier(&args.path, &specifier) {
          return Ok(None);
        }

        if inline {
          Ok(Some(ResolveResult::in_namespace(
            args.path.clone(),
            COMPONENT_STYLE_NAMESPACE,
          )))
        } else {
          Ok(Some(ResolveResult::file(&filename)))
        }
      },
    );

    let specifier = self.specifier.clone();
    let data = self.data.clone();
    let resolve_dir = build.working_dir().join(self.specifier.resolve_dir());

    build.on_load(
      HookFilter::new(&ComponentStyleSpecifier::language_pattern(&[
        StylesheetLanguage::Css,
      ]))?
      .in_namespace(COMPONENT_STYLE_NAMESPACE),
      move |args| {
        if !is_specifier(&args.path, &specifier) {
          return Ok(None);
        }

        Ok(Some(
          LoadResult::css(data.clone()).with_resolve_dir(resolve_dir.clone()),
        ))
      },
    );

    Ok(())
  }
}

/// Whether `path` decodes to `specifier`; specifiers of other components are left alone
fn is_specifier(path: &str, specifier: &ComponentStyleSpecifier) -> bool {
  match ComponentStyleSpecifier::decode(path) {
    Ok(decoded) => decoded == *specifier,
    Err(error) => {
      tracing::debug!(path, %error, "Ignoring malformed component style specifier");
      false
    }
  }
}
