use std::path::Path;
use std::path::PathBuf;

use grass::InputSyntax;
use grass::Options;
use grass::OutputStyle;
use stylepack_core::component_style::ComponentStyleSpecifier;
use stylepack_core::component_style::InlineComponentData;
use stylepack_core::component_style::COMPONENT_STYLE_NAMESPACE;
use stylepack_core::diagnostic::CodeFrame;
use stylepack_core::diagnostic::Diagnostic;
use stylepack_core::plugin::BundlerPlugin;
use stylepack_core::plugin::HookFilter;
use stylepack_core::plugin::LoadResult;
use stylepack_core::plugin::PluginBuild;
use stylepack_core::plugin::FILE_NAMESPACE;
use stylepack_core::types::StylesheetLanguage;
use stylepack_filesystem::FileSystemRef;

use crate::build_fs::BuildFs;

const PLUGIN_NAME: &str = "stylepack-sass";

#[derive(Clone, Debug, Default)]
pub struct SassPluginOptions {
  /// Produce output suited for source mapping instead of compressed output
  pub sourcemap: bool,

  /// Directories searched for `@use` and `@import`, after the stylesheet's own directory
  pub load_paths: Vec<PathBuf>,

  /// Inline component stylesheets keyed by their encoded specifier
  pub inline_component_data: Option<InlineComponentData>,
}

/// Compiles `.scss` and `.sass` stylesheets to CSS with grass
///
/// Stylesheets on the file system are claimed by extension. Inline component stylesheets
/// are claimed in the component namespace when their language segment names a Sass syntax,
/// their text is looked up in `inline_component_data`.
#[derive(Debug)]
pub struct SassPlugin {
  options: SassPluginOptions,
}

impl SassPlugin {
  pub fn new(options: SassPluginOptions) -> Self {
    SassPlugin { options }
  }
}

impl BundlerPlugin for SassPlugin {
  fn name(&self) -> &str {
    PLUGIN_NAME
  }

  fn setup(&self, build: &mut PluginBuild) -> anyhow::Result<()> {
    let compiler = SassCompiler {
      file_system: build.file_system(),
      load_paths: self.options.load_paths.clone(),
      expanded: self.options.sourcemap,
    };

    if let Some(data) = self.options.inline_component_data.clone() {
      let compiler = compiler.clone();
      let working_dir = build.working_dir().to_path_buf();
      let filter = HookFilter::new(&ComponentStyleSpecifier::language_pattern(&[
        StylesheetLanguage::Scss,
        StylesheetLanguage::Sass,
      ]))?
      .in_namespace(COMPONENT_STYLE_NAMESPACE);

      build.on_load(filter, move |args| {
        let specifier = ComponentStyleSpecifier::decode(&args.path)?;
        let Some(source) = data.get(&args.path) else {
          return Err(
            Diagnostic::new(format!(
              "No inline data was provided for component stylesheet \"{}\"",
              specifier.identifier
            ))
            .with_origin(PLUGIN_NAME)
            .into(),
          );
        };

        let resolve_dir = working_dir.join(specifier.resolve_dir());
        let compiled = compiler.compile(
          SassSource::Inline(source),
          syntax(specifier.language),
          &resolve_dir,
          &working_dir.join(&specifier.filename),
        )?;

        Ok(Some(
          LoadResult::css(compiled.css)
            .with_resolve_dir(resolve_dir)
            .with_watch_files(compiled.read_files),
        ))
      });
    }

    build.on_load(
      HookFilter::new(r"\.s[ac]ss$")?.in_namespace(FILE_NAMESPACE),
      move |args| {
        let path = PathBuf::from(&args.path);
        let language = path
          .extension()
          .and_then(|extension| extension.to_str())
          .and_then(StylesheetLanguage::from_extension)
          .unwrap_or(StylesheetLanguage::Scss);
        let resolve_dir = path
          .parent()
          .map(Path::to_path_buf)
          .unwrap_or_else(|| PathBuf::from("/"));

        let compiled = compiler.compile(
          SassSource::File(&path),
          syntax(language),
          &resolve_dir,
          &path,
        )?;

        Ok(Some(
          LoadResult::css(compiled.css)
            .with_resolve_dir(resolve_dir)
            .with_watch_files(compiled.read_files),
        ))
      },
    );

    Ok(())
  }
}

enum SassSource<'a> {
  Inline(&'a str),
  File(&'a Path),
}

struct CompiledSheet {
  css: String,
  read_files: Vec<PathBuf>,
}

#[derive(Clone, Debug)]
struct SassCompiler {
  file_system: FileSystemRef,
  load_paths: Vec<PathBuf>,
  expanded: bool,
}

impl SassCompiler {
  #[tracing::instrument(level = "debug", skip_all, fields(filename = ?filename))]
  fn compile(
    &self,
    source: SassSource<'_>,
    syntax: InputSyntax,
    base_dir: &Path,
    filename: &Path,
  ) -> anyhow::Result<CompiledSheet> {
    let fs = BuildFs::new(self.file_system.clone());

    let mut load_paths = vec![base_dir.to_path_buf()];
    load_paths.extend(self.load_paths.iter().cloned());

    let style = if self.expanded {
      OutputStyle::Expanded
    } else {
      OutputStyle::Compressed
    };

    let options = Options::default()
      .fs(&fs)
      .load_paths(&load_paths)
      .style(style)
      .input_syntax(syntax);

    let compiled = match source {
      SassSource::Inline(text) => grass::from_string(text.to_string(), &options),
      SassSource::File(path) => grass::from_path(path, &options),
    };

    let css = compiled.map_err(|error| {
      Diagnostic::new(error.to_string())
        .with_origin(PLUGIN_NAME)
        .with_code_frame(CodeFrame::from(filename.to_path_buf()))
    })?;

    Ok(CompiledSheet {
      css,
      read_files: fs.read_files(),
    })
  }
}

fn syntax(language: StylesheetLanguage) -> InputSyntax {
  match language {
    StylesheetLanguage::Sass => InputSyntax::Sass,
    StylesheetLanguage::Scss => InputSyntax::Scss,
    StylesheetLanguage::Css => InputSyntax::Css,
  }
}
