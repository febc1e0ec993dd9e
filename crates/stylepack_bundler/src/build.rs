use std::collections::HashSet;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::RwLock;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use indexmap::IndexMap;
use indexmap::IndexSet;
use lightningcss::dependencies::Dependency;
use lightningcss::dependencies::DependencyOptions;
use lightningcss::error::Error as CssError;
use lightningcss::printer::PrinterOptions;
use lightningcss::stylesheet::MinifyOptions;
use lightningcss::stylesheet::ParserOptions;
use lightningcss::stylesheet::StyleSheet;
use lightningcss::targets::Targets;
use parcel_sourcemap::SourceMap;
use path_slash::PathExt;
use stylepack_core::diagnostic::CodeFrame;
use stylepack_core::diagnostic::CodeHighlight;
use stylepack_core::diagnostic::Diagnostic;
use stylepack_core::diagnostic::Location;
use stylepack_core::hash::content_hash;
use stylepack_core::plugin::HookError;
use stylepack_core::plugin::LoadArgs;
use stylepack_core::plugin::LoadResult;
use stylepack_core::plugin::Loader;
use stylepack_core::plugin::PluginBuild;
use stylepack_core::plugin::PluginHooks;
use stylepack_core::plugin::ResolveArgs;
use stylepack_core::plugin::ResolveKind;
use stylepack_core::plugin::ResolveResult;
use stylepack_core::plugin::FILE_NAMESPACE;
use stylepack_core::resolver::Resolver;
use stylepack_core::types::BundleConfig;
use stylepack_core::types::BundleResult;
use stylepack_core::types::OutputFile;
use stylepack_core::types::SourceMapMode;
use stylepack_filesystem::FileSystemRef;

use crate::output_names::module_dir;
use crate::output_names::module_name;
use crate::output_names::render_output_name;
use crate::output_names::with_extension;
use crate::output_names::OutputName;
use crate::output_names::DEFAULT_ASSET_NAMES;
use crate::output_names::DEFAULT_ENTRY_NAMES;
use crate::path_resolver::PathResolver;
use crate::targets::targets_for;

/// Identity of a module within a build
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
struct ModuleKey {
  namespace: String,
  path: String,
}

impl Display for ModuleKey {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    if self.namespace == FILE_NAMESPACE {
      write!(f, "{}", self.path)
    } else {
      write!(f, "{}:{}", self.namespace, self.path)
    }
  }
}

struct LoadedModule {
  key: ModuleKey,
  contents: Vec<u8>,
  loader: Loader,
  resolve_dir: PathBuf,
}

/// A printed stylesheet, or a wrapper line around inlined imports
struct SheetChunk {
  code: String,
  map: Option<SourceMap>,
}

impl SheetChunk {
  fn text(code: impl Into<String>) -> Self {
    SheetChunk {
      code: code.into(),
      map: None,
    }
  }
}

/// Per entry point walk state
struct EntryState {
  output_dir: PathBuf,
  chunks: Vec<SheetChunk>,
  external_imports: Vec<String>,
  visiting: Vec<ModuleKey>,
  included: HashSet<ModuleKey>,
}

/// One bundle operation
///
/// Errors and warnings are collected rather than returned so a single failing import does
/// not hide the other problems of the build.
pub(crate) struct Build {
  config: BundleConfig,
  file_system: FileSystemRef,
  hooks: PluginHooks,
  resolver: Arc<PathResolver>,
  targets: Targets,
  assets: IndexMap<ModuleKey, PathBuf>,
  outputs: Vec<OutputFile>,
  errors: Vec<Diagnostic>,
  warnings: Vec<Diagnostic>,
  inputs: IndexSet<PathBuf>,
}

impl Build {
  /// Prepares a build, running the setup of every plugin in order
  pub fn new(file_system: FileSystemRef, config: BundleConfig) -> anyhow::Result<Self> {
    let resolver = Arc::new(PathResolver::new(Arc::clone(&file_system), &config));
    let targets = targets_for(&config)?;

    let mut plugin_build = PluginBuild::new(
      Arc::clone(&file_system),
      resolver.clone(),
      config.working_dir.clone(),
    );

    for plugin in &config.plugins {
      plugin_build.register(plugin.as_ref())?;
    }

    Ok(Build {
      hooks: plugin_build.into_hooks(),
      config,
      file_system,
      resolver,
      targets,
      assets: IndexMap::new(),
      outputs: Vec::new(),
      errors: Vec::new(),
      warnings: Vec::new(),
      inputs: IndexSet::new(),
    })
  }

  pub fn run(mut self) -> BundleResult {
    tracing::debug!(
      entry_points = ?self.config.entry_points,
      outdir = ?self.config.outdir,
      "Starting stylesheet build"
    );

    let mut bundles = Vec::new();
    for entry_point in self.config.entry_points.clone() {
      if let Some(files) = self.bundle_entry(&entry_point) {
        bundles.extend(files);
      }
    }

    let mut output_files = std::mem::take(&mut self.outputs);
    output_files.extend(bundles);

    if self.config.write && self.errors.is_empty() {
      self.write_outputs(&output_files);
    }

    if !self.errors.is_empty() {
      output_files.clear();
    }

    tracing::debug!(
      outputs = output_files.len(),
      errors = self.errors.len(),
      warnings = self.warnings.len(),
      "Finished stylesheet build"
    );

    BundleResult {
      output_files,
      errors: self.errors,
      warnings: self.warnings,
      inputs: self.inputs.into_iter().collect(),
    }
  }

  #[tracing::instrument(level = "debug", skip_all, fields(entry_point = specifier))]
  fn bundle_entry(&mut self, specifier: &str) -> Option<Vec<OutputFile>> {
    let errors_before = self.errors.len();

    let resolved = self.resolve(&ResolveArgs {
      path: specifier.to_string(),
      importer: None,
      namespace: FILE_NAMESPACE.into(),
      resolve_dir: self.config.working_dir.clone(),
      kind: ResolveKind::EntryPoint,
    })?;

    if resolved.external {
      self.errors.push(Diagnostic::new(format!(
        "The entry point \"{specifier}\" cannot be marked as external"
      )));
      return None;
    }

    let module = self.load(&resolved, None)?;
    if module.loader != Loader::Css {
      self.errors.push(Diagnostic::new(format!(
        "The entry point \"{specifier}\" is not a stylesheet"
      )));
      return None;
    }

    let name = module_name(&module.key.path).to_string();
    let dir = module_dir(Path::new(&module.key.path), &self.config.working_dir);
    let template = non_empty(&self.config.entry_names, DEFAULT_ENTRY_NAMES).to_string();

    let output_dir = self
      .config
      .outdir
      .join(render_output_name(
        &template,
        &OutputName {
          name: &name,
          dir: &dir,
          hash: "",
        },
      ))
      .parent()
      .map(Path::to_path_buf)
      .unwrap_or_else(|| self.config.outdir.clone());

    let mut state = EntryState {
      output_dir,
      chunks: Vec::new(),
      external_imports: Vec::new(),
      visiting: Vec::new(),
      included: HashSet::new(),
    };

    self.collect_sheet(module, &mut state);
    if self.errors.len() > errors_before {
      return None;
    }

    let (code, map) = self.join_chunks(state)?;
    let hash = content_hash(code.as_bytes());
    let css_path = with_extension(
      self.config.outdir.join(render_output_name(
        &template,
        &OutputName {
          name: &name,
          dir: &dir,
          hash: &hash,
        },
      )),
      "css",
    );

    self.finish_bundle(css_path, code, map)
  }

  /// Appends a stylesheet and everything it imports to the entry, imports first
  fn collect_sheet(&mut self, module: LoadedModule, state: &mut EntryState) {
    let key = module.key;
    if state.included.contains(&key) {
      return;
    }

    if state.visiting.contains(&key) {
      self.warnings.push(
        Diagnostic::new(format!("Import cycle detected at \"{key}\""))
          .with_code_frame(code_frame(&key)),
      );
      return;
    }

    let code = match String::from_utf8(module.contents) {
      Ok(code) => code,
      Err(_) => {
        self.errors.push(
          Diagnostic::new(format!("\"{key}\" is not valid UTF-8")).with_code_frame(code_frame(&key)),
        );
        return;
      }
    };

    state.visiting.push(key.clone());
    let chunk = self.print_sheet(&key, &code, &module.resolve_dir, state);
    state.visiting.pop();
    state.included.insert(key);

    if let Some(chunk) = chunk {
      state.chunks.push(chunk);
    }
  }

  fn print_sheet(
    &mut self,
    key: &ModuleKey,
    code: &str,
    resolve_dir: &Path,
    state: &mut EntryState,
  ) -> Option<SheetChunk> {
    tracing::trace!(module = %key, "Printing stylesheet");

    let filename = key.to_string();
    let project_root = self.config.working_dir.to_string_lossy().into_owned();
    let parser_warnings = Arc::new(RwLock::new(Vec::new()));

    let parsed = StyleSheet::parse(
      code,
      ParserOptions {
        filename: filename.clone(),
        error_recovery: true,
        warnings: Some(Arc::clone(&parser_warnings)),
        ..ParserOptions::default()
      },
    );

    let mut stylesheet = match parsed {
      Ok(stylesheet) => stylesheet,
      Err(error) => {
        self.errors.push(css_diagnostic(&error, key));
        return None;
      }
    };

    if let Ok(parser_warnings) = parser_warnings.read() {
      for warning in parser_warnings.iter() {
        self.warnings.push(css_diagnostic(warning, key));
      }
    }

    if self.config.minify {
      let minified = stylesheet.minify(MinifyOptions {
        targets: self.targets.clone(),
        ..MinifyOptions::default()
      });

      if let Err(error) = minified {
        self.errors.push(css_diagnostic(&error, key));
        return None;
      }
    }

    let mut source_map = self.config.sourcemap.is_enabled().then(|| {
      let mut source_map = SourceMap::new(&project_root);
      let source = source_map.add_source(&filename);
      if let Err(error) = source_map.set_source_content(source as usize, code) {
        tracing::debug!(module = %key, %error, "Could not embed source content");
      }
      source_map
    });

    let printed = stylesheet.to_css(PrinterOptions {
      minify: self.config.minify,
      source_map: source_map.as_mut(),
      project_root: Some(project_root.as_str()),
      targets: self.targets.clone(),
      analyze_dependencies: Some(DependencyOptions {
        remove_imports: true,
      }),
      ..PrinterOptions::default()
    });

    let printed = match printed {
      Ok(printed) => printed,
      Err(error) => {
        self.errors.push(css_diagnostic(&error, key));
        return None;
      }
    };

    let mut css = printed.code;
    for dependency in printed.dependencies.unwrap_or_default() {
      match dependency {
        Dependency::Import(import) => self.inline_import(
          key,
          resolve_dir,
          &import.url,
          import.media.as_deref(),
          import.supports.as_deref(),
          state,
        ),
        Dependency::Url(url) => {
          let replacement = self.resource_url(key, resolve_dir, &url.url, state);
          css = css.replace(&url.placeholder, &replacement);
        }
      }
    }

    Some(SheetChunk {
      code: css,
      map: source_map,
    })
  }

  fn inline_import(
    &mut self,
    importer: &ModuleKey,
    resolve_dir: &Path,
    url: &str,
    media: Option<&str>,
    supports: Option<&str>,
    state: &mut EntryState,
  ) {
    let Some(resolved) = self.resolve(&ResolveArgs {
      path: url.to_string(),
      importer: Some(importer.path.clone()),
      namespace: importer.namespace.clone(),
      resolve_dir: resolve_dir.to_path_buf(),
      kind: ResolveKind::ImportRule,
    }) else {
      return;
    };

    if resolved.external {
      state
        .external_imports
        .push(external_import_rule(&resolved.path, media, supports));
      return;
    }

    let Some(module) = self.load(&resolved, Some(importer)) else {
      return;
    };

    if module.loader != Loader::Css {
      self.errors.push(
        Diagnostic::new(format!(
          "Cannot import \"{url}\" because it is not a stylesheet"
        ))
        .with_code_frame(code_frame(importer)),
      );
      return;
    }

    if state.included.contains(&module.key) {
      return;
    }

    let wrappers: Vec<String> = [
      supports.map(|supports| format!("@supports ({supports}) {{")),
      media.map(|media| format!("@media {media} {{")),
    ]
    .into_iter()
    .flatten()
    .collect();

    for wrapper in &wrappers {
      state.chunks.push(SheetChunk::text(wrapper.clone()));
    }

    self.collect_sheet(module, state);

    for _ in &wrappers {
      state.chunks.push(SheetChunk::text("}"));
    }
  }

  /// Emits the resource behind a `url()` token and returns the URL to print in its place
  fn resource_url(
    &mut self,
    importer: &ModuleKey,
    resolve_dir: &Path,
    url: &str,
    state: &EntryState,
  ) -> String {
    if is_verbatim_url(url) {
      return url.to_string();
    }

    let (path, suffix) = split_url_suffix(url);
    let Some(resolved) = self.resolve(&ResolveArgs {
      path: path.to_string(),
      importer: Some(importer.path.clone()),
      namespace: importer.namespace.clone(),
      resolve_dir: resolve_dir.to_path_buf(),
      kind: ResolveKind::UrlToken,
    }) else {
      return url.to_string();
    };

    if resolved.external {
      return format!("{}{suffix}", resolved.path);
    }

    let Some(module) = self.load(&resolved, Some(importer)) else {
      return url.to_string();
    };

    let asset_path = self.emit_asset(module);
    let relative = pathdiff::diff_paths(&asset_path, &state.output_dir).unwrap_or(asset_path);
    let relative = relative.to_slash_lossy();

    if relative.starts_with("../") {
      format!("{relative}{suffix}")
    } else {
      format!("./{relative}{suffix}")
    }
  }

  fn emit_asset(&mut self, module: LoadedModule) -> PathBuf {
    if let Some(path) = self.assets.get(&module.key) {
      return path.clone();
    }

    let source = Path::new(&module.key.path);
    let extension = source
      .extension()
      .map(|extension| extension.to_string_lossy().into_owned())
      .unwrap_or_default();
    let dir = module_dir(source, &self.config.working_dir);
    let hash = content_hash(&module.contents);

    let path = with_extension(
      self.config.outdir.join(render_output_name(
        non_empty(&self.config.asset_names, DEFAULT_ASSET_NAMES),
        &OutputName {
          name: module_name(&module.key.path),
          dir: &dir,
          hash: &hash,
        },
      )),
      &extension,
    );

    tracing::debug!(source = %module.key, output = ?path, "Emitting resource");

    self.assets.insert(module.key, path.clone());
    self.outputs.push(OutputFile::new(path.clone(), module.contents));
    path
  }

  fn resolve(&mut self, args: &ResolveArgs) -> Option<ResolveResult> {
    if self.is_external(&args.path) {
      return Some(ResolveResult::external(args.path.clone()));
    }

    match self.hooks.resolve(args) {
      Ok(Some(result)) => return Some(result),
      Ok(None) => {}
      Err(error) => {
        self
          .errors
          .push(hook_diagnostic(error, args.importer.as_deref()));
        return None;
      }
    }

    match self.resolver.resolve(&args.path, &args.resolve_dir) {
      Ok(path) => Some(ResolveResult::file(&path)),
      Err(error) => {
        let mut diagnostic = Diagnostic::from_error(error);
        if let Some(importer) = &args.importer {
          diagnostic = diagnostic.with_code_frame(CodeFrame::from(PathBuf::from(importer)));
        }
        self.errors.push(diagnostic);
        None
      }
    }
  }

  fn load(
    &mut self,
    resolved: &ResolveResult,
    importer: Option<&ModuleKey>,
  ) -> Option<LoadedModule> {
    let args = LoadArgs {
      path: resolved.path.clone(),
      namespace: resolved.namespace.clone(),
    };

    let result = match self.hooks.load(&args) {
      Ok(Some(result)) => result,
      Ok(None) => self.load_file(&args, importer)?,
      Err(error) => {
        let importer = importer.map(ToString::to_string);
        self
          .errors
          .push(hook_diagnostic(error, importer.as_deref()));
        return None;
      }
    };

    for file in &result.watch_files {
      self.inputs.insert(file.clone());
    }

    let resolve_dir = result.resolve_dir.unwrap_or_else(|| {
      if args.namespace == FILE_NAMESPACE {
        Path::new(&args.path)
          .parent()
          .map(Path::to_path_buf)
          .unwrap_or_else(|| self.config.working_dir.clone())
      } else {
        self.config.working_dir.clone()
      }
    });

    Some(LoadedModule {
      key: ModuleKey {
        namespace: args.namespace,
        path: args.path,
      },
      contents: result.contents,
      loader: result.loader,
      resolve_dir,
    })
  }

  /// Reads a module from the file system when no load hook claimed it
  fn load_file(&mut self, args: &LoadArgs, importer: Option<&ModuleKey>) -> Option<LoadResult> {
    let importer_frame = importer.map(code_frame);

    if args.namespace != FILE_NAMESPACE {
      let mut diagnostic = Diagnostic::new(format!(
        "No loader is configured for \"{}\" in the \"{}\" namespace",
        args.path, args.namespace
      ));
      if let Some(frame) = importer_frame {
        diagnostic = diagnostic.with_code_frame(frame);
      }
      self.errors.push(diagnostic);
      return None;
    }

    let path = PathBuf::from(&args.path);
    match self.file_system.read(&path) {
      Ok(contents) => {
        let loader = match path.extension().and_then(|extension| extension.to_str()) {
          Some("css") => Loader::Css,
          _ => Loader::File,
        };

        Some(LoadResult {
          contents,
          loader,
          resolve_dir: None,
          watch_files: vec![path],
        })
      }
      Err(error) => {
        let mut diagnostic =
          Diagnostic::new(format!("Could not read \"{}\": {error}", path.display()));
        if let Some(frame) = importer_frame {
          diagnostic = diagnostic.with_code_frame(frame);
        }
        self.errors.push(diagnostic);
        None
      }
    }
  }

  /// Concatenates the chunks of an entry, shifting each chunk's mappings below the previous ones
  fn join_chunks(&mut self, state: EntryState) -> Option<(String, Option<SourceMap>)> {
    let mut code = String::new();
    for import in &state.external_imports {
      code.push_str(import);
      code.push('\n');
    }

    let mut lines = state.external_imports.len();
    let mut map = self.config.sourcemap.is_enabled().then(|| {
      SourceMap::new(&self.config.working_dir.to_string_lossy())
    });

    for mut chunk in state.chunks {
      if chunk.code.is_empty() {
        continue;
      }

      if let (Some(map), Some(chunk_map)) = (map.as_mut(), chunk.map.as_mut()) {
        if let Err(error) = map.add_sourcemap(chunk_map, lines as i64) {
          self
            .errors
            .push(Diagnostic::new(format!("Failed to merge source maps: {error}")));
          return None;
        }
      }

      code.push_str(&chunk.code);
      if !chunk.code.ends_with('\n') {
        code.push('\n');
      }
      lines += chunk.code.matches('\n').count() + usize::from(!chunk.code.ends_with('\n'));
    }

    Some((code, map))
  }

  fn finish_bundle(
    &mut self,
    css_path: PathBuf,
    mut code: String,
    map: Option<SourceMap>,
  ) -> Option<Vec<OutputFile>> {
    let Some(mut map) = map else {
      return Some(vec![OutputFile::new(css_path, code)]);
    };

    let json = match map.to_json(None) {
      Ok(json) => json,
      Err(error) => {
        self
          .errors
          .push(Diagnostic::new(format!("Failed to serialize source map: {error}")));
        return None;
      }
    };

    match self.config.sourcemap {
      SourceMapMode::Linked => {
        let map_path = with_extension(css_path.clone(), "map");
        let map_name = map_path
          .file_name()
          .map(|name| name.to_string_lossy().into_owned())
          .unwrap_or_default();
        code.push_str(&format!("/*# sourceMappingURL={map_name} */\n"));

        Some(vec![
          OutputFile::new(css_path, code),
          OutputFile::new(map_path, json),
        ])
      }
      SourceMapMode::External => {
        let map_path = with_extension(css_path.clone(), "map");
        Some(vec![
          OutputFile::new(css_path, code),
          OutputFile::new(map_path, json),
        ])
      }
      SourceMapMode::Inline => {
        code.push_str(&format!(
          "/*# sourceMappingURL=data:application/json;base64,{} */\n",
          STANDARD.encode(json)
        ));
        Some(vec![OutputFile::new(css_path, code)])
      }
      SourceMapMode::None => Some(vec![OutputFile::new(css_path, code)]),
    }
  }

  fn write_outputs(&mut self, output_files: &[OutputFile]) {
    for file in output_files {
      tracing::debug!(path = ?file.path, "Writing output");

      if let Err(error) = self.file_system.write(&file.path, &file.contents) {
        self.errors.push(Diagnostic::new(format!(
          "Failed to write \"{}\": {error}",
          file.path.display()
        )));
      }
    }
  }

  fn is_external(&self, specifier: &str) -> bool {
    self
      .config
      .external
      .iter()
      .any(|pattern| matches_external(pattern, specifier))
  }
}

fn non_empty<'a>(template: &'a str, default: &'a str) -> &'a str {
  if template.is_empty() {
    default
  } else {
    template
  }
}

/// Matches an external pattern, where a single `*` is a wildcard
fn matches_external(pattern: &str, specifier: &str) -> bool {
  match pattern.split_once('*') {
    Some((prefix, suffix)) => {
      specifier.len() >= prefix.len() + suffix.len()
        && specifier.starts_with(prefix)
        && specifier.ends_with(suffix)
    }
    None => pattern == specifier,
  }
}

/// URLs that are printed as written and never resolved
fn is_verbatim_url(url: &str) -> bool {
  url.is_empty()
    || url.starts_with("data:")
    || url.starts_with('#')
    || url.starts_with("//")
    || url.contains("://")
}

/// Splits `font.woff2?v=1#iefix` into the path and the query or fragment
fn split_url_suffix(url: &str) -> (&str, &str) {
  match url.find(['?', '#']) {
    Some(index) => url.split_at(index),
    None => (url, ""),
  }
}

fn external_import_rule(url: &str, media: Option<&str>, supports: Option<&str>) -> String {
  let mut rule = format!("@import \"{url}\"");
  if let Some(supports) = supports {
    rule.push_str(&format!(" supports({supports})"));
  }
  if let Some(media) = media {
    rule.push(' ');
    rule.push_str(media);
  }
  rule.push(';');
  rule
}

fn code_frame(key: &ModuleKey) -> CodeFrame {
  CodeFrame::from(PathBuf::from(key.to_string()))
}

fn css_diagnostic<T: Display>(error: &CssError<T>, key: &ModuleKey) -> Diagnostic {
  let mut frame = code_frame(key);
  if let Some(location) = &error.loc {
    frame.code_highlights.push(CodeHighlight::from(Location {
      line: location.line + 1,
      column: location.column,
    }));
  }

  Diagnostic::new(error.kind.to_string())
    .with_origin("lightningcss")
    .with_code_frame(frame)
}

fn hook_diagnostic(error: HookError, importer: Option<&str>) -> Diagnostic {
  let HookError { plugin, error } = error;

  let mut diagnostic = Diagnostic::from_error(error);
  if diagnostic.origin.is_none() {
    diagnostic.origin = Some(plugin);
  }

  if let (None, Some(importer)) = (&diagnostic.code_frames, importer) {
    diagnostic = diagnostic.with_code_frame(CodeFrame::from(PathBuf::from(importer)));
  }

  diagnostic
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn external_patterns_support_a_wildcard() {
    assert!(matches_external("@fonts/*", "@fonts/inter.css"));
    assert!(matches_external("*.woff2", "/fonts/inter.woff2"));
    assert!(matches_external("theme.css", "theme.css"));
    assert!(!matches_external("theme.css", "./theme.css"));
    assert!(!matches_external("a*a", "a"));
  }

  #[test]
  fn splits_query_and_fragment_from_urls() {
    assert_eq!(split_url_suffix("./font.woff2?v=1#iefix"), ("./font.woff2", "?v=1#iefix"));
    assert_eq!(split_url_suffix("./icons.svg#home"), ("./icons.svg", "#home"));
    assert_eq!(split_url_suffix("./logo.png"), ("./logo.png", ""));
  }

  #[test]
  fn verbatim_urls() {
    assert!(is_verbatim_url("data:image/png;base64,AAAA"));
    assert!(is_verbatim_url("#gradient"));
    assert!(is_verbatim_url("https://example.com/a.png"));
    assert!(is_verbatim_url("//cdn.example.com/a.png"));
    assert!(!is_verbatim_url("./logo.png"));
    assert!(!is_verbatim_url("/assets/logo.png"));
  }

  #[test]
  fn prints_external_imports() {
    assert_eq!(
      external_import_rule("https://fonts.example.com/inter.css", Some("print"), None),
      "@import \"https://fonts.example.com/inter.css\" print;"
    );
    assert_eq!(
      external_import_rule("theme.css", None, Some("display: grid")),
      "@import \"theme.css\" supports(display: grid);"
    );
  }

  #[test]
  fn names_modules_by_namespace() {
    let file = ModuleKey {
      namespace: FILE_NAMESPACE.into(),
      path: "/src/app.css".into(),
    };
    let virtual_module = ModuleKey {
      namespace: "virtual".into(),
      path: "theme".into(),
    };

    assert_eq!(file.to_string(), "/src/app.css");
    assert_eq!(virtual_module.to_string(), "virtual:theme");
  }
}
