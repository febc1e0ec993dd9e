use std::path::PathBuf;

use anyhow::Context;
use regex::Regex;
use stylepack_core::diagnostic::Diagnostic;
use stylepack_core::plugin::BundlerPlugin;
use stylepack_core::plugin::HookFilter;
use stylepack_core::plugin::LoadResult;
use stylepack_core::plugin::PluginBuild;
use stylepack_core::plugin::ResolveKind;
use stylepack_core::plugin::ResolveResult;

const PLUGIN_NAME: &str = "stylepack-css-resource";

/// Namespace of resources referenced from `url()` tokens
pub const CSS_RESOURCE_NAMESPACE: &str = "css-resource";

/// URLs that point outside the build: root relative, remote, data and fragment URLs
const EXTERNAL_URL_PATTERN: &str = r"^((?:\w+:)?//|data:|chrome:|#|/)";

/// Resolves the resources behind `url()` tokens, whatever language the stylesheet was
/// written in
///
/// Only `url()` tokens are handled; `@import` rules are left to the bundler. Resolution
/// itself is delegated to the bundler's resolver so resources follow the same rules as
/// stylesheets, but failures carry hints about the common mistakes.
#[derive(Debug, Default)]
pub struct CssResourcePlugin;

impl CssResourcePlugin {
  pub fn new() -> Self {
    CssResourcePlugin
  }
}

impl BundlerPlugin for CssResourcePlugin {
  fn name(&self) -> &str {
    PLUGIN_NAME
  }

  fn setup(&self, build: &mut PluginBuild) -> anyhow::Result<()> {
    let external = Regex::new(EXTERNAL_URL_PATTERN)?;
    let resolver = build.resolver();

    build.on_resolve(HookFilter::any(), move |args| {
      if args.kind != ResolveKind::UrlToken {
        return Ok(None);
      }

      if external.is_match(&args.path) {
        tracing::trace!(url = %args.path, "Leaving external resource untouched");
        return Ok(Some(ResolveResult::external(args.path.clone())));
      }

      match resolver.resolve(&args.path, &args.resolve_dir) {
        Ok(path) => Ok(Some(ResolveResult::in_namespace(
          path.to_string_lossy(),
          CSS_RESOURCE_NAMESPACE,
        ))),
        Err(error) => Err(with_resolution_hint(Diagnostic::from_error(error), &args.path).into()),
      }
    });

    let file_system = build.file_system();
    build.on_load(
      HookFilter::any().in_namespace(CSS_RESOURCE_NAMESPACE),
      move |args| {
        let path = PathBuf::from(&args.path);
        let contents = file_system
          .read(&path)
          .with_context(|| format!("Could not read resource \"{}\"", args.path))?;

        Ok(Some(LoadResult::file(contents).with_watch_files(vec![path])))
      },
    );

    Ok(())
  }
}

fn with_resolution_hint(diagnostic: Diagnostic, url: &str) -> Diagnostic {
  if url.starts_with('~') {
    diagnostic.with_hint(
      "You can remove the tilde and use a relative path to reference it, which should remove the need for the tilde.",
    )
  } else if !url.starts_with('.') {
    diagnostic.with_hint("You can add ./ to the start of the path if it is relative")
  } else {
    diagnostic
  }
}

#[cfg(test)]
mod tests {
  use std::path::Path;
  use std::sync::Arc;

  use pretty_assertions::assert_eq;
  use stylepack_bundler::CssBundler;
  use stylepack_bundler::PathResolver;
  use stylepack_core::bundler::Bundler;
  use stylepack_core::plugin::LoadArgs;
  use stylepack_core::plugin::Loader;
  use stylepack_core::plugin::PluginHooks;
  use stylepack_core::plugin::ResolveArgs;
  use stylepack_core::plugin::FILE_NAMESPACE;
  use stylepack_core::types::BundleConfig;
  use stylepack_filesystem::in_memory_file_system::InMemoryFileSystem;
  use stylepack_filesystem::FileSystem;

  use super::*;

  fn file_system(files: &[(&str, &str)]) -> Arc<InMemoryFileSystem> {
    let fs = InMemoryFileSystem::default();
    for (path, contents) in files {
      fs.write(Path::new(path), contents.as_bytes()).unwrap();
    }
    Arc::new(fs)
  }

  fn hooks(fs: Arc<InMemoryFileSystem>) -> PluginHooks {
    let resolver = Arc::new(PathResolver::new(fs.clone(), &BundleConfig::default()));
    let mut build = PluginBuild::new(fs, resolver, PathBuf::from("/"));
    build.register(&CssResourcePlugin::new()).unwrap();
    build.into_hooks()
  }

  fn url(path: &str) -> ResolveArgs {
    ResolveArgs {
      path: path.into(),
      importer: Some("/src/app.css".into()),
      namespace: FILE_NAMESPACE.into(),
      resolve_dir: PathBuf::from("/src"),
      kind: ResolveKind::UrlToken,
    }
  }

  #[test]
  fn marks_non_file_urls_external() {
    let hooks = hooks(file_system(&[]));

    for path in [
      "/assets/logo.png",
      "//cdn.example.com/logo.png",
      "https://example.com/logo.png",
      "data:image/png;base64,AAAA",
      "chrome://global/skin/icon.png",
      "#mask",
    ] {
      assert_eq!(
        hooks.resolve(&url(path)).unwrap(),
        Some(ResolveResult::external(path)),
        "{path}"
      );
    }
  }

  #[test]
  fn resolves_relative_resources_into_its_namespace() {
    let hooks = hooks(file_system(&[("/src/images/logo.png", "png")]));

    assert_eq!(
      hooks.resolve(&url("./images/logo.png")).unwrap(),
      Some(ResolveResult::in_namespace(
        "/src/images/logo.png",
        CSS_RESOURCE_NAMESPACE
      ))
    );
  }

  #[test]
  fn ignores_imports() {
    let hooks = hooks(file_system(&[("/src/base.css", "")]));

    let args = ResolveArgs {
      kind: ResolveKind::ImportRule,
      ..url("./base.css")
    };

    assert_eq!(hooks.resolve(&args).unwrap(), None);
  }

  #[test]
  fn resolves_bare_resources_next_to_the_stylesheet() {
    let hooks = hooks(file_system(&[("/src/logo.png", "png")]));

    assert_eq!(
      hooks.resolve(&url("logo.png")).unwrap(),
      Some(ResolveResult::in_namespace(
        "/src/logo.png",
        CSS_RESOURCE_NAMESPACE
      ))
    );
  }

  #[test]
  fn hints_at_missing_relative_prefix() {
    let hooks = hooks(file_system(&[("/assets/logo.png", "png")]));

    let error = hooks.resolve(&url("logo.png")).unwrap_err();
    let diagnostic = Diagnostic::from_error(error.error);

    assert_eq!(error.plugin, PLUGIN_NAME);
    assert_eq!(diagnostic.message, "Could not resolve \"logo.png\"");
    assert_eq!(
      diagnostic.hints,
      Some(vec![
        "You can add ./ to the start of the path if it is relative".to_string()
      ])
    );
  }

  #[test]
  fn hints_at_tilde_prefixes() {
    let hooks = hooks(file_system(&[]));

    let error = hooks.resolve(&url("~theme/logo.png")).unwrap_err();
    let diagnostic = Diagnostic::from_error(error.error);

    assert!(diagnostic.hints.unwrap()[0].starts_with("You can remove the tilde"));
  }

  #[test]
  fn loads_resources_as_files() {
    let hooks = hooks(file_system(&[("/src/logo.png", "png")]));

    let result = hooks
      .load(&LoadArgs {
        path: "/src/logo.png".into(),
        namespace: CSS_RESOURCE_NAMESPACE.into(),
      })
      .unwrap()
      .unwrap();

    assert_eq!(result.loader, Loader::File);
    assert_eq!(result.contents, b"png".to_vec());
    assert_eq!(result.watch_files, vec![PathBuf::from("/src/logo.png")]);
  }

  #[tokio::test]
  async fn rewrites_urls_to_emitted_resources() {
    let bundler = CssBundler::new(file_system(&[
      (
        "/project/src/app.css",
        ".a { background: url(./logo.png); mask: url(/static/mask.svg); }",
      ),
      ("/project/src/logo.png", "png"),
    ]));

    let result = bundler
      .bundle(BundleConfig {
        working_dir: PathBuf::from("/project"),
        outdir: PathBuf::from("/project/dist"),
        entry_points: vec!["./src/app.css".into()],
        asset_names: "media/[name]-[hash]".into(),
        plugins: vec![Arc::new(CssResourcePlugin::new())],
        ..BundleConfig::default()
      })
      .await
      .unwrap();

    assert_eq!(result.errors, Vec::new());
    assert_eq!(result.output_files.len(), 2);

    let resource = &result.output_files[0];
    assert!(resource.path.starts_with("/project/dist/media"));

    let css = result.output_files[1].text().into_owned();
    assert!(css.contains(&format!("./media/{}", resource.file_name())), "{css}");
    assert!(css.contains("/static/mask.svg"), "{css}");
  }
}
