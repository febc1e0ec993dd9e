use std::fmt::Debug;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use stylepack_filesystem::FileSystemRef;

use crate::resolver::ResolverRef;

use super::HookFilter;
use super::LoadArgs;
use super::LoadResult;
use super::PluginHooks;
use super::ResolveArgs;
use super::ResolveResult;

pub type ResolveHandler =
  Arc<dyn Fn(&ResolveArgs) -> anyhow::Result<Option<ResolveResult>> + Send + Sync>;

pub type LoadHandler = Arc<dyn Fn(&LoadArgs) -> anyhow::Result<Option<LoadResult>> + Send + Sync>;

/// Extends a bundle operation with resolve and load hooks
///
/// Plugins register their hooks once per bundle operation in `setup`. Hooks from all
/// plugins are consulted in registration order and the first hook that returns a
/// result wins, so the order of `BundleConfig::plugins` matters.
pub trait BundlerPlugin: Debug + Send + Sync {
  /// Name used to attribute diagnostics raised by the plugin's hooks
  fn name(&self) -> &str;

  fn setup(&self, build: &mut PluginBuild) -> anyhow::Result<()>;
}

/// Registration surface handed to `BundlerPlugin::setup`
pub struct PluginBuild {
  current_plugin: String,
  file_system: FileSystemRef,
  hooks: PluginHooks,
  resolver: ResolverRef,
  working_dir: PathBuf,
}

impl PluginBuild {
  pub fn new(file_system: FileSystemRef, resolver: ResolverRef, working_dir: PathBuf) -> Self {
    PluginBuild {
      current_plugin: String::new(),
      file_system,
      hooks: PluginHooks::default(),
      resolver,
      working_dir,
    }
  }

  /// Runs a plugin's setup, attributing the hooks it registers to it
  pub fn register(&mut self, plugin: &dyn BundlerPlugin) -> anyhow::Result<()> {
    self.current_plugin = plugin.name().to_string();

    tracing::debug!(plugin = %self.current_plugin, "Setting up plugin");

    plugin
      .setup(self)
      .with_context(|| format!("Failed to set up plugin {}", plugin.name()))
  }

  pub fn on_resolve<F>(&mut self, filter: HookFilter, handler: F)
  where
    F: Fn(&ResolveArgs) -> anyhow::Result<Option<ResolveResult>> + Send + Sync + 'static,
  {
    self
      .hooks
      .add_resolve(self.current_plugin.clone(), filter, Arc::new(handler));
  }

  pub fn on_load<F>(&mut self, filter: HookFilter, handler: F)
  where
    F: Fn(&LoadArgs) -> anyhow::Result<Option<LoadResult>> + Send + Sync + 'static,
  {
    self
      .hooks
      .add_load(self.current_plugin.clone(), filter, Arc::new(handler));
  }

  /// The file system the build reads from
  pub fn file_system(&self) -> FileSystemRef {
    Arc::clone(&self.file_system)
  }

  /// The bundler's own path resolution, for plugins that refine rather than replace it
  pub fn resolver(&self) -> ResolverRef {
    Arc::clone(&self.resolver)
  }

  pub fn working_dir(&self) -> &Path {
    &self.working_dir
  }

  pub fn into_hooks(self) -> PluginHooks {
    self.hooks
  }
}
