use super::HookFilter;
use super::LoadArgs;
use super::LoadHandler;
use super::LoadResult;
use super::ResolveArgs;
use super::ResolveHandler;
use super::ResolveResult;

struct RegisteredHook<H> {
  plugin: String,
  filter: HookFilter,
  handler: H,
}

/// An error raised by a hook, attributed to the plugin that registered it
#[derive(Debug)]
pub struct HookError {
  pub plugin: String,
  pub error: anyhow::Error,
}

/// The ordered `{filter, handler}` pairs registered by every plugin of a build
#[derive(Default)]
pub struct PluginHooks {
  resolve: Vec<RegisteredHook<ResolveHandler>>,
  load: Vec<RegisteredHook<LoadHandler>>,
}

impl PluginHooks {
  pub(crate) fn add_resolve(&mut self, plugin: String, filter: HookFilter, handler: ResolveHandler) {
    self.resolve.push(RegisteredHook {
      plugin,
      filter,
      handler,
    });
  }

  pub(crate) fn add_load(&mut self, plugin: String, filter: HookFilter, handler: LoadHandler) {
    self.load.push(RegisteredHook {
      plugin,
      filter,
      handler,
    });
  }

  /// Offers the request to every matching resolve hook until one returns a result
  pub fn resolve(&self, args: &ResolveArgs) -> Result<Option<ResolveResult>, HookError> {
    for hook in &self.resolve {
      if !hook.filter.matches(&args.path, &args.namespace) {
        continue;
      }

      match (hook.handler)(args) {
        Ok(Some(result)) => {
          tracing::trace!(plugin = %hook.plugin, path = %args.path, "Resolved by plugin");
          return Ok(Some(result));
        }
        Ok(None) => {}
        Err(error) => {
          return Err(HookError {
            plugin: hook.plugin.clone(),
            error,
          })
        }
      }
    }

    Ok(None)
  }

  /// Offers the request to every matching load hook until one returns a result
  pub fn load(&self, args: &LoadArgs) -> Result<Option<LoadResult>, HookError> {
    for hook in &self.load {
      if !hook.filter.matches(&args.path, &args.namespace) {
        continue;
      }

      match (hook.handler)(args) {
        Ok(Some(result)) => {
          tracing::trace!(plugin = %hook.plugin, path = %args.path, "Loaded by plugin");
          return Ok(Some(result));
        }
        Ok(None) => {}
        Err(error) => {
          return Err(HookError {
            plugin: hook.plugin.clone(),
            error,
          })
        }
      }
    }

    Ok(None)
  }
}
