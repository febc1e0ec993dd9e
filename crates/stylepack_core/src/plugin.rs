pub use bundler_plugin::*;
pub use hook_filter::*;
pub use hooks::*;
pub use load::*;
pub use resolve::*;

mod bundler_plugin;
mod hook_filter;
mod hooks;
mod load;
mod resolve;

/// Namespace of modules that live on the real file system
pub const FILE_NAMESPACE: &str = "file";
