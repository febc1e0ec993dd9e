pub mod bundler;
pub mod component_style;
pub mod diagnostic;
pub mod hash;
pub mod plugin;
pub mod resolver;
pub mod types;
