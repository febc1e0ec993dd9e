pub use css_resource_plugin::*;

mod css_resource_plugin;
