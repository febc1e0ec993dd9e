pub use sass_plugin::*;

mod build_fs;
mod sass_plugin;
