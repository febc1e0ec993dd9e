//! The stylesheet bundler behind stylepack's `Bundler` capability
//!
//! `CssBundler` walks a stylesheet graph starting from each entry point. Every specifier
//! goes through the plugin resolve hooks before falling back to `PathResolver`, and every
//! module through the plugin load hooks before falling back to reading the file system.
//! Stylesheets are parsed and printed with lightningcss, `@import`ed sheets are inlined
//! and `url()` resources are emitted next to the CSS.
mod build;
mod css_bundler;
mod output_names;
mod path_resolver;
mod targets;

pub use css_bundler::CssBundler;
pub use path_resolver::PathResolver;
