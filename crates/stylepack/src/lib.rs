//! Component stylesheet bundling
//!
//! A component compiler hands each stylesheet of a component to
//! [`bundle_component_stylesheet`], either as inline text or as a file on disk, and gets
//! back the final CSS, its source map and the resources it references. Preprocessed
//! languages, `@import` inlining and `url()` resources are handled by the plugin chain
//! built in [`create_stylesheet_bundle_options`].
pub use component_stylesheet::*;
pub use options::*;

pub use stylepack_bundler::CssBundler;
pub use stylepack_core::bundler::Bundler;
pub use stylepack_core::diagnostic::Diagnostic;
pub use stylepack_core::diagnostic::Diagnostics;
pub use stylepack_core::types::OutputFile;
pub use stylepack_core::types::StylesheetLanguage;

mod component_stylesheet;
mod options;
