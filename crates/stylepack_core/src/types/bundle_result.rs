use std::path::PathBuf;

use crate::diagnostic::Diagnostic;

use super::OutputFile;

/// Everything a bundle operation produced
///
/// `output_files` is empty when the build failed; the reasons are in `errors`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BundleResult {
  /// Output artifacts in emit order, with no tagging of their purpose
  pub output_files: Vec<OutputFile>,
  pub errors: Vec<Diagnostic>,
  pub warnings: Vec<Diagnostic>,
  /// Every real file that was read while building, in first-read order
  pub inputs: Vec<PathBuf>,
}
