use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use stylepack_core::bundler::Bundler;
use stylepack_core::types::BundleConfig;
use stylepack_core::types::BundleResult;
use stylepack_filesystem::os_file_system::OsFileSystem;
use stylepack_filesystem::FileSystemRef;

use crate::build::Build;

/// Bundles stylesheets with lightningcss
///
/// Each call to `bundle` is an independent build with its own plugin setup, so one bundler
/// can serve many concurrent operations.
#[derive(Debug)]
pub struct CssBundler {
  file_system: FileSystemRef,
}

impl CssBundler {
  pub fn new(file_system: FileSystemRef) -> Self {
    CssBundler { file_system }
  }
}

impl Default for CssBundler {
  fn default() -> Self {
    CssBundler::new(Arc::new(OsFileSystem))
  }
}

#[async_trait]
impl Bundler for CssBundler {
  #[tracing::instrument(level = "debug", skip_all, fields(entry_points = ?config.entry_points))]
  async fn bundle(&self, config: BundleConfig) -> anyhow::Result<BundleResult> {
    let file_system = Arc::clone(&self.file_system);

    tokio::task::spawn_blocking(move || Build::new(file_system, config).map(Build::run))
      .await
      .context("Stylesheet build panicked")?
  }
}
