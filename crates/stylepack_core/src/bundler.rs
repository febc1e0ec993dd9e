use async_trait::async_trait;

use crate::types::BundleConfig;
use crate::types::BundleResult;

/// The capability of bundling stylesheets
///
/// Compile problems are reported in `BundleResult::errors`. An `Err` means the bundling
/// machinery itself failed and no result could be produced.
#[mockall::automock]
#[async_trait]
pub trait Bundler: Send + Sync {
  async fn bundle(&self, config: BundleConfig) -> anyhow::Result<BundleResult>;
}
