//! SnapshotSource trait — the seam between tools and the data layer.
//!
//! Tools fetch through this trait so tests can substitute a canned
//! snapshot for the live webhook client.

use crate::error::DataError;
use crate::flight::Snapshot;
use async_trait::async_trait;

/// Anything that can produce the current snapshot for a region.
///
/// One call, one fresh snapshot, owned by the caller. Implementations do
/// not cache and do not retry — that is the external workflow's job.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn fetch(&self, region: &str) -> std::result::Result<Snapshot, DataError>;
}
