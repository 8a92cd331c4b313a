//! The seam the store flushes snapshots through

use crate::PersistError;
use wedlock_domain::Snapshot;

/// Destination for snapshots produced by state mutations
///
/// The store calls `flush` while it still holds its lock, so a sink sees
/// snapshots in exactly the order the mutations happened. Errors are logged by
/// the caller and never undo the mutation.
pub trait SnapshotSink: Send + Sync {
    /// Persist (or hand off for persisting) the given snapshot
    fn flush(&self, snapshot: &Snapshot) -> Result<(), PersistError>;
}

/// Sink that discards every snapshot
///
/// For tests and for hosts that do not want persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn flush(&self, _snapshot: &Snapshot) -> Result<(), PersistError> {
        Ok(())
    }
}
