//! Background snapshot writer
//!
//! Moves file writes off the store's critical section. The store hands each
//! snapshot to a [`BackgroundWriter`] (a channel send) while holding its lock,
//! so snapshots enter the channel in mutation order. A single [`FlushWorker`]
//! drains the channel and writes them one at a time, which keeps that order on
//! disk.

use std::sync::{Mutex, PoisonError};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use wedlock_domain::Snapshot;
use wedlock_store::{JsonSnapshotFile, PersistError, SnapshotSink};

/// Create a connected writer/worker pair targeting `file`
///
/// # Examples
///
/// ```no_run
/// use wedlock_host::BackgroundWriter;
/// use wedlock_store::JsonSnapshotFile;
///
/// #[tokio::main]
/// async fn main() {
///     let (writer, worker) = BackgroundWriter::channel(JsonSnapshotFile::new("marriagemod.json"));
///     let handle = tokio::spawn(worker.run());
///
///     // ... hand `writer` to a RelationshipStore ...
///
///     writer.close();
///     let written = handle.await.unwrap();
///     println!("{} snapshot writes", written);
/// }
/// ```
pub struct BackgroundWriter {
    sender: Mutex<Option<UnboundedSender<Snapshot>>>,
}

impl BackgroundWriter {
    /// Create a writer and the worker that will service it
    pub fn channel(file: JsonSnapshotFile) -> (Self, FlushWorker) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let writer = Self {
            sender: Mutex::new(Some(sender)),
        };
        let worker = FlushWorker { receiver, file };
        (writer, worker)
    }

    /// Stop accepting snapshots; the worker exits once the backlog is written
    ///
    /// Later flushes fail with [`PersistError::Closed`].
    pub fn close(&self) {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

impl SnapshotSink for BackgroundWriter {
    fn flush(&self, snapshot: &Snapshot) -> Result<(), PersistError> {
        let sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.as_ref() {
            Some(sender) => sender
                .send(snapshot.clone())
                .map_err(|_| PersistError::Closed),
            None => Err(PersistError::Closed),
        }
    }
}

/// The single task that writes queued snapshots to disk
pub struct FlushWorker {
    receiver: UnboundedReceiver<Snapshot>,
    file: JsonSnapshotFile,
}

impl FlushWorker {
    /// Write snapshots until the writer is closed, returning the number of writes
    ///
    /// When several snapshots are queued only the newest is written: it
    /// already contains every earlier mutation. Write failures are logged and
    /// the worker carries on with the next snapshot.
    pub async fn run(mut self) -> usize {
        let mut written = 0;

        tracing::info!("Flush worker started for {}", self.file.path().display());

        while let Some(mut snapshot) = self.receiver.recv().await {
            let mut skipped = 0;
            while let Ok(newer) = self.receiver.try_recv() {
                snapshot = newer;
                skipped += 1;
            }
            if skipped > 0 {
                tracing::debug!("Coalesced {} queued snapshots", skipped);
            }

            let file = self.file.clone();
            match tokio::task::spawn_blocking(move || file.save(&snapshot)).await {
                Ok(Ok(())) => written += 1,
                Ok(Err(e)) => tracing::error!("Could not save marriage data: {}", e),
                Err(e) => tracing::error!("Snapshot write task failed: {}", e),
            }
        }

        tracing::info!("Flush worker stopped after {} writes", written);
        written
    }
}
