//! Marriage service lifecycle
//!
//! One [`MarriageService`] per loaded world: created on server start, shut
//! down on server stop.

use crate::{
    name_tag, BackgroundWriter, ChatCommand, CommandDispatcher, CommandOutcome, FlushMode,
    HostConfig, NameTag, PlayerDirectory, ServiceError,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::JoinHandle;
use wedlock_domain::PlayerId;
use wedlock_store::{JsonSnapshotFile, RelationshipStore, SnapshotSink};

/// The running marriage feature of one world
pub struct MarriageService {
    store: Arc<RelationshipStore>,
    file: JsonSnapshotFile,
    background: Option<(Arc<BackgroundWriter>, JoinHandle<usize>)>,
}

impl MarriageService {
    /// Load the world's snapshot and start serving
    ///
    /// A missing or corrupt snapshot file starts the world with no couples.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::Config`] if the configuration is invalid
    /// - [`ServiceError::NoRuntime`] if background flushing is configured and
    ///   no tokio runtime is running
    pub fn start<P: AsRef<Path>>(config: &HostConfig, world_root: P) -> Result<Self, ServiceError> {
        config.validate()?;
        let palette = config.palette()?;
        let file = JsonSnapshotFile::new(config.save_path(world_root));

        let (sink, background): (Arc<dyn SnapshotSink>, _) = match config.flush_mode {
            FlushMode::Inline => (Arc::new(file.clone()), None),
            FlushMode::Background => {
                let runtime =
                    tokio::runtime::Handle::try_current().map_err(|_| ServiceError::NoRuntime)?;
                let (writer, worker) = BackgroundWriter::channel(file.clone());
                let writer = Arc::new(writer);
                let handle = runtime.spawn(worker.run());
                (writer.clone() as Arc<dyn SnapshotSink>, Some((writer, handle)))
            }
        };

        let store = RelationshipStore::new(palette, sink);
        store.adopt(file.load());

        tracing::info!(
            "Marriage service started for {} ({} couples, {:?} flushing)",
            file.path().display(),
            store.couples().len(),
            config.flush_mode
        );

        Ok(Self {
            store: Arc::new(store),
            file,
            background,
        })
    }

    /// The relationship store, shareable with other host threads
    pub fn store(&self) -> &Arc<RelationshipStore> {
        &self.store
    }

    /// Location of the snapshot file
    pub fn save_path(&self) -> PathBuf {
        self.file.path().to_path_buf()
    }

    /// Name decoration for `player`
    pub fn name_tag(&self, player: PlayerId) -> Option<NameTag> {
        name_tag(&self.store, player)
    }

    /// Parse and run a chat command for `sender`
    pub fn execute(
        &self,
        sender: PlayerId,
        line: &str,
        directory: &dyn PlayerDirectory,
    ) -> Result<CommandOutcome, ServiceError> {
        let command = ChatCommand::parse(line)?;
        Ok(CommandDispatcher::new(&self.store).execute(sender, &command, directory))
    }

    /// Write the final state and stop the background writer, if any
    pub async fn shutdown(self) -> Result<(), ServiceError> {
        self.store.flush();

        if let Some((writer, handle)) = self.background {
            writer.close();
            let written = handle
                .await
                .map_err(|e| ServiceError::Worker(e.to_string()))?;
            tracing::debug!("Background writer finished after {} writes", written);
        }

        let metrics = self.store.metrics();
        tracing::info!("Marriage service stopped: {}", metrics.summary());
        Ok(())
    }
}
