//! Wedlock CLI library.
//!
//! Administration tools for a world's marriage snapshot file: listing and
//! inspecting couples, forced divorces, file validation, and an interactive
//! session that plays the host's part for testing chat commands.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use error::{CliError, Result};
pub use output::{Formatter, OutputFormat};

use std::path::{Path, PathBuf};
use std::sync::Arc;
use wedlock_domain::PlayerId;
use wedlock_host::HostConfig;
use wedlock_store::{JsonSnapshotFile, NullSink, RelationshipStore, SnapshotSink};

/// Snapshot file selected by `--file`, or the configured one in the current directory
pub fn resolve_save_path(file: Option<&Path>, config: &HostConfig) -> PathBuf {
    match file {
        Some(file) => file.to_path_buf(),
        None => config.save_path("."),
    }
}

/// Parse a player argument: a UUID, or else an offline-mode name
pub fn resolve_player(arg: &str) -> Result<PlayerId> {
    let arg = arg.trim();
    if arg.is_empty() {
        return Err(CliError::InvalidInput("empty player".to_string()));
    }
    Ok(PlayerId::from_string(arg).unwrap_or_else(|_| PlayerId::offline(arg)))
}

/// Store holding the file's couples
///
/// With `write_back` every mutation rewrites the file; otherwise the store is
/// read-only in effect.
pub fn open_store(
    file: &JsonSnapshotFile,
    config: &HostConfig,
    write_back: bool,
) -> Result<RelationshipStore> {
    let sink: Arc<dyn SnapshotSink> = if write_back {
        Arc::new(file.clone())
    } else {
        Arc::new(NullSink)
    };
    let store = RelationshipStore::new(config.palette()?, sink);
    store.adopt(file.load());
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_player() {
        let id = PlayerId::new();
        assert_eq!(resolve_player(&id.to_string()).unwrap(), id);
        assert_eq!(resolve_player(" Steve ").unwrap(), PlayerId::offline("Steve"));
        assert!(resolve_player("  ").is_err());
    }

    #[test]
    fn test_resolve_save_path() {
        let config = HostConfig::default();
        assert_eq!(
            resolve_save_path(None, &config),
            PathBuf::from("./marriagemod.json")
        );
        assert_eq!(
            resolve_save_path(Some(Path::new("/tmp/x.json")), &config),
            PathBuf::from("/tmp/x.json")
        );
    }
}
