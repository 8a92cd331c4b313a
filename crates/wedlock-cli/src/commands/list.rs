//! List command implementation.

use crate::error::Result;
use crate::open_store;
use crate::output::Formatter;
use wedlock_host::HostConfig;
use wedlock_store::JsonSnapshotFile;

/// Execute the list command.
pub fn execute_list(
    file: &JsonSnapshotFile,
    config: &HostConfig,
    formatter: &Formatter,
) -> Result<()> {
    let store = open_store(file, config, false)?;
    println!("{}", formatter.format_couples(&store.couples())?);
    Ok(())
}
