//! Show command implementation.

use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::{open_store, resolve_player};
use wedlock_host::HostConfig;
use wedlock_store::JsonSnapshotFile;

/// Execute the show command.
pub fn execute_show(
    args: ShowArgs,
    file: &JsonSnapshotFile,
    config: &HostConfig,
    formatter: &Formatter,
) -> Result<()> {
    let player = resolve_player(&args.player)?;
    let store = open_store(file, config, false)?;

    let partner = store.partner(player);
    let output = formatter.format_player(player, partner, store.couple_color(player))?;
    println!("{}", output);
    Ok(())
}
