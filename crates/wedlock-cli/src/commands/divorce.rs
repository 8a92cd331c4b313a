//! Divorce command implementation.

use crate::cli::DivorceArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::{open_store, resolve_player};
use std::io::{self, Write};
use wedlock_domain::{Couple, PlayerId};
use wedlock_host::HostConfig;
use wedlock_store::JsonSnapshotFile;

/// Execute the divorce command.
pub fn execute_divorce(
    args: DivorceArgs,
    file: &JsonSnapshotFile,
    config: &HostConfig,
    formatter: &Formatter,
) -> Result<()> {
    let first = resolve_player(&args.first)?;
    let second = resolve_player(&args.second)?;

    // Confirm unless --yes is specified
    if !args.yes {
        println!("About to divorce {} and {}", first, second);
        print!("Continue? [y/N] ");
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if !response.trim().eq_ignore_ascii_case("y") {
            println!("{}", formatter.info("Operation cancelled"));
            return Ok(());
        }
    }

    let couple = divorce_in_file(file, config, first, second)?;
    let (a, b) = couple.members();
    println!("{}", formatter.success(&format!("Divorced {} and {}", a, b)));
    Ok(())
}

/// Divorce two players and rewrite the file
fn divorce_in_file(
    file: &JsonSnapshotFile,
    config: &HostConfig,
    first: PlayerId,
    second: PlayerId,
) -> Result<Couple> {
    let store = open_store(file, config, true)?;
    let couple = store.divorce(first, second)?;

    // the store swallows flush errors; surface them here
    file.save(&store.snapshot())?;
    Ok(couple)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use tempfile::TempDir;
    use wedlock_store::{Rejection, RelationshipStore};

    #[test]
    fn test_divorce_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let file = JsonSnapshotFile::new(dir.path().join("marriagemod.json"));
        let (steve, alex) = (PlayerId::offline("Steve"), PlayerId::offline("Alex"));

        let store = RelationshipStore::in_memory();
        store.marry(steve, alex).unwrap();
        file.save(&store.snapshot()).unwrap();

        divorce_in_file(&file, &HostConfig::default(), alex, steve).unwrap();
        assert!(file.load().is_empty());
    }

    #[test]
    fn test_divorce_strangers_is_refused() {
        let dir = TempDir::new().unwrap();
        let file = JsonSnapshotFile::new(dir.path().join("marriagemod.json"));

        let result = divorce_in_file(
            &file,
            &HostConfig::default(),
            PlayerId::offline("Steve"),
            PlayerId::offline("Alex"),
        );
        assert!(matches!(result, Err(CliError::Rejected(Rejection::NotMarried))));
        assert!(!file.path().exists());
    }
}
