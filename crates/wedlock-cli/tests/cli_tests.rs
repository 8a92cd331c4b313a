//! Command tests against real snapshot files

use clap::Parser;
use std::fs;
use tempfile::TempDir;
use wedlock_cli::cli::DivorceArgs;
use wedlock_cli::commands;
use wedlock_cli::{open_store, resolve_player, Cli, CliError, Command, Formatter, OutputFormat};
use wedlock_domain::ChatColor;
use wedlock_host::HostConfig;
use wedlock_store::{JsonSnapshotFile, RelationshipStore};

fn world_with_couple(dir: &TempDir) -> JsonSnapshotFile {
    let file = JsonSnapshotFile::new(dir.path().join("marriagemod.json"));
    let store = RelationshipStore::in_memory();
    store
        .marry(resolve_player("Steve").unwrap(), resolve_player("Alex").unwrap())
        .unwrap();
    file.save(&store.snapshot()).unwrap();
    file
}

#[test]
fn test_open_store_reads_couples() {
    let dir = TempDir::new().unwrap();
    let file = world_with_couple(&dir);

    let store = open_store(&file, &HostConfig::default(), false).unwrap();
    let steve = resolve_player("Steve").unwrap();
    assert_eq!(store.partner(steve), Some(resolve_player("Alex").unwrap()));
    assert_eq!(store.couple_color(steve), Some(ChatColor::Gold));
}

#[test]
fn test_read_only_store_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let file = world_with_couple(&dir);
    let before = fs::read_to_string(file.path()).unwrap();

    let store = open_store(&file, &HostConfig::default(), false).unwrap();
    store
        .divorce(resolve_player("Steve").unwrap(), resolve_player("Alex").unwrap())
        .unwrap();

    assert_eq!(fs::read_to_string(file.path()).unwrap(), before);
}

#[test]
fn test_divorce_command_with_yes() {
    let dir = TempDir::new().unwrap();
    let file = world_with_couple(&dir);
    let formatter = Formatter::new(OutputFormat::Quiet, false);

    let args = DivorceArgs {
        first: "Alex".to_string(),
        second: "Steve".to_string(),
        yes: true,
    };
    commands::execute_divorce(args, &file, &HostConfig::default(), &formatter).unwrap();
    assert!(file.load().is_empty());
}

#[test]
fn test_check_fails_on_garbage() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marriagemod.json");
    fs::write(&path, "<<not json>>").unwrap();
    let formatter = Formatter::new(OutputFormat::Table, false);

    let result = commands::execute_check(
        &JsonSnapshotFile::new(&path),
        &HostConfig::default(),
        &formatter,
    );
    assert!(matches!(result, Err(CliError::Persist(_))));
}

#[test]
fn test_list_and_show_succeed() {
    let dir = TempDir::new().unwrap();
    let file = world_with_couple(&dir);
    let formatter = Formatter::new(OutputFormat::Json, false);
    let config = HostConfig::default();

    commands::execute_list(&file, &config, &formatter).unwrap();

    let cli = Cli::parse_from(["wedlock", "show", "Steve"]);
    match cli.command {
        Some(Command::Show(args)) => {
            commands::execute_show(args, &file, &config, &formatter).unwrap();
        }
        _ => panic!("Expected Show command"),
    }
}

#[test]
fn test_names_resolve_to_server_offline_ids() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("marriagemod.json");
    // As written by an offline-mode server for Steve and Alex
    fs::write(
        &path,
        r#"{
  "marriedPlayers": {
    "5627dd98-e6be-3c21-b8a8-e92344183641": "36532b5e-c442-3dbb-a24c-c7e55d0f979a",
    "36532b5e-c442-3dbb-a24c-c7e55d0f979a": "5627dd98-e6be-3c21-b8a8-e92344183641"
  },
  "coupleColors": {
    "36532b5e-c442-3dbb-a24c-c7e55d0f979a": "red"
  }
}"#,
    )
    .unwrap();

    let file = JsonSnapshotFile::new(&path);
    let store = open_store(&file, &HostConfig::default(), false).unwrap();
    let steve = resolve_player("Steve").unwrap();
    assert_eq!(store.partner(steve), Some(resolve_player("Alex").unwrap()));
    assert_eq!(store.couple_color(steve), Some(ChatColor::Red));
}
