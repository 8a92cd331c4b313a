//! Interactive play session.
//!
//! Plays the host's part: players join and leave by name, and any online
//! player can type chat commands. The store behind the session is the real
//! snapshot file, so every marriage made here is saved.

use crate::error::{CliError, Result};
use crate::output::Formatter;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::{Path, PathBuf};
use wedlock_domain::PlayerId;
use wedlock_host::{
    Audience, CommandOutcome, HostConfig, MarriageService, PlayerDirectory, ServiceError,
    StaticDirectory,
};

/// Marker drawn before a married player's name
const MARRIED_MARKER: &str = "\u{2764}";

/// Run the interactive session against the snapshot at `save_path`.
pub async fn run_play(save_path: &Path, config: &HostConfig, formatter: &Formatter) -> Result<()> {
    let (world_root, config) = world_for(save_path, config)?;
    let service = MarriageService::start(&config, &world_root)?;

    println!(
        "{}",
        formatter.info(&format!(
            "Playing on {} - Type 'help' for commands, 'exit' to quit",
            service.save_path().display()
        ))
    );
    println!();

    let mut editor = DefaultEditor::new()?;

    let history_path = get_history_path();
    if let Some(path) = &history_path {
        let _ = editor.load_history(path);
    }

    let mut players = StaticDirectory::new();

    loop {
        match editor.readline("wedlock> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_play_line(line) {
                    Ok(PlayLine::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(PlayLine::Help) => print_help(formatter),
                    Ok(command) => {
                        let result = execute_play_line(command, &service, &mut players, formatter);
                        if let Err(e) = result {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    if let Some(path) = &history_path {
        editor.save_history(path).ok();
    }

    service.shutdown().await?;
    Ok(())
}

/// One line typed in the session
#[derive(Debug, PartialEq, Eq)]
enum PlayLine {
    Exit,
    Help,
    Join(String),
    Leave(String),
    Who,
    Couples,
    /// `<name>: <chat line>`
    Chat { player: String, line: String },
}

fn parse_play_line(line: &str) -> Result<PlayLine> {
    if let Some((player, chat)) = line.split_once(':') {
        let player = player.trim();
        let chat = chat.trim();
        if player.is_empty() || player.contains(char::is_whitespace) || chat.is_empty() {
            return Err(CliError::InvalidInput("Usage: <name>: /<command> <player>".to_string()));
        }
        return Ok(PlayLine::Chat {
            player: player.to_string(),
            line: chat.to_string(),
        });
    }

    let parts: Vec<&str> = line.split_whitespace().collect();
    let name = |usage: &str| {
        parts
            .get(1)
            .map(|s| s.to_string())
            .ok_or_else(|| CliError::InvalidInput(format!("Usage: {}", usage)))
    };

    match parts.first().copied().unwrap_or_default() {
        "exit" | "quit" | "q" => Ok(PlayLine::Exit),
        "help" | "?" => Ok(PlayLine::Help),
        "join" => Ok(PlayLine::Join(name("join <name>")?)),
        "leave" => Ok(PlayLine::Leave(name("leave <name>")?)),
        "who" => Ok(PlayLine::Who),
        "couples" => Ok(PlayLine::Couples),
        other => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            other
        ))),
    }
}

fn execute_play_line(
    command: PlayLine,
    service: &MarriageService,
    players: &mut StaticDirectory,
    formatter: &Formatter,
) -> Result<()> {
    match command {
        PlayLine::Join(name) => {
            let id = players.join(&name);
            println!("{} joined ({})", tagged_name(service, players, id, formatter), id);
        }
        PlayLine::Leave(name) => match players.leave(&name) {
            Some(_) => println!("{} left", name),
            None => println!("{}", formatter.warning(&format!("{} is not online", name))),
        },
        PlayLine::Who => {
            let names = players.online_names();
            if names.is_empty() {
                println!("{}", formatter.info("Nobody is online"));
            }
            for name in names {
                let id = PlayerId::offline(&name);
                println!("  {}", tagged_name(service, players, id, formatter));
            }
        }
        PlayLine::Couples => {
            let couples = service.store().couples();
            println!("{}", formatter.format_couples(&couples)?);
        }
        PlayLine::Chat { player, line } => {
            let sender = players.find_online(&player).ok_or_else(|| {
                CliError::InvalidInput(format!("{} is not online; 'join {}' first", player, player))
            })?;
            let outcome = service.execute(sender, &line, &*players).map_err(|e| match e {
                ServiceError::Command(parse) => CliError::InvalidInput(parse.to_string()),
                other => other.into(),
            })?;
            print_outcome(&outcome, service, players, formatter);
        }
        PlayLine::Exit | PlayLine::Help => {}
    }
    Ok(())
}

fn print_outcome(
    outcome: &CommandOutcome,
    service: &MarriageService,
    players: &StaticDirectory,
    formatter: &Formatter,
) {
    for notice in &outcome.notices {
        let audience = match notice.audience {
            Audience::Everyone => "everyone".to_string(),
            Audience::Player(id) => players.name_of(id).unwrap_or_else(|| id.to_string()),
        };
        println!("{}", formatter.notice(notice, &audience));
    }
    for id in &outcome.refresh {
        println!("  name tag: {}", tagged_name(service, players, *id, formatter));
    }
}

fn tagged_name(
    service: &MarriageService,
    players: &StaticDirectory,
    player: PlayerId,
    formatter: &Formatter,
) -> String {
    let name = players
        .name_of(player)
        .unwrap_or_else(|| player.to_string());
    match service.name_tag(player) {
        Some(tag) => formatter.chat(&format!("{} {}", MARRIED_MARKER, name), tag.color),
        None => name,
    }
}

/// Split a save path into the world root and file name the service expects
fn world_for(save_path: &Path, config: &HostConfig) -> Result<(PathBuf, HostConfig)> {
    let file_name = save_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            CliError::InvalidInput(format!("not a file path: {}", save_path.display()))
        })?;
    let root = match save_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };

    let mut config = config.clone();
    config.save_file_name = file_name.to_string();
    Ok((root, config))
}

fn get_history_path() -> Option<PathBuf> {
    let dir = dirs::home_dir()?.join(".wedlock");
    std::fs::create_dir_all(&dir).ok()?;
    Some(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  join <name>                    - Bring a player online");
    println!("  leave <name>                   - Take a player offline");
    println!("  who                            - List online players with name tags");
    println!("  couples                        - List all couples");
    println!("  <name>: /marry <player>        - Propose (also /heiraten)");
    println!("  <name>: /heiraten-akzeptieren <player> - Accept a proposal");
    println!("  <name>: /heiraten-ablehnen <player>    - Deny a proposal");
    println!("  <name>: /divorce <player>      - Divorce (also /scheiden)");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Leave and save");
    println!();
}
