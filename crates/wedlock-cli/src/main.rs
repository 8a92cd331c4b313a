//! Wedlock CLI - Administer a world's marriage data.

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use wedlock_cli::commands;
use wedlock_cli::repl;
use wedlock_cli::{resolve_save_path, Cli, Command, Formatter};
use wedlock_host::HostConfig;
use wedlock_store::JsonSnapshotFile;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr so stdout stays parseable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = HostConfig::load_or_default(cli.config.as_deref()).with_context(|| {
        format!(
            "loading {}",
            cli.config
                .as_deref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "default configuration".to_string())
        )
    })?;

    let save_path = resolve_save_path(cli.file.as_deref(), &config);
    let file = JsonSnapshotFile::new(&save_path);
    tracing::debug!("Using snapshot file {}", save_path.display());

    let format = cli.format.map(Into::into).unwrap_or_default();
    let formatter = Formatter::new(format, !cli.no_color);

    match cli.command {
        None | Some(Command::Play) => {
            repl::run_play(&save_path, &config, &formatter).await?;
        }
        Some(Command::List) => {
            commands::execute_list(&file, &config, &formatter)?;
        }
        Some(Command::Show(args)) => {
            commands::execute_show(args, &file, &config, &formatter)?;
        }
        Some(Command::Divorce(args)) => {
            commands::execute_divorce(args, &file, &config, &formatter)?;
        }
        Some(Command::Check) => {
            commands::execute_check(&file, &config, &formatter)
                .with_context(|| format!("checking {}", save_path.display()))?;
        }
    }

    Ok(())
}
