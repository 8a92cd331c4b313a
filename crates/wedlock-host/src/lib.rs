//! Wedlock Host Adapter
//!
//! The layer a game server embeds to offer marriages to its players. The host
//! keeps ownership of command registration, the player list and chat
//! rendering; this crate turns those events into store operations and hands
//! back structured results for the host to render.
//!
//! # Overview
//!
//! - **Lifecycle**: [`MarriageService::start`] on server start loads the
//!   world's snapshot file, [`MarriageService::shutdown`] on server stop
//!   writes the final state
//! - **Commands**: [`ChatCommand`] parses `/marry`, `/divorce` and the
//!   accept/deny button commands (English and German), [`CommandDispatcher`]
//!   runs them and returns a [`CommandOutcome`] of translatable notices
//! - **Name tags**: [`name_tag`] tells the host which color and marker to put
//!   on a married player's name
//! - **Background flushing**: with `flush_mode = "background"` snapshots are
//!   written by a single [`FlushWorker`] task instead of on the caller's thread
//!
//! # Usage
//!
//! ```no_run
//! use wedlock_host::{ChatCommand, HostConfig, MarriageService, StaticDirectory};
//! use wedlock_domain::PlayerId;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HostConfig::load_or_default(None)?;
//! let service = MarriageService::start(&config, "world")?;
//!
//! let mut players = StaticDirectory::new();
//! let steve = players.join("Steve");
//! players.join("Alex");
//!
//! let outcome = service.execute(steve, "/marry Alex", &players)?;
//! for notice in &outcome.notices {
//!     println!("{}", notice.render());
//! }
//!
//! service.shutdown().await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! save_file_name = "marriagemod.json"
//! palette = ["gold", "aqua", "light_purple", "yellow", "green"]
//! flush_mode = "inline"
//! ```

#![warn(missing_docs)]

pub mod commands;
pub mod config;
mod directory;
mod error;
mod nametag;
mod service;
mod writer;

pub use commands::{
    Audience, ChatCommand, ClickAction, CommandDispatcher, CommandOutcome, MessageKey, Notice,
    ParseError,
};
pub use config::{ConfigError, FlushMode, HostConfig};
pub use directory::{PlayerDirectory, StaticDirectory};
pub use error::ServiceError;
pub use nametag::{name_tag, NameTag};
pub use service::MarriageService;
pub use writer::{BackgroundWriter, FlushWorker};
