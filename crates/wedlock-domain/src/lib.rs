//! Wedlock Domain Layer
//!
//! Value types shared by every other wedlock crate. Nothing in here performs
//! I/O or holds locks; the only external dependency is `uuid`.
//!
//! ## Key Concepts
//!
//! - **PlayerId**: Stable identity of a player across sessions
//! - **Couple**: An unordered pair of players joined by marriage
//! - **ChatColor / Palette**: The colors a couple's names can be rendered in
//! - **ColorAllocator**: Round-robin color assignment for new couples
//! - **Snapshot**: The durable view of marriages and couple colors

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allocator;
pub mod color;
pub mod couple;
pub mod player;
pub mod snapshot;

// Re-exports for convenience
pub use allocator::ColorAllocator;
pub use color::{ChatColor, Palette, PaletteError};
pub use couple::Couple;
pub use player::PlayerId;
pub use snapshot::Snapshot;
