//! Snapshot module - the durable view of the relationship state
//!
//! Pending proposals and the color allocator cursor are deliberately absent:
//! they live only for the lifetime of the process.

use crate::{ChatColor, Couple, PlayerId};
use std::collections::BTreeMap;

/// Marriages and couple colors as written to and read from disk
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Partner lookup, both directions present for every couple
    pub marriages: BTreeMap<PlayerId, PlayerId>,

    /// Couple color keyed by the couple's canonical id
    pub colors: BTreeMap<PlayerId, ChatColor>,
}

impl Snapshot {
    /// Create an empty snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// True when there are no marriages and no colors
    pub fn is_empty(&self) -> bool {
        self.marriages.is_empty() && self.colors.is_empty()
    }

    /// Each couple once, ordered by canonical id
    ///
    /// Only symmetric entries count as a couple.
    pub fn couples(&self) -> Vec<Couple> {
        self.marriages
            .iter()
            .filter(|&(player, partner)| {
                player < partner && self.marriages.get(partner) == Some(player)
            })
            .filter_map(|(player, partner)| Couple::new(*player, *partner))
            .collect()
    }

    /// Color of the couple `player` belongs to
    pub fn color_of(&self, player: PlayerId) -> Option<ChatColor> {
        let partner = self.marriages.get(&player)?;
        let couple = Couple::new(player, *partner)?;
        self.colors.get(&couple.canonical_id()).copied()
    }
}
