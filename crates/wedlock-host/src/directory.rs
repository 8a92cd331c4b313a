//! Player lookup provided by the host

use std::collections::{HashMap, HashSet};
use wedlock_domain::PlayerId;

/// The host's view of who is playing
///
/// Implemented by the host over its player list. Names are matched the way
/// the host matches them; the command layer never normalizes them.
pub trait PlayerDirectory {
    /// Id of the online player with this name
    fn find_online(&self, name: &str) -> Option<PlayerId>;

    /// Last known name of a player, online or not
    fn name_of(&self, player: PlayerId) -> Option<String>;

    /// Whether the player is currently online
    fn is_online(&self, player: PlayerId) -> bool;
}

/// In-memory directory for tests, tools and offline-mode servers
///
/// Players are identified by [`PlayerId::offline`] of their name. Lookups by
/// name ignore ASCII case, as game servers do.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    names: HashMap<PlayerId, String>,
    online: HashSet<PlayerId>,
}

impl StaticDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring a player online, returning their id
    ///
    /// A name already online in another case refers to that player.
    pub fn join(&mut self, name: &str) -> PlayerId {
        if let Some(id) = self.find_online(name) {
            return id;
        }
        let id = PlayerId::offline(name);
        self.names.insert(id, name.to_string());
        self.online.insert(id);
        id
    }

    /// Take a player offline; their name stays known
    pub fn leave(&mut self, name: &str) -> Option<PlayerId> {
        let id = self.find_online(name)?;
        self.online.remove(&id);
        Some(id)
    }

    /// Names of online players, sorted
    pub fn online_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .online
            .iter()
            .filter_map(|id| self.names.get(id).cloned())
            .collect();
        names.sort();
        names
    }
}

impl PlayerDirectory for StaticDirectory {
    fn find_online(&self, name: &str) -> Option<PlayerId> {
        self.online.iter().copied().find(|id| {
            self.names
                .get(id)
                .is_some_and(|known| known.eq_ignore_ascii_case(name))
        })
    }

    fn name_of(&self, player: PlayerId) -> Option<String> {
        self.names.get(&player).cloned()
    }

    fn is_online(&self, player: PlayerId) -> bool {
        self.online.contains(&player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_and_leave() {
        let mut directory = StaticDirectory::new();
        let steve = directory.join("Steve");

        assert_eq!(directory.find_online("Steve"), Some(steve));
        assert_eq!(directory.find_online("Alex"), None);

        assert_eq!(directory.leave("Steve"), Some(steve));
        assert_eq!(directory.leave("Steve"), None);
        assert_eq!(directory.find_online("Steve"), None);
        assert!(!directory.is_online(steve));
        assert_eq!(directory.name_of(steve).as_deref(), Some("Steve"));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let mut directory = StaticDirectory::new();
        let steve = directory.join("Steve");

        assert_eq!(directory.find_online("steve"), Some(steve));
        assert_eq!(directory.find_online("STEVE"), Some(steve));
        assert_eq!(directory.join("sTeVe"), steve);
        assert_eq!(directory.name_of(steve).as_deref(), Some("Steve"));

        assert_eq!(directory.leave("steve"), Some(steve));
        assert!(!directory.is_online(steve));
    }

    #[test]
    fn test_online_names_sorted() {
        let mut directory = StaticDirectory::new();
        directory.join("Zed");
        directory.join("Alex");
        directory.join("Mia");
        directory.leave("Mia");

        assert_eq!(directory.online_names(), vec!["Alex", "Zed"]);
    }
}
