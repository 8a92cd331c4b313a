//! Player identity

use std::fmt;
use std::str::FromStr;

/// Opaque, stable identifier of a player
///
/// Backed by the 128-bit value of the player's UUID. Ordering follows that
/// numeric value, which is also the ordering of the lowercase hyphenated text,
/// so the smaller of two ids is well defined and stable across restarts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(u128);

impl PlayerId {
    /// Generate a new random PlayerId
    ///
    /// # Examples
    ///
    /// ```
    /// use wedlock_domain::PlayerId;
    ///
    /// let a = PlayerId::new();
    /// let b = PlayerId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().as_u128())
    }

    /// Create a PlayerId from a raw u128 value
    pub fn from_value(value: u128) -> Self {
        Self(value)
    }

    /// Parse a PlayerId from UUID text
    ///
    /// # Examples
    ///
    /// ```
    /// use wedlock_domain::PlayerId;
    ///
    /// let id = PlayerId::from_string("0b8a1c9e-5a35-4f5b-9d0e-3f1c2b7a6d41").unwrap();
    /// assert_eq!(id.to_string(), "0b8a1c9e-5a35-4f5b-9d0e-3f1c2b7a6d41");
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s.trim())
            .map(|u| Self(u.as_u128()))
            .map_err(|e| format!("Invalid player UUID '{}': {}", s, e))
    }

    /// Derive the deterministic id of a player known only by name
    ///
    /// Matches the id an offline-mode server assigns: the MD5 of
    /// `OfflinePlayer:<name>` with the version 3 and RFC 4122 variant bits set,
    /// without a namespace.
    ///
    /// # Examples
    ///
    /// ```
    /// use wedlock_domain::PlayerId;
    ///
    /// let steve = PlayerId::offline("Steve");
    /// assert_eq!(steve.to_string(), "5627dd98-e6be-3c21-b8a8-e92344183641");
    /// ```
    pub fn offline(name: &str) -> Self {
        let digest = md5::compute(format!("OfflinePlayer:{}", name));
        let id = uuid::Builder::from_md5_bytes(digest.0).into_uuid();
        Self(id.as_u128())
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", uuid::Uuid::from_u128(self.0))
    }
}

impl FromStr for PlayerId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}
