//! Couple module - an unordered pair of married players

use crate::PlayerId;

/// Two distinct players joined by marriage
///
/// The pair is unordered: `Couple::new(a, b) == Couple::new(b, a)`. Members are
/// stored sorted so the first one is always the canonical couple id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Couple {
    first: PlayerId,
    second: PlayerId,
}

impl Couple {
    /// Pair two players, or `None` when both ids are the same player
    ///
    /// # Examples
    ///
    /// ```
    /// use wedlock_domain::{Couple, PlayerId};
    ///
    /// let a = PlayerId::from_value(1);
    /// let b = PlayerId::from_value(2);
    /// let couple = Couple::new(b, a).unwrap();
    /// assert_eq!(couple.canonical_id(), a);
    /// assert!(Couple::new(a, a).is_none());
    /// ```
    pub fn new(a: PlayerId, b: PlayerId) -> Option<Self> {
        if a == b {
            return None;
        }
        let (first, second) = if a < b { (a, b) } else { (b, a) };
        Some(Self { first, second })
    }

    /// Key for couple-scoped data: the smaller of the two ids
    pub fn canonical_id(&self) -> PlayerId {
        self.first
    }

    /// Both members, smaller id first
    pub fn members(&self) -> (PlayerId, PlayerId) {
        (self.first, self.second)
    }

    /// Whether `player` is one of the two members
    pub fn contains(&self, player: PlayerId) -> bool {
        self.first == player || self.second == player
    }

    /// The other member, or `None` if `player` is not in this couple
    pub fn partner_of(&self, player: PlayerId) -> Option<PlayerId> {
        if player == self.first {
            Some(self.second)
        } else if player == self.second {
            Some(self.first)
        } else {
            None
        }
    }
}
