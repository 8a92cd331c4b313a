//! Name decoration for married players

use wedlock_domain::{ChatColor, PlayerId};
use wedlock_store::RelationshipStore;

/// Translation key of the marker shown before a married player's name
pub const MARRIED_MARKER_KEY: &str = "chat.marriagemod.married_prefix";

/// How the host should decorate a married player's displayed name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameTag {
    /// Couple color applied to both marker and name
    pub color: ChatColor,

    /// Translation key of the marker placed before the name
    pub marker_key: &'static str,
}

impl NameTag {
    /// Render `"<marker> <name>"` with legacy `§` color codes
    ///
    /// # Examples
    ///
    /// ```
    /// use wedlock_domain::ChatColor;
    /// use wedlock_host::NameTag;
    ///
    /// let tag = NameTag { color: ChatColor::Gold, marker_key: "chat.marriagemod.married_prefix" };
    /// assert_eq!(tag.render_legacy("Steve", "\u{2764}"), "\u{a7}6\u{2764} \u{a7}6Steve");
    /// ```
    pub fn render_legacy(&self, name: &str, marker: &str) -> String {
        let code = self.color.code();
        format!("\u{a7}{code}{marker} \u{a7}{code}{name}")
    }
}

/// Decoration for `player`, or `None` if unmarried or the couple has no color
///
/// Called from the host's name-render callback for every displayed player.
pub fn name_tag(store: &RelationshipStore, player: PlayerId) -> Option<NameTag> {
    store.couple_color(player).map(|color| NameTag {
        color,
        marker_key: MARRIED_MARKER_KEY,
    })
}
