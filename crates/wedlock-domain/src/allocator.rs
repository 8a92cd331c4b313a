//! Round-robin color assignment for new couples

use crate::{ChatColor, Palette};

/// Hands out palette colors in order, wrapping around at the end
///
/// The allocator does not know which couples hold which color: it is a plain
/// rotating cursor. With a palette of N colors, up to N couples married in a
/// row get distinct colors and the (N+1)th gets the first color again.
/// Divorces never move the cursor back.
///
/// # Examples
///
/// ```
/// use wedlock_domain::{ChatColor, ColorAllocator, Palette};
///
/// let mut allocator = ColorAllocator::new(Palette::default());
/// assert_eq!(allocator.next_color(), ChatColor::Gold);
/// assert_eq!(allocator.next_color(), ChatColor::Aqua);
/// assert_eq!(allocator.cursor(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ColorAllocator {
    palette: Palette,
    cursor: usize,
}

impl ColorAllocator {
    /// Create an allocator positioned at the first palette color
    pub fn new(palette: Palette) -> Self {
        Self { palette, cursor: 0 }
    }

    /// Return the color under the cursor and advance the cursor by one
    pub fn next_color(&mut self) -> ChatColor {
        let color = self.palette.get(self.cursor);
        self.cursor = (self.cursor + 1) % self.palette.len();
        color
    }

    /// Index of the color the next call will return
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The palette being cycled
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

impl Default for ColorAllocator {
    fn default() -> Self {
        Self::new(Palette::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycles_through_default_palette() {
        let mut allocator = ColorAllocator::default();
        let handed_out: Vec<_> = (0..6).map(|_| allocator.next_color()).collect();

        assert_eq!(
            handed_out,
            vec![
                ChatColor::Gold,
                ChatColor::Aqua,
                ChatColor::LightPurple,
                ChatColor::Yellow,
                ChatColor::Green,
                ChatColor::Gold,
            ]
        );
        assert_eq!(allocator.cursor(), 1);
    }

    #[test]
    fn test_single_color_palette() {
        let mut allocator = ColorAllocator::new(Palette::new(vec![ChatColor::Red]).unwrap());
        assert_eq!(allocator.next_color(), ChatColor::Red);
        assert_eq!(allocator.next_color(), ChatColor::Red);
        assert_eq!(allocator.cursor(), 0);
    }
}
