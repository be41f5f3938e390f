//! One display cell: a primary rune, any combining marks, its width, and
//! the style/link painted under it.

use smallvec::SmallVec;
use tui_style::{Link, Style};

/// Maximum display width a single cell (or a wide cell's footprint) can
/// occupy. Bounds the backward scan [`crate::line::Line::set`] performs to
/// repair a damaged wide cell from a continuation column.
pub const MAX_WIDE_WIDTH: u8 = 4;

/// Maximum number of trailing combining marks stored inline on a cell.
/// This is a "short sequence" per the data model — grapheme clusters that
/// need more than this are unusual enough that truncating them (keeping
/// the first `MAX_COMBINING`) is an acceptable lossy fallback.
pub const MAX_COMBINING: usize = 4;

/// One grid location: a glyph (primary code point plus any combining
/// marks), its display width, and the style/link painted under it.
///
/// A width-0 cell is a *continuation placeholder*: it occupies the column
/// immediately right of a wide primary cell and carries that cell's style
/// and link (so erasing or querying it alone still reads sensibly).
#[derive(Debug, Clone)]
pub struct Cell {
    primary: char,
    combining: SmallVec<[char; MAX_COMBINING]>,
    width: u8,
    pub style: Style,
    pub link: Link,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank_cell()
    }
}

impl Cell {
    /// The blank cell: a space, width 1, zero style, zero link.
    #[must_use]
    pub fn blank_cell() -> Self {
        Self {
            primary: ' ',
            combining: SmallVec::new(),
            width: 1,
            style: Style::default(),
            link: Link::default(),
        }
    }

    /// A continuation placeholder inheriting `style`/`link` from the wide
    /// cell it sits to the right of.
    #[must_use]
    pub fn continuation(style: Style, link: Link) -> Self {
        Self {
            primary: ' ',
            combining: SmallVec::new(),
            width: 0,
            style,
            link,
        }
    }

    /// A cell holding `primary` (plus optional combining marks) at the
    /// given `width`, computed by the caller via a [`crate::width::WidthMethod`].
    ///
    /// `width` is clamped to `0..=4`; combining marks beyond
    /// [`MAX_COMBINING`] are dropped.
    #[must_use]
    pub fn new(primary: char, combining: &[char], width: usize, style: Style, link: Link) -> Self {
        let mut marks = SmallVec::new();
        marks.extend(combining.iter().copied().take(MAX_COMBINING));
        Self {
            primary,
            combining: marks,
            width: width.min(MAX_WIDE_WIDTH as usize) as u8,
            style,
            link,
        }
    }

    /// A plain single-width cell holding one character, zero style/link.
    #[must_use]
    pub fn from_char(c: char) -> Self {
        Self {
            primary: c,
            combining: SmallVec::new(),
            width: 1,
            style: Style::default(),
            link: Link::default(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u8 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn is_continuation(&self) -> bool {
        self.width == 0
    }

    #[inline]
    #[must_use]
    pub const fn primary(&self) -> char {
        self.primary
    }

    #[inline]
    #[must_use]
    pub fn combining(&self) -> &[char] {
        &self.combining
    }

    /// The on-screen string: the primary code point followed by any
    /// combining marks.
    #[must_use]
    pub fn as_str(&self) -> String {
        let mut s = String::with_capacity(1 + self.combining.len());
        s.push(self.primary);
        for c in &self.combining {
            s.push(*c);
        }
        s
    }

    /// This cell with the same style and link but its glyph replaced by a
    /// single blank space (width 1). Used to repair displaced continuation
    /// columns and to "smear" a wide cell that would overrun its line.
    #[must_use]
    pub fn blank(&self) -> Self {
        Self {
            primary: ' ',
            combining: SmallVec::new(),
            width: 1,
            style: self.style.clone(),
            link: self.link.clone(),
        }
    }
}

impl PartialEq for Cell {
    /// Structural equality, except that combining-mark *order* is ignored
    /// when both cells report the same width — two cells holding the same
    /// base glyph with the same combining marks in a different order, but
    /// yielding the same width, compare equal.
    fn eq(&self, other: &Self) -> bool {
        if self.width != other.width {
            return false;
        }
        if self.primary != other.primary || self.style != other.style || self.link != other.link {
            return false;
        }
        if self.combining.len() != other.combining.len() {
            return false;
        }
        let mut a: SmallVec<[char; MAX_COMBINING]> = self.combining.clone();
        let mut b: SmallVec<[char; MAX_COMBINING]> = other.combining.clone();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

impl Eq for Cell {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cell_is_space_width_one() {
        let c = Cell::blank_cell();
        assert_eq!(c.as_str(), " ");
        assert_eq!(c.width(), 1);
        assert!(c.style.is_reset());
        assert!(c.link.is_empty());
    }

    #[test]
    fn continuation_has_zero_width() {
        let style = Style::new().bold();
        let link = Link::new("https://x");
        let c = Cell::continuation(style, link.clone());
        assert!(c.is_continuation());
        assert_eq!(c.link, link);
    }

    #[test]
    fn blank_preserves_style_and_link() {
        let style = Style::new().bold();
        let link = Link::new("https://x");
        let c = Cell::new('X', &[], 1, style.clone(), link.clone());
        let blanked = c.blank();
        assert_eq!(blanked.as_str(), " ");
        assert_eq!(blanked.style, style);
        assert_eq!(blanked.link, link);
    }

    #[test]
    fn equality_ignores_combining_mark_order_when_widths_match() {
        let a = Cell::new('e', &['\u{0301}', '\u{0300}'], 1, Style::default(), Link::default());
        let b = Cell::new('e', &['\u{0300}', '\u{0301}'], 1, Style::default(), Link::default());
        assert_eq!(a, b);
    }

    #[test]
    fn width_mismatch_breaks_equality_even_with_same_marks() {
        let a = Cell::new('e', &[], 1, Style::default(), Link::default());
        let b = Cell::new('e', &[], 2, Style::default(), Link::default());
        assert_ne!(a, b);
    }

    #[test]
    fn combining_marks_beyond_cap_are_dropped() {
        let marks: Vec<char> = vec!['\u{0301}'; MAX_COMBINING + 3];
        let c = Cell::new('e', &marks, 1, Style::default(), Link::default());
        assert_eq!(c.combining().len(), MAX_COMBINING);
    }
}
