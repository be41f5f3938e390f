//! Pluggable grapheme-to-columns width method.
//!
//! The renderer, [`crate::cell::Cell`] constructors, and the styled-string
//! ingest parser ([`crate::ingest`]) all measure text through the *same*
//! [`WidthMethod`] so that a cell's declared width always matches what the
//! terminal will actually allocate for it.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

/// Computes the display width, in terminal columns, of a grapheme cluster
/// or a run of text.
pub trait WidthMethod {
    /// Width of a single extended grapheme cluster (already segmented by
    /// the caller). Implementations may assume `cluster` is non-empty.
    fn cluster_width(&self, cluster: &str) -> usize;

    /// Width of an entire string, summing over its grapheme clusters.
    fn string_width(&self, s: &str) -> usize {
        s.graphemes(true).map(|g| self.cluster_width(g)).sum()
    }
}

/// Classic East-Asian width table: each `char` is measured independently
/// via `unicode-width` and summed, ignoring grapheme clustering. A
/// multi-codepoint cluster's width is the sum of its codepoints' widths,
/// which over-counts zero-width joiners and combining marks but matches
/// the behaviour of terminals that do not perform cluster-aware wcwidth.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wcwidth;

impl WidthMethod for Wcwidth {
    fn cluster_width(&self, cluster: &str) -> usize {
        cluster.chars().map(|c| c.width().unwrap_or(0)).sum()
    }
}

/// Grapheme-cluster width: the whole extended grapheme cluster is treated
/// as one unit, and its width is the width of its first non-combining
/// (base) codepoint. This matches terminals that render ZWJ sequences and
/// combining marks as a single occupied column (or two, for wide bases).
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphemeClusterWidth;

impl WidthMethod for GraphemeClusterWidth {
    fn cluster_width(&self, cluster: &str) -> usize {
        // Combining marks and zero-width joiners report width 0 from
        // `unicode-width`; the cluster's displayed width is that of its
        // widest constituent codepoint (almost always the base character).
        cluster.chars().map(|c| c.width().unwrap_or(0)).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_width_is_one_per_char() {
        assert_eq!(Wcwidth.string_width("abc"), 3);
        assert_eq!(GraphemeClusterWidth.string_width("abc"), 3);
    }

    #[test]
    fn wide_cjk_char_is_two_columns() {
        assert_eq!(Wcwidth.cluster_width("\u{4f60}"), 2); // 你
        assert_eq!(GraphemeClusterWidth.cluster_width("\u{4f60}"), 2);
    }

    #[test]
    fn zero_width_combining_mark() {
        // 'e' + combining acute accent: one grapheme cluster, width 1.
        let cluster = "e\u{0301}";
        assert_eq!(GraphemeClusterWidth.cluster_width(cluster), 1);
    }

    #[test]
    fn empty_string_has_zero_width() {
        assert_eq!(Wcwidth.string_width(""), 0);
    }
}
