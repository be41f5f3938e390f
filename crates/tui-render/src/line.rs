//! A single row of cells, maintaining the wide-cell/continuation-column
//! invariant on every write.

use crate::cell::{Cell, MAX_WIDE_WIDTH};

/// A fixed-width row of [`Cell`]s.
///
/// Invariants maintained by [`Line::set`] alone — there is no other way to
/// mutate a cell in place:
///
/// - A wide cell (`width() > 1`) at column `x` is always followed by
///   `width() - 1` continuation cells (`width() == 0`).
/// - A wide cell that would straddle the end of the line is replaced by a
///   blank cell carrying its style and link (it is never split).
/// - Overwriting any column that belongs to an existing wide cell —
///   whether the wide cell's own column or one of its continuations —
///   blanks every column that wide cell occupied before the new cell is
///   written.
#[derive(Debug, Clone)]
pub struct Line {
    cells: Vec<Cell>,
}

impl Line {
    /// A new line of `width` blank cells.
    #[must_use]
    pub fn blank(width: usize) -> Self {
        Self {
            cells: vec![Cell::blank_cell(); width],
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: usize) -> Option<&Cell> {
        self.cells.get(x)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Cell] {
        &self.cells
    }

    /// Resets every cell to blank, in place.
    pub fn clear(&mut self) {
        for c in &mut self.cells {
            *c = Cell::blank_cell();
        }
    }

    /// Grows or shrinks the line to `width`, padding with blanks or
    /// truncating from the right.
    pub fn resize(&mut self, width: usize) {
        self.cells.resize(width, Cell::blank_cell());
    }

    /// Finds the wide cell (if any) whose footprint covers column `x`,
    /// returning its starting column. Scans at most [`MAX_WIDE_WIDTH`]
    /// columns to the left of `x`, inclusive.
    fn wide_origin_covering(&self, x: usize) -> Option<usize> {
        let lo = x.saturating_sub(MAX_WIDE_WIDTH as usize - 1);
        for j in (lo..=x).rev() {
            let Some(c) = self.cells.get(j) else { continue };
            let w = c.width() as usize;
            if w > 1 && j + w > x {
                return Some(j);
            }
        }
        None
    }

    /// Blanks the wide cell occupying columns `[origin, origin + width)`,
    /// each column carrying that cell's own style and link.
    fn blank_wide_run(&mut self, origin: usize) {
        let w = self.cells[origin].width() as usize;
        let blanked = self.cells[origin].blank();
        let end = (origin + w).min(self.cells.len());
        for k in origin..end {
            self.cells[k] = blanked.clone();
        }
    }

    /// Writes `cell` at column `x`, repairing any wide cell it displaces
    /// and filling continuation columns if `cell` itself is wide.
    ///
    /// Returns the inclusive `(first, last)` column range actually
    /// touched, for callers that track per-row dirty ranges. A no-op
    /// (returning `None`) if `x` is out of bounds.
    pub fn set(&mut self, x: usize, cell: Cell) -> Option<(usize, usize)> {
        if x >= self.cells.len() {
            return None;
        }

        let mut touched_lo = x;
        let mut touched_hi = x;

        // If `x` falls inside an existing wide cell's footprint (including
        // being that cell's own origin), blank the whole footprint first.
        if let Some(origin) = self.wide_origin_covering(x) {
            let end = (origin + self.cells[origin].width() as usize).min(self.cells.len());
            self.blank_wide_run(origin);
            touched_lo = touched_lo.min(origin);
            touched_hi = touched_hi.max(end.saturating_sub(1));
        }

        let w = cell.width() as usize;
        if w <= 1 {
            self.cells[x] = cell;
            return Some((touched_lo, touched_hi));
        }

        if x + w > self.cells.len() {
            // Would straddle the end of the line: smear to a blank instead
            // of splitting the glyph.
            self.cells[x] = cell.blank();
            return Some((touched_lo, touched_hi));
        }

        let continuation = Cell::continuation(cell.style.clone(), cell.link.clone());
        self.cells[x] = cell;
        for k in (x + 1)..(x + w) {
            self.cells[k] = continuation.clone();
        }
        touched_hi = touched_hi.max(x + w - 1);
        Some((touched_lo, touched_hi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tui_style::{Link, Style};

    fn wide(ch: char) -> Cell {
        Cell::new(ch, &[], 2, Style::default(), Link::default())
    }

    #[test]
    fn blank_line_is_all_spaces() {
        let line = Line::blank(4);
        assert_eq!(line.len(), 4);
        for c in line.as_slice() {
            assert_eq!(c.as_str(), " ");
        }
    }

    #[test]
    fn wide_cell_fills_continuation_column() {
        let mut line = Line::blank(4);
        line.set(0, wide('你'));
        assert_eq!(line.get(0).unwrap().width(), 2);
        assert!(line.get(1).unwrap().is_continuation());
        assert_eq!(line.get(2).unwrap().as_str(), " ");
    }

    #[test]
    fn overwriting_wide_cell_origin_blanks_its_continuation() {
        let mut line = Line::blank(4);
        line.set(0, wide('你'));
        line.set(0, Cell::from_char('a'));
        assert_eq!(line.get(0).unwrap().as_str(), "a");
        assert!(!line.get(1).unwrap().is_continuation());
        assert_eq!(line.get(1).unwrap().as_str(), " ");
    }

    #[test]
    fn overwriting_continuation_column_repairs_the_wide_cell() {
        let mut line = Line::blank(4);
        line.set(0, wide('你'));
        line.set(1, Cell::from_char('b'));
        // Column 0, which used to hold the wide glyph, is now a blank
        // carrying the old cell's style/link, not the stale wide glyph.
        assert_eq!(line.get(0).unwrap().as_str(), " ");
        assert_eq!(line.get(0).unwrap().width(), 1);
        assert_eq!(line.get(1).unwrap().as_str(), "b");
    }

    #[test]
    fn wide_cell_straddling_line_end_is_smeared_to_blank() {
        let mut line = Line::blank(3);
        line.set(2, wide('你'));
        assert_eq!(line.get(2).unwrap().as_str(), " ");
        assert_eq!(line.get(2).unwrap().width(), 1);
    }

    #[test]
    fn set_out_of_bounds_is_a_no_op() {
        let mut line = Line::blank(2);
        line.set(5, Cell::from_char('z'));
        assert_eq!(line.get(0).unwrap().as_str(), " ");
    }

    #[test]
    fn resize_pads_with_blanks_and_truncates() {
        let mut line = Line::blank(2);
        line.set(0, Cell::from_char('x'));
        line.resize(4);
        assert_eq!(line.len(), 4);
        assert_eq!(line.get(3).unwrap().as_str(), " ");
        line.resize(1);
        assert_eq!(line.len(), 1);
        assert_eq!(line.get(0).unwrap().as_str(), "x");
    }
}
