//! Diff-based terminal renderer.
//!
//! The [`Renderer`] owns a back buffer mirroring what the terminal last
//! displayed. Each [`Renderer::present`] call compares that back buffer
//! against the caller's freshly painted [`Buffer`], using the touched-range
//! bookkeeping the caller accumulated while drawing, and emits only the
//! bytes needed to bring the terminal's screen in line. Cell equality,
//! cursor-move cost comparison, and a single-shift scroll heuristic keep
//! output close to the theoretical minimum for small, incremental updates.

use std::io::{self, Write};

use tui_style::{Link, Style};

use crate::ansi;
use crate::buffer::Buffer;
use crate::capability::Capabilities;
use crate::cell::Cell;

/// Byte-cost estimates for choosing between CUP, CHA, and CUF when
/// repositioning the cursor. Moving within the same row is usually
/// cheaper via CHA or CUF than a full CUP.
mod cost {
    #[inline]
    fn digit_count(n: u16) -> usize {
        if n >= 10000 {
            5
        } else if n >= 1000 {
            4
        } else if n >= 100 {
            3
        } else if n >= 10 {
            2
        } else {
            1
        }
    }

    /// `CSI row ; col H`
    #[inline]
    pub fn cup_cost(row: u16, col: u16) -> usize {
        4 + digit_count(row.saturating_add(1)) + digit_count(col.saturating_add(1))
    }

    /// `CSI col G`
    #[inline]
    pub fn cha_cost(col: u16) -> usize {
        3 + digit_count(col.saturating_add(1))
    }

    /// `CSI n C`, with the `n` elided for `n == 1`.
    #[inline]
    pub fn cuf_cost(n: u16) -> usize {
        match n {
            0 => 0,
            1 => 3,
            n => 3 + digit_count(n),
        }
    }

    /// `CSI n d` — same byte shape as [`cha_cost`], kept as a separate name
    /// at call sites for clarity since it costs a row, not a column.
    #[inline]
    pub fn vpa_cost(row: u16) -> usize {
        cha_cost(row)
    }
}

/// Minimum number of identical single-width cells in a row before REP
/// (repeat-preceding-character) is cheaper than writing every glyph.
const MIN_REP_RUN: usize = 4;

/// Minimum buffer height before the scroll heuristic bothers looking for
/// a shift; below this a full row-by-row diff is already cheap.
const MIN_SCROLL_HEIGHT: usize = 2;

/// Byte and cell counters for the most recent [`Renderer::present`] call,
/// useful for tests and for callers tuning redraw behavior.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresentStats {
    pub cells_written: usize,
    pub rows_touched: usize,
    pub full_redraw: bool,
    pub scrolled_rows: Option<usize>,
}

/// Tracks the terminal's actual state (pen, cursor, link, screen contents)
/// and emits the minimal diff to bring it in line with a new frame.
pub struct Renderer<W: Write> {
    out: W,
    caps: Capabilities,
    back: Buffer,
    pen: Style,
    link: Link,
    cursor: Option<(u16, u16)>,
    /// Set once a glyph has just been written into the last column of a
    /// row. A real terminal defers the actual wrap until the *next*
    /// printable character arrives, but which escape sequences see the
    /// deferred state versus the raw column differs across terminals, so a
    /// relative cursor move re-anchors to a known column first; see
    /// [`Self::position_cursor`].
    phantom: bool,
    cursor_visible: bool,
    requested_cursor: Option<(u16, u16)>,
    alt_screen: bool,
    first_frame: bool,
}

impl<W: Write> Renderer<W> {
    #[must_use]
    pub fn new(out: W, caps: Capabilities, width: usize, height: usize) -> Self {
        Self {
            out,
            caps,
            back: Buffer::new(width, height),
            pen: Style::new(),
            link: Link::default(),
            cursor: None,
            phantom: false,
            cursor_visible: true,
            requested_cursor: None,
            alt_screen: false,
            first_frame: true,
        }
    }

    #[must_use]
    pub const fn caps(&self) -> &Capabilities {
        &self.caps
    }

    /// Sets the cursor position the terminal should show after the next
    /// frame. `None` hides the cursor entirely.
    pub fn set_cursor(&mut self, pos: Option<(u16, u16)>) {
        self.requested_cursor = pos;
    }

    pub fn enter_alt_screen(&mut self) -> io::Result<()> {
        if self.alt_screen {
            return Ok(());
        }
        ansi::alt_screen_enter(&mut self.out)?;
        self.alt_screen = true;
        self.back.clear();
        self.first_frame = true;
        self.cursor = None;
        self.phantom = false;
        self.out.flush()
    }

    pub fn leave_alt_screen(&mut self) -> io::Result<()> {
        if !self.alt_screen {
            return Ok(());
        }
        ansi::alt_screen_leave(&mut self.out)?;
        self.alt_screen = false;
        self.out.flush()
    }

    /// Renders `frame` to the terminal, consuming its touched-range
    /// bookkeeping. Resizing `frame` relative to the renderer's back
    /// buffer forces a full redraw; otherwise only touched rows — and,
    /// within them, only the cells that actually changed — are emitted.
    pub fn present(&mut self, frame: &mut Buffer) -> io::Result<PresentStats> {
        let mut stats = PresentStats::default();
        if frame.width() == 0 || frame.height() == 0 {
            frame.clear_touched();
            return Ok(stats);
        }

        let dims_changed = frame.width() != self.back.width() || frame.height() != self.back.height();
        let full_redraw = dims_changed || self.first_frame;

        if dims_changed {
            self.back.resize(frame.width(), frame.height());
            self.back.clear();
        }

        let use_sync = self.caps.use_sync_output();
        if use_sync {
            ansi::sync_begin(&mut self.out)?;
        }

        if full_redraw {
            ansi::erase_display(&mut self.out, ansi::EraseDisplayMode::All)?;
            ansi::cup(&mut self.out, 0, 0)?;
            self.cursor = Some((0, 0));
            self.phantom = false;
            if !self.pen.is_reset() {
                self.out.write_all(b"\x1b[0m")?;
                self.pen = Style::new();
            }
            stats.full_redraw = true;
        }

        let scroll = if full_redraw || !self.caps.use_scroll_region() {
            None
        } else {
            detect_scroll(&self.back, frame)
        };
        if let Some(shift) = scroll {
            self.apply_scroll(frame.height(), shift)?;
            stats.scrolled_rows = Some(shift);
        }

        let rows: Vec<usize> = if full_redraw {
            (0..frame.height()).collect()
        } else {
            frame.touched_rows().collect()
        };

        for y in rows {
            let Some((lo, hi)) = (if full_redraw {
                Some((0, frame.width() - 1))
            } else {
                frame.touched_range(y)
            }) else {
                continue;
            };
            stats.rows_touched += 1;
            self.emit_row(frame, y, lo, hi, &mut stats)?;
        }

        if use_sync {
            ansi::sync_end(&mut self.out)?;
        }

        self.apply_cursor()?;

        frame.clear_touched();
        self.first_frame = false;
        self.out.flush()?;
        Ok(stats)
    }

    /// Emits every changed cell within `[lo, hi]` on row `y`, grouping
    /// consecutive changed columns into a single run to minimize cursor
    /// repositioning, then folds the written cells into the back buffer.
    fn emit_row(
        &mut self,
        frame: &Buffer,
        y: usize,
        lo: usize,
        hi: usize,
        stats: &mut PresentStats,
    ) -> io::Result<()> {
        let mut x = lo;
        while x <= hi {
            if frame.cell(x, y) == self.back.cell(x, y) {
                x += 1;
                continue;
            }

            let run_start = x;
            let mut run_end = x;
            while run_end < hi && frame.cell(run_end + 1, y) != self.back.cell(run_end + 1, y) {
                run_end += 1;
            }

            self.position_cursor(run_start as u16, y as u16)?;
            self.emit_run(frame, y, run_start, run_end, stats)?;

            // Only primary cells are copied explicitly: `Buffer::set` fills
            // in continuation columns itself, and copying a continuation
            // cell on top of an already-placed wide cell would trigger the
            // "displaced continuation" repair and blank it right back out.
            for cx in run_start..=run_end {
                if let Some(cell) = frame.cell(cx, y) {
                    if !cell.is_continuation() {
                        self.back.set(cx, y, cell.clone());
                    }
                }
            }

            x = run_end + 1;
        }
        Ok(())
    }

    /// Writes the cells in `[start, end]` on row `y`, diffing style and
    /// link against the tracked pen as it goes. Continuation cells are
    /// skipped — the terminal already advanced past them when the wide
    /// glyph before them was written. Long runs of an identical narrow
    /// cell collapse to one glyph plus REP, a blank run landing on the
    /// row's last column collapses to EL, and a blank run at just the tail
    /// of this run (not necessarily the row's edge) collapses to ECH.
    fn emit_run(
        &mut self,
        frame: &Buffer,
        y: usize,
        start: usize,
        end: usize,
        stats: &mut PresentStats,
    ) -> io::Result<()> {
        let profile = self.caps.color_profile();

        if end + 1 == frame.width() && (start..=end).all(|cx| frame.cell(cx, y) == Some(&Cell::blank_cell())) {
            Style::default().write_diff(&mut self.out, &self.pen, profile)?;
            self.pen = Style::default();
            self.apply_link(&Link::default())?;
            ansi::erase_line(&mut self.out, ansi::EraseLineMode::ToEnd)?;
            stats.cells_written += end - start + 1;
            return Ok(());
        }

        let mut x = start;
        while x <= end {
            let cell = frame.cell(x, y).expect("within row bounds");
            if cell.is_continuation() {
                x += 1;
                continue;
            }

            cell.style.write_diff(&mut self.out, &self.pen, profile)?;
            self.pen = cell.style;
            self.apply_link(&cell.link)?;

            let width = usize::from(cell.width().max(1));

            if width == 1 && cell.combining().is_empty() {
                let mut reps = 1;
                let mut next = x + 1;
                while next <= end {
                    match frame.cell(next, y) {
                        Some(c) if c == cell => {
                            reps += 1;
                            next += 1;
                        }
                        _ => break,
                    }
                }

                // A blank run doesn't need its glyph printed at all: ECH
                // erases in place without moving the cursor, so it's only
                // safe at the tail of this contiguous run.
                if reps >= 2 && x + reps - 1 == end && cell.primary() == ' ' && self.caps.use_ech() {
                    ansi::ech(&mut self.out, reps as u16)?;
                    stats.cells_written += reps;
                    x += reps;
                    continue;
                }

                if reps >= MIN_REP_RUN && self.caps.use_rep() {
                    self.out.write_all(cell.as_str().as_bytes())?;
                    ansi::rep(&mut self.out, (reps - 1) as u16)?;
                    stats.cells_written += reps;
                    let new_x = x + reps;
                    self.cursor = Some((new_x as u16, y as u16));
                    self.phantom = new_x == frame.width();
                    x = new_x;
                    continue;
                }
            }

            // Wide-glyph-at-right-edge wrap behavior is terminal-dependent;
            // bracket it with DECAWM off so the write can never trigger an
            // unwanted auto-wrap before the cursor is explicitly moved.
            let lands_at_edge = width > 1 && x + width == frame.width() && self.caps.use_decawm();
            if lands_at_edge {
                ansi::autowrap_disable(&mut self.out)?;
            }
            self.out.write_all(cell.as_str().as_bytes())?;
            if lands_at_edge {
                ansi::autowrap_enable(&mut self.out)?;
            }
            stats.cells_written += 1;
            x += width;
            self.cursor = Some((x as u16, y as u16));
            self.phantom = x == frame.width();
        }
        Ok(())
    }

    fn apply_link(&mut self, link: &Link) -> io::Result<()> {
        if !self.caps.use_hyperlinks() || link == &self.link {
            return Ok(());
        }
        if link.is_empty() {
            ansi::hyperlink_end(&mut self.out)?;
        } else {
            ansi::hyperlink(&mut self.out, &link.params, &link.url)?;
        }
        self.link = link.clone();
        Ok(())
    }

    /// Moves the cursor to `(x, y)`, picking the cheapest of CUP, CHA, HPA,
    /// VPA, and CUF given where the cursor last was and which of those the
    /// terminal's capability profile actually supports.
    ///
    /// An absolute move (CUP/CHA/HPA/VPA) clears a pending right-edge
    /// [`Self::phantom`] wrap for free; a relative move (CUF) re-anchors to
    /// a known column first, since whether the terminal treats that
    /// deferred wrap state as "still at the last column" for the purpose
    /// of a relative move varies across terminals.
    fn position_cursor(&mut self, x: u16, y: u16) -> io::Result<()> {
        if self.cursor == Some((x, y)) {
            return Ok(());
        }

        match self.cursor {
            Some((cx, cy)) if cy == y => {
                let cup_cost = cost::cup_cost(y, x);
                let cha_cost = if self.caps.use_cha() { cost::cha_cost(x) } else { usize::MAX };
                let hpa_cost = if self.caps.use_hpa() { cost::cha_cost(x) } else { usize::MAX };
                let cuf_cost = if x > cx { cost::cuf_cost(x - cx) } else { usize::MAX };

                if cuf_cost <= cup_cost && cuf_cost <= cha_cost && cuf_cost <= hpa_cost {
                    if self.phantom {
                        self.reanchor_column(cx)?;
                    }
                    ansi::cuf(&mut self.out, x - cx)?;
                } else if cha_cost <= cup_cost && cha_cost <= hpa_cost {
                    ansi::cha(&mut self.out, x)?;
                } else if hpa_cost <= cup_cost {
                    ansi::hpa(&mut self.out, x)?;
                } else {
                    ansi::cup(&mut self.out, y, x)?;
                }
            }
            Some((cx, cy)) if cx == x && cy != y && self.caps.use_vpa() => {
                if cost::vpa_cost(y) <= cost::cup_cost(y, x) {
                    ansi::vpa(&mut self.out, y)?;
                } else {
                    ansi::cup(&mut self.out, y, x)?;
                }
            }
            _ => ansi::cup(&mut self.out, y, x)?,
        }

        self.cursor = Some((x, y));
        self.phantom = false;
        Ok(())
    }

    /// Re-establishes a known column via CHA (or BS+CR as a fallback) right
    /// before a relative move, so the move isn't computed from a cursor
    /// position the terminal may already be treating as hanging past the
    /// last column of the previous row.
    fn reanchor_column(&mut self, col: u16) -> io::Result<()> {
        if self.caps.use_cha() {
            ansi::cha(&mut self.out, col)?;
        } else {
            self.out.write_all(b"\x08\r")?;
            if col > 0 {
                ansi::cuf(&mut self.out, col)?;
            }
        }
        Ok(())
    }

    fn apply_cursor(&mut self) -> io::Result<()> {
        match self.requested_cursor {
            Some((x, y)) => {
                self.position_cursor(x, y)?;
                if !self.cursor_visible {
                    ansi::cursor_show(&mut self.out)?;
                    self.cursor_visible = true;
                }
            }
            None => {
                if self.cursor_visible {
                    ansi::cursor_hide(&mut self.out)?;
                    self.cursor_visible = false;
                }
            }
        }
        Ok(())
    }

    /// Tells the terminal to scroll `shift` rows within a full-screen
    /// scroll region, then rotates the back buffer to match so the
    /// touched-row diff that follows only has to account for genuinely
    /// new content at the bottom.
    fn apply_scroll(&mut self, height: usize, shift: usize) -> io::Result<()> {
        ansi::set_scroll_region(&mut self.out, 0, (height - 1) as u16)?;
        ansi::cup(&mut self.out, 0, 0)?;
        ansi::su(&mut self.out, shift as u16)?;
        ansi::reset_scroll_region(&mut self.out)?;
        self.back.scroll_up(shift);
        self.cursor = Some((0, 0));
        self.phantom = false;
        Ok(())
    }
}

/// Looks for the smallest `shift` in `1..=height/2` such that `new`'s rows
/// `0..height-shift` exactly match `old`'s rows `shift..height` — i.e. the
/// screen scrolled up by `shift` lines and only the bottom `shift` rows
/// hold genuinely new content. Returns `None` if no such shift exists, or
/// the buffer is too short for scrolling to be worth detecting.
fn detect_scroll(old: &Buffer, new: &Buffer) -> Option<usize> {
    let height = old.height();
    if height < MIN_SCROLL_HEIGHT || old.width() != new.width() || height != new.height() {
        return None;
    }
    let max_shift = height / 2;
    'shift: for shift in 1..=max_shift {
        for y in 0..height - shift {
            let shifted = old.line(y + shift).map(crate::line::Line::as_slice);
            let current = new.line(y).map(crate::line::Line::as_slice);
            if shifted != current {
                continue 'shift;
            }
        }
        return Some(shift);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caps_no_sync() -> Capabilities {
        Capabilities::builder()
            .true_color(true)
            .osc8_hyperlinks(true)
            .scroll_region(true)
            .build()
    }

    fn render(r: &mut Renderer<Vec<u8>>, frame: &mut Buffer) -> String {
        r.present(frame).unwrap();
        String::from_utf8(std::mem::take(&mut r.out)).unwrap()
    }

    #[test]
    fn first_present_is_a_full_redraw() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 4, 2);
        let mut frame = Buffer::new(4, 2);
        frame.set(0, 0, Cell::from_char('x'));
        let out = render(&mut r, &mut frame);
        assert!(out.starts_with("\x1b[2J\x1b[1;1H"));
        assert!(out.contains('x'));
    }

    #[test]
    fn unchanged_rows_emit_nothing_on_second_frame() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 4, 2);
        let mut frame = Buffer::new(4, 2);
        frame.set(0, 0, Cell::from_char('x'));
        render(&mut r, &mut frame);

        let mut frame2 = Buffer::new(4, 2);
        frame2.set(0, 0, Cell::from_char('x'));
        frame2.clear_touched();
        let out = render(&mut r, &mut frame2);
        assert!(out.is_empty());
    }

    #[test]
    fn only_the_changed_column_is_emitted() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 4, 2);
        let mut frame = Buffer::new(4, 2);
        frame.set(0, 0, Cell::from_char('a'));
        frame.set(1, 0, Cell::from_char('b'));
        render(&mut r, &mut frame);

        let mut frame2 = Buffer::new(4, 2);
        frame2.set(0, 0, Cell::from_char('a'));
        frame2.set(1, 0, Cell::from_char('b'));
        frame2.set(1, 0, Cell::from_char('z'));
        let out = render(&mut r, &mut frame2);
        assert!(out.contains('z'));
        assert!(!out.contains("2J"));
    }

    #[test]
    fn style_change_emits_sgr_diff_not_full_reset() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 2, 1);
        let mut frame = Buffer::new(2, 1);
        frame.set(0, 0, Cell::new('a', &[], 1, Style::new().bold(), Link::default()));
        render(&mut r, &mut frame);

        let mut frame2 = Buffer::new(2, 1);
        frame2.set(0, 0, Cell::new('a', &[], 1, Style::new().bold().italic(), Link::default()));
        let out = render(&mut r, &mut frame2);
        assert_eq!(out, "\x1b[1G\x1b[3ma");
    }

    #[test]
    fn wide_cell_continuation_is_never_separately_written() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 4, 1);
        let mut frame = Buffer::new(4, 1);
        frame.set(0, 0, Cell::new('你', &[], 2, Style::default(), Link::default()));
        let out = render(&mut r, &mut frame);
        assert_eq!(out.matches('你').count(), 1);
    }

    #[test]
    fn long_identical_run_uses_rep() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 10, 1);
        let mut frame = Buffer::new(10, 1);
        for x in 0..6 {
            frame.set(x, 0, Cell::from_char('-'));
        }
        let out = render(&mut r, &mut frame);
        assert!(out.contains("\x1b[5b"));
    }

    #[test]
    fn cursor_hidden_by_default_and_shown_on_request() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 2, 1);
        let mut frame = Buffer::new(2, 1);
        frame.set(0, 0, Cell::from_char('a'));
        let out = render(&mut r, &mut frame);
        assert!(out.contains("\x1b[?25l"));

        r.set_cursor(Some((1, 0)));
        let mut frame2 = Buffer::new(2, 1);
        frame2.clear_touched();
        let out2 = render(&mut r, &mut frame2);
        assert!(out2.contains("\x1b[?25h"));
    }

    #[test]
    fn scroll_by_one_row_emits_su_and_skips_unshifted_rows() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 3, 4);
        let mut frame = Buffer::new(3, 4);
        for y in 0..4 {
            frame.set(0, y, Cell::from_char((b'a' + y as u8) as char));
        }
        render(&mut r, &mut frame);

        let mut frame2 = Buffer::new(3, 4);
        for y in 0..3 {
            frame2.set(0, y, Cell::from_char((b'b' + y as u8) as char));
        }
        frame2.set(0, 3, Cell::from_char('e'));
        let out = render(&mut r, &mut frame2);
        assert!(out.contains("\x1b[1S"));
        assert!(out.contains('e'));
    }

    #[test]
    fn hyperlink_opens_and_closes_around_a_link_run() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 4, 1);
        let mut frame = Buffer::new(4, 1);
        let link = Link::new("https://example.com");
        frame.set(0, 0, Cell::new('x', &[], 1, Style::default(), link.clone()));
        frame.set(1, 0, Cell::new('y', &[], 1, Style::default(), Link::default()));
        let out = render(&mut r, &mut frame);
        assert!(out.contains("\x1b]8;;https://example.com\x1b\\"));
        assert!(out.contains("\x1b]8;;\x1b\\"));
    }

    #[test]
    fn rep_is_not_used_when_the_capability_is_off() {
        let caps = Capabilities::builder()
            .true_color(true)
            .scroll_region(true)
            .rep(false)
            .ech(false)
            .build();
        let mut r = Renderer::new(Vec::new(), caps, 10, 1);
        let mut frame = Buffer::new(10, 1);
        for x in 0..6 {
            frame.set(x, 0, Cell::from_char('-'));
        }
        let out = render(&mut r, &mut frame);
        assert!(!out.contains('b'));
        assert_eq!(out.matches('-').count(), 6);
    }

    #[test]
    fn a_trailing_blank_run_reaching_the_last_column_uses_erase_line() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 5, 1);
        let mut frame = Buffer::new(5, 1);
        for x in 0..5 {
            frame.set(x, 0, Cell::from_char('x'));
        }
        render(&mut r, &mut frame);

        let mut frame2 = Buffer::new(5, 1);
        frame2.set(0, 0, Cell::from_char('x'));
        for x in 1..5 {
            frame2.set(x, 0, Cell::blank_cell());
        }
        let out = render(&mut r, &mut frame2);
        assert!(out.contains("\x1b[K"));
    }

    #[test]
    fn a_trailing_blank_run_short_of_the_last_column_uses_ech() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 6, 1);
        let mut frame = Buffer::new(6, 1);
        for x in 0..6 {
            frame.set(x, 0, Cell::from_char('x'));
        }
        render(&mut r, &mut frame);

        let mut frame2 = Buffer::new(6, 1);
        for x in 0..4 {
            frame2.set(x, 0, Cell::from_char('x'));
        }
        frame2.set(4, 0, Cell::blank_cell());
        frame2.set(5, 0, Cell::blank_cell());
        frame2.set(3, 0, Cell::from_char('y'));
        let out = render(&mut r, &mut frame2);
        assert!(out.contains("\x1b[2X"));
    }

    #[test]
    fn a_wide_glyph_landing_on_the_last_column_is_bracketed_with_decawm() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 4, 1);
        let mut frame = Buffer::new(4, 1);
        frame.set(2, 0, Cell::new('你', &[], 2, Style::default(), Link::default()));
        let out = render(&mut r, &mut frame);
        assert!(out.contains("\x1b[?7l"));
        assert!(out.contains("\x1b[?7h"));
    }

    #[test]
    fn moving_to_the_same_column_on_a_different_row_uses_vpa() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 20, 2);
        let mut frame = Buffer::new(20, 2);
        frame.set(10, 0, Cell::from_char('a'));
        render(&mut r, &mut frame);
        // First present's cursor is left one past the 'a' it just wrote,
        // i.e. at column 11 — matching the column this second frame
        // touches on row 1, so positioning it should prefer VPA over CUP.

        let mut frame2 = Buffer::new(20, 2);
        frame2.set(11, 1, Cell::from_char('b'));
        let out = render(&mut r, &mut frame2);
        assert!(out.contains("\x1b[2d"));
    }

    #[test]
    fn resizing_the_frame_forces_a_full_redraw() {
        let mut r = Renderer::new(Vec::new(), caps_no_sync(), 2, 1);
        let mut frame = Buffer::new(2, 1);
        render(&mut r, &mut frame);

        let mut frame2 = Buffer::new(4, 2);
        frame2.set(0, 0, Cell::from_char('z'));
        let out = render(&mut r, &mut frame2);
        assert!(out.starts_with("\x1b[2J"));
    }
}
