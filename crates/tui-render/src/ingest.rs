//! Styled-string ingest: writes a string carrying SGR/OSC-8 escape
//! sequences into a [`Buffer`], tracking pen style and hyperlink state
//! across calls the way a real terminal would.
//!
//! This is the inverse of [`tui_style::Style::write_diff`]: instead of
//! generating the minimal escapes between two styles, it *consumes*
//! escapes already present in program output (e.g. piped subprocess
//! output, a syntax highlighter's ANSI text) and turns them into cells.

use std::iter::Peekable;
use std::str::Chars;

use tui_style::{Attributes, Color, Link, Style, UnderlineStyle};
use unicode_segmentation::UnicodeSegmentation;

use crate::buffer::{Buffer, Rect};
use crate::cell::Cell;
use crate::width::WidthMethod;

/// Streaming ANSI-to-cells writer. Holds the "current pen" (style and
/// hyperlink) across multiple [`Ingest::write_str`] calls, so a caller
/// can feed a byte stream in chunks without losing state at chunk
/// boundaries (as long as no escape sequence itself is split).
pub struct Ingest<M> {
    width: M,
    pen: Style,
    link: Link,
}

impl<M: WidthMethod> Ingest<M> {
    #[must_use]
    pub fn new(width: M) -> Self {
        Self {
            width,
            pen: Style::default(),
            link: Link::default(),
        }
    }

    #[must_use]
    pub const fn pen(&self) -> &Style {
        &self.pen
    }

    #[must_use]
    pub const fn link(&self) -> &Link {
        &self.link
    }

    /// Writes `s` into `buf` at `(x0, y0)`, confined to `rect`.
    ///
    /// `\r` resets the column to `rect.x`; `\n` does the same and advances
    /// to the next row. Printable clusters advance the column by their
    /// width.
    ///
    /// When `wrap` is `true`, a cluster that would cross `rect.right()`
    /// starts a new line instead of being clipped. When `wrap` is `false`,
    /// the line is clipped at `rect.right()`: the last cluster that still
    /// fit is overwritten by `tail` (if given, carrying the pen/link
    /// active at the point of overflow), and every following cluster on
    /// that line is discarded until the next `\r`/`\n`.
    ///
    /// Writing at or past `rect.bottom()` is a no-op. Returns the cursor
    /// position after the last character written.
    pub fn write_str(
        &mut self,
        buf: &mut Buffer,
        rect: Rect,
        x0: usize,
        y0: usize,
        wrap: bool,
        tail: Option<char>,
        s: &str,
    ) -> (usize, usize) {
        let mut x = x0;
        let mut y = y0;
        let mut clipped = false;
        let mut last_written_x = None;
        let mut run = String::new();
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\x1b' => {
                    self.flush_run(
                        buf,
                        rect,
                        &mut x,
                        &mut y,
                        wrap,
                        tail,
                        &mut clipped,
                        &mut last_written_x,
                        &run,
                    );
                    run.clear();
                    match chars.peek() {
                        Some('[') => {
                            chars.next();
                            self.consume_csi(&mut chars);
                        }
                        Some(']') => {
                            chars.next();
                            self.consume_osc(&mut chars);
                        }
                        Some(_) => {
                            chars.next();
                        }
                        None => {}
                    }
                }
                '\r' => {
                    self.flush_run(
                        buf,
                        rect,
                        &mut x,
                        &mut y,
                        wrap,
                        tail,
                        &mut clipped,
                        &mut last_written_x,
                        &run,
                    );
                    run.clear();
                    x = rect.x;
                    clipped = false;
                    last_written_x = None;
                }
                '\n' => {
                    self.flush_run(
                        buf,
                        rect,
                        &mut x,
                        &mut y,
                        wrap,
                        tail,
                        &mut clipped,
                        &mut last_written_x,
                        &run,
                    );
                    run.clear();
                    x = rect.x;
                    y += 1;
                    clipped = false;
                    last_written_x = None;
                }
                _ => run.push(c),
            }
        }
        self.flush_run(
            buf,
            rect,
            &mut x,
            &mut y,
            wrap,
            tail,
            &mut clipped,
            &mut last_written_x,
            &run,
        );
        (x, y)
    }

    #[allow(clippy::too_many_arguments)]
    fn flush_run(
        &self,
        buf: &mut Buffer,
        rect: Rect,
        x: &mut usize,
        y: &mut usize,
        wrap: bool,
        tail: Option<char>,
        clipped: &mut bool,
        last_written_x: &mut Option<usize>,
        run: &str,
    ) {
        if run.is_empty() {
            return;
        }
        for g in run.graphemes(true) {
            if *y >= rect.bottom() {
                return;
            }
            if *clipped {
                continue;
            }
            let w = self.width.cluster_width(g);
            if w == 0 {
                continue;
            }

            if *x + w > rect.right() {
                if wrap {
                    *x = rect.x;
                    *y += 1;
                    *last_written_x = None;
                    if *y >= rect.bottom() {
                        return;
                    }
                } else {
                    if let (Some(px), Some(ellipsis)) = (*last_written_x, tail) {
                        let ew = self.width.cluster_width(ellipsis.to_string().as_str());
                        if ew > 0 {
                            buf.set(px, *y, Cell::new(ellipsis, &[], ew, self.pen, self.link.clone()));
                        }
                    }
                    *clipped = true;
                    continue;
                }
            }

            let mut it = g.chars();
            let Some(primary) = it.next() else { continue };
            let combining: Vec<char> = it.collect();
            let cell = Cell::new(primary, &combining, w, self.pen, self.link.clone());
            buf.set(*x, *y, cell);
            *last_written_x = Some(*x);
            *x += w;
        }
    }

    /// Consumes a CSI sequence's parameter bytes and final byte from
    /// `chars` (positioned just past `ESC [`). Only SGR (`m`) sequences
    /// affect the pen; all others are recognized and discarded.
    fn consume_csi(&mut self, chars: &mut Peekable<Chars<'_>>) {
        let mut params = String::new();
        for c in chars.by_ref() {
            if ('\x40'..='\x7e').contains(&c) {
                if c == 'm' {
                    self.apply_sgr(&params);
                }
                return;
            }
            params.push(c);
        }
    }

    /// Consumes an OSC sequence's body up to its terminator (BEL or
    /// ST = `ESC \`) from `chars` (positioned just past `ESC ]`). Only
    /// OSC 8 (hyperlink) affects the link state.
    fn consume_osc(&mut self, chars: &mut Peekable<Chars<'_>>) {
        let mut body = String::new();
        while let Some(c) = chars.next() {
            if c == '\x07' {
                self.apply_osc(&body);
                return;
            }
            if c == '\x1b' && chars.peek() == Some(&'\\') {
                chars.next();
                self.apply_osc(&body);
                return;
            }
            body.push(c);
        }
        self.apply_osc(&body);
    }

    fn apply_osc(&mut self, body: &str) {
        let Some(rest) = body.strip_prefix("8;") else {
            return;
        };
        let Some((params, url)) = rest.split_once(';') else {
            return;
        };
        if url.is_empty() {
            self.link = Link::default();
        } else {
            self.link = Link::with_params(url, params);
        }
    }

    fn apply_sgr(&mut self, params: &str) {
        if params.is_empty() {
            self.pen = Style::default();
            return;
        }
        let tokens: Vec<&str> = params.split(';').collect();
        let mut i = 0;
        while i < tokens.len() {
            let tok = tokens[i];
            if let Some(rest) = tok.strip_prefix("4:") {
                self.pen.underline = match rest {
                    "1" => UnderlineStyle::Single,
                    "2" => UnderlineStyle::Double,
                    "3" => UnderlineStyle::Curly,
                    "4" => UnderlineStyle::Dotted,
                    "5" => UnderlineStyle::Dashed,
                    _ => UnderlineStyle::None,
                };
                i += 1;
                continue;
            }
            let Ok(code) = tok.parse::<u32>() else {
                i += 1;
                continue;
            };
            match code {
                0 => self.pen = Style::default(),
                1 => self.pen = self.pen.with_attr(Attributes::BOLD),
                2 => self.pen = self.pen.with_attr(Attributes::FAINT),
                3 => self.pen = self.pen.with_attr(Attributes::ITALIC),
                4 => self.pen.underline = UnderlineStyle::Single,
                5 => self.pen = self.pen.with_attr(Attributes::SLOW_BLINK),
                6 => self.pen = self.pen.with_attr(Attributes::RAPID_BLINK),
                7 => self.pen = self.pen.with_attr(Attributes::REVERSE),
                8 => self.pen = self.pen.with_attr(Attributes::CONCEAL),
                9 => self.pen = self.pen.with_attr(Attributes::STRIKETHROUGH),
                22 => {
                    self.pen = self
                        .pen
                        .without_attr(Attributes::BOLD)
                        .without_attr(Attributes::FAINT)
                }
                23 => self.pen = self.pen.without_attr(Attributes::ITALIC),
                24 => self.pen.underline = UnderlineStyle::None,
                25 => {
                    self.pen = self
                        .pen
                        .without_attr(Attributes::SLOW_BLINK)
                        .without_attr(Attributes::RAPID_BLINK)
                }
                27 => self.pen = self.pen.without_attr(Attributes::REVERSE),
                28 => self.pen = self.pen.without_attr(Attributes::CONCEAL),
                29 => self.pen = self.pen.without_attr(Attributes::STRIKETHROUGH),
                30..=37 => self.pen.fg = Some(Color::Basic((code - 30) as u8)),
                38 => i += self.consume_extended_color(&tokens, i, true),
                39 => self.pen.fg = None,
                40..=47 => self.pen.bg = Some(Color::Basic((code - 40) as u8)),
                48 => i += self.consume_extended_color(&tokens, i, false),
                49 => self.pen.bg = None,
                58 => i += self.consume_extended_underline_color(&tokens, i),
                59 => self.pen.underline_color = None,
                90..=97 => self.pen.fg = Some(Color::Basic((code - 90 + 8) as u8)),
                100..=107 => self.pen.bg = Some(Color::Basic((code - 100 + 8) as u8)),
                _ => {}
            }
            i += 1;
        }
    }

    /// Parses `38;...`/`48;...` extended colour params starting at
    /// `tokens[i]` (the `38`/`48` token itself). Returns the number of
    /// *extra* tokens consumed beyond that one (the caller adds its own
    /// `+1` for the code token).
    fn consume_extended_color(&mut self, tokens: &[&str], i: usize, fg: bool) -> usize {
        match tokens.get(i + 1).and_then(|t| t.parse::<u32>().ok()) {
            Some(2) => {
                let r = tokens.get(i + 2).and_then(|t| t.parse().ok()).unwrap_or(0);
                let g = tokens.get(i + 3).and_then(|t| t.parse().ok()).unwrap_or(0);
                let b = tokens.get(i + 4).and_then(|t| t.parse().ok()).unwrap_or(0);
                let color = Some(Color::Rgb(r, g, b));
                if fg {
                    self.pen.fg = color;
                } else {
                    self.pen.bg = color;
                }
                4
            }
            Some(5) => {
                let n = tokens.get(i + 2).and_then(|t| t.parse().ok()).unwrap_or(0);
                let color = Some(Color::Indexed(n));
                if fg {
                    self.pen.fg = color;
                } else {
                    self.pen.bg = color;
                }
                2
            }
            _ => 0,
        }
    }

    fn consume_extended_underline_color(&mut self, tokens: &[&str], i: usize) -> usize {
        match tokens.get(i + 1).and_then(|t| t.parse::<u32>().ok()) {
            Some(2) => {
                let r = tokens.get(i + 2).and_then(|t| t.parse().ok()).unwrap_or(0);
                let g = tokens.get(i + 3).and_then(|t| t.parse().ok()).unwrap_or(0);
                let b = tokens.get(i + 4).and_then(|t| t.parse().ok()).unwrap_or(0);
                self.pen.underline_color = Some(Color::Rgb(r, g, b));
                4
            }
            Some(5) => {
                let n = tokens.get(i + 2).and_then(|t| t.parse().ok()).unwrap_or(0);
                self.pen.underline_color = Some(Color::Indexed(n));
                2
            }
            _ => 0,
        }
    }
}
