//! SGR attribute set and the pen-diff algorithm.
//!
//! A [`Style`] is a snapshot of the attributes a terminal's "pen" can hold:
//! a bit-set of boolean attributes, an underline style/colour, and optional
//! foreground/background colours. The renderer never emits a full SGR
//! sequence for every cell — it tracks the pen's last known [`Style`] and
//! asks [`Style::diff_sequence`] for the minimal bytes that transform one
//! pen into another.

use std::io::{self, Write};

use bitflags::bitflags;

use crate::color::{Color, ColorProfile};

bitflags! {
    /// Boolean SGR attributes, independent of colour and underline style.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attributes: u8 {
        const BOLD          = 0b0000_0001;
        const FAINT         = 0b0000_0010;
        const ITALIC        = 0b0000_0100;
        const SLOW_BLINK    = 0b0000_1000;
        const RAPID_BLINK   = 0b0001_0000;
        const REVERSE       = 0b0010_0000;
        const CONCEAL       = 0b0100_0000;
        const STRIKETHROUGH = 0b1000_0000;
    }
}

/// Underline rendering style. `None` means no underline at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnderlineStyle {
    #[default]
    None,
    Single,
    Double,
    Curly,
    Dotted,
    Dashed,
}

impl UnderlineStyle {
    /// Sub-parameter value used in `CSI 4 : n m`.
    const fn sub_param(self) -> Option<u8> {
        match self {
            Self::None => None,
            Self::Single => Some(1),
            Self::Double => Some(2),
            Self::Curly => Some(3),
            Self::Dotted => Some(4),
            Self::Dashed => Some(5),
        }
    }
}

/// A complete terminal pen: attributes, underline style, and up to three
/// colours (foreground, background, underline colour).
///
/// The zero value (`Style::default()`) renders no escapes at all: it is
/// the terminal's implicit reset state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub attrs: Attributes,
    pub underline: UnderlineStyle,
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub underline_color: Option<Color>,
}

impl Style {
    /// The empty style: no attributes, no colours, plain underline-off.
    pub const fn new() -> Self {
        Self {
            attrs: Attributes::empty(),
            underline: UnderlineStyle::None,
            fg: None,
            bg: None,
            underline_color: None,
        }
    }

    /// True if this is the zero style (renders no escapes).
    #[must_use]
    pub fn is_reset(&self) -> bool {
        *self == Self::new()
    }

    /// Reset to the zero style in place.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    #[must_use]
    pub const fn with_attr(mut self, attr: Attributes) -> Self {
        self.attrs = Attributes::from_bits_truncate(self.attrs.bits() | attr.bits());
        self
    }

    #[must_use]
    pub const fn without_attr(mut self, attr: Attributes) -> Self {
        self.attrs = Attributes::from_bits_truncate(self.attrs.bits() & !attr.bits());
        self
    }

    #[must_use]
    pub const fn bold(self) -> Self {
        self.with_attr(Attributes::BOLD)
    }

    #[must_use]
    pub const fn italic(self) -> Self {
        self.with_attr(Attributes::ITALIC)
    }

    #[must_use]
    pub const fn underline(mut self, style: UnderlineStyle) -> Self {
        self.underline = style;
        self
    }

    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    /// Render the full SGR sequence for this style, ignoring any prior pen
    /// state. Used for the very first cell of a frame, or after a reset.
    pub fn write_full<W: Write>(&self, w: &mut W, profile: ColorProfile) -> io::Result<()> {
        if self.is_reset() {
            return Ok(());
        }
        w.write_all(b"\x1b[0")?;
        self.write_params(w, profile)?;
        w.write_all(b"m")
    }

    /// Render the minimal SGR sequence that transforms `pen` into `self`.
    ///
    /// Contract: applying the returned bytes to a terminal whose pen equals
    /// `pen` leaves it equal to `self`.
    #[must_use]
    pub fn diff_sequence(&self, pen: &Style, profile: ColorProfile) -> Vec<u8> {
        let mut out = Vec::new();
        self.write_diff(&mut out, pen, profile)
            .expect("writing to a Vec<u8> cannot fail");
        out
    }

    /// Streaming form of [`Self::diff_sequence`].
    pub fn write_diff<W: Write>(
        &self,
        w: &mut W,
        pen: &Style,
        profile: ColorProfile,
    ) -> io::Result<()> {
        if self == pen {
            return Ok(());
        }
        if self.is_reset() {
            return w.write_all(b"\x1b[0m");
        }

        let mut params: Vec<Vec<u8>> = Vec::new();

        // Attributes that turn ON.
        for (flag, on, off) in ATTR_CODES {
            let was = pen.attrs.contains(flag);
            let is = self.attrs.contains(flag);
            if was == is {
                continue;
            }
            if is {
                params.push(on.to_string().into_bytes());
            } else {
                params.push(off.to_string().into_bytes());
            }
        }

        if self.underline != pen.underline {
            match self.underline.sub_param() {
                None => params.push(b"24".to_vec()),
                Some(n) => params.push(format!("4:{n}").into_bytes()),
            }
        }

        if self.fg != pen.fg {
            push_color_params(&mut params, self.fg, profile, true);
        }
        if self.bg != pen.bg {
            push_color_params(&mut params, self.bg, profile, false);
        }
        if self.underline_color != pen.underline_color {
            push_underline_color_params(&mut params, self.underline_color, profile);
        }

        if params.is_empty() {
            return Ok(());
        }

        w.write_all(b"\x1b[")?;
        for (i, p) in params.iter().enumerate() {
            if i > 0 {
                w.write_all(b";")?;
            }
            w.write_all(p)?;
        }
        w.write_all(b"m")
    }

    fn write_params<W: Write>(&self, w: &mut W, profile: ColorProfile) -> io::Result<()> {
        for (flag, on, _off) in ATTR_CODES {
            if self.attrs.contains(flag) {
                write!(w, ";{on}")?;
            }
        }
        if let Some(n) = self.underline.sub_param() {
            write!(w, ";4:{n}")?;
        }
        let mut params = Vec::new();
        push_color_params(&mut params, self.fg, profile, true);
        push_color_params(&mut params, self.bg, profile, false);
        push_underline_color_params(&mut params, self.underline_color, profile);
        for p in params {
            w.write_all(b";")?;
            w.write_all(&p)?;
        }
        Ok(())
    }
}

/// (flag, SGR-on code, SGR-off code)
const ATTR_CODES: [(Attributes, u8, u8); 8] = [
    (Attributes::BOLD, 1, 22),
    (Attributes::FAINT, 2, 22),
    (Attributes::ITALIC, 3, 23),
    (Attributes::SLOW_BLINK, 5, 25),
    (Attributes::RAPID_BLINK, 6, 25),
    (Attributes::REVERSE, 7, 27),
    (Attributes::CONCEAL, 8, 28),
    (Attributes::STRIKETHROUGH, 9, 29),
];

fn push_color_params(out: &mut Vec<Vec<u8>>, color: Option<Color>, profile: ColorProfile, fg: bool) {
    if profile == ColorProfile::Ascii {
        return;
    }
    match color {
        None => out.push(if fg { b"39".to_vec() } else { b"49".to_vec() }),
        Some(c) => {
            let downsampled = c.downsample(profile);
            out.push(downsampled.sgr_params(fg));
        }
    }
}

fn push_underline_color_params(out: &mut Vec<Vec<u8>>, color: Option<Color>, profile: ColorProfile) {
    if profile == ColorProfile::Ascii {
        return;
    }
    match color {
        None => out.push(b"59".to_vec()),
        Some(c) => out.push(c.downsample(profile).sgr_underline_params()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_styles_diff_to_nothing() {
        let s = Style::new().bold().fg(Color::Basic(1));
        assert!(s.diff_sequence(&s, ColorProfile::TrueColor).is_empty());
    }

    #[test]
    fn zero_from_nonzero_is_single_reset() {
        let pen = Style::new().bold();
        let target = Style::new();
        assert_eq!(target.diff_sequence(&pen, ColorProfile::TrueColor), b"\x1b[0m");
    }

    #[test]
    fn only_differing_attrs_are_emitted() {
        let pen = Style::new().bold();
        let target = Style::new().bold().italic();
        let seq = target.diff_sequence(&pen, ColorProfile::TrueColor);
        assert_eq!(seq, b"\x1b[3m");
    }

    #[test]
    fn fg_color_uses_truecolor_when_allowed() {
        let pen = Style::new();
        let target = Style::new().fg(Color::Rgb(255, 128, 0));
        let seq = target.diff_sequence(&pen, ColorProfile::TrueColor);
        assert_eq!(seq, b"\x1b[38;2;255;128;0m");
    }

    #[test]
    fn fg_color_downsamples_to_ansi256() {
        let pen = Style::new();
        let target = Style::new().fg(Color::Rgb(255, 128, 0));
        let seq = target.diff_sequence(&pen, ColorProfile::Ansi256);
        assert!(seq.starts_with(b"\x1b[38;5;"));
    }

    #[test]
    fn ascii_profile_emits_no_color_params() {
        let pen = Style::new();
        let target = Style::new().bold().fg(Color::Rgb(255, 128, 0)).bg(Color::Basic(2));
        let seq = target.diff_sequence(&pen, ColorProfile::Ascii);
        assert_eq!(seq, b"\x1b[1m");
    }

    #[test]
    fn ascii_profile_emits_nothing_for_a_color_only_change() {
        let pen = Style::new().fg(Color::Basic(1));
        let target = Style::new().fg(Color::Basic(2));
        let seq = target.diff_sequence(&pen, ColorProfile::Ascii);
        assert!(seq.is_empty());
    }
}
