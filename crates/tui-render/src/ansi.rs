//! Pure ANSI/VT escape sequence byte-generation helpers.
//!
//! These are stateless functions — the [`crate::renderer::Renderer`] is
//! responsible for deciding *when* to call them and for all cursor/mode
//! state tracking. SGR sequences for style/color are generated by
//! [`tui_style::Style::write_diff`] and `write_full`, not here.
//!
//! # Sequence reference
//!
//! | Category | Sequence | Description |
//! |----------|----------|-------------|
//! | CSI | `ESC [ row ; col H` | CUP (Cursor Position, 1-indexed) |
//! | CSI | `ESC [ n G` | CHA (Cursor Horizontal Absolute) |
//! | CSI | `ESC [ n d` | VPA (Line Position Absolute) |
//! | CSI | `ESC [ n \`` | HPA (Character Position Absolute) |
//! | CSI | `ESC [ n K` | EL (Erase Line) |
//! | CSI | `ESC [ n J` | ED (Erase Display) |
//! | CSI | `ESC [ n L` / `n M` | IL / DL (Insert / Delete Line) |
//! | CSI | `ESC [ n @` / `n P` | ICH / DCH (Insert / Delete Character) |
//! | CSI | `ESC [ n X` | ECH (Erase Character) |
//! | CSI | `ESC [ n b` | REP (Repeat Preceding Character) |
//! | CSI | `ESC [ n S` / `n T` | SU / SD (Scroll Up / Down) |
//! | CSI | `ESC [ top ; bottom r` | DECSTBM (Set Scroll Region) |
//! | CSI | `ESC [ ? 2026 h/l` | Synchronized Output (DEC) |
//! | OSC | `ESC ] 8 ; params ; url ST` | Hyperlink (OSC 8) |
//! | DEC | `ESC 7` / `ESC 8` | Cursor save/restore (DECSC/DECRC) |

use std::io::{self, Write};

// =============================================================================
// Cursor Positioning
// =============================================================================

/// CUP (Cursor Position): `CSI row ; col H` (1-indexed). Row/col
/// parameters are 0-indexed; this converts to 1-indexed for the wire.
pub fn cup<W: Write>(w: &mut W, row: u16, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", row + 1, col + 1)
}

/// CHA (Cursor Horizontal Absolute): `CSI col G` (1-indexed).
pub fn cha<W: Write>(w: &mut W, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{}G", col + 1)
}

/// VPA (Line Position Absolute): `CSI row d` (1-indexed).
pub fn vpa<W: Write>(w: &mut W, row: u16) -> io::Result<()> {
    write!(w, "\x1b[{}d", row + 1)
}

/// HPA (Character Position Absolute): `CSI col \`` (1-indexed).
/// Equivalent to [`cha`] on every terminal this crate targets; provided
/// because some peers only recognize one of the two forms.
pub fn hpa<W: Write>(w: &mut W, col: u16) -> io::Result<()> {
    write!(w, "\x1b[{}`", col + 1)
}

pub fn cuu<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    match n {
        0 => Ok(()),
        1 => w.write_all(b"\x1b[A"),
        n => write!(w, "\x1b[{n}A"),
    }
}

pub fn cud<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    match n {
        0 => Ok(()),
        1 => w.write_all(b"\x1b[B"),
        n => write!(w, "\x1b[{n}B"),
    }
}

pub fn cuf<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    match n {
        0 => Ok(()),
        1 => w.write_all(b"\x1b[C"),
        n => write!(w, "\x1b[{n}C"),
    }
}

pub fn cub<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    match n {
        0 => Ok(()),
        1 => w.write_all(b"\x1b[D"),
        n => write!(w, "\x1b[{n}D"),
    }
}

pub const CURSOR_SAVE: &[u8] = b"\x1b7";
pub const CURSOR_RESTORE: &[u8] = b"\x1b8";

#[inline]
pub fn cursor_save<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SAVE)
}

#[inline]
pub fn cursor_restore<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_RESTORE)
}

pub const CURSOR_HIDE: &[u8] = b"\x1b[?25l";
pub const CURSOR_SHOW: &[u8] = b"\x1b[?25h";

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_HIDE)
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(CURSOR_SHOW)
}

// =============================================================================
// Line / Character Editing
// =============================================================================

/// IL (Insert Line): `CSI n L`.
pub fn il<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}L")
}

/// DL (Delete Line): `CSI n M`.
pub fn dl<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}M")
}

/// ICH (Insert Character): `CSI n @`.
pub fn ich<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}@")
}

/// DCH (Delete Character): `CSI n P`.
pub fn dch<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}P")
}

/// ECH (Erase Character): `CSI n X`. Erases without shifting trailing
/// content, unlike [`dch`].
pub fn ech<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}X")
}

/// REP (Repeat Preceding Character): `CSI n b`. Cheaper than re-emitting
/// the same glyph `n` times when the terminal supports it.
pub fn rep<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}b")
}

/// SU (Scroll Up): `CSI n S`. Scrolls the active scroll region up,
/// discarding the top `n` lines and pulling blanks in at the bottom.
pub fn su<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}S")
}

/// SD (Scroll Down): `CSI n T`.
pub fn sd<W: Write>(w: &mut W, n: u16) -> io::Result<()> {
    if n == 0 {
        return Ok(());
    }
    write!(w, "\x1b[{n}T")
}

// =============================================================================
// Erase Operations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseLineMode {
    ToEnd,
    ToStart,
    All,
}

pub fn erase_line<W: Write>(w: &mut W, mode: EraseLineMode) -> io::Result<()> {
    match mode {
        EraseLineMode::ToEnd => w.write_all(b"\x1b[K"),
        EraseLineMode::ToStart => w.write_all(b"\x1b[1K"),
        EraseLineMode::All => w.write_all(b"\x1b[2K"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EraseDisplayMode {
    ToEnd,
    ToStart,
    All,
    Scrollback,
}

pub fn erase_display<W: Write>(w: &mut W, mode: EraseDisplayMode) -> io::Result<()> {
    match mode {
        EraseDisplayMode::ToEnd => w.write_all(b"\x1b[J"),
        EraseDisplayMode::ToStart => w.write_all(b"\x1b[1J"),
        EraseDisplayMode::All => w.write_all(b"\x1b[2J"),
        EraseDisplayMode::Scrollback => w.write_all(b"\x1b[3J"),
    }
}

// =============================================================================
// Scroll Region
// =============================================================================

/// DECSTBM (Set Top and Bottom Margins): `CSI top ; bottom r`. Top/bottom
/// are 0-indexed.
pub fn set_scroll_region<W: Write>(w: &mut W, top: u16, bottom: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}r", top + 1, bottom + 1)
}

pub const RESET_SCROLL_REGION: &[u8] = b"\x1b[r";

#[inline]
pub fn reset_scroll_region<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(RESET_SCROLL_REGION)
}

// =============================================================================
// Auto-wrap Mode (DECAWM)
// =============================================================================

pub const AUTOWRAP_DISABLE: &[u8] = b"\x1b[?7l";
pub const AUTOWRAP_ENABLE: &[u8] = b"\x1b[?7h";

/// Disables auto-wrap (DECAWM off). Bracketed around a wide glyph written
/// at the last column of a line, since wide-glyph-at-edge wrap behavior is
/// terminal-dependent.
#[inline]
pub fn autowrap_disable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(AUTOWRAP_DISABLE)
}

#[inline]
pub fn autowrap_enable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(AUTOWRAP_ENABLE)
}

// =============================================================================
// Synchronized Output (DEC 2026)
// =============================================================================

pub const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";
pub const SYNC_END: &[u8] = b"\x1b[?2026l";

#[inline]
pub fn sync_begin<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SYNC_BEGIN)
}

#[inline]
pub fn sync_end<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(SYNC_END)
}

// =============================================================================
// OSC 8 Hyperlinks
// =============================================================================

/// Opens (or, with an empty url, closes) an OSC 8 hyperlink.
/// Format: `OSC 8 ; params ; uri ST`.
pub fn hyperlink<W: Write>(w: &mut W, params: &str, url: &str) -> io::Result<()> {
    write!(w, "\x1b]8;{params};{url}\x1b\\")
}

pub fn hyperlink_end<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(b"\x1b]8;;\x1b\\")
}

// =============================================================================
// Mode Control
// =============================================================================

pub const ALT_SCREEN_ENTER: &[u8] = b"\x1b[?1049h";
pub const ALT_SCREEN_LEAVE: &[u8] = b"\x1b[?1049l";
pub const BRACKETED_PASTE_ENABLE: &[u8] = b"\x1b[?2004h";
pub const BRACKETED_PASTE_DISABLE: &[u8] = b"\x1b[?2004l";

/// Normal tracking (1000) + button-motion tracking (1002) + SGR extended
/// coordinates (1006), the combination that reports releases and motion
/// without truncating coordinates past column/row 223.
pub const MOUSE_ENABLE: &[u8] = b"\x1b[?1000;1002;1006h";
pub const MOUSE_DISABLE: &[u8] = b"\x1b[?1000;1002;1006l";
pub const FOCUS_ENABLE: &[u8] = b"\x1b[?1004h";
pub const FOCUS_DISABLE: &[u8] = b"\x1b[?1004l";

/// Kitty keyboard protocol, requesting disambiguated escape codes and
/// reported event types (push onto the terminal's mode stack): `CSI > 1 u`.
pub const KITTY_KEYBOARD_ENABLE: &[u8] = b"\x1b[>1u";
/// Pop the pushed Kitty keyboard mode: `CSI < u`.
pub const KITTY_KEYBOARD_DISABLE: &[u8] = b"\x1b[<u";

#[inline]
pub fn alt_screen_enter<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_SCREEN_ENTER)
}

#[inline]
pub fn alt_screen_leave<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(ALT_SCREEN_LEAVE)
}

#[inline]
pub fn bracketed_paste_enable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(BRACKETED_PASTE_ENABLE)
}

#[inline]
pub fn bracketed_paste_disable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(BRACKETED_PASTE_DISABLE)
}

#[inline]
pub fn mouse_enable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(MOUSE_ENABLE)
}

#[inline]
pub fn mouse_disable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(MOUSE_DISABLE)
}

#[inline]
pub fn focus_enable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(FOCUS_ENABLE)
}

#[inline]
pub fn focus_disable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(FOCUS_DISABLE)
}

#[inline]
pub fn kitty_keyboard_enable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(KITTY_KEYBOARD_ENABLE)
}

#[inline]
pub fn kitty_keyboard_disable<W: Write>(w: &mut W) -> io::Result<()> {
    w.write_all(KITTY_KEYBOARD_DISABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_bytes<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> Vec<u8> {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        buf
    }

    #[test]
    fn cup_is_one_indexed() {
        assert_eq!(to_bytes(|w| cup(w, 0, 0)), b"\x1b[1;1H");
        assert_eq!(to_bytes(|w| cup(w, 23, 79)), b"\x1b[24;80H");
    }

    #[test]
    fn cha_vpa_hpa_are_one_indexed() {
        assert_eq!(to_bytes(|w| cha(w, 0)), b"\x1b[1G");
        assert_eq!(to_bytes(|w| vpa(w, 9)), b"\x1b[10d");
        assert_eq!(to_bytes(|w| hpa(w, 9)), b"\x1b[10`");
    }

    #[test]
    fn relative_moves_elide_explicit_count_of_one() {
        assert_eq!(to_bytes(|w| cuu(w, 1)), b"\x1b[A");
        assert_eq!(to_bytes(|w| cuu(w, 5)), b"\x1b[5A");
        assert_eq!(to_bytes(|w| cuu(w, 0)), b"");
    }

    #[test]
    fn line_and_character_editing_sequences() {
        assert_eq!(to_bytes(|w| il(w, 2)), b"\x1b[2L");
        assert_eq!(to_bytes(|w| dl(w, 3)), b"\x1b[3M");
        assert_eq!(to_bytes(|w| ich(w, 1)), b"\x1b[1@");
        assert_eq!(to_bytes(|w| dch(w, 4)), b"\x1b[4P");
        assert_eq!(to_bytes(|w| ech(w, 5)), b"\x1b[5X");
        assert_eq!(to_bytes(|w| rep(w, 6)), b"\x1b[6b");
        assert_eq!(to_bytes(|w| su(w, 1)), b"\x1b[1S");
        assert_eq!(to_bytes(|w| sd(w, 1)), b"\x1b[1T");
    }

    #[test]
    fn zero_count_editing_ops_are_noops() {
        assert_eq!(to_bytes(|w| il(w, 0)), b"");
        assert_eq!(to_bytes(|w| ech(w, 0)), b"");
        assert_eq!(to_bytes(|w| rep(w, 0)), b"");
    }

    #[test]
    fn erase_modes() {
        assert_eq!(to_bytes(|w| erase_line(w, EraseLineMode::ToEnd)), b"\x1b[K");
        assert_eq!(to_bytes(|w| erase_line(w, EraseLineMode::All)), b"\x1b[2K");
        assert_eq!(
            to_bytes(|w| erase_display(w, EraseDisplayMode::Scrollback)),
            b"\x1b[3J"
        );
    }

    #[test]
    fn autowrap_toggle_sequences() {
        assert_eq!(to_bytes(autowrap_disable), AUTOWRAP_DISABLE);
        assert_eq!(to_bytes(autowrap_enable), AUTOWRAP_ENABLE);
    }

    #[test]
    fn scroll_region_is_one_indexed() {
        assert_eq!(to_bytes(|w| set_scroll_region(w, 0, 23)), b"\x1b[1;24r");
    }

    #[test]
    fn hyperlink_sequences_are_terminated() {
        let start = to_bytes(|w| hyperlink(w, "", "https://example.com"));
        assert_eq!(start, b"\x1b]8;;https://example.com\x1b\\");
        assert!(to_bytes(hyperlink_end).ends_with(b"\x1b\\"));
    }

    #[test]
    fn mode_sequences_round_trip_enable_disable() {
        assert_eq!(to_bytes(alt_screen_enter), ALT_SCREEN_ENTER);
        assert_eq!(to_bytes(alt_screen_leave), ALT_SCREEN_LEAVE);
        assert_eq!(to_bytes(mouse_enable), MOUSE_ENABLE);
        assert_eq!(to_bytes(kitty_keyboard_enable), KITTY_KEYBOARD_ENABLE);
    }

    #[test]
    fn all_constant_sequences_are_ascii() {
        for seq in [
            CURSOR_SAVE,
            CURSOR_RESTORE,
            CURSOR_HIDE,
            CURSOR_SHOW,
            RESET_SCROLL_REGION,
            AUTOWRAP_DISABLE,
            AUTOWRAP_ENABLE,
            SYNC_BEGIN,
            SYNC_END,
            ALT_SCREEN_ENTER,
            ALT_SCREEN_LEAVE,
            BRACKETED_PASTE_ENABLE,
            BRACKETED_PASTE_DISABLE,
            MOUSE_ENABLE,
            MOUSE_DISABLE,
            FOCUS_ENABLE,
            FOCUS_DISABLE,
            KITTY_KEYBOARD_ENABLE,
            KITTY_KEYBOARD_DISABLE,
        ] {
            for &byte in seq {
                assert!(byte < 128, "non-ASCII byte {byte:#x} in sequence");
            }
        }
    }
}
