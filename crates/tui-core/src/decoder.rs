//! Resumable terminal input decoder.
//!
//! Byte-at-a-time state machine: feed it a chunk, get back the number of
//! bytes consumed and, if a sequence completed, the event it produced.
//! All state lives in `self`; there is no global state, so a decoder can
//! be fed from however many reads it takes a sequence to arrive.

use crate::event::{
    CapabilityEvent, ClipboardEvent, ClipboardSource, ColorReportEvent, CursorPositionReportEvent,
    DeviceAttributesEvent, Event, FocusEvent, KeyCode, KeyEvent, KeyEventKind, ModeReportEvent,
    Modifiers, MouseButton, MouseEvent, MouseEventKind, PasteEvent, TermcapEvent, UnknownCsiEvent,
    UnknownEvent, WindowSizeEvent,
};
use bitflags::bitflags;

/// DoS guard: a CSI/DCS parameter run longer than this aborts the sequence.
const MAX_SEQ_LEN: usize = 256;
/// DoS guard: an OSC payload longer than this aborts the sequence.
const MAX_OSC_LEN: usize = 4096;
/// DoS guard: a bracketed paste longer than this stops buffering content
/// (the end marker is still tracked so the paste terminates correctly).
const MAX_PASTE_LEN: usize = 1 << 20;

bitflags! {
    /// Controls how ambiguous single-byte control codes are reported.
    /// Default (all flags clear) matches modern terminal convention.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LegacyKeyEncoding: u8 {
        /// Report NUL (0x00) as Ctrl+Space instead of Ctrl+@.
        const NUL_AS_CTRL_SPACE = 1 << 0;
        /// Report HT (0x09) as plain Ctrl+I instead of Tab.
        const TAB_AS_CTRL_I = 1 << 1;
        /// Report CR (0x0D) as plain Ctrl+M instead of Enter.
        const CR_AS_CTRL_M = 1 << 2;
        /// Report ESC (0x1B) as plain Ctrl+[ instead of Escape.
        const ESC_AS_CTRL_BRACKET = 1 << 3;
        /// Report DEL (0x7F) as Delete instead of Backspace.
        const DEL_AS_DELETE = 1 << 4;
        /// Report CSI `1~`/`4~` (Find/Select) as Home/End instead of
        /// leaving them unrecognised.
        const FIND_SELECT_AS_HOME_END = 1 << 5;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Ground,
    Escape,
    Csi,
    Ss3,
    Osc,
    OscEscape,
    Dcs,
    DcsEscape,
    Utf8 { collected: u8, expected: u8 },
}

#[derive(Debug, Clone)]
pub struct Decoder {
    state: State,
    legacy: LegacyKeyEncoding,
    csi_params: Vec<u8>,
    csi_intermediates: Vec<u8>,
    osc_buf: Vec<u8>,
    dcs_buf: Vec<u8>,
    utf8_buf: [u8; 4],
    in_paste: bool,
    paste_buf: Vec<u8>,
    paste_tail: Vec<u8>,
    /// An event produced as a side effect of handling a byte that itself
    /// needs to be reprocessed (e.g. the byte that follows an aborted
    /// UTF-8 sequence). Drained before the next input byte is consumed.
    pending_replay: Option<u8>,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_legacy_encoding(LegacyKeyEncoding::empty())
    }

    #[must_use]
    pub fn with_legacy_encoding(legacy: LegacyKeyEncoding) -> Self {
        Self {
            state: State::Ground,
            legacy,
            csi_params: Vec::new(),
            csi_intermediates: Vec::new(),
            osc_buf: Vec::new(),
            dcs_buf: Vec::new(),
            utf8_buf: [0; 4],
            in_paste: false,
            paste_buf: Vec::new(),
            paste_tail: Vec::new(),
            pending_replay: None,
        }
    }

    /// Feeds as much of `bytes` as needed to produce the next event.
    ///
    /// Returns `(consumed, event)`. `event` is `None` when `bytes` ran out
    /// before a sequence completed (or the completed sequence simply
    /// yields nothing, such as an OSC this decoder doesn't surface as an
    /// event) — the caller must retry with `consumed` bytes dropped plus
    /// whatever arrives next.
    pub fn decode(&mut self, bytes: &[u8]) -> (usize, Option<Event>) {
        let mut i = 0;
        if let Some(byte) = self.pending_replay.take() {
            if let Some(event) = self.feed(byte) {
                return (i, Some(event));
            }
        }
        while i < bytes.len() {
            let byte = bytes[i];
            i += 1;
            if let Some(event) = self.feed(byte) {
                return (i, Some(event));
            }
        }
        (i, None)
    }

    /// Resolves any escape sequence left hanging because the reader hit
    /// EOF or a timeout rather than delivering another byte. A lone ESC
    /// becomes `KeyPress(Escape)`; any other pending state is dropped.
    pub fn finish(&mut self) -> Option<Event> {
        let event = match self.state {
            State::Escape => Some(Event::KeyPress(KeyEvent::new(KeyCode::Escape))),
            _ => None,
        };
        self.state = State::Ground;
        event
    }

    fn feed(&mut self, byte: u8) -> Option<Event> {
        if self.in_paste {
            return self.process_paste_byte(byte);
        }
        match self.state {
            State::Ground => self.process_ground(byte),
            State::Escape => self.process_escape(byte),
            State::Csi => self.process_csi(byte),
            State::Ss3 => self.process_ss3(byte),
            State::Osc => self.process_osc(byte),
            State::OscEscape => self.process_osc_escape(byte),
            State::Dcs => self.process_dcs(byte),
            State::DcsEscape => self.process_dcs_escape(byte),
            State::Utf8 { collected, expected } => self.process_utf8(byte, collected, expected),
        }
    }

    fn process_ground(&mut self, byte: u8) -> Option<Event> {
        match byte {
            0x1B => {
                self.state = State::Escape;
                None
            }
            0x00..=0x1F | 0x7F => Some(self.parse_control(byte)),
            0x20..=0x7E => Some(Event::KeyPress(KeyEvent::new(KeyCode::Char(byte as char)))),
            _ => self.process_utf8_lead(byte),
        }
    }

    fn process_utf8_lead(&mut self, byte: u8) -> Option<Event> {
        let expected = if byte & 0xE0 == 0xC0 {
            2
        } else if byte & 0xF0 == 0xE0 {
            3
        } else if byte & 0xF8 == 0xF0 {
            4
        } else {
            // Not a valid UTF-8 lead: 8-bit C1 convention, Ctrl+Alt+(byte-0x40).
            return Some(Event::KeyPress(
                KeyEvent::new(KeyCode::Char(char::from(byte.wrapping_sub(0x40))))
                    .with_modifiers(Modifiers::CTRL | Modifiers::ALT),
            ));
        };
        self.utf8_buf[0] = byte;
        self.state = State::Utf8 {
            collected: 1,
            expected,
        };
        None
    }

    fn process_utf8(&mut self, byte: u8, collected: u8, expected: u8) -> Option<Event> {
        if byte & 0xC0 != 0x80 {
            self.state = State::Ground;
            self.pending_replay = Some(byte);
            return Some(Event::Unknown(UnknownEvent {
                bytes: self.utf8_buf[..collected as usize].to_vec(),
            }));
        }
        self.utf8_buf[collected as usize] = byte;
        let new_collected = collected + 1;
        if new_collected == expected {
            self.state = State::Ground;
            return match std::str::from_utf8(&self.utf8_buf[..expected as usize]) {
                Ok(s) => s
                    .chars()
                    .next()
                    .map(|c| Event::KeyPress(KeyEvent::new(KeyCode::Char(c)))),
                Err(_) => Some(Event::Unknown(UnknownEvent {
                    bytes: self.utf8_buf[..expected as usize].to_vec(),
                })),
            };
        }
        self.state = State::Utf8 {
            collected: new_collected,
            expected,
        };
        None
    }

    fn parse_control(&self, byte: u8) -> Event {
        let legacy = self.legacy;
        let key = match byte {
            0x00 if legacy.contains(LegacyKeyEncoding::NUL_AS_CTRL_SPACE) => {
                KeyEvent::new(KeyCode::Char(' ')).with_modifiers(Modifiers::CTRL)
            }
            0x00 => KeyEvent::new(KeyCode::Null),
            0x09 if legacy.contains(LegacyKeyEncoding::TAB_AS_CTRL_I) => {
                KeyEvent::new(KeyCode::Char('i')).with_modifiers(Modifiers::CTRL)
            }
            0x09 => KeyEvent::new(KeyCode::Tab),
            0x0D if legacy.contains(LegacyKeyEncoding::CR_AS_CTRL_M) => {
                KeyEvent::new(KeyCode::Char('m')).with_modifiers(Modifiers::CTRL)
            }
            0x0D => KeyEvent::new(KeyCode::Enter),
            0x1B if legacy.contains(LegacyKeyEncoding::ESC_AS_CTRL_BRACKET) => {
                KeyEvent::new(KeyCode::Char('[')).with_modifiers(Modifiers::CTRL)
            }
            0x1B => KeyEvent::new(KeyCode::Escape),
            0x7F if legacy.contains(LegacyKeyEncoding::DEL_AS_DELETE) => {
                KeyEvent::new(KeyCode::Delete)
            }
            0x7F => KeyEvent::new(KeyCode::Backspace),
            0x01..=0x1A => {
                // Ctrl+A..Ctrl+Z
                let c = (b'a' + (byte - 0x01)) as char;
                KeyEvent::new(KeyCode::Char(c)).with_modifiers(Modifiers::CTRL)
            }
            _ => {
                let c = char::from(byte + 0x40);
                KeyEvent::new(KeyCode::Char(c.to_ascii_lowercase())).with_modifiers(Modifiers::CTRL)
            }
        };
        Event::KeyPress(key)
    }

    fn process_escape(&mut self, byte: u8) -> Option<Event> {
        match byte {
            b'[' => {
                self.csi_params.clear();
                self.csi_intermediates.clear();
                self.state = State::Csi;
                None
            }
            b']' => {
                self.osc_buf.clear();
                self.state = State::Osc;
                None
            }
            b'P' => {
                self.dcs_buf.clear();
                self.state = State::Dcs;
                None
            }
            b'O' => {
                self.state = State::Ss3;
                None
            }
            0x1B => None, // ESC ESC: stay in Escape, treat as restart
            _ if (0x20..=0x7E).contains(&byte) => {
                self.state = State::Ground;
                Some(Event::KeyPress(
                    KeyEvent::new(KeyCode::Char(byte as char)).with_modifiers(Modifiers::ALT),
                ))
            }
            _ => {
                self.state = State::Ground;
                Some(Event::KeyPress(KeyEvent::new(KeyCode::Escape)))
            }
        }
    }

    fn process_ss3(&mut self, byte: u8) -> Option<Event> {
        self.state = State::Ground;
        let code = match byte {
            b'A' => KeyCode::Up,
            b'B' => KeyCode::Down,
            b'C' => KeyCode::Right,
            b'D' => KeyCode::Left,
            b'F' => KeyCode::End,
            b'H' => KeyCode::Home,
            b'P' => KeyCode::F(1),
            b'Q' => KeyCode::F(2),
            b'R' => KeyCode::F(3),
            b'S' => KeyCode::F(4),
            _ => return Some(Event::Unknown(UnknownEvent { bytes: vec![byte] })),
        };
        Some(Event::KeyPress(KeyEvent::new(code)))
    }

    fn process_csi(&mut self, byte: u8) -> Option<Event> {
        if self.csi_params.len() + self.csi_intermediates.len() >= MAX_SEQ_LEN {
            self.state = State::Ground;
            return Some(Event::Unknown(UnknownEvent {
                bytes: std::mem::take(&mut self.csi_params),
            }));
        }
        match byte {
            0x30..=0x3F => {
                self.csi_params.push(byte);
                None
            }
            0x20..=0x2F => {
                self.csi_intermediates.push(byte);
                None
            }
            0x40..=0x7E => {
                self.state = State::Ground;
                self.parse_csi_sequence(byte)
            }
            _ => {
                self.state = State::Ground;
                None
            }
        }
    }

    fn csi_param_list(&self) -> Vec<u16> {
        let body = std::str::from_utf8(&self.csi_params).unwrap_or("");
        let body = body.trim_start_matches(['?', '<', '=', '>']);
        body.split(|c| c == ';' || c == ':')
            .map(|p| p.parse::<u16>().unwrap_or(0))
            .collect()
    }

    fn parse_csi_sequence(&mut self, final_byte: u8) -> Option<Event> {
        let marker = self.csi_params.first().copied();
        let mouse_sgr = marker == Some(b'<');
        let params = self.csi_param_list();

        if mouse_sgr && matches!(final_byte, b'M' | b'm') {
            return self.parse_sgr_mouse(&params, final_byte == b'M');
        }

        match (marker, final_byte) {
            (Some(b'?'), b'~') => return self.parse_csi_tilde(&params),
            (Some(b'>'), b'c') => {
                return Some(Event::SecondaryDeviceAttributes(DeviceAttributesEvent {
                    params,
                }))
            }
            (Some(b'='), b'c') => {
                return Some(Event::TertiaryDeviceAttributes(DeviceAttributesEvent { params }))
            }
            (Some(b'?'), b'y') => {
                // DECRPM: CSI ? mode ; value $ y
                if params.len() >= 2 {
                    return Some(Event::ModeReport(ModeReportEvent {
                        mode: params[0],
                        value: params[1],
                    }));
                }
            }
            _ => {}
        }

        match final_byte {
            b'~' => self.parse_csi_tilde(&params),
            b'A' => Some(key(KeyCode::Up, &params)),
            b'B' => Some(key(KeyCode::Down, &params)),
            b'C' => Some(key(KeyCode::Right, &params)),
            b'D' => Some(key(KeyCode::Left, &params)),
            b'F' => Some(key(KeyCode::End, &params)),
            b'H' => Some(key(KeyCode::Home, &params)),
            b'P' if params.is_empty() => Some(Event::KeyPress(KeyEvent::new(KeyCode::F(1)))),
            b'Q' if params.is_empty() => Some(Event::KeyPress(KeyEvent::new(KeyCode::F(2)))),
            b'R' if params.len() == 2 => Some(Event::CursorPositionReport(CursorPositionReportEvent {
                row: params[0],
                col: params[1],
            })),
            b'S' if params.is_empty() => Some(Event::KeyPress(KeyEvent::new(KeyCode::F(4)))),
            b'I' => Some(Event::Focus(FocusEvent { gained: true })),
            b'O' => Some(Event::Blur),
            b'c' => Some(Event::PrimaryDeviceAttributes(DeviceAttributesEvent { params })),
            b't' if params.len() == 3 && params[0] == 4 => Some(Event::WindowPixelSize(WindowSizeEvent {
                width: params[2],
                height: params[1],
            })),
            b't' if params.len() == 3 && params[0] == 8 => Some(Event::WindowSize(WindowSizeEvent {
                width: params[2],
                height: params[1],
            })),
            b'u' => self.parse_kitty_keyboard(&params),
            b'Z' => Some(Event::KeyPress(
                KeyEvent::new(KeyCode::BackTab).with_modifiers(Modifiers::SHIFT),
            )),
            b'y' if params.len() >= 2 => Some(Event::ModeReport(ModeReportEvent {
                mode: params[0],
                value: params[1],
            })),
            _ => Some(Event::UnknownCsi(UnknownCsiEvent {
                params,
                intermediates: self.csi_intermediates.clone(),
                final_byte,
            })),
        }
    }

    fn parse_csi_tilde(&mut self, params: &[u16]) -> Option<Event> {
        let code_num = params.first().copied().unwrap_or(0);
        let mods = params.get(1).copied().map(modifiers_from_xterm).unwrap_or_default();
        if code_num == 200 {
            self.in_paste = true;
            self.paste_buf.clear();
            self.paste_tail.clear();
            return Some(Event::PasteStart);
        }
        if code_num == 201 {
            return Some(Event::PasteEnd);
        }
        // xterm modifyOtherKeys: CSI 27 ; modifiers ; ascii-keycode ~
        if code_num == 27 && params.len() == 3 {
            let modifiers = modifiers_from_xterm(params[1]);
            let code = match params[2] {
                9 => KeyCode::Tab,
                13 => KeyCode::Enter,
                27 => KeyCode::Escape,
                127 => KeyCode::Backspace,
                ascii => char::from_u32(u32::from(ascii)).map_or(KeyCode::Unidentified, KeyCode::Char),
            };
            return Some(Event::KeyPress(KeyEvent::new(code).with_modifiers(modifiers)));
        }
        let find_select = self.legacy.contains(LegacyKeyEncoding::FIND_SELECT_AS_HOME_END);
        let code = match code_num {
            1 if find_select => KeyCode::Home,
            7 => KeyCode::Home,
            2 => KeyCode::Insert,
            3 => KeyCode::Delete,
            4 if find_select => KeyCode::End,
            8 => KeyCode::End,
            5 => KeyCode::PageUp,
            6 => KeyCode::PageDown,
            11 => KeyCode::F(1),
            12 => KeyCode::F(2),
            13 => KeyCode::F(3),
            14 => KeyCode::F(4),
            15 => KeyCode::F(5),
            17 => KeyCode::F(6),
            18 => KeyCode::F(7),
            19 => KeyCode::F(8),
            20 => KeyCode::F(9),
            21 => KeyCode::F(10),
            23 => KeyCode::F(11),
            24 => KeyCode::F(12),
            _ => {
                return Some(Event::UnknownCsi(UnknownCsiEvent {
                    params: params.to_vec(),
                    intermediates: vec![],
                    final_byte: b'~',
                }))
            }
        };
        Some(Event::KeyPress(KeyEvent::new(code).with_modifiers(mods)))
    }

    fn parse_kitty_keyboard(&self, params: &[u16]) -> Option<Event> {
        // CSI key-code:shifted-code;modifiers:event-kind u (sub-params were
        // already flattened into a single list by csi_param_list).
        let codepoint = params.first().copied().unwrap_or(0);
        let (mods_raw, kind_raw) = match params.get(1) {
            Some(&m) => (m, params.get(2).copied().unwrap_or(1)),
            None => (1, 1),
        };
        let modifiers = modifiers_from_xterm(mods_raw);
        let kind = match kind_raw {
            2 => KeyEventKind::Repeat,
            3 => KeyEventKind::Release,
            _ => KeyEventKind::Press,
        };
        let code = kitty_codepoint_to_keycode(codepoint);
        let event = KeyEvent::new(code).with_modifiers(modifiers).with_kind(kind);
        Some(match kind {
            KeyEventKind::Release => Event::KeyRelease(event),
            _ => Event::KeyPress(event),
        })
    }

    fn parse_sgr_mouse(&self, params: &[u16], is_press: bool) -> Option<Event> {
        if params.len() < 3 {
            return Some(Event::UnknownCsi(UnknownCsiEvent {
                params: params.to_vec(),
                intermediates: vec![b'<'],
                final_byte: if is_press { b'M' } else { b'm' },
            }));
        }
        let code = params[0];
        let x = params[1].saturating_sub(1);
        let y = params[2].saturating_sub(1);
        let modifiers = modifiers_from_xterm((code >> 2) & 0x07);
        let button_bits = code & 0x43;
        let is_motion = code & 0x20 != 0;
        let is_wheel = code & 0x40 != 0 && code & 0x80 == 0;

        let kind = if is_wheel {
            match button_bits & 0x03 {
                0 => MouseEventKind::ScrollUp,
                1 => MouseEventKind::ScrollDown,
                2 => MouseEventKind::ScrollLeft,
                _ => MouseEventKind::ScrollRight,
            }
        } else {
            let button = decode_mouse_button(code);
            if is_motion {
                MouseEventKind::Drag(button)
            } else if is_press {
                MouseEventKind::Down(button)
            } else {
                MouseEventKind::Up(button)
            }
        };
        let event = MouseEvent::new(kind, x, y).with_modifiers(modifiers);
        Some(match kind {
            MouseEventKind::Down(_) => Event::MouseClick(event),
            MouseEventKind::Up(_) => Event::MouseRelease(event),
            MouseEventKind::Drag(_) => Event::MouseMotion(event),
            MouseEventKind::Moved => Event::MouseMotion(event),
            MouseEventKind::ScrollUp
            | MouseEventKind::ScrollDown
            | MouseEventKind::ScrollLeft
            | MouseEventKind::ScrollRight => Event::MouseWheel(event),
        })
    }

    fn process_osc(&mut self, byte: u8) -> Option<Event> {
        if self.osc_buf.len() >= MAX_OSC_LEN {
            self.state = State::Ground;
            self.osc_buf.clear();
            return None;
        }
        match byte {
            0x07 => {
                self.state = State::Ground;
                self.parse_osc_sequence()
            }
            0x1B => {
                self.state = State::OscEscape;
                None
            }
            _ => {
                self.osc_buf.push(byte);
                None
            }
        }
    }

    fn process_osc_escape(&mut self, byte: u8) -> Option<Event> {
        if byte == b'\\' {
            self.state = State::Ground;
            self.parse_osc_sequence()
        } else {
            self.osc_buf.clear();
            self.state = State::Escape;
            self.process_escape(byte)
        }
    }

    fn parse_osc_sequence(&mut self) -> Option<Event> {
        let seq = std::mem::take(&mut self.osc_buf);
        if let Some(rest) = seq.strip_prefix(b"52;") {
            return self.parse_osc52_clipboard(rest);
        }
        for (num, tag) in [(10u16, ForegroundTag), (11, BackgroundTag), (12, CursorTag)] {
            let prefix = format!("{num};");
            if let Some(rest) = seq.strip_prefix(prefix.as_bytes()) {
                let spec = String::from_utf8_lossy(rest).into_owned();
                return Some(match tag {
                    ForegroundTag => Event::ForegroundColor(ColorReportEvent { spec }),
                    BackgroundTag => Event::BackgroundColor(ColorReportEvent { spec }),
                    CursorTag => Event::CursorColor(ColorReportEvent { spec }),
                });
            }
        }
        if let Some(rest) = seq.strip_prefix(b"544;") {
            return Some(Event::Capability(CapabilityEvent {
                raw: String::from_utf8_lossy(rest).into_owned(),
            }));
        }
        None
    }

    fn parse_osc52_clipboard(&self, content: &[u8]) -> Option<Event> {
        let base64_start = content.iter().position(|&b| b == b';').map(|i| i + 1)?;
        let decoded = decode_base64(&content[base64_start..])?;
        Some(Event::Clipboard(ClipboardEvent::new(
            String::from_utf8_lossy(&decoded).into_owned(),
            ClipboardSource::Osc52,
        )))
    }

    fn process_dcs(&mut self, byte: u8) -> Option<Event> {
        if self.dcs_buf.len() >= MAX_OSC_LEN {
            self.state = State::Ground;
            self.dcs_buf.clear();
            return None;
        }
        match byte {
            0x1B => {
                self.state = State::DcsEscape;
                None
            }
            _ => {
                self.dcs_buf.push(byte);
                None
            }
        }
    }

    fn process_dcs_escape(&mut self, byte: u8) -> Option<Event> {
        if byte == b'\\' {
            self.state = State::Ground;
            self.parse_dcs_sequence()
        } else {
            self.dcs_buf.clear();
            self.state = State::Escape;
            self.process_escape(byte)
        }
    }

    fn parse_dcs_sequence(&mut self) -> Option<Event> {
        let seq = std::mem::take(&mut self.dcs_buf);
        let rest = seq.strip_prefix(b"1+r").or_else(|| seq.strip_prefix(b"0+r"))?;
        let text = std::str::from_utf8(rest).ok()?;
        let entries = text
            .split(';')
            .filter_map(|pair| {
                let (name, value) = pair.split_once('=')?;
                let name = hex_decode_str(name)?;
                let value = hex_decode_str(value)?;
                Some((name, value))
            })
            .collect();
        Some(Event::Termcap(TermcapEvent { entries }))
    }

    fn process_paste_byte(&mut self, byte: u8) -> Option<Event> {
        const END_SEQ: &[u8] = b"\x1b[201~";
        if self.paste_buf.len() < MAX_PASTE_LEN {
            self.paste_buf.push(byte);
            if self.paste_buf.ends_with(END_SEQ) {
                self.in_paste = false;
                let content_len = self.paste_buf.len() - END_SEQ.len();
                let text = String::from_utf8_lossy(&self.paste_buf[..content_len]).into_owned();
                self.paste_buf.clear();
                return Some(Event::Paste(PasteEvent::bracketed(text)));
            }
        } else {
            self.paste_tail.push(byte);
            if self.paste_tail.len() > END_SEQ.len() {
                self.paste_tail.remove(0);
            }
            if self.paste_tail == END_SEQ {
                self.in_paste = false;
                let text = String::from_utf8_lossy(&self.paste_buf).into_owned();
                self.paste_buf.clear();
                self.paste_tail.clear();
                return Some(Event::Paste(PasteEvent::bracketed(text)));
            }
        }
        None
    }
}

#[derive(Clone, Copy)]
enum ColorTag {
    ForegroundTag,
    BackgroundTag,
    CursorTag,
}
use ColorTag::{BackgroundTag, CursorTag, ForegroundTag};

fn key(code: KeyCode, params: &[u16]) -> Event {
    let mods = params.get(1).copied().map(modifiers_from_xterm).unwrap_or_default();
    Event::KeyPress(KeyEvent::new(code).with_modifiers(mods))
}

fn modifiers_from_xterm(value: u16) -> Modifiers {
    let bits = value.saturating_sub(1);
    let mut mods = Modifiers::NONE;
    if bits & 1 != 0 {
        mods |= Modifiers::SHIFT;
    }
    if bits & 2 != 0 {
        mods |= Modifiers::ALT;
    }
    if bits & 4 != 0 {
        mods |= Modifiers::CTRL;
    }
    if bits & 8 != 0 {
        mods |= Modifiers::SUPER;
    }
    mods
}

fn decode_mouse_button(code: u16) -> MouseButton {
    match code & 0x03 {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        _ => MouseButton::Right,
    }
}

fn kitty_codepoint_to_keycode(codepoint: u16) -> KeyCode {
    match codepoint {
        13 => KeyCode::Enter,
        27 => KeyCode::Escape,
        9 => KeyCode::Tab,
        127 => KeyCode::Backspace,
        57358 => KeyCode::Escape,
        57359..=57363 => KeyCode::Unidentified,
        57376..=57398 => KeyCode::F((codepoint - 57376 + 13) as u8),
        32..=126 => KeyCode::Char(codepoint as u8 as char),
        _ => KeyCode::Unidentified,
    }
}

fn hex_decode_str(s: &str) -> Option<String> {
    if s.len() % 2 != 0 {
        return None;
    }
    let bytes: Option<Vec<u8>> = (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect();
    bytes.map(|b| String::from_utf8_lossy(&b).into_owned())
}

fn decode_base64(input: &[u8]) -> Option<Vec<u8>> {
    const DECODE_TABLE: [i8; 256] = {
        let mut table = [-1i8; 256];
        let mut i = 0u8;
        while i < 26 {
            table[(b'A' + i) as usize] = i as i8;
            table[(b'a' + i) as usize] = (i + 26) as i8;
            i += 1;
        }
        let mut i = 0u8;
        while i < 10 {
            table[(b'0' + i) as usize] = (i + 52) as i8;
            i += 1;
        }
        table[b'+' as usize] = 62;
        table[b'/' as usize] = 63;
        table
    };
    let mut output = Vec::with_capacity(input.len() * 3 / 4);
    let mut buffer = 0u32;
    let mut bits = 0u8;
    for &byte in input {
        if byte == b'=' {
            break;
        }
        let value = DECODE_TABLE[byte as usize];
        if value < 0 {
            continue;
        }
        buffer = (buffer << 6) | (value as u32);
        bits += 6;
        if bits >= 8 {
            bits -= 8;
            output.push((buffer >> bits) as u8);
            buffer &= (1 << bits) - 1;
        }
    }
    Some(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(decoder: &mut Decoder, bytes: &[u8]) -> Vec<Event> {
        let mut events = Vec::new();
        let mut rest = bytes;
        loop {
            let (consumed, event) = decoder.decode(rest);
            if let Some(event) = event {
                events.push(event);
            }
            rest = &rest[consumed..];
            if consumed == 0 {
                break;
            }
        }
        events
    }

    #[test]
    fn plain_ascii_is_a_key_press() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"a");
        assert_eq!(events, vec![Event::KeyPress(KeyEvent::new(KeyCode::Char('a')))]);
    }

    #[test]
    fn ctrl_a_maps_to_ctrl_modifier_with_lowercase_letter() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, &[0x01]);
        assert_eq!(
            events,
            vec![Event::KeyPress(
                KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL)
            )]
        );
    }

    #[test]
    fn enter_is_reported_as_enter_by_default() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, &[0x0D]);
        assert_eq!(events, vec![Event::KeyPress(KeyEvent::new(KeyCode::Enter))]);
    }

    #[test]
    fn legacy_flag_reports_cr_as_ctrl_m() {
        let mut d = Decoder::with_legacy_encoding(LegacyKeyEncoding::CR_AS_CTRL_M);
        let events = decode_all(&mut d, &[0x0D]);
        assert_eq!(
            events,
            vec![Event::KeyPress(
                KeyEvent::new(KeyCode::Char('m')).with_modifiers(Modifiers::CTRL)
            )]
        );
    }

    #[test]
    fn lone_escape_is_key_escape() {
        let mut d = Decoder::new();
        let (consumed, event) = d.decode(&[0x1B]);
        assert_eq!(consumed, 1);
        assert_eq!(event, None);
        let (consumed, event) = d.decode(&[]);
        assert_eq!(consumed, 0);
        assert_eq!(event, None);
    }

    #[test]
    fn finish_resolves_a_hanging_escape_on_eof() {
        let mut d = Decoder::new();
        let (consumed, event) = d.decode(&[0x1B]);
        assert_eq!(consumed, 1);
        assert_eq!(event, None);
        assert_eq!(d.finish(), Some(Event::KeyPress(KeyEvent::new(KeyCode::Escape))));
    }

    #[test]
    fn alt_plus_char_sets_alt_modifier() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1bx");
        assert_eq!(
            events,
            vec![Event::KeyPress(
                KeyEvent::new(KeyCode::Char('x')).with_modifiers(Modifiers::ALT)
            )]
        );
    }

    #[test]
    fn arrow_keys_decode_from_csi() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[A\x1b[B\x1b[C\x1b[D");
        assert_eq!(
            events,
            vec![
                Event::KeyPress(KeyEvent::new(KeyCode::Up)),
                Event::KeyPress(KeyEvent::new(KeyCode::Down)),
                Event::KeyPress(KeyEvent::new(KeyCode::Right)),
                Event::KeyPress(KeyEvent::new(KeyCode::Left)),
            ]
        );
    }

    #[test]
    fn tilde_codes_decode_delete_and_function_keys() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[3~\x1b[15~");
        assert_eq!(
            events,
            vec![
                Event::KeyPress(KeyEvent::new(KeyCode::Delete)),
                Event::KeyPress(KeyEvent::new(KeyCode::F(5))),
            ]
        );
    }

    #[test]
    fn focus_in_and_out_decode() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[I\x1b[O");
        assert_eq!(events, vec![Event::Focus(FocusEvent { gained: true }), Event::Blur]);
    }

    #[test]
    fn bracketed_paste_collects_content_between_markers() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[200~hello\x1b[201~");
        assert_eq!(
            events,
            vec![Event::PasteStart, Event::Paste(PasteEvent::bracketed("hello"))]
        );
    }

    #[test]
    fn sgr_mouse_left_click_decodes_with_zero_indexed_coordinates() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[<0;11;21M");
        assert_eq!(
            events,
            vec![Event::MouseClick(MouseEvent::new(
                MouseEventKind::Down(MouseButton::Left),
                10,
                20
            ))]
        );
    }

    #[test]
    fn sgr_mouse_release_uses_lowercase_final_byte() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[<0;1;1m");
        assert_eq!(
            events,
            vec![Event::MouseRelease(MouseEvent::new(
                MouseEventKind::Up(MouseButton::Left),
                0,
                0
            ))]
        );
    }

    #[test]
    fn mouse_wheel_scroll_up_decodes() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[<64;5;5M");
        assert_eq!(
            events,
            vec![Event::MouseWheel(MouseEvent::new(MouseEventKind::ScrollUp, 4, 4))]
        );
    }

    #[test]
    fn kitty_keyboard_key_with_modifiers_decodes() {
        let mut d = Decoder::new();
        // 'a' codepoint (97) with Ctrl modifier (value 5 = 1 + CTRL bit(4))
        let events = decode_all(&mut d, b"\x1b[97;5u");
        assert_eq!(
            events,
            vec![Event::KeyPress(
                KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL)
            )]
        );
    }

    #[test]
    fn osc_52_clipboard_response_decodes_base64() {
        let mut d = Decoder::new();
        // "hi" -> base64 "aGk="
        let events = decode_all(&mut d, b"\x1b]52;c;aGk=\x07");
        assert_eq!(
            events,
            vec![Event::Clipboard(ClipboardEvent::new(
                "hi".to_string(),
                ClipboardSource::Osc52
            ))]
        );
    }

    #[test]
    fn csi_z_decodes_as_shift_backtab() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[Z");
        assert_eq!(
            events,
            vec![Event::KeyPress(
                KeyEvent::new(KeyCode::BackTab).with_modifiers(Modifiers::SHIFT)
            )]
        );
    }

    #[test]
    fn modify_other_keys_escape_with_shift_decodes() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[27;2;27~");
        assert_eq!(
            events,
            vec![Event::KeyPress(
                KeyEvent::new(KeyCode::Escape).with_modifiers(Modifiers::SHIFT)
            )]
        );
    }

    #[test]
    fn decrpm_private_mode_report_decodes() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[?1049;2$y");
        assert_eq!(
            events,
            vec![Event::ModeReport(ModeReportEvent { mode: 1049, value: 2 })]
        );
    }

    #[test]
    fn ansi_mode_report_decodes() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[4;1$y");
        assert_eq!(
            events,
            vec![Event::ModeReport(ModeReportEvent { mode: 4, value: 1 })]
        );
    }

    #[test]
    fn osc_11_background_color_response_decodes() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b]11;rgb:1111/2222/3333\x1b\\");
        assert_eq!(
            events,
            vec![Event::BackgroundColor(ColorReportEvent {
                spec: "rgb:1111/2222/3333".to_string()
            })]
        );
    }

    #[test]
    fn unknown_csi_final_byte_is_surfaced_not_dropped() {
        let mut d = Decoder::new();
        let events = decode_all(&mut d, b"\x1b[5z");
        assert_eq!(
            events,
            vec![Event::UnknownCsi(UnknownCsiEvent {
                params: vec![5],
                intermediates: vec![],
                final_byte: b'z',
            })]
        );
    }

    #[test]
    fn split_sequence_across_two_reads_still_decodes() {
        let mut d = Decoder::new();
        let (consumed, event) = d.decode(b"\x1b[");
        assert_eq!(consumed, 2);
        assert_eq!(event, None);
        let (consumed, event) = d.decode(b"A");
        assert_eq!(consumed, 1);
        assert_eq!(event, Some(Event::KeyPress(KeyEvent::new(KeyCode::Up))));
    }

    #[test]
    fn invalid_utf8_continuation_replays_the_offending_byte() {
        let mut d = Decoder::new();
        // 0xC2 starts a 2-byte sequence; 0x41 ('A') is not a continuation byte.
        let events = decode_all(&mut d, &[0xC2, b'A']);
        assert_eq!(
            events,
            vec![
                Event::Unknown(UnknownEvent { bytes: vec![0xC2] }),
                Event::KeyPress(KeyEvent::new(KeyCode::Char('A'))),
            ]
        );
    }
}
