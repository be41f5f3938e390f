//! Canonical input/event types produced by [`crate::decoder::Decoder`].
//!
//! All events derive `Clone`, `PartialEq`, and `Eq` for use in tests and
//! pattern matching. Coordinates are 0-indexed; the wire protocol itself
//! is 1-indexed and the decoder adjusts on the way in.

use bitflags::bitflags;

bitflags! {
    /// Keyboard/mouse modifier state.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        const NONE  = 0;
        const SHIFT = 1 << 0;
        const ALT   = 1 << 1;
        const CTRL  = 1 << 2;
        const SUPER = 1 << 3;
    }
}

/// A single decoded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    KeyPress(KeyEvent),
    KeyRelease(KeyEvent),
    MouseClick(MouseEvent),
    MouseRelease(MouseEvent),
    MouseMotion(MouseEvent),
    MouseWheel(MouseEvent),
    Focus(FocusEvent),
    Blur,
    PasteStart,
    PasteEnd,
    Paste(PasteEvent),
    WindowSize(WindowSizeEvent),
    WindowPixelSize(WindowSizeEvent),
    ForegroundColor(ColorReportEvent),
    BackgroundColor(ColorReportEvent),
    CursorColor(ColorReportEvent),
    ModeReport(ModeReportEvent),
    PrimaryDeviceAttributes(DeviceAttributesEvent),
    SecondaryDeviceAttributes(DeviceAttributesEvent),
    TertiaryDeviceAttributes(DeviceAttributesEvent),
    Capability(CapabilityEvent),
    CursorPositionReport(CursorPositionReportEvent),
    Termcap(TermcapEvent),
    Clipboard(ClipboardEvent),
    /// A byte (or byte run) that did not parse as anything recognised.
    Unknown(UnknownEvent),
    /// A sequence that parsed structurally but whose final byte or OSC
    /// number carries no known semantics.
    UnknownCsi(UnknownCsiEvent),
}

/// A keyboard key-press or key-release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Lowercase/base code, matching the cross-platform contract: when
    /// Shift is held with a letter, `code` stays lowercase and
    /// `shifted_code` carries the uppercase form.
    pub code: KeyCode,
    pub shifted_code: Option<KeyCode>,
    pub modifiers: Modifiers,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            shifted_code: None,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn with_shifted(mut self, shifted: KeyCode) -> Self {
        self.shifted_code = Some(shifted);
        self
    }

    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    F(u8),
    Null,
    MediaPlayPause,
    MediaStop,
    MediaNextTrack,
    MediaPrevTrack,
    /// A key the decoder recognised structurally (e.g. a Kitty extended
    /// keycode) but has no named variant for.
    Unidentified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub kind: MouseEventKind,
    pub x: u16,
    pub y: u16,
    pub modifiers: Modifiers,
}

impl MouseEvent {
    #[must_use]
    pub const fn new(kind: MouseEventKind, x: u16, y: u16) -> Self {
        Self {
            kind,
            x,
            y,
            modifiers: Modifiers::NONE,
        }
    }

    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    #[must_use]
    pub const fn position(&self) -> (u16, u16) {
        (self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseEventKind {
    Down(MouseButton),
    Up(MouseButton),
    Drag(MouseButton),
    Moved,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusEvent {
    pub gained: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasteEvent {
    pub text: String,
    pub bracketed: bool,
}

impl PasteEvent {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bracketed: false,
        }
    }

    #[must_use]
    pub fn bracketed(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bracketed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSizeEvent {
    pub width: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorReportEvent {
    /// `rgb:rrrr/gggg/bbbb` payload, unparsed (depth varies by terminal).
    pub spec: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeReportEvent {
    pub mode: u16,
    pub value: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAttributesEvent {
    pub params: Vec<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityEvent {
    /// `cap=hexvalue` pairs from an OSC 544 reply, unparsed.
    pub raw: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPositionReportEvent {
    pub row: u16,
    pub col: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermcapEvent {
    /// Decoded `name=value` pairs from a DCS `+q` termcap/terminfo reply.
    pub entries: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClipboardSource {
    #[default]
    Osc52,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardEvent {
    pub content: String,
    pub source: ClipboardSource,
}

impl ClipboardEvent {
    #[must_use]
    pub const fn new(content: String, source: ClipboardSource) -> Self {
        Self { content, source }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownEvent {
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCsiEvent {
    pub params: Vec<u16>,
    pub intermediates: Vec<u8>,
    pub final_byte: u8,
}
