//! Terminal capability detection with tear-free output policies.
//!
//! Detection is based on environment variables and known terminal program
//! identification. In addition to runtime detection, this module provides
//! predefined profiles for testing and simulation.
//!
//! # Invariants
//!
//! 1. **Sync-output safety**: [`Capabilities::use_sync_output`] returns
//!    `false` for any multiplexer environment (tmux, screen, zellij)
//!    because CSI `?2026` h/l sequences are unreliable through passthrough.
//! 2. **Scroll region safety**: [`Capabilities::use_scroll_region`]
//!    returns `false` in multiplexers because DECSTBM behavior varies
//!    across versions.
//! 3. **Detection determinism**: given the same environment variables,
//!    [`Capabilities::detect`] always produces the same result.
//!
//! # Decision rule
//!
//! ```text
//! IF in_any_mux() THEN disable_advanced_features
//! ELSE IF capability_detected THEN enable_feature
//! ELSE use_conservative_default
//! ```
//!
//! False negatives (disabling a feature that would have worked) are
//! preferred over false positives (enabling one that corrupts output).

use std::env;

use tui_style::ColorProfile;

#[derive(Debug, Clone)]
struct DetectInputs {
    no_color: bool,
    term: String,
    term_program: String,
    colorterm: String,
    in_tmux: bool,
    in_screen: bool,
    in_zellij: bool,
    kitty_window_id: bool,
    wt_session: bool,
}

impl DetectInputs {
    fn from_env() -> Self {
        Self {
            no_color: env::var("NO_COLOR").is_ok(),
            term: env::var("TERM").unwrap_or_default(),
            term_program: env::var("TERM_PROGRAM").unwrap_or_default(),
            colorterm: env::var("COLORTERM").unwrap_or_default(),
            in_tmux: env::var("TMUX").is_ok(),
            in_screen: env::var("STY").is_ok(),
            in_zellij: env::var("ZELLIJ").is_ok(),
            kitty_window_id: env::var("KITTY_WINDOW_ID").is_ok(),
            wt_session: env::var("WT_SESSION").is_ok(),
        }
    }
}

const MODERN_TERMINALS: &[&str] = &[
    "iTerm.app",
    "WezTerm",
    "Alacritty",
    "Ghostty",
    "kitty",
    "Rio",
    "Hyper",
    "Contour",
    "vscode",
];

const KITTY_KEYBOARD_TERMINALS: &[&str] =
    &["iTerm.app", "WezTerm", "Alacritty", "Ghostty", "Rio", "kitty", "foot"];

const SYNC_OUTPUT_TERMINALS: &[&str] = &["WezTerm", "Alacritty", "Ghostty", "kitty", "Contour"];

/// Known terminal profile identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalProfile {
    Modern,
    Xterm256Color,
    Xterm,
    Vt100,
    Dumb,
    Screen,
    Tmux,
    Zellij,
    WindowsConsole,
    Kitty,
    LinuxConsole,
    Custom,
    Detected,
}

impl TerminalProfile {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Xterm256Color => "xterm-256color",
            Self::Xterm => "xterm",
            Self::Vt100 => "vt100",
            Self::Dumb => "dumb",
            Self::Screen => "screen",
            Self::Tmux => "tmux",
            Self::Zellij => "zellij",
            Self::WindowsConsole => "windows-console",
            Self::Kitty => "kitty",
            Self::LinuxConsole => "linux",
            Self::Custom => "custom",
            Self::Detected => "detected",
        }
    }
}

impl std::str::FromStr for TerminalProfile {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "modern" => Ok(Self::Modern),
            "xterm-256color" | "xterm256color" | "xterm-256" => Ok(Self::Xterm256Color),
            "xterm" => Ok(Self::Xterm),
            "vt100" => Ok(Self::Vt100),
            "dumb" => Ok(Self::Dumb),
            "screen" | "screen-256color" => Ok(Self::Screen),
            "tmux" | "tmux-256color" => Ok(Self::Tmux),
            "zellij" => Ok(Self::Zellij),
            "windows-console" | "windows" | "conhost" => Ok(Self::WindowsConsole),
            "kitty" | "xterm-kitty" => Ok(Self::Kitty),
            "linux" | "linux-console" => Ok(Self::LinuxConsole),
            "custom" => Ok(Self::Custom),
            "detected" | "auto" => Ok(Self::Detected),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TerminalProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A terminal's advertised feature set, driving both the colour profile
/// used for SGR downsampling and the renderer's choice of optimizations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    profile: TerminalProfile,

    pub true_color: bool,
    pub colors_256: bool,

    pub sync_output: bool,
    pub osc8_hyperlinks: bool,
    pub scroll_region: bool,

    pub in_tmux: bool,
    pub in_screen: bool,
    pub in_zellij: bool,

    pub kitty_keyboard: bool,
    pub focus_events: bool,
    pub bracketed_paste: bool,
    pub mouse_sgr: bool,

    pub osc52_clipboard: bool,

    /// CHA (`CSI n G`, cursor horizontal absolute).
    pub cha: bool,
    /// HPA (`CSI n \``), a second encoding of the same move as `cha`, kept
    /// for peers that recognize one and not the other.
    pub hpa: bool,
    /// VPA (`CSI n d`, line position absolute).
    pub vpa: bool,
    /// ECH (`CSI n X`, erase character without shifting trailing content).
    pub ech: bool,
    /// REP (`CSI n b`, repeat preceding character). `linux` lacks this.
    pub rep: bool,
    /// ICH (`CSI n @`, insert character).
    pub ich: bool,
    /// DCH (`CSI n P`, delete character).
    pub dch: bool,
    /// IL (`CSI n L`, insert line).
    pub il: bool,
    /// DL (`CSI n M`, delete line).
    pub dl: bool,
    /// SU (`CSI n S`, scroll up).
    pub su: bool,
    /// SD (`CSI n T`, scroll down).
    pub sd: bool,
    /// DECSTBM (`CSI top;bottom r`, set scroll region). Distinct from
    /// [`Self::scroll_region`], which additionally folds in the
    /// multiplexer-safety override; this is the raw capability bit.
    pub decstbm: bool,
    /// DECAWM (`CSI ?7h`/`CSI ?7l`, auto-wrap mode toggle), needed to
    /// bracket a wide glyph written at the last column of a line.
    pub decawm: bool,
    /// Whether the terminal's hardware tab stops fall on every 8th column,
    /// making a literal tab a valid rightward cursor move.
    pub tab_stops_8: bool,
    /// Whether backspace at column 0 wraps to the end of the previous line
    /// (legacy VT100 "reverse wraparound") rather than staying put. When
    /// `false` — the common case — BS is always safe for an x-1 relative
    /// move; when `true`, BS must be avoided at column 0.
    pub backspace_wraps: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::basic()
    }
}

impl Capabilities {
    #[must_use]
    pub const fn profile(&self) -> TerminalProfile {
        self.profile
    }

    #[must_use]
    pub fn from_profile(profile: TerminalProfile) -> Self {
        match profile {
            TerminalProfile::Modern => Self::modern(),
            TerminalProfile::Xterm256Color => Self::xterm_256color(),
            TerminalProfile::Xterm => Self::xterm(),
            TerminalProfile::Vt100 => Self::vt100(),
            TerminalProfile::Dumb => Self::dumb(),
            TerminalProfile::Screen => Self::screen(),
            TerminalProfile::Tmux => Self::tmux(),
            TerminalProfile::Zellij => Self::zellij(),
            TerminalProfile::WindowsConsole => Self::windows_console(),
            TerminalProfile::Kitty => Self::kitty(),
            TerminalProfile::LinuxConsole => Self::linux_console(),
            TerminalProfile::Custom => Self::basic(),
            TerminalProfile::Detected => Self::detect(),
        }
    }

    #[must_use]
    pub const fn modern() -> Self {
        Self {
            profile: TerminalProfile::Modern,
            true_color: true,
            colors_256: true,
            sync_output: true,
            osc8_hyperlinks: true,
            scroll_region: true,
            in_tmux: false,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: true,
            focus_events: true,
            bracketed_paste: true,
            mouse_sgr: true,
            osc52_clipboard: true,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: true,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn xterm_256color() -> Self {
        Self {
            profile: TerminalProfile::Xterm256Color,
            true_color: false,
            colors_256: true,
            sync_output: false,
            osc8_hyperlinks: false,
            scroll_region: true,
            in_tmux: false,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: false,
            focus_events: false,
            bracketed_paste: true,
            mouse_sgr: true,
            osc52_clipboard: false,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: true,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn xterm() -> Self {
        Self {
            profile: TerminalProfile::Xterm,
            true_color: false,
            colors_256: false,
            sync_output: false,
            osc8_hyperlinks: false,
            scroll_region: true,
            in_tmux: false,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: false,
            focus_events: false,
            bracketed_paste: true,
            mouse_sgr: true,
            osc52_clipboard: false,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: true,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn vt100() -> Self {
        Self {
            profile: TerminalProfile::Vt100,
            true_color: false,
            colors_256: false,
            sync_output: false,
            osc8_hyperlinks: false,
            scroll_region: true,
            in_tmux: false,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: false,
            focus_events: false,
            bracketed_paste: false,
            mouse_sgr: false,
            osc52_clipboard: false,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: true,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn dumb() -> Self {
        Self {
            profile: TerminalProfile::Dumb,
            true_color: false,
            colors_256: false,
            sync_output: false,
            osc8_hyperlinks: false,
            scroll_region: false,
            in_tmux: false,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: false,
            focus_events: false,
            bracketed_paste: false,
            mouse_sgr: false,
            osc52_clipboard: false,
            cha: true,
            hpa: true,
            vpa: true,
            ech: false,
            rep: false,
            ich: false,
            dch: false,
            il: false,
            dl: false,
            su: false,
            sd: false,
            decstbm: false,
            decawm: true,
            tab_stops_8: false,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn screen() -> Self {
        Self {
            profile: TerminalProfile::Screen,
            true_color: false,
            colors_256: true,
            sync_output: false,
            osc8_hyperlinks: false,
            scroll_region: true,
            in_tmux: false,
            in_screen: true,
            in_zellij: false,
            kitty_keyboard: false,
            focus_events: false,
            bracketed_paste: true,
            mouse_sgr: true,
            osc52_clipboard: false,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: true,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn tmux() -> Self {
        Self {
            profile: TerminalProfile::Tmux,
            true_color: false,
            colors_256: true,
            sync_output: false,
            osc8_hyperlinks: false,
            scroll_region: true,
            in_tmux: true,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: false,
            focus_events: false,
            bracketed_paste: true,
            mouse_sgr: true,
            osc52_clipboard: false,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: true,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn zellij() -> Self {
        Self {
            profile: TerminalProfile::Zellij,
            true_color: true,
            colors_256: true,
            sync_output: false,
            osc8_hyperlinks: false,
            scroll_region: true,
            in_tmux: false,
            in_screen: false,
            in_zellij: true,
            kitty_keyboard: false,
            focus_events: true,
            bracketed_paste: true,
            mouse_sgr: true,
            osc52_clipboard: false,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: true,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn windows_console() -> Self {
        Self {
            profile: TerminalProfile::WindowsConsole,
            true_color: true,
            colors_256: true,
            sync_output: false,
            osc8_hyperlinks: true,
            scroll_region: true,
            in_tmux: false,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: false,
            focus_events: true,
            bracketed_paste: true,
            mouse_sgr: true,
            osc52_clipboard: true,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: true,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn kitty() -> Self {
        Self {
            profile: TerminalProfile::Kitty,
            true_color: true,
            colors_256: true,
            sync_output: true,
            osc8_hyperlinks: true,
            scroll_region: true,
            in_tmux: false,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: true,
            focus_events: true,
            bracketed_paste: true,
            mouse_sgr: true,
            osc52_clipboard: true,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: true,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub const fn linux_console() -> Self {
        Self {
            profile: TerminalProfile::LinuxConsole,
            true_color: false,
            colors_256: false,
            sync_output: false,
            osc8_hyperlinks: false,
            scroll_region: true,
            in_tmux: false,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: false,
            focus_events: false,
            bracketed_paste: true,
            mouse_sgr: true,
            osc52_clipboard: false,
            cha: true,
            hpa: true,
            vpa: true,
            ech: true,
            rep: false,
            ich: true,
            dch: true,
            il: true,
            dl: true,
            su: true,
            sd: true,
            decstbm: true,
            decawm: true,
            tab_stops_8: true,
            backspace_wraps: false,
        }
    }

    #[must_use]
    pub fn builder() -> CapabilityBuilder {
        CapabilityBuilder::new()
    }
}

/// Builder for custom capability profiles, used in tests and simulation.
#[derive(Debug, Clone)]
pub struct CapabilityBuilder {
    caps: Capabilities,
}

impl Default for CapabilityBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CapabilityBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            caps: Capabilities {
                profile: TerminalProfile::Custom,
                true_color: false,
                colors_256: false,
                sync_output: false,
                osc8_hyperlinks: false,
                scroll_region: false,
                in_tmux: false,
                in_screen: false,
                in_zellij: false,
                kitty_keyboard: false,
                focus_events: false,
                bracketed_paste: false,
                mouse_sgr: false,
                osc52_clipboard: false,
                // Unlike the advanced features above (colour, sync output,
                // hyperlinks), these basic VT100/xterm editing operations
                // are near-universal; tests and callers opt *out* of a
                // specific one rather than opting every one in.
                cha: true,
                hpa: true,
                vpa: true,
                ech: true,
                rep: true,
                ich: true,
                dch: true,
                il: true,
                dl: true,
                su: true,
                sd: true,
                decstbm: true,
                decawm: true,
                tab_stops_8: true,
                backspace_wraps: false,
            },
        }
    }

    #[must_use]
    pub fn build(self) -> Capabilities {
        self.caps
    }

    #[must_use]
    pub const fn true_color(mut self, enabled: bool) -> Self {
        self.caps.true_color = enabled;
        self
    }

    #[must_use]
    pub const fn colors_256(mut self, enabled: bool) -> Self {
        self.caps.colors_256 = enabled;
        self
    }

    #[must_use]
    pub const fn sync_output(mut self, enabled: bool) -> Self {
        self.caps.sync_output = enabled;
        self
    }

    #[must_use]
    pub const fn osc8_hyperlinks(mut self, enabled: bool) -> Self {
        self.caps.osc8_hyperlinks = enabled;
        self
    }

    #[must_use]
    pub const fn scroll_region(mut self, enabled: bool) -> Self {
        self.caps.scroll_region = enabled;
        self
    }

    #[must_use]
    pub const fn mouse_sgr(mut self, enabled: bool) -> Self {
        self.caps.mouse_sgr = enabled;
        self
    }

    #[must_use]
    pub const fn bracketed_paste(mut self, enabled: bool) -> Self {
        self.caps.bracketed_paste = enabled;
        self
    }

    #[must_use]
    pub const fn kitty_keyboard(mut self, enabled: bool) -> Self {
        self.caps.kitty_keyboard = enabled;
        self
    }

    #[must_use]
    pub const fn cha(mut self, enabled: bool) -> Self {
        self.caps.cha = enabled;
        self
    }

    #[must_use]
    pub const fn hpa(mut self, enabled: bool) -> Self {
        self.caps.hpa = enabled;
        self
    }

    #[must_use]
    pub const fn vpa(mut self, enabled: bool) -> Self {
        self.caps.vpa = enabled;
        self
    }

    #[must_use]
    pub const fn ech(mut self, enabled: bool) -> Self {
        self.caps.ech = enabled;
        self
    }

    #[must_use]
    pub const fn rep(mut self, enabled: bool) -> Self {
        self.caps.rep = enabled;
        self
    }

    #[must_use]
    pub const fn ich(mut self, enabled: bool) -> Self {
        self.caps.ich = enabled;
        self
    }

    #[must_use]
    pub const fn dch(mut self, enabled: bool) -> Self {
        self.caps.dch = enabled;
        self
    }

    #[must_use]
    pub const fn il(mut self, enabled: bool) -> Self {
        self.caps.il = enabled;
        self
    }

    #[must_use]
    pub const fn dl(mut self, enabled: bool) -> Self {
        self.caps.dl = enabled;
        self
    }

    #[must_use]
    pub const fn su(mut self, enabled: bool) -> Self {
        self.caps.su = enabled;
        self
    }

    #[must_use]
    pub const fn sd(mut self, enabled: bool) -> Self {
        self.caps.sd = enabled;
        self
    }

    #[must_use]
    pub const fn decstbm(mut self, enabled: bool) -> Self {
        self.caps.decstbm = enabled;
        self
    }

    #[must_use]
    pub const fn decawm(mut self, enabled: bool) -> Self {
        self.caps.decawm = enabled;
        self
    }

    #[must_use]
    pub const fn tab_stops_8(mut self, enabled: bool) -> Self {
        self.caps.tab_stops_8 = enabled;
        self
    }

    #[must_use]
    pub const fn backspace_wraps(mut self, enabled: bool) -> Self {
        self.caps.backspace_wraps = enabled;
        self
    }
}

impl Capabilities {
    /// Detects capabilities from the environment. When in doubt,
    /// capabilities are disabled for safety.
    #[must_use]
    pub fn detect() -> Self {
        let env = DetectInputs::from_env();
        Self::detect_from_inputs(&env)
    }

    fn detect_from_inputs(env: &DetectInputs) -> Self {
        let in_tmux = env.in_tmux;
        let in_screen = env.in_screen;
        let in_zellij = env.in_zellij;
        let in_any_mux = in_tmux || in_screen || in_zellij;

        let term = env.term.as_str();
        let term_program = env.term_program.as_str();
        let colorterm = env.colorterm.as_str();

        let is_windows_terminal = env.wt_session;
        let is_dumb = term == "dumb" || (term.is_empty() && !is_windows_terminal);
        let is_kitty = env.kitty_window_id || term.contains("kitty");

        let is_modern_terminal = MODERN_TERMINALS
            .iter()
            .any(|t| term_program.contains(t) || term.contains(&t.to_lowercase()))
            || is_windows_terminal;

        let true_color = !env.no_color
            && !is_dumb
            && (colorterm.contains("truecolor") || colorterm.contains("24bit") || is_modern_terminal || is_kitty);

        let colors_256 =
            !env.no_color && !is_dumb && (true_color || term.contains("256color") || term.contains("256"));

        let sync_output =
            !is_dumb && (is_kitty || SYNC_OUTPUT_TERMINALS.iter().any(|t| term_program.contains(t)));

        let osc8_hyperlinks = !env.no_color && !is_dumb && is_modern_terminal;
        let scroll_region = !is_dumb;

        let kitty_keyboard = is_kitty
            || KITTY_KEYBOARD_TERMINALS
                .iter()
                .any(|t| term_program.contains(t) || term.contains(&t.to_lowercase()));

        let focus_events = !is_dumb && (is_modern_terminal || is_kitty);
        let bracketed_paste = !is_dumb;
        let mouse_sgr = !is_dumb;
        let osc52_clipboard = !is_dumb && !in_any_mux && (is_modern_terminal || is_kitty);

        // `linux` (the Linux VT) is the one terminal this crate's sharp-edge
        // table singles out by name: it advertises xterm-like editing but
        // silently no-ops REP.
        let rep = !is_dumb && term != "linux";

        Self {
            profile: TerminalProfile::Detected,
            true_color,
            colors_256,
            sync_output,
            osc8_hyperlinks,
            scroll_region,
            in_tmux,
            in_screen,
            in_zellij,
            kitty_keyboard,
            focus_events,
            bracketed_paste,
            mouse_sgr,
            osc52_clipboard,
            cha: !is_dumb,
            hpa: !is_dumb,
            vpa: !is_dumb,
            ech: !is_dumb,
            rep,
            ich: !is_dumb,
            dch: !is_dumb,
            il: !is_dumb,
            dl: !is_dumb,
            su: !is_dumb,
            sd: !is_dumb,
            decstbm: !is_dumb,
            decawm: !is_dumb,
            tab_stops_8: !is_dumb,
            backspace_wraps: false,
        }
    }

    /// Minimal fallback, safe on any terminal including dumb ones.
    #[must_use]
    pub const fn basic() -> Self {
        Self {
            profile: TerminalProfile::Dumb,
            true_color: false,
            colors_256: false,
            sync_output: false,
            osc8_hyperlinks: false,
            scroll_region: false,
            in_tmux: false,
            in_screen: false,
            in_zellij: false,
            kitty_keyboard: false,
            focus_events: false,
            bracketed_paste: false,
            mouse_sgr: false,
            osc52_clipboard: false,
            cha: true,
            hpa: true,
            vpa: true,
            ech: false,
            rep: false,
            ich: false,
            dch: false,
            il: false,
            dl: false,
            su: false,
            sd: false,
            decstbm: false,
            decawm: true,
            tab_stops_8: false,
            backspace_wraps: false,
        }
    }

    #[must_use]
    #[inline]
    pub const fn in_any_mux(&self) -> bool {
        self.in_tmux || self.in_screen || self.in_zellij
    }

    #[must_use]
    #[inline]
    pub const fn has_color(&self) -> bool {
        self.true_color || self.colors_256
    }

    /// The [`ColorProfile`] this terminal should be asked to downsample
    /// to, derived from the detected color depth.
    #[must_use]
    pub const fn color_profile(&self) -> ColorProfile {
        if self.true_color {
            ColorProfile::TrueColor
        } else if self.colors_256 {
            ColorProfile::Ansi256
        } else {
            ColorProfile::Ansi
        }
    }

    /// Whether synchronized output (DEC mode 2026) should be used.
    /// Disabled in multiplexers: passthrough for mode-setting sequences
    /// is unreliable.
    #[must_use]
    #[inline]
    pub const fn use_sync_output(&self) -> bool {
        if self.in_any_mux() {
            return false;
        }
        self.sync_output
    }

    /// Whether scroll-region optimization (DECSTBM) is safe to use.
    /// Disabled in multiplexers due to inconsistent scroll margin
    /// handling across tmux, screen, and Zellij.
    #[must_use]
    #[inline]
    pub const fn use_scroll_region(&self) -> bool {
        if self.in_any_mux() {
            return false;
        }
        self.scroll_region
    }

    /// Whether OSC 8 hyperlinks should be emitted. Disabled in tmux and
    /// screen because OSC passthrough is fragile there.
    #[must_use]
    #[inline]
    pub const fn use_hyperlinks(&self) -> bool {
        if self.in_any_mux() {
            return false;
        }
        self.osc8_hyperlinks
    }

    #[must_use]
    #[inline]
    pub const fn use_clipboard(&self) -> bool {
        if self.in_any_mux() {
            return false;
        }
        self.osc52_clipboard
    }

    /// Whether DCS passthrough wrapping is required to reach the inner
    /// terminal. Zellij handles passthrough natively and doesn't need it.
    #[must_use]
    #[inline]
    pub const fn needs_passthrough_wrap(&self) -> bool {
        self.in_tmux || self.in_screen
    }

    /// Whether REP (repeat-preceding-character) may be used. `false` on
    /// `linux`, which advertises xterm-like editing but doesn't implement it.
    #[must_use]
    #[inline]
    pub const fn use_rep(&self) -> bool {
        self.rep
    }

    #[must_use]
    #[inline]
    pub const fn use_cha(&self) -> bool {
        self.cha
    }

    #[must_use]
    #[inline]
    pub const fn use_hpa(&self) -> bool {
        self.hpa
    }

    #[must_use]
    #[inline]
    pub const fn use_vpa(&self) -> bool {
        self.vpa
    }

    #[must_use]
    #[inline]
    pub const fn use_ech(&self) -> bool {
        self.ech
    }

    #[must_use]
    #[inline]
    pub const fn use_ich(&self) -> bool {
        self.ich
    }

    #[must_use]
    #[inline]
    pub const fn use_dch(&self) -> bool {
        self.dch
    }

    #[must_use]
    #[inline]
    pub const fn use_il(&self) -> bool {
        self.il
    }

    #[must_use]
    #[inline]
    pub const fn use_dl(&self) -> bool {
        self.dl
    }

    #[must_use]
    #[inline]
    pub const fn use_decawm(&self) -> bool {
        self.decawm
    }
}
