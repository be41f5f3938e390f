//! Colour values, colour profiles, and SGR downsampling.

/// A terminal colour at one of three fidelity levels.
///
/// `None` at the call site (in [`crate::Style`]) represents "unset" — the
/// terminal's default foreground/background, which is distinct from any of
/// these three tagged variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// One of the 16 basic ANSI colours (0-7 normal, 8-15 bright).
    Basic(u8),
    /// A 256-colour palette index.
    Indexed(u8),
    /// A 24-bit true colour value.
    Rgb(u8, u8, u8),
}

/// The colour fidelity a renderer is allowed to emit.
///
/// Independent of [`crate::style::Attributes`] or any particular
/// terminal's capability bits — this is purely about how many colours the
/// output stream is allowed to name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorProfile {
    /// No colour output at all; only attributes (bold, underline, ...).
    Ascii,
    /// Basic 16-colour ANSI.
    Ansi,
    /// Extended 256-colour palette.
    Ansi256,
    /// Full 24-bit RGB.
    #[default]
    TrueColor,
}

impl Color {
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(r, g, b)
    }

    /// Downsample this colour to fit within `profile`, caching nothing —
    /// callers that downsample the same colour repeatedly should cache the
    /// result themselves (the renderer caches it in the pen).
    #[must_use]
    pub fn downsample(self, profile: ColorProfile) -> Self {
        match profile {
            ColorProfile::TrueColor => self,
            ColorProfile::Ansi256 => match self {
                Self::Rgb(r, g, b) => Self::Indexed(rgb_to_256(r, g, b)),
                other => other,
            },
            ColorProfile::Ansi => match self {
                Self::Rgb(r, g, b) => Self::Basic(rgb_to_basic(r, g, b)),
                Self::Indexed(idx) => Self::Basic(indexed_to_basic(idx)),
                other => other,
            },
            // Ascii has no representation to downsample *to* — a `Color`
            // value always names some color. Suppressing color output
            // entirely under this profile is the SGR-emission layer's job
            // (`push_color_params` skips the parameter outright), not this
            // method's.
            ColorProfile::Ascii => self,
        }
    }

    /// SGR parameter bytes for this colour as a foreground (`fg = true`) or
    /// background (`fg = false`), using the narrowest encoding for the
    /// variant already selected by [`Self::downsample`].
    ///
    /// A caller targeting [`ColorProfile::Ascii`] should not call this at
    /// all — ASCII profile emits no colour parameters.
    #[must_use]
    pub fn sgr_params(self, fg: bool) -> Vec<u8> {
        match self {
            Self::Basic(n) => basic_sgr(n, fg).into_bytes(),
            Self::Indexed(n) => format!("{};5;{n}", if fg { 38 } else { 48 }).into_bytes(),
            Self::Rgb(r, g, b) => {
                format!("{};2;{r};{g};{b}", if fg { 38 } else { 48 }).into_bytes()
            }
        }
    }

    /// SGR parameter bytes for this colour used as an underline colour
    /// (`CSI 58;...m`). There is no 16-colour encoding for underline
    /// colour, so `Basic` is expressed as its equivalent palette index.
    #[must_use]
    pub fn sgr_underline_params(self) -> Vec<u8> {
        match self {
            Self::Basic(n) => format!("58;5;{}", n.min(15)).into_bytes(),
            Self::Indexed(n) => format!("58;5;{n}").into_bytes(),
            Self::Rgb(r, g, b) => format!("58;2;{r};{g};{b}").into_bytes(),
        }
    }

    /// This colour's nearest RGB triplet, regardless of fidelity.
    #[must_use]
    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            Self::Rgb(r, g, b) => (r, g, b),
            Self::Indexed(idx) => indexed_to_rgb(idx),
            Self::Basic(n) => BASIC_PALETTE[(n & 0x0F) as usize],
        }
    }
}

fn basic_sgr(n: u8, fg: bool) -> String {
    let n = n & 0x0F;
    if n < 8 {
        format!("{}", if fg { 30 + n } else { 40 + n })
    } else {
        format!("{}", if fg { 90 + (n - 8) } else { 100 + (n - 8) })
    }
}

const BASIC_PALETTE: [(u8, u8, u8); 16] = [
    (0, 0, 0),
    (205, 0, 0),
    (0, 205, 0),
    (205, 205, 0),
    (0, 0, 238),
    (205, 0, 205),
    (0, 205, 205),
    (229, 229, 229),
    (127, 127, 127),
    (255, 0, 0),
    (0, 255, 0),
    (255, 255, 0),
    (92, 92, 255),
    (255, 0, 255),
    (0, 255, 255),
    (255, 255, 255),
];

/// Nearest ANSI-256 palette index for an RGB triplet.
#[must_use]
pub fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    if r == g && g == b {
        if r < 8 {
            return 16;
        }
        if r > 248 {
            return 231;
        }
        return 232 + ((r - 8) / 10).min(23);
    }
    16 + 36 * cube_index(r) + 6 * cube_index(g) + cube_index(b)
}

/// Maps an 8-bit channel to the nearest of the 256-colour cube's 6 levels
/// (`0, 95, 135, 175, 215, 255`), using the midpoints between them.
fn cube_index(v: u8) -> u8 {
    if v < 48 {
        0
    } else if v < 115 {
        1
    } else {
        (v - 35) / 40
    }
}

/// RGB triplet for an ANSI-256 palette index.
#[must_use]
pub fn indexed_to_rgb(index: u8) -> (u8, u8, u8) {
    if index < 16 {
        return BASIC_PALETTE[index as usize];
    }
    if index >= 232 {
        let gray = 8 + 10 * (index - 232);
        return (gray, gray, gray);
    }
    let idx = index - 16;
    const LEVELS: [u8; 6] = [0, 95, 135, 175, 215, 255];
    (
        LEVELS[(idx / 36) as usize],
        LEVELS[((idx / 6) % 6) as usize],
        LEVELS[(idx % 6) as usize],
    )
}

fn indexed_to_basic(idx: u8) -> u8 {
    if idx < 16 {
        return idx;
    }
    let (r, g, b) = indexed_to_rgb(idx);
    rgb_to_basic(r, g, b)
}

/// Nearest of the 16 basic ANSI colours for an RGB triplet, by weighted
/// (BT.709-ish) Euclidean distance.
#[must_use]
pub fn rgb_to_basic(r: u8, g: u8, b: u8) -> u8 {
    let mut best = 0u8;
    let mut best_dist = u64::MAX;
    for (i, &(pr, pg, pb)) in BASIC_PALETTE.iter().enumerate() {
        let dr = (r as i32 - pr as i32).pow(2) as u64;
        let dg = (g as i32 - pg as i32).pow(2) as u64;
        let db = (b as i32 - pb as i32).pow(2) as u64;
        let dist = 2126 * dr + 7152 * dg + 722 * db;
        if dist < best_dist {
            best = i as u8;
            best_dist = dist;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truecolor_passthrough() {
        let c = Color::rgb(12, 34, 56);
        assert_eq!(c.downsample(ColorProfile::TrueColor), c);
    }

    #[test]
    fn downsample_to_256_then_16() {
        let red = Color::rgb(255, 0, 0);
        let as_256 = red.downsample(ColorProfile::Ansi256);
        assert_eq!(as_256, Color::Indexed(196));
        let as_16 = as_256.downsample(ColorProfile::Ansi);
        assert_eq!(as_16, Color::Basic(9)); // bright red
    }

    #[test]
    fn grayscale_ramp_boundaries() {
        assert_eq!(rgb_to_256(0, 0, 0), 16);
        assert_eq!(rgb_to_256(8, 8, 8), 232);
        assert_eq!(rgb_to_256(255, 255, 255), 231);
    }

    #[test]
    fn basic_sgr_encoding() {
        assert_eq!(Color::Basic(1).sgr_params(true), b"31");
        assert_eq!(Color::Basic(9).sgr_params(true), b"91");
        assert_eq!(Color::Basic(1).sgr_params(false), b"41");
    }

    #[test]
    fn indexed_round_trip_first_16() {
        for i in 0..16u8 {
            assert_eq!(indexed_to_rgb(i), BASIC_PALETTE[i as usize]);
        }
    }
}
