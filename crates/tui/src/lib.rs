#![forbid(unsafe_code)]

//! Public façade: re-exports the cell grid engine's three crates under one
//! name.
//!
//! ```ignore
//! use tui::prelude::*;
//!
//! let caps = Capabilities::detect();
//! let mut term = Terminal::new(std::io::stdin(), std::io::stdout(), caps, 80, 24);
//! let mut frame = Buffer::new(80, 24);
//! let mut ingest = Ingest::new(Wcwidth);
//! let rect = tui::buffer::Rect::new(0, 0, 80, 24);
//! ingest.write_str(&mut frame, rect, 0, 0, true, None, "hello, world");
//! term.present(&mut frame)?;
//! # Ok::<(), std::io::Error>(())
//! ```

pub use tui_core::{
    decoder, event, geometry, terminal, CancellationToken, Decoder, Event, LegacyKeyEncoding,
    RawModeGuard, Rect, ResizeSource, Sides, Terminal,
};
pub use tui_render::{
    ansi, buffer, capability, cell, ingest, line, renderer, width, Attributes, Buffer,
    CapabilityBuilder, Capabilities, Cell, Color, ColorProfile, GraphemeClusterWidth, Ingest,
    Line, Link, PresentStats, Renderer, Style, TerminalProfile, UnderlineStyle, Wcwidth,
    WidthMethod, MAX_COMBINING, MAX_WIDE_WIDTH,
};

/// Glob-importable bundle of the types most client code needs.
pub mod prelude {
    pub use crate::{
        Buffer, CancellationToken, Capabilities, Cell, Color, ColorProfile, Decoder, Event,
        Ingest, Line, PresentStats, RawModeGuard, Rect, Renderer, ResizeSource, Sides, Style,
        Terminal, Wcwidth,
    };
}
