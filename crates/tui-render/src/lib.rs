#![forbid(unsafe_code)]

//! Cell grid, buffer, width method, capability profile, styled-string
//! ingest, and the diff-based renderer.
//!
//! A typical frame loop:
//!
//! ```ignore
//! use tui_render::{Buffer, Capabilities, Ingest, Rect, Renderer, Wcwidth};
//!
//! let caps = Capabilities::detect();
//! let mut renderer = Renderer::new(std::io::stdout(), caps, 80, 24);
//! let mut ingest = Ingest::new(Wcwidth);
//!
//! let mut frame = Buffer::new(80, 24);
//! let rect = Rect::new(0, 0, 80, 24);
//! ingest.write_str(&mut frame, rect, 0, 0, true, None, "hello, world");
//! renderer.present(&mut frame)?;
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod ansi;
pub mod buffer;
pub mod capability;
pub mod cell;
pub mod ingest;
pub mod line;
pub mod renderer;
pub mod width;

pub use buffer::{Buffer, Rect};
pub use capability::{CapabilityBuilder, Capabilities, TerminalProfile};
pub use cell::{Cell, MAX_COMBINING, MAX_WIDE_WIDTH};
pub use ingest::Ingest;
pub use line::Line;
pub use renderer::{PresentStats, Renderer};
pub use width::{GraphemeClusterWidth, WidthMethod, Wcwidth};

pub use tui_style::{Attributes, Color, ColorProfile, Link, Style, UnderlineStyle};
