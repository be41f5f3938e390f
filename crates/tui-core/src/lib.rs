#![forbid(unsafe_code)]

//! Geometry, events, the input decoder, and the terminal façade that glues
//! the decoder and [`tui_render::Renderer`] to a pair of byte streams.

pub mod decoder;
pub mod event;
pub mod geometry;
pub mod logging;
pub mod terminal;

pub use decoder::{Decoder, LegacyKeyEncoding};
pub use event::Event;
pub use geometry::{Rect, Sides};
pub use terminal::{CancellationToken, RawModeGuard, ResizeSource, Terminal};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
