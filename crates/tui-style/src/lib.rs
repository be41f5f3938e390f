#![forbid(unsafe_code)]

//! SGR style, colour, and hyperlink types shared by the cell grid and the
//! diff-based renderer.

pub mod color;
pub mod link;
pub mod style;

pub use color::{Color, ColorProfile};
pub use link::Link;
pub use style::{Attributes, Style, UnderlineStyle};
