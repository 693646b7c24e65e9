#![forbid(unsafe_code)]

//! Render substrate for chartspace.
//!
//! # Role in chartspace
//! `chartspace-render` is the shared vocabulary between widgets and the
//! terminal backend: a cell grid, styles, and rectangles. It knows nothing
//! about tabs, panes, or clinical data.
//!
//! # This crate provides
//! - [`Rect`] terminal-coordinate geometry.
//! - [`Style`], [`StyleFlags`], and [`Color`] with cascading `merge`.
//! - [`Buffer`] of styled cells with clipped, width-aware span drawing.

pub mod buffer;
pub mod geometry;
pub mod style;

pub use buffer::{Buffer, CONTINUATION, Cell};
pub use geometry::Rect;
pub use style::{Color, Style, StyleFlags};
