//! Hex-grid geometry.
//!
//! Axial coordinates on a flat-topped grid, the six-direction facing model and
//! line tracing between hex centers. Everything here is pure and cheap; the
//! rest of the crate calls into it for every weapon on every candidate target.

mod coords;
mod line;

pub use coords::{Facing, Hex};
pub use line::{LineStep, intervening, trace_line};
