//! Draw pass
//!
//! The simulation never draws. `draw_frame` reads a finished `GameState` and
//! issues circle/text primitives against whatever surface the platform
//! provides.

pub mod scene;
pub mod surface;

pub use scene::draw_frame;
pub use surface::{Color, DrawCommand, DrawList, DrawSurface, colors};
