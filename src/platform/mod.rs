//! Platform abstraction layer
//!
//! Browser-agnostic pieces of the frame loop:
//! - Time/ticks (fixed timestep accumulator)
//! - Input events (key identifiers to commands)

pub mod input;
pub mod time;

pub use input::{KeyCommand, map_key};
pub use time::FixedTimestep;
