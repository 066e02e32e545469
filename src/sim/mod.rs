//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One discrete step per call, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod state;
pub mod tick;

pub use autopilot::choose_heading;
pub use state::{GamePhase, GameState, Grid, Heading, Position, Snake};
pub use tick::{Collision, StepOutcome, step};
