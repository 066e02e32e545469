//! Grid Snake - a tile-based snake game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (snake movement, collisions, apple placement)
//! - `controller`: Game state machine wiring input and frame time into the simulation
//! - `renderer`: Vertex generation and WebGPU pipeline
//! - `platform`: Key mapping and fixed-timestep clock
//! - `persistence`: Best score storage gateway
//! - `settings`: Data-driven game tuning

pub mod controller;
pub mod hud;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use controller::{Controller, FrameReport, RenderRequest};
pub use hud::Hud;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Tile edge length in CSS pixels
    pub const TILE_SIZE: u32 = 20;

    /// Step period at the start of a game (ms). Also the 1.0x reference for the speed HUD.
    pub const START_STEP_MS: u32 = 140;
    /// Fastest allowed step period (ms)
    pub const MIN_STEP_MS: u32 = 70;
    /// Step period reduction applied on each speed-up (ms)
    pub const STEP_DECREMENT_MS: u32 = 8;
    /// Speed up every Nth point
    pub const SPEEDUP_EVERY: u32 = 4;

    /// Target snake length after reset
    pub const INITIAL_MAX_CELLS: usize = 4;

    /// Maximum simulation steps per frame to prevent spiral of death
    pub const MAX_STEPS_PER_FRAME: u32 = 8;

    /// Random attempts before apple placement falls back to scanning free cells
    pub const APPLE_PLACEMENT_ATTEMPTS: u32 = 64;

    /// Storage key for the persisted best score
    pub const BEST_SCORE_KEY: &str = "snake_best_v1";
}
