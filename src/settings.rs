//! Game settings and tuning
//!
//! Persisted separately from the best score in LocalStorage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a settings record is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("tile size must be at least 1 pixel")]
    ZeroTileSize,
    #[error("minimum step period must be positive")]
    ZeroMinStep,
    #[error("start step period {start}ms is faster than the floor {min}ms")]
    StartBelowFloor { start: u32, min: u32 },
    #[error("speed-up interval must be at least 1 point")]
    ZeroSpeedupInterval,
    #[error("initial snake length must be at least 1 cell")]
    ZeroInitialLength,
    #[error("at least one step per frame is required")]
    ZeroStepsPerFrame,
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Grid ===
    /// Tile edge length in CSS pixels
    pub tile_size: u32,
    /// Draw the faint tile grid
    pub show_grid: bool,

    // === Pace ===
    /// Step period when a game starts (ms)
    pub start_step_ms: u32,
    /// Step period floor (ms)
    pub min_step_ms: u32,
    /// Reduction per speed-up (ms)
    pub step_decrement_ms: u32,
    /// Speed up every Nth point
    pub speedup_every: u32,
    /// Steps allowed per animation frame
    pub max_steps_per_frame: u32,

    // === Snake ===
    /// Target length right after reset
    pub initial_max_cells: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            show_grid: true,

            start_step_ms: START_STEP_MS,
            min_step_ms: MIN_STEP_MS,
            step_decrement_ms: STEP_DECREMENT_MS,
            speedup_every: SPEEDUP_EVERY,
            max_steps_per_frame: MAX_STEPS_PER_FRAME,

            initial_max_cells: INITIAL_MAX_CELLS,
        }
    }
}

impl Settings {
    /// Check the record is playable
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.tile_size == 0 {
            return Err(SettingsError::ZeroTileSize);
        }
        if self.min_step_ms == 0 {
            return Err(SettingsError::ZeroMinStep);
        }
        if self.start_step_ms < self.min_step_ms {
            return Err(SettingsError::StartBelowFloor {
                start: self.start_step_ms,
                min: self.min_step_ms,
            });
        }
        if self.speedup_every == 0 {
            return Err(SettingsError::ZeroSpeedupInterval);
        }
        if self.initial_max_cells == 0 {
            return Err(SettingsError::ZeroInitialLength);
        }
        if self.max_steps_per_frame == 0 {
            return Err(SettingsError::ZeroStepsPerFrame);
        }
        Ok(())
    }

    /// Step period after reaching `score`, given the period before it
    pub fn next_step_ms(&self, step_ms: u32, score: u32) -> u32 {
        if score % self.speedup_every == 0 && step_ms > self.min_step_ms {
            step_ms
                .saturating_sub(self.step_decrement_ms)
                .max(self.min_step_ms)
        } else {
            step_ms
        }
    }

    /// Parse a JSON record, falling back to defaults if it is unreadable or invalid
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => match settings.validate() {
                Ok(()) => settings,
                Err(e) => {
                    log::warn!("Rejected stored settings: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Unreadable stored settings: {}", e);
                Self::default()
            }
        }
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "snake_settings_v1";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                log::info!("Loaded settings from LocalStorage");
                return Self::from_json(&json);
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native runs have no settings store
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
