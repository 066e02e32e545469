//! Top-level game state machine
//!
//! Owns the single `GameState` and decides, once per input or frame, whether the board needs
//! redrawing and whether the overlay is shown. Platform code only forwards events and draws.

use crate::consts::BEST_SCORE_KEY;
use crate::hud::Hud;
use crate::persistence::ScoreStore;
use crate::platform::{FixedTimestep, KeyCommand};
use crate::settings::Settings;
use crate::sim::{self, GamePhase, GameState, Grid, StepOutcome};

/// Ask the platform to draw the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRequest {
    /// Draw the Paused/Game Over overlay on top
    pub overlay: bool,
}

impl RenderRequest {
    pub const BOARD: Self = Self { overlay: false };
    pub const OVERLAY: Self = Self { overlay: true };
}

/// What a frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameReport {
    /// Simulation steps run
    pub steps: u32,
    /// Draw request, at most one per frame
    pub redraw: Option<RenderRequest>,
}

/// Game controller: input and frame time in, render requests out
pub struct Controller<S: ScoreStore> {
    settings: Settings,
    state: GameState,
    clock: FixedTimestep,
    store: S,
    autopilot: bool,
    /// The autopilot steered at some point this game
    assisted: bool,
}

impl<S: ScoreStore> Controller<S> {
    /// Start a game on `grid`, reading the best score from `store`
    pub fn new(settings: Settings, grid: Grid, store: S, seed: u64) -> Self {
        let best = store.get(BEST_SCORE_KEY).unwrap_or(0);
        log::info!(
            "New controller: {}x{} tiles, best {}, seed {}",
            grid.tiles_x,
            grid.tiles_y,
            best,
            seed
        );
        Self {
            state: GameState::new(grid, &settings, best, seed),
            settings,
            clock: FixedTimestep::new(),
            store,
            autopilot: false,
            assisted: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state, self.settings.start_step_ms)
    }

    /// Start a new game. Best score survives.
    pub fn reset(&mut self) {
        self.state.reset(&self.settings);
        self.clock.reset();
        self.assisted = self.autopilot;
        log::info!(
            "Game reset (best {}, seed {})",
            self.state.best,
            self.state.seed
        );
    }

    /// Apply a key command
    pub fn handle_key(&mut self, command: KeyCommand) -> Option<RenderRequest> {
        match command {
            KeyCommand::TogglePause => {
                if !self.state.toggle_pause() {
                    return None;
                }
                log::info!("{}", if self.state.is_paused() { "Paused" } else { "Resumed" });
                Some(self.current_view())
            }
            KeyCommand::Restart => {
                self.reset();
                Some(RenderRequest::BOARD)
            }
            KeyCommand::Turn(heading) => {
                self.state.queue_heading(heading);
                None
            }
            KeyCommand::ToggleAutopilot => {
                self.autopilot = !self.autopilot;
                self.assisted |= self.autopilot;
                log::info!("Idle mode: {}", self.autopilot);
                None
            }
        }
    }

    /// Pause a running game (tab hidden, window blurred)
    pub fn suspend(&mut self) -> Option<RenderRequest> {
        if self.state.is_playing() {
            self.state.toggle_pause();
            log::info!("Auto-paused");
            Some(RenderRequest::OVERLAY)
        } else {
            None
        }
    }

    /// Advance by one animation frame at timestamp `now` (ms)
    pub fn on_frame(&mut self, now: f64) -> FrameReport {
        let dt = self.clock.delta(now);
        if !self.state.is_playing() {
            return FrameReport::default();
        }

        self.clock.accumulate(dt);

        let max_steps = self.settings.max_steps_per_frame.max(1);
        let mut steps = 0;
        let mut ended = false;
        while steps < max_steps
            && self.state.is_playing()
            && self.clock.consume(self.state.step_ms)
        {
            ended |= self.step_once();
            steps += 1;
        }

        let redraw = if ended {
            Some(RenderRequest::OVERLAY)
        } else if self.state.is_playing() {
            Some(RenderRequest::BOARD)
        } else {
            None
        };

        FrameReport { steps, redraw }
    }

    /// Run one simulation step. Returns true if it ended the game.
    fn step_once(&mut self) -> bool {
        if self.autopilot {
            if let Some(heading) = sim::choose_heading(&self.state) {
                self.state.queue_heading(heading);
            }
        }

        let best_before = self.state.best;
        match sim::step(&mut self.state, &self.settings) {
            StepOutcome::GameOver {
                new_best: true,
                score,
                ..
            } if self.assisted => {
                // Autopilot scores never count as the player's best
                self.state.best = best_before;
                log::info!("Autopilot game scored {}, best not recorded", score);
                true
            }
            StepOutcome::GameOver {
                new_best: true,
                score,
                ..
            } => {
                log::info!("New best score: {}", score);
                if let Err(e) = self.store.set(BEST_SCORE_KEY, score) {
                    log::warn!("Could not save best score: {}", e);
                }
                true
            }
            StepOutcome::GameOver { .. } => true,
            StepOutcome::AteApple { score, .. } => {
                log::debug!("Apple eaten, score {}", score);
                false
            }
            StepOutcome::Moved | StepOutcome::Idle => false,
        }
    }

    fn current_view(&self) -> RenderRequest {
        if self.state.is_playing() {
            RenderRequest::BOARD
        } else {
            RenderRequest::OVERLAY
        }
    }
}
