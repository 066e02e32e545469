//! Game state and core simulation types
//!
//! Everything a step reads or writes lives here; the RNG is seeded so a run can be replayed.

use std::collections::VecDeque;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::APPLE_PLACEMENT_ATTEMPTS;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Snake is moving
    Playing,
    /// Game is paused
    Paused,
    /// Run ended by a collision
    GameOver,
}

/// A tile coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring tile in the given direction (may be off-grid)
    pub fn offset(self, heading: Heading) -> Self {
        let (dx, dy) = heading.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Manhattan distance
    pub fn distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Movement direction. Screen coordinates: +y is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Unit grid vector (dx, dy)
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
            Heading::Right => (1, 0),
        }
    }

    pub const fn opposite(self) -> Self {
        match self {
            Heading::Up => Heading::Down,
            Heading::Down => Heading::Up,
            Heading::Left => Heading::Right,
            Heading::Right => Heading::Left,
        }
    }
}

/// Playfield size in tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    pub tiles_x: i32,
    pub tiles_y: i32,
}

impl Grid {
    pub const fn new(tiles_x: i32, tiles_y: i32) -> Self {
        Self { tiles_x, tiles_y }
    }

    /// Fit whole tiles into a canvas; leftover pixels are unused margin
    pub fn from_canvas(width: u32, height: u32, tile_size: u32) -> Self {
        let tile = tile_size.max(1);
        Self::new((width / tile) as i32, (height / tile) as i32)
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x < self.tiles_x && pos.y >= 0 && pos.y < self.tiles_y
    }

    pub fn center(&self) -> Position {
        Position::new(self.tiles_x / 2, self.tiles_y / 2)
    }

    pub fn area(&self) -> usize {
        (self.tiles_x.max(0) as usize) * (self.tiles_y.max(0) as usize)
    }

    /// Every tile, row by row
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.tiles_y).flat_map(move |y| (0..self.tiles_x).map(move |x| Position::new(x, y)))
    }
}

/// The player's snake
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snake {
    /// Occupied tiles, head first
    pub cells: VecDeque<Position>,
    /// Heading applied on the last step
    pub heading: Heading,
    /// Heading to commit on the next step
    pub next_heading: Heading,
    /// Target length; the tail is trimmed beyond this
    pub max_cells: usize,
}

impl Snake {
    pub fn new(head: Position, heading: Heading, max_cells: usize) -> Self {
        let mut cells = VecDeque::with_capacity(max_cells + 1);
        cells.push_back(head);
        Self {
            cells,
            heading,
            next_heading: heading,
            max_cells,
        }
    }

    pub fn head(&self) -> Position {
        // Cells are seeded with the head on construction and never drained
        self.cells.front().copied().unwrap_or(Position::new(0, 0))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Playfield size
    pub grid: Grid,
    /// Player snake
    pub snake: Snake,
    /// Apple tile
    pub apple: Position,
    /// Apples eaten this game
    pub score: u32,
    /// Highest score seen, survives resets
    pub best: u32,
    /// Current step period (ms)
    pub step_ms: u32,
    /// Current phase
    pub phase: GamePhase,
    /// Apple placement RNG, survives resets
    rng: Pcg32,
}

impl GameState {
    /// Create a new game with the given seed, ready to play
    pub fn new(grid: Grid, settings: &Settings, best: u32, seed: u64) -> Self {
        let mut state = Self {
            seed,
            grid,
            snake: Snake::new(grid.center(), Heading::Right, settings.initial_max_cells),
            apple: Position::new(0, 0),
            score: 0,
            best,
            step_ms: settings.start_step_ms,
            phase: GamePhase::Playing,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.place_apple();
        state
    }

    /// Start a fresh game; `best` and the RNG stream carry over
    pub fn reset(&mut self, settings: &Settings) {
        self.snake = Snake::new(self.grid.center(), Heading::Right, settings.initial_max_cells);
        self.score = 0;
        self.step_ms = settings.start_step_ms;
        self.phase = GamePhase::Playing;
        self.place_apple();
    }

    /// False once a collision has ended the run
    pub fn is_running(&self) -> bool {
        self.phase != GamePhase::GameOver
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Flip between Playing and Paused. Returns false (no change) after game over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Playing => self.phase = GamePhase::Paused,
            GamePhase::Paused => self.phase = GamePhase::Playing,
            GamePhase::GameOver => return false,
        }
        true
    }

    /// Buffer a heading for the next step.
    ///
    /// Ignored when the game is over, and when `heading` would reverse the snake onto its
    /// own neck (the exact opposite of the heading committed on the last step).
    pub fn queue_heading(&mut self, heading: Heading) -> bool {
        if !self.is_running() || heading == self.snake.heading.opposite() {
            return false;
        }
        self.snake.next_heading = heading;
        true
    }

    /// Move the apple to a tile the snake does not occupy.
    ///
    /// Tries uniform random tiles first, then picks uniformly among the enumerated free tiles.
    /// Returns false and leaves the apple in place if the snake fills the grid.
    pub fn place_apple(&mut self) -> bool {
        if self.grid.area() == 0 {
            return false;
        }

        for _ in 0..APPLE_PLACEMENT_ATTEMPTS {
            let candidate = Position::new(
                self.rng.random_range(0..self.grid.tiles_x),
                self.rng.random_range(0..self.grid.tiles_y),
            );
            if !self.snake.occupies(candidate) {
                self.apple = candidate;
                return true;
            }
        }

        let free: Vec<Position> = self
            .grid
            .positions()
            .filter(|p| !self.snake.occupies(*p))
            .collect();
        match free.choose(&mut self.rng) {
            Some(&pos) => {
                self.apple = pos;
                true
            }
            None => {
                log::warn!("No free tile for the apple ({} cells)", self.snake.len());
                false
            }
        }
    }
}
