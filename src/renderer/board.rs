//! Board drawing
//!
//! `render` is a pure function of the game state: it never mutates anything and produces the
//! full frame as a triangle list in surface pixels.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Position};

/// Corner radius of a tile, in CSS pixels
const CELL_RADIUS: f32 = 5.0;
/// Segments per rounded corner
const CORNER_SEGMENTS: u32 = 4;
/// Title glyph pixel size in CSS pixels (7 rows -> 28px)
const TITLE_SCALE: f32 = 4.0;
/// Hint glyph pixel size in CSS pixels (7 rows -> 14px)
const HINT_SCALE: f32 = 2.0;

pub const PAUSED_TITLE: &str = "Paused";
pub const GAME_OVER_TITLE: &str = "Game Over";
pub const HINT_TEXT: &str = "Press R to restart · P to resume";

/// Surface geometry in device pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Surface width
    pub width: f32,
    /// Surface height
    pub height: f32,
    /// Tile edge in CSS pixels
    pub tile: f32,
    /// Device pixels per CSS pixel
    pub scale: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32, tile: f32, scale: f32) -> Self {
        Self {
            width,
            height,
            tile,
            scale,
        }
    }

    /// Tile edge in device pixels
    pub fn tile_px(&self) -> f32 {
        self.tile * self.scale
    }

    /// Top-left corner of a tile
    pub fn tile_origin(&self, pos: Position) -> Vec2 {
        Vec2::new(pos.x as f32, pos.y as f32) * self.tile_px()
    }
}

/// Options that change what gets drawn without touching game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub show_grid: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { show_grid: true }
    }
}

/// Overlay text for the current state, if the overlay is shown
pub fn overlay_title(state: &GameState, overlay: bool) -> Option<&'static str> {
    if !(overlay || state.is_paused() || !state.is_running()) {
        return None;
    }
    Some(if state.is_running() {
        PAUSED_TITLE
    } else {
        GAME_OVER_TITLE
    })
}

/// Build the frame: background, grid, apple, snake, then the overlay when requested or when
/// the game is paused or over
pub fn render(
    state: &GameState,
    viewport: &Viewport,
    options: &RenderOptions,
    overlay: bool,
) -> Vec<Vertex> {
    let size = Vec2::new(viewport.width, viewport.height);
    let tile = viewport.tile_px();

    let mut vertices = shapes::rect(Vec2::ZERO, size, colors::BACKGROUND);

    if options.show_grid && tile >= 1.0 {
        let line = viewport.scale.max(1.0);
        let mut x = tile;
        while x < viewport.width {
            vertices.extend(shapes::rect(
                Vec2::new(x, 0.0),
                Vec2::new(line, size.y),
                colors::GRID_LINE,
            ));
            x += tile;
        }
        let mut y = tile;
        while y < viewport.height {
            vertices.extend(shapes::rect(
                Vec2::new(0.0, y),
                Vec2::new(size.x, line),
                colors::GRID_LINE,
            ));
            y += tile;
        }
    }

    let cell = |pos: Position, color: [f32; 4]| {
        shapes::rounded_rect(
            viewport.tile_origin(pos),
            Vec2::splat(tile),
            CELL_RADIUS * viewport.scale,
            color,
            CORNER_SEGMENTS,
        )
    };

    vertices.extend(cell(state.apple, colors::APPLE));

    // Body tail-first, head last so it stays on top
    for pos in state.snake.cells.iter().skip(1).rev() {
        vertices.extend(cell(*pos, colors::SNAKE_BODY));
    }
    if !state.snake.is_empty() {
        vertices.extend(cell(state.snake.head(), colors::SNAKE_HEAD));
    }

    if let Some(title) = overlay_title(state, overlay) {
        vertices.extend(shapes::rect(Vec2::ZERO, size, colors::OVERLAY));

        let center = size / 2.0;
        let title_scale = TITLE_SCALE * viewport.scale;
        let hint_scale = HINT_SCALE * viewport.scale;
        vertices.extend(shapes::text_centered(
            center.x,
            center.y - 10.0 * viewport.scale - 7.0 * title_scale,
            title,
            title_scale,
            colors::OVERLAY_TITLE,
        ));
        vertices.extend(shapes::text_centered(
            center.x,
            center.y + 18.0 * viewport.scale - 7.0 * hint_scale,
            HINT_TEXT,
            hint_scale,
            colors::OVERLAY_HINT,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{GamePhase, Grid};

    fn state() -> GameState {
        GameState::new(Grid::new(10, 10), &Settings::default(), 0, 3)
    }

    fn viewport() -> Viewport {
        Viewport::new(200.0, 200.0, 20.0, 1.0)
    }

    fn has_color(vertices: &[Vertex], color: [f32; 4]) -> bool {
        vertices.iter().any(|v| v.color == color)
    }

    #[test]
    fn test_playing_frame_has_no_overlay() {
        let s = state();
        let v = render(&s, &viewport(), &RenderOptions::default(), false);
        assert!(has_color(&v, colors::BACKGROUND));
        assert!(has_color(&v, colors::GRID_LINE));
        assert!(has_color(&v, colors::APPLE));
        assert!(has_color(&v, colors::SNAKE_HEAD));
        assert!(!has_color(&v, colors::OVERLAY));
        assert_eq!(overlay_title(&s, false), None);
    }

    #[test]
    fn test_head_drawn_distinctly_and_last() {
        let mut s = state();
        s.snake.cells.push_back(Position::new(4, 5));
        let v = render(&s, &viewport(), &RenderOptions::default(), false);
        assert!(has_color(&v, colors::SNAKE_BODY));
        let last_snake = v
            .iter()
            .rev()
            .find(|p| p.color == colors::SNAKE_HEAD || p.color == colors::SNAKE_BODY)
            .map(|p| p.color);
        assert_eq!(last_snake, Some(colors::SNAKE_HEAD));
    }

    #[test]
    fn test_overlay_forced_or_implied() {
        let mut s = state();
        assert_eq!(overlay_title(&s, true), Some(PAUSED_TITLE));

        s.phase = GamePhase::Paused;
        assert_eq!(overlay_title(&s, false), Some(PAUSED_TITLE));
        let v = render(&s, &viewport(), &RenderOptions::default(), false);
        assert!(has_color(&v, colors::OVERLAY));
        assert!(has_color(&v, colors::OVERLAY_TITLE));
        assert!(has_color(&v, colors::OVERLAY_HINT));

        s.phase = GamePhase::GameOver;
        assert_eq!(overlay_title(&s, false), Some(GAME_OVER_TITLE));
    }

    #[test]
    fn test_grid_can_be_hidden() {
        let options = RenderOptions { show_grid: false };
        let v = render(&state(), &viewport(), &options, false);
        assert!(!has_color(&v, colors::GRID_LINE));
    }

    #[test]
    fn test_tile_origin_scales_with_dpr() {
        let vp = Viewport::new(400.0, 400.0, 20.0, 2.0);
        assert_eq!(vp.tile_origin(Position::new(3, 1)), Vec2::new(120.0, 40.0));
    }
}
