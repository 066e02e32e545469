//! Idle/demo mode - picks a heading toward the apple
//!
//! Greedy and one step deep: good enough to keep the attract screen alive, not to win.

use super::state::{GameState, Heading};

/// Choose the next heading, or `None` if every move is fatal
pub fn choose_heading(state: &GameState) -> Option<Heading> {
    let snake = &state.snake;
    let head = snake.head();

    // The tail moves out of the way unless the snake is still growing
    let tail_vacates = snake.len() >= snake.max_cells;
    let blocking = if tail_vacates {
        snake.len().saturating_sub(1)
    } else {
        snake.len()
    };

    Heading::ALL
        .into_iter()
        .filter(|h| *h != snake.heading.opposite())
        .filter(|h| {
            let next = head.offset(*h);
            state.grid.contains(next) && !snake.cells.iter().take(blocking).any(|c| *c == next)
        })
        .min_by_key(|h| {
            let next = head.offset(*h);
            // Prefer going straight on ties to avoid zig-zagging
            (next.distance(state.apple), *h != snake.heading)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::state::{Grid, Position, Snake};
    use crate::sim::tick::{StepOutcome, step};

    fn state_with(snake: Snake, apple: Position) -> GameState {
        let mut state = GameState::new(Grid::new(10, 10), &Settings::default(), 0, 1);
        state.snake = snake;
        state.apple = apple;
        state
    }

    #[test]
    fn test_heads_toward_apple() {
        let state = state_with(
            Snake::new(Position::new(5, 5), Heading::Right, 4),
            Position::new(5, 1),
        );
        assert_eq!(choose_heading(&state), Some(Heading::Up));
    }

    #[test]
    fn test_avoids_wall() {
        let state = state_with(
            Snake::new(Position::new(9, 0), Heading::Right, 4),
            Position::new(9, 9),
        );
        assert_eq!(choose_heading(&state), Some(Heading::Down));
    }

    #[test]
    fn test_never_reverses() {
        let state = state_with(
            Snake::new(Position::new(5, 5), Heading::Right, 4),
            Position::new(0, 5),
        );
        let choice = choose_heading(&state);
        assert!(choice.is_some());
        assert_ne!(choice, Some(Heading::Left));
    }

    #[test]
    fn test_boxed_in_returns_none() {
        let mut snake = Snake::new(Position::new(0, 0), Heading::Left, 8);
        // Head in the corner, body below; the only other exits are walls or reversal
        snake.cells.push_back(Position::new(1, 0));
        snake.cells.push_back(Position::new(1, 1));
        snake.cells.push_back(Position::new(0, 1));
        snake.cells.push_back(Position::new(0, 2));
        let state = state_with(snake, Position::new(9, 9));
        assert_eq!(choose_heading(&state), None);
    }

    #[test]
    fn test_demo_game_scores() {
        let settings = Settings::default();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 0, 2024);
        for _ in 0..500 {
            if let Some(h) = choose_heading(&state) {
                state.queue_heading(h);
            }
            if let StepOutcome::GameOver { .. } = step(&mut state, &settings) {
                break;
            }
        }
        assert!(state.score > 0);
    }
}
