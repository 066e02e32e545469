//! Fixed timestep simulation step
//!
//! Advances the snake by exactly one tile per call.

use super::state::{GamePhase, GameState};
use crate::settings::Settings;

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the grid
    Wall,
    /// Head ran into the body
    SelfBite,
}

/// Result of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Not playing; nothing changed
    Idle,
    /// Snake advanced one tile
    Moved,
    /// Snake advanced onto the apple
    AteApple { score: u32, sped_up: bool },
    /// Snake collided; the state is frozen until reset
    GameOver {
        cause: Collision,
        score: u32,
        new_best: bool,
    },
}

/// Advance the game state by one fixed step
pub fn step(state: &mut GameState, settings: &Settings) -> StepOutcome {
    if state.phase != GamePhase::Playing {
        return StepOutcome::Idle;
    }

    // Commit buffered heading (already filtered at input time)
    let snake = &mut state.snake;
    if snake.next_heading != snake.heading.opposite() {
        snake.heading = snake.next_heading;
    }

    let head = snake.head().offset(snake.heading);

    // Wall collision ends the game without moving the body
    if !state.grid.contains(head) {
        return game_over(state, Collision::Wall);
    }

    snake.cells.push_front(head);
    while snake.cells.len() > snake.max_cells {
        snake.cells.pop_back();
    }

    let mut outcome = StepOutcome::Moved;

    if head == state.apple {
        state.score += 1;
        state.snake.max_cells += 1;

        let before = state.step_ms;
        state.step_ms = settings.next_step_ms(state.step_ms, state.score);
        let sped_up = state.step_ms < before;
        if sped_up {
            log::debug!("Speed up: {}ms -> {}ms", before, state.step_ms);
        }

        state.place_apple();
        outcome = StepOutcome::AteApple {
            score: state.score,
            sped_up,
        };
    }

    if state.snake.cells.iter().skip(1).any(|c| *c == head) {
        return game_over(state, Collision::SelfBite);
    }

    outcome
}

fn game_over(state: &mut GameState, cause: Collision) -> StepOutcome {
    state.phase = GamePhase::GameOver;
    let new_best = state.score > state.best;
    if new_best {
        state.best = state.score;
    }
    log::info!(
        "Game over ({:?}) score {} best {}",
        cause,
        state.score,
        state.best
    );
    StepOutcome::GameOver {
        cause,
        score: state.score,
        new_best,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Grid, Heading, Position, Snake};
    use proptest::prelude::*;

    fn settings_len1() -> Settings {
        Settings {
            initial_max_cells: 1,
            ..Default::default()
        }
    }

    /// Park the apple somewhere the test path will not cross
    fn park_apple(state: &mut GameState, pos: Position) {
        state.apple = pos;
    }

    #[test]
    fn test_three_steps_straight() {
        let settings = settings_len1();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 0, 1);
        park_apple(&mut state, Position::new(0, 0));
        let start = state.snake.head();

        for _ in 0..3 {
            assert_eq!(step(&mut state, &settings), StepOutcome::Moved);
        }

        assert_eq!(state.snake.head(), Position::new(start.x + 3, start.y));
        assert_eq!(state.snake.len(), 1);
        assert!(state.is_running());
    }

    #[test]
    fn test_growth_up_to_max_cells() {
        let settings = Settings::default();
        let mut state = GameState::new(Grid::new(20, 20), &settings, 0, 1);
        park_apple(&mut state, Position::new(0, 0));

        for expected in [2, 3, 4, 4, 4] {
            step(&mut state, &settings);
            assert_eq!(state.snake.len(), expected);
        }
    }

    #[test]
    fn test_wall_collision() {
        let settings = settings_len1();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 0, 1);
        state.snake = Snake::new(Position::new(9, 5), Heading::Right, 1);
        park_apple(&mut state, Position::new(0, 0));
        state.score = 3;

        let outcome = step(&mut state, &settings);
        assert_eq!(
            outcome,
            StepOutcome::GameOver {
                cause: Collision::Wall,
                score: 3,
                new_best: true
            }
        );
        assert!(!state.is_running());
        assert_eq!(state.best, 3);
        // Body stays put
        assert_eq!(state.snake.head(), Position::new(9, 5));

        // Frozen afterwards
        assert_eq!(step(&mut state, &settings), StepOutcome::Idle);
    }

    #[test]
    fn test_wall_collision_keeps_higher_best() {
        let settings = settings_len1();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 12, 1);
        state.snake = Snake::new(Position::new(0, 0), Heading::Up, 1);
        park_apple(&mut state, Position::new(5, 5));
        state.score = 3;

        let outcome = step(&mut state, &settings);
        assert!(matches!(
            outcome,
            StepOutcome::GameOver {
                cause: Collision::Wall,
                new_best: false,
                ..
            }
        ));
        assert_eq!(state.best, 12);
    }

    #[test]
    fn test_eat_apple() {
        let settings = Settings::default();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 0, 5);
        let head = state.snake.head();
        park_apple(&mut state, Position::new(head.x + 1, head.y));

        let outcome = step(&mut state, &settings);
        assert_eq!(
            outcome,
            StepOutcome::AteApple {
                score: 1,
                sped_up: false
            }
        );
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.max_cells, 5);
        assert!(!state.snake.occupies(state.apple));
    }

    #[test]
    fn test_fourth_apple_speeds_up() {
        let settings = Settings::default();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 0, 5);
        state.score = 3;
        let head = state.snake.head();
        park_apple(&mut state, Position::new(head.x + 1, head.y));

        let outcome = step(&mut state, &settings);
        assert_eq!(
            outcome,
            StepOutcome::AteApple {
                score: 4,
                sped_up: true
            }
        );
        assert_eq!(state.step_ms, 132);
    }

    #[test]
    fn test_self_collision() {
        let settings = Settings::default();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 0, 1);
        // Body curls round to the right of the head
        state.snake.cells = [
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
            Position::new(6, 4),
        ]
        .into_iter()
        .collect();
        state.snake.max_cells = 6;
        state.snake.heading = Heading::Up;
        state.snake.next_heading = Heading::Right;
        park_apple(&mut state, Position::new(0, 0));

        let outcome = step(&mut state, &settings);
        assert!(matches!(
            outcome,
            StepOutcome::GameOver {
                cause: Collision::SelfBite,
                ..
            }
        ));
        assert!(!state.is_running());
    }

    #[test]
    fn test_chasing_tail_is_legal() {
        let settings = Settings::default();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 0, 1);
        // 2x2 loop at full length: tail is vacated as the head enters it
        state.snake.cells = [
            Position::new(5, 5),
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
        ]
        .into_iter()
        .collect();
        state.snake.max_cells = 4;
        state.snake.heading = Heading::Up;
        state.snake.next_heading = Heading::Right;
        park_apple(&mut state, Position::new(0, 0));

        assert_eq!(step(&mut state, &settings), StepOutcome::Moved);
        assert_eq!(state.snake.head(), Position::new(6, 5));
    }

    #[test]
    fn test_reversal_guard() {
        let settings = settings_len1();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 0, 1);
        park_apple(&mut state, Position::new(0, 0));
        let start = state.snake.head();

        state.queue_heading(Heading::Left);
        step(&mut state, &settings);

        assert_eq!(state.snake.heading, Heading::Right);
        assert_eq!(state.snake.head(), Position::new(start.x + 1, start.y));
    }

    #[test]
    fn test_paused_step_is_idle() {
        let settings = Settings::default();
        let mut state = GameState::new(Grid::new(10, 10), &settings, 0, 1);
        state.toggle_pause();
        let before = state.snake.clone();
        assert_eq!(step(&mut state, &settings), StepOutcome::Idle);
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_determinism() {
        let settings = Settings::default();
        let mut state1 = GameState::new(Grid::new(12, 12), &settings, 0, 99999);
        let mut state2 = GameState::new(Grid::new(12, 12), &settings, 0, 99999);

        let turns = [Heading::Up, Heading::Left, Heading::Down, Heading::Right];
        for (i, turn) in turns.iter().cycle().take(24).enumerate() {
            if i % 3 == 0 {
                state1.queue_heading(*turn);
                state2.queue_heading(*turn);
            }
            assert_eq!(step(&mut state1, &settings), step(&mut state2, &settings));
        }

        assert_eq!(state1.snake, state2.snake);
        assert_eq!(state1.apple, state2.apple);
    }

    fn heading_strategy() -> impl Strategy<Value = Option<Heading>> {
        prop_oneof![
            2 => Just(None),
            1 => prop::sample::select(Heading::ALL.to_vec()).prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn prop_step_invariants(
            seed in any::<u64>(),
            inputs in prop::collection::vec(heading_strategy(), 1..200),
        ) {
            let settings = Settings::default();
            let mut state = GameState::new(Grid::new(8, 8), &settings, 0, seed);

            for input in inputs {
                if let Some(h) = input {
                    state.queue_heading(h);
                }
                let prev_head = state.snake.head();
                let prev_heading = state.snake.heading;
                let prev_score = state.score;
                let prev_step_ms = state.step_ms;
                let prev_best = state.best;

                let outcome = step(&mut state, &settings);

                prop_assert!(state.snake.len() <= state.snake.max_cells);
                prop_assert!(state.step_ms <= prev_step_ms);
                prop_assert!(state.step_ms >= settings.min_step_ms);
                prop_assert!(state.best >= prev_best);
                prop_assert_ne!(state.snake.heading, prev_heading.opposite());

                match outcome {
                    StepOutcome::Idle => break,
                    StepOutcome::Moved => {
                        prop_assert_eq!(prev_head.distance(state.snake.head()), 1);
                        prop_assert_eq!(state.score, prev_score);
                    }
                    StepOutcome::AteApple { score, .. } => {
                        prop_assert_eq!(prev_head.distance(state.snake.head()), 1);
                        prop_assert_eq!(score, prev_score + 1);
                        prop_assert!(!state.snake.occupies(state.apple));
                    }
                    StepOutcome::GameOver { new_best, .. } => {
                        prop_assert!(!state.is_running());
                        prop_assert_eq!(new_best, state.score > prev_best);
                        break;
                    }
                }
            }
        }
    }
}
