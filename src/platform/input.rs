//! Keyboard mapping
//!
//! Keys are `KeyboardEvent.key` strings; letters match in either case.

use crate::sim::Heading;

/// A recognised key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Steer (arrows / WASD)
    Turn(Heading),
    /// Pause or resume (P / Escape)
    TogglePause,
    /// Start a new game (R)
    Restart,
    /// Idle/demo mode (I)
    ToggleAutopilot,
}

/// Map a raw key identifier to a command. Unrecognised keys map to `None`.
pub fn map_key(key: &str) -> Option<KeyCommand> {
    let command = match key {
        "ArrowUp" => KeyCommand::Turn(Heading::Up),
        "ArrowDown" => KeyCommand::Turn(Heading::Down),
        "ArrowLeft" => KeyCommand::Turn(Heading::Left),
        "ArrowRight" => KeyCommand::Turn(Heading::Right),
        "Escape" => KeyCommand::TogglePause,
        _ => {
            let mut chars = key.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            match c.to_ascii_lowercase() {
                'w' => KeyCommand::Turn(Heading::Up),
                's' => KeyCommand::Turn(Heading::Down),
                'a' => KeyCommand::Turn(Heading::Left),
                'd' => KeyCommand::Turn(Heading::Right),
                'p' => KeyCommand::TogglePause,
                'r' => KeyCommand::Restart,
                'i' => KeyCommand::ToggleAutopilot,
                _ => return None,
            }
        }
    };
    Some(command)
}
