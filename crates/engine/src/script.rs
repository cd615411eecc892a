//! Compact text scripts for headless runs and tests
//!
//! One character per event, whitespace ignored:
//!
//! | Key | Event |
//! |-----|-------|
//! | `L` | move left |
//! | `R` | move right |
//! | `D` | soft drop |
//! | `H` | hard drop |
//! | `U` | rotate |
//! | `P` | toggle pause |
//! | `.` | gravity tick |
//! | `X` | reset |

use thiserror::Error;

use crate::types::{Command, Event};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptError {
    #[error("Unknown script key {key:?} at position {pos}")]
    UnknownKey { key: char, pos: usize },
}

/// Map one script key (case-insensitive) to an event
pub fn event_for_key(key: char) -> Option<Event> {
    let event = match key.to_ascii_uppercase() {
        'L' => Event::Command(Command::MoveLeft),
        'R' => Event::Command(Command::MoveRight),
        'D' => Event::Command(Command::SoftDrop),
        'H' => Event::Command(Command::HardDrop),
        'U' => Event::Command(Command::Rotate),
        'P' => Event::Command(Command::TogglePause),
        '.' => Event::Tick,
        'X' => Event::Reset,
        _ => return None,
    };
    Some(event)
}

pub fn parse_script(script: &str) -> Result<Vec<Event>, ScriptError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, key)| !key.is_whitespace())
        .map(|(pos, key)| event_for_key(key).ok_or(ScriptError::UnknownKey { key, pos }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_key() {
        let events = parse_script("lrdhup.x").unwrap();
        assert_eq!(
            events,
            vec![
                Event::Command(Command::MoveLeft),
                Event::Command(Command::MoveRight),
                Event::Command(Command::SoftDrop),
                Event::Command(Command::HardDrop),
                Event::Command(Command::Rotate),
                Event::Command(Command::TogglePause),
                Event::Tick,
                Event::Reset,
            ]
        );
    }

    #[test]
    fn skips_whitespace() {
        assert_eq!(parse_script(" . \n.").unwrap(), vec![Event::Tick, Event::Tick]);
        assert!(parse_script("").unwrap().is_empty());
    }

    #[test]
    fn reports_unknown_key_position() {
        assert_eq!(
            parse_script("LL?"),
            Err(ScriptError::UnknownKey { key: '?', pos: 2 })
        );
    }
}
