use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::InvalidDirectionVector;

/// Compass directions; North points towards increasing `y`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Unit vector `(dx, dy)` for one step in this direction.
    #[must_use]
    pub fn vector(self) -> (i32, i32) {
        match self {
            Self::North => (0, 1),
            Self::East => (1, 0),
            Self::South => (0, -1),
            Self::West => (-1, 0),
        }
    }

    /// Sound cue played when the snake turns to face this direction.
    #[must_use]
    pub fn turn_cue(self) -> &'static str {
        match self {
            Self::North => "snakeTurnN",
            Self::East => "snakeTurnE",
            Self::South => "snakeTurnS",
            Self::West => "snakeTurnW",
        }
    }
}

impl TryFrom<(i32, i32)> for Direction {
    type Error = InvalidDirectionVector;

    fn try_from((dx, dy): (i32, i32)) -> Result<Self, Self::Error> {
        match (dx, dy) {
            (0, 1) => Ok(Self::North),
            (1, 0) => Ok(Self::East),
            (0, -1) => Ok(Self::South),
            (-1, 0) => Ok(Self::West),
            _ => Err(InvalidDirectionVector { dx, dy }),
        }
    }
}

/// High-level input events consumed by the game loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Pause,
    Quit,
    Confirm,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps one key press to a game input.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(GameInput::Quit);
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('w' | 'W' | 'k') => GameInput::Direction(Direction::North),
        KeyCode::Right | KeyCode::Char('d' | 'D' | 'l') => GameInput::Direction(Direction::East),
        KeyCode::Down | KeyCode::Char('s' | 'S' | 'j') => GameInput::Direction(Direction::South),
        KeyCode::Left | KeyCode::Char('a' | 'A' | 'h') => GameInput::Direction(Direction::West),
        KeyCode::Char('p' | 'P') => GameInput::Pause,
        KeyCode::Char('q' | 'Q') | KeyCode::Esc => GameInput::Quit,
        KeyCode::Enter | KeyCode::Char(' ') => GameInput::Confirm,
        _ => return None,
    };

    Some(input)
}

/// Polls the terminal for one input event without blocking past `timeout`.
pub fn poll_input(timeout: Duration) -> io::Result<Option<GameInput>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }

    match event::read()? {
        Event::Key(key) => Ok(map_key(key)),
        _ => Ok(None),
    }
}
