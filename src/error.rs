use std::io;

use thiserror::Error;

/// Why a single movement step could not be applied.
///
/// These are not faults: they are the designed trigger for the game-over
/// transition and are reported as values.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error("the head would leave the grid")]
    OutOfBounds,
    #[error("the head would run into the body")]
    SelfCollision,
}

/// Board-level failures raised while setting up or running a session.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
pub enum GameError {
    #[error("no empty cell is left to place a fruit")]
    EmptyBoard,
    #[error("grid {width}x{height} cannot hold a two-segment snake and a fruit")]
    InvalidGrid { width: u16, height: u16 },
}

/// A vector that does not name one of the four unit directions.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("({dx}, {dy}) is not a unit direction vector")]
pub struct InvalidDirectionVector {
    pub dx: i32,
    pub dy: i32,
}

/// Failures of the on-disk preference store.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("preference file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("preference file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
