use std::collections::VecDeque;

use crate::config::GridSize;
use crate::error::MoveError;
use crate::grid::{Position, Walls};
use crate::input::{direction_change_is_valid, Direction};

/// Mutable snake body, facing, and turn latch.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    facing: Direction,
    turn_pending: bool,
    last_vacated: Position,
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    ///
    /// # Panics
    ///
    /// Panics when fewer than two segments are given or two segments share
    /// a cell.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, facing: Direction) -> Self {
        assert!(
            segments.len() >= 2,
            "snake needs at least a head and a tail, got {} segments",
            segments.len()
        );
        for (index, segment) in segments.iter().enumerate() {
            assert!(
                !segments[index + 1..].contains(segment),
                "snake segment {segment:?} appears twice"
            );
        }

        let last_vacated = segments[segments.len() - 1];
        Self {
            body: VecDeque::from(segments),
            facing,
            turn_pending: false,
            last_vacated,
        }
    }

    /// Two-segment snake at the left edge, halfway up, facing east.
    #[must_use]
    pub fn starting(bounds: GridSize) -> Self {
        let y = i32::from(bounds.height / 2);
        Self::from_segments(
            vec![Position::new(1, y), Position::new(0, y)],
            Direction::East,
        )
    }

    /// Latches a new facing for the coming tick.
    ///
    /// Rejected when `direction` reverses the current facing or another turn
    /// is already latched for this tick. Returns true when facing changed.
    pub fn request_turn(&mut self, direction: Direction) -> bool {
        if self.turn_pending
            || direction == self.facing
            || !direction_change_is_valid(self.facing, direction)
        {
            return false;
        }

        self.facing = direction;
        self.turn_pending = true;
        true
    }

    /// Moves one cell along the current facing.
    ///
    /// Collision is tested against the pre-move body, tail included. On
    /// failure the body is left untouched. Either way the turn latch opens.
    pub fn advance(&mut self, bounds: GridSize, walls: Walls) -> Result<Position, MoveError> {
        self.turn_pending = false;

        let next_head = bounds
            .step(self.head(), self.facing, walls)
            .ok_or(MoveError::OutOfBounds)?;
        if self.occupies(next_head) {
            return Err(MoveError::SelfCollision);
        }

        self.body.push_front(next_head);
        if let Some(vacated) = self.body.pop_back() {
            self.last_vacated = vacated;
        }

        Ok(next_head)
    }

    /// Appends a tail segment on the cell the last move vacated.
    pub fn grow(&mut self) {
        self.body.push_back(self.last_vacated);
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least two segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Direction the head moves on the next tick.
    #[must_use]
    pub fn facing(&self) -> Direction {
        self.facing
    }

    #[must_use]
    pub fn turn_pending(&self) -> bool {
        self.turn_pending
    }

    /// Cell the tail left on the most recent successful move.
    #[must_use]
    pub fn last_vacated(&self) -> Position {
        self.last_vacated
    }

    /// Copies the body, head first.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Position> {
        self.body.iter().copied().collect()
    }
}
