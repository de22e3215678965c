//! Segment shape inference.
//!
//! Every segment's shape and orientation is derived from its neighbours in
//! the body sequence. Nothing is cached between ticks; the whole body is
//! reclassified from scratch each time.

use crate::config::GridSize;
use crate::grid::{Position, Walls};
use crate::input::Direction;

/// Visual/logical shape of one body segment.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum SegmentShape {
    Head,
    Straight,
    /// Clockwise turn when walking from the head towards the tail.
    Corner,
    /// Counter-clockwise turn when walking from the head towards the tail.
    InverseCorner,
    Tail,
}

/// One classified body cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Segment {
    pub position: Position,
    pub shape: SegmentShape,
    /// Head: facing. Everything else: points at the neighbour nearer the head.
    pub orientation: Direction,
}

/// Classifies every segment of `body` (head first).
///
/// # Panics
///
/// Panics when two consecutive segments are not one unit step apart. A valid
/// snake never produces such a body.
#[must_use]
pub fn classify(body: &[Position], facing: Direction, bounds: GridSize, walls: Walls) -> Vec<Segment> {
    let last = body.len().saturating_sub(1);

    body.iter()
        .enumerate()
        .map(|(index, &position)| {
            if index == 0 {
                return Segment {
                    position,
                    shape: SegmentShape::Head,
                    orientation: facing,
                };
            }

            let to_prev = bounds.offset_between(position, body[index - 1], walls);
            let orientation = unit_direction(to_prev, position);

            let shape = if index == last {
                SegmentShape::Tail
            } else {
                let to_next = bounds.offset_between(position, body[index + 1], walls);
                interior_shape(orientation, unit_direction(to_next, position))
            };

            Segment {
                position,
                shape,
                orientation,
            }
        })
        .collect()
}

fn interior_shape(to_prev: Direction, to_next: Direction) -> SegmentShape {
    if to_prev == to_next.opposite() {
        SegmentShape::Straight
    } else if turns_right(to_prev.vector(), to_next.vector()) {
        SegmentShape::Corner
    } else {
        SegmentShape::InverseCorner
    }
}

fn turns_right((px, py): (i32, i32), (nx, ny): (i32, i32)) -> bool {
    (px < 0 && ny > 0) || (px > 0 && ny < 0) || (py > 0 && nx > 0) || (py < 0 && nx < 0)
}

fn unit_direction(vector: (i32, i32), at: Position) -> Direction {
    Direction::try_from(vector)
        .unwrap_or_else(|error| panic!("broken snake body at {at:?}: {error}"))
}
