use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring position one step in `direction`, unbounded.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// What happens when the head crosses the edge of the grid.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Walls {
    /// Leaving the grid ends the game.
    Solid,
    /// The grid is a torus; leaving one edge re-enters on the opposite one.
    Wrap,
}

impl GridSize {
    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn contains(self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < i32::from(self.width)
            && position.y < i32::from(self.height)
    }

    /// Iterates every cell in row-major order: `y` outer, `x` inner.
    pub fn positions(self) -> impl Iterator<Item = Position> {
        let width = i32::from(self.width);
        (0..i32::from(self.height)).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
    }

    /// Returns `position` wrapped into bounds on both axes.
    #[must_use]
    pub fn wrap(self, position: Position) -> Position {
        Position {
            x: position.x.rem_euclid(i32::from(self.width)),
            y: position.y.rem_euclid(i32::from(self.height)),
        }
    }

    /// Target of one step from `position`, or `None` when it leaves solid walls.
    #[must_use]
    pub fn step(self, position: Position, direction: Direction, walls: Walls) -> Option<Position> {
        let next = position.step(direction);
        match walls {
            Walls::Wrap => Some(self.wrap(next)),
            Walls::Solid if self.contains(next) => Some(next),
            Walls::Solid => None,
        }
    }

    /// Vector from `from` to the adjacent cell `to`.
    ///
    /// With wrapping walls, neighbours across the seam are `width - 1` (or
    /// `height - 1`) apart in raw coordinates; those are folded back into a
    /// unit step. Non-adjacent inputs come back unchanged.
    #[must_use]
    pub fn offset_between(self, from: Position, to: Position, walls: Walls) -> (i32, i32) {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        match walls {
            Walls::Solid => (dx, dy),
            Walls::Wrap => (
                fold_seam(dx, i32::from(self.width)),
                fold_seam(dy, i32::from(self.height)),
            ),
        }
    }
}

fn fold_seam(delta: i32, extent: i32) -> i32 {
    if extent > 2 && delta.abs() == extent - 1 {
        -delta.signum()
    } else {
        delta
    }
}
