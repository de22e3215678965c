use rand::Rng;

use crate::config::GridSize;
use crate::error::GameError;
use crate::grid::Position;
use crate::snake::Snake;

/// Identity of a fruit slot.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FruitId {
    Primary,
    /// Only present with the double-fruit upgrade.
    Secondary,
}

/// Fruit entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Fruit {
    pub id: FruitId,
    pub position: Position,
}

/// Owns the one or two fruits on the board.
#[derive(Debug, Clone)]
pub struct Fruits {
    fruits: Vec<Fruit>,
}

impl Fruits {
    /// Places `count` fruits (one or two) on cells not occupied by `snake`.
    pub fn spawn<R: Rng + ?Sized>(
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
        count: usize,
    ) -> Result<Self, GameError> {
        let mut fruits = Self { fruits: Vec::new() };
        for id in [FruitId::Primary, FruitId::Secondary].into_iter().take(count) {
            let position = fruits.free_position(rng, bounds, snake)?;
            fruits.fruits.push(Fruit { id, position });
        }
        Ok(fruits)
    }

    /// Builds fruits at fixed positions.
    #[must_use]
    pub fn at(positions: &[Position]) -> Self {
        let fruits = [FruitId::Primary, FruitId::Secondary]
            .into_iter()
            .zip(positions.iter().copied())
            .map(|(id, position)| Fruit { id, position })
            .collect();
        Self { fruits }
    }

    /// Returns the fruit under `head`, if any.
    #[must_use]
    pub fn consumed_at(&self, head: Position) -> Option<FruitId> {
        self.fruits
            .iter()
            .find(|fruit| fruit.position == head)
            .map(|fruit| fruit.id)
    }

    /// Moves fruit `id` to a fresh empty cell.
    pub fn respawn<R: Rng + ?Sized>(
        &mut self,
        id: FruitId,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Result<Position, GameError> {
        let slot = self
            .fruits
            .iter()
            .position(|fruit| fruit.id == id)
            .ok_or(GameError::EmptyBoard)?;

        // The consumed fruit sits under the head, so it never blocks itself.
        let position = self.free_position(rng, bounds, snake)?;
        self.fruits[slot].position = position;
        Ok(position)
    }

    #[must_use]
    pub fn positions(&self) -> Vec<Position> {
        self.fruits.iter().map(|fruit| fruit.position).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fruits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fruits.is_empty()
    }

    fn free_position<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        bounds: GridSize,
        snake: &Snake,
    ) -> Result<Position, GameError> {
        spawn_position(rng, bounds, |position| {
            snake.occupies(position) || self.fruits.iter().any(|fruit| fruit.position == position)
        })
    }
}

/// Picks a cell uniformly among those for which `occupied` is false.
pub fn spawn_position<R, F>(rng: &mut R, bounds: GridSize, occupied: F) -> Result<Position, GameError>
where
    R: Rng + ?Sized,
    F: Fn(Position) -> bool,
{
    let candidates: Vec<Position> = bounds.positions().filter(|&cell| !occupied(cell)).collect();

    if candidates.is_empty() {
        return Err(GameError::EmptyBoard);
    }

    let index = rng.gen_range(0..candidates.len());
    Ok(candidates[index])
}
