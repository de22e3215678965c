use std::time::Duration;

use crate::error::GameError;
use crate::grid::Walls;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Rejects grids that cannot hold the starting snake plus one fruit.
    pub fn validate(self) -> Result<Self, GameError> {
        if self.width < MIN_GRID_WIDTH || self.height < 1 || self.total_cells() < 3 {
            return Err(GameError::InvalidGrid {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_SIZE,
            height: DEFAULT_GRID_SIZE,
        }
    }
}

/// Upgrade flags unlocked outside the simulation and read at session start.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Upgrades {
    /// A second, independently tracked fruit.
    pub double_fruit: bool,
    /// Countdown resets to [`EXTENDED_TIMER_SECONDS`] instead of [`BASE_TIMER_SECONDS`].
    pub extended_timer: bool,
    /// Walls wrap around instead of ending the game.
    pub wrap_walls: bool,
}

/// Everything a session needs that is fixed for its whole lifetime.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub upgrades: Upgrades,
}

impl GameConfig {
    #[must_use]
    pub fn new(grid: GridSize, upgrades: Upgrades) -> Self {
        Self { grid, upgrades }
    }

    /// Rejects grids too small for the session.
    ///
    /// Wrapping walls need at least [`MIN_WRAP_EXTENT`] cells per side, or a
    /// step across the seam is indistinguishable from a step inside the grid.
    pub fn validate(self) -> Result<Self, GameError> {
        let grid = self.grid.validate()?;
        if self.upgrades.wrap_walls && (grid.width < MIN_WRAP_EXTENT || grid.height < MIN_WRAP_EXTENT)
        {
            return Err(GameError::InvalidGrid {
                width: grid.width,
                height: grid.height,
            });
        }
        Ok(self)
    }

    /// Value the countdown is reset to on start and after every fruit.
    #[must_use]
    pub fn timer_reset_value(&self) -> i32 {
        if self.upgrades.extended_timer {
            EXTENDED_TIMER_SECONDS
        } else {
            BASE_TIMER_SECONDS
        }
    }

    #[must_use]
    pub fn walls(&self) -> Walls {
        if self.upgrades.wrap_walls {
            Walls::Wrap
        } else {
            Walls::Solid
        }
    }

    #[must_use]
    pub fn fruit_count(&self) -> usize {
        if self.upgrades.double_fruit { 2 } else { 1 }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(GridSize::default(), Upgrades::default())
    }
}

/// Side length of the default square grid.
pub const DEFAULT_GRID_SIZE: u16 = 10;

/// The starting snake spans columns 0 and 1.
pub const MIN_GRID_WIDTH: u16 = 2;

/// Smallest side length that can wrap around.
pub const MIN_WRAP_EXTENT: u16 = 3;

/// Countdown value without the timer upgrade.
pub const BASE_TIMER_SECONDS: i32 = 20;

/// Countdown value with the timer upgrade.
pub const EXTENDED_TIMER_SECONDS: i32 = 40;

/// Base tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 500;

/// Minimum tick interval accepted from the command line.
pub const MIN_TICK_INTERVAL_MS: u64 = 60;

/// Pause between the first frame and the first tick.
pub const START_DELAY: Duration = Duration::from_secs(1);

/// Delay between two segments of the death sequence.
pub const DEATH_STEP_DELAY: Duration = Duration::from_millis(100);

/// Number of ticks the head shows the eating animation.
pub const EAT_ANIMATION_FRAMES: u8 = 3;

#[cfg(test)]
mod tests {
    use super::{GameConfig, GridSize, Upgrades, BASE_TIMER_SECONDS, EXTENDED_TIMER_SECONDS};
    use crate::error::GameError;
    use crate::grid::Walls;

    #[test]
    fn default_config_is_ten_by_ten_with_single_fruit() {
        let config = GameConfig::default();

        assert_eq!(config.grid.total_cells(), 100);
        assert_eq!(config.fruit_count(), 1);
        assert_eq!(config.walls(), Walls::Solid);
        assert_eq!(config.timer_reset_value(), BASE_TIMER_SECONDS);
    }

    #[test]
    fn upgrades_change_timer_walls_and_fruit_count() {
        let config = GameConfig::new(
            GridSize::default(),
            Upgrades {
                double_fruit: true,
                extended_timer: true,
                wrap_walls: true,
            },
        );

        assert_eq!(config.fruit_count(), 2);
        assert_eq!(config.walls(), Walls::Wrap);
        assert_eq!(config.timer_reset_value(), EXTENDED_TIMER_SECONDS);
    }

    #[test]
    fn tiny_grids_are_rejected() {
        let grid = GridSize {
            width: 1,
            height: 5,
        };

        assert_eq!(
            grid.validate(),
            Err(GameError::InvalidGrid {
                width: 1,
                height: 5
            })
        );
        assert!(GridSize { width: 3, height: 1 }.validate().is_ok());
    }

    #[test]
    fn wrapping_needs_three_cells_per_side() {
        let wrap = Upgrades {
            wrap_walls: true,
            ..Upgrades::default()
        };
        let narrow = GridSize {
            width: 2,
            height: 5,
        };

        assert_eq!(
            GameConfig::new(narrow, wrap).validate(),
            Err(GameError::InvalidGrid {
                width: 2,
                height: 5
            })
        );
        assert!(GameConfig::new(narrow, Upgrades::default()).validate().is_ok());
        assert!(
            GameConfig::new(GridSize { width: 3, height: 3 }, wrap)
                .validate()
                .is_ok()
        );
    }
}
