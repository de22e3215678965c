use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::classify::{classify, Segment};
use crate::config::{GameConfig, GridSize, EAT_ANIMATION_FRAMES};
use crate::error::{GameError, MoveError};
use crate::fruit::{FruitId, Fruits};
use crate::growth::GrowthTracker;
use crate::grid::Position;
use crate::input::Direction;
use crate::snake::Snake;

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    OutOfBounds,
    SelfCollision,
    TimerExpired,
    /// No empty cell was left for a fruit.
    BoardFilled,
}

impl From<MoveError> for EndReason {
    fn from(error: MoveError) -> Self {
        match error {
            MoveError::OutOfBounds => Self::OutOfBounds,
            MoveError::SelfCollision => Self::SelfCollision,
        }
    }
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver(EndReason),
}

impl GameStatus {
    #[must_use]
    pub fn end_reason(self) -> Option<EndReason> {
        match self {
            Self::Running => None,
            Self::GameOver(reason) => Some(reason),
        }
    }
}

/// Something that happened during a tick or an input, for the presentation
/// and audio layers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum GameEvent {
    Turned(Direction),
    FruitEaten {
        fruit: FruitId,
        position: Position,
        score: u32,
    },
    GameOver {
        reason: EndReason,
        /// Body cells head to tail, in the order they should be animated.
        death_sequence: Vec<Position>,
    },
}

/// Immutable rendering state produced after every tick.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub bounds: GridSize,
    pub segments: Vec<Segment>,
    pub fruits: Vec<Position>,
    pub bulging: HashSet<Position>,
    pub score: u32,
    pub timer: i32,
    pub tick_count: u64,
    /// Frame of the head's eating animation, while it plays.
    pub eat_frame: Option<u8>,
    pub status: GameStatus,
}

/// Complete mutable game state for one session.
///
/// A restart builds a new `GameState`; nothing leaves `GameOver` otherwise.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub fruits: Fruits,
    pub score: u32,
    pub timer: i32,
    pub tick_count: u64,
    pub status: GameStatus,
    growth: GrowthTracker,
    eat_frame: Option<u8>,
    config: GameConfig,
    rng: StdRng,
}

impl GameState {
    /// Creates a session seeded from OS entropy.
    pub fn new(config: GameConfig) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    pub fn new_with_seed(config: GameConfig, seed: u64) -> Result<Self, GameError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: GameConfig, mut rng: StdRng) -> Result<Self, GameError> {
        let config = config.validate()?;
        let bounds = config.grid;
        let snake = Snake::starting(bounds);
        let fruits = Fruits::spawn(&mut rng, bounds, &snake, config.fruit_count())?;

        Ok(Self {
            snake,
            fruits,
            score: 0,
            timer: config.timer_reset_value(),
            tick_count: 0,
            status: GameStatus::Running,
            growth: GrowthTracker::new(),
            eat_frame: None,
            config,
            rng,
        })
    }

    /// Forwards a direction request to the snake's turn latch.
    pub fn request_turn(&mut self, direction: Direction) -> Option<GameEvent> {
        if self.status != GameStatus::Running {
            return None;
        }

        self.snake
            .request_turn(direction)
            .then_some(GameEvent::Turned(direction))
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> Vec<GameEvent> {
        if self.status != GameStatus::Running {
            return Vec::new();
        }

        let bounds = self.config.grid;
        let head = match self.snake.advance(bounds, self.config.walls()) {
            Ok(head) => head,
            Err(error) => return vec![self.end(error.into())],
        };

        let mut events = Vec::new();
        self.tick_count += 1;
        self.timer -= 1;
        self.eat_frame = self
            .eat_frame
            .map(|frame| frame + 1)
            .filter(|&frame| frame < EAT_ANIMATION_FRAMES);

        let eaten = self.fruits.consumed_at(head);
        if eaten.is_some() {
            self.snake.grow();
        }
        // Markers from earlier ticks move first; a new one starts on the head.
        self.growth.advance(self.snake.len());

        if let Some(fruit) = eaten {
            self.timer = self.config.timer_reset_value();
            self.score += 1;
            self.growth.register();
            self.eat_frame = Some(0);
            log::debug!("fruit {fruit:?} eaten at {head:?}, score {}", self.score);

            events.push(GameEvent::FruitEaten {
                fruit,
                position: head,
                score: self.score,
            });

            if self
                .fruits
                .respawn(fruit, &mut self.rng, bounds, &self.snake)
                .is_err()
            {
                events.push(self.end(EndReason::BoardFilled));
                return events;
            }
        }

        if self.timer < 0 {
            events.push(self.end(EndReason::TimerExpired));
        }

        events
    }

    /// Builds the rendering state for the current tick.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let body = self.snake.to_vec();

        Snapshot {
            bounds: self.config.grid,
            segments: classify(
                &body,
                self.snake.facing(),
                self.config.grid,
                self.config.walls(),
            ),
            fruits: self.fruits.positions(),
            bulging: self.growth.bulging_cells(&body),
            score: self.score,
            timer: self.timer,
            tick_count: self.tick_count,
            eat_frame: self.eat_frame,
            status: self.status,
        }
    }

    /// Active growth-marker indices, head-most first.
    #[must_use]
    pub fn growth_markers(&self) -> Vec<usize> {
        self.growth.indices()
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver(_))
    }

    fn end(&mut self, reason: EndReason) -> GameEvent {
        self.status = GameStatus::GameOver(reason);
        log::info!(
            "game over ({reason:?}) after {} ticks with score {}",
            self.tick_count,
            self.score
        );

        GameEvent::GameOver {
            reason,
            death_sequence: self.snake.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EndReason, GameEvent, GameState, GameStatus};
    use crate::classify::SegmentShape;
    use crate::config::{GameConfig, GridSize, Upgrades, BASE_TIMER_SECONDS};
    use crate::error::GameError;
    use crate::fruit::{FruitId, Fruits};
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::snake::Snake;

    fn state(seed: u64) -> GameState {
        GameState::new_with_seed(GameConfig::default(), seed).expect("default grid is valid")
    }

    fn far_fruit() -> Fruits {
        Fruits::at(&[Position::new(9, 0)])
    }

    #[test]
    fn eating_fruit_scores_grows_and_resets_timer() {
        let mut state = state(1);
        state.fruits = Fruits::at(&[Position::new(2, 5)]);
        state.timer = 7;

        let events = state.tick();

        assert_eq!(state.snake.to_vec(), vec![
            Position::new(2, 5),
            Position::new(1, 5),
            Position::new(0, 5),
        ]);
        assert_eq!(state.score, 1);
        assert_eq!(state.timer, BASE_TIMER_SECONDS);
        assert_ne!(state.fruits.positions()[0], Position::new(2, 5));
        assert!(!state.snake.occupies(state.fruits.positions()[0]));
        assert!(matches!(
            events.as_slice(),
            [GameEvent::FruitEaten {
                fruit: FruitId::Primary,
                score: 1,
                ..
            }]
        ));
    }

    #[test]
    fn wall_collision_sets_game_over() {
        let mut state = state(2);
        state.snake = Snake::from_segments(
            vec![Position::new(9, 3), Position::new(8, 3)],
            Direction::East,
        );
        state.fruits = far_fruit();

        let events = state.tick();

        assert_eq!(state.status, GameStatus::GameOver(EndReason::OutOfBounds));
        assert!(state.is_over());
        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                reason: EndReason::OutOfBounds,
                death_sequence: vec![Position::new(9, 3), Position::new(8, 3)],
            }]
        );
        assert!(state.tick().is_empty());
    }

    #[test]
    fn turning_back_into_the_body_sets_game_over() {
        let mut state = state(3);
        state.snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(4, 4),
                Position::new(5, 4),
                Position::new(6, 4),
            ],
            Direction::East,
        );
        state.fruits = far_fruit();

        assert!(state.request_turn(Direction::South).is_some());
        state.tick();

        assert_eq!(state.status, GameStatus::GameOver(EndReason::SelfCollision));
    }

    #[test]
    fn timer_running_out_ends_the_game() {
        let mut state = state(4);
        state.fruits = far_fruit();
        state.timer = 0;

        let events = state.tick();

        assert_eq!(state.timer, -1);
        assert_eq!(state.status, GameStatus::GameOver(EndReason::TimerExpired));
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn eating_on_the_last_second_saves_the_round() {
        let mut state = state(12);
        state.fruits = Fruits::at(&[Position::new(2, 5)]);
        state.timer = 0;

        state.tick();

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.timer, BASE_TIMER_SECONDS);
        assert_eq!(state.score, 1);
    }

    #[test]
    fn wrap_walls_on_a_two_wide_grid_are_rejected() {
        let config = GameConfig::new(
            GridSize {
                width: 2,
                height: 5,
            },
            Upgrades {
                wrap_walls: true,
                ..Upgrades::default()
            },
        );

        assert!(matches!(
            GameState::new_with_seed(config, 13),
            Err(GameError::InvalidGrid {
                width: 2,
                height: 5
            })
        ));
    }

    #[test]
    fn straight_run_classifies_consistently() {
        let mut state = state(5);
        state.snake = Snake::from_segments(
            vec![
                Position::new(4, 2),
                Position::new(3, 2),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            Direction::East,
        );
        state.fruits = far_fruit();

        for _ in 0..3 {
            state.tick();
            let shapes: Vec<_> = state
                .snapshot()
                .segments
                .iter()
                .map(|segment| (segment.shape, segment.orientation))
                .collect();
            assert_eq!(shapes, vec![
                (SegmentShape::Head, Direction::East),
                (SegmentShape::Straight, Direction::East),
                (SegmentShape::Straight, Direction::East),
                (SegmentShape::Tail, Direction::East),
            ]);
        }
        assert_eq!(state.status, GameStatus::Running);
    }

    #[test]
    fn bulge_starts_at_the_head_and_travels_to_the_tail() {
        let mut state = state(6);
        state.snake = Snake::from_segments(
            vec![
                Position::new(3, 1),
                Position::new(2, 1),
                Position::new(1, 1),
            ],
            Direction::East,
        );
        state.fruits = Fruits::at(&[Position::new(4, 1)]);

        state.tick();
        assert_eq!(state.growth_markers(), vec![0]);
        let snapshot = state.snapshot();
        assert!(snapshot.bulging.contains(&Position::new(4, 1)));
        assert_eq!(snapshot.eat_frame, Some(0));

        state.fruits = far_fruit();
        state.tick();
        assert_eq!(state.growth_markers(), vec![1]);
        state.tick();
        assert_eq!(state.growth_markers(), vec![2]);

        // Index 3 is the tail of the four-segment body.
        state.tick();
        assert!(state.growth_markers().is_empty());
        assert_eq!(state.snapshot().eat_frame, None);
    }

    #[test]
    fn double_fruit_upgrade_tracks_two_fruits() {
        let config = GameConfig::new(
            GridSize::default(),
            Upgrades {
                double_fruit: true,
                ..Upgrades::default()
            },
        );
        let mut state = GameState::new_with_seed(config, 8).expect("default grid is valid");
        assert_eq!(state.fruits.len(), 2);

        state.fruits = Fruits::at(&[Position::new(9, 9), Position::new(2, 5)]);
        let events = state.tick();

        assert!(matches!(
            events.as_slice(),
            [GameEvent::FruitEaten {
                fruit: FruitId::Secondary,
                ..
            }]
        ));
        assert_eq!(state.fruits.positions()[0], Position::new(9, 9));
        assert_eq!(state.snapshot().fruits.len(), 2);
    }

    #[test]
    fn wrap_upgrade_keeps_the_snake_alive_at_the_edge() {
        let config = GameConfig::new(
            GridSize::default(),
            Upgrades {
                wrap_walls: true,
                ..Upgrades::default()
            },
        );
        let mut state = GameState::new_with_seed(config, 9).expect("default grid is valid");
        state.snake = Snake::from_segments(
            vec![Position::new(9, 3), Position::new(8, 3)],
            Direction::East,
        );
        state.fruits = Fruits::at(&[Position::new(5, 5)]);

        state.tick();

        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.snake.head(), Position::new(0, 3));
        assert_eq!(state.snapshot().segments[1].orientation, Direction::East);
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let config = GameConfig::new(
            GridSize {
                width: 3,
                height: 1,
            },
            Upgrades::default(),
        );
        let mut state = GameState::new_with_seed(config, 10).expect("3x1 grid is valid");
        assert_eq!(state.fruits.positions(), vec![Position::new(2, 0)]);

        state.tick();

        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.status, GameStatus::GameOver(EndReason::BoardFilled));
    }

    #[test]
    fn input_after_game_over_is_ignored() {
        let mut state = state(11);
        state.status = GameStatus::GameOver(EndReason::TimerExpired);

        assert_eq!(state.request_turn(Direction::North), None);
    }
}
