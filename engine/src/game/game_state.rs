use std::time::Duration;

use crate::log;
use crate::navigation::{NavigationController, NavigationState};
use crate::session_rng::SessionRng;
use crate::types::{Direction, FieldSize, GameEndReason, Point};
use super::settings::SnakeSettings;
use super::snake::Snake;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Moved,
    AteFood,
    GameOver(GameEndReason),
}

/// Authoritative snake, food and timing state. Controllers only ever see a
/// read-only [`NavigationState`] snapshot of it.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    pub snake: Snake,
    pub food: Option<Point>,
    pub settings: SnakeSettings,
    pub score: u32,
    pub ticks: u64,
    pub tick_interval_ms: f64,
    pub game_end_reason: Option<GameEndReason>,
}

impl SnakeGameState {
    pub fn new(settings: SnakeSettings, rng: &mut SessionRng) -> Self {
        let snake = Self::starting_snake(settings.field_size);
        Self::with_snake(settings, snake, rng)
    }

    /// Starts from an arbitrary body, e.g. a mid-game position.
    pub fn with_snake(settings: SnakeSettings, snake: Snake, rng: &mut SessionRng) -> Self {
        let mut state = Self {
            snake,
            food: None,
            tick_interval_ms: settings.base_tick_ms,
            settings,
            score: 0,
            ticks: 0,
            game_end_reason: None,
        };
        state.place_food(rng);
        state
    }

    fn starting_snake(field_size: FieldSize) -> Snake {
        let start = Point::new((field_size.width / 2) as i32, (field_size.height / 2) as i32);
        Snake::new(start, Direction::Right)
    }

    pub fn field_size(&self) -> FieldSize {
        self.settings.field_size
    }

    /// Wall-clock time until the next tick at the current speed.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(self.tick_interval_ms / 1000.0)
    }

    pub fn is_over(&self) -> bool {
        self.game_end_reason.is_some()
    }

    /// Back to a fresh three-segment snake. The controller's derived structures
    /// are rebuilt before the next tick.
    pub fn reset<C: NavigationController>(&mut self, navigator: &mut C, rng: &mut SessionRng) {
        *self = Self::new(self.settings.clone(), rng);
        navigator.reset(self.field_size());
        log!(
            "Game reset on {}x{} field",
            self.field_size().width,
            self.field_size().height
        );
    }

    pub fn update<C: NavigationController>(&mut self, navigator: &C, rng: &mut SessionRng) -> TickOutcome {
        if let Some(reason) = self.game_end_reason {
            return TickOutcome::GameOver(reason);
        }
        let Some(food) = self.food else {
            return self.end_game(GameEndReason::BoardFilled);
        };

        let requested = {
            let field_size = self.settings.field_size;
            let current_direction = self.snake.direction;
            let body: &[Point] = self.snake.body.make_contiguous();
            let state = NavigationState::new(body, food, field_size, current_direction);
            navigator.determine_next_move(&state)
        };
        if !requested.is_opposite(&self.snake.direction) {
            self.snake.direction = requested;
        }

        self.ticks += 1;
        let next_head = self.snake.head().step(self.snake.direction);
        if !self.field_size().contains(next_head) {
            return self.end_game(GameEndReason::WallCollision);
        }
        if self.snake.contains(next_head) && next_head != self.snake.tail() {
            return self.end_game(GameEndReason::SelfCollision);
        }

        let ate = next_head == food;
        self.snake.advance(next_head, ate);
        if !ate {
            return TickOutcome::Moved;
        }

        self.score += 1;
        self.tick_interval_ms = self.settings.next_tick_ms(self.tick_interval_ms);
        log!(
            "Ate food at ({}, {}). Score: {}, length: {}",
            next_head.x,
            next_head.y,
            self.score,
            self.snake.len()
        );

        if self.place_food(rng) {
            TickOutcome::AteFood
        } else {
            self.end_game(GameEndReason::BoardFilled)
        }
    }

    /// Uniform over free cells. Returns `false` when the snake covers the field.
    fn place_food(&mut self, rng: &mut SessionRng) -> bool {
        let field = self.field_size();
        let free: Vec<Point> = (0..field.cell_count())
            .map(|idx| field.point_at(idx))
            .filter(|p| !self.snake.contains(*p))
            .collect();

        self.food = rng.choose(&free).copied();
        self.food.is_some()
    }

    fn end_game(&mut self, reason: GameEndReason) -> TickOutcome {
        self.game_end_reason = Some(reason);
        log!(
            "Game over after {} ticks: {:?}. Score: {}, length: {}",
            self.ticks,
            reason,
            self.score,
            self.snake.len()
        );
        TickOutcome::GameOver(reason)
    }
}
