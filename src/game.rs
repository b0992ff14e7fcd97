use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{
    GridModel, HIGH_SCORE_KEY, INITIAL_SNAKE, INITIAL_TICK_INTERVAL_MS, MIN_TICK_INTERVAL_MS,
    POINTS_PER_FOOD, TICK_INTERVAL_STEP_MS,
};
use crate::food;
use crate::input::{direction_change_is_valid, Direction};
use crate::renderer::Scene;
use crate::score::{load_high_score, ScoreStore};
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Idle,
    Running,
    Paused,
    Over,
}

/// Why the last session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum EndReason {
    WallCollision,
    SelfCollision,
    /// The snake covers every cell, so no food can be placed.
    BoardFilled,
}

/// What a single call to [`GameEngine::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// Not running; nothing changed.
    Ignored,
    Moved,
    Ate { new_high_score: bool },
    Ended(EndReason),
}

/// Explicit starting arrangement for replays and scripted scenarios.
#[derive(Debug, Clone)]
pub struct SessionLayout {
    pub snake: Snake,
    pub direction: Direction,
    /// Ignored when absent or on the snake; a random free cell is used instead.
    pub food: Option<Position>,
}

/// Owns one game: board, snake, score, speed, and the high score slot.
#[derive(Debug)]
pub struct GameEngine<S: ScoreStore> {
    grid: GridModel,
    snake: Snake,
    food: Option<Position>,
    direction: Direction,
    pending_direction: Direction,
    score: u32,
    high_score: u32,
    tick_interval_ms: u64,
    tick_count: u64,
    status: GameStatus,
    end_reason: Option<EndReason>,
    rng: StdRng,
    store: S,
}

impl<S: ScoreStore> GameEngine<S> {
    /// Creates an idle engine seeded from the OS.
    #[must_use]
    pub fn new(grid: GridModel, store: S) -> Self {
        Self::with_rng(grid, StdRng::from_entropy(), store)
    }

    /// Creates a deterministic idle engine for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(grid: GridModel, seed: u64, store: S) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed), store)
    }

    /// Creates a running engine from an explicit arrangement.
    #[must_use]
    pub fn from_layout(grid: GridModel, layout: SessionLayout, seed: u64, store: S) -> Self {
        let mut engine = Self::new_with_seed(grid, seed, store);
        let SessionLayout {
            snake,
            direction,
            food: requested_food,
        } = layout;

        engine.food = requested_food
            .filter(|cell| cell.is_within_bounds(grid) && !snake.occupies(*cell))
            .or_else(|| food::place(&mut engine.rng, &snake, grid));
        engine.snake = snake;
        engine.direction = direction;
        engine.pending_direction = direction;
        engine.status = GameStatus::Running;
        engine
    }

    fn with_rng(grid: GridModel, mut rng: StdRng, store: S) -> Self {
        let high_score = load_high_score(&store, HIGH_SCORE_KEY);
        let snake = Snake::from_segments(INITIAL_SNAKE);
        let food = food::place(&mut rng, &snake, grid);

        Self {
            grid,
            snake,
            food,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            high_score,
            tick_interval_ms: INITIAL_TICK_INTERVAL_MS,
            tick_count: 0,
            status: GameStatus::Idle,
            end_reason: None,
            rng,
            store,
        }
    }

    /// Starts a fresh session from `Idle` or `Over`.
    pub fn start(&mut self) {
        if !matches!(self.status, GameStatus::Idle | GameStatus::Over) {
            return;
        }

        self.new_session();
        self.status = GameStatus::Running;
        log::info!("session started (high score {})", self.high_score);
    }

    pub fn pause(&mut self) {
        if self.status == GameStatus::Running {
            self.status = GameStatus::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.status == GameStatus::Paused {
            self.status = GameStatus::Running;
        }
    }

    /// Single start/pause/resume control.
    pub fn toggle(&mut self) {
        match self.status {
            GameStatus::Idle | GameStatus::Over => self.start(),
            GameStatus::Running => self.pause(),
            GameStatus::Paused => self.resume(),
        }
    }

    /// Drops the current session and returns to `Idle`.
    pub fn reset(&mut self) {
        self.new_session();
        self.status = GameStatus::Idle;
    }

    /// Queues a turn for the next tick.
    ///
    /// Rejects a reversal of the direction applied on the last tick. Later
    /// accepted requests overwrite earlier ones within the same tick.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !matches!(self.status, GameStatus::Running | GameStatus::Paused) {
            return false;
        }

        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.pending_direction = direction;
        true
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Ignored;
        }

        self.tick_count += 1;
        self.direction = self.pending_direction;
        let head = self.snake.head().step(self.direction);

        if !head.is_within_bounds(self.grid) {
            return self.end(EndReason::WallCollision);
        }

        if self.snake.occupies(head) {
            return self.end(EndReason::SelfCollision);
        }

        self.snake.push_head(head);

        if self.food != Some(head) {
            self.snake.drop_tail();
            return TickOutcome::Moved;
        }

        self.score += POINTS_PER_FOOD;
        let new_high_score = self.record_high_score();
        self.speed_up();

        self.food = food::place(&mut self.rng, &self.snake, self.grid);
        if self.food.is_none() {
            return self.end(EndReason::BoardFilled);
        }

        log::debug!(
            "ate food at ({}, {}), length {}, interval {}ms",
            head.x,
            head.y,
            self.snake.len(),
            self.tick_interval_ms
        );
        TickOutcome::Ate { new_high_score }
    }

    fn new_session(&mut self) {
        self.snake = Snake::from_segments(INITIAL_SNAKE);
        self.food = food::place(&mut self.rng, &self.snake, self.grid);
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.score = 0;
        self.tick_interval_ms = INITIAL_TICK_INTERVAL_MS;
        self.tick_count = 0;
        self.end_reason = None;
    }

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.status = GameStatus::Over;
        self.end_reason = Some(reason);
        log::info!(
            "game over ({reason:?}) score {} length {} after {} ticks",
            self.score,
            self.snake.len(),
            self.tick_count
        );
        TickOutcome::Ended(reason)
    }

    fn record_high_score(&mut self) -> bool {
        if self.score <= self.high_score {
            return false;
        }

        self.high_score = self.score;
        if let Err(error) = self.store.set(HIGH_SCORE_KEY, self.high_score) {
            log::warn!("failed to save high score {}: {error}", self.high_score);
        }
        true
    }

    fn speed_up(&mut self) {
        if self.tick_interval_ms > MIN_TICK_INTERVAL_MS {
            self.tick_interval_ms = self
                .tick_interval_ms
                .saturating_sub(TICK_INTERVAL_STEP_MS)
                .max(MIN_TICK_INTERVAL_MS);
        }
    }

    /// Borrowed view of everything the renderer paints.
    #[must_use]
    pub fn scene(&self) -> Scene<'_> {
        Scene {
            grid: self.grid,
            snake: &self.snake,
            food: self.food,
            status: self.status,
            score: self.score,
            end_reason: self.end_reason,
        }
    }

    #[must_use]
    pub fn grid(&self) -> GridModel {
        self.grid
    }

    #[must_use]
    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    #[must_use]
    pub fn food(&self) -> Option<Position> {
        self.food
    }

    /// Direction applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction the next tick will apply.
    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.end_reason
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Delay until the next tick at the current speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }
}
