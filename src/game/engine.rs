use super::direction::Direction;
use super::food::spawn_food;
use super::snake::Snake;
use crate::config::GameConfig;
use crate::geometry::Bounds;
use rand::Rng;
use ratatui::layout::Position;
use std::time::Duration;

/// Outcome of advancing the game by one tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickResult {
    /// The snake moved (or, with no direction set yet, stayed put)
    Continue,
    /// The snake moved onto the food and grew by one cell
    AteFood,
    /// The snake ran into a wall or into itself
    Crashed,
}

/// Outcome of asking the snake to turn
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Turn {
    Queued,
    /// The requested direction is the reverse of the current one
    Rejected,
}

/// The snake, the food, and the score of a single game
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct SnakeEngine<R = rand::rngs::ThreadRng> {
    rng: R,
    config: GameConfig,
    bounds: Bounds,
    snake: Snake,
    direction: Option<Direction>,
    pending: Option<Direction>,
    food: Option<Position>,
    score: u32,
    speed: Duration,
    alive: bool,
}

impl<R: Rng> SnakeEngine<R> {
    pub(crate) fn new(config: GameConfig, bounds: Bounds, rng: R) -> SnakeEngine<R> {
        let mut engine = SnakeEngine {
            rng,
            config,
            bounds,
            snake: Snake::new(bounds.center()),
            direction: None,
            pending: None,
            food: None,
            score: 0,
            speed: config.initial_speed,
            alive: true,
        };
        engine.reset(bounds);
        engine
    }

    /// Start a fresh game on a field of the given size: a one-cell snake in
    /// the middle, no direction, a score of zero, and new food.
    pub(crate) fn reset(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        self.snake = Snake::new(bounds.center());
        self.direction = None;
        self.pending = None;
        self.score = 0;
        self.speed = self.config.initial_speed;
        self.alive = true;
        self.spawn_food();
    }

    /// Move the food to a random cell not occupied by the snake.  If there
    /// is no such cell, the field is left without food.
    pub(crate) fn spawn_food(&mut self) {
        self.food = spawn_food(&mut self.rng, self.bounds, &self.snake);
    }

    /// Queue a change of direction to take effect on the next tick.  Only
    /// the most recent queued direction is kept.
    pub(crate) fn queue_direction(&mut self, direction: Direction) -> Turn {
        if self.direction.map(Direction::reverse) == Some(direction) {
            Turn::Rejected
        } else {
            self.pending = Some(direction);
            Turn::Queued
        }
    }

    pub(crate) fn tick(&mut self) -> TickResult {
        if !self.alive {
            return TickResult::Crashed;
        }
        if let Some(d) = self.pending.take() {
            self.direction = Some(d);
        }
        let Some(direction) = self.direction else {
            return TickResult::Continue;
        };
        // The tail is still in place at this point, so moving into the cell
        // it is about to vacate counts as a collision.
        let head = match direction.advance(self.snake.head(), self.bounds) {
            Some(head) if !self.snake.occupies(head) => head,
            _ => {
                self.alive = false;
                return TickResult::Crashed;
            }
        };
        self.snake.push_head(head);
        if Some(head) == self.food {
            self.score += 1;
            if self.speed > self.config.max_speed {
                self.speed = self
                    .speed
                    .saturating_sub(self.config.speed_increase)
                    .max(self.config.max_speed);
            }
            self.spawn_food();
            TickResult::AteFood
        } else {
            self.snake.drop_tail();
            TickResult::Continue
        }
    }
}

impl<R> SnakeEngine<R> {
    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    pub(crate) fn direction(&self) -> Option<Direction> {
        self.direction
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    /// The current time between ticks
    pub(crate) fn speed(&self) -> Duration {
        self.speed
    }

    pub(crate) fn alive(&self) -> bool {
        self.alive
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Change the size of the field without moving the snake or the food
    pub(crate) fn set_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Arrange the snake and food for a test scenario
    #[cfg(test)]
    pub(crate) fn arrange(
        &mut self,
        cells: &[Position],
        direction: Option<Direction>,
        food: Option<Position>,
    ) {
        self.snake.cells = cells.iter().copied().collect();
        self.direction = direction;
        self.pending = None;
        self.food = food;
    }
}
