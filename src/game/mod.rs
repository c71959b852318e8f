mod direction;
mod engine;
mod food;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::engine::{SnakeEngine, TickResult, Turn};
pub(crate) use self::snake::Snake;
