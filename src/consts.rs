//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Name of the program's directories under the local config & data
/// directories
pub(crate) const APP_DIR: &str = "gridsnake";

/// File name of the default high score file
pub(crate) const HIGH_SCORE_FILE_NAME: &str = "highscore.json";

/// File name of the default log file
pub(crate) const LOG_FILE_NAME: &str = "gridsnake.log";

/// Key under which the high score is kept in the high score file
pub(crate) const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Default time between ticks at the start of a game
pub(crate) const INITIAL_SPEED: Duration = Duration::from_millis(150);

/// Default amount by which the time between ticks decreases when food is
/// eaten
pub(crate) const SPEED_INCREASE: Duration = Duration::from_millis(5);

/// Default lower limit on the time between ticks
pub(crate) const MAX_SPEED: Duration = Duration::from_millis(50);

/// Time between detecting a crash and presenting the results
pub(crate) const GAME_OVER_DELAY: Duration = Duration::from_millis(100);

/// Pixels lost to page margins when sizing the canvas
pub(crate) const VIEWPORT_MARGIN: u32 = 40;

/// Largest canvas size in pixels
pub(crate) const MAX_CANVAS_SIZE: u32 = 400;

/// Number of cells along each side of a full-size canvas
pub(crate) const GRID_DIVISIONS: u16 = 20;

/// Nominal width of a terminal column in pixels
pub(crate) const PIXELS_PER_COLUMN: u32 = 8;

/// Terminal columns used to draw one grid cell
pub(crate) const COLUMNS_PER_CELL: u16 = 2;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: &str = "██";

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "▓▓";

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: &str = "()";

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: &str = "><";

/// Style for the snake's head
pub(crate) const SNAKE_HEAD_STYLE: Style = Style::new().fg(Color::LightGreen);

/// Style for the snake's body
pub(crate) const SNAKE_BODY_STYLE: Style = Style::new().fg(Color::Green);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed).add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Width of the directional on-screen buttons
pub(crate) const ARROW_BUTTON_WIDTH: u16 = 7;

/// Height of all on-screen buttons
pub(crate) const BUTTON_HEIGHT: u16 = 3;
