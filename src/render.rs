use crate::consts;
use crate::controller::{GameStatus, GameSummary};
use crate::game::Snake;
use crate::geometry::{Bounds, Geometry};
use crate::util::{center_rect, get_display_area};
use enum_map::{Enum, EnumMap};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span, Text},
    widgets::{Block, Clear, Widget},
    Terminal,
};
use std::io;
use std::time::Duration;

/// Something that can show the state of the game to the player
pub(crate) trait Renderer {
    fn draw(&mut self, scene: &Scene<'_>) -> io::Result<()>;
}

/// Draws the game on a ratatui terminal
#[derive(Debug)]
pub(crate) struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub(crate) fn new(terminal: Terminal<B>) -> Self {
        TerminalRenderer { terminal }
    }

    pub(crate) fn size(&self) -> io::Result<Size> {
        self.terminal.size()
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn draw(&mut self, scene: &Scene<'_>) -> io::Result<()> {
        self.terminal
            .draw(|frame| frame.render_widget(scene, frame.area()))?;
        Ok(())
    }
}

/// Everything needed to draw one frame
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Scene<'a> {
    pub(crate) snake: &'a Snake,
    pub(crate) food: Option<Position>,
    pub(crate) geometry: Geometry,
    pub(crate) bounds: Bounds,
    pub(crate) score: u32,
    pub(crate) high_score: u32,
    pub(crate) speed: Duration,
    pub(crate) status: GameStatus,
    /// True if the snake's head has hit something
    pub(crate) crashed: bool,
    /// The results of the last game, once it is time to show them
    pub(crate) results: Option<GameSummary>,
}

impl Widget for &Scene<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = ScreenLayout::new(area, self.bounds.size());
        Line::styled(
            format!(
                " Score: {}    High Score: {}    Canvas: {} px, {} px cells",
                self.score, self.high_score, self.geometry.canvas_size, self.geometry.cell_size
            ),
            consts::SCORE_BAR_STYLE,
        )
        .render(layout.score_bar, buf);

        Block::bordered().render(layout.board, buf);
        let mut grid = Canvas {
            area: layout.grid,
            bounds: self.bounds,
            buf,
        };
        for pos in self.snake.cells().skip(1) {
            grid.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_BODY_STYLE);
        }
        if let Some(pos) = self.food {
            grid.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        // Draw the head last so that, if it's a collision, we overwrite
        // whatever it's colliding with
        if self.crashed {
            grid.draw_cell(
                self.snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            grid.draw_cell(
                self.snake.head(),
                consts::SNAKE_HEAD_SYMBOL,
                consts::SNAKE_HEAD_STYLE,
            );
        }

        let status = match self.status {
            GameStatus::NotStarted => "Ready",
            GameStatus::Running => "Running",
            GameStatus::Paused => "Paused",
            GameStatus::GameOver => "Game over",
        };
        Text::from_iter([
            Line::from(format!(
                "Status: {status}   Length: {}",
                self.snake.len()
            )),
            Line::from(format!("Tick: {} ms", self.speed.as_millis())),
        ])
        .render(layout.info, buf);

        for (button, &button_area) in &layout.buttons {
            ButtonWidget(button.label(self.status)).render(button_area, buf);
        }
        Text::from_iter(HELP.iter().map(|&(keys, action)| {
            Line::from_iter([
                Span::styled(format!("{keys:>7}"), consts::KEY_STYLE),
                Span::raw(format!("  {action}")),
            ])
        }))
        .render(layout.help, buf);

        let message = match self.status {
            GameStatus::NotStarted => " Press an arrow key or Enter to start",
            GameStatus::Paused => " PAUSED (press space to resume)",
            GameStatus::Running | GameStatus::GameOver => "",
        };
        Line::from(message).render(layout.message, buf);

        if let Some(results) = self.results {
            let dialog = center_rect(get_display_area(area), ResultsDialog::SIZE);
            ResultsDialog(results).render(dialog, buf);
        }
    }
}

static HELP: &[(&str, &str)] = &[
    ("arrows", "move (or wasd, hjkl)"),
    ("space", "pause / resume"),
    ("enter", "start"),
    ("r", "restart"),
    ("q", "quit"),
];

/// Where everything goes on the screen
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct ScreenLayout {
    pub(crate) score_bar: Rect,
    /// The bordered box around the grid
    pub(crate) board: Rect,
    /// The grid itself
    pub(crate) grid: Rect,
    pub(crate) message: Rect,
    pub(crate) info: Rect,
    pub(crate) buttons: EnumMap<Button, Rect>,
    pub(crate) help: Rect,
}

impl ScreenLayout {
    /// Lay out the screen for a terminal of area `area` and a grid of `grid`
    /// cells
    pub(crate) fn new(area: Rect, grid: Size) -> ScreenLayout {
        let display = get_display_area(area);
        let [score_bar, body, message] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);

        let board_size = Size {
            width: grid
                .width
                .saturating_mul(consts::COLUMNS_PER_CELL)
                .saturating_add(2),
            height: grid.height.saturating_add(2),
        };
        let [board_column, sidebar] =
            Layout::horizontal([Constraint::Length(board_size.width), Constraint::Fill(1)])
                .spacing(2)
                .areas(body);
        let board = center_rect(board_column, board_size);
        let grid = board.inner(Margin::new(1, 1));

        let [info, dpad, commands, help] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(consts::BUTTON_HEIGHT * 3),
            Constraint::Length(consts::BUTTON_HEIGHT),
            Constraint::Fill(1),
        ])
        .spacing(1)
        .areas(sidebar);
        let [up_row, middle_row, down_row] = Layout::vertical([consts::BUTTON_HEIGHT; 3]).areas(dpad);
        let [up] = Layout::horizontal([consts::ARROW_BUTTON_WIDTH])
            .flex(Flex::Center)
            .areas(up_row);
        let [left, _, right] = Layout::horizontal([consts::ARROW_BUTTON_WIDTH; 3])
            .flex(Flex::Center)
            .areas(middle_row);
        let [down] = Layout::horizontal([consts::ARROW_BUTTON_WIDTH])
            .flex(Flex::Center)
            .areas(down_row);
        let [start, pause, restart] = Layout::horizontal([
            Button::Start.width(),
            Button::Pause.width(),
            Button::Restart.width(),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(commands);

        ScreenLayout {
            score_bar,
            board,
            grid,
            message,
            info,
            buttons: EnumMap::from_array([up, down, left, right, start, pause, restart]),
            help,
        }
    }

    /// Return the on-screen button at `pos`, if any
    pub(crate) fn button_at(&self, pos: Position) -> Option<Button> {
        self.buttons
            .iter()
            .find_map(|(button, area)| area.contains(pos).then_some(button))
    }
}

/// The clickable on-screen buttons
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum Button {
    Up,
    Down,
    Left,
    Right,
    Start,
    Pause,
    Restart,
}

impl Button {
    fn label(self, status: GameStatus) -> &'static str {
        match self {
            Button::Up => "▲",
            Button::Down => "▼",
            Button::Left => "◀",
            Button::Right => "▶",
            Button::Start => "Start",
            Button::Pause if status == GameStatus::Paused => "Resume",
            Button::Pause => "Pause",
            Button::Restart => "Restart",
        }
    }

    fn width(self) -> u16 {
        match self {
            Button::Up | Button::Down | Button::Left | Button::Right => consts::ARROW_BUTTON_WIDTH,
            // The widest label plus a border and a space on each side
            Button::Start => 9,
            Button::Pause => 10,
            Button::Restart => 11,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ButtonWidget(&'static str);

impl Widget for ButtonWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered();
        let inner = block.inner(area);
        block.render(area, buf);
        Line::from(self.0).centered().render(inner, buf);
    }
}

/// Pop-up shown a moment after the game ends
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ResultsDialog(GameSummary);

impl ResultsDialog {
    const SIZE: Size = Size {
        width: 32,
        height: 7,
    };
}

impl Widget for ResultsDialog {
    /*
     * ┌───────── GAME OVER ──────────┐
     * │ Score: 12                    │
     * │ High Score: 12 (new!)        │
     * │                              │
     * │         [OK (enter)]         │
     * └──────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let GameSummary {
            score,
            high_score,
            new_record,
        } = self.0;
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .style(Style::reset());
        let inner = block.inner(area).inner(Margin::new(1, 0));
        Clear.render(area, buf);
        block.render(area, buf);
        let record = if new_record { " (new!)" } else { "" };
        let [score_area, high_area, _, ok_area] =
            Layout::vertical([Constraint::Length(1); 4]).areas(inner);
        Line::from(format!("Score: {score}")).render(score_area, buf);
        Line::from(format!("High Score: {high_score}{record}")).render(high_area, buf);
        Line::from_iter([
            Span::raw("[OK ("),
            Span::styled("enter", consts::KEY_STYLE),
            Span::raw(")]"),
        ])
        .centered()
        .render(ok_area, buf);
    }
}

/// A view of the grid area of the screen in which each grid cell is
/// [`consts::COLUMNS_PER_CELL`] characters wide
#[derive(Debug)]
struct Canvas<'a> {
    area: Rect,
    bounds: Bounds,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        if !self.bounds.contains(pos) {
            return;
        }
        let Some(x) = pos
            .x
            .checked_mul(consts::COLUMNS_PER_CELL)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for (x, ch) in (x..).zip(symbol.chars()) {
            if !self.area.contains(Position::new(x, y)) {
                break;
            }
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(Style::reset().patch(style));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.left()..buf.area.right())
            .map(|x| buf[(x, y)].symbol())
            .collect()
    }

    fn screen_text(buf: &Buffer) -> String {
        (buf.area.top()..buf.area.bottom())
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn snake(cells: &[(u16, u16)]) -> Snake {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn scene(snake: &Snake) -> Scene<'_> {
        let geometry = Geometry::for_terminal(80);
        Scene {
            snake,
            food: Some(Position::new(3, 4)),
            geometry,
            bounds: geometry.bounds(),
            score: 2,
            high_score: 9,
            speed: Duration::from_millis(140),
            status: GameStatus::Running,
            crashed: false,
            results: None,
        }
    }

    #[test]
    fn layout_80x24() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24), Size::new(20, 20));
        assert_eq!(layout.score_bar, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.board, Rect::new(0, 1, 42, 22));
        assert_eq!(layout.grid, Rect::new(1, 2, 40, 20));
        assert_eq!(layout.message, Rect::new(0, 23, 80, 1));
        let buttons = layout.buttons.values().collect::<Vec<_>>();
        for (i, a) in buttons.iter().enumerate() {
            assert!(a.left() >= 44, "button {i} overlaps board: {a:?}");
            assert!(a.right() <= 80 && a.bottom() <= 23, "button {i} off screen: {a:?}");
            assert_eq!(a.height, consts::BUTTON_HEIGHT);
            for b in &buttons[i + 1..] {
                assert!(!a.intersects(**b), "{a:?} overlaps {b:?}");
            }
        }
        let up = layout.buttons[Button::Up];
        let down = layout.buttons[Button::Down];
        let left = layout.buttons[Button::Left];
        let right = layout.buttons[Button::Right];
        assert_eq!(up.x, down.x);
        assert!(up.bottom() <= left.top() && left.bottom() <= down.top());
        assert!(left.right() <= up.left() && up.right() <= right.left());
    }

    #[test]
    fn layout_is_centered() {
        let small = ScreenLayout::new(Rect::new(0, 0, 80, 24), Size::new(20, 20));
        let big = ScreenLayout::new(Rect::new(0, 0, 100, 30), Size::new(20, 20));
        assert_eq!(big.board, small.board.offset(ratatui::layout::Offset { x: 10, y: 3 }));
    }

    #[test]
    fn button_at() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24), Size::new(20, 20));
        let restart = layout.buttons[Button::Restart];
        assert_eq!(
            layout.button_at(Position::new(restart.x, restart.y)),
            Some(Button::Restart)
        );
        assert_eq!(layout.button_at(Position::new(5, 5)), None);
    }

    #[test]
    fn draw_running() {
        let snake = snake(&[(10, 10), (10, 11), (11, 11)]);
        let scene = scene(&snake);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&scene).render(area, &mut buf);
        let layout = ScreenLayout::new(area, Size::new(20, 20));
        let gx = layout.grid.x;
        let gy = layout.grid.y;
        assert!(row_text(&buf, 0).starts_with(" Score: 2    High Score: 9"));
        assert_eq!(buf[(gx + 20, gy + 10)].symbol(), "█");
        assert_eq!(buf[(gx + 21, gy + 10)].symbol(), "█");
        assert_eq!(buf[(gx + 20, gy + 10)].fg, consts::SNAKE_HEAD_STYLE.fg.unwrap());
        assert_eq!(buf[(gx + 20, gy + 11)].symbol(), "▓");
        assert_eq!(buf[(gx + 22, gy + 11)].symbol(), "▓");
        assert_eq!(buf[(gx + 6, gy + 4)].symbol(), "(");
        assert_eq!(buf[(gx + 7, gy + 4)].symbol(), ")");
        let text = screen_text(&buf);
        assert!(text.contains("Status: Running   Length: 3"));
        assert!(text.contains("Tick: 140 ms"));
        assert!(row_text(&buf, 0).contains("Canvas: 400 px, 20 px cells"));
        assert!(text.contains("Pause"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn score_bar_shows_trimmed_canvas() {
        let snake = snake(&[(10, 10)]);
        let mut scene = scene(&snake);
        scene.geometry = Geometry::for_viewport(290);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&scene).render(area, &mut buf);
        assert!(row_text(&buf, 0).contains("Canvas: 240 px, 12 px cells"));
    }

    #[test]
    fn draw_crash() {
        let snake = snake(&[(0, 5), (1, 5)]);
        let mut scene = scene(&snake);
        scene.crashed = true;
        scene.status = GameStatus::GameOver;
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&scene).render(area, &mut buf);
        let layout = ScreenLayout::new(area, Size::new(20, 20));
        assert_eq!(buf[(layout.grid.x, layout.grid.y + 5)].symbol(), ">");
        assert_eq!(buf[(layout.grid.x + 1, layout.grid.y + 5)].symbol(), "<");
        assert!(!screen_text(&buf).contains("GAME OVER"));
    }

    #[test]
    fn draw_results() {
        let snake = snake(&[(0, 5)]);
        let mut scene = scene(&snake);
        scene.crashed = true;
        scene.status = GameStatus::GameOver;
        scene.results = Some(GameSummary {
            score: 12,
            high_score: 12,
            new_record: true,
        });
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&scene).render(area, &mut buf);
        let text = screen_text(&buf);
        assert!(text.contains(" GAME OVER "));
        assert!(text.contains("Score: 12"));
        assert!(text.contains("High Score: 12 (new!)"));
        assert!(text.contains("[OK (enter)]"));
    }

    #[test]
    fn draw_paused() {
        let snake = snake(&[(4, 4)]);
        let mut scene = scene(&snake);
        scene.status = GameStatus::Paused;
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&scene).render(area, &mut buf);
        assert!(row_text(&buf, 23).starts_with(" PAUSED (press space to resume)"));
        assert!(screen_text(&buf).contains("Resume"));
    }

    #[test]
    fn off_grid_cells_are_skipped() {
        let snake = snake(&[(25, 5)]);
        let scene = scene(&snake);
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        (&scene).render(area, &mut buf);
        assert!(!screen_text(&buf).contains('█'));
    }

    #[test]
    fn terminal_renderer() {
        let snake = snake(&[(10, 10)]);
        let scene = scene(&snake);
        let mut renderer = TerminalRenderer::new(Terminal::new(TestBackend::new(80, 24)).unwrap());
        renderer.draw(&scene).unwrap();
        assert_eq!(renderer.size().unwrap(), Size::new(80, 24));
        let buf = renderer.terminal.backend().buffer();
        assert!(row_text(buf, 0).starts_with(" Score: 2"));
    }
}
