//! Turning keyboard, button, and swipe input into game commands
use crate::consts;
use crate::game::Direction;
use crate::render::{Button, ScreenLayout};
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum InputEvent {
    Turn(Direction),
    Start,
    /// Pause a running game, or resume/start one that isn't running
    Toggle,
    Pause,
    Restart,
    Quit,
}

impl InputEvent {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<InputEvent> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if (ev.modifiers, ev.code) == (KeyModifiers::CONTROL, KeyCode::Char('c')) {
            return Some(InputEvent::Quit);
        }
        if !normal_modifiers.contains(ev.modifiers) {
            return None;
        }
        match ev.code {
            KeyCode::Char('w' | 'k') | KeyCode::Up => Some(InputEvent::Turn(Direction::Up)),
            KeyCode::Char('s' | 'j') | KeyCode::Down => Some(InputEvent::Turn(Direction::Down)),
            KeyCode::Char('a' | 'h') | KeyCode::Left => Some(InputEvent::Turn(Direction::Left)),
            KeyCode::Char('d' | 'l') | KeyCode::Right => Some(InputEvent::Turn(Direction::Right)),
            KeyCode::Char(' ' | 'p') | KeyCode::Esc => Some(InputEvent::Toggle),
            KeyCode::Enter => Some(InputEvent::Start),
            KeyCode::Char('r') => Some(InputEvent::Restart),
            KeyCode::Char('q') => Some(InputEvent::Quit),
            _ => None,
        }
    }
}

impl From<Button> for InputEvent {
    fn from(button: Button) -> InputEvent {
        match button {
            Button::Up => InputEvent::Turn(Direction::Up),
            Button::Down => InputEvent::Turn(Direction::Down),
            Button::Left => InputEvent::Turn(Direction::Left),
            Button::Right => InputEvent::Turn(Direction::Right),
            Button::Start => InputEvent::Start,
            Button::Pause => InputEvent::Toggle,
            Button::Restart => InputEvent::Restart,
        }
    }
}

/// Direction of a swipe from one point to another.  The axis with the larger
/// displacement wins; on a tie (including no movement at all) the vertical
/// axis wins.  Positive `dy` is downwards.
pub(crate) fn swipe_direction(dx: i32, dy: i32) -> Direction {
    if dx.unsigned_abs() > dy.unsigned_abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Converts raw terminal events into [`InputEvent`]s, keeping track of mouse
/// drags across the board so that they can be treated as swipes
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct InputSource {
    swipe_start: Option<Position>,
}

impl InputSource {
    pub(crate) fn new() -> InputSource {
        InputSource::default()
    }

    pub(crate) fn translate(&mut self, event: &Event, layout: &ScreenLayout) -> Option<InputEvent> {
        match event {
            Event::Key(_) => InputEvent::from_key_event(event.as_key_press_event()?),
            Event::Mouse(mouse) => self.handle_mouse(*mouse, layout),
            Event::FocusLost => Some(InputEvent::Pause),
            _ => None,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, layout: &ScreenLayout) -> Option<InputEvent> {
        let pos = Position::new(mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if layout.board.contains(pos) {
                    self.swipe_start = Some(pos);
                    None
                } else {
                    self.swipe_start = None;
                    layout.button_at(pos).map(InputEvent::from)
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let start = self.swipe_start.take()?;
                let dx = i32::from(pos.x) - i32::from(start.x);
                // A grid cell is twice as wide as it is tall on screen, so
                // weight vertical movement to match.
                let dy = (i32::from(pos.y) - i32::from(start.y)) * i32::from(consts::COLUMNS_PER_CELL);
                Some(InputEvent::Turn(swipe_direction(dx, dy)))
            }
            _ => None,
        }
    }
}
