use crate::controller::GameController;
use crate::geometry::Geometry;
use crate::highscores::ScoreStore;
use crate::input::{InputEvent, InputSource};
use crate::render::{Renderer, ScreenLayout};
use crate::sound::SoundPlayer;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::layout::{Position, Rect, Size};
use std::io;
use std::time::Instant;

/// The terminal event loop: waits for input or for the controller's next
/// timer, whichever comes first
#[derive(Debug)]
pub(crate) struct App<D, S, P, R = rand::rngs::ThreadRng> {
    controller: GameController<D, S, P, R>,
    input: InputSource,
    area: Rect,
}

impl<D: Renderer, S: ScoreStore, P: SoundPlayer, R: Rng> App<D, S, P, R> {
    /// `size` is the current size of the terminal
    pub(crate) fn new(controller: GameController<D, S, P, R>, size: Size) -> Self {
        App {
            controller,
            input: InputSource::new(),
            area: Rect::from((Position::ORIGIN, size)),
        }
    }

    pub(crate) fn run(mut self) -> io::Result<()> {
        self.controller.redraw()?;
        loop {
            let event = match self.controller.next_deadline() {
                Some(when) => {
                    let wait = when.saturating_duration_since(Instant::now());
                    if wait.is_zero() || !poll(wait)? {
                        self.controller.fire_due(Instant::now())?;
                        continue;
                    }
                    read()?
                }
                None => read()?,
            };
            if !self.handle_event(&event, Instant::now())? {
                return Ok(());
            }
        }
    }

    /// Handle a terminal event.  Returns `false` if the user asked to quit.
    fn handle_event(&mut self, event: &Event, now: Instant) -> io::Result<bool> {
        if let Event::Resize(columns, rows) = *event {
            self.area = Rect::new(0, 0, columns, rows);
            self.controller.resize(Geometry::for_terminal(columns))?;
            return Ok(true);
        }
        let layout = ScreenLayout::new(self.area, self.controller.geometry().bounds().size());
        match self.input.translate(event, &layout) {
            Some(InputEvent::Quit) => return Ok(false),
            Some(ev) => self.controller.handle(ev, now)?,
            None => (),
        }
        Ok(true)
    }
}
