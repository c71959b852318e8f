use crate::config::GameConfig;
use crate::consts;
use crate::game::{Direction, SnakeEngine, TickResult, Turn};
use crate::geometry::Geometry;
use crate::highscores::ScoreStore;
use crate::input::InputEvent;
use crate::render::{Renderer, Scene};
use crate::sound::{Cue, SoundPlayer};
use crate::timer::{OneShot, Ticker};
use crate::util::error_chain;
use rand::Rng;
use std::io;
use std::time::Instant;

/// Where the game is in its lifecycle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameStatus {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// How a finished game went
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameSummary {
    pub(crate) score: u32,
    /// The high score after the game was taken into account
    pub(crate) high_score: u32,
    pub(crate) new_record: bool,
}

/// Runs games one after another: owns the engine and the tick timer, feeds
/// input to the engine, and tells the renderer, the sound player, and the
/// high score store about what happens.
///
/// Time only passes when the owner says it does: everything that depends on
/// the clock takes the current [`Instant`], and the owner is expected to
/// call [`fire_due()`][GameController::fire_due] once
/// [`next_deadline()`][GameController::next_deadline] is reached.
#[derive(Debug)]
pub(crate) struct GameController<D, S, P, R = rand::rngs::ThreadRng> {
    engine: SnakeEngine<R>,
    geometry: Geometry,
    status: GameStatus,
    ticker: Ticker,
    results_timer: OneShot,
    summary: Option<GameSummary>,
    /// Whether the results of the last game are on screen
    results_shown: bool,
    high_score: u32,
    /// `None` once the store has failed; from then on the high score only
    /// lives in memory.
    store: Option<S>,
    sound: P,
    renderer: D,
}

impl<D: Renderer, S: ScoreStore, P: SoundPlayer, R: Rng> GameController<D, S, P, R> {
    pub(crate) fn new(
        config: GameConfig,
        geometry: Geometry,
        mut store: Option<S>,
        sound: P,
        renderer: D,
        rng: R,
    ) -> Self {
        let loaded = store.as_ref().map(ScoreStore::get);
        let high_score = match loaded {
            Some(Ok(score)) => score,
            Some(Err(e)) => {
                log::warn!(
                    "{}; high score will not be saved this session",
                    error_chain(&e)
                );
                store = None;
                0
            }
            None => 0,
        };
        log::info!("High score: {high_score}");
        GameController {
            engine: SnakeEngine::new(config, geometry.bounds(), rng),
            geometry,
            status: GameStatus::NotStarted,
            ticker: Ticker::default(),
            results_timer: OneShot::default(),
            summary: None,
            results_shown: false,
            high_score,
            store,
            sound,
            renderer,
        }
    }

    pub(crate) fn handle(&mut self, event: InputEvent, now: Instant) -> io::Result<()> {
        match event {
            InputEvent::Turn(d) => self.set_direction(d, now),
            InputEvent::Start => self.start(now),
            InputEvent::Toggle => self.toggle(now),
            InputEvent::Pause => self.pause(),
            InputEvent::Restart => self.restart(),
            InputEvent::Quit => Ok(()),
        }
    }

    /// Start a new game, resume a paused one, or dismiss the results of a
    /// finished one
    pub(crate) fn start(&mut self, now: Instant) -> io::Result<()> {
        match self.status {
            GameStatus::NotStarted => {
                self.engine.reset(self.geometry.bounds());
                log::info!("Starting game");
            }
            GameStatus::Paused => log::info!("Resuming game"),
            GameStatus::Running => return Ok(()),
            GameStatus::GameOver => return self.acknowledge(),
        }
        self.status = GameStatus::Running;
        self.ticker.schedule(self.engine.speed(), now);
        self.play(Cue::BackgroundMusic);
        self.redraw()
    }

    pub(crate) fn pause(&mut self) -> io::Result<()> {
        if self.status != GameStatus::Running {
            return Ok(());
        }
        log::info!("Pausing game");
        self.status = GameStatus::Paused;
        self.ticker.cancel();
        self.stop(Cue::BackgroundMusic);
        self.redraw()
    }

    pub(crate) fn toggle(&mut self, now: Instant) -> io::Result<()> {
        match self.status {
            GameStatus::Running => self.pause(),
            GameStatus::NotStarted | GameStatus::Paused | GameStatus::GameOver => self.start(now),
        }
    }

    /// Abandon the current game and set up a fresh one, drawing it once.
    /// The new game starts on the next start, toggle, or direction input.
    pub(crate) fn restart(&mut self) -> io::Result<()> {
        log::info!("Restarting game");
        self.ticker.cancel();
        self.results_timer.cancel();
        self.summary = None;
        self.results_shown = false;
        self.stop(Cue::BackgroundMusic);
        self.engine.reset(self.geometry.bounds());
        self.status = GameStatus::NotStarted;
        self.redraw()
    }

    /// Steer the snake, starting the game first if it hasn't started yet.
    /// While paused the turn is queued for when the game resumes.
    pub(crate) fn set_direction(&mut self, direction: Direction, now: Instant) -> io::Result<()> {
        match self.status {
            GameStatus::GameOver => return Ok(()),
            GameStatus::NotStarted => self.start(now)?,
            GameStatus::Running | GameStatus::Paused => (),
        }
        match self.engine.queue_direction(direction) {
            Turn::Queued => {
                log::debug!("Turning {direction}");
                self.play(Cue::Move);
            }
            Turn::Rejected => log::debug!("Ignoring reversal to {direction}"),
        }
        Ok(())
    }

    /// Run any timers that are due at `now`
    pub(crate) fn fire_due(&mut self, now: Instant) -> io::Result<()> {
        if self.ticker.fire(now) {
            self.on_tick(now)?;
        }
        if self.results_timer.fire(now) {
            self.results_shown = true;
            self.redraw()?;
        }
        Ok(())
    }

    /// When [`fire_due()`][GameController::fire_due] next needs to be called
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        match (self.ticker.deadline(), self.results_timer.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    fn on_tick(&mut self, now: Instant) -> io::Result<()> {
        if self.status != GameStatus::Running {
            return Ok(());
        }
        match self.engine.tick() {
            TickResult::Crashed => return self.game_over(now),
            TickResult::AteFood => {
                self.play(Cue::Food);
                let speed = self.engine.speed();
                log::info!(
                    "Ate food; score = {}, speed = {} ms",
                    self.engine.score(),
                    speed.as_millis()
                );
                if self.ticker.period() != Some(speed) {
                    self.ticker.schedule(speed, now);
                }
            }
            TickResult::Continue => (),
        }
        self.redraw()
    }

    fn game_over(&mut self, now: Instant) -> io::Result<()> {
        let score = self.engine.score();
        log::info!("Game over; score = {score}");
        if let Some(d) = self.engine.direction() {
            log::debug!(
                "Crashed heading {d} from {:?}",
                self.engine.snake().head()
            );
        }
        self.status = GameStatus::GameOver;
        self.ticker.cancel();
        self.play(Cue::GameOver);
        self.stop(Cue::BackgroundMusic);
        let new_record = score > self.high_score;
        if new_record {
            log::info!("New high score: {score} (was {})", self.high_score);
            self.high_score = score;
            self.save_high_score();
        }
        self.summary = Some(GameSummary {
            score,
            high_score: self.high_score,
            new_record,
        });
        self.results_timer.arm(consts::GAME_OVER_DELAY, now);
        self.redraw()
    }

    /// Dismiss the results of a finished game, if they're showing
    fn acknowledge(&mut self) -> io::Result<()> {
        if self.status == GameStatus::GameOver && self.results_shown {
            self.restart()
        } else {
            Ok(())
        }
    }

    /// Adapt to a new viewport.  The snake and food stay where they are,
    /// even if that's now off the field.
    pub(crate) fn resize(&mut self, geometry: Geometry) -> io::Result<()> {
        if geometry != self.geometry {
            log::debug!(
                "Grid is now {0}x{0} cells of {1} px",
                geometry.grid_cells,
                geometry.cell_size
            );
            self.geometry = geometry;
            self.engine.set_bounds(geometry.bounds());
        }
        self.redraw()
    }

    pub(crate) fn redraw(&mut self) -> io::Result<()> {
        let scene = Scene {
            snake: self.engine.snake(),
            food: self.engine.food(),
            geometry: self.geometry,
            bounds: self.engine.bounds(),
            score: self.engine.score(),
            high_score: self.high_score,
            speed: self.engine.speed(),
            status: self.status,
            crashed: !self.engine.alive(),
            results: self.summary.filter(|_| self.results_shown),
        };
        self.renderer.draw(&scene)
    }

    pub(crate) fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn save_high_score(&mut self) {
        if let Some(store) = self.store.as_mut() {
            if let Err(e) = store.set(self.high_score) {
                log::warn!(
                    "{}; high score will not be saved this session",
                    error_chain(&e)
                );
                self.store = None;
            }
        }
    }

    fn play(&mut self, cue: Cue) {
        if let Err(e) = self.sound.play(cue) {
            log::warn!("{}", error_chain(&e));
        }
    }

    fn stop(&mut self, cue: Cue) {
        if let Err(e) = self.sound.stop(cue) {
            log::warn!("{}", error_chain(&e));
        }
    }
}
