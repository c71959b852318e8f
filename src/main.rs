mod app;
mod config;
mod consts;
mod controller;
mod game;
mod geometry;
mod highscores;
mod input;
mod render;
mod sound;
mod timer;
mod util;
use crate::app::App;
use crate::config::Config;
use crate::controller::GameController;
use crate::geometry::Geometry;
use crate::highscores::FileScoreStore;
use crate::render::TerminalRenderer;
use crate::sound::{AudioOutput, RodioPlayer, Silence, SoundPlayer};
use crate::util::error_chain;
use anyhow::Context;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
};
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

const USAGE: &str = concat!(
    "Usage: gridsnake [-c|--config <PATH>] [--log-file <PATH>]\n",
    "\n",
    "Play Snake in the terminal\n",
    "\n",
    "Options:\n",
    "  -c, --config <PATH>    Read configuration from the given file\n",
    "      --log-file <PATH>  Write log messages to the given file\n",
    "  -h, --help             Display this help message and exit\n",
    "  -V, --version          Show the program version and exit\n",
);

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        config: Option<PathBuf>,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: lexopt::Parser) -> Result<Command, lexopt::Error> {
        use lexopt::Arg;
        let mut config = None;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('c') | Arg::Long("config") => {
                    config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run { config, log_file })
    }

    fn run(self) -> ExitCode {
        match self {
            Command::Run { config, log_file } => {
                let config = match startup(config.as_deref(), log_file) {
                    Ok(config) => config,
                    Err(e) => {
                        eprintln!("gridsnake: {e:?}");
                        return ExitCode::from(2);
                    }
                };
                io_exit(play(config))
            }
            Command::Help => {
                print!("{USAGE}");
                ExitCode::SUCCESS
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                ExitCode::SUCCESS
            }
        }
    }
}

fn main() -> ExitCode {
    match Command::from_parser(lexopt::Parser::from_env()) {
        Ok(cmd) => cmd.run(),
        Err(e) => {
            eprintln!("gridsnake: {e}\n\n{USAGE}");
            ExitCode::from(2)
        }
    }
}

/// Load the configuration and start logging
fn startup(config_path: Option<&Path>, log_file: Option<PathBuf>) -> anyhow::Result<Config> {
    let config = match config_path {
        Some(path) => Config::load(path, false),
        None => Config::load(&Config::default_path()?, true),
    }
    .context("failed to load configuration")?;
    match log_file.or_else(|| config.log_file()) {
        Some(path) => {
            if let Err(e) = init_logging(&path, config.log.level) {
                eprintln!("gridsnake: warning: logging disabled: {e:#}");
            }
        }
        None => eprintln!("gridsnake: warning: logging disabled: no log file location"),
    }
    match config_path {
        Some(path) => log::info!("Starting gridsnake with configuration from {}", path.display()),
        None => log::info!("Starting gridsnake"),
    }
    Ok(config)
}

fn init_logging(path: &Path, level: log::LevelFilter) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let file = fs_err::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    simplelog::WriteLogger::init(level, simplelog::Config::default(), file)
        .context("failed to install logger")?;
    Ok(())
}

fn play(config: Config) -> io::Result<()> {
    let store = config.high_score_file().map(|path| {
        let store = FileScoreStore::new(path);
        log::info!("Using high score file {}", store.path().display());
        store
    });
    let sound: Box<dyn SoundPlayer> = if config.sound.enabled {
        match AudioOutput::open() {
            Ok(output) => {
                log::debug!("Opened audio output");
                Box::new(RodioPlayer::new(output))
            }
            Err(e) => {
                log::warn!("Sound disabled: {}", error_chain(&e));
                Box::new(Silence)
            }
        }
    } else {
        Box::new(Silence)
    };
    let terminal = ratatui::init();
    let r = execute!(io::stdout(), EnableMouseCapture, EnableFocusChange).and_then(|()| {
        let renderer = TerminalRenderer::new(terminal);
        let size = renderer.size()?;
        let controller = GameController::new(
            config.game,
            Geometry::for_terminal(size.width),
            store,
            sound,
            renderer,
            rand::rng(),
        );
        App::new(controller, size).run()
    });
    let _ = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture);
    ratatui::restore();
    if let Err(ref e) = r {
        log::error!("Terminal error: {e}");
    }
    r
}

fn io_exit(r: io::Result<()>) -> ExitCode {
    match r {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::from(2)
        }
    }
}
