use crate::consts;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Timing of the game loop
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    #[serde(default)]
    pub(crate) sound: SoundConfig,

    #[serde(default)]
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join(consts::APP_DIR).join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the path at which the high score should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// score file path.  Returns `None` if the high score should not be
    /// saved or if no path could be determined.
    pub(crate) fn high_score_file(&self) -> Option<PathBuf> {
        if !self.files.save_high_score {
            return None;
        }
        self.files
            .high_score_file
            .clone()
            .or_else(|| default_data_file(consts::HIGH_SCORE_FILE_NAME))
    }

    /// Return the path of the log file, if any
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.log
            .file
            .clone()
            .or_else(|| default_data_file(consts::LOG_FILE_NAME))
    }
}

fn default_data_file(name: &str) -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(consts::APP_DIR).join(name))
}

/// Tick intervals.  Note that `max_speed` is the *shortest* interval the
/// game will ever reach, not a speed.
#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawGameConfig")]
pub(crate) struct GameConfig {
    /// Time between ticks at the start of a game
    pub(crate) initial_speed: Duration,

    /// Amount by which the time between ticks shrinks whenever food is eaten
    pub(crate) speed_increase: Duration,

    /// Floor on the time between ticks
    pub(crate) max_speed: Duration,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            initial_speed: consts::INITIAL_SPEED,
            speed_increase: consts::SPEED_INCREASE,
            max_speed: consts::MAX_SPEED,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawGameConfig {
    initial_speed: u64,
    speed_increase: u64,
    max_speed: u64,
}

impl Default for RawGameConfig {
    fn default() -> RawGameConfig {
        let GameConfig {
            initial_speed,
            speed_increase,
            max_speed,
        } = GameConfig::default();
        RawGameConfig {
            initial_speed: millis(initial_speed),
            speed_increase: millis(speed_increase),
            max_speed: millis(max_speed),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = GameConfigError;

    fn try_from(value: RawGameConfig) -> Result<GameConfig, GameConfigError> {
        if value.initial_speed == 0 || value.speed_increase == 0 || value.max_speed == 0 {
            return Err(GameConfigError::Zero);
        }
        if value.max_speed > value.initial_speed {
            return Err(GameConfigError::FloorAboveStart {
                max_speed: value.max_speed,
                initial_speed: value.initial_speed,
            });
        }
        Ok(GameConfig {
            initial_speed: Duration::from_millis(value.initial_speed),
            speed_increase: Duration::from_millis(value.speed_increase),
            max_speed: Duration::from_millis(value.max_speed),
        })
    }
}

#[derive(Clone, Copy, Debug, Error, Eq, PartialEq)]
pub(crate) enum GameConfigError {
    #[error("game speeds must be positive")]
    Zero,
    #[error("max-speed ({max_speed} ms) must not exceed initial-speed ({initial_speed} ms)")]
    FloorAboveStart { max_speed: u64, initial_speed: u64 },
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    save_high_score: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct SoundConfig {
    /// Play sound effects and background music
    pub(crate) enabled: bool,
}

impl Default for SoundConfig {
    fn default() -> SoundConfig {
        SoundConfig { enabled: true }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    file: Option<PathBuf>,
    pub(crate) level: log::LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: log::LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}
