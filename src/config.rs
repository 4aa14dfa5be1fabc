use crate::consts;
use crate::game::{Board, BoardError, GameSettings, SnakeSpawn};
use serde::{de::Deserializer, Deserialize};
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Size of the board, given either in cells or as a pixel surface
    #[serde(default, deserialize_with = "deserialize_board")]
    pub board: Board,

    /// Initial placement of the snake
    #[serde(default)]
    pub snake: SnakeSpawn,

    /// Timing & randomness
    #[serde(default)]
    pub game: GameConfig,
}

impl Config {
    /// Return the default configuration file path
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read, if the file's contents
    /// could not be deserialized, or if the configured snake does not fit on
    /// the configured board.
    pub fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        Config::parse(&content)
    }

    /// Parse & validate configuration from a TOML document
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        let config = toml::from_str::<Config>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the initial snake lies entirely on the board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.snake.fits(self.board) {
            Ok(())
        } else {
            Err(ConfigError::SpawnOutOfBounds {
                width: self.board.width(),
                height: self.board.height(),
            })
        }
    }

    pub fn settings(&self) -> GameSettings {
        GameSettings {
            board: self.board,
            spawn: self.snake,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub struct GameConfig {
    /// Milliseconds between ticks
    pub tick_period_ms: NonZeroU64,

    /// Seed for food placement.  When unset, a fresh seed is drawn from the
    /// operating system on every start.
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.get())
    }
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        let millis = u64::try_from(consts::TICK_PERIOD.as_millis()).unwrap_or(u64::MAX);
        GameConfig {
            tick_period_ms: NonZeroU64::new(millis).unwrap_or(NonZeroU64::MIN),
            seed: None,
        }
    }
}

/// The `[board]` table as written in the file
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
struct RawBoardConfig {
    width: Option<i32>,
    height: Option<i32>,
    pixel_width: Option<u32>,
    pixel_height: Option<u32>,
    cell_size: Option<u32>,
}

impl RawBoardConfig {
    fn into_board(self) -> Result<Board, BoardConfigError> {
        match self {
            RawBoardConfig {
                width: None,
                height: None,
                pixel_width: Some(pw),
                pixel_height: Some(ph),
                cell_size,
            } => Ok(Board::from_pixels(
                pw,
                ph,
                cell_size.unwrap_or(consts::CELL_SIZE),
            )?),
            RawBoardConfig {
                width,
                height,
                pixel_width: None,
                pixel_height: None,
                cell_size: None,
            } => Ok(Board::new(
                width.unwrap_or(consts::BOARD_WIDTH),
                height.unwrap_or(consts::BOARD_HEIGHT),
            )?),
            _ => Err(BoardConfigError::Mixed),
        }
    }
}

#[derive(Debug, Error)]
enum BoardConfigError {
    #[error("board size must be given either as width & height or as pixel-width & pixel-height, not a mixture")]
    Mixed,
    #[error(transparent)]
    Board(#[from] BoardError),
}

fn deserialize_board<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Board, D::Error> {
    RawBoardConfig::deserialize(deserializer)?
        .into_board()
        .map_err(serde::de::Error::custom)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("initial snake does not fit on the {width}x{height} board")]
    SpawnOutOfBounds { width: i32, height: i32 },
}
