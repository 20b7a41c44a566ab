use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Side length of one grid cell in pixels
pub const BLOCK_SIZE: i32 = 25;
/// Number of grid columns
pub const COLS: i32 = 20;
/// Number of grid rows
pub const ROWS: i32 = 20;
/// Logic ticks per second
pub const TICK_RATE_HZ: u32 = 10;
/// Cell (column, row) the snake starts on
pub const START_CELL: (i32, i32) = (5, 5);
/// Points awarded per eaten bait
pub const SCORE_PER_FOOD: u32 = 10;

/// Errors raised by [`GameConfig::validate`] and [`GameConfig::from_json`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("block size must be positive, got {0}")]
    BlockSize(i32),
    #[error("grid must be at least 1x1, got {cols}x{rows}")]
    GridSize { cols: i32, rows: i32 },
    #[error("tick rate must be positive")]
    TickRate,
    #[error("start cell ({0}, {1}) is outside the grid")]
    StartCell(i32, i32),
    #[error("at least one tick per frame must be allowed")]
    CatchUp,
    #[error("malformed config: {0}")]
    Parse(String),
}

/// Configuration for the game
///
/// Missing fields in a config file fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side of one cell in pixels
    pub block_size: i32,
    /// Width of the grid in cells
    pub cols: i32,
    /// Height of the grid in cells
    pub rows: i32,
    /// Logic ticks per second
    pub tick_rate: u32,
    /// Starting cell of the snake head, in cells
    pub start_cell: (i32, i32),
    /// Score added for each bait eaten
    pub score_per_food: u32,
    /// Upper bound on ticks run for a single rendered frame
    pub max_ticks_per_frame: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            block_size: BLOCK_SIZE,
            cols: COLS,
            rows: ROWS,
            tick_rate: TICK_RATE_HZ,
            start_cell: START_CELL,
            score_per_food: SCORE_PER_FOOD,
            max_ticks_per_frame: 1,
        }
    }
}

impl GameConfig {
    /// Create a small grid for testing
    pub fn small() -> Self {
        Self {
            cols: 4,
            rows: 4,
            start_cell: (1, 1),
            ..Default::default()
        }
    }

    /// Board width in pixels
    pub fn board_width(&self) -> i32 {
        self.cols * self.block_size
    }

    /// Board height in pixels
    pub fn board_height(&self) -> i32 {
        self.rows * self.block_size
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.cols.max(0) as usize) * (self.rows.max(0) as usize)
    }

    /// Parse a JSON config file and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes a playable board
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.block_size <= 0 {
            return Err(ConfigError::BlockSize(self.block_size));
        }
        if self.cols <= 0 || self.rows <= 0 {
            return Err(ConfigError::GridSize {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::TickRate);
        }
        let (sx, sy) = self.start_cell;
        if sx < 0 || sy < 0 || sx >= self.cols || sy >= self.rows {
            return Err(ConfigError::StartCell(sx, sy));
        }
        if self.max_ticks_per_frame == 0 {
            return Err(ConfigError::CatchUp);
        }
        Ok(())
    }
}
