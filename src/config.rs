use std::time::Duration;

use ratatui::style::Color;
use thiserror::Error;

use crate::snake::Position;

/// Size of one grid cell in surface units (terminal columns × rows).
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct CellSize {
    pub width: u16,
    pub height: u16,
}

/// Two columns per row keeps terminal cells roughly square.
pub const DEFAULT_CELL_SIZE: CellSize = CellSize {
    width: 2,
    height: 1,
};

/// Default play surface width in terminal columns.
pub const DEFAULT_SURFACE_WIDTH: u16 = 40;

/// Default play surface height in terminal rows.
pub const DEFAULT_SURFACE_HEIGHT: u16 = 20;

/// Smallest grid that still holds the starting snake and its first move.
pub const MIN_GRID_WIDTH: u16 = 10;
pub const MIN_GRID_HEIGHT: u16 = 11;

/// Tick interval at the start of every session.
pub const INITIAL_TICK_INTERVAL_MS: u64 = 150;

/// The interval never shrinks below this.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Interval reduction applied per food eaten.
pub const TICK_INTERVAL_STEP_MS: u64 = 2;

/// Score awarded per food.
pub const POINTS_PER_FOOD: u32 = 10;

/// Store slot holding the high score.
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Upper bound on how long the loop waits for input before redrawing.
pub const REDRAW_INTERVAL: Duration = Duration::from_millis(33);

/// Initial snake, head first.
pub const INITIAL_SNAKE: [Position; 3] = [
    Position { x: 8, y: 10 },
    Position { x: 7, y: 10 },
    Position { x: 6, y: 10 },
];

/// Errors raised while turning user settings into a playable grid.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("cell size must be non-zero, got {width}x{height}")]
    ZeroCellSize { width: u16, height: u16 },
    #[error(
        "surface {surface_width}x{surface_height} gives a {grid_width}x{grid_height} grid, \
         too small for the starting snake"
    )]
    GridTooSmall {
        surface_width: u16,
        surface_height: u16,
        grid_width: u16,
        grid_height: u16,
    },
}

/// Discrete coordinate space derived from the surface size and the cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridModel {
    pub width: u16,
    pub height: u16,
    pub cell: CellSize,
}

impl GridModel {
    /// Builds a grid that fits inside a surface of the given size.
    ///
    /// Partial cells at the right and bottom edges are discarded, the same
    /// way a canvas whose size is not a multiple of the cell size would be.
    pub fn from_surface(
        surface_width: u16,
        surface_height: u16,
        cell: CellSize,
    ) -> Result<Self, ConfigError> {
        if cell.width == 0 || cell.height == 0 {
            return Err(ConfigError::ZeroCellSize {
                width: cell.width,
                height: cell.height,
            });
        }

        let grid = Self {
            width: surface_width / cell.width,
            height: surface_height / cell.height,
            cell,
        };

        if grid.width < MIN_GRID_WIDTH || grid.height < MIN_GRID_HEIGHT {
            return Err(ConfigError::GridTooSmall {
                surface_width,
                surface_height,
                grid_width: grid.width,
                grid_height: grid.height,
            });
        }

        Ok(grid)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Surface width needed to draw the whole grid.
    #[must_use]
    pub fn surface_width(self) -> u16 {
        self.width * self.cell.width
    }

    /// Surface height needed to draw the whole grid.
    #[must_use]
    pub fn surface_height(self) -> u16 {
        self.height * self.cell.height
    }

    /// Iterates every cell row by row.
    pub fn cells(self) -> impl Iterator<Item = Position> {
        (0..i32::from(self.height))
            .flat_map(move |y| (0..i32::from(self.width)).map(move |x| Position { x, y }))
    }
}

impl Default for GridModel {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH / DEFAULT_CELL_SIZE.width,
            height: DEFAULT_SURFACE_HEIGHT / DEFAULT_CELL_SIZE.height,
            cell: DEFAULT_CELL_SIZE,
        }
    }
}

/// Colours for every painted element.
#[derive(Debug)]
pub struct Theme {
    pub background: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    pub overlay: Color,
    pub text: Color,
    pub hud_label: Color,
    pub hud_value: Color,
}

pub const THEME_CLASSIC: Theme = Theme {
    background: Color::Rgb(0x22, 0x22, 0x22),
    snake_head: Color::Rgb(0x4c, 0xaf, 0x50),
    snake_body: Color::Rgb(0x8b, 0xc3, 0x4a),
    food: Color::Rgb(0xff, 0x52, 0x52),
    overlay: Color::Rgb(0x08, 0x08, 0x08),
    text: Color::White,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
};
