//! Terminal geometry and the layout derived from it.
//!
//! A [`Geometry`] can only be built for a terminal that meets the minimum size,
//! so every row/column accessor below is free of underflow.

use thiserror::Error;

use crate::types::{
    BOSS_ROWS, COL_START_LIMIT, EXIT_DIMS, INFO_OFFST, MIN_COLS, MIN_ROWS, MIN_SPRITE_COL,
    ROW_LOW_LIMIT, ROW_START_LIMIT, SPRITE_BEGIN, SPRITE_COLS_GAP, SPRITE_END,
};

/// Geometry validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error(
        "terminal size {rows}x{cols} too small: please increase the window dimensions (minimum {}x{})",
        MIN_ROWS,
        MIN_COLS
    )]
    Undersized { rows: u16, cols: u16 },
}

impl GeometryError {
    pub fn exit_code(&self) -> i32 {
        match self {
            GeometryError::Undersized { .. } => EXIT_DIMS,
        }
    }
}

/// Validated terminal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    rows: u16,
    cols: u16,
}

impl Geometry {
    pub fn new(rows: u16, cols: u16) -> Result<Self, GeometryError> {
        if rows < MIN_ROWS || cols < MIN_COLS {
            return Err(GeometryError::Undersized { rows, cols });
        }
        Ok(Self { rows, cols })
    }

    pub fn rows(&self) -> u16 {
        self.rows
    }

    pub fn cols(&self) -> u16 {
        self.cols
    }

    pub fn center_row(&self) -> u16 {
        self.rows / 2
    }

    pub fn center_col(&self) -> u16 {
        self.cols / 2
    }

    /// Row of the bottom status line.
    pub fn status_row(&self) -> u16 {
        self.rows - 1
    }

    // Ship.

    pub fn sprite_top(&self) -> u16 {
        self.rows - SPRITE_BEGIN
    }

    pub fn sprite_min_col(&self) -> u16 {
        MIN_SPRITE_COL
    }

    pub fn sprite_max_col(&self) -> u16 {
        self.cols - SPRITE_COLS_GAP
    }

    pub fn sprite_start_col(&self) -> u16 {
        self.center_col()
    }

    // Player missile.

    pub fn missile_col(&self, sprite_col: u16) -> u16 {
        sprite_col + COL_START_LIMIT
    }

    pub fn missile_launch_row(&self) -> u16 {
        self.rows - ROW_LOW_LIMIT
    }

    /// Above this row the missile drags its flickering trail.
    pub fn missile_trail_row(&self) -> u16 {
        self.rows - ROW_START_LIMIT
    }

    /// Rows at or below this belong to the ship and are never erased by a missile.
    pub fn missile_safe_row(&self) -> u16 {
        self.rows - SPRITE_BEGIN
    }

    // Wave.

    /// A unit whose next row reaches this has breached the defence.
    pub fn breach_row(&self) -> u16 {
        self.rows - SPRITE_END
    }

    /// Units destroyed with their next row above this score.
    pub fn wave_safety_row(&self) -> u16 {
        self.rows - SPRITE_BEGIN - INFO_OFFST
    }

    // Enemy missile.

    pub fn enemy_missile_stop_row(&self) -> u16 {
        self.rows - SPRITE_END
    }

    /// First row of the band in which an enemy missile drains the shield.
    pub fn shield_band_top(&self) -> u16 {
        self.rows - SPRITE_BEGIN - 1
    }

    // Boss.

    pub fn boss_floor_row(&self) -> u16 {
        self.rows - ROW_LOW_LIMIT
    }

    /// A graze at or below this row ends the boss descent.
    pub fn boss_low_row(&self) -> u16 {
        self.rows - SPRITE_COLS_GAP
    }

    /// Bosses destroyed above this row score.
    pub fn boss_safety_row(&self) -> u16 {
        self.rows - SPRITE_BEGIN - BOSS_ROWS
    }

    // HUD.

    pub fn status_col(&self) -> u16 {
        self.cols - 26
    }

    pub fn shield_col(&self) -> u16 {
        self.cols - 18
    }

    pub fn score_col(&self) -> u16 {
        self.cols - 9
    }

    pub fn box_row(&self) -> u16 {
        self.center_row()
    }

    pub fn box_col(&self) -> u16 {
        self.center_col() - 9
    }
}

/// Rectangle of buffer cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub col: u16,
    pub row: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(col: u16, row: u16, width: u16, height: u16) -> Self {
        Self {
            col,
            row,
            width,
            height,
        }
    }

    pub fn contains(&self, row: u16, col: u16) -> bool {
        row >= self.row
            && row < self.row.saturating_add(self.height)
            && col >= self.col
            && col < self.col.saturating_add(self.width)
    }
}
