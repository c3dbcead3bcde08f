//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no external dependencies, so they can be used
//! by the pure logic crate, the terminal layer and the real-time engine alike.
//!
//! # Terminal Dimensions
//!
//! The playfield is the whole terminal. It must be at least
//! [`MIN_ROWS`] x [`MIN_COLS`]; smaller terminals are a fatal startup condition.
//!
//! # Layout Offsets
//!
//! Most positions are expressed as offsets from the bottom/right edge of the
//! terminal, so the game scales with the window:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `SPRITE_BEGIN` | 7 | Ship top row is `rows - 7` |
//! | `SPRITE_END` | 4 | Wave breach row is `rows - 4` |
//! | `SPRITE_COLS_GAP` | 15 | Ship right bound is `cols - 15` |
//! | `ROW_LOW_LIMIT` | 11 | Player missile launch row, boss floor row |
//! | `ROW_START_LIMIT` | 9 | Player missile trail starts above `rows - 9` |
//!
//! # Tempo
//!
//! Frame delays are in milliseconds. The delay after a present *is* the
//! animation speed of that step:
//!
//! | Constant | Value | Used for |
//! |----------|-------|----------|
//! | `INPUT_DELAY_MS` | 50 | Pause after every handled key |
//! | `TEMPO_A_MS` | 100 | Player missile step, destruction frames, missile burst |
//! | `TEMPO_B_MS` | 150 | Enemy missile step |
//! | `TEMPO_C_MS` | 200 | Wave/boss descent step, ship wreck frames, restart hold |
//!
//! # Examples
//!
//! ```
//! use tty_invaders_types::{Action, Direction, MIN_COLS, MIN_ROWS};
//!
//! assert_eq!(Action::from_byte(b'a'), Some(Action::Move(Direction::Left)));
//! assert_eq!(Action::from_byte(b' '), Some(Action::Fire));
//! assert_eq!(Direction::Right.step(), 1);
//!
//! assert_eq!(MIN_ROWS, 30);
//! assert_eq!(MIN_COLS, 70);
//! ```

/// Minimum terminal height in rows
pub const MIN_ROWS: u16 = 30;

/// Minimum terminal width in columns
pub const MIN_COLS: u16 = 70;

/// Ship top row offset from the bottom edge
pub const SPRITE_BEGIN: u16 = 7;

/// Breach row offset from the bottom edge
pub const SPRITE_END: u16 = 4;

/// Ship bitmap width
pub const SPRITE_COLS: u16 = 13;

/// Ship bitmap height
pub const SPRITE_ROWS: u16 = 4;

/// Right margin for the ship; also the boss "too low" offset
pub const SPRITE_COLS_GAP: u16 = 15;

/// Leftmost legal ship column
pub const MIN_SPRITE_COL: u16 = 2;

/// Wave unit bitmap width
pub const INVADER_COLS: u16 = 5;

/// Wave unit bitmap height
pub const INVADER_ROWS: u16 = 3;

/// Boss bitmap width
pub const BOSS_COLS: u16 = 8;

/// Boss bitmap height
pub const BOSS_ROWS: u16 = 8;

/// Number of frames in every destruction animation
pub const DESTR_SEQUENCE: usize = 3;

/// Columns travelled by a jump key
pub const STD_JUMP_LEN: u16 = 10;

/// Points per destroyed wave unit
pub const STD_ENEM_POINT: u32 = 10;

/// Points per destroyed boss
pub const STD_BOSS_POINTS: u32 = 100;

/// Default boss damage threshold
pub const STD_BOSS_DAMAGE: u32 = 12;

/// Standard (and maximum) shield level
pub const STD_SHIELD_LEV: i32 = 3;

/// Depleted shield level; reaching it ends the round
pub const STD_SHIELD_EXP: i32 = -1;

/// Default number of units per wave
pub const STD_ENEMY_GROUP: usize = 10;

/// Every Nth kill restores one shield level
pub const STD_DEST_REWARD: u32 = 10;

/// Player missile column offset from the ship's leftmost column
pub const COL_START_LIMIT: u16 = 6;

/// Player missile launch row offset; boss floor offset
pub const ROW_LOW_LIMIT: u16 = 11;

/// Player missile trail start offset
pub const ROW_START_LIMIT: u16 = 9;

/// Enemy missile column offset from the firing unit
pub const EN_MISS_ADJ: u16 = 2;

/// Enemy missile row offset from the firing unit
pub const INFO_OFFST: u16 = 3;

/// Enemy missile glyph sequence: head, then burst frames ending blank
pub const EN_MISS_SEQ: [char; 4] = ['D', '*', '.', ' '];

/// Player missile glyphs: head, body, and the two flickering trail glyphs
pub const PL_MISS_SEQ: [char; 4] = ['^', '╩', '.', '*'];

/// Spawn column correction (left margin of the spawn band)
pub const RND_CORR: u16 = 10;

/// Spawn column band shrink
pub const RND_COL_ADJ: u16 = 19;

/// Boss firing row band shrink
pub const RND_ROW_ADJ: u16 = 15;

/// Wave firing row band shrink
pub const RND_ENEM_ADJ: u16 = 25;

/// Gap between the first and second firing row
pub const RND_ENEM_ADJ_SC: u16 = 9;

/// Pause after every handled key (50ms)
pub const INPUT_DELAY_MS: u32 = 50;

/// Fast tempo (100ms)
pub const TEMPO_A_MS: u32 = 100;

/// Enemy missile tempo (150ms)
pub const TEMPO_B_MS: u32 = 150;

/// Descent tempo (200ms)
pub const TEMPO_C_MS: u32 = 200;

/// Blank cell glyph
pub const BLANK: char = ' ';

/// Terminal bell
pub const BELL: char = '\u{7}';

/// Normal termination
pub const EXIT_OK: i32 = 0;

/// Fault inside an actor task, or terminal query failure
pub const EXIT_RUNTIME: i32 = 1;

/// Terminal smaller than [`MIN_ROWS`] x [`MIN_COLS`]
pub const EXIT_DIMS: i32 = 2;

/// Raw mode could not be acquired
pub const EXIT_RAW_MODE: i32 = 3;

/// Horizontal direction of a ship move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Signed column delta of one step
    pub fn step(&self) -> i16 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

/// Player commands routed by the input dispatcher
///
/// One action per control byte read from the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Move the ship one column
    Move(Direction),
    /// Move the ship [`STD_JUMP_LEN`] columns
    Jump(Direction),
    /// Launch a player missile from the ship
    Fire,
    /// Restart the round, or confirm the game over box
    Reset,
    /// Leave immediately
    Quit,
}

impl Action {
    /// Map a raw control byte to an action
    ///
    /// # Examples
    ///
    /// ```
    /// use tty_invaders_types::{Action, Direction};
    ///
    /// assert_eq!(Action::from_byte(b'z'), Some(Action::Jump(Direction::Left)));
    /// assert_eq!(Action::from_byte(b'q'), Some(Action::Quit));
    /// assert_eq!(Action::from_byte(b'?'), None);
    /// ```
    pub fn from_byte(b: u8) -> Option<Self> {
        match b {
            b'a' => Some(Action::Move(Direction::Left)),
            b's' => Some(Action::Move(Direction::Right)),
            b'z' => Some(Action::Jump(Direction::Left)),
            b'x' => Some(Action::Jump(Direction::Right)),
            b' ' => Some(Action::Fire),
            b'r' => Some(Action::Reset),
            b'q' => Some(Action::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Move(Direction::Left) => "moveLeft",
            Action::Move(Direction::Right) => "moveRight",
            Action::Jump(Direction::Left) => "jumpLeft",
            Action::Jump(Direction::Right) => "jumpRight",
            Action::Fire => "fire",
            Action::Reset => "reset",
            Action::Quit => "quit",
        }
    }
}

/// OS notifications delivered to the round's event listener
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum External {
    /// User-requested termination (SIGINT)
    Interrupt,
    /// Window size changed (SIGWINCH)
    Resize,
}

/// Why a round is ending
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCause {
    /// Shield depleted, breach, or near-miss: wait for confirmation
    GameOver,
    /// Resize or user reset: proceed after a fixed delay
    Restart,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_offsets_fit_minimum_terminal() {
        // The ship at its right bound must still fit the narrowest terminal.
        assert!(MIN_COLS - SPRITE_COLS_GAP + SPRITE_COLS <= MIN_COLS);
        // Firing bands must be non-empty on the shortest terminal.
        assert!(MIN_ROWS > RND_ENEM_ADJ);
        assert!(MIN_ROWS > RND_ROW_ADJ);
        assert!(MIN_COLS > RND_COL_ADJ);
    }

    #[test]
    fn every_control_byte_maps_once() {
        let mapped: Vec<_> = (0u8..=255).filter_map(Action::from_byte).collect();
        assert_eq!(mapped.len(), 7);
        assert_eq!(Direction::Left.step(), -1);
        assert_eq!(Action::Jump(Direction::Right).as_str(), "jumpRight");
    }
}
