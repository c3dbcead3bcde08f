//! Core game logic module - pure, deterministic, and testable
//!
//! This crate holds the rules of the game that do not depend on time, threads
//! or the terminal. The real-time engine drives actors against a shared frame
//! buffer; every decision those actors make about *where* things are and *what*
//! a descent step means is taken here:
//!
//! - **Deterministic**: a seeded [`SpawnRng`] reproduces the same waves
//! - **Testable**: round state and descent tracks are plain values
//! - **Portable**: no I/O, no locks, no async
//!
//! # Module Structure
//!
//! - [`geometry`]: validated terminal size and every derived row/column
//! - [`bitmaps`]: immutable sprite bitmaps and their destruction frames
//! - [`round`]: score, shield and kill counter of one round
//! - [`descent`]: how a wave unit or the boss ends its descent
//! - [`hud`]: status line and message box text
//! - [`rng`]: spawn column and firing row selection
//!
//! # Example
//!
//! ```
//! use tty_invaders_core::{Geometry, RoundState};
//!
//! let geometry = Geometry::new(40, 100).unwrap();
//! assert_eq!(geometry.sprite_top(), 33);
//!
//! let mut round = RoundState::new();
//! round.add_score(10);
//! assert_eq!(round.change_shield(-1), 2);
//! assert_eq!(round.score(), 10);
//! ```

pub mod bitmaps;
pub mod descent;
pub mod geometry;
pub mod hud;
pub mod rng;
pub mod round;

pub use tty_invaders_types as types;

// Re-export commonly used types for convenience
pub use bitmaps::Bitmap;
pub use descent::{resolve_boss, resolve_unit, BossTrack, DescentEnd};
pub use geometry::{Geometry, GeometryError, Rect};
pub use rng::SpawnRng;
pub use round::RoundState;
