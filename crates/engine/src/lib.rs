//! Real-time game engine.
//!
//! Every moving thing on screen is an actor: a tokio task that draws into the
//! round's [`Playfield`] and sleeps between frames. Actors coordinate only
//! through the playfield's lock, its round flags and two one-slot signals:
//!
//! - **hit**: a player missile stopped against something, with the cell it hit
//! - **critical**: the round is lost
//!
//! # Module Structure
//!
//! - [`playfield`]: the locked screen, round flags and signals
//! - [`signal`]: one-slot signals and the missile rendezvous
//! - [`actors`]: supervised actor set of one round
//! - [`sprite`], [`missile`], [`enemy_missile`], [`wave`], [`boss`], [`deploy`]: the actors
//! - [`round`]: round controller and the game loop
//! - [`restart`]: restart strategies
//! - [`config`]: environment configuration

pub mod actors;
pub mod boss;
pub mod config;
pub mod deploy;
pub mod enemy_missile;
pub mod error;
pub mod missile;
pub mod playfield;
pub mod restart;
pub mod round;
pub mod signal;
pub mod sprite;
pub mod wave;

pub use actors::{Actors, Fault};
pub use config::{GameConfig, RestartMode};
pub use error::EngineError;
pub use playfield::{Frame, Playfield};
pub use restart::{InProcessRestart, Restarter};
pub use round::{Game, Round, RoundEnd};
pub use signal::{Critical, Hit, Rendezvous, Signal, Ticket};
