//! TTY Invaders (workspace facade crate).
//!
//! Re-exports the workspace crates under one name so the binary, the
//! integration tests and the benches share a single import path.

pub use tty_invaders_core as core;
pub use tty_invaders_engine as engine;
pub use tty_invaders_input as input;
pub use tty_invaders_term as term;
pub use tty_invaders_types as types;
