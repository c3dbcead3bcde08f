//! Game configuration, read from the environment.

use std::env;
use std::time::Duration;

use tty_invaders_types::{STD_BOSS_DAMAGE, STD_ENEMY_GROUP};

/// How a round restart is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartMode {
    /// Rebuild every entity inside the running process.
    InProcess,
    /// Restore the terminal and replace the process image.
    Exec,
}

impl RestartMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "in-process" | "inprocess" | "internal" => Some(RestartMode::InProcess),
            "exec" | "reexec" => Some(RestartMode::Exec),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Units per wave.
    pub enemy_group: usize,
    /// Grazes needed to bring the boss down.
    pub boss_damage: u32,
    /// Percentage applied to every frame delay (100 = base tempo).
    pub tempo_percent: u32,
    /// Fixed RNG seed; entropy when `None`.
    pub seed: Option<u64>,
    pub restart: RestartMode,
    pub log_path: Option<String>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enemy_group: STD_ENEMY_GROUP,
            boss_damage: STD_BOSS_DAMAGE,
            tempo_percent: 100,
            seed: None,
            restart: RestartMode::InProcess,
            log_path: None,
        }
    }
}

impl GameConfig {
    /// Create from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let enemy_group = env::var("TTY_INVADERS_GROUP")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &usize| n > 0)
            .unwrap_or(defaults.enemy_group);

        let boss_damage = env::var("TTY_INVADERS_BOSS_DAMAGE")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(defaults.boss_damage);

        let tempo_percent = env::var("TTY_INVADERS_TEMPO")
            .ok()
            .and_then(|s| s.parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(defaults.tempo_percent);

        let seed = env::var("TTY_INVADERS_SEED")
            .ok()
            .and_then(|s| s.parse().ok());

        let restart = env::var("TTY_INVADERS_RESTART")
            .ok()
            .and_then(|s| RestartMode::parse(&s))
            .unwrap_or(defaults.restart);

        let log_path = env::var("TTY_INVADERS_LOG")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(s) });

        Self {
            enemy_group,
            boss_damage,
            tempo_percent,
            seed,
            restart,
            log_path,
        }
    }

    /// A frame delay of `ms` at the configured tempo.
    pub fn delay(&self, ms: u32) -> Duration {
        Duration::from_millis(ms as u64 * self.tempo_percent as u64 / 100)
    }
}
