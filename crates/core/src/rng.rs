//! RNG module - spawn columns and firing rows
//!
//! One generator per round, seeded once. A fixed seed reproduces the same
//! sequence of spawn columns and firing rows, which keeps actor tests stable.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geometry::Geometry;
use crate::types::{RND_COL_ADJ, RND_CORR, RND_ENEM_ADJ, RND_ENEM_ADJ_SC, RND_ROW_ADJ};

#[derive(Debug, Clone)]
pub struct SpawnRng {
    rng: StdRng,
}

impl SpawnRng {
    /// Seeded generator, or one seeded from OS entropy when `seed` is `None`.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// Leftmost column of a newly spawned wave unit or boss.
    pub fn spawn_col(&mut self, geometry: &Geometry) -> u16 {
        RND_CORR + self.rng.gen_range(0..geometry.cols() - RND_COL_ADJ)
    }

    /// The two descent rows at which a wave unit fires.
    pub fn unit_fire_rows(&mut self, geometry: &Geometry) -> [u16; 2] {
        self.fire_rows(geometry.rows() - RND_ENEM_ADJ)
    }

    /// The two descent rows at which the boss fires.
    pub fn boss_fire_rows(&mut self, geometry: &Geometry) -> [u16; 2] {
        self.fire_rows(geometry.rows() - RND_ROW_ADJ)
    }

    fn fire_rows(&mut self, band: u16) -> [u16; 2] {
        let first = self.rng.gen_range(0..band);
        [first, first + RND_ENEM_ADJ_SC]
    }
}
