//! Descent tracks: how a wave unit or the boss ends its way down.
//!
//! Rows here are always the *next* draw row of the actor, the value its driver
//! carries between steps.

use crate::geometry::Geometry;

/// How a descending actor left the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescentEnd {
    /// Destroyed above the safety threshold: points are awarded.
    Destroyed,
    /// Destroyed too close to the ship: the round is lost.
    NearMiss,
    /// Reached the floor undestroyed: the round is lost.
    Breach,
}

/// Classify the end of a wave unit's descent.
pub fn resolve_unit(geometry: &Geometry, next_row: u16, destroyed: bool) -> DescentEnd {
    if !destroyed {
        DescentEnd::Breach
    } else if next_row < geometry.wave_safety_row() {
        DescentEnd::Destroyed
    } else {
        DescentEnd::NearMiss
    }
}

/// Classify the end of the boss' descent.
pub fn resolve_boss(geometry: &Geometry, next_row: u16, halted: bool) -> DescentEnd {
    if !halted {
        DescentEnd::Breach
    } else if next_row < geometry.boss_safety_row() {
        DescentEnd::Destroyed
    } else {
        DescentEnd::NearMiss
    }
}

/// Damage model of the boss.
#[derive(Debug, Clone)]
pub struct BossTrack {
    damage: u32,
    threshold: u32,
    low_row: u16,
    floor_row: u16,
}

impl BossTrack {
    pub fn new(geometry: &Geometry, threshold: u32) -> Self {
        Self {
            damage: 0,
            threshold: threshold.max(1),
            low_row: geometry.boss_low_row(),
            floor_row: geometry.boss_floor_row(),
        }
    }

    pub fn damage(&self) -> u32 {
        self.damage
    }

    /// Account one descent step. Returns `true` when the descent halts at `next_row`.
    ///
    /// Damage grows by at most one per step. A graze halts the descent once the
    /// threshold is reached, or immediately when the boss is already low.
    pub fn step(&mut self, next_row: u16, grazed: bool) -> bool {
        if !grazed {
            return false;
        }
        self.damage += 1;
        self.damage >= self.threshold || next_row >= self.low_row
    }

    pub fn at_floor(&self, next_row: u16) -> bool {
        next_row >= self.floor_row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> Geometry {
        Geometry::new(40, 100).unwrap()
    }

    /// Run a boss descent where `grazed(row)` tells whether that step was grazed.
    fn descend(track: &mut BossTrack, mut grazed: impl FnMut(u16) -> bool) -> (u16, bool) {
        let mut next = 1;
        loop {
            if track.step(next, grazed(next)) {
                return (next, true);
            }
            next += 1;
            if track.at_floor(next) {
                return (next, false);
            }
        }
    }

    #[test]
    fn boss_halts_early_when_threshold_reached() {
        let g = geometry();
        let mut track = BossTrack::new(&g, 3);
        let (row, halted) = descend(&mut track, |row| row >= 5);
        assert!(halted);
        assert_eq!(row, 7);
        assert!(row < g.boss_floor_row());
        assert_eq!(resolve_boss(&g, row, halted), DescentEnd::Destroyed);
    }

    #[test]
    fn boss_breaches_at_floor_without_grazes() {
        let g = geometry();
        let mut track = BossTrack::new(&g, 3);
        let (row, halted) = descend(&mut track, |_| false);
        assert!(!halted);
        assert_eq!(row, g.boss_floor_row());
        assert_eq!(resolve_boss(&g, row, halted), DescentEnd::Breach);
    }

    #[test]
    fn single_low_graze_is_a_near_miss() {
        let g = geometry();
        let mut track = BossTrack::new(&g, 12);
        let low = g.boss_low_row();
        let (row, halted) = descend(&mut track, |row| row == low);
        assert!(halted);
        assert_eq!(row, low);
        assert_eq!(track.damage(), 1);
        assert_eq!(resolve_boss(&g, row, halted), DescentEnd::NearMiss);
    }

    #[test]
    fn unit_resolution_by_row() {
        let g = geometry();
        let safety = g.wave_safety_row();
        assert_eq!(resolve_unit(&g, safety - 1, true), DescentEnd::Destroyed);
        assert_eq!(resolve_unit(&g, safety, true), DescentEnd::NearMiss);
        assert_eq!(resolve_unit(&g, g.breach_row(), false), DescentEnd::Breach);
    }
}
