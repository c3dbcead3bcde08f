//! Round state: score, shield and the kill counter that drives shield bonuses.
//!
//! Owned by the round controller and kept under the same lock as the frame
//! buffer; this type only enforces the arithmetic.

use crate::types::{STD_DEST_REWARD, STD_SHIELD_EXP, STD_SHIELD_LEV};

/// Maximum number of score digits shown on the status line.
pub const MAX_SCORE_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    score: u32,
    shield: i32,
    kills: u32,
}

impl RoundState {
    pub fn new() -> Self {
        Self {
            score: 0,
            shield: STD_SHIELD_LEV,
            kills: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn shield(&self) -> i32 {
        self.shield
    }

    pub fn kills(&self) -> u32 {
        self.kills
    }

    pub fn is_depleted(&self) -> bool {
        self.shield == STD_SHIELD_EXP
    }

    /// Add points; the score never decreases.
    pub fn add_score(&mut self, points: u32) -> u32 {
        self.score = self.score.saturating_add(points);
        self.score
    }

    /// Shift the shield by `delta`, clamped to `[STD_SHIELD_EXP, STD_SHIELD_LEV]`.
    pub fn change_shield(&mut self, delta: i32) -> i32 {
        self.shield = (self.shield + delta).clamp(STD_SHIELD_EXP, STD_SHIELD_LEV);
        self.shield
    }

    pub fn restore_shield(&mut self) {
        self.shield = STD_SHIELD_LEV;
    }

    /// Count a destroyed wave unit.
    ///
    /// Every [`STD_DEST_REWARD`]th kill restores one shield level if the shield
    /// is below standard. Returns whether the bonus was granted.
    pub fn register_kill(&mut self) -> bool {
        self.kills += 1;
        if self.kills % STD_DEST_REWARD == 0 && self.shield < STD_SHIELD_LEV {
            self.change_shield(1);
            return true;
        }
        false
    }

    /// Score digits, or `None` once they no longer fit the status line.
    pub fn score_text(&self) -> Option<String> {
        let s = self.score.to_string();
        (s.len() <= MAX_SCORE_LEN).then_some(s)
    }

    pub fn shield_text(&self) -> String {
        self.shield.to_string()
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shield_is_clamped_both_ways() {
        let mut r = RoundState::new();
        assert_eq!(r.change_shield(1), STD_SHIELD_LEV);
        for _ in 0..10 {
            r.change_shield(-1);
        }
        assert_eq!(r.shield(), STD_SHIELD_EXP);
        assert!(r.is_depleted());
        r.restore_shield();
        assert_eq!(r.shield(), STD_SHIELD_LEV);
    }

    #[test]
    fn shield_bonus_every_nth_kill_when_damaged() {
        let mut r = RoundState::new();
        r.change_shield(-2);
        for _ in 0..STD_DEST_REWARD - 1 {
            assert!(!r.register_kill());
        }
        assert!(r.register_kill());
        assert_eq!(r.shield(), STD_SHIELD_LEV - 1);
    }

    #[test]
    fn no_shield_bonus_when_full() {
        let mut r = RoundState::new();
        for _ in 0..STD_DEST_REWARD {
            assert!(!r.register_kill());
        }
        assert_eq!(r.shield(), STD_SHIELD_LEV);
        assert_eq!(r.kills(), STD_DEST_REWARD);
    }

    #[test]
    fn score_is_monotonic_and_capped_in_display() {
        let mut r = RoundState::new();
        assert_eq!(r.add_score(10), 10);
        assert_eq!(r.add_score(0), 10);
        assert_eq!(r.score_text().as_deref(), Some("10"));
        r.add_score(99_999_990);
        assert_eq!(r.score(), 100_000_000);
        assert_eq!(r.score_text(), None);
        r.add_score(u32::MAX);
        assert_eq!(r.score(), u32::MAX);
    }
}
