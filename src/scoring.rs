//! Point and level rules for the clicker mini-game.

use std::collections::VecDeque;

pub const SQUISHY_CLICKER: &str = "squishy-clicker";
pub const ROUND_SECONDS: i32 = 30;
/// Every click's combo contribution expires after this delay.
pub const COMBO_DECAY_MS: u64 = 1000;
pub const POINTS_PER_LEVEL: i32 = 500;

/// Level reached with `total_points`: 0..=499 is level 1, 500..=999 level 2, ...
pub fn level_for_points(total_points: i32) -> i32 {
    total_points.max(0) / POINTS_PER_LEVEL + 1
}

/// Score awarded for one click at the given combo.
pub fn click_value(combo: u32) -> u32 {
    1 + combo / 5
}

/// Points credited for a finished round.
pub fn points_for_round(final_score: u32, max_combo: u32) -> u32 {
    final_score / 10 + max_combo / 5
}

/// Upper bound on the points a round with `score` can legitimately earn:
/// max combo never exceeds the click count, which never exceeds the score.
pub fn max_points_for_score(score: i32) -> i32 {
    let score = score.max(0);
    score / 10 + score / 5
}

/// Replays a round click by click with per-click combo decay.
#[derive(Debug, Default)]
pub struct ComboRound {
    score: u32,
    combo: u32,
    max_combo: u32,
    pending_decays: VecDeque<u64>,
}

impl ComboRound {
    pub fn new() -> Self {
        Self::default()
    }

    fn settle(&mut self, now_ms: u64) {
        while let Some(&due) = self.pending_decays.front() {
            if due > now_ms {
                break;
            }
            self.pending_decays.pop_front();
            self.combo = self.combo.saturating_sub(1);
        }
    }

    /// Register a click at `at_ms` (monotonic) and return the score it added.
    pub fn click(&mut self, at_ms: u64) -> u32 {
        self.settle(at_ms);
        let gained = click_value(self.combo);
        self.score += gained;
        self.combo += 1;
        self.max_combo = self.max_combo.max(self.combo);
        self.pending_decays.push_back(at_ms + COMBO_DECAY_MS);
        gained
    }

    pub fn combo_at(&mut self, now_ms: u64) -> u32 {
        self.settle(now_ms);
        self.combo
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_combo(&self) -> u32 {
        self.max_combo
    }

    pub fn points_earned(&self) -> u32 {
        points_for_round(self.score, self.max_combo)
    }
}

/// In-memory view of a profile's counters, used to reason about a score
/// submission before it is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileTally {
    pub total_points: i32,
    pub level: i32,
    pub games_played: i32,
    pub high_score: i32,
}

impl Default for ProfileTally {
    fn default() -> Self {
        Self {
            total_points: 0,
            level: 1,
            games_played: 0,
            high_score: 0,
        }
    }
}

impl ProfileTally {
    /// Counters after one more game. Level never goes down.
    pub fn apply(self, score: i32, points_earned: i32) -> Self {
        let total_points = self.total_points.saturating_add(points_earned.max(0));
        Self {
            total_points,
            level: self.level.max(level_for_points(total_points)),
            games_played: self.games_played.saturating_add(1),
            high_score: self.high_score.max(score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_thresholds() {
        assert_eq!(level_for_points(0), 1);
        assert_eq!(level_for_points(499), 1);
        assert_eq!(level_for_points(500), 2);
        assert_eq!(level_for_points(1499), 3);
    }

    #[test]
    fn test_level_scenario_200_200_150() {
        let first = ProfileTally::default().apply(1000, 200);
        assert_eq!((first.total_points, first.level), (200, 1));
        let second = first.apply(800, 200);
        assert_eq!((second.total_points, second.level), (400, 1));
        let third = second.apply(900, 150);
        assert_eq!((third.total_points, third.level), (550, 2));
        assert_eq!(third.games_played, 3);
        assert_eq!(third.high_score, 1000);
    }

    #[test]
    fn test_apply_is_monotonic() {
        let start = ProfileTally {
            total_points: 120,
            level: 4,
            games_played: 9,
            high_score: 300,
        };
        let next = start.apply(10, 0);
        assert_eq!(next.level, 4);
        assert_eq!(next.high_score, 300);
        assert_eq!(next.total_points, 120);
        assert_eq!(next.games_played, 10);
    }

    #[test]
    fn test_rapid_clicks_build_combo() {
        let mut round = ComboRound::new();
        // ten clicks 50ms apart, none decays in between
        let gains: Vec<u32> = (0..10).map(|i| round.click(i * 50)).collect();
        assert_eq!(gains, vec![1, 1, 1, 1, 1, 2, 2, 2, 2, 2]);
        assert_eq!(round.score(), 15);
        assert_eq!(round.max_combo(), 10);
        assert_eq!(round.points_earned(), 1 + 2);
    }

    #[test]
    fn test_combo_decays_per_click() {
        let mut round = ComboRound::new();
        round.click(0);
        round.click(500);
        assert_eq!(round.combo_at(999), 2);
        assert_eq!(round.combo_at(1000), 1);
        assert_eq!(round.combo_at(1500), 0);
        // floor at zero
        assert_eq!(round.combo_at(5000), 0);
    }

    #[test]
    fn test_round_points_within_plausibility_bound() {
        let mut round = ComboRound::new();
        for i in 0..200 {
            round.click(i * 40);
        }
        let score = round.score() as i32;
        assert!(round.points_earned() as i32 <= max_points_for_score(score));
    }
}
