//! Battle outcome scoring: trophy tiers, blowouts, and adjustment unlocks.
//!
//! Pure functions of the survivor ratio; no engine or UI state.

use crate::core::constants::{
    ADJUSTMENT_UNLOCKS, BASE_MAX_ADJUSTMENTS, SCORE_BASE, SCORE_ROUND_STEP_PERCENT, TIER_1_MAX_RATIO,
    TIER_2_MAX_RATIO, TIER_3_MAX_RATIO,
};

/// 0-3 trophies. Closer battles earn more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TrophyTier {
    None,
    Bronze,
    Silver,
    Gold,
}

impl TrophyTier {
    pub fn trophies(self) -> u32 {
        match self {
            TrophyTier::None => 0,
            TrophyTier::Bronze => 1,
            TrophyTier::Silver => 2,
            TrophyTier::Gold => 3,
        }
    }

    /// Score multiplier in halves: Gold is 3x, Bronze 1.5x.
    pub fn multiplier_halves(self) -> u64 {
        match self {
            TrophyTier::Gold => 6,
            TrophyTier::Silver => 4,
            TrophyTier::Bronze => 3,
            TrophyTier::None => 0,
        }
    }

    pub fn for_ratio(ratio: f64) -> TrophyTier {
        if ratio <= TIER_3_MAX_RATIO {
            TrophyTier::Gold
        } else if ratio <= TIER_2_MAX_RATIO {
            TrophyTier::Silver
        } else if ratio <= TIER_1_MAX_RATIO {
            TrophyTier::Bronze
        } else {
            TrophyTier::None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattleOutcome {
    pub tier: TrophyTier,
    pub is_blowout: bool,
    pub score: u64,
    pub survivor_ratio: f64,
}

/// Survivors over starting count; an empty start counts as zero.
pub fn survivor_ratio(survivors: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        survivors as f64 / total as f64
    }
}

/// `base * (1 + 0.15 * (round - 1)) * multiplier`, truncated. Integer math
/// keeps whole results whole.
pub fn score(round: u32, tier: TrophyTier) -> u64 {
    let round_percent = 100 + SCORE_ROUND_STEP_PERCENT * u64::from(round.saturating_sub(1));
    SCORE_BASE * round_percent * tier.multiplier_halves() / 200
}

pub fn resolve(survivors: u32, total: u32, round: u32) -> BattleOutcome {
    let ratio = survivor_ratio(survivors, total);
    let tier = TrophyTier::for_ratio(ratio);
    BattleOutcome {
        tier,
        is_blowout: tier == TrophyTier::None,
        score: score(round, tier),
        survivor_ratio: ratio,
    }
}

/// Pre-battle adjustment allowance for a cumulative trophy count.
pub fn max_adjustments(total_trophies: u32) -> u32 {
    ADJUSTMENT_UNLOCKS
        .iter()
        .find(|(threshold, _)| total_trophies >= *threshold)
        .map(|(_, max)| *max)
        .unwrap_or(BASE_MAX_ADJUSTMENTS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wipeout_is_gold() {
        let outcome = resolve(0, 10, 1);
        assert_eq!(outcome.tier.trophies(), 3);
        assert!(!outcome.is_blowout);
        assert_eq!(outcome.score, 150);
    }

    #[test]
    fn test_majority_survivors_is_blowout() {
        let outcome = resolve(6, 10, 1);
        assert_eq!(outcome.tier.trophies(), 0);
        assert!(outcome.is_blowout);
        assert_eq!(outcome.score, 0);
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(resolve(1, 10, 1).tier, TrophyTier::Gold);
        assert_eq!(resolve(2, 10, 1).tier, TrophyTier::Silver);
        assert_eq!(resolve(1, 4, 1).tier, TrophyTier::Silver);
        assert_eq!(resolve(5, 10, 1).tier, TrophyTier::Bronze);
        assert!(!resolve(5, 10, 1).is_blowout);
        assert!(resolve(51, 100, 1).is_blowout);
    }

    #[test]
    fn test_zero_start_counts_as_zero_ratio() {
        let outcome = resolve(0, 0, 1);
        assert_eq!(outcome.tier, TrophyTier::Gold);
        assert_eq!(outcome.survivor_ratio, 0.0);
    }

    #[test]
    fn test_score_grows_with_round() {
        assert_eq!(score(1, TrophyTier::Bronze), 75);
        // 50 * 1.3 * 2.0
        assert_eq!(score(3, TrophyTier::Silver), 130);
        assert!(score(10, TrophyTier::Gold) > score(9, TrophyTier::Gold));
    }

    #[test]
    fn test_whole_scores_stay_whole() {
        assert_eq!(score(2, TrophyTier::Silver), 115);
        assert_eq!(score(25, TrophyTier::Gold), 690);
        assert_eq!(resolve(2, 10, 2).score, 115);
        // 50 * 1.15 * 1.5 = 86.25
        assert_eq!(score(2, TrophyTier::Bronze), 86);
        assert_eq!(score(40, TrophyTier::None), 0);
    }

    #[test]
    fn test_adjustment_unlocks() {
        assert_eq!(max_adjustments(0), 2);
        assert_eq!(max_adjustments(5), 2);
        assert_eq!(max_adjustments(6), 3);
        assert_eq!(max_adjustments(12), 4);
        assert_eq!(max_adjustments(19), 4);
        assert_eq!(max_adjustments(20), 5);
        assert_eq!(max_adjustments(30), 6);
        assert_eq!(max_adjustments(300), 6);
    }
}
