//! A player's run: rounds, matchups, adjustments, and the final record.

use crate::core::constants::{
    MATCHUP_MAX_COUNT, MATCHUP_MIN_COUNT, TEAM_MAX_COUNT, TEAM_MIN_COUNT,
};
use crate::engine::{Team, TeamMember};
use crate::leaderboard::RunRecord;
use crate::outcome::{self, BattleOutcome};
use crate::species::{self, Species};
use chrono::{DateTime, Utc};
use rand::Rng;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamPick {
    pub species: &'static Species,
    pub count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Matchup {
    pub team_a: TeamPick,
    pub team_b: TeamPick,
}

impl Matchup {
    /// Two distinct species with 3-8 combatants each.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let (a, b) = species::random_pair(rng);
        Self {
            team_a: TeamPick {
                species: a,
                count: rng.gen_range(MATCHUP_MIN_COUNT..=MATCHUP_MAX_COUNT),
            },
            team_b: TeamPick {
                species: b,
                count: rng.gen_range(MATCHUP_MIN_COUNT..=MATCHUP_MAX_COUNT),
            },
        }
    }

    pub fn pick(&self, team: Team) -> &TeamPick {
        match team {
            Team::A => &self.team_a,
            Team::B => &self.team_b,
        }
    }

    fn pick_mut(&mut self, team: Team) -> &mut TeamPick {
        match team {
            Team::A => &mut self.team_a,
            Team::B => &mut self.team_b,
        }
    }

    pub fn members(&self, team: Team) -> Vec<TeamMember> {
        let pick = self.pick(team);
        TeamMember::squad(pick.species.id, pick.count)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdjustError {
    #[error("all {max} adjustments already spent this round")]
    Exhausted { max: u32 },
    #[error("team size must stay within {min}..={max}")]
    OutOfRange { min: u32, max: u32 },
}

/// What recording a battle did to the run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunProgress {
    /// The next round is ready.
    Advanced { outcome: BattleOutcome, round: u32 },
    /// A blowout ended the run.
    Ended { outcome: BattleOutcome },
}

#[derive(Debug, Clone)]
pub struct GameRun {
    pub run_id: Uuid,
    pub seed: u64,
    pub started_at: DateTime<Utc>,
    pub round: u32,
    pub score: u64,
    pub total_trophies: u32,
    pub matchup: Matchup,
    pub adjustments_used: u32,
    pub active: bool,
}

impl GameRun {
    pub fn new<R: Rng>(seed: u64, rng: &mut R) -> Self {
        let run = Self {
            run_id: Uuid::new_v4(),
            seed,
            started_at: Utc::now(),
            round: 1,
            score: 0,
            total_trophies: 0,
            matchup: Matchup::random(rng),
            adjustments_used: 0,
            active: true,
        };
        info!(run_id = %run.run_id, seed, "run started");
        run
    }

    pub fn max_adjustments(&self) -> u32 {
        outcome::max_adjustments(self.total_trophies)
    }

    pub fn adjustments_remaining(&self) -> u32 {
        self.max_adjustments().saturating_sub(self.adjustments_used)
    }

    /// Adds (`grow`) or removes one combatant from `team`. Returns the new
    /// team size.
    pub fn adjust(&mut self, team: Team, grow: bool) -> Result<u32, AdjustError> {
        let max = self.max_adjustments();
        if self.adjustments_used >= max {
            return Err(AdjustError::Exhausted { max });
        }
        let pick = self.matchup.pick_mut(team);
        let next = if grow {
            pick.count + 1
        } else {
            pick.count.saturating_sub(1)
        };
        if !(TEAM_MIN_COUNT..=TEAM_MAX_COUNT).contains(&next) || next == pick.count {
            return Err(AdjustError::OutOfRange {
                min: TEAM_MIN_COUNT,
                max: TEAM_MAX_COUNT,
            });
        }
        pick.count = next;
        self.adjustments_used += 1;
        Ok(next)
    }

    /// Engine seed for the current round's battle.
    pub fn battle_seed(&self) -> u64 {
        self.seed.wrapping_add(u64::from(self.round))
    }

    /// Applies a battle result: trophies and score always count, then the
    /// run either ends (blowout) or moves to a fresh matchup.
    pub fn record_outcome<R: Rng>(&mut self, outcome: BattleOutcome, rng: &mut R) -> RunProgress {
        self.total_trophies += outcome.tier.trophies();
        self.score += outcome.score;
        if outcome.is_blowout {
            self.active = false;
            info!(
                round = self.round,
                trophies = self.total_trophies,
                "run ended by blowout"
            );
            return RunProgress::Ended { outcome };
        }
        self.round += 1;
        self.adjustments_used = 0;
        self.matchup = Matchup::random(rng);
        RunProgress::Advanced {
            outcome,
            round: self.round,
        }
    }

    pub fn to_record(&self) -> RunRecord {
        RunRecord {
            run_id: self.run_id,
            timestamp: self.started_at,
            total_trophies: self.total_trophies,
            round_reached: self.round,
            seed: self.seed,
        }
    }
}
