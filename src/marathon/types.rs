//! Marathon world entities.

use crate::engine::{ActorId, Team};
use crate::palette::NamedColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombatantState {
    Alive,
    Dying,
}

/// Glyph shown before the first decay step.
const FRESH_CORPSE_GLYPH: char = '%';

/// Decay stage for a death phase: glyph and opacity, or `None` once the
/// remains should be removed.
pub fn death_stage(phase: u32) -> Option<(char, f64)> {
    match phase {
        0 => Some((FRESH_CORPSE_GLYPH, 1.0)),
        // Corpse
        1..=2 => Some(('%', 0.8)),
        // Bones
        3..=4 => Some((';', 0.6)),
        // Crumble
        5..=6 => Some((',', 0.4)),
        _ => None,
    }
}

/// A combatant as the backdrop shows it.
///
/// `generation` tells engine instances apart: every new engine numbers its
/// actors from scratch, and dying combatants from the previous engine may
/// still be on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct MarathonCombatant {
    pub id: ActorId,
    pub generation: u32,
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub color: NamedColor,
    pub team: Team,
    pub state: CombatantState,
    pub death_phase: u32,
    pub opacity: f64,
}

impl MarathonCombatant {
    pub fn new(
        id: ActorId,
        generation: u32,
        x: i32,
        y: i32,
        glyph: char,
        color: NamedColor,
        team: Team,
    ) -> Self {
        Self {
            id,
            generation,
            x,
            y,
            glyph,
            color,
            team,
            state: CombatantState::Alive,
            death_phase: 0,
            opacity: 1.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state == CombatantState::Alive
    }

    pub fn begin_dying(&mut self) {
        self.state = CombatantState::Dying;
        self.death_phase = 0;
    }

    /// Moves one decay step. Returns `false` when the remains are spent and
    /// the combatant should be removed.
    pub fn advance_death(&mut self) -> bool {
        self.death_phase += 1;
        match death_stage(self.death_phase) {
            Some((_, opacity)) => {
                self.opacity = opacity;
                true
            }
            None => false,
        }
    }

    pub fn display_glyph(&self) -> char {
        match self.state {
            CombatantState::Alive => self.glyph,
            CombatantState::Dying => death_stage(self.death_phase)
                .map_or(FRESH_CORPSE_GLYPH, |(glyph, _)| glyph),
        }
    }

    pub fn display_color(&self) -> NamedColor {
        match self.state {
            CombatantState::Alive => self.color,
            CombatantState::Dying => NamedColor::DarkGray,
        }
    }
}

/// Ground litter: gibs and decay remains.
#[derive(Debug, Clone, PartialEq)]
pub struct MarathonDebris {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub color: NamedColor,
    pub opacity: f64,
    pub age: u32,
}

/// Short-lived particle such as a blood splat.
#[derive(Debug, Clone, PartialEq)]
pub struct MarathonVfx {
    pub x: i32,
    pub y: i32,
    pub glyph: char,
    pub color: NamedColor,
    pub opacity: f64,
    pub age: u32,
    pub lifetime: u32,
}

impl MarathonVfx {
    /// Ages one tick and fades linearly. Returns `false` once spent.
    pub fn age_one(&mut self) -> bool {
        self.age += 1;
        let progress = f64::from(self.age) / f64::from(self.lifetime.max(1));
        self.opacity = (1.0 - progress).max(0.0);
        self.age < self.lifetime
    }
}

/// What one marathon tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarathonTick {
    /// Not running.
    Stopped,
    /// The engine advanced; `deaths` combatants fell this tick.
    Fought { deaths: usize },
    /// The battle is over but the reinforcement cooldown is still counting.
    Waiting,
    /// The wiped team was replaced with fresh challengers.
    Reinforced { team: Team },
    /// Both sides are gone; new species on both sides.
    FreshStart,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn combatant() -> MarathonCombatant {
        MarathonCombatant::new(1, 0, 3, 2, 'w', NamedColor::LightGray, Team::A)
    }

    #[test]
    fn test_death_stages() {
        assert_eq!(death_stage(1), Some(('%', 0.8)));
        assert_eq!(death_stage(2), Some(('%', 0.8)));
        assert_eq!(death_stage(3), Some((';', 0.6)));
        assert_eq!(death_stage(6), Some((',', 0.4)));
        assert_eq!(death_stage(7), None);
    }

    #[test]
    fn test_decay_runs_seven_steps() {
        let mut c = combatant();
        c.begin_dying();
        let mut steps = 0;
        while c.advance_death() {
            steps += 1;
        }
        assert_eq!(steps + 1, 7);
    }

    #[test]
    fn test_display_follows_state() {
        let mut c = combatant();
        assert_eq!(c.display_glyph(), 'w');
        assert_eq!(c.display_color(), NamedColor::LightGray);
        c.begin_dying();
        assert_eq!(c.display_glyph(), '%');
        assert_eq!(c.display_color(), NamedColor::DarkGray);
        for _ in 0..3 {
            c.advance_death();
        }
        assert_eq!(c.display_glyph(), ';');
        assert!((c.opacity - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_vfx_fades_then_expires() {
        let mut vfx = MarathonVfx {
            x: 0,
            y: 0,
            glyph: '*',
            color: NamedColor::LightRed,
            opacity: 1.0,
            age: 0,
            lifetime: 4,
        };
        assert!(vfx.age_one());
        assert!((vfx.opacity - 0.75).abs() < 1e-9);
        assert!(vfx.age_one());
        assert!(vfx.age_one());
        assert!(!vfx.age_one());
        assert_eq!(vfx.opacity, 0.0);
    }
}
