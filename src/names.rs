//! Descriptive combatant names ("the Scarred Chicken").
//!
//! Names are rebuilt from every snapshot because engines reuse ids. The
//! adjective is drawn from an RNG seeded by the actor id, with the pool chosen
//! by current health, so a healthy rat keeps its name until it gets hurt.

use crate::engine::{ActorId, ActorSnapshot, BattleSnapshot};
use crate::species;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;

const BADLY_HURT: [&str; 5] = ["Injured", "Maimed", "Battered", "Wounded", "Bleeding"];
const HURT: [&str; 4] = ["Scarred", "Worn", "Tired", "Weary"];
const HEALTHY: [&str; 30] = [
    "Tiny", "Small", "Little", "Large", "Big", "Huge", "Massive", "Calm", "Fierce", "Angry",
    "Frazzled", "Nervous", "Bold", "Brave", "Timid", "Old", "Young", "Fat", "Lean", "Scruffy",
    "Mangy", "Feisty", "Lazy", "Quick", "Slow", "Dark", "Pale", "Spotted", "Striped", "Mottled",
];

const NAME_SEED_FACTOR: u64 = 31_337;

fn adjective(actor: &ActorSnapshot) -> &'static str {
    let health = actor.hp as f64 / actor.max_hp.max(1) as f64;
    let pool: &[&'static str] = if health < 0.3 {
        &BADLY_HURT
    } else if health < 0.6 {
        &HURT
    } else {
        &HEALTHY
    };
    let mut rng = StdRng::seed_from_u64(u64::from(actor.id).wrapping_mul(NAME_SEED_FACTOR));
    pool.choose(&mut rng).copied().unwrap_or("Small")
}

pub fn describe(actor: &ActorSnapshot) -> String {
    format!(
        "the {} {}",
        adjective(actor),
        species::display_name(&actor.species_id)
    )
}

pub fn fallback(id: ActorId) -> String {
    format!("combatant #{}", id)
}

/// Id-to-name lookup for one tick.
#[derive(Debug, Clone, Default)]
pub struct NameBook {
    names: HashMap<ActorId, String>,
}

impl NameBook {
    pub fn from_snapshot(snapshot: Option<&BattleSnapshot>) -> Self {
        let names = snapshot
            .map(|s| s.actors().map(|a| (a.id, describe(a))).collect())
            .unwrap_or_default();
        Self { names }
    }

    pub fn name(&self, id: ActorId) -> String {
        self.names.get(&id).cloned().unwrap_or_else(|| fallback(id))
    }
}
