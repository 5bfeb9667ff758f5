//! Flavor text pools for the combat log.

use super::types::{AttackKind, Severity};
use rand::seq::SliceRandom;
use rand::Rng;

impl Severity {
    pub fn phrases(self) -> &'static [&'static str] {
        match self {
            Severity::Grievous => &[
                "tearing the flesh apart",
                "inflicting a grievous wound",
                "shattering bone",
            ],
            Severity::Wounding => &[
                "opening a deep gash",
                "drawing a gout of blood",
                "leaving a nasty wound",
            ],
            Severity::Scratching => &[
                "leaving a shallow cut",
                "scraping the skin",
                "bruising it",
            ],
            Severity::Barely => &[
                "barely scratching it",
                "doing almost nothing",
                "glancing harmlessly off",
            ],
        }
    }
}

impl AttackKind {
    pub fn verbs(self) -> &'static [&'static str] {
        match self {
            AttackKind::Peck => &["pecks", "jabs its beak into"],
            AttackKind::Bite => &["bites", "sinks its teeth into"],
            AttackKind::Scratch => &["scratches", "rakes"],
            AttackKind::Claw => &["claws", "slashes"],
            AttackKind::Sting => &["stings", "jabs its stinger into"],
            AttackKind::Ram => &["rams", "headbutts"],
            AttackKind::Kick => &["kicks", "stomps on"],
            AttackKind::Bash => &["bashes", "pummels"],
            AttackKind::Gore => &["gores", "skewers"],
            AttackKind::Other => &["strikes", "hits"],
        }
    }
}

const BLEED: [&str; 3] = [
    "{name} bleeds.",
    "Blood seeps from {name}'s wounds.",
    "{name} leaves a trail of blood.",
];

const DEATH: [&str; 3] = [
    "{name} has died!",
    "{name} collapses, dead.",
    "{name} breathes its last.",
];

const VOMIT: [&str; 2] = ["{name} vomits from the pain.", "{name} retches violently."];

const MISS: [&str; 2] = ["{name} misses!", "{name} swings wide."];

fn pick<'a, R: Rng>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or("")
}

fn fill(template: &str, name: &str) -> String {
    capitalize(&template.replace("{name}", name))
}

/// Uppercases the first character.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn hit<R: Rng>(
    attacker: &str,
    defender: &str,
    part: &str,
    damage: u32,
    attack_name: &str,
    rng: &mut R,
) -> String {
    let verb = pick(AttackKind::from_attack_name(attack_name).verbs(), rng);
    let severity = pick(Severity::for_damage(damage).phrases(), rng);
    capitalize(&format!(
        "{} {} {}'s {}, {}!",
        attacker,
        verb,
        defender,
        part.replace('_', " "),
        severity
    ))
}

pub fn bleed<R: Rng>(name: &str, rng: &mut R) -> String {
    fill(pick(&BLEED, rng), name)
}

pub fn sever(name: &str, part: &str) -> String {
    capitalize(&format!(
        "{}'s {} is torn clean off!",
        name,
        part.replace('_', " ")
    ))
}

pub fn death<R: Rng>(name: &str, rng: &mut R) -> String {
    fill(pick(&DEATH, rng), name)
}

pub fn vomit<R: Rng>(name: &str, rng: &mut R) -> String {
    fill(pick(&VOMIT, rng), name)
}

pub fn miss<R: Rng>(name: &str, rng: &mut R) -> String {
    fill(pick(&MISS, rng), name)
}

pub fn flee(name: &str) -> String {
    fill("{name} panics and flees!", name)
}

pub fn rally(name: &str) -> String {
    fill("{name} regains its nerve.", name)
}

pub fn status(name: &str, status: &str) -> String {
    capitalize(&format!("{} is now {}.", name, status))
}

pub fn shove(bumper: &str, bumped: &str) -> String {
    capitalize(&format!("{} shoves {} aside.", bumper, bumped))
}
