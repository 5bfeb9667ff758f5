//! Epic ASCII Battles - event-to-effect orchestration for turn-based ASCII
//! combat.
//!
//! An external engine resolves combat and reports what happened each tick.
//! This crate paces that engine, turns its events into timed visual effects,
//! ground marks and log lines, scores finished battles, and keeps the
//! title-screen marathon battle running forever within fixed memory.

pub mod build_info;
pub mod core;
pub mod effects;
pub mod engine;
pub mod interpret;
pub mod leaderboard;
pub mod marathon;
pub mod names;
pub mod outcome;
pub mod palette;
pub mod round;
pub mod run;
pub mod settings;
pub mod species;
pub mod tiles;
pub mod utils;
