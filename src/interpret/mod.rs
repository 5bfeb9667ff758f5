//! Event interpretation: combat log, transient effects, and ground marks.

pub mod logic;
pub mod phrases;
pub mod types;

pub use logic::*;
pub use types::*;
