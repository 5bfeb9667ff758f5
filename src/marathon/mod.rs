//! Marathon mode: a self-driving battle behind the title screen.
//!
//! The orchestrator steps its own engine, reinforces whichever side gets
//! wiped out, starts over on a mutual wipe, and animates every death through
//! a fixed decay sequence that ends in a patch of ground litter.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
