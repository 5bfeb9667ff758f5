//! Core timing: constants, clocks, and the tick scheduler.

pub mod clock;
pub mod constants;
pub mod tick;

pub use clock::{Clock, ManualClock, SystemClock};
pub use tick::{Cadence, RunState, TickOutcome, TickScheduler};
