//! Tick scheduler: drives one engine at a fixed cadence.
//!
//! The scheduler holds no timer thread. The host loop calls
//! [`TickScheduler::pump`] with the current instant and the scheduler fires
//! at most one iteration when the cadence has elapsed. Each iteration returns
//! a [`TickOutcome`] so the owner can forward events to the interpreter
//! without the scheduler knowing about any presentation types.

use crate::engine::{BattleSnapshot, EngineHandle, ResolvedEvent, Winner};
use std::time::{Duration, Instant};
use tracing::debug;

/// Fixed-interval pacing. Missed intervals are not replayed.
#[derive(Debug, Clone, Copy)]
pub struct Cadence {
    interval: Duration,
    last_fire: Option<Instant>,
}

impl Cadence {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// True (and re-armed) when a full interval has passed since the last
    /// fire. The first call after construction or [`Cadence::reset`] fires.
    pub fn due(&mut self, now: Instant) -> bool {
        let ready = match self.last_fire {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if ready {
            self.last_fire = Some(now);
        }
        ready
    }

    pub fn reset(&mut self) {
        self.last_fire = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not started, or paused. Only `step` advances.
    Manual,
    /// `pump` fires on cadence.
    Running,
    /// Stopped explicitly or by engine completion. Nothing advances.
    Stopped,
}

/// What one scheduler iteration did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// No engine call happened.
    Idle,
    /// The engine advanced one step.
    Advanced {
        events: Vec<ResolvedEvent>,
        snapshot: Option<BattleSnapshot>,
    },
    /// The engine reported completion; the scheduler is now stopped.
    Finished { winner: Winner },
}

#[derive(Debug)]
pub struct TickScheduler {
    handle: EngineHandle,
    cadence: Cadence,
    state: RunState,
    ticks: u64,
}

impl TickScheduler {
    pub fn new(handle: EngineHandle, interval: Duration) -> Self {
        Self {
            handle,
            cadence: Cadence::new(interval),
            state: RunState::Manual,
            ticks: 0,
        }
    }

    /// Begins periodic invocation. The next `pump` fires immediately.
    pub fn start(&mut self, interval: Duration) {
        debug!(interval_ms = interval.as_millis() as u64, "scheduler started");
        self.cadence = Cadence::new(interval);
        self.state = RunState::Running;
    }

    /// Halts all further engine calls. Safe to call any number of times.
    pub fn stop(&mut self) {
        if self.state != RunState::Stopped {
            debug!(ticks = self.ticks, "scheduler stopped");
        }
        self.state = RunState::Stopped;
    }

    /// Drops back to manual stepping without stopping.
    pub fn pause(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Manual;
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Iterations that reached the engine.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn handle(&self) -> &EngineHandle {
        &self.handle
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Fires one iteration if running and the cadence has elapsed.
    pub fn pump(&mut self, now: Instant) -> Option<TickOutcome> {
        if self.state != RunState::Running || !self.cadence.due(now) {
            return None;
        }
        Some(self.iterate())
    }

    /// Runs exactly one iteration now, bypassing the cadence. A no-op once
    /// stopped.
    pub fn step(&mut self) -> TickOutcome {
        if self.state == RunState::Stopped {
            return TickOutcome::Idle;
        }
        self.iterate()
    }

    fn iterate(&mut self) -> TickOutcome {
        if !self.handle.is_live() {
            return TickOutcome::Idle;
        }
        if self.handle.is_finished() {
            let winner = Winner::from_code(self.handle.winner());
            debug!(?winner, ticks = self.ticks, "engine finished");
            self.stop();
            return TickOutcome::Finished { winner };
        }
        self.handle.tick();
        self.ticks += 1;
        let events = self.handle.events();
        let snapshot = self.handle.snapshot();
        TickOutcome::Advanced { events, snapshot }
    }

    /// Swaps in a new engine, releasing the old one. The scheduler returns to
    /// manual stepping; call `start` again to resume pacing.
    pub fn replace(&mut self, handle: EngineHandle) {
        self.handle.release();
        self.handle = handle;
        self.state = RunState::Manual;
        self.ticks = 0;
        self.cadence.reset();
    }

    /// Stops and frees the engine.
    pub fn release(&mut self) {
        self.stop();
        self.handle.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cadence_fires_first_then_waits() {
        let start = Instant::now();
        let mut cadence = Cadence::new(Duration::from_millis(100));
        assert!(cadence.due(start));
        assert!(!cadence.due(start + Duration::from_millis(50)));
        assert!(cadence.due(start + Duration::from_millis(100)));
        // A long gap fires once, not once per missed interval
        assert!(cadence.due(start + Duration::from_millis(1000)));
        assert!(!cadence.due(start + Duration::from_millis(1001)));
    }

    #[test]
    fn test_empty_handle_is_idle() {
        let mut scheduler = TickScheduler::new(EngineHandle::empty(), Duration::from_millis(150));
        assert_eq!(scheduler.step(), TickOutcome::Idle);
        scheduler.start(Duration::from_millis(150));
        assert_eq!(scheduler.pump(Instant::now()), Some(TickOutcome::Idle));
        assert_eq!(scheduler.ticks(), 0);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut scheduler = TickScheduler::new(EngineHandle::empty(), Duration::from_millis(150));
        scheduler.stop();
        scheduler.stop();
        assert_eq!(scheduler.state(), RunState::Stopped);
        assert_eq!(scheduler.pump(Instant::now()), None);
    }

    #[test]
    fn test_pause_only_from_running() {
        let mut scheduler = TickScheduler::new(EngineHandle::empty(), Duration::from_millis(150));
        scheduler.stop();
        scheduler.pause();
        assert_eq!(scheduler.state(), RunState::Stopped);
        scheduler.start(Duration::from_millis(150));
        scheduler.pause();
        assert_eq!(scheduler.state(), RunState::Manual);
    }
}
