//! The battle engine seam.
//!
//! Combat resolution lives outside this crate. It is reached through the
//! [`BattleEngine`] trait, a JSON-in/JSON-out contract (create, initialize,
//! tick, drained events, snapshot, finished, winner, release). Everything
//! upstream talks to an [`EngineHandle`], which turns a missing engine into
//! safe defaults and decodes payloads through [`codec`].

pub mod codec;
pub mod skirmish;
pub mod types;

pub use codec::DecodeError;
pub use types::*;

use tracing::{debug, warn};

/// One live battle inside the external engine.
pub trait BattleEngine {
    /// Loads both teams (JSON arrays of `{species_id}`). Returns `false` on
    /// rejection.
    fn initialize(&mut self, team_a_json: &str, team_b_json: &str) -> bool;
    /// Advances the simulation by one step.
    fn tick(&mut self);
    /// Events since the previous call. Draining: a second call returns `[]`.
    fn events_json(&mut self) -> String;
    fn snapshot_json(&self) -> String;
    fn is_finished(&self) -> bool;
    /// `-1` while undecided or on a mutual wipe, else `0`/`1`.
    fn winner(&self) -> i32;
    /// Frees engine-side resources. Called exactly once per engine.
    fn release(&mut self);
}

/// Creates engine instances.
pub trait EngineFactory {
    fn create(&self, seed: u64) -> Box<dyn BattleEngine>;
}

/// Exclusive owner of one engine instance.
///
/// Every query on an absent engine (never created, or already released) is a
/// silent no-op that returns a safe default.
#[derive(Default)]
pub struct EngineHandle {
    engine: Option<Box<dyn BattleEngine>>,
}

impl EngineHandle {
    pub fn new(engine: Box<dyn BattleEngine>) -> Self {
        Self {
            engine: Some(engine),
        }
    }

    /// A handle with no engine behind it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates an engine and initializes it with both teams.
    ///
    /// Returns an empty handle when the engine rejects the teams; the rejected
    /// engine is released before returning.
    pub fn spawn(
        factory: &dyn EngineFactory,
        seed: u64,
        team_a: &[TeamMember],
        team_b: &[TeamMember],
    ) -> Self {
        let mut handle = Self::new(factory.create(seed));
        if !handle.initialize(team_a, team_b) {
            warn!(seed, "engine rejected team initialization");
            handle.release();
        }
        handle
    }

    pub fn is_live(&self) -> bool {
        self.engine.is_some()
    }

    pub fn initialize(&mut self, team_a: &[TeamMember], team_b: &[TeamMember]) -> bool {
        let Some(engine) = self.engine.as_mut() else {
            return false;
        };
        let (a, b) = match (serde_json::to_string(team_a), serde_json::to_string(team_b)) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return false,
        };
        engine.initialize(&a, &b)
    }

    pub fn tick(&mut self) {
        if let Some(engine) = self.engine.as_mut() {
            engine.tick();
        }
    }

    /// Drains and decodes pending events. A batch that fails to decode is
    /// logged and dropped whole.
    pub fn events(&mut self) -> Vec<ResolvedEvent> {
        let Some(engine) = self.engine.as_mut() else {
            return Vec::new();
        };
        let raw = engine.events_json();
        match codec::decode_events(&raw) {
            Ok(events) => events,
            Err(err) => {
                warn!(error = %err, "discarding undecodable event batch");
                Vec::new()
            }
        }
    }

    pub fn snapshot(&self) -> Option<BattleSnapshot> {
        let engine = self.engine.as_ref()?;
        match codec::decode_snapshot(&engine.snapshot_json()) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                warn!(error = %err, "discarding undecodable snapshot");
                None
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.engine.as_ref().is_some_and(|e| e.is_finished())
    }

    pub fn winner(&self) -> i32 {
        self.engine.as_ref().map_or(-1, |e| e.winner())
    }

    /// Releases the engine. Later calls are no-ops.
    pub fn release(&mut self) {
        if let Some(mut engine) = self.engine.take() {
            debug!("releasing engine");
            engine.release();
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for EngineHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineHandle")
            .field("live", &self.is_live())
            .finish()
    }
}
