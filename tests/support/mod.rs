//! Shared fixtures: a scripted engine that records every call made to it.

#![allow(dead_code)]

use ascii_battles::engine::codec::encode_events;
use ascii_battles::engine::{
    ActorId, ActorSnapshot, BattleEngine, BattleSnapshot, EngineFactory, GridInfo, ResolvedEvent,
};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Every call the engine under test received.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CallLog {
    pub created: Vec<u64>,
    pub initialized: usize,
    pub ticks: usize,
    pub event_drains: usize,
    pub snapshots: usize,
    pub releases: usize,
}

impl CallLog {
    /// Calls that reached an engine after creation.
    pub fn engine_calls(&self) -> usize {
        self.initialized + self.ticks + self.event_drains + self.snapshots + self.releases
    }
}

pub type SharedLog = Rc<RefCell<CallLog>>;

/// What the engine does on one tick.
#[derive(Debug, Clone, Default)]
pub struct Step {
    /// Raw JSON returned by the next `events_json`. `None` means `[]`.
    pub events_json: Option<String>,
    /// Replaces the reported snapshot when set.
    pub snapshot: Option<BattleSnapshot>,
    /// Finishes the battle with this winner code.
    pub finish: Option<i32>,
}

impl Step {
    pub fn events(events: &[ResolvedEvent]) -> Self {
        Self {
            events_json: Some(encode_events(events)),
            ..Self::default()
        }
    }

    pub fn raw(json: &str) -> Self {
        Self {
            events_json: Some(json.to_string()),
            ..Self::default()
        }
    }

    pub fn with_snapshot(mut self, snapshot: BattleSnapshot) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    pub fn finishing(mut self, winner: i32) -> Self {
        self.finish = Some(winner);
        self
    }
}

/// One engine's whole life: the starting snapshot and its ticks in order.
#[derive(Debug, Clone)]
pub struct Script {
    pub initial: BattleSnapshot,
    pub steps: Vec<Step>,
    pub accept_init: bool,
}

impl Script {
    pub fn new(initial: BattleSnapshot, steps: Vec<Step>) -> Self {
        Self {
            initial,
            steps,
            accept_init: true,
        }
    }

    pub fn rejecting(initial: BattleSnapshot) -> Self {
        Self {
            initial,
            steps: Vec::new(),
            accept_init: false,
        }
    }
}

pub struct ScriptedEngine {
    log: SharedLog,
    steps: VecDeque<Step>,
    pending_events: String,
    snapshot: BattleSnapshot,
    finished: bool,
    winner: i32,
    accept_init: bool,
}

impl ScriptedEngine {
    pub fn new(log: SharedLog, script: Script) -> Self {
        Self {
            log,
            steps: script.steps.into(),
            pending_events: "[]".to_string(),
            snapshot: script.initial,
            finished: false,
            winner: -1,
            accept_init: script.accept_init,
        }
    }
}

impl BattleEngine for ScriptedEngine {
    fn initialize(&mut self, _team_a_json: &str, _team_b_json: &str) -> bool {
        self.log.borrow_mut().initialized += 1;
        self.accept_init
    }

    fn tick(&mut self) {
        self.log.borrow_mut().ticks += 1;
        let Some(step) = self.steps.pop_front() else {
            return;
        };
        self.pending_events = step.events_json.unwrap_or_else(|| "[]".to_string());
        if let Some(snapshot) = step.snapshot {
            self.snapshot = snapshot;
        }
        if let Some(winner) = step.finish {
            self.finished = true;
            self.winner = winner;
            self.snapshot.finished = true;
            self.snapshot.winner = u8::try_from(winner).ok();
        }
    }

    fn events_json(&mut self) -> String {
        self.log.borrow_mut().event_drains += 1;
        std::mem::replace(&mut self.pending_events, "[]".to_string())
    }

    fn snapshot_json(&self) -> String {
        self.log.borrow_mut().snapshots += 1;
        serde_json::to_string(&self.snapshot).unwrap()
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn winner(&self) -> i32 {
        self.winner
    }

    fn release(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

/// Hands out scripted engines in order. Once the queue is empty every new
/// engine replays `fallback`.
pub struct ScriptedFactory {
    pub log: SharedLog,
    scripts: RefCell<VecDeque<Script>>,
    fallback: Script,
}

impl ScriptedFactory {
    pub fn new(scripts: Vec<Script>, fallback: Script) -> Self {
        Self {
            log: SharedLog::default(),
            scripts: RefCell::new(scripts.into()),
            fallback,
        }
    }

    pub fn single(script: Script) -> Self {
        Self::new(vec![script.clone()], script)
    }

    pub fn calls(&self) -> CallLog {
        self.log.borrow().clone()
    }
}

impl EngineFactory for ScriptedFactory {
    fn create(&self, seed: u64) -> Box<dyn BattleEngine> {
        self.log.borrow_mut().created.push(seed);
        let script = self
            .scripts
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone());
        Box::new(ScriptedEngine::new(self.log.clone(), script))
    }
}

/// Lets a factory be shared with the orchestrator while the test keeps
/// reading its call log.
pub struct SharedFactory(pub Rc<ScriptedFactory>);

impl EngineFactory for SharedFactory {
    fn create(&self, seed: u64) -> Box<dyn BattleEngine> {
        self.0.create(seed)
    }
}

pub fn actor(id: ActorId, team: u8, x: i32, y: i32, alive: bool) -> ActorSnapshot {
    ActorSnapshot {
        id,
        species_id: if team == 0 { "wolf" } else { "rat" }.to_string(),
        glyph: if team == 0 { 'w' } else { 'r' },
        team,
        x,
        y,
        hp: if alive { 20 } else { 0 },
        max_hp: 20,
        alive,
        color: None,
    }
}

pub fn snapshot(
    width: i32,
    height: i32,
    team_a: Vec<ActorSnapshot>,
    team_b: Vec<ActorSnapshot>,
) -> BattleSnapshot {
    BattleSnapshot {
        seed: 7,
        tick_count: 0,
        finished: false,
        winner: None,
        grid: GridInfo { width, height },
        team_a,
        team_b,
    }
}

/// `alive` flags per team, actors laid out along rows 0 and 1.
pub fn lineup(team_a: &[bool], team_b: &[bool]) -> BattleSnapshot {
    let a = team_a
        .iter()
        .enumerate()
        .map(|(i, alive)| actor(i as ActorId + 1, 0, i as i32, 0, *alive))
        .collect();
    let b = team_b
        .iter()
        .enumerate()
        .map(|(i, alive)| actor(i as ActorId + 100, 1, i as i32, 1, *alive))
        .collect();
    snapshot(16, 6, a, b)
}
