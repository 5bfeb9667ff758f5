//! Tick scheduler and engine handle behavior against a scripted engine.
//!
//! Every engine call is counted, so "no-op" means literally no calls.

mod support;

use ascii_battles::core::{RunState, TickOutcome, TickScheduler};
use ascii_battles::engine::{Cell, EngineHandle, ResolvedEvent, TeamMember, Winner};
use std::time::{Duration, Instant};
use support::{lineup, Script, ScriptedFactory, Step};

const INTERVAL: Duration = Duration::from_millis(150);

fn scheduler_for(factory: &ScriptedFactory) -> TickScheduler {
    let handle = EngineHandle::spawn(
        factory,
        11,
        &TeamMember::squad("wolf", 2),
        &TeamMember::squad("rat", 2),
    );
    TickScheduler::new(handle, INTERVAL)
}

fn walking_script(ticks: usize) -> Script {
    let step = Step::events(&[ResolvedEvent::Move {
        actor: 1,
        from: Cell::new(0, 0),
        to: Cell::new(1, 0),
    }]);
    Script::new(lineup(&[true, true], &[true, true]), vec![step; ticks])
}

#[test]
fn test_step_after_stop_makes_no_engine_calls() {
    let factory = ScriptedFactory::single(walking_script(10));
    let mut scheduler = scheduler_for(&factory);

    assert!(matches!(scheduler.step(), TickOutcome::Advanced { .. }));
    scheduler.stop();
    let before = factory.calls();

    assert_eq!(scheduler.step(), TickOutcome::Idle);
    assert_eq!(scheduler.step(), TickOutcome::Idle);
    assert_eq!(factory.calls(), before);
    assert_eq!(scheduler.ticks(), 1);
    assert_eq!(scheduler.state(), RunState::Stopped);
}

#[test]
fn test_stop_is_idempotent() {
    let factory = ScriptedFactory::single(walking_script(3));
    let mut scheduler = scheduler_for(&factory);
    scheduler.start(INTERVAL);
    scheduler.stop();
    scheduler.stop();
    scheduler.stop();
    assert_eq!(scheduler.state(), RunState::Stopped);
    assert!(scheduler.pump(Instant::now()).is_none());
}

#[test]
fn test_pump_follows_cadence() {
    let factory = ScriptedFactory::single(walking_script(10));
    let mut scheduler = scheduler_for(&factory);
    let t0 = Instant::now();

    // Not started: pump does nothing
    assert!(scheduler.pump(t0).is_none());

    scheduler.start(INTERVAL);
    assert!(scheduler.pump(t0).is_some());
    assert!(scheduler.pump(t0 + Duration::from_millis(100)).is_none());
    assert!(scheduler.pump(t0 + INTERVAL).is_some());
    assert_eq!(scheduler.ticks(), 2);
    assert_eq!(factory.calls().ticks, 2);

    scheduler.pause();
    assert!(scheduler.pump(t0 + INTERVAL * 4).is_none());
    assert!(matches!(scheduler.step(), TickOutcome::Advanced { .. }));
}

#[test]
fn test_engine_completion_stops_the_scheduler() {
    let script = Script::new(
        lineup(&[true], &[true]),
        vec![Step::default(), Step::default().finishing(1)],
    );
    let factory = ScriptedFactory::single(script);
    let mut scheduler = scheduler_for(&factory);
    scheduler.start(INTERVAL);

    assert!(matches!(scheduler.step(), TickOutcome::Advanced { .. }));
    assert!(matches!(scheduler.step(), TickOutcome::Advanced { .. }));
    assert_eq!(
        scheduler.step(),
        TickOutcome::Finished {
            winner: Winner::Team(ascii_battles::engine::Team::B)
        }
    );
    assert_eq!(scheduler.state(), RunState::Stopped);
    assert_eq!(scheduler.step(), TickOutcome::Idle);
    assert_eq!(factory.calls().ticks, 2);
}

#[test]
fn test_malformed_batch_is_dropped_and_ticking_continues() {
    let good = Step::events(&[ResolvedEvent::Death {
        actor: 100,
        pos: Cell::new(0, 1),
    }]);
    let script = Script::new(
        lineup(&[true], &[true]),
        vec![Step::raw("{\"type\": \"hit\""), Step::raw(r#"[{"type": "teleport"}]"#), good],
    );
    let factory = ScriptedFactory::single(script);
    let mut scheduler = scheduler_for(&factory);

    for _ in 0..2 {
        match scheduler.step() {
            TickOutcome::Advanced { events, snapshot } => {
                assert!(events.is_empty());
                assert!(snapshot.is_some());
            }
            other => panic!("expected an advance, got {:?}", other),
        }
    }
    match scheduler.step() {
        TickOutcome::Advanced { events, .. } => assert_eq!(events.len(), 1),
        other => panic!("expected an advance, got {:?}", other),
    }
}

#[test]
fn test_camel_case_payloads_decode() {
    let raw = r#"[{"type": "Hit", "attackerId": 1, "defenderId": 100, "partId": "head",
        "damage": 9, "attackName": "bite"},
        {"type": "statusChange", "actorId": 100, "status": "fleeing", "active": true}]"#;
    let script = Script::new(lineup(&[true], &[true]), vec![Step::raw(raw)]);
    let factory = ScriptedFactory::single(script);
    let mut scheduler = scheduler_for(&factory);

    let TickOutcome::Advanced { events, .. } = scheduler.step() else {
        panic!("expected an advance");
    };
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        ResolvedEvent::Hit { attack_name, damage: 9, .. } if attack_name == "bite"
    ));
}

#[test]
fn test_release_happens_exactly_once() {
    let factory = ScriptedFactory::single(walking_script(2));
    let mut scheduler = scheduler_for(&factory);
    scheduler.step();
    scheduler.release();
    scheduler.release();
    assert_eq!(scheduler.step(), TickOutcome::Idle);
    drop(scheduler);
    assert_eq!(factory.calls().releases, 1);
}

#[test]
fn test_dropping_a_live_handle_releases_it() {
    let factory = ScriptedFactory::single(walking_script(2));
    {
        let _scheduler = scheduler_for(&factory);
    }
    assert_eq!(factory.calls().releases, 1);
}

#[test]
fn test_replace_releases_previous_engine() {
    let factory = ScriptedFactory::single(walking_script(5));
    let mut scheduler = scheduler_for(&factory);
    scheduler.start(INTERVAL);
    scheduler.step();

    let next = EngineHandle::spawn(&factory, 12, &TeamMember::squad("cat", 1), &TeamMember::squad("dog", 1));
    scheduler.replace(next);
    assert_eq!(factory.calls().releases, 1);
    assert_eq!(scheduler.state(), RunState::Manual);
    assert_eq!(scheduler.ticks(), 0);
    assert!(scheduler.handle().is_live());
}

#[test]
fn test_missing_handle_returns_safe_defaults() {
    let mut handle = EngineHandle::empty();
    assert!(!handle.is_live());
    assert!(!handle.initialize(&[], &[]));
    handle.tick();
    assert!(handle.events().is_empty());
    assert!(handle.snapshot().is_none());
    assert!(!handle.is_finished());
    assert_eq!(handle.winner(), -1);
    handle.release();

    let mut scheduler = TickScheduler::new(EngineHandle::empty(), INTERVAL);
    scheduler.start(INTERVAL);
    assert_eq!(scheduler.step(), TickOutcome::Idle);
    assert_eq!(scheduler.ticks(), 0);
}

#[test]
fn test_rejected_initialization_releases_engine() {
    let factory = ScriptedFactory::single(Script::rejecting(lineup(&[true], &[true])));
    let handle = EngineHandle::spawn(&factory, 3, &TeamMember::squad("ant", 1), &[]);
    assert!(!handle.is_live());
    let calls = factory.calls();
    assert_eq!(calls.created, vec![3]);
    assert_eq!(calls.initialized, 1);
    assert_eq!(calls.releases, 1);
}
