//! One battle from first tick to scored result.

mod support;

use ascii_battles::core::RunState;
use ascii_battles::engine::{Cell, EngineHandle, ResolvedEvent, Team, TeamMember, Winner};
use ascii_battles::interpret::InterpretConfig;
use ascii_battles::outcome::TrophyTier;
use ascii_battles::round::{BattleSession, RoundResult};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use support::{lineup, Script, ScriptedFactory, Step};

fn alive(n: usize, of: usize) -> Vec<bool> {
    (0..of).map(|i| i < n).collect()
}

fn session(factory: &ScriptedFactory, round: u32) -> BattleSession {
    let handle = EngineHandle::spawn(
        factory,
        21,
        &TeamMember::squad("wolf", 10),
        &TeamMember::squad("rat", 10),
    );
    BattleSession::new(
        handle,
        ["Wolf".to_string(), "Rat".to_string()],
        round,
        InterpretConfig::default(),
    )
}

/// Steps until the session reports a result, bounded.
fn play(session: &mut BattleSession, rng: &mut ChaCha8Rng) -> RoundResult {
    for tick in 0..50 {
        if let Some(result) = session.step(tick as f64 * 0.15, rng) {
            return result;
        }
    }
    panic!("battle never finished");
}

fn ending(a_alive: usize, b_alive: usize, winner: i32) -> Script {
    let opening = Step::events(&[ResolvedEvent::Hit {
        attacker: 1,
        defender: 100,
        part: "neck".to_string(),
        damage: 18,
        attack_name: "bite".to_string(),
    }]);
    let last = Step::events(&[ResolvedEvent::Death {
        actor: 101,
        pos: Cell::new(1, 1),
    }])
    .with_snapshot(lineup(&alive(a_alive, 10), &alive(b_alive, 10)))
    .finishing(winner);
    Script::new(lineup(&alive(10, 10), &alive(10, 10)), vec![opening, last])
}

#[test]
fn test_close_win_earns_gold() {
    let factory = ScriptedFactory::single(ending(1, 0, 0));
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut session = session(&factory, 1);
    assert_eq!(session.start_count(Team::A), 10);

    let result = play(&mut session, &mut rng);
    assert_eq!(result.winner, Winner::Team(Team::A));
    assert_eq!(result.survivors, 1);
    assert_eq!(result.start_count, 10);
    assert_eq!(result.outcome.tier, TrophyTier::Gold);
    assert!(!result.outcome.is_blowout);

    let lines: Vec<&str> = session.log().entries().map(|e| e.text.as_str()).collect();
    assert!(lines.contains(&"The Wolf side wins!"));
    assert!(lines.contains(&"1 of 10 left standing"));
    assert!(lines.contains(&"3 trophies, +150 points"));
}

#[test]
fn test_lopsided_win_is_blowout() {
    let factory = ScriptedFactory::single(ending(0, 6, 1));
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut session = session(&factory, 1);

    let result = play(&mut session, &mut rng);
    assert_eq!(result.winner, Winner::Team(Team::B));
    assert_eq!(result.survivors, 6);
    assert!(result.outcome.is_blowout);
    assert_eq!(result.outcome.tier.trophies(), 0);
    assert!(session
        .log()
        .entries()
        .any(|e| e.text == "BLOWOUT! The run is over." && e.is_critical));
}

#[test]
fn test_mutual_wipe_scores_zero_survivors() {
    let factory = ScriptedFactory::single(ending(0, 0, -1));
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut session = session(&factory, 2);

    let result = play(&mut session, &mut rng);
    assert_eq!(result.winner, Winner::Undecided);
    assert_eq!(result.survivors, 0);
    assert_eq!(result.start_count, 20);
    assert_eq!(result.outcome.tier, TrophyTier::Gold);
    assert!(session
        .log()
        .entries()
        .any(|e| e.text == "Nobody is left standing."));
}

#[test]
fn test_result_is_final_and_engine_released_once() {
    let factory = ScriptedFactory::single(ending(2, 0, 0));
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut session = session(&factory, 1);
    session.start();
    assert_eq!(session.run_state(), RunState::Running);

    let result = play(&mut session, &mut rng);
    let log_len = session.log().len();
    let ticks = factory.calls().ticks;

    assert!(!session.engine_live());
    assert_eq!(session.run_state(), RunState::Stopped);
    assert_eq!(session.result(), Some(result));
    for i in 0..5 {
        assert!(session.step(10.0 + i as f64, &mut rng).is_none());
    }
    session.start();
    assert_eq!(session.run_state(), RunState::Stopped);

    assert_eq!(session.log().len(), log_len);
    assert_eq!(factory.calls().ticks, ticks);
    drop(session);
    assert_eq!(factory.calls().releases, 1);
}

#[test]
fn test_events_reach_log_and_effects() {
    let factory = ScriptedFactory::single(ending(1, 0, 0));
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut session = session(&factory, 1);

    assert!(session.step(0.0, &mut rng).is_none());
    assert_eq!(session.log().len(), 1);
    assert!(session.log().last().unwrap().is_critical);
    assert!(!session.effects().blips.is_empty());

    session.reset_effects();
    assert!(session.log().is_empty());
    assert!(session.effects().blips.is_empty());
}
