//! Integration test: full duel scenarios
//!
//! Drives whole matches through the public API: scripted player input against
//! passive or AI opponents, timeout arbitration and the async runner.

use arena_duel::game::physics::{Arena, FighterStats};
use arena_duel::game::{CharacterState, DuelEvent, FighterId, MatchState, OpponentAi};
use arena_duel::{Command, CommandQueue, DuelMatch, MatchOutcome, MatchSettings, Side};

const DT: f32 = 1.0 / 60.0;

/// Player at x=300 facing right, opponent at x=400 facing left, opponent idle
fn close_quarters(player_stats: FighterStats, opponent_stats: FighterStats) -> DuelMatch {
    let player = CharacterState::new(Side::Player, FighterId::Naruto, player_stats, 300.0, 120.0);
    let opponent =
        CharacterState::new(Side::Opponent, FighterId::Luffy, opponent_stats, 400.0, 120.0);
    let state = MatchState::new(0, Arena::default(), player, opponent, 60.0);
    let (duel, _handle) =
        DuelMatch::with_state(state, Box::new(CommandQueue::new()), &MatchSettings::default());
    duel
}

fn hit_count(events: &[DuelEvent], attacker: Side) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, DuelEvent::Hit { attacker: a, .. } if *a == attacker))
        .count()
}

#[test]
fn test_three_hits_knock_out_weakened_opponent() {
    let player_stats = FighterStats {
        attack_damage: 20,
        ..FighterStats::default()
    };
    let opponent_stats = FighterStats {
        max_hp: 50,
        ..FighterStats::default()
    };
    let mut duel = close_quarters(player_stats, opponent_stats);

    let mut ticks = 0;
    while duel.outcome() == MatchOutcome::Running {
        duel.tick(DT, &[Command::AttackNormal]);
        ticks += 1;
        assert!(ticks < 600, "match never ended");
    }

    assert_eq!(duel.outcome(), MatchOutcome::PlayerWin);
    assert_eq!(duel.opponent().hp(), 0);
    assert!(!duel.opponent().is_alive());
    assert_eq!(duel.player().hp(), 100);
    assert_eq!(hit_count(&duel.state().events, Side::Player), 3);
    assert!(duel
        .state()
        .events
        .contains(&DuelEvent::Knockout { side: Side::Opponent }));
}

#[test]
fn test_one_activation_one_hit_for_every_move() {
    let commands = [
        Command::AttackNormal,
        Command::UseSkill {
            skill: arena_duel::Skill::One,
        },
        Command::UseSkill {
            skill: arena_duel::Skill::Two,
        },
        Command::UseSkill {
            skill: arena_duel::Skill::Three,
        },
    ];
    let expected_damage = [10, 15, 20, 25];

    for (command, damage) in commands.into_iter().zip(expected_damage) {
        let mut duel = close_quarters(FighterStats::default(), FighterStats::default());
        duel.tick(DT, &[command]);
        // Hold the gates for the whole action and then some
        for _ in 0..90 {
            duel.tick(DT, &[]);
        }
        assert_eq!(hit_count(&duel.state().events, Side::Player), 1, "{command:?}");
        assert_eq!(duel.opponent().hp(), 100 - damage, "{command:?}");
    }
}

#[test]
fn test_blocking_opponent_takes_nothing() {
    let player = CharacterState::new(
        Side::Player,
        FighterId::Naruto,
        FighterStats::default(),
        300.0,
        120.0,
    );
    let opponent = CharacterState::new(
        Side::Opponent,
        FighterId::Luffy,
        FighterStats::default(),
        400.0,
        120.0,
    );
    // Script the opponent to raise its guard on the first frame
    let mut queue = CommandQueue::new();
    queue.push(Command::Block);
    let state = MatchState::new(0, Arena::default(), player, opponent, 60.0);
    let (mut duel, _handle) =
        DuelMatch::with_state(state, Box::new(queue), &MatchSettings::default());

    duel.tick(DT, &[]);
    assert!(duel.opponent().is_blocking());
    assert_eq!(duel.opponent().mp(), 0);

    duel.tick(
        DT,
        &[Command::UseSkill {
            skill: arena_duel::Skill::Three,
        }],
    );
    assert_eq!(duel.opponent().hp(), 100);
    assert!(duel
        .state()
        .events
        .iter()
        .any(|e| matches!(e, DuelEvent::Blocked { defender: Side::Opponent, .. })));
}

#[test]
fn test_turned_away_player_never_lands() {
    let mut duel = close_quarters(FighterStats::default(), FighterStats::default());
    // Step left to face away, then swing repeatedly
    duel.tick(DT, &[Command::MoveLeft { dt: 0.01 }, Command::StopMoving]);
    assert!(!duel.player().facing_right());
    for _ in 0..120 {
        duel.tick(DT, &[Command::AttackNormal]);
    }
    assert_eq!(duel.opponent().hp(), 100);
}

#[test]
fn test_equal_health_at_time_up_is_a_loss() {
    let settings = MatchSettings {
        match_seconds: 2.0,
        ..MatchSettings::default()
    };
    let player = CharacterState::new(
        Side::Player,
        FighterId::Naruto,
        FighterStats::default(),
        100.0,
        120.0,
    );
    let opponent = CharacterState::new(
        Side::Opponent,
        FighterId::Luffy,
        FighterStats::default(),
        1000.0,
        120.0,
    );
    let state = MatchState::new(0, Arena::default(), player, opponent, settings.match_seconds);
    let (mut duel, _handle) =
        DuelMatch::with_state(state, Box::new(CommandQueue::new()), &settings);

    for _ in 0..200 {
        duel.tick(DT, &[]);
    }
    assert_eq!(duel.player().hp(), duel.opponent().hp());
    assert_eq!(duel.outcome(), MatchOutcome::PlayerLose);
}

#[test]
fn test_exhibition_runs_to_completion() {
    let settings = MatchSettings {
        seed: 99,
        match_seconds: 30.0,
        ..MatchSettings::default()
    };
    let (duel, _handle) = DuelMatch::new(&settings);
    let duel = duel.with_autopilot(Box::new(OpponentAi::new(100)));

    let summary = tokio_test::block_on(duel.run());
    assert!(summary.outcome.is_decided());
    assert!(summary.player.hp >= 0 && summary.player.hp <= summary.player.max_hp);
    assert!(summary.opponent.hp >= 0 && summary.opponent.hp <= summary.opponent.max_hp);
    match summary.outcome {
        MatchOutcome::PlayerWin => assert!(
            !summary.opponent.alive || summary.player.hp > summary.opponent.hp
        ),
        MatchOutcome::PlayerLose => assert!(
            !summary.player.alive || summary.player.hp <= summary.opponent.hp
        ),
        MatchOutcome::Running => unreachable!(),
    }
    assert_eq!(
        summary
            .events
            .iter()
            .filter(|e| matches!(e, DuelEvent::Outcome { .. }))
            .count(),
        1
    );
}

#[test]
fn test_same_seed_same_match() {
    let run = || {
        let settings = MatchSettings {
            seed: 2024,
            match_seconds: 20.0,
            ..MatchSettings::default()
        };
        let (duel, _handle) = DuelMatch::new(&settings);
        let duel = duel.with_autopilot(Box::new(OpponentAi::new(7)));
        tokio_test::block_on(duel.run())
    };

    let first = run();
    let second = run();
    assert_eq!(first.outcome, second.outcome);
    assert_eq!(first.ticks, second.ticks);
    assert_eq!(first.player, second.player);
    assert_eq!(first.opponent, second.opponent);
    assert_eq!(first.events, second.events);
}

#[test]
fn test_summary_serializes() {
    let settings = MatchSettings {
        match_seconds: 0.5,
        ..MatchSettings::default()
    };
    let (duel, _handle) = DuelMatch::new(&settings);
    let summary = tokio_test::block_on(duel.run());

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["outcome"], "player_lose");
    assert_eq!(json["arena"], "konoha");
    assert_eq!(json["player"]["fighter"], "naruto");
    assert!(json["events"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["type"] == "time_up"));
}
