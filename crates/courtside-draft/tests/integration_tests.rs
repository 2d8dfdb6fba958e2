// Integration tests for the draft engine.
//
// These drive a complete draft through the public API: team factory, order
// generation, session initialization, AI turns and user picks.

use std::collections::HashSet;
use std::sync::Arc;

use courtside_core::team::build_teams;
use courtside_core::{Player, Position, TeamId};
use courtside_draft::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ===========================================================================
// Test helpers
// ===========================================================================

fn pool(n: u32) -> Vec<Arc<Player>> {
    (1..=n)
        .map(|i| {
            let pos = Position::ALL[(i as usize * 7) % 5];
            let rating = 60 + (i * 13 % 39) as u8;
            let mut p = Player::new(i, &format!("Player {i}"), pos, rating);
            if i % 4 == 0 {
                p = p.with_secondary(Position::ALL[(i as usize + 1) % 5]);
            }
            Arc::new(p)
        })
        .collect()
}

fn setup(
    seed: u64,
    rounds: u32,
    ai_teams: usize,
    draft_type: DraftType,
    user_position: UserDraftPosition,
    pool_size: u32,
) -> (DraftSession, ChaCha8Rng) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let teams = build_teams(rounds, ai_teams, "Your Team", &mut rng).unwrap();
    let config = DraftOrderConfig {
        rounds,
        draft_type,
        user_position,
    };
    let order = generate_draft_order(&config, &teams, &mut rng).unwrap();
    let mut session = DraftSession::new();
    session.initialize(pool(pool_size), teams, order).unwrap();
    (session, rng)
}

/// Play a whole draft with the user always taking the first available player.
fn play_out(session: &mut DraftSession, rng: &mut ChaCha8Rng) -> TurnOutcome {
    let policy = AiPickPolicy::default();
    loop {
        let (_, outcome) = run_until_user_turn(session, &policy, rng).unwrap();
        match outcome {
            TurnOutcome::UserOnClock => {
                let player_id = session.available_players()[0].id;
                let team_id = session.user_team().unwrap().id;
                session.make_pick(player_id, team_id).unwrap();
            }
            other => return other,
        }
    }
}

fn history(session: &DraftSession) -> Vec<(TeamId, u32)> {
    session
        .drafted_players()
        .iter()
        .map(|d| (d.team_id, d.player.id))
        .collect()
}

// ===========================================================================
// Full drafts
// ===========================================================================

#[test]
fn full_snake_draft_fills_every_roster() {
    let (mut session, mut rng) = setup(
        11,
        5,
        5,
        DraftType::Snake,
        UserDraftPosition::First,
        60,
    );
    let outcome = play_out(&mut session, &mut rng);
    assert!(matches!(outcome, TurnOutcome::Complete));
    assert!(session.is_complete());
    assert_eq!(session.drafted_players().len(), 30);
    assert!(session.teams().iter().all(|t| t.roster.len() == 5));
    assert_eq!(session.available_players().len(), 30);

    let mut seen = HashSet::new();
    for team in session.teams() {
        for p in &team.roster {
            assert!(seen.insert(p.id), "player {} drafted twice", p.id);
            assert!(!session.is_available(p.id));
        }
    }
}

#[test]
fn user_picks_first_and_last_in_snake_rounds() {
    let (mut session, mut rng) = setup(
        3,
        4,
        3,
        DraftType::Snake,
        UserDraftPosition::First,
        40,
    );
    play_out(&mut session, &mut rng);
    let user_picks: Vec<usize> = session
        .drafted_players()
        .iter()
        .filter(|d| d.team_id == 1)
        .map(|d| d.pick_number)
        .collect();
    assert_eq!(user_picks, vec![1, 8, 9, 16]);
}

#[test]
fn seeded_drafts_are_reproducible() {
    let run = |seed| {
        let (mut session, mut rng) = setup(
            seed,
            6,
            7,
            DraftType::Random,
            UserDraftPosition::Random,
            80,
        );
        play_out(&mut session, &mut rng);
        history(&session)
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn short_pool_ends_with_exhaustion() {
    let (mut session, mut rng) = setup(
        5,
        5,
        5,
        DraftType::Linear,
        UserDraftPosition::Last,
        20,
    );
    let outcome = play_out(&mut session, &mut rng);
    assert!(matches!(outcome, TurnOutcome::PoolExhausted));
    assert!(session.available_players().is_empty());
    let rostered: usize = session.teams().iter().map(|t| t.roster.len()).sum();
    assert_eq!(rostered, 20);
}

#[test]
fn ai_teams_spread_picks_across_positions() {
    let (mut session, mut rng) = setup(
        21,
        5,
        5,
        DraftType::Snake,
        UserDraftPosition::First,
        100,
    );
    play_out(&mut session, &mut rng);
    for team in session.teams().iter().filter(|t| !t.is_user) {
        let positions: HashSet<Position> =
            team.roster.iter().map(|p| p.primary_position).collect();
        assert!(
            positions.len() >= 3,
            "{} drafted only {:?}",
            team.name,
            positions
        );
    }
}
