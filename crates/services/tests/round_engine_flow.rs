use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;

use quiz_core::model::{Feedback, TeamCount};
use quiz_core::{QuizSettings, catalog};
use services::{AnswerOutcome, Effect, QuizEngine, SessionPhase, Tick};

#[derive(Clone, Copy)]
enum Play {
    Right,
    Wrong,
    Timeout,
}

/// Plays a whole session with random choices and checks the engine invariants
/// after every transition.
fn play_random_session(seed: u64, teams: u8) {
    let roster = catalog::roster_for(None).unwrap();
    let mut engine = QuizEngine::seeded(roster, QuizSettings::standard(), seed);
    let mut chooser = StdRng::seed_from_u64(seed ^ 0xABCD);
    let team_count = TeamCount::new(teams).unwrap();
    engine.initialize(team_count).unwrap();

    let total = engine.session().unwrap().total_rounds();
    assert_eq!(total, 5 * u32::from(teams));

    let mut expected_scores = vec![0_u32; usize::from(teams)];
    let mut last_scores = expected_scores.clone();
    let mut finishes = 0;

    for n in 0..total {
        let session = engine.session().unwrap();
        assert_eq!(session.current_round(), n + 1);
        assert_eq!(session.current_team().index(), (n as usize) % usize::from(teams));

        let round = engine.round().unwrap();
        let ids: HashSet<_> = round.options().iter().map(|item| item.id.clone()).collect();
        assert_eq!(ids.len(), 4);
        assert!(ids.contains(&round.target().id));
        assert!(ids.iter().all(|id| engine.roster().contains(id)));

        let token = round.token();
        let team = session.current_team().index();
        let target = round.target().id.clone();
        let wrong = round
            .options()
            .iter()
            .find(|item| item.id != target)
            .unwrap()
            .id
            .clone();

        let play = match chooser.random_range(0..3) {
            0 => Play::Right,
            1 => Play::Wrong,
            _ => Play::Timeout,
        };
        match play {
            Play::Right => {
                assert_eq!(engine.submit_answer(&target).outcome, AnswerOutcome::Correct);
                expected_scores[team] += 1;
            }
            Play::Wrong => {
                assert_eq!(engine.submit_answer(&wrong).outcome, AnswerOutcome::Wrong);
            }
            Play::Timeout => loop {
                match engine.tick(token) {
                    Tick::Running { .. } => {}
                    Tick::Expired(_) => break,
                    Tick::Stale => panic!("open round went stale"),
                }
            },
        }

        // exactly one outcome per round; later events change nothing
        let feedback = engine.round().unwrap().feedback();
        assert_ne!(feedback, Feedback::None);
        assert_eq!(engine.submit_answer(&target).outcome, AnswerOutcome::Ignored);
        assert_eq!(engine.tick(token), Tick::Stale);
        assert_eq!(engine.round().unwrap().feedback(), feedback);

        let scores: Vec<_> = engine
            .session()
            .unwrap()
            .teams()
            .iter()
            .map(|t| t.score())
            .collect();
        assert_eq!(scores, expected_scores);
        assert!(scores.iter().zip(&last_scores).all(|(now, before)| now >= before));
        last_scores = scores;

        let effects = engine.advance_turn(token);
        if effects.contains(&Effect::Finished) {
            finishes += 1;
        }
        assert!(engine.advance_turn(token).is_empty());
    }

    assert_eq!(finishes, 1);
    assert_eq!(engine.phase(), SessionPhase::Finished);
    assert_eq!(engine.session().unwrap().current_round(), total);
    assert_eq!(engine.session().unwrap().history().len(), total as usize);

    let results = engine.results().unwrap();
    let mut expected_order: Vec<usize> = (0..usize::from(teams)).collect();
    expected_order.sort_by(|a, b| expected_scores[*b].cmp(&expected_scores[*a]));
    let order: Vec<_> = results.standings().iter().map(|s| s.team_id.index()).collect();
    assert_eq!(order, expected_order);
    if teams == 1 {
        assert!(!results.is_tie());
        assert!(results.solo_band().is_some());
    }
}

#[test]
fn random_sessions_hold_invariants() {
    for seed in 0..40 {
        for teams in 1..=4 {
            play_random_session(seed, teams);
        }
    }
}

#[test]
fn solo_example_round_trip() {
    let roster = catalog::roster_for(Some(quiz_core::model::ItemGroup::Barn)).unwrap();
    let mut engine = QuizEngine::seeded(roster, QuizSettings::standard(), 99);
    engine.initialize(TeamCount::SOLO).unwrap();

    let round = engine.round().unwrap();
    let token = round.token();
    let target = round.target().id.clone();
    assert!(engine.roster().contains(&target));
    assert_eq!(round.options().len(), 4);

    assert_eq!(engine.submit_answer(&target).outcome, AnswerOutcome::Correct);
    assert_eq!(engine.round().unwrap().feedback(), Feedback::Correct);
    assert_eq!(engine.session().unwrap().teams()[0].score(), 1);

    engine.advance_turn(token);
    let session = engine.session().unwrap();
    assert_eq!(session.current_round(), 2);
    assert_eq!(session.current_team().index(), 0);
}
