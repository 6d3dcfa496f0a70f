mod common;

use common::*;
use puzzle_core::{Leaderboard, ProgressEngine};

#[test]
fn test_level_scenario() {
    let mut user = create_test_account("U");

    let results = play(&mut user, &[create_submission("L1", 30.0, 2, 5)]);
    assert_eq!(results[0].attempts, 1);
    assert_eq!(results[0].best_time_passed, 30.0);

    let results = play(&mut user, &[create_submission("L1", 25.0, 1, 3)]);
    assert_eq!(results[0].attempts, 2);
    assert_eq!(results[0].best_time_passed, 25.0);

    let results = play(&mut user, &[create_submission("L1", 40.0, 0, 1)]);
    assert_eq!(results[0].attempts, 3);
    assert_eq!(results[0].best_time_passed, 25.0);
}

#[test]
fn test_leaderboard_scenario() {
    let mut a = create_test_account("A");
    let mut b = create_test_account("B");
    play(&mut a, &[create_submission("L2", 20.0, 0, 4)]);
    play(&mut b, &[create_submission("L2", 15.0, 1, 6)]);

    let board = Leaderboard::rank_level(&[a.clone(), b.clone()], "L2");

    let ranked: Vec<_> = board
        .iter()
        .map(|entry| (entry.user_id, entry.level_result.best_time_passed))
        .collect();
    assert_eq!(ranked, vec![(b.id, 15.0), (a.id, 20.0)]);
}

#[test]
fn test_levels_are_independent() {
    let mut user = create_test_account("multi");
    play(
        &mut user,
        &[
            create_submission("L1", 10.0, 0, 2),
            create_submission("L2", 99.0, 3, 8),
            create_submission("L1", 8.0, 0, 2),
            create_submission("L3", 1.5, 0, 1),
        ],
    );

    let results = user.level_results.as_deref().unwrap();
    assert_eq!(results.len(), 3);
    let l2 = ProgressEngine::find_level(results, "L2").unwrap();
    assert_eq!(l2.attempts, 1);
    assert_eq!(l2.best_time_passed, 99.0);
    let l1 = ProgressEngine::find_level(results, "L1").unwrap();
    assert_eq!(l1.attempts, 2);
    assert_eq!(l1.best_time_passed, 8.0);
}
