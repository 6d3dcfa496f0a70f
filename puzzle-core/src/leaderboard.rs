use puzzle_types::{LeaderboardEntry, UserAccount};

use crate::ProgressEngine;

pub struct Leaderboard;

impl Leaderboard {
    /// Rank every account that has a result for `level_name`, fastest first.
    ///
    /// Accounts without a result for that exact level are left out. The sort
    /// is stable, so equal best times keep the order of `accounts`.
    pub fn rank_level(accounts: &[UserAccount], level_name: &str) -> Vec<LeaderboardEntry> {
        let mut entries: Vec<LeaderboardEntry> = accounts
            .iter()
            .filter_map(|account| {
                let results = account.level_results.as_deref()?;
                let result = ProgressEngine::find_level(results, level_name)?;
                Some(LeaderboardEntry {
                    rank: 0,
                    user_id: account.id,
                    login: account.login.clone(),
                    level_result: result.clone(),
                })
            })
            .collect();

        entries.sort_by(|a, b| {
            a.level_result
                .best_time_passed
                .total_cmp(&b.level_result.best_time_passed)
        });

        for (index, entry) in entries.iter_mut().enumerate() {
            entry.rank = (index + 1) as u32;
        }

        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_types::{LevelResult, UserRole};
    use uuid::Uuid;

    fn result(level: &str, best: f64) -> LevelResult {
        LevelResult {
            level_name: level.to_string(),
            best_time_passed: best,
            help_used_on_best: 0,
            clicks_on_best: 0,
            attempts: 1,
        }
    }

    fn account(login: &str, results: Option<Vec<LevelResult>>) -> UserAccount {
        UserAccount {
            id: Uuid::new_v4(),
            login: login.to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Default,
            level_results: results,
            created_at: "2024-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_rank_level_orders_by_best_time() {
        let a = account("a", Some(vec![result("L2", 20.0)]));
        let b = account("b", Some(vec![result("L2", 15.0)]));
        let accounts = vec![a.clone(), b.clone()];

        let board = Leaderboard::rank_level(&accounts, "L2");

        assert_eq!(board.len(), 2);
        assert_eq!(board[0].user_id, b.id);
        assert_eq!(board[0].level_result.best_time_passed, 15.0);
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].user_id, a.id);
        assert_eq!(board[1].level_result.best_time_passed, 20.0);
        assert_eq!(board[1].rank, 2);
    }

    #[test]
    fn test_rank_level_skips_users_without_level() {
        let accounts = vec![
            account("no-results", None),
            account("empty", Some(Vec::new())),
            account("other-level", Some(vec![result("L1", 3.0)])),
            account("match", Some(vec![result("L1", 9.0), result("L3", 12.0)])),
        ];

        let board = Leaderboard::rank_level(&accounts, "L3");

        assert_eq!(board.len(), 1);
        assert_eq!(board[0].login, "match");
        assert_eq!(board[0].level_result.level_name, "L3");
    }

    #[test]
    fn test_rank_level_matches_exact_name() {
        let accounts = vec![account("a", Some(vec![result("level-1", 5.0)]))];

        assert!(Leaderboard::rank_level(&accounts, "level").is_empty());
        assert!(Leaderboard::rank_level(&accounts, "LEVEL-1").is_empty());
    }

    #[test]
    fn test_rank_level_ties_keep_scan_order() {
        let first = account("first", Some(vec![result("L1", 10.0)]));
        let second = account("second", Some(vec![result("L1", 10.0)]));
        let fastest = account("fastest", Some(vec![result("L1", 4.0)]));
        let accounts = vec![first, second, fastest];

        let board = Leaderboard::rank_level(&accounts, "L1");
        let logins: Vec<&str> = board.iter().map(|entry| entry.login.as_str()).collect();

        assert_eq!(logins, vec!["fastest", "first", "second"]);
    }

    #[test]
    fn test_rank_level_empty_store() {
        assert!(Leaderboard::rank_level(&[], "L1").is_empty());
    }
}
