use puzzle_types::{LevelResult, LevelSubmission, UserAccount, UserRole};
use uuid::Uuid;

/// Creates a submission for the given level
pub fn create_submission(level: &str, time: f64, help: i32, clicks: i32) -> LevelSubmission {
    LevelSubmission {
        level_name: level.to_string(),
        time_passed: time,
        help_number_used: help,
        clicks_num: clicks,
    }
}

/// Creates an account without any results
pub fn create_test_account(login: &str) -> UserAccount {
    UserAccount {
        id: Uuid::new_v4(),
        login: login.to_string(),
        password_hash: "salt$digest".to_string(),
        role: UserRole::Default,
        level_results: None,
        created_at: "2024-01-01T00:00:00+00:00".to_string(),
    }
}

/// Applies a list of submissions to an account, like repeated upserts would
#[allow(dead_code)]
pub fn play(account: &mut UserAccount, submissions: &[LevelSubmission]) -> Vec<LevelResult> {
    for submission in submissions {
        let updated =
            puzzle_core::ProgressEngine::record_attempt(account.level_results.take(), submission);
        account.level_results = Some(updated);
    }
    account.level_results.clone().unwrap_or_default()
}
