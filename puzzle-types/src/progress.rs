use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Best-time record of one user on one level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LevelResult {
    pub level_name: String,
    /// Minimum time ever reported for this level, in seconds
    pub best_time_passed: f64,
    pub help_used_on_best: i32,
    pub clicks_on_best: i32,
    /// Total number of reports for this level, improved or not
    pub attempts: u32,
}

impl LevelResult {
    /// Record for a level reported for the first time
    pub fn first_attempt(submission: &LevelSubmission) -> Self {
        LevelResult {
            level_name: submission.level_name.clone(),
            best_time_passed: submission.time_passed,
            help_used_on_best: submission.help_number_used,
            clicks_on_best: submission.clicks_num,
            attempts: 1,
        }
    }
}

/// A single finished attempt as reported by the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LevelSubmission {
    pub level_name: String,
    pub time_passed: f64,
    pub help_number_used: i32,
    pub clicks_num: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub login: String,
    pub level_result: LevelResult,
}
