use puzzle_types::{LevelResult, LevelSubmission};

pub struct ProgressEngine;

impl ProgressEngine {
    /// Merge a finished attempt into a user's level results.
    ///
    /// The matching record gets one more attempt. A strictly faster time
    /// replaces the best time together with the help and click counts of
    /// that attempt. An unknown level is appended with a single attempt, so
    /// records for other levels are never touched.
    pub fn record_attempt(
        existing: Option<Vec<LevelResult>>,
        submission: &LevelSubmission,
    ) -> Vec<LevelResult> {
        let Some(mut results) = existing else {
            return vec![LevelResult::first_attempt(submission)];
        };

        match results
            .iter_mut()
            .find(|result| result.level_name == submission.level_name)
        {
            Some(result) => {
                result.attempts += 1;
                if submission.time_passed < result.best_time_passed {
                    tracing::debug!(
                        "New best time on '{}': {} -> {}",
                        result.level_name,
                        result.best_time_passed,
                        submission.time_passed
                    );
                    result.best_time_passed = submission.time_passed;
                    result.help_used_on_best = submission.help_number_used;
                    result.clicks_on_best = submission.clicks_num;
                }
            }
            None => results.push(LevelResult::first_attempt(submission)),
        }

        results
    }

    /// Result for a single level, if the user ever reported it
    pub fn find_level<'a>(results: &'a [LevelResult], level_name: &str) -> Option<&'a LevelResult> {
        results.iter().find(|result| result.level_name == level_name)
    }
}
