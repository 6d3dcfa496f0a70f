use puzzle_types::{Credentials, LevelSubmission, NewAuto};

pub const MAX_LOGIN_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Level name must not be empty")]
    EmptyLevelName,
    #[error("Time passed must be a non-negative number")]
    InvalidTime,
    #[error("{field} must not be negative")]
    NegativeCount { field: &'static str },
    #[error("Login must be between 1 and 64 characters")]
    InvalidLogin,
    #[error("Password must not be empty")]
    EmptyPassword,
    #[error("Auto name must not be empty")]
    EmptyAutoName,
}

pub fn validate_submission(submission: &LevelSubmission) -> Result<(), ValidationError> {
    if submission.level_name.trim().is_empty() {
        return Err(ValidationError::EmptyLevelName);
    }
    if !submission.time_passed.is_finite() || submission.time_passed < 0.0 {
        return Err(ValidationError::InvalidTime);
    }
    if submission.help_number_used < 0 {
        return Err(ValidationError::NegativeCount {
            field: "help_number_used",
        });
    }
    if submission.clicks_num < 0 {
        return Err(ValidationError::NegativeCount {
            field: "clicks_num",
        });
    }
    Ok(())
}

pub fn validate_credentials(credentials: &Credentials) -> Result<(), ValidationError> {
    let login = credentials.login.trim();
    if login.is_empty() || login.chars().count() > MAX_LOGIN_LENGTH {
        return Err(ValidationError::InvalidLogin);
    }
    if credentials.password.is_empty() {
        return Err(ValidationError::EmptyPassword);
    }
    Ok(())
}

pub fn validate_new_auto(auto: &NewAuto) -> Result<(), ValidationError> {
    if auto.name.trim().is_empty() {
        return Err(ValidationError::EmptyAutoName);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use puzzle_types::AutoMetaInfo;

    fn submission() -> LevelSubmission {
        LevelSubmission {
            level_name: "L1".to_string(),
            time_passed: 30.0,
            help_number_used: 2,
            clicks_num: 5,
        }
    }

    #[test]
    fn test_valid_submission() {
        assert_eq!(validate_submission(&submission()), Ok(()));
    }

    #[test]
    fn test_submission_rejects_bad_values() {
        let mut blank = submission();
        blank.level_name = "   ".to_string();
        assert_eq!(
            validate_submission(&blank),
            Err(ValidationError::EmptyLevelName)
        );

        let mut negative_time = submission();
        negative_time.time_passed = -1.0;
        assert_eq!(
            validate_submission(&negative_time),
            Err(ValidationError::InvalidTime)
        );

        let mut nan_time = submission();
        nan_time.time_passed = f64::NAN;
        assert_eq!(
            validate_submission(&nan_time),
            Err(ValidationError::InvalidTime)
        );

        let mut negative_clicks = submission();
        negative_clicks.clicks_num = -3;
        assert_eq!(
            validate_submission(&negative_clicks),
            Err(ValidationError::NegativeCount {
                field: "clicks_num"
            })
        );
    }

    #[test]
    fn test_credentials_validation() {
        let ok = Credentials {
            login: "alice".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(validate_credentials(&ok), Ok(()));

        let long_login = Credentials {
            login: "x".repeat(MAX_LOGIN_LENGTH + 1),
            password: "secret".to_string(),
        };
        assert_eq!(
            validate_credentials(&long_login),
            Err(ValidationError::InvalidLogin)
        );

        let no_password = Credentials {
            login: "alice".to_string(),
            password: String::new(),
        };
        assert_eq!(
            validate_credentials(&no_password),
            Err(ValidationError::EmptyPassword)
        );
    }

    #[test]
    fn test_new_auto_requires_name() {
        let auto = NewAuto {
            name: " ".to_string(),
            meta_info: AutoMetaInfo {
                url: String::new(),
                description: String::new(),
                types: Vec::new(),
                history: String::new(),
            },
        };
        assert_eq!(validate_new_auto(&auto), Err(ValidationError::EmptyAutoName));
    }
}
