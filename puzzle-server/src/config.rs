use std::env;
use std::str::FromStr;

#[derive(Debug, thiserror::Error)]
#[error("Invalid {name}: '{value}'")]
pub struct ConfigError {
    pub name: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub session_cookie_name: String,
    pub cookie_secure: bool,
    pub session_ttl_seconds: u64,
    pub cors_origin: String,
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = var_or(name, default);
    value.parse().map_err(|_| ConfigError { name, value })
}

impl Config {
    /// Reads the configuration from the environment, falling back to local defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: var_or("HOST", "127.0.0.1"),
            port: parse_var("PORT", "8080")?,
            database_url: var_or("DATABASE_URL", "sqlite://puzzle_arcade.db?mode=rwc"),
            session_cookie_name: var_or("SESSION_COOKIE_NAME", "session_id"),
            cookie_secure: parse_var("COOKIE_SECURE", "false")?,
            session_ttl_seconds: parse_var("SESSION_TTL_SECONDS", "604800")?,
            cors_origin: var_or("CORS_ORIGIN", "http://localhost:5173"),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            database_url: "sqlite://puzzle_arcade.db?mode=rwc".to_string(),
            session_cookie_name: "session_id".to_string(),
            cookie_secure: false,
            session_ttl_seconds: 604800,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_reports_name_and_value() {
        // SAFETY: the variable name is unique to this test
        unsafe { env::set_var("PUZZLE_TEST_BAD_PORT", "eighty") };

        let result: Result<u16, _> = parse_var("PUZZLE_TEST_BAD_PORT", "8080");
        let err = result.unwrap_err();
        assert_eq!(err.name, "PUZZLE_TEST_BAD_PORT");
        assert_eq!(err.to_string(), "Invalid PUZZLE_TEST_BAD_PORT: 'eighty'");

        unsafe { env::remove_var("PUZZLE_TEST_BAD_PORT") };
    }

    #[test]
    fn test_parse_var_default() {
        let ttl: u64 = parse_var("PUZZLE_TEST_UNSET_TTL", "60").unwrap();
        assert_eq!(ttl, 60);
    }
}
