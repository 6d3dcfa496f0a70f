use std::time::{Duration, Instant};

use dashmap::DashMap;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub last_activity: Instant,
}

/// Server-side session table. Clients only ever see the opaque token,
/// carried in a cookie.
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    cookie_name: &'static str,
    cookie_secure: bool,
}

impl SessionStore {
    pub fn new(cookie_name: &'static str, cookie_secure: bool) -> Self {
        Self {
            sessions: DashMap::new(),
            cookie_name,
            cookie_secure,
        }
    }

    pub fn cookie_name(&self) -> &'static str {
        self.cookie_name
    }

    pub fn create(&self, user_id: Uuid) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                user_id,
                last_activity: Instant::now(),
            },
        );
        tracing::debug!("Session opened for user {}", user_id);
        token
    }

    /// User behind a token, refreshing its activity time
    pub fn resolve(&self, token: &str) -> Option<Uuid> {
        let mut session = self.sessions.get_mut(token)?;
        session.last_activity = Instant::now();
        Some(session.user_id)
    }

    pub fn remove(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Drops sessions idle for longer than `ttl`, returns how many were dropped
    pub fn cleanup_expired(&self, ttl: Duration) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, session| session.last_activity.elapsed() < ttl);
        let removed = before.saturating_sub(self.sessions.len());
        if removed > 0 {
            tracing::info!("Expired {} idle sessions", removed);
        }
        removed
    }

    pub fn set_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            self.cookie_name, token
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }

    pub fn clear_cookie(&self) -> String {
        let mut cookie = format!(
            "{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0",
            self.cookie_name
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_resolve_remove() {
        let store = SessionStore::new("session_id", false);
        let user_id = Uuid::new_v4();

        let token = store.create(user_id);
        assert_eq!(store.resolve(&token), Some(user_id));
        assert_eq!(store.len(), 1);

        assert!(store.remove(&token));
        assert_eq!(store.resolve(&token), None);
        assert!(!store.remove(&token));
        assert!(store.is_empty());
    }

    #[test]
    fn test_tokens_are_unique_per_login() {
        let store = SessionStore::new("session_id", false);
        let user_id = Uuid::new_v4();

        let first = store.create(user_id);
        let second = store.create(user_id);
        assert_ne!(first, second);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_cookie_strings() {
        let store = SessionStore::new("sid", true);

        assert_eq!(
            store.set_cookie("tok"),
            "sid=tok; Path=/; HttpOnly; SameSite=Lax; Secure"
        );
        assert!(store.clear_cookie().contains("Max-Age=0"));
        assert_eq!(store.cookie_name(), "sid");
    }

    #[test]
    fn test_cleanup_expired() {
        let store = SessionStore::new("session_id", false);
        store.create(Uuid::new_v4());
        store.create(Uuid::new_v4());

        assert_eq!(store.cleanup_expired(Duration::from_secs(3600)), 0);
        assert_eq!(store.cleanup_expired(Duration::ZERO), 2);
        assert!(store.is_empty());
    }
}
