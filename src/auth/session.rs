use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use rand::distributions::Alphanumeric;
use rand::Rng;
use time::{Duration, OffsetDateTime};

/// Server-side state behind one opaque session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub expires_at: OffsetDateTime,
}

impl Session {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= OffsetDateTime::now_utc()
    }
}

const TOKEN_LEN: usize = 48;

/// Token -> session map shared across request handlers.
///
/// Sessions live in memory only; a restart logs everyone out. Expiry is
/// absolute from issuance, never extended by activity.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh token expiring `ttl` from now. Expired entries are
    /// swept here so the map cannot grow without bound.
    pub fn create(&self, user_id: i64, username: &str, ttl: Duration) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        let session = Session {
            user_id,
            username: username.to_string(),
            expires_at: OffsetDateTime::now_utc() + ttl,
        };
        let mut sessions = self.inner.lock().expect("session store lock poisoned");
        sessions.retain(|_, s| !s.is_expired());
        sessions.insert(token.clone(), session);
        token
    }

    /// Pure lookup: expired sessions read as absent, nothing is mutated.
    pub fn get(&self, token: &str) -> Option<Session> {
        let sessions = self.inner.lock().expect("session store lock poisoned");
        sessions.get(token).filter(|s| !s.is_expired()).cloned()
    }

    /// Invalidate a session immediately. Returns whether it existed.
    pub fn remove(&self, token: &str) -> bool {
        self.inner
            .lock()
            .expect("session store lock poisoned")
            .remove(token)
            .is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_then_get_roundtrip() {
        let store = SessionStore::new();
        let token = store.create(1, "admin", Duration::hours(24));
        let session = store.get(&token).expect("session should exist");
        assert_eq!(session.user_id, 1);
        assert_eq!(session.username, "admin");
        assert!(!session.is_expired());
    }

    #[test]
    fn tokens_are_unique_and_opaque() {
        let store = SessionStore::new();
        let a = store.create(1, "admin", Duration::hours(1));
        let b = store.create(1, "admin", Duration::hours(1));
        assert_ne!(a, b);
        assert_eq!(a.len(), TOKEN_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn expired_sessions_read_as_absent() {
        let store = SessionStore::new();
        let token = store.create(1, "admin", Duration::seconds(-1));
        assert!(store.get(&token).is_none());
    }

    #[test]
    fn remove_invalidates_immediately() {
        let store = SessionStore::new();
        let token = store.create(1, "admin", Duration::hours(1));
        assert!(store.remove(&token));
        assert!(store.get(&token).is_none());
        assert!(!store.remove(&token));
    }

    #[test]
    fn create_sweeps_expired_entries() {
        let store = SessionStore::new();
        let stale = store.create(1, "admin", Duration::seconds(-1));
        store.create(1, "admin", Duration::hours(1));
        let sessions = store.inner.lock().unwrap();
        assert!(!sessions.contains_key(&stale));
        assert_eq!(sessions.len(), 1);
    }

    #[test]
    fn unknown_token_is_absent() {
        let store = SessionStore::new();
        assert!(store.get("no-such-token").is_none());
    }
}
