//! Durable client storage boundary for persisted session tokens.
//!
//! The host application supplies the real backing store (browser
//! localStorage, a keychain, a config file). The core only defines the
//! interface, the well-known keys, and the clearing discipline: tokens are
//! removed on logout (either outcome) and on login failure, and nowhere else.

use std::collections::HashMap;
use std::sync::Mutex;

/// Key under which the persisted access token is stored.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Legacy token key from earlier releases, still removed on logout so stale
/// credentials cannot linger after an upgrade.
pub const LEGACY_TOKEN_KEY: &str = "token";

/// String key-value storage for persisted session tokens.
pub trait TokenStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Remove every persisted session token, current and legacy.
pub fn clear_session_tokens(storage: &dyn TokenStorage) {
    storage.remove(ACCESS_TOKEN_KEY);
    storage.remove(LEGACY_TOKEN_KEY);
    tracing::debug!("Cleared persisted session tokens");
}

/// In-memory [`TokenStorage`], used in tests and by hosts without durable
/// storage.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("token storage lock poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("token storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().expect("token storage lock poisoned").remove(key);
    }
}
