//! Persistence of the bearer token between requests.

use std::sync::{Arc, Mutex};

/// Durable home of the auth token (the visitor's session cookie in the web app).
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: Option<&str>);
}

/// Process-local store used by tests and non-web callers.
#[derive(Clone, Debug, Default)]
pub struct MemoryTokenStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.into()))),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        match self.token.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn save(&self, token: Option<&str>) {
        let mut guard = match self.token.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = token.map(str::to_string);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_saves_and_clears() {
        let store = MemoryTokenStore::new();
        assert_eq!(store.load(), None);
        store.save(Some("abc"));
        assert_eq!(store.load().as_deref(), Some("abc"));
        store.save(None);
        assert_eq!(store.load(), None);
    }
}
