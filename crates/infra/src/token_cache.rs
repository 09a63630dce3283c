use skolero_utils::create_random_secret;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const TOKEN_LENGTH: usize = 32;

/// In-memory cache of opaque bearer tokens. Tokens live for the lifetime
/// of the process; a restart simply requires clients to create a new
/// session.
#[derive(Clone)]
pub struct TokenCache {
    tokens: Arc<Mutex<HashMap<String, String>>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Issues a fresh opaque token bound to the email
    pub fn issue(&self, email: &str) -> String {
        let token = create_random_secret(TOKEN_LENGTH);
        let mut tokens = self.tokens.lock().unwrap();
        tokens.insert(token.clone(), email.to_string());
        token
    }

    /// Resolves a presented token to the email it was issued for
    pub fn resolve(&self, token: &str) -> Option<String> {
        let tokens = self.tokens.lock().unwrap();
        tokens.get(token).cloned()
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_resolves_to_email() {
        let cache = TokenCache::new();
        let token = cache.issue("student@skolero.test");
        assert_eq!(cache.resolve(&token), Some("student@skolero.test".into()));
    }

    #[test]
    fn unknown_token_does_not_resolve() {
        let cache = TokenCache::new();
        assert_eq!(cache.resolve("bogus"), None);
    }

    #[test]
    fn tokens_are_unique_per_issue() {
        let cache = TokenCache::new();
        let t1 = cache.issue("student@skolero.test");
        let t2 = cache.issue("student@skolero.test");
        assert_ne!(t1, t2);
        assert!(cache.resolve(&t1).is_some());
        assert!(cache.resolve(&t2).is_some());
    }
}
