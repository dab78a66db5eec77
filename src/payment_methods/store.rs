use std::collections::HashMap;
use std::sync::RwLock;

use super::dto::PaymentToken;

/// Boundary contract for the external token store. Mutations are atomic per
/// user from this crate's point of view; the store owns default-flag
/// exclusivity.
pub trait TokenStore {
    fn tokens_for_user(&self, user_id: u64) -> Vec<PaymentToken>;
    fn remove_token(&self, user_id: u64, token_id: &str) -> bool;
    fn set_default_token(&self, user_id: u64, token_id: &str);
}

#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    tokens: RwLock<HashMap<u64, Vec<PaymentToken>>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, token: PaymentToken) {
        let mut guard = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        let entry = guard.entry(token.user_id).or_default();
        if token.is_default {
            for existing in entry.iter_mut() {
                existing.is_default = false;
            }
        }
        entry.push(token);
    }
}

impl TokenStore for InMemoryTokenStore {
    fn tokens_for_user(&self, user_id: u64) -> Vec<PaymentToken> {
        let guard = self.tokens.read().unwrap_or_else(|e| e.into_inner());
        guard.get(&user_id).cloned().unwrap_or_default()
    }

    fn remove_token(&self, user_id: u64, token_id: &str) -> bool {
        let mut guard = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        let Some(entry) = guard.get_mut(&user_id) else {
            return false;
        };
        let before = entry.len();
        entry.retain(|token| token.id != token_id);
        entry.len() != before
    }

    fn set_default_token(&self, user_id: u64, token_id: &str) {
        let mut guard = self.tokens.write().unwrap_or_else(|e| e.into_inner());
        if let Some(entry) = guard.get_mut(&user_id) {
            for token in entry.iter_mut() {
                token.is_default = token.id == token_id;
            }
        }
    }
}
