//! Bearer credential storage.
//!
//! Every gateway request carries a bearer credential. Where the credential
//! comes from (login flow, refresh flow) is the auth collaborator's concern;
//! the gateway only needs to read it and to wipe it when the server rejects
//! it, which forces the collaborator to re-authenticate.

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Holder of the caller's bearer credential.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the current token, if one is stored.
    async fn token(&self) -> Option<String>;

    /// Replaces the stored token.
    async fn store(&self, token: String);

    /// Wipes the stored token (e.g. after the server rejected it).
    async fn invalidate(&self);
}

/// In-memory credential store.
///
/// Sufficient for a single client process; durable token storage belongs to
/// the auth collaborator.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    token: RwLock<Option<String>>,
}

impl InMemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a token.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    async fn store(&self, token: String) {
        *self.token.write().await = Some(token);
    }

    async fn invalidate(&self) {
        *self.token.write().await = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_and_read_token() {
        let store = InMemoryCredentialStore::new();
        assert_eq!(store.token().await, None);

        store.store("tok-123".to_string()).await;
        assert_eq!(store.token().await, Some("tok-123".to_string()));
    }

    #[tokio::test]
    async fn test_invalidate_wipes_token() {
        let store = InMemoryCredentialStore::with_token("tok-123");
        store.invalidate().await;
        assert_eq!(store.token().await, None);
    }
}
