use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-wide secret token storage.
///
/// Exactly one secret exists per process lifetime. It is generated at
/// construction and overwritten wholesale by [`rotate`](Self::rotate);
/// no history is retained.
#[derive(Clone)]
pub struct SecretStore {
    secret: Arc<RwLock<String>>,
}

impl SecretStore {
    /// Creates a store holding a freshly generated secret.
    pub fn new() -> Self {
        Self {
            secret: Arc::new(RwLock::new(Self::generate())),
        }
    }

    fn generate() -> String {
        Uuid::new_v4().to_string()
    }

    /// Returns the current secret.
    pub async fn current(&self) -> String {
        self.secret.read().await.clone()
    }

    /// Replaces the secret with a freshly generated value and returns it.
    ///
    /// The previous value stops authorizing the moment the write lock is
    /// released.
    pub async fn rotate(&self) -> String {
        let next = Self::generate();
        *self.secret.write().await = next.clone();
        next
    }
}

impl Default for SecretStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fresh_stores_hold_distinct_secrets() {
        let a = SecretStore::new();
        let b = SecretStore::new();

        assert_ne!(a.current().await, b.current().await);
    }

    #[tokio::test]
    async fn rotate_replaces_the_secret() {
        let store = SecretStore::new();
        let before = store.current().await;

        let rotated = store.rotate().await;

        assert_ne!(before, rotated);
        assert_eq!(store.current().await, rotated);
    }

    #[tokio::test]
    async fn clones_share_the_same_secret() {
        let store = SecretStore::new();
        let clone = store.clone();

        let rotated = store.rotate().await;

        assert_eq!(clone.current().await, rotated);
    }
}
