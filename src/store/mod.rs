//! Document store abstraction and backends
//!
//! Handlers talk to [`DocumentStore`], an object-safe trait over the two
//! record collections. [`create_store`] selects the backend from
//! configuration: MongoDB for real deployments, in-memory for development
//! and tests. The handle is built once at startup, before the listener
//! binds, and shared as an `Arc` by every request task.

pub mod memory;
pub mod mongo;

use crate::core::config::{StoreBackend, StoreConfig};
use crate::core::{Result, Tweet, TweetDraft, TweetUpdate, User};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;

pub use memory::MemoryStore;
pub use mongo::MongoStore;

/// Shared handle to the configured store backend
pub type SharedStore = Arc<dyn DocumentStore>;

/// Operations over the `users` and `tweets` collections.
///
/// No backend enforces username uniqueness; inserting a duplicate user
/// silently succeeds, matching the service's data model.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a user record. No duplicate check is performed.
    async fn insert_user(&self, user: User) -> Result<()>;

    /// All user records in the store's natural order.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Look up one user by exact username match.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Insert a tweet, returning the store-assigned identifier.
    async fn insert_tweet(&self, draft: TweetDraft) -> Result<ObjectId>;

    /// All tweets ordered by identifier descending (newest first).
    async fn list_tweets(&self) -> Result<Vec<Tweet>>;

    /// Look up one tweet by identifier.
    async fn find_tweet_by_id(&self, id: ObjectId) -> Result<Option<Tweet>>;

    /// Replace a tweet's username and text in place. The avatar snapshot
    /// is left untouched.
    async fn update_tweet(&self, id: ObjectId, update: TweetUpdate) -> Result<()>;

    /// Delete a tweet by identifier, returning whether a record was removed.
    async fn delete_tweet(&self, id: ObjectId) -> Result<bool>;
}

/// Build the store backend named by `config`.
///
/// The MongoDB backend connects and verifies the server before returning,
/// so a dead database fails the process at startup instead of on the first
/// request.
pub async fn create_store(config: &StoreConfig) -> Result<SharedStore> {
    match config.backend {
        StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreBackend::Mongodb => Ok(Arc::new(MongoStore::connect(config).await?)),
    }
}

/// Parse a path identifier into a store identifier.
///
/// Runs before any store call so a malformed identifier maps to an input
/// error rather than a store failure.
pub fn parse_id(id: &str) -> Result<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| crate::core::Error::InvalidId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_hex_object_ids() {
        let id = ObjectId::new();
        assert_eq!(parse_id(&id.to_hex()).unwrap(), id);
    }

    #[test]
    fn parse_id_rejects_malformed_input() {
        assert!(parse_id("not-an-id").is_err());
        assert!(parse_id("").is_err());
        // Right length, invalid hex
        assert!(parse_id("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
    }
}
