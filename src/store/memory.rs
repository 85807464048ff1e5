//! In-memory store backend
//!
//! Users keep insertion order (the "natural order" of the backend); tweets
//! are keyed by identifier in a `BTreeMap`, so reverse iteration yields
//! newest-first for free since identifiers increase monotonically within
//! a process. Locks are never held across an await point.

use crate::core::{Error, Result, Tweet, TweetDraft, TweetUpdate, User};
use crate::store::DocumentStore;
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// In-memory backend for development and tests
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    tweets: RwLock<BTreeMap<ObjectId, Tweet>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert_user(&self, user: User) -> Result<()> {
        self.users.write().push(user);
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.users.read().clone())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self
            .users
            .read()
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn insert_tweet(&self, draft: TweetDraft) -> Result<ObjectId> {
        let id = ObjectId::new();
        let tweet = Tweet {
            id,
            username: draft.username,
            tweet: draft.tweet,
            avatar: draft.avatar,
        };
        self.tweets.write().insert(id, tweet);
        Ok(id)
    }

    async fn list_tweets(&self) -> Result<Vec<Tweet>> {
        Ok(self.tweets.read().values().rev().cloned().collect())
    }

    async fn find_tweet_by_id(&self, id: ObjectId) -> Result<Option<Tweet>> {
        Ok(self.tweets.read().get(&id).cloned())
    }

    async fn update_tweet(&self, id: ObjectId, update: TweetUpdate) -> Result<()> {
        let mut tweets = self.tweets.write();
        let tweet = tweets
            .get_mut(&id)
            .ok_or_else(|| Error::NotFound("tweet".to_string()))?;
        tweet.username = update.username;
        tweet.tweet = update.tweet;
        Ok(())
    }

    async fn delete_tweet(&self, id: ObjectId) -> Result<bool> {
        Ok(self.tweets.write().remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(username: &str, avatar: &str) -> User {
        User {
            username: username.to_string(),
            avatar: avatar.to_string(),
        }
    }

    fn draft(username: &str, text: &str, avatar: &str) -> TweetDraft {
        TweetDraft {
            username: username.to_string(),
            tweet: text.to_string(),
            avatar: avatar.to_string(),
        }
    }

    #[tokio::test]
    async fn users_keep_insertion_order() {
        let store = MemoryStore::new();
        store.insert_user(user("ana", "a.png")).await.unwrap();
        store.insert_user(user("bob", "b.png")).await.unwrap();

        let users = store.list_users().await.unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].username, "ana");
        assert_eq!(users[1].username, "bob");
    }

    #[tokio::test]
    async fn duplicate_usernames_are_both_kept() {
        let store = MemoryStore::new();
        store.insert_user(user("ana", "a.png")).await.unwrap();
        store.insert_user(user("ana", "other.png")).await.unwrap();

        assert_eq!(store.list_users().await.unwrap().len(), 2);
        // Lookup finds the first match
        let found = store.find_user_by_username("ana").await.unwrap().unwrap();
        assert_eq!(found.avatar, "a.png");
    }

    #[tokio::test]
    async fn username_lookup_is_exact() {
        let store = MemoryStore::new();
        store.insert_user(user("ana", "a.png")).await.unwrap();

        assert!(store.find_user_by_username("Ana").await.unwrap().is_none());
        assert!(store.find_user_by_username("an").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn tweets_list_newest_first() {
        let store = MemoryStore::new();
        let first = store
            .insert_tweet(draft("ana", "first", "a.png"))
            .await
            .unwrap();
        let second = store
            .insert_tweet(draft("ana", "second", "a.png"))
            .await
            .unwrap();

        let tweets = store.list_tweets().await.unwrap();
        assert_eq!(tweets.len(), 2);
        assert_eq!(tweets[0].id, second);
        assert_eq!(tweets[1].id, first);
        assert!(tweets[0].id > tweets[1].id);
    }

    #[tokio::test]
    async fn update_replaces_text_but_not_avatar() {
        let store = MemoryStore::new();
        let id = store
            .insert_tweet(draft("ana", "hi", "a.png"))
            .await
            .unwrap();

        store
            .update_tweet(
                id,
                TweetUpdate {
                    username: "ana".to_string(),
                    tweet: "hi edited".to_string(),
                },
            )
            .await
            .unwrap();

        let tweet = store.find_tweet_by_id(id).await.unwrap().unwrap();
        assert_eq!(tweet.tweet, "hi edited");
        assert_eq!(tweet.avatar, "a.png");
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let err = store
            .update_tweet(
                ObjectId::new(),
                TweetUpdate {
                    username: "ana".to_string(),
                    tweet: "hi".to_string(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_reports_whether_a_record_was_removed() {
        let store = MemoryStore::new();
        let id = store
            .insert_tweet(draft("ana", "hi", "a.png"))
            .await
            .unwrap();

        assert!(store.delete_tweet(id).await.unwrap());
        assert!(!store.delete_tweet(id).await.unwrap());
        assert!(store.find_tweet_by_id(id).await.unwrap().is_none());
    }
}
