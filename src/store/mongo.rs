//! MongoDB store backend
//!
//! Thin mapping from the [`DocumentStore`] trait onto the `users` and
//! `tweets` collections. Document layouts live here so BSON `_id`
//! handling never leaks into the domain types.

use crate::core::config::StoreConfig;
use crate::core::{Error, Result, Tweet, TweetDraft, TweetUpdate, User};
use crate::store::DocumentStore;
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

/// Persisted layout of a user record
#[derive(Debug, Serialize, Deserialize)]
struct UserDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    username: String,
    avatar: String,
}

/// Persisted layout of a tweet record
#[derive(Debug, Serialize, Deserialize)]
struct TweetDoc {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    username: String,
    tweet: String,
    avatar: String,
}

impl From<User> for UserDoc {
    fn from(user: User) -> Self {
        Self {
            id: None,
            username: user.username,
            avatar: user.avatar,
        }
    }
}

impl From<UserDoc> for User {
    fn from(doc: UserDoc) -> Self {
        Self {
            username: doc.username,
            avatar: doc.avatar,
        }
    }
}

impl TweetDoc {
    fn into_tweet(self) -> Result<Tweet> {
        let id = self
            .id
            .ok_or_else(|| Error::store("tweet document missing _id"))?;
        Ok(Tweet {
            id,
            username: self.username,
            tweet: self.tweet,
            avatar: self.avatar,
        })
    }
}

/// MongoDB backend
pub struct MongoStore {
    users: Collection<UserDoc>,
    tweets: Collection<TweetDoc>,
}

impl MongoStore {
    /// Connect to the server named by `config` and verify it responds.
    ///
    /// The database comes from the connection string's path segment, or
    /// from `store.database` when the string names none.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let client = Client::with_uri_str(config.url()?).await?;

        let db = match client.default_database() {
            Some(db) => db,
            None => match &config.database {
                Some(name) => client.database(name),
                None => {
                    return Err(Error::config(
                        "connection string names no database: set store.database or CHIRP_DATABASE",
                    ));
                }
            },
        };

        // Round-trip before accepting any request
        db.run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database = %db.name(), "connected to document store");

        Ok(Self {
            users: db.collection("users"),
            tweets: db.collection("tweets"),
        })
    }
}

#[async_trait]
impl DocumentStore for MongoStore {
    async fn insert_user(&self, user: User) -> Result<()> {
        self.users.insert_one(UserDoc::from(user)).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let docs: Vec<UserDoc> = self.users.find(doc! {}).await?.try_collect().await?;
        Ok(docs.into_iter().map(User::from).collect())
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let found = self.users.find_one(doc! { "username": username }).await?;
        Ok(found.map(User::from))
    }

    async fn insert_tweet(&self, draft: TweetDraft) -> Result<ObjectId> {
        let doc = TweetDoc {
            id: None,
            username: draft.username,
            tweet: draft.tweet,
            avatar: draft.avatar,
        };
        let result = self.tweets.insert_one(doc).await?;
        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| Error::store("store returned a non-ObjectId identifier"))
    }

    async fn list_tweets(&self) -> Result<Vec<Tweet>> {
        let docs: Vec<TweetDoc> = self
            .tweets
            .find(doc! {})
            .sort(doc! { "_id": -1 })
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(TweetDoc::into_tweet).collect()
    }

    async fn find_tweet_by_id(&self, id: ObjectId) -> Result<Option<Tweet>> {
        match self.tweets.find_one(doc! { "_id": id }).await? {
            Some(doc) => Ok(Some(doc.into_tweet()?)),
            None => Ok(None),
        }
    }

    async fn update_tweet(&self, id: ObjectId, update: TweetUpdate) -> Result<()> {
        let result = self
            .tweets
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "username": update.username,
                    "tweet": update.tweet,
                }},
            )
            .await?;

        if result.matched_count == 0 {
            return Err(Error::NotFound("tweet".to_string()));
        }
        Ok(())
    }

    async fn delete_tweet(&self, id: ObjectId) -> Result<bool> {
        let result = self.tweets.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
