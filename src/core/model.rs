//! Record types for the two persisted collections
//!
//! These are the domain-facing shapes. Backend-specific document layouts
//! (BSON `_id` handling and the like) stay inside the store backends and
//! convert to and from these types at the boundary.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::serde_helpers::serialize_object_id_as_hex_string;
use serde::{Deserialize, Serialize};

/// A registered user.
///
/// Usernames are unique by convention only; nothing enforces uniqueness, so
/// duplicate sign-ups produce duplicate records and both are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Username, at most 15 characters
    pub username: String,
    /// Avatar URL or identifier
    pub avatar: String,
}

/// A stored tweet, identity assigned by the store on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tweet {
    /// Store-assigned identifier, rendered as its hex form
    #[serde(serialize_with = "serialize_object_id_as_hex_string")]
    pub id: ObjectId,
    /// Username of the author as given at creation time
    pub username: String,
    /// Tweet text, free-form
    pub tweet: String,
    /// Snapshot of the author's avatar at creation time; never updated
    pub avatar: String,
}

/// A tweet about to be inserted; the store assigns the identifier.
#[derive(Debug, Clone)]
pub struct TweetDraft {
    /// Username of the author
    pub username: String,
    /// Tweet text
    pub tweet: String,
    /// Avatar copied from the author's user record
    pub avatar: String,
}

/// Fields replaced by a tweet update. The avatar snapshot is not touched.
#[derive(Debug, Clone)]
pub struct TweetUpdate {
    /// New username value
    pub username: String,
    /// New tweet text
    pub tweet: String,
}
