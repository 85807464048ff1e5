//! HTTP request handlers for the chirp API
//!
//! Every handler is a single linear validate, act, respond sequence. All
//! body validation happens before any store access, and every path maps a
//! failure to an explicit response through the [`Error`] response mapping
//! at the bottom of this module.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::core::{AppState, Error, Tweet, TweetDraft, TweetUpdate, User};
use crate::store::parse_id;
use crate::validate;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Configured store backend
    pub store: crate::core::StoreBackend,
}

/// Pull a ruled string field out of an already-validated body.
fn str_field(body: &Value, name: &str) -> String {
    body.get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// `POST /sign-up` - register a user.
///
/// No duplicate check: two sign-ups with the same username both succeed.
pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<StatusCode, Error> {
    let violations = validate::check(validate::SIGN_UP_RULES, &body);
    if !violations.is_empty() {
        return Err(Error::Validation(violations));
    }

    let user = User {
        username: str_field(&body, "username"),
        avatar: str_field(&body, "avatar"),
    };

    state.store.insert_user(user).await?;
    Ok(StatusCode::CREATED)
}

/// `GET /sign-up` - list all users in the store's natural order.
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, Error> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// `POST /tweets` - post a tweet under an existing username.
///
/// The author's avatar is copied onto the tweet at creation time and never
/// refreshed afterwards.
pub async fn post_tweet(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> Result<StatusCode, Error> {
    let violations = validate::check(validate::TWEET_RULES, &body);
    if !violations.is_empty() {
        return Err(Error::Validation(violations));
    }

    let username = str_field(&body, "username");
    let author = state
        .store
        .find_user_by_username(&username)
        .await?
        .ok_or(Error::Unauthorized)?;

    let draft = TweetDraft {
        username,
        tweet: str_field(&body, "tweet"),
        avatar: author.avatar,
    };

    state.store.insert_tweet(draft).await?;
    Ok(StatusCode::CREATED)
}

/// `GET /tweets` - list all tweets, newest first.
pub async fn list_tweets(State(state): State<AppState>) -> Result<Json<Vec<Tweet>>, Error> {
    let tweets = state.store.list_tweets().await?;
    Ok(Json(tweets))
}

/// `PUT /tweets/{id}` - replace a tweet's username and text in place.
///
/// The avatar snapshot is not touched, so it can go stale relative to the
/// new username. Responds 204 with an empty body.
pub async fn update_tweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<StatusCode, Error> {
    let violations = validate::check(validate::TWEET_RULES, &body);
    if !violations.is_empty() {
        return Err(Error::Validation(violations));
    }

    let id = parse_id(&id)?;
    if state.store.find_tweet_by_id(id).await?.is_none() {
        return Err(Error::NotFound("tweet".to_string()));
    }

    let update = TweetUpdate {
        username: str_field(&body, "username"),
        tweet: str_field(&body, "tweet"),
    };
    state.store.update_tweet(id, update).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /tweets/{id}` - delete a tweet by identifier.
pub async fn delete_tweet(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, Error> {
    let id = parse_id(&id)?;
    if !state.store.delete_tweet(id).await? {
        return Err(Error::NotFound("tweet".to_string()));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /health` - health check.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: crate::VERSION.to_string(),
        store: state.config.store.backend,
    })
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidId(_) => StatusCode::BAD_REQUEST,
            Error::Config(_) | Error::Store(_) | Error::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = match self {
            Error::Validation(violations) => json!({
                "error": "Unprocessable Entity",
                "violations": violations,
            }),
            other => json!({ "error": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
