//! Collaborator interfaces for blog posts and arcade scores, plus the records
//! they exchange.
//!
//! The shell and the loop driver only ever see the `PostStore` /
//! `ScoreStore` traits.  `MemoryStore` backs tests; `JsonStore` backs the
//! binary with two JSON files in the data directory.

pub mod json;
pub mod memory;
pub mod submit;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use json::JsonStore;
pub use memory::MemoryStore;
pub use submit::{BackgroundSubmitter, Notice, NullSink, ScoreSink};

/// Highest score a submission may claim.
pub const MAX_SCORE: u64 = 10_000_000;
/// Longest accepted leaderboard name, in characters.
pub const MAX_NAME_LEN: usize = 20;
/// Entries shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("store lock poisoned")]
    Poisoned,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub is_public: bool,
    pub tags: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub id: u64,
    pub name: Option<String>,
    pub score: u64,
    pub game: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewScore {
    pub name: Option<String>,
    pub score: u64,
    pub game: String,
}

pub trait PostStore {
    /// Public posts, oldest first.
    fn public_posts(&self) -> Result<Vec<Post>, StoreError>;
    /// Every post, private ones included, oldest first.
    fn all_posts(&self) -> Result<Vec<Post>, StoreError>;
    fn create_post(&mut self, post: NewPost) -> Result<Post, StoreError>;
}

pub trait ScoreStore {
    fn submit_score(&mut self, score: NewScore) -> Result<ScoreRecord, StoreError>;
    /// Highest first; equal scores keep submission order.
    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError>;
}

// ── Validation ────────────────────────────────────────────────────────────────

fn invalid(field: &'static str, reason: impl Into<String>) -> StoreError {
    StoreError::Invalid { field, reason: reason.into() }
}

/// Range checks on a score submission.  Returns the cleaned-up name.
pub(crate) fn validate_score(score: &NewScore) -> Result<Option<String>, StoreError> {
    if score.score > MAX_SCORE {
        return Err(invalid("score", format!("{} exceeds {}", score.score, MAX_SCORE)));
    }
    score.name.as_deref().map(validate_name).transpose()
}

/// Trim a leaderboard name and check it is 1 to `MAX_NAME_LEN` characters.
pub fn validate_name(name: &str) -> Result<String, StoreError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(invalid("name", "must not be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(invalid("name", format!("longer than {} characters", MAX_NAME_LEN)));
    }
    Ok(name.to_string())
}

pub(crate) fn validate_post(post: &NewPost) -> Result<(), StoreError> {
    if post.title.trim().is_empty() {
        return Err(invalid("title", "must not be empty"));
    }
    Ok(())
}

/// Sort scores for the leaderboard and keep the first `limit`.
pub(crate) fn rank(scores: &[ScoreRecord], limit: usize) -> Vec<ScoreRecord> {
    let mut ranked = scores.to_vec();
    // Stable sort: ties keep insertion (oldest-first) order.
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked.truncate(limit);
    ranked
}

/// All posts in creation order.
pub(crate) fn all_in_order(posts: &[Post]) -> Vec<Post> {
    let mut all = posts.to_vec();
    all.sort_by_key(|p| (p.created_at, p.id));
    all
}

/// Public posts in creation order.
pub(crate) fn public_in_order(posts: &[Post]) -> Vec<Post> {
    let mut public = all_in_order(posts);
    public.retain(|p| p.is_public);
    public
}
