//! In-memory store, used by tests and as a fallback when no data directory
//! is available.

use chrono::Utc;

use super::{
    all_in_order, public_in_order, rank, validate_post, validate_score, NewPost, NewScore, Post,
    PostStore, ScoreRecord, ScoreStore, StoreError,
};

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    posts: Vec<Post>,
    scores: Vec<ScoreRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-built posts (ids and timestamps kept).
    pub fn with_posts(posts: Vec<Post>) -> Self {
        MemoryStore { posts, scores: Vec::new() }
    }
}

impl PostStore for MemoryStore {
    fn public_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(public_in_order(&self.posts))
    }

    fn all_posts(&self) -> Result<Vec<Post>, StoreError> {
        Ok(all_in_order(&self.posts))
    }

    fn create_post(&mut self, post: NewPost) -> Result<Post, StoreError> {
        validate_post(&post)?;
        let created = Post {
            id: self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1,
            title: post.title.trim().to_string(),
            content: post.content,
            is_public: post.is_public,
            created_at: Utc::now(),
            tags: post.tags,
        };
        self.posts.push(created.clone());
        Ok(created)
    }
}

impl ScoreStore for MemoryStore {
    fn submit_score(&mut self, score: NewScore) -> Result<ScoreRecord, StoreError> {
        let name = validate_score(&score)?;
        let record = ScoreRecord {
            id: self.scores.len() as u64 + 1,
            name,
            score: score.score,
            game: score.game,
            created_at: Utc::now(),
        };
        self.scores.push(record.clone());
        Ok(record)
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(rank(&self.scores, limit))
    }
}
