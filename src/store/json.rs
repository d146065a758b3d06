//! File-backed store: `posts.json` and `scores.json` in one directory.
//!
//! Both files are read once on open (a missing file is an empty table) and
//! rewritten in full, pretty-printed, after every mutation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{
    all_in_order, public_in_order, rank, validate_post, validate_score, NewPost, NewScore, Post,
    PostStore, ScoreRecord, ScoreStore, StoreError,
};

const POSTS_FILE: &str = "posts.json";
const SCORES_FILE: &str = "scores.json";

#[derive(Debug)]
pub struct JsonStore {
    dir: PathBuf,
    posts: Vec<Post>,
    scores: Vec<ScoreRecord>,
}

impl JsonStore {
    /// Open (creating if needed) the store rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.exists() {
            fs::create_dir_all(&dir)?;
        }

        let posts: Vec<Post> = read_table(&dir.join(POSTS_FILE))?;
        let scores: Vec<ScoreRecord> = read_table(&dir.join(SCORES_FILE))?;
        log::info!(
            "opened store at {} ({} posts, {} scores)",
            dir.display(),
            posts.len(),
            scores.len()
        );

        Ok(JsonStore { dir, posts, scores })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)?;
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(&json)?)
}

fn write_table<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(rows)?;
    fs::write(path, json)?;
    Ok(())
}

impl PostStore for JsonStore {
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
        if let Err(e) = write_table(&self.dir.join(POSTS_FILE), &self.posts) {
            self.posts.pop();
            return Err(e);
        }
        log::info!("created post #{} '{}'", created.id, created.title);
        Ok(created)
    }
}

impl ScoreStore for JsonStore {
    fn submit_score(&mut self, score: NewScore) -> Result<ScoreRecord, StoreError> {
        let name = validate_score(&score)?;
        let record = ScoreRecord {
            id: self.scores.iter().map(|s| s.id).max().unwrap_or(0) + 1,
            name,
            score: score.score,
            game: score.game,
            created_at: Utc::now(),
        };
        self.scores.push(record.clone());
        if let Err(e) = write_table(&self.dir.join(SCORES_FILE), &self.scores) {
            self.scores.pop();
            return Err(e);
        }
        Ok(record)
    }

    fn top_scores(&self, limit: usize) -> Result<Vec<ScoreRecord>, StoreError> {
        Ok(rank(&self.scores, limit))
    }
}
