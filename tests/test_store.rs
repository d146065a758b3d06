use std::fs;
use std::sync::{Arc, Mutex};

use term_blog::store::*;

fn score(name: Option<&str>, points: u64) -> NewScore {
    NewScore {
        name: name.map(str::to_string),
        score: points,
        game: "shooter".to_string(),
    }
}

fn new_post(title: &str, is_public: bool) -> NewPost {
    NewPost {
        title: title.to_string(),
        content: "content".to_string(),
        is_public,
        tags: Vec::new(),
    }
}

// ── validation ────────────────────────────────────────────────────────────────

#[test]
fn score_above_max_is_rejected() {
    let mut store = MemoryStore::new();
    let err = store.submit_score(score(None, MAX_SCORE + 1)).unwrap_err();
    assert!(matches!(err, StoreError::Invalid { field: "score", .. }));
    assert!(store.top_scores(10).unwrap().is_empty());
}

#[test]
fn max_score_is_accepted() {
    let mut store = MemoryStore::new();
    assert!(store.submit_score(score(None, MAX_SCORE)).is_ok());
}

#[test]
fn blank_name_is_rejected() {
    let mut store = MemoryStore::new();
    let err = store.submit_score(score(Some("   "), 10)).unwrap_err();
    assert!(matches!(err, StoreError::Invalid { field: "name", .. }));
}

#[test]
fn long_name_is_rejected() {
    let mut store = MemoryStore::new();
    let long = "x".repeat(MAX_NAME_LEN + 1);
    assert!(store.submit_score(score(Some(&long), 10)).is_err());
    let exact = "x".repeat(MAX_NAME_LEN);
    assert!(store.submit_score(score(Some(&exact), 10)).is_ok());
}

#[test]
fn name_is_trimmed() {
    let mut store = MemoryStore::new();
    let record = store.submit_score(score(Some("  ace "), 10)).unwrap();
    assert_eq!(record.name.as_deref(), Some("ace"));
}

#[test]
fn empty_title_is_rejected() {
    let mut store = MemoryStore::new();
    let err = store.create_post(new_post("  ", true)).unwrap_err();
    assert!(matches!(err, StoreError::Invalid { field: "title", .. }));
}

// ── ranking & listing ─────────────────────────────────────────────────────────

#[test]
fn top_scores_highest_first_ties_in_submission_order() {
    let mut store = MemoryStore::new();
    store.submit_score(score(Some("a"), 100)).unwrap();
    store.submit_score(score(Some("b"), 300)).unwrap();
    store.submit_score(score(Some("c"), 100)).unwrap();
    store.submit_score(score(Some("d"), 200)).unwrap();

    let names: Vec<_> = store
        .top_scores(10)
        .unwrap()
        .into_iter()
        .map(|s| s.name.unwrap())
        .collect();
    assert_eq!(names, vec!["b", "d", "a", "c"]);
}

#[test]
fn top_scores_respects_limit() {
    let mut store = MemoryStore::new();
    for i in 0..15 {
        store.submit_score(score(None, i)).unwrap();
    }
    let top = store.top_scores(LEADERBOARD_SIZE).unwrap();
    assert_eq!(top.len(), LEADERBOARD_SIZE);
    assert_eq!(top[0].score, 14);
}

#[test]
fn private_posts_are_hidden() {
    let mut store = MemoryStore::new();
    store.create_post(new_post("one", true)).unwrap();
    store.create_post(new_post("two", false)).unwrap();
    store.create_post(new_post("three", true)).unwrap();

    let titles: Vec<_> = store
        .public_posts()
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["one", "three"]);
}

#[test]
fn all_posts_includes_private_ones() {
    let mut store = MemoryStore::new();
    store.create_post(new_post("one", true)).unwrap();
    store.create_post(new_post("secret", false)).unwrap();

    let all = store.all_posts().unwrap();
    let listed: Vec<_> = all.iter().map(|p| (p.title.as_str(), p.is_public)).collect();
    assert_eq!(listed, vec![("one", true), ("secret", false)]);
    assert_eq!(store.public_posts().unwrap().len(), 1);
}

#[test]
fn json_store_lists_private_posts_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = JsonStore::open(dir.path()).unwrap();
        store.create_post(new_post("draft", false)).unwrap();
    }
    let store = JsonStore::open(dir.path()).unwrap();
    assert!(store.public_posts().unwrap().is_empty());
    let all = store.all_posts().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].title, "draft");
    assert!(!all[0].is_public);
}

#[test]
fn validate_name_trims_and_bounds() {
    assert_eq!(validate_name("  ace  ").unwrap(), "ace");
    assert!(matches!(
        validate_name(" \t "),
        Err(StoreError::Invalid { field: "name", .. })
    ));
    assert!(validate_name(&"x".repeat(MAX_NAME_LEN)).is_ok());
    assert!(validate_name(&"x".repeat(MAX_NAME_LEN + 1)).is_err());
}

#[test]
fn post_ids_increase() {
    let mut store = MemoryStore::new();
    let a = store.create_post(new_post("a", true)).unwrap();
    let b = store.create_post(new_post("b", true)).unwrap();
    assert!(b.id > a.id);
}

// ── JsonStore ─────────────────────────────────────────────────────────────────

#[test]
fn json_store_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::open(dir.path().join("nested")).unwrap();
    assert!(store.public_posts().unwrap().is_empty());
    assert!(store.top_scores(10).unwrap().is_empty());
    assert!(store.dir().exists());
}

#[test]
fn json_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = JsonStore::open(dir.path()).unwrap();
        store
            .create_post(NewPost {
                title: "Persisted".to_string(),
                content: "still here".to_string(),
                is_public: true,
                tags: vec!["notes".to_string()],
            })
            .unwrap();
        store.submit_score(score(Some("ace"), 1_500)).unwrap();
    }
    assert!(dir.path().join("posts.json").exists());
    assert!(dir.path().join("scores.json").exists());

    let store = JsonStore::open(dir.path()).unwrap();
    let posts = store.public_posts().unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Persisted");
    assert_eq!(posts[0].tags, vec!["notes"]);

    let scores = store.top_scores(10).unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0].score, 1_500);
    assert_eq!(scores[0].name.as_deref(), Some("ace"));
}

#[test]
fn json_store_ids_continue_after_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let first = JsonStore::open(dir.path())
        .unwrap()
        .submit_score(score(None, 1))
        .unwrap();
    let second = JsonStore::open(dir.path())
        .unwrap()
        .submit_score(score(None, 2))
        .unwrap();
    assert_eq!(second.id, first.id + 1);
}

#[test]
fn json_store_treats_empty_file_as_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("posts.json"), "  \n").unwrap();
    let store = JsonStore::open(dir.path()).unwrap();
    assert!(store.public_posts().unwrap().is_empty());
}

#[test]
fn json_store_reports_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("scores.json"), "{not json").unwrap();
    let err = JsonStore::open(dir.path()).unwrap_err();
    assert!(matches!(err, StoreError::Json(_)));
}

#[test]
fn posts_without_tags_still_load() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("posts.json"),
        r#"[{"id":1,"title":"Old","content":"x","is_public":true,"created_at":"2024-01-01T00:00:00Z"}]"#,
    )
    .unwrap();
    let store = JsonStore::open(dir.path()).unwrap();
    let posts = store.public_posts().unwrap();
    assert_eq!(posts[0].title, "Old");
    assert!(posts[0].tags.is_empty());
}

// ── background submission ─────────────────────────────────────────────────────

#[test]
fn background_submitter_saves_scores() {
    let store = Arc::new(Mutex::new(MemoryStore::new()));
    let mut submitter = BackgroundSubmitter::spawn(Arc::clone(&store));
    submitter.submit(score(Some("ace"), 500));
    submitter.submit(score(None, 700));

    let notices = submitter.finish();
    assert_eq!(notices.len(), 2);
    assert!(notices.iter().all(|n| matches!(n, Notice::ScoreSaved(_))));

    let top = store.lock().unwrap().top_scores(10).unwrap();
    assert_eq!(top.iter().map(|s| s.score).collect::<Vec<_>>(), vec![700, 500]);
}

#[test]
fn background_submitter_reports_failures() {
    let store = Arc::new(Mutex::new(MemoryStore::new()));
    let mut submitter = BackgroundSubmitter::spawn(Arc::clone(&store));
    submitter.submit(score(Some(""), 10));

    let notices = submitter.finish();
    assert_eq!(notices.len(), 1);
    match &notices[0] {
        Notice::SubmitFailed(reason) => assert!(reason.contains("name")),
        other => panic!("expected failure, got {:?}", other),
    }
    assert!(store.lock().unwrap().top_scores(10).unwrap().is_empty());
}

#[test]
fn dropping_submitter_flushes_pending_work() {
    let store = Arc::new(Mutex::new(MemoryStore::new()));
    {
        let mut submitter = BackgroundSubmitter::spawn(Arc::clone(&store));
        submitter.submit(score(None, 42));
    }
    assert_eq!(store.lock().unwrap().top_scores(10).unwrap().len(), 1);
}

#[test]
fn null_sink_discards() {
    let mut sink = NullSink;
    sink.submit(score(None, 1));
    assert!(sink.drain().is_empty());
}
