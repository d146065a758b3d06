//! The pseudo-terminal command interpreter that doubles as the blog's
//! navigation.
//!
//! One line in, one block of text out.  While a sub-game is active every line
//! is routed to it, `help` and `exit` included, until the game finishes.

pub mod guess;
pub mod hangman;
pub mod history;

use rand::Rng;

pub use guess::GuessGame;
pub use hangman::HangmanGame;
pub use history::{History, HistoryEntry};

use crate::config::GameKind;
use crate::store::{Post, PostStore, ScoreStore, StoreError, LEADERBOARD_SIZE};

pub const WELCOME: &str = "Welcome to the Terminal Blog! Type 'help' for available commands.";

const HELP: &str = "Available commands:
  help          Show this help message
  clear         Clear terminal history
  about         Show about information
  blog          List blog posts
  read <n>      Read blog post number n
  contact       Show contact information
  guess         Play the number guessing game
  hangman       Play hangman
  scores        Show the arcade leaderboard
  play <game>   Launch an arcade game (shooter, racer)
  exit          Leave the terminal";

const ABOUT: &str = "Welcome to my terminal-themed blog!";
const CONTACT: &str = "Email: example@example.com\nGitHub: @example";
const INVALID_POST: &str = "Invalid post number. Type 'blog' to list posts.";
const PLAY_USAGE: &str = "Usage: play <shooter|racer>";

/// Result of feeding one line to a sub-game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Keep capturing input.
    Continue(String),
    /// Game finished; return to idle.
    Done(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Session {
    Idle,
    Guessing(GuessGame),
    Hangman(HangmanGame),
}

/// Something the front end must do beyond printing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShellAction {
    Launch(GameKind),
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub output: String,
    pub action: Option<ShellAction>,
}

impl Reply {
    fn text(output: impl Into<String>) -> Self {
        Reply { output: output.into(), action: None }
    }

    fn with_action(output: impl Into<String>, action: ShellAction) -> Self {
        Reply { output: output.into(), action: Some(action) }
    }
}

#[derive(Debug)]
pub struct Shell {
    session: Session,
    history: History,
}

impl Default for Shell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell {
    pub fn new() -> Self {
        Self::with_session(Session::Idle)
    }

    pub fn with_session(session: Session) -> Self {
        Shell { session, history: History::default() }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Process one input line.  Blank lines are ignored and not recorded.
    pub fn execute<S>(&mut self, input: &str, store: &S, rng: &mut impl Rng) -> Reply
    where
        S: PostStore + ScoreStore + ?Sized,
    {
        if input.trim().is_empty() {
            return Reply::text("");
        }

        let session = std::mem::replace(&mut self.session, Session::Idle);
        let was_playing = !matches!(session, Session::Idle);
        let (reply, next) = match session {
            Session::Idle => {
                let normalized = input.trim().to_lowercase();
                if normalized == "clear" {
                    self.history.clear();
                    return Reply::text("");
                }
                dispatch(input, &normalized, store, rng)
            }
            Session::Guessing(mut game) => match game.play(input) {
                Step::Continue(out) => (Reply::text(out), Session::Guessing(game)),
                Step::Done(out) => (Reply::text(out), Session::Idle),
            },
            Session::Hangman(mut game) => match game.play(input) {
                Step::Continue(out) => (Reply::text(out), Session::Hangman(game)),
                Step::Done(out) => (Reply::text(out), Session::Idle),
            },
        };

        if was_playing && matches!(next, Session::Idle) {
            log::debug!("sub-game finished");
        }
        self.session = next;
        self.history.push(input, reply.output.clone());
        reply
    }
}

fn dispatch<S>(input: &str, normalized: &str, store: &S, rng: &mut impl Rng) -> (Reply, Session)
where
    S: PostStore + ScoreStore + ?Sized,
{
    let mut parts = normalized.split_whitespace();
    let command = parts.next().unwrap_or("");
    let arg = parts.next();
    log::debug!("command '{}'", command);

    let reply = match command {
        "help" => Reply::text(HELP),
        "about" => Reply::text(ABOUT),
        "contact" => Reply::text(CONTACT),
        "blog" => Reply::text(list_posts(store)),
        "read" => Reply::text(read_post(store, arg)),
        "scores" => Reply::text(leaderboard(store)),
        "guess" => {
            let game = GuessGame::random(rng);
            log::debug!("entering guess");
            return (Reply::text(game.intro()), Session::Guessing(game));
        }
        "hangman" => {
            let game = HangmanGame::random(rng);
            log::debug!("entering hangman");
            return (Reply::text(game.intro()), Session::Hangman(game));
        }
        "play" => match arg.map(str::parse::<GameKind>) {
            None => Reply::text(PLAY_USAGE),
            Some(Ok(kind)) => {
                Reply::with_action(format!("Launching {}...", kind), ShellAction::Launch(kind))
            }
            Some(Err(e)) => Reply::text(format!("Error: {}. {}", e, PLAY_USAGE)),
        },
        "exit" | "quit" => Reply::with_action("Goodbye!", ShellAction::Quit),
        _ => Reply::text(format!(
            "Command not found: {}. Type 'help' for available commands.",
            input
        )),
    };
    (reply, Session::Idle)
}

fn store_error(what: &str, e: StoreError) -> String {
    log::warn!("could not load {}: {}", what, e);
    format!("Error: could not load {} ({})", what, e)
}

fn format_date(post: &Post) -> String {
    post.created_at.format("%Y-%m-%d").to_string()
}

fn list_posts<S: PostStore + ?Sized>(store: &S) -> String {
    let posts = match store.public_posts() {
        Ok(posts) => posts,
        Err(e) => return store_error("posts", e),
    };
    if posts.is_empty() {
        return "No posts yet.".to_string();
    }

    let mut lines = vec!["Blog posts:".to_string()];
    for (i, post) in posts.iter().enumerate() {
        let mut line = format!("{}. {} ({})", i + 1, post.title, format_date(post));
        if !post.tags.is_empty() {
            line.push_str(&format!(" [{}]", post.tags.join(", ")));
        }
        lines.push(line);
    }
    lines.push(String::new());
    lines.push("Type 'read <number>' to read a post.".to_string());
    lines.join("\n")
}

fn read_post<S: PostStore + ?Sized>(store: &S, arg: Option<&str>) -> String {
    let Some(arg) = arg else {
        return "Usage: read <number>".to_string();
    };
    let Ok(n) = arg.parse::<usize>() else {
        return INVALID_POST.to_string();
    };
    let posts = match store.public_posts() {
        Ok(posts) => posts,
        Err(e) => return store_error("posts", e),
    };
    let Some(post) = n.checked_sub(1).and_then(|i| posts.get(i)) else {
        return INVALID_POST.to_string();
    };

    let mut out = format!("{}\n{}", post.title, format_date(post));
    if !post.tags.is_empty() {
        out.push_str(&format!("\nTags: {}", post.tags.join(", ")));
    }
    out.push_str("\n\n");
    out.push_str(&post.content);
    out
}

fn leaderboard<S: ScoreStore + ?Sized>(store: &S) -> String {
    let scores = match store.top_scores(LEADERBOARD_SIZE) {
        Ok(scores) => scores,
        Err(e) => return store_error("scores", e),
    };
    if scores.is_empty() {
        return "No scores yet.".to_string();
    }

    let mut lines = vec!["Leaderboard:".to_string()];
    for (i, s) in scores.iter().enumerate() {
        lines.push(format!(
            "{:>2}. {:<20} {:>8}  ({})",
            i + 1,
            s.name.as_deref().unwrap_or("anonymous"),
            s.score,
            s.game
        ));
    }
    lines.join("\n")
}
