use std::fs::{self, OpenOptions};
use std::io::{self, stdout, BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::{rngs::StdRng, SeedableRng};

use term_blog::audio::SoundBoard;
use term_blog::clock::SystemClock;
use term_blog::compute::Action;
use term_blog::config::GameKind;
use term_blog::display::{self, shell as shell_view, Hud};
use term_blog::driver::LoopDriver;
use term_blog::entities::GameStatus;
use term_blog::events::GameEvent;
use term_blog::settings::Settings;
use term_blog::shell::{Session, Shell, ShellAction, WELCOME};
use term_blog::store::{
    validate_name, BackgroundSubmitter, JsonStore, NewPost, Notice, PostStore, ScoreStore,
    LEADERBOARD_SIZE,
};

const LOG_FILE: &str = "term_blog.log";

/// How long a banner (achievement, saved score) stays under the playfield.
const BANNER_TTL: Duration = Duration::from_secs(3);

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "term_blog", version, about = "A terminal-themed blog with arcade games")]
struct Cli {
    /// Where posts, scores, settings and the log live
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed the random number generator for reproducible sessions
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Leaderboard name for this session (overrides settings)
    #[arg(long, global = true)]
    name: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal (default)
    Shell,
    /// Jump straight into an arcade game
    Play {
        /// shooter or racer
        game: GameKind,
    },
    /// Print the leaderboard
    Scores {
        #[arg(long, default_value_t = LEADERBOARD_SIZE)]
        limit: usize,
    },
    /// Publish a blog post
    Post {
        #[arg(long)]
        title: String,
        #[arg(long)]
        content: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Keep the post out of the public listing
        #[arg(long)]
        private: bool,
    },
    /// List every post, private ones included
    Posts,
}

// ── Session context ───────────────────────────────────────────────────────────

struct App {
    data_dir: PathBuf,
    settings: Settings,
    store: Arc<Mutex<JsonStore>>,
    rng: StdRng,
}

impl App {
    fn store(&self) -> anyhow::Result<std::sync::MutexGuard<'_, JsonStore>> {
        self.store.lock().map_err(|_| anyhow!("store lock poisoned"))
    }

    /// Highest recorded score for `kind`, used as the session best.
    fn best_for(&self, kind: GameKind) -> anyhow::Result<u64> {
        let scores = self.store()?.top_scores(usize::MAX)?;
        Ok(scores
            .iter()
            .filter(|s| s.game == kind.as_str())
            .map(|s| s.score)
            .max()
            .unwrap_or(0))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("term_blog"))
        .unwrap_or_else(|| PathBuf::from(".term_blog"))
}

/// Log to a file in the data directory; the terminal belongs to the UI.
fn init_logging(dir: &Path) -> anyhow::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE))
        .with_context(|| format!("opening log file in {}", dir.display()))?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.unwrap_or_else(default_data_dir);
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;
    init_logging(&data_dir)?;

    let mut settings = Settings::load(&data_dir);
    match cli.name {
        Some(name) => {
            settings.player_name = validate_name(&name).context("invalid --name")?;
        }
        None => {
            if let Err(e) = validate_name(&settings.player_name) {
                log::warn!("ignoring saved player name: {}", e);
                settings.player_name = Settings::default().player_name;
            }
        }
    }
    let store = JsonStore::open(&data_dir)
        .with_context(|| format!("opening store in {}", data_dir.display()))?;
    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    log::info!("term_blog starting in {}", data_dir.display());

    let mut app = App {
        data_dir,
        settings,
        store: Arc::new(Mutex::new(store)),
        rng,
    };

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&mut app),
        Command::Play { game } => run_arcade(&mut app, game),
        Command::Scores { limit } => print_scores(&app, limit),
        Command::Post { title, content, tags, private } => {
            let post = app.store()?.create_post(NewPost {
                title,
                content,
                is_public: !private,
                tags,
            })?;
            println!("Created post #{}: {}", post.id, post.title);
            Ok(())
        }
        Command::Posts => print_posts(&app),
    }
}

fn print_posts(app: &App) -> anyhow::Result<()> {
    let posts = app.store()?.all_posts()?;
    if posts.is_empty() {
        println!("No posts yet.");
    }
    for post in &posts {
        let visibility = if post.is_public { "public" } else { "private" };
        println!(
            "#{:<4} {:<8} {}  {}",
            post.id,
            visibility,
            post.created_at.format("%Y-%m-%d"),
            post.title
        );
    }
    Ok(())
}

fn print_scores(app: &App, limit: usize) -> anyhow::Result<()> {
    let scores = app.store()?.top_scores(limit)?;
    if scores.is_empty() {
        println!("No scores yet.");
    }
    for (i, s) in scores.iter().enumerate() {
        println!(
            "{:>2}. {:<20} {:>8}  {:<8} {}",
            i + 1,
            s.name.as_deref().unwrap_or("anonymous"),
            s.score,
            s.game,
            s.created_at.format("%Y-%m-%d")
        );
    }
    Ok(())
}

// ── Shell ─────────────────────────────────────────────────────────────────────

fn run_shell(app: &mut App) -> anyhow::Result<()> {
    let mut out = stdout();
    let stdin = io::stdin();
    let mut shell = Shell::new();

    shell_view::print_banner(&mut out, WELCOME)?;

    loop {
        shell_view::print_prompt(&mut out, shell.session())?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim_end_matches(['\r', '\n']);
        let clearing =
            matches!(shell.session(), Session::Idle) && line.trim().eq_ignore_ascii_case("clear");

        let reply = {
            let store = app.store.lock().map_err(|_| anyhow!("store lock poisoned"))?;
            shell.execute(line, &*store, &mut app.rng)
        };

        if clearing {
            shell_view::redraw(&mut out, WELCOME, shell.history())?;
        }
        shell_view::print_output(&mut out, &reply.output)?;

        match reply.action {
            Some(ShellAction::Launch(kind)) => {
                if let Err(e) = run_arcade(app, kind) {
                    log::error!("arcade failed: {:#}", e);
                    shell_view::print_output(&mut out, &format!("Error: {}", e))?;
                }
                shell_view::redraw(&mut out, WELCOME, shell.history())?;
            }
            Some(ShellAction::Quit) => break,
            None => {}
        }
    }

    log::info!("shell closed after {} commands", shell.history().len());
    Ok(())
}

// ── Arcade ────────────────────────────────────────────────────────────────────

/// Take over the terminal for one arcade session and always give it back.
fn run_arcade(app: &mut App, kind: GameKind) -> anyhow::Result<()> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Release events are requested so held keys can be told apart on
    // terminals that support it; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    let result = arcade_loop(&mut out, app, kind);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = app.settings.save(&app.data_dir) {
        log::warn!("could not save settings: {}", e);
    }
    result
}

fn key_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::MoveRight),
        KeyCode::Char(' ') => Some(Action::Fire),
        _ => None,
    }
}

fn notice_banner(notice: &Notice) -> String {
    match notice {
        Notice::ScoreSaved(record) => format!("Score {} saved to the leaderboard", record.score),
        Notice::SubmitFailed(reason) => format!("Could not save score: {}", reason),
    }
}

fn event_banner(event: &GameEvent) -> Option<String> {
    match event {
        GameEvent::AchievementUnlocked { name, .. } => {
            Some(format!("★ Achievement unlocked: {}", name))
        }
        GameEvent::NewBest { score } => Some(format!("New best score: {}!", score)),
        _ => None,
    }
}

/// Menu → run → game over, until the player quits back to the terminal.
fn arcade_loop<W: Write>(out: &mut W, app: &mut App, kind: GameKind) -> anyhow::Result<()> {
    let best = app.best_for(kind)?;
    let submitter = BackgroundSubmitter::spawn(Arc::clone(&app.store));
    let mut driver = LoopDriver::new(kind.config(), SystemClock::new(), Box::new(submitter))
        .with_best_score(best)
        .with_player_name(app.settings.player_name.clone());
    let mut sound = SoundBoard::new(app.settings.muted);
    let mut banner: Option<(String, Instant)> = None;
    let frame_period = app.settings.frame_period();

    log::info!("arcade {} opened (best {})", kind, best);

    'frames: loop {
        let frame_start = Instant::now();
        let mut events = Vec::new();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while event::poll(Duration::ZERO)? {
            let Event::Key(KeyEvent { code, kind: key_kind, modifiers, .. }) = event::read()?
            else {
                continue;
            };
            if key_kind == KeyEventKind::Release {
                continue;
            }
            match (driver.status(), code) {
                (_, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) => break 'frames,
                (_, KeyCode::Char('c')) if modifiers.contains(KeyModifiers::CONTROL) => {
                    break 'frames
                }
                (_, KeyCode::Char('m') | KeyCode::Char('M')) => {
                    app.settings.muted = sound.toggle_mute();
                }
                (GameStatus::Menu, KeyCode::Enter)
                | (GameStatus::GameOver, KeyCode::Char('r') | KeyCode::Char('R')) => {
                    driver.start();
                }
                (GameStatus::GameOver, KeyCode::Enter) => driver.return_to_menu(),
                (GameStatus::Running, code) => {
                    if let Some(action) = key_action(code) {
                        events.extend(driver.input(action));
                    }
                }
                _ => {}
            }
        }

        if let Some(tick_events) = driver.frame(&mut app.rng) {
            events.extend(tick_events);
        }

        // Newest message wins the banner
        for text in events.iter().filter_map(event_banner) {
            banner = Some((text, Instant::now()));
        }
        for notice in driver.drain_notices() {
            banner = Some((notice_banner(&notice), Instant::now()));
        }
        if banner.as_ref().is_some_and(|(_, at)| at.elapsed() > BANNER_TTL) {
            banner = None;
        }

        sound.play(out, &events)?;
        let hud = Hud {
            best_score: driver.best_score(),
            banner: banner.as_ref().map(|(text, _)| text.as_str()),
            show_hints: app.settings.show_hints,
            muted: sound.is_muted(),
        };
        display::render(out, driver.world(), &hud)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_period {
            std::thread::sleep(frame_period - elapsed);
        }
    }

    driver.stop();
    for notice in driver.drain_notices() {
        log::info!("{}", notice_banner(&notice));
    }
    log::info!("arcade {} closed", kind);
    Ok(())
}
