use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use homerow::{
    app::{App, CueSink, Silent, TerminalBell},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    game::Game,
    leaderboard::{Leaderboard, LeaderboardEntry},
    logging,
    mode::Mode,
    runtime::{CrosstermEventSource, FixedTicker, InputEvent, Runner},
    store::{JsonFileStore, KeyValueStore},
};
use itertools::Itertools;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin, Write},
    time::Instant,
};
use tracing::info;

/// home row typing game for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A home row typing game: hit single keys in beginner mode or type generated sentences against the clock in medium and advanced mode, then post your score to a local leaderboard."
)]
pub struct Cli {
    /// difficulty mode to start in
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// player name for the leaderboard (remembered for next time)
    #[clap(short = 'n', long)]
    name: Option<String>,

    /// seed for repeatable keys and sentences
    #[clap(long)]
    seed: Option<u64>,

    /// custom text for the first sentence of word modes
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// print the leaderboard the given mode posts to and exit
    #[clap(long, value_enum, value_name = "MODE")]
    board: Option<Mode>,

    /// ring the terminal bell on misses, level-ups and game over
    #[clap(long)]
    bell: bool,

    /// store the chosen mode, bell and seed as defaults
    #[clap(long)]
    save_config: bool,
}

impl Cli {
    /// CLI flags layered over the stored config
    fn merge(&self, stored: Config) -> Config {
        Config {
            mode: self.mode.unwrap_or(stored.mode),
            bell: self.bell || stored.bell,
            seed: self.seed.or(stored.seed),
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let _log_guard = AppDirs::log_dir().and_then(|dir| logging::init(&dir));

    let config_store = FileConfigStore::new();
    let config = cli.merge(config_store.load());
    if cli.save_config {
        config_store.save(&config)?;
    }

    let mut leaderboard = Leaderboard::new(JsonFileStore::new());
    if let Some(name) = &cli.name {
        leaderboard.set_player_name(name)?;
    }

    if let Some(mode) = cli.board {
        let mut out = io::stdout().lock();
        print_board(&mut out, &leaderboard, mode)?;
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let game = match config.seed {
        Some(seed) => Game::with_seed(config.mode, seed),
        None => Game::new(config.mode),
    };
    let audio: Box<dyn CueSink> = if config.bell {
        Box::new(TerminalBell)
    } else {
        Box::new(Silent)
    };
    let mut app = App::new(game, leaderboard)
        .with_audio(audio)
        .with_custom_text(cli.prompt.clone());

    info!(mode = %config.mode, bell = config.bell, "starting");

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend, S: KeyValueStore>(
    terminal: &mut Terminal<B>,
    app: &mut App<S>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    while !app.should_quit() {
        match runner.step() {
            InputEvent::Key(key) => app.on_key(key, Instant::now()),
            InputEvent::Resize | InputEvent::Tick => {}
        }
        app.pump(Instant::now());
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}

fn board_line(rank: usize, entry: &LeaderboardEntry) -> String {
    [
        format!("{:>3}", rank),
        format!("{:<16}", entry.name),
        format!("{:>7}", entry.score),
        format!("{:>5}", entry.level),
        format!("{:>4}%", entry.accuracy),
        format!("{:>4}", entry.wpm.map_or_else(|| "-".to_string(), |w| w.to_string())),
        format!("{:<8}", entry.mode),
        entry.date.format("%Y-%m-%d %H:%M").to_string(),
    ]
    .iter()
    .join("  ")
}

fn print_board<W: Write, S: KeyValueStore>(
    out: &mut W,
    leaderboard: &Leaderboard<S>,
    mode: Mode,
) -> io::Result<()> {
    let entries = leaderboard.entries(mode);
    writeln!(out, "{}", mode.board_key())?;
    if entries.is_empty() {
        writeln!(out, "no scores yet")?;
        return Ok(());
    }
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "{}", board_line(i + 1, entry))?;
    }
    Ok(())
}
