//! Application shell around the [`Game`] engine.
//!
//! Turns terminal keys into game events, wall-clock time into clock ticks and
//! due deferred work, and carries out the effects the engine returns.

use crate::effects::{Cue, Effect, Vfx};
use crate::game::{Game, GameEvent, GameState};
use crate::language::Sentence;
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::mode::Mode;
use crate::scheduler::Scheduler;
use crate::sequencer::Key;
use crate::store::KeyValueStore;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Plays audio cues
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell on misses, level-ups and game over
#[derive(Debug, Default)]
pub struct TerminalBell;

impl CueSink for TerminalBell {
    fn play(&mut self, cue: Cue) {
        if matches!(cue, Cue::Incorrect | Cue::LevelUp { .. } | Cue::GameOver) {
            let mut out = std::io::stdout();
            let _ = out.write_all(b"\x07").and_then(|_| out.flush());
        }
    }
}

#[derive(Debug, Default)]
pub struct Silent;

impl CueSink for Silent {
    fn play(&mut self, _cue: Cue) {}
}

/// Transient highlight of the last key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyFlash {
    pub key: Key,
    pub correct: bool,
}

pub struct App<S: KeyValueStore> {
    pub game: Game,
    leaderboard: Leaderboard<S>,
    scheduler: Scheduler,
    audio: Box<dyn CueSink>,
    /// Replaces the first generated sentence of word-mode sessions
    custom_text: Option<String>,
    board: Vec<LeaderboardEntry>,
    player_name: String,
    last_rank: Option<usize>,
    key_flash: Option<KeyFlash>,
    time_bonus: Option<f64>,
    last_pump: Option<Instant>,
    tick_backlog: Duration,
    should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(game: Game, leaderboard: Leaderboard<S>) -> Self {
        let board = leaderboard.entries(game.mode());
        let player_name = leaderboard.player_name();
        Self {
            game,
            leaderboard,
            scheduler: Scheduler::new(),
            audio: Box::new(Silent),
            custom_text: None,
            board,
            player_name,
            last_rank: None,
            key_flash: None,
            time_bonus: None,
            last_pump: None,
            tick_backlog: Duration::ZERO,
            should_quit: false,
        }
    }

    pub fn with_audio(mut self, audio: Box<dyn CueSink>) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_custom_text(mut self, text: Option<String>) -> Self {
        self.custom_text = text.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn leaderboard(&self) -> &Leaderboard<S> {
        &self.leaderboard
    }

    /// Cached entries of the board the current mode posts to
    pub fn board(&self) -> &[LeaderboardEntry] {
        &self.board
    }

    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Rank of the session that just ended, if it made the board
    pub fn last_rank(&self) -> Option<usize> {
        self.last_rank
    }

    pub fn key_flash(&self) -> Option<KeyFlash> {
        self.key_flash
    }

    pub fn time_bonus(&self) -> Option<f64> {
        self.time_bonus
    }

    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Feeds one event to the engine and carries out its effects
    pub fn dispatch(&mut self, event: GameEvent, now: Instant) {
        let before = self.game.state();
        let effects = self.game.handle(event);

        match (before, self.game.state()) {
            (GameState::Idle, GameState::Playing) => self.on_started(now),
            (GameState::Ended, GameState::Idle) => {
                self.scheduler.clear();
                self.last_rank = None;
                self.clear_flashes();
            }
            _ => {}
        }
        if let GameEvent::SetMode(_) = event {
            self.refresh_board();
        }

        self.apply(effects, now);
    }

    fn on_started(&mut self, now: Instant) {
        self.scheduler.clear();
        self.last_pump = Some(now);
        self.tick_backlog = Duration::ZERO;
        self.last_rank = None;
        self.clear_flashes();

        if let Some(text) = &self.custom_text {
            if self.game.load_sentence(Sentence::from_text(text.trim())) {
                debug!("custom text loaded");
            }
        }
    }

    fn clear_flashes(&mut self) {
        self.key_flash = None;
        self.time_bonus = None;
    }

    fn refresh_board(&mut self) {
        self.board = self.leaderboard.entries(self.game.mode());
    }

    pub fn apply(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            match effect {
                // the engine keeps the visible message itself
                Effect::Feedback(_) => {}
                Effect::Sound(cue) => self.audio.play(cue),
                Effect::Vfx(Vfx::KeyPress { key, correct }) => {
                    self.key_flash = Some(KeyFlash { key, correct });
                }
                Effect::Vfx(Vfx::TimeBonus { secs }) => self.time_bonus = Some(secs),
                Effect::Vfx(Vfx::LevelUp { .. }) => {}
                Effect::Schedule { delay, task } => self.scheduler.schedule(now, delay, task),
                Effect::Persist(result) => {
                    match self.leaderboard.record(&result) {
                        Ok(rank) => self.last_rank = rank,
                        Err(e) => warn!(error = %e, "failed to record result"),
                    }
                    self.refresh_board();
                }
            }
        }
    }

    /// Advances the engine to `now`: whole clock ticks first, then due
    /// deferred actions
    pub fn pump(&mut self, now: Instant) {
        if self.game.is_playing() {
            let last = self.last_pump.unwrap_or(now);
            self.tick_backlog += now.saturating_duration_since(last);
            let tick = self.game.mode().tick();
            while self.tick_backlog >= tick && self.game.is_playing() {
                self.tick_backlog -= tick;
                self.dispatch(GameEvent::Tick, now);
            }
        }
        self.last_pump = Some(now);

        for task in self.scheduler.take_due(now) {
            self.dispatch(GameEvent::Deferred(task), now);
        }
        if self.game.feedback().is_none() {
            self.clear_flashes();
        }
    }

    /// Handles a terminal key: controls first, everything else goes to the game
    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            self.should_quit = true;
            return;
        }

        let event = match (self.game.state(), key.code) {
            (GameState::Idle, KeyCode::Enter) => Some(GameEvent::Start),
            (GameState::Idle, KeyCode::Char(c)) => mode_hotkey(c).map(GameEvent::SetMode),
            (GameState::Playing, KeyCode::Backspace) => Some(GameEvent::Key(Key::Backspace)),
            (GameState::Playing, KeyCode::Char(c)) => Some(GameEvent::Key(Key::Char(c))),
            (GameState::Ended, KeyCode::Char('r')) => Some(GameEvent::Restart),
            _ => None,
        };

        if let Some(event) = event {
            self.dispatch(event, now);
        }
    }
}

fn mode_hotkey(c: char) -> Option<Mode> {
    match c {
        '1' => Some(Mode::Beginner),
        '2' => Some(Mode::Medium),
        '3' => Some(Mode::Advanced),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::DeferredAction;
    use crate::store::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder(Rc<RefCell<Vec<Cue>>>);

    impl CueSink for Recorder {
        fn play(&mut self, cue: Cue) {
            self.0.borrow_mut().push(cue);
        }
    }

    fn app(mode: Mode) -> App<MemoryStore> {
        App::new(
            Game::with_seed(mode, 9),
            Leaderboard::new(MemoryStore::new()),
        )
    }

    fn press(app: &mut App<MemoryStore>, code: KeyCode, now: Instant) {
        app.on_key(KeyEvent::new(code, KeyModifiers::NONE), now);
    }

    #[test]
    fn enter_starts_and_number_keys_pick_mode() {
        let now = Instant::now();
        let mut app = app(Mode::Beginner);
        press(&mut app, KeyCode::Char('3'), now);
        assert_eq!(app.game.mode(), Mode::Advanced);

        press(&mut app, KeyCode::Enter, now);
        assert!(app.game.is_playing());

        // digits are game input once playing
        press(&mut app, KeyCode::Char('1'), now);
        assert_eq!(app.game.mode(), Mode::Advanced);
    }

    #[test]
    fn wall_time_becomes_clock_ticks() {
        let start = Instant::now();
        let mut app = app(Mode::Beginner);
        app.dispatch(GameEvent::Start, start);

        app.pump(start + Duration::from_millis(999));
        assert_eq!(app.game.session().time_left(), 60.0);
        app.pump(start + Duration::from_millis(2500));
        assert_eq!(app.game.session().time_left(), 58.0);
        app.pump(start + Duration::from_millis(3000));
        assert_eq!(app.game.session().time_left(), 57.0);
    }

    #[test]
    fn session_end_records_on_the_board() {
        let start = Instant::now();
        let recorder = Recorder::default();
        let mut app = app(Mode::Advanced).with_audio(Box::new(recorder.clone()));
        app.dispatch(GameEvent::Start, start);
        app.pump(start + Duration::from_secs(11));

        assert_eq!(app.game.state(), GameState::Ended);
        assert_eq!(app.board().len(), 1);
        assert_eq!(app.last_rank(), Some(1));
        assert_eq!(app.board()[0].name, "Player");
        assert_eq!(
            recorder.0.borrow().as_slice(),
            &[Cue::Start, Cue::GameOver]
        );
    }

    #[test]
    fn deferred_actions_fire_when_due() {
        let start = Instant::now();
        let mut app = app(Mode::Beginner);
        app.dispatch(GameEvent::Start, start);

        let target = app.game.session().target.key().unwrap();
        app.dispatch(GameEvent::Key(Key::Char(target)), start);
        assert!(app.game.feedback().is_some());
        assert!(app.key_flash().is_some());
        assert_eq!(app.pending_tasks(), 2);

        app.pump(start + Duration::from_millis(400));
        assert_eq!(app.pending_tasks(), 1);
        assert!(app.game.feedback().is_some());

        app.pump(start + Duration::from_millis(1000));
        assert_eq!(app.pending_tasks(), 0);
        assert!(app.game.feedback().is_none());
        assert!(app.key_flash().is_none());
    }

    #[test]
    fn restart_drops_pending_work() {
        let start = Instant::now();
        let mut app = app(Mode::Beginner);
        app.dispatch(GameEvent::Start, start);
        app.dispatch(GameEvent::Key(Key::Char('z')), start);
        for _ in 0..60 {
            app.dispatch(GameEvent::Tick, start);
        }
        assert_eq!(app.game.state(), GameState::Ended);

        press(&mut app, KeyCode::Char('r'), start);
        assert_eq!(app.game.state(), GameState::Idle);
        assert_eq!(app.pending_tasks(), 0);
        assert_eq!(app.last_rank(), None);
    }

    #[test]
    fn stale_tasks_do_not_touch_new_session() {
        let start = Instant::now();
        let mut app = app(Mode::Beginner);
        app.dispatch(GameEvent::Start, start);
        let old_generation = app.game.generation();
        for _ in 0..60 {
            app.dispatch(GameEvent::Tick, start);
        }
        app.dispatch(GameEvent::Restart, start);
        app.dispatch(GameEvent::Start, start);

        let target = app.game.session().target.key();
        app.dispatch(
            GameEvent::Deferred(crate::effects::Deferred {
                generation: old_generation,
                action: DeferredAction::NextTarget,
            }),
            start,
        );
        assert_eq!(app.game.session().target.key(), target);
    }

    #[test]
    fn custom_text_replaces_first_sentence() {
        let start = Instant::now();
        let mut app = app(Mode::Medium).with_custom_text(Some(" jak fed ".to_string()));
        app.dispatch(GameEvent::Start, start);
        let seq = app.game.session().target.words().unwrap();
        assert_eq!(seq.sentence().text, "jak fed");
    }

    #[test]
    fn escape_requests_quit() {
        let mut app = app(Mode::Beginner);
        press(&mut app, KeyCode::Esc, Instant::now());
        assert!(app.should_quit());
    }
}
