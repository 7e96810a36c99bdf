//! Session state machine.
//!
//! [`Game::handle`] is the only entry point that changes state. It applies one
//! [`GameEvent`] and returns the side effects the shell has to carry out
//! (feedback, cues, deferred work, persisting the result). The engine itself
//! does no I/O and reads no wall clock beyond stamping start and end dates.

use crate::effects::{
    Cue, Deferred, DeferredAction, Effect, Feedback, Vfx, FEEDBACK_TTL,
    NEXT_TARGET_AFTER_CORRECT, NEXT_TARGET_AFTER_INCORRECT,
};
use crate::language::{Sentence, SentenceGenerator};
use crate::mode::Mode;
use crate::scoring::LevelUp;
use crate::sequencer::{next_key, Key, WordInput, WordSequencer};
use crate::session::{Session, SessionResult, Target};
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;
use tracing::{debug, info, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum GameState {
    Idle,
    Playing,
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Start,
    Restart,
    SetMode(Mode),
    Key(Key),
    /// One clock tick at the mode's resolution
    Tick,
    Deferred(Deferred),
}

pub struct Game<R: Rng = StdRng> {
    state: GameState,
    mode: Mode,
    session: Session,
    generation: u64,
    generator: SentenceGenerator<'static>,
    rng: R,
    feedback: Option<Feedback>,
    last_result: Option<SessionResult>,
}

impl Game<StdRng> {
    pub fn new(mode: Mode) -> Self {
        Self::with_rng(mode, StdRng::from_entropy())
    }

    /// Deterministic targets and sentences for a given seed
    pub fn with_seed(mode: Mode, seed: u64) -> Self {
        Self::with_rng(mode, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(mode: Mode, rng: R) -> Self {
        Self {
            state: GameState::Idle,
            mode,
            session: Session::new(mode, 0),
            generation: 0,
            generator: SentenceGenerator::default(),
            rng,
            feedback: None,
            last_result: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == GameState::Playing
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    /// Result of the session that just ended, until restart
    pub fn last_result(&self) -> Option<&SessionResult> {
        self.last_result.as_ref()
    }

    pub fn handle(&mut self, event: GameEvent) -> Vec<Effect> {
        match (self.state, event) {
            (GameState::Idle, GameEvent::Start) => self.start(),
            (GameState::Idle, GameEvent::SetMode(mode)) => self.set_mode(mode),
            (GameState::Ended, GameEvent::Restart) => self.restart(),
            (GameState::Playing, GameEvent::Key(key)) => self.on_key(key),
            (GameState::Playing, GameEvent::Tick) => self.on_tick(),
            (GameState::Playing, GameEvent::Deferred(task)) => self.on_deferred(task),
            (state, event) => {
                trace!(%state, ?event, "event ignored");
                Vec::new()
            }
        }
    }

    /// Swaps in a fixed sentence for the current word-mode session. Returns
    /// false outside a word-mode session or when the text has words that
    /// cannot be typed.
    pub fn load_sentence(&mut self, sentence: Sentence) -> bool {
        if !self.is_playing() || !sentence.is_typeable() {
            return false;
        }
        match &mut self.session.target {
            Target::Words(seq) => {
                seq.replace_sentence(sentence);
                true
            }
            _ => false,
        }
    }

    fn fresh_target(&mut self) -> Target {
        let level = self.session.level();
        if self.mode.is_word_mode() {
            Target::Words(WordSequencer::new(
                self.generator.generate(level, &mut self.rng),
            ))
        } else {
            Target::Key(next_key(level, &mut self.rng))
        }
    }

    fn stamp(&self, action: DeferredAction) -> Deferred {
        Deferred {
            generation: self.generation,
            action,
        }
    }

    fn schedule(&self, effects: &mut Vec<Effect>, delay: Duration, action: DeferredAction) {
        effects.push(Effect::Schedule {
            delay,
            task: self.stamp(action),
        });
    }

    fn show_feedback(&mut self, effects: &mut Vec<Effect>, feedback: Feedback) {
        self.feedback = Some(feedback.clone());
        effects.push(Effect::Feedback(feedback));
        self.schedule(effects, FEEDBACK_TTL, DeferredAction::ClearFeedback);
    }

    fn start(&mut self) -> Vec<Effect> {
        self.generation += 1;
        self.session = Session::new(self.mode, self.generation);
        self.session.started_at = Some(Local::now());
        self.session.target = self.fresh_target();
        self.feedback = None;
        self.last_result = None;
        self.state = GameState::Playing;

        info!(mode = %self.mode, generation = self.generation, "session started");
        vec![Effect::Sound(Cue::Start)]
    }

    fn restart(&mut self) -> Vec<Effect> {
        self.generation += 1;
        self.session = Session::new(self.mode, self.generation);
        self.feedback = None;
        self.last_result = None;
        self.state = GameState::Idle;

        debug!(generation = self.generation, "back to idle");
        Vec::new()
    }

    fn set_mode(&mut self, mode: Mode) -> Vec<Effect> {
        if mode != self.mode {
            debug!(from = %self.mode, to = %mode, "mode changed");
            self.mode = mode;
            self.session = Session::new(mode, self.generation);
        }
        Vec::new()
    }

    fn on_key(&mut self, key: Key) -> Vec<Effect> {
        if self.mode.is_word_mode() {
            self.on_word_key(key)
        } else {
            self.on_beginner_key(key)
        }
    }

    fn on_beginner_key(&mut self, key: Key) -> Vec<Effect> {
        let mut effects = Vec::new();
        let Some(target) = self.session.target.key() else {
            return effects;
        };

        let correct = matches!(key, Key::Char(c) if c.to_ascii_lowercase() == target);
        let scored = self.session.card.record_key(correct);
        effects.push(Effect::Vfx(Vfx::KeyPress { key, correct }));

        if correct {
            self.session.pitch_step += 1;
            self.show_feedback(&mut effects, Feedback::correct("Perfect!"));
            effects.push(Effect::Sound(Cue::Correct {
                pitch_step: self.session.pitch_step,
            }));
            if let Some(up) = scored.level_up {
                self.session.pitch_step = 0;
                self.level_up(&mut effects, up);
            }
            self.schedule(
                &mut effects,
                NEXT_TARGET_AFTER_CORRECT,
                DeferredAction::NextTarget,
            );
        } else {
            self.show_feedback(&mut effects, Feedback::incorrect("Try again!"));
            effects.push(Effect::Sound(Cue::Incorrect));
            self.schedule(
                &mut effects,
                NEXT_TARGET_AFTER_INCORRECT,
                DeferredAction::NextTarget,
            );
        }

        effects
    }

    fn on_word_key(&mut self, key: Key) -> Vec<Effect> {
        let outcome = match &mut self.session.target {
            Target::Words(seq) => seq.input(key),
            _ => return Vec::new(),
        };

        let mut effects = Vec::new();
        match outcome {
            WordInput::Typed | WordInput::Erased | WordInput::Ignored => {}
            WordInput::Rejected { typed } => {
                trace!(%typed, "wrong word");
                self.show_feedback(&mut effects, Feedback::incorrect("Wrong word"));
                effects.push(Effect::Sound(Cue::Incorrect));
            }
            WordInput::Completed {
                word,
                sentence_done,
            } => self.word_completed(&mut effects, &word, sentence_done),
        }
        effects
    }

    fn word_completed(&mut self, effects: &mut Vec<Effect>, word: &str, sentence_done: bool) {
        let level = self.session.level();
        self.session.card.record_word(self.mode, word);
        if self.mode == Mode::Advanced {
            self.session.clock.accrue_word_bonus(level);
        }
        self.show_feedback(effects, Feedback::correct("Word!"));
        effects.push(Effect::Sound(Cue::Word));

        if !sentence_done {
            return;
        }

        let scored = self.session.card.record_sentence();
        self.show_feedback(effects, Feedback::correct("Sentence complete!"));
        if let Some(up) = scored.level_up {
            self.level_up(effects, up);
            if self.mode == Mode::Advanced {
                let secs = self.session.clock.grant_pending_bonus();
                if secs > 0.0 {
                    debug!(secs, "time bonus granted");
                    effects.push(Effect::Vfx(Vfx::TimeBonus { secs }));
                }
            }
        }

        let sentence = self.generator.generate(self.session.level(), &mut self.rng);
        if let Target::Words(seq) = &mut self.session.target {
            seq.replace_sentence(sentence);
        }
    }

    fn level_up(&mut self, effects: &mut Vec<Effect>, up: LevelUp) {
        info!(from = up.from, to = up.to, "level up");
        self.show_feedback(effects, Feedback::correct(format!("Level {}!", up.to)));
        effects.push(Effect::Sound(Cue::LevelUp { level: up.to }));
        effects.push(Effect::Vfx(Vfx::LevelUp { level: up.to }));
    }

    fn on_tick(&mut self) -> Vec<Effect> {
        if self.session.clock.on_tick().is_running() {
            return Vec::new();
        }
        self.end()
    }

    fn end(&mut self) -> Vec<Effect> {
        self.state = GameState::Ended;
        let result = self.session.result(Local::now());
        info!(
            mode = %result.mode,
            score = result.score,
            level = result.level,
            accuracy = result.accuracy,
            wpm = ?result.wpm,
            "session ended"
        );
        self.last_result = Some(result.clone());
        vec![Effect::Sound(Cue::GameOver), Effect::Persist(result)]
    }

    fn on_deferred(&mut self, task: Deferred) -> Vec<Effect> {
        if task.generation != self.generation {
            debug!(
                stale = task.generation,
                current = self.generation,
                "dropping stale deferred action"
            );
            return Vec::new();
        }

        match task.action {
            DeferredAction::NextTarget => {
                if !self.mode.is_word_mode() {
                    self.session.target = self.fresh_target();
                }
            }
            DeferredAction::ClearFeedback => self.feedback = None,
        }
        Vec::new()
    }
}
