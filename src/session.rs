use crate::clock::SessionClock;
use crate::mode::Mode;
use crate::scoring::ScoreCard;
use crate::sequencer::WordSequencer;
use chrono::{DateTime, Local};

/// What the player currently has to produce
#[derive(Debug, Clone, Default)]
pub enum Target {
    #[default]
    None,
    Key(char),
    Words(WordSequencer),
}

impl Target {
    pub fn key(&self) -> Option<char> {
        match self {
            Target::Key(c) => Some(*c),
            _ => None,
        }
    }

    pub fn words(&self) -> Option<&WordSequencer> {
        match self {
            Target::Words(seq) => Some(seq),
            _ => None,
        }
    }
}

/// The live game instance. Replaced wholesale on start and restart.
#[derive(Debug, Clone)]
pub struct Session {
    pub mode: Mode,
    /// Distinguishes this session from earlier ones for deferred actions
    pub generation: u64,
    pub card: ScoreCard,
    pub clock: SessionClock,
    pub target: Target,
    pub started_at: Option<DateTime<Local>>,
    /// Rising pitch of beginner correct cues, reset on level-up
    pub pitch_step: u32,
}

impl Session {
    pub fn new(mode: Mode, generation: u64) -> Self {
        Self {
            mode,
            generation,
            card: ScoreCard::new(),
            clock: SessionClock::new(mode),
            target: Target::None,
            started_at: None,
            pitch_step: 0,
        }
    }

    pub fn score(&self) -> u32 {
        self.card.score
    }

    pub fn level(&self) -> u32 {
        self.card.level
    }

    pub fn time_left(&self) -> f64 {
        self.clock.time_left()
    }

    /// Live words per minute; `None` in beginner mode
    pub fn wpm(&self) -> Option<u32> {
        self.mode
            .is_word_mode()
            .then(|| self.card.words_per_minute(self.clock.elapsed()))
    }

    /// Percentage for the progress bar
    pub fn progress_percent(&self) -> u32 {
        match &self.target {
            Target::Words(seq) => (seq.progress() * 100.0).round() as u32,
            _ => self.card.level_progress_percent(),
        }
    }

    /// Final numbers of a finished session
    pub fn result(&self, finished_at: DateTime<Local>) -> SessionResult {
        SessionResult {
            mode: self.mode,
            score: self.card.score,
            level: self.card.level,
            accuracy: self.card.accuracy(),
            wpm: self.wpm(),
            finished_at,
        }
    }
}

/// What a finished session reports to the leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub mode: Mode,
    pub score: u32,
    pub level: u32,
    pub accuracy: u32,
    pub wpm: Option<u32>,
    pub finished_at: DateTime<Local>,
}
