use crate::sequencer::Key;
use crate::session::SessionResult;
use std::time::Duration;

/// Delay before a beginner gets a new key after a correct press
pub const NEXT_TARGET_AFTER_CORRECT: Duration = Duration::from_millis(300);
/// Delay before a beginner gets a new key after a miss
pub const NEXT_TARGET_AFTER_INCORRECT: Duration = Duration::from_millis(500);
/// How long a feedback message stays up
pub const FEEDBACK_TTL: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Incorrect,
}

/// Short message flashed at the player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub message: String,
    pub kind: FeedbackKind,
}

impl Feedback {
    pub fn correct(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FeedbackKind::Correct,
        }
    }

    pub fn incorrect(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: FeedbackKind::Incorrect,
        }
    }
}

/// Audio notifications; fire and forget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Start,
    /// Beginner cues rise in pitch with each correct key of a level
    Correct { pitch_step: u32 },
    Incorrect,
    LevelUp { level: u32 },
    Word,
    GameOver,
}

/// Visual notifications; fire and forget
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Vfx {
    KeyPress { key: Key, correct: bool },
    LevelUp { level: u32 },
    TimeBonus { secs: f64 },
}

/// Work to run later, valid only for the session generation it was stamped with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferred {
    pub generation: u64,
    pub action: DeferredAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredAction {
    NextTarget,
    ClearFeedback,
}

/// Side effects requested by a state transition
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Feedback(Feedback),
    Sound(Cue),
    Vfx(Vfx),
    Schedule { delay: Duration, task: Deferred },
    Persist(SessionResult),
}
