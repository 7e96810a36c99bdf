use crate::mode::Mode;
use std::time::Duration;

/// Correct beginner presses needed per level
pub const KEYS_PER_LEVEL: u32 = 10;
/// Points per level for a correct beginner key
pub const KEY_POINTS_PER_LEVEL: u32 = 10;
/// Points per level for finishing a sentence
pub const SENTENCE_POINTS_PER_LEVEL: u32 = 10;
/// Base points of a word before its length is added
pub const WORD_BASE_POINTS: u32 = 5;

/// Beginner level implied by a number of correct presses
pub fn beginner_level(correct_count: u32) -> u32 {
    correct_count / KEYS_PER_LEVEL + 1
}

/// Word-mode level implied by finished sentences
pub fn sentence_level(sentences_completed: u32) -> u32 {
    sentences_completed + 1
}

/// `multiplier * level * (5 + len)`, len counting the raw target's characters
pub fn word_points(mode: Mode, level: u32, word: &str) -> u32 {
    mode.word_multiplier() * level * (WORD_BASE_POINTS + word.chars().count() as u32)
}

pub fn sentence_bonus(level: u32) -> u32 {
    SENTENCE_POINTS_PER_LEVEL * level
}

/// Rounded percentage; a session without key presses counts as perfect
pub fn accuracy(correct_count: u32, total_count: u32) -> u32 {
    if total_count == 0 {
        return 100;
    }
    ((correct_count as f64 / total_count as f64) * 100.0).round() as u32
}

/// Rounded words per minute, with elapsed time floored at one second
pub fn words_per_minute(words_completed: u32, elapsed: Duration) -> u32 {
    let minutes = (elapsed.as_secs_f64() / 60.0).max(1.0 / 60.0);
    (words_completed as f64 / minutes).round() as u32
}

/// A level transition caused by the last scored event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    pub from: u32,
    pub to: u32,
}

/// Outcome of a beginner key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyScore {
    pub points: u32,
    pub level_up: Option<LevelUp>,
}

/// Outcome of a finished sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceScore {
    pub bonus: u32,
    pub level_up: Option<LevelUp>,
}

/// Running score, level and counters of one session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreCard {
    pub score: u32,
    pub level: u32,
    pub correct_count: u32,
    pub total_count: u32,
    pub words_completed: u32,
    pub sentences_completed: u32,
}

impl Default for ScoreCard {
    fn default() -> Self {
        Self {
            score: 0,
            level: 1,
            correct_count: 0,
            total_count: 0,
            words_completed: 0,
            sentences_completed: 0,
        }
    }
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    fn raise_level(&mut self, candidate: u32) -> Option<LevelUp> {
        if candidate > self.level {
            let from = self.level;
            self.level = candidate;
            Some(LevelUp { from, to: candidate })
        } else {
            None
        }
    }

    /// Scores a beginner key press at the level held before the press
    pub fn record_key(&mut self, correct: bool) -> KeyScore {
        self.total_count += 1;
        if !correct {
            return KeyScore {
                points: 0,
                level_up: None,
            };
        }

        self.correct_count += 1;
        let points = self.level * KEY_POINTS_PER_LEVEL;
        self.score += points;
        let level_up = self.raise_level(beginner_level(self.correct_count));
        KeyScore { points, level_up }
    }

    /// Scores a correctly submitted word; returns the points awarded
    pub fn record_word(&mut self, mode: Mode, word: &str) -> u32 {
        self.words_completed += 1;
        let points = word_points(mode, self.level, word);
        self.score += points;
        points
    }

    /// Adds the sentence bonus, then recomputes the level from the sentence count
    pub fn record_sentence(&mut self) -> SentenceScore {
        let bonus = sentence_bonus(self.level);
        self.score += bonus;
        self.sentences_completed += 1;
        let level_up = self.raise_level(sentence_level(self.sentences_completed));
        SentenceScore { bonus, level_up }
    }

    pub fn accuracy(&self) -> u32 {
        accuracy(self.correct_count, self.total_count)
    }

    pub fn words_per_minute(&self, elapsed: Duration) -> u32 {
        words_per_minute(self.words_completed, elapsed)
    }

    /// Beginner progress towards the next level, in percent
    pub fn level_progress_percent(&self) -> u32 {
        (self.correct_count % KEYS_PER_LEVEL) * 10
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beginner_level_formula() {
        let mut last = 0;
        for correct in 0..200 {
            let level = beginner_level(correct);
            assert_eq!(level, correct / 10 + 1);
            assert!(level >= last);
            last = level;
        }
    }

    #[test]
    fn ten_correct_presses_at_level_one() {
        let mut card = ScoreCard::new();
        for i in 0..10 {
            let scored = card.record_key(true);
            assert_eq!(scored.points, 10);
            if i < 9 {
                assert_eq!(scored.level_up, None);
            } else {
                assert_eq!(scored.level_up, Some(LevelUp { from: 1, to: 2 }));
            }
        }
        assert_eq!(card.score, 100);
        assert_eq!(card.level, 2);

        // the eleventh press scores at level 2
        assert_eq!(card.record_key(true).points, 20);
        assert_eq!(card.score, 120);
    }

    #[test]
    fn incorrect_press_counts_but_scores_nothing() {
        let mut card = ScoreCard::new();
        let scored = card.record_key(false);
        assert_eq!(scored.points, 0);
        assert_eq!(card.total_count, 1);
        assert_eq!(card.correct_count, 0);
        assert_eq!(card.score, 0);
        assert_eq!(card.accuracy(), 0);
    }

    #[test]
    fn word_points_per_mode() {
        assert_eq!(word_points(Mode::Advanced, 1, "cat"), 8);
        assert_eq!(word_points(Mode::Medium, 1, "cat"), 16);
        assert_eq!(word_points(Mode::Advanced, 3, "run,"), 27);
    }

    #[test]
    fn sentence_level_ignores_score() {
        let mut card = ScoreCard::new();
        card.score = 10_000;
        assert_eq!(card.level, 1);

        let scored = card.record_sentence();
        assert_eq!(scored.bonus, 10);
        assert_eq!(scored.level_up, Some(LevelUp { from: 1, to: 2 }));
        assert_eq!(card.level, sentence_level(card.sentences_completed));

        let scored = card.record_sentence();
        assert_eq!(scored.bonus, 20);
        assert_eq!(card.level, 3);
    }

    #[test]
    fn accuracy_is_perfect_without_presses() {
        assert_eq!(accuracy(0, 0), 100);
        assert_eq!(accuracy(3, 4), 75);
        assert_eq!(accuracy(2, 3), 67);
    }

    #[test]
    fn wpm_floors_elapsed_time() {
        assert_eq!(words_per_minute(0, Duration::ZERO), 0);
        // under a second counts as one second
        assert_eq!(words_per_minute(1, Duration::from_millis(200)), 60);
        assert_eq!(words_per_minute(10, Duration::from_secs(30)), 20);
        assert_eq!(words_per_minute(7, Duration::from_secs(60)), 7);
    }

    #[test]
    fn progress_percent_wraps_each_level() {
        let mut card = ScoreCard::new();
        for _ in 0..13 {
            card.record_key(true);
        }
        assert_eq!(card.level_progress_percent(), 30);
    }
}
