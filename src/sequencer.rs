//! Tracks what the player has to type next.
//!
//! Beginner mode draws single keys from a level-dependent subset of the home
//! row. Word modes walk through a generated [`Sentence`] one word at a time
//! while the player composes each word in a typed buffer.

use crate::language::Sentence;
use rand::seq::SliceRandom;
use rand::Rng;

/// The full practice set: a s d f space j k l ;
pub const HOME_ROW: [char; 9] = ['a', 's', 'd', 'f', ' ', 'j', 'k', 'l', ';'];

const LEVEL_1_KEYS: [char; 5] = ['d', 'f', ' ', 'j', 'k'];
const LEVEL_2_KEYS: [char; 7] = ['d', 'f', ' ', 'j', 'k', 's', 'l'];
const LEVEL_3_KEYS: [char; 9] = ['d', 'f', ' ', 'j', 'k', 's', 'l', 'a', ';'];

/// A key press delivered by the input source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
}

/// Keys a beginner may be asked for at `level`
pub fn beginner_keys(level: u32) -> &'static [char] {
    match level {
        0 | 1 => &LEVEL_1_KEYS,
        2 => &LEVEL_2_KEYS,
        3 => &LEVEL_3_KEYS,
        _ => &HOME_ROW,
    }
}

/// Uniformly samples the next beginner target
pub fn next_key<R: Rng + ?Sized>(level: u32, rng: &mut R) -> char {
    *beginner_keys(level).choose(rng).unwrap_or(&HOME_ROW[0])
}

/// How a target key is shown to the player
pub fn key_label(c: char) -> String {
    match c {
        ' ' => "SPACE".to_string(),
        c => c.to_uppercase().collect(),
    }
}

/// Lower-cases and strips leading/trailing non-alphanumerics, so `"Word,"`
/// compares equal to `"word"`.
pub fn normalize_word(s: &str) -> String {
    s.trim_matches(|c: char| !c.is_ascii_alphanumeric())
        .to_lowercase()
}

/// Result of feeding one key to the word sequencer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WordInput {
    /// A letter was appended to the buffer
    Typed,
    /// Backspace; a no-op on an empty buffer
    Erased,
    /// The current word was submitted and matched. The sequencer already moved on.
    Completed { word: String, sentence_done: bool },
    /// A submitted buffer did not match; the buffer was cleared
    Rejected { typed: String },
    /// Key has no effect in word mode
    Ignored,
}

/// Walks a sentence word by word
#[derive(Debug, Clone, Default)]
pub struct WordSequencer {
    sentence: Sentence,
    index: usize,
    buffer: String,
}

impl WordSequencer {
    pub fn new(sentence: Sentence) -> Self {
        Self {
            sentence,
            index: 0,
            buffer: String::new(),
        }
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The word currently expected, or `None` once the sentence is exhausted
    pub fn current_word(&self) -> Option<&str> {
        self.sentence.words.get(self.index).map(String::as_str)
    }

    pub fn is_exhausted(&self) -> bool {
        self.index >= self.sentence.len()
    }

    pub fn is_last_word(&self) -> bool {
        !self.sentence.is_empty() && self.index == self.sentence.len() - 1
    }

    /// Share of the sentence already completed, 0.0..=1.0
    pub fn progress(&self) -> f64 {
        if self.sentence.is_empty() {
            return 0.0;
        }
        self.index as f64 / self.sentence.len() as f64
    }

    /// Starts over on a freshly generated sentence
    pub fn replace_sentence(&mut self, sentence: Sentence) {
        self.sentence = sentence;
        self.index = 0;
        self.buffer.clear();
    }

    fn buffer_matches(&self) -> bool {
        match self.current_word() {
            Some(target) => normalize_word(&self.buffer) == normalize_word(target),
            None => false,
        }
    }

    /// Moves past the current word. Returns true when the sentence is exhausted
    /// and the caller has to supply a new one.
    pub fn advance(&mut self) -> bool {
        if !self.is_exhausted() {
            self.index += 1;
        }
        self.buffer.clear();
        self.is_exhausted()
    }

    fn complete(&mut self) -> WordInput {
        let word = self.current_word().unwrap_or_default().to_string();
        let sentence_done = self.advance();
        WordInput::Completed {
            word,
            sentence_done,
        }
    }

    fn submit(&mut self) -> WordInput {
        if self.buffer.is_empty() {
            return WordInput::Ignored;
        }
        if self.buffer_matches() {
            self.complete()
        } else {
            WordInput::Rejected {
                typed: std::mem::take(&mut self.buffer),
            }
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    /// Applies one key. Space and comma submit the buffer; the last word of a
    /// sentence also completes as soon as the buffer matches.
    pub fn input(&mut self, key: Key) -> WordInput {
        if self.is_exhausted() {
            return WordInput::Ignored;
        }

        match key {
            Key::Backspace => {
                self.backspace();
                WordInput::Erased
            }
            Key::Char(' ') | Key::Char(',') => self.submit(),
            Key::Char(c) => {
                let c = c.to_ascii_lowercase();
                if !c.is_ascii_lowercase() {
                    return WordInput::Ignored;
                }
                self.buffer.push(c);
                if self.is_last_word() && self.buffer_matches() {
                    self.complete()
                } else {
                    WordInput::Typed
                }
            }
        }
    }
}
