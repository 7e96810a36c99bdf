use super::core::{PoolTier, TieredWords, WordPools};
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

/// Highest difficulty tier
pub const MAX_TIER: u32 = 5;

/// Difficulty tier (1..=5) for a level: two levels per tier
pub fn tier_for_level(level: u32) -> u32 {
    level.max(1).div_ceil(2).min(MAX_TIER)
}

/// Ordered words the player has to type, plus the text they came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sentence {
    pub text: String,
    pub words: Vec<String>,
}

impl Sentence {
    /// Splits on whitespace. Multi-word time phrases become separate words.
    pub fn from_text(text: impl AsRef<str>) -> Self {
        let words: Vec<String> = text.as_ref().split_whitespace().map(str::to_string).collect();
        Self {
            text: words.join(" "),
            words,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether every word can be entered with letter keys alone
    pub fn is_typeable(&self) -> bool {
        !self.is_empty()
            && self.words.iter().all(|w| {
                let normalized = crate::sequencer::normalize_word(w);
                !normalized.is_empty() && normalized.chars().all(|c| c.is_ascii_lowercase())
            })
    }
}

/// Builds leveled sentences from clause templates over the word pools
#[derive(Debug, Clone, Copy)]
pub struct SentenceGenerator<'p> {
    pools: &'p WordPools,
}

impl Default for SentenceGenerator<'static> {
    fn default() -> Self {
        Self::new(WordPools::embedded())
    }
}

impl<'p> SentenceGenerator<'p> {
    pub fn new(pools: &'p WordPools) -> Self {
        Self { pools }
    }

    pub fn generate<R: Rng + ?Sized>(&self, level: u32, rng: &mut R) -> Sentence {
        let tier = tier_for_level(level);
        let mut draw = Draw {
            pools: self.pools,
            pool_tier: PoolTier::for_tier(tier),
            rng,
        };

        let raw = match tier {
            1 => draw.tier1(),
            2 => draw.tier2(),
            3 => draw.tier3(),
            4 => draw.tier4(),
            _ => draw.tier5(),
        };

        let sentence = Sentence::from_text(capitalize(&raw));
        debug!(level, tier, text = %sentence.text, "generated sentence");
        sentence
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One sentence worth of random draws at a fixed pool tier
struct Draw<'p, 'r, R: Rng + ?Sized> {
    pools: &'p WordPools,
    pool_tier: PoolTier,
    rng: &'r mut R,
}

impl<R: Rng + ?Sized> Draw<'_, '_, R> {
    fn pick<'a>(&mut self, words: &'a [String]) -> &'a str {
        words.choose(&mut *self.rng).map(String::as_str).unwrap_or_default()
    }

    fn tiered(&mut self, words: &TieredWords) -> String {
        self.pick(words.pool(self.pool_tier)).to_string()
    }

    fn noun(&mut self) -> String {
        let pools = self.pools;
        self.tiered(&pools.nouns)
    }

    fn verb(&mut self) -> String {
        let pools = self.pools;
        self.tiered(&pools.verbs)
    }

    fn adj(&mut self) -> String {
        let pools = self.pools;
        self.tiered(&pools.adjectives)
    }

    fn adv(&mut self) -> String {
        let pools = self.pools;
        self.tiered(&pools.adverbs)
    }

    fn place(&mut self) -> String {
        let pools = self.pools;
        self.pick(&pools.places).to_string()
    }

    fn prep(&mut self) -> String {
        let pools = self.pools;
        self.pick(&pools.prepositions).to_string()
    }

    fn time(&mut self) -> String {
        let pools = self.pools;
        self.pick(&pools.times).to_string()
    }

    fn subject(&mut self) -> &'static str {
        ["we", "they", "I"].choose(&mut *self.rng).copied().unwrap_or("we")
    }

    fn plural_subject(&mut self) -> &'static str {
        ["we", "they"].choose(&mut *self.rng).copied().unwrap_or("we")
    }

    fn variant(&mut self, count: usize) -> usize {
        self.rng.gen_range(0..count)
    }

    fn clause_simple(&mut self) -> String {
        format!("the {} {} {} {}", self.adj(), self.noun(), self.verb(), self.adv())
    }

    fn clause_object(&mut self) -> String {
        format!(
            "{} {} the {} {}",
            self.subject(),
            self.verb(),
            self.adj(),
            self.noun()
        )
    }

    fn clause_prep(&mut self) -> String {
        format!(
            "the {} {} {} {} the {}",
            self.adj(),
            self.noun(),
            self.verb(),
            self.prep(),
            self.place()
        )
    }

    fn clause_time(&mut self) -> String {
        format!(
            "{} {} {} {}",
            self.plural_subject(),
            self.verb(),
            self.adv(),
            self.time()
        )
    }

    fn tier1(&mut self) -> String {
        match self.variant(4) {
            0 => self.clause_simple(),
            1 => self.clause_object(),
            2 => format!("the {} {}", self.noun(), self.verb()),
            _ => format!("{} {} {}", self.plural_subject(), self.verb(), self.adv()),
        }
    }

    fn tier2(&mut self) -> String {
        match self.variant(3) {
            0 => {
                let clause = self.clause_simple();
                format!("{clause} {} the {}", self.prep(), self.place())
            }
            1 => {
                let clause = self.clause_object();
                format!("{clause} {} the {}", self.prep(), self.place())
            }
            _ => self.clause_time(),
        }
    }

    fn tier3(&mut self) -> String {
        match self.variant(3) {
            0 => format!("{}, and {}", self.clause_simple(), self.clause_object()),
            1 => format!("{}, and {}", self.clause_prep(), self.clause_time()),
            _ => format!("{} while {}", self.clause_object(), self.clause_simple()),
        }
    }

    fn tier4(&mut self) -> String {
        match self.variant(3) {
            0 => format!(
                "when the {} {} {}, the {} {} {} the {}",
                self.noun(),
                self.verb(),
                self.adv(),
                self.noun(),
                self.verb(),
                self.prep(),
                self.place()
            ),
            1 => format!(
                "{} because the {} {} {}",
                self.clause_object(),
                self.noun(),
                self.verb(),
                self.adv()
            ),
            _ => format!("{}, but {}", self.clause_prep(), self.clause_object()),
        }
    }

    fn tier5(&mut self) -> String {
        match self.variant(3) {
            0 => format!(
                "although the {} is {}, we {} {} {} the {} {}",
                self.noun(),
                self.adj(),
                self.verb(),
                self.adv(),
                self.prep(),
                self.place(),
                self.time()
            ),
            1 => format!(
                "{}, and then {} {} the {}",
                self.clause_simple(),
                self.clause_object(),
                self.prep(),
                self.place()
            ),
            _ => format!(
                "{}, so the {} {} {}",
                self.clause_time(),
                self.noun(),
                self.verb(),
                self.adv()
            ),
        }
    }
}
