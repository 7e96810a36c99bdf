pub mod core;
pub mod sentences;

// Re-export the main types for convenience
pub use self::core::{PoolTier, TieredWords, WordPools};
pub use self::sentences::{capitalize, tier_for_level, Sentence, SentenceGenerator, MAX_TIER};
