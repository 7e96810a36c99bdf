use include_dir::{include_dir, Dir};
use serde::Deserialize;
use serde_json::from_str;
use std::error::Error;
use std::sync::OnceLock;

static LANG_DIR: Dir = include_dir!("src/lang");
static EMBEDDED: OnceLock<WordPools> = OnceLock::new();

/// Sophistication bucket a word category is drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolTier {
    Simple,
    Common,
    Advanced,
}

impl PoolTier {
    /// tier >= 5 draws advanced words, tier >= 3 common ones
    pub fn for_tier(tier: u32) -> Self {
        if tier >= 5 {
            PoolTier::Advanced
        } else if tier >= 3 {
            PoolTier::Common
        } else {
            PoolTier::Simple
        }
    }
}

/// A word category split into escalating pools
#[derive(Deserialize, Clone, Debug)]
pub struct TieredWords {
    pub simple: Vec<String>,
    pub common: Vec<String>,
    pub advanced: Vec<String>,
}

impl TieredWords {
    pub fn pool(&self, tier: PoolTier) -> &[String] {
        match tier {
            PoolTier::Simple => &self.simple,
            PoolTier::Common => &self.common,
            PoolTier::Advanced => &self.advanced,
        }
    }
}

#[derive(Deserialize, Clone, Debug)]
pub struct WordPools {
    pub name: String,
    pub nouns: TieredWords,
    pub verbs: TieredWords,
    pub adjectives: TieredWords,
    pub adverbs: TieredWords,
    pub places: Vec<String>,
    pub prepositions: Vec<String>,
    pub times: Vec<String>,
}

impl WordPools {
    /// The pools compiled into the binary
    pub fn embedded() -> &'static WordPools {
        EMBEDDED.get_or_init(|| {
            read_pools_from_file("pools.json").expect("embedded word pools must deserialize")
        })
    }
}

fn read_pools_from_file(file_name: &str) -> Result<WordPools, Box<dyn Error>> {
    let file = LANG_DIR
        .get_file(file_name)
        .ok_or_else(|| format!("word pool file not found: {file_name}"))?;

    let file_as_str = file
        .contents_utf8()
        .ok_or("unable to interpret word pool file as a string")?;

    Ok(from_str(file_as_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_pools_load() {
        let pools = WordPools::embedded();

        assert_eq!(pools.name, "english_home_row");
        assert!(pools.nouns.simple.contains(&"cat".to_string()));
        assert!(pools.verbs.advanced.contains(&"synchronize".to_string()));
        assert_eq!(pools.prepositions.len(), 10);
        assert!(pools.times.contains(&"this morning".to_string()));
    }

    #[test]
    fn every_pool_is_non_empty() {
        let pools = WordPools::embedded();
        for tiered in [&pools.nouns, &pools.verbs, &pools.adjectives, &pools.adverbs] {
            for tier in [PoolTier::Simple, PoolTier::Common, PoolTier::Advanced] {
                assert!(!tiered.pool(tier).is_empty());
            }
        }
        assert!(!pools.places.is_empty());
        assert!(!pools.times.is_empty());
    }

    #[test]
    fn pool_tier_thresholds() {
        assert_eq!(PoolTier::for_tier(1), PoolTier::Simple);
        assert_eq!(PoolTier::for_tier(2), PoolTier::Simple);
        assert_eq!(PoolTier::for_tier(3), PoolTier::Common);
        assert_eq!(PoolTier::for_tier(4), PoolTier::Common);
        assert_eq!(PoolTier::for_tier(5), PoolTier::Advanced);
    }

    #[test]
    fn missing_pool_file_is_an_error() {
        assert!(read_pools_from_file("nonexistent.json").is_err());
    }

    #[test]
    fn pools_deserialize_from_json() {
        let json_data = r#"
        {
            "name": "tiny",
            "nouns": {"simple": ["cat"], "common": ["artist"], "advanced": ["galaxy"]},
            "verbs": {"simple": ["run"], "common": ["create"], "advanced": ["transform"]},
            "adjectives": {"simple": ["red"], "common": ["bold"], "advanced": ["vivid"]},
            "adverbs": {"simple": ["well"], "common": ["easily"], "advanced": ["precisely"]},
            "places": ["park"],
            "prepositions": ["in"],
            "times": ["today"]
        }
        "#;

        let pools: WordPools = from_str(json_data).expect("Failed to deserialize test pools");

        assert_eq!(pools.name, "tiny");
        assert_eq!(pools.nouns.pool(PoolTier::Common), ["artist".to_string()]);
    }
}
