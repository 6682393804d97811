//! Engine configuration.

use std::env;

/// Session tuning knobs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for template resolution and refills
    pub seed: u32,
    /// Upper bound on detect/clear/refill rounds per turn (at least 1 is always run)
    pub max_cascades: u32,
    /// Clear blockers orthogonally adjacent to matched cells
    pub clear_adjacent_blockers: bool,
    /// Undo swaps that produce no match instead of spending a move
    pub require_match: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            max_cascades: 32,
            clear_adjacent_blockers: true,
            require_match: true,
        }
    }
}

impl EngineConfig {
    /// Create from environment variables. Unset or unparsable values keep
    /// their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("TILE_MATCH_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        let max_cascades = lookup("TILE_MATCH_MAX_CASCADES")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_cascades);

        let clear_adjacent_blockers = lookup("TILE_MATCH_CLEAR_ADJACENT_BLOCKERS")
            .and_then(|s| parse_bool(&s))
            .unwrap_or(defaults.clear_adjacent_blockers);

        let require_match = lookup("TILE_MATCH_REQUIRE_MATCH")
            .and_then(|s| parse_bool(&s))
            .unwrap_or(defaults.require_match);

        Self {
            seed,
            max_cascades,
            clear_adjacent_blockers,
            require_match,
        }
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
