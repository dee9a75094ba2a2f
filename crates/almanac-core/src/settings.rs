//! Library settings.
//!
//! [`Settings`] is a plain value handed to the constructors that need it;
//! there is no process-wide instance.  It can be read from JSON, and any
//! field left out keeps its default.

use crate::errors::Result;
use serde::{Deserialize, Serialize};

/// How the holiday feed loader treats lines it cannot parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMode {
    /// Abort the whole load on the first bad line or duplicate date.
    Strict,
    /// Skip bad lines and duplicate dates, reporting each one.
    #[default]
    Lenient,
}

/// Tunables shared by the ledger loader, the walker, and the façade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Parse policy for holiday feeds.
    pub feed_mode: FeedMode,
    /// Upper bound on candidate days examined while searching for a market
    /// day before giving up with `WalkerStalled`.
    pub max_walk_steps: u32,
    /// Whether walkers built from these settings skip Saturdays and Sundays.
    pub skip_weekends: bool,
}

impl Settings {
    /// Default cap on market-day searches.
    pub const DEFAULT_MAX_WALK_STEPS: u32 = 30;

    /// Parse settings from a JSON document.
    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Builder-style override of the feed mode.
    pub fn with_feed_mode(mut self, mode: FeedMode) -> Self {
        self.feed_mode = mode;
        self
    }

    /// Builder-style override of the walk cap.
    pub fn with_max_walk_steps(mut self, steps: u32) -> Self {
        self.max_walk_steps = steps;
        self
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            feed_mode: FeedMode::Lenient,
            max_walk_steps: Self::DEFAULT_MAX_WALK_STEPS,
            skip_weekends: true,
        }
    }
}
