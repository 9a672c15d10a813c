//! Game settings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How a hint picks the destination hole once the source is chosen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HintPolicy {
    /// Destination with the most winning games among its siblings.
    #[default]
    BestDestination,
    /// Destination candidates are compared against the source's own count.
    /// In practice this keeps the first recorded destination.
    CompareToSource,
}

impl HintPolicy {
    pub fn name(self) -> &'static str {
        match self {
            HintPolicy::BestDestination => "best_destination",
            HintPolicy::CompareToSource => "compare_to_source",
        }
    }
}

impl fmt::Display for HintPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown hint policy: {0} (expected best_destination or compare_to_source)")]
pub struct UnknownHintPolicy(String);

impl FromStr for HintPolicy {
    type Err = UnknownHintPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('-', "_").as_str() {
            "best_destination" | "best" => Ok(HintPolicy::BestDestination),
            "compare_to_source" | "legacy" => Ok(HintPolicy::CompareToSource),
            _ => Err(UnknownHintPolicy(s.to_string())),
        }
    }
}

/// Settings for a game session. Every field has a default, so `{}` is a
/// valid configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub hint_policy: HintPolicy,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<GameConfig, serde_json::Error> {
        serde_json::from_str(json)
    }
}
