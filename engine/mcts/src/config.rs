//! Search configuration parameters.
//!
//! The exploration weight is not part of the configuration: it is fixed to
//! the win/loss scale (see [`EXPLORATION_WEIGHT`](crate::node::EXPLORATION_WEIGHT)).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised while building a search configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown terminal policy: {0} (expected \"settled\" or \"resample\")")]
    UnknownTerminalPolicy(String),
}

/// How a terminal node is credited each time the search evaluates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalPolicy {
    /// The first evaluation replaces the construction-time score, so every
    /// evaluation adds the fixed score and one visit and the node's average
    /// stays at exactly the fixed score.
    #[default]
    Settled,

    /// The node's own visit is cancelled on every evaluation: it stays
    /// unvisited, keeps winning selection as an unexplored branch, and its
    /// raw total (and its ancestors' totals) grow with each re-selection.
    Resample,
}

impl TerminalPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalPolicy::Settled => "settled",
            TerminalPolicy::Resample => "resample",
        }
    }
}

impl FromStr for TerminalPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "settled" => Ok(TerminalPolicy::Settled),
            "resample" => Ok(TerminalPolicy::Resample),
            other => Err(ConfigError::UnknownTerminalPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for TerminalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for one Monte Carlo Tree Search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of select/expand/rollout/backpropagate cycles per decision.
    /// The only bound on how much work a search performs.
    pub iterations: u32,

    /// Treatment of terminal nodes on re-evaluation.
    pub terminal_policy: TerminalPolicy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: 5000,
            terminal_policy: TerminalPolicy::Settled,
        }
    }
}

impl SearchConfig {
    /// Create a fast config for testing.
    pub fn for_testing() -> Self {
        Self {
            iterations: 200,
            terminal_policy: TerminalPolicy::Settled,
        }
    }

    /// Builder pattern: set number of iterations.
    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    /// Builder pattern: set the terminal policy.
    pub fn with_terminal_policy(mut self, policy: TerminalPolicy) -> Self {
        self.terminal_policy = policy;
        self
    }
}
