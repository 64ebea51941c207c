//! Configuration struct definitions.
//!
//! All config structs with serde deserialization support and default values.

use crate::defaults;
use serde::Deserialize;

// ============================================================================
// Serde default functions (required for #[serde(default = "...")])
// These call the accessor functions from defaults module
// ============================================================================

fn d_log_level() -> String {
    defaults::log_level().into()
}
fn d_iterations() -> u32 {
    defaults::iterations()
}
fn d_seed() -> u64 {
    defaults::seed()
}
fn d_terminal_policy() -> String {
    defaults::terminal_policy().into()
}
fn d_human_disc() -> String {
    defaults::human_disc().into()
}
fn d_first_disc() -> String {
    defaults::first_disc().into()
}
fn d_swap_colors() -> bool {
    defaults::swap_colors()
}
fn d_max_games() -> u32 {
    defaults::max_games()
}

// ============================================================================
// Configuration Structs
// ============================================================================

/// Root configuration structure matching config.toml
#[derive(Debug, Deserialize, Default, Clone)]
pub struct CentralConfig {
    #[serde(default)]
    pub common: CommonConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default, rename = "match")]
    pub match_: MatchConfig,
}

/// Settings shared by every component
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CommonConfig {
    #[serde(default = "d_log_level")]
    pub log_level: String,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level().into(),
        }
    }
}

/// Engine search settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SearchConfig {
    /// Iterations per engine move
    #[serde(default = "d_iterations")]
    pub iterations: u32,
    /// Rollout RNG seed; 0 draws a fresh seed
    #[serde(default = "d_seed")]
    pub seed: u64,
    /// "settled" or "resample"
    #[serde(default = "d_terminal_policy")]
    pub terminal_policy: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            iterations: defaults::iterations(),
            seed: defaults::seed(),
            terminal_policy: defaults::terminal_policy().into(),
        }
    }
}

/// Interactive match settings
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MatchConfig {
    /// Disc the human plays in the first game
    #[serde(default = "d_human_disc")]
    pub human_disc: String,
    /// Disc that opens every game
    #[serde(default = "d_first_disc")]
    pub first_disc: String,
    /// Swap human and engine discs after each game
    #[serde(default = "d_swap_colors")]
    pub swap_colors: bool,
    /// Games to play before exiting; 0 plays until stdin closes
    #[serde(default = "d_max_games")]
    pub max_games: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            human_disc: defaults::human_disc().into(),
            first_disc: defaults::first_disc().into(),
            swap_colors: defaults::swap_colors(),
            max_games: defaults::max_games(),
        }
    }
}
