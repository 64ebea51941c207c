//! Default configuration values loaded from config.defaults.toml.
//!
//! This module loads defaults from the shared TOML file at compile time,
//! so the binary and the checked-in reference file never drift apart.

use once_cell::sync::Lazy;
use serde::Deserialize;

/// The embedded defaults TOML file (loaded at compile time)
const DEFAULTS_TOML: &str = include_str!("../../../config.defaults.toml");

/// Parsed defaults structure (parsed once at first use)
static DEFAULTS: Lazy<DefaultsConfig> = Lazy::new(|| {
    toml::from_str(DEFAULTS_TOML).expect("config.defaults.toml should be valid TOML")
});

// ============================================================================
// Internal structs for parsing config.defaults.toml
// ============================================================================

#[derive(Debug, Deserialize)]
struct DefaultsConfig {
    common: CommonDefaults,
    search: SearchDefaults,
    #[serde(rename = "match")]
    match_: MatchDefaults,
}

#[derive(Debug, Deserialize)]
struct CommonDefaults {
    log_level: String,
}

#[derive(Debug, Deserialize)]
struct SearchDefaults {
    iterations: u32,
    seed: u64,
    terminal_policy: String,
}

#[derive(Debug, Deserialize)]
struct MatchDefaults {
    human_disc: String,
    first_disc: String,
    swap_colors: bool,
    max_games: u32,
}

// ============================================================================
// Public accessor functions
// ============================================================================

// Common
pub fn log_level() -> &'static str {
    &DEFAULTS.common.log_level
}

// Search
pub fn iterations() -> u32 {
    DEFAULTS.search.iterations
}
pub fn seed() -> u64 {
    DEFAULTS.search.seed
}
pub fn terminal_policy() -> &'static str {
    &DEFAULTS.search.terminal_policy
}

// Match
pub fn human_disc() -> &'static str {
    &DEFAULTS.match_.human_disc
}
pub fn first_disc() -> &'static str {
    &DEFAULTS.match_.first_disc
}
pub fn swap_colors() -> bool {
    DEFAULTS.match_.swap_colors
}
pub fn max_games() -> u32 {
    DEFAULTS.match_.max_games
}
