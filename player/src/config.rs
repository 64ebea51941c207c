//! Configuration for the interactive player
//!
//! Configuration is loaded from config.toml with environment variable overrides.
//! CLI arguments take highest priority, followed by env vars, then config.toml.

use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser};
use engine_config::{load_config, CentralConfig};
use games_connect4::Disc;
use mcts::{SearchConfig, TerminalPolicy};
use once_cell::sync::Lazy;
use tracing::level_filters::LevelFilter;

// Load central config once at startup
static CENTRAL_CONFIG: Lazy<CentralConfig> = Lazy::new(load_config);

// Default value functions that read from central config
fn default_iterations() -> u32 {
    CENTRAL_CONFIG.search.iterations
}

fn default_seed() -> u64 {
    CENTRAL_CONFIG.search.seed
}

fn default_terminal_policy() -> String {
    CENTRAL_CONFIG.search.terminal_policy.clone()
}

fn default_human_disc() -> String {
    CENTRAL_CONFIG.match_.human_disc.clone()
}

fn default_first_disc() -> String {
    CENTRAL_CONFIG.match_.first_disc.clone()
}

fn default_swap_colors() -> bool {
    CENTRAL_CONFIG.match_.swap_colors
}

fn default_max_games() -> u32 {
    CENTRAL_CONFIG.match_.max_games
}

fn default_log_level() -> String {
    CENTRAL_CONFIG.common.log_level.clone()
}

#[derive(Parser, Debug, Clone)]
#[command(name = "connect4")]
#[command(about = "Play Connect 4 against a Monte Carlo Tree Search engine")]
#[command(
    long_about = "Interactive Connect 4 in the terminal. Enter a column number (0-6)
on your turn; the engine answers after a fixed number of search iterations.

Configuration is loaded from config.toml with environment variable overrides.
CLI arguments take highest priority."
)]
pub struct Config {
    /// Search iterations per engine move
    #[arg(long, default_value_t = default_iterations())]
    pub iterations: u32,

    /// Rollout RNG seed (0 for a fresh seed every session)
    #[arg(long, default_value_t = default_seed())]
    pub seed: u64,

    /// Terminal node policy (settled, resample)
    #[arg(long, default_value_t = default_terminal_policy())]
    pub terminal_policy: String,

    /// Disc you play in the first game (red, yellow)
    #[arg(long, default_value_t = default_human_disc())]
    pub human_disc: String,

    /// Disc that opens every game (red, yellow)
    #[arg(long, default_value_t = default_first_disc())]
    pub first_disc: String,

    /// Swap discs with the engine after each game
    #[arg(long, default_value_t = default_swap_colors(), action = ArgAction::Set)]
    pub swap_colors: bool,

    /// Number of games to play (0 to play until input ends)
    #[arg(long, default_value_t = default_max_games())]
    pub max_games: u32,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value_t = default_log_level())]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(anyhow!("iterations must be greater than 0"));
        }

        self.human_disc()?;
        self.first_disc()?;
        self.terminal_policy()?;

        if self.log_level.parse::<LevelFilter>().is_err() {
            return Err(anyhow!(
                "invalid log level '{}', expected one of trace, debug, info, warn, error",
                self.log_level
            ));
        }

        Ok(())
    }

    pub fn human_disc(&self) -> Result<Disc> {
        self.human_disc
            .parse()
            .map_err(|e| anyhow!("human_disc: {}", e))
    }

    pub fn first_disc(&self) -> Result<Disc> {
        self.first_disc
            .parse()
            .map_err(|e| anyhow!("first_disc: {}", e))
    }

    pub fn terminal_policy(&self) -> Result<TerminalPolicy> {
        self.terminal_policy
            .parse()
            .map_err(|e| anyhow!("terminal_policy: {}", e))
    }

    /// Search settings for every engine move
    pub fn search_config(&self) -> Result<SearchConfig> {
        Ok(SearchConfig::default()
            .with_iterations(self.iterations)
            .with_terminal_policy(self.terminal_policy()?))
    }

    /// Game limit, None when unbounded
    pub fn game_limit(&self) -> Option<u32> {
        (self.max_games > 0).then_some(self.max_games)
    }

    /// Fixed rollout seed, None to seed from entropy
    pub fn fixed_seed(&self) -> Option<u64> {
        (self.seed != 0).then_some(self.seed)
    }
}
