//! connect4 - Play Connect 4 against a Monte Carlo Tree Search engine
//!
//! Reads moves from stdin and prints the board, the engine's replies and
//! its evaluation to stdout. Logs go to stderr.

use anyhow::Result;
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::info;

mod config;
mod game;

use crate::config::Config;
use crate::game::{Match, MatchSettings};

fn init_tracing(level: &str) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level);
    info!(log_level = %config.log_level, "Tracing initialized");

    let settings = MatchSettings {
        search: config.search_config()?,
        human: config.human_disc()?,
        first: config.first_disc()?,
        swap_colors: config.swap_colors,
        max_games: config.game_limit(),
    };
    info!(
        iterations = settings.search.iterations,
        terminal_policy = %settings.search.terminal_policy,
        human = %settings.human,
        "Starting match"
    );

    let rng = match config.fixed_seed() {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_entropy(),
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut game = Match::new(settings, stdin.lock(), stdout.lock(), rng);
    let summary = game.run()?;

    info!(
        games = summary.games,
        human_wins = summary.human_wins,
        engine_wins = summary.engine_wins,
        draws = summary.draws,
        "Match finished"
    );

    Ok(())
}
