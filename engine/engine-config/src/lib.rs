//! Centralized configuration loading from config.toml.
//!
//! This crate provides configuration structs and loading logic shared by the
//! search engine and the interactive player.
//!
//! # Configuration Priority
//!
//! Settings are loaded with the following priority (highest to lowest):
//! 1. Environment variables (`CONNECT4_<SECTION>_<KEY>`)
//! 2. config.toml file
//! 3. Built-in defaults
//!
//! Command-line flags of the player binary sit above all three.
//!
//! # Environment Variable Override Pattern
//!
//! ```text
//! CONNECT4_<SECTION>_<KEY>=value
//!
//! Examples:
//!     CONNECT4_COMMON_LOG_LEVEL=debug
//!     CONNECT4_SEARCH_ITERATIONS=20000
//!     CONNECT4_SEARCH_TERMINAL_POLICY=resample
//!     CONNECT4_MATCH_HUMAN_DISC=red
//! ```

mod defaults;
mod loader;
mod structs;

pub use defaults::*;
pub use loader::{
    apply_env_overrides, load_config, load_from_path, CONFIG_PATH_ENV, CONFIG_SEARCH_PATHS,
};
pub use structs::*;
