//! Monte Carlo Tree Search (MCTS) with UCB1 selection and random rollouts.
//!
//! This crate provides a game-agnostic search that works with any
//! deterministic two-player game implementing [`GameRules`].
//!
//! # Overview
//!
//! Each iteration of the search has four phases:
//!
//! 1. **Selection**: Descend from the root using the UCB1 bandit score. The
//!    engine's side takes the highest score, its opponent the lowest.
//! 2. **Expansion**: A visited leaf gets one child per legal next position.
//! 3. **Rollout**: Play uniformly random moves until a win or until no legal
//!    move is left. A win for the engine scores +50, a loss -50, a draw 0.
//! 4. **Backpropagation**: Add the score and one visit to every node from
//!    the evaluated node up to the root.
//!
//! After the iterations the root child with the best average score is the
//! chosen move.
//!
//! # Usage
//!
//! ```rust,ignore
//! use games_connect4::{Board, Connect4Rules, Disc};
//! use mcts::{run_search, SearchConfig};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let rules = Connect4Rules;
//! let config = SearchConfig::default().with_iterations(5000);
//! let mut rng = ChaCha20Rng::seed_from_u64(42);
//!
//! let decision = run_search(&rules, Board::new(), Disc::Red, config, &mut rng);
//! println!("{}", decision.board);
//! println!("Evaluation: {}", decision.score);
//! ```
//!
//! # Scoring
//!
//! Scores are always signed from one fixed [`Perspective`]: positive numbers
//! favor the side the engine plays, whoever is to move at a given node.
//!
//! # Contract
//!
//! The root position must still be undecided: building a [`SearchTree`] on
//! a board where either side has already won is a caller error and panics.
//! A root with no legal moves is fine and yields a neutral
//! [`Decision`] (see [`Decision::is_fallback`]).
//!
//! Among root children with the same average score, a move that wins on
//! the spot is preferred, so a forced win is always returned with the full
//! win score.
//!
//! # Architecture
//!
//! ```text
//! +-------------------------------------------------------------+
//! |                         SearchTree                          |
//! +-------------------------------------------------------------+
//! |  +-------------+  +-------------+  +---------------------+  |
//! |  |  NodeArena  |  |  GameRules  |  |    Perspective      |  |
//! |  |  (arena)    |  | (game sim)  |  | (score orientation) |  |
//! |  +------+------+  +------+------+  +----------+----------+  |
//! |         |                |                    |             |
//! |         v                v                    v             |
//! |  +------------------------------------------------------+   |
//! |  |           select -> expand -> rollout ->             |   |
//! |  |                     backpropagate                    |   |
//! |  +------------------------------------------------------+   |
//! +-------------------------------------------------------------+
//! ```

pub mod arena;
pub mod config;
pub mod node;
pub mod rules;
pub mod tree;

#[cfg(test)]
mod test_game;

// Re-export main types
pub use arena::{NodeArena, TreeStats};
pub use config::{ConfigError, SearchConfig, TerminalPolicy};
pub use node::{NodeId, SearchNode, EXPLORATION_WEIGHT};
pub use rules::{GameRules, Perspective, WIN_SCORE};
pub use tree::{run_search, Decision, SearchTree};
