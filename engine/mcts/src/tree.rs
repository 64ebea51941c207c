//! MCTS search implementation.
//!
//! Implements the core MCTS loop:
//! 1. Selection: descend from the root using the bandit score
//! 2. Expansion: add one child per legal next position the first time a
//!    visited leaf is reached
//! 3. Rollout: play a random game from the chosen node
//! 4. Backpropagation: add the rollout score to every node on the path

use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace, warn};

use crate::arena::{NodeArena, TreeStats};
use crate::config::{SearchConfig, TerminalPolicy};
use crate::node::{NodeId, SearchNode, RESOLVED_VISITS};
use crate::rules::{GameRules, Perspective};

/// Move chosen by [`SearchTree::decide`].
#[derive(Debug, Clone)]
pub struct Decision<B> {
    /// Position after the chosen move
    pub board: B,

    /// Average score of the chosen child from the engine's perspective
    pub score: f64,

    /// Chosen root child (NONE for the neutral fallback)
    pub child: NodeId,
}

impl<B> Decision<B> {
    /// True when the root had no children and the root board was returned.
    pub fn is_fallback(&self) -> bool {
        self.child.is_none()
    }
}

/// One Monte Carlo search rooted at a single position.
pub struct SearchTree<'a, R: GameRules> {
    arena: NodeArena<R::Board, R::Player>,
    rules: &'a R,
    perspective: Perspective<R::Player>,
    config: SearchConfig,
}

impl<'a, R: GameRules> SearchTree<'a, R> {
    /// Create a search from an already constructed root node and expand the root.
    ///
    /// # Panics
    /// If `root` is attached to a parent or its board is already decided.
    pub fn new(
        rules: &'a R,
        perspective: Perspective<R::Player>,
        root: SearchNode<R::Board, R::Player>,
        config: SearchConfig,
    ) -> Self {
        assert!(root.is_root(), "search root must not have a parent");
        assert!(!root.terminal, "cannot search from a decided position");

        let mut tree = Self {
            arena: NodeArena::new(root),
            rules,
            perspective,
            config,
        };
        let root_id = tree.arena.root();
        tree.expand(root_id);
        tree
    }

    /// Create a search for `player` to move on `board`, playing as `player`.
    pub fn from_position(
        rules: &'a R,
        board: R::Board,
        player: R::Player,
        config: SearchConfig,
    ) -> Self {
        let perspective = Perspective::new(rules, player);
        let root = SearchNode::new(rules, &perspective, board, player);
        Self::new(rules, perspective, root, config)
    }

    /// Get the node arena (for inspection/debugging).
    pub fn arena(&self) -> &NodeArena<R::Board, R::Player> {
        &self.arena
    }

    pub fn perspective(&self) -> Perspective<R::Player> {
        self.perspective
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stats(&self) -> TreeStats {
        self.arena.stats()
    }

    /// Create and attach one child per legal next position of `node_id`.
    ///
    /// # Panics
    /// If the node was already expanded or is terminal.
    pub fn expand(&mut self, node_id: NodeId) {
        let node = self.arena.get(node_id);
        assert!(!node.expanded, "node {} already expanded", node_id.0);
        assert!(!node.terminal, "cannot expand terminal node {}", node_id.0);

        let next_player = self.rules.other_player(node.player);
        let positions = self.rules.legal_next_positions(&node.board, node.player);
        self.arena.get_mut(node_id).expanded = true;

        for board in positions {
            let child = SearchNode::new(self.rules, &self.perspective, board, next_player);
            self.arena
                .attach(self.rules, &self.perspective, node_id, child);
        }
    }

    /// Walk from the root to the node the next rollout starts from,
    /// expanding at most one node on the way.
    pub fn find_node_to_evaluate(&mut self) -> NodeId {
        let mut current = self.arena.root();

        loop {
            let node = self.arena.get(current);

            // Fresh leaves and decided positions are evaluated as they are
            if (!node.is_root() && node.visit_count == 0) || node.terminal {
                break;
            }

            if !node.expanded {
                self.expand(current);
                if let Some(&first) = self.arena.get(current).children.first() {
                    current = first;
                }
                break;
            }

            // Expanded without children: no legal move left
            if node.children.is_empty() {
                break;
            }

            current = self.arena.select_child(current, &self.perspective);
        }

        current
    }

    /// Score one evaluation of `node_id`: the fixed outcome for a terminal
    /// node, otherwise a random playout from its board.
    pub fn roll(&mut self, node_id: NodeId, rng: &mut ChaCha20Rng) -> i64 {
        let policy = self.config.terminal_policy;
        let node = self.arena.get_mut(node_id);

        if node.terminal {
            match policy {
                TerminalPolicy::Settled => {
                    if node.visit_count == 0 {
                        node.total_score = 0;
                    }
                }
                TerminalPolicy::Resample => node.visit_count = RESOLVED_VISITS,
            }
            return node.fixed_score;
        }

        let last_mover = self.rules.other_player(node.player);
        self.rules
            .rollout(&node.board, last_mover, self.perspective, rng)
    }

    /// Run one select/expand/rollout/backpropagate cycle.
    pub fn iterate(&mut self, rng: &mut ChaCha20Rng) {
        let node_id = self.find_node_to_evaluate();
        let score = self.roll(node_id, rng);
        self.arena.backpropagate(node_id, score);

        trace!(
            node = node_id.0,
            depth = self.arena.depth(node_id),
            score,
            "MCTS iteration complete"
        );
    }

    /// Run `iterations` cycles and pick the root child with the best average.
    pub fn decide(&mut self, iterations: u32, rng: &mut ChaCha20Rng) -> Decision<R::Board> {
        for _ in 0..iterations {
            self.iterate(rng);
        }

        let root = self.arena.get(self.arena.root());
        let decision = match self.arena.best_root_child() {
            Some((child, score)) => Decision {
                board: self.arena.get(child).board.clone(),
                score,
                child,
            },
            None => {
                warn!(
                    iterations,
                    "Root has no legal moves, returning the position unchanged"
                );
                Decision {
                    board: root.board.clone(),
                    score: 0.0,
                    child: NodeId::NONE,
                }
            }
        };

        debug!(
            iterations,
            nodes = self.arena.len(),
            root_visits = root.visit_count,
            child = decision.child.0,
            score = decision.score,
            "MCTS decision"
        );

        decision
    }
}

/// Convenience function to run a single search with `config.iterations`
/// cycles for `player` to move on `board`.
pub fn run_search<R: GameRules>(
    rules: &R,
    board: R::Board,
    player: R::Player,
    config: SearchConfig,
    rng: &mut ChaCha20Rng,
) -> Decision<R::Board> {
    let iterations = config.iterations;
    let mut tree = SearchTree::from_position(rules, board, player, config);
    tree.decide(iterations, rng)
}
