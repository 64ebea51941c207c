//! Search tree node representation.
//!
//! Each node holds one game position together with the statistics the
//! bandit formula needs. Scores are signed from the search's fixed
//! [`Perspective`], never from the point of view of the player to move.

use crate::rules::{GameRules, Perspective, WIN_SCORE};

/// Weight of the exploration term, matched to the ±50 win/loss scale.
pub const EXPLORATION_WEIGHT: f64 = 50.0;

/// Finite stand-in for a bandit score that overflowed.
pub const SCORE_SENTINEL: f64 = 1e200;

/// Visit count a terminal node is given when it is resolved under
/// [`TerminalPolicy::Resample`](crate::TerminalPolicy::Resample); the visit
/// added by backpropagation brings it back to zero.
pub const RESOLVED_VISITS: i64 = -1;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<B, P> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Game position at this node
    pub board: B,

    /// Player about to move from `board`
    pub player: P,

    /// Sum of rollout scores credited to this node
    pub total_score: i64,

    /// Number of rollouts credited to this node
    pub visit_count: i64,

    /// Whether either side has already won on `board`
    pub terminal: bool,

    /// Outcome of a terminal board (0 otherwise)
    pub fixed_score: i64,

    /// Set once the node has generated its children
    pub expanded: bool,

    /// Children in move generation order. Empty until expanded.
    pub children: Vec<NodeId>,
}

impl<B, P: Copy + Eq> SearchNode<B, P> {
    /// Create a detached node and classify its board.
    pub fn new<R>(rules: &R, perspective: &Perspective<P>, board: B, player: P) -> Self
    where
        R: GameRules<Board = B, Player = P> + ?Sized,
    {
        let mut node = Self {
            parent: NodeId::NONE,
            board,
            player,
            total_score: 0,
            visit_count: 0,
            terminal: false,
            fixed_score: 0,
            expanded: false,
            children: Vec::new(),
        };
        node.classify(rules, perspective);
        node
    }

    /// Apply the terminal check: a won board fixes the score at ±50 and
    /// resets the visits. Running it twice changes nothing.
    pub fn classify<R>(&mut self, rules: &R, perspective: &Perspective<P>)
    where
        R: GameRules<Board = B, Player = P> + ?Sized,
    {
        if let Some(score) = perspective.outcome(rules, &self.board) {
            self.total_score = score;
            self.visit_count = 0;
            self.terminal = true;
            self.fixed_score = score;
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Average score, or the raw total for a node that has never been visited.
    #[inline]
    pub fn mean_score(&self) -> f64 {
        if self.visit_count == 0 {
            self.total_score as f64
        } else {
            self.total_score as f64 / self.visit_count as f64
        }
    }

    /// True when this position is already won by the maximizing side.
    #[inline]
    pub fn is_proven_win(&self) -> bool {
        self.terminal && self.fixed_score == WIN_SCORE
    }

    /// UCB1 score used by the parent to choose among its children.
    ///
    /// The parent's player decides the direction of the comparison: the
    /// maximizing side takes the highest score, the opposing side the
    /// lowest. A child reached by a maximizing move therefore gets its
    /// exploration bonus added, one reached by an opposing move gets it
    /// subtracted, and an unvisited child sits at the extreme the parent
    /// is looking for.
    pub fn bandit_score(&self, parent_visits: i64, perspective: &Perspective<P>) -> f64 {
        let toward_max = perspective.is_opposing(self.player);

        if self.visit_count == 0 {
            return if toward_max {
                f64::INFINITY
            } else {
                f64::NEG_INFINITY
            };
        }

        let visits = self.visit_count as f64;
        let exploitation = self.total_score as f64 / visits;
        let mut exploration = EXPLORATION_WEIGHT * ((parent_visits as f64).ln() / visits).sqrt();
        if perspective.is_maximizing(self.player) {
            exploration = -exploration;
        }

        let score = exploitation + exploration;
        if score.is_finite() {
            score
        } else if toward_max {
            SCORE_SENTINEL
        } else {
            -SCORE_SENTINEL
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::WIN_SCORE;
    use crate::test_game::{board_from, TicTacToe, O, X};

    fn perspective() -> Perspective<u8> {
        Perspective::new(&TicTacToe, X)
    }

    fn node_for(player: u8) -> SearchNode<[u8; 9], u8> {
        SearchNode::new(&TicTacToe, &perspective(), [0; 9], player)
    }

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_open_position() {
        let node = node_for(X);

        assert!(node.is_root());
        assert!(!node.terminal);
        assert!(!node.is_expanded());
        assert_eq!(node.total_score, 0);
        assert_eq!(node.visit_count, 0);
        assert!(node.children.is_empty());
    }

    #[test]
    fn test_terminal_scoring_at_construction() {
        let p = perspective();

        let lost = SearchNode::new(&TicTacToe, &p, board_from("OOO XX. X.."), X);
        assert!(lost.terminal);
        assert_eq!(lost.total_score, -WIN_SCORE);
        assert_eq!(lost.fixed_score, -WIN_SCORE);
        assert_eq!(lost.visit_count, 0);

        let won = SearchNode::new(&TicTacToe, &p, board_from("XXX OO. ..."), O);
        assert!(won.terminal);
        assert_eq!(won.total_score, WIN_SCORE);
        assert_eq!(won.visit_count, 0);

        assert!(won.is_proven_win());
        assert!(!lost.is_proven_win());
        let open = SearchNode::new(&TicTacToe, &p, board_from("XX. OO. ..."), X);
        assert!(!open.is_proven_win());
    }

    #[test]
    fn test_classify_is_idempotent() {
        let p = perspective();
        let mut node = SearchNode::new(&TicTacToe, &p, board_from("XXX OO. ..."), O);
        node.classify(&TicTacToe, &p);
        assert!(node.terminal);
        assert_eq!(node.total_score, WIN_SCORE);

        let mut open = node_for(X);
        open.classify(&TicTacToe, &p);
        assert!(!open.terminal);
        assert_eq!(open.total_score, 0);
    }

    #[test]
    fn test_mean_score() {
        let mut node = node_for(X);

        // Unvisited nodes report their raw total
        node.total_score = -50;
        assert!((node.mean_score() - (-50.0)).abs() < 1e-9);

        node.visit_count = 4;
        node.total_score = 100;
        assert!((node.mean_score() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_unvisited_bandit_score_orientation() {
        let p = perspective();

        // O to move: reached by a maximizing move, parent maximizes
        assert_eq!(node_for(O).bandit_score(10, &p), f64::INFINITY);
        // X to move: reached by an opposing move, parent minimizes
        assert_eq!(node_for(X).bandit_score(10, &p), f64::NEG_INFINITY);
    }

    #[test]
    fn test_bandit_score_value() {
        let p = perspective();

        let mut node = node_for(O);
        node.visit_count = 4;
        node.total_score = 100;

        // 25 + 50 * sqrt(ln(16) / 4)
        let expected = 25.0 + 50.0 * ((16f64).ln() / 4.0).sqrt();
        assert!((node.bandit_score(16, &p) - expected).abs() < 1e-9);

        // Same statistics for a node the minimizing parent chooses among
        let mut node = node_for(X);
        node.visit_count = 4;
        node.total_score = 100;
        let expected = 25.0 - 50.0 * ((16f64).ln() / 4.0).sqrt();
        assert!((node.bandit_score(16, &p) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_bandit_score_single_parent_visit_is_pure_average() {
        let p = perspective();
        let mut node = node_for(O);
        node.visit_count = 1;
        node.total_score = -50;

        // ln(1) = 0 removes the exploration term
        assert!((node.bandit_score(1, &p) - (-50.0)).abs() < 1e-9);
    }

    #[test]
    fn test_bandit_score_overflow_uses_sentinel() {
        let p = perspective();

        // ln(0) makes the exploration term NaN
        let mut node = node_for(O);
        node.visit_count = 1;
        assert_eq!(node.bandit_score(0, &p), SCORE_SENTINEL);

        let mut node = node_for(X);
        node.visit_count = 1;
        assert_eq!(node.bandit_score(0, &p), -SCORE_SENTINEL);
    }
}
