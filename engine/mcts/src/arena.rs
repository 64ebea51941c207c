//! Node storage with arena allocation.
//!
//! Nodes are stored in a contiguous Vec and referenced by NodeId indices.
//! A parent owns its children list; children point back to the parent with
//! a plain index, which keeps upward walks cheap and the structure acyclic
//! from the borrow checker's point of view.

use crate::node::{NodeId, SearchNode};
use crate::rules::{GameRules, Perspective};

/// Arena holding every node of one search tree.
#[derive(Debug)]
pub struct NodeArena<B, P> {
    /// Arena storing all nodes
    nodes: Vec<SearchNode<B, P>>,

    /// Root node index (always 0)
    root: NodeId,
}

impl<B, P: Copy + Eq> NodeArena<B, P> {
    /// Create an arena holding only `root`.
    pub fn new(root: SearchNode<B, P>) -> Self {
        debug_assert!(root.is_root(), "root node must not have a parent");
        Self {
            nodes: vec![root],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &SearchNode<B, P> {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<B, P> {
        &mut self.nodes[id.0 as usize]
    }

    /// Get the total number of nodes in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if arena is empty (never true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Link `child` as the next child of `parent_id`.
    ///
    /// Sets the back-reference, makes the child's player the opponent of
    /// the parent's, and re-runs the terminal check.
    pub fn attach<R>(
        &mut self,
        rules: &R,
        perspective: &Perspective<P>,
        parent_id: NodeId,
        mut child: SearchNode<B, P>,
    ) -> NodeId
    where
        R: GameRules<Board = B, Player = P> + ?Sized,
    {
        let child_id = NodeId(self.nodes.len() as u32);

        child.parent = parent_id;
        child.player = rules.other_player(self.get(parent_id).player);
        child.classify(rules, perspective);

        self.nodes.push(child);
        self.get_mut(parent_id).children.push(child_id);

        child_id
    }

    /// Add `score` and one visit to `node_id` and every ancestor up to the root.
    pub fn backpropagate(&mut self, node_id: NodeId, score: i64) {
        let mut current = node_id;

        while current.is_some() {
            let node = self.get_mut(current);
            node.total_score += score;
            node.visit_count += 1;
            current = node.parent;
        }
    }

    /// Choose the child of `node_id` the descent continues into.
    ///
    /// The maximizing side takes the child with the highest bandit score,
    /// the opposing side the lowest. Ties go to the earliest child.
    ///
    /// # Panics
    /// If the node has no children.
    pub fn select_child(&self, node_id: NodeId, perspective: &Perspective<P>) -> NodeId {
        let node = self.get(node_id);
        let maximize = perspective.is_maximizing(node.player);

        let mut children = node.children.iter().map(|&id| {
            let score = self.get(id).bandit_score(node.visit_count, perspective);
            (id, score)
        });

        let (mut best_id, mut best_score) = children
            .next()
            .expect("selection requires at least one child");

        for (id, score) in children {
            let better = if maximize {
                score > best_score
            } else {
                score < best_score
            };
            if better {
                best_id = id;
                best_score = score;
            }
        }

        best_id
    }

    /// Root child with the highest average score (raw total when unvisited).
    ///
    /// A sampled child can average a full win on lucky rollouts, so among
    /// equal averages a proven win ranks first. Remaining ties go to the
    /// earliest child. None if the root has no children.
    pub fn best_root_child(&self) -> Option<(NodeId, f64)> {
        let mut best: Option<(NodeId, f64, bool)> = None;

        for &id in &self.get(self.root).children {
            let node = self.get(id);
            let score = node.mean_score();
            let proven = node.is_proven_win();
            let better = match best {
                None => true,
                Some((_, best_score, best_proven)) => {
                    score > best_score || (score == best_score && proven && !best_proven)
                }
            };
            if better {
                best = Some((id, score, proven));
            }
        }

        best.map(|(id, score, _)| (id, score))
    }

    /// Number of edges between `node_id` and the root.
    pub fn depth(&self, node_id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.get(node_id).parent;
        while current.is_some() {
            depth += 1;
            current = self.get(current).parent;
        }
        depth
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_score: root.mean_score(),
            max_depth: self.compute_max_depth(),
        }
    }

    fn compute_max_depth(&self) -> usize {
        // Children are always allocated after their parent, so one forward
        // pass sees every parent's depth before its children.
        let mut depths = vec![0usize; self.nodes.len()];
        let mut max_depth = 0;

        for (index, node) in self.nodes.iter().enumerate() {
            if node.parent.is_some() {
                depths[index] = depths[node.parent.0 as usize] + 1;
                max_depth = max_depth.max(depths[index]);
            }
        }

        max_depth
    }
}

/// Statistics about a search tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: i64,
    pub root_score: f64,
    pub max_depth: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_game::{board_from, Board, TicTacToe, O, X};

    fn perspective() -> Perspective<u8> {
        Perspective::new(&TicTacToe, X)
    }

    fn arena_with_root(board: Board, player: u8) -> NodeArena<Board, u8> {
        NodeArena::new(SearchNode::new(&TicTacToe, &perspective(), board, player))
    }

    fn add_child(arena: &mut NodeArena<Board, u8>, parent: NodeId, board: Board) -> NodeId {
        let p = perspective();
        // Player is overwritten by attach
        let child = SearchNode::new(&TicTacToe, &p, board, X);
        arena.attach(&TicTacToe, &p, parent, child)
    }

    #[test]
    fn test_new_arena() {
        let arena = arena_with_root([0; 9], X);

        assert_eq!(arena.len(), 1);
        assert!(!arena.is_empty());
        assert_eq!(arena.root(), NodeId(0));
        assert!(arena.get(arena.root()).parent.is_none());
    }

    #[test]
    fn test_attach_links_both_directions() {
        let mut arena = arena_with_root([0; 9], X);
        let root = arena.root();

        let first = add_child(&mut arena, root, board_from("X.. ... ..."));
        let second = add_child(&mut arena, root, board_from(".X. ... ..."));

        assert_eq!(arena.get(root).children, vec![first, second]);
        assert_eq!(arena.get(first).parent, root);
        assert_eq!(arena.get(second).parent, root);
        // Opponent of the root's player moves next
        assert_eq!(arena.get(first).player, O);
    }

    #[test]
    fn test_attach_classifies_terminal_child() {
        let mut arena = arena_with_root(board_from("XX. OO. ..."), X);
        let root = arena.root();

        let winning = add_child(&mut arena, root, board_from("XXX OO. ..."));
        let child = arena.get(winning);
        assert!(child.terminal);
        assert_eq!(child.total_score, 50);
        assert_eq!(child.visit_count, 0);
    }

    #[test]
    fn test_backpropagate_reaches_root() {
        let mut arena = arena_with_root([0; 9], X);
        let root = arena.root();

        // Create a chain: root -> child -> grandchild, plus an unrelated sibling
        let child = add_child(&mut arena, root, board_from("X.. ... ..."));
        let sibling = add_child(&mut arena, root, board_from(".X. ... ..."));
        let grandchild = add_child(&mut arena, child, board_from("XO. ... ..."));

        arena.backpropagate(grandchild, -50);

        for id in [grandchild, child, root] {
            assert_eq!(arena.get(id).visit_count, 1);
            assert_eq!(arena.get(id).total_score, -50);
        }
        assert_eq!(arena.get(sibling).visit_count, 0);
        assert_eq!(arena.get(sibling).total_score, 0);
    }

    #[test]
    fn test_select_child_prefers_unvisited() {
        let p = perspective();
        let mut arena = arena_with_root([0; 9], X);
        let root = arena.root();

        let visited = add_child(&mut arena, root, board_from("X.. ... ..."));
        let unvisited = add_child(&mut arena, root, board_from(".X. ... ..."));

        // A visited child with a perfect record still loses to an unexplored one
        for _ in 0..10 {
            arena.backpropagate(visited, 50);
        }

        assert_eq!(arena.select_child(root, &p), unvisited);
    }

    #[test]
    fn test_select_child_direction_follows_player() {
        let p = perspective();

        // Maximizing side to move: highest score wins
        let mut arena = arena_with_root([0; 9], X);
        let root = arena.root();
        let low = add_child(&mut arena, root, board_from("X.. ... ..."));
        let high = add_child(&mut arena, root, board_from(".X. ... ..."));
        arena.backpropagate(low, -50);
        arena.backpropagate(high, 50);
        assert_eq!(arena.select_child(root, &p), high);

        // Opposing side to move: lowest score wins
        let mut arena = arena_with_root(board_from("X.. ... ..."), O);
        let root = arena.root();
        let low = add_child(&mut arena, root, board_from("XO. ... ..."));
        let high = add_child(&mut arena, root, board_from("X.O ... ..."));
        arena.backpropagate(low, -50);
        arena.backpropagate(high, 50);
        assert_eq!(arena.select_child(root, &p), low);
    }

    #[test]
    fn test_select_child_ties_go_to_first() {
        let p = perspective();
        let mut arena = arena_with_root([0; 9], X);
        let root = arena.root();

        let first = add_child(&mut arena, root, board_from("X.. ... ..."));
        add_child(&mut arena, root, board_from(".X. ... ..."));
        add_child(&mut arena, root, board_from("..X ... ..."));

        // All unvisited: every child scores +inf
        assert_eq!(arena.select_child(root, &p), first);
    }

    #[test]
    #[should_panic(expected = "at least one child")]
    fn test_select_child_without_children_panics() {
        let arena = arena_with_root([0; 9], X);
        arena.select_child(arena.root(), &perspective());
    }

    #[test]
    fn test_best_root_child() {
        let mut arena = arena_with_root([0; 9], X);
        let root = arena.root();
        assert!(arena.best_root_child().is_none());

        let a = add_child(&mut arena, root, board_from("X.. ... ..."));
        let b = add_child(&mut arena, root, board_from(".X. ... ..."));
        let c = add_child(&mut arena, root, board_from("..X ... ..."));

        // a: 2 visits averaging 0; b: 2 visits averaging 25; c: 1 visit at 25
        arena.backpropagate(a, 50);
        arena.backpropagate(a, -50);
        arena.backpropagate(b, 50);
        arena.backpropagate(b, 0);
        arena.backpropagate(c, 25);

        let (best, score) = arena.best_root_child().unwrap();
        assert_eq!(best, b);
        assert!((score - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_root_child_uses_raw_total_when_unvisited() {
        let mut arena = arena_with_root(board_from("XX. OO. ..."), X);
        let root = arena.root();

        let open = add_child(&mut arena, root, board_from("XX. OO. X.."));
        let winning = add_child(&mut arena, root, board_from("XXX OO. ..."));
        arena.backpropagate(open, 0);

        let (best, score) = arena.best_root_child().unwrap();
        assert_eq!(best, winning);
        assert!((score - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_best_root_child_prefers_proven_win_on_equal_average() {
        // X completes the bottom row with the last empty cell
        let mut arena = arena_with_root(board_from("... OO. XX."), X);
        let root = arena.root();

        let lucky = add_child(&mut arena, root, board_from("X.. OO. XX."));
        let quiet = add_child(&mut arena, root, board_from(".X. OO. XX."));
        let winning = add_child(&mut arena, root, board_from("... OO. XXX"));
        assert!(arena.get(winning).is_proven_win());
        assert!(!arena.get(lucky).is_proven_win());

        // One rollout from the earlier child happened to end in a win
        arena.backpropagate(lucky, 50);
        arena.backpropagate(quiet, 50);
        arena.backpropagate(quiet, 50);

        let (best, score) = arena.best_root_child().unwrap();
        assert_eq!(best, winning);
        assert_eq!(score, 50.0);

        // Once visited, the proven win still averages exactly the win score
        arena.get_mut(winning).total_score = 0;
        arena.backpropagate(winning, 50);
        let (best, score) = arena.best_root_child().unwrap();
        assert_eq!(best, winning);
        assert_eq!(score, 50.0);
    }

    #[test]
    fn test_depth_and_stats() {
        let mut arena = arena_with_root([0; 9], X);
        let root = arena.root();
        let child = add_child(&mut arena, root, board_from("X.. ... ..."));
        let grandchild = add_child(&mut arena, child, board_from("XO. ... ..."));
        add_child(&mut arena, root, board_from(".X. ... ..."));

        assert_eq!(arena.depth(root), 0);
        assert_eq!(arena.depth(grandchild), 2);

        arena.backpropagate(grandchild, 50);
        let stats = arena.stats();
        assert_eq!(stats.total_nodes, 4);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.root_visits, 1);
        assert!((stats.root_score - 50.0).abs() < 1e-9);
    }
}
