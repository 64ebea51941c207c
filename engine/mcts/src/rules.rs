//! The game-rules contract the search is written against.
//!
//! The engine never inspects a board itself. Everything it knows about the
//! game comes through [`GameRules`]: which positions follow from a position,
//! whether a side has won, and who moves next. Scores are always signed from
//! one fixed [`Perspective`], regardless of whose turn it is.

use std::fmt::Debug;

use rand::Rng;
use rand_chacha::ChaCha20Rng;

/// Score credited for a win of the maximizing side (negated for the opposing side).
pub const WIN_SCORE: i64 = 50;

/// Fixed scoring orientation for one search.
///
/// Positive scores favor `maximizing` (the side the engine plays), negative
/// scores favor `opposing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perspective<P> {
    maximizing: P,
    opposing: P,
}

impl<P: Copy + Eq> Perspective<P> {
    /// Build the perspective of the side the engine is searching for.
    pub fn new<R>(rules: &R, maximizing: P) -> Self
    where
        R: GameRules<Player = P> + ?Sized,
    {
        Self {
            maximizing,
            opposing: rules.other_player(maximizing),
        }
    }

    #[inline]
    pub fn maximizing(&self) -> P {
        self.maximizing
    }

    #[inline]
    pub fn opposing(&self) -> P {
        self.opposing
    }

    #[inline]
    pub fn is_maximizing(&self, player: P) -> bool {
        player == self.maximizing
    }

    #[inline]
    pub fn is_opposing(&self, player: P) -> bool {
        player == self.opposing
    }

    /// Fixed score of `board` if either side already has a winning configuration.
    ///
    /// The opposing side is checked first; the rules are trusted to report
    /// at most one winner.
    pub fn outcome<R>(&self, rules: &R, board: &R::Board) -> Option<i64>
    where
        R: GameRules<Player = P> + ?Sized,
    {
        if rules.has_won(board, self.opposing) {
            Some(-WIN_SCORE)
        } else if rules.has_won(board, self.maximizing) {
            Some(WIN_SCORE)
        } else {
            None
        }
    }
}

/// Rules collaborator for a deterministic two-player zero-sum game.
///
/// `Board` values must be independent copies: `Clone` is the deep copy the
/// search relies on, and no position may alias another.
pub trait GameRules {
    type Board: Clone + Debug;
    type Player: Copy + Eq + Debug;

    /// All positions reachable by one legal move of `player`, in a fixed
    /// deterministic order.
    fn legal_next_positions(&self, board: &Self::Board, player: Self::Player) -> Vec<Self::Board>;

    /// Whether `side` has a winning configuration on `board`.
    fn has_won(&self, board: &Self::Board, side: Self::Player) -> bool;

    /// The opponent of `player`.
    fn other_player(&self, player: Self::Player) -> Self::Player;

    /// Play one random game from `board` and score the final position.
    ///
    /// `last_mover` is the player whose move produced `board`; the playout
    /// starts with its opponent. Returns [`WIN_SCORE`] if the maximizing side
    /// ends up winning, `-WIN_SCORE` if the opposing side does and `0` when
    /// the legal moves run out first.
    fn rollout(
        &self,
        board: &Self::Board,
        last_mover: Self::Player,
        perspective: Perspective<Self::Player>,
        rng: &mut ChaCha20Rng,
    ) -> i64 {
        if let Some(score) = perspective.outcome(self, board) {
            return score;
        }

        let mut mover = self.other_player(last_mover);
        let mut current = board.clone();
        let mut moves = self.legal_next_positions(&current, mover);

        while !moves.is_empty() {
            let pick = rng.gen_range(0..moves.len());
            current = moves.swap_remove(pick);

            if self.has_won(&current, mover) {
                break;
            }

            mover = self.other_player(mover);
            moves = self.legal_next_positions(&current, mover);
        }

        perspective.outcome(self, &current).unwrap_or(0)
    }
}
